//! The operation catalog.
//!
//! Each operation is a plain function over the machine state and its
//! operands. Compound instructions are built by calling the simpler ones:
//! CALL pushes PC and jumps, RETI enables interrupts and returns, and so on.

use crate::cpu::instr::*;
use crate::cpu::operand::{
  Bit, Read16, Read8, ReadBool, ReadI8, ReadWrite16, ReadWrite8, Write16,
  Write8,
};
use crate::cpu::{
  borrow, carry, carry16, half_borrow, half_carry, half_carry16, Flag, Reg16,
  Reg8,
};
use crate::error::Result;
use crate::state::State;

macro_rules! ops {
  ($($op:ident: $sig:ident = $name:expr, $f:ident;)*) => {$(
    pub const $op: Operation<$sig> = Operation { name: $name, f: $f };
  )*};
}

ops! {
  NOP: Op0 = "NOP", nop;
  HALT: Op0 = "HALT", halt;
  STOP: OpR8 = "STOP", stop;
  DI: Op0 = "DI", di;
  EI: Op0 = "EI", ei;

  LD: OpW8R8 = "LD", ld;
  LDI: OpW8R8 = "LDI", ldi;
  LDD: OpW8R8 = "LDD", ldd;
  LDH: OpW8R8 = "LDH", ld;
  LD16: OpW16R16 = "LD", ld16;
  LD_SP_OFFSET: OpW16I8 = "LD", ld_sp_offset;
  PUSH: OpR16 = "PUSH", push;
  POP: OpW16 = "POP", pop;

  ADD: OpRW8R8 = "ADD", add;
  ADC: OpRW8R8 = "ADC", adc;
  SUB: OpR8 = "SUB", sub;
  SBC: OpRW8R8 = "SBC", sbc;
  AND: OpR8 = "AND", and;
  XOR: OpR8 = "XOR", xor;
  OR: OpR8 = "OR", or;
  CP: OpR8 = "CP", cp;
  INC: OpRW8 = "INC", inc;
  DEC: OpRW8 = "DEC", dec;

  ADD16: OpRW16R16 = "ADD", add16;
  ADD_SP: OpRW16I8 = "ADD", add_sp;
  INC16: OpRW16 = "INC", inc16;
  DEC16: OpRW16 = "DEC", dec16;

  DAA: Op0 = "DAA", daa;
  CPL: Op0 = "CPL", cpl;
  SCF: Op0 = "SCF", scf;
  CCF: Op0 = "CCF", ccf;

  RLCA: Op0 = "RLCA", rlca;
  RRCA: Op0 = "RRCA", rrca;
  RLA: Op0 = "RLA", rla;
  RRA: Op0 = "RRA", rra;
  RLC: OpRW8 = "RLC", rlc;
  RRC: OpRW8 = "RRC", rrc;
  RL: OpRW8 = "RL", rl;
  RR: OpRW8 = "RR", rr;
  SLA: OpRW8 = "SLA", sla;
  SRA: OpRW8 = "SRA", sra;
  SWAP: OpRW8 = "SWAP", swap;
  SRL: OpRW8 = "SRL", srl;

  BIT: OpBitR8 = "BIT", bit;
  RES: OpBitRW8 = "RES", res;
  SET: OpBitRW8 = "SET", set;

  JP: OpR16 = "JP", jp;
  JP_IF: OpBool16 = "JP", jp_if;
  JR: OpI8 = "JR", jr;
  JR_IF: OpBoolI8 = "JR", jr_if;
  CALL: OpR16 = "CALL", call;
  CALL_IF: OpBool16 = "CALL", call_if;
  RST: OpR16 = "RST", call;
  RET: Op0 = "RET", ret;
  RET_IF: OpBool = "RET", ret_if;
  RETI: Op0 = "RETI", reti;
}

// Control

fn nop(_: &mut State) -> Result<()> {
  Ok(())
}

fn halt(st: &mut State) -> Result<()> {
  st.halted = true;
  Ok(())
}

/// STOP is followed by a padding byte. Without a display that can be turned
/// off, it waits for an interrupt like HALT.
fn stop(st: &mut State, _: &dyn Read8) -> Result<()> {
  halt(st)
}

fn di(st: &mut State) -> Result<()> {
  st.ime = false;
  Ok(())
}

fn ei(st: &mut State) -> Result<()> {
  st.ime = true;
  Ok(())
}

// Loads

fn ld(st: &mut State, x: &dyn Write8, y: &dyn Read8) -> Result<()> {
  let v = y.read8(st)?;
  x.write8(st, v)
}

/// LD then HL += 1.
fn ldi(st: &mut State, x: &dyn Write8, y: &dyn Read8) -> Result<()> {
  ld(st, x, y)?;
  inc16(st, &Reg16::HL)
}

/// LD then HL -= 1.
fn ldd(st: &mut State, x: &dyn Write8, y: &dyn Read8) -> Result<()> {
  ld(st, x, y)?;
  dec16(st, &Reg16::HL)
}

fn ld16(st: &mut State, x: &dyn Write16, y: &dyn Read16) -> Result<()> {
  let v = y.read16(st)?;
  x.write16(st, v)
}

/// SP plus a signed offset. The flags come from the unsigned addition of the
/// offset byte to the low byte of SP.
fn sp_offset(st: &mut State, e: i8) -> u16 {
  let sp = st.regs.sp();
  let lo = sp as u8;
  let e8 = e as u8;
  st.regs
    .set_flags(false, false, half_carry(lo, e8, false), carry(lo, e8, false));
  sp.wrapping_add(e as i16 as u16)
}

fn ld_sp_offset(st: &mut State, x: &dyn Write16, y: &dyn ReadI8) -> Result<()> {
  let e = y.read_i8(st)?;
  let v = sp_offset(st, e);
  x.write16(st, v)
}

fn add_sp(st: &mut State, x: &dyn ReadWrite16, y: &dyn ReadI8) -> Result<()> {
  let e = y.read_i8(st)?;
  let v = sp_offset(st, e);
  x.write16(st, v)
}

fn push(st: &mut State, x: &dyn Read16) -> Result<()> {
  let v = x.read16(st)?;
  st.push(v)
}

fn pop(st: &mut State, x: &dyn Write16) -> Result<()> {
  let v = st.pop()?;
  x.write16(st, v)
}

// 8-bit arithmetic

fn add_with_carry(
  st: &mut State,
  x: &dyn ReadWrite8,
  y: &dyn Read8,
  c: bool,
) -> Result<()> {
  let a = x.read8(st)?;
  let b = y.read8(st)?;
  let r = a.wrapping_add(b).wrapping_add(u8::from(c));
  st.regs
    .set_flags(r == 0, false, half_carry(a, b, c), carry(a, b, c));
  x.write8(st, r)
}

fn add(st: &mut State, x: &dyn ReadWrite8, y: &dyn Read8) -> Result<()> {
  add_with_carry(st, x, y, false)
}

fn adc(st: &mut State, x: &dyn ReadWrite8, y: &dyn Read8) -> Result<()> {
  let c = st.regs.c();
  add_with_carry(st, x, y, c)
}

/// Set the flags for `a - b - c` and return the difference.
fn compare(st: &mut State, a: u8, b: u8, c: bool) -> u8 {
  let r = a.wrapping_sub(b).wrapping_sub(u8::from(c));
  st.regs
    .set_flags(r == 0, true, half_borrow(a, b, c), borrow(a, b, c));
  r
}

/// Compare A with `y` and return the difference.
fn cp_diff(st: &mut State, y: &dyn Read8) -> Result<u8> {
  let a = st.regs.a();
  let b = y.read8(st)?;
  Ok(compare(st, a, b, false))
}

fn cp(st: &mut State, y: &dyn Read8) -> Result<()> {
  cp_diff(st, y).map(|_| ())
}

/// CP then store the difference in A.
fn sub(st: &mut State, y: &dyn Read8) -> Result<()> {
  let r = cp_diff(st, y)?;
  st.regs.set_a(r);
  Ok(())
}

fn sbc(st: &mut State, x: &dyn ReadWrite8, y: &dyn Read8) -> Result<()> {
  let a = x.read8(st)?;
  let b = y.read8(st)?;
  let c = st.regs.c();
  let r = compare(st, a, b, c);
  x.write8(st, r)
}

fn and(st: &mut State, y: &dyn Read8) -> Result<()> {
  let r = st.regs.a() & y.read8(st)?;
  st.regs.set_a(r);
  st.regs.set_flags(r == 0, false, true, false);
  Ok(())
}

fn xor(st: &mut State, y: &dyn Read8) -> Result<()> {
  let r = st.regs.a() ^ y.read8(st)?;
  st.regs.set_a(r);
  st.regs.set_flags(r == 0, false, false, false);
  Ok(())
}

fn or(st: &mut State, y: &dyn Read8) -> Result<()> {
  let r = st.regs.a() | y.read8(st)?;
  st.regs.set_a(r);
  st.regs.set_flags(r == 0, false, false, false);
  Ok(())
}

fn inc(st: &mut State, x: &dyn ReadWrite8) -> Result<()> {
  let v = x.read8(st)?;
  let r = v.wrapping_add(1);
  let c = st.regs.c();
  st.regs.set_flags(r == 0, false, half_carry(v, 1, false), c);
  x.write8(st, r)
}

fn dec(st: &mut State, x: &dyn ReadWrite8) -> Result<()> {
  let v = x.read8(st)?;
  let r = v.wrapping_sub(1);
  let c = st.regs.c();
  st.regs.set_flags(r == 0, true, half_borrow(v, 1, false), c);
  x.write8(st, r)
}

// 16-bit arithmetic

fn add16(st: &mut State, x: &dyn ReadWrite16, y: &dyn Read16) -> Result<()> {
  let a = x.read16(st)?;
  let b = y.read16(st)?;
  let z = st.regs.z();
  st.regs
    .set_flags(z, false, half_carry16(a, b), carry16(a, b));
  x.write16(st, a.wrapping_add(b))
}

fn inc16(st: &mut State, x: &dyn ReadWrite16) -> Result<()> {
  let v = x.read16(st)?;
  x.write16(st, v.wrapping_add(1))
}

fn dec16(st: &mut State, x: &dyn ReadWrite16) -> Result<()> {
  let v = x.read16(st)?;
  x.write16(st, v.wrapping_sub(1))
}

// Miscellaneous

/// Adjust A to packed BCD after an addition or a subtraction.
fn daa(st: &mut State) -> Result<()> {
  let mut a = st.regs.a();
  let n = st.regs.n();
  let mut c = st.regs.c();
  let h = st.regs.h();
  if !n {
    if c || a > 0x99 {
      a = a.wrapping_add(0x60);
      c = true;
    }
    if h || (a & 0x0f) > 0x09 {
      a = a.wrapping_add(0x06);
    }
  } else {
    if c {
      a = a.wrapping_sub(0x60);
    }
    if h {
      a = a.wrapping_sub(0x06);
    }
  }
  st.regs.set_a(a);
  st.regs.set_flags(a == 0, n, false, c);
  Ok(())
}

fn cpl(st: &mut State) -> Result<()> {
  let a = !st.regs.a();
  st.regs.set_a(a);
  st.regs.set_flag(Flag::N, true);
  st.regs.set_flag(Flag::H, true);
  Ok(())
}

fn scf(st: &mut State) -> Result<()> {
  let z = st.regs.z();
  st.regs.set_flags(z, false, false, true);
  Ok(())
}

fn ccf(st: &mut State) -> Result<()> {
  let z = st.regs.z();
  let c = st.regs.c();
  st.regs.set_flags(z, false, false, !c);
  Ok(())
}

// Rotates and shifts

/// Apply `f` to the operand. `f` gets the value and the old carry and returns
/// the result and the bit shifted out.
fn shift<F>(st: &mut State, x: &dyn ReadWrite8, f: F) -> Result<()>
where
  F: Fn(u8, bool) -> (u8, bool),
{
  let v = x.read8(st)?;
  let (r, out) = f(v, st.regs.c());
  st.regs.set_flags(r == 0, false, false, out);
  x.write8(st, r)
}

fn rlc(st: &mut State, x: &dyn ReadWrite8) -> Result<()> {
  shift(st, x, |v, _| (v.rotate_left(1), v & 0x80 != 0))
}

fn rrc(st: &mut State, x: &dyn ReadWrite8) -> Result<()> {
  shift(st, x, |v, _| (v.rotate_right(1), v & 0x01 != 0))
}

fn rl(st: &mut State, x: &dyn ReadWrite8) -> Result<()> {
  shift(st, x, |v, c| ((v << 1) | u8::from(c), v & 0x80 != 0))
}

fn rr(st: &mut State, x: &dyn ReadWrite8) -> Result<()> {
  shift(st, x, |v, c| ((v >> 1) | (u8::from(c) << 7), v & 0x01 != 0))
}

fn sla(st: &mut State, x: &dyn ReadWrite8) -> Result<()> {
  shift(st, x, |v, _| (v << 1, v & 0x80 != 0))
}

fn sra(st: &mut State, x: &dyn ReadWrite8) -> Result<()> {
  shift(st, x, |v, _| ((v >> 1) | (v & 0x80), v & 0x01 != 0))
}

fn srl(st: &mut State, x: &dyn ReadWrite8) -> Result<()> {
  shift(st, x, |v, _| (v >> 1, v & 0x01 != 0))
}

fn swap(st: &mut State, x: &dyn ReadWrite8) -> Result<()> {
  shift(st, x, |v, _| (v.rotate_left(4), false))
}

/// The accumulator forms never set Z.
fn rotate_a(
  st: &mut State,
  f: fn(&mut State, &dyn ReadWrite8) -> Result<()>,
) -> Result<()> {
  f(st, &Reg8::A)?;
  st.regs.set_flag(Flag::Z, false);
  Ok(())
}

fn rlca(st: &mut State) -> Result<()> {
  rotate_a(st, rlc)
}

fn rrca(st: &mut State) -> Result<()> {
  rotate_a(st, rrc)
}

fn rla(st: &mut State) -> Result<()> {
  rotate_a(st, rl)
}

fn rra(st: &mut State) -> Result<()> {
  rotate_a(st, rr)
}

// Single bits

fn bit(st: &mut State, n: &dyn Bit, x: &dyn Read8) -> Result<()> {
  let set = x.read8(st)? & (1 << n.bit()) != 0;
  let c = st.regs.c();
  st.regs.set_flags(!set, false, true, c);
  Ok(())
}

fn res(st: &mut State, n: &dyn Bit, x: &dyn ReadWrite8) -> Result<()> {
  let v = x.read8(st)? & !(1 << n.bit());
  x.write8(st, v)
}

fn set(st: &mut State, n: &dyn Bit, x: &dyn ReadWrite8) -> Result<()> {
  let v = x.read8(st)? | (1 << n.bit());
  x.write8(st, v)
}

// Jumps

fn jp(st: &mut State, x: &dyn Read16) -> Result<()> {
  ld16(st, &Reg16::PC, x)
}

fn jp_if(st: &mut State, cc: &dyn ReadBool, x: &dyn Read16) -> Result<bool> {
  if !cc.read_bool(st)? {
    return Ok(false);
  }
  jp(st, x)?;
  Ok(true)
}

fn jr(st: &mut State, e: &dyn ReadI8) -> Result<()> {
  let pc = st.regs.pc().wrapping_add(e.read_i8(st)? as i16 as u16);
  st.regs.set_pc(pc);
  Ok(())
}

fn jr_if(st: &mut State, cc: &dyn ReadBool, e: &dyn ReadI8) -> Result<bool> {
  if !cc.read_bool(st)? {
    return Ok(false);
  }
  jr(st, e)?;
  Ok(true)
}

/// PUSH PC then JP.
fn call(st: &mut State, x: &dyn Read16) -> Result<()> {
  let target = x.read16(st)?;
  push(st, &Reg16::PC)?;
  st.regs.set_pc(target);
  Ok(())
}

fn call_if(st: &mut State, cc: &dyn ReadBool, x: &dyn Read16) -> Result<bool> {
  if !cc.read_bool(st)? {
    return Ok(false);
  }
  call(st, x)?;
  Ok(true)
}

/// POP PC.
fn ret(st: &mut State) -> Result<()> {
  pop(st, &Reg16::PC)
}

fn ret_if(st: &mut State, cc: &dyn ReadBool) -> Result<bool> {
  if !cc.read_bool(st)? {
    return Ok(false);
  }
  ret(st)?;
  Ok(true)
}

/// EI then RET.
fn reti(st: &mut State) -> Result<()> {
  ei(st)?;
  ret(st)
}
