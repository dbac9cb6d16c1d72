//! Opcode table construction.
//!
//! Instructions are described by 8-character binary templates. `i` marks the
//! bits of the first variable field and `j` those of the second; each field is
//! filled with the index of an operand in its group. `00ii0001` with the
//! group {BC, DE, HL, SP} expands to LD BC,nn at 0x01 up to LD SP,nn at 0x31.

use crate::cpu::instr::{Bind, Instruction};
use crate::cpu::operand::{
  BitIndex, Condition, HighPage, Imm16, Imm8, ImmI8, Mem, Mem16, Read8,
  Relative, SpOffset, Target8, Vector,
};
use crate::cpu::ops::*;
use crate::cpu::{Reg16, Reg8};
use crate::error::{Error, Result, Table};

const R1: [Reg16; 2] = [Reg16::BC, Reg16::DE];
const R2: [Reg16; 4] = [Reg16::BC, Reg16::DE, Reg16::HL, Reg16::SP];
const R3: [Reg16; 4] = [Reg16::BC, Reg16::DE, Reg16::HL, Reg16::AF];
const D: [Target8; 8] = [
  Target8::Reg(Reg8::B),
  Target8::Reg(Reg8::C),
  Target8::Reg(Reg8::D),
  Target8::Reg(Reg8::E),
  Target8::Reg(Reg8::H),
  Target8::Reg(Reg8::L),
  Target8::IndirectHL,
  Target8::Reg(Reg8::A),
];
const F: [Condition; 4] =
  [Condition::NZ, Condition::Z, Condition::NC, Condition::C];
const N: [u8; 8] = [0, 1, 2, 3, 4, 5, 6, 7];

/// The eight arithmetic operations sharing the `10iiijjj` and `11iii110`
/// encodings.
#[derive(Debug, Clone, Copy)]
enum Alu {
  Add,
  Adc,
  Sub,
  Sbc,
  And,
  Xor,
  Or,
  Cp,
}

const ALU: [Alu; 8] = [
  Alu::Add,
  Alu::Adc,
  Alu::Sub,
  Alu::Sbc,
  Alu::And,
  Alu::Xor,
  Alu::Or,
  Alu::Cp,
];

impl Alu {
  /// ADD, ADC and SBC name A explicitly; the others imply it.
  fn bind<O: Read8 + 'static>(self, y: O) -> Instruction {
    let a = Reg8::A;
    match self {
      Alu::Add => ADD.bind((a, y)),
      Alu::Adc => ADC.bind((a, y)),
      Alu::Sub => SUB.bind((y,)),
      Alu::Sbc => SBC.bind((a, y)),
      Alu::And => AND.bind((y,)),
      Alu::Xor => XOR.bind((y,)),
      Alu::Or => OR.bind((y,)),
      Alu::Cp => CP.bind((y,)),
    }
  }
}

/// Fill the `i` and `j` fields of `template` with `fields` and parse the
/// result as a byte.
fn expand(template: &str, fields: &[usize]) -> Result<u8> {
  let bad = || Error::BadPattern(template.to_string());
  if template.len() != 8 {
    return Err(bad());
  }

  let mut bits = String::with_capacity(8);
  for (n, &value) in fields.iter().enumerate() {
    let marker = [b'i', b'j'].get(n).copied().ok_or_else(bad)?;
    let width = template.bytes().filter(|&b| b == marker).count();
    if width == 0 || value >= 1 << width {
      return Err(bad());
    }
  }
  let mut seen = [0usize; 2];
  for b in template.bytes() {
    let field = match b {
      b'0' | b'1' => {
        bits.push(b as char);
        continue;
      }
      b'i' => 0,
      b'j' => 1,
      _ => return Err(bad()),
    };
    let value = *fields.get(field).ok_or_else(bad)?;
    let width = template.bytes().filter(|&c| c == b).count();
    let shift = width - 1 - seen[field];
    seen[field] += 1;
    bits.push(if (value >> shift) & 1 != 0 { '1' } else { '0' });
  }
  u8::from_str_radix(&bits, 2).map_err(|_| bad())
}

/// One of the two tables while it is being filled.
struct Builder {
  table: Table,
  slots: Vec<Option<Instruction>>,
}

impl Builder {
  fn new(table: Table) -> Builder {
    Builder {
      table,
      slots: (0..256).map(|_| None).collect(),
    }
  }

  fn insert(&mut self, opcode: u8, instr: Instruction) -> Result<()> {
    let prefix = match self.table {
      Table::Primary => 1,
      Table::Extended => 2,
    };
    let len = prefix + instr.size();
    if len > 3 {
      return Err(Error::BadLength {
        table: self.table,
        opcode,
        len,
      });
    }
    let slot = &mut self.slots[opcode as usize];
    if slot.is_some() {
      return Err(Error::DuplicateOpcode {
        table: self.table,
        opcode,
      });
    }
    *slot = Some(instr);
    Ok(())
  }

  fn add(&mut self, template: &str, instr: Instruction) -> Result<()> {
    let opcode = expand(template, &[])?;
    self.insert(opcode, instr)
  }

  fn add1<T, G>(&mut self, template: &str, group: &[T], gen: G) -> Result<()>
  where
    T: Copy,
    G: Fn(T) -> Instruction,
  {
    for (i, &x) in group.iter().enumerate() {
      let opcode = expand(template, &[i])?;
      self.insert(opcode, gen(x))?;
    }
    Ok(())
  }

  /// `gen` returns None for combinations that encode something else.
  fn add2<T, U, G>(
    &mut self,
    template: &str,
    first: &[T],
    second: &[U],
    gen: G,
  ) -> Result<()>
  where
    T: Copy,
    U: Copy,
    G: Fn(T, U) -> Option<Instruction>,
  {
    for (i, &x) in first.iter().enumerate() {
      for (j, &y) in second.iter().enumerate() {
        if let Some(instr) = gen(x, y) {
          let opcode = expand(template, &[i, j])?;
          self.insert(opcode, instr)?;
        }
      }
    }
    Ok(())
  }
}

/// The primary and the 0xCB-prefixed opcode tables.
pub struct OpcodeTables {
  primary: Vec<Option<Instruction>>,
  extended: Vec<Option<Instruction>>,
}

impl OpcodeTables {
  pub fn build() -> Result<OpcodeTables> {
    let tables = OpcodeTables {
      primary: primary()?.slots,
      extended: extended()?.slots,
    };
    debug!(
      "built opcode tables: {} primary, {} extended",
      tables.count(Table::Primary),
      tables.count(Table::Extended)
    );
    Ok(tables)
  }

  pub fn get(&self, table: Table, opcode: u8) -> Option<&Instruction> {
    let slots = match table {
      Table::Primary => &self.primary,
      Table::Extended => &self.extended,
    };
    slots[opcode as usize].as_ref()
  }

  /// Number of assigned opcodes.
  pub fn count(&self, table: Table) -> usize {
    (0..=0xffu8).filter(|&op| self.get(table, op).is_some()).count()
  }
}

fn primary() -> Result<Builder> {
  let mut t = Builder::new(Table::Primary);
  let (a, hl, sp) = (Reg8::A, Reg16::HL, Reg16::SP);

  t.add("00000000", NOP.bind(()))?;
  t.add("00010000", STOP.bind((Imm8,)))?;
  t.add("01110110", HALT.bind(()))?;
  t.add("11110011", DI.bind(()))?;
  t.add("11111011", EI.bind(()))?;

  // 16-bit loads and arithmetic
  t.add("00001000", LD16.bind((Mem16(Imm16), sp)).cycles(20))?;
  t.add1("00ii0001", &R2, |r| LD16.bind((r, Imm16)).cycles(12))?;
  t.add1("00ii1001", &R2, |r| ADD16.bind((hl, r)).cycles(8))?;
  t.add1("00ii0011", &R2, |r| INC16.bind((r,)).cycles(8))?;
  t.add1("00ii1011", &R2, |r| DEC16.bind((r,)).cycles(8))?;
  t.add1("11ii0001", &R3, |r| POP.bind((r,)).cycles(12))?;
  t.add1("11ii0101", &R3, |r| PUSH.bind((r,)).cycles(16))?;
  t.add("11101000", ADD_SP.bind((sp, ImmI8)).cycles(16))?;
  t.add("11111000", LD_SP_OFFSET.bind((hl, SpOffset)).cycles(12))?;
  t.add("11111001", LD16.bind((sp, hl)).cycles(8))?;

  // 8-bit loads
  t.add1("000i0010", &R1, |r| LD.bind((Mem(r), a)).cycles(8))?;
  t.add1("000i1010", &R1, |r| LD.bind((a, Mem(r))).cycles(8))?;
  t.add("00100010", LDI.bind((Mem(hl), a)).cycles(8))?;
  t.add("00101010", LDI.bind((a, Mem(hl))).cycles(8))?;
  t.add("00110010", LDD.bind((Mem(hl), a)).cycles(8))?;
  t.add("00111010", LDD.bind((a, Mem(hl))).cycles(8))?;
  t.add1("00iii110", &D, |d| {
    LD.bind((d, Imm8)).cycles(8 + d.extra_cycles())
  })?;
  t.add2("01iiijjj", &D, &D, |x, y| match (x, y) {
    (Target8::IndirectHL, Target8::IndirectHL) => None,
    _ => Some(
      LD.bind((x, y))
        .cycles(4 + x.extra_cycles() + y.extra_cycles()),
    ),
  })?;
  t.add("11100000", LDH.bind((Mem(HighPage(Imm8)), a)).cycles(12))?;
  t.add("11110000", LDH.bind((a, Mem(HighPage(Imm8)))).cycles(12))?;
  t.add("11100010", LD.bind((Mem(HighPage(Reg8::C)), a)).cycles(8))?;
  t.add("11110010", LD.bind((a, Mem(HighPage(Reg8::C)))).cycles(8))?;
  t.add("11101010", LD.bind((Mem(Imm16), a)).cycles(16))?;
  t.add("11111010", LD.bind((a, Mem(Imm16))).cycles(16))?;

  // 8-bit arithmetic
  t.add1("00iii100", &D, |d| INC.bind((d,)).cycles(4 + 2 * d.extra_cycles()))?;
  t.add1("00iii101", &D, |d| DEC.bind((d,)).cycles(4 + 2 * d.extra_cycles()))?;
  t.add2("10iiijjj", &ALU, &D, |op, d| {
    Some(op.bind(d).cycles(4 + d.extra_cycles()))
  })?;
  t.add1("11iii110", &ALU, |op| op.bind(Imm8).cycles(8))?;
  t.add("00100111", DAA.bind(()))?;
  t.add("00101111", CPL.bind(()))?;
  t.add("00110111", SCF.bind(()))?;
  t.add("00111111", CCF.bind(()))?;

  // Accumulator rotates
  t.add("00000111", RLCA.bind(()))?;
  t.add("00001111", RRCA.bind(()))?;
  t.add("00010111", RLA.bind(()))?;
  t.add("00011111", RRA.bind(()))?;

  // Control flow
  t.add("00011000", JR.bind((Relative,)).cycles(12))?;
  t.add1("001ii000", &F, |cc| {
    JR_IF.bind((cc, Relative)).cycles(8).taken(12)
  })?;
  t.add("11000011", JP.bind((Imm16,)).cycles(16))?;
  t.add1("110ii010", &F, |cc| JP_IF.bind((cc, Imm16)).cycles(12).taken(16))?;
  t.add("11101001", JP.bind((hl,)))?;
  t.add("11001101", CALL.bind((Imm16,)).cycles(24))?;
  t.add1("110ii100", &F, |cc| {
    CALL_IF.bind((cc, Imm16)).cycles(12).taken(24)
  })?;
  t.add("11001001", RET.bind(()).cycles(16))?;
  t.add1("110ii000", &F, |cc| RET_IF.bind((cc,)).cycles(8).taken(20))?;
  t.add("11011001", RETI.bind(()).cycles(16))?;
  t.add1("11iii111", &N, |n| {
    RST.bind((Vector(u16::from(n) << 3),)).cycles(16)
  })?;

  Ok(t)
}

fn extended() -> Result<Builder> {
  let mut t = Builder::new(Table::Extended);
  let shifts = [RLC, RRC, RL, RR, SLA, SRA, SWAP, SRL];

  t.add2("00iiijjj", &shifts, &D, |op, d| {
    Some(op.bind((d,)).cycles(8 + 2 * d.extra_cycles()))
  })?;
  t.add2("01iiijjj", &N, &D, |n, d| {
    Some(BIT.bind((BitIndex(n), d)).cycles(8 + d.extra_cycles()))
  })?;
  t.add2("10iiijjj", &N, &D, |n, d| {
    Some(RES.bind((BitIndex(n), d)).cycles(8 + 2 * d.extra_cycles()))
  })?;
  t.add2("11iiijjj", &N, &D, |n, d| {
    Some(SET.bind((BitIndex(n), d)).cycles(8 + 2 * d.extra_cycles()))
  })?;

  Ok(t)
}
