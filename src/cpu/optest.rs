use crate::cpu::{Cpu, Reg16, Reg8};
use crate::error::{Error, Table};
use crate::state::tests::blank_state;
use crate::state::State;

fn init() -> (Cpu, State) {
  let cpu = Cpu::new().unwrap();
  let mut st = blank_state();
  // Set the PC to start in WRAM.
  st.regs.set_pc(0xc000);
  st.regs.set_flags(false, false, false, false);
  (cpu, st)
}

/// Write `code` at PC and run one instruction. Return the cycles taken.
fn exec(cpu: &Cpu, st: &mut State, code: &[u8]) -> u32 {
  let start = st.regs.pc();
  for (i, &b) in code.iter().enumerate() {
    st.wb(start + i as u16, b).unwrap();
  }
  cpu.fetch_decode_execute(st).unwrap()
}

/// Like `exec`, and check the time taken and that PC moved past the
/// instruction.
fn run(cpu: &Cpu, st: &mut State, code: &[u8], time_expected: u32) {
  let start = st.regs.pc();
  let time_actual = exec(cpu, st, code);
  // Test time.
  assert_eq!(time_actual, time_expected);
  // Test that the PC was incremented.
  assert_eq!(st.regs.pc(), start + code.len() as u16);
}

fn flags(st: &State) -> (bool, bool, bool, bool) {
  (st.regs.z(), st.regs.n(), st.regs.h(), st.regs.c())
}

#[test]
fn nop() {
  let (cpu, mut st) = init();
  let before = st.regs.clone();
  run(&cpu, &mut st, &[0x00], 4);
  assert_eq!(st.regs.af(), before.af());
  assert_eq!(st.regs.hl(), before.hl());
}

#[test]
fn ld_r_n() {
  macro_rules! run_test {
    ($reg:expr, $opcode:expr) => {{
      let (cpu, mut st) = init();
      run(&cpu, &mut st, &[$opcode, 0x42], 8);
      assert_eq!(st.regs.get8($reg), 0x42);
      assert_eq!(flags(&st), (false, false, false, false));
    }};
  }
  run_test!(Reg8::B, 0x06);
  run_test!(Reg8::C, 0x0e);
  run_test!(Reg8::D, 0x16);
  run_test!(Reg8::E, 0x1e);
  run_test!(Reg8::H, 0x26);
  run_test!(Reg8::L, 0x2e);
  run_test!(Reg8::A, 0x3e);

  let (cpu, mut st) = init();
  st.regs.set(Reg16::HL, 0xc100);
  run(&cpu, &mut st, &[0x36, 0x99], 12);
  assert_eq!(st.rb(0xc100).unwrap(), 0x99);
}

#[test]
fn ld_r1_r2() {
  macro_rules! reg_reg {
    ($r1:expr, $r2:expr, $opcode:expr) => {{
      let (cpu, mut st) = init();
      st.regs.set8($r2, 0x42);
      run(&cpu, &mut st, &[$opcode], 4);
      assert_eq!(st.regs.get8($r1), 0x42);
      assert_eq!(st.regs.get8($r2), 0x42);
    }};
  }
  reg_reg!(Reg8::A, Reg8::A, 0x7f);
  reg_reg!(Reg8::A, Reg8::B, 0x78);
  reg_reg!(Reg8::A, Reg8::L, 0x7d);
  reg_reg!(Reg8::B, Reg8::C, 0x41);
  reg_reg!(Reg8::C, Reg8::E, 0x4b);
  reg_reg!(Reg8::D, Reg8::H, 0x54);
  reg_reg!(Reg8::E, Reg8::A, 0x5f);
  reg_reg!(Reg8::H, Reg8::D, 0x62);
  reg_reg!(Reg8::L, Reg8::B, 0x68);
}

#[test]
fn ld_through_hl() {
  let (cpu, mut st) = init();
  st.regs.set(Reg16::HL, 0xc200);
  st.regs.set8(Reg8::E, 0x17);
  run(&cpu, &mut st, &[0x73], 8); // LD (HL),E
  assert_eq!(st.rb(0xc200).unwrap(), 0x17);
  run(&cpu, &mut st, &[0x46], 8); // LD B,(HL)
  assert_eq!(st.regs.get8(Reg8::B), 0x17);
}

#[test]
fn ldi_ldd() {
  let (cpu, mut st) = init();
  st.regs.set(Reg16::HL, 0xc300);
  st.regs.set_a(0x11);
  run(&cpu, &mut st, &[0x22], 8); // LDI (HL),A
  assert_eq!(st.rb(0xc300).unwrap(), 0x11);
  assert_eq!(st.regs.hl(), 0xc301);

  run(&cpu, &mut st, &[0x32], 8); // LDD (HL),A
  assert_eq!(st.rb(0xc301).unwrap(), 0x11);
  assert_eq!(st.regs.hl(), 0xc300);

  st.wb(0xc300, 0x22).unwrap();
  run(&cpu, &mut st, &[0x3a], 8); // LDD A,(HL)
  assert_eq!(st.regs.a(), 0x22);
  assert_eq!(st.regs.hl(), 0xc2ff);
}

#[test]
fn ld_high_page() {
  let (cpu, mut st) = init();
  st.regs.set_a(0x5a);
  run(&cpu, &mut st, &[0xe0, 0x80], 12); // LDH (0x80),A
  assert_eq!(st.rb(0xff80).unwrap(), 0x5a);

  st.regs.set8(Reg8::C, 0x80);
  st.regs.set_a(0);
  run(&cpu, &mut st, &[0xf2], 8); // LD A,(C)
  assert_eq!(st.regs.a(), 0x5a);
}

#[test]
fn ld_indirect_words() {
  let (cpu, mut st) = init();
  st.regs.set(Reg16::SP, 0xbeef);
  run(&cpu, &mut st, &[0x08, 0x00, 0xc4], 20); // LD (0xc400),SP
  assert_eq!(st.rw(0xc400).unwrap(), 0xbeef);

  run(&cpu, &mut st, &[0x11, 0x34, 0x12], 12); // LD DE,0x1234
  assert_eq!(st.regs.de(), 0x1234);

  st.regs.set_a(0x77);
  run(&cpu, &mut st, &[0x12], 8); // LD (DE),A
  st.regs.set(Reg16::DE, 0xc500);
  run(&cpu, &mut st, &[0xea, 0x00, 0xc5], 16); // LD (0xc500),A
  st.regs.set_a(0);
  run(&cpu, &mut st, &[0x1a], 8); // LD A,(DE)
  assert_eq!(st.regs.a(), 0x77);
}

#[test]
fn add_a_a_overflow() {
  let (cpu, mut st) = init();
  st.regs.set_a(0x80);
  run(&cpu, &mut st, &[0x87], 4);
  assert_eq!(st.regs.a(), 0x00);
  // 0x0 + 0x0 in the low nibble: no half carry.
  assert_eq!(flags(&st), (true, false, false, true));
}

#[test]
fn add_and_adc() {
  let (cpu, mut st) = init();
  st.regs.set_a(0x0f);
  st.regs.set8(Reg8::B, 0x01);
  run(&cpu, &mut st, &[0x80], 4); // ADD A,B
  assert_eq!(st.regs.a(), 0x10);
  assert_eq!(flags(&st), (false, false, true, false));

  st.regs.set_a(0xff);
  st.regs.set_flags(false, false, false, true);
  run(&cpu, &mut st, &[0xce, 0x00], 8); // ADC A,0
  assert_eq!(st.regs.a(), 0x00);
  assert_eq!(flags(&st), (true, false, true, true));
}

#[test]
fn sub_sbc_cp() {
  let (cpu, mut st) = init();
  st.regs.set_a(0x10);
  run(&cpu, &mut st, &[0xd6, 0x01], 8); // SUB 0x01
  assert_eq!(st.regs.a(), 0x0f);
  assert_eq!(flags(&st), (false, true, true, false));

  st.regs.set_a(0x00);
  st.regs.set_flags(false, false, false, true);
  run(&cpu, &mut st, &[0xde, 0x00], 8); // SBC A,0
  assert_eq!(st.regs.a(), 0xff);
  assert_eq!(flags(&st), (false, true, true, true));

  st.regs.set_a(0x42);
  run(&cpu, &mut st, &[0xfe, 0x42], 8); // CP 0x42
  assert_eq!(st.regs.a(), 0x42);
  assert_eq!(flags(&st), (true, true, false, false));
}

#[test]
fn sub_memory_and_self() {
  let (cpu, mut st) = init();
  st.regs.set(Reg16::HL, 0xc100);
  st.wb(0xc100, 0x21).unwrap();
  st.regs.set_a(0x20);
  run(&cpu, &mut st, &[0x96], 8); // SUB (HL)
  assert_eq!(st.regs.a(), 0xff);
  assert_eq!(flags(&st), (false, true, true, true));
  assert_eq!(st.rb(0xc100).unwrap(), 0x21);

  st.regs.set_a(0x5a);
  run(&cpu, &mut st, &[0x97], 4); // SUB A
  assert_eq!(st.regs.a(), 0x00);
  assert_eq!(flags(&st), (true, true, false, false));
}

#[test]
fn logic() {
  let (cpu, mut st) = init();
  st.regs.set_a(0xf0);
  run(&cpu, &mut st, &[0xe6, 0x0f], 8); // AND 0x0f
  assert_eq!(st.regs.a(), 0x00);
  assert_eq!(flags(&st), (true, false, true, false));

  st.regs.set_a(0xf0);
  run(&cpu, &mut st, &[0xf6, 0x0f], 8); // OR 0x0f
  assert_eq!(st.regs.a(), 0xff);
  assert_eq!(flags(&st), (false, false, false, false));

  run(&cpu, &mut st, &[0xaf], 4); // XOR A
  assert_eq!(st.regs.a(), 0x00);
  assert_eq!(flags(&st), (true, false, false, false));
}

#[test]
fn inc_dec_keep_carry() {
  let (cpu, mut st) = init();
  st.regs.set_flags(false, false, false, true);
  st.regs.set8(Reg8::B, 0x0f);
  run(&cpu, &mut st, &[0x04], 4); // INC B
  assert_eq!(st.regs.get8(Reg8::B), 0x10);
  assert_eq!(flags(&st), (false, false, true, true));

  st.regs.set8(Reg8::C, 0x01);
  run(&cpu, &mut st, &[0x0d], 4); // DEC C
  assert_eq!(st.regs.get8(Reg8::C), 0x00);
  assert_eq!(flags(&st), (true, true, false, true));

  st.regs.set(Reg16::HL, 0xc000 + 0x400);
  st.wb(0xc400, 0x00).unwrap();
  run(&cpu, &mut st, &[0x35], 12); // DEC (HL)
  assert_eq!(st.rb(0xc400).unwrap(), 0xff);
  assert_eq!(flags(&st), (false, true, true, true));
}

#[test]
fn inc_dec_words() {
  let (cpu, mut st) = init();
  st.regs.set(Reg16::BC, 0xffff);
  run(&cpu, &mut st, &[0x03], 8); // INC BC
  assert_eq!(st.regs.bc(), 0x0000);
  run(&cpu, &mut st, &[0x0b], 8); // DEC BC
  assert_eq!(st.regs.bc(), 0xffff);
  assert_eq!(flags(&st), (false, false, false, false));
}

#[test]
fn add_hl() {
  let (cpu, mut st) = init();
  st.regs.set_flags(true, true, false, false);
  st.regs.set(Reg16::HL, 0x0fff);
  st.regs.set(Reg16::BC, 0x0001);
  run(&cpu, &mut st, &[0x09], 8);
  assert_eq!(st.regs.hl(), 0x1000);
  assert_eq!(flags(&st), (true, false, true, false));

  st.regs.set(Reg16::HL, 0x8000);
  run(&cpu, &mut st, &[0x29], 8); // ADD HL,HL
  assert_eq!(st.regs.hl(), 0x0000);
  assert_eq!(flags(&st), (true, false, false, true));
}

#[test]
fn daa() {
  let (cpu, mut st) = init();
  st.regs.set_a(0x45);
  run(&cpu, &mut st, &[0xc6, 0x38], 8); // ADD A,0x38
  run(&cpu, &mut st, &[0x27], 4);
  assert_eq!(st.regs.a(), 0x83);
  assert!(!st.regs.c());

  run(&cpu, &mut st, &[0xd6, 0x38], 8); // SUB 0x38
  run(&cpu, &mut st, &[0x27], 4);
  assert_eq!(st.regs.a(), 0x45);
  assert!(st.regs.n());

  st.regs.set_a(0x99);
  run(&cpu, &mut st, &[0xc6, 0x01], 8);
  run(&cpu, &mut st, &[0x27], 4);
  assert_eq!(st.regs.a(), 0x00);
  assert_eq!(flags(&st), (true, false, false, true));
}

#[test]
fn cpl_scf_ccf() {
  let (cpu, mut st) = init();
  st.regs.set_a(0x35);
  run(&cpu, &mut st, &[0x2f], 4);
  assert_eq!(st.regs.a(), 0xca);
  assert_eq!(flags(&st), (false, true, true, false));

  run(&cpu, &mut st, &[0x37], 4);
  assert_eq!(flags(&st), (false, false, false, true));
  run(&cpu, &mut st, &[0x3f], 4);
  assert_eq!(flags(&st), (false, false, false, false));
}

#[test]
fn accumulator_rotates_clear_z() {
  let (cpu, mut st) = init();
  st.regs.set_a(0x80);
  run(&cpu, &mut st, &[0x07], 4); // RLCA
  assert_eq!(st.regs.a(), 0x01);
  assert_eq!(flags(&st), (false, false, false, true));

  st.regs.set_a(0x80);
  st.regs.set_flags(false, false, false, false);
  run(&cpu, &mut st, &[0x17], 4); // RLA
  assert_eq!(st.regs.a(), 0x00);
  assert_eq!(flags(&st), (false, false, false, true));

  run(&cpu, &mut st, &[0x1f], 4); // RRA
  assert_eq!(st.regs.a(), 0x80);
  assert_eq!(flags(&st), (false, false, false, false));

  st.regs.set_a(0x01);
  run(&cpu, &mut st, &[0x0f], 4); // RRCA
  assert_eq!(st.regs.a(), 0x80);
  assert_eq!(flags(&st), (false, false, false, true));
}

#[test]
fn extended_shifts() {
  let (cpu, mut st) = init();
  st.regs.set8(Reg8::B, 0x00);
  run(&cpu, &mut st, &[0xcb, 0x00], 8); // RLC B
  assert_eq!(flags(&st), (true, false, false, false));

  st.regs.set8(Reg8::D, 0x81);
  run(&cpu, &mut st, &[0xcb, 0x2a], 8); // SRA D
  assert_eq!(st.regs.get8(Reg8::D), 0xc0);
  assert_eq!(flags(&st), (false, false, false, true));

  st.regs.set8(Reg8::E, 0x01);
  run(&cpu, &mut st, &[0xcb, 0x3b], 8); // SRL E
  assert_eq!(st.regs.get8(Reg8::E), 0x00);
  assert_eq!(flags(&st), (true, false, false, true));

  st.regs.set_a(0xf1);
  run(&cpu, &mut st, &[0xcb, 0x37], 8); // SWAP A
  assert_eq!(st.regs.a(), 0x1f);
  assert_eq!(flags(&st), (false, false, false, false));

  st.regs.set(Reg16::HL, 0xc600);
  st.wb(0xc600, 0x40).unwrap();
  run(&cpu, &mut st, &[0xcb, 0x26], 16); // SLA (HL)
  assert_eq!(st.rb(0xc600).unwrap(), 0x80);
  run(&cpu, &mut st, &[0xcb, 0x16], 16); // RL (HL)
  assert_eq!(st.rb(0xc600).unwrap(), 0x00);
  assert_eq!(flags(&st), (true, false, false, true));
  run(&cpu, &mut st, &[0xcb, 0x1e], 16); // RR (HL)
  assert_eq!(st.rb(0xc600).unwrap(), 0x80);
}

#[test]
fn bit_res_set() {
  let (cpu, mut st) = init();
  st.regs.set_flags(false, true, false, true);
  st.regs.set8(Reg8::H, 0x80);
  run(&cpu, &mut st, &[0xcb, 0x7c], 8); // BIT 7,H
  assert_eq!(flags(&st), (false, false, true, true));
  run(&cpu, &mut st, &[0xcb, 0x74], 8); // BIT 6,H
  assert_eq!(flags(&st), (true, false, true, true));

  st.regs.set(Reg16::HL, 0xc700);
  st.wb(0xc700, 0xff).unwrap();
  run(&cpu, &mut st, &[0xcb, 0x46], 12); // BIT 0,(HL)
  assert!(!st.regs.z());
  run(&cpu, &mut st, &[0xcb, 0x86], 16); // RES 0,(HL)
  assert_eq!(st.rb(0xc700).unwrap(), 0xfe);

  st.regs.set_a(0x00);
  run(&cpu, &mut st, &[0xcb, 0xff], 8); // SET 7,A
  assert_eq!(st.regs.a(), 0x80);
}

#[test]
fn jr() {
  let (cpu, mut st) = init();
  assert_eq!(exec(&cpu, &mut st, &[0x18, 0x05]), 12);
  assert_eq!(st.regs.pc(), 0xc007);

  // Backwards, to the JR itself.
  assert_eq!(exec(&cpu, &mut st, &[0x18, 0xfe]), 12);
  assert_eq!(st.regs.pc(), 0xc007);
}

#[test]
fn jr_conditional() {
  let (cpu, mut st) = init();
  st.regs.set_flags(true, false, false, false);
  // JR NZ not taken.
  run(&cpu, &mut st, &[0x20, 0x10], 8);
  assert_eq!(st.regs.pc(), 0xc002);
  // JR Z taken.
  assert_eq!(exec(&cpu, &mut st, &[0x28, 0x10]), 12);
  assert_eq!(st.regs.pc(), 0xc014);
}

#[test]
fn jp() {
  let (cpu, mut st) = init();
  assert_eq!(exec(&cpu, &mut st, &[0xc3, 0x00, 0xd0]), 16);
  assert_eq!(st.regs.pc(), 0xd000);

  st.regs.set_flags(false, false, false, false);
  // JP C not taken.
  run(&cpu, &mut st, &[0xda, 0x00, 0xc0], 12);
  assert_eq!(st.regs.pc(), 0xd003);
  // JP NC taken.
  assert_eq!(exec(&cpu, &mut st, &[0xd2, 0x00, 0xc0]), 16);
  assert_eq!(st.regs.pc(), 0xc000);

  st.regs.set(Reg16::HL, 0xc123);
  assert_eq!(exec(&cpu, &mut st, &[0xe9]), 4);
  assert_eq!(st.regs.pc(), 0xc123);
}

#[test]
fn call_ret() {
  let (cpu, mut st) = init();
  st.regs.set(Reg16::SP, 0xfffe);
  assert_eq!(exec(&cpu, &mut st, &[0xcd, 0x00, 0xd0]), 24);
  assert_eq!(st.regs.pc(), 0xd000);
  assert_eq!(st.regs.sp(), 0xfffc);
  assert_eq!(st.rw(0xfffc).unwrap(), 0xc003);

  assert_eq!(exec(&cpu, &mut st, &[0xc9]), 16);
  assert_eq!(st.regs.pc(), 0xc003);
  assert_eq!(st.regs.sp(), 0xfffe);
}

#[test]
fn call_ret_conditional() {
  let (cpu, mut st) = init();
  st.regs.set(Reg16::SP, 0xfffe);
  st.regs.set_flags(false, false, false, true);
  // CALL NC not taken.
  run(&cpu, &mut st, &[0xd4, 0x00, 0xd0], 12);
  assert_eq!(st.regs.sp(), 0xfffe);
  // CALL C taken.
  assert_eq!(exec(&cpu, &mut st, &[0xdc, 0x00, 0xd0]), 24);
  assert_eq!(st.regs.pc(), 0xd000);
  // RET NC not taken, RET C taken.
  run(&cpu, &mut st, &[0xd0], 8);
  assert_eq!(exec(&cpu, &mut st, &[0xd8]), 20);
  assert_eq!(st.regs.pc(), 0xc006);
}

#[test]
fn rst() {
  let (cpu, mut st) = init();
  st.regs.set(Reg16::SP, 0xfffe);
  assert_eq!(exec(&cpu, &mut st, &[0xff]), 16);
  assert_eq!(st.regs.pc(), 0x0038);
  assert_eq!(st.rw(0xfffc).unwrap(), 0xc001);
}

#[test]
fn reti_enables_interrupts() {
  let (cpu, mut st) = init();
  st.regs.set(Reg16::SP, 0xfffe);
  st.push(0xc100).unwrap();
  assert!(!st.ime);
  assert_eq!(exec(&cpu, &mut st, &[0xd9]), 16);
  assert!(st.ime);
  assert_eq!(st.regs.pc(), 0xc100);
}

#[test]
fn di_ei_halt() {
  let (cpu, mut st) = init();
  run(&cpu, &mut st, &[0xfb], 4);
  assert!(st.ime);
  run(&cpu, &mut st, &[0xf3], 4);
  assert!(!st.ime);
  run(&cpu, &mut st, &[0x76], 4);
  assert!(st.halted);

  let (cpu, mut st) = init();
  run(&cpu, &mut st, &[0x10, 0x00], 4);
  assert!(st.halted);
}

#[test]
fn push_pop_af_masks_flags() {
  let (cpu, mut st) = init();
  st.regs.set(Reg16::SP, 0xfffe);
  st.regs.set(Reg16::BC, 0x12ff);
  run(&cpu, &mut st, &[0xc5], 16); // PUSH BC
  run(&cpu, &mut st, &[0xf1], 12); // POP AF
  assert_eq!(st.regs.af(), 0x12f0);
  assert_eq!(st.regs.sp(), 0xfffe);

  run(&cpu, &mut st, &[0xf5], 16); // PUSH AF
  run(&cpu, &mut st, &[0xd1], 12); // POP DE
  assert_eq!(st.regs.de(), 0x12f0);
}

#[test]
fn add_sp_offset() {
  let (cpu, mut st) = init();
  st.regs.set_flags(true, true, false, false);
  st.regs.set(Reg16::SP, 0xfff8);
  run(&cpu, &mut st, &[0xe8, 0x08], 16);
  assert_eq!(st.regs.sp(), 0x0000);
  assert_eq!(flags(&st), (false, false, true, true));

  run(&cpu, &mut st, &[0xe8, 0xff], 16); // ADD SP,-1
  assert_eq!(st.regs.sp(), 0xffff);
  assert_eq!(flags(&st), (false, false, false, false));
}

#[test]
fn ld_hl_sp_offset() {
  let (cpu, mut st) = init();
  st.regs.set(Reg16::SP, 0xfff8);
  run(&cpu, &mut st, &[0xf8, 0x02], 12);
  assert_eq!(st.regs.hl(), 0xfffa);
  assert_eq!(st.regs.sp(), 0xfff8);
  assert_eq!(flags(&st), (false, false, false, false));

  run(&cpu, &mut st, &[0xf8, 0xfe], 12); // LD HL,SP-2
  assert_eq!(st.regs.hl(), 0xfff6);
  assert_eq!(flags(&st), (false, false, true, true));

  st.regs.set(Reg16::HL, 0xd000);
  run(&cpu, &mut st, &[0xf9], 8); // LD SP,HL
  assert_eq!(st.regs.sp(), 0xd000);
}

#[test]
fn immediate_disassembly_uses_consumed_byte() {
  let (cpu, mut st) = init();
  st.wb(0xc002, 0x99).unwrap();
  run(&cpu, &mut st, &[0x3e, 0x42], 8); // LD A,0x42
  let instr = cpu.tables().get(Table::Primary, 0x3e).unwrap();
  assert_eq!(instr.describe(&st), "LD A, 0x42");
}

#[test]
fn unknown_opcode() {
  let (cpu, mut st) = init();
  st.wb(0xc000, 0xd3).unwrap();
  match cpu.fetch_decode_execute(&mut st) {
    Err(Error::UnresolvedOpcode {
      table: Table::Primary,
      opcode: 0xd3,
      pc: 0xc000,
    }) => (),
    other => panic!("unexpected {:?}", other),
  }
  assert_eq!(st.regs.pc(), 0xc000);
}

#[test]
fn unmapped_access() {
  let (cpu, mut st) = init();
  for &b in &[0xfa, 0x00, 0xa0] {
    let pc = st.regs.pc();
    st.wb(pc, b).unwrap();
    st.regs.set_pc(pc + 1);
  }
  st.regs.set_pc(0xc000);
  match cpu.fetch_decode_execute(&mut st) {
    Err(Error::UnmappedRead {
      addr: 0xa000,
      pc: 0xc003,
    }) => (),
    other => panic!("unexpected {:?}", other),
  }

  // LD (0x2000),A on a cartridge without a bank controller.
  let (cpu, mut st) = init();
  st.regs.set_a(0x01);
  for (i, &b) in [0xea, 0x00, 0x20].iter().enumerate() {
    st.wb(0xc000 + i as u16, b).unwrap();
  }
  match cpu.fetch_decode_execute(&mut st) {
    Err(Error::UnmappedWrite {
      addr: 0x2000,
      value: 0x01,
      pc: 0xc003,
    }) => (),
    other => panic!("unexpected {:?}", other),
  }

  let (cpu, mut st) = init();
  st.regs.set(Reg16::HL, 0xfea0);
  st.regs.set_a(0x12);
  st.wb(0xc000, 0x77).unwrap(); // LD (HL),A
  match cpu.fetch_decode_execute(&mut st) {
    Err(Error::UnmappedWrite {
      addr: 0xfea0,
      value: 0x12,
      ..
    }) => (),
    other => panic!("unexpected {:?}", other),
  }
}
