use log::Level;

use crate::cpu::{Cpu, Instruction, OpcodeTables, Reg16};
use crate::error::{Error, Result, Table};
use crate::state::State;

/// Opcode that selects the extended table for the following byte.
const PREFIX: u8 = 0xcb;

impl Cpu {
  pub fn new() -> Result<Cpu> {
    Ok(Cpu {
      tables: OpcodeTables::build()?,
    })
  }

  pub fn tables(&self) -> &OpcodeTables {
    &self.tables
  }

  /// Run one instruction.
  /// Return the number of cycles it took.
  pub fn fetch_decode_execute(&self, st: &mut State) -> Result<u32> {
    let pc = st.regs.pc();
    let (instr, opcode_size) = self.decode(st, pc)?;

    // At most 3, checked when the tables were built.
    let len = opcode_size + instr.size();
    st.regs.set(Reg16::PC, pc.wrapping_add(len));

    if log_enabled!(Level::Trace) {
      trace!("{}", trace_line(st, pc, len, instr));
    }

    instr.execute(st)
  }

  fn decode(&self, st: &State, pc: u16) -> Result<(&Instruction, u16)> {
    let opcode = st.rb(pc)?;
    let (table, opcode, size) = if opcode == PREFIX {
      (Table::Extended, st.rb(pc.wrapping_add(1))?, 2)
    } else {
      (Table::Primary, opcode, 1)
    };
    match self.tables.get(table, opcode) {
      Some(instr) => Ok((instr, size)),
      None => Err(Error::UnresolvedOpcode { table, opcode, pc }),
    }
  }
}

/// Registers as they were before the instruction, then its bytes and its
/// disassembly. PC has already been advanced so immediates resolve.
fn trace_line(st: &State, pc: u16, len: u16, instr: &Instruction) -> String {
  let regs = &st.regs;
  let bytes: Vec<String> = (0..len)
    .map(|i| match st.rb(pc.wrapping_add(i)) {
      Ok(b) => format!("0x{:02X}", b),
      Err(_) => "????".to_string(),
    })
    .collect();
  format!(
    "PC=0x{:04X} AF=0x{:04X} BC=0x{:04X} DE=0x{:04X} HL=0x{:04X} SP=0x{:04X}\n {:<14} | {}",
    pc,
    regs.af(),
    regs.bc(),
    regs.de(),
    regs.hl(),
    regs.sp(),
    bytes.join(" "),
    instr.describe(st)
  )
}
