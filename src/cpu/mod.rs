mod alu;
mod cpu;
mod instr;
mod operand;
mod ops;
mod reg;
mod table;

#[cfg(test)]
mod optest;

pub use self::alu::{
  borrow, carry, carry16, half_borrow, half_carry, half_carry16,
};
pub use self::instr::{Bind, Instruction, Operation};
pub use self::operand::{
  Bit, BitIndex, Condition, HighPage, Imm16, Imm8, ImmI8, Mem, Mem16,
  Operand, Read16, Read8, ReadBool, ReadI8, ReadWrite16, ReadWrite8, Relative,
  SpOffset, Target8, Vector, Write16, Write8,
};
pub use self::reg::{Flag, Reg16, Reg8, C, H, N, Z};
pub use self::table::OpcodeTables;

/// The register file: AF, BC, DE, HL, PC and SP, indexed by `Reg16`.
///
/// The 8-bit registers and the flags are views over these words.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Registers {
  words: [u16; 6],
}

/// The fetch-decode-execute engine.
///
/// Owns the opcode tables, which are built once by `Cpu::new` and never
/// change afterwards.
pub struct Cpu {
  tables: OpcodeTables,
}
