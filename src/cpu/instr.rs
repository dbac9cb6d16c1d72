use std::fmt;
use std::sync::Arc;

use crate::cpu::operand::{
  Bit, Operand, Read16, Read8, ReadBool, ReadI8, ReadWrite16, ReadWrite8,
  Write16, Write8,
};
use crate::error::Result;
use crate::state::State;

type Exec = Box<dyn Fn(&mut State) -> Result<bool> + Send + Sync>;

/// A named operation with its semantic function.
///
/// `F` is one of the function pointer types below. It fixes how many operands
/// the operation takes and which capabilities each of them must have.
#[derive(Clone, Copy)]
pub struct Operation<F> {
  pub name: &'static str,
  pub f: F,
}

/// Bind an operation to a tuple of operands, producing an `Instruction`.
pub trait Bind<Args> {
  fn bind(&self, args: Args) -> Instruction;
}

/// Operations return `()`, or for conditional control flow whether the
/// branch was taken.
trait Taken {
  fn taken(self) -> bool;
}

impl Taken for () {
  fn taken(self) -> bool {
    false
  }
}

impl Taken for bool {
  fn taken(self) -> bool {
    self
  }
}

macro_rules! signatures {
  ($($sig:ident($($x:ident: $T:ident => $cap:ident),*) -> $ret:ty;)*) => {$(
    pub type $sig = fn(&mut State $(, &dyn $cap)*) -> Result<$ret>;

    impl<$($T),*> Bind<($($T,)*)> for Operation<$sig>
    where
      $($T: $cap + 'static,)*
    {
      fn bind(&self, ($($x,)*): ($($T,)*)) -> Instruction {
        $(let $x = Arc::new($x);)*
        let operands: Vec<Arc<dyn Operand>> =
          vec![$($x.clone() as Arc<dyn Operand>),*];
        let f = self.f;
        Instruction::new(
          self.name,
          operands,
          Box::new(move |st: &mut State| f(st $(, &*$x)*).map(Taken::taken)),
        )
      }
    }
  )*};
}

signatures! {
  Op0() -> ();
  OpR8(x: X => Read8) -> ();
  OpRW8(x: X => ReadWrite8) -> ();
  OpRW8R8(x: X => ReadWrite8, y: Y => Read8) -> ();
  OpW8R8(x: X => Write8, y: Y => Read8) -> ();
  OpR16(x: X => Read16) -> ();
  OpW16(x: X => Write16) -> ();
  OpRW16(x: X => ReadWrite16) -> ();
  OpRW16R16(x: X => ReadWrite16, y: Y => Read16) -> ();
  OpW16R16(x: X => Write16, y: Y => Read16) -> ();
  OpRW16I8(x: X => ReadWrite16, y: Y => ReadI8) -> ();
  OpW16I8(x: X => Write16, y: Y => ReadI8) -> ();
  OpI8(x: X => ReadI8) -> ();
  OpBitR8(x: X => Bit, y: Y => Read8) -> ();
  OpBitRW8(x: X => Bit, y: Y => ReadWrite8) -> ();
  OpBool(x: X => ReadBool) -> bool;
  OpBoolI8(x: X => ReadBool, y: Y => ReadI8) -> bool;
  OpBool16(x: X => ReadBool, y: Y => Read16) -> bool;
}

/// An operation bound to its operands, with its cycle cost.
pub struct Instruction {
  name: &'static str,
  operands: Vec<Arc<dyn Operand>>,
  size: u16,
  cycles: u32,
  taken_cycles: u32,
  exec: Exec,
}

impl Instruction {
  fn new(
    name: &'static str,
    operands: Vec<Arc<dyn Operand>>,
    exec: Exec,
  ) -> Instruction {
    let size = operands.iter().map(|o| o.size()).sum();
    Instruction {
      name,
      operands,
      size,
      cycles: 4,
      taken_cycles: 4,
      exec,
    }
  }

  /// Set the cost in T-cycles.
  pub fn cycles(mut self, cycles: u32) -> Instruction {
    self.cycles = cycles;
    self.taken_cycles = cycles;
    self
  }

  /// Set the cost when a conditional branch is taken.
  pub fn taken(mut self, cycles: u32) -> Instruction {
    self.taken_cycles = cycles;
    self
  }

  pub fn name(&self) -> &'static str {
    self.name
  }

  /// Operand bytes following the opcode.
  pub fn size(&self) -> u16 {
    self.size
  }

  /// (not taken, taken) cost in T-cycles.
  pub fn cost(&self) -> (u32, u32) {
    (self.cycles, self.taken_cycles)
  }

  /// Disassemble against the current state. Immediates are only meaningful
  /// once PC has been advanced past them.
  pub fn describe(&self, st: &State) -> String {
    let operands: Vec<String> =
      self.operands.iter().map(|o| o.describe(st)).collect();
    if operands.is_empty() {
      self.name.to_string()
    } else {
      format!("{} {}", self.name, operands.join(", "))
    }
  }

  /// Run the instruction and return the cycles it took.
  pub fn execute(&self, st: &mut State) -> Result<u32> {
    if (self.exec)(st)? {
      Ok(self.taken_cycles)
    } else {
      Ok(self.cycles)
    }
  }
}

impl fmt::Debug for Instruction {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Instruction")
      .field("name", &self.name)
      .field("size", &self.size)
      .field("cycles", &self.cost())
      .finish()
  }
}
