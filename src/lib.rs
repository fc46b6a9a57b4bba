/*!
  A fixed-layout instruction codec for register-based Dalvik-style bytecode.

  Decoding takes an opcode, a byte buffer, and an offset, and produces a validated
  `Instruction`. Encoding writes the instruction back to an `OutputSink` byte for byte.
  Instructions that reference pool items hold an `ItemHandle` and consult an `ItemResolver`
  for the item's index at encode time.
*/

#[macro_use] extern crate prettytable;
#[macro_use] extern crate lazy_static;

pub mod bytecode;
pub mod error;
pub mod hexdump;
pub mod itempool;
pub mod listing;
pub mod reference;

pub use bytecode::{
  assemble, decode_at, decode_instruction, disassemble, Format, Instruction, Instruction35mi,
  Instruction52c, Opcode, OutputSink
};
pub use error::CodecError;
pub use itempool::ItemPool;
pub use reference::{ItemHandle, ItemResolver};
