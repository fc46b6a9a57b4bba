/*!
  Format 35mi: an inline-method invoke with up to five nibble-sized argument registers.

  ```text
  [0] opcode
  [1] count:4 (high) | A:4 (low)
  [2-3] inline method index, u16
  [4] E:4 (high) | D:4 (low)
  [5] G:4 (high) | F:4 (low)
  ```

  Registers are passed in the order D, E, F, G, A; `register_count` says how many are used.
*/

use std::fmt::{Display, Formatter};

use super::binary::{
  decode_high_nibble, decode_low_nibble, decode_unsigned_short, encode_nibbles, OutputSink
};
use super::opcode::{Format, Opcode};
use crate::error::CodecError;

pub const MAX_REGISTER_COUNT: u8 = 5;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Instruction35mi {
  opcode: Opcode,
  register_count: u8,
  register_a: u8,
  register_d: u8,
  register_e: u8,
  register_f: u8,
  register_g: u8,
  inline_index: u16,
}

impl Instruction35mi {

  /**
    Builds the instruction from explicit operands. Registers must fit in four bits, the count
    may not exceed five, and the inline index must fit in sixteen bits. Nothing is stored
    unless every check passes.
  */
  #[allow(clippy::too_many_arguments)]
  pub fn new(
      opcode         : Opcode,
      register_count : u8,
      register_d     : u8,
      register_e     : u8,
      register_f     : u8,
      register_g     : u8,
      register_a     : u8,
      inline_index   : u32
    ) -> Result<Instruction35mi, CodecError> {
    opcode.require_format(Format::Format35mi)?;

    if register_count > MAX_REGISTER_COUNT {
      return Err(CodecError::InvalidOperand {
        field: "register_count",
        value: register_count as u32,
        max: MAX_REGISTER_COUNT as u32
      });
    }

    let registers = [
      ("register_d", register_d),
      ("register_e", register_e),
      ("register_f", register_f),
      ("register_g", register_g),
      ("register_a", register_a),
    ];
    for (field, register) in registers.iter() {
      if *register >= 1 << 4 {
        return Err(CodecError::field_width(*field, *register as u32, 4));
      }
    }

    if inline_index >= 1 << 16 {
      return Err(CodecError::field_width("inline_index", inline_index, 16));
    }

    Ok(Instruction35mi {
      opcode,
      register_count,
      register_a,
      register_d,
      register_e,
      register_f,
      register_g,
      inline_index: inline_index as u16,
    })
  }

  /// Decodes the six bytes at `offset`. The caller guarantees they are present. Every field is
  /// bounded by the width it is extracted at, so nothing is re-validated here.
  pub(crate) fn decode(opcode: Opcode, buffer: &[u8], offset: usize) -> Instruction35mi {
    Instruction35mi {
      opcode,
      register_count: decode_high_nibble(buffer[offset + 1]),
      register_a: decode_low_nibble(buffer[offset + 1]),
      register_d: decode_low_nibble(buffer[offset + 4]),
      register_e: decode_high_nibble(buffer[offset + 4]),
      register_f: decode_low_nibble(buffer[offset + 5]),
      register_g: decode_high_nibble(buffer[offset + 5]),
      inline_index: decode_unsigned_short(buffer, offset + 2),
    }
  }

  pub fn encode<S: OutputSink + ?Sized>(&self, out: &mut S) {
    out.write_byte(self.opcode.low_byte());
    out.write_byte(encode_nibbles(self.register_count, self.register_a));
    out.write_short(self.inline_index);
    out.write_byte(encode_nibbles(self.register_e, self.register_d));
    out.write_byte(encode_nibbles(self.register_g, self.register_f));
  }

  pub fn opcode(&self) -> Opcode {
    self.opcode
  }

  pub fn register_count(&self) -> u8 {
    self.register_count
  }

  pub fn register_a(&self) -> u8 {
    self.register_a
  }

  pub fn register_d(&self) -> u8 {
    self.register_d
  }

  pub fn register_e(&self) -> u8 {
    self.register_e
  }

  pub fn register_f(&self) -> u8 {
    self.register_f
  }

  pub fn register_g(&self) -> u8 {
    self.register_g
  }

  pub fn inline_index(&self) -> u16 {
    self.inline_index
  }

  /// The argument registers actually in use, in call order.
  pub fn registers(&self) -> Vec<u8> {
    [
      self.register_d,
      self.register_e,
      self.register_f,
      self.register_g,
      self.register_a,
    ].iter()
     .take(self.register_count as usize)
     .cloned()
     .collect()
  }
}

impl Display for Instruction35mi {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(
      f,
      "{} {{{}}}, inline@{}",
      self.opcode,
      self.registers()
          .iter()
          .map(|r| format!("v{}", r))
          .collect::<Vec<String>>()
          .join(", "),
      self.inline_index
    )
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  fn sample() -> Instruction35mi {
    Instruction35mi::new(Opcode::ExecuteInline, 3, 1, 2, 3, 0, 4, 0x1234).unwrap()
  }

  #[test]
  fn encode_layout(){
    let mut out: Vec<u8> = Vec::new();
    sample().encode(&mut out);
    assert_eq!(out, vec![0xEE, 0x34, 0x34, 0x12, 0x21, 0x03]);
  }

  #[test]
  fn decode_layout(){
    let buffer = [0x00, 0x00, 0xEE, 0x34, 0x34, 0x12, 0x21, 0x03];
    let decoded = Instruction35mi::decode(Opcode::ExecuteInline, &buffer, 2);
    assert_eq!(decoded, sample());
    assert_eq!(decoded.register_count(), 3);
    assert_eq!(decoded.register_a(), 4);
    assert_eq!(decoded.register_d(), 1);
    assert_eq!(decoded.register_e(), 2);
    assert_eq!(decoded.register_f(), 3);
    assert_eq!(decoded.register_g(), 0);
    assert_eq!(decoded.inline_index(), 0x1234);
  }

  #[test]
  fn count_and_a_share_a_byte(){
    let buffer = [0xEE, 0x53, 0x00, 0x00, 0x00, 0x00];
    let decoded = Instruction35mi::decode(Opcode::ExecuteInline, &buffer, 0);
    assert_eq!(decoded.register_count(), 5);
    assert_eq!(decoded.register_a(), 3);
  }

  #[test]
  fn decode_keeps_out_of_range_count(){
    // A count nibble above five is carried through untouched so the bytes re-encode as read.
    let buffer = [0xEE, 0xF0, 0xFF, 0xFF, 0xFF, 0xFF];
    let decoded = Instruction35mi::decode(Opcode::ExecuteInline, &buffer, 0);
    assert_eq!(decoded.register_count(), 15);
    let mut out: Vec<u8> = Vec::new();
    decoded.encode(&mut out);
    assert_eq!(out, buffer.to_vec());
  }

  #[test]
  fn boundary_values_accepted(){
    let i = Instruction35mi::new(Opcode::ExecuteInline, 5, 15, 15, 15, 15, 15, 65535).unwrap();
    let mut out: Vec<u8> = Vec::new();
    i.encode(&mut out);
    assert_eq!(out, vec![0xEE, 0x5F, 0xFF, 0xFF, 0xFF, 0xFF]);
  }

  #[test]
  fn register_count_above_five_rejected(){
    assert_eq!(
      Instruction35mi::new(Opcode::ExecuteInline, 6, 0, 0, 0, 0, 0, 0),
      Err(CodecError::InvalidOperand { field: "register_count", value: 6, max: 5 })
    );
  }

  #[test]
  fn wide_register_rejected(){
    assert_eq!(
      Instruction35mi::new(Opcode::ExecuteInline, 5, 0, 0, 16, 0, 0, 0),
      Err(CodecError::InvalidOperand { field: "register_f", value: 16, max: 15 })
    );
    assert_eq!(
      Instruction35mi::new(Opcode::ExecuteInline, 1, 0, 0, 0, 0, 16, 0),
      Err(CodecError::InvalidOperand { field: "register_a", value: 16, max: 15 })
    );
  }

  #[test]
  fn wide_inline_index_rejected(){
    assert_eq!(
      Instruction35mi::new(Opcode::ExecuteInline, 0, 0, 0, 0, 0, 0, 65536),
      Err(CodecError::InvalidOperand { field: "inline_index", value: 65536, max: 65535 })
    );
  }

  #[test]
  fn wrong_opcode_rejected(){
    assert_eq!(
      Instruction35mi::new(Opcode::IgetJumbo, 0, 0, 0, 0, 0, 0, 0),
      Err(CodecError::FormatMismatch {
        opcode: Opcode::IgetJumbo,
        format: Format::Format52c,
        expected: Format::Format35mi
      })
    );
  }

  #[test]
  fn display_lists_used_registers(){
    assert_eq!(sample().to_string(), "execute-inline {v1, v2, v3}, inline@4660");
  }
}
