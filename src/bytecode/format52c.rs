/*!
  Format 52c: two 16-bit registers and a jumbo item reference.

  ```text
  [0-5] jumbo header (marker, opcode, item index)
  [6-7] register A, u16
  [8-9] register B, u16
  ```
*/

use std::fmt::{Display, Formatter};

use super::binary::{decode_unsigned_short, OutputSink};
use super::jumbo::{JumboReference, JUMBO_HEADER_SIZE};
use super::opcode::{Format, Opcode};
use crate::error::CodecError;
use crate::reference::{ItemHandle, ItemResolver};

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Instruction52c {
  reference: JumboReference,
  register_a: u16,
  register_b: u16,
}

impl Instruction52c {

  /// Both registers must fit in sixteen bits. `item` is not checked; whether it has a pool
  /// index only matters once the instruction is encoded.
  pub fn new(
      opcode     : Opcode,
      register_a : u32,
      register_b : u32,
      item       : ItemHandle
    ) -> Result<Instruction52c, CodecError> {
    opcode.require_format(Format::Format52c)?;

    if register_a >= 1 << 16 {
      return Err(CodecError::field_width("register_a", register_a, 16));
    }
    if register_b >= 1 << 16 {
      return Err(CodecError::field_width("register_b", register_b, 16));
    }

    Ok(Instruction52c {
      reference: JumboReference { opcode, item },
      register_a: register_a as u16,
      register_b: register_b as u16,
    })
  }

  pub(crate) fn decode<R: ItemResolver + ?Sized>(
      opcode : Opcode,
      buffer : &[u8],
      offset : usize,
      items  : &R
    ) -> Result<Instruction52c, CodecError> {
    let reference = JumboReference::decode(opcode, buffer, offset, items)?;
    Ok(Instruction52c {
      reference,
      register_a: decode_unsigned_short(buffer, offset + JUMBO_HEADER_SIZE),
      register_b: decode_unsigned_short(buffer, offset + JUMBO_HEADER_SIZE + 2),
    })
  }

  /// Resolves the item index before writing, so an unresolved reference leaves `out` untouched.
  pub fn encode<S, R>(&self, out: &mut S, items: &R) -> Result<(), CodecError>
    where S: OutputSink + ?Sized,
          R: ItemResolver + ?Sized
  {
    let index = self.reference.resolve(items)?;
    self.reference.write_header(out, index);
    out.write_short(self.register_a);
    out.write_short(self.register_b);
    Ok(())
  }

  pub fn opcode(&self) -> Opcode {
    self.reference.opcode
  }

  pub fn referenced_item(&self) -> ItemHandle {
    self.reference.item
  }

  pub fn register_a(&self) -> u16 {
    self.register_a
  }

  pub fn register_b(&self) -> u16 {
    self.register_b
  }
}

impl Display for Instruction52c {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(
      f,
      "{} v{}, v{}, {}@{}",
      self.reference.opcode,
      self.register_a,
      self.register_b,
      self.reference.opcode.reference_type(),
      self.reference.item
    )
  }
}


#[cfg(test)]
mod tests {
  use super::*;
  use crate::itempool::ItemPool;

  fn pool_with_item_at_16() -> (ItemPool, ItemHandle) {
    let mut pool = ItemPool::new();
    let item = pool.intern("LFoo;->count:I");
    pool.assign_index(item, 0x10).unwrap();
    (pool, item)
  }

  #[test]
  fn encode_layout(){
    let (pool, item) = pool_with_item_at_16();
    let i = Instruction52c::new(Opcode::IgetJumbo, 0x00FF, 0x0100, item).unwrap();
    let mut out: Vec<u8> = Vec::new();
    i.encode(&mut out, &pool).unwrap();
    assert_eq!(
      out,
      vec![0xFF, 0x06, 0x10, 0x00, 0x00, 0x00, 0xFF, 0x00, 0x00, 0x01]
    );
  }

  #[test]
  fn decode_layout(){
    let (pool, item) = pool_with_item_at_16();
    let buffer = [0xFF, 0x06, 0x10, 0x00, 0x00, 0x00, 0xFF, 0x00, 0x00, 0x01];
    let decoded = Instruction52c::decode(Opcode::IgetJumbo, &buffer, 0, &pool).unwrap();
    assert_eq!(decoded.register_a(), 255);
    assert_eq!(decoded.register_b(), 256);
    assert_eq!(decoded.referenced_item(), item);
    assert_eq!(decoded.opcode(), Opcode::IgetJumbo);
  }

  #[test]
  fn decode_unknown_index(){
    let (pool, _) = pool_with_item_at_16();
    let buffer = [0xFF, 0x06, 0x11, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00];
    assert_eq!(
      Instruction52c::decode(Opcode::IgetJumbo, &buffer, 0, &pool),
      Err(CodecError::UnknownItemIndex { index: 0x11, offset: 0 })
    );
  }

  #[test]
  fn boundary_registers(){
    let (_, item) = pool_with_item_at_16();
    assert!(Instruction52c::new(Opcode::IputJumbo, 65535, 65535, item).is_ok());
    assert_eq!(
      Instruction52c::new(Opcode::IputJumbo, 65536, 0, item),
      Err(CodecError::InvalidOperand { field: "register_a", value: 65536, max: 65535 })
    );
    assert_eq!(
      Instruction52c::new(Opcode::IputJumbo, 0, 65536, item),
      Err(CodecError::InvalidOperand { field: "register_b", value: 65536, max: 65535 })
    );
  }

  #[test]
  fn unresolved_reference_writes_nothing(){
    let mut pool = ItemPool::new();
    let item = pool.intern("LFoo;");
    let i = Instruction52c::new(Opcode::InstanceOfJumbo, 1, 2, item).unwrap();
    let mut out: Vec<u8> = vec![0xAB];
    assert_eq!(
      i.encode(&mut out, &pool),
      Err(CodecError::UnresolvedReference { opcode: Opcode::InstanceOfJumbo })
    );
    assert_eq!(out, vec![0xAB]);
  }

  #[test]
  fn display_names_reference_kind(){
    let (_, item) = pool_with_item_at_16();
    let i = Instruction52c::new(Opcode::NewArrayJumbo, 3, 4, item).unwrap();
    assert_eq!(i.to_string(), format!("new-array/jumbo v3, v4, type@{}", item));
  }
}
