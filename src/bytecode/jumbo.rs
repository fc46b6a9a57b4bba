/*!
  The header shared by every jumbo-reference format: the extended opcode and a 32-bit index
  into the item pool.

  ```text
  [0] 0xFF marker
  [1] low byte of the extended opcode
  [2-5] item index, u32
  ```

  Formats embed a `JumboReference` and append their own operands after byte 5.
*/

use super::binary::{decode_unsigned_int, OutputSink};
use super::opcode::{Opcode, EXTENDED_OPCODE_MARKER};
use crate::error::CodecError;
use crate::reference::{ItemHandle, ItemResolver};

pub const JUMBO_HEADER_SIZE: usize = 6;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct JumboReference {
  pub opcode: Opcode,
  pub item: ItemHandle,
}

impl JumboReference {

  /// Reads the header at `offset` and looks the stored index up in `items`.
  pub(crate) fn decode<R: ItemResolver + ?Sized>(
      opcode : Opcode,
      buffer : &[u8],
      offset : usize,
      items  : &R
    ) -> Result<JumboReference, CodecError> {
    let index = decode_unsigned_int(buffer, offset + 2);
    match items.item_at(index) {
      Some(item) => Ok(JumboReference { opcode, item }),
      None => Err(CodecError::UnknownItemIndex { index, offset })
    }
  }

  /// The pool index of the referenced item. Fails if the pool has not assigned one yet.
  pub fn resolve<R: ItemResolver + ?Sized>(&self, items: &R) -> Result<u32, CodecError> {
    items
      .index_of(self.item)
      .ok_or(CodecError::UnresolvedReference { opcode: self.opcode })
  }

  /// Writes the header with an index already obtained from `resolve`.
  pub(crate) fn write_header<S: OutputSink + ?Sized>(&self, out: &mut S, index: u32) {
    out.write_byte(EXTENDED_OPCODE_MARKER);
    out.write_byte(self.opcode.low_byte());
    out.write_int(index);
  }
}
