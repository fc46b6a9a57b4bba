/*!
  Bit-field primitives shared by every format codec, and the output sink they encode into.

  Multi-byte fields are little-endian. Which operand of a nibble pair goes high and which goes
  low is up to each format.

  Decoding is total over in-range offsets. Bounds are the factory's concern: it checks the
  fixed length of the format before any codec reads from the buffer.
*/

/// Extracts the low four bits of `byte`.
#[inline]
pub fn decode_low_nibble(byte: u8) -> u8 {
  byte & 0x0F
}

/// Extracts the high four bits of `byte`.
#[inline]
pub fn decode_high_nibble(byte: u8) -> u8 {
  byte >> 4
}

/// Packs two nibbles into one byte. Bits above the fourth are discarded from both operands.
#[inline]
pub fn encode_nibbles(high: u8, low: u8) -> u8 {
  ((high & 0x0F) << 4) | (low & 0x0F)
}

pub fn decode_unsigned_short(buffer: &[u8], offset: usize) -> u16 {
  u16::from_le_bytes([buffer[offset], buffer[offset + 1]])
}

pub fn decode_unsigned_int(buffer: &[u8], offset: usize) -> u32 {
  u32::from_le_bytes([
    buffer[offset],
    buffer[offset + 1],
    buffer[offset + 2],
    buffer[offset + 3]
  ])
}

/**
  A destination for encoded instructions. Writes append in call order and do not fail; a sink
  backed by fallible I/O is expected to surface its failure itself.

  Only one encode call may write to a given sink at a time. `&mut self` already enforces this
  for safe callers.
*/
pub trait OutputSink {
  fn write_byte(&mut self, value: u8);
  fn write_short(&mut self, value: u16);
  fn write_int(&mut self, value: u32);
}

impl OutputSink for Vec<u8> {
  fn write_byte(&mut self, value: u8) {
    self.push(value);
  }

  fn write_short(&mut self, value: u16) {
    self.extend_from_slice(&value.to_le_bytes());
  }

  fn write_int(&mut self, value: u32) {
    self.extend_from_slice(&value.to_le_bytes());
  }
}
