/*!
  The opcode table: numeric value -> mnemonic -> format.

  Regular opcodes occupy one byte. Extended ("jumbo") opcodes are written as a `0xFF` marker
  byte followed by their low byte, and their numeric value is `0xFF00 | low byte`. Only the
  opcodes whose formats sit next to the codecs in this crate are listed.
*/

use std::convert::TryFrom;

use strum_macros::{Display as StrumDisplay, EnumString, IntoStaticStr};
use num_enum::{TryFromPrimitive, IntoPrimitive};

use crate::error::CodecError;

/// The first byte of every extended opcode.
pub const EXTENDED_OPCODE_MARKER: u8 = 0xFF;

/// Identifies one fixed binary layout. The name spells out the layout: size in 16-bit code
/// units, register count, then the kind of payload.
#[derive(
  StrumDisplay, EnumString, IntoStaticStr,
  Clone, Copy, Eq, PartialEq, Debug, Hash
)]
pub enum Format {
  #[strum(serialize = "35mi")]
  Format35mi,
  #[strum(serialize = "3rmi")]
  Format3rmi,
  #[strum(serialize = "41c")]
  Format41c,
  #[strum(serialize = "52c")]
  Format52c,
}

impl Format {
  /// The encoded length in bytes. Every format has a fixed length.
  pub fn size(&self) -> usize {
    match self {
      Format::Format35mi => 6,
      Format::Format3rmi => 6,
      Format::Format41c  => 8,
      Format::Format52c  => 10,
    }
  }
}

/// What the index carried by an opcode points at.
#[derive(StrumDisplay, Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub enum ReferenceType {
  #[strum(serialize = "type")]
  Type,
  #[strum(serialize = "field")]
  Field,
  /// An index into the VM's fixed table of inlined methods, not into the item pool.
  #[strum(serialize = "inline-method")]
  InlineMethod,
}

#[derive(
  StrumDisplay, EnumString, IntoStaticStr, TryFromPrimitive, IntoPrimitive,
  Clone,        Copy,       Eq, PartialEq,  Debug,            Hash
)]
#[repr(u16)]
pub enum Opcode {
  // Regular opcodes //
  #[strum(serialize = "execute-inline")]
  ExecuteInline         = 0x00EE,
  #[strum(serialize = "execute-inline/range")]
  ExecuteInlineRange    = 0x00EF,

  // Extended opcodes //
  #[strum(serialize = "const-class/jumbo")]
  ConstClassJumbo       = 0xFF00,
  #[strum(serialize = "check-cast/jumbo")]
  CheckCastJumbo        = 0xFF01,
  #[strum(serialize = "instance-of/jumbo")]
  InstanceOfJumbo       = 0xFF02,
  #[strum(serialize = "new-instance/jumbo")]
  NewInstanceJumbo      = 0xFF03,
  #[strum(serialize = "new-array/jumbo")]
  NewArrayJumbo         = 0xFF04,
  #[strum(serialize = "iget/jumbo")]
  IgetJumbo             = 0xFF06,
  #[strum(serialize = "iget-wide/jumbo")]
  IgetWideJumbo         = 0xFF07,
  #[strum(serialize = "iget-object/jumbo")]
  IgetObjectJumbo       = 0xFF08,
  #[strum(serialize = "iget-boolean/jumbo")]
  IgetBooleanJumbo      = 0xFF09,
  #[strum(serialize = "iget-byte/jumbo")]
  IgetByteJumbo         = 0xFF0A,
  #[strum(serialize = "iget-char/jumbo")]
  IgetCharJumbo         = 0xFF0B,
  #[strum(serialize = "iget-short/jumbo")]
  IgetShortJumbo        = 0xFF0C,
  #[strum(serialize = "iput/jumbo")]
  IputJumbo             = 0xFF0D,
  #[strum(serialize = "iput-wide/jumbo")]
  IputWideJumbo         = 0xFF0E,
  #[strum(serialize = "iput-object/jumbo")]
  IputObjectJumbo       = 0xFF0F,
  #[strum(serialize = "iput-boolean/jumbo")]
  IputBooleanJumbo      = 0xFF10,
  #[strum(serialize = "iput-byte/jumbo")]
  IputByteJumbo         = 0xFF11,
  #[strum(serialize = "iput-char/jumbo")]
  IputCharJumbo         = 0xFF12,
  #[strum(serialize = "iput-short/jumbo")]
  IputShortJumbo        = 0xFF13,
}

impl Opcode {
  pub fn value(&self) -> u16 {
    Into::<u16>::into(*self)
  }

  /// The byte written after the marker for extended opcodes, or the opcode itself otherwise.
  pub fn low_byte(&self) -> u8 {
    (self.value() & 0xFF) as u8
  }

  pub fn is_extended(&self) -> bool {
    (self.value() >> 8) as u8 == EXTENDED_OPCODE_MARKER
  }

  pub fn mnemonic(&self) -> &'static str {
    (*self).into()
  }

  pub fn format(&self) -> Format {
    match self {
      Opcode::ExecuteInline      => Format::Format35mi,
      Opcode::ExecuteInlineRange => Format::Format3rmi,

      Opcode::ConstClassJumbo
      | Opcode::CheckCastJumbo
      | Opcode::NewInstanceJumbo => Format::Format41c,

      _ => Format::Format52c,
    }
  }

  /// Fails with `FormatMismatch` unless this opcode is laid out as `expected`.
  pub fn require_format(&self, expected: Format) -> Result<(), CodecError> {
    let format = self.format();
    if format != expected {
      return Err(CodecError::FormatMismatch { opcode: *self, format, expected });
    }
    Ok(())
  }

  pub fn reference_type(&self) -> ReferenceType {
    match self {
      Opcode::ExecuteInline
      | Opcode::ExecuteInlineRange => ReferenceType::InlineMethod,

      Opcode::ConstClassJumbo
      | Opcode::CheckCastJumbo
      | Opcode::InstanceOfJumbo
      | Opcode::NewInstanceJumbo
      | Opcode::NewArrayJumbo => ReferenceType::Type,

      _ => ReferenceType::Field,
    }
  }

  /**
    Reads the opcode of the instruction starting at `offset`. An extended opcode needs the byte
    after the marker as well; if it is missing the marker alone is reported as unknown.
  */
  pub fn from_bytes(buffer: &[u8], offset: usize) -> Result<Opcode, CodecError> {
    let first = match buffer.get(offset) {
      Some(byte) => *byte,
      None => {
        return Err(CodecError::UnknownOpcode { value: 0, offset });
      }
    };

    let value =
      if first == EXTENDED_OPCODE_MARKER {
        match buffer.get(offset + 1) {
          Some(low) => ((EXTENDED_OPCODE_MARKER as u16) << 8) | *low as u16,
          None => first as u16
        }
      } else {
        first as u16
      };

    Opcode::try_from(value).map_err(|_| CodecError::UnknownOpcode { value, offset })
  }
}


#[cfg(test)]
mod tests {
  use super::*;
  use std::str::FromStr;

  #[test]
  fn regular_opcode_from_bytes(){
    let buffer = [0x00, 0xEE, 0x53];
    assert_eq!(Opcode::from_bytes(&buffer, 1), Ok(Opcode::ExecuteInline));
  }

  #[test]
  fn extended_opcode_from_bytes(){
    let buffer = [0xFF, 0x06, 0x00];
    let opcode = Opcode::from_bytes(&buffer, 0).unwrap();
    assert_eq!(opcode, Opcode::IgetJumbo);
    assert!(opcode.is_extended());
    assert_eq!(opcode.low_byte(), 0x06);
  }

  #[test]
  fn unknown_opcode(){
    assert_eq!(
      Opcode::from_bytes(&[0x12], 0),
      Err(CodecError::UnknownOpcode { value: 0x12, offset: 0 })
    );
    assert_eq!(
      Opcode::from_bytes(&[0xFF, 0x05], 0),
      Err(CodecError::UnknownOpcode { value: 0xFF05, offset: 0 })
    );
    assert_eq!(
      Opcode::from_bytes(&[0xFF], 0),
      Err(CodecError::UnknownOpcode { value: 0xFF, offset: 0 })
    );
  }

  #[test]
  fn mnemonics_round_trip(){
    assert_eq!(Opcode::IputShortJumbo.mnemonic(), "iput-short/jumbo");
    assert_eq!(Opcode::from_str("execute-inline"), Ok(Opcode::ExecuteInline));
    assert_eq!(Opcode::InstanceOfJumbo.to_string(), "instance-of/jumbo");
  }

  #[test]
  fn formats_and_sizes(){
    assert_eq!(Opcode::ExecuteInline.format(), Format::Format35mi);
    assert_eq!(Opcode::NewArrayJumbo.format(), Format::Format52c);
    assert_eq!(Opcode::CheckCastJumbo.format(), Format::Format41c);
    assert_eq!(Format::Format35mi.size(), 6);
    assert_eq!(Format::Format52c.size(), 10);
    assert_eq!(Format::Format52c.to_string(), "52c");
    assert_eq!(Opcode::IgetObjectJumbo.reference_type(), ReferenceType::Field);
    assert_eq!(Opcode::InstanceOfJumbo.reference_type(), ReferenceType::Type);
  }
}
