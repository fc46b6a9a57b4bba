//! Errors raised while constructing, decoding, or encoding instructions.
//!
//! Every variant is a precondition violation at this layer. Nothing here is retried; callers
//! either propagate the error or attach their own context.

use thiserror::Error;

use crate::bytecode::{Format, Opcode};

#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum CodecError {
  /// An operand does not fit its field, or a register count exceeds the slots of the format.
  #[error("invalid operand: {field} = {value} exceeds the maximum of {max}")]
  InvalidOperand {
    field: &'static str,
    value: u32,
    max: u32
  },

  /// A reference-carrying instruction was encoded before its item was given a pool index.
  #[error("{opcode} references an item that has not been assigned a pool index")]
  UnresolvedReference {
    opcode: Opcode
  },

  /// The opcode table maps the opcode to a format with no registered codec.
  #[error("{opcode} uses format {format}, which has no registered codec")]
  UnsupportedFormat {
    opcode: Opcode,
    format: Format
  },

  /// A variant was constructed with an opcode whose format is not the variant's own.
  #[error("{opcode} has format {format} and cannot be built as {expected}")]
  FormatMismatch {
    opcode: Opcode,
    format: Format,
    expected: Format
  },

  #[error("unknown opcode {value:#06x} at offset {offset}")]
  UnknownOpcode {
    value: u16,
    offset: usize
  },

  /// The buffer ends before the fixed length of the instruction's format.
  #[error("{opcode} at offset {offset} needs {needed} bytes but only {available} remain")]
  Truncated {
    opcode: Opcode,
    offset: usize,
    needed: usize,
    available: usize
  },

  #[error("no item has pool index {index} (instruction at offset {offset})")]
  UnknownItemIndex {
    index: u32,
    offset: usize
  },
}

impl CodecError {
  /// Builds the error for a field that must be strictly less than `1 << bits`.
  pub(crate) fn field_width(field: &'static str, value: u32, bits: u32) -> CodecError {
    CodecError::InvalidOperand {
      field,
      value,
      max: (1u32 << bits) - 1
    }
  }
}
