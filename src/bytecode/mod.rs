/*!

  Instructions are stored as a stream of bytes. Each opcode has exactly one format, and each
  format is a fixed-length layout of opcode byte(s), operand fields, and, for reference
  formats, an index into an external item pool. Multi-byte fields are little-endian. The
  formats with codecs in this module are:

    35mi  6 bytes: [Opcode:8][Count:4|A:4][Inline:16][E:4|D:4][G:4|F:4]
    52c  10 bytes: [0xFF:8][Opcode:8][Item:32][A:16][B:16]

  Each format is its own struct that validates its operands on construction and owns its
  layout. `Instruction` unites them, and `decode_instruction` dispatches on the format the
  opcode table assigns to an opcode. A format the table names but that has no codec is
  reported as unsupported rather than guessed at.

  Decoding never re-validates operand widths: a field read from a nibble is at most 15 and a
  field read from a short is at most 65535 by construction. Because the decoded value is
  stored verbatim, decoding then encoding reproduces the input bytes exactly, including a
  register count above what the constructor would accept.

*/

mod binary;
mod format35mi;
mod format52c;
mod instruction;
mod jumbo;
mod opcode;

pub use binary::{
  decode_high_nibble, decode_low_nibble, decode_unsigned_int, decode_unsigned_short,
  encode_nibbles, OutputSink
};
pub use format35mi::{Instruction35mi, MAX_REGISTER_COUNT};
pub use format52c::Instruction52c;
pub use instruction::{
  assemble, decode_at, decode_instruction, disassemble, is_supported_format, Instruction
};
pub use jumbo::{JumboReference, JUMBO_HEADER_SIZE};
pub use opcode::{Format, Opcode, ReferenceType, EXTENDED_OPCODE_MARKER};
