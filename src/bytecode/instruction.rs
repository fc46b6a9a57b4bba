use std::collections::HashMap;
use std::fmt::{Display, Formatter};

use super::binary::OutputSink;
use super::format35mi::Instruction35mi;
use super::format52c::Instruction52c;
use super::opcode::{Format, Opcode};
use crate::error::CodecError;
use crate::reference::ItemResolver;

/// Holds one decoded instruction. There is one variant per supported format.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Instruction {
  /// [Opcode:8][Count:4|A:4][Inline:16][E:4|D:4][G:4|F:4]
  Format35mi(Instruction35mi),
  /// [0xFF:8][Opcode:8][Item:32][A:16][B:16]
  Format52c(Instruction52c),
}

type DecodeFn =
  fn(Opcode, &[u8], usize, &dyn ItemResolver) -> Result<Instruction, CodecError>;

fn decode_35mi(opcode: Opcode, buffer: &[u8], offset: usize, _items: &dyn ItemResolver)
  -> Result<Instruction, CodecError>
{
  Ok(Instruction::Format35mi(Instruction35mi::decode(opcode, buffer, offset)))
}

fn decode_52c(opcode: Opcode, buffer: &[u8], offset: usize, items: &dyn ItemResolver)
  -> Result<Instruction, CodecError>
{
  Instruction52c::decode(opcode, buffer, offset, items).map(Instruction::Format52c)
}

lazy_static! {
  // Every format with a codec. The opcode table may name formats that are absent here.
  static ref DECODERS: HashMap<Format, DecodeFn> = {
    let mut decoders: HashMap<Format, DecodeFn> = HashMap::new();
    decoders.insert(Format::Format35mi, decode_35mi as DecodeFn);
    decoders.insert(Format::Format52c, decode_52c as DecodeFn);
    decoders
  };
}

/// Whether `decode_instruction` can decode instructions laid out as `format`.
pub fn is_supported_format(format: Format) -> bool {
  DECODERS.contains_key(&format)
}

/**
  Decodes the instruction with the given opcode starting at `offset`. The opcode's format
  selects the codec; the buffer must hold the format's full fixed length from `offset` on.
*/
pub fn decode_instruction(
    opcode : Opcode,
    buffer : &[u8],
    offset : usize,
    items  : &dyn ItemResolver
  ) -> Result<Instruction, CodecError> {
  let format = opcode.format();
  let decode = match DECODERS.get(&format) {
    Some(decode) => decode,
    None => {
      return Err(CodecError::UnsupportedFormat { opcode, format });
    }
  };

  let available = buffer.len().saturating_sub(offset);
  if available < format.size() {
    return Err(CodecError::Truncated {
      opcode,
      offset,
      needed: format.size(),
      available
    });
  }

  let instruction = decode(opcode, buffer, offset, items)?;

  #[cfg(feature = "trace_codec")]
    {
      println!("decoded {:>6}: [{}] {}", offset, format, instruction);
    }

  Ok(instruction)
}

/// Reads the opcode at `offset` from the buffer itself, then decodes the instruction.
pub fn decode_at(buffer: &[u8], offset: usize, items: &dyn ItemResolver)
  -> Result<Instruction, CodecError>
{
  let opcode = Opcode::from_bytes(buffer, offset)?;
  decode_instruction(opcode, buffer, offset, items)
}

/// Decodes every instruction in `buffer`, pairing each with its byte offset.
pub fn disassemble(buffer: &[u8], items: &dyn ItemResolver)
  -> Result<Vec<(usize, Instruction)>, CodecError>
{
  let mut instructions = Vec::new();
  let mut offset = 0;
  while offset < buffer.len() {
    let instruction = decode_at(buffer, offset, items)?;
    instructions.push((offset, instruction));
    offset += instruction.size();
  }
  Ok(instructions)
}

/// Encodes `instructions` back to back. Encoding stops at the first failure.
pub fn assemble(instructions: &[Instruction], items: &dyn ItemResolver)
  -> Result<Vec<u8>, CodecError>
{
  let mut out: Vec<u8> = Vec::with_capacity(
    instructions.iter().map(Instruction::size).sum()
  );
  for instruction in instructions {
    instruction.encode(&mut out, items)?;
  }
  Ok(out)
}

impl Instruction {
  pub fn opcode(&self) -> Opcode {
    match self {
      Instruction::Format35mi(i) => i.opcode(),
      Instruction::Format52c(i) => i.opcode(),
    }
  }

  pub fn format(&self) -> Format {
    match self {
      Instruction::Format35mi(_) => Format::Format35mi,
      Instruction::Format52c(_) => Format::Format52c,
    }
  }

  /// The encoded size in bytes.
  pub fn size(&self) -> usize {
    self.format().size()
  }

  /// Writes the instruction to `out` in its wire layout. Only reference-carrying formats consult
  /// `items`, and they fail before writing anything if their item has no index.
  pub fn encode<S: OutputSink + ?Sized>(&self, out: &mut S, items: &dyn ItemResolver)
    -> Result<(), CodecError>
  {
    match self {
      Instruction::Format35mi(i) => i.encode(out),
      Instruction::Format52c(i) => i.encode(out, items)?,
    }

    #[cfg(feature = "trace_codec")]
      {
        println!("encoded [{}] {}", self.format(), self);
      }

    Ok(())
  }
}

impl From<Instruction35mi> for Instruction {
  fn from(instruction: Instruction35mi) -> Self {
    Instruction::Format35mi(instruction)
  }
}

impl From<Instruction52c> for Instruction {
  fn from(instruction: Instruction52c) -> Self {
    Instruction::Format52c(instruction)
  }
}

impl Display for Instruction {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      Instruction::Format35mi(i) => write!(f, "{}", i),
      Instruction::Format52c(i) => write!(f, "{}", i),
    }
  }
}
