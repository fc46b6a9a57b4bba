//! Renders decoded instructions as a table: offset, raw bytes, format, and text.

use prettytable::{format as TableFormat, Table};

use crate::bytecode::Instruction;

lazy_static! {
  static ref TABLE_DISPLAY_FORMAT: TableFormat::TableFormat =
    TableFormat::FormatBuilder::new()
      .column_separator('│')
      .borders(' ')
      .separator(
        TableFormat::LinePosition::Title,
        TableFormat::LineSeparator::new('─', '┼', ' ', ' ')
      )
      .separator(
        TableFormat::LinePosition::Bottom,
        TableFormat::LineSeparator::new('─', '┴', ' ', ' ')
      )
      .padding(1, 1)
      .build();
}

fn hex_bytes(bytes: &[u8]) -> String {
  bytes.iter()
       .map(|b| format!("{:02x}", b))
       .collect::<Vec<String>>()
       .join(" ")
}

/// `buffer` is the dump the instructions were decoded from; each row shows the bytes the
/// instruction occupies in it.
pub fn make_listing_table(buffer: &[u8], instructions: &[(usize, Instruction)]) -> Table {
  let mut table = Table::new();

  table.set_format(*TABLE_DISPLAY_FORMAT);
  table.set_titles(row![ubr->"Offset", ubl->"Bytes", ubl->"Format", ubl->"Instruction"]);

  for (offset, instruction) in instructions {
    let end = (*offset + instruction.size()).min(buffer.len());
    table.add_row(
      row![
        r->format!("{:04x}", offset),
        hex_bytes(&buffer[*offset..end]),
        instruction.format(),
        instruction
      ]
    );
  }
  table
}
