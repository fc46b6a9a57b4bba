//! Disassembles a hex dump given on the command line and prints it as a table.
//!
//!     dexcode ee 34 34 12 21 03 ff 06 10 00 00 00 ff 00 00 01

use std::process::exit;

use dexcode::hexdump::parse_hex_dump;
use dexcode::listing::make_listing_table;
use dexcode::{assemble, disassemble, Instruction, ItemHandle, ItemResolver};

/// Stands in for a real item pool: every index names the item with the same number.
struct IdentityPool;

impl ItemResolver for IdentityPool {
  fn index_of(&self, item: ItemHandle) -> Option<u32> {
    Some(item.0)
  }

  fn item_at(&self, index: u32) -> Option<ItemHandle> {
    Some(ItemHandle(index))
  }
}

fn main() {
  let text = std::env::args().skip(1).collect::<Vec<String>>().join(" ");

  let buffer = match parse_hex_dump(&text) {
    Ok(buffer) => buffer,
    Err(e) => {
      eprintln!("{}", e);
      exit(2);
    }
  };

  let listing = match disassemble(&buffer, &IdentityPool) {
    Ok(listing) => listing,
    Err(e) => {
      eprintln!("Error: {}", e);
      exit(1);
    }
  };

  make_listing_table(&buffer, &listing).printstd();

  let instructions: Vec<Instruction> = listing.iter().map(|(_, i)| *i).collect();
  match assemble(&instructions, &IdentityPool) {
    Ok(bytes) if bytes == buffer => {
      println!("Reassembled {} bytes identically.", bytes.len());
    }
    Ok(bytes) => {
      eprintln!("Reassembly differs from the input ({} bytes).", bytes.len());
      exit(1);
    }
    Err(e) => {
      eprintln!("Error: {}", e);
      exit(1);
    }
  }
}
