//! Handles to items owned by an external pool, and the hook codecs use to resolve them.

use std::fmt::{Display, Formatter};

/**
  A non-owning token naming an item in some pool. Instructions store the handle, never the
  item, so the pool is free to outlive or drop items independently of the instruction list.
  The handle alone carries no index; the index is looked up at encode time.
*/
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug)]
pub struct ItemHandle(pub u32);

impl Display for ItemHandle {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "#{}", self.0)
  }
}

/// The capability a reference-carrying codec needs from the item pool.
pub trait ItemResolver {
  /// The pool position of `item`, or `None` if the pool has not assigned it one yet.
  fn index_of(&self, item: ItemHandle) -> Option<u32>;

  /// The item stored at pool position `index`, used when decoding.
  fn item_at(&self, index: u32) -> Option<ItemHandle>;
}
