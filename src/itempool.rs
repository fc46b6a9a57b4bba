use bimap::BiMap;
use string_cache::DefaultAtom;

use crate::reference::{ItemHandle, ItemResolver};

/**
  An in-memory item pool. Items are created unindexed by `intern` and only receive a pool
  position once `assign_index` or `assign_indices` runs. The handle <-> index mapping is
  looked up by handle when encoding and by index when decoding.

  Descriptors are interned, so interning the same descriptor twice yields the same handle.
*/
pub struct ItemPool {
  descriptors: Vec<DefaultAtom>,
  indices: BiMap<ItemHandle, u32>
}

impl ItemPool {

  pub fn new() -> ItemPool {
    ItemPool {
      descriptors: Vec::new(),
      indices: BiMap::new()
    }
  }

  pub fn intern(&mut self, descriptor: &str) -> ItemHandle {
    let atom = DefaultAtom::from(descriptor);
    if let Some(position) = self.descriptors.iter().position(|d| *d == atom) {
      return ItemHandle(position as u32);
    }
    self.descriptors.push(atom);
    ItemHandle((self.descriptors.len() - 1) as u32)
  }

  pub fn descriptor(&self, item: ItemHandle) -> Option<&DefaultAtom> {
    self.descriptors.get(item.0 as usize)
  }

  pub fn len(&self) -> usize {
    self.descriptors.len()
  }

  pub fn is_empty(&self) -> bool {
    self.descriptors.is_empty()
  }

  /// Gives `item` the pool position `index`. Neither side may already be assigned; on conflict
  /// the rejected pair is handed back.
  pub fn assign_index(&mut self, item: ItemHandle, index: u32)
    -> Result<(), (ItemHandle, u32)>{
    if item.0 as usize >= self.descriptors.len() {
      return Err((item, index));
    }
    self.indices.insert_no_overwrite(item, index)
  }

  /// Assigns every item its interning order as its index. Items that already have an index
  /// keep it, and the positions they hold are skipped.
  pub fn assign_indices(&mut self) {
    let mut next: u32 = 0;
    for position in 0..self.descriptors.len() {
      let item = ItemHandle(position as u32);
      if self.indices.contains_left(&item) {
        continue;
      }
      while self.indices.contains_right(&next) {
        next += 1;
      }
      self.indices.insert(item, next);
      next += 1;
    }
  }
}

impl Default for ItemPool {
  fn default() -> Self {
    ItemPool::new()
  }
}

impl ItemResolver for ItemPool {
  fn index_of(&self, item: ItemHandle) -> Option<u32> {
    self.indices.get_by_left(&item).cloned()
  }

  fn item_at(&self, index: u32) -> Option<ItemHandle> {
    self.indices.get_by_right(&index).cloned()
  }
}
