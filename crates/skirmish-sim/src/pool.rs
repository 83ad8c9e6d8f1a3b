//! Fixed-growth object pool.
//!
//! Entries are allocated up front and reused; when every entry is in use the
//! pool grows by exactly one. Entries are never removed, so indices handed
//! out stay valid for the lifetime of the pool.

use thiserror::Error;

/// Pool access outside the current bounds. Always a caller bug.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PoolError {
    #[error("pool index {index} out of bounds (len {len})")]
    InvalidIndex { index: usize, len: usize },
}

/// A slot handed out by `Pool::acquire_with`.
pub struct Acquired<'a, T> {
    pub index: usize,
    /// Whether the pool had to grow to satisfy the request.
    pub grown: bool,
    pub item: &'a mut T,
}

/// One slot. `active == false` means the slot is free for reuse.
#[derive(Debug, Clone)]
pub struct PoolEntry<T> {
    pub item: T,
    pub active: bool,
}

#[derive(Debug, Clone)]
pub struct Pool<T> {
    entries: Vec<PoolEntry<T>>,
}

impl<T> Default for Pool<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Pool<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Create a pool pre-filled with `size` inactive entries built by `make(index)`.
    pub fn filled(size: usize, mut make: impl FnMut(usize) -> T) -> Self {
        let mut entries = Vec::with_capacity(size);
        for index in 0..size {
            entries.push(PoolEntry {
                item: make(index),
                active: false,
            });
        }
        Self { entries }
    }

    /// Total number of slots, active or not. Never decreases.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn active_count(&self) -> usize {
        self.entries.iter().filter(|e| e.active).count()
    }

    /// Take the first free slot, growing by one when none is free.
    ///
    /// The returned slot is marked active; `make` only runs on growth.
    pub fn acquire_with(&mut self, make: impl FnOnce(usize) -> T) -> Acquired<'_, T> {
        let (index, grown) = match self.first_free() {
            Some(index) => (index, false),
            None => {
                let index = self.entries.len();
                self.grow(make(index));
                (index, true)
            }
        };
        let entry = &mut self.entries[index];
        entry.active = true;
        Acquired {
            index,
            grown,
            item: &mut entry.item,
        }
    }

    /// Mark a slot free for reuse. The item keeps its last values.
    pub fn release(&mut self, index: usize) -> Result<(), PoolError> {
        let entry = self.entry_mut(index)?;
        entry.active = false;
        Ok(())
    }

    pub fn is_active(&self, index: usize) -> Result<bool, PoolError> {
        self.entry(index).map(|e| e.active)
    }

    pub fn get(&self, index: usize) -> Result<&T, PoolError> {
        self.entry(index).map(|e| &e.item)
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut T, PoolError> {
        self.entry_mut(index).map(|e| &mut e.item)
    }

    /// Iterate over active slots.
    pub fn iter_active(&self) -> impl Iterator<Item = (usize, &T)> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.active)
            .map(|(i, e)| (i, &e.item))
    }

    /// Iterate mutably over active slots.
    pub fn iter_active_mut(&mut self) -> impl Iterator<Item = (usize, &mut T)> {
        self.entries
            .iter_mut()
            .enumerate()
            .filter(|(_, e)| e.active)
            .map(|(i, e)| (i, &mut e.item))
    }

    /// Iterate mutably over every slot, active or not.
    pub fn iter_all_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.entries.iter_mut().map(|e| &mut e.item)
    }

    fn first_free(&self) -> Option<usize> {
        self.entries.iter().position(|e| !e.active)
    }

    fn grow(&mut self, item: T) {
        self.entries.push(PoolEntry {
            item,
            active: false,
        });
    }

    fn entry(&self, index: usize) -> Result<&PoolEntry<T>, PoolError> {
        let len = self.entries.len();
        self.entries
            .get(index)
            .ok_or(PoolError::InvalidIndex { index, len })
    }

    fn entry_mut(&mut self, index: usize) -> Result<&mut PoolEntry<T>, PoolError> {
        let len = self.entries.len();
        self.entries
            .get_mut(index)
            .ok_or(PoolError::InvalidIndex { index, len })
    }
}
