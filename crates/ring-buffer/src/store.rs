//! Fixed-Capacity Ring Storage

use crate::BufferError;

/// Reference capacity (10 samples)
pub const DEFAULT_CAPACITY: usize = 10;

/// Fixed-capacity FIFO storage with write/read cursors and an occupancy count.
///
/// `RingStore` has no concurrency awareness of its own; share it through
/// [`GuardedBuffer`](crate::GuardedBuffer).
///
/// Valid entries are exactly those at `read_cursor, read_cursor + 1, ...`
/// (mod capacity) for `len()` steps.
#[derive(Debug, Clone)]
pub struct RingStore<T> {
    /// Pre-allocated slots
    slots: Box<[T]>,
    /// Next slot to write
    write_cursor: usize,
    /// Oldest unread slot
    read_cursor: usize,
    /// Number of valid, unread entries
    count: usize,
}

impl<T: Copy + Default> RingStore<T> {
    /// Create an empty store with the given capacity
    pub fn new(capacity: usize) -> Result<Self, BufferError> {
        if capacity == 0 {
            return Err(BufferError::InvalidCapacity(capacity));
        }

        Ok(Self {
            slots: vec![T::default(); capacity].into_boxed_slice(),
            write_cursor: 0,
            read_cursor: 0,
            count: 0,
        })
    }

    /// Create a store with the reference capacity (10)
    pub fn with_default_capacity() -> Self {
        Self {
            slots: vec![T::default(); DEFAULT_CAPACITY].into_boxed_slice(),
            write_cursor: 0,
            read_cursor: 0,
            count: 0,
        }
    }
}

impl<T: Copy> RingStore<T> {
    /// Reset both cursors and the count. Slot contents are left as-is and
    /// become unreachable.
    pub fn init(&mut self) {
        self.write_cursor = 0;
        self.read_cursor = 0;
        self.count = 0;
    }

    /// Store `value` if there is room. Returns the value back when full so
    /// the caller can apply its overflow policy.
    pub fn try_write(&mut self, value: T) -> Result<(), T> {
        if self.is_full() {
            return Err(value);
        }

        self.slots[self.write_cursor] = value;
        self.write_cursor = self.wrap(self.write_cursor + 1);
        self.count += 1;
        Ok(())
    }

    /// Store `value` at the write cursor, discarding the oldest entry when
    /// full. Returns the discarded value, if any.
    pub fn force_write(&mut self, value: T) -> Option<T> {
        if !self.is_full() {
            // Room left: a plain write cannot fail.
            let _ = self.try_write(value);
            return None;
        }

        // Full means write_cursor == read_cursor.
        let evicted = self.slots[self.write_cursor];
        self.slots[self.write_cursor] = value;
        self.write_cursor = self.wrap(self.write_cursor + 1);
        self.read_cursor = self.wrap(self.read_cursor + 1);
        Some(evicted)
    }

    /// Remove and return the oldest entry
    pub fn try_read(&mut self) -> Option<T> {
        if self.count == 0 {
            return None;
        }

        let value = self.slots[self.read_cursor];
        self.read_cursor = self.wrap(self.read_cursor + 1);
        self.count -= 1;
        Some(value)
    }

    /// Iterate over the valid entries, oldest first, without consuming them
    pub fn snapshot(&self) -> Snapshot<'_, T> {
        Snapshot {
            store: self,
            offset: 0,
        }
    }

    /// Number of valid, unread entries
    pub fn len(&self) -> usize {
        self.count
    }

    /// Check if the store holds no entries
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Check if the store is at capacity
    pub fn is_full(&self) -> bool {
        self.count == self.slots.len()
    }

    /// Fixed capacity
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Index of the next slot to be written
    pub fn write_cursor(&self) -> usize {
        self.write_cursor
    }

    /// Index of the oldest unread slot
    pub fn read_cursor(&self) -> usize {
        self.read_cursor
    }

    /// All cursor arithmetic goes through here, so indices stay below capacity.
    #[inline]
    fn wrap(&self, index: usize) -> usize {
        index % self.slots.len()
    }
}

/// Non-destructive, oldest-to-newest view over a [`RingStore`]
#[derive(Debug)]
pub struct Snapshot<'a, T> {
    store: &'a RingStore<T>,
    offset: usize,
}

impl<T: Copy> Iterator for Snapshot<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.offset >= self.store.count {
            return None;
        }

        let idx = self.store.wrap(self.store.read_cursor + self.offset);
        self.offset += 1;
        Some(self.store.slots[idx])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.store.count - self.offset;
        (remaining, Some(remaining))
    }
}

impl<T: Copy> ExactSizeIterator for Snapshot<'_, T> {}
