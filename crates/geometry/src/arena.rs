use std::marker::PhantomData;
use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Fixed-capacity output buffer filled by concurrent workers.
///
/// A fill pass goes through an [`ArenaWriter`]: workers reserve disjoint
/// ranges with an atomic add on a shared cursor and write into them without
/// further coordination. Only a committed pass changes [`len`](Self::len).
#[derive(Debug)]
pub struct OutputArena<T> {
    slots: Box<[T]>,
    len: usize,
}

impl<T: Copy + Default> OutputArena<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: vec![T::default(); capacity].into_boxed_slice(),
            len: 0,
        }
    }
}

impl<T> OutputArena<T> {
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Length of the prefix published by the last committed pass.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_slice(&self) -> &[T] {
        &self.slots[..self.len]
    }

    /// Start a new fill pass. The published prefix is cleared immediately.
    pub fn writer(&mut self) -> ArenaWriter<'_, T> {
        self.len = 0;
        ArenaWriter {
            base: self.slots.as_mut_ptr(),
            capacity: self.slots.len(),
            cursor: AtomicUsize::new(0),
            published: &mut self.len,
            _slots: PhantomData,
        }
    }
}

/// Shared handle for one fill pass over an [`OutputArena`].
///
/// Dropping the writer without calling [`commit`](Self::commit) leaves the
/// arena empty.
pub struct ArenaWriter<'a, T> {
    base: *mut T,
    capacity: usize,
    cursor: AtomicUsize,
    published: &'a mut usize,
    _slots: PhantomData<&'a mut [T]>,
}

// SAFETY: the only shared mutation is the atomic cursor; each reservation
// hands out a range no other reservation overlaps.
unsafe impl<T: Send> Sync for ArenaWriter<'_, T> {}

impl<'a, T> ArenaWriter<'a, T> {
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Claim `count` consecutive slots.
    ///
    /// Returns `None`, claiming nothing, if the range would cross capacity.
    pub fn reserve(&self, count: usize) -> Option<Reservation<'_, T>> {
        let start = self
            .cursor
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |cursor| {
                cursor
                    .checked_add(count)
                    .filter(|&end| end <= self.capacity)
            })
            .ok()?;

        // SAFETY: `start + count <= capacity`, and the cursor only moves
        // forward, so this range is handed out exactly once per pass.
        let slots = unsafe { std::slice::from_raw_parts_mut(self.base.add(start), count) };
        Some(Reservation { start, slots })
    }

    /// Slots claimed so far in this pass.
    pub fn reserved(&self) -> usize {
        self.cursor.load(Ordering::Relaxed)
    }

    /// Publish everything reserved in this pass and return its length.
    pub fn commit(self) -> usize {
        let len = self.cursor.into_inner();
        *self.published = len;
        len
    }
}

/// A claimed range of arena slots, writable through `Deref<Target = [T]>`.
#[derive(Debug)]
pub struct Reservation<'w, T> {
    start: usize,
    slots: &'w mut [T],
}

impl<T> Reservation<'_, T> {
    /// Offset of the first slot in the arena.
    pub fn start(&self) -> usize {
        self.start
    }
}

impl<T> Deref for Reservation<'_, T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.slots
    }
}

impl<T> DerefMut for Reservation<'_, T> {
    fn deref_mut(&mut self) -> &mut [T] {
        self.slots
    }
}
