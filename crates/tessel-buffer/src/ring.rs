//! Bounded circular FIFO of fixed-size records.
//!
//! [`RingQueue`] never grows. The caller sizes it for the worst case
//! (one record per `(value, cell)` pair during a propagation pass), so a
//! full queue on push means that sizing contract was broken.

use tessel_core::BufferError;

/// A fixed-capacity ring buffer of `T` records.
///
/// The live window is `len` records starting at slot `start`, wrapping
/// modulo `capacity`. Slots are preallocated at construction; push and
/// pop never allocate.
#[derive(Clone, Debug)]
pub struct RingQueue<T> {
    slots: Vec<T>,
    start: usize,
    len: usize,
}

impl<T: Copy + Default> RingQueue<T> {
    /// Create a queue holding at most `capacity` records.
    ///
    /// Returns `Err(BufferError::ZeroCapacity)` for a zero capacity and
    /// `Err(BufferError::ZeroElementSize)` for a zero-sized `T`.
    pub fn new(capacity: usize) -> Result<Self, BufferError> {
        if std::mem::size_of::<T>() == 0 {
            return Err(BufferError::ZeroElementSize);
        }
        if capacity == 0 {
            return Err(BufferError::ZeroCapacity);
        }
        Ok(Self {
            slots: vec![T::default(); capacity],
            start: 0,
            len: 0,
        })
    }

    /// Append a record at the tail.
    ///
    /// # Panics
    ///
    /// Panics if the queue is full. Overflow means the queue was sized
    /// below the maximum number of discoveries in one pass; data is never
    /// silently dropped.
    pub fn push(&mut self, item: T) {
        if self.try_push(item).is_err() {
            panic!("RingQueue overflow: capacity {} exhausted", self.capacity());
        }
    }

    /// Append a record at the tail, handing it back if the queue is full.
    pub fn try_push(&mut self, item: T) -> Result<(), T> {
        if self.is_full() {
            return Err(item);
        }
        let slot = (self.start + self.len) % self.slots.len();
        self.slots[slot] = item;
        self.len += 1;
        Ok(())
    }

    /// Remove and return the record at the head.
    ///
    /// # Panics
    ///
    /// Panics if the queue is empty.
    pub fn pop(&mut self) -> T {
        match self.try_pop() {
            Some(item) => item,
            None => panic!("RingQueue underflow: pop from empty queue"),
        }
    }

    /// Remove and return the record at the head, or `None` if empty.
    pub fn try_pop(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let item = self.slots[self.start];
        self.start = (self.start + 1) % self.slots.len();
        self.len -= 1;
        Some(item)
    }
}

impl<T> RingQueue<T> {
    /// Drop every record. O(1): only the window bounds are reset.
    pub fn clear(&mut self) {
        self.start = 0;
        self.len = 0;
    }

    /// Whether the queue holds no records.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether the queue is at capacity.
    pub fn is_full(&self) -> bool {
        self.len >= self.slots.len()
    }

    /// Number of live records.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Maximum number of records.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Size of one record in bytes.
    pub fn element_size(&self) -> usize {
        std::mem::size_of::<T>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn rejects_zero_capacity() {
        assert_eq!(
            RingQueue::<u32>::new(0).unwrap_err(),
            BufferError::ZeroCapacity
        );
    }

    #[test]
    fn rejects_zero_sized_records() {
        assert_eq!(
            RingQueue::<()>::new(4).unwrap_err(),
            BufferError::ZeroElementSize
        );
    }

    #[test]
    fn new_queue_is_empty() {
        let q = RingQueue::<u64>::new(3).unwrap();
        assert!(q.is_empty());
        assert!(!q.is_full());
        assert_eq!(q.len(), 0);
        assert_eq!(q.capacity(), 3);
        assert_eq!(q.element_size(), 8);
    }

    #[test]
    fn fills_to_capacity() {
        let mut q = RingQueue::<u32>::new(3).unwrap();
        for i in 0..3 {
            q.push(i);
        }
        assert!(q.is_full());
        assert_eq!(q.try_push(99), Err(99));
        assert_eq!(q.len(), 3);
    }

    #[test]
    #[should_panic(expected = "overflow")]
    fn push_past_capacity_panics() {
        let mut q = RingQueue::<u32>::new(2).unwrap();
        q.push(1);
        q.push(2);
        q.push(3);
    }

    #[test]
    #[should_panic(expected = "underflow")]
    fn pop_from_empty_panics() {
        let mut q = RingQueue::<u32>::new(2).unwrap();
        q.pop();
    }

    #[test]
    fn wraps_around_the_end() {
        let mut q = RingQueue::<u32>::new(3).unwrap();
        q.push(1);
        q.push(2);
        assert_eq!(q.pop(), 1);
        q.push(3);
        q.push(4);
        assert!(q.is_full());
        assert_eq!(q.pop(), 2);
        assert_eq!(q.pop(), 3);
        assert_eq!(q.pop(), 4);
        assert!(q.is_empty());
        assert_eq!(q.try_pop(), None);
    }

    #[test]
    fn clear_resets_window() {
        let mut q = RingQueue::<u32>::new(2).unwrap();
        q.push(1);
        q.push(2);
        q.clear();
        assert!(q.is_empty());
        q.push(7);
        assert_eq!(q.pop(), 7);
    }

    proptest! {
        #[test]
        fn preserves_fifo_order(
            capacity in 1usize..64,
            items in proptest::collection::vec(any::<u32>(), 0..64),
        ) {
            let mut q = RingQueue::new(capacity).unwrap();
            let n = items.len().min(capacity);
            for &x in &items[..n] {
                q.push(x);
            }
            prop_assert_eq!(q.is_full(), n == capacity);
            let mut out = Vec::new();
            while let Some(x) = q.try_pop() {
                out.push(x);
            }
            prop_assert_eq!(&out[..], &items[..n]);
            prop_assert!(q.is_empty());
        }

        #[test]
        fn interleaved_push_pop_matches_model(
            ops in proptest::collection::vec(any::<Option<u16>>(), 0..128),
        ) {
            let mut q = RingQueue::new(8).unwrap();
            let mut model = std::collections::VecDeque::new();
            for op in ops {
                match op {
                    Some(x) => {
                        let pushed = q.try_push(x).is_ok();
                        prop_assert_eq!(pushed, model.len() < 8);
                        if pushed {
                            model.push_back(x);
                        }
                    }
                    None => prop_assert_eq!(q.try_pop(), model.pop_front()),
                }
                prop_assert_eq!(q.len(), model.len());
            }
        }
    }
}
