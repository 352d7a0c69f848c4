//! The dynamic-array container.

use seqvec_buffer::HeapBuffer;
use seqvec_common::{Result, result::verify_index};

use crate::reserve::ReserveHint;

/// A growable, indexable sequence of `T` backed by a single exclusively
/// owned heap allocation.
///
/// `SeqVec` tracks the logical length of the sequence; the backing
/// [`HeapBuffer`] tracks the allocated capacity. The first `len` slots hold
/// the live sequence, slots in `[len, capacity)` are allocated but logically
/// absent, and a zero capacity means no allocation at all.
///
/// Appending is amortized constant time: a full sequence doubles its capacity
/// (a zero-capacity sequence seeds at [`SeqVec::INITIAL_CAPACITY`]). Growth
/// always allocates the new block first, moves the live elements across in
/// order, and only then adopts the block by swapping buffers, so an
/// allocation failure surfaces as an error with the sequence untouched.
///
/// `T: Default` bounds appear on the operations that require the buffer to
/// manufacture slot values: sizing constructors, growth, and the removal
/// operations that move a value out of its slot.
///
/// # Examples
///
/// ```
/// use seqvec::SeqVec;
///
/// let mut v = SeqVec::new();
/// v.push_back(1)?;
/// v.push_back(2)?;
/// v.insert(1, 9)?;
/// assert_eq!(v.as_slice(), &[1, 9, 2]);
/// assert_eq!(v.pop_back(), 2);
/// # Ok::<(), seqvec_common::error::Error>(())
/// ```
pub struct SeqVec<T> {
    /// Backing storage; `buf.capacity()` is the sequence capacity.
    buf: HeapBuffer<T>,
    /// Number of live elements, never exceeding the capacity.
    len: usize,
}

impl<T> SeqVec<T> {
    /// Capacity established by the first growth step of an unallocated
    /// sequence.
    pub const INITIAL_CAPACITY: usize = 4;

    /// Creates an empty sequence with no allocation.
    pub fn new() -> SeqVec<T> {
        SeqVec {
            buf: HeapBuffer::new(),
            len: 0,
        }
    }

    /// Returns the number of live elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns the number of allocated slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Returns `true` if the sequence holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns a slice over the live elements.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.buf.as_slice()[..self.len]
    }

    /// Returns a mutable slice over the live elements.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        let len = self.len;
        &mut self.buf.as_mut_slice()[..len]
    }

    /// Returns an iterator over the live elements.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Returns a mutable iterator over the live elements.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    /// Returns a reference to the element at `index`, or an out-of-range
    /// error when `index >= self.len()`.
    ///
    /// This is the only access form with a recoverable error contract; see
    /// [`SeqVec::get_unchecked`] for the unchecked fast path and the `Index`
    /// impl for the asserting middle ground.
    #[inline]
    pub fn at(&self, index: usize) -> Result<&T> {
        verify_index(index, self.len)?;
        Ok(unsafe { self.buf.slot_unchecked(index) })
    }

    /// Returns a mutable reference to the element at `index`, or an
    /// out-of-range error when `index >= self.len()`.
    #[inline]
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T> {
        verify_index(index, self.len)?;
        Ok(unsafe { self.buf.slot_unchecked_mut(index) })
    }

    /// Returns a reference to the element at `index` without a bounds check.
    ///
    /// # Safety
    ///
    /// `index` must be less than `self.len()`.
    #[inline]
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        debug_assert!(index < self.len);
        unsafe { self.buf.slot_unchecked(index) }
    }

    /// Returns a mutable reference to the element at `index` without a
    /// bounds check.
    ///
    /// # Safety
    ///
    /// `index` must be less than `self.len()`.
    #[inline]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(index < self.len);
        unsafe { self.buf.slot_unchecked_mut(index) }
    }

    /// Resets the logical length to zero. Capacity and slot contents are
    /// untouched; no memory is released.
    #[inline]
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Exchanges buffer, length, and capacity with `other` in constant time.
    pub fn swap(&mut self, other: &mut SeqVec<T>) {
        self.buf.swap(&mut other.buf);
        std::mem::swap(&mut self.len, &mut other.len);
    }

    /// Moves the sequence out, leaving `self` empty, valid, and reusable.
    pub fn take(&mut self) -> SeqVec<T> {
        std::mem::take(self)
    }
}

impl<T: Default> SeqVec<T> {
    /// Creates a logically empty sequence with pre-sized storage.
    ///
    /// The capacity equals the hinted value; the length is zero.
    ///
    /// # Errors
    ///
    /// Fails when the hinted storage cannot be allocated.
    pub fn with_reserve(hint: ReserveHint) -> Result<SeqVec<T>> {
        Ok(SeqVec {
            buf: HeapBuffer::allocate(hint.capacity())?,
            len: 0,
        })
    }

    /// Creates a sequence of `count` default-initialized elements, with
    /// length and capacity both equal to `count`.
    ///
    /// # Errors
    ///
    /// Fails when the storage cannot be allocated.
    pub fn with_len(count: usize) -> Result<SeqVec<T>> {
        Ok(SeqVec {
            buf: HeapBuffer::allocate(count)?,
            len: count,
        })
    }

    /// Ensures the capacity is at least `new_cap`.
    ///
    /// A no-op when `new_cap <= self.capacity()`. Otherwise allocates a block
    /// of exactly `new_cap` slots, moves the live elements into it in order,
    /// and adopts it by swapping buffers. The length never changes.
    ///
    /// # Errors
    ///
    /// Fails when the new storage cannot be allocated, in which case the
    /// sequence is left untouched.
    pub fn reserve(&mut self, new_cap: usize) -> Result<()> {
        if new_cap <= self.capacity() {
            return Ok(());
        }
        let mut fresh = HeapBuffer::allocate(new_cap)?;
        let live = &mut self.buf.as_mut_slice()[..self.len];
        for (dst, src) in fresh.as_mut_slice().iter_mut().zip(live) {
            *dst = std::mem::take(src);
        }
        self.buf.swap(&mut fresh);
        Ok(())
    }

    /// Sets the length to `new_len`.
    ///
    /// Growing default-initializes the newly exposed slots, reserving more
    /// capacity first when needed. Shrinking only truncates the length; slot
    /// contents beyond the new length are not destroyed early and stay in
    /// place until overwritten or until the buffer is released.
    ///
    /// # Errors
    ///
    /// Fails when growth requires an allocation that cannot be satisfied; the
    /// sequence is left untouched.
    pub fn resize(&mut self, new_len: usize) -> Result<()> {
        if new_len > self.len {
            if new_len > self.capacity() {
                self.reserve(new_len)?;
            }
            for slot in &mut self.buf.as_mut_slice()[self.len..new_len] {
                *slot = T::default();
            }
        }
        self.len = new_len;
        Ok(())
    }

    /// Appends an element at the end of the sequence.
    ///
    /// Amortized constant time; a growth step relocates the whole sequence.
    ///
    /// # Errors
    ///
    /// Fails when a required growth step cannot allocate; the sequence is
    /// left untouched and `value` is dropped with the error.
    pub fn push_back(&mut self, value: T) -> Result<()> {
        if self.len == self.capacity() {
            self.grow_for_append()?;
        }
        self.buf.as_mut_slice()[self.len] = value;
        self.len += 1;
        Ok(())
    }

    /// Inserts an element at position `index`, shifting the tail one slot
    /// toward the end. `index == self.len()` appends. Returns a reference to
    /// the newly inserted slot.
    ///
    /// # Errors
    ///
    /// Fails when a required growth step cannot allocate; the sequence is
    /// left untouched.
    ///
    /// # Panics
    ///
    /// Panics when `index > self.len()` - the position contract is on the
    /// caller, not a recoverable condition.
    pub fn insert(&mut self, index: usize, value: T) -> Result<&mut T> {
        assert!(
            index <= self.len,
            "insert position {index} out of bounds for length {}",
            self.len
        );
        if self.len == self.capacity() {
            self.grow_for_append()?;
        }
        {
            let slots = self.buf.as_mut_slice();
            // Brings the stale slot at `len` down to `index`, then overwrites it.
            slots[index..=self.len].rotate_right(1);
            slots[index] = value;
        }
        self.len += 1;
        Ok(&mut self.buf.as_mut_slice()[index])
    }

    /// Removes and returns the last element.
    ///
    /// # Panics
    ///
    /// Panics when the sequence is empty.
    pub fn pop_back(&mut self) -> T {
        assert!(!self.is_empty(), "pop_back on an empty sequence");
        self.len -= 1;
        std::mem::take(&mut self.buf.as_mut_slice()[self.len])
    }

    /// Removes and returns the element at position `index`, shifting the
    /// tail one slot toward the beginning. After the call, `index` addresses
    /// the element that followed the removed one.
    ///
    /// # Panics
    ///
    /// Panics when `index >= self.len()`.
    pub fn remove(&mut self, index: usize) -> T {
        assert!(
            index < self.len,
            "remove position {index} out of bounds for length {}",
            self.len
        );
        let value;
        {
            let slots = self.buf.as_mut_slice();
            value = std::mem::take(&mut slots[index]);
            slots[index..self.len].rotate_left(1);
        }
        self.len -= 1;
        value
    }

    /// Doubles the capacity, or seeds [`SeqVec::INITIAL_CAPACITY`] for an
    /// unallocated sequence.
    #[cold]
    fn grow_for_append(&mut self) -> Result<()> {
        let new_cap = if self.capacity() == 0 {
            Self::INITIAL_CAPACITY
        } else {
            self.capacity() * 2
        };
        self.reserve(new_cap)
    }
}

impl<T: Default + Clone> SeqVec<T> {
    /// Creates a sequence of `count` elements, each a clone of `value`, with
    /// length and capacity both equal to `count`.
    ///
    /// # Errors
    ///
    /// Fails when the storage cannot be allocated.
    pub fn from_value(count: usize, value: &T) -> Result<SeqVec<T>> {
        let mut vec = Self::with_len(count)?;
        for slot in vec.as_mut_slice() {
            slot.clone_from(value);
        }
        Ok(vec)
    }

    /// Deep-copies the sequence into freshly sized storage.
    ///
    /// The copy's capacity equals this sequence's **length**; growth headroom
    /// is not carried across a copy.
    ///
    /// # Errors
    ///
    /// Fails when the storage cannot be allocated; `self` is never mutated.
    pub fn try_clone(&self) -> Result<SeqVec<T>> {
        let mut copy = SeqVec {
            buf: HeapBuffer::allocate(self.len)?,
            len: self.len,
        };
        copy.as_mut_slice().clone_from_slice(self.as_slice());
        Ok(copy)
    }

    /// Appends clones of every element in `values`.
    ///
    /// # Errors
    ///
    /// Fails when a growth step cannot allocate; elements appended before the
    /// failure remain appended.
    pub fn extend_from_slice(&mut self, values: &[T]) -> Result<()> {
        self.reserve(self.len.saturating_add(values.len()))?;
        for value in values {
            self.push_back(value.clone())?;
        }
        Ok(())
    }
}

impl<T> Default for SeqVec<T> {
    fn default() -> Self {
        SeqVec::new()
    }
}

impl<T: Default + Clone> Clone for SeqVec<T> {
    fn clone(&self) -> SeqVec<T> {
        self.try_clone().expect("sequence storage")
    }
}

impl<T> std::ops::Deref for SeqVec<T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> std::ops::DerefMut for SeqVec<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, I: std::slice::SliceIndex<[T]>> std::ops::Index<I> for SeqVec<T> {
    type Output = I::Output;

    #[inline]
    fn index(&self, index: I) -> &I::Output {
        &self.as_slice()[index]
    }
}

impl<T, I: std::slice::SliceIndex<[T]>> std::ops::IndexMut<I> for SeqVec<T> {
    #[inline]
    fn index_mut(&mut self, index: I) -> &mut I::Output {
        &mut self.as_mut_slice()[index]
    }
}

impl<T> AsRef<[T]> for SeqVec<T> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> AsMut<[T]> for SeqVec<T> {
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for SeqVec<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.as_slice().fmt(f)
    }
}

impl<T: PartialEq> PartialEq for SeqVec<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}
impl<T: Eq> Eq for SeqVec<T> {}

impl<T: PartialOrd> PartialOrd for SeqVec<T> {
    /// Lexicographic over elements, shorter-is-less on a common prefix.
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.as_slice().partial_cmp(other.as_slice())
    }
}
impl<T: Ord> Ord for SeqVec<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

impl<T: std::hash::Hash> std::hash::Hash for SeqVec<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state)
    }
}

impl<'a, T> IntoIterator for &'a SeqVec<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<'a, T> IntoIterator for &'a mut SeqVec<T> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_mut_slice().iter_mut()
    }
}

impl<T: Default, const N: usize> From<[T; N]> for SeqVec<T> {
    /// Builds a sequence from a literal element list, in list order, with
    /// length and capacity both equal to `N`.
    fn from(values: [T; N]) -> SeqVec<T> {
        let mut vec = SeqVec::with_reserve(crate::reserve_hint(N)).expect("sequence storage");
        for value in values {
            vec.push_back(value).expect("sequence storage");
        }
        vec
    }
}

impl<T: Default> FromIterator<T> for SeqVec<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> SeqVec<T> {
        let mut vec = SeqVec::new();
        vec.extend(iter);
        vec
    }
}

impl<T: Default> Extend<T> for SeqVec<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push_back(value).expect("sequence storage");
        }
    }
}
