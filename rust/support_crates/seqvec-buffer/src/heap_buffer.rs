//! Exclusive-ownership wrapper around a single heap allocation of `T` slots.
//!
//! `HeapBuffer` is the storage primitive underneath the `seqvec` container. It
//! owns zero or one contiguous heap block of `capacity` slots and knows nothing
//! about how many of those slots are logically in use.
//!
//! Every slot of a live buffer holds an initialized `T` value: the allocation
//! path default-fills the block, and callers that adopt raw blocks must uphold
//! the same invariant. This keeps destruction uniform and lets the container
//! layer above operate on plain slices.
//!
//! Ownership is exclusive and transfer-only. The type is deliberately not
//! `Clone`; allocations change hands through Rust moves, [`HeapBuffer::swap`],
//! or the [`HeapBuffer::release`] / [`HeapBuffer::from_raw`] pair.

use std::alloc::Layout;

use seqvec_common::{Result, error::Error};

/// An exclusively owned heap block of `capacity` initialized `T` slots.
///
/// The empty state (no allocation) is represented by a null pointer and zero
/// capacity; dropping an empty buffer is a no-op. For zero-sized `T` the
/// pointer is dangling and no memory is ever requested from the allocator.
pub struct HeapBuffer<T> {
    /// Start of the allocated block, or null in the empty state.
    ptr: *mut T,
    /// Number of allocated slots.
    cap: usize,
}

impl<T> HeapBuffer<T> {
    /// Creates an empty buffer that owns no allocation.
    pub fn new() -> HeapBuffer<T> {
        HeapBuffer {
            ptr: std::ptr::null_mut(),
            cap: 0,
        }
    }

    /// Allocates a buffer of `capacity` slots, each initialized to
    /// `T::default()`.
    ///
    /// A `capacity` of zero yields the empty state rather than a zero-sized
    /// allocation.
    ///
    /// # Errors
    ///
    /// Returns `CapacityOverflow` when `capacity` slots exceed the maximum
    /// allocatable size, and `AllocationFailed` when the global allocator
    /// cannot satisfy the request. Neither failure acquires any memory.
    pub fn allocate(capacity: usize) -> Result<HeapBuffer<T>>
    where
        T: Default,
    {
        if capacity == 0 {
            return Ok(HeapBuffer::new());
        }
        let layout =
            Layout::array::<T>(capacity).map_err(|_| Error::capacity_overflow(capacity))?;
        let ptr = if layout.size() == 0 {
            std::ptr::NonNull::<T>::dangling().as_ptr()
        } else {
            let raw = unsafe { std::alloc::alloc(layout) };
            if raw.is_null() {
                return Err(Error::allocation_failed(capacity, layout.size()));
            }
            raw.cast::<T>()
        };
        // A panicking `T::default` leaks the block instead of touching
        // partially initialized slots.
        for i in 0..capacity {
            unsafe { ptr.add(i).write(T::default()) };
        }
        Ok(HeapBuffer { ptr, cap: capacity })
    }

    /// Adopts a raw block previously produced by [`HeapBuffer::release`],
    /// making this buffer its sole owner.
    ///
    /// # Safety
    ///
    /// The caller must guarantee that:
    /// - `ptr` and `capacity` came from `release` on a buffer of the same `T`
    ///   (or describe an equivalent block: allocated with the layout of
    ///   `[T; capacity]` through the global allocator, every slot initialized),
    /// - the block is not owned, freed, or accessed through any other handle
    ///   afterward.
    pub unsafe fn from_raw(ptr: *mut T, capacity: usize) -> HeapBuffer<T> {
        HeapBuffer { ptr, cap: capacity }
    }

    /// Returns the number of allocated slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.cap
    }

    /// Returns `true` if the buffer currently owns an allocation.
    #[inline]
    pub fn is_allocated(&self) -> bool {
        !self.ptr.is_null()
    }

    /// Returns a raw pointer to the start of the block without transferring
    /// ownership. Null in the empty state.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.ptr
    }

    /// Returns a mutable raw pointer to the start of the block without
    /// transferring ownership. Null in the empty state.
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr
    }

    /// Returns a reference to the slot at `index` without a bounds check.
    ///
    /// # Safety
    ///
    /// `index` must be less than `self.capacity()`.
    #[inline]
    pub unsafe fn slot_unchecked(&self, index: usize) -> &T {
        debug_assert!(index < self.cap);
        unsafe { &*self.ptr.add(index) }
    }

    /// Returns a mutable reference to the slot at `index` without a bounds
    /// check.
    ///
    /// # Safety
    ///
    /// `index` must be less than `self.capacity()`.
    #[inline]
    pub unsafe fn slot_unchecked_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(index < self.cap);
        unsafe { &mut *self.ptr.add(index) }
    }

    /// Returns a slice over all allocated slots.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        if self.cap == 0 {
            return &[];
        }
        unsafe { std::slice::from_raw_parts(self.ptr, self.cap) }
    }

    /// Returns a mutable slice over all allocated slots.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        if self.cap == 0 {
            return &mut [];
        }
        unsafe { std::slice::from_raw_parts_mut(self.ptr, self.cap) }
    }

    /// Exchanges the owned allocations of two buffers in constant time.
    ///
    /// This is the reassignment primitive used by the container layer: new
    /// storage is fully built first and then adopted with a `swap`, so a
    /// failure while building never disturbs existing storage.
    #[inline]
    pub fn swap(&mut self, other: &mut HeapBuffer<T>) {
        std::mem::swap(&mut self.ptr, &mut other.ptr);
        std::mem::swap(&mut self.cap, &mut other.cap);
    }

    /// Relinquishes ownership of the block, returning its raw parts and
    /// resetting this buffer to the empty state.
    ///
    /// After the call, dropping this buffer performs no deallocation. The
    /// returned parts must eventually be handed back to
    /// [`HeapBuffer::from_raw`], which releases the block when dropped.
    pub fn release(&mut self) -> (*mut T, usize) {
        let parts = (self.ptr, self.cap);
        self.ptr = std::ptr::null_mut();
        self.cap = 0;
        parts
    }

    /// Layout of the owned block. Valid by the allocation invariant, which
    /// `allocate` checks and `from_raw` callers assert.
    fn slots_layout(capacity: usize) -> Layout {
        Layout::array::<T>(capacity).expect("slot layout")
    }
}

impl<T> Drop for HeapBuffer<T> {
    /// Drops every slot in place and releases the block back to the global
    /// allocator. A no-op for the empty state.
    fn drop(&mut self) {
        if self.cap == 0 {
            return;
        }
        unsafe {
            std::ptr::drop_in_place(std::ptr::slice_from_raw_parts_mut(self.ptr, self.cap));
            let layout = Self::slots_layout(self.cap);
            if layout.size() != 0 {
                std::alloc::dealloc(self.ptr.cast(), layout);
            }
        }
    }
}

impl<T> Default for HeapBuffer<T> {
    fn default() -> Self {
        HeapBuffer::new()
    }
}

// SAFETY: HeapBuffer exclusively owns its allocation and never aliases it, so
// it can move between threads whenever the element type can.
unsafe impl<T: Send> Send for HeapBuffer<T> {}

// SAFETY: Shared access only hands out `&T`, which is sound whenever `T` is
// `Sync`.
unsafe impl<T: Sync> Sync for HeapBuffer<T> {}

impl<T> std::fmt::Debug for HeapBuffer<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeapBuffer")
            .field("ptr", &self.ptr)
            .field("capacity", &self.cap)
            .finish()
    }
}
