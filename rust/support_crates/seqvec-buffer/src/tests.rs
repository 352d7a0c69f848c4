use std::cell::Cell;
use std::rc::Rc;

use seqvec_common::error::ErrorKind;

use crate::HeapBuffer;

/// Records a drop into a shared counter. `Default` produces an untracked
/// instance so the buffer's default-fill stays out of the count.
#[derive(Default)]
struct DropTracker(Option<Rc<Cell<usize>>>);

impl Drop for DropTracker {
    fn drop(&mut self) {
        if let Some(count) = &self.0 {
            count.set(count.get() + 1);
        }
    }
}

#[test]
fn test_empty_buffer() {
    let buf = HeapBuffer::<u64>::new();
    assert!(!buf.is_allocated());
    assert_eq!(buf.capacity(), 0);
    assert!(buf.as_ptr().is_null());
    assert!(buf.as_slice().is_empty());
}

#[test]
fn test_zero_capacity_is_empty_state() {
    let buf = HeapBuffer::<u64>::allocate(0).unwrap();
    assert!(!buf.is_allocated());
    assert_eq!(buf.capacity(), 0);
}

#[test]
fn test_allocate_default_fills() {
    let buf = HeapBuffer::<u64>::allocate(100).unwrap();
    assert!(buf.is_allocated());
    assert_eq!(buf.capacity(), 100);
    assert!(buf.as_slice().iter().all(|&x| x == 0));
}

#[test]
fn test_allocate_capacity_overflow() {
    let err = HeapBuffer::<u64>::allocate(usize::MAX / 2).unwrap_err();
    assert!(matches!(
        err.kind(),
        ErrorKind::CapacityOverflow { .. } | ErrorKind::AllocationFailed { .. }
    ));
}

#[test]
fn test_slot_access() {
    let mut buf = HeapBuffer::<u32>::allocate(8).unwrap();
    for i in 0..8 {
        buf.as_mut_slice()[i] = i as u32 * 10;
    }
    for i in 0..8 {
        assert_eq!(unsafe { *buf.slot_unchecked(i) }, i as u32 * 10);
    }
    unsafe {
        *buf.slot_unchecked_mut(3) = 777;
    }
    assert_eq!(buf.as_slice()[3], 777);
}

#[test]
fn test_swap_exchanges_allocations() {
    let mut a = HeapBuffer::<u8>::allocate(4).unwrap();
    let mut b = HeapBuffer::<u8>::new();
    a.as_mut_slice().copy_from_slice(&[1, 2, 3, 4]);

    a.swap(&mut b);
    assert!(!a.is_allocated());
    assert_eq!(a.capacity(), 0);
    assert_eq!(b.capacity(), 4);
    assert_eq!(b.as_slice(), &[1, 2, 3, 4]);
}

#[test]
fn test_release_and_from_raw_round_trip() {
    let count = Rc::new(Cell::new(0));
    let mut buf = HeapBuffer::<DropTracker>::allocate(5).unwrap();
    for slot in buf.as_mut_slice() {
        *slot = DropTracker(Some(count.clone()));
    }
    // Replacing the default fill drops 5 untracked instances, counted as 0.
    assert_eq!(count.get(), 0);

    let (ptr, cap) = buf.release();
    assert!(!buf.is_allocated());
    assert_eq!(buf.capacity(), 0);
    drop(buf);
    // The released block is still alive.
    assert_eq!(count.get(), 0);

    let adopted = unsafe { HeapBuffer::from_raw(ptr, cap) };
    assert_eq!(adopted.capacity(), 5);
    drop(adopted);
    assert_eq!(count.get(), 5);
}

#[test]
fn test_drop_runs_every_slot_destructor_once() {
    let count = Rc::new(Cell::new(0));
    {
        let mut buf = HeapBuffer::<DropTracker>::allocate(32).unwrap();
        for slot in buf.as_mut_slice() {
            *slot = DropTracker(Some(count.clone()));
        }
    }
    assert_eq!(count.get(), 32);
}

#[test]
fn test_zero_sized_elements() {
    let buf = HeapBuffer::<()>::allocate(16).unwrap();
    assert!(buf.is_allocated());
    assert_eq!(buf.capacity(), 16);
    assert_eq!(buf.as_slice().len(), 16);
}

#[test]
fn test_buffer_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HeapBuffer<u64>>();
}
