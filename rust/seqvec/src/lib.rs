//! Growable sequence container over exclusively owned heap storage.
//!
//! [`SeqVec`] layers dynamic-array semantics (logical length, amortized
//! constant-time append, positional insert and remove, explicit capacity
//! control) on top of [`seqvec_buffer::HeapBuffer`], a minimal
//! exclusive-ownership heap block. Every capacity-changing operation builds
//! fresh storage first and adopts it with a constant-time swap, so a failed
//! allocation never disturbs the existing sequence.

pub mod reserve;
pub mod seq_vec;

pub use reserve::{ReserveHint, reserve_hint};
pub use seq_vec::SeqVec;
