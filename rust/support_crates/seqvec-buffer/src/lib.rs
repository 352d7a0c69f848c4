//! Exclusive-ownership heap buffers of typed element slots.

pub mod heap_buffer;

pub use heap_buffer::HeapBuffer;

#[cfg(test)]
mod tests;
