//! Growable output buffer for transcoding sessions.
//!
//! A [`GrowableBuffer`] is owned exclusively by one session; growth is a
//! local reallocation that no other session can observe. The growth
//! protocol mirrors the engine's per-unit contract: before each unit the
//! session reserves at least `max_output` bytes of headroom, so the unit
//! itself can write without further checks.

/// Logical length, capacity and raw storage for conversion output.
///
/// Writes are append-only; previously written bytes are never reordered or
/// duplicated by growth. The storage is published to the caller only on
/// success, via [`GrowableBuffer::into_vec`].
#[derive(Debug)]
pub struct GrowableBuffer {
    bytes: Vec<u8>,
}

impl GrowableBuffer {
    /// Creates a buffer with the given initial capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity),
        }
    }

    /// Logical length: the number of bytes written so far.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether nothing has been written yet.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Current capacity of the underlying storage.
    pub fn capacity(&self) -> usize {
        self.bytes.capacity()
    }

    /// Ensures at least `headroom` bytes of free space before the next unit.
    ///
    /// When insufficient room remains the storage grows to
    /// `max(2 * (len + headroom), 2 * capacity)`, preserving all previously
    /// written bytes. Runs entirely within the owning session.
    pub fn reserve_unit(&mut self, headroom: usize) {
        let len = self.bytes.len();
        if self.bytes.capacity() - len < headroom {
            let target = usize::max(2 * (len + headroom), 2 * self.bytes.capacity());
            self.bytes.reserve_exact(target - len);
        }
    }

    /// Appends one byte.
    pub fn push(&mut self, byte: u8) {
        self.bytes.push(byte);
    }

    /// Appends a slice of bytes.
    pub fn extend_from_slice(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
    }

    /// The bytes written so far.
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// Publishes the buffer, trimmed to its logical length.
    pub fn into_vec(self) -> Vec<u8> {
        self.bytes
    }
}
