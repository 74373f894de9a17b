//! Per-call mutable state for one conversion.

use crate::buffer::GrowableBuffer;

/// Number of state bytes available to a stateful transcoder.
pub const STATE_BYTES: usize = 4;

/// Index of the "state initialized" flag byte.
pub const STATE_INIT: usize = 0;

/// Index of the "current character-set mode" byte.
pub const STATE_MODE: usize = 1;

/// The small fixed state array; semantics are private to the active
/// transcoder. By convention byte [`STATE_INIT`] is an initialized flag and
/// byte [`STATE_MODE`] the current character-set mode.
pub type State = [u8; STATE_BYTES];

/// Mutable state owned by one conversion call.
///
/// Sessions never share mutable state; every call gets its own session and
/// output buffer, so concurrent conversions need no coordination. On
/// success the buffer is published to the caller; on failure the whole
/// session is discarded.
pub struct TranscodingSession {
    /// State bytes for the active transcoder, zeroed at creation.
    pub state: State,
    output: GrowableBuffer,
    max_output: usize,
}

impl TranscodingSession {
    /// Creates a session whose output buffer starts at `capacity` bytes.
    pub fn new(max_output: usize, capacity: usize) -> Self {
        Self {
            state: [0; STATE_BYTES],
            output: GrowableBuffer::with_capacity(capacity),
            max_output,
        }
    }

    /// Reserves headroom for one unit's worst-case output.
    ///
    /// Both the table walker and whole-stream programs call this before
    /// every unit they emit; it is the only growth point.
    pub fn begin_unit(&mut self) {
        self.output.reserve_unit(self.max_output);
    }

    /// Appends output bytes for the current unit.
    pub fn write(&mut self, bytes: &[u8]) {
        debug_assert!(bytes.len() <= self.max_output);
        self.output.extend_from_slice(bytes);
    }

    /// Bytes produced so far.
    pub fn written(&self) -> usize {
        self.output.len()
    }

    /// Publishes the output buffer. Only reached on full success.
    pub fn into_output(self) -> Vec<u8> {
        self.output.into_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_starts_zeroed() {
        let session = TranscodingSession::new(4, 16);
        assert_eq!(session.state, [0; STATE_BYTES]);
        assert_eq!(session.written(), 0);
    }

    #[test]
    fn write_after_begin_unit() {
        let mut session = TranscodingSession::new(3, 0);
        session.begin_unit();
        session.write(&[0x1B, 0x28, 0x42]);
        assert_eq!(session.into_output(), vec![0x1B, 0x28, 0x42]);
    }
}
