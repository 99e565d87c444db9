// Owned message payload handed from the receive loop to exactly one writer.

/// Bytes of the leading sequence counter.
pub const SEQUENCE_LEN: usize = 4;

/// A received message. Not `Clone`: the receive loop moves it into the one
/// writer that persists it, and the buffer is released when that writer is done.
#[derive(Debug, PartialEq, Eq)]
pub struct Message {
    payload: Vec<u8>,
}

impl Message {
    pub fn new(payload: Vec<u8>) -> Self {
        Self { payload }
    }

    /// Builds a `size`-byte payload carrying `sequence` in its first bytes
    /// (native byte order, truncated if `size` is smaller than the counter).
    pub fn with_sequence(sequence: i32, size: usize) -> Self {
        let mut payload = vec![0u8; size];
        let counter = sequence.to_ne_bytes();
        let n = size.min(SEQUENCE_LEN);
        payload[..n].copy_from_slice(&counter[..n]);
        Self { payload }
    }

    /// The embedded sequence counter, or `None` if the message is too short to carry one.
    pub fn sequence(&self) -> Option<i32> {
        let bytes: [u8; SEQUENCE_LEN] = self.payload.get(..SEQUENCE_LEN)?.try_into().ok()?;
        Some(i32::from_ne_bytes(bytes))
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn len(&self) -> usize {
        self.payload.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.payload
    }
}
