//! Reusable scratch-buffer arena
//!
//! Recomputation paths that run on every range change reuse their output and
//! coordinate buffers instead of reallocating. [`DoubleArrayCache`] holds one
//! buffer per purpose; buffers grow on demand and are only shrunk by an
//! explicit [`trim`](DoubleArrayCache::trim) call.

/// A fixed set of reusable `f64` buffers, one per purpose index
#[derive(Debug)]
pub struct DoubleArrayCache {
    slots: Vec<Vec<f64>>,
    last_len: Vec<usize>,
}

impl DoubleArrayCache {
    /// Create a cache with `purposes` buffers
    #[must_use]
    pub fn new(purposes: usize) -> Self {
        Self {
            slots: vec![Vec::new(); purposes],
            last_len: vec![0; purposes],
        }
    }

    /// Borrow the buffer for `purpose`, cleared and with capacity for at
    /// least `min_len` values.
    ///
    /// # Panics
    ///
    /// Panics if `purpose` is outside the range given at construction.
    pub fn array(&mut self, purpose: usize, min_len: usize) -> &mut Vec<f64> {
        self.last_len[purpose] = min_len;
        let buf = &mut self.slots[purpose];
        buf.clear();
        buf.reserve(min_len);
        buf
    }

    /// Read the buffer for `purpose` as last written
    #[must_use]
    pub fn peek(&self, purpose: usize) -> &[f64] {
        &self.slots[purpose]
    }

    /// Release capacity beyond what the last use of each buffer needed
    pub fn trim(&mut self) {
        for (buf, &len) in self.slots.iter_mut().zip(self.last_len.iter()) {
            if buf.capacity() > len {
                buf.shrink_to(len.max(buf.len()));
            }
        }
    }

    /// Number of purpose slots
    #[must_use]
    pub fn purposes(&self) -> usize {
        self.slots.len()
    }
}
