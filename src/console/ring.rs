//! Fixed-capacity byte ring with a single boundary byte.
//!
//! The ring knows nothing about records. It stores bytes addressed modulo its
//! capacity and remembers `pos`, the index of the boundary byte, which is
//! always zero.

use super::ConsoleError;

/// Byte storage of one console.
#[derive(Debug, Clone)]
pub struct RingBuffer {
    storage: Box<[u8]>,
    pos: usize,
}

impl RingBuffer {
    /// Allocate a zeroed ring of `capacity` bytes.
    ///
    /// # Errors
    ///
    /// [`ConsoleError::CapacityTooSmall`] below two bytes, and
    /// [`ConsoleError::Allocation`] when the backing memory is unavailable.
    pub fn new(capacity: usize) -> Result<Self, ConsoleError> {
        if capacity < 2 {
            return Err(ConsoleError::CapacityTooSmall { capacity });
        }
        let mut storage = Vec::new();
        storage
            .try_reserve_exact(capacity)
            .map_err(|_| ConsoleError::Allocation { bytes: capacity })?;
        storage.resize(capacity, 0);
        Ok(Self {
            storage: storage.into_boxed_slice(),
            pos: 0,
        })
    }

    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Index of the boundary byte.
    pub const fn boundary_index(&self) -> usize {
        self.pos
    }

    /// Read the byte at a logical offset (reduced modulo capacity).
    pub fn read_byte_at(&self, offset: usize) -> u8 {
        self.storage[offset % self.storage.len()]
    }

    /// Write the byte at a logical offset (reduced modulo capacity).
    pub fn write_byte_at(&mut self, offset: usize, value: u8) {
        let len = self.storage.len();
        self.storage[offset % len] = value;
    }

    /// Raw storage in physical order.
    pub fn as_bytes(&self) -> &[u8] {
        &self.storage
    }

    /// Move the boundary to `index`, which must already hold a zero byte.
    pub(crate) fn set_boundary(&mut self, index: usize) {
        self.pos = index % self.storage.len();
        debug_assert_eq!(self.storage[self.pos], 0, "boundary byte must be zero");
    }

    /// Forget all history without wiping the storage.
    ///
    /// Index 1 is zeroed too: it is where the first decode after a reset
    /// looks for a settings byte.
    pub(crate) fn reset(&mut self) {
        self.pos = 0;
        self.storage[0] = 0;
        self.storage[1] = 0;
    }
}

/// Write position that steps backwards around the ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteHead {
    index: usize,
    capacity: usize,
}

impl WriteHead {
    /// Start at the current boundary byte.
    pub fn at_boundary(ring: &RingBuffer) -> Self {
        Self {
            index: ring.boundary_index(),
            capacity: ring.capacity(),
        }
    }

    pub const fn index(self) -> usize {
        self.index
    }

    /// Write `value` here, then step one byte back.
    pub fn put(&mut self, ring: &mut RingBuffer, value: u8) {
        ring.write_byte_at(self.index, value);
        self.index = (self.index + self.capacity - 1) % self.capacity;
    }
}

/// Read position walking forward from the boundary.
///
/// Tracks the distance travelled so a reader can tell when it has gone all
/// the way around the ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadCursor {
    start: usize,
    travelled: usize,
}

impl ReadCursor {
    /// Cursor on the first byte after the boundary.
    pub const fn after_boundary(ring: &RingBuffer) -> Self {
        Self {
            start: ring.boundary_index(),
            travelled: 1,
        }
    }

    /// Bytes between the boundary and the current position.
    pub const fn travelled(self) -> usize {
        self.travelled
    }

    pub fn read(self, ring: &RingBuffer) -> u8 {
        ring.read_byte_at(self.start + self.travelled)
    }

    pub const fn advance(&mut self) {
        self.travelled += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_tiny_capacity() {
        assert_eq!(
            RingBuffer::new(1).unwrap_err(),
            ConsoleError::CapacityTooSmall { capacity: 1 }
        );
        assert!(RingBuffer::new(2).is_ok());
    }

    #[test]
    fn test_offsets_wrap_modulo_capacity() {
        let mut ring = RingBuffer::new(4).unwrap();
        ring.write_byte_at(6, 9);
        assert_eq!(ring.as_bytes(), &[0, 0, 9, 0]);
        assert_eq!(ring.read_byte_at(10), 9);
    }

    #[test]
    fn test_write_head_steps_back_through_zero() {
        let mut ring = RingBuffer::new(3).unwrap();
        let mut head = WriteHead::at_boundary(&ring);
        head.put(&mut ring, 1);
        head.put(&mut ring, 2);
        head.put(&mut ring, 3);
        assert_eq!(ring.as_bytes(), &[1, 3, 2]);
        assert_eq!(head.index(), 0);
    }

    #[test]
    fn test_read_cursor_counts_from_boundary() {
        let mut ring = RingBuffer::new(4).unwrap();
        ring.write_byte_at(3, 7);
        ring.write_byte_at(2, 0);
        ring.set_boundary(2);
        let mut cursor = ReadCursor::after_boundary(&ring);
        assert_eq!(cursor.travelled(), 1);
        assert_eq!(cursor.read(&ring), 7);
        cursor.advance();
        cursor.advance();
        cursor.advance();
        assert_eq!(cursor.travelled(), 4);
        assert_eq!(cursor.read(&ring), 0, "back on the boundary");
    }

    #[test]
    fn test_reset_zeroes_boundary_and_successor_only() {
        let mut ring = RingBuffer::new(4).unwrap();
        for offset in 0..4 {
            ring.write_byte_at(offset, 5);
        }
        ring.write_byte_at(2, 0);
        ring.set_boundary(2);
        ring.reset();
        assert_eq!(ring.boundary_index(), 0);
        assert_eq!(ring.as_bytes(), &[0, 0, 0, 5]);
    }
}
