use super::ScratchRegion;
use crate::consts::ERASED_BYTE;

/// Errors reported by [`RamRegion`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum RamRegionError {
    /// An injected read failure.
    ReadFault,
    /// An injected program or erase failure.
    WriteFault,
    /// The access runs past the end of the region.
    OutOfBounds,
}

/// An in-memory scratch region with NOR flash semantics.
///
/// Starts erased (all `0xFF`). Programming ANDs the new bytes into the old ones,
/// exactly like flash that can only clear bits. Useful for boards that keep their
/// scratch area in battery-backed RAM, and for exercising the stores' failure
/// handling:
///
/// - [`fail_reads`](RamRegion::fail_reads): every read fails until cleared
/// - [`fail_next_writes`](RamRegion::fail_next_writes): the next `n` program/erase calls fail
/// - [`tear_next_program`](RamRegion::tear_next_program): the next program stops part way,
///   like a power loss
///
/// ## Example
///
/// ```rust
/// use sik_params::storage::{RamRegion, ScratchRegion};
///
/// let mut region = RamRegion::<8>::new();
/// region.program(0, &[0x0f]).unwrap();
/// region.program(0, &[0xf3]).unwrap(); // bits only clear
/// let mut buf = [0u8; 1];
/// region.read(0, &mut buf).unwrap();
/// assert_eq!(buf, [0x03]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RamRegion<const N: usize> {
    bytes: [u8; N],
    fail_reads: bool,
    fail_writes: u8,
    tear_at: Option<usize>,
    erase_count: u32,
}

impl<const N: usize> Default for RamRegion<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> RamRegion<N> {
    /// Creates an erased region.
    pub const fn new() -> Self {
        Self::from_bytes([ERASED_BYTE; N])
    }

    /// Creates a region with the given contents.
    pub const fn from_bytes(bytes: [u8; N]) -> Self {
        Self {
            bytes,
            fail_reads: false,
            fail_writes: 0,
            tear_at: None,
            erase_count: 0,
        }
    }

    /// Current contents of the region.
    pub fn as_bytes(&self) -> &[u8; N] {
        &self.bytes
    }

    /// Overwrites a byte directly, bypassing flash semantics. Simulates bit rot.
    pub fn corrupt(&mut self, offset: usize, value: u8) {
        if let Some(b) = self.bytes.get_mut(offset) {
            *b = value;
        }
    }

    /// Makes every read fail (`true`) or succeed (`false`).
    pub fn fail_reads(&mut self, fail: bool) {
        self.fail_reads = fail;
    }

    /// Makes the next `count` program or erase calls fail without touching the contents.
    pub fn fail_next_writes(&mut self, count: u8) {
        self.fail_writes = count;
    }

    /// Makes the next program call stop after `len` bytes and report success.
    pub fn tear_next_program(&mut self, len: usize) {
        self.tear_at = Some(len);
    }

    /// Number of erases performed so far.
    pub fn erase_count(&self) -> u32 {
        self.erase_count
    }

    fn injected_write_fault(&mut self) -> bool {
        if self.fail_writes > 0 {
            self.fail_writes -= 1;
            true
        } else {
            false
        }
    }
}

impl<const N: usize> ScratchRegion for RamRegion<N> {
    type Error = RamRegionError;

    fn capacity(&self) -> usize {
        N
    }

    fn read(&mut self, offset: usize, buf: &mut [u8]) -> Result<(), Self::Error> {
        if self.fail_reads {
            return Err(RamRegionError::ReadFault);
        }
        let src = self
            .bytes
            .get(offset..offset.saturating_add(buf.len()))
            .ok_or(RamRegionError::OutOfBounds)?;
        buf.copy_from_slice(src);
        Ok(())
    }

    fn program(&mut self, offset: usize, data: &[u8]) -> Result<(), Self::Error> {
        if self.injected_write_fault() {
            return Err(RamRegionError::WriteFault);
        }
        let dst = self
            .bytes
            .get_mut(offset..offset.saturating_add(data.len()))
            .ok_or(RamRegionError::OutOfBounds)?;
        let len = match self.tear_at.take() {
            Some(at) => at.min(data.len()),
            None => data.len(),
        };
        for (d, s) in dst.iter_mut().zip(data.iter()).take(len) {
            *d &= *s;
        }
        Ok(())
    }

    fn erase(&mut self) -> Result<(), Self::Error> {
        if self.injected_write_fault() {
            return Err(RamRegionError::WriteFault);
        }
        self.bytes = [ERASED_BYTE; N];
        self.erase_count += 1;
        Ok(())
    }
}
