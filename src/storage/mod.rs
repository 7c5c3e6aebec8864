//! Non-volatile scratch region abstraction.
//!
//! The stores never talk to a flash peripheral directly. They read, program and
//! erase a fixed-size region through [`ScratchRegion`], which a board support
//! crate implements for its flash driver.
//!
//! ## Flash characteristics assumed
//!
//! - An erase sets every byte of the region to [`ERASED_BYTE`](crate::consts::ERASED_BYTE)
//! - Programming can only clear bits (1→0); setting a bit back needs an erase
//! - Operations are synchronous and complete before returning
//!
//! Two implementations ship with the crate:
//! - [`RamRegion`]: in-memory region with the same bit semantics and fault injection
//! - [`NorFlashRegion`] (feature `embedded-storage`): a window onto any
//!   `embedded_storage::nor_flash::NorFlash`

mod ram;
pub use ram::*;

#[cfg(feature = "embedded-storage")]
mod nor;
#[cfg(feature = "embedded-storage")]
pub use nor::*;

/// A fixed-size region of non-volatile storage, addressed from offset 0.
pub trait ScratchRegion {
    /// Driver error type.
    type Error: core::fmt::Debug;

    /// Size of the region in bytes.
    fn capacity(&self) -> usize;

    /// Reads `buf.len()` bytes starting at `offset`.
    fn read(&mut self, offset: usize, buf: &mut [u8]) -> Result<(), Self::Error>;

    /// Programs `data` starting at `offset`.
    ///
    /// Only clears bits. The target bytes should be erased first unless the caller
    /// knows the new value only clears bits of the old one.
    fn program(&mut self, offset: usize, data: &[u8]) -> Result<(), Self::Error>;

    /// Erases the whole region.
    fn erase(&mut self) -> Result<(), Self::Error>;

    /// Returns `true` if already programmed bytes may be programmed again, as long
    /// as bits only clear.
    ///
    /// Flashes that program whole words and forbid writing a word twice return
    /// `false`, and every change to such a region goes through an erase.
    fn can_reprogram(&self) -> bool {
        true
    }

    /// Erases the region, then programs `data` from offset 0.
    fn rewrite(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.erase()?;
        self.program(0, data)
    }
}

impl<T: ScratchRegion + ?Sized> ScratchRegion for &mut T {
    type Error = T::Error;

    fn capacity(&self) -> usize {
        (**self).capacity()
    }

    fn read(&mut self, offset: usize, buf: &mut [u8]) -> Result<(), Self::Error> {
        (**self).read(offset, buf)
    }

    fn program(&mut self, offset: usize, data: &[u8]) -> Result<(), Self::Error> {
        (**self).program(offset, data)
    }

    fn erase(&mut self) -> Result<(), Self::Error> {
        (**self).erase()
    }

    fn can_reprogram(&self) -> bool {
        (**self).can_reprogram()
    }
}
