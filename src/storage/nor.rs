use super::ScratchRegion;
use crate::consts::ERASED_BYTE;
use embedded_storage::nor_flash::{
    MultiwriteNorFlash, NorFlash, NorFlashError, NorFlashErrorKind,
};

/// Largest `WRITE_SIZE` a wrapped flash may have.
const MAX_WRITE_SIZE: usize = 32;

/// A window of an `embedded-storage` NOR flash used as a scratch region.
///
/// The window must start and end on erase-sector boundaries. Programs that are
/// not aligned to the flash's `WRITE_SIZE` are padded with `0xFF`.
///
/// # Notes
/// - The flash must support byte-granular reads (`READ_SIZE == 1`).
/// - A region built with [`new`](NorFlashRegion::new) never reports
///   [`can_reprogram`](ScratchRegion::can_reprogram), so the calibration store
///   erases and rewrites its table on every change. Flashes that implement
///   [`MultiwriteNorFlash`] can use [`new_multiwrite`](NorFlashRegion::new_multiwrite)
///   and have single calibration bytes programmed in place.
#[derive(Debug)]
pub struct NorFlashRegion<F> {
    flash: F,
    start: u32,
    len: u32,
    multiwrite: bool,
}

impl<F: NorFlash> NorFlashRegion<F> {
    /// Wraps `len` bytes of `flash` starting at `start`.
    ///
    /// # Errors
    /// - [`NorFlashErrorKind::NotAligned`] if the window doesn't sit on erase-sector
    ///   boundaries, or the flash's read/write granularity is unsupported
    /// - [`NorFlashErrorKind::OutOfBounds`] if the window runs past the end of the flash
    pub fn new(flash: F, start: u32, len: u32) -> Result<Self, NorFlashErrorKind> {
        let sector = F::ERASE_SIZE as u32;
        if start % sector != 0
            || len % sector != 0
            || F::READ_SIZE != 1
            || F::WRITE_SIZE > MAX_WRITE_SIZE
        {
            return Err(NorFlashErrorKind::NotAligned);
        }
        if start as usize + len as usize > flash.capacity() {
            return Err(NorFlashErrorKind::OutOfBounds);
        }
        Ok(Self {
            flash,
            start,
            len,
            multiwrite: false,
        })
    }

    /// Gives the flash driver back.
    pub fn release(self) -> F {
        self.flash
    }

    fn address(&self, offset: usize, len: usize) -> Result<u32, NorFlashErrorKind> {
        if offset.saturating_add(len) > self.len as usize {
            return Err(NorFlashErrorKind::OutOfBounds);
        }
        Ok(self.start + offset as u32)
    }
}

impl<F: MultiwriteNorFlash> NorFlashRegion<F> {
    /// Wraps a window of a flash that allows programming a word more than once.
    ///
    /// # Errors
    /// Same as [`new`](NorFlashRegion::new).
    pub fn new_multiwrite(flash: F, start: u32, len: u32) -> Result<Self, NorFlashErrorKind> {
        let mut region = Self::new(flash, start, len)?;
        region.multiwrite = true;
        Ok(region)
    }
}

fn kind<E: NorFlashError>(e: E) -> NorFlashErrorKind {
    e.kind()
}

impl<F: NorFlash> ScratchRegion for NorFlashRegion<F> {
    type Error = NorFlashErrorKind;

    fn capacity(&self) -> usize {
        self.len as usize
    }

    fn read(&mut self, offset: usize, buf: &mut [u8]) -> Result<(), Self::Error> {
        let address = self.address(offset, buf.len())?;
        self.flash.read(address, buf).map_err(kind)
    }

    fn program(&mut self, offset: usize, data: &[u8]) -> Result<(), Self::Error> {
        let mut address = self.address(offset, data.len())?;
        let word = F::WRITE_SIZE;
        let mut rest = data;
        while !rest.is_empty() {
            // Program one write-size word at a time, padding around the payload.
            let skip = address as usize % word;
            let take = (word - skip).min(rest.len());
            let mut chunk = [ERASED_BYTE; MAX_WRITE_SIZE];
            chunk[skip..skip + take].copy_from_slice(&rest[..take]);
            self.flash
                .write(address - skip as u32, &chunk[..word])
                .map_err(kind)?;
            address += take as u32;
            rest = &rest[take..];
        }
        Ok(())
    }

    fn erase(&mut self) -> Result<(), Self::Error> {
        self.flash
            .erase(self.start, self.start + self.len)
            .map_err(kind)
    }

    fn can_reprogram(&self) -> bool {
        self.multiwrite
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_storage::nor_flash::{ErrorType, ReadNorFlash};

    /// 4 sectors of 16 bytes, programmed in 4 byte words.
    struct WordFlash {
        bytes: [u8; 64],
        writes: usize,
        erases: usize,
    }

    impl WordFlash {
        fn new() -> Self {
            Self {
                bytes: [0xff; 64],
                writes: 0,
                erases: 0,
            }
        }
    }

    impl ErrorType for WordFlash {
        type Error = NorFlashErrorKind;
    }

    impl ReadNorFlash for WordFlash {
        const READ_SIZE: usize = 1;

        fn read(&mut self, offset: u32, bytes: &mut [u8]) -> Result<(), Self::Error> {
            let start = offset as usize;
            bytes.copy_from_slice(&self.bytes[start..start + bytes.len()]);
            Ok(())
        }

        fn capacity(&self) -> usize {
            self.bytes.len()
        }
    }

    impl NorFlash for WordFlash {
        const WRITE_SIZE: usize = 4;
        const ERASE_SIZE: usize = 16;

        fn erase(&mut self, from: u32, to: u32) -> Result<(), Self::Error> {
            if from % 16 != 0 || to % 16 != 0 {
                return Err(NorFlashErrorKind::NotAligned);
            }
            self.bytes[from as usize..to as usize].fill(0xff);
            self.erases += 1;
            Ok(())
        }

        fn write(&mut self, offset: u32, bytes: &[u8]) -> Result<(), Self::Error> {
            if offset % 4 != 0 || bytes.len() % 4 != 0 {
                return Err(NorFlashErrorKind::NotAligned);
            }
            let start = offset as usize;
            for (d, s) in self.bytes[start..start + bytes.len()].iter_mut().zip(bytes) {
                *d &= *s;
            }
            self.writes += 1;
            Ok(())
        }
    }

    impl MultiwriteNorFlash for WordFlash {}

    #[test]
    fn test_reprogramming_needs_multiwrite() {
        let region = NorFlashRegion::new(WordFlash::new(), 0, 16).unwrap();
        assert!(!region.can_reprogram());
        let region = NorFlashRegion::new_multiwrite(WordFlash::new(), 0, 16).unwrap();
        assert!(region.can_reprogram());
    }

    #[cfg(feature = "calibration")]
    #[test]
    fn test_calibration_rewrites_without_multiwrite() {
        use crate::calibration::CalibrationStore;

        let region = NorFlashRegion::new(WordFlash::new(), 0, 32).unwrap();
        let mut cal = CalibrationStore::open(region).unwrap();
        cal.set(0, 1).unwrap();
        cal.set(1, 2).unwrap();
        let flash = cal.release().release();
        assert_eq!(flash.erases, 2);
        assert_eq!(&flash.bytes[..3], &[1, 2, 0xff]);
    }

    #[cfg(feature = "calibration")]
    #[test]
    fn test_calibration_programs_in_place_with_multiwrite() {
        use crate::calibration::CalibrationStore;

        let region = NorFlashRegion::new_multiwrite(WordFlash::new(), 0, 32).unwrap();
        let mut cal = CalibrationStore::open(region).unwrap();
        cal.set(0, 1).unwrap();
        cal.set(1, 2).unwrap();
        let flash = cal.release().release();
        assert_eq!(flash.erases, 0);
        assert_eq!(&flash.bytes[..3], &[1, 2, 0xff]);
    }

    #[test]
    fn test_window_must_be_sector_aligned() {
        assert_eq!(
            NorFlashRegion::new(WordFlash::new(), 8, 16).err(),
            Some(NorFlashErrorKind::NotAligned)
        );
        assert_eq!(
            NorFlashRegion::new(WordFlash::new(), 48, 32).err(),
            Some(NorFlashErrorKind::OutOfBounds)
        );
    }

    #[test]
    fn test_unaligned_program_is_padded() {
        let mut region = NorFlashRegion::new(WordFlash::new(), 16, 32).unwrap();
        region.program(3, &[1, 2, 3]).unwrap();
        let mut buf = [0u8; 8];
        region.read(0, &mut buf).unwrap();
        assert_eq!(buf, [0xff, 0xff, 0xff, 1, 2, 3, 0xff, 0xff]);
        let flash = region.release();
        assert_eq!(flash.writes, 2);
        assert_eq!(flash.bytes[16 + 3], 1);
    }

    #[test]
    fn test_erase_only_touches_window() {
        let mut flash = WordFlash::new();
        flash.bytes.fill(0);
        let mut region = NorFlashRegion::new(flash, 16, 16).unwrap();
        region.erase().unwrap();
        let flash = region.release();
        assert!(flash.bytes[16..32].iter().all(|&b| b == 0xff));
        assert!(flash.bytes[..16].iter().all(|&b| b == 0));
        assert!(flash.bytes[32..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_access_past_window_fails() {
        let mut region = NorFlashRegion::new(WordFlash::new(), 0, 16).unwrap();
        let mut buf = [0u8; 4];
        assert_eq!(
            region.read(14, &mut buf),
            Err(NorFlashErrorKind::OutOfBounds)
        );
        assert_eq!(region.program(16, &[0]), Err(NorFlashErrorKind::OutOfBounds));
    }
}
