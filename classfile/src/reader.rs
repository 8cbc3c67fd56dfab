//! Big-endian primitive decoding over a byte slice, with sticky error state
//! (spec §4.A). Once a read runs past the end of the buffer, every
//! subsequent read is a no-op that returns zero/empty; the caller checks
//! `ok()` once at the end of a parse instead of threading a `Result`
//! through every field read.

use byteorder::{BigEndian, ByteOrder};

use crate::error::{ClassFormatError, FormatCause};

pub struct ClassReader<'a> {
    bytes: &'a [u8],
    position: usize,
    errored: bool,
}

impl<'a> ClassReader<'a> {
    pub fn new(bytes: &'a [u8]) -> ClassReader<'a> {
        ClassReader {
            bytes,
            position: 0,
            errored: false,
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    fn take(&mut self, n: usize) -> &'a [u8] {
        if self.errored || self.position + n > self.bytes.len() {
            self.errored = true;
            return &[];
        }
        let slice = &self.bytes[self.position..self.position + n];
        self.position += n;
        slice
    }

    pub fn read_u1(&mut self) -> u8 {
        let slice = self.take(1);
        slice.first().copied().unwrap_or(0)
    }

    pub fn read_u2(&mut self) -> u16 {
        let slice = self.take(2);
        if slice.len() < 2 {
            return 0;
        }
        BigEndian::read_u16(slice)
    }

    pub fn read_u4(&mut self) -> u32 {
        let slice = self.take(4);
        if slice.len() < 4 {
            return 0;
        }
        BigEndian::read_u32(slice)
    }

    pub fn read_u8(&mut self) -> u64 {
        let slice = self.take(8);
        if slice.len() < 8 {
            return 0;
        }
        BigEndian::read_u64(slice)
    }

    pub fn read_bytes(&mut self, n: usize) -> Vec<u8> {
        self.take(n).to_vec()
    }

    pub fn ok(&self) -> bool {
        !self.errored
    }

    /// Checks the latched error state once; the single point where a
    /// straight-line parse reports failure.
    pub fn finish(self, context: &str) -> Result<(), ClassFormatError> {
        if self.errored {
            Err(ClassFormatError::new(FormatCause::UnexpectedEof, context))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_big_endian_primitives() {
        let mut r = ClassReader::new(&[0xCA, 0xFE, 0xBA, 0xBE, 0x00, 0x01]);
        assert_eq!(r.read_u4(), 0xCAFEBABE);
        assert_eq!(r.read_u2(), 1);
        assert!(r.ok());
    }

    #[test]
    fn sticky_error_on_truncated_input() {
        let mut r = ClassReader::new(&[0x00]);
        assert_eq!(r.read_u4(), 0);
        assert!(!r.ok());
        // further reads stay at zero rather than panicking
        assert_eq!(r.read_u2(), 0);
        assert!(r.finish("test").is_err());
    }
}
