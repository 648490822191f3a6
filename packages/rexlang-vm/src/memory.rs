//! Bounds-checked views over host-owned program and data memory.
//! Multi-byte words are little-endian. Every access checks the full range
//! `[address, address + size)` before touching a byte.

use crate::error::Fault;
use std::ops::Range;

fn checked_range(address: u32, size: u32, len: usize) -> Option<Range<usize>> {
    let start = usize::try_from(address).ok()?;
    let end = start.checked_add(usize::try_from(size).ok()?)?;
    (end <= len).then_some(start..end)
}

fn le_word(bytes: &[u8]) -> u32 {
    bytes
        .iter()
        .enumerate()
        .fold(0u32, |acc, (i, &b)| acc | (u32::from(b) << (i * 8)))
}

/// Read-only program memory.
#[derive(Clone, Copy, Debug)]
pub struct ProgramMemory<'m> {
    bytes: &'m [u8],
}

impl<'m> ProgramMemory<'m> {
    #[must_use]
    pub const fn new(bytes: &'m [u8]) -> Self {
        Self { bytes }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    #[must_use]
    pub const fn as_slice(&self) -> &'m [u8] {
        self.bytes
    }

    pub fn slice(&self, address: u32, len: u32) -> Result<&'m [u8], Fault> {
        checked_range(address, len, self.bytes.len())
            .map(|range| &self.bytes[range])
            .ok_or(Fault::ProgramAddressOutOfBounds)
    }

    pub fn read_u8(&self, address: u32) -> Result<u8, Fault> {
        Ok(self.slice(address, 1)?[0])
    }

    /// Little-endian read of `width` bytes (1, 2 or 4).
    pub fn read_le(&self, address: u32, width: u32) -> Result<u32, Fault> {
        self.slice(address, width).map(le_word)
    }
}

/// Writable data memory.
#[derive(Debug)]
pub struct DataMemory<'m> {
    bytes: &'m mut [u8],
}

impl<'m> DataMemory<'m> {
    #[must_use]
    pub fn new(bytes: &'m mut [u8]) -> Self {
        Self { bytes }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        self.bytes
    }

    fn range(&self, address: u32, size: u32) -> Result<Range<usize>, Fault> {
        checked_range(address, size, self.bytes.len()).ok_or(Fault::DataAddressOutOfBounds)
    }

    pub fn slice(&self, address: u32, len: u32) -> Result<&[u8], Fault> {
        let range = self.range(address, len)?;
        Ok(&self.bytes[range])
    }

    /// Little-endian read of `width` bytes (1, 2 or 4), zero-extended.
    pub fn read(&self, address: u32, width: u32) -> Result<u32, Fault> {
        self.slice(address, width).map(le_word)
    }

    /// Little-endian write of the low `width` bytes of `value`.
    pub fn write(&mut self, address: u32, width: u32, value: u32) -> Result<(), Fault> {
        let range = self.range(address, width)?;
        let bytes = value.to_le_bytes();
        self.bytes[range].copy_from_slice(&bytes[..width as usize]);
        Ok(())
    }

    pub fn read_u8(&self, address: u32) -> Result<u8, Fault> {
        Ok(self.slice(address, 1)?[0])
    }

    pub fn read_u16(&self, address: u32) -> Result<u16, Fault> {
        let b = self.slice(address, 2)?;
        Ok(u16::from_le_bytes([b[0], b[1]]))
    }

    pub fn read_u32(&self, address: u32) -> Result<u32, Fault> {
        self.read(address, 4)
    }

    pub fn write_u8(&mut self, address: u32, value: u8) -> Result<(), Fault> {
        self.write(address, 1, u32::from(value))
    }

    pub fn write_u16(&mut self, address: u32, value: u16) -> Result<(), Fault> {
        self.write(address, 2, u32::from(value))
    }

    pub fn write_u32(&mut self, address: u32, value: u32) -> Result<(), Fault> {
        self.write(address, 4, value)
    }

    pub fn write_bytes(&mut self, address: u32, src: &[u8]) -> Result<(), Fault> {
        let len = u32::try_from(src.len()).map_err(|_| Fault::DataAddressOutOfBounds)?;
        let range = self.range(address, len)?;
        self.bytes[range].copy_from_slice(src);
        Ok(())
    }

    /// Byte-by-byte copy in ascending address order. When `dst` lies inside
    /// `[src, src + len)` the leading source bytes repeat through the destination.
    pub fn copy_forward(&mut self, dst: u32, src: u32, len: u32) -> Result<(), Fault> {
        let from = self.range(src, len)?;
        let to = self.range(dst, len)?;
        for (d, s) in to.zip(from) {
            self.bytes[d] = self.bytes[s];
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn program_reads_are_little_endian_and_checked() {
        let program = [0x01, 0x02, 0x03, 0x04, 0x05];
        let mem = ProgramMemory::new(&program);
        assert_eq!(mem.read_le(0, 2), Ok(0x0201));
        assert_eq!(mem.read_le(1, 4), Ok(0x0504_0302));
        assert_eq!(mem.read_le(2, 4), Err(Fault::ProgramAddressOutOfBounds));
        assert_eq!(mem.read_u8(5), Err(Fault::ProgramAddressOutOfBounds));
        assert_eq!(mem.slice(5, 0), Ok(&[][..]));
    }

    #[test]
    fn data_range_check_covers_every_byte() {
        let mut bytes = [0u8; 8];
        let mut mem = DataMemory::new(&mut bytes);
        assert_eq!(mem.write_u32(4, 0xAABB_CCDD), Ok(()));
        assert_eq!(mem.write_u32(5, 1), Err(Fault::DataAddressOutOfBounds));
        assert_eq!(mem.read_u16(6), Ok(0xAABB));
        assert_eq!(mem.read(7, 2), Err(Fault::DataAddressOutOfBounds));
        assert_eq!(mem.read(u32::MAX, 4), Err(Fault::DataAddressOutOfBounds));
        assert_eq!(mem.as_slice(), &[0, 0, 0, 0, 0xDD, 0xCC, 0xBB, 0xAA]);
        assert_eq!(mem.write_u8(7, 0x11), Ok(()));
        assert_eq!(mem.write_u8(8, 0x11), Err(Fault::DataAddressOutOfBounds));
        assert_eq!(mem.read_u8(7), Ok(0x11));
    }

    #[test]
    fn forward_copy_replicates_on_overlap() {
        let mut bytes = [1u8, 2, 3, 0, 0, 0];
        let mut mem = DataMemory::new(&mut bytes);
        mem.copy_forward(1, 0, 5).unwrap();
        assert_eq!(mem.as_slice(), &[1, 1, 1, 1, 1, 1]);

        let mut bytes = [1u8, 2, 3, 4];
        let mut mem = DataMemory::new(&mut bytes);
        mem.copy_forward(0, 1, 3).unwrap();
        assert_eq!(mem.as_slice(), &[2, 3, 4, 4]);
        assert_eq!(mem.copy_forward(2, 0, 3), Err(Fault::DataAddressOutOfBounds));
    }
}
