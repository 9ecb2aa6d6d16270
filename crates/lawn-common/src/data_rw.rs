// data_rw.rs — little-endian binary cursors over a file handle or a memory span

use std::borrow::Cow;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use thiserror::Error;

/// Failure conditions of the save codec. Cursor primitives only ever
/// produce `OutOfData` and `Io`; the format layers add the rest.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("read past end of data")]
    OutOfData,
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("save header mismatch")]
    HeaderMismatch,
    #[error("payload checksum mismatch")]
    ChecksumMismatch,
    #[error("table capacity differs from this build")]
    CapacityMismatch,
}

pub type DataResult<T> = Result<T, DataError>;

enum ReadBacking<'a> {
    Closed,
    File(File),
    Memory(Cow<'a, [u8]>),
}

/// Read side of the byte cursor. Backed by an open file or a memory span
/// (borrowed or owned). Reads are exact-length: a shortfall is
/// `DataError::OutOfData`, never a silent short read.
pub struct DataReader<'a> {
    backing: ReadBacking<'a>,
    pos: usize,
}

impl<'a> DataReader<'a> {
    pub fn new() -> Self {
        DataReader { backing: ReadBacking::Closed, pos: 0 }
    }

    pub fn open_file<P: AsRef<Path>>(path: P) -> DataResult<DataReader<'static>> {
        let file = File::open(path)?;
        Ok(DataReader { backing: ReadBacking::File(file), pos: 0 })
    }

    pub fn from_memory(data: &'a [u8]) -> Self {
        DataReader { backing: ReadBacking::Memory(Cow::Borrowed(data)), pos: 0 }
    }

    pub fn from_vec(data: Vec<u8>) -> DataReader<'static> {
        DataReader { backing: ReadBacking::Memory(Cow::Owned(data)), pos: 0 }
    }

    /// Point the cursor at a new memory span. The previous backing
    /// (file handle or buffer) is released first.
    pub fn open_memory(&mut self, data: &'a [u8]) {
        self.backing = ReadBacking::Memory(Cow::Borrowed(data));
        self.pos = 0;
    }

    pub fn close(&mut self) {
        self.backing = ReadBacking::Closed;
        self.pos = 0;
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Bytes left to read, when the backing span is known (memory).
    /// `None` for file-backed cursors.
    pub fn remaining(&self) -> Option<usize> {
        match self.backing {
            ReadBacking::Memory(ref data) => Some(data.len().saturating_sub(self.pos)),
            _ => None,
        }
    }

    pub fn read_bytes(&mut self, dest: &mut [u8]) -> DataResult<()> {
        match self.backing {
            ReadBacking::Closed => Err(DataError::OutOfData),
            ReadBacking::Memory(ref data) => {
                let end = self.pos.checked_add(dest.len()).ok_or(DataError::OutOfData)?;
                if end > data.len() {
                    self.pos = data.len();
                    return Err(DataError::OutOfData);
                }
                dest.copy_from_slice(&data[self.pos..end]);
                self.pos = end;
                Ok(())
            }
            ReadBacking::File(ref mut file) => match file.read_exact(dest) {
                Ok(()) => {
                    self.pos += dest.len();
                    Ok(())
                }
                Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                    Err(DataError::OutOfData)
                }
                Err(e) => Err(DataError::Io(e)),
            },
        }
    }

    /// Step the read position backward by up to the number of bytes
    /// already consumed.
    pub fn rewind(&mut self, num_bytes: usize) -> DataResult<()> {
        let num_bytes = num_bytes.min(self.pos);
        match self.backing {
            ReadBacking::Closed => Ok(()),
            ReadBacking::Memory(_) => {
                self.pos -= num_bytes;
                Ok(())
            }
            ReadBacking::File(ref mut file) => {
                file.seek(SeekFrom::Current(-(num_bytes as i64)))?;
                self.pos -= num_bytes;
                Ok(())
            }
        }
    }

    pub fn read_u8(&mut self) -> DataResult<u8> {
        let mut buf = [0u8; 1];
        self.read_bytes(&mut buf)?;
        Ok(buf[0])
    }

    pub fn read_u16(&mut self) -> DataResult<u16> {
        let mut buf = [0u8; 2];
        self.read_bytes(&mut buf)?;
        Ok(u16::from_le_bytes(buf))
    }

    pub fn read_u32(&mut self) -> DataResult<u32> {
        let mut buf = [0u8; 4];
        self.read_bytes(&mut buf)?;
        Ok(u32::from_le_bytes(buf))
    }

    pub fn read_u64(&mut self) -> DataResult<u64> {
        let mut buf = [0u8; 8];
        self.read_bytes(&mut buf)?;
        Ok(u64::from_le_bytes(buf))
    }

    pub fn read_bool(&mut self) -> DataResult<bool> {
        Ok(self.read_u8()? != 0)
    }

    pub fn read_f32(&mut self) -> DataResult<f32> {
        Ok(f32::from_bits(self.read_u32()?))
    }

    pub fn read_f64(&mut self) -> DataResult<f64> {
        Ok(f64::from_bits(self.read_u64()?))
    }

    /// A string on the wire is a u16 length followed by that many raw
    /// bytes; not NUL-terminated, not validated as UTF-8.
    pub fn read_string(&mut self) -> DataResult<String> {
        let len = self.read_u16()? as usize;
        let mut buf = vec![0u8; len];
        self.read_bytes(&mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

impl<'a> Default for DataReader<'a> {
    fn default() -> Self {
        Self::new()
    }
}

enum WriteBacking {
    Closed,
    File(File),
    Memory(Vec<u8>),
}

/// Write side of the byte cursor. Memory writes grow the buffer
/// geometrically (capacity doubles until sufficient); file writes
/// surface every I/O error as `Err` rather than dropping bytes.
pub struct DataWriter {
    backing: WriteBacking,
}

impl DataWriter {
    pub fn new() -> Self {
        DataWriter { backing: WriteBacking::Closed }
    }

    pub fn open_file<P: AsRef<Path>>(path: P) -> DataResult<DataWriter> {
        let file = File::create(path)?;
        Ok(DataWriter { backing: WriteBacking::File(file) })
    }

    pub fn open_memory(reserve: usize) -> DataWriter {
        let reserve = reserve.max(32);
        DataWriter { backing: WriteBacking::Memory(Vec::with_capacity(reserve)) }
    }

    pub fn close(&mut self) {
        self.backing = WriteBacking::Closed;
    }

    /// Bytes written so far, for a memory-backed writer.
    pub fn len(&self) -> usize {
        match self.backing {
            WriteBacking::Memory(ref data) => data.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn data(&self) -> &[u8] {
        match self.backing {
            WriteBacking::Memory(ref data) => data,
            _ => &[],
        }
    }

    pub fn take_data(self) -> Vec<u8> {
        match self.backing {
            WriteBacking::Memory(data) => data,
            _ => Vec::new(),
        }
    }

    fn ensure_capacity(data: &mut Vec<u8>, needed: usize) {
        if data.capacity() < needed {
            let mut capacity = data.capacity().max(32);
            while capacity < needed {
                capacity <<= 1;
            }
            data.reserve_exact(capacity - data.len());
        }
    }

    pub fn write_bytes(&mut self, src: &[u8]) -> DataResult<()> {
        match self.backing {
            WriteBacking::Closed => Ok(()),
            WriteBacking::Memory(ref mut data) => {
                Self::ensure_capacity(data, data.len() + src.len());
                data.extend_from_slice(src);
                Ok(())
            }
            WriteBacking::File(ref mut file) => {
                file.write_all(src)?;
                Ok(())
            }
        }
    }

    pub fn write_u8(&mut self, value: u8) -> DataResult<()> {
        self.write_bytes(&[value])
    }

    pub fn write_u16(&mut self, value: u16) -> DataResult<()> {
        self.write_bytes(&value.to_le_bytes())
    }

    pub fn write_u32(&mut self, value: u32) -> DataResult<()> {
        self.write_bytes(&value.to_le_bytes())
    }

    pub fn write_u64(&mut self, value: u64) -> DataResult<()> {
        self.write_bytes(&value.to_le_bytes())
    }

    pub fn write_bool(&mut self, value: bool) -> DataResult<()> {
        self.write_u8(value as u8)
    }

    pub fn write_f32(&mut self, value: f32) -> DataResult<()> {
        self.write_u32(value.to_bits())
    }

    pub fn write_f64(&mut self, value: f64) -> DataResult<()> {
        self.write_u64(value.to_bits())
    }

    pub fn write_string(&mut self, value: &str) -> DataResult<()> {
        let bytes = value.as_bytes();
        self.write_u16(bytes.len() as u16)?;
        self.write_bytes(bytes)
    }

    pub fn flush(&mut self) -> DataResult<()> {
        if let WriteBacking::File(ref mut file) = self.backing {
            file.flush()?;
        }
        Ok(())
    }
}

impl Default for DataWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_round_trip() {
        let mut writer = DataWriter::open_memory(8);
        writer.write_u8(0xAB).unwrap();
        writer.write_u16(0x1234).unwrap();
        writer.write_u32(0xDEADBEEF).unwrap();
        writer.write_u64(0x0123_4567_89AB_CDEF).unwrap();
        writer.write_bool(true).unwrap();
        writer.write_f32(3.5).unwrap();
        writer.write_f64(-0.25).unwrap();
        writer.write_string("mower").unwrap();

        let data = writer.take_data();
        let mut reader = DataReader::from_memory(&data);
        assert_eq!(reader.read_u8().unwrap(), 0xAB);
        assert_eq!(reader.read_u16().unwrap(), 0x1234);
        assert_eq!(reader.read_u32().unwrap(), 0xDEADBEEF);
        assert_eq!(reader.read_u64().unwrap(), 0x0123_4567_89AB_CDEF);
        assert!(reader.read_bool().unwrap());
        assert_eq!(reader.read_f32().unwrap(), 3.5);
        assert_eq!(reader.read_f64().unwrap(), -0.25);
        assert_eq!(reader.read_string().unwrap(), "mower");
        assert!(matches!(reader.read_u8(), Err(DataError::OutOfData)));
    }

    #[test]
    fn test_little_endian_layout() {
        let mut writer = DataWriter::open_memory(4);
        writer.write_u32(0x0102_0304).unwrap();
        assert_eq!(writer.data(), &[0x04, 0x03, 0x02, 0x01]);
    }

    #[test]
    fn test_short_read_is_hard_failure() {
        let data = [1u8, 2, 3];
        let mut reader = DataReader::from_memory(&data);
        assert!(matches!(reader.read_u32(), Err(DataError::OutOfData)));
    }

    #[test]
    fn test_rewind_clamps_to_consumed() {
        let data = [1u8, 2, 3, 4, 5, 6];
        let mut reader = DataReader::from_memory(&data);
        assert_eq!(reader.read_u16().unwrap(), 0x0201);
        reader.rewind(100).unwrap();
        assert_eq!(reader.pos(), 0);
        assert_eq!(reader.read_u16().unwrap(), 0x0201);
        reader.rewind(1).unwrap();
        assert_eq!(reader.read_u8().unwrap(), 2);
    }

    #[test]
    fn test_writer_grows_from_tiny_reserve() {
        let mut writer = DataWriter::open_memory(1);
        let chunk = [0x5Au8; 1000];
        for _ in 0..64 {
            writer.write_bytes(&chunk).unwrap();
        }
        assert_eq!(writer.len(), 64 * 1000);
        assert!(writer.data().iter().all(|&b| b == 0x5A));
    }

    #[test]
    fn test_string_is_u16_length_prefixed() {
        let mut writer = DataWriter::open_memory(8);
        writer.write_string("ok").unwrap();
        assert_eq!(writer.data(), &[0x02, 0x00, b'o', b'k']);
    }

    #[test]
    fn test_open_memory_releases_previous_backing() {
        let first = [9u8; 4];
        let second = [7u8; 2];
        let mut reader = DataReader::from_memory(&first);
        assert_eq!(reader.read_u8().unwrap(), 9);
        reader.open_memory(&second);
        assert_eq!(reader.pos(), 0);
        assert_eq!(reader.read_u16().unwrap(), 0x0707);
    }

    #[test]
    fn test_file_round_trip() {
        let path = std::env::temp_dir().join("lawn_data_rw_test.bin");
        {
            let mut writer = DataWriter::open_file(&path).unwrap();
            writer.write_u32(0xFEED_DEAD).unwrap();
            writer.write_string("file backed").unwrap();
            writer.flush().unwrap();
        }
        {
            let mut reader = DataReader::<'static>::open_file(&path).unwrap();
            assert_eq!(reader.read_u32().unwrap(), 0xFEED_DEAD);
            assert_eq!(reader.read_string().unwrap(), "file backed");
            assert!(matches!(reader.read_u8(), Err(DataError::OutOfData)));
        }
        let _ = std::fs::remove_file(&path);
    }
}
