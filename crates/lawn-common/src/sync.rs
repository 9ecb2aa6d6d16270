// sync.rs — bidirectional sync context: one call sequence for both
// serialize and deserialize, dispatching on the cursor direction

use crate::data_rw::{DataReader, DataResult, DataWriter};

enum Backing<'a, 'b> {
    Reader(&'a mut DataReader<'b>),
    Writer(&'a mut DataWriter),
}

/// Wraps exactly one cursor plus a record version stamp. Composite
/// records write their encode/decode logic once against this type; on
/// read each value parameter is an out-parameter, on write it is the
/// source. The version is set by the first field synced in a record and
/// consulted by later fields to branch layout (player-profile records).
pub struct DataSync<'a, 'b> {
    backing: Backing<'a, 'b>,
    version: i32,
}

impl<'a, 'b> DataSync<'a, 'b> {
    pub fn from_reader(reader: &'a mut DataReader<'b>) -> Self {
        DataSync { backing: Backing::Reader(reader), version: 0 }
    }

    pub fn from_writer(writer: &'a mut DataWriter) -> Self {
        DataSync { backing: Backing::Writer(writer), version: 0 }
    }

    pub fn is_reading(&self) -> bool {
        matches!(self.backing, Backing::Reader(_))
    }

    pub fn set_version(&mut self, version: i32) {
        self.version = version;
    }

    pub fn version(&self) -> i32 {
        self.version
    }

    pub fn sync_bytes(&mut self, data: &mut [u8]) -> DataResult<()> {
        match self.backing {
            Backing::Reader(ref mut r) => r.read_bytes(data),
            Backing::Writer(ref mut w) => w.write_bytes(data),
        }
    }

    pub fn sync_u8(&mut self, value: &mut u8) -> DataResult<()> {
        match self.backing {
            Backing::Reader(ref mut r) => {
                *value = r.read_u8()?;
                Ok(())
            }
            Backing::Writer(ref mut w) => w.write_u8(*value),
        }
    }

    pub fn sync_u16(&mut self, value: &mut u16) -> DataResult<()> {
        match self.backing {
            Backing::Reader(ref mut r) => {
                *value = r.read_u16()?;
                Ok(())
            }
            Backing::Writer(ref mut w) => w.write_u16(*value),
        }
    }

    pub fn sync_u32(&mut self, value: &mut u32) -> DataResult<()> {
        match self.backing {
            Backing::Reader(ref mut r) => {
                *value = r.read_u32()?;
                Ok(())
            }
            Backing::Writer(ref mut w) => w.write_u32(*value),
        }
    }

    pub fn sync_u64(&mut self, value: &mut u64) -> DataResult<()> {
        match self.backing {
            Backing::Reader(ref mut r) => {
                *value = r.read_u64()?;
                Ok(())
            }
            Backing::Writer(ref mut w) => w.write_u64(*value),
        }
    }

    pub fn sync_i32(&mut self, value: &mut i32) -> DataResult<()> {
        let mut raw = *value as u32;
        self.sync_u32(&mut raw)?;
        *value = raw as i32;
        Ok(())
    }

    pub fn sync_i64(&mut self, value: &mut i64) -> DataResult<()> {
        let mut raw = *value as u64;
        self.sync_u64(&mut raw)?;
        *value = raw as i64;
        Ok(())
    }

    pub fn sync_bool(&mut self, value: &mut bool) -> DataResult<()> {
        match self.backing {
            Backing::Reader(ref mut r) => {
                *value = r.read_bool()?;
                Ok(())
            }
            Backing::Writer(ref mut w) => w.write_bool(*value),
        }
    }

    pub fn sync_f32(&mut self, value: &mut f32) -> DataResult<()> {
        match self.backing {
            Backing::Reader(ref mut r) => {
                *value = r.read_f32()?;
                Ok(())
            }
            Backing::Writer(ref mut w) => w.write_f32(*value),
        }
    }

    pub fn sync_f64(&mut self, value: &mut f64) -> DataResult<()> {
        match self.backing {
            Backing::Reader(ref mut r) => {
                *value = r.read_f64()?;
                Ok(())
            }
            Backing::Writer(ref mut w) => w.write_f64(*value),
        }
    }

    pub fn sync_string(&mut self, value: &mut String) -> DataResult<()> {
        match self.backing {
            Backing::Reader(ref mut r) => {
                *value = r.read_string()?;
                Ok(())
            }
            Backing::Writer(ref mut w) => w.write_string(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_rw::DataError;

    #[derive(Default, PartialEq, Debug)]
    struct Record {
        id: u32,
        score: i32,
        ratio: f32,
        name: String,
        active: bool,
    }

    // One body for both directions, the point of the sync context.
    fn sync_record(sync: &mut DataSync, rec: &mut Record) -> crate::data_rw::DataResult<()> {
        sync.sync_u32(&mut rec.id)?;
        sync.sync_i32(&mut rec.score)?;
        sync.sync_f32(&mut rec.ratio)?;
        sync.sync_string(&mut rec.name)?;
        sync.sync_bool(&mut rec.active)?;
        Ok(())
    }

    #[test]
    fn test_same_call_sequence_round_trips() {
        let mut rec = Record {
            id: 42,
            score: -7,
            ratio: 0.5,
            name: "daisy".to_string(),
            active: true,
        };

        let mut writer = DataWriter::open_memory(32);
        {
            let mut sync = DataSync::from_writer(&mut writer);
            assert!(!sync.is_reading());
            sync_record(&mut sync, &mut rec).unwrap();
        }

        let data = writer.take_data();
        let mut reader = DataReader::from_memory(&data);
        let mut loaded = Record::default();
        {
            let mut sync = DataSync::from_reader(&mut reader);
            assert!(sync.is_reading());
            sync_record(&mut sync, &mut loaded).unwrap();
        }
        assert_eq!(loaded, rec);
    }

    #[test]
    fn test_read_failure_propagates() {
        let data = [0u8; 2];
        let mut reader = DataReader::from_memory(&data);
        let mut sync = DataSync::from_reader(&mut reader);
        let mut value = 0u32;
        assert!(matches!(sync.sync_u32(&mut value), Err(DataError::OutOfData)));
    }

    #[test]
    fn test_version_stamp() {
        let mut writer = DataWriter::open_memory(8);
        let mut sync = DataSync::from_writer(&mut writer);
        assert_eq!(sync.version(), 0);
        sync.set_version(12);
        assert_eq!(sync.version(), 12);
    }
}
