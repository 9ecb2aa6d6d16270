// files.rs — whole-file storage helpers consumed by the save codec

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::data_rw::DataResult;

/// Read an entire file into memory.
pub fn load_file<P: AsRef<Path>>(path: P) -> DataResult<Vec<u8>> {
    let path = path.as_ref();
    let data = fs::read(path)?;
    debug!(path = %path.display(), len = data.len(), "loaded file");
    Ok(data)
}

/// Write an entire buffer to a file, creating parent directories as
/// needed. Any I/O failure is surfaced; a failed save is never silent.
pub fn save_file<P: AsRef<Path>>(path: P, data: &[u8]) -> DataResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, data)?;
    debug!(path = %path.display(), len = data.len(), "wrote file");
    Ok(())
}

/// Delete a file if it exists.
pub fn erase_file<P: AsRef<Path>>(path: P) -> DataResult<()> {
    let path = path.as_ref();
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_load_erase() {
        let path = std::env::temp_dir().join("lawn_files_test/userdata/user1.dat");
        save_file(&path, b"profile bytes").unwrap();
        assert_eq!(load_file(&path).unwrap(), b"profile bytes");
        erase_file(&path).unwrap();
        assert!(load_file(&path).is_err());
        // Erasing a missing file is not an error.
        erase_file(&path).unwrap();
        let _ = fs::remove_dir_all(std::env::temp_dir().join("lawn_files_test"));
    }
}
