// crc.rs — CRC-32 (ISO-HDLC, the zlib polynomial) used for save payload
// checksums and the legacy build-date stamp

use crc::{Crc, CRC_32_ISO_HDLC};

const CRC_CALC: Crc<u32> = Crc::<u32>::new(&CRC_32_ISO_HDLC);

/// Compute the CRC-32 of an entire block of data.
pub fn crc_block(data: &[u8]) -> u32 {
    CRC_CALC.checksum(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crc_empty() {
        assert_eq!(crc_block(&[]), 0);
    }

    #[test]
    fn test_crc_consistency() {
        let data = b"Hello, World!";
        let crc1 = crc_block(data);
        let crc2 = crc_block(data);
        assert_eq!(crc1, crc2);
        assert_ne!(crc1, 0);
    }

    #[test]
    fn test_crc_check_value() {
        // The standard check value for CRC-32/ISO-HDLC is 0xCBF43926
        // when computed over "123456789".
        assert_eq!(crc_block(b"123456789"), 0xCBF43926);
    }

    #[test]
    fn test_crc_detects_single_bit_flip() {
        let mut data = b"save payload".to_vec();
        let before = crc_block(&data);
        data[4] ^= 0x01;
        assert_ne!(crc_block(&data), before);
    }
}
