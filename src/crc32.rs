//! CRC-32 checksum used by the controller's auxiliary feature reports.
//!
//! The controller computes report checksums over a fixed transport prefix
//! byte followed by the payload, using the standard CRC-32/ISO-HDLC
//! parameters. The prefix is baked in here so callers can hash report
//! payloads directly and compare against the device-computed trailer.

use crc::{Crc, CRC_32_ISO_HDLC};

/// Prefix byte the device mixes into every report checksum.
const CHECKSUM_PREFIX: u8 = 0xA2;

const CRC32: Crc<u32> = Crc::<u32>::new(&CRC_32_ISO_HDLC);

/// Calculate the report checksum of a byte slice.
#[inline]
#[must_use]
pub fn crc32(data: &[u8]) -> u32 {
    let mut digest = CRC32.digest();
    digest.update(&[CHECKSUM_PREFIX]);
    digest.update(data);
    digest.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_byte_vectors() {
        assert_eq!(crc32(&[1]), 2867854338);
        assert_eq!(crc32(&[2]), 870755768);
        assert_eq!(crc32(&[231]), 3817257807);
    }

    #[test]
    fn multi_byte_vectors() {
        let data = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 1];
        assert_eq!(crc32(&data), 112948030);

        let data = [
            15, 25, 35, 45, 55, 65, 75, 85, 95, 105, 115, 125, 135, 14, 15, 1,
        ];
        assert_eq!(crc32(&data), 3454721196);

        let data = [
            15, 25, 35, 45, 55, 65, 75, 85, 95, 105, 115, 125, 135, 14, 15, 1, 15, 25, 35, 45, 55,
            65, 75, 85, 95, 105, 115, 125, 135, 14, 15, 1,
        ];
        assert_eq!(crc32(&data), 1190435119);

        let data = [
            15, 25, 35, 45, 55, 65, 75, 85, 95, 105, 115, 125, 135, 14, 15, 1, 15, 25, 35, 45, 55,
            65, 75, 85, 95, 105, 115, 125, 135, 14, 15, 1, 15, 25, 35, 45, 55, 65, 75, 85, 95,
            105, 115, 125, 135,
        ];
        assert_eq!(crc32(&data), 621908005);
    }

    #[test]
    fn deterministic() {
        let data = [15, 25, 35, 45, 55, 65, 75, 85, 95, 105, 115, 125, 135];
        assert_eq!(crc32(&data), crc32(&data));
        assert_eq!(crc32(&data), 2606873011);
    }
}
