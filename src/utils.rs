pub(crate) fn read_u32_be(data: &[u8], offset: usize) -> u32 {
    u32::from_be_bytes([data[offset], data[offset + 1], data[offset + 2], data[offset + 3]])
}

// Returns a new buffer with `insert` placed at `at`, everything else verbatim.
pub(crate) fn splice(data: &[u8], at: usize, insert: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len() + insert.len());
    out.extend_from_slice(&data[..at]);
    out.extend_from_slice(insert);
    out.extend_from_slice(&data[at..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn big_endian_read() {
        assert_eq!(read_u32_be(&[0x00, 0x00, 0x03, 0x20], 0), 800);
        assert_eq!(read_u32_be(&[0xFF, 0x80, 0x00, 0x00, 0x01], 1), 0x8000_0001);
    }

    #[test]
    fn splice_in_the_middle() {
        assert_eq!(splice(&[1, 2, 5, 6], 2, &[3, 4]), &[1, 2, 3, 4, 5, 6]);
        assert_eq!(splice(&[1, 2], 2, &[3]), &[1, 2, 3]);
        assert_eq!(splice(&[1, 2], 0, &[0]), &[0, 1, 2]);
    }
}
