/// Computes the Internet checksum (RFC 1071) of `data`.
///
/// Bytes are summed as big-endian 16-bit words; an odd trailing byte is treated
/// as the high byte of a word whose low byte is zero.
/// Any checksum field contained in `data` must already be set to 0.
pub fn internet_checksum(data: &[u8]) -> u16 {
    let mut checksum: u32 = 0;
    let mut words = data.chunks_exact(2);
    for word in &mut words {
        checksum += (u32::from(word[0]) << 8) + u32::from(word[1]);
        checksum = fold(checksum);
    }
    if let [last] = words.remainder() {
        checksum += u32::from(*last) << 8;
        checksum = fold(checksum);
    }
    !u16::try_from(checksum).unwrap_or_default()
}

/// Adds the carries above bit 15 back into the low 16 bits.
fn fold(mut sum: u32) -> u32 {
    while sum >> 16 != 0 {
        sum = (sum & 0xffff) + (sum >> 16);
    }
    sum
}
