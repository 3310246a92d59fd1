//! Bounds-checked views over the fixed-size parts of an IPv4/ICMP packet.
//!
//! Every view is built from a slice through a checked slice-to-array conversion,
//! so field accessors can never read past the end of the packet.

/// Size of an IPv4 header without options.
pub const IPV4_HEADER_LEN: usize = 20;
/// Size of an ICMP echo header (type, code, checksum, identifier, sequence).
pub const ICMP_HEADER_LEN: usize = 8;
/// IP protocol number of ICMP.
pub const IPPROTO_ICMP: u8 = 1;
/// ICMP type of an Echo Reply.
pub const ICMP_ECHO_REPLY: u8 = 0;
/// ICMP type of an Echo Request.
pub const ICMP_ECHO_REQUEST: u8 = 8;

/// Read-only view of the first 20 bytes of an IPv4 packet.
#[derive(Debug, Clone, Copy)]
pub struct Ipv4HeaderView<'a> {
    bytes: &'a [u8; IPV4_HEADER_LEN],
}

impl<'a> Ipv4HeaderView<'a> {
    /// Returns `None` if `packet` is shorter than a minimal IPv4 header.
    pub fn new(packet: &'a [u8]) -> Option<Self> {
        let bytes = packet.get(..IPV4_HEADER_LEN)?.try_into().ok()?;
        Some(Self { bytes })
    }

    pub fn version(&self) -> u8 {
        self.bytes[0] >> 4
    }

    /// Header length in bytes, as declared by the IHL field.
    pub fn header_len(&self) -> usize {
        usize::from(self.bytes[0] & 0x0f) * 4
    }

    pub fn protocol(&self) -> u8 {
        self.bytes[9]
    }
}

/// Read-only view of an ICMP echo header.
#[derive(Debug, Clone, Copy)]
pub struct IcmpHeaderView<'a> {
    bytes: &'a [u8; ICMP_HEADER_LEN],
}

impl<'a> IcmpHeaderView<'a> {
    /// Returns `None` if `segment` is shorter than an ICMP header.
    pub fn new(segment: &'a [u8]) -> Option<Self> {
        let bytes = segment.get(..ICMP_HEADER_LEN)?.try_into().ok()?;
        Some(Self { bytes })
    }

    pub fn icmp_type(&self) -> u8 {
        self.bytes[0]
    }

    pub fn code(&self) -> u8 {
        self.bytes[1]
    }

    pub fn checksum(&self) -> u16 {
        u16::from_be_bytes([self.bytes[2], self.bytes[3]])
    }

    pub fn identifier(&self) -> u16 {
        u16::from_be_bytes([self.bytes[4], self.bytes[5]])
    }

    pub fn sequence(&self) -> u16 {
        u16::from_be_bytes([self.bytes[6], self.bytes[7]])
    }
}

/// Mutable view of an ICMP header; only the checksum field can be written.
#[derive(Debug)]
pub struct IcmpHeaderMut<'a> {
    bytes: &'a mut [u8; ICMP_HEADER_LEN],
}

impl<'a> IcmpHeaderMut<'a> {
    pub fn new(segment: &'a mut [u8]) -> Option<Self> {
        let bytes = segment.get_mut(..ICMP_HEADER_LEN)?.try_into().ok()?;
        Some(Self { bytes })
    }

    /// Writes `checksum` in network byte order.
    pub fn set_checksum(&mut self, checksum: u16) {
        self.bytes[2..4].copy_from_slice(&checksum.to_be_bytes());
    }
}
