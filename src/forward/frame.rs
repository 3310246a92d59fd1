/// Representation of a network packet transiting between the TUN and the socket.
/// All packets of this kind are raw IP.
pub struct Frame {
    pub frame: [u8; u16::MAX as usize],
    pub size: usize,
}

impl Frame {
    pub fn new() -> Self {
        Self {
            frame: [0; u16::MAX as usize],
            size: 0,
        }
    }

    pub fn pkt_data_mut(&mut self) -> &mut [u8] {
        &mut self.frame[..self.size]
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::new()
    }
}
