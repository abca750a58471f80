use heapless::Vec;

/// Largest frame one packet can carry.
pub const MTU: usize = 256;

/// Node address. The low 7 bits double as the device address on the I2C
/// transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Addr(pub u8);

/// A frame grew past [`MTU`]; the bytes were not written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Overrun;

/// One link-layer frame plus its routing metadata.
///
/// Packets are pool-allocated (see [`PktPool`](crate::PktPool)); the frame
/// length is the number of bytes accumulated so far, never a separate field
/// that could disagree with the contents.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Packet {
    /// Destination node.
    pub dst: Addr,
    /// Source node.
    pub src: Addr,
    /// Bus address the frame is written to on transmit; also correlates a
    /// reply with the transaction that solicited it.
    pub txid: u8,
    frame: Vec<u8, MTU>,
}

impl Packet {
    /// Outbound packet headed for `dst`.
    pub fn to(dst: Addr) -> Self {
        Self { dst, src: Addr(0), txid: dst.0, frame: Vec::new() }
    }

    /// Blank inbound packet. Addressing is filled in by the stack once it
    /// has parsed the frame header.
    pub fn blank() -> Self {
        Self { dst: Addr(0), src: Addr(0), txid: 0, frame: Vec::new() }
    }

    /// Append one byte, failing instead of writing past capacity.
    pub fn push(&mut self, byte: u8) -> Result<(), Overrun> {
        self.frame.push(byte).map_err(|_| Overrun)
    }

    /// Replace the frame contents.
    pub fn set_frame(&mut self, bytes: &[u8]) -> Result<(), Overrun> {
        self.frame.clear();
        self.frame.extend_from_slice(bytes).map_err(|_| Overrun)
    }

    /// The frame bytes accumulated so far.
    pub fn frame(&self) -> &[u8] {
        &self.frame
    }

    /// Frame length in bytes.
    pub fn len(&self) -> usize {
        self.frame.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frame.is_empty()
    }

    /// Discard the frame contents, keeping the addressing.
    pub fn clear(&mut self) {
        self.frame.clear();
    }
}
