use heapless::String;
use portable_atomic::{AtomicU32, Ordering};

use crate::error::LinkError;
use crate::packet::{Addr, Packet};

/// Longest interface name kept; longer names are truncated.
pub const IFACE_NAME_MAX: usize = 16;

/// Transmit entry point implemented by each transport driver.
///
/// Application context only. The caller keeps ownership of the packet;
/// drivers never release what they did not claim.
#[allow(async_fn_in_trait)]
pub trait LinkTx {
    /// Send one frame. Returns the number of frame bytes put on the wire.
    async fn send(&mut self, packet: &Packet) -> Result<usize, LinkError>;
}

/// Per-interface traffic counters.
#[derive(Debug, Default)]
pub struct Counters {
    tx: AtomicU32,
    tx_err: AtomicU32,
}

impl Counters {
    /// Packets handed to the driver and accepted.
    pub fn tx(&self) -> u32 {
        self.tx.load(Ordering::Relaxed)
    }

    /// Send attempts the driver reported as failed.
    pub fn tx_err(&self) -> u32 {
        self.tx_err.load(Ordering::Relaxed)
    }
}

/// A named, addressed endpoint backed by one transport driver.
///
/// This is the seam the routing stack holds on to. The name and address are
/// fixed at registration; the driver value is threaded through every send,
/// so one transport type can back any number of interface instances.
pub struct Iface<T: LinkTx> {
    name: String<IFACE_NAME_MAX>,
    addr: Addr,
    counters: Counters,
    driver: T,
}

impl<T: LinkTx> Iface<T> {
    /// Register `driver` as an interface bound to `addr`.
    pub fn new(name: &str, addr: Addr, driver: T) -> Self {
        let mut owned = String::new();
        for ch in name.chars() {
            if owned.push(ch).is_err() {
                warn!("interface name truncated to {} chars", IFACE_NAME_MAX);
                break;
            }
        }
        Self { name: owned, addr, counters: Counters::default(), driver }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn addr(&self) -> Addr {
        self.addr
    }

    pub fn counters(&self) -> &Counters {
        &self.counters
    }

    /// Send one packet out this interface, keeping the counters current.
    pub async fn send(&mut self, packet: &Packet) -> Result<usize, LinkError> {
        match self.driver.send(packet).await {
            Ok(sent) => {
                self.counters.tx.fetch_add(1, Ordering::Relaxed);
                Ok(sent)
            }
            Err(e) => {
                self.counters.tx_err.fetch_add(1, Ordering::Relaxed);
                warn!("send of {} bytes failed", packet.len());
                Err(e)
            }
        }
    }
}
