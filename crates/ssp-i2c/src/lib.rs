#![no_std]
//! I2C target-mode link driver.
//!
//! The node sits on a shared multi-master bus as a *target*: controllers
//! write whole frames at it, one transaction per frame. Because the bus
//! hardware cannot be target and controller at the same time, transmitting
//! is modeled as "pause listening, speak as controller, resume listening";
//! the resume step is taken on every exit path so a failed send can never
//! leave the interface deaf.
//!
//! The driver is split along the execution-context boundary:
//!
//! - [`I2cTarget`] is the receive state machine. The platform's interrupt
//!   handler feeds it [`TargetEvent`]s; it never blocks and hands finished
//!   frames to an [`RxSink`](ssp_link::RxSink).
//! - [`I2cLink`] is the transmit path, application context only. It owns
//!   the role switch and implements [`LinkTx`](ssp_link::LinkTx).
//!
//! [`open`] wires both halves to a bus and registers the interface.

// This must go first, so that the others see its macros.
mod fmt;

mod link;
mod target;

pub use link::{open, I2cLink, WRITE_ATTEMPTS};
pub use target::{I2cTarget, TargetError};

use ssp_link::Addr;

/// Interface name used when the caller does not care.
pub const DEFAULT_IFNAME: &str = "I2C";

/// I2C link configuration, applied once at [`open`] time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Address this node answers to in target mode.
    pub addr: Addr,
    /// Bus bitrate.
    pub bitrate_hz: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self { addr: Addr(0), bitrate_hz: 100_000 }
    }
}

/// Bus operations the platform supplies.
///
/// `listen`/`unlisten` toggle target-mode registration. Both are global,
/// blocking operations and must only be called from application context;
/// the driver honors that by touching them solely on the transmit path.
#[allow(async_fn_in_trait)]
pub trait I2cBus {
    type Error: core::fmt::Debug;

    /// True when the controller hardware is powered and usable.
    fn is_ready(&self) -> bool;

    /// Apply the bus parameters.
    fn configure(&mut self, config: &Config) -> Result<(), Self::Error>;

    /// Register this node as a bus target at `addr` and start answering.
    fn listen(&mut self, addr: Addr) -> Result<(), Self::Error>;

    /// Drop the target registration; the node stops answering.
    fn unlisten(&mut self) -> Result<(), Self::Error>;

    /// One controller-role write transaction to `addr`, stop included.
    async fn write(&mut self, addr: u8, bytes: &[u8]) -> Result<(), Self::Error>;
}

/// Target-mode bus events, delivered from interrupt context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TargetEvent {
    /// A controller addressed us for a write; a frame is about to start.
    WriteRequested,
    /// One data byte arrived.
    ByteReceived(u8),
    /// A controller addressed us for a read. Not supported: this transport
    /// is receive-only in target mode, replies go out via the role switch.
    ReadRequested,
    /// The transaction ended; the frame is complete.
    Stop,
}
