#![no_std]
//! Event-driven UART link driver.
//!
//! The serial stream has no length prefix; frames are delimited by an
//! inactivity timeout. The platform arms reception with a scratch buffer
//! and the timeout, and raises a [`SerialEvent`] whenever the hardware has
//! something to say. [`UartLink`] turns that into discrete byte runs for
//! the framing layer above and keeps reception armed without any manual
//! intervention: every disable has a matching re-enable.
//!
//! Everything in [`UartLink::on_event`] runs in the platform's event
//! context and never blocks. Senders live in application context behind
//! [`UartTx`], which gates them through an async mutex and reaches the
//! engine through a critical-section mutex (see [`SharedUart`]).

// This must go first, so that the others see its macros.
mod fmt;

mod driver;
mod sender;

pub use driver::{open, RxPhase, UartLink};
pub use sender::{SharedUart, TxGate, UartTx};

/// Interface name used when the caller does not care.
pub const DEFAULT_IFNAME: &str = "UART";

/// Size of the receive scratch buffer the platform glue must provide.
pub const RX_BUFFER_SIZE: usize = 200;

/// UART link configuration, applied once at [`open`] time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    pub baudrate: u32,
    /// Inactivity window that delimits a frame, in microseconds.
    pub rx_timeout_us: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self { baudrate: 115_200, rx_timeout_us: 10_000 }
    }
}

/// Serial device operations the platform supplies.
///
/// Reception runs out of a single scratch buffer owned by the platform
/// glue. While reception is enabled the hardware owns that buffer; after
/// [`rx_disable`](Self::rx_disable) completes (signaled by
/// [`SerialEvent::RxDisabled`]) it belongs to the driver side and may be
/// read, and only re-arming hands it back. The driver encodes that
/// handshake; implementations just have to not refill the buffer while
/// reception is disabled.
pub trait SerialPort {
    type Error: core::fmt::Debug;

    /// True when the device is powered and usable.
    fn is_ready(&self) -> bool;

    /// Apply the line parameters.
    fn configure(&mut self, config: &Config) -> Result<(), Self::Error>;

    /// Arm reception. Bytes accumulate in the scratch buffer until
    /// `timeout_us` passes with no traffic or the buffer fills, then an
    /// [`SerialEvent::RxReady`] fires.
    fn rx_enable(&mut self, timeout_us: u32) -> Result<(), Self::Error>;

    /// Stop reception. Completion is signaled by
    /// [`SerialEvent::RxDisabled`], not by this call returning.
    fn rx_disable(&mut self) -> Result<(), Self::Error>;

    /// Submit one bounded transmission. The port queues the bytes in full;
    /// completion arrives later as [`SerialEvent::TxDone`] or
    /// [`SerialEvent::TxAborted`]. There is no submission timeout.
    fn tx_start(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;
}

/// Receives timeout-delimited byte runs from the link.
///
/// Implemented by the framing layer above. Runs in event context; must
/// copy what it needs and return without blocking.
pub trait SerialSink {
    fn on_bytes(&mut self, bytes: &[u8]);
}

/// Hardware events, delivered from the platform's event context.
///
/// The set mirrors what async serial hardware reports; the variants that
/// are no-ops under the single-buffer scheme are still matched so a new
/// event cannot be silently ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SerialEvent<'a> {
    /// Transmission finished; all submitted bytes are on the wire.
    TxDone { sent: usize },
    /// Transmission gave up early, `sent` bytes made it out.
    TxAborted { sent: usize },
    /// The inactivity timeout elapsed or the scratch buffer filled; the
    /// slice is the run of bytes accumulated since reception was armed.
    RxReady(&'a [u8]),
    /// Hardware asks for a fresh scratch buffer (double-buffer schemes).
    RxBufRequest,
    /// Hardware is done with a previously supplied scratch buffer.
    RxBufReleased,
    /// Reception is fully stopped; the scratch buffer may be re-armed.
    RxDisabled,
    /// Reception stopped because of a line error.
    RxStopped,
}
