#![no_std]
//! Shared vocabulary of the SSP link layer.
//!
//! This crate holds the types that cross the boundary between the transport
//! drivers and the protocol stack above them: [`Packet`] and its pool
//! aliases, the [`LinkError`] result codes, the [`RxSink`] receive hand-off,
//! and the [`Iface`] registration seam with its [`LinkTx`] transmit entry
//! point. The drivers themselves live in `ssp-i2c` and `ssp-uart`.

// This must go first, so that the others see its macros.
mod fmt;

mod error;
mod iface;
mod packet;
mod rx;

pub use error::LinkError;
pub use iface::{Counters, Iface, LinkTx, IFACE_NAME_MAX};
pub use packet::{Addr, Overrun, Packet, MTU};
pub use rx::RxSink;

/// Pool of packet buffers, safe to claim from interrupt context.
pub type PktPool<const N: usize> = pkt_pool::Pool<Packet, N>;

/// Exclusive owner of one pooled packet.
pub type PktBox<'a, const N: usize> = pkt_pool::PoolBox<'a, Packet, N>;
