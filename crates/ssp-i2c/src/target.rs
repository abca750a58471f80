use ssp_link::{Packet, PktBox, PktPool, RxSink};

use crate::TargetEvent;

/// Why an event was rejected. The platform's interrupt handler translates
/// this into a negative return to the bus layer, which NACKs the
/// controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TargetError {
    /// No packet buffer available; the transaction was rejected whole.
    NoBufs,
    /// A data byte arrived outside an open transaction window.
    NotReceiving,
    /// The frame outgrew the packet buffer and was discarded.
    Overrun,
    /// Target-mode reads are not supported.
    ReadUnsupported,
}

enum RxState<'p, const POOL: usize> {
    Idle,
    Receiving(PktBox<'p, POOL>),
}

/// Target-mode receive state machine.
///
/// Owned by the interrupt path: every transition happens inside
/// [`on_event`](Self::on_event), and the in-progress packet is owned here
/// exclusively until the frame boundary, where it moves into the sink.
/// Nothing in application context can observe a half-assembled frame.
pub struct I2cTarget<'p, S, const POOL: usize> {
    pool: &'p PktPool<POOL>,
    sink: S,
    state: RxState<'p, POOL>,
    frames_rx: u32,
}

impl<'p, S, const POOL: usize> I2cTarget<'p, S, POOL>
where
    S: RxSink<PktBox<'p, POOL>>,
{
    /// Build the receive half directly. Normally [`open`](crate::open) does
    /// this as part of bringing the interface up.
    pub fn new(pool: &'p PktPool<POOL>, sink: S) -> Self {
        Self { pool, sink, state: RxState::Idle, frames_rx: 0 }
    }

    /// Feed one hardware event. Interrupt context; never blocks.
    pub fn on_event(&mut self, event: TargetEvent) -> Result<(), TargetError> {
        match event {
            TargetEvent::WriteRequested => {
                if matches!(self.state, RxState::Receiving(_)) {
                    // A new transaction opened over an unfinished one. The
                    // partial frame goes back to the pool, not to the stack.
                    warn!("write-requested while receiving, dropping partial frame");
                    self.state = RxState::Idle;
                }
                match self.pool.claim(Packet::blank()) {
                    Ok(packet) => {
                        trace!("frame started, {} buffers left", self.pool.free_count());
                        self.state = RxState::Receiving(packet);
                        Ok(())
                    }
                    Err(_) => {
                        warn!("buffer pool exhausted, rejecting transfer");
                        Err(TargetError::NoBufs)
                    }
                }
            }
            TargetEvent::ByteReceived(byte) => match &mut self.state {
                RxState::Receiving(packet) => {
                    if packet.push(byte).is_err() {
                        warn!("frame overruns buffer, dropping");
                        self.state = RxState::Idle;
                        Err(TargetError::Overrun)
                    } else {
                        Ok(())
                    }
                }
                RxState::Idle => Err(TargetError::NotReceiving),
            },
            TargetEvent::ReadRequested => Err(TargetError::ReadUnsupported),
            TargetEvent::Stop => {
                match core::mem::replace(&mut self.state, RxState::Idle) {
                    RxState::Receiving(packet) => {
                        debug!("frame complete, {} bytes", packet.len());
                        self.frames_rx = self.frames_rx.wrapping_add(1);
                        self.sink.deliver(packet, true);
                    }
                    // A stop with no open reception is legitimate after a
                    // rejected write-requested.
                    RxState::Idle => {}
                }
                Ok(())
            }
        }
    }

    /// True while a frame is being assembled.
    pub fn is_receiving(&self) -> bool {
        matches!(self.state, RxState::Receiving(_))
    }

    /// Frames handed to the sink since startup.
    pub fn frames_received(&self) -> u32 {
        self.frames_rx
    }
}
