use ssp_link::LinkError;

use crate::{Config, SerialEvent, SerialPort, SerialSink};

/// Where the receive side currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RxPhase {
    /// Hardware owns the scratch buffer and is accumulating bytes.
    Armed,
    /// A frame was delivered; waiting for the hardware to confirm the
    /// disable before the buffer is handed back.
    Draining,
    /// Re-arming failed. Reception stays off until a health check or a
    /// later event recovers it; see [`UartLink::rearm_rx`].
    Starved,
}

struct TxTrack {
    len: usize,
}

/// The serial engine: receive framing and transmit tracking.
///
/// Fed exclusively by [`on_event`](Self::on_event) from the platform's
/// event context, plus [`start_tx`](Self::start_tx) from application
/// context (via [`UartTx`](crate::UartTx)). No method blocks.
pub struct UartLink<P: SerialPort, S: SerialSink> {
    port: P,
    sink: S,
    rx_timeout_us: u32,
    rx: RxPhase,
    tx: Option<TxTrack>,
    frames_rx: u32,
}

impl<P: SerialPort, S: SerialSink> UartLink<P, S> {
    /// Feed one hardware event.
    pub fn on_event(&mut self, event: SerialEvent<'_>) {
        match event {
            SerialEvent::RxReady(bytes) => {
                // Stop the hardware before touching the bytes; re-arming
                // waits for RxDisabled so the buffer is never refilled
                // while the sink is reading it.
                if self.port.rx_disable().is_err() {
                    warn!("rx disable failed");
                }
                self.rx = RxPhase::Draining;
                self.frames_rx = self.frames_rx.wrapping_add(1);
                trace!("rx run of {} bytes", bytes.len());
                self.sink.on_bytes(bytes);
            }
            SerialEvent::RxDisabled => self.rearm_rx(),
            SerialEvent::RxStopped => {
                warn!("reception stopped by hardware");
            }
            // Single-buffer scheme: no spare buffer to offer or take back.
            SerialEvent::RxBufRequest | SerialEvent::RxBufReleased => {}
            SerialEvent::TxDone { sent } => match self.tx.take() {
                Some(track) if track.len != sent => {
                    warn!("short transmission, {} of {} bytes", sent, track.len);
                }
                Some(_) => trace!("tx complete, {} bytes", sent),
                None => warn!("tx-done with nothing in flight"),
            },
            SerialEvent::TxAborted { sent } => {
                self.tx = None;
                warn!("tx aborted after {} bytes", sent);
            }
        }
    }

    /// Hand the buffer back to the hardware for the next frame.
    pub fn rearm_rx(&mut self) {
        match self.port.rx_enable(self.rx_timeout_us) {
            Ok(()) => self.rx = RxPhase::Armed,
            Err(_) => {
                error!("rx re-arm failed, reception starved");
                self.rx = RxPhase::Starved;
            }
        }
    }

    /// Submit one transmission. Application context.
    ///
    /// Only one transmission is tracked at a time; submitting a second one
    /// before [`SerialEvent::TxDone`] arrives is a caller error that is
    /// logged, with the port left to accept or reject the overlap.
    pub fn start_tx(&mut self, bytes: &[u8]) -> Result<usize, LinkError> {
        if self.tx.is_some() {
            warn!("previous transmission still in flight");
        }
        if self.port.tx_start(bytes).is_err() {
            warn!("tx submit of {} bytes failed", bytes.len());
            return Err(LinkError::Tx);
        }
        self.tx = Some(TxTrack { len: bytes.len() });
        Ok(bytes.len())
    }

    pub fn rx_phase(&self) -> RxPhase {
        self.rx
    }

    /// True when a re-arm failed and reception is off. Something for a
    /// health monitor to poll.
    pub fn is_rx_starved(&self) -> bool {
        self.rx == RxPhase::Starved
    }

    pub fn tx_in_flight(&self) -> bool {
        self.tx.is_some()
    }

    /// Byte runs handed to the sink since startup.
    pub fn frames_received(&self) -> u32 {
        self.frames_rx
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    pub fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

/// Bring the serial device up and arm reception.
///
/// Fatal for this interface on a dead device, a rejected configuration,
/// or a failed initial arm; the node keeps running on its other
/// interfaces.
pub fn open<P: SerialPort, S: SerialSink>(
    mut port: P,
    sink: S,
    config: Config,
) -> Result<UartLink<P, S>, LinkError> {
    if !port.is_ready() {
        warn!("serial device not ready");
        return Err(LinkError::Driver);
    }
    if port.configure(&config).is_err() {
        warn!("serial configure failed");
        return Err(LinkError::Driver);
    }
    if port.rx_enable(config.rx_timeout_us).is_err() {
        warn!("initial rx arm failed");
        return Err(LinkError::Driver);
    }

    info!("uart interface up, {} baud", config.baudrate);
    Ok(UartLink {
        port,
        sink,
        rx_timeout_us: config.rx_timeout_us,
        rx: RxPhase::Armed,
        tx: None,
        frames_rx: 0,
    })
}
