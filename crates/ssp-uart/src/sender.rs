use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex as BlockingMutex;
use embassy_sync::mutex::Mutex;
use ssp_link::{LinkError, LinkTx, Packet};

use crate::{SerialPort, SerialSink, UartLink};

/// The engine as shared between the event dispatcher and senders.
///
/// A critical-section mutex, so both the platform's event context and
/// application threads can take it for the few cycles a state transition
/// needs:
///
/// ```text
/// UART.lock(|link| link.borrow_mut().on_event(event));
/// ```
pub type SharedUart<P, S> =
    BlockingMutex<CriticalSectionRawMutex, RefCell<UartLink<P, S>>>;

/// Serializes application-context senders. Never touched in event context.
pub type TxGate = Mutex<CriticalSectionRawMutex, ()>;

/// Transmit entry point for the UART interface.
///
/// Holds the sender gate across the submission so only one producer
/// drives the transmit path at a time, then submits through the shared
/// engine without blocking.
pub struct UartTx<'a, P: SerialPort, S: SerialSink> {
    link: &'a SharedUart<P, S>,
    gate: &'a TxGate,
}

impl<'a, P: SerialPort, S: SerialSink> UartTx<'a, P, S> {
    pub fn new(link: &'a SharedUart<P, S>, gate: &'a TxGate) -> Self {
        Self { link, gate }
    }
}

impl<P: SerialPort, S: SerialSink> LinkTx for UartTx<'_, P, S> {
    async fn send(&mut self, packet: &Packet) -> Result<usize, LinkError> {
        let _permit = self.gate.lock().await;
        self.link.lock(|link| link.borrow_mut().start_tx(packet.frame()))
    }
}
