use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::mutex::Mutex;
use ssp_link::{Addr, Iface, LinkError, LinkTx, Packet, PktBox, PktPool, RxSink};

use crate::target::I2cTarget;
use crate::{Config, I2cBus};

/// Controller write attempts per frame before giving up.
pub const WRITE_ATTEMPTS: u8 = 3;

/// Scoped ownership of the controller role.
///
/// Entering drops the target registration; the guard's drop re-registers
/// it. Putting the resume step in `Drop` means no exit path can skip it,
/// including error paths added later.
struct InitiatorRole<'a, B: I2cBus> {
    bus: &'a mut B,
    addr: Addr,
}

impl<'a, B: I2cBus> InitiatorRole<'a, B> {
    fn enter(bus: &'a mut B, addr: Addr) -> Self {
        if bus.unlisten().is_err() {
            warn!("target unregister failed");
        }
        Self { bus, addr }
    }
}

impl<B: I2cBus> Drop for InitiatorRole<'_, B> {
    fn drop(&mut self) {
        if self.bus.listen(self.addr).is_err() {
            // The interface is deaf until a later listen succeeds.
            error!("target re-register failed");
        }
    }
}

/// Transmit path of the I2C interface. Application context only.
///
/// The shared mutex is the bus lock: it serializes senders and keeps the
/// role switch atomic with respect to other application-context users.
/// Interrupt code never takes it.
pub struct I2cLink<'b, M: RawMutex, B: I2cBus> {
    bus: &'b Mutex<M, B>,
    addr: Addr,
}

impl<M: RawMutex, B: I2cBus> LinkTx for I2cLink<'_, M, B> {
    async fn send(&mut self, packet: &Packet) -> Result<usize, LinkError> {
        let mut bus = self.bus.lock().await;
        let role = InitiatorRole::enter(&mut *bus, self.addr);

        if !role.bus.is_ready() {
            warn!("bus not ready, skipping write");
            return Err(LinkError::Tx);
        }

        debug!("sending {} bytes to address {}", packet.len(), packet.txid);
        let mut attempt = 1u8;
        loop {
            match role.bus.write(packet.txid, packet.frame()).await {
                Ok(()) => break,
                Err(_) if attempt < WRITE_ATTEMPTS => {
                    debug!("write attempt {} failed, retrying", attempt);
                    attempt += 1;
                }
                Err(_) => {
                    warn!("write failed after {} attempts", WRITE_ATTEMPTS);
                    return Err(LinkError::Tx);
                }
            }
        }

        Ok(packet.len())
    }
}

/// Open the bus as an SSP interface.
///
/// Checks the hardware, applies `config`, registers target mode, and
/// returns the stack-facing [`Iface`] together with the interrupt-side
/// [`I2cTarget`] for the platform to feed events into. A failure here is
/// fatal for this interface only.
pub async fn open<'b, 'p, M, B, S, const POOL: usize>(
    bus: &'b Mutex<M, B>,
    pool: &'p PktPool<POOL>,
    sink: S,
    config: Config,
    name: &str,
) -> Result<(Iface<I2cLink<'b, M, B>>, I2cTarget<'p, S, POOL>), LinkError>
where
    M: RawMutex,
    B: I2cBus,
    S: RxSink<PktBox<'p, POOL>>,
{
    {
        let mut hw = bus.lock().await;
        if !hw.is_ready() {
            warn!("i2c device not ready");
            return Err(LinkError::Driver);
        }
        if hw.configure(&config).is_err() {
            warn!("i2c configure failed");
            return Err(LinkError::Driver);
        }
        if hw.listen(config.addr).is_err() {
            warn!("i2c target register failed");
            return Err(LinkError::Driver);
        }
    }

    info!("i2c interface up at address {}", config.addr.0);
    let link = I2cLink { bus, addr: config.addr };
    let target = I2cTarget::new(pool, sink);
    Ok((Iface::new(name, config.addr, link), target))
}
