use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::Sender;

/// Receive hand-off from a driver into the protocol stack.
///
/// Called from interrupt or event context, so implementations must not
/// block: no locks, no fallible-blocking allocation. `in_isr` is true when
/// delivery happens from interrupt context, for callers that defer work
/// depending on where they run.
pub trait RxSink<P> {
    fn deliver(&self, packet: P, in_isr: bool);
}

/// Any channel sender is a valid sink: `try_send` never blocks, and a full
/// queue sheds the frame rather than stalling the interrupt path.
impl<M: RawMutex, P, const CAP: usize> RxSink<P> for Sender<'_, M, P, CAP> {
    fn deliver(&self, packet: P, _in_isr: bool) {
        if self.try_send(packet).is_err() {
            warn!("rx queue full, dropping frame");
        }
    }
}
