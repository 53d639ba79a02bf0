use crate::CancelToken;

/// Carrier of a request/reply payload across a synchronous round trip to a
/// decision service.
///
/// The payload is a single slot reused each tick: the agent writes request
/// fields before the round trip and, on success, the channel overwrites the
/// slot with the reply. The slot is lent to exactly one decision call at a
/// time.
pub trait Channel {
    /// The request/reply slot type.
    type Payload;

    /// Ready a fresh request slot for this tick. Called once per tick.
    fn prepare(&mut self);

    /// The current request/reply slot.
    fn payload(&self) -> &Self::Payload;

    fn payload_mut(&mut self) -> &mut Self::Payload;

    /// Blocking round trip. Returns `false` if the request became void
    /// (service shutdown, cancellation observed inside the channel, ...).
    /// May block arbitrarily long; racing the wait against `cancel` is the
    /// implementation's responsibility.
    fn send_and_wait(&mut self, cancel: Option<&CancelToken>) -> bool;

    /// Clear per-episode state so the channel can be reused for the next
    /// episode.
    fn reset(&mut self);
}

/// In-process channel whose replies are computed in place by a closure.
///
/// A stand-in for a real decision service, handy in tests and demos. The
/// closure reads the request fields, writes the reply fields into the same
/// slot, and returns `false` to refuse the request.
pub struct InlineChannel<P, F> {
    slot: P,
    service: F,
}

impl<P, F> InlineChannel<P, F>
where
    P: Default,
    F: FnMut(&mut P) -> bool,
{
    pub fn new(service: F) -> Self {
        Self {
            slot: P::default(),
            service,
        }
    }
}

impl<P, F> Channel for InlineChannel<P, F>
where
    P: Default,
    F: FnMut(&mut P) -> bool,
{
    type Payload = P;

    fn prepare(&mut self) {
        self.slot = P::default();
    }

    fn payload(&self) -> &P {
        &self.slot
    }

    fn payload_mut(&mut self) -> &mut P {
        &mut self.slot
    }

    fn send_and_wait(&mut self, _cancel: Option<&CancelToken>) -> bool {
        (self.service)(&mut self.slot)
    }

    fn reset(&mut self) {
        self.slot = P::default();
    }
}
