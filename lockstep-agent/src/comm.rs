use crate::{channel::Channel, AgentError, CancelToken, Outcome, Policy, Tick};
use log::{debug, trace};

/// Serialization pairing between one game's snapshot/action types and one
/// channel's payload type. Implemented once per concrete agent/game
/// combination.
pub trait Codec {
    type State;
    type Action;
    type Payload;

    /// Telemetry/timing pre-hook, run before the protocol for an active
    /// tick (including the flush at episode end).
    fn before_decide(&mut self, _tick: Tick, _cancel: Option<&CancelToken>) {}

    /// Invoked once when a channel is bound to the owning policy.
    fn on_channel_bound(&mut self) {}

    /// Serialize the snapshot into the request slot.
    fn extract(&mut self, state: &Self::State, request: &mut Self::Payload);

    /// Write a decision decoded from the reply slot into the output slot.
    fn decode(&mut self, reply: &Self::Payload, action: &mut Self::Action);
}

/// Channel-backed decision policy.
///
/// Each active tick runs the synchronous protocol: serialize the snapshot
/// into the channel's request slot, block on the round trip, decode the
/// reply into the output action. A failed round trip voids only that tick;
/// the surrounding session keeps going.
pub struct CommPolicy<C, E> {
    channel: Option<C>,
    codec: E,
}

impl<C, E> CommPolicy<C, E>
where
    C: Channel,
    E: Codec<Payload = C::Payload>,
{
    /// Create a policy with no channel bound yet. Deciding before
    /// [`bind_channel`](Self::bind_channel) fails with
    /// [`AgentError::ChannelUnbound`].
    pub fn new(codec: E) -> Self {
        Self {
            channel: None,
            codec,
        }
    }

    /// One-time binding of the channel collaborator.
    pub fn bind_channel(&mut self, channel: C) {
        self.channel = Some(channel);
        self.codec.on_channel_bound();
    }

    pub fn channel(&self) -> Result<&C, AgentError> {
        self.channel.as_ref().ok_or(AgentError::ChannelUnbound)
    }

    /// The bound channel's current request/reply slot.
    pub fn payload(&self) -> Result<&C::Payload, AgentError> {
        self.channel().map(Channel::payload)
    }

    pub fn codec(&self) -> &E {
        &self.codec
    }
}

impl<C, E> Policy for CommPolicy<C, E>
where
    C: Channel,
    E: Codec<Payload = C::Payload>,
{
    type State = E::State;
    type Action = E::Action;

    fn decide(
        &mut self,
        tick: Tick,
        state: &Self::State,
        action: Option<&mut Self::Action>,
        cancel: Option<&CancelToken>,
    ) -> Result<Outcome, AgentError> {
        let channel = self.channel.as_mut().ok_or(AgentError::ChannelUnbound)?;

        self.codec.before_decide(tick, cancel);

        channel.prepare();
        self.codec.extract(state, channel.payload_mut());

        if !channel.send_and_wait(cancel) {
            // The output slot is left untouched; the session treats this as
            // "no action this tick".
            debug!("round trip voided at tick {}", tick);
            return Ok(Outcome::Failed);
        }

        // A `None` slot is the flush path: the state went out, no reply
        // decoding is wanted.
        if let Some(action) = action {
            self.codec.decode(channel.payload(), action);
        }

        Ok(Outcome::Acted)
    }

    fn end_episode(&mut self, tick: Tick, state: &Self::State) -> Result<bool, AgentError> {
        if self.channel.is_none() {
            return Ok(false);
        }

        // Send the final snapshot before the channel forgets the episode;
        // no action is requested and a refused flush is not an error.
        trace!("flushing final state at tick {}", tick);
        let _ = self.decide(tick, state, None, None);

        if let Some(channel) = self.channel.as_mut() {
            channel.reset();
        }

        Ok(true)
    }
}
