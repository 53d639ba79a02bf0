pub mod cancel;
pub mod channel;
pub mod comm;
pub mod error;
pub mod policies;

pub use cancel::CancelToken;
pub use channel::{Channel, InlineChannel};
pub use comm::{Codec, CommPolicy};
pub use error::AgentError;

use std::num::NonZeroU64;

/// Discrete simulation time step counter.
pub type Tick = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Result of a single decision attempt.
pub enum Outcome {
    /// An action was produced, or a flush went through.
    Acted,
    /// The cadence gate was not satisfied for this tick; nothing ran.
    Skipped,
    /// The decision ran but produced no action, e.g. the round trip to the
    /// decision service failed. Not a fatal condition.
    Failed,
}

impl Outcome {
    /// Whether an action is available for this tick. This is the view the
    /// driving loop consumes; it does not distinguish a schedule skip from
    /// a failed attempt.
    pub fn acted(self) -> bool {
        matches!(self, Outcome::Acted)
    }
}

/// Decision logic plugged into an [`Agent`].
///
/// One implementation per agent variant (rule-based, replay-driven,
/// channel-backed), so the scheduling shell is shared while the decision
/// logic varies freely.
pub trait Policy {
    /// Read-only game-state snapshot type, borrowed for one tick.
    type State;
    /// Action type written into the caller-owned output slot.
    type Action;

    /// Called after the driving loop assigns an identity to the agent.
    fn on_id_assigned(&mut self, _id: u32) {}

    /// Produce a decision for the given snapshot.
    ///
    /// `action` is the caller-owned, pre-allocated output slot; `None`
    /// means no action is requested (flush). `cancel` is advisory and only
    /// forwarded to potentially blocking collaborators.
    fn decide(
        &mut self,
        tick: Tick,
        state: &Self::State,
        action: Option<&mut Self::Action>,
        cancel: Option<&CancelToken>,
    ) -> Result<Outcome, AgentError>;

    /// Called exactly once at each episode boundary. The default is a
    /// successful no-op.
    fn end_episode(&mut self, _tick: Tick, _state: &Self::State) -> Result<bool, AgentError> {
        Ok(true)
    }
}

/// One game participant's decision-making unit, scheduled per tick.
///
/// The agent itself only handles identity and activation cadence; what
/// happens on an active tick is the policy's business. Agents persist
/// across episodes and are driven by exactly one thread per session.
pub struct Agent<P> {
    name: String,
    id: Option<u32>,
    cadence: NonZeroU64,
    policy: P,
}

impl<P> Agent<P>
where
    P: Policy,
{
    /// Create an anonymous agent that acts on every tick.
    pub fn new(policy: P) -> Self {
        Self {
            name: "noname".into(),
            id: None,
            cadence: NonZeroU64::MIN,
            policy,
        }
    }

    /// Create a named agent that acts every `cadence` ticks.
    pub fn named(name: impl Into<String>, cadence: NonZeroU64, policy: P) -> Self {
        Self {
            name: name.into(),
            id: None,
            cadence,
            policy,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Identity assigned by the driving loop, if any.
    pub fn id(&self) -> Option<u32> {
        self.id
    }

    /// Number of ticks between active decision attempts.
    pub fn cadence(&self) -> NonZeroU64 {
        self.cadence
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    pub fn policy_mut(&mut self) -> &mut P {
        &mut self.policy
    }

    /// Assign an identity. Uniqueness is not validated at this layer, and a
    /// repeated call simply overwrites the previous identity.
    pub fn assign_id(&mut self, id: u32) {
        self.id = Some(id);
        self.policy.on_id_assigned(id);
    }

    /// Run the policy for this tick if the cadence gate allows it.
    ///
    /// Off-cadence ticks return [`Outcome::Skipped`] immediately with no
    /// side effects; on-cadence ticks return the policy's result verbatim.
    pub fn decide(
        &mut self,
        tick: Tick,
        state: &P::State,
        action: Option<&mut P::Action>,
        cancel: Option<&CancelToken>,
    ) -> Result<Outcome, AgentError> {
        if tick % self.cadence.get() != 0 {
            return Ok(Outcome::Skipped);
        }

        self.policy.decide(tick, state, action, cancel)
    }

    /// Close the current episode. The agent survives and can be reused for
    /// the next one.
    pub fn end_episode(&mut self, tick: Tick, state: &P::State) -> Result<bool, AgentError> {
        self.policy.end_episode(tick, state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CountingPolicy {
        active_ticks: Vec<Tick>,
        assigned_ids: Vec<u32>,
    }

    impl Policy for CountingPolicy {
        type State = u32;
        type Action = u32;

        fn on_id_assigned(&mut self, id: u32) {
            self.assigned_ids.push(id);
        }

        fn decide(
            &mut self,
            tick: Tick,
            state: &u32,
            action: Option<&mut u32>,
            _cancel: Option<&CancelToken>,
        ) -> Result<Outcome, AgentError> {
            self.active_ticks.push(tick);

            if let Some(slot) = action {
                *slot = *state;
            }

            Ok(Outcome::Acted)
        }
    }

    #[test]
    fn test_cadence_one_acts_every_tick() {
        let mut agent = Agent::new(CountingPolicy::default());

        for tick in 0..5 {
            let mut slot = 0;
            let outcome = agent.decide(tick, &7, Some(&mut slot), None).unwrap();
            assert_eq!(outcome, Outcome::Acted);
            assert_eq!(slot, 7);
        }

        assert_eq!(agent.policy().active_ticks, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_cadence_gate_skips_off_ticks() {
        let cadence = NonZeroU64::new(3).unwrap();
        let mut agent = Agent::named("gated", cadence, CountingPolicy::default());

        let outcomes = (0..4)
            .map(|tick| agent.decide(tick, &0, None, None).unwrap())
            .collect::<Vec<_>>();

        assert_eq!(
            outcomes,
            vec![
                Outcome::Acted,
                Outcome::Skipped,
                Outcome::Skipped,
                Outcome::Acted,
            ]
        );
        assert_eq!(agent.policy().active_ticks, vec![0, 3]);
    }

    #[test]
    fn test_skipped_tick_has_no_side_effects() {
        let cadence = NonZeroU64::new(2).unwrap();
        let mut agent = Agent::named("gated", cadence, CountingPolicy::default());

        let mut slot = 42;
        let outcome = agent.decide(1, &7, Some(&mut slot), None).unwrap();

        assert_eq!(outcome, Outcome::Skipped);
        assert_eq!(slot, 42);
        assert!(agent.policy().active_ticks.is_empty());
    }

    #[test]
    fn test_assign_id_last_write_wins() {
        let mut agent = Agent::new(CountingPolicy::default());
        assert_eq!(agent.id(), None);

        agent.assign_id(1);
        agent.assign_id(2);

        assert_eq!(agent.id(), Some(2));
        assert_eq!(agent.policy().assigned_ids, vec![1, 2]);
    }

    #[test]
    fn test_default_end_episode_is_noop_success() {
        let mut agent = Agent::new(CountingPolicy::default());
        assert_eq!(agent.end_episode(10, &0), Ok(true));
        assert!(agent.policy().active_ticks.is_empty());
    }
}
