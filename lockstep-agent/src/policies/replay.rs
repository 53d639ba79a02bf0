use crate::{AgentError, CancelToken, Outcome, Policy, Tick};
use std::{collections::VecDeque, marker::PhantomData};

/// Replay-driven policy: plays back a prerecorded action script, one entry
/// per active tick, in order. An exhausted script fails the remaining
/// ticks.
pub struct ReplayPolicy<S, A> {
    script: VecDeque<A>,
    _marker: PhantomData<fn(&S)>,
}

impl<S, A> ReplayPolicy<S, A> {
    pub fn new(script: impl IntoIterator<Item = A>) -> Self {
        Self {
            script: script.into_iter().collect(),
            _marker: PhantomData,
        }
    }

    /// Number of scripted actions not yet played back.
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl<S, A> Policy for ReplayPolicy<S, A> {
    type State = S;
    type Action = A;

    fn decide(
        &mut self,
        _tick: Tick,
        _state: &S,
        action: Option<&mut A>,
        _cancel: Option<&CancelToken>,
    ) -> Result<Outcome, AgentError> {
        match self.script.pop_front() {
            Some(entry) => {
                if let Some(slot) = action {
                    *slot = entry;
                }

                Ok(Outcome::Acted)
            }
            None => Ok(Outcome::Failed),
        }
    }
}
