use crate::{AgentError, CancelToken, Outcome, Policy, Tick};
use std::marker::PhantomData;

/// Rule-based policy: a closure inspects the snapshot and either proposes
/// an action or abstains.
pub struct RulePolicy<S, A, F> {
    rule: F,
    _marker: PhantomData<fn(&S) -> A>,
}

impl<S, A, F> RulePolicy<S, A, F>
where
    F: FnMut(&S) -> Option<A>,
{
    pub fn new(rule: F) -> Self {
        Self {
            rule,
            _marker: PhantomData,
        }
    }
}

impl<S, A, F> Policy for RulePolicy<S, A, F>
where
    F: FnMut(&S) -> Option<A>,
{
    type State = S;
    type Action = A;

    fn decide(
        &mut self,
        _tick: Tick,
        state: &S,
        action: Option<&mut A>,
        _cancel: Option<&CancelToken>,
    ) -> Result<Outcome, AgentError> {
        match (self.rule)(state) {
            Some(choice) => {
                if let Some(slot) = action {
                    *slot = choice;
                }

                Ok(Outcome::Acted)
            }
            None => Ok(Outcome::Failed),
        }
    }
}
