use agent::{Agent, AgentError, CancelToken, Policy};
use game::{Chase, Move, Status};
use log::trace;

/// Drive one episode tick-by-tick until a terminal status or cancellation.
///
/// Implements the loop side of the agent contract: one `decide` call per
/// tick with a pre-allocated action slot, the boolean view of the outcome
/// taken as "action available" (a no-action tick advances the world with
/// [`Move::Stay`]), and exactly one `end_episode` at the boundary.
///
/// Returns the final status; `Ongoing` means the episode was cancelled
/// before finishing.
pub fn run_episode<P>(
    game: &mut Chase,
    agent: &mut Agent<P>,
    cancel: Option<&CancelToken>,
) -> Result<Status, AgentError>
where
    P: Policy<State = Chase, Action = Move>,
{
    for tick in 0.. {
        if cancel.map_or(false, CancelToken::is_cancelled) {
            break;
        }

        let mut slot = Move::default();
        let outcome = agent.decide(tick, game, Some(&mut slot), cancel)?;

        trace!(
            "agent={} tick={} outcome={:?} move={:?}",
            agent.name(),
            tick,
            outcome,
            slot
        );

        let chaser_move = if outcome.acted() { slot } else { Move::default() };
        let status = game.advance(chaser_move);

        if status != Status::Ongoing {
            agent.end_episode(tick, game)?;
            return Ok(status);
        }
    }

    // Cancelled mid-episode; that still counts as the episode boundary.
    agent.end_episode(game.tick(), game)?;
    Ok(Status::Ongoing)
}
