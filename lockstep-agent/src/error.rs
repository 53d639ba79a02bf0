use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
/// Hard failures of the agent core.
///
/// Everything recoverable (schedule skips, failed round trips, a flush on
/// an unbound agent) is reported through return values instead, keeping the
/// per-tick hot path free of error plumbing.
pub enum AgentError {
    /// A decision was requested from a channel-backed agent before any
    /// channel was bound. Caller misuse, not a runtime condition to retry.
    #[error("no channel bound; call bind_channel before deciding")]
    ChannelUnbound,
}
