mod replay;
mod rule;

pub use replay::ReplayPolicy;
pub use rule::RulePolicy;
