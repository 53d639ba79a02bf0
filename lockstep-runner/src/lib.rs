pub mod codec;
pub mod session;

use agent::{Agent, AgentError, CancelToken, Policy};
use game::{Chase, Move, Status};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use rayon::{
    prelude::{IntoParallelIterator, ParallelIterator},
    ThreadPool, ThreadPoolBuilder,
};
use std::num::NonZeroUsize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RunnerBuildError {
    #[error("failed to build thread pool: {0}")]
    ThreadPoolBuildError(#[from] rayon::ThreadPoolBuildError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Configuration for the episode runner.
pub struct RunnerConfig {
    /// The number of threads to use.
    pub num_threads: Option<NonZeroUsize>,
    /// Number of episodes to play.
    pub episodes: usize,
    /// Track width of each episode's game.
    pub width: u64,
    /// Tick limit after which the prey escapes.
    pub max_ticks: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Tally of a batch of episodes.
pub struct Summary {
    pub caught: usize,
    pub escaped: usize,
    /// Episodes cut short by cancellation.
    pub unfinished: usize,
}

/// Plays batches of independent episodes in parallel, one agent and one
/// channel per episode, with no shared state between them.
pub struct Runner {
    config: RunnerConfig,
    thread_pool: ThreadPool,
}

impl Runner {
    /// Creates a new runner.
    pub fn new(config: RunnerConfig) -> Result<Self, RunnerBuildError> {
        let mut thread_pool_builder = ThreadPoolBuilder::new();

        if let Some(num_threads) = config.num_threads {
            thread_pool_builder = thread_pool_builder.num_threads(num_threads.get());
        }

        let thread_pool = thread_pool_builder.build()?;

        Ok(Self {
            config,
            thread_pool,
        })
    }

    /// Play one episode per slot, each with a freshly built agent and game.
    ///
    /// `make_agent` receives the episode index and the returned agent is
    /// assigned that index as its identity before the first tick.
    pub fn run<P, F>(
        &self,
        make_agent: F,
        cancel: Option<&CancelToken>,
    ) -> Result<Summary, AgentError>
    where
        P: Policy<State = Chase, Action = Move>,
        F: Fn(usize) -> Agent<P> + Sync,
    {
        self.thread_pool.install(|| {
            let progress_bar = ProgressBar::new(self.config.episodes as u64);
            progress_bar.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.white} [{bar:40.green/white}] {pos:>7}/{len:7}")
                    .unwrap()
                    .progress_chars("#>-"),
            );
            progress_bar.tick();

            let statuses = (0..self.config.episodes)
                .into_par_iter()
                .map(|index| {
                    let mut game = Chase::new(self.config.width, self.config.max_ticks);
                    let mut agent = make_agent(index);
                    agent.assign_id(index as u32);

                    let status = session::run_episode(&mut game, &mut agent, cancel)?;

                    progress_bar.inc(1);

                    Ok(status)
                })
                .collect::<Result<Vec<_>, AgentError>>()?;

            progress_bar.finish();

            let mut summary = Summary::default();

            for status in statuses {
                match status {
                    Status::Ongoing => summary.unfinished += 1,
                    Status::Caught => summary.caught += 1,
                    Status::Escaped => summary.escaped += 1,
                }
            }

            info!(
                "batch done: caught={} escaped={} unfinished={}",
                summary.caught, summary.escaped, summary.unfinished
            );

            Ok(summary)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{greedy_service, ChaseCodec};
    use agent::{CommPolicy, InlineChannel};

    fn config(episodes: usize) -> RunnerConfig {
        RunnerConfig {
            num_threads: NonZeroUsize::new(2),
            episodes,
            width: 8,
            max_ticks: 64,
        }
    }

    fn make_greedy_agent(_index: usize) -> Agent<impl Policy<State = Chase, Action = Move>> {
        let mut policy = CommPolicy::new(ChaseCodec);
        policy.bind_channel(InlineChannel::new(greedy_service));
        Agent::new(policy)
    }

    #[test]
    fn test_all_greedy_episodes_end_in_a_catch() {
        let runner = Runner::new(config(4)).unwrap();

        let summary = runner.run(make_greedy_agent, None).unwrap();

        assert_eq!(
            summary,
            Summary {
                caught: 4,
                escaped: 0,
                unfinished: 0,
            }
        );
    }

    #[test]
    fn test_cancelled_batch_reports_unfinished_episodes() {
        let runner = Runner::new(config(3)).unwrap();
        let cancel = CancelToken::new();
        cancel.cancel();

        let summary = runner.run(make_greedy_agent, Some(&cancel)).unwrap();

        assert_eq!(summary.unfinished, 3);
    }
}
