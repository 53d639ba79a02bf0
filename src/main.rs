use agent::{policies::RulePolicy, Agent, CancelToken, CommPolicy, InlineChannel};
use game::{Chase, Move};
use log::info;
use rand::{thread_rng, Rng};
use runner::{
    codec::{greedy_service, ChaseCodec},
    session::run_episode,
    Runner, RunnerConfig,
};
use std::num::NonZeroU64;

fn main() {
    env_logger::init();

    let config = RunnerConfig {
        num_threads: None,
        episodes: 64,
        width: 16,
        max_ticks: 256,
    };

    info!(
        "playing {} channel-backed episodes on a track of {} cells",
        config.episodes, config.width
    );

    let runner = Runner::new(config).unwrap();
    let cancel = CancelToken::new();

    // Channel-backed agents at full cadence against an in-process greedy
    // service; every one of them should end in a catch.
    let summary = runner
        .run(
            |index| {
                let mut policy = CommPolicy::new(ChaseCodec);
                policy.bind_channel(InlineChannel::new(greedy_service));
                Agent::named(
                    format!("comm-{}", index),
                    NonZeroU64::new(1).unwrap(),
                    policy,
                )
            },
            Some(&cancel),
        )
        .unwrap();

    info!(
        "greedy service: caught={} escaped={} unfinished={}",
        summary.caught, summary.escaped, summary.unfinished
    );

    // The same loop also drives plain rule-based agents; a random wanderer
    // mostly lets the prey escape.
    let mut rng = thread_rng();
    let mut wanderer = Agent::named(
        "wanderer",
        NonZeroU64::new(1).unwrap(),
        RulePolicy::new(move |_state: &Chase| {
            Some(match rng.gen_range(0..3) {
                0 => Move::Left,
                1 => Move::Stay,
                _ => Move::Right,
            })
        }),
    );

    let mut game = Chase::new(16, 256);
    let status = run_episode(&mut game, &mut wanderer, Some(&cancel)).unwrap();

    info!(
        "{} finished with {:?} after {} ticks",
        wanderer.name(),
        status,
        game.tick()
    );
}
