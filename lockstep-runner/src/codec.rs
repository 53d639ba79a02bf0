use agent::{CancelToken, Codec, Tick};
use game::{Chase, Move};
use log::trace;

/// Moves in decode order; a reply carries one score per entry.
pub const MOVES: [Move; 3] = [Move::Left, Move::Stay, Move::Right];

#[derive(Debug, Clone, PartialEq, Default)]
/// Request/reply slot for the chase pairing.
pub struct ChasePayload {
    /// Request fields: snapshot features, written before the round trip.
    pub features: Vec<f32>,
    /// Reply fields: one score per entry of [`MOVES`], written by the
    /// decision service.
    pub scores: Vec<f32>,
}

#[derive(Debug, Clone, Copy, Default)]
/// Feature encoding and action decoding for [`Chase`] snapshots.
pub struct ChaseCodec;

impl Codec for ChaseCodec {
    type State = Chase;
    type Action = Move;
    type Payload = ChasePayload;

    fn before_decide(&mut self, tick: Tick, cancel: Option<&CancelToken>) {
        trace!(
            "encoding tick={} cancelled={}",
            tick,
            cancel.map_or(false, CancelToken::is_cancelled)
        );
    }

    fn extract(&mut self, state: &Chase, request: &mut ChasePayload) {
        let width = state.width() as f32;

        request.features.clear();
        request.features.push(state.chaser() as f32 / width);
        request.features.push(state.prey() as f32 / width);
        request.features.push(state.distance() as f32 / width);
    }

    fn decode(&mut self, reply: &ChasePayload, action: &mut Move) {
        let best = reply
            .scores
            .iter()
            .cloned()
            .enumerate()
            .max_by(|&(_, a), &(_, b)| f32::total_cmp(&a, &b))
            .map(|(index, _)| index);

        *action = match best {
            Some(index) if index < MOVES.len() => MOVES[index],
            _ => Move::default(),
        };
    }
}

/// Score a request the way a greedy decision service would: prefer the
/// move that closes the signed gap. A stand-in service for demos and
/// tests.
pub fn greedy_service(payload: &mut ChasePayload) -> bool {
    let gap = payload.features.get(2).copied().unwrap_or(0f32);

    payload.scores = if 0f32 < gap {
        vec![0f32, 0f32, 1f32]
    } else if gap < 0f32 {
        vec![1f32, 0f32, 0f32]
    } else {
        vec![0f32, 1f32, 0f32]
    };

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_writes_normalized_features() {
        let mut codec = ChaseCodec;
        let mut payload = ChasePayload::default();

        codec.extract(&Chase::new(8, 32), &mut payload);

        assert_eq!(payload.features, vec![0f32, 0.5f32, 0.5f32]);
    }

    #[test]
    fn test_decode_takes_the_best_scored_move() {
        let mut codec = ChaseCodec;
        let payload = ChasePayload {
            features: vec![],
            scores: vec![0.1f32, 0.2f32, 0.7f32],
        };

        let mut action = Move::default();
        codec.decode(&payload, &mut action);

        assert_eq!(action, Move::Right);
    }

    #[test]
    fn test_decode_falls_back_on_an_empty_reply() {
        let mut codec = ChaseCodec;

        let mut action = Move::Left;
        codec.decode(&ChasePayload::default(), &mut action);

        assert_eq!(action, Move::Stay);
    }

    #[test]
    fn test_greedy_service_closes_the_gap() {
        let mut payload = ChasePayload {
            features: vec![0f32, 0.5f32, -0.25f32],
            scores: vec![],
        };

        assert!(greedy_service(&mut payload));
        assert_eq!(payload.scores, vec![1f32, 0f32, 0f32]);
    }
}
