// Copyright 2019 The Tengen Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crossbeam_channel::bounded;
use log::{error, warn};
use rand::{thread_rng, Rng};

use tg_go::{Board, Color, Point};
use tg_nn::InferenceClient;
use tg_utils::config;
use tg_utils::pool::ThreadPool;
use tg_utils::top_k::TopK;

/// Candidate moves for the player to move, with their probabilities. A
/// non-empty result is normalized so the probabilities sum to one.
pub type PolicyResult = Vec<(Point, f32)>;

/// Whether the player to move should resign, and their score in `[0, 1]`.
pub type ValueResult = (bool, f32);

/// Invoked exactly once per scoring request, off the caller's thread,
/// with `None` when the scorer failed.
pub type ScoreCallback = Box<dyn FnOnce(Option<(PolicyResult, ValueResult)>) + Send + 'static>;

/// How many candidate moves a policy result keeps.
const NUM_CANDIDATES: usize = 20;

lazy_static! {
    /// Runs the callbacks of `SimpleScorer`. Process-wide, so it outlives
    /// every scorer.
    static ref SCORER_POOL: ThreadPool = ThreadPool::new(*config::NUM_THREADS);
}

pub trait Scorer {
    /// Asynchronously scores the board for the player to move.
    fn score_async(&self, board: &Board, callback: ScoreCallback);

    /// Blocks the caller until the scoring callback has run.
    fn score_sync(&self, board: &Board) -> Option<(PolicyResult, ValueResult)> {
        let (tx, rx) = bounded(1);

        self.score_async(board, Box::new(move |result| {
            tx.send(result).expect("could not deliver the scoring result");
        }));

        rx.recv().expect("the scorer dropped its callback")
    }
}

/// Evaluates the board by counting: whether the player to move should
/// resign, and their score margin in `[-1, 1]` (stones plus settled
/// territory, relative to the opponent).
pub fn simple_evaluate(board: &Board) -> (bool, f32) {
    let (unknown, black, white) = board.approx_points();
    let total = (unknown + black + white) as f32;
    let (current, opponent) = if board.to_move() == Color::Black {
        (black, white)
    } else {
        (white, black)
    };

    let should_resign = black + white > 15 && current + unknown < opponent;
    let margin = if total > 0.0 {
        (current - opponent) as f32 / total
    } else {
        0.0
    };

    (should_resign, margin)
}

/// Maps a score margin in `[-1, 1]` onto the win probability scale.
fn calibrate(margin: f32) -> f32 {
    0.5 + 0.5 * margin
}

/// Rescales a non-empty policy so that it sums to one.
fn normalize(policy: &mut PolicyResult) {
    let total = policy.iter().map(|p| p.1).sum::<f32>();

    if total > 0.0 {
        for p in policy.iter_mut() {
            p.1 /= total;
        }
    }
}

/// Randomly samples one candidate move, proportionally to its weight.
pub fn sample_policy(policy: &PolicyResult) -> Point {
    assert!(!policy.is_empty());

    let total = policy.iter().map(|p| p.1).sum::<f32>();
    let roll = thread_rng().gen::<f32>() * total;
    let mut acc = 0.0;

    for &(point, weight) in policy.iter() {
        acc += weight;

        if acc >= roll {
            return point;
        }
    }

    policy.last().expect("policy is empty").0
}

/// Scores with a uniform policy over the legal moves and the board
/// counting evaluation. Cheap enough for tests and fast play, and immune
/// to model failures.
#[derive(Clone, Default)]
pub struct SimpleScorer;

impl SimpleScorer {
    pub fn new() -> SimpleScorer {
        SimpleScorer
    }
}

impl Scorer for SimpleScorer {
    fn score_async(&self, board: &Board, callback: ScoreCallback) {
        let mut policy = board.vertices()
            .filter(|&pos| board.is_legal(pos))
            .map(|pos| (pos, 1.0))
            .collect::<PolicyResult>();
        normalize(&mut policy);

        let (should_resign, margin) = simple_evaluate(board);
        let value = (should_resign, calibrate(margin));

        SCORER_POOL.schedule(move || callback(Some((policy, value))));
    }
}

/// Scores through the batched inference client, filtering the policy
/// head down to the best legal moves and combining the value head with
/// the board counting evaluation.
pub struct ModelScorer {
    client: InferenceClient
}

impl ModelScorer {
    /// Creates a scorer over the session selected by the `MODEL` flag.
    /// Fails here, at construction, when no usable model is configured.
    pub fn from_config() -> Result<ModelScorer, tg_nn::Error> {
        Ok(ModelScorer { client: InferenceClient::new(tg_nn::from_config()?) })
    }

    pub fn with_client(client: InferenceClient) -> ModelScorer {
        ModelScorer { client }
    }
}

impl Scorer for ModelScorer {
    fn score_async(&self, board: &Board, callback: ScoreCallback) {
        let fast_eval = simple_evaluate(board);
        let snapshot = board.clone();

        self.client.add(board.features().clone(), Box::new(move |result| {
            match result {
                Ok(outputs) => {
                    debug_assert_eq!(outputs.len(), 2);
                    debug_assert_eq!(
                        outputs[0].len(),
                        (snapshot.width() * snapshot.height()) as usize
                    );
                    debug_assert_eq!(outputs[1].len(), 1);

                    let policy = to_policy_result(&snapshot, &outputs[0]);

                    if policy.is_empty() {
                        warn!("every move in the policy output is illegal");
                    }

                    callback(Some((policy, combine_value(outputs[1][0], fast_eval))));
                },
                Err(reason) => {
                    error!("scoring failed: {}", reason);
                    callback(None);
                }
            }
        }));
    }
}

/// Keeps the `NUM_CANDIDATES` highest-scoring legal moves of a raw policy
/// plane, normalized.
fn to_policy_result(board: &Board, policy_output: &[f32]) -> PolicyResult {
    let mut top_k = TopK::new(NUM_CANDIDATES);

    for (index, &weight) in policy_output.iter().enumerate() {
        let pos = board.decode(index);

        if board.is_legal(pos) {
            top_k.insert(weight, pos);
        }
    }

    let mut policy = top_k.into_vec();
    normalize(&mut policy);
    policy
}

/// The resign decision always comes from board counting; the score comes
/// from the value head unless we are resigning anyway.
fn combine_value(value_output: f32, fast_eval: (bool, f32)) -> ValueResult {
    if fast_eval.0 {
        (true, calibrate(fast_eval.1))
    } else {
        (false, value_output)
    }
}
