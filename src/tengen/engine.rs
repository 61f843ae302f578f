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

use anyhow::{Context, Result};
use log::{error, info, warn};
use std::time::Duration;

use tg_go::{Board, Color, Point};
use tg_mcts::{sample_policy, ModelScorer, Scorer, SearchTree, SimpleScorer};
use tg_utils::config;

/// Maintains the state of one game and answers the move requests of the
/// protocol layer.
pub trait Engine {
    fn set_board_size(&mut self, size: i16);
    fn set_komi(&mut self, komi: f32);
    fn clear_board(&mut self);
    fn play(&mut self, color: Color, mv: Point);
    fn gen_move(&mut self, color: Color) -> Point;
}

/// Creates the scorer selected by the `SIMPLE_SCORER` flag. A missing or
/// unloadable model is fatal here, before the first command is served.
fn new_scorer() -> Result<Box<dyn Scorer>> {
    if *config::SIMPLE_SCORER {
        info!("using the board counting scorer");
        Ok(Box::new(SimpleScorer::new()))
    } else {
        info!("using the model scorer");

        let scorer = ModelScorer::from_config()
            .context("could not create the model scorer")?;

        Ok(Box::new(scorer))
    }
}

/// The game state every engine flavor shares.
struct GameState {
    board: Board
}

impl GameState {
    fn new() -> GameState {
        GameState { board: Board::new(19, 19) }
    }

    fn set_board_size(&mut self, size: i16) {
        self.board = Board::new(size, size);
    }

    fn clear_board(&mut self) {
        self.board = Board::new(self.board.width(), self.board.height());
    }

    fn play(&mut self, color: Color, mv: Point) {
        if color != self.board.to_move() {
            error!("not the turn of {}", color);
            return;
        }

        match self.board.play(mv, true) {
            Some(captured) => {
                info!("player {} plays at {}, captured {} stones", color, mv, captured.len());
            },
            None => {
                error!("player {} tried the illegal move {}", color, mv);
            }
        }
    }
}

/// Generates moves from a single scorer lookahead: resign when the
/// evaluation says so, otherwise sample the policy.
pub struct SimpleEngine {
    state: GameState,
    scorer: Box<dyn Scorer>
}

impl SimpleEngine {
    pub fn new() -> Result<SimpleEngine> {
        Ok(SimpleEngine::with_scorer(new_scorer()?))
    }

    pub fn with_scorer(scorer: Box<dyn Scorer>) -> SimpleEngine {
        SimpleEngine { state: GameState::new(), scorer }
    }
}

impl Engine for SimpleEngine {
    fn set_board_size(&mut self, size: i16) {
        self.state.set_board_size(size);
    }

    fn set_komi(&mut self, komi: f32) {
        warn!("komi {} is accepted but not used", komi);
    }

    fn clear_board(&mut self) {
        self.state.clear_board();
    }

    fn play(&mut self, color: Color, mv: Point) {
        self.state.play(color, mv);
    }

    fn gen_move(&mut self, color: Color) -> Point {
        if color != self.state.board.to_move() {
            error!("wrong state: not the turn of {}", color);
            return Point::RESIGN;
        }

        let mut next_move = Point::PASS;

        match self.scorer.score_sync(&self.state.board) {
            Some((policy, value)) => {
                if value.0 {
                    return Point::RESIGN;
                }
                if !policy.is_empty() {
                    next_move = sample_policy(&policy);
                }
            },
            None => {
                error!("scoring failed, passing");
            }
        }

        let captured = self.state.board.play(next_move, true)
            .map(|dead| dead.len())
            .unwrap_or(0);
        info!("player {} plays at {}, captured {} stones", color, next_move, captured);

        let (unknown, black, white) = self.state.board.approx_points();
        info!("estimated points: black={}, white={}, unknown={}", black, white, unknown);

        next_move
    }
}

/// Generates moves from a bounded tree search over the scorer's
/// candidates.
pub struct MctsEngine {
    state: GameState,
    scorer: Box<dyn Scorer>,
    time_limit: Duration
}

impl MctsEngine {
    pub fn new() -> Result<MctsEngine> {
        Ok(MctsEngine::with_scorer(new_scorer()?))
    }

    pub fn with_scorer(scorer: Box<dyn Scorer>) -> MctsEngine {
        MctsEngine {
            state: GameState::new(),
            scorer,
            time_limit: Duration::from_secs(1)
        }
    }
}

impl Engine for MctsEngine {
    fn set_board_size(&mut self, size: i16) {
        self.state.set_board_size(size);
    }

    fn set_komi(&mut self, komi: f32) {
        warn!("komi {} is accepted but not used", komi);
    }

    fn clear_board(&mut self) {
        self.state.clear_board();
    }

    fn play(&mut self, color: Color, mv: Point) {
        self.state.play(color, mv);
    }

    fn gen_move(&mut self, color: Color) -> Point {
        if color != self.state.board.to_move() {
            error!("wrong state: not the turn of {}", color);
            return Point::RESIGN;
        }

        let mut tree = SearchTree::new(self.state.board.clone(), self.scorer.as_ref());
        let result = tree.search(self.time_limit);
        let next_move = result.moves.first().map(|m| m.0).unwrap_or(Point::PASS);

        if next_move == Point::RESIGN {
            return Point::RESIGN;
        }

        let captured = self.state.board.play(next_move, true)
            .map(|dead| dead.len())
            .unwrap_or(0);
        info!(
            "player {} plays at {} after {} rollouts, captured {} stones",
            color, next_move, result.num_rollouts, captured
        );

        next_move
    }
}
