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

use log::{info, warn};
use ordered_float::OrderedFloat;
use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use crate::scorer::{PolicyResult, Scorer, ValueResult};
use tg_go::{Board, Color, Point};

/// The scoring lifecycle of a node. A node only ever moves forward
/// through `New -> Scoring -> {Scored, Failed}`, and only one thread may
/// drive a given transition.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NodeState {
    New,
    Scoring,
    Scored,
    Failed
}

/// One position of the search tree. A node owns its board and its
/// children, so dropping the root drops the whole tree.
pub struct Node {
    state: NodeState,
    depth: usize,
    visit_count: usize,
    board: Board,
    children: BTreeMap<Point, Node>,
    candidate_moves: PolicyResult,
    score: ValueResult,

    /// Wins among the leaves below this node, indexed black then white.
    win_count: [usize; 2]
}

impl Node {
    fn new(board: Board, depth: usize) -> Node {
        Node {
            state: NodeState::New,
            depth,
            visit_count: 0,
            board,
            children: BTreeMap::new(),
            candidate_moves: vec! [],
            score: (false, 0.0),
            win_count: [0, 0]
        }
    }

    pub fn state(&self) -> NodeState {
        self.state
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn score(&self) -> ValueResult {
        self.score
    }

    fn should_pass(&self) -> bool {
        debug_assert!(self.state == NodeState::Scored || self.state == NodeState::Failed);

        self.state == NodeState::Failed || self.candidate_moves.is_empty()
    }

    fn should_resign(&self) -> bool {
        self.state == NodeState::Scored && self.score.0
    }

    fn is_leaf(&self) -> bool {
        self.should_pass() || self.should_resign()
    }

    /// Counts one win per leaf below this node. A leaf is a win for the
    /// player to move there, unless scoring failed or called for
    /// resignation, in which case it is a win for the opponent.
    fn collect_rollout_results(&mut self) {
        if self.children.is_empty() {
            let mover_wins = !(self.state == NodeState::Failed || self.should_resign());
            let black_wins = mover_wins == (self.board.to_move() == Color::Black);

            self.win_count = if black_wins { [1, 0] } else { [0, 1] };
        } else {
            self.win_count = [0, 0];

            for child in self.children.values_mut() {
                child.collect_rollout_results();

                self.win_count[0] += child.win_count[0];
                self.win_count[1] += child.win_count[1];
            }
        }
    }

    /// The best score among this node's children.
    fn max_child_score(&self) -> Option<f32> {
        self.children.values()
            .map(|child| OrderedFloat(child.score.1))
            .max()
            .map(|best| best.0)
    }
}

/// The ranked moves of a finished search, best first.
pub struct SearchResult {
    pub moves: Vec<(Point, f32)>,
    pub num_rollouts: usize
}

/// A two-ply search over the scorer's candidate moves, rooted at a clone
/// of the live board.
///
/// The root and its children are expanded through the scorer, the
/// grandchildren become rollout points, and scores propagate back up with
/// `1 - max(child score)` at each step.
pub struct SearchTree<'a> {
    scorer: &'a dyn Scorer,
    root: Node
}

impl<'a> SearchTree<'a> {
    pub fn new(board: Board, scorer: &'a dyn Scorer) -> SearchTree<'a> {
        SearchTree {
            scorer,
            root: Node::new(board, 0)
        }
    }

    /// Scores a node through the scorer, driving its state machine to
    /// `Scored` or `Failed`.
    fn score_node(scorer: &dyn Scorer, node: &mut Node) {
        debug_assert_eq!(node.state, NodeState::New);

        node.state = NodeState::Scoring;
        node.visit_count += 1;

        match scorer.score_sync(&node.board) {
            Some((policy, value)) => {
                node.candidate_moves = policy;
                node.score = value;
                node.state = NodeState::Scored;
            },
            None => {
                node.state = NodeState::Failed;
            }
        }
    }

    /// Scores a node and materializes a child for every legal candidate
    /// move. A candidate the board rejects is logged and skipped.
    fn expand(scorer: &dyn Scorer, node: &mut Node) {
        Self::score_node(scorer, node);

        if node.is_leaf() {
            return;
        }

        let candidates = node.candidate_moves.clone();

        for (mv, _) in candidates {
            let mut board = node.board.clone();

            if board.play(mv, true).is_some() {
                node.children.insert(mv, Node::new(board, node.depth + 1));
            } else {
                warn!("the scorer suggested an illegal move at {}", mv);
            }
        }
    }

    /// Runs the search and ranks the root moves. The time limit is
    /// advisory: the fixed two-ply expansion always completes, and an
    /// overrun is only reported.
    pub fn search(&mut self, time_limit: Duration) -> SearchResult {
        let started_at = Instant::now();
        let scorer = self.scorer;
        let mut result = SearchResult { moves: vec! [], num_rollouts: 0 };

        // the root position
        Self::expand(scorer, &mut self.root);

        if self.root.should_pass() {
            result.moves.push((Point::PASS, 0.0));
            return result;
        }
        if self.root.should_resign() {
            result.moves.push((Point::RESIGN, 0.0));
            return result;
        }

        // every reply, whose children become the rollout points
        for child in self.root.children.values_mut() {
            Self::expand(scorer, child);
        }

        for child in self.root.children.values_mut() {
            for rollout_point in child.children.values_mut() {
                Self::score_node(scorer, rollout_point);
            }
        }

        // one rollout result per leaf
        self.root.collect_rollout_results();
        result.num_rollouts = self.root.win_count[0] + self.root.win_count[1];

        // a rollout point with children backs up their best score; a leaf
        // keeps the value estimate it was scored with, except that a
        // failed leaf counts as lost
        for child in self.root.children.values_mut() {
            for rollout_point in child.children.values_mut() {
                if let Some(best) = rollout_point.max_child_score() {
                    rollout_point.score.1 = 1.0 - best;
                } else if rollout_point.state == NodeState::Failed {
                    rollout_point.score = (false, 0.0);
                }
            }
        }

        // rank the root moves; each child's score becomes the win
        // probability of the move leading to it
        for (&mv, child) in self.root.children.iter_mut() {
            let score = match child.max_child_score() {
                Some(best) => 1.0 - best,
                None => 1.0 - child.score.1
            };

            child.score.1 = score;
            result.moves.push((mv, score));
        }

        result.moves.sort_by_key(|&(_, score)| Reverse(OrderedFloat(score)));

        let elapsed = started_at.elapsed();

        if elapsed > time_limit {
            warn!("search overran its {:?} budget, took {:?}", time_limit, elapsed);
        }

        info!(
            "search finished in {:?} with {} rollouts over {} moves",
            elapsed,
            result.num_rollouts,
            result.moves.len()
        );

        result
    }
}
