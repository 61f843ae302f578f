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

use crate::chain::Chain;
use crate::color::Color;
use crate::features::FeatureSet;
use crate::point::Point;

use std::collections::{BTreeSet, HashMap};
use std::fmt;

const INVALID_ID: i16 = 0;

const DELTAS: [(i16, i16); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

/// A Go board with incrementally maintained chains, liberties, ko state,
/// suicide prohibitions, feature planes, and a territory estimate.
///
/// All derived state is refreshed by `play`, so between moves the board is
/// always consistent: every occupied vertex belongs to exactly one chain,
/// every chain has at least one liberty, and the feature planes describe
/// the position from the point of view of the player to move.
#[derive(Clone)]
pub struct Board {
    width: i16,
    height: i16,
    to_move: Color,
    stones: Vec<Color>,
    chain_ids: Vec<i16>,
    chains: HashMap<i16, Chain>,
    next_chain_id: i16,
    ko: Point,
    forbidden: BTreeSet<Point>,
    features: FeatureSet,
    approx_territory: [i16; 3]
}

impl Board {
    pub fn new(width: i16, height: i16) -> Board {
        assert!(width > 0 && height > 0);

        let len = (width as usize) * (height as usize);
        let mut board = Board {
            width,
            height,
            to_move: Color::Black,
            stones: vec! [Color::None; len],
            chain_ids: vec! [INVALID_ID; len],
            chains: HashMap::new(),
            next_chain_id: INVALID_ID + 1,
            ko: Point::NONE,
            forbidden: BTreeSet::new(),
            features: FeatureSet::new(width, height),
            approx_territory: [width * height, 0, 0]
        };

        board.update_features();
        board
    }

    pub fn width(&self) -> i16 {
        self.width
    }

    pub fn height(&self) -> i16 {
        self.height
    }

    /// The player whose turn it is to move.
    pub fn to_move(&self) -> Color {
        self.to_move
    }

    /// The single vertex the player to move may not immediately recapture
    /// at, or `Point::NONE`.
    pub fn ko(&self) -> Point {
        self.ko
    }

    pub fn stone_at(&self, pos: Point) -> Color {
        self.stones[self.encode(pos)]
    }

    /// The chain occupying the given vertex, if any.
    pub fn chain_at(&self, pos: Point) -> Option<&Chain> {
        let chain_id = self.chain_ids[self.encode(pos)];

        if chain_id == INVALID_ID {
            None
        } else {
            Some(self.chains.get(&chain_id).expect("no chain for occupied vertex"))
        }
    }

    /// The feature planes for the player to move.
    pub fn features(&self) -> &FeatureSet {
        &self.features
    }

    /// The estimated `(unknown, black, white)` point split. Unless the last
    /// `play` was asked to estimate territory this is all zeros.
    pub fn approx_points(&self) -> (i16, i16, i16) {
        let [unknown, black, white] = self.approx_territory;

        (unknown, black, white)
    }

    /// Maps a board coordinate to an index in `[0, width * height)`.
    pub fn encode(&self, pos: Point) -> usize {
        debug_assert!(self.is_inside(pos), "{} is out of bounds", pos);

        (pos.y() * self.width + pos.x()) as usize
    }

    /// The inverse of `encode`.
    pub fn decode(&self, index: usize) -> Point {
        let pos = Point::new(index as i16 % self.width, index as i16 / self.width);

        debug_assert!(self.is_inside(pos));
        pos
    }

    /// An iterator over every vertex of the board.
    pub fn vertices(&self) -> impl Iterator<Item=Point> + '_ {
        (0..self.stones.len()).map(move |index| self.decode(index))
    }

    fn is_inside(&self, pos: Point) -> bool {
        pos.x() >= 0 && pos.x() < self.width && pos.y() >= 0 && pos.y() < self.height
    }

    /// An iterator over the in-bounds 4-neighbours of a vertex.
    fn neighbours(&self, pos: Point) -> impl Iterator<Item=Point> + '_ {
        DELTAS.iter()
            .map(move |&(dx, dy)| Point::new(pos.x() + dx, pos.y() + dy))
            .filter(move |&other| self.is_inside(other))
    }

    /// Returns true iff the player to move may play `mv`. `PASS` and
    /// `RESIGN` are always legal; a placement must be in bounds, on an
    /// empty vertex, not the ko point, and not a suicide.
    pub fn is_legal(&self, mv: Point) -> bool {
        if mv == Point::PASS || mv == Point::RESIGN {
            return true;
        }

        self.is_inside(mv)
            && self.stone_at(mv) == Color::None
            && mv != self.ko
            && !self.forbidden.contains(&mv)
    }

    /// Plays a move for the player to move, returning the opponent stones
    /// it captured, or `None` if the move is illegal (in which case the
    /// board is untouched).
    ///
    /// `RESIGN` succeeds without mutating anything. `PASS` flips the player
    /// to move and refreshes the derived state. Territory estimation is
    /// optional because it is by far the slowest part of a move.
    ///
    /// # Arguments
    ///
    /// * `mv` - the vertex to play at, or `PASS` / `RESIGN`
    /// * `estimate_territory` - whether to refresh the territory estimate
    ///
    pub fn play(&mut self, mv: Point, estimate_territory: bool) -> Option<Vec<Point>> {
        if !self.is_legal(mv) {
            return None;
        }
        if mv == Point::RESIGN {
            return Some(vec! []);
        }
        if mv == Point::PASS {
            // the ko prohibition only binds for one turn, so a pass lifts it
            self.ko = Point::NONE;
            self.to_move = self.to_move.opponent();
            self.update_forbidden();
            self.update_features();

            if estimate_territory {
                self.estimate_territory();
            }

            return Some(vec! []);
        }

        self.ko = Point::NONE;

        // partition the neighbourhood of the new stone into its liberties,
        // adjacent chains of our own color, and adjacent opponent chains
        let mut liberties = Vec::with_capacity(4);
        let mut neighbours = BTreeSet::new();
        let mut opponents = BTreeSet::new();

        for other in self.neighbours(mv) {
            match self.stone_at(other) {
                Color::None => {
                    liberties.push(other);
                },
                color => {
                    let chain_id = self.chain_ids[self.encode(other)];
                    debug_assert!(chain_id != INVALID_ID);

                    if color == self.to_move {
                        neighbours.insert(chain_id);
                    } else {
                        opponents.insert(chain_id);
                    }
                }
            }
        }

        // place the stone
        let index = self.encode(mv);
        self.stones[index] = self.to_move;
        self.chain_ids[index] = INVALID_ID;

        // remove every opponent chain whose last liberty this was, and
        // erase the vertex from the liberties of the survivors
        let mut captured = vec! [];

        for chain_id in opponents {
            let is_captured = {
                let chain = self.chains.get(&chain_id).expect("no chain for id");

                chain.num_liberties() == 1 && chain.first_liberty() == mv
            };

            if is_captured {
                self.remove_chain(chain_id, &mut captured);
            } else {
                self.chains.get_mut(&chain_id).expect("no chain for id")
                    .liberties.remove(&mv);
            }
        }

        // extend a neighbouring chain of our own color, or start a new one
        let new_chain_id = if neighbours.is_empty() {
            Some(self.create_chain(mv, &liberties))
        } else {
            self.merge_chains(mv, &liberties, &neighbours);
            None
        };

        // every captured vertex is now a liberty of each chain around it
        for i in 0..captured.len() {
            let removed = captured[i];
            let adjacent = self.neighbours(removed)
                .filter_map(|other| {
                    let chain_id = self.chain_ids[self.encode(other)];

                    if chain_id != INVALID_ID { Some(chain_id) } else { None }
                })
                .collect::<Vec<_>>();

            for chain_id in adjacent {
                self.chains.get_mut(&chain_id).expect("no chain for id")
                    .liberties.insert(removed);
            }
        }

        // it is a ko if we captured exactly one stone and the captured
        // vertex is the only liberty of the (new, single stone) chain
        if captured.len() == 1 {
            if let Some(chain_id) = new_chain_id {
                let chain = self.chains.get(&chain_id).expect("no chain for id");

                if chain.num_liberties() == 1 && chain.first_liberty() == captured[0] {
                    self.ko = captured[0];
                }
            }
        }

        self.to_move = self.to_move.opponent();
        self.update_forbidden();
        self.update_features();

        if estimate_territory {
            self.estimate_territory();
        } else {
            self.approx_territory = [0; 3];
        }

        Some(captured)
    }

    /// Removes the chain from the board, appending its stones to
    /// `captured`.
    fn remove_chain(&mut self, chain_id: i16, captured: &mut Vec<Point>) {
        let chain = self.chains.remove(&chain_id).expect("no chain for id");

        for &stone in &chain.stones {
            let index = self.encode(stone);

            self.stones[index] = Color::None;
            self.chain_ids[index] = INVALID_ID;
            captured.push(stone);
        }
    }

    /// Creates a new single-stone chain for the player to move.
    fn create_chain(&mut self, stone: Point, liberties: &[Point]) -> i16 {
        let chain_id = self.next_chain_id;
        self.next_chain_id += 1;

        let mut chain = Chain::new(self.to_move, chain_id);
        chain.stones.push(stone);
        chain.liberties.extend(liberties.iter().cloned());

        let index = self.encode(stone);
        self.chain_ids[index] = chain_id;
        self.chains.insert(chain_id, chain);

        chain_id
    }

    /// Folds all chains in `chain_ids` into the first of them, together
    /// with the joint stone and its liberties.
    fn merge_chains(&mut self, joint: Point, liberties: &[Point], chain_ids: &BTreeSet<i16>) {
        let mut iter = chain_ids.iter();
        let target = *iter.next().expect("no chains to merge");

        for &from_id in iter {
            let from = self.chains.remove(&from_id).expect("no chain for id");

            for &stone in &from.stones {
                let index = self.encode(stone);

                self.chain_ids[index] = target;
            }

            let merged = self.chains.get_mut(&target).expect("no chain for id");
            merged.stones.extend_from_slice(&from.stones);
            merged.liberties.extend(from.liberties.iter().cloned());
        }

        let index = self.encode(joint);
        self.chain_ids[index] = target;

        let merged = self.chains.get_mut(&target).expect("no chain for id");
        merged.stones.push(joint);
        merged.liberties.remove(&joint);
        merged.liberties.extend(liberties.iter().cloned());
    }

    /// Rebuilds the set of suicide vertices for the player to move. A
    /// vertex is forbidden iff placing there yields a chain with no
    /// liberties while capturing nothing: no neighbour is empty, no
    /// adjacent opponent chain is in atari, and no adjacent chain of our
    /// own has a liberty to spare.
    fn update_forbidden(&mut self) {
        let mut forbidden = BTreeSet::new();

        for index in 0..self.stones.len() {
            if self.stones[index] != Color::None {
                continue;
            }

            let pos = self.decode(index);
            let mut is_forbidden = true;

            for other in self.neighbours(pos) {
                match self.stone_at(other) {
                    Color::None => {
                        is_forbidden = false;
                    },
                    color => {
                        let chain = self.chain_at(other).expect("no chain for occupied vertex");

                        if color == self.to_move {
                            if chain.num_liberties() >= 2 {
                                is_forbidden = false;
                            }
                        } else if chain.num_liberties() == 1 {
                            is_forbidden = false;
                        }
                    }
                }

                if !is_forbidden {
                    break;
                }
            }

            if is_forbidden {
                forbidden.insert(pos);
            }
        }

        self.forbidden = forbidden;
    }

    /// Recomputes the feature planes for the player to move.
    fn update_features(&mut self) {
        let width = self.width;
        let to_move = self.to_move;
        let features = &mut self.features;

        features.reset();

        for (index, &stone) in self.stones.iter().enumerate() {
            if stone == Color::None {
                continue;
            }

            let value = if stone == to_move { 1.0 } else { -1.0 };

            features.set(0, index as i16 % width, index as i16 / width, value);
        }

        for chain in self.chains.values() {
            let num_liberties = chain.num_liberties();

            if num_liberties > 3 {
                continue;
            }

            let plane_id = if chain.color() == to_move {
                num_liberties
            } else {
                num_liberties + 3
            };

            for &stone in chain.stones() {
                features.set(plane_id, stone.x(), stone.y(), 1.0);
            }
        }
    }

    /// Estimates the territory of each player by flood filling the empty
    /// regions and assigning each region touched by only one color to that
    /// color. Regions touched by both, or by neither, count as unknown.
    fn estimate_territory(&mut self) {
        let mut black = 0;
        let mut white = 0;

        for &stone in &self.stones {
            match stone {
                Color::Black => { black += 1 },
                Color::White => { white += 1 },
                Color::None => {}
            }
        }

        // too early in the game for the flood fill to say anything useful
        if black + white < 11 {
            self.approx_territory = [self.width * self.height - black - white, black, white];
            return;
        }

        let mut unknown = 0;
        let mut region_ids = vec! [0i16; self.stones.len()];
        let mut next_region_id = 3;
        let mut stack = Vec::new();

        for index in 0..self.stones.len() {
            if self.stones[index] != Color::None || region_ids[index] != 0 {
                continue;
            }

            let region_id = next_region_id;
            next_region_id += 1;

            let mut num_black = 0;
            let mut num_white = 0;
            let mut num_visited = 1;

            region_ids[index] = region_id;
            stack.clear();
            stack.push(self.decode(index));

            while let Some(pos) = stack.pop() {
                for other in self.neighbours(pos) {
                    let other_index = self.encode(other);

                    match self.stones[other_index] {
                        Color::Black => { num_black += 1 },
                        Color::White => { num_white += 1 },
                        Color::None => {
                            if region_ids[other_index] == 0 {
                                region_ids[other_index] = region_id;
                                stack.push(other);
                                num_visited += 1;
                            }
                        }
                    }
                }
            }

            if (num_black > 0) == (num_white > 0) {
                unknown += num_visited;
            } else if num_black > 0 {
                black += num_visited;
            } else {
                white += num_visited;
            }
        }

        self.approx_territory = [unknown, black, white];
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Current player: {}", self.to_move)?;
        if self.ko != Point::NONE {
            write!(f, ", Ko: {}", self.ko)?;
        }
        writeln!(f)?;

        let mut x_axis = String::from("    ");
        for x in 0..self.width {
            let skip = if x >= 8 { 1 } else { 0 };

            x_axis.push((b'A' + (x + skip) as u8) as char);
            x_axis.push(' ');
        }
        writeln!(f, "{}", x_axis)?;

        for y in (0..self.height).rev() {
            write!(f, "{:02}|", y + 1)?;
            for x in 0..self.width {
                let symbol = match self.stone_at(Point::new(x, y)) {
                    Color::None => " +",
                    Color::Black => " X",
                    Color::White => " O"
                };

                write!(f, "{}", symbol)?;
            }
            writeln!(f, "|{:02}", y + 1)?;
        }
        writeln!(f, "{}", x_axis)?;

        if !self.forbidden.is_empty() {
            write!(f, "Forbidden: ")?;
            for pos in &self.forbidden {
                write!(f, "{}, ", pos)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play_all(board: &mut Board, moves: &[(i16, i16)]) {
        for &(x, y) in moves {
            assert!(board.play(Point::new(x, y), false).is_some(), "illegal move ({}, {})", x, y);
        }
    }

    /// Every chain must know exactly the empty 4-neighbours of its stones
    /// as liberties, and every occupied vertex must belong to exactly one
    /// chain of its own color.
    fn assert_consistent(board: &Board) {
        for pos in board.vertices().collect::<Vec<_>>() {
            match board.stone_at(pos) {
                Color::None => {
                    assert!(board.chain_at(pos).is_none());
                },
                color => {
                    let chain = board.chain_at(pos).expect("occupied vertex without a chain");

                    assert_eq!(chain.color(), color);
                    assert!(chain.stones().contains(&pos));
                    assert!(chain.num_liberties() > 0);
                }
            }
        }

        let mut seen = BTreeSet::new();

        for pos in board.vertices().collect::<Vec<_>>() {
            if let Some(chain) = board.chain_at(pos) {
                if !seen.insert(chain.id()) {
                    continue;
                }

                let mut expected = BTreeSet::new();

                for &stone in chain.stones() {
                    for other in board.neighbours(stone) {
                        if board.stone_at(other) == Color::None {
                            expected.insert(other);
                        }
                    }
                }

                assert_eq!(chain.liberties(), &expected);
            }
        }
    }

    #[test]
    fn empty_board() {
        let board = Board::new(9, 9);

        assert_eq!(board.to_move(), Color::Black);
        assert_eq!(board.approx_points(), (81, 0, 0));
        assert_eq!(board.ko(), Point::NONE);
        assert!(board.is_legal(Point::new(4, 4)));
    }

    #[test]
    fn encode_decode_roundtrip() {
        let board = Board::new(9, 7);

        for index in 0..63 {
            assert_eq!(board.encode(board.decode(index)), index);
        }
    }

    #[test]
    fn liberty_counts_by_location() {
        let mut board = Board::new(9, 9);

        play_all(&mut board, &[(0, 0), (4, 4), (8, 0)]);

        assert_eq!(board.chain_at(Point::new(0, 0)).unwrap().num_liberties(), 2);
        assert_eq!(board.chain_at(Point::new(4, 4)).unwrap().num_liberties(), 4);
        assert_eq!(board.chain_at(Point::new(8, 0)).unwrap().num_liberties(), 2);

        // an edge stone
        board.play(Point::PASS, false).unwrap();
        play_all(&mut board, &[(4, 0)]);
        assert_eq!(board.chain_at(Point::new(4, 0)).unwrap().num_liberties(), 3);
        assert_consistent(&board);
    }

    #[test]
    fn merge_two_chains() {
        let mut board = Board::new(9, 9);

        // black bridges (2, 2) and (4, 2) by playing (3, 2)
        play_all(&mut board, &[(2, 2), (0, 8), (4, 2), (1, 8), (3, 2)]);

        let chain = board.chain_at(Point::new(3, 2)).unwrap();

        assert_eq!(chain.stones().len(), 3);
        assert_eq!(chain.num_liberties(), 8);
        assert_eq!(
            board.chain_at(Point::new(2, 2)).unwrap().id(),
            board.chain_at(Point::new(4, 2)).unwrap().id()
        );
        assert_consistent(&board);
    }

    #[test]
    fn capture_single_stone() {
        let mut board = Board::new(5, 5);

        // white (1, 1) is surrounded by black on all four sides
        play_all(&mut board, &[(1, 0), (1, 1), (0, 1), (4, 4), (2, 1)]);
        board.play(Point::PASS, false).unwrap();

        let captured = board.play(Point::new(1, 2), false).unwrap();

        assert_eq!(captured, vec! [Point::new(1, 1)]);
        assert_eq!(board.stone_at(Point::new(1, 1)), Color::None);
        assert_consistent(&board);
    }

    #[test]
    fn captured_vertex_becomes_liberty() {
        let mut board = Board::new(5, 5);

        play_all(&mut board, &[(1, 0), (1, 1), (0, 1), (4, 4), (2, 1)]);
        board.play(Point::PASS, false).unwrap();
        board.play(Point::new(1, 2), false).unwrap();

        // all four capturing chains regained the vertex as a liberty
        for &(x, y) in &[(1, 0), (0, 1), (2, 1), (1, 2)] {
            assert!(
                board.chain_at(Point::new(x, y)).unwrap()
                    .liberties().contains(&Point::new(1, 1))
            );
        }
    }

    #[test]
    fn illegal_moves_do_not_mutate() {
        let mut board = Board::new(5, 5);

        play_all(&mut board, &[(2, 2)]);

        let before = format!("{}", board);

        assert!(board.play(Point::new(2, 2), false).is_none());   // occupied
        assert!(board.play(Point::new(5, 2), false).is_none());   // out of bounds
        assert!(board.play(Point::new(-1, 0), false).is_none());  // out of bounds

        assert_eq!(format!("{}", board), before);
    }

    #[test]
    fn clone_is_independent() {
        let mut board = Board::new(5, 5);

        play_all(&mut board, &[(2, 2), (1, 1)]);

        let copy = board.clone();
        play_all(&mut board, &[(3, 3)]);

        assert_eq!(copy.stone_at(Point::new(3, 3)), Color::None);
        assert_eq!(board.stone_at(Point::new(3, 3)), Color::Black);
        assert_eq!(copy.to_move(), Color::Black);
        assert_eq!(board.to_move(), Color::White);
    }

    #[test]
    fn orig_plane_tracks_player_to_move() {
        let mut board = Board::new(5, 5);

        play_all(&mut board, &[(2, 2)]);

        // white to move, so the black stone shows as -1
        assert_eq!(board.features().plane(0)[12], -1.0);

        board.play(Point::PASS, false).unwrap();
        assert_eq!(board.features().plane(0)[12], 1.0);
    }

    #[test]
    fn liberty_planes() {
        let mut board = Board::new(5, 5);

        // white puts the black corner stone in atari; black to move
        play_all(&mut board, &[(0, 0), (1, 0)]);

        let features = board.features();

        // (0, 0) is our own stone with one liberty, (1, 0) an opponent
        // stone with two
        assert_eq!(features.plane(0)[0], 1.0);
        assert_eq!(features.plane(1)[0], 1.0);
        assert_eq!(features.plane(4)[0], 0.0);
        assert_eq!(features.plane(0)[1], -1.0);
        assert_eq!(features.plane(5)[1], 1.0);
        assert_eq!(features.plane(1)[1], 0.0);
    }

    #[test]
    fn enclosed_suicide_is_forbidden() {
        let mut board = Board::new(5, 5);

        // a white diamond around (1, 1), every white chain with plenty of
        // liberties; black may not play inside
        play_all(&mut board, &[(4, 4), (1, 0), (4, 3), (0, 1), (3, 4), (2, 1), (2, 4)]);
        board.play(Point::new(1, 2), false).unwrap();

        assert_eq!(board.to_move(), Color::Black);
        assert!(!board.is_legal(Point::new(1, 1)));
    }

    #[test]
    fn two_point_eye_is_not_forbidden() {
        let mut board = Board::new(5, 5);

        // black wall around the two-point eye (0, 0), (1, 0)
        play_all(&mut board, &[(2, 0), (4, 4)]);
        play_all(&mut board, &[(2, 1), (4, 3)]);
        play_all(&mut board, &[(1, 1), (3, 4)]);
        play_all(&mut board, &[(0, 1), (3, 3)]);

        assert_eq!(board.to_move(), Color::Black);
        assert!(board.is_legal(Point::new(0, 0)));
        assert!(board.is_legal(Point::new(1, 0)));
    }

    #[test]
    fn ko_is_detected_and_expires() {
        let mut board = Board::new(5, 5);

        // the classic ko shape around (1, 1) / (2, 1)
        play_all(&mut board, &[(1, 0), (2, 0)]);
        play_all(&mut board, &[(0, 1), (3, 1)]);
        play_all(&mut board, &[(1, 2), (2, 2)]);
        play_all(&mut board, &[(2, 1)]);

        // white recaptures at (1, 1), starting the ko
        let captured = board.play(Point::new(1, 1), false).unwrap();

        assert_eq!(captured, vec! [Point::new(2, 1)]);
        assert_eq!(board.ko(), Point::new(2, 1));
        assert!(!board.is_legal(Point::new(2, 1)));

        // a pass lifts the prohibition
        board.play(Point::PASS, false).unwrap();
        board.play(Point::PASS, false).unwrap();
        assert_eq!(board.ko(), Point::NONE);
        assert!(board.is_legal(Point::new(2, 1)));
    }

    #[test]
    fn territory_early_game() {
        let mut board = Board::new(9, 9);

        play_all(&mut board, &[(2, 2), (6, 6)]);
        board.play(Point::PASS, true).unwrap();

        assert_eq!(board.approx_points(), (79, 1, 1));
    }

    #[test]
    fn territory_flood_fill() {
        let mut board = Board::new(5, 5);

        // a black wall on column 2 against a white wall on column 3, plus
        // one extra black stone to get past the early-game shortcut
        play_all(&mut board, &[(2, 0), (3, 0)]);
        play_all(&mut board, &[(2, 1), (3, 1)]);
        play_all(&mut board, &[(2, 2), (3, 2)]);
        play_all(&mut board, &[(2, 3), (3, 3)]);
        play_all(&mut board, &[(2, 4), (3, 4)]);
        play_all(&mut board, &[(0, 0)]);
        board.play(Point::PASS, true).unwrap();

        let (unknown, black, white) = board.approx_points();

        // the left region touches only black, the right column only white
        assert_eq!(black, 6 + 9);
        assert_eq!(white, 5 + 5);
        assert_eq!(unknown, 0);
        assert_eq!(unknown + black + white, 25);
    }

    #[test]
    fn territory_components_sum() {
        let mut board = Board::new(5, 5);

        play_all(&mut board, &[
            (0, 0), (1, 0), (2, 0), (3, 0), (0, 1), (1, 1), (2, 1),
            (3, 1), (0, 2), (1, 2), (2, 2), (3, 2)
        ]);
        board.play(Point::PASS, true).unwrap();

        let (unknown, black, white) = board.approx_points();

        assert_eq!(unknown + black + white, 25);
    }

    #[test]
    fn resign_does_not_mutate() {
        let mut board = Board::new(5, 5);

        play_all(&mut board, &[(2, 2)]);
        assert_eq!(board.play(Point::RESIGN, false), Some(vec! []));
        assert_eq!(board.to_move(), Color::White);
        assert_eq!(board.stone_at(Point::new(2, 2)), Color::Black);
    }
}
