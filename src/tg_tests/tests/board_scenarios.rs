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

use std::collections::BTreeSet;

use tg_go::sgf::sgf_to_board;
use tg_go::{Board, Color, Point};
use tg_tests::{board_with_black_to_move, ELEVEN_BY_ELEVEN_KO, FIVE_BY_FIVE};

fn sorted(points: Vec<Point>) -> BTreeSet<Point> {
    points.into_iter().collect()
}

fn points(raw: &[(i16, i16)]) -> BTreeSet<Point> {
    raw.iter().map(|&(x, y)| Point::new(x, y)).collect()
}

#[test]
fn fixture_territory() {
    let board = board_with_black_to_move(FIVE_BY_FIVE);

    assert_eq!(board.to_move(), Color::Black);
    assert_eq!(board.approx_points(), (4, 11, 10));
}

#[test]
fn capture_two_stones_then_one_back() {
    let mut board = board_with_black_to_move(FIVE_BY_FIVE);

    // black takes the two white stones in the lower right corner
    let captured = board.play(Point::new(4, 0), false).unwrap();
    assert_eq!(sorted(captured), points(&[(2, 0), (3, 0)]));

    // and white takes one back
    assert!(board.is_legal(Point::new(3, 0)));

    let captured = board.play(Point::new(3, 0), false).unwrap();
    assert_eq!(sorted(captured), points(&[(4, 0)]));
}

#[test]
fn suicide_is_rejected_and_the_group_dies() {
    let mut board = board_with_black_to_move(FIVE_BY_FIVE);

    let captured = board.play(Point::new(2, 2), false).unwrap();
    assert!(captured.is_empty());

    // filling the last shared liberty would be suicide for white
    assert!(!board.is_legal(Point::new(0, 2)));

    // instead white captures the whole center group plus the corner stone
    let captured = board.play(Point::new(1, 4), false).unwrap();
    assert_eq!(
        sorted(captured),
        points(&[(0, 4), (1, 3), (2, 3), (2, 2), (2, 1), (3, 1)])
    );
}

#[test]
fn single_stone_recapture_is_a_ko() {
    let mut board = board_with_black_to_move(FIVE_BY_FIVE);

    let captured = board.play(Point::new(2, 2), false).unwrap();
    assert!(captured.is_empty());

    let captured = board.play(Point::new(4, 4), false).unwrap();
    assert_eq!(sorted(captured), points(&[(3, 4)]));

    // the recapture is a ko for black
    assert_eq!(board.ko(), Point::new(3, 4));
    assert!(!board.is_legal(Point::new(3, 4)));

    // and these two are suicide for black
    assert!(!board.is_legal(Point::new(1, 4)));
    assert!(!board.is_legal(Point::new(4, 2)));
}

#[test]
fn ko_expires_after_a_pass() {
    let mut board = board_with_black_to_move(FIVE_BY_FIVE);

    board.play(Point::new(2, 2), false).unwrap();
    board.play(Point::new(4, 4), false).unwrap();
    assert!(!board.is_legal(Point::new(3, 4)));

    board.play(Point::PASS, false).unwrap();
    board.play(Point::PASS, false).unwrap();

    assert_eq!(board.ko(), Point::NONE);
    assert!(board.is_legal(Point::new(3, 4)));
}

#[test]
fn new_chain_with_no_initial_liberties() {
    let mut board = board_with_black_to_move(FIVE_BY_FIVE);

    assert!(board.play(Point::new(4, 2), false).unwrap().is_empty());
    assert!(board.play(Point::new(0, 2), false).unwrap().is_empty());

    // the new black stone would be a suicide if it did not capture; the
    // captured vertices then become its liberties
    let captured = board.play(Point::new(4, 0), false).unwrap();
    assert_eq!(sorted(captured), points(&[(2, 0), (3, 0), (4, 1)]));

    let chain = board.chain_at(Point::new(4, 0)).unwrap();
    assert!(chain.num_liberties() > 0);
}

#[test]
fn double_ko_shape() {
    let mut board = board_with_black_to_move(ELEVEN_BY_ELEVEN_KO);

    assert!(board.play(Point::new(3, 1), false).unwrap().is_empty());
    assert!(board.play(Point::new(3, 0), false).unwrap().is_empty());
    assert!(board.play(Point::new(4, 0), false).unwrap().is_empty());

    let captured = board.play(Point::new(4, 1), false).unwrap();
    assert_eq!(sorted(captured), points(&[(3, 1)]));

    assert!(board.play(Point::new(2, 0), false).unwrap().is_empty());

    let captured = board.play(Point::new(5, 0), false).unwrap();
    assert_eq!(sorted(captured), points(&[(4, 0)]));

    assert!(board.play(Point::new(1, 1), false).unwrap().is_empty());
    assert!(board.play(Point::new(7, 1), false).unwrap().is_empty());

    // the first ko
    let captured = board.play(Point::new(3, 1), false).unwrap();
    assert_eq!(sorted(captured), points(&[(2, 1)]));
    assert!(!board.is_legal(Point::new(2, 1)));

    let captured = board.play(Point::new(6, 0), false).unwrap();
    assert_eq!(sorted(captured), points(&[(6, 1), (6, 2)]));

    // the second ko
    let captured = board.play(Point::new(4, 0), false).unwrap();
    assert_eq!(sorted(captured), points(&[(3, 0)]));
    assert!(!board.is_legal(Point::new(3, 0)));
}

#[test]
fn forbidden_corner() {
    let mut board = sgf_to_board("(\
        ;GM[1]FF[4]CA[UTF-8]AP[test]SZ[5]\
        ;AB[ca][cb][cc][bc]\
        ;AW[ba][bb][ab])").unwrap();

    if board.to_move() != Color::Black {
        board.play(Point::PASS, false).unwrap();
    }

    board.play(Point::new(0, 2), false).unwrap();

    // the white corner group is down to one liberty which does not help it
    assert!(!board.is_legal(Point::new(0, 0)));
}

#[test]
fn forbidden_set_changes_only_at_the_end() {
    let mut board = Board::new(9, 9);

    let moves = [
        (2, 0), (1, 0), (3, 0), (2, 1)
    ];
    for &(x, y) in moves.iter() {
        board.play(Point::new(x, y), false).unwrap();
    }

    board.play(Point::new(8, 8), false).unwrap();  // black filler move
    board.play(Point::new(3, 1), false).unwrap();
    board.play(Point::new(5, 0), false).unwrap();
    board.play(Point::new(5, 1), false).unwrap();
    board.play(Point::new(6, 0), false).unwrap();
    board.play(Point::new(6, 1), false).unwrap();

    assert_eq!(board.to_move(), Color::Black);
    assert!(board.is_legal(Point::new(4, 0)));

    board.play(Point::new(8, 7), false).unwrap();  // black filler move
    board.play(Point::new(7, 0), false).unwrap();

    assert_eq!(board.to_move(), Color::Black);
    assert!(board.is_legal(Point::new(4, 0)));

    board.play(Point::new(7, 8), false).unwrap();  // black filler move
    board.play(Point::new(4, 1), false).unwrap();

    // only now is the gap a suicide for black
    assert_eq!(board.to_move(), Color::Black);
    assert!(!board.is_legal(Point::new(4, 0)));
}

#[test]
fn replaying_the_same_moves_gives_the_same_state() {
    let moves = [
        (2, 2), (6, 6), (2, 6), (6, 2), (4, 4), (2, 4), (4, 2), (4, 6), (6, 4)
    ];

    let mut a = Board::new(9, 9);
    let mut b = Board::new(9, 9);

    for &(x, y) in moves.iter() {
        a.play(Point::new(x, y), true).unwrap();
        b.play(Point::new(x, y), true).unwrap();
    }

    assert_eq!(a.approx_points(), b.approx_points());

    for pos in a.vertices().collect::<Vec<_>>() {
        assert_eq!(a.stone_at(pos), b.stone_at(pos));
    }
    for plane_id in 0..a.features().num_planes() {
        assert_eq!(a.features().plane(plane_id), b.features().plane(plane_id));
    }
}

#[test]
fn stone_counts_match_the_grid() {
    let mut board = board_with_black_to_move(FIVE_BY_FIVE);

    board.play(Point::new(2, 2), false).unwrap();
    board.play(Point::new(4, 4), false).unwrap();

    let occupied = board.vertices()
        .filter(|&pos| board.stone_at(pos) != Color::None)
        .count();
    let in_chains = {
        let mut seen = BTreeSet::new();
        let mut total = 0;

        for pos in board.vertices().collect::<Vec<_>>() {
            if let Some(chain) = board.chain_at(pos) {
                if seen.insert(chain.id()) {
                    total += chain.stones().len();
                }
            }
        }

        total
    };

    assert_eq!(occupied, in_chains);
    assert_eq!(occupied, 18 + 2 - 1);  // one white stone was taken by the ko
}
