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

//! Shared fixtures for the integration tests.

use tg_go::sgf::sgf_to_board;
use tg_go::{Board, Color, Point};

/// A dense middle-game position:
///
/// ```text
///       A B C D E
///   05| X + O X +|05
///   04| O X X O X|04
///   03| + O + O +|03
///   02| X O X X O|02
///   01| + X O O +|01
///       A B C D E
/// ```
pub const FIVE_BY_FIVE: &str = "(\
    ;GM[1]FF[4]CA[UTF-8]AP[test]SZ[5]\
    ;AB[ba][ab][cb][db][bd][cd][ed][ae][de]\
    ;AW[ca][da][bb][eb][bc][dc][ad][dd][ce])";

/// A double-ko shape on an 11x11 board.
pub const ELEVEN_BY_ELEVEN_KO: &str = "(\
    ;GM[1]FF[4]CA[UTF-8]AP[test]SZ[11]\
    ;AB[ba][gb][ac][bc][cc][gc][cd][dd][ed][fd][ce]\
    ;AW[cb][fb][dc][ec][fc][hc][bd][gd][hd][be][fe][cf][df][gf])";

/// Loads the fixture and passes until black is to move, estimating
/// territory along the way.
pub fn board_with_black_to_move(sgf: &str) -> Board {
    let mut board = sgf_to_board(sgf).expect("fixture does not parse");

    board.play(Point::PASS, true).expect("pass is always legal");

    if board.to_move() != Color::Black {
        board.play(Point::PASS, true).expect("pass is always legal");
    }

    board
}
