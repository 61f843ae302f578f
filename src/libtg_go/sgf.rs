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

//! A small SGF reader that covers what game replay needs: the board size,
//! pre-seeded stones, the move sequence, and the final result. Anything
//! else in the record is ignored.

use crate::board::Board;
use crate::color::Color;
use crate::point::Point;

use log::warn;
use regex::Regex;
use std::fmt;

lazy_static! {
    static ref PROPERTY: Regex =
        Regex::new(r"([A-Z]{1,2})((?:\s*\[[^\]]*\])+)").expect("invalid regex");
    static ref VALUE: Regex =
        Regex::new(r"\[([^\]]*)\]").expect("invalid regex");
}

/// One move of a game record.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GameMove {
    pub color: Color,
    pub is_pass: bool,
    pub point: Point
}

/// The parts of an SGF record the engine consumes: the board size, the
/// pre-seeded stones of both players, the move sequence, and the numeric
/// result (positive when black won).
#[derive(Clone, Debug)]
pub struct GameRecord {
    pub width: i16,
    pub height: i16,
    pub black_stones: Vec<Point>,
    pub white_stones: Vec<Point>,
    pub moves: Vec<GameMove>,
    pub result: f32
}

#[derive(Debug, PartialEq)]
pub enum SgfError {
    BadBoardSize,
    IllegalMove(usize, Point),
    IllegalPreset(Point),
    CapturedDuringPreset(Point)
}

impl fmt::Display for SgfError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            SgfError::BadBoardSize => write!(f, "bad or missing board size"),
            SgfError::IllegalMove(step, pos) => write!(f, "illegal move #{} at {}", step, pos),
            SgfError::IllegalPreset(pos) => write!(f, "illegal pre-seeded stone at {}", pos),
            SgfError::CapturedDuringPreset(pos) => write!(f, "pre-seeded stone at {} captured something", pos)
        }
    }
}

impl std::error::Error for SgfError {}

fn parse_coordinate(value: &str) -> Option<Point> {
    let bytes = value.as_bytes();

    if bytes.len() != 2 {
        return None;
    }
    if !bytes[0].is_ascii_lowercase() || !bytes[1].is_ascii_lowercase() {
        return None;
    }

    Some(Point::new((bytes[0] - b'a') as i16, (bytes[1] - b'a') as i16))
}

fn parse_result(value: &str) -> f32 {
    let sign = if value.starts_with('B') {
        1.0
    } else if value.starts_with('W') {
        -1.0
    } else {
        return 0.0;
    };
    let margin = value[1..].trim_start_matches('+');

    sign * margin.parse::<f32>().unwrap_or(1.0)
}

/// Parses an SGF record. Unknown properties are skipped, so this accepts
/// any well-formed record that contains a usable `SZ`.
pub fn parse(sgf: &str) -> Result<GameRecord, SgfError> {
    let mut record = GameRecord {
        width: 0,
        height: 0,
        black_stones: vec! [],
        white_stones: vec! [],
        moves: vec! [],
        result: 0.0
    };

    for capture in PROPERTY.captures_iter(sgf) {
        let name = capture.get(1).map(|m| m.as_str()).unwrap_or("");
        let values = capture.get(2).map(|m| m.as_str()).unwrap_or("");
        let mut values = VALUE.captures_iter(values)
            .filter_map(|v| v.get(1))
            .map(|v| v.as_str());

        match name {
            "SZ" => {
                let value = values.next().unwrap_or("");
                let mut parts = value.splitn(2, ':');
                let width = parts.next().and_then(|s| s.parse::<i16>().ok());
                let height = parts.next().and_then(|s| s.parse::<i16>().ok());

                record.width = width.unwrap_or(0);
                record.height = height.unwrap_or(record.width);
            },
            "AB" | "AW" => {
                let stones = values.filter_map(parse_coordinate);

                if name == "AB" {
                    record.black_stones.extend(stones);
                } else {
                    record.white_stones.extend(stones);
                }
            },
            "B" | "W" => {
                let color = if name == "B" { Color::Black } else { Color::White };
                let value = values.next().unwrap_or("");

                match parse_coordinate(value) {
                    Some(point) => {
                        record.moves.push(GameMove { color, is_pass: false, point });
                    },
                    None => {
                        record.moves.push(GameMove { color, is_pass: true, point: Point::PASS });
                    }
                }
            },
            "RE" => {
                record.result = parse_result(values.next().unwrap_or(""));
            },
            _ => { /* ignored */ }
        }
    }

    if record.width <= 0 || record.width >= 27 || record.height <= 0 || record.height >= 27 {
        return Err(SgfError::BadBoardSize);
    }

    Ok(record)
}

/// Places pre-seeded stones for one color, keeping that color to move by
/// interleaving passes. A pre-seeded stone that captures something means
/// the record is broken.
fn preset_stones(board: &mut Board, color: Color, stones: &[Point]) -> Result<(), SgfError> {
    if stones.is_empty() {
        return Ok(());
    }
    if board.to_move() != color {
        let _ = board.play(Point::PASS, false);
    }

    for &pos in stones {
        match board.play(pos, false) {
            Some(ref captured) if captured.is_empty() => {
                let _ = board.play(Point::PASS, false);
            },
            Some(_) => {
                warn!("pre-seeded stone at {} captured something", pos);
                return Err(SgfError::CapturedDuringPreset(pos));
            },
            None => {
                warn!("pre-seeded stone at {} is not playable", pos);
                return Err(SgfError::IllegalPreset(pos));
            }
        }
    }

    Ok(())
}

/// The move a record entry stands for. Some records encode a pass as a
/// coordinate just off the board (`tt` on boards up to 19x19), so any
/// out-of-bounds coordinate is read as a pass.
fn move_of(record: &GameRecord, m: &GameMove) -> Point {
    if m.is_pass || m.point.x() >= record.width || m.point.y() >= record.height {
        Point::PASS
    } else {
        m.point
    }
}

/// One step of a replayed game, observed just before `next_move` is
/// applied to the board.
pub struct ReplayStep<'a> {
    pub board: &'a Board,
    pub num_steps: usize,
    pub next_move: Point,
    pub game_result: f32
}

/// Replays the record, invoking `on_step` before every move, and returns
/// the final board. A pass is inserted whenever the recorded color is not
/// the player to move, as happens after handicap presets.
pub fn replay_game<F>(sgf: &str, mut on_step: F) -> Result<Board, SgfError>
    where F: FnMut(&ReplayStep)
{
    let record = parse(sgf)?;
    let mut board = Board::new(record.width, record.height);

    preset_stones(&mut board, Color::Black, &record.black_stones)?;
    preset_stones(&mut board, Color::White, &record.white_stones)?;

    let mut num_steps = 0;

    for m in &record.moves {
        if m.color != board.to_move() {
            let _ = board.play(Point::PASS, false);
        }

        let next_move = move_of(&record, m);
        num_steps += 1;

        on_step(&ReplayStep {
            board: &board,
            num_steps,
            next_move,
            game_result: record.result
        });

        if board.play(next_move, false).is_none() {
            warn!("illegal move #{} at {}", num_steps, next_move);
            return Err(SgfError::IllegalMove(num_steps, next_move));
        }
    }

    Ok(board)
}

/// Loads a game record into a board.
pub fn sgf_to_board(sgf: &str) -> Result<Board, SgfError> {
    replay_game(sgf, |_| {})
}

/// Replays the record and returns `Σ step · |captured stones|`, a cheap
/// signature of the capture history that regression tests can pin.
pub fn replay_signature(sgf: &str) -> Result<usize, SgfError> {
    let record = parse(sgf)?;
    let mut board = Board::new(record.width, record.height);

    preset_stones(&mut board, Color::Black, &record.black_stones)?;
    preset_stones(&mut board, Color::White, &record.white_stones)?;

    let mut signature = 0;
    let mut num_steps = 1;

    for m in &record.moves {
        if m.color != board.to_move() {
            let _ = board.play(Point::PASS, false);
        }

        let mv = move_of(&record, m);
        let captured = board.play(mv, false)
            .ok_or(SgfError::IllegalMove(num_steps, mv))?;

        signature += num_steps * captured.len();
        num_steps += 1;
    }

    Ok(signature)
}
