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

//! The Go Text Protocol (version 2) front end: a line-oriented read-eval
//! loop where each request is `[id] command [args...]` and each response
//! is `=` or `?`, the echoed id, a payload, and a blank line.

use log::info;
use std::io::{BufRead, Write};

use crate::engine::Engine;
use tg_go::{Color, Point};

const KNOWN_COMMANDS: &[&str] = &[
    "boardsize",
    "clear_board",
    "final_score",
    "genmove",
    "known_command",
    "komi",
    "list_commands",
    "name",
    "play",
    "protocol_version",
    "quit",
    "version"
];

pub struct GtpServer {
    engine: Box<dyn Engine>
}

impl GtpServer {
    pub fn new(engine: Box<dyn Engine>) -> GtpServer {
        GtpServer { engine }
    }

    /// Runs the read-eval loop until `quit` or the end of the input.
    pub fn run(&mut self, input: &mut dyn BufRead, output: &mut dyn Write) -> std::io::Result<()> {
        let mut buf = String::new();

        loop {
            buf.clear();

            if input.read_line(&mut buf)? == 0 {
                return Ok(());
            }

            let line = buf.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, rest) = parse_id(line);
            let mut parts = rest.split_whitespace();
            let command = match parts.next() {
                Some(command) => command.to_lowercase(),
                None => continue
            };
            let args = parts.collect::<Vec<_>>();

            info!("parsed command: [{:?}] {} args={:?}", id, command, args);

            if command == "quit" {
                info!("bye");
                return Ok(());
            }

            let (success, payload) = self.execute(&command, &args);
            let prefix = if success { '=' } else { '?' };
            let id = id.map(|id| id.to_string()).unwrap_or_default();

            writeln!(output, "{}{} {}\n", prefix, id, payload)?;
            output.flush()?;
        }
    }

    /// Executes one command, returning whether it succeeded and the
    /// response payload.
    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "name" => (true, "Tengen".to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => (true, "2".to_string()),

            "final_score" => (true, "0".to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                match args.first() {
                    Some(name) => {
                        let known = KNOWN_COMMANDS.contains(&name.to_lowercase().as_str());

                        (true, known.to_string())
                    },
                    None => (false, "missing argument".to_string())
                }
            },

            "boardsize" => {
                match args.first().and_then(|arg| arg.parse::<i16>().ok()) {
                    Some(size) if size > 0 && size < 27 => {
                        self.engine.set_board_size(size);
                        (true, String::new())
                    },
                    _ => (false, "failed in parsing board size".to_string())
                }
            },

            "clear_board" => {
                self.engine.clear_board();
                (true, String::new())
            },

            "komi" => {
                match args.first().and_then(|arg| arg.parse::<f32>().ok()) {
                    Some(komi) => {
                        self.engine.set_komi(komi);
                        (true, String::new())
                    },
                    None => (false, "failed in parsing komi".to_string())
                }
            },

            "play" => {
                if args.len() != 2 {
                    return (false, "wrong number of arguments of play".to_string());
                }

                match (parse_color(args[0]), parse_vertex(args[1])) {
                    (Some(color), Some(pos)) => {
                        self.engine.play(color, pos);
                        (true, String::new())
                    },
                    _ => (false, "bad arguments for play".to_string())
                }
            },

            "genmove" => {
                match args.first().and_then(|arg| parse_color(arg)) {
                    Some(color) => (true, self.engine.gen_move(color).to_string()),
                    None => (false, "bad arguments for genmove".to_string())
                }
            },

            _ => (false, format!("unknown command: {}", command))
        }
    }
}

/// Splits an optional numeric request id off the front of the line.
fn parse_id(line: &str) -> (Option<u32>, &str) {
    let end = line.find(|c: char| !c.is_ascii_digit()).unwrap_or(line.len());

    match line[..end].parse::<u32>() {
        Ok(id) => (Some(id), line[end..].trim_start()),
        Err(_) => (None, line)
    }
}

fn parse_color(arg: &str) -> Option<Color> {
    match arg.to_lowercase().as_str() {
        "b" | "black" => Some(Color::Black),
        "w" | "white" => Some(Color::White),
        _ => None
    }
}

/// Parses letter-column notation such as `q16`, where the letter `I` is
/// skipped, or the words `pass` / `resign`.
fn parse_vertex(arg: &str) -> Option<Point> {
    let arg = arg.to_lowercase();

    if arg == "pass" {
        return Some(Point::PASS);
    }
    if arg == "resign" {
        return Some(Point::RESIGN);
    }

    let mut chars = arg.chars();
    let letter = chars.next()?;

    if !letter.is_ascii_lowercase() || letter == 'i' {
        return None;
    }

    let skip = if letter > 'i' { 1 } else { 0 };
    let x = letter as i16 - 'a' as i16 - skip;
    let row = chars.as_str().parse::<i16>().ok()?;

    if row < 1 {
        return None;
    }

    Some(Point::new(x, row - 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::SimpleEngine;
    use tg_mcts::SimpleScorer;

    fn test_server() -> GtpServer {
        GtpServer::new(Box::new(SimpleEngine::with_scorer(Box::new(SimpleScorer::new()))))
    }

    #[test]
    fn parse_id_with_id() {
        assert_eq!(parse_id("123 name"), (Some(123), "name"));
    }

    #[test]
    fn parse_id_without_id() {
        assert_eq!(parse_id("name"), (None, "name"));
    }

    #[test]
    fn parse_vertex_skips_i() {
        assert_eq!(parse_vertex("a1"), Some(Point::new(0, 0)));
        assert_eq!(parse_vertex("h4"), Some(Point::new(7, 3)));
        assert_eq!(parse_vertex("j4"), Some(Point::new(8, 3)));
        assert_eq!(parse_vertex("T19"), Some(Point::new(18, 18)));
        assert_eq!(parse_vertex("i5"), None);
        assert_eq!(parse_vertex("q0"), None);
        assert_eq!(parse_vertex("pass"), Some(Point::PASS));
    }

    #[test]
    fn vertex_roundtrip() {
        for x in 0..19 {
            for y in 0..19 {
                let pos = Point::new(x, y);

                assert_eq!(parse_vertex(&pos.to_string()), Some(pos));
            }
        }
    }

    #[test]
    fn fixed_responses() {
        let mut server = test_server();

        assert_eq!(server.execute("name", &[]), (true, "Tengen".to_string()));
        assert_eq!(server.execute("protocol_version", &[]), (true, "2".to_string()));
        assert_eq!(server.execute("final_score", &[]), (true, "0".to_string()));
    }

    #[test]
    fn known_command() {
        let mut server = test_server();

        assert_eq!(server.execute("known_command", &["genmove"]), (true, "true".to_string()));
        assert_eq!(server.execute("known_command", &["frobnicate"]), (true, "false".to_string()));
    }

    #[test]
    fn unknown_command_fails() {
        let mut server = test_server();
        let (success, _) = server.execute("frobnicate", &[]);

        assert!(!success);
    }

    #[test]
    fn play_and_genmove() {
        let mut server = test_server();

        assert!(server.execute("boardsize", &["5"]).0);
        assert!(server.execute("play", &["b", "c3"]).0);

        let (success, payload) = server.execute("genmove", &["w"]);

        assert!(success);
        assert!(parse_vertex(&payload).is_some(), "unexpected genmove reply {:?}", payload);
    }

    #[test]
    fn bad_arguments_fail() {
        let mut server = test_server();

        assert!(!server.execute("boardsize", &["nineteen"]).0);
        assert!(!server.execute("play", &["b"]).0);
        assert!(!server.execute("play", &["purple", "c3"]).0);
        assert!(!server.execute("genmove", &[]).0);
    }

    #[test]
    fn run_loop_responds_and_quits() {
        let mut server = test_server();
        let mut input = std::io::Cursor::new(b"1 name\nquit\n".to_vec());
        let mut output = Vec::new();

        server.run(&mut input, &mut output).unwrap();

        let response = String::from_utf8(output).unwrap();

        assert_eq!(response, "=1 Tengen\n\n");
    }
}
