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

mod engine;
mod gtp;

use anyhow::{Context, Result};
use flexi_logger::{AdaptiveFormat, Logger, WriteMode};
use log::info;
use std::io;

use crate::engine::{Engine, MctsEngine, SimpleEngine};
use crate::gtp::GtpServer;
use tg_utils::config;

fn main() -> Result<()> {
    // stdout is the protocol wire, so all logging goes to stderr
    let _logger = Logger::try_with_env_or_str("info")
        .context("could not configure the logger")?
        .write_mode(WriteMode::BufferAndFlush)
        .log_to_stderr()
        .adaptive_format_for_stderr(AdaptiveFormat::Default)
        .start()
        .context("could not start the logger")?;

    let engine: Box<dyn Engine> = if *config::SIMPLE_ENGINE {
        info!("starting with the single lookahead engine");
        Box::new(SimpleEngine::new()?)
    } else {
        info!("starting with the tree search engine");
        Box::new(MctsEngine::new()?)
    };

    let stdin = io::stdin();
    let stdout = io::stdout();

    GtpServer::new(engine)
        .run(&mut stdin.lock(), &mut stdout.lock())
        .context("i/o failure on the control stream")
}
