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

use std::env;
use std::str::FromStr;

/// Returns the value of the environment variable `name` parsed as a `T`, or
/// `default` if the variable is unset or cannot be parsed.
///
/// # Arguments
///
/// * `name` - the name of the environment variable
/// * `default` - the value to use when the variable is absent
///
fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name).ok()
        .and_then(|s| s.parse::<T>().ok())
        .unwrap_or(default)
}

/// Returns true if the environment variable `name` is set to `1` or `true`.
fn env_flag(name: &str, default: bool) -> bool {
    match env::var(name) {
        Ok(s) => {
            let s = s.trim().to_ascii_lowercase();

            s == "1" || s == "true" || s == "yes"
        },
        Err(_) => default
    }
}

lazy_static! {
    /// Whether to use the heuristic scorer instead of the model-backed one.
    pub static ref SIMPLE_SCORER: bool = env_flag("SIMPLE_SCORER", false);

    /// Whether to use the single-lookahead engine instead of the tree search.
    pub static ref SIMPLE_ENGINE: bool = env_flag("SIMPLE_ENGINE", true);

    /// The model to load behind the inference session, empty for none.
    pub static ref MODEL: String = env_or("MODEL", String::new());

    /// The name of the model's input layer.
    pub static ref INPUT_LAYER_NAME: String =
        env_or("INPUT_LAYER_NAME", "go_input_input".to_string());

    /// The name prefix of the model's output layers.
    pub static ref OUTPUT_LAYER_PREFIX: String =
        env_or("OUTPUT_LAYER_PREFIX", "go_output/0".to_string());

    /// The number of threads in each callback worker pool.
    pub static ref NUM_THREADS: usize = env_or("NUM_THREADS", 3);

    /// The number of inference tasks gathered into one batch.
    pub static ref BATCH_SIZE: usize = env_or("BATCH_SIZE", 128);

    /// How long a buffered inference task may wait before a forced flush.
    pub static ref MAX_QUEUE_DELAY_MS: u64 = env_or("MAX_QUEUE_DELAY_MS", 10);
}
