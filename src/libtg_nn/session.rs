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

use crate::Error;
use log::warn;
use rand::{thread_rng, Rng};
use tg_go::NUM_PLANES;
use tg_utils::config;

/// A loaded model. The session is shared read-only across batches, so
/// `run` must be safe to call from multiple threads at once.
///
/// The input is `batch_size` feature tensors stacked in NHWC order. The
/// output is one row per input for each of the two output heads: the
/// policy head (`width * height` values) and the value head (one value
/// in `[0, 1]`).
pub trait Session: Send + Sync {
    fn run(&self, features: &[f32], batch_size: usize) -> Result<Vec<Vec<Vec<f32>>>, Error>;
}

/// A session producing random but well-formed outputs, behaving like an
/// untrained network. Useful for exercising the full inference path
/// without a model file.
#[derive(Clone, Default)]
pub struct RandomSession;

impl Session for RandomSession {
    fn run(&self, features: &[f32], batch_size: usize) -> Result<Vec<Vec<Vec<f32>>>, Error> {
        assert!(batch_size > 0);
        debug_assert_eq!(features.len() % (batch_size * NUM_PLANES), 0);

        let num_vertices = features.len() / (batch_size * NUM_PLANES);
        let mut rng = thread_rng();

        let policy = (0..batch_size).map(|_| {
            let mut row = (0..num_vertices).map(|_| rng.gen::<f32>()).collect::<Vec<_>>();
            let total = row.iter().sum::<f32>();

            for value in row.iter_mut() {
                *value /= total;
            }

            row
        }).collect();
        let value = (0..batch_size).map(|_| vec! [rng.gen::<f32>()]).collect();

        Ok(vec! [policy, value])
    }
}

/// A session that answers every input with the same policy and value
/// rows. Only useful as a deterministic stand-in in tests.
#[derive(Clone)]
pub struct ConstSession {
    policy: Vec<f32>,
    value: f32
}

impl ConstSession {
    pub fn new(policy: Vec<f32>, value: f32) -> ConstSession {
        ConstSession { policy, value }
    }
}

impl Session for ConstSession {
    fn run(&self, _features: &[f32], batch_size: usize) -> Result<Vec<Vec<Vec<f32>>>, Error> {
        let policy = (0..batch_size).map(|_| self.policy.clone()).collect();
        let value = (0..batch_size).map(|_| vec! [self.value]).collect();

        Ok(vec! [policy, value])
    }
}

/// Creates the session selected by the `MODEL` flag. An empty flag or an
/// unloadable model is fatal here, before any inference is attempted.
pub fn from_config() -> Result<Box<dyn Session>, Error> {
    match config::MODEL.as_str() {
        "" => Err(Error::MissingModel),
        "random" => {
            warn!("using the random session, generated moves will be arbitrary");
            Ok(Box::new(RandomSession::default()))
        },
        other => {
            warn!(
                "cannot load model from {:?} (input layer {:?}, output prefix {:?})",
                other,
                config::INPUT_LAYER_NAME.as_str(),
                config::OUTPUT_LAYER_PREFIX.as_str()
            );

            Err(Error::UnsupportedModel(other.to_string()))
        }
    }
}
