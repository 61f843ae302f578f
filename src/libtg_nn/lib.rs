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

#[macro_use] extern crate lazy_static;

/* -------- Modules -------- */

mod batcher;
mod session;

/* -------- Exports -------- */

pub use self::batcher::{InferenceCallback, InferenceClient, ModelOutput};
pub use self::session::{from_config, ConstSession, RandomSession, Session};

/* -------- Error -------- */

use std::fmt;

/// The ways the inference stack can fail. Everything here is either fatal
/// at construction (a model that cannot be loaded) or soft per request
/// (a batch that fails to run).
#[derive(Clone, Debug, PartialEq)]
pub enum Error {
    /// No model was configured.
    MissingModel,

    /// A model was configured but is not in a loadable format.
    UnsupportedModel(String),

    /// The session failed while running a batch.
    SessionFailed(String)
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::MissingModel => write!(f, "no model has been configured"),
            Error::UnsupportedModel(ref name) => write!(f, "cannot load model from {:?}", name),
            Error::SessionFailed(ref reason) => write!(f, "inference failed: {}", reason)
        }
    }
}

impl std::error::Error for Error {}
