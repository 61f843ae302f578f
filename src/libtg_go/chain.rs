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

use crate::color::Color;
use crate::point::Point;

use std::collections::BTreeSet;

/// A maximal group of connected stones of one color, together with the set
/// of empty vertices adjacent to it.
///
/// Chains are owned by the board's chain table and referenced by id from
/// the per-vertex id grid; a chain record never outlives a capture of its
/// stones.
#[derive(Clone, Debug)]
pub struct Chain {
    color: Color,
    id: i16,
    pub(crate) stones: Vec<Point>,
    pub(crate) liberties: BTreeSet<Point>
}

impl Chain {
    pub(crate) fn new(color: Color, id: i16) -> Chain {
        Chain {
            color,
            id,
            stones: Vec::new(),
            liberties: BTreeSet::new()
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn id(&self) -> i16 {
        self.id
    }

    /// The stones of this chain, in insertion order.
    pub fn stones(&self) -> &[Point] {
        &self.stones
    }

    pub fn liberties(&self) -> &BTreeSet<Point> {
        &self.liberties
    }

    pub fn num_liberties(&self) -> usize {
        self.liberties.len()
    }

    /// The first liberty, which for a chain in atari is its only one.
    pub(crate) fn first_liberty(&self) -> Point {
        *self.liberties.iter().next().expect("chain has no liberties")
    }
}
