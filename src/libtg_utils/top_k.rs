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

use ordered_float::OrderedFloat;
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

struct Entry<T> {
    score: OrderedFloat<f32>,
    seq: usize,
    value: T
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.score == other.score && self.seq == other.seq
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score.cmp(&other.score)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

/// Keeps the `k` highest-scoring values seen so far, using a bounded
/// min-heap so that each insert is `O(log k)`.
pub struct TopK<T> {
    capacity: usize,
    seq: usize,
    heap: BinaryHeap<Reverse<Entry<T>>>
}

impl<T> TopK<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            seq: 0,
            heap: BinaryHeap::with_capacity(capacity + 1)
        }
    }

    /// Offers a value; it is kept only if it scores among the `k` best.
    pub fn insert(&mut self, score: f32, value: T) {
        if self.capacity == 0 {
            return;
        }

        let entry = Entry { score: OrderedFloat(score), seq: self.seq, value };
        self.seq += 1;

        if self.heap.len() < self.capacity {
            self.heap.push(Reverse(entry));
        } else if self.heap.peek().map(|Reverse(e)| entry.score > e.score).unwrap_or(false) {
            self.heap.pop();
            self.heap.push(Reverse(entry));
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Consumes the collector, returning the kept values in descending
    /// score order.
    pub fn into_vec(self) -> Vec<(T, f32)> {
        self.heap.into_sorted_vec()
            .into_iter()
            .map(|Reverse(e)| (e.value, e.score.0))
            .collect()
    }
}
