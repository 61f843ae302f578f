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

/// The number of feature planes the board maintains.
pub const NUM_PLANES: usize = 7;

static PLANE_NAMES: [&str; NUM_PLANES] = [
    "orig", "b1", "b2", "b3", "w1", "w2", "w3"
];

/// The feature planes for the player whose turn it is to move:
///
///  0. `orig` — `+1` on the player's own stones, `-1` on the opponent's.
///  1. - 3. `b1`, `b2`, `b3` — stones of own chains with 1, 2 or 3 liberties.
///  4. - 6. `w1`, `w2`, `w3` — the same for opponent chains.
///
/// Chains with four or more liberties are not encoded. Every plane is
/// `width * height` values in row-major order, index `y * width + x`.
#[derive(Clone, Debug)]
pub struct FeatureSet {
    width: i16,
    height: i16,
    planes: Vec<Vec<f32>>
}

impl FeatureSet {
    pub fn new(width: i16, height: i16) -> FeatureSet {
        let len = (width as usize) * (height as usize);

        FeatureSet {
            width,
            height,
            planes: vec! [vec! [0.0; len]; NUM_PLANES]
        }
    }

    pub fn width(&self) -> i16 {
        self.width
    }

    pub fn height(&self) -> i16 {
        self.height
    }

    pub fn num_planes(&self) -> usize {
        self.planes.len()
    }

    pub fn plane(&self, plane_id: usize) -> &[f32] {
        &self.planes[plane_id]
    }

    /// The name of the given plane, used as the key when feature sets are
    /// serialized into training examples.
    pub fn plane_name(plane_id: usize) -> &'static str {
        PLANE_NAMES[plane_id]
    }

    /// Sets the value at `(x, y)` of the given plane.
    pub fn set(&mut self, plane_id: usize, x: i16, y: i16, value: f32) {
        let index = (y * self.width + x) as usize;

        self.planes[plane_id][index] = value;
    }

    /// Resets all values to zero.
    pub fn reset(&mut self) {
        for plane in self.planes.iter_mut() {
            for value in plane.iter_mut() {
                *value = 0.0;
            }
        }
    }
}

/// Flattens a batch of feature sets into a single dense NHWC tensor, the
/// input layout the inference session expects. All feature sets must share
/// the same dimensions.
///
/// # Arguments
///
/// * `batch` - the feature sets to stack
///
pub fn batch_to_nhwc(batch: &[&FeatureSet]) -> Vec<f32> {
    assert!(!batch.is_empty());

    let width = batch[0].width() as usize;
    let height = batch[0].height() as usize;
    let channels = batch[0].num_planes();
    let mut out = vec! [0.0; batch.len() * height * width * channels];

    for (idx, features) in batch.iter().enumerate() {
        assert_eq!(features.width() as usize, width);
        assert_eq!(features.height() as usize, height);
        assert_eq!(features.num_planes(), channels);

        for pid in 0..channels {
            let plane = features.plane(pid);

            for y in 0..height {
                for x in 0..width {
                    out[((idx * height + y) * width + x) * channels + pid] =
                        plane[y * width + x];
                }
            }
        }
    }

    out
}
