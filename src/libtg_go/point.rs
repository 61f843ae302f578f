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

use std::fmt;

/// A board coordinate, or one of the three sentinels `NONE`, `PASS`, and
/// `RESIGN` (all of which lie outside any board).
///
/// The display format is the standard letter-column notation where the
/// letter `I` is skipped, with 1-based rows counted from the bottom, so
/// `(0, 0)` is `A1` and `(18, 18)` is `T19`.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Point {
    x: i16,
    y: i16
}

impl Point {
    /// Not a valid position.
    pub const NONE: Point = Point { x: -1, y: -1 };

    /// The player passes.
    pub const PASS: Point = Point { x: -2, y: -2 };

    /// The player resigns.
    pub const RESIGN: Point = Point { x: -3, y: -3 };

    pub const fn new(x: i16, y: i16) -> Point {
        Point { x, y }
    }

    pub fn x(self) -> i16 {
        self.x
    }

    pub fn y(self) -> i16 {
        self.y
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if *self == Point::NONE {
            write!(f, "unset")
        } else if *self == Point::PASS {
            write!(f, "pass")
        } else if *self == Point::RESIGN {
            write!(f, "resign")
        } else {
            let skip = if self.x >= 8 { 1 } else { 0 };
            let label = (b'A' + (self.x + skip) as u8) as char;

            write!(f, "{}{}", label, self.y + 1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinels_are_distinct() {
        assert_ne!(Point::NONE, Point::PASS);
        assert_ne!(Point::PASS, Point::RESIGN);
        assert_ne!(Point::RESIGN, Point::NONE);
    }

    #[test]
    fn to_string_skips_i() {
        assert_eq!(Point::new(0, 0).to_string(), "A1");
        assert_eq!(Point::new(7, 3).to_string(), "H4");
        assert_eq!(Point::new(8, 3).to_string(), "J4");
        assert_eq!(Point::new(18, 18).to_string(), "T19");
    }

    #[test]
    fn to_string_sentinels() {
        assert_eq!(Point::PASS.to_string(), "pass");
        assert_eq!(Point::RESIGN.to_string(), "resign");
        assert_eq!(Point::NONE.to_string(), "unset");
    }
}
