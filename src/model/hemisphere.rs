//! Hemisphere labels and the intra/inter pair grouping.

use serde::{Deserialize, Serialize};

/// Which hemisphere a node belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hemisphere {
    Left,
    Right,
}

impl Hemisphere {
    /// `true` maps to the right hemisphere, `false` to the left.
    pub fn from_bool(right: bool) -> Self {
        if right {
            Hemisphere::Right
        } else {
            Hemisphere::Left
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Hemisphere::Left => "left",
            Hemisphere::Right => "right",
        }
    }
}

impl std::fmt::Display for Hemisphere {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Class of a node pair: both endpoints in one hemisphere, or one in each.
///
/// Thresholding runs once per group, so the two variants are iterated
/// explicitly via [`HemisphereGroup::ALL`] instead of by position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HemisphereGroup {
    Intra,
    Inter,
}

impl HemisphereGroup {
    pub const ALL: [HemisphereGroup; 2] = [HemisphereGroup::Intra, HemisphereGroup::Inter];

    /// Group of a pair whose endpoints lie in hemispheres `a` and `b`.
    pub fn of(a: Hemisphere, b: Hemisphere) -> Self {
        if a == b {
            HemisphereGroup::Intra
        } else {
            HemisphereGroup::Inter
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HemisphereGroup::Intra => "intra",
            HemisphereGroup::Inter => "inter",
        }
    }
}

impl std::fmt::Display for HemisphereGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-node hemisphere assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HemisphereLabels(Vec<Hemisphere>);

impl HemisphereLabels {
    pub fn new(labels: Vec<Hemisphere>) -> Self {
        Self(labels)
    }

    /// Indicator form: `true` = right, `false` = left.
    pub fn from_bools(right: &[bool]) -> Self {
        Self(right.iter().map(|&r| Hemisphere::from_bool(r)).collect())
    }

    /// Integer atlas codes. Nodes whose code equals `right_code` are right
    /// hemisphere, every other code is left.
    pub fn from_codes(codes: &[i64], right_code: i64) -> Self {
        Self(codes.iter().map(|&c| Hemisphere::from_bool(c == right_code)).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, node: usize) -> Option<Hemisphere> {
        self.0.get(node).copied()
    }

    /// Group of the pair `(i, j)`. Panics if either index is out of range.
    pub fn group(&self, i: usize, j: usize) -> HemisphereGroup {
        HemisphereGroup::of(self.0[i], self.0[j])
    }

    pub fn count(&self, hemisphere: Hemisphere) -> usize {
        self.0.iter().filter(|&&h| h == hemisphere).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = Hemisphere> + '_ {
        self.0.iter().copied()
    }
}

impl From<&[bool]> for HemisphereLabels {
    fn from(right: &[bool]) -> Self {
        Self::from_bools(right)
    }
}
