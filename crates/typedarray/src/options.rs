use std::fmt;

use crate::GrowthPolicy;

/// Index validation policy for element, tuple and component accessors.
///
/// `Checked` compares every index against the logical size and returns an
/// out-of-range error. `Unchecked` skips that comparison: indices inside the
/// allocated buffer but past the logical size are not reported, and indices
/// past the buffer panic. Bulk operations (`copy_tuples_from`, `iter_range`)
/// and tuple slice lengths are validated under both policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundsCheck {
    Checked,
    Unchecked,
}

impl BoundsCheck {
    #[inline(always)]
    pub fn is_checked(self) -> bool {
        self == Self::Checked
    }
}

impl Default for BoundsCheck {
    /// `Checked` in debug builds, `Unchecked` in release builds.
    fn default() -> Self {
        if cfg!(debug_assertions) {
            Self::Checked
        } else {
            Self::Unchecked
        }
    }
}

impl fmt::Display for BoundsCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Checked => f.write_str("Checked"),
            Self::Unchecked => f.write_str("Unchecked"),
        }
    }
}

/// Options for creating a typed array.
#[derive(Debug, Clone, Copy)]
pub struct ArrayOptions<'a> {
    /// Optional label of the array.
    pub name: Option<&'a str>,
    /// Number of consecutive values forming one tuple.
    pub number_of_components: usize,
    /// Capacity multiplier applied on growth, validated on use.
    pub growth_factor: f64,
    /// Index validation policy.
    pub bounds_check: BoundsCheck,
}

impl<'a> ArrayOptions<'a> {
    pub fn new(number_of_components: usize) -> Self {
        Self {
            name: None,
            number_of_components,
            growth_factor: GrowthPolicy::DEFAULT_FACTOR,
            bounds_check: BoundsCheck::default(),
        }
    }

    pub fn with_name(mut self, name: &'a str) -> Self {
        self.name = Some(name);
        self
    }

    pub fn with_growth_factor(mut self, factor: f64) -> Self {
        self.growth_factor = factor;
        self
    }

    pub fn with_bounds_check(mut self, bounds_check: BoundsCheck) -> Self {
        self.bounds_check = bounds_check;
        self
    }
}

impl Default for ArrayOptions<'_> {
    fn default() -> Self {
        Self::new(1)
    }
}

impl<'a> From<(&'a str, usize)> for ArrayOptions<'a> {
    fn from((name, number_of_components): (&'a str, usize)) -> Self {
        Self::new(number_of_components).with_name(name)
    }
}

impl From<usize> for ArrayOptions<'_> {
    fn from(number_of_components: usize) -> Self {
        Self::new(number_of_components)
    }
}
