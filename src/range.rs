//! Per-parameter value rules.
//!
//! Every parameter carries a [`Range`]. A value is accepted by a rule iff
//! clamping it into the rule leaves it unchanged, so the strict setters and the
//! best-effort clamping setters can never disagree about what is valid.

/// Clamps `v` into the inclusive range `[min, max]`.
///
/// # Arguments
/// - `v`: The candidate value
/// - `min`: Lowest acceptable value
/// - `max`: Highest acceptable value
///
/// # Returns
/// `min` if `v < min`, `max` if `v > max`, `v` otherwise.
///
/// # Notes
/// If `min > max` the result is `max`.
pub const fn constrain(v: u32, min: u32, max: u32) -> u32 {
    if v > max {
        max
    } else if v < min {
        min
    } else {
        v
    }
}

/// The set of values a parameter accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Range {
    /// Any value in the inclusive span `min..=max`.
    Span {
        /// Lowest accepted value
        min: u32,
        /// Highest accepted value
        max: u32,
    },
    /// One of an ascending list of discrete values, e.g. serial rate selectors.
    OneOf(&'static [u32]),
}

impl Range {
    /// A rule accepting every `u32`.
    pub const ANY: Range = Range::Span {
        min: 0,
        max: u32::MAX,
    };

    /// A rule accepting `0` and `1` only.
    pub const FLAG: Range = Range::Span { min: 0, max: 1 };

    /// A rule accepting `min..=max`.
    pub const fn span(min: u32, max: u32) -> Self {
        Range::Span { min, max }
    }

    /// A rule accepting exactly `value`.
    pub const fn exactly(value: u32) -> Self {
        Range::Span {
            min: value,
            max: value,
        }
    }

    /// Moves `v` to the nearest acceptable value.
    ///
    /// Spans clamp with [`constrain`]. Discrete lists pick the largest allowed
    /// value not above `v`, or the smallest allowed value when `v` is below all
    /// of them. An empty list leaves `v` untouched.
    pub fn clamp(&self, v: u32) -> u32 {
        match *self {
            Range::Span { min, max } => constrain(v, min, max),
            Range::OneOf(allowed) => allowed
                .iter()
                .rev()
                .find(|&&a| a <= v)
                .or_else(|| allowed.first())
                .copied()
                .unwrap_or(v),
        }
    }

    /// Returns `true` if the rule accepts `v`.
    pub fn contains(&self, v: u32) -> bool {
        match *self {
            Range::OneOf(allowed) if allowed.is_empty() => false,
            _ => self.clamp(v) == v,
        }
    }

    /// Lowest accepted value.
    pub fn min(&self) -> u32 {
        match *self {
            Range::Span { min, .. } => min,
            Range::OneOf(allowed) => allowed.first().copied().unwrap_or(0),
        }
    }

    /// Highest accepted value.
    pub fn max(&self) -> u32 {
        match *self {
            Range::Span { max, .. } => max,
            Range::OneOf(allowed) => allowed.last().copied().unwrap_or(0),
        }
    }
}
