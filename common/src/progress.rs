//! [`Progress`]-related definitions.

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Completion percentage of some long-running operation, within `0..=100`.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[display("{_0}%")]
#[serde(try_from = "u8", into = "u8")]
pub struct Progress(u8);

impl Progress {
    /// Nothing is done yet.
    pub const NONE: Self = Self(0);

    /// Everything is done.
    pub const DONE: Self = Self(100);

    /// Creates a new [`Progress`] if the given `percent` is within `0..=100`.
    #[must_use]
    pub const fn new(percent: u8) -> Option<Self> {
        if percent <= 100 {
            Some(Self(percent))
        } else {
            None
        }
    }

    /// Creates a new [`Progress`] clamping the given `percent` into
    /// `0..=100`.
    #[must_use]
    pub fn saturating(percent: f64) -> Self {
        if percent.is_nan() || percent <= 0.0 {
            return Self::NONE;
        }
        if percent >= 100.0 {
            return Self::DONE;
        }
        #[expect(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "value is checked to be within `0..100`"
        )]
        let percent = percent.round() as u8;
        Self(percent)
    }

    /// Returns the percentage of this [`Progress`].
    #[must_use]
    pub const fn percent(self) -> u8 {
        self.0
    }

    /// Indicates whether this [`Progress`] is complete.
    #[must_use]
    pub const fn is_done(self) -> bool {
        self.0 == 100
    }

    /// Projects this phase-local [`Progress`] onto the `from..=to` sub-range
    /// of an overall [`Progress`].
    ///
    /// A phase at 50% within `70..=100` is 85% overall.
    #[must_use]
    pub fn scale_into(self, from: Self, to: Self) -> Self {
        let (from, to) = (u16::from(from.0), u16::from(to.0.max(from.0)));
        let scaled = from + (to - from) * u16::from(self.0) / 100;
        // `scaled` never exceeds `to`, which is at most `100`.
        Self(u8::try_from(scaled).unwrap_or(100))
    }
}

impl TryFrom<u8> for Progress {
    type Error = &'static str;

    fn try_from(percent: u8) -> Result<Self, Self::Error> {
        Self::new(percent).ok_or("`Progress` exceeds 100%")
    }
}

impl From<Progress> for u8 {
    fn from(p: Progress) -> Self {
        p.0
    }
}

#[cfg(test)]
mod spec {
    use super::Progress;

    fn p(v: u8) -> Progress {
        Progress::new(v).unwrap()
    }

    #[test]
    fn bounds_percentage() {
        assert!(Progress::new(101).is_none());
        assert_eq!(Progress::saturating(-3.0), Progress::NONE);
        assert_eq!(Progress::saturating(140.0), Progress::DONE);
        assert_eq!(Progress::saturating(41.6), p(42));
        assert_eq!(p(42).to_string(), "42%");
    }

    #[test]
    fn scales_phase_into_sub_range() {
        assert_eq!(p(0).scale_into(p(0), p(70)), p(0));
        assert_eq!(p(50).scale_into(p(0), p(70)), p(35));
        assert_eq!(p(100).scale_into(p(0), p(70)), p(70));
        assert_eq!(p(0).scale_into(p(70), p(100)), p(70));
        assert_eq!(p(50).scale_into(p(70), p(100)), p(85));
        assert_eq!(p(100).scale_into(p(70), p(100)), Progress::DONE);
    }
}
