//! [`PricingRule`] definitions.

use common::{Date, Price};
use derive_more::{Display, Error, From, FromStr, Into};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Date-range override of a default nightly price.
///
/// Both [`PricingRule::start_date`] and [`PricingRule::end_date`] are
/// inclusive, so a single-day rule has them equal.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingRule {
    /// ID of this [`PricingRule`].
    pub id: Id,

    /// First day this [`PricingRule`] applies to.
    pub start_date: Date,

    /// Last day this [`PricingRule`] applies to.
    pub end_date: Date,

    /// Nightly [`Price`] within this [`PricingRule`].
    pub price: Price,
}

impl PricingRule {
    /// Indicates whether this [`PricingRule`] applies to the given `date`.
    #[must_use]
    pub fn contains(&self, date: Date) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// Indicates whether this [`PricingRule`] shares at least one day with
    /// the closed `start..=end` range.
    #[must_use]
    pub fn overlaps(&self, start: Date, end: Date) -> bool {
        self.start_date <= end && start <= self.end_date
    }
}

/// ID of a [`PricingRule`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Default nightly [`Price`] along with non-overlapping [`PricingRule`]s.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RuleSet {
    /// [`Price`] applied on days no [`PricingRule`] covers.
    default_price: Price,

    /// [`PricingRule`]s of this [`RuleSet`], in insertion order.
    rules: Vec<PricingRule>,
}

impl RuleSet {
    /// Creates a new [`RuleSet`] out of already persisted parts.
    ///
    /// The `rules` are trusted as-is: overlaps are only rejected by
    /// [`RuleSet::add_rule()`].
    #[must_use]
    pub fn new(default_price: Price, rules: Vec<PricingRule>) -> Self {
        Self {
            default_price,
            rules,
        }
    }

    /// Returns the default [`Price`] of this [`RuleSet`].
    #[must_use]
    pub fn default_price(&self) -> Price {
        self.default_price
    }

    /// Replaces the default [`Price`] of this [`RuleSet`].
    pub fn set_default_price(&mut self, price: Price) {
        self.default_price = price;
    }

    /// Returns the [`PricingRule`]s of this [`RuleSet`].
    #[must_use]
    pub fn rules(&self) -> &[PricingRule] {
        &self.rules
    }

    /// Returns the first [`PricingRule`] sharing a day with the closed
    /// `start..=end` range, if any.
    #[must_use]
    pub fn conflicting(&self, start: Date, end: Date) -> Option<&PricingRule> {
        self.rules.iter().find(|r| r.overlaps(start, end))
    }

    /// Appends the `candidate` to this [`RuleSet`].
    ///
    /// # Errors
    ///
    /// With an [`OverlapError`] if the `candidate` shares a day with any
    /// existing [`PricingRule`]. Touching boundaries count as a shared day.
    pub fn add_rule(
        mut self,
        candidate: PricingRule,
    ) -> Result<Self, OverlapError> {
        if let Some(existing) =
            self.conflicting(candidate.start_date, candidate.end_date)
        {
            return Err(OverlapError::with(existing));
        }
        self.rules.push(candidate);
        Ok(self)
    }

    /// Removes the [`PricingRule`] with the provided `id`, if any.
    #[must_use]
    pub fn remove_rule(mut self, id: Id) -> Self {
        self.rules.retain(|r| r.id != id);
        self
    }

    /// Returns the nightly [`Price`] on the provided `date`.
    #[must_use]
    pub fn price_for(&self, date: Date) -> Price {
        self.rules
            .iter()
            .find(|r| r.contains(date))
            .map_or(self.default_price, |r| r.price)
    }

    /// Splits this [`RuleSet`] into its default [`Price`] and
    /// [`PricingRule`]s.
    #[must_use]
    pub fn into_parts(self) -> (Price, Vec<PricingRule>) {
        (self.default_price, self.rules)
    }
}

/// Error of a candidate sharing days with an existing [`PricingRule`].
#[derive(Clone, Copy, Debug, Display, Eq, Error, PartialEq)]
#[display("overlaps with the existing price from {start_date} to {end_date}")]
pub struct OverlapError {
    /// ID of the conflicting [`PricingRule`].
    pub conflicting: Id,

    /// First day of the conflicting [`PricingRule`].
    pub start_date: Date,

    /// Last day of the conflicting [`PricingRule`].
    pub end_date: Date,
}

impl OverlapError {
    /// Creates a new [`OverlapError`] naming the `existing` [`PricingRule`].
    #[must_use]
    pub fn with(existing: &PricingRule) -> Self {
        Self {
            conflicting: existing.id,
            start_date: existing.start_date,
            end_date: existing.end_date,
        }
    }
}

/// [`PricingRule`] candidate, as typed into a form.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// First day, in `YYYY-MM-DD` format.
    pub start_date: String,

    /// Last day, in `YYYY-MM-DD` format.
    pub end_date: String,

    /// Nightly price.
    pub price: String,
}

impl Candidate {
    /// Creates a new [`Candidate`] out of its raw form values.
    #[must_use]
    pub fn new(
        start_date: impl Into<String>,
        end_date: impl Into<String>,
        price: impl Into<String>,
    ) -> Self {
        Self {
            start_date: start_date.into(),
            end_date: end_date.into(),
            price: price.into(),
        }
    }

    /// Returns the closed date range of this [`Candidate`], if both dates
    /// parse and are in order, regardless of its price.
    #[must_use]
    pub fn range(&self) -> Option<(Date, Date)> {
        let start = Date::parse(&self.start_date).ok()?;
        let end = Date::parse(&self.end_date).ok()?;
        (start <= end).then_some((start, end))
    }

    /// Checks this [`Candidate`] in isolation, reporting every invalid field
    /// at once.
    ///
    /// # Errors
    ///
    /// With [`Invalid`] if any date is missing or malformed, the range is
    /// reversed, or the price is not a positive number.
    pub fn validate(&self) -> Result<Valid, Invalid> {
        let mut errors = Invalid::default();

        let start = parse_date(&self.start_date, "Start date")
            .map_err(|e| errors.start_date = Some(e))
            .ok();
        let end = parse_date(&self.end_date, "End date")
            .map_err(|e| errors.end_date = Some(e))
            .ok();
        if let (Some(start), Some(end)) = (start, end) {
            if end < start {
                errors.end_date =
                    Some("End date cannot be before start date".into());
            }
        }

        let price = match self.price.trim() {
            "" => Err("Price is required"),
            raw => raw
                .parse::<Price>()
                .ok()
                .filter(|p| p.is_positive())
                .ok_or("Price must be a positive number"),
        }
        .map_err(|e| errors.price = Some(e.into()))
        .ok();

        match (start, end, price) {
            (Some(start_date), Some(end_date), Some(price))
                if errors.is_empty() =>
            {
                Ok(Valid {
                    start_date,
                    end_date,
                    price,
                })
            }
            _ => Err(errors),
        }
    }
}

/// Parses a required `YYYY-MM-DD` form value labeled with `what`.
fn parse_date(raw: &str, what: &str) -> Result<Date, String> {
    if raw.trim().is_empty() {
        return Err(format!("{what} is required"));
    }
    Date::parse(raw).map_err(|_| format!("{what} is not a valid date"))
}

/// [`Candidate`] that passed [`Candidate::validate()`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Valid {
    /// First day of the range.
    pub start_date: Date,

    /// Last day of the range, never before [`Valid::start_date`].
    pub end_date: Date,

    /// Positive nightly [`Price`].
    pub price: Price,
}

impl Valid {
    /// Turns this [`Valid`] candidate into a new [`PricingRule`].
    #[must_use]
    pub fn into_rule(self) -> PricingRule {
        PricingRule {
            id: Id::new(),
            start_date: self.start_date,
            end_date: self.end_date,
            price: self.price,
        }
    }
}

/// Field-scoped errors of a [`Candidate`].
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Invalid {
    /// Error of the start date, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,

    /// Error of the end date, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,

    /// Error of the price, if any.
    #[serde(rename = "specialPrice", skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,

    /// Error of the range as a whole, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_range: Option<String>,
}

impl Invalid {
    /// Indicates whether no field has an error.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        let Self {
            start_date,
            end_date,
            price,
            date_range,
        } = self;
        start_date.is_none()
            && end_date.is_none()
            && price.is_none()
            && date_range.is_none()
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use common::{Date, Price};

    use super::{Candidate, Id, PricingRule, RuleSet};

    fn date(s: &str) -> Date {
        Date::parse(s).unwrap()
    }

    fn price(s: &str) -> Price {
        Price::from_str(s).unwrap()
    }

    fn rule(start: &str, end: &str, p: &str) -> PricingRule {
        PricingRule {
            id: Id::new(),
            start_date: date(start),
            end_date: date(end),
            price: price(p),
        }
    }

    fn christmas() -> (PricingRule, RuleSet) {
        let existing = rule("2024-12-20", "2024-12-25", "300");
        let set = RuleSet::new(price("100"), vec![existing]);
        (existing, set)
    }

    #[test]
    fn rejects_shared_boundary_day() {
        let (existing, set) = christmas();

        let err = set
            .add_rule(rule("2024-12-25", "2024-12-27", "250"))
            .unwrap_err();
        assert_eq!(err.conflicting, existing.id);
        assert_eq!(
            err.to_string(),
            "overlaps with the existing price from 2024-12-20 to 2024-12-25",
        );
    }

    #[test]
    fn rejects_partial_overlap() {
        let (existing, set) = christmas();

        let err = set
            .add_rule(rule("2024-12-18", "2024-12-22", "250"))
            .unwrap_err();
        assert_eq!(err.conflicting, existing.id);
    }

    #[test]
    fn rejects_enclosing_and_enclosed_ranges() {
        let (_, set) = christmas();

        assert!(set
            .clone()
            .add_rule(rule("2024-12-01", "2024-12-31", "250"))
            .is_err());
        assert!(set.add_rule(rule("2024-12-22", "2024-12-22", "250")).is_err());
    }

    #[test]
    fn accepts_adjacent_range() {
        let (_, set) = christmas();

        let set =
            set.add_rule(rule("2024-12-26", "2024-12-30", "250")).unwrap();
        assert_eq!(set.rules().len(), 2);
    }

    #[test]
    fn removes_rules_idempotently() {
        let (existing, set) = christmas();
        let set =
            set.add_rule(rule("2025-01-01", "2025-01-01", "150")).unwrap();

        let once = set.remove_rule(existing.id);
        assert_eq!(once.rules().len(), 1);

        let twice = once.clone().remove_rule(existing.id);
        assert_eq!(once, twice);
    }

    #[test]
    fn resolves_price_for_date() {
        let (_, set) = christmas();
        let set =
            set.add_rule(rule("2025-01-01", "2025-01-01", "150")).unwrap();

        assert_eq!(set.price_for(date("2024-12-19")), price("100"));
        assert_eq!(set.price_for(date("2024-12-20")), price("300"));
        assert_eq!(set.price_for(date("2024-12-25")), price("300"));
        assert_eq!(set.price_for(date("2024-12-26")), price("100"));
        assert_eq!(set.price_for(date("2025-01-01")), price("150"));
    }

    #[test]
    fn validates_candidate_fields_together() {
        let errors =
            Candidate::new("", "2024-13-01", "-5").validate().unwrap_err();
        assert_eq!(
            errors.start_date.as_deref(),
            Some("Start date is required"),
        );
        assert_eq!(
            errors.end_date.as_deref(),
            Some("End date is not a valid date"),
        );
        assert_eq!(
            errors.price.as_deref(),
            Some("Price must be a positive number"),
        );
        assert!(errors.date_range.is_none());

        let errors = Candidate::new("2024-12-25", "2024-12-20", "0")
            .validate()
            .unwrap_err();
        assert_eq!(
            errors.end_date.as_deref(),
            Some("End date cannot be before start date"),
        );
        assert!(errors.price.is_some());

        let errors = Candidate::new("2024-12-25", "2024-12-26", " ")
            .validate()
            .unwrap_err();
        assert_eq!(errors.price.as_deref(), Some("Price is required"));
    }

    #[test]
    fn accepts_single_day_candidate() {
        let valid = Candidate::new("2024-12-24", "2024-12-24", "199.99")
            .validate()
            .unwrap();
        assert_eq!(valid.start_date, valid.end_date);

        let rule = valid.into_rule();
        assert!(rule.contains(date("2024-12-24")));
        assert!(!rule.contains(date("2024-12-25")));
    }
}
