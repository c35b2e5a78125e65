//! [`SpecialPricing`] of an already persisted [`Property`].

use crate::domain::{
    pricing::{self, Candidate, OverlapError, PricingRule, Valid},
    Property,
};

/// Field-scoped errors of a special price [`Candidate`].
pub type Errors = pricing::Invalid;

/// Special prices of a single persisted [`Property`], edited apart from any
/// [`Editor`].
///
/// [`PricingRule`]s are kept newest first, while the [`Property`] persists
/// them oldest first.
///
/// [`Editor`]: crate::editor::Editor
#[derive(Clone, Debug, PartialEq)]
pub struct SpecialPricing {
    /// Last persisted [`Property`].
    property: Property,

    /// [`PricingRule`]s in display order, newest first.
    rules: Vec<PricingRule>,
}

impl SpecialPricing {
    /// Creates a new [`SpecialPricing`] of the provided persisted
    /// [`Property`].
    #[must_use]
    pub fn new(property: Property) -> Self {
        let rules =
            property.listing.pricing.rules.iter().rev().cloned().collect();
        Self { property, rules }
    }

    /// Returns the [`Property`] these [`SpecialPricing`] belong to.
    #[must_use]
    pub fn property(&self) -> &Property {
        &self.property
    }

    /// Returns the [`PricingRule`]s, newest first.
    #[must_use]
    pub fn rules(&self) -> &[PricingRule] {
        &self.rules
    }

    /// Checks the provided `candidate` against the existing
    /// [`PricingRule`]s.
    ///
    /// # Errors
    ///
    /// With every field error at once, the overlap with an existing
    /// [`PricingRule`] being reported as the date range one.
    pub fn validate(&self, candidate: &Candidate) -> Result<Valid, Errors> {
        let overlap = candidate.range().and_then(|(start, end)| {
            self.rules
                .iter()
                .find(|r| r.overlaps(start, end))
                .map(OverlapError::with)
        });

        match (candidate.validate(), overlap) {
            (Ok(valid), None) => Ok(valid),
            (res, overlap) => {
                let mut errors = res.err().unwrap_or_default();
                if let Some(e) = overlap {
                    errors.date_range = Some(format!("This date range {e}"));
                }
                Err(errors)
            }
        }
    }

    /// Inserts the provided [`PricingRule`] as the newest one.
    pub(crate) fn insert(&mut self, rule: PricingRule) {
        self.rules.insert(0, rule);
    }

    /// Removes the [`PricingRule`] with the provided `id`.
    ///
    /// Returns `false` if there is no such [`PricingRule`].
    pub(crate) fn remove(&mut self, id: pricing::Id) -> bool {
        let before = self.rules.len();
        self.rules.retain(|r| r.id != id);
        self.rules.len() != before
    }

    /// Returns the [`Property`] with the current [`PricingRule`]s, ready to
    /// be persisted.
    #[must_use]
    pub fn to_property(&self) -> Property {
        let mut property = self.property.clone();
        property.listing.pricing.rules =
            self.rules.iter().rev().cloned().collect();
        property
    }

    /// Replaces these [`SpecialPricing`] with the provided persisted
    /// [`Property`] as the source of truth.
    pub(crate) fn reseed(&mut self, property: Property) {
        *self = Self::new(property);
    }
}

#[cfg(test)]
pub(crate) mod spec {
    use std::str::FromStr as _;

    use common::{Date, Price};

    use super::SpecialPricing;
    use crate::domain::{
        pricing::{self, Candidate, PricingRule},
        property, Property,
    };

    pub(crate) fn rule(start: &str, end: &str, price: &str) -> PricingRule {
        PricingRule {
            id: pricing::Id::new(),
            start_date: Date::parse(start).unwrap(),
            end_date: Date::parse(end).unwrap(),
            price: Price::from_str(price).unwrap(),
        }
    }

    pub(crate) fn property(rules: Vec<PricingRule>) -> Property {
        let mut listing = property::spec::listing();
        listing.pricing.rules = rules;
        Property {
            id: property::Id::new(),
            listing,
        }
    }

    #[test]
    fn shows_rules_newest_first_and_persists_oldest_first() {
        let older = rule("2024-06-01", "2024-06-10", "150");
        let newer = rule("2024-12-20", "2024-12-25", "300");
        let mut modal = SpecialPricing::new(property(vec![older, newer]));

        assert_eq!(modal.rules(), [newer, older]);

        let newest = rule("2025-01-01", "2025-01-01", "200");
        modal.insert(newest);
        assert_eq!(modal.rules()[0], newest);
        assert_eq!(
            modal.to_property().listing.pricing.rules,
            [older, newer, newest],
        );
    }

    #[test]
    fn reports_overlap_as_date_range_error() {
        let modal = SpecialPricing::new(property(vec![rule(
            "2024-12-20",
            "2024-12-25",
            "300",
        )]));

        let errors = modal
            .validate(&Candidate::new("2024-12-25", "2024-12-27", "250"))
            .unwrap_err();
        assert_eq!(
            errors.date_range.as_deref(),
            Some(
                "This date range overlaps with the existing price from \
                 2024-12-20 to 2024-12-25",
            ),
        );
        assert!(errors.start_date.is_none());
        assert!(errors.price.is_none());

        assert!(modal
            .validate(&Candidate::new("2024-12-26", "2024-12-30", "250"))
            .is_ok());
    }

    #[test]
    fn reports_field_errors_together_with_overlap() {
        let modal = SpecialPricing::new(property(vec![rule(
            "2024-12-20",
            "2024-12-25",
            "300",
        )]));

        let errors = modal
            .validate(&Candidate::new("2024-12-18", "2024-12-22", ""))
            .unwrap_err();
        assert_eq!(errors.price.as_deref(), Some("Price is required"));
        assert!(errors.date_range.is_some());
    }

    #[test]
    fn accepts_single_day_price() {
        let modal = SpecialPricing::new(property(vec![]));

        let valid = modal
            .validate(&Candidate::new("2024-12-31", "2024-12-31", "500"))
            .unwrap();
        assert_eq!(valid.start_date, valid.end_date);
    }

    #[test]
    fn removes_only_known_rules() {
        let existing = rule("2024-12-20", "2024-12-25", "300");
        let mut modal = SpecialPricing::new(property(vec![existing]));

        assert!(!modal.remove(pricing::Id::new()));
        assert_eq!(modal.rules().len(), 1);
        assert!(modal.remove(existing.id));
        assert!(modal.rules().is_empty());
    }
}
