//! [`Command`] for adding a special price to a persisted [`Property`].

use common::operations::Update;
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{pricing::Candidate, PricingRule, Property},
    infra::{database, Database},
    optimistic,
    special_pricing::{self, SpecialPricing},
    Service,
};

use super::Command;

/// [`Command`] for adding a special price to a persisted [`Property`].
///
/// The new [`PricingRule`] shows up in the [`SpecialPricing`] right away, and
/// is taken back if the [`Property`] fails to be updated.
#[derive(Debug)]
pub struct AddSpecialPrice<'m> {
    /// [`SpecialPricing`] to add the price to.
    pub pricing: &'m mut SpecialPricing,

    /// [`Candidate`] of the new [`PricingRule`].
    pub candidate: Candidate,
}

impl<'m, Db, St> Command<AddSpecialPrice<'m>> for Service<Db, St>
where
    Db: Database<
        Update<Property>,
        Ok = Property,
        Err = Traced<database::Error>,
    >,
{
    type Ok = PricingRule;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: AddSpecialPrice<'m>,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let AddSpecialPrice { pricing, candidate } = cmd;

        let rule = pricing
            .validate(&candidate)
            .map_err(E::Invalid)
            .map_err(tracerr::wrap!())?
            .into_rule();

        let persisted = optimistic::attempt(
            pricing,
            |p| p.insert(rule),
            |p| self.database().execute(Update(p.to_property())),
        )
        .await
        .map_err(|e| {
            log::warn!("rolled back special price: {e}");
            e
        })
        .map_err(tracerr::map_from_and_wrap!(=> E))?;
        pricing.reseed(persisted);

        Ok(rule)
    }
}

/// Error of [`AddSpecialPrice`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Candidate`] is not valid.
    #[display("invalid special price")]
    #[from(ignore)]
    Invalid(#[error(not(source))] special_pricing::Errors),
}

#[cfg(test)]
mod spec {
    use common::operations::{By, Select};

    use crate::{
        domain::{pricing::Candidate, Property},
        special_pricing::{
            spec::{property, rule},
            SpecialPricing,
        },
        spec::service,
        Command as _,
    };

    use super::{AddSpecialPrice, ExecutionError};

    #[tokio::test]
    async fn persists_rules_oldest_first() {
        let (svc, db, _) = service();
        let existing = rule("2024-12-20", "2024-12-25", "300");
        let stored = svc
            .database()
            .execute(common::operations::Insert(
                property(vec![existing]).listing,
            ))
            .await
            .unwrap();
        let mut pricing = SpecialPricing::new(stored.clone());

        let added = svc
            .execute(AddSpecialPrice {
                pricing: &mut pricing,
                candidate: Candidate::new("2024-12-31", "2024-12-31", "500"),
            })
            .await
            .unwrap();

        assert_eq!(pricing.rules()[0], added);
        let persisted = db
            .execute(Select(By::<Option<Property>, _>::new(stored.id)))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(persisted.listing.pricing.rules, [existing, added]);
        assert_eq!(pricing.property(), &persisted);
    }

    #[tokio::test]
    async fn rolls_back_on_store_failure() {
        let (svc, db, _) = service();
        let stored = svc
            .database()
            .execute(common::operations::Insert(property(vec![]).listing))
            .await
            .unwrap();
        let mut pricing = SpecialPricing::new(stored);
        let before = pricing.clone();
        db.refuse_writes(true);

        let err = svc
            .execute(AddSpecialPrice {
                pricing: &mut pricing,
                candidate: Candidate::new("2024-12-20", "2024-12-25", "300"),
            })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::Db(_)));
        assert_eq!(pricing, before);
    }

    #[tokio::test]
    async fn never_persists_invalid_candidate() {
        let (svc, db, _) = service();
        let existing = rule("2024-12-20", "2024-12-25", "300");
        let mut pricing = SpecialPricing::new(property(vec![existing]));
        db.refuse_writes(true);

        let err = svc
            .execute(AddSpecialPrice {
                pricing: &mut pricing,
                candidate: Candidate::new("2024-12-25", "2024-12-24", "abc"),
            })
            .await
            .unwrap_err();

        let ExecutionError::Invalid(errors) = err.as_ref() else {
            panic!("expected invalid candidate");
        };
        assert!(errors.end_date.is_some());
        assert!(errors.price.is_some());
        assert_eq!(pricing.rules().len(), 1);
    }
}
