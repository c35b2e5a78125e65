//! [`Command`] for removing a special price of a persisted [`Property`].

use common::operations::Update;
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::domain::PricingRule;
use crate::{
    domain::{pricing, Property},
    infra::{database, Database},
    optimistic, SpecialPricing, Service,
};

use super::Command;

/// [`Command`] for removing a special price of a persisted [`Property`].
///
/// The [`PricingRule`] disappears from the [`SpecialPricing`] right away, and
/// is brought back if the [`Property`] fails to be updated. Removing an
/// unknown [`PricingRule`] does nothing.
#[derive(Debug)]
pub struct RemoveSpecialPrice<'m> {
    /// [`SpecialPricing`] to remove the price from.
    pub pricing: &'m mut SpecialPricing,

    /// ID of the [`PricingRule`] to remove.
    pub id: pricing::Id,
}

impl<'m, Db, St> Command<RemoveSpecialPrice<'m>> for Service<Db, St>
where
    Db: Database<
        Update<Property>,
        Ok = Property,
        Err = Traced<database::Error>,
    >,
{
    /// Indicator whether the [`PricingRule`] was removed.
    type Ok = bool;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: RemoveSpecialPrice<'m>,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let RemoveSpecialPrice { pricing, id } = cmd;

        if !pricing.rules().iter().any(|r| r.id == id) {
            return Ok(false);
        }

        let persisted = optimistic::attempt(
            pricing,
            |p| _ = p.remove(id),
            |p| self.database().execute(Update(p.to_property())),
        )
        .await
        .map_err(|e| {
            log::warn!("rolled back removal of `PricingRule(id: {id})`: {e}");
            e
        })
        .map_err(tracerr::map_from_and_wrap!(=> E))?;
        pricing.reseed(persisted);

        Ok(true)
    }
}

/// Error of [`RemoveSpecialPrice`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),
}
