//! [`Command`] for submitting a [`Draft`] of an [`Editor`].

use std::cell::RefCell;

use common::operations::{Insert, Update};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::editor::Draft;
use crate::{
    domain::{property::Listing, Property},
    editor::{Editor, SubmitError, Submission},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for submitting a [`Draft`] of an [`Editor`].
///
/// A new [`Property`] is created, or the edited one is updated. The
/// [`Editor`] is borrowed only around the [`Database`] call, so the same
/// [`Editor`] stays usable while the submission is in flight.
#[derive(Clone, Copy, Debug)]
pub struct SubmitDraft<'e> {
    /// [`Editor`] to submit the [`Draft`] of.
    pub editor: &'e RefCell<Editor>,
}

impl<'e, Db, St> Command<SubmitDraft<'e>> for Service<Db, St>
where
    Db: Database<Insert<Listing>, Ok = Property, Err = Traced<database::Error>>
        + Database<
            Update<Property>,
            Ok = Property,
            Err = Traced<database::Error>,
        >,
{
    type Ok = Property;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: SubmitDraft<'e>,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let SubmitDraft { editor } = cmd;

        let submission = editor
            .borrow_mut()
            .begin_submit(&self.config().policies)
            .map_err(|e| {
                log::debug!("`Draft` is not submitted: {e}");
                E::Submit(e)
            })
            .map_err(tracerr::wrap!())?;

        let persisted = match submission {
            Submission::Create(listing) => {
                self.database().execute(Insert(listing)).await
            }
            Submission::Update(property) => {
                self.database().execute(Update(property)).await
            }
        };

        editor
            .borrow_mut()
            .finish_submit(persisted.as_ref().ok().cloned());
        if let Err(e) = &persisted {
            log::warn!("failed to persist `Draft`: {e}");
        }

        persisted.map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of [`SubmitDraft`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Editor`] cannot be submitted.
    #[display("cannot submit: {_0}")]
    Submit(SubmitError),
}
