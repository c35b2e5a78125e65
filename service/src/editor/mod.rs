//! Multi-step [`Editor`] of a [`Property`].

pub mod action;
mod draft;
mod normalize;
pub mod step;

use std::collections::HashSet;

use derive_more::{Display, Error, From};

use crate::{
    domain::{
        property::{Listing, Policies},
        Property,
    },
    gallery::Gallery,
};

pub use self::{
    action::Action,
    draft::{Draft, Rejection},
    step::Step,
};

/// State machine walking a [`Draft`] through its [`Step`]s up to a
/// submission.
#[derive(Clone, Debug)]
pub struct Editor {
    /// [`Draft`] being edited.
    draft: Draft,

    /// Current [`Step`].
    step: Step,

    /// [`Step`]s passed at least once.
    completed: HashSet<Step>,

    /// Indicator whether a submission is in flight.
    submitting: bool,
}

impl Editor {
    /// Creates a new [`Editor`] of a new [`Property`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            draft: Draft::default(),
            step: Step::FIRST,
            completed: HashSet::new(),
            submitting: false,
        }
    }

    /// Creates a new [`Editor`] of a new [`Property`] prefilled with the
    /// provided [`Draft`].
    ///
    /// Any ID of the [`Draft`] is dropped, so nothing is considered
    /// completed yet.
    #[must_use]
    pub fn prefilled(draft: Draft) -> Self {
        Self {
            draft: Draft { id: None, ..draft },
            ..Self::new()
        }
    }

    /// Creates a new [`Editor`] of the provided persisted [`Property`].
    ///
    /// Every [`Step`] is considered completed and reachable at once.
    #[must_use]
    pub fn edit(property: Property) -> Self {
        Self {
            draft: Draft::from(property),
            step: Step::FIRST,
            completed: Step::ALL.iter().copied().collect(),
            submitting: false,
        }
    }

    /// Returns the [`Draft`] of this [`Editor`].
    #[must_use]
    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// Returns the current [`Step`] of this [`Editor`].
    #[must_use]
    pub fn step(&self) -> Step {
        self.step
    }

    /// Indicates whether this [`Editor`] edits an already persisted
    /// [`Property`].
    #[must_use]
    pub fn is_editing(&self) -> bool {
        self.draft.id.is_some()
    }

    /// Indicates whether the provided [`Step`] was passed at least once.
    #[must_use]
    pub fn is_completed(&self, step: Step) -> bool {
        self.completed.contains(&step)
    }

    /// Indicates whether a submission is in flight.
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Applies the provided [`Action`] to the [`Draft`].
    ///
    /// # Errors
    ///
    /// With a [`Rejection`] if the [`Action`] cannot be applied.
    pub fn apply(
        &mut self,
        action: impl Into<Action>,
    ) -> Result<(), Rejection> {
        self.draft.apply(action)
    }

    /// Checks the current [`Step`].
    ///
    /// # Errors
    ///
    /// With [`step::Invalid`] if the current [`Step`] is not passed.
    pub fn check(&self) -> Result<(), step::Invalid> {
        self.step.check(&self.draft)
    }

    /// Moves to the next [`Step`] if the current one is passed, marking it
    /// completed.
    ///
    /// # Errors
    ///
    /// With a [`NavigationError`] if the current [`Step`] is not passed or is
    /// the last one.
    pub fn next(&mut self) -> Result<Step, NavigationError> {
        let next = self.step.next().ok_or(NavigationError::LastStep)?;
        self.check()?;
        _ = self.completed.insert(self.step);
        self.step = next;
        Ok(next)
    }

    /// Moves to the previous [`Step`], staying on the first one.
    pub fn previous(&mut self) -> Step {
        if let Some(previous) = self.step.previous() {
            self.step = previous;
        }
        self.step
    }

    /// Jumps to the provided [`Step`].
    ///
    /// Editing a persisted [`Property`] allows any jump. Otherwise, jumping
    /// forward requires the current [`Step`] to be passed, while jumping
    /// backward is always allowed.
    ///
    /// # Errors
    ///
    /// With a [`NavigationError`] if the jump is not allowed.
    pub fn go_to(&mut self, step: Step) -> Result<(), NavigationError> {
        if !self.is_editing() && step.index() > self.step.index() {
            self.check()?;
            _ = self.completed.insert(self.step);
        }
        self.step = step;
        Ok(())
    }

    /// Starts submitting the [`Draft`], returning the [`Submission`] to hand
    /// to the property store.
    ///
    /// Every following submission is rejected until
    /// [`Editor::finish_submit()`] is called.
    ///
    /// Every [`Step`] is re-checked, as [`Editor::go_to()`] may jump over
    /// [`Step`]s never passed.
    ///
    /// # Errors
    ///
    /// With a [`SubmitError`] if a submission is already in flight, the
    /// current [`Step`] is not the last one, or any [`Step`] is not passed.
    pub fn begin_submit(
        &mut self,
        defaults: &Policies,
    ) -> Result<Submission, SubmitError> {
        if self.submitting {
            return Err(SubmitError::AlreadySubmitting);
        }
        if self.step != Step::LAST {
            return Err(SubmitError::NotLastStep(self.step));
        }
        for step in Step::ALL {
            step.check(&self.draft)?;
        }

        let listing = self.draft.normalize(defaults)?;
        self.submitting = true;
        Ok(match self.draft.id {
            Some(id) => Submission::Update(Property { id, listing }),
            None => Submission::Create(listing),
        })
    }

    /// Finishes the submission in flight.
    ///
    /// The [`Property`] returned by the property store, if any, becomes the
    /// source of truth and reseeds the [`Draft`].
    pub fn finish_submit(&mut self, persisted: Option<Property>) {
        self.submitting = false;
        if let Some(property) = persisted {
            self.draft = Draft::from(property);
            self.completed.extend(Step::ALL.iter().copied());
        }
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl AsMut<Gallery> for Editor {
    fn as_mut(&mut self) -> &mut Gallery {
        &mut self.draft.gallery
    }
}

/// Normalized [`Draft`] to be handed to the property store.
#[derive(Clone, Debug, PartialEq)]
pub enum Submission {
    /// New [`Property`] to be created.
    Create(Listing),

    /// Persisted [`Property`] to be updated.
    Update(Property),
}

/// Error of moving between [`Step`]s.
#[derive(Clone, Debug, Display, Error, From, PartialEq)]
pub enum NavigationError {
    /// Current [`Step`] is not passed.
    #[display("{_0}")]
    Invalid(step::Invalid),

    /// There is no [`Step`] after the last one.
    #[display("already at the last step")]
    #[from(ignore)]
    LastStep,
}

/// Error of starting a submission.
#[derive(Clone, Debug, Display, Error, From, PartialEq)]
pub enum SubmitError {
    /// Previous submission is still in flight.
    #[display("previous submission is still in flight")]
    #[from(ignore)]
    AlreadySubmitting,

    /// Submission is only allowed from the last [`Step`].
    #[display("cannot submit from `{_0}` step")]
    #[from(ignore)]
    NotLastStep(#[error(not(source))] Step),

    /// Some [`Step`] is not passed.
    #[display("{_0}")]
    Invalid(step::Invalid),
}
