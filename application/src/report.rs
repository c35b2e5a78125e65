//! Reports of running a [`Command`] over a [`Document`].
//!
//! [`Command`]: crate::Command

use std::cell::RefCell;

use common::Date;
use serde_json::{json, Value};
use service::{
    command::SubmitDraft,
    domain::{pricing::RuleSet, property::Pricing},
    editor::Step,
    infra::{database, storage},
    Command as _, Editor, Service,
};

use crate::{Document, Error};

/// Reports every [`Step`] of the [`Editor`] the [`Document`] passes or
/// fails.
#[must_use]
pub fn validate(document: Document) -> Value {
    let draft = document.into_draft();

    let steps = Step::ALL
        .iter()
        .map(|step| match step.check(&draft) {
            Ok(()) => json!({ "step": step, "valid": true }),
            Err(e) => {
                json!({ "step": step, "valid": false, "fields": e.fields })
            }
        })
        .collect::<Vec<_>>();
    let valid = steps.iter().all(|s| s["valid"] == true);

    json!({ "valid": valid, "steps": steps })
}

/// Normalizes the [`Document`] the way it's persisted on submit.
///
/// # Errors
///
/// If the [`Document`] cannot be normalized.
pub fn normalize(
    document: Document,
    config: &service::Config,
) -> Result<Value, Error> {
    let listing = document.into_draft().normalize(&config.policies)?;
    Ok(serde_json::to_value(listing)?)
}

/// Walks the [`Document`] through the [`Editor`] as a new property and
/// submits it into a fresh in-memory store.
///
/// # Errors
///
/// If any [`Step`] is not passed, or the submission fails.
pub async fn submit(
    document: Document,
    config: service::Config,
    storage_url: &str,
) -> Result<Value, Error> {
    let service = Service::new(
        config,
        database::Memory::new(),
        storage::Memory::new(storage_url),
    );

    let mut editor = Editor::prefilled(document.into_draft());
    while editor.step() != Step::LAST {
        _ = editor.next()?;
    }

    let editor = RefCell::new(editor);
    let property = service.execute(SubmitDraft { editor: &editor }).await?;
    Ok(serde_json::to_value(property)?)
}

/// Quotes the nightly price of the [`Document`] for the provided `date`.
#[must_use]
pub fn quote(document: Document, date: Date) -> Value {
    let Pricing {
        currency,
        default_price,
        rules,
    } = document.listing.pricing;

    let price = RuleSet::new(default_price, rules).price_for(date);

    json!({
        "date": date.to_string(),
        "price": price.in_currency(currency).to_string(),
    })
}
