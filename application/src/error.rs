//! [`Error`]-related definitions.

use std::{io, path::PathBuf};

use derive_more::{Display, Error as StdError, From};
use service::{
    command::submit_draft,
    editor::{step, NavigationError},
};
use tracerr::Traced;

/// Error of running a [`Command`].
///
/// [`Command`]: crate::Command
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// Property document cannot be read.
    #[display("failed to read `{}`: {source}", path.display())]
    #[from(ignore)]
    Read {
        /// Path of the property document.
        #[error(not(source))]
        path: PathBuf,

        /// Underlying I/O error.
        source: io::Error,
    },

    /// Property document is not valid JSON of a property.
    #[display("malformed JSON: {_0}")]
    Json(serde_json::Error),

    /// Property cannot be walked through the editor.
    #[display("cannot walk through the editor: {_0}")]
    Navigation(NavigationError),

    /// Property cannot be normalized.
    #[display("cannot normalize: {_0}")]
    Normalize(step::Invalid),

    /// Property cannot be submitted.
    #[display("cannot submit: {_0}")]
    Submit(Traced<submit_draft::ExecutionError>),
}

#[cfg(test)]
mod spec {
    use std::{error::Error as _, io, path::PathBuf};

    use super::Error;

    #[test]
    fn reports_unreadable_document() {
        let err = Error::Read {
            path: PathBuf::from("missing.json"),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };

        assert_eq!(
            err.to_string(),
            "failed to read `missing.json`: not found",
        );
        assert!(err.source().is_some());
    }

    #[test]
    fn converts_malformed_json() {
        let json = serde_json::from_str::<u8>("{").unwrap_err();

        let err = Error::from(json);

        assert!(matches!(err, Error::Json(_)));
        assert!(err.to_string().starts_with("malformed JSON: "));
    }
}
