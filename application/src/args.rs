//! [`Args`] definitions.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use common::Date;

/// Command line tool of the rental property editor.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,

    /// [`Command`] to run.
    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    /// Parses command line arguments.
    ///
    /// # Errors
    ///
    /// Errors if failed to parse command line arguments.
    pub fn parse() -> Result<Self, clap::Error> {
        <Self as Parser>::try_parse()
    }
}

/// Command to run over a property JSON document.
#[derive(Clone, Debug, Subcommand)]
pub enum Command {
    /// Reports which editor steps the property passes.
    Validate {
        /// Path to the property JSON document.
        path: PathBuf,
    },

    /// Prints the normalized property.
    Normalize {
        /// Path to the property JSON document.
        path: PathBuf,
    },

    /// Walks the property through the editor and submits it to an in-memory
    /// store, printing the persisted property.
    Submit {
        /// Path to the property JSON document.
        path: PathBuf,
    },

    /// Prints the nightly price of the property for a calendar day.
    Quote {
        /// Path to the property JSON document.
        path: PathBuf,

        /// Calendar day in `YYYY-MM-DD` format.
        date: Date,
    },
}

impl Command {
    /// Returns the path of the property JSON document to run over.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Validate { path }
            | Self::Normalize { path }
            | Self::Submit { path }
            | Self::Quote { path, .. } => path,
        }
    }
}
