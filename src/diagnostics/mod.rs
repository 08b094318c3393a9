//! Errors and error reporting.

mod printer;

use std::{io, path::PathBuf};

use thiserror::Error;

use crate::config::validation::ValidationError;

pub use printer::print_error;

pub type GenerateResult<T> = Result<T, GenerateError>;

/// Every failure is fatal to the run.
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("could not read `{}`: {source}", path.display())]
    ReadInput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not write `{}`: {source}", path.display())]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not read config file `{}`: {source}", path.display())]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not parse config file `{}`: {source}", path.display())]
    ParseConfig {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid configuration")]
    Validation(Vec<ValidationError>),
}

impl GenerateError {
    pub(crate) fn read_input<P>(path: P, source: io::Error) -> Self
    where
        P: Into<PathBuf>,
    {
        Self::ReadInput {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn write_output<P>(path: P, source: io::Error) -> Self
    where
        P: Into<PathBuf>,
    {
        Self::WriteOutput {
            path: path.into(),
            source,
        }
    }

    /// Individual problems behind this error, one line each.
    pub fn details(&self) -> Vec<String> {
        match self {
            GenerateError::Validation(errors) => errors.iter().map(ToString::to_string).collect(),
            _ => vec![],
        }
    }
}
