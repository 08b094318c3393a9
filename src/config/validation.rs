//! Semantic checks on a parsed [Config]. Syntax is left to serde.
//!
//! All problems are collected and returned together.

use fnv::FnvHashSet;
use thiserror::Error;

use super::{Config, EXT_PLACEHOLDER};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("output file template `{0}` must contain `{{ext}}` exactly once")]
    OutputTemplate(String),

    #[error("output file template `{0}` must be a file name, not a path")]
    OutputTemplatePath(String),

    #[error("alias {field} `{value}` must start with `/`")]
    AliasNotAbsolute { field: &'static str, value: String },

    #[error("alias route `{0}` is declared more than once")]
    DuplicateAliasRoute(String),

    #[error("log tag `{0}` must be non-empty and free of quotes and backslashes")]
    InvalidTag(String),
}

pub fn validate_config(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let template = &config.output.file;
    if template.matches(EXT_PLACEHOLDER).count() != 1 {
        errors.push(ValidationError::OutputTemplate(template.clone()));
    }
    if template.contains('/') || template.contains('\\') {
        errors.push(ValidationError::OutputTemplatePath(template.clone()));
    }

    let mut routes = FnvHashSet::default();
    for alias in &config.aliases {
        if !alias.source.starts_with('/') {
            errors.push(ValidationError::AliasNotAbsolute {
                field: "source",
                value: alias.source.clone(),
            });
        }
        if !alias.route.starts_with('/') {
            errors.push(ValidationError::AliasNotAbsolute {
                field: "route",
                value: alias.route.clone(),
            });
        }
        if !routes.insert(alias.route.as_str()) {
            errors.push(ValidationError::DuplicateAliasRoute(alias.route.clone()));
        }
    }

    let tag = &config.server.tag;
    if tag.is_empty() || tag.contains('"') || tag.contains('\\') || tag.contains('\n') {
        errors.push(ValidationError::InvalidTag(tag.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
