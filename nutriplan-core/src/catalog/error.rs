use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use super::models::MealSlot;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog file not found: {path}")]
    NotFound { path: PathBuf },
    #[error("failed to read catalog {path}: {source}")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("catalog {path} is not valid JSON: {source}")]
    InvalidJson {
        source: serde_json::Error,
        path: PathBuf,
    },
    #[error("catalog {path} failed validation: {report}")]
    Invalid {
        path: PathBuf,
        report: ValidationReport,
    },
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// A single structural problem found in a catalog document.
#[derive(Debug, Clone, Error, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationIssue {
    #[error("catalog document must be a JSON object")]
    NotAnObject,
    #[error("missing meal type: {slot}")]
    MissingSlot { slot: MealSlot },
    #[error("meal type {slot} must be an array")]
    SlotNotArray { slot: MealSlot },
    #[error("{slot} has no food items")]
    EmptySlot { slot: MealSlot },
    #[error("{slot} entry #{index} must be an object")]
    FoodNotObject { slot: MealSlot, index: usize },
    #[error("food '{food}' in {slot} is missing required field: {field}")]
    MissingField {
        slot: MealSlot,
        food: String,
        field: &'static str,
    },
    #[error("food '{food}' in {slot} has invalid field {field}: expected {expected}")]
    InvalidField {
        slot: MealSlot,
        food: String,
        field: &'static str,
        expected: &'static str,
    },
}

impl ValidationIssue {
    /// Missing or empty slots degrade to empty lists; everything else drops data.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            ValidationIssue::MissingSlot { .. } | ValidationIssue::EmptySlot { .. }
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn push(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    pub fn extend<I: IntoIterator<Item = ValidationIssue>>(&mut self, issues: I) {
        self.issues.extend(issues);
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn has_fatal(&self) -> bool {
        self.issues.iter().any(ValidationIssue::is_fatal)
    }

    pub fn fatal(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|issue| issue.is_fatal())
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.issues.is_empty() {
            return f.write_str("no issues");
        }
        let messages: Vec<String> = self.issues.iter().map(ToString::to_string).collect();
        f.write_str(&messages.join("; "))
    }
}
