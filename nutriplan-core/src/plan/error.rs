use std::path::PathBuf;

use thiserror::Error;

use crate::catalog::MealSlot;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("catalog missing food items for slot {slot}")]
    EmptySlot { slot: MealSlot },
    #[error("a meal plan must cover at least one day")]
    NoDays,
    #[error("failed to write export {path}: {source}")]
    Export {
        path: PathBuf,
        source: std::io::Error,
    },
}

pub type PlanResult<T> = Result<T, PlanError>;
