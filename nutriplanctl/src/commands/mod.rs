pub mod catalog;
pub mod plan;
pub mod profile;

pub use catalog::{CatalogCommands, CatalogShowArgs};
pub use plan::PlanArgs;
pub use profile::{ActivityArg, DietArg, GoalArg, ProfileArgs, SexArg};
