pub mod error;
pub mod filter;
pub mod loader;
pub mod models;

pub use error::{CatalogError, CatalogResult, ValidationIssue, ValidationReport};
pub use filter::{filter_catalog, filter_for_profile};
pub use loader::{inspect_catalog, load_catalog, load_catalog_or_empty, validate_document};
pub use models::{Catalog, FoodItem, MealSlot};
