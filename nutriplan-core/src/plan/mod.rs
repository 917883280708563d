pub mod error;
pub mod export;
pub mod models;
pub mod nutrition;
pub mod planner;
pub mod selection;

pub use error::{PlanError, PlanResult};
pub use export::{export_csv, to_csv, ExportSummary};
pub use models::{day_label, DayPlan, MealPlan, NutritionTotals};
pub use nutrition::{MacroBreakdown, TrendPoint, TrendSummary};
pub use planner::{MealPlanner, PlannerConfig};
