pub mod catalog;
pub mod config;
pub mod error;
pub mod plan;
pub mod profile;
pub mod tips;

pub use catalog::{
    filter_catalog, filter_for_profile, inspect_catalog, load_catalog, load_catalog_or_empty,
    Catalog, CatalogError, CatalogResult, FoodItem, MealSlot, ValidationIssue, ValidationReport,
};
pub use config::{
    load_nutriplan_config, load_nutriplan_config_or_default, CatalogSection, ExportSection,
    NutriplanConfig, PlannerSection,
};
pub use error::{ConfigError, Result};
pub use plan::{
    export_csv, to_csv, DayPlan, ExportSummary, MacroBreakdown, MealPlan, MealPlanner,
    NutritionTotals, PlanError, PlanResult, PlannerConfig, TrendPoint, TrendSummary,
};
pub use profile::{
    bmi, bmr, daily_calorie_target, tdee, ActivityLevel, BmiCategory, DietPreference,
    HealthGoal, Sex, UserProfile,
};
pub use tips::health_tips;
