pub mod commands;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use nutriplan_core::{
    bmi, bmr, daily_calorie_target, export_csv, health_tips, inspect_catalog,
    load_catalog_or_empty, load_nutriplan_config_or_default, tdee, BmiCategory, Catalog,
    ExportSummary, MacroBreakdown, MealPlan, MealPlanner, MealSlot,
    NutriplanConfig, PlannerConfig, TrendSummary, UserProfile, ValidationReport,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::commands::{CatalogCommands, CatalogShowArgs, PlanArgs, ProfileArgs};

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(#[from] nutriplan_core::ConfigError),
    #[error("catalog error: {0}")]
    Catalog(#[from] nutriplan_core::CatalogError),
    #[error("plan error: {0}")]
    Plan(#[from] nutriplan_core::PlanError),
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("catalog validation failed: {0}")]
    InvalidCatalog(String),
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Calorie target and weekly meal plan generator", long_about = None)]
pub struct Cli {
    /// Path to nutriplan.toml (defaults apply when absent)
    #[arg(long, default_value = "configs/nutriplan.toml")]
    pub config: PathBuf,
    /// Food catalog JSON (overrides catalog.path)
    #[arg(long)]
    pub catalog: Option<PathBuf>,
    /// Additional catalog merged after the main one (repeatable)
    #[arg(long = "extra-catalog")]
    pub extra_catalog: Vec<PathBuf>,
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    /// Enable debug logging on stderr
    #[arg(long, short, default_value_t = false)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Shows BMI, energy expenditure and the daily calorie target
    Profile(ProfileArgs),
    /// Generates a meal plan for the given profile
    Plan(PlanArgs),
    /// Catalog maintenance
    #[command(subcommand)]
    Catalog(CatalogCommands),
    /// Lists general health tips
    Tips,
}

pub fn run(cli: Cli) -> Result<()> {
    let context = AppContext::new(&cli)?;

    match &cli.command {
        Commands::Profile(args) => {
            let report = ProfileReport::from_profile(args.to_profile());
            render(&report, cli.format)?;
        }
        Commands::Plan(args) => {
            let report = context.plan(args)?;
            render(&report, cli.format)?;
        }
        Commands::Catalog(CatalogCommands::Validate) => {
            let validation = context.catalog_validate()?;
            render(&validation, cli.format)?;
            if validation.has_fatal() {
                return Err(AppError::InvalidCatalog(
                    "one or more catalog files have invalid foods".to_string(),
                ));
            }
        }
        Commands::Catalog(CatalogCommands::Show(args)) => {
            let listing = context.catalog_show(args);
            render(&listing, cli.format)?;
        }
        Commands::Tips => {
            render(&TipsList::new(), cli.format)?;
        }
    }

    Ok(())
}

fn render<T>(value: &T, format: OutputFormat) -> Result<()>
where
    T: Serialize + DisplayFallback,
{
    match format {
        OutputFormat::Text => {
            println!("{}", value.display());
            Ok(())
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(value)?;
            println!("{}", json);
            Ok(())
        }
    }
}

trait DisplayFallback {
    fn display(&self) -> String;
}

#[derive(Debug)]
struct AppContext {
    config: NutriplanConfig,
    catalog_path: PathBuf,
    extra_catalogs: Vec<PathBuf>,
}

impl AppContext {
    fn new(cli: &Cli) -> Result<Self> {
        let config = load_nutriplan_config_or_default(&cli.config)?;
        let catalog_path = cli
            .catalog
            .clone()
            .unwrap_or_else(|| config.catalog.path.clone());
        let extra_catalogs = if cli.extra_catalog.is_empty() {
            config.catalog.extra.clone()
        } else {
            cli.extra_catalog.clone()
        };
        Ok(Self {
            config,
            catalog_path,
            extra_catalogs,
        })
    }

    /// Loads the main catalog and merges the extras. Broken files degrade to empty.
    fn load_catalog(&self) -> Catalog {
        let base = load_catalog_or_empty(&self.catalog_path);
        self.extra_catalogs.iter().fold(base, |merged, path| {
            let extra = load_catalog_or_empty(path);
            merged.merge(&extra)
        })
    }

    fn plan(&self, args: &PlanArgs) -> Result<PlanReport> {
        let profile = args.profile.to_profile();
        let catalog = self.load_catalog();
        let mut planner_config = PlannerConfig::from(&self.config.planner);
        if let Some(days) = args.days {
            planner_config.days = days;
        }
        let seed = args.seed.or(self.config.planner.seed);
        let mut planner = MealPlanner::from_seed_or_entropy(seed, planner_config);
        let plan = planner.generate_for_profile(&catalog, &profile)?;

        let export = match self.export_path(args, &plan) {
            Some(path) => Some(export_csv(&plan, path)?),
            None => None,
        };

        let breakdowns = plan.days.iter().map(MacroBreakdown::for_day).collect();
        let trend = TrendSummary::from_plan(&plan);
        let tips = if args.tips {
            health_tips().iter().map(|tip| tip.to_string()).collect()
        } else {
            Vec::new()
        };
        Ok(PlanReport {
            profile: ProfileReport::from_profile(profile),
            plan,
            breakdowns,
            trend,
            export,
            tips,
        })
    }

    fn export_path(&self, args: &PlanArgs, plan: &MealPlan) -> Option<PathBuf> {
        if let Some(path) = &args.output {
            return Some(path.clone());
        }
        if !args.export {
            return None;
        }
        let file_name = format!(
            "meal_plan_{}.csv",
            plan.generated_at.format("%Y%m%d_%H%M%S")
        );
        Some(self.config.export.directory.join(file_name))
    }

    fn catalog_validate(&self) -> Result<CatalogValidation> {
        let mut files = Vec::new();
        for path in std::iter::once(&self.catalog_path).chain(self.extra_catalogs.iter()) {
            files.push(self.validate_file(path)?);
        }
        Ok(CatalogValidation { files })
    }

    fn validate_file(&self, path: &Path) -> Result<CatalogFileReport> {
        let (catalog, report) = inspect_catalog(path)?;
        if report.has_fatal() {
            warn!(target: "catalog.loader", path = %path.display(), "catalog has invalid foods");
        } else {
            info!(target: "catalog.loader", path = %path.display(), "catalog valid");
        }
        Ok(CatalogFileReport {
            path: path.to_path_buf(),
            counts: SlotCounts::of(&catalog),
            report,
        })
    }

    fn catalog_show(&self, args: &CatalogShowArgs) -> CatalogListing {
        let catalog = self.load_catalog();
        let slots = MealSlot::ALL
            .into_iter()
            .filter(|slot| args.slot.map_or(true, |wanted| wanted == *slot))
            .map(|slot| SlotListing {
                slot,
                foods: catalog
                    .slot(slot)
                    .iter()
                    .map(|food| FoodEntry {
                        name: food.name.clone(),
                        calories: food.calories,
                        protein: food.protein,
                        carbs: food.carbs,
                        fat: food.fat,
                        category: food.category.iter().cloned().collect(),
                    })
                    .collect(),
            })
            .collect();
        CatalogListing { slots }
    }
}

#[derive(Debug, Serialize)]
pub struct ProfileReport {
    pub profile: UserProfile,
    pub bmi: f64,
    pub bmi_category: BmiCategory,
    pub bmr: f64,
    pub tdee: f64,
    pub calorie_target: i64,
}

impl ProfileReport {
    fn from_profile(profile: UserProfile) -> Self {
        let value = bmi(profile.weight_kg, profile.height_cm);
        Self {
            bmi: value,
            bmi_category: BmiCategory::classify(value),
            bmr: bmr(&profile),
            tdee: tdee(&profile),
            calorie_target: daily_calorie_target(&profile),
            profile,
        }
    }
}

impl DisplayFallback for ProfileReport {
    fn display(&self) -> String {
        let preferences: Vec<&str> = self
            .profile
            .diet_preferences
            .iter()
            .map(|pref| pref.as_str())
            .collect();
        let mut lines = vec![
            format!(
                "Profile: {} y, {}, {:.1} kg, {:.1} cm",
                self.profile.age, self.profile.sex, self.profile.weight_kg, self.profile.height_cm
            ),
            format!(
                "Activity: {} (x{}) | Goal: {} ({:+} kcal)",
                self.profile.activity_level,
                self.profile.activity_level.factor(),
                self.profile.health_goal,
                self.profile.health_goal.calorie_adjustment()
            ),
            format!("Diet: {}", preferences.join(", ")),
        ];
        if !self.profile.allergy_terms.is_empty() {
            lines.push(format!("Avoid: {}", self.profile.allergy_terms.join(", ")));
        }
        lines.push(format!("BMI: {:.1} ({})", self.bmi, self.bmi_category));
        lines.push(format!("BMR: {:.1} kcal | TDEE: {:.1} kcal", self.bmr, self.tdee));
        lines.push(format!("Daily calorie target: {} kcal", self.calorie_target));
        lines.join("\n")
    }
}

#[derive(Debug, Serialize)]
pub struct PlanReport {
    pub profile: ProfileReport,
    pub plan: MealPlan,
    pub breakdowns: Vec<MacroBreakdown>,
    pub trend: TrendSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export: Option<ExportSummary>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tips: Vec<String>,
}

impl DisplayFallback for PlanReport {
    fn display(&self) -> String {
        let mut lines = vec![self.profile.display(), String::new()];
        let seed = self
            .plan
            .seed
            .map(|seed| seed.to_string())
            .unwrap_or_else(|| "-".to_string());
        lines.push(format!(
            "{}-day plan (seed {seed}, generated {})",
            self.plan.days.len(),
            self.plan.generated_at.format("%Y-%m-%d %H:%M UTC")
        ));

        for (day, breakdown) in self.plan.days.iter().zip(&self.breakdowns) {
            lines.push(String::new());
            lines.push(format!("== {} ==", day.label));
            let meals = [
                ("Breakfast", &day.breakfast),
                ("Lunch", &day.lunch),
                ("Dinner", &day.dinner),
                ("Snack", &day.snacks[0]),
                ("Snack", &day.snacks[1]),
            ];
            for (title, food) in meals {
                lines.push(format!(
                    "  {title:<9} {} | {} kcal | P {}g C {}g F {}g",
                    food.name, food.calories, food.protein, food.carbs, food.fat
                ));
            }
            lines.push(format!(
                "  Total     {:.0} kcal ({:+.0} vs target) | P {:.1}g C {:.1}g F {:.1}g",
                day.nutrition.calories,
                day.calorie_delta(self.plan.calorie_target),
                day.nutrition.protein,
                day.nutrition.carbs,
                day.nutrition.fat
            ));
            let (protein, carbs, fat) = breakdown.shares();
            lines.push(format!(
                "  Macros    protein {:.1} kcal ({protein:.1}%) | carbs {:.1} kcal ({carbs:.1}%) | fat {:.1} kcal ({fat:.1}%)",
                breakdown.protein_kcal, breakdown.carbs_kcal, breakdown.fat_kcal
            ));
        }

        lines.push(String::new());
        lines.push(format!(
            "Average: {:.0} kcal/day ({:+.0} vs target {}) | P {:.1}g C {:.1}g F {:.1}g",
            self.trend.average.calories,
            self.trend.average_calorie_delta,
            self.trend.calorie_target,
            self.trend.average.protein,
            self.trend.average.carbs,
            self.trend.average.fat
        ));

        if let Some(export) = &self.export {
            lines.push(format!(
                "Exported {} rows to {} (sha256 {})",
                export.rows,
                export.path.display(),
                export.checksum
            ));
        }
        if !self.tips.is_empty() {
            lines.push(String::new());
            lines.push("Health tips:".to_string());
            for tip in &self.tips {
                lines.push(format!("  - {tip}"));
            }
        }
        lines.join("\n")
    }
}

#[derive(Debug, Serialize)]
pub struct CatalogValidation {
    pub files: Vec<CatalogFileReport>,
}

impl CatalogValidation {
    fn has_fatal(&self) -> bool {
        self.files.iter().any(|file| file.report.has_fatal())
    }
}

#[derive(Debug, Serialize)]
pub struct CatalogFileReport {
    pub path: PathBuf,
    pub counts: SlotCounts,
    pub report: ValidationReport,
}

#[derive(Debug, Serialize)]
pub struct SlotCounts {
    pub breakfast: usize,
    pub lunch: usize,
    pub dinner: usize,
    pub snacks: usize,
}

impl SlotCounts {
    fn of(catalog: &Catalog) -> Self {
        Self {
            breakfast: catalog.breakfast.len(),
            lunch: catalog.lunch.len(),
            dinner: catalog.dinner.len(),
            snacks: catalog.snacks.len(),
        }
    }
}

impl DisplayFallback for CatalogValidation {
    fn display(&self) -> String {
        let mut lines = Vec::new();
        for file in &self.files {
            let status = if file.report.has_fatal() {
                "ERROR"
            } else if file.report.is_empty() {
                "OK"
            } else {
                "WARN"
            };
            lines.push(format!(
                "[{status}] {} (breakfast={} lunch={} dinner={} snacks={})",
                file.path.display(),
                file.counts.breakfast,
                file.counts.lunch,
                file.counts.dinner,
                file.counts.snacks
            ));
            for issue in &file.report.issues {
                lines.push(format!("  - {issue}"));
            }
        }
        lines.join("\n")
    }
}

#[derive(Debug, Serialize)]
pub struct CatalogListing {
    pub slots: Vec<SlotListing>,
}

#[derive(Debug, Serialize)]
pub struct SlotListing {
    pub slot: MealSlot,
    pub foods: Vec<FoodEntry>,
}

#[derive(Debug, Serialize)]
pub struct FoodEntry {
    pub name: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub category: Vec<String>,
}

impl DisplayFallback for CatalogListing {
    fn display(&self) -> String {
        let mut lines = Vec::new();
        for listing in &self.slots {
            lines.push(format!("{} ({})", listing.slot, listing.foods.len()));
            if listing.foods.is_empty() {
                lines.push("  <empty>".to_string());
            }
            for food in &listing.foods {
                lines.push(format!(
                    "  {} | {} kcal | P {}g C {}g F {}g | {}",
                    food.name,
                    food.calories,
                    food.protein,
                    food.carbs,
                    food.fat,
                    food.category.join(", ")
                ));
            }
        }
        lines.join("\n")
    }
}

#[derive(Debug, Serialize)]
pub struct TipsList {
    pub tips: Vec<String>,
}

impl TipsList {
    fn new() -> Self {
        Self {
            tips: health_tips().iter().map(|tip| tip.to_string()).collect(),
        }
    }
}

impl DisplayFallback for TipsList {
    fn display(&self) -> String {
        self.tips
            .iter()
            .map(|tip| format!("- {tip}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nutriplan_core::filter_for_profile;
    use std::fs;
    use tempfile::TempDir;

    fn prepare_test_context(extra_args: &[&str]) -> (TempDir, Cli, AppContext) {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        let catalog = root.join("foods.json");
        fs::copy("../data/sample_foods.json", &catalog).unwrap();
        let config = root.join("nutriplan.toml");
        fs::write(
            &config,
            format!(
                "[catalog]\npath = {:?}\n\n[planner]\ndays = 7\nseed = 42\n\n[export]\ndirectory = {:?}\n",
                catalog.display().to_string(),
                root.join("exports").display().to_string()
            ),
        )
        .unwrap();

        let mut args = vec!["nutriplanctl", "--config", config.to_str().unwrap()];
        args.extend_from_slice(extra_args);
        let cli = Cli::try_parse_from(args).unwrap();
        let context = AppContext::new(&cli).unwrap();
        (temp, cli, context)
    }

    fn plan_args(cli: &Cli) -> &PlanArgs {
        match &cli.command {
            Commands::Plan(args) => args,
            other => panic!("expected plan command, got {other:?}"),
        }
    }

    #[test]
    fn profile_report_matches_reference_values() {
        let cli = Cli::try_parse_from(["nutriplanctl", "profile", "--sex", "female"]).unwrap();
        let Commands::Profile(args) = &cli.command else {
            panic!("expected profile command");
        };
        let report = ProfileReport::from_profile(args.to_profile());
        assert_eq!(report.calorie_target, 1742);
        assert!((report.bmr - 1451.5).abs() < 1e-9);
        assert_eq!(report.bmi_category, BmiCategory::Overweight);
        assert!(report.display().contains("Daily calorie target: 1742 kcal"));
    }

    #[test]
    fn out_of_range_inputs_are_rejected_by_parser() {
        assert!(Cli::try_parse_from(["nutriplanctl", "profile", "--age", "17"]).is_err());
        assert!(Cli::try_parse_from(["nutriplanctl", "profile", "--weight", "151"]).is_err());
        assert!(Cli::try_parse_from(["nutriplanctl", "profile", "--height", "139.9"]).is_err());
        assert!(Cli::try_parse_from(["nutriplanctl", "profile", "--activity", "lazy"]).is_err());
    }

    #[test]
    fn plan_uses_configured_seed_and_exports() {
        let (temp, cli, context) = prepare_test_context(&[
            "plan",
            "--diet",
            "vegetarian",
            "--allergies",
            "peanut",
            "--export",
            "--tips",
        ]);
        let report = context.plan(plan_args(&cli)).unwrap();
        assert_eq!(report.plan.seed, Some(42));
        assert_eq!(report.plan.days.len(), 7);
        assert_eq!(report.breakdowns.len(), 7);
        assert_eq!(report.tips.len(), 8);

        let export = report.export.as_ref().expect("export summary");
        assert!(export.path.starts_with(temp.path().join("exports")));
        let csv = fs::read_to_string(&export.path).unwrap();
        assert_eq!(csv.lines().count(), 8);

        let again = context.plan(plan_args(&cli)).unwrap();
        assert_eq!(again.plan.days, report.plan.days);

        let text = report.display();
        assert!(text.contains("== Day 7 =="));
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["plan"]["days"].as_array().unwrap().len(), 7);
    }

    #[test]
    fn cli_overrides_days_and_output() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("custom.csv");
        let (_temp2, cli, context) = prepare_test_context(&[
            "plan",
            "--days",
            "3",
            "--seed",
            "5",
            "--output",
            output.to_str().unwrap(),
        ]);
        let report = context.plan(plan_args(&cli)).unwrap();
        assert_eq!(report.plan.days.len(), 3);
        assert_eq!(report.plan.seed, Some(5));
        assert_eq!(report.export.unwrap().path, output);
    }

    #[test]
    fn missing_catalog_makes_plan_fail_with_slot_error() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing.json");
        let (_temp2, cli, context) =
            prepare_test_context(&["--catalog", missing.to_str().unwrap(), "plan"]);
        let err = context.plan(plan_args(&cli)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "plan error: catalog missing food items for slot breakfast"
        );
    }

    #[test]
    fn validation_flags_invalid_extra_catalog() {
        let temp = TempDir::new().unwrap();
        let broken = temp.path().join("broken.json");
        fs::write(
            &broken,
            r#"{"breakfast": [{"name": "Toast"}], "lunch": [], "dinner": [], "snacks": []}"#,
        )
        .unwrap();
        let (_temp2, _cli, context) = prepare_test_context(&[
            "--extra-catalog",
            broken.to_str().unwrap(),
            "catalog",
            "validate",
        ]);
        let validation = context.catalog_validate().unwrap();
        assert_eq!(validation.files.len(), 2);
        assert!(!validation.files[0].report.has_fatal());
        assert!(validation.files[1].report.has_fatal());
        assert!(validation.has_fatal());
        assert!(validation.display().contains("[ERROR]"));
    }

    #[test]
    fn catalog_show_filters_by_slot() {
        let (_temp, cli, context) = prepare_test_context(&["catalog", "show", "--slot", "snacks"]);
        let Commands::Catalog(CatalogCommands::Show(args)) = &cli.command else {
            panic!("expected catalog show");
        };
        let listing = context.catalog_show(args);
        assert_eq!(listing.slots.len(), 1);
        assert_eq!(listing.slots[0].slot, MealSlot::Snacks);
        assert_eq!(listing.slots[0].foods.len(), 5);
    }

    #[test]
    fn tips_are_listed() {
        let tips = TipsList::new();
        assert_eq!(tips.tips.len(), 8);
        assert!(tips.display().starts_with("- "));
    }

    #[test]
    fn filter_is_applied_before_sampling() {
        let (_temp, cli, context) =
            prepare_test_context(&["plan", "--diet", "low-carb", "--diet", "high-protein"]);
        let args = plan_args(&cli);
        let profile = args.profile.to_profile();
        let filtered = filter_for_profile(&context.load_catalog(), &profile);
        let report = context.plan(args).unwrap();
        for day in &report.plan.days {
            assert!(filtered.breakfast.contains(&day.breakfast));
            assert!(filtered.snacks.contains(&day.snacks[0]));
        }
    }
}
