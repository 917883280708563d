use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::info;

use super::models::MealPlan;
use super::{PlanError, PlanResult};

pub const CSV_HEADER: &str = "day,breakfast,lunch,dinner,snack_1,snack_2,total_calories,total_protein_g,total_carbs_g,total_fat_g";

#[derive(Debug, Clone, Serialize)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub rows: usize,
    pub checksum: String,
}

/// Renders one CSV row per day, header first.
pub fn to_csv(plan: &MealPlan) -> String {
    let mut out = String::new();
    out.push_str(CSV_HEADER);
    out.push('\n');
    for day in &plan.days {
        out.push_str(&format!(
            "{},{},{},{},{},{},{},{},{},{}\n",
            escape_field(&day.label),
            escape_field(&day.breakfast.name),
            escape_field(&day.lunch.name),
            escape_field(&day.dinner.name),
            escape_field(&day.snacks[0].name),
            escape_field(&day.snacks[1].name),
            format_number(day.nutrition.calories),
            format_number(day.nutrition.protein),
            format_number(day.nutrition.carbs),
            format_number(day.nutrition.fat),
        ));
    }
    out
}

/// Writes the whole CSV at once and returns its SHA-256.
pub fn export_csv<P: AsRef<Path>>(plan: &MealPlan, path: P) -> PlanResult<ExportSummary> {
    let path = path.as_ref();
    let export_error = |source| PlanError::Export {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(export_error)?;
    }
    let content = to_csv(plan);
    fs::write(path, content.as_bytes()).map_err(export_error)?;
    let checksum = hex::encode(Sha256::digest(content.as_bytes()));
    info!(
        target: "planner.export",
        path = %path.display(),
        rows = plan.days.len(),
        checksum = %checksum,
        "meal plan exported"
    );
    Ok(ExportSummary {
        path: path.to_path_buf(),
        rows: plan.days.len(),
        checksum,
    })
}

fn escape_field(value: &str) -> String {
    if value.contains(['"', ',', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// At most two decimals, without trailing zeros.
fn format_number(value: f64) -> String {
    let formatted = format!("{value:.2}");
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}
