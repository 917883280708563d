use std::collections::BTreeSet;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use super::error::{CatalogError, CatalogResult, ValidationIssue, ValidationReport};
use super::models::{Catalog, FoodItem, MealSlot};

const NUMERIC_FIELDS: [&str; 4] = ["calories", "protein", "carbs", "fat"];

/// Loads and validates a catalog file.
///
/// Missing meal types are tolerated and become empty lists. Any item-level
/// problem fails the load with a report naming every offending food.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> CatalogResult<Catalog> {
    let path = path.as_ref();
    let (catalog, report) = inspect_catalog(path)?;
    if report.has_fatal() {
        return Err(CatalogError::Invalid {
            path: path.to_path_buf(),
            report,
        });
    }
    for issue in &report.issues {
        warn!(target: "catalog.loader", path = %path.display(), "{issue}");
    }
    info!(
        target: "catalog.loader",
        path = %path.display(),
        breakfast = catalog.breakfast.len(),
        lunch = catalog.lunch.len(),
        dinner = catalog.dinner.len(),
        snacks = catalog.snacks.len(),
        "catalog loaded"
    );
    Ok(catalog)
}

/// Loads a catalog, substituting an all-empty one on any failure.
///
/// The failure is logged once; sampling from the result fails later with a
/// slot-level error if the catalog stays empty.
pub fn load_catalog_or_empty<P: AsRef<Path>>(path: P) -> Catalog {
    match load_catalog(path) {
        Ok(catalog) => catalog,
        Err(err) => {
            warn!(target: "catalog.loader", "{err}; using an empty food catalog");
            Catalog::default()
        }
    }
}

/// Reads a catalog and returns the valid items together with every issue
/// found, including slots left empty. Only I/O and JSON syntax errors fail.
pub fn inspect_catalog<P: AsRef<Path>>(path: P) -> CatalogResult<(Catalog, ValidationReport)> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => CatalogError::NotFound {
            path: path.to_path_buf(),
        },
        _ => CatalogError::Io {
            source,
            path: path.to_path_buf(),
        },
    })?;
    let document: Value =
        serde_json::from_str(&content).map_err(|source| CatalogError::InvalidJson {
            source,
            path: path.to_path_buf(),
        })?;
    let (catalog, mut report) = validate_document(&document);
    let unusable: Vec<MealSlot> = report
        .issues
        .iter()
        .filter_map(|issue| match issue {
            ValidationIssue::MissingSlot { slot } | ValidationIssue::SlotNotArray { slot } => {
                Some(*slot)
            }
            _ => None,
        })
        .collect();
    for issue in catalog.validate_completeness() {
        match &issue {
            ValidationIssue::EmptySlot { slot } if unusable.contains(slot) => {}
            _ => report.push(issue),
        }
    }
    Ok((catalog, report))
}

/// Converts a loose JSON document into a typed catalog.
///
/// Invalid foods are dropped from the result and reported; all problems are
/// collected rather than stopping at the first one.
pub fn validate_document(document: &Value) -> (Catalog, ValidationReport) {
    let mut catalog = Catalog::default();
    let mut report = ValidationReport::default();

    let Some(root) = document.as_object() else {
        report.push(ValidationIssue::NotAnObject);
        return (catalog, report);
    };

    for key in root.keys() {
        if key.parse::<MealSlot>().is_err() {
            debug!(target: "catalog.loader", key = %key, "ignoring unknown catalog key");
        }
    }

    for slot in MealSlot::ALL {
        let Some(entries) = root.get(slot.as_str()) else {
            report.push(ValidationIssue::MissingSlot { slot });
            continue;
        };
        let Some(entries) = entries.as_array() else {
            report.push(ValidationIssue::SlotNotArray { slot });
            continue;
        };
        for (index, entry) in entries.iter().enumerate() {
            match parse_food(slot, index, entry) {
                Ok(food) => catalog.slot_mut(slot).push(food),
                Err(issues) => report.extend(issues),
            }
        }
    }

    (catalog, report)
}

fn parse_food(
    slot: MealSlot,
    index: usize,
    entry: &Value,
) -> Result<FoodItem, Vec<ValidationIssue>> {
    let Some(object) = entry.as_object() else {
        return Err(vec![ValidationIssue::FoodNotObject { slot, index }]);
    };

    let label = object
        .get("name")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| format!("{slot}#{index}"));
    let mut issues = Vec::new();

    let name = match object.get("name") {
        Some(Value::String(name)) => Some(name.clone()),
        Some(_) => {
            issues.push(invalid(slot, &label, "name", "string"));
            None
        }
        None => {
            issues.push(missing(slot, &label, "name"));
            None
        }
    };

    let mut numbers = [0.0_f64; 4];
    for (value, field) in numbers.iter_mut().zip(NUMERIC_FIELDS) {
        match read_number(object, field) {
            Ok(number) => *value = number,
            Err(FieldProblem::Missing) => issues.push(missing(slot, &label, field)),
            Err(FieldProblem::WrongType) => issues.push(invalid(slot, &label, field, "number")),
        }
    }

    let category = match read_categories(object) {
        Ok(category) => Some(category),
        Err(FieldProblem::Missing) => {
            issues.push(missing(slot, &label, "category"));
            None
        }
        Err(FieldProblem::WrongType) => {
            issues.push(invalid(slot, &label, "category", "array of strings"));
            None
        }
    };

    match (name, category) {
        (Some(name), Some(category)) if issues.is_empty() => {
            let [calories, protein, carbs, fat] = numbers;
            Ok(FoodItem {
                name,
                calories,
                protein,
                carbs,
                fat,
                category,
            })
        }
        _ => Err(issues),
    }
}

enum FieldProblem {
    Missing,
    WrongType,
}

fn read_number(object: &Map<String, Value>, field: &str) -> Result<f64, FieldProblem> {
    object
        .get(field)
        .ok_or(FieldProblem::Missing)?
        .as_f64()
        .ok_or(FieldProblem::WrongType)
}

fn read_categories(object: &Map<String, Value>) -> Result<BTreeSet<String>, FieldProblem> {
    let values = object
        .get("category")
        .ok_or(FieldProblem::Missing)?
        .as_array()
        .ok_or(FieldProblem::WrongType)?;
    values
        .iter()
        .map(|value| {
            value
                .as_str()
                .map(str::to_string)
                .ok_or(FieldProblem::WrongType)
        })
        .collect()
}

fn missing(slot: MealSlot, food: &str, field: &'static str) -> ValidationIssue {
    ValidationIssue::MissingField {
        slot,
        food: food.to_string(),
        field,
    }
}

fn invalid(
    slot: MealSlot,
    food: &str,
    field: &'static str,
    expected: &'static str,
) -> ValidationIssue {
    ValidationIssue::InvalidField {
        slot,
        food: food.to_string(),
        field,
        expected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn valid_document_builds_typed_catalog() {
        let document = json!({
            "breakfast": [{"name": "Oatmeal", "calories": 150, "protein": 5, "carbs": 27, "fat": 3, "category": ["vegetarian"]}],
            "lunch": [],
            "dinner": [],
            "snacks": [{"name": "Apple", "calories": 95.5, "protein": 0.5, "carbs": 25, "fat": 0.3, "category": []}]
        });
        let (catalog, report) = validate_document(&document);
        assert!(report.is_empty());
        assert_eq!(catalog.breakfast.len(), 1);
        assert_eq!(catalog.breakfast[0].calories, 150.0);
        assert!(catalog.breakfast[0].in_category("vegetarian"));
        assert_eq!(catalog.snacks[0].calories, 95.5);
    }

    #[test]
    fn missing_slots_are_non_fatal() {
        let document = json!({
            "breakfast": [{"name": "Oatmeal", "calories": 150, "protein": 5, "carbs": 27, "fat": 3, "category": []}]
        });
        let (catalog, report) = validate_document(&document);
        assert_eq!(catalog.breakfast.len(), 1);
        assert!(catalog.snacks.is_empty());
        assert_eq!(report.issues.len(), 3);
        assert!(!report.has_fatal());
    }

    #[test]
    fn reports_every_missing_field() {
        let document = json!({
            "breakfast": [
                {"name": "Toast", "calories": 120, "category": ["vegetarian"]},
                {"calories": "lots", "protein": 1, "carbs": 1, "fat": 1, "category": "vegan"}
            ],
            "lunch": [], "dinner": [], "snacks": []
        });
        let (catalog, report) = validate_document(&document);
        assert!(catalog.breakfast.is_empty());
        assert!(report.has_fatal());

        let messages: Vec<String> = report.issues.iter().map(ToString::to_string).collect();
        assert!(messages.contains(
            &"food 'Toast' in breakfast is missing required field: protein".to_string()
        ));
        assert!(messages.contains(
            &"food 'Toast' in breakfast is missing required field: carbs".to_string()
        ));
        assert!(messages
            .contains(&"food 'Toast' in breakfast is missing required field: fat".to_string()));
        assert!(messages.contains(
            &"food 'breakfast#1' in breakfast is missing required field: name".to_string()
        ));
        assert!(messages.contains(
            &"food 'breakfast#1' in breakfast has invalid field calories: expected number"
                .to_string()
        ));
        assert!(messages.contains(
            &"food 'breakfast#1' in breakfast has invalid field category: expected array of strings"
                .to_string()
        ));
        assert_eq!(report.issues.len(), 6);
    }

    #[test]
    fn non_object_root_is_rejected() {
        let (catalog, report) = validate_document(&json!([1, 2, 3]));
        assert!(catalog.is_empty());
        assert_eq!(report.issues, vec![ValidationIssue::NotAnObject]);
    }

    #[test]
    fn slot_must_be_array() {
        let document = json!({"breakfast": {}, "lunch": [], "dinner": [], "snacks": [42]});
        let (_, report) = validate_document(&document);
        assert!(report.issues.contains(&ValidationIssue::SlotNotArray {
            slot: MealSlot::Breakfast
        }));
        assert!(report.issues.contains(&ValidationIssue::FoodNotObject {
            slot: MealSlot::Snacks,
            index: 0
        }));
    }
}
