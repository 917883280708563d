use std::collections::BTreeSet;

use tracing::{debug, warn};

use super::models::{Catalog, FoodItem, MealSlot};
use crate::profile::{DietPreference, UserProfile};

/// Narrows every slot to foods matching the preferences and free of allergens.
///
/// With the no-preference sentinel (or no preferences at all) the catalog is
/// returned unchanged. A slot whose filtered list would be empty falls back to
/// its full list, so every non-empty input slot stays non-empty.
pub fn filter_catalog(
    catalog: &Catalog,
    preferences: &BTreeSet<DietPreference>,
    allergy_terms: &[String],
) -> Catalog {
    if preferences.is_empty() || preferences.contains(&DietPreference::NoPreference) {
        debug!(target: "catalog.filter", "no dietary preference, catalog unchanged");
        return catalog.clone();
    }

    let labels: Vec<&str> = preferences
        .iter()
        .filter_map(DietPreference::category_label)
        .collect();
    let allergens: Vec<String> = allergy_terms
        .iter()
        .map(|term| term.trim().to_lowercase())
        .filter(|term| !term.is_empty())
        .collect();

    let mut filtered = Catalog::default();
    for slot in MealSlot::ALL {
        let source = catalog.slot(slot);
        let kept: Vec<FoodItem> = source
            .iter()
            .filter(|food| is_eligible(food, &labels, &allergens))
            .cloned()
            .collect();
        if kept.is_empty() && !source.is_empty() {
            warn!(
                target: "catalog.filter",
                slot = %slot,
                "no food matches preferences and allergies, using the full {slot} list"
            );
            *filtered.slot_mut(slot) = source.to_vec();
        } else {
            debug!(
                target: "catalog.filter",
                slot = %slot,
                kept = kept.len(),
                total = source.len(),
                "slot filtered"
            );
            *filtered.slot_mut(slot) = kept;
        }
    }
    filtered
}

pub fn filter_for_profile(catalog: &Catalog, profile: &UserProfile) -> Catalog {
    filter_catalog(catalog, &profile.diet_preferences, &profile.allergy_terms)
}

fn is_eligible(food: &FoodItem, labels: &[&str], allergens: &[String]) -> bool {
    let matches_preference = labels.iter().any(|label| food.in_category(label));
    if !matches_preference {
        return false;
    }
    let name = food.name.to_lowercase();
    !allergens.iter().any(|term| name.contains(term.as_str()))
}
