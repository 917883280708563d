use serde::{Deserialize, Serialize};

use super::models::{DayPlan, MealPlan, NutritionTotals};

pub const KCAL_PER_GRAM_PROTEIN: f64 = 4.0;
pub const KCAL_PER_GRAM_CARBS: f64 = 4.0;
pub const KCAL_PER_GRAM_FAT: f64 = 9.0;

/// Calories contributed by each macronutrient.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct MacroBreakdown {
    pub protein_kcal: f64,
    pub carbs_kcal: f64,
    pub fat_kcal: f64,
}

impl MacroBreakdown {
    pub fn from_totals(totals: &NutritionTotals) -> Self {
        Self {
            protein_kcal: totals.protein * KCAL_PER_GRAM_PROTEIN,
            carbs_kcal: totals.carbs * KCAL_PER_GRAM_CARBS,
            fat_kcal: totals.fat * KCAL_PER_GRAM_FAT,
        }
    }

    pub fn for_day(day: &DayPlan) -> Self {
        Self::from_totals(&day.nutrition)
    }

    pub fn total_kcal(&self) -> f64 {
        self.protein_kcal + self.carbs_kcal + self.fat_kcal
    }

    /// Percentage shares (protein, carbs, fat). All zero when there are no calories.
    pub fn shares(&self) -> (f64, f64, f64) {
        let total = self.total_kcal();
        if total <= 0.0 {
            return (0.0, 0.0, 0.0);
        }
        (
            self.protein_kcal / total * 100.0,
            self.carbs_kcal / total * 100.0,
            self.fat_kcal / total * 100.0,
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrendPoint {
    pub label: String,
    pub nutrition: NutritionTotals,
    pub calorie_delta: f64,
}

/// Day-by-day intake against the calorie target, with plan averages.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrendSummary {
    pub calorie_target: i64,
    pub points: Vec<TrendPoint>,
    pub average: NutritionTotals,
    pub average_calorie_delta: f64,
}

impl TrendSummary {
    pub fn from_plan(plan: &MealPlan) -> Self {
        let points: Vec<TrendPoint> = plan
            .days
            .iter()
            .map(|day| TrendPoint {
                label: day.label.clone(),
                nutrition: day.nutrition,
                calorie_delta: day.calorie_delta(plan.calorie_target),
            })
            .collect();

        let average = if points.is_empty() {
            NutritionTotals::default()
        } else {
            points
                .iter()
                .fold(NutritionTotals::default(), |acc, point| acc + point.nutrition)
                .scale(1.0 / points.len() as f64)
        };

        Self {
            calorie_target: plan.calorie_target,
            average_calorie_delta: average.calories - plan.calorie_target as f64,
            points,
            average,
        }
    }
}
