use std::iter::Sum;
use std::ops::Add;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::FoodItem;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct NutritionTotals {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl NutritionTotals {
    pub fn of(food: &FoodItem) -> Self {
        Self {
            calories: food.calories,
            protein: food.protein,
            carbs: food.carbs,
            fat: food.fat,
        }
    }

    pub fn scale(self, factor: f64) -> Self {
        Self {
            calories: self.calories * factor,
            protein: self.protein * factor,
            carbs: self.carbs * factor,
            fat: self.fat * factor,
        }
    }
}

impl Add for NutritionTotals {
    type Output = NutritionTotals;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            calories: self.calories + rhs.calories,
            protein: self.protein + rhs.protein,
            carbs: self.carbs + rhs.carbs,
            fat: self.fat + rhs.fat,
        }
    }
}

impl<'a> Sum<&'a FoodItem> for NutritionTotals {
    fn sum<I: Iterator<Item = &'a FoodItem>>(iter: I) -> Self {
        iter.fold(NutritionTotals::default(), |acc, food| {
            acc + NutritionTotals::of(food)
        })
    }
}

/// One generated day. Immutable once built.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DayPlan {
    pub day: usize,
    pub label: String,
    pub breakfast: FoodItem,
    pub lunch: FoodItem,
    pub dinner: FoodItem,
    pub snacks: [FoodItem; 2],
    pub nutrition: NutritionTotals,
}

impl DayPlan {
    pub fn new(
        day: usize,
        breakfast: FoodItem,
        lunch: FoodItem,
        dinner: FoodItem,
        snacks: [FoodItem; 2],
    ) -> Self {
        let mut plan = Self {
            day,
            label: day_label(day),
            breakfast,
            lunch,
            dinner,
            snacks,
            nutrition: NutritionTotals::default(),
        };
        plan.nutrition = plan.items().into_iter().sum();
        plan
    }

    /// Breakfast, lunch, dinner, then both snacks.
    pub fn items(&self) -> [&FoodItem; 5] {
        [
            &self.breakfast,
            &self.lunch,
            &self.dinner,
            &self.snacks[0],
            &self.snacks[1],
        ]
    }

    pub fn calorie_delta(&self, target: i64) -> f64 {
        self.nutrition.calories - target as f64
    }
}

pub fn day_label(day: usize) -> String {
    format!("Day {day}")
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MealPlan {
    pub days: Vec<DayPlan>,
    pub calorie_target: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub generated_at: DateTime<Utc>,
}

impl MealPlan {
    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}
