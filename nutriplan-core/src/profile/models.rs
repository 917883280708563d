use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }

    /// Constant term of the Mifflin-St Jeor equation.
    pub fn bmr_offset(&self) -> f64 {
        match self {
            Sex::Male => 5.0,
            Sex::Female => -161.0,
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum ActivityLevel {
    /// Little or no exercise.
    Sedentary,
    /// Exercise 1-3 times a week.
    Light,
    /// Exercise 3-5 times a week.
    Moderate,
    /// Exercise 6-7 times a week.
    Active,
    /// Hard exercise every day.
    VeryActive,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::Light,
        ActivityLevel::Moderate,
        ActivityLevel::Active,
        ActivityLevel::VeryActive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::Light => "light",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::Active => "active",
            ActivityLevel::VeryActive => "very-active",
        }
    }

    pub fn factor(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Active => 1.725,
            ActivityLevel::VeryActive => 1.9,
        }
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum HealthGoal {
    Lose,
    Maintain,
    Gain,
}

impl HealthGoal {
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthGoal::Lose => "lose",
            HealthGoal::Maintain => "maintain",
            HealthGoal::Gain => "gain",
        }
    }

    /// Signed kcal adjustment applied on top of TDEE.
    pub fn calorie_adjustment(&self) -> f64 {
        match self {
            HealthGoal::Lose => -500.0,
            HealthGoal::Maintain => 0.0,
            HealthGoal::Gain => 300.0,
        }
    }
}

impl fmt::Display for HealthGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "kebab-case")]
pub enum DietPreference {
    /// Sentinel meaning "do not filter".
    #[serde(rename = "none")]
    NoPreference,
    Vegetarian,
    HighProtein,
    LowCarb,
    GlutenFree,
    LowFat,
}

impl DietPreference {
    pub fn as_str(&self) -> &'static str {
        match self {
            DietPreference::NoPreference => "none",
            DietPreference::Vegetarian => "vegetarian",
            DietPreference::HighProtein => "high-protein",
            DietPreference::LowCarb => "low-carb",
            DietPreference::GlutenFree => "gluten-free",
            DietPreference::LowFat => "low-fat",
        }
    }

    /// Catalog category label this preference matches. The sentinel matches nothing.
    pub fn category_label(&self) -> Option<&'static str> {
        match self {
            DietPreference::NoPreference => None,
            other => Some(other.as_str()),
        }
    }
}

impl fmt::Display for DietPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn classify(bmi: f64) -> Self {
        if bmi < 18.5 {
            BmiCategory::Underweight
        } else if bmi < 24.0 {
            BmiCategory::Normal
        } else if bmi < 28.0 {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "underweight",
            BmiCategory::Normal => "normal",
            BmiCategory::Overweight => "overweight",
            BmiCategory::Obese => "obese",
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub age: u32,
    pub sex: Sex,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub activity_level: ActivityLevel,
    pub health_goal: HealthGoal,
    pub diet_preferences: BTreeSet<DietPreference>,
    pub allergy_terms: Vec<String>,
}

impl UserProfile {
    pub fn new(
        age: u32,
        sex: Sex,
        weight_kg: f64,
        height_cm: f64,
        activity_level: ActivityLevel,
        health_goal: HealthGoal,
    ) -> Self {
        Self {
            age,
            sex,
            weight_kg,
            height_cm,
            activity_level,
            health_goal,
            diet_preferences: BTreeSet::from([DietPreference::NoPreference]),
            allergy_terms: Vec::new(),
        }
    }

    /// Replaces the preference set. An empty selection means no preference.
    pub fn with_preferences<I>(mut self, preferences: I) -> Self
    where
        I: IntoIterator<Item = DietPreference>,
    {
        let preferences: BTreeSet<DietPreference> = preferences.into_iter().collect();
        self.diet_preferences = if preferences.is_empty() {
            BTreeSet::from([DietPreference::NoPreference])
        } else {
            preferences
        };
        self
    }

    pub fn with_allergies(mut self, raw: &str) -> Self {
        self.allergy_terms = parse_allergy_terms(raw);
        self
    }
}

/// Splits a comma separated list into trimmed, lowercased, non-empty terms.
pub fn parse_allergy_terms(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_lowercase)
        .collect()
}
