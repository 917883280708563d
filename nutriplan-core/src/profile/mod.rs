pub mod calculator;
pub mod models;

pub use calculator::{bmi, bmr, daily_calorie_target, tdee};
pub use models::{
    ActivityLevel, BmiCategory, DietPreference, HealthGoal, Sex, UserProfile,
};
