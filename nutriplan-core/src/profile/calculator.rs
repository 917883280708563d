//! Mifflin-St Jeor energy estimates and BMI.
//!
//! Input ranges are enforced by whoever collects the profile; these
//! functions accept any value and never fail.

use super::models::UserProfile;

/// Basal metabolic rate in kcal/day.
pub fn bmr(profile: &UserProfile) -> f64 {
    10.0 * profile.weight_kg + 6.25 * profile.height_cm - 5.0 * f64::from(profile.age)
        + profile.sex.bmr_offset()
}

/// Total daily energy expenditure: BMR scaled by the activity factor.
pub fn tdee(profile: &UserProfile) -> f64 {
    bmr(profile) * profile.activity_level.factor()
}

/// Daily calorie target after the goal adjustment, rounded to the nearest kcal.
pub fn daily_calorie_target(profile: &UserProfile) -> i64 {
    (tdee(profile) + profile.health_goal.calorie_adjustment()).round() as i64
}

pub fn bmi(weight_kg: f64, height_cm: f64) -> f64 {
    let height_m = height_cm / 100.0;
    weight_kg / (height_m * height_m)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::models::{ActivityLevel, BmiCategory, HealthGoal, Sex};

    fn reference_profile(sex: Sex) -> UserProfile {
        UserProfile::new(
            30,
            sex,
            70.0,
            170.0,
            ActivityLevel::Sedentary,
            HealthGoal::Maintain,
        )
    }

    #[test]
    fn male_reference_values() {
        let profile = reference_profile(Sex::Male);
        assert!((bmr(&profile) - 1617.5).abs() < 1e-9);
        assert!((tdee(&profile) - 1941.0).abs() < 1e-9);
        assert_eq!(daily_calorie_target(&profile), 1941);
    }

    #[test]
    fn female_reference_values() {
        let profile = reference_profile(Sex::Female);
        assert!((bmr(&profile) - 1451.5).abs() < 1e-9);
        assert!((tdee(&profile) - 1741.8).abs() < 1e-9);
        assert_eq!(daily_calorie_target(&profile), 1742);
    }

    #[test]
    fn goal_adjusts_target() {
        let mut profile = reference_profile(Sex::Male);
        profile.health_goal = HealthGoal::Lose;
        assert_eq!(daily_calorie_target(&profile), 1441);
        profile.health_goal = HealthGoal::Gain;
        assert_eq!(daily_calorie_target(&profile), 2241);
    }

    #[test]
    fn activity_scales_expenditure() {
        let mut profile = reference_profile(Sex::Male);
        profile.activity_level = ActivityLevel::VeryActive;
        assert!((tdee(&profile) - 1617.5 * 1.9).abs() < 1e-9);
    }

    #[test]
    fn out_of_range_inputs_do_not_panic() {
        let mut profile = reference_profile(Sex::Female);
        profile.weight_kg = 0.0;
        profile.height_cm = 0.0;
        profile.age = 200;
        assert!(daily_calorie_target(&profile) < 0);
    }

    #[test]
    fn bmi_matches_reference() {
        let value = bmi(70.0, 170.0);
        assert!((value - 24.221_453_287).abs() < 1e-6);
        assert_eq!(BmiCategory::classify(value), BmiCategory::Overweight);
    }
}
