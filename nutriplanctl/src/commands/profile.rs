use clap::{ArgAction, Args, ValueEnum};
use nutriplan_core::{ActivityLevel, DietPreference, HealthGoal, Sex, UserProfile};

/// Personal data used for the calorie target and food filtering.
#[derive(Args, Debug, Clone)]
pub struct ProfileArgs {
    /// Age in years (18-80)
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u32).range(18..=80))]
    pub age: u32,
    /// Biological sex used by the BMR equation
    #[arg(long, value_enum, default_value_t = SexArg::Male)]
    pub sex: SexArg,
    /// Body weight in kg (40-150)
    #[arg(long, default_value_t = 70.0, value_parser = parse_weight)]
    pub weight: f64,
    /// Height in cm (140-220)
    #[arg(long, default_value_t = 170.0, value_parser = parse_height)]
    pub height: f64,
    /// Activity level
    #[arg(long, value_enum, default_value_t = ActivityArg::Sedentary)]
    pub activity: ActivityArg,
    /// Health goal
    #[arg(long, value_enum, default_value_t = GoalArg::Maintain)]
    pub goal: GoalArg,
    /// Diet preference (repeat for several)
    #[arg(long = "diet", value_enum, action = ArgAction::Append)]
    pub diet: Vec<DietArg>,
    /// Allergens or disliked foods, comma separated
    #[arg(long, default_value = "")]
    pub allergies: String,
}

impl ProfileArgs {
    pub fn to_profile(&self) -> UserProfile {
        UserProfile::new(
            self.age,
            self.sex.into(),
            self.weight,
            self.height,
            self.activity.into(),
            self.goal.into(),
        )
        .with_preferences(self.diet.iter().copied().map(DietPreference::from))
        .with_allergies(&self.allergies)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SexArg {
    Male,
    Female,
}

impl From<SexArg> for Sex {
    fn from(value: SexArg) -> Self {
        match value {
            SexArg::Male => Sex::Male,
            SexArg::Female => Sex::Female,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ActivityArg {
    /// Little or no exercise
    Sedentary,
    /// Exercise 1-3 times a week
    Light,
    /// Exercise 3-5 times a week
    Moderate,
    /// Exercise 6-7 times a week
    Active,
    /// Hard exercise every day
    VeryActive,
}

impl From<ActivityArg> for ActivityLevel {
    fn from(value: ActivityArg) -> Self {
        match value {
            ActivityArg::Sedentary => ActivityLevel::Sedentary,
            ActivityArg::Light => ActivityLevel::Light,
            ActivityArg::Moderate => ActivityLevel::Moderate,
            ActivityArg::Active => ActivityLevel::Active,
            ActivityArg::VeryActive => ActivityLevel::VeryActive,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GoalArg {
    Lose,
    Maintain,
    Gain,
}

impl From<GoalArg> for HealthGoal {
    fn from(value: GoalArg) -> Self {
        match value {
            GoalArg::Lose => HealthGoal::Lose,
            GoalArg::Maintain => HealthGoal::Maintain,
            GoalArg::Gain => HealthGoal::Gain,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DietArg {
    None,
    Vegetarian,
    HighProtein,
    LowCarb,
    GlutenFree,
    LowFat,
}

impl From<DietArg> for DietPreference {
    fn from(value: DietArg) -> Self {
        match value {
            DietArg::None => DietPreference::NoPreference,
            DietArg::Vegetarian => DietPreference::Vegetarian,
            DietArg::HighProtein => DietPreference::HighProtein,
            DietArg::LowCarb => DietPreference::LowCarb,
            DietArg::GlutenFree => DietPreference::GlutenFree,
            DietArg::LowFat => DietPreference::LowFat,
        }
    }
}

fn parse_weight(value: &str) -> Result<f64, String> {
    parse_bounded(value, 40.0, 150.0, "kg")
}

fn parse_height(value: &str) -> Result<f64, String> {
    parse_bounded(value, 140.0, 220.0, "cm")
}

fn parse_bounded(value: &str, min: f64, max: f64, unit: &str) -> Result<f64, String> {
    let parsed: f64 = value
        .trim()
        .parse()
        .map_err(|err| format!("invalid number: {err}"))?;
    if !(min..=max).contains(&parsed) {
        return Err(format!("must be between {min} and {max} {unit}"));
    }
    Ok(parsed)
}
