use chrono::Utc;
use rand::Rng;
use rand_chacha::ChaCha20Rng;
use tracing::{debug, info};

use super::models::{DayPlan, MealPlan};
use super::selection::{pick_uniform, pick_with_replacement, resolve_seed, seeded_rng};
use super::{PlanError, PlanResult};
use crate::catalog::{filter_for_profile, Catalog, FoodItem, MealSlot};
use crate::config::{PlannerSection, DEFAULT_DAYS, SNACKS_PER_DAY};
use crate::profile::{daily_calorie_target, UserProfile};

#[derive(Debug, Clone)]
pub struct PlannerConfig {
    pub days: usize,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self { days: DEFAULT_DAYS }
    }
}

impl From<&PlannerSection> for PlannerConfig {
    fn from(section: &PlannerSection) -> Self {
        Self { days: section.days }
    }
}

/// Samples meal plans from a catalog using an injected RNG.
///
/// Every day is drawn independently: one breakfast, lunch and dinner, plus
/// two snacks drawn with replacement. There is no memory across days.
pub struct MealPlanner<R> {
    rng: R,
    seed: Option<u64>,
    config: PlannerConfig,
}

impl MealPlanner<ChaCha20Rng> {
    pub fn seeded(seed: u64, config: PlannerConfig) -> Self {
        Self {
            rng: seeded_rng(seed),
            seed: Some(seed),
            config,
        }
    }

    /// Uses the given seed, or draws one so the run can still be replayed.
    pub fn from_seed_or_entropy(seed: Option<u64>, config: PlannerConfig) -> Self {
        Self::seeded(resolve_seed(seed), config)
    }
}

impl<R: Rng> MealPlanner<R> {
    pub fn new(rng: R, config: PlannerConfig) -> Self {
        Self {
            rng,
            seed: None,
            config,
        }
    }

    /// Generates a plan from an already filtered catalog.
    ///
    /// Fails before drawing anything if a slot has no foods; a partial plan
    /// is never returned.
    pub fn generate(&mut self, catalog: &Catalog, calorie_target: i64) -> PlanResult<MealPlan> {
        if self.config.days == 0 {
            return Err(PlanError::NoDays);
        }
        if let Some(slot) = MealSlot::ALL
            .into_iter()
            .find(|slot| catalog.slot(*slot).is_empty())
        {
            return Err(PlanError::EmptySlot { slot });
        }

        let days = (1..=self.config.days)
            .map(|day| self.sample_day(catalog, day))
            .collect::<PlanResult<Vec<_>>>()?;

        info!(
            target: "planner",
            days = days.len(),
            calorie_target,
            seed = ?self.seed,
            "meal plan generated"
        );
        Ok(MealPlan {
            days,
            calorie_target,
            seed: self.seed,
            generated_at: Utc::now(),
        })
    }

    /// Filters the catalog for the profile, computes its calorie target and generates.
    pub fn generate_for_profile(
        &mut self,
        catalog: &Catalog,
        profile: &UserProfile,
    ) -> PlanResult<MealPlan> {
        let filtered = filter_for_profile(catalog, profile);
        let target = daily_calorie_target(profile);
        self.generate(&filtered, target)
    }

    fn sample_day(&mut self, catalog: &Catalog, day: usize) -> PlanResult<DayPlan> {
        let breakfast = self.pick(catalog, MealSlot::Breakfast)?;
        let lunch = self.pick(catalog, MealSlot::Lunch)?;
        let dinner = self.pick(catalog, MealSlot::Dinner)?;
        let snacks = pick_with_replacement(
            catalog.slot(MealSlot::Snacks),
            SNACKS_PER_DAY,
            &mut self.rng,
        );
        let [first, second] = snacks.as_slice() else {
            return Err(PlanError::EmptySlot {
                slot: MealSlot::Snacks,
            });
        };
        let plan = DayPlan::new(
            day,
            breakfast,
            lunch,
            dinner,
            [FoodItem::clone(first), FoodItem::clone(second)],
        );
        debug!(
            target: "planner",
            day = %plan.label,
            calories = plan.nutrition.calories,
            "day sampled"
        );
        Ok(plan)
    }

    fn pick(&mut self, catalog: &Catalog, slot: MealSlot) -> PlanResult<FoodItem> {
        pick_uniform(catalog.slot(slot), &mut self.rng)
            .cloned()
            .ok_or(PlanError::EmptySlot { slot })
    }
}
