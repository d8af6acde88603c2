mod create;
mod delete;
mod meal;
mod update;

pub use create::CreatePlanInput;
pub use meal::{AddMealInput, UpdateMealInput};

use std::ops::Deref;

#[derive(Clone)]
pub struct Command {
    state: mealbook_shared::State,
}

impl Deref for Command {
    type Target = mealbook_shared::State;

    fn deref(&self) -> &Self::Target {
        &self.state
    }
}

impl Command {
    pub fn new(state: mealbook_shared::State) -> Self {
        Self { state }
    }
}

/// Longest range a planner may cover, in days.
pub const MAX_PLAN_DAYS: i64 = 366;

pub fn check_range(start: time::Date, end: time::Date) -> mealbook_shared::Result<()> {
    if end < start {
        mealbook_shared::user!("the end date must not be before the start date");
    }

    if mealbook_shared::days_inclusive(start, end) > MAX_PLAN_DAYS {
        mealbook_shared::user!("a plan can cover at most {} days", MAX_PLAN_DAYS);
    }

    Ok(())
}
