use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

#[derive(
    EnumString,
    Display,
    VariantArray,
    AsRefStr,
    Default,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
)]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Snack,
    #[default]
    Dinner,
}

impl MealSlot {
    /// Position within the day, stored so meals sort without decoding the name.
    pub fn rank(&self) -> i32 {
        match self {
            MealSlot::Breakfast => 0,
            MealSlot::Lunch => 1,
            MealSlot::Snack => 2,
            MealSlot::Dinner => 3,
        }
    }
}

#[derive(
    EnumString,
    Display,
    VariantArray,
    AsRefStr,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
)]
pub enum PlanKind {
    Planner,
    ShoppingList,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_rank_follows_the_day() {
        let mut slots = vec![MealSlot::Dinner, MealSlot::Breakfast, MealSlot::Snack, MealSlot::Lunch];
        slots.sort_by_key(|s| s.rank());

        assert_eq!(
            slots,
            vec![
                MealSlot::Breakfast,
                MealSlot::Lunch,
                MealSlot::Snack,
                MealSlot::Dinner
            ]
        );
    }
}
