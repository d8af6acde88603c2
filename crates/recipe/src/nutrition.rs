use mealbook_shared::recipe::{Nutrition, Unit};

/// Nutrition contributed by `quantity` base units of an ingredient.
pub fn line_nutrition(unit: Unit, per_unit: &Nutrition, quantity: f64) -> Nutrition {
    per_unit.scale(unit.nutrition_factor(quantity))
}

pub fn totals(lines: impl IntoIterator<Item = (Unit, Nutrition, f64)>) -> Nutrition {
    lines
        .into_iter()
        .map(|(unit, nutrition, quantity)| line_nutrition(unit, &nutrition, quantity))
        .sum()
}

pub fn per_serving(totals: &Nutrition, servings: u32) -> Nutrition {
    totals.scale(1.0 / f64::from(servings.max(1)))
}
