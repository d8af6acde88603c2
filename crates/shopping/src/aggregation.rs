use mealbook_shared::recipe::{IngredientCategory, Unit};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

/// Catalog fields of an ingredient needed on a shopping list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListIngredient {
    pub id: String,
    pub name: String,
    pub unit: Unit,
    pub category: IngredientCategory,
}

/// One ingredient line of one planned meal.
#[derive(Debug, Clone)]
pub struct Requirement {
    pub ingredient: ListIngredient,
    pub recipe_name: String,
    /// Quantity written in the recipe, for `servings` servings.
    pub quantity: f64,
    pub servings: u32,
    pub portions: u32,
}

impl Requirement {
    /// Quantity needed once scaled from the recipe yield to the planned portions.
    pub fn scaled_quantity(&self) -> f64 {
        self.quantity * f64::from(self.portions) / f64::from(self.servings.max(1))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedIngredient {
    pub ingredient: ListIngredient,
    pub quantity: f64,
    /// Contributing recipe names, sorted and unique.
    pub recipes: Vec<String>,
}

/// Groups requirements by ingredient and sums their scaled quantities.
///
/// The result is ordered by category and then by case-insensitive name, so two
/// calls over the same meals produce the same list.
pub fn aggregate(requirements: impl IntoIterator<Item = Requirement>) -> Vec<AggregatedIngredient> {
    let mut groups: HashMap<String, (ListIngredient, f64, BTreeSet<String>)> = HashMap::new();

    for requirement in requirements {
        let quantity = requirement.scaled_quantity();
        let entry = groups
            .entry(requirement.ingredient.id.to_owned())
            .or_insert_with(|| (requirement.ingredient.clone(), 0.0, BTreeSet::new()));

        entry.1 += quantity;
        entry.2.insert(requirement.recipe_name);
    }

    let mut result = groups
        .into_values()
        .map(|(ingredient, quantity, recipes)| AggregatedIngredient {
            ingredient,
            quantity,
            recipes: recipes.into_iter().collect(),
        })
        .collect::<Vec<_>>();

    result.sort_by(|a, b| {
        a.ingredient
            .category
            .cmp(&b.ingredient.category)
            .then_with(|| {
                a.ingredient
                    .name
                    .to_lowercase()
                    .cmp(&b.ingredient.name.to_lowercase())
            })
            .then_with(|| a.ingredient.id.cmp(&b.ingredient.id))
    });

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ingredient(id: &str, name: &str, category: IngredientCategory) -> ListIngredient {
        ListIngredient {
            id: id.to_owned(),
            name: name.to_owned(),
            unit: Unit::Gram,
            category,
        }
    }

    fn requirement(
        ingredient: &ListIngredient,
        recipe: &str,
        quantity: f64,
        servings: u32,
        portions: u32,
    ) -> Requirement {
        Requirement {
            ingredient: ingredient.clone(),
            recipe_name: recipe.to_owned(),
            quantity,
            servings,
            portions,
        }
    }

    #[test]
    fn test_scales_by_portions() {
        let rice = ingredient("rice", "Rice", IngredientCategory::Grocery);
        let result = aggregate([requirement(&rice, "Risotto", 300.0, 4, 2)]);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].quantity, 150.0);
    }

    #[test]
    fn test_sums_and_dedups_recipes() {
        let onion = ingredient("onion", "Onion", IngredientCategory::FruitsAndVegetables);
        let result = aggregate([
            requirement(&onion, "Soup", 100.0, 2, 2),
            requirement(&onion, "Curry", 50.0, 1, 3),
            requirement(&onion, "Soup", 100.0, 2, 4),
        ]);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].quantity, 100.0 + 150.0 + 200.0);
        assert_eq!(result[0].recipes, vec!["Curry", "Soup"]);
    }

    #[test]
    fn test_sorted_by_category_then_name() {
        let milk = ingredient("milk", "milk", IngredientCategory::DairyAndEggs);
        let apple = ingredient("apple", "Apple", IngredientCategory::FruitsAndVegetables);
        let butter = ingredient("butter", "Butter", IngredientCategory::DairyAndEggs);
        let result = aggregate([
            requirement(&milk, "Cake", 200.0, 1, 1),
            requirement(&butter, "Cake", 100.0, 1, 1),
            requirement(&apple, "Cake", 2.0, 1, 1),
        ]);

        let ids = result
            .iter()
            .map(|a| a.ingredient.id.as_str())
            .collect::<Vec<_>>();
        assert_eq!(ids, vec!["apple", "butter", "milk"]);
    }

    #[test]
    fn test_zero_servings_counts_as_one() {
        let salt = ingredient("salt", "Salt", IngredientCategory::Grocery);
        let result = aggregate([requirement(&salt, "Fries", 5.0, 0, 2)]);

        assert_eq!(result[0].quantity, 10.0);
    }

    #[test]
    fn test_zero_quantity_is_kept() {
        let water = ingredient("water", "Water", IngredientCategory::Beverages);
        let result = aggregate([requirement(&water, "Tea", 0.0, 1, 1)]);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].quantity, 0.0);
    }

    #[test]
    fn test_empty() {
        assert!(aggregate(vec![]).is_empty());
    }
}
