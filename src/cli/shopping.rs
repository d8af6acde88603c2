use anyhow::Result;
use mealbook_shared::format_date;
use mealbook_shopping::ShoppingList;
use std::fmt::Write;

use crate::config::Config;

/// Plain-text rendering, one section per category.
pub fn render_list(list: &ShoppingList) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} ({} to {})",
        list.plan.name,
        format_date(list.plan.start),
        format_date(list.plan.end)
    );

    if list.lines.is_empty() {
        let _ = writeln!(out, "\nNothing to buy.");
        return out;
    }

    let mut category = None;
    for line in list.lines.iter() {
        if category != Some(line.category) {
            category = Some(line.category);
            let _ = writeln!(out, "\n{}", line.category);
        }

        let mark = if line.checked { "x" } else { " " };
        let _ = writeln!(
            out,
            "[{mark}] {} {} ({})",
            line.name,
            line.formatted,
            line.recipes.join(", ")
        );
    }

    out
}

#[tracing::instrument(skip(config))]
pub async fn print(config: &Config, list_id: &str, checked_last: bool) -> Result<()> {
    let state = super::open_state(config).await?;
    let Some(list) = mealbook_shopping::Query(state)
        .load(list_id, checked_last)
        .await?
    else {
        anyhow::bail!("shopping list {list_id} not found");
    };

    print!("{}", render_list(&list));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mealbook_mealplan::Plan;
    use mealbook_shared::{
        mealplan::PlanKind,
        recipe::{IngredientCategory, Unit},
    };
    use mealbook_shopping::ShoppingLine;
    use time::macros::date;

    fn line(name: &str, category: IngredientCategory, checked: bool) -> ShoppingLine {
        ShoppingLine {
            ingredient_id: name.to_lowercase(),
            name: name.to_owned(),
            unit: Unit::Gram,
            category,
            required: 250.0,
            quantity: 250.0,
            overridden: false,
            checked,
            formatted: "250 g".to_owned(),
            recipes: vec!["Soup".to_owned(), "Stew".to_owned()],
        }
    }

    fn list(lines: Vec<ShoppingLine>) -> ShoppingList {
        ShoppingList {
            plan: Plan {
                id: "l".to_owned(),
                kind: PlanKind::ShoppingList,
                name: "Groceries".to_owned(),
                start: date!(2025 - 03 - 03),
                end: date!(2025 - 03 - 09),
                source_plan_id: None,
                created_at: 0,
            },
            lines,
        }
    }

    #[test]
    fn test_render_groups_by_category() {
        let text = render_list(&list(vec![
            line("Carrot", IngredientCategory::FruitsAndVegetables, false),
            line("Leek", IngredientCategory::FruitsAndVegetables, true),
            line("Rice", IngredientCategory::Grocery, false),
        ]));

        assert_eq!(
            text,
            "Groceries (2025-03-03 to 2025-03-09)\n\
             \nFruitsAndVegetables\n\
             [ ] Carrot 250 g (Soup, Stew)\n\
             [x] Leek 250 g (Soup, Stew)\n\
             \nGrocery\n\
             [ ] Rice 250 g (Soup, Stew)\n"
        );
    }

    #[test]
    fn test_render_empty_list() {
        let text = render_list(&list(vec![]));

        assert!(text.ends_with("\nNothing to buy.\n"));
    }
}
