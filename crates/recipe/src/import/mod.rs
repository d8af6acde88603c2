mod html;
mod line;
mod matcher;

pub use html::{ImportedRecipe, extract};
pub use line::{ParsedLine, parse_line, unit_factor};
pub use matcher::{DEFAULT_THRESHOLD, IngredientMatch, Matcher, normalize};

use mealbook_shared::recipe::{IngredientCategory, Nutrition, Unit};
use serde::{Deserialize, Serialize};
use std::{
    collections::{BTreeMap, HashMap},
    ops::Deref,
};

use crate::{
    CreateInput, IngredientLine,
    ingredient::{self, CreateIngredientInput},
};

#[derive(Debug, Clone, Serialize)]
pub struct PreviewLine {
    pub parsed: ParsedLine,
    pub matched: Option<IngredientMatch>,
    /// The matched catalog entry is counted in another unit.
    pub unit_mismatch: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImportPreview {
    pub recipe: ImportedRecipe,
    pub lines: Vec<PreviewLine>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImportOptions {
    #[serde(default)]
    pub folder_id: Option<String>,
    #[serde(default = "default_create_missing")]
    pub create_missing: bool,
    #[serde(default)]
    pub threshold: Option<f64>,
}

fn default_create_missing() -> bool {
    true
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            folder_id: None,
            create_missing: true,
            threshold: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ImportOutcome {
    pub recipe_id: String,
    /// Lines matched to an existing catalog ingredient.
    pub matched: usize,
    /// Names of the catalog ingredients created for unmatched lines.
    pub created: Vec<String>,
    /// Raw lines left out of the recipe.
    pub skipped: Vec<String>,
}

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

fn truncate(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}

fn check_threshold(threshold: Option<f64>) -> mealbook_shared::Result<f64> {
    let threshold = threshold.unwrap_or(DEFAULT_THRESHOLD);

    if !(0.0..=1.0).contains(&threshold) {
        mealbook_shared::user!("match threshold must be between 0 and 1");
    }

    Ok(threshold)
}

/// Quantity of a parsed line expressed in the catalog unit. Grams and
/// millilitres convert one to one, pieces keep the written number.
fn convert(parsed: &ParsedLine, unit: Unit) -> f64 {
    match (parsed.unit, unit) {
        (a, b) if a == b => parsed.amount,
        (Unit::Gram, Unit::Millilitre) | (Unit::Millilitre, Unit::Gram) => parsed.amount,
        _ => parsed.quantity.unwrap_or(1.0),
    }
}

impl Command {
    pub fn new(state: mealbook_shared::State) -> Self {
        Self { state }
    }

    async fn catalog(&self) -> anyhow::Result<BTreeMap<String, ingredient::Ingredient>> {
        let ingredients = ingredient::Query(self.state.clone()).list(None).await?;

        Ok(ingredients.into_iter().map(|i| (i.id.to_owned(), i)).collect())
    }

    /// Parses and matches a page without writing anything.
    pub async fn preview(
        &self,
        html: &str,
        threshold: Option<f64>,
    ) -> mealbook_shared::Result<ImportPreview> {
        let threshold = check_threshold(threshold)?;
        let recipe = extract(html)?;
        let catalog = self.catalog().await?;
        let matcher = Matcher::new(
            catalog.values().map(|i| (i.id.to_owned(), i.name.to_owned())),
            threshold,
        );

        let lines = recipe
            .ingredients
            .iter()
            .map(|raw| {
                let parsed = parse_line(raw);
                let matched = matcher.find(&parsed.name);
                let unit_mismatch = matched
                    .as_ref()
                    .and_then(|m| catalog.get(&m.ingredient_id))
                    .is_some_and(|i| i.unit != parsed.unit);

                PreviewLine {
                    parsed,
                    matched,
                    unit_mismatch,
                }
            })
            .collect();

        Ok(ImportPreview { recipe, lines })
    }

    pub async fn import(
        &self,
        html: &str,
        options: ImportOptions,
    ) -> mealbook_shared::Result<ImportOutcome> {
        let threshold = check_threshold(options.threshold)?;
        let recipe = extract(html)?;

        if let Some(folder_id) = options.folder_id.as_deref() {
            let mut conn = self.read_db.acquire().await?;
            if !crate::folder::folder_exists(&mut conn, folder_id).await? {
                mealbook_shared::not_found!("folder {folder_id}");
            }
        }

        let catalog = self.catalog().await?;
        let mut units = catalog
            .values()
            .map(|i| (i.id.to_owned(), i.unit))
            .collect::<HashMap<_, _>>();
        let mut matcher = Matcher::new(
            catalog.values().map(|i| (i.id.to_owned(), i.name.to_owned())),
            threshold,
        );

        let ingredients = ingredient::Command::new(self.state.clone());
        let mut lines = vec![];
        let mut matched = 0;
        let mut created = vec![];
        let mut skipped = vec![];

        for raw in recipe.ingredients.iter() {
            let parsed = parse_line(raw);
            if parsed.name.is_empty() {
                tracing::warn!(line = %raw, "skipping ingredient line without a name");
                skipped.push(raw.to_owned());
                continue;
            }

            let ingredient_id = match matcher.find(&parsed.name) {
                Some(found) => {
                    matched += 1;
                    found.ingredient_id
                }
                None if options.create_missing => {
                    let name = truncate(&parsed.name, 100);
                    let id = ingredients
                        .create(CreateIngredientInput {
                            name: name.to_owned(),
                            unit: parsed.unit,
                            category: IngredientCategory::Grocery,
                            nutrition: Nutrition::default(),
                        })
                        .await?;

                    matcher.push(id.to_owned(), name.to_owned());
                    units.insert(id.to_owned(), parsed.unit);
                    created.push(name);
                    id
                }
                None => {
                    tracing::warn!(line = %raw, "skipping unmatched ingredient line");
                    skipped.push(raw.to_owned());
                    continue;
                }
            };

            let unit = units.get(&ingredient_id).copied().unwrap_or(parsed.unit);
            let note = if unit == parsed.unit {
                parsed.note.to_owned()
            } else {
                tracing::warn!(
                    line = %raw,
                    parsed_unit = %parsed.unit,
                    catalog_unit = %unit,
                    "ingredient unit differs from the catalog"
                );
                Some(parsed.raw.to_owned())
            };

            let quantity = convert(&parsed, unit);
            if quantity <= 0.0 || !quantity.is_finite() {
                skipped.push(raw.to_owned());
                continue;
            }

            lines.push(IngredientLine {
                ingredient_id,
                quantity,
                note,
            });
        }

        let recipe_id = crate::Command::new(self.state.clone())
            .create(CreateInput {
                name: truncate(&recipe.name, 120),
                description: truncate(&recipe.description, 4000),
                servings: recipe.servings,
                instructions: truncate(&recipe.instructions, 20000),
                folder_id: options.folder_id,
                source_url: recipe.source_url,
                ingredients: lines,
            })
            .await?;

        tracing::info!(
            recipe.id = %recipe_id,
            matched,
            created = created.len(),
            skipped = skipped.len(),
            "recipe imported"
        );

        Ok(ImportOutcome {
            recipe_id,
            matched,
            created,
            skipped,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_between_units() {
        let cups = parse_line("2 cups milk");
        assert_eq!(convert(&cups, Unit::Millilitre), 480.0);
        assert_eq!(convert(&cups, Unit::Gram), 480.0);
        assert_eq!(convert(&cups, Unit::Piece), 2.0);

        let eggs = parse_line("eggs");
        assert_eq!(convert(&eggs, Unit::Gram), 1.0);
    }

    #[test]
    fn test_threshold_bounds() {
        assert_eq!(check_threshold(None).unwrap(), DEFAULT_THRESHOLD);
        assert_eq!(check_threshold(Some(0.0)).unwrap(), 0.0);
        assert!(check_threshold(Some(1.5)).is_err());
    }
}
