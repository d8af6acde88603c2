use mealbook_shared::clean_name;
use scraper::{ElementRef, Html, Selector};
use serde::Serialize;
use serde_json::Value;

/// Recipe fields read from a web page, before catalog matching.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct ImportedRecipe {
    pub name: String,
    pub description: String,
    pub servings: u32,
    pub instructions: String,
    pub ingredients: Vec<String>,
    pub source_url: Option<String>,
}

fn selector(css: &str) -> mealbook_shared::Result<Selector> {
    Ok(Selector::parse(css).map_err(|e| anyhow::anyhow!("invalid selector '{css}': {e}"))?)
}

/// Plain text of a value that may still carry markup or entities.
fn plain_text(value: &str) -> String {
    let fragment = Html::parse_fragment(value);

    clean_name(&fragment.root_element().text().collect::<Vec<_>>().join(" "))
}

fn element_text(element: ElementRef) -> String {
    clean_name(&element.text().collect::<Vec<_>>().join(" "))
}

/// First integer found in the text, used for `recipeYield` values like "4 servings".
fn first_integer(value: &str) -> Option<u32> {
    let digits = value
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect::<String>();

    digits.parse().ok()
}

fn servings(value: Option<&Value>) -> u32 {
    let servings = match value {
        Some(Value::Number(n)) => n.as_f64().map(|n| n.round() as u32),
        Some(Value::String(s)) => first_integer(s),
        Some(Value::Array(items)) => items.iter().find_map(|v| match v {
            Value::Number(n) => n.as_f64().map(|n| n.round() as u32),
            Value::String(s) => first_integer(s),
            _ => None,
        }),
        _ => None,
    };

    servings.unwrap_or(1).clamp(1, 100)
}

fn is_recipe(map: &serde_json::Map<String, Value>) -> bool {
    let matches = |t: &str| t == "Recipe" || t.ends_with("/Recipe") || t == "schema:Recipe";

    match map.get("@type") {
        Some(Value::String(t)) => matches(t),
        Some(Value::Array(types)) => types.iter().filter_map(Value::as_str).any(matches),
        _ => false,
    }
}

fn find_recipe(value: &Value) -> Option<&serde_json::Map<String, Value>> {
    match value {
        Value::Array(items) => items.iter().find_map(find_recipe),
        Value::Object(map) if is_recipe(map) => Some(map),
        Value::Object(map) => map.get("@graph").and_then(find_recipe),
        _ => None,
    }
}

fn string_field(map: &serde_json::Map<String, Value>, key: &str) -> String {
    match map.get(key) {
        Some(Value::String(s)) => plain_text(s),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .next()
            .map(plain_text)
            .unwrap_or_default(),
        _ => String::new(),
    }
}

fn collect_steps(value: &Value, steps: &mut Vec<String>) {
    match value {
        Value::String(s) => {
            let text = plain_text(s);
            if !text.is_empty() {
                steps.push(text);
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_steps(item, steps);
            }
        }
        Value::Object(map) => {
            if let Some(items) = map.get("itemListElement") {
                collect_steps(items, steps);
            } else if let Some(text) = map.get("text").or_else(|| map.get("name")) {
                collect_steps(text, steps);
            }
        }
        _ => {}
    }
}

fn from_json_ld(map: &serde_json::Map<String, Value>) -> ImportedRecipe {
    let mut steps = vec![];
    if let Some(instructions) = map.get("recipeInstructions") {
        collect_steps(instructions, &mut steps);
    }

    let ingredients = match map.get("recipeIngredient").or_else(|| map.get("ingredients")) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(plain_text)
            .filter(|l| !l.is_empty())
            .collect(),
        Some(Value::String(s)) => vec![plain_text(s)],
        _ => vec![],
    };

    let source_url = Some(string_field(map, "url")).filter(|u| !u.is_empty());

    ImportedRecipe {
        name: string_field(map, "name"),
        description: string_field(map, "description"),
        servings: servings(map.get("recipeYield")),
        instructions: steps.join("\n"),
        ingredients,
        source_url,
    }
}

fn json_ld(document: &Html) -> mealbook_shared::Result<Option<ImportedRecipe>> {
    let scripts = selector(r#"script[type="application/ld+json"]"#)?;

    for script in document.select(&scripts) {
        let content = script.text().collect::<String>();
        let value = match serde_json::from_str::<Value>(content.trim()) {
            Ok(value) => value,
            Err(err) => {
                tracing::debug!(error = %err, "skipping invalid json-ld block");
                continue;
            }
        };

        if let Some(recipe) = find_recipe(&value) {
            return Ok(Some(from_json_ld(recipe)));
        }
    }

    Ok(None)
}

fn microdata(document: &Html) -> mealbook_shared::Result<ImportedRecipe> {
    let scope = selector(r#"[itemtype*="schema.org/Recipe"]"#)?;
    let root = document
        .select(&scope)
        .next()
        .unwrap_or_else(|| document.root_element());

    let first = |css: &str| -> mealbook_shared::Result<Option<String>> {
        let sel = selector(css)?;

        Ok(root.select(&sel).next().map(|el| {
            el.value()
                .attr("content")
                .map(plain_text)
                .unwrap_or_else(|| element_text(el))
        }))
    };

    let ingredients_sel = selector(r#"[itemprop="recipeIngredient"], [itemprop="ingredients"]"#)?;
    let ingredients = root
        .select(&ingredients_sel)
        .map(element_text)
        .filter(|l| !l.is_empty())
        .collect();

    let instructions_sel = selector(r#"[itemprop="recipeInstructions"]"#)?;
    let instructions = root
        .select(&instructions_sel)
        .map(element_text)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    let servings = first(r#"[itemprop="recipeYield"]"#)?
        .and_then(|y| first_integer(&y))
        .unwrap_or(1)
        .clamp(1, 100);

    Ok(ImportedRecipe {
        name: first(r#"[itemprop="name"]"#)?.unwrap_or_default(),
        description: first(r#"[itemprop="description"]"#)?.unwrap_or_default(),
        servings,
        instructions,
        ingredients,
        source_url: None,
    })
}

/// Reads a recipe from an HTML page, preferring schema.org JSON-LD over
/// microdata. Fails when no name or no ingredient line can be found.
pub fn extract(html: &str) -> mealbook_shared::Result<ImportedRecipe> {
    let document = Html::parse_document(html);

    let mut recipe = match json_ld(&document)? {
        Some(recipe) => recipe,
        None => microdata(&document)?,
    };

    if recipe.name.is_empty() {
        for css in ["h1", "title"] {
            let sel = selector(css)?;
            if let Some(el) = document.select(&sel).next() {
                recipe.name = element_text(el);
            }

            if !recipe.name.is_empty() {
                break;
            }
        }
    }

    if recipe.name.is_empty() || recipe.ingredients.is_empty() {
        mealbook_shared::user!("no recipe found in the page");
    }

    Ok(recipe)
}
