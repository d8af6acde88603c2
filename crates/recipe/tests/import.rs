use mealbook_recipe::import::{Command, ImportOptions};
use mealbook_shared::recipe::Unit;
use temp_dir::TempDir;

mod helpers;

const PAGE: &str = r#"<html><head>
<script type="application/ld+json">
{"@context": "https://schema.org", "@type": "Recipe", "name": "Tomato Pasta",
 "recipeYield": "2 servings",
 "recipeIngredient": ["200 g spaghetti", "3 tomatoes, diced", "2 tbsp olive oil",
                      "1 pinch of saffron"],
 "recipeInstructions": [{"@type": "HowToStep", "text": "Cook pasta."},
                        {"@type": "HowToStep", "text": "Add sauce."}]}
</script></head><body></body></html>"#;

#[tokio::test]
async fn test_preview_matches_catalog() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let spaghetti = helpers::create_ingredient(&state, "Spaghetti", Unit::Gram, 350.0).await?;
    let tomato = helpers::create_ingredient(&state, "Tomato", Unit::Piece, 22.0).await?;

    let preview = Command::new(state).preview(PAGE, None).await?;

    assert_eq!(preview.recipe.name, "Tomato Pasta");
    assert_eq!(preview.lines.len(), 4);

    let matched = preview
        .lines
        .iter()
        .map(|l| l.matched.as_ref().map(|m| m.ingredient_id.to_owned()))
        .collect::<Vec<_>>();
    assert_eq!(
        matched,
        vec![Some(spaghetti), Some(tomato), None, None]
    );
    assert!(!preview.lines[1].unit_mismatch);

    Ok(())
}

#[tokio::test]
async fn test_import_creates_missing_ingredients() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let spaghetti = helpers::create_ingredient(&state, "Spaghetti", Unit::Gram, 350.0).await?;
    helpers::create_ingredient(&state, "Tomato", Unit::Piece, 22.0).await?;

    let outcome = Command::new(state.clone())
        .import(PAGE, ImportOptions::default())
        .await?;

    assert_eq!(outcome.matched, 2);
    assert_eq!(outcome.created, vec!["olive oil", "pinch of saffron"]);
    assert!(outcome.skipped.is_empty());

    let recipe = mealbook_recipe::Query(state.clone())
        .find(&outcome.recipe_id)
        .await?
        .unwrap();
    assert_eq!(recipe.servings, 2);
    assert_eq!(recipe.instructions, "Cook pasta.\nAdd sauce.");
    assert_eq!(recipe.ingredients.len(), 4);
    assert_eq!(recipe.ingredients[0].ingredient_id, spaghetti);
    assert_eq!(recipe.ingredients[0].quantity, 200.0);
    assert_eq!(recipe.ingredients[1].quantity, 3.0);
    assert_eq!(recipe.ingredients[1].note.as_deref(), Some("diced"));
    assert_eq!(recipe.ingredients[2].unit, Unit::Millilitre);
    assert_eq!(recipe.ingredients[2].quantity, 30.0);
    assert_eq!(recipe.nutrition.calories, 700.0 + 66.0);

    let oil = mealbook_recipe::ingredient::Query(state)
        .find_by_name("olive oil")
        .await?
        .unwrap();
    assert_eq!(oil.unit, Unit::Millilitre);

    Ok(())
}

#[tokio::test]
async fn test_import_skips_unmatched_lines() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    helpers::create_ingredient(&state, "Spaghetti", Unit::Gram, 350.0).await?;
    helpers::create_ingredient(&state, "Tomato", Unit::Gram, 18.0).await?;

    let outcome = Command::new(state.clone())
        .import(
            PAGE,
            ImportOptions {
                create_missing: false,
                ..Default::default()
            },
        )
        .await?;

    assert!(outcome.created.is_empty());
    assert_eq!(
        outcome.skipped,
        vec!["2 tbsp olive oil", "1 pinch of saffron"]
    );

    let recipe = mealbook_recipe::Query(state)
        .find(&outcome.recipe_id)
        .await?
        .unwrap();
    assert_eq!(recipe.ingredients.len(), 2);
    // Tomatoes are counted in grams in the catalog, the raw line is kept.
    assert_eq!(recipe.ingredients[1].quantity, 3.0);
    assert_eq!(recipe.ingredients[1].note.as_deref(), Some("3 tomatoes, diced"));

    Ok(())
}

#[tokio::test]
async fn test_import_errors() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let cmd = Command::new(state);

    let err = cmd
        .import("<html><body>nothing</body></html>", ImportOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, mealbook_shared::Error::User(_)));

    let err = cmd
        .import(
            PAGE,
            ImportOptions {
                folder_id: Some("missing".to_owned()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, mealbook_shared::Error::NotFound(_)));

    let err = cmd
        .preview(PAGE, Some(2.0))
        .await
        .unwrap_err();
    assert!(matches!(err, mealbook_shared::Error::User(_)));

    Ok(())
}
