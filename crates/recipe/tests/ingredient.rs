use mealbook_recipe::ingredient::{self, UpdateIngredientInput};
use mealbook_recipe::{CreateInput, IngredientLine};
use mealbook_shared::recipe::{IngredientCategory, Nutrition, Unit};
use temp_dir::TempDir;

mod helpers;

#[tokio::test]
async fn test_create_and_find() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let query = ingredient::Query(state.clone());

    let id = helpers::create_ingredient(&state, "  Red   Onion ", Unit::Gram, 40.0).await?;

    let onion = query.find(&id).await?.unwrap();
    assert_eq!(onion.name, "Red Onion");
    assert_eq!(onion.unit, Unit::Gram);
    assert_eq!(onion.nutrition.calories, 40.0);

    let by_name = query.find_by_name("red onion").await?.unwrap();
    assert_eq!(by_name.id, id);

    Ok(())
}

#[tokio::test]
async fn test_duplicate_name_is_rejected() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;

    helpers::create_ingredient(&state, "Flour", Unit::Gram, 364.0).await?;
    let err = helpers::create_ingredient(&state, "FLOUR", Unit::Gram, 364.0)
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "ingredient 'FLOUR' already exists");

    Ok(())
}

#[tokio::test]
async fn test_non_ascii_names_ignore_case() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let query = ingredient::Query(state.clone());

    let id = helpers::create_ingredient(&state, "Żurek", Unit::Millilitre, 60.0).await?;
    let err = helpers::create_ingredient(&state, "żurek", Unit::Millilitre, 60.0)
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "ingredient 'żurek' already exists");
    assert_eq!(query.list(None).await?.len(), 1);
    assert_eq!(query.find_by_name("ŻUREK").await?.map(|i| i.id), Some(id));

    Ok(())
}

#[tokio::test]
async fn test_invalid_input() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let cmd = ingredient::Command::new(state);

    let err = cmd
        .create(ingredient::CreateIngredientInput {
            name: "   ".to_owned(),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, mealbook_shared::Error::Validate(_)));

    let err = cmd
        .create(ingredient::CreateIngredientInput {
            name: "Butter".to_owned(),
            nutrition: Nutrition {
                fat: -1.0,
                ..Default::default()
            },
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, mealbook_shared::Error::User(_)));

    Ok(())
}

#[tokio::test]
async fn test_list_search() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;

    helpers::create_ingredient(&state, "Tomato", Unit::Gram, 18.0).await?;
    helpers::create_ingredient(&state, "Cherry Tomato", Unit::Piece, 3.0).await?;
    helpers::create_ingredient(&state, "Basil", Unit::Gram, 23.0).await?;

    let query = ingredient::Query(state);
    let names = query
        .list(Some("tomato"))
        .await?
        .into_iter()
        .map(|i| i.name)
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["Cherry Tomato", "Tomato"]);

    assert_eq!(query.list(None).await?.len(), 3);
    assert_eq!(query.list(Some("  ")).await?.len(), 3);
    assert!(query.list(Some("%")).await?.is_empty());
    assert!(query.list(Some("_")).await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_list_orders_and_searches_any_case() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;

    helpers::create_ingredient(&state, "Zucchini", Unit::Gram, 17.0).await?;
    helpers::create_ingredient(&state, "apple", Unit::Piece, 95.0).await?;
    helpers::create_ingredient(&state, "Łosoś", Unit::Gram, 208.0).await?;

    let query = ingredient::Query(state);
    let names = |ingredients: Vec<ingredient::Ingredient>| {
        ingredients.into_iter().map(|i| i.name).collect::<Vec<_>>()
    };

    assert_eq!(names(query.list(None).await?), vec!["apple", "Zucchini", "Łosoś"]);
    assert_eq!(names(query.list(Some("ŁOSOŚ")).await?), vec!["Łosoś"]);

    Ok(())
}

#[tokio::test]
async fn test_update_refreshes_recipe_totals() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let sugar = helpers::create_ingredient(&state, "Sugar", Unit::Gram, 400.0).await?;

    let recipes = mealbook_recipe::Command::new(state.clone());
    let recipe_id = recipes
        .create(CreateInput {
            name: "Syrup".to_owned(),
            ingredients: vec![IngredientLine::new(&sugar, 50.0)],
            ..Default::default()
        })
        .await?;

    ingredient::Command::new(state.clone())
        .update(
            &sugar,
            UpdateIngredientInput {
                name: "Cane Sugar".to_owned(),
                unit: Unit::Gram,
                category: IngredientCategory::Grocery,
                nutrition: Nutrition {
                    calories: 380.0,
                    ..Default::default()
                },
            },
        )
        .await?;

    let recipe = mealbook_recipe::Query(state).find(&recipe_id).await?.unwrap();
    assert_eq!(recipe.nutrition.calories, 190.0);
    assert_eq!(recipe.ingredients[0].name, "Cane Sugar");

    Ok(())
}

#[tokio::test]
async fn test_delete_used_ingredient_is_rejected() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let egg = helpers::create_ingredient(&state, "Egg", Unit::Piece, 72.0).await?;
    let salt = helpers::create_ingredient(&state, "Salt", Unit::Gram, 0.0).await?;

    mealbook_recipe::Command::new(state.clone())
        .create(CreateInput {
            name: "Boiled egg".to_owned(),
            ingredients: vec![IngredientLine::new(&egg, 1.0)],
            ..Default::default()
        })
        .await?;

    let cmd = ingredient::Command::new(state.clone());
    let err = cmd.delete(&egg).await.unwrap_err();
    assert_eq!(err.to_string(), "ingredient 'Egg' is used by 1 recipe(s)");

    cmd.delete(&salt).await?;
    assert!(ingredient::Query(state).find(&salt).await?.is_none());

    let err = cmd.delete(&salt).await.unwrap_err();
    assert!(matches!(err, mealbook_shared::Error::NotFound(_)));

    Ok(())
}
