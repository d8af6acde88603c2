use mealbook_recipe::{
    Command, CreateInput, FolderFilter, IngredientLine, Query, RecipesQuery, SortBy, UpdateInput,
    folder::{self, CreateFolderInput},
};
use mealbook_shared::recipe::Unit;
use temp_dir::TempDir;

mod helpers;

#[tokio::test]
async fn test_create_computes_nutrition() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let flour = helpers::create_ingredient(&state, "Flour", Unit::Gram, 364.0).await?;
    let egg = helpers::create_ingredient(&state, "Egg", Unit::Piece, 72.0).await?;

    let id = Command::new(state.clone())
        .create(CreateInput {
            name: " Pancakes ".to_owned(),
            servings: 2,
            ingredients: vec![
                IngredientLine::new(&flour, 250.0),
                IngredientLine {
                    note: Some(" beaten ".to_owned()),
                    ..IngredientLine::new(&egg, 2.0)
                },
            ],
            ..Default::default()
        })
        .await?;

    let recipe = Query(state).find(&id).await?.unwrap();
    assert_eq!(recipe.name, "Pancakes");
    assert_eq!(recipe.nutrition.calories, 910.0 + 144.0);
    assert_eq!(recipe.per_serving.calories, 527.0);
    assert_eq!(recipe.ingredients.len(), 2);
    assert_eq!(recipe.ingredients[0].formatted_quantity, "250 g");
    assert_eq!(recipe.ingredients[1].position, 1);
    assert_eq!(recipe.ingredients[1].note.as_deref(), Some("beaten"));

    Ok(())
}

#[tokio::test]
async fn test_create_rejects_bad_lines() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let flour = helpers::create_ingredient(&state, "Flour", Unit::Gram, 364.0).await?;
    let cmd = Command::new(state);

    let err = cmd
        .create(CreateInput {
            name: "Bread".to_owned(),
            ingredients: vec![IngredientLine::new(&flour, 0.0)],
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, mealbook_shared::Error::User(_)));

    let err = cmd
        .create(CreateInput {
            name: "Bread".to_owned(),
            ingredients: vec![IngredientLine::new("unknown", 10.0)],
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "ingredient unknown not found");

    let err = cmd
        .create(CreateInput {
            name: "Bread".to_owned(),
            servings: 0,
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, mealbook_shared::Error::Validate(_)));

    let err = cmd
        .create(CreateInput {
            name: "Bread".to_owned(),
            folder_id: Some("missing".to_owned()),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, mealbook_shared::Error::NotFound(_)));

    Ok(())
}

#[tokio::test]
async fn test_update_and_lines() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let rice = helpers::create_ingredient(&state, "Rice", Unit::Gram, 130.0).await?;
    let milk = helpers::create_ingredient(&state, "Milk", Unit::Millilitre, 60.0).await?;
    let sugar = helpers::create_ingredient(&state, "Sugar", Unit::Gram, 400.0).await?;
    let cmd = Command::new(state.clone());
    let query = Query(state);

    let id = cmd
        .create(CreateInput {
            name: "Rice pudding".to_owned(),
            ingredients: vec![IngredientLine::new(&rice, 100.0)],
            ..Default::default()
        })
        .await?;

    cmd.update(
        &id,
        UpdateInput {
            name: "Creamy rice pudding".to_owned(),
            description: "Slow cooked".to_owned(),
            servings: 4,
            instructions: "Simmer.".to_owned(),
        },
    )
    .await?;

    assert_eq!(cmd.add_ingredient(&id, IngredientLine::new(&milk, 500.0)).await?, 1);
    assert_eq!(cmd.add_ingredient(&id, IngredientLine::new(&sugar, 50.0)).await?, 2);

    let recipe = query.find(&id).await?.unwrap();
    assert_eq!(recipe.name, "Creamy rice pudding");
    assert_eq!(recipe.servings, 4);
    assert_eq!(recipe.nutrition.calories, 130.0 + 300.0 + 200.0);

    cmd.remove_ingredient(&id, 1).await?;
    let recipe = query.find(&id).await?.unwrap();
    let positions = recipe
        .ingredients
        .iter()
        .map(|l| (l.position, l.name.as_str()))
        .collect::<Vec<_>>();
    assert_eq!(positions, vec![(0, "Rice"), (1, "Sugar")]);
    assert_eq!(recipe.nutrition.calories, 330.0);

    let err = cmd.remove_ingredient(&id, 5).await.unwrap_err();
    assert!(matches!(err, mealbook_shared::Error::NotFound(_)));

    cmd.set_ingredients(&id, vec![]).await?;
    let recipe = query.find(&id).await?.unwrap();
    assert!(recipe.ingredients.is_empty());
    assert_eq!(recipe.nutrition.calories, 0.0);

    let err = cmd
        .update(
            "missing",
            UpdateInput {
                name: "Nothing".to_owned(),
                description: String::new(),
                servings: 1,
                instructions: String::new(),
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "recipe missing not found");

    Ok(())
}

#[tokio::test]
async fn test_duplicate_and_delete() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let tomato = helpers::create_ingredient(&state, "Tomato", Unit::Gram, 18.0).await?;
    let cmd = Command::new(state.clone());
    let query = Query(state);

    let id = cmd
        .create(CreateInput {
            name: "Tomato soup".to_owned(),
            ingredients: vec![IngredientLine::new(&tomato, 500.0)],
            ..Default::default()
        })
        .await?;

    let copy_id = cmd.duplicate(&id).await?;
    let copy = query.find(&copy_id).await?.unwrap();
    assert_eq!(copy.name, "Tomato soup (copy)");
    assert_eq!(copy.ingredients.len(), 1);
    assert_eq!(copy.nutrition.calories, 90.0);

    cmd.delete(&id).await?;
    assert!(query.find(&id).await?.is_none());
    assert!(query.find(&copy_id).await?.is_some());

    let err = cmd.delete(&id).await.unwrap_err();
    assert_eq!(err.to_string(), format!("recipe {id} not found"));

    Ok(())
}

#[tokio::test]
async fn test_list_filters_and_sort() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let butter = helpers::create_ingredient(&state, "Butter", Unit::Gram, 717.0).await?;
    let folders = folder::Command::new(state.clone());
    let cmd = Command::new(state.clone());

    let desserts = folders
        .create(CreateFolderInput {
            name: "Desserts".to_owned(),
            parent_id: None,
        })
        .await?;
    let cakes = folders
        .create(CreateFolderInput {
            name: "Cakes".to_owned(),
            parent_id: Some(desserts.to_owned()),
        })
        .await?;

    for (name, folder_id, grams) in [
        ("Brownies", Some(&desserts), 100.0),
        ("Sponge cake", Some(&cakes), 50.0),
        ("Salad", None, 10.0),
    ] {
        cmd.create(CreateInput {
            name: name.to_owned(),
            folder_id: folder_id.cloned(),
            ingredients: vec![IngredientLine::new(&butter, grams)],
            ..Default::default()
        })
        .await?;
    }

    let query = Query(state);
    let names = |recipes: Vec<mealbook_recipe::RecipeSummary>| {
        recipes.into_iter().map(|r| r.name).collect::<Vec<_>>()
    };

    let all = query.list(RecipesQuery::default()).await?;
    assert_eq!(names(all), vec!["Brownies", "Salad", "Sponge cake"]);

    let within = query
        .list(RecipesQuery {
            folder: FolderFilter::Within(desserts.to_owned()),
            ..Default::default()
        })
        .await?;
    assert_eq!(names(within), vec!["Brownies", "Sponge cake"]);

    let direct = query
        .list(RecipesQuery {
            folder: FolderFilter::In(desserts.to_owned()),
            ..Default::default()
        })
        .await?;
    assert_eq!(names(direct), vec!["Brownies"]);

    let root = query
        .list(RecipesQuery {
            folder: FolderFilter::Root,
            ..Default::default()
        })
        .await?;
    assert_eq!(names(root), vec!["Salad"]);

    let searched = query
        .list(RecipesQuery {
            search: Some("CAKE".to_owned()),
            ..Default::default()
        })
        .await?;
    assert_eq!(names(searched), vec!["Sponge cake"]);

    let by_calories = query
        .list(RecipesQuery {
            sort: SortBy::Calories,
            ..Default::default()
        })
        .await?;
    assert_eq!(names(by_calories), vec!["Salad", "Sponge cake", "Brownies"]);

    Ok(())
}

#[tokio::test]
async fn test_list_search_is_literal_and_unicode_aware() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let cmd = Command::new(state.clone());

    for name in ["Pancakes", "Łosoś pieczony", "apple crumble"] {
        cmd.create(CreateInput {
            name: name.to_owned(),
            ..Default::default()
        })
        .await?;
    }

    let query = Query(state);
    let search = |text: &str| RecipesQuery {
        search: Some(text.to_owned()),
        ..Default::default()
    };
    let names = |recipes: Vec<mealbook_recipe::RecipeSummary>| {
        recipes.into_iter().map(|r| r.name).collect::<Vec<_>>()
    };

    assert!(query.list(search("%")).await?.is_empty());
    assert!(query.list(search("_")).await?.is_empty());
    assert_eq!(names(query.list(search("ŁOSOŚ")).await?), vec!["Łosoś pieczony"]);
    assert_eq!(
        names(query.list(RecipesQuery::default()).await?),
        vec!["apple crumble", "Pancakes", "Łosoś pieczony"]
    );

    Ok(())
}

#[tokio::test]
async fn test_move_to_folder() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let cmd = Command::new(state.clone());
    let folder_id = folder::Command::new(state.clone())
        .create(CreateFolderInput {
            name: "Soups".to_owned(),
            parent_id: None,
        })
        .await?;

    let id = cmd
        .create(CreateInput {
            name: "Broth".to_owned(),
            ..Default::default()
        })
        .await?;

    cmd.move_to_folder(&id, Some(folder_id.to_owned())).await?;
    let recipe = Query(state.clone()).find(&id).await?.unwrap();
    assert_eq!(recipe.folder_id.as_deref(), Some(folder_id.as_str()));

    let err = cmd
        .move_to_folder(&id, Some("missing".to_owned()))
        .await
        .unwrap_err();
    assert!(matches!(err, mealbook_shared::Error::NotFound(_)));

    cmd.move_to_folder(&id, None).await?;
    let recipe = Query(state).find(&id).await?.unwrap();
    assert_eq!(recipe.folder_id, None);

    Ok(())
}
