use sea_query::Iden;

#[derive(Iden, Clone)]
pub enum Folder {
    Table,
    Id,
    ParentId,
    Name,
    CreatedAt,
}

#[derive(Iden, Clone)]
pub enum Ingredient {
    Table,
    Id,
    Name,
    Unit,
    Category,
    Calories,
    Protein,
    Carbohydrates,
    Fat,
    CreatedAt,
}

#[derive(Iden, Clone)]
pub enum Recipe {
    Table,
    Id,
    FolderId,
    Name,
    Description,
    Servings,
    Instructions,
    SourceUrl,
    Calories,
    Protein,
    Carbohydrates,
    Fat,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden, Clone)]
pub enum RecipeIngredient {
    Table,
    RecipeId,
    Position,
    IngredientId,
    Quantity,
    Note,
}

#[derive(Iden, Clone)]
pub enum Plan {
    Table,
    Id,
    Kind,
    Name,
    StartDay,
    EndDay,
    SourcePlanId,
    CreatedAt,
}

#[derive(Iden, Clone)]
pub enum PlannedMeal {
    Table,
    Id,
    PlanId,
    RecipeId,
    Day,
    Slot,
    SlotRank,
    Portions,
}

#[derive(Iden, Clone)]
pub enum ShoppingListItem {
    Table,
    PlanId,
    IngredientId,
    Checked,
    Quantity,
}
