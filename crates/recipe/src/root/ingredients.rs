use super::IngredientLine;

impl super::Command {
    /// Replaces all lines in one transaction and recomputes the totals.
    pub async fn set_ingredients(
        &self,
        id: impl Into<String>,
        lines: Vec<IngredientLine>,
    ) -> mealbook_shared::Result<()> {
        let id = id.into();
        let mut tx = self.write_db.begin().await?;

        if !super::recipe_exists(&mut tx, &id).await? {
            mealbook_shared::not_found!("recipe {id}");
        }

        super::check_lines(&mut tx, &lines).await?;
        super::write_lines(&mut tx, &id, &lines).await?;
        super::refresh_totals(&mut tx, &id).await?;

        tx.commit().await?;

        Ok(())
    }

    /// Appends a line, returns its position.
    pub async fn add_ingredient(
        &self,
        id: impl Into<String>,
        line: IngredientLine,
    ) -> mealbook_shared::Result<u32> {
        let id = id.into();
        let mut tx = self.write_db.begin().await?;

        if !super::recipe_exists(&mut tx, &id).await? {
            mealbook_shared::not_found!("recipe {id}");
        }

        super::check_lines(&mut tx, std::slice::from_ref(&line)).await?;

        let mut lines = current_lines(&mut tx, &id).await?;
        lines.push(line);
        let position = (lines.len() - 1) as u32;

        super::write_lines(&mut tx, &id, &lines).await?;
        super::refresh_totals(&mut tx, &id).await?;

        tx.commit().await?;

        Ok(position)
    }

    /// Removes the line at `position`, later lines move up by one.
    pub async fn remove_ingredient(
        &self,
        id: impl Into<String>,
        position: u32,
    ) -> mealbook_shared::Result<()> {
        let id = id.into();
        let mut tx = self.write_db.begin().await?;

        if !super::recipe_exists(&mut tx, &id).await? {
            mealbook_shared::not_found!("recipe {id}");
        }

        let mut lines = current_lines(&mut tx, &id).await?;
        if position as usize >= lines.len() {
            mealbook_shared::not_found!("ingredient line {position} of recipe {id}");
        }

        lines.remove(position as usize);

        super::write_lines(&mut tx, &id, &lines).await?;
        super::refresh_totals(&mut tx, &id).await?;

        tx.commit().await?;

        Ok(())
    }
}

async fn current_lines(
    conn: &mut sqlx::SqliteConnection,
    recipe_id: &str,
) -> anyhow::Result<Vec<IngredientLine>> {
    Ok(super::load_lines(conn, recipe_id)
        .await?
        .into_iter()
        .map(|row| IngredientLine {
            ingredient_id: row.ingredient_id,
            quantity: row.quantity,
            note: row.note,
        })
        .collect())
}
