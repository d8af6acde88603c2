mod meals;
mod plan;

pub use meals::*;

use std::ops::Deref;

#[derive(Clone)]
pub struct Query(pub mealbook_shared::State);

impl Deref for Query {
    type Target = mealbook_shared::State;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
