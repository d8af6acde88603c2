mod find;
mod list;

pub use find::*;
pub use list::*;

use std::ops::Deref;

#[derive(Clone)]
pub struct Query(pub mealbook_shared::State);

impl Deref for Query {
    type Target = mealbook_shared::State;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
