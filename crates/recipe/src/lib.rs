pub mod folder;
pub mod import;
pub mod ingredient;
pub mod nutrition;
mod query;
mod root;

pub use query::*;
pub use root::*;
