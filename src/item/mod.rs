pub mod catalog;
pub mod category;

pub use catalog::{load_content, ItemCatalog, ItemKind, ItemKindId};
pub use category::{CategoryId, CategoryRecord, CategoryTable};
