pub mod catalog;
pub mod error;
pub mod tags;

pub use catalog::{columns, CatalogParser, PulsarCatalog, SourceRecord};
pub use error::{CatalogError, CatalogResult};
pub use tags::{load_tags_json, random_tags, Tag, Tagger};
