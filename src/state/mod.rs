mod catalog;
mod cursors;
mod persistence;

pub use catalog::CatalogManager;
pub use cursors::CursorStore;
pub use persistence::{load_catalog, load_catalog_csv, load_catalog_json, load_cursors, save_cursors};
