use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::{info, warn};

use crate::error::Result;
use crate::models::{Dish, MealSlot};
use crate::state::{CatalogManager, CursorStore};

/// On-disk JSON layout: region → slot name → dishes.
type RawCatalog = BTreeMap<String, BTreeMap<String, Vec<Dish>>>;

/// One row of a CSV catalog.
#[derive(Debug, Deserialize)]
struct CatalogRow {
    region: String,
    slot: String,
    name: String,
    calories: f64,
    unit: String,
}

/// Load a catalog, choosing the format from the file extension.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<CatalogManager> {
    let path = path.as_ref();
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

    let catalog = if is_csv {
        load_catalog_csv(path)?
    } else {
        load_catalog_json(path)?
    };

    info!(
        path = %path.display(),
        regions = catalog.regions().len(),
        dishes = catalog.len(),
        "loaded catalog"
    );
    Ok(catalog)
}

/// Load a catalog from JSON.
///
/// Unknown slot names and invalid dishes are skipped with a warning.
pub fn load_catalog_json<P: AsRef<Path>>(path: P) -> Result<CatalogManager> {
    let content = fs::read_to_string(path)?;
    let raw: RawCatalog = serde_json::from_str(&content)?;

    let mut catalog = CatalogManager::new();
    for (region, slots) in raw {
        catalog.add_region(&region);
        for (slot_name, dishes) in slots {
            let Ok(slot) = slot_name.parse::<MealSlot>() else {
                warn!(region = %region, slot = %slot_name, "skipping unknown meal slot");
                continue;
            };
            for dish in dishes {
                catalog.insert(&region, slot, dish);
            }
        }
    }
    Ok(catalog)
}

/// Load a catalog from CSV with a `region,slot,name,calories,unit` header.
pub fn load_catalog_csv<P: AsRef<Path>>(path: P) -> Result<CatalogManager> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_path(path)?;

    let mut catalog = CatalogManager::new();
    for row in reader.deserialize() {
        let row: CatalogRow = row?;
        catalog.add_region(&row.region);
        let Ok(slot) = row.slot.parse::<MealSlot>() else {
            warn!(region = %row.region, slot = %row.slot, "skipping unknown meal slot");
            continue;
        };
        catalog.insert(&row.region, slot, Dish::new(row.name, row.calories, row.unit));
    }
    Ok(catalog)
}

/// Load selection cursors; a missing file yields an empty store.
pub fn load_cursors<P: AsRef<Path>>(path: P) -> Result<CursorStore> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(CursorStore::new());
    }
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Save selection cursors as pretty JSON.
pub fn save_cursors<P: AsRef<Path>>(path: P, cursors: &CursorStore) -> Result<()> {
    let json = serde_json::to_string_pretty(cursors)?;
    fs::write(path, json)?;
    Ok(())
}
