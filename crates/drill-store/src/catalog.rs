use std::{collections::BTreeMap, fs, path::Path};

use drill_core::Catalog;

use crate::StoreError;

/// Load a catalog from a JSON object mapping asset file names to the URLs
/// they are downloaded from, e.g. `{ "shi4.mp3": "https://..." }`.
pub fn load_catalog(path: &Path) -> Result<Catalog, StoreError> {
    let contents = fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;
    let locators: BTreeMap<String, String> =
        serde_json::from_str(&contents).map_err(|e| StoreError::json(path, e))?;

    let catalog = Catalog::from_locators(locators);
    tracing::info!(path = %path.display(), items = catalog.len(), "Loaded catalog");
    Ok(catalog)
}
