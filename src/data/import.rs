use {
    crate::data::DocumentStore,
    anyhow::{Context, Result, bail},
    serde_json::Value,
    std::{collections::BTreeMap, path::Path},
};

/// Per-collection document counts written by an import.
pub type ImportSummary = BTreeMap<String, usize>;

/// Loads a backend export shaped `{ collection: { id: document, .. }, .. }`.
/// Existing documents with the same id are replaced.
pub async fn import_export(store: &dyn DocumentStore, export: &Value) -> Result<ImportSummary> {
    let Some(collections) = export.as_object() else {
        bail!("Export must be a JSON object of collections");
    };

    let mut summary = ImportSummary::new();
    for (collection, docs) in collections {
        let Some(docs) = docs.as_object() else {
            log::warn!("Skipping {}: expected an object of documents", collection);
            continue;
        };
        for (id, body) in docs {
            store
                .upsert(collection, id, body)
                .await
                .with_context(|| format!("Failed to import {}/{}", collection, id))?;
        }
        summary.insert(collection.clone(), docs.len());
    }
    Ok(summary)
}

pub async fn import_file(store: &dyn DocumentStore, path: &Path) -> Result<ImportSummary> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let export: Value =
        serde_json::from_str(&text).with_context(|| format!("{} is not valid JSON", path.display()))?;
    import_export(store, &export).await
}
