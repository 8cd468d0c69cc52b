//! Bundled fallback catalogue, used when the API is unreachable or empty.

use serde_json::Value;
use std::sync::LazyLock;

const SEED_JSON: &str = include_str!("../../data/services_seed.json");

static SEED: LazyLock<Vec<Value>> = LazyLock::new(|| match serde_json::from_str(SEED_JSON) {
    Ok(Value::Array(items)) => items,
    Ok(_) => {
        tracing::error!("bundled seed catalogue is not a JSON array");
        Vec::new()
    }
    Err(e) => {
        tracing::error!("bundled seed catalogue failed to parse: {}", e);
        Vec::new()
    }
});

/// Owned copy of the seed records; callers may mutate it freely.
pub fn snapshot() -> Vec<Value> {
    SEED.clone()
}
