//! Stamps the enrichment output into the versioned, persistable artefact
//! described in §6 ("Persisted state").

use chrono::Utc;
use interhop_types::{ChainConfig, RegistryConfig, Route};
use std::collections::HashMap;

/// Wraps enriched chains and routes into a `RegistryConfig`, stamping a
/// `"v1-YYYYMMDD"` version string and the current UTC timestamp.
pub fn to_versioned_artifact(
    chains: HashMap<String, ChainConfig>,
    routes: Vec<Route>,
) -> RegistryConfig {
    let generated_at = Utc::now();
    RegistryConfig {
        version: format!("v1-{}", generated_at.format("%Y%m%d")),
        generated_at,
        chains,
        routes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_carries_a_v1_prefix() {
        let artifact = to_versioned_artifact(HashMap::new(), Vec::new());
        assert!(artifact.version.starts_with("v1-"));
        assert_eq!(artifact.version.len(), "v1-YYYYMMDD".len());
    }
}
