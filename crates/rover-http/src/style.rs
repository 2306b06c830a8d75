//! Map style document patching.
//!
//! The style file on disk points its vector source at whatever host it was
//! authored against. Before serving it, the `openmaptiles` source is
//! rewritten to this server's tile endpoint.

use std::path::Path;

use serde_json::{json, Value};

use rover_contracts::error::{RoverError, RoverResult};

/// Name of the vector source the frontend style reads tiles from.
pub const TILE_SOURCE: &str = "openmaptiles";

/// The tile URL template for a server reachable at `public_url`.
pub fn tile_url_template(public_url: &str) -> String {
    format!("{}/tiles/{{z}}/{{x}}/{{y}}.pbf", public_url.trim_end_matches('/'))
}

/// Point `sources.openmaptiles.tiles` at this server, creating the source
/// entry when the style lacks it.
pub fn patch_style(style: &mut Value, public_url: &str) -> RoverResult<()> {
    let Some(root) = style.as_object_mut() else {
        return Err(RoverError::StyleMalformed {
            reason: "style document is not a JSON object".to_string(),
        });
    };

    let sources = root
        .entry("sources")
        .or_insert_with(|| json!({}))
        .as_object_mut()
        .ok_or_else(|| RoverError::StyleMalformed {
            reason: "'sources' is not an object".to_string(),
        })?;

    let source = sources
        .entry(TILE_SOURCE)
        .or_insert_with(|| json!({ "type": "vector" }))
        .as_object_mut()
        .ok_or_else(|| RoverError::StyleMalformed {
            reason: format!("source '{}' is not an object", TILE_SOURCE),
        })?;

    source.insert("tiles".to_string(), json!([tile_url_template(public_url)]));
    Ok(())
}

/// Read the style at `path` and patch it for `public_url`.
pub async fn load_style(path: &Path, public_url: &str) -> RoverResult<Value> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| RoverError::StyleUnavailable {
            reason: format!("'{}': {}", path.display(), e),
        })?;

    let mut style: Value = serde_json::from_str(&contents).map_err(|e| RoverError::StyleMalformed {
        reason: format!("'{}': {}", path.display(), e),
    })?;

    patch_style(&mut style, public_url)?;
    Ok(style)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rewrites_existing_tile_source() {
        let mut style = json!({
            "version": 8,
            "sources": {
                "openmaptiles": { "type": "vector", "tiles": ["https://example.org/{z}/{x}/{y}.pbf"] }
            },
            "layers": []
        });

        patch_style(&mut style, "http://10.0.0.5:8000/").unwrap();

        assert_eq!(
            style["sources"]["openmaptiles"]["tiles"],
            json!(["http://10.0.0.5:8000/tiles/{z}/{x}/{y}.pbf"])
        );
        assert_eq!(style["sources"]["openmaptiles"]["type"], "vector");
        assert_eq!(style["version"], 8);
    }

    #[test]
    fn test_creates_missing_source() {
        let mut style = json!({ "version": 8 });
        patch_style(&mut style, "http://localhost:8000").unwrap();
        assert_eq!(
            style["sources"]["openmaptiles"]["tiles"][0],
            "http://localhost:8000/tiles/{z}/{x}/{y}.pbf"
        );
    }

    #[test]
    fn test_non_object_style_is_malformed() {
        let mut style = json!([1, 2, 3]);
        assert!(matches!(
            patch_style(&mut style, "http://localhost:8000"),
            Err(RoverError::StyleMalformed { .. })
        ));
    }
}
