//! Decoding manifest documents into resources.

use serde::Deserialize;

use super::{ManifestError, Resource};

/// The fields of a Kubernetes object that matter here.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct KubeDocument {
    api_version: String,
    kind: String,
    metadata: Metadata,
    /// Members of a `kind: List`.
    items: Vec<KubeDocument>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Metadata {
    name: String,
    namespace: String,
}

impl KubeDocument {
    /// Flatten into resources; a `List` yields its items and kindless
    /// documents yield nothing.
    fn into_resources(self, source: &str, out: &mut Vec<Resource>) {
        if self.kind == "List" {
            for item in self.items {
                item.into_resources(source, out);
            }
            return;
        }
        if self.kind.is_empty() {
            return;
        }
        out.push(Resource {
            api_version: self.api_version,
            kind: self.kind,
            name: self.metadata.name,
            namespace: self.metadata.namespace,
            source: source.to_string(),
        });
    }
}

/// Parse a (possibly multi-document) YAML manifest.
pub fn parse_yaml(content: &str, source: &str) -> Result<Vec<Resource>, ManifestError> {
    let mut resources = Vec::new();
    for document in serde_yaml::Deserializer::from_str(content) {
        // Empty documents between `---` separators decode as `None`.
        let doc = Option::<KubeDocument>::deserialize(document).map_err(|e| {
            ManifestError::Yaml {
                source_ref: source.to_string(),
                source: e,
            }
        })?;
        if let Some(doc) = doc {
            doc.into_resources(source, &mut resources);
        }
    }
    Ok(resources)
}

/// Parse a JSON manifest: a single object or a `List`.
pub fn parse_json(content: &str, source: &str) -> Result<Vec<Resource>, ManifestError> {
    let doc: KubeDocument =
        serde_json::from_str(content).map_err(|e| ManifestError::Json {
            source_ref: source.to_string(),
            source: e,
        })?;
    let mut resources = Vec::new();
    doc.into_resources(source, &mut resources);
    Ok(resources)
}

/// Pick the decoder from the extension of `source`; YAML unless it ends in `.json`.
pub fn parse_by_extension(content: &str, source: &str) -> Result<Vec<Resource>, ManifestError> {
    if source.to_ascii_lowercase().ends_with(".json") {
        parse_json(content, source)
    } else {
        parse_yaml(content, source)
    }
}
