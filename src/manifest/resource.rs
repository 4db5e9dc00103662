use std::fmt;

/// A single Kubernetes object found in a manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resource {
    pub api_version: String,
    pub kind: String,
    pub name: String,
    /// Empty when the manifest does not set one.
    pub namespace: String,
    /// File path or URL the resource came from.
    pub source: String,
}

impl Resource {
    /// The namespace, with `default` standing in for an unset one.
    pub fn namespace_or_default(&self) -> &str {
        if self.namespace.is_empty() {
            "default"
        } else {
            &self.namespace
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() {
            f.write_str(&self.kind)
        } else {
            write!(f, "{}/{}", self.kind, self.name)
        }
    }
}
