//! Loading an OpenAPI document from disk

use crate::spec::OpenApiSpec;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid YAML in {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl OpenApiSpec {
    /// Parse a YAML document.
    ///
    /// The text goes through a JSON value first so unquoted keys such as
    /// response codes (`200:`) become strings.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, serde_yaml::Error> {
        use serde::de::Error as _;

        let doc: serde_yaml::Value = serde_yaml::from_str(yaml)?;
        let json = serde_json::to_value(doc).map_err(serde_yaml::Error::custom)?;
        serde_json::from_value(json).map_err(serde_yaml::Error::custom)
    }

    /// Parse a JSON document
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Read and parse a spec file. `.json` files are parsed as JSON, anything
/// else as YAML.
pub async fn load_spec(path: impl AsRef<Path>) -> Result<OpenApiSpec, LoadError> {
    let path = path.as_ref();
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let spec = if is_json {
        OpenApiSpec::from_json_str(&text).map_err(|source| LoadError::Json {
            path: path.to_path_buf(),
            source,
        })?
    } else {
        OpenApiSpec::from_yaml_str(&text).map_err(|source| LoadError::Yaml {
            path: path.to_path_buf(),
            source,
        })?
    };

    debug!(path = %path.display(), paths = spec.paths.len(), "Loaded OpenAPI document");
    Ok(spec)
}

#[cfg(test)]
mod tests {
    use super::*;

    const YAML: &str = r#"
openapi: 3.0.0
info:
  title: Inventory
  version: 1.0.0
paths:
  /inventory/{id}:
    get:
      parameters:
        - name: id
          in: path
          required: true
          schema:
            type: string
      responses:
        '200':
          description: The item
        '404':
          description: Not found
"#;

    #[test]
    fn test_from_yaml_str() {
        let spec = OpenApiSpec::from_yaml_str(YAML).unwrap();
        assert_eq!(spec.info.title, "Inventory");

        let op = spec.operation("/inventory/{id}", "get").unwrap();
        assert_eq!(op.parameters[0].item().unwrap().name, "id");
        assert!(op.responses.contains_key("404"));
    }

    #[test]
    fn test_yaml_with_refs_and_unquoted_codes() {
        let yaml = r##"
openapi: 3.0.0
info:
  title: Inventory
  version: 1.0
paths:
  /inventory/{id}:
    get:
      parameters:
        - $ref: '#/components/parameters/Id'
      responses:
        200:
          description: ok
          headers:
            X-Total:
              schema:
                type: integer
components:
  parameters:
    Id:
      name: id
      in: path
      required: true
      example: '1700000000000'
"##;

        let spec = OpenApiSpec::from_yaml_str(yaml).unwrap();
        assert_eq!(spec.info.version, "1.0");

        let op = spec.operation("/inventory/{id}", "get").unwrap();
        assert_eq!(op.parameters[0].reference(), Some("#/components/parameters/Id"));

        let served = serde_json::to_value(&spec).unwrap();
        let get = &served["paths"]["/inventory/{id}"]["get"];
        assert_eq!(get["responses"]["200"]["headers"]["X-Total"]["schema"]["type"], "integer");
        assert_eq!(served["components"]["parameters"]["Id"]["example"], "1700000000000");
    }

    #[tokio::test]
    async fn test_load_yaml_and_json_files() {
        let dir = tempfile::tempdir().unwrap();

        let yaml_path = dir.path().join("swagger.yaml");
        std::fs::write(&yaml_path, YAML).unwrap();
        let spec = load_spec(&yaml_path).await.unwrap();

        let json_path = dir.path().join("openapi.json");
        std::fs::write(&json_path, serde_json::to_string(&spec).unwrap()).unwrap();
        let reloaded = load_spec(&json_path).await.unwrap();

        assert_eq!(reloaded.paths.len(), 1);
        assert_eq!(reloaded.info.version, "1.0.0");
    }

    #[tokio::test]
    async fn test_load_errors() {
        let dir = tempfile::tempdir().unwrap();

        let missing = load_spec(dir.path().join("nope.yaml")).await;
        assert!(matches!(missing, Err(LoadError::Io { .. })));

        let bad = dir.path().join("bad.yaml");
        std::fs::write(&bad, "openapi: [unclosed").unwrap();
        assert!(matches!(load_spec(&bad).await, Err(LoadError::Yaml { .. })));
    }
}
