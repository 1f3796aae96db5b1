// Swagger UI integration

use crate::spec::OpenApiSpec;
use stockroom_core::{Error, HttpResponse};

const SWAGGER_UI_VERSION: &str = "5.10.0";

/// Swagger UI configuration
#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    /// Path where Swagger UI is served (e.g. "/docs")
    pub path: String,
    /// Title for the Swagger UI page
    pub title: String,
    /// OpenAPI document shown by the page
    pub spec: OpenApiSpec,
}

impl SwaggerConfig {
    /// Page titled after the document's `info.title`
    pub fn new(path: impl Into<String>, spec: OpenApiSpec) -> Self {
        Self {
            path: path.into(),
            title: spec.info.title.clone(),
            spec,
        }
    }

    /// Path of the raw JSON document
    pub fn json_path(&self) -> String {
        format!("{}/openapi.json", self.path.trim_end_matches('/'))
    }

    /// Path of the raw YAML document
    pub fn yaml_path(&self) -> String {
        format!("{}/openapi.yaml", self.path.trim_end_matches('/'))
    }

    /// Get the OpenAPI spec as JSON
    pub fn spec_json(&self) -> Result<String, Error> {
        serde_json::to_string_pretty(&self.spec)
            .map_err(|e| Error::Serialization(format!("Failed to serialize spec: {}", e)))
    }

    /// Get the OpenAPI spec as YAML
    pub fn spec_yaml(&self) -> Result<String, Error> {
        serde_yaml::to_string(&self.spec)
            .map_err(|e| Error::Serialization(format!("Failed to serialize spec: {}", e)))
    }
}

/// Minimal HTML escaping for text content
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Generate the Swagger UI page with the document inlined
pub fn swagger_ui_response(config: &SwaggerConfig) -> Result<HttpResponse, Error> {
    // `</script>` inside a string literal would end the script element early
    let spec_json = config.spec_json()?.replace("</", "<\\/");

    let html = format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/swagger-ui-dist@{version}/swagger-ui.css">
    <style>
        body {{
            margin: 0;
            padding: 0;
        }}
    </style>
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://cdn.jsdelivr.net/npm/swagger-ui-dist@{version}/swagger-ui-bundle.js"></script>
    <script src="https://cdn.jsdelivr.net/npm/swagger-ui-dist@{version}/swagger-ui-standalone-preset.js"></script>
    <script>
        window.onload = function() {{
            const spec = {spec};
            SwaggerUIBundle({{
                spec: spec,
                dom_id: '#swagger-ui',
                deepLinking: true,
                presets: [
                    SwaggerUIBundle.presets.apis,
                    SwaggerUIStandalonePreset
                ],
                plugins: [
                    SwaggerUIBundle.plugins.DownloadUrl
                ],
                layout: "StandaloneLayout"
            }});
        }};
    </script>
</body>
</html>"#,
        title = escape_html(&config.title),
        version = SWAGGER_UI_VERSION,
        spec = spec_json
    );

    Ok(HttpResponse::html(html))
}

/// Response for the raw JSON document endpoint
pub fn spec_json_response(config: &SwaggerConfig) -> Result<HttpResponse, Error> {
    Ok(HttpResponse::ok()
        .content_type("application/json; charset=utf-8")
        .with_body(config.spec_json()?.into_bytes()))
}

/// Response for the raw YAML document endpoint
pub fn spec_yaml_response(config: &SwaggerConfig) -> Result<HttpResponse, Error> {
    Ok(HttpResponse::ok()
        .content_type("application/x-yaml")
        .with_body(config.spec_yaml()?.into_bytes()))
}
