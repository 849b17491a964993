//! Interactive API documentation
//!
//! A descriptor-driven explorer: `/docs` serves a Swagger UI shell that
//! renders the static OpenAPI document bundled into the binary and served
//! at `/docs/openapi.json`.

use axum::http::header;
use axum::response::{Html, IntoResponse};

/// Static machine-readable API description
const DESCRIPTOR: &str = include_str!("../../static/openapi.json");

const EXPLORER_PAGE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8"/>
  <meta name="viewport" content="width=device-width, initial-scale=1"/>
  <title>Identity Gateway API</title>
  <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css"/>
</head>
<body>
<div id="swagger-ui"></div>
<script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
<script>
  window.onload = () => {
    window.ui = SwaggerUIBundle({
      url: "/docs/openapi.json",
      dom_id: "#swagger-ui",
    });
  };
</script>
</body>
</html>
"##;

/// GET /docs - the explorer page
pub async fn explorer_handler() -> Html<&'static str> {
    Html(EXPLORER_PAGE)
}

/// GET /docs/openapi.json - the API descriptor
pub async fn descriptor_handler() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/json")], DESCRIPTOR)
}
