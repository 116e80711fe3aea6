use std::env;

use axum::http::{HeaderValue, Method, header};
use tower_http::cors::CorsLayer;

/// Cross-origin policy for the API. Origins come from `ALLOWED_ORIGINS` as a
/// comma-separated list; the defaults cover the usual local frontend ports.
#[derive(Clone, Debug)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    pub fn from_env() -> Self {
        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000,http://localhost:5173".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Self { allowed_origins }
    }

    /// Builds the tower-http layer for this policy. Origins that fail to
    /// parse as header values are skipped.
    pub fn build_layer(&self) -> CorsLayer {
        let allowed_origins: Vec<HeaderValue> = self
            .allowed_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(allowed_origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([
                header::AUTHORIZATION,
                header::CONTENT_TYPE,
                header::ACCEPT,
            ])
            .allow_credentials(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_layer_skips_unparseable_origins() {
        let config = CorsConfig {
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "\u{0}bad".to_string(),
            ],
        };
        // must not panic on the invalid origin
        let _ = config.build_layer();
    }
}
