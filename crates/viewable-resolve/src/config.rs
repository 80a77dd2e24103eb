//! Resolver configuration.

use serde::{Deserialize, Serialize};

/// Configuration for a [`PathResolver`](crate::PathResolver).
///
/// All environment-dependent inputs are explicit fields set at
/// construction; in particular the offline flag is never read from ambient
/// process state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Base URL of the viewing service, trailing slash optional.
    pub viewing_service_base: String,

    /// Urn identifying the document with the viewing service.
    pub document_urn: String,

    /// Path the manifest was materialized from (URL or local file path).
    pub source_path: String,

    /// Access-control session id, appended to thumbnail requests when set.
    pub acm_session: Option<String>,

    /// Whether resources are served from a local mirror instead of the
    /// viewing service.
    pub offline: bool,

    /// Local resource prefix substituted in offline mode.
    pub offline_prefix: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            viewing_service_base: "https://developer.api.autodesk.com/derivativeservice/v2/"
                .to_string(),
            document_urn: String::new(),
            source_path: String::new(),
            acm_session: None,
            offline: false,
            offline_prefix: String::new(),
        }
    }
}
