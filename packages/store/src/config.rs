//! # Console configuration: `console.toml`
//!
//! Where the REST API lives and how list views start out. The web app embeds
//! the file at build time (filename: [`ConsoleConfig::filename`]).
//!
//! ## Structure
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:8081"   # origin of the REST API
//!
//! [view]
//! page_size = 5                        # 5, 10, 25 or 50
//! ```
//!
//! | Struct | Purpose |
//! |--------|---------|
//! | [`ConsoleConfig`] | Top-level config with TOML (de)serialisation and the `with_base_url` builder. |
//! | [`ApiConfig`] | API section: the base URL every request path is joined to. |
//! | [`ViewConfig`] | View section: the initial page size of every list. |
//!
//! Every section has a default, so a missing or empty file is the default
//! configuration.

use serde::{Deserialize, Serialize};

use crate::paginator::PageSize;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsoleConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub view: ViewConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Origin of the REST API, without a trailing `/api`.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    "http://localhost:8081".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewConfig {
    #[serde(default)]
    pub page_size: PageSize,
}

impl ConsoleConfig {
    /// Builder method to point the console at another API origin.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api.base_url = base_url.into();
        self
    }

    pub fn filename() -> &'static str {
        "console.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
