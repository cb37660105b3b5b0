//! Environment flags read once per build invocation.
//!
//! | Variable          | Flag            | Default     |
//! |-------------------|-----------------|-------------|
//! | `KILN_PRODUCTION` | `is_production` | `false`     |
//! | `NODE_ENV`        | `is_production` when `production` and `KILN_PRODUCTION` is unset |
//! | `KILN_DEBUG`      | `is_debug`      | `false`     |
//! | `KILN_FAST`       | `is_fast`       | `false`     |
//! | `KILN_ANALYZE`    | `is_analyze`    | `false`     |
//! | `KILN_HOST`       | `host`          | `localhost` |
//!
//! Boolean switches accept `true`/`false` and `1`/`0`.

use figment::providers::Env;
use figment::util::bool_from_str_or_int;
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::error::Result;

pub const ENV_PREFIX: &str = "KILN_";

/// Typed view of the build environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentFlags {
    pub is_production: bool,
    pub is_debug: bool,
    pub is_fast: bool,
    pub is_analyze: bool,
    pub host: String,
}

impl Default for EnvironmentFlags {
    fn default() -> Self {
        Self {
            is_production: false,
            is_debug: false,
            is_fast: false,
            is_analyze: false,
            host: default_host(),
        }
    }
}

/// Shape of the environment as figment sees it, before `NODE_ENV` folding.
#[derive(Debug, Deserialize)]
struct RawFlags {
    #[serde(default, deserialize_with = "optional_bool")]
    production: Option<bool>,
    #[serde(default, deserialize_with = "bool_from_str_or_int")]
    debug: bool,
    #[serde(default, deserialize_with = "bool_from_str_or_int")]
    fast: bool,
    #[serde(default, deserialize_with = "bool_from_str_or_int")]
    analyze: bool,
    #[serde(default = "default_host")]
    host: String,
    #[serde(default)]
    node_env: Option<String>,
}

fn optional_bool<'de, D>(de: D) -> std::result::Result<Option<bool>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    bool_from_str_or_int(de).map(Some)
}

fn default_host() -> String {
    "localhost".into()
}

impl EnvironmentFlags {
    /// Providers the flags are extracted from.
    pub fn figment() -> Figment {
        Figment::new()
            .merge(Env::raw().only(&["NODE_ENV"]))
            .merge(Env::prefixed(ENV_PREFIX).ignore(&["node_env"]))
    }

    /// Extract flags from an arbitrary figment (tests, embedding runtimes).
    pub fn extract(figment: &Figment) -> std::result::Result<Self, figment::Error> {
        let raw: RawFlags = figment.extract()?;

        let is_production = raw
            .production
            .unwrap_or_else(|| raw.node_env.as_deref() == Some("production"));

        Ok(Self {
            is_production,
            is_debug: raw.debug,
            is_fast: raw.fast,
            is_analyze: raw.analyze,
            host: raw.host,
        })
    }

    /// Read the process environment.
    pub fn from_env() -> Result<Self> {
        let flags = Self::extract(&Self::figment())?;
        tracing::debug!(
            production = flags.is_production,
            debug = flags.is_debug,
            fast = flags.is_fast,
            analyze = flags.is_analyze,
            host = %flags.host,
            "Read environment flags"
        );
        Ok(flags)
    }

    pub fn mode_name(&self) -> &'static str {
        if self.is_production {
            "production"
        } else {
            "development"
        }
    }
}
