//! Process configuration read from the environment.
//!
//! | Variable                | Default                          |
//! |-------------------------|----------------------------------|
//! | `IJTEMA_DATA_DIR`       | `<Documents>/Ijtema Manager`     |
//! | `IJTEMA_BIND_ADDR`      | `0.0.0.0:3000`                   |
//! | `IJTEMA_ALLOWED_ORIGIN` | `http://localhost:8080`          |

use anyhow::{anyhow, Context, Result};
use axum::http::HeaderValue;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DATA_DIR_VAR: &str = "IJTEMA_DATA_DIR";
pub const BIND_ADDR_VAR: &str = "IJTEMA_BIND_ADDR";
pub const ALLOWED_ORIGIN_VAR: &str = "IJTEMA_ALLOWED_ORIGIN";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:8080";
const DATA_DIRECTORY_NAME: &str = "Ijtema Manager";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub bind_addr: SocketAddr,
    pub allowed_origin: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any key lookup; blank values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let data_dir = match value(DATA_DIR_VAR) {
            Some(dir) => PathBuf::from(dir),
            None => default_data_dir()?,
        };

        let bind_addr_text = value(BIND_ADDR_VAR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr: SocketAddr = bind_addr_text
            .parse()
            .with_context(|| format!("{} is not a socket address: {}", BIND_ADDR_VAR, bind_addr_text))?;

        let allowed_origin =
            value(ALLOWED_ORIGIN_VAR).unwrap_or_else(|| DEFAULT_ALLOWED_ORIGIN.to_string());
        HeaderValue::from_str(&allowed_origin)
            .with_context(|| format!("{} is not a valid origin: {}", ALLOWED_ORIGIN_VAR, allowed_origin))?;

        Ok(Self {
            data_dir,
            bind_addr,
            allowed_origin,
        })
    }
}

/// `<Documents>/Ijtema Manager`, falling back to the home directory
fn default_data_dir() -> Result<PathBuf> {
    dirs::document_dir()
        .or_else(dirs::home_dir)
        .map(|base| base.join(DATA_DIRECTORY_NAME))
        .ok_or_else(|| anyhow!("Could not determine a data directory; set {}", DATA_DIR_VAR))
}
