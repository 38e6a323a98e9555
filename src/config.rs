use crate::cli::CommonArgs;
use crate::error::{Result, SnoopError};

/// Connection settings for the hosting API, validated before any request.
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub token: String,
}

impl Config {
    pub fn from_args(common: &CommonArgs) -> Result<Self> {
        Self::new(common.token.as_deref(), common.server.as_deref())
    }

    pub fn new(token: Option<&str>, server: Option<&str>) -> Result<Self> {
        let token = token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| SnoopError::Config("no token specified".to_string()))?;
        let server = server
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| SnoopError::Config("no server specified".to_string()))?;

        Ok(Self {
            base_url: api_base_url(server),
            token: token.to_string(),
        })
    }
}

fn api_base_url(server: &str) -> String {
    let server = server.trim_end_matches('/');
    if server.starts_with("http://") || server.starts_with("https://") {
        format!("{server}/api/v4")
    } else {
        format!("https://{server}/api/v4")
    }
}
