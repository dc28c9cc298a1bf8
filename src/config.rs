//! Application configuration, read from the environment.
//!
//! The binary loads `.env` into the environment before anything reads it.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use tracing::warn;

use crate::llm::LlmSettings;
use crate::LeagueId;

/// League used when `ESPN_LEAGUE_ID` is unset or unparsable.
pub const DEFAULT_LEAGUE_ID: u32 = 1470361165;

/// Base path for ESPN Fantasy Football v3 API.
pub const FFL_BASE_URL: &str = "https://lm-api-reads.fantasy.espn.com/apis/v3/games/ffl";

pub const DEFAULT_PORT: u16 = 8000;

pub const LEAGUE_ID_ENV_VAR: &str = "ESPN_LEAGUE_ID";

/// ESPN session credentials. Both cookies are needed for private leagues.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EspnCredentials {
    pub swid: String,
    pub espn_s2: String,
}

#[derive(Debug, Clone)]
pub struct EspnConfig {
    pub league_id: LeagueId,
    pub credentials: Option<EspnCredentials>,
    pub base_url: String,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: IpAddr,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// SQLite file holding generated narratives.
    pub db_path: PathBuf,
    /// Directory for the on-disk cache tier; `None` keeps caching in memory only.
    pub cache_dir: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub espn: EspnConfig,
    /// `None` when no usable LLM provider is configured.
    pub llm: Option<LlmSettings>,
    pub server: ServerConfig,
    pub storage: StorageConfig,
}

impl AppConfig {
    /// Read the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let league_id = match get(LEAGUE_ID_ENV_VAR) {
            Some(raw) => raw.parse::<LeagueId>().unwrap_or_else(|_| {
                warn!(value = %raw, "invalid {LEAGUE_ID_ENV_VAR}, using default league");
                LeagueId::new(DEFAULT_LEAGUE_ID)
            }),
            None => LeagueId::new(DEFAULT_LEAGUE_ID),
        };

        let credentials = match (get("ESPN_SWID"), get("ESPN_S2")) {
            (Some(swid), Some(espn_s2)) => Some(EspnCredentials { swid, espn_s2 }),
            _ => None,
        };

        let espn = EspnConfig {
            league_id,
            credentials,
            base_url: get("ESPN_FFL_BASE_URL").unwrap_or_else(|| FFL_BASE_URL.to_string()),
        };

        let llm = match LlmSettings::from_lookup(&get) {
            Ok(settings) => Some(settings),
            Err(e) => {
                warn!(error = %e, "LLM narration disabled");
                None
            }
        };

        let server = ServerConfig {
            bind: get("BIND_ADDR")
                .and_then(|raw| raw.parse().ok())
                .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED)),
            port: get("PORT")
                .and_then(|raw| raw.parse().ok())
                .unwrap_or(DEFAULT_PORT),
        };

        let default_dir = default_data_dir();
        let storage = StorageConfig {
            db_path: get("ROUNDUP_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| default_dir.join("roundup.db")),
            cache_dir: Some(
                get("ROUNDUP_CACHE_DIR")
                    .map(PathBuf::from)
                    .unwrap_or(default_dir),
            ),
        };

        Self {
            espn,
            llm,
            server,
            storage,
        }
    }
}

/// Path: ~/.cache/ffl-roundup
pub fn default_data_dir() -> PathBuf {
    let base = dirs::cache_dir().unwrap_or_else(|| {
        let mut home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.push(".cache");
        home
    });
    base.join("ffl-roundup")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::LlmProvider;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> AppConfig {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults_with_empty_environment() {
        let config = config_from(&[]);

        assert_eq!(config.espn.league_id, LeagueId::new(DEFAULT_LEAGUE_ID));
        assert!(config.espn.credentials.is_none());
        assert_eq!(config.espn.base_url, FFL_BASE_URL);
        assert_eq!(config.server.port, DEFAULT_PORT);
        // groq is the default provider and has no key here
        assert!(config.llm.is_none());
        assert!(config.storage.db_path.ends_with("roundup.db"));
    }

    #[test]
    fn test_invalid_league_id_falls_back_to_default() {
        let config = config_from(&[("ESPN_LEAGUE_ID", "not-a-number")]);
        assert_eq!(config.espn.league_id, LeagueId::new(DEFAULT_LEAGUE_ID));

        let config = config_from(&[("ESPN_LEAGUE_ID", "98765")]);
        assert_eq!(config.espn.league_id, LeagueId::new(98765));
    }

    #[test]
    fn test_credentials_need_both_cookies() {
        let config = config_from(&[("ESPN_SWID", "{ABC}")]);
        assert!(config.espn.credentials.is_none());

        let config = config_from(&[("ESPN_SWID", "{ABC}"), ("ESPN_S2", "s2value")]);
        assert_eq!(
            config.espn.credentials,
            Some(EspnCredentials {
                swid: "{ABC}".to_string(),
                espn_s2: "s2value".to_string(),
            })
        );
    }

    #[test]
    fn test_server_and_storage_overrides() {
        let config = config_from(&[
            ("PORT", "9100"),
            ("BIND_ADDR", "127.0.0.1"),
            ("ROUNDUP_DB_PATH", "/tmp/roundup-test.db"),
            ("ROUNDUP_CACHE_DIR", "/tmp/roundup-cache"),
        ]);

        assert_eq!(config.server.socket_addr().to_string(), "127.0.0.1:9100");
        assert_eq!(config.storage.db_path, PathBuf::from("/tmp/roundup-test.db"));
        assert_eq!(
            config.storage.cache_dir,
            Some(PathBuf::from("/tmp/roundup-cache"))
        );
    }

    #[test]
    fn test_llm_settings_resolved_when_key_present() {
        let config = config_from(&[("LLM_PROVIDER", "OpenAI"), ("OPENAI_API_KEY", "sk-test")]);
        let llm = config.llm.expect("openai should be configured");
        assert_eq!(llm.provider, LlmProvider::OpenAi);
        assert_eq!(llm.model, "gpt-4o-mini");
    }
}
