use log::warn;
use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::blockchain::ChainConfig;

/// Process settings read from the environment (after `.env` is loaded).
#[derive(Debug, Clone)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub miner_address: String,
    pub chain: ChainConfig,
    /// Unset means mining searches without a deadline.
    pub mining_timeout: Option<Duration>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            miner_address: "miner".to_string(),
            chain: ChainConfig::default(),
            mining_timeout: None,
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let chain = ChainConfig {
            difficulty: parse_or(&lookup, "MINING_DIFFICULTY", defaults.chain.difficulty),
            mining_sender: lookup("MINING_SENDER").unwrap_or(defaults.chain.mining_sender),
            mining_reward: parse_or(&lookup, "MINING_REWARD", defaults.chain.mining_reward),
        };
        let mining_timeout = lookup("MINING_TIMEOUT_SECS")
            .and_then(|raw| parse_value::<u64>("MINING_TIMEOUT_SECS", &raw))
            .map(Duration::from_secs);

        Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse_or(&lookup, "PORT", defaults.port),
            miner_address: lookup("MINER_ADDRESS").unwrap_or(defaults.miner_address),
            chain,
            mining_timeout,
        }
    }
}

fn parse_value<T: FromStr>(key: &str, raw: &str) -> Option<T> {
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!("ignoring invalid {}={:?}, using default", key, raw);
            None
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    lookup(key)
        .and_then(|raw| parse_value(key, &raw))
        .unwrap_or(default)
}
