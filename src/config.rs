use crate::analysis::profiles::RankingIntent;
use crate::analysis::ranker::DEFAULT_TOP_N;
use crate::error::AppError;
use std::env;

const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub intent: RankingIntent,
    pub top_n: usize,
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            intent: RankingIntent::Strongest,
            top_n: DEFAULT_TOP_N,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| env::var(key).ok())
    }

    pub fn from_vars<F>(var: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        // Unknown intents fail here, at startup, not mid-ranking
        let intent = match var("SMASH_RANK_INTENT") {
            Some(name) => name.trim().parse::<RankingIntent>()?,
            None => defaults.intent,
        };

        let top_n = match var("SMASH_RANK_TOP_N") {
            Some(raw) => raw.trim().parse::<usize>().map_err(|_| {
                AppError::ConfigError(format!(
                    "SMASH_RANK_TOP_N must be a non-negative integer, got '{}'",
                    raw
                ))
            })?,
            None => defaults.top_n,
        };

        let log_filter = var("SMASH_RANK_LOG").unwrap_or(defaults.log_filter);

        Ok(Config {
            intent,
            top_n,
            log_filter,
        })
    }
}
