//! Deterministic, explainable player rankings over tournament statistics.
//!
//! Look a profile up by intent name, hand it a candidate pool, get back a
//! ranked and annotated [`RankedResult`] ready to serialize as JSON.

pub mod analysis;
pub mod config;
pub mod data;
pub mod display;
pub mod error;

pub use analysis::profiles::{lookup, Direction, Metric, MetricWeight, RankingIntent, RankingProfile};
pub use analysis::ranker::{rank_players, Ranker, RankerConfig, DEFAULT_TOP_N};
pub use analysis::result::{RankedPlayer, RankedResult, SeedDeltaLabel};
pub use data::models::{PlayerId, PlayerRecord};
pub use error::AppError;
