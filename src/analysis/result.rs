use super::profiles::{Metric, MetricWeight, RankingIntent};
use crate::data::models::{PlayerId, PlayerRecord};
use crate::error::AppError;
use serde::Serialize;
use std::collections::BTreeMap;

pub const MISSING_METRIC_HANDLING: &str = "neutral_0.5";

pub const TIE_BREAK_ORDER: [Metric; 3] = [
    Metric::OpponentStrength,
    Metric::ActivityScore,
    Metric::WeightedWinRate,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedDeltaLabel {
    OutperformedSeed,
    UnderperformedSeed,
    MetSeed,
    Unknown,
}

impl SeedDeltaLabel {
    pub fn from_delta(value: Option<f64>) -> Self {
        match value {
            None => SeedDeltaLabel::Unknown,
            Some(v) if v < 0.0 => SeedDeltaLabel::OutperformedSeed,
            Some(v) if v > 0.0 => SeedDeltaLabel::UnderperformedSeed,
            Some(_) => SeedDeltaLabel::MetSeed,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SeedDeltaLabel::OutperformedSeed => "outperformed_seed",
            SeedDeltaLabel::UnderperformedSeed => "underperformed_seed",
            SeedDeltaLabel::MetSeed => "met_seed",
            SeedDeltaLabel::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeedDeltaSemantics {
    pub metric: Metric,
    pub negative: &'static str,
    pub positive: &'static str,
    pub zero: &'static str,
}

impl Default for SeedDeltaSemantics {
    fn default() -> Self {
        SeedDeltaSemantics {
            metric: Metric::AvgSeedDelta,
            negative: "outperformed_seed (good)",
            positive: "underperformed_seed (bad)",
            zero: "met_seed",
        }
    }
}

/// How the ranking was produced, echoed back so callers can show their work.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Method {
    pub description: &'static str,
    pub seed_delta_semantics: SeedDeltaSemantics,
    pub weights: Vec<MetricWeight>,
    pub missing_metric_handling: &'static str,
    pub tie_break_order: [Metric; 3],
    pub reduction_note: Option<String>,
}

/// Raw values used for scoring, always the full set, `null` when absent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    pub weighted_win_rate: Option<f64>,
    pub opponent_strength: Option<f64>,
    pub avg_seed_delta: Option<f64>,
    pub seed_delta_label: SeedDeltaLabel,
    pub upset_rate: Option<f64>,
    pub activity_score: Option<f64>,
    pub avg_event_entrants: Option<f64>,
    pub large_event_share: Option<f64>,
}

impl MetricsSnapshot {
    pub fn from_record(record: &PlayerRecord) -> Self {
        MetricsSnapshot {
            weighted_win_rate: record.weighted_win_rate,
            opponent_strength: record.opponent_strength,
            avg_seed_delta: record.avg_seed_delta,
            seed_delta_label: SeedDeltaLabel::from_delta(record.avg_seed_delta),
            upset_rate: record.upset_rate,
            activity_score: record.activity_score,
            avg_event_entrants: record.avg_event_entrants,
            large_event_share: record.large_event_share,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedPlayer {
    pub rank: usize,
    pub gamer_tag: Option<String>,
    pub player_id: Option<PlayerId>,
    pub ranking_score: f64,
    pub why: Vec<String>,
    pub score_contributions: BTreeMap<Metric, f64>,
    pub metrics: MetricsSnapshot,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedResult {
    pub intent: RankingIntent,
    pub intent_label: &'static str,
    pub method: Method,
    pub count_considered: usize,
    pub count_original: usize,
    pub top_players: Vec<RankedPlayer>,
}

impl RankedResult {
    pub fn to_json(&self) -> Result<String, AppError> {
        serde_json::to_string(self)
            .map_err(|e| AppError::JsonError(format!("Failed to serialize ranking: {}", e)))
    }

    pub fn to_json_pretty(&self) -> Result<String, AppError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| AppError::JsonError(format!("Failed to serialize ranking: {}", e)))
    }
}
