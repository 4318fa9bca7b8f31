use crate::data::models::PlayerRecord;
use crate::error::AppError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    WeightedWinRate,
    OpponentStrength,
    AvgSeedDelta,
    UpsetRate,
    ActivityScore,
    AvgEventEntrants,
    LargeEventShare,
}

impl Metric {
    pub fn name(&self) -> &'static str {
        match self {
            Metric::WeightedWinRate => "weighted_win_rate",
            Metric::OpponentStrength => "opponent_strength",
            Metric::AvgSeedDelta => "avg_seed_delta",
            Metric::UpsetRate => "upset_rate",
            Metric::ActivityScore => "activity_score",
            Metric::AvgEventEntrants => "avg_event_entrants",
            Metric::LargeEventShare => "large_event_share",
        }
    }

    pub fn value_of(&self, record: &PlayerRecord) -> Option<f64> {
        match self {
            Metric::WeightedWinRate => record.weighted_win_rate,
            Metric::OpponentStrength => record.opponent_strength,
            Metric::AvgSeedDelta => record.avg_seed_delta,
            Metric::UpsetRate => record.upset_rate,
            Metric::ActivityScore => record.activity_score,
            Metric::AvgEventEntrants => record.avg_event_entrants,
            Metric::LargeEventShare => record.large_event_share,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Which end of a metric's raw range counts as "good".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Lower raw values are better (the scaled value is inverted).
    Asc,
    /// Higher raw values are better.
    Desc,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Asc => write!(f, "asc"),
            Direction::Desc => write!(f, "desc"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricWeight {
    pub metric: Metric,
    pub weight: f64,
    pub direction: Direction,
}

impl MetricWeight {
    pub const fn new(metric: Metric, weight: f64, direction: Direction) -> Self {
        MetricWeight {
            metric,
            weight,
            direction,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingIntent {
    Strongest,
    Clutch,
    Underrated,
    Overrated,
    Consistent,
    UpsetHeavy,
    ActivityMonsters,
}

#[derive(Debug, PartialEq)]
pub struct RankingProfile {
    pub intent: RankingIntent,
    pub label: &'static str,
    pub description: &'static str,
    /// Ordered; the first three entries feed the "why" lines.
    pub weights: &'static [MetricWeight],
}

impl RankingProfile {
    pub fn total_weight(&self) -> f64 {
        self.weights.iter().map(|w| w.weight).sum()
    }
}

use Direction::{Asc, Desc};
use Metric::*;

static STRONGEST: RankingProfile = RankingProfile {
    intent: RankingIntent::Strongest,
    label: "Strongest Players",
    description: "Overall strongest by weighted win rate and opponent strength.",
    weights: &[
        MetricWeight::new(WeightedWinRate, 0.55, Desc),
        MetricWeight::new(OpponentStrength, 0.40, Desc),
        MetricWeight::new(ActivityScore, 0.05, Desc),
    ],
};

static CLUTCH: RankingProfile = RankingProfile {
    intent: RankingIntent::Clutch,
    label: "Most Clutch Players",
    description: "Outperform seed and convert upsets against strong opponents.",
    weights: &[
        MetricWeight::new(UpsetRate, 0.40, Desc),
        MetricWeight::new(AvgSeedDelta, 0.35, Asc),
        MetricWeight::new(OpponentStrength, 0.15, Desc),
        MetricWeight::new(WeightedWinRate, 0.10, Desc),
    ],
};

static UNDERRATED: RankingProfile = RankingProfile {
    intent: RankingIntent::Underrated,
    label: "Most Underrated Players",
    description: "Players who consistently outperform seed expectations.",
    weights: &[
        MetricWeight::new(AvgSeedDelta, 0.70, Asc),
        MetricWeight::new(UpsetRate, 0.20, Desc),
        MetricWeight::new(ActivityScore, 0.10, Desc),
    ],
};

static OVERRATED: RankingProfile = RankingProfile {
    intent: RankingIntent::Overrated,
    label: "Most Overrated Players",
    description: "Players who underperform seed expectations.",
    weights: &[
        MetricWeight::new(AvgSeedDelta, 0.75, Desc),
        MetricWeight::new(UpsetRate, 0.15, Asc),
        MetricWeight::new(ActivityScore, 0.10, Desc),
    ],
};

static CONSISTENT: RankingProfile = RankingProfile {
    intent: RankingIntent::Consistent,
    label: "Most Consistent Players",
    description: "Stable performance and reliability across events.",
    weights: &[
        MetricWeight::new(WeightedWinRate, 0.45, Desc),
        MetricWeight::new(AvgSeedDelta, 0.30, Asc),
        MetricWeight::new(ActivityScore, 0.25, Desc),
    ],
};

static UPSET_HEAVY: RankingProfile = RankingProfile {
    intent: RankingIntent::UpsetHeavy,
    label: "Most Upset-Heavy Players",
    description: "Players most associated with upset-driven results.",
    weights: &[
        MetricWeight::new(UpsetRate, 0.70, Desc),
        MetricWeight::new(AvgSeedDelta, 0.20, Asc),
        MetricWeight::new(ActivityScore, 0.10, Desc),
    ],
};

static ACTIVITY_MONSTERS: RankingProfile = RankingProfile {
    intent: RankingIntent::ActivityMonsters,
    label: "Most Active Players",
    description: "High activity and strong event-volume participation.",
    weights: &[
        MetricWeight::new(ActivityScore, 0.55, Desc),
        MetricWeight::new(AvgEventEntrants, 0.20, Desc),
        MetricWeight::new(LargeEventShare, 0.15, Desc),
        MetricWeight::new(WeightedWinRate, 0.10, Desc),
    ],
};

impl RankingIntent {
    pub const ALL: [RankingIntent; 7] = [
        RankingIntent::Strongest,
        RankingIntent::Clutch,
        RankingIntent::Underrated,
        RankingIntent::Overrated,
        RankingIntent::Consistent,
        RankingIntent::UpsetHeavy,
        RankingIntent::ActivityMonsters,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            RankingIntent::Strongest => "strongest",
            RankingIntent::Clutch => "clutch",
            RankingIntent::Underrated => "underrated",
            RankingIntent::Overrated => "overrated",
            RankingIntent::Consistent => "consistent",
            RankingIntent::UpsetHeavy => "upset_heavy",
            RankingIntent::ActivityMonsters => "activity_monsters",
        }
    }

    pub fn profile(&self) -> &'static RankingProfile {
        match self {
            RankingIntent::Strongest => &STRONGEST,
            RankingIntent::Clutch => &CLUTCH,
            RankingIntent::Underrated => &UNDERRATED,
            RankingIntent::Overrated => &OVERRATED,
            RankingIntent::Consistent => &CONSISTENT,
            RankingIntent::UpsetHeavy => &UPSET_HEAVY,
            RankingIntent::ActivityMonsters => &ACTIVITY_MONSTERS,
        }
    }

    /// Every intent key, alphabetically.
    pub fn valid_keys() -> Vec<String> {
        let mut keys: Vec<String> = Self::ALL.iter().map(|i| i.key().to_string()).collect();
        keys.sort();
        keys
    }
}

impl fmt::Display for RankingIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for RankingIntent {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|intent| intent.key() == s)
            .ok_or_else(|| AppError::UnknownIntent {
                intent: s.to_string(),
                valid: Self::valid_keys(),
            })
    }
}

/// Resolve an intent name to its profile. This is the only place an unknown
/// intent is rejected; the ranker trusts whatever profile it is handed.
pub fn lookup(intent: &str) -> Result<&'static RankingProfile, AppError> {
    intent.parse::<RankingIntent>().map(|i| i.profile())
}
