use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque player identifier, kept in whatever JSON shape it arrived in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlayerId {
    Int(i64),
    Text(String),
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerId::Int(id) => write!(f, "{}", id),
            PlayerId::Text(id) => write!(f, "{}", id),
        }
    }
}

// One player's aggregated stats for a state / time window / videogame scope
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    #[serde(default)]
    pub player_id: Option<PlayerId>,
    #[serde(default)]
    pub gamer_tag: Option<String>,
    #[serde(default)]
    pub weighted_win_rate: Option<f64>,
    #[serde(default)]
    pub opponent_strength: Option<f64>,
    /// Negative = placed better than seeded (good), positive = worse (bad)
    #[serde(default)]
    pub avg_seed_delta: Option<f64>,
    #[serde(default)]
    pub upset_rate: Option<f64>,
    #[serde(default)]
    pub activity_score: Option<f64>,
    #[serde(default)]
    pub avg_event_entrants: Option<f64>,
    #[serde(default)]
    pub large_event_share: Option<f64>,
}

impl PlayerRecord {
    pub fn new(player_id: PlayerId, gamer_tag: &str) -> Self {
        PlayerRecord {
            player_id: Some(player_id),
            gamer_tag: Some(gamer_tag.to_string()),
            ..Default::default()
        }
    }
}

// Envelope returned by the precomputed rankings endpoint
#[derive(Debug, Deserialize)]
pub struct PrecomputedResponse {
    pub results: Vec<PlayerRecord>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub months_back: Option<u32>,
}
