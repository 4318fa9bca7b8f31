use super::profiles::{Direction, Metric, MetricWeight, RankingProfile};
use super::result::{
    Method, MetricsSnapshot, RankedPlayer, RankedResult, SeedDeltaLabel, SeedDeltaSemantics,
    MISSING_METRIC_HANDLING, TIE_BREAK_ORDER,
};
use crate::data::models::PlayerRecord;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, info};

pub const DEFAULT_TOP_N: usize = 5;
pub const NEUTRAL_SCORE: f64 = 0.5;
pub const OVERSIZE_THRESHOLD: usize = 5000;
pub const MAX_CANDIDATES: usize = 500;

const WHY_METRICS: usize = 3;
const NEUTRAL_FALLBACK_REASON: &str = "ranked with neutral handling for missing metrics";

/// Pool-size limits applied before scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankerConfig {
    /// Pools strictly larger than this are reduced.
    pub oversize_threshold: usize,
    /// Size a reduced pool is cut down to.
    pub max_candidates: usize,
}

impl Default for RankerConfig {
    fn default() -> Self {
        RankerConfig {
            oversize_threshold: OVERSIZE_THRESHOLD,
            max_candidates: MAX_CANDIDATES,
        }
    }
}

struct ScoredCandidate<'a> {
    record: &'a PlayerRecord,
    score: f64,
    contributions: BTreeMap<Metric, f64>,
}

pub struct Ranker {
    config: RankerConfig,
}

impl Ranker {
    pub fn new(config: RankerConfig) -> Self {
        Ranker { config }
    }

    /// Map a raw value onto [0, 1] goodness.
    ///
    /// Missing values and zero-spread metrics land on the neutral 0.5.
    /// `Asc` metrics are inverted so the lowest raw value scores 1.0.
    pub fn normalize(value: Option<f64>, min: f64, max: f64, direction: Direction) -> f64 {
        let value = match value {
            Some(v) => v,
            None => return NEUTRAL_SCORE,
        };
        if max <= min {
            return NEUTRAL_SCORE;
        }

        let scaled = (value - min) / (max - min);
        match direction {
            Direction::Asc => 1.0 - scaled,
            Direction::Desc => scaled,
        }
    }

    /// (min, max) over present values; (0.0, 1.0) when nobody has the metric.
    pub fn metric_bounds(records: &[&PlayerRecord], metric: Metric) -> (f64, f64) {
        records
            .iter()
            .filter_map(|r| metric.value_of(r))
            .fold(None, |bounds: Option<(f64, f64)>, v| match bounds {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
            .unwrap_or((0.0, 1.0))
    }

    /// Secondary ordering key; missing values count as 0.0.
    pub fn tie_break_key(record: &PlayerRecord) -> [f64; 3] {
        TIE_BREAK_ORDER.map(|metric| metric.value_of(record).unwrap_or(0.0))
    }

    fn compare_tie_break(a: &PlayerRecord, b: &PlayerRecord) -> Ordering {
        let (ka, kb) = (Self::tie_break_key(a), Self::tie_break_key(b));
        ka.iter()
            .zip(kb.iter())
            .map(|(x, y)| x.total_cmp(y))
            .find(|o| o.is_ne())
            .unwrap_or(Ordering::Equal)
    }

    /// Shrink an oversized pool to its strongest members by raw tie-break
    /// values. This ignores the profile, so a reduced pool can drop players a
    /// particular intent would have scored well.
    fn reduce_pool<'a>(&self, records: &'a [PlayerRecord]) -> (Vec<&'a PlayerRecord>, Option<String>) {
        let mut candidates: Vec<&PlayerRecord> = records.iter().collect();
        if records.len() <= self.config.oversize_threshold {
            return (candidates, None);
        }

        candidates.sort_by(|a, b| Self::compare_tie_break(b, a));
        candidates.truncate(self.config.max_candidates);

        info!(
            original = records.len(),
            considered = candidates.len(),
            "candidate pool reduced before scoring"
        );

        let note = format!(
            "Candidate pool reduced from {} to {} for deterministic scoring stability.",
            records.len(),
            self.config.max_candidates
        );
        (candidates, Some(note))
    }

    fn score_candidates<'a>(
        candidates: &[&'a PlayerRecord],
        weights: &[MetricWeight],
    ) -> Vec<ScoredCandidate<'a>> {
        let bounds: HashMap<Metric, (f64, f64)> = weights
            .iter()
            .map(|w| (w.metric, Self::metric_bounds(candidates, w.metric)))
            .collect();

        candidates
            .iter()
            .map(|&record| {
                let mut score = 0.0;
                let mut contributions = BTreeMap::new();
                for w in weights {
                    let (min, max) = bounds[&w.metric];
                    let normalized =
                        Self::normalize(w.metric.value_of(record), min, max, w.direction);
                    let weighted = normalized * w.weight;
                    score += weighted;
                    contributions.insert(w.metric, round6(weighted));
                }
                ScoredCandidate {
                    record,
                    score: round6(score),
                    contributions,
                }
            })
            .collect()
    }

    pub fn rank(&self, records: &[PlayerRecord], profile: &RankingProfile, top_n: usize) -> RankedResult {
        let (candidates, reduction_note) = self.reduce_pool(records);

        let mut scored = Self::score_candidates(&candidates, profile.weights);
        scored.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| Self::compare_tie_break(b.record, a.record))
        });
        scored.truncate(top_n.max(1));

        debug!(
            intent = %profile.intent,
            considered = candidates.len(),
            returned = scored.len(),
            "ranking complete"
        );

        let top_players = scored
            .into_iter()
            .enumerate()
            .map(|(idx, candidate)| RankedPlayer {
                rank: idx + 1,
                gamer_tag: candidate.record.gamer_tag.clone(),
                player_id: candidate.record.player_id.clone(),
                ranking_score: candidate.score,
                why: reason_lines(candidate.record, profile),
                score_contributions: candidate.contributions,
                metrics: MetricsSnapshot::from_record(candidate.record),
            })
            .collect();

        RankedResult {
            intent: profile.intent,
            intent_label: profile.label,
            method: Method {
                description: profile.description,
                seed_delta_semantics: SeedDeltaSemantics::default(),
                weights: profile.weights.to_vec(),
                missing_metric_handling: MISSING_METRIC_HANDLING,
                tie_break_order: TIE_BREAK_ORDER,
                reduction_note,
            },
            count_considered: candidates.len(),
            count_original: records.len(),
            top_players,
        }
    }
}

/// Rank `records` under `profile` with the default pool limits.
pub fn rank_players(records: &[PlayerRecord], profile: &RankingProfile, top_n: usize) -> RankedResult {
    Ranker::new(RankerConfig::default()).rank(records, profile, top_n)
}

fn round6(value: f64) -> f64 {
    (value * 1_000_000.0).round() / 1_000_000.0
}

fn format_num(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.3}", v),
        None => "null".to_string(),
    }
}

fn reason_lines(record: &PlayerRecord, profile: &RankingProfile) -> Vec<String> {
    let mut reasons = Vec::new();
    for w in profile.weights.iter().take(WHY_METRICS) {
        let value = w.metric.value_of(record);
        match w.metric {
            Metric::AvgSeedDelta => reasons.push(format!(
                "avg_seed_delta={} ({}; negative is good, positive is bad)",
                format_num(value),
                SeedDeltaLabel::from_delta(value).as_str()
            )),
            Metric::UpsetRate => reasons.push(format!("upset_rate={}", format_num(value))),
            metric => {
                if value.is_some() {
                    reasons.push(format!("{}={}", metric, format_num(value)));
                }
            }
        }
    }
    if reasons.is_empty() {
        reasons.push(NEUTRAL_FALLBACK_REASON.to_string());
    }
    reasons
}
