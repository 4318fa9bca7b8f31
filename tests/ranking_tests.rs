//! End-to-end ranking behavior through the public library API.

use serde_json::{json, Value};
use smash_rank::{lookup, rank_players, PlayerId, PlayerRecord, RankingIntent};

fn player(id: i64, tag: &str) -> PlayerRecord {
    PlayerRecord::new(PlayerId::Int(id), tag)
}

fn sample_pool() -> Vec<PlayerRecord> {
    let mut pool = Vec::new();
    for i in 0..12 {
        let mut p = player(i, &format!("player{}", i));
        p.weighted_win_rate = Some(0.3 + (i % 5) as f64 * 0.1);
        p.opponent_strength = Some(((i * 7) % 11) as f64 / 10.0);
        p.avg_seed_delta = if i % 4 == 0 { None } else { Some(i as f64 - 6.0) };
        p.upset_rate = Some(((i * 3) % 7) as f64 / 7.0);
        p.activity_score = Some(i as f64 * 0.5);
        p.avg_event_entrants = Some(32.0 + i as f64);
        p.large_event_share = if i % 3 == 0 { None } else { Some(0.25) };
        pool.push(p);
    }
    pool
}

fn tags(result: &smash_rank::RankedResult) -> Vec<String> {
    result
        .top_players
        .iter()
        .map(|p| p.gamer_tag.clone().unwrap_or_default())
        .collect()
}

// =============================================================================
// Determinism and bounds
// =============================================================================

#[test]
fn test_repeated_runs_are_byte_identical() {
    let pool = sample_pool();
    for intent in RankingIntent::ALL {
        let first = rank_players(&pool, intent.profile(), 10).to_json().unwrap();
        let second = rank_players(&pool, intent.profile(), 10).to_json().unwrap();
        assert_eq!(first, second, "intent {} not deterministic", intent);
    }
}

#[test]
fn test_scores_within_weight_bounds() {
    let pool = sample_pool();
    for intent in RankingIntent::ALL {
        let profile = intent.profile();
        let total = profile.total_weight();
        let result = rank_players(&pool, profile, pool.len());
        assert_eq!(result.top_players.len(), pool.len());

        for entry in &result.top_players {
            assert!(entry.ranking_score >= 0.0);
            assert!(entry.ranking_score <= total + 1e-6);
            for w in profile.weights {
                let contribution = entry.score_contributions[&w.metric];
                let normalized = contribution / w.weight;
                assert!((-1e-4..=1.0 + 1e-4).contains(&normalized));
            }
        }

        let scores: Vec<f64> = result.top_players.iter().map(|p| p.ranking_score).collect();
        assert!(scores.windows(2).all(|w| w[0] >= w[1]));
    }
}

#[test]
fn test_all_missing_metrics_score_half_total_weight() {
    let mut full = player(1, "full");
    full.upset_rate = Some(0.9);
    full.avg_seed_delta = Some(-2.0);
    full.opponent_strength = Some(0.8);
    full.weighted_win_rate = Some(0.7);
    let empty = player(2, "empty");

    let profile = RankingIntent::Clutch.profile();
    let result = rank_players(&[full, empty], profile, 5);

    let empty_entry = result
        .top_players
        .iter()
        .find(|p| p.gamer_tag.as_deref() == Some("empty"))
        .unwrap();
    assert_eq!(empty_entry.ranking_score, 0.5);
    assert!((empty_entry.ranking_score - 0.5 * profile.total_weight()).abs() < 1e-9);
    assert_eq!(
        empty_entry.why,
        vec![
            "upset_rate=null",
            "avg_seed_delta=null (unknown; negative is good, positive is bad)",
        ]
    );
}

// =============================================================================
// Direction and tie-breaking
// =============================================================================

#[test]
fn test_negative_seed_delta_ranks_higher_when_underrated() {
    let mut over = player(1, "over");
    over.avg_seed_delta = Some(5.0);
    over.upset_rate = Some(0.3);
    over.activity_score = Some(2.0);
    let mut under = over.clone();
    under.player_id = Some(PlayerId::Int(2));
    under.gamer_tag = Some("under".to_string());
    under.avg_seed_delta = Some(-5.0);

    let result = rank_players(&[over, under], lookup("underrated").unwrap(), 2);

    assert_eq!(tags(&result), vec!["under", "over"]);
    assert!(result.top_players[0].ranking_score > result.top_players[1].ranking_score);
    assert!(result.top_players[0].why[0].contains("outperformed_seed"));
}

#[test]
fn test_overrated_flips_seed_delta_direction() {
    let mut over = player(1, "over");
    over.avg_seed_delta = Some(5.0);
    let mut under = player(2, "under");
    under.avg_seed_delta = Some(-5.0);

    let result = rank_players(&[under, over], lookup("overrated").unwrap(), 2);
    assert_eq!(tags(&result), vec!["over", "under"]);
}

#[test]
fn test_tie_break_falls_through_in_order() {
    // Upset-heavy only weighs upset_rate, avg_seed_delta and activity_score.
    // With none of those present every score is the neutral 0.5.
    let mut a = player(1, "a");
    a.opponent_strength = Some(0.5);
    let mut b = player(2, "b");
    b.opponent_strength = Some(0.9);
    let mut c = player(3, "c");
    c.opponent_strength = Some(0.5);
    c.weighted_win_rate = Some(0.9);
    let mut d = player(4, "d");
    d.opponent_strength = Some(0.5);
    d.weighted_win_rate = Some(0.1);

    let result = rank_players(&[a, b, c, d], RankingIntent::UpsetHeavy.profile(), 10);
    assert!(result.top_players.iter().all(|p| p.ranking_score == 0.5));
    assert_eq!(tags(&result), vec!["b", "c", "d", "a"]);
}

#[test]
fn test_tie_break_uses_activity_then_win_rate() {
    // Clutch ignores activity_score, and equal opponent_strength and
    // weighted_win_rate have no spread, so both players score 0.5.
    let mut x = player(10, "x");
    x.opponent_strength = Some(0.5);
    x.weighted_win_rate = Some(0.5);
    x.activity_score = Some(3.0);
    let mut y = player(11, "y");
    y.opponent_strength = Some(0.5);
    y.weighted_win_rate = Some(0.5);
    y.activity_score = Some(7.0);

    let result = rank_players(&[x, y], RankingIntent::Clutch.profile(), 2);
    assert_eq!(result.top_players[0].ranking_score, result.top_players[1].ranking_score);
    assert_eq!(tags(&result), vec!["y", "x"]);

    // Upset-heavy ignores weighted_win_rate; equal activity has no spread.
    let mut low = player(1, "low");
    low.opponent_strength = Some(0.5);
    low.activity_score = Some(1.0);
    low.weighted_win_rate = Some(0.1);
    let mut high = low.clone();
    high.gamer_tag = Some("high".to_string());
    high.weighted_win_rate = Some(0.9);

    let result = rank_players(&[low, high], RankingIntent::UpsetHeavy.profile(), 2);
    assert_eq!(result.top_players[0].ranking_score, result.top_players[1].ranking_score);
    assert_eq!(tags(&result), vec!["high", "low"]);
}

#[test]
fn test_full_ties_keep_input_order() {
    let pool = vec![player(1, "first"), player(2, "second"), player(3, "third")];
    let result = rank_players(&pool, RankingIntent::Strongest.profile(), 3);
    assert_eq!(tags(&result), vec!["first", "second", "third"]);
}

// =============================================================================
// Pool reduction and top-N
// =============================================================================

fn synthetic_pool(n: usize) -> Vec<PlayerRecord> {
    (0..n)
        .map(|i| {
            let mut p = player(i as i64, &format!("p{}", i));
            p.opponent_strength = Some((i % 997) as f64 / 997.0);
            p.activity_score = Some((i % 13) as f64);
            p.weighted_win_rate = Some((i % 101) as f64 / 101.0);
            p
        })
        .collect()
}

#[test]
fn test_oversized_pool_is_reduced() {
    let pool = synthetic_pool(6000);
    let result = rank_players(&pool, RankingIntent::Strongest.profile(), 5);

    assert_eq!(result.count_original, 6000);
    assert_eq!(result.count_considered, 500);
    assert_eq!(
        result.method.reduction_note.as_deref(),
        Some("Candidate pool reduced from 6000 to 500 for deterministic scoring stability.")
    );
    assert_eq!(result.top_players.len(), 5);
}

#[test]
fn test_reduction_keeps_highest_tie_break_values() {
    let pool = synthetic_pool(6000);
    let result = rank_players(&pool, RankingIntent::Strongest.profile(), 500);

    // Every kept player has opponent_strength at or above the 500th best.
    let mut strengths: Vec<f64> = pool.iter().map(|p| p.opponent_strength.unwrap()).collect();
    strengths.sort_by(|a, b| b.total_cmp(a));
    let cutoff = strengths[499];
    assert!(result
        .top_players
        .iter()
        .all(|p| p.metrics.opponent_strength.unwrap() >= cutoff));
}

#[test]
fn test_pool_under_threshold_is_untouched() {
    let pool = synthetic_pool(4000);
    let result = rank_players(&pool, RankingIntent::Consistent.profile(), 5);

    assert_eq!(result.count_original, 4000);
    assert_eq!(result.count_considered, 4000);
    assert!(result.method.reduction_note.is_none());
}

#[test]
fn test_pool_at_threshold_is_untouched() {
    let pool = synthetic_pool(5000);
    let result = rank_players(&pool, RankingIntent::Strongest.profile(), 1);
    assert_eq!(result.count_considered, 5000);
    assert!(result.method.reduction_note.is_none());
}

#[test]
fn test_top_n_zero_returns_one() {
    let result = rank_players(&sample_pool(), RankingIntent::Clutch.profile(), 0);
    assert_eq!(result.top_players.len(), 1);
    assert_eq!(result.top_players[0].rank, 1);
}

#[test]
fn test_top_n_larger_than_pool_returns_everyone() {
    let pool = sample_pool();
    let result = rank_players(&pool, RankingIntent::ActivityMonsters.profile(), 100);
    assert_eq!(result.top_players.len(), pool.len());
    let ranks: Vec<usize> = result.top_players.iter().map(|p| p.rank).collect();
    assert_eq!(ranks, (1..=pool.len()).collect::<Vec<_>>());
}

// =============================================================================
// Registry and empty input
// =============================================================================

#[test]
fn test_unknown_intent_is_rejected_with_sorted_list() {
    let err = lookup("goatmaxxing").unwrap_err();
    let message = err.to_string();
    assert!(message.contains("goatmaxxing"));
    assert!(message.ends_with(
        "activity_monsters, clutch, consistent, overrated, strongest, underrated, upset_heavy."
    ));
}

#[test]
fn test_empty_pool_is_not_an_error() {
    let result = rank_players(&[], RankingIntent::Strongest.profile(), 5);
    assert_eq!(result.count_considered, 0);
    assert_eq!(result.count_original, 0);
    assert!(result.top_players.is_empty());
    assert!(result.method.reduction_note.is_none());
}

// =============================================================================
// Output contract
// =============================================================================

#[test]
fn test_json_field_names() {
    let mut p = player(42, "Marss");
    p.weighted_win_rate = Some(0.75);
    p.avg_seed_delta = Some(-1.5);
    let result = rank_players(&[p.clone()], RankingIntent::Strongest.profile(), 5);
    let value: Value = serde_json::from_str(&result.to_json().unwrap()).unwrap();

    assert_eq!(value["intent"], "strongest");
    assert_eq!(value["intent_label"], "Strongest Players");
    assert_eq!(
        value["method"]["description"],
        "Overall strongest by weighted win rate and opponent strength."
    );
    assert_eq!(
        value["method"]["weights"][0],
        json!({"metric": "weighted_win_rate", "weight": 0.55, "direction": "desc"})
    );
    assert_eq!(value["method"]["missing_metric_handling"], "neutral_0.5");
    assert_eq!(
        value["method"]["tie_break_order"],
        json!(["opponent_strength", "activity_score", "weighted_win_rate"])
    );
    assert!(value["method"]["reduction_note"].is_null());
    assert_eq!(value["method"]["seed_delta_semantics"]["negative"], "outperformed_seed (good)");
    assert_eq!(value["count_considered"], 1);
    assert_eq!(value["count_original"], 1);

    let entry = &value["top_players"][0];
    assert_eq!(entry["rank"], 1);
    assert_eq!(entry["gamer_tag"], "Marss");
    assert_eq!(entry["player_id"], 42);
    assert_eq!(entry["ranking_score"], 0.5);
    assert_eq!(entry["why"], json!(["weighted_win_rate=0.750"]));
    assert_eq!(entry["score_contributions"]["weighted_win_rate"], 0.275);
    assert_eq!(entry["metrics"]["avg_seed_delta"], -1.5);
    assert_eq!(entry["metrics"]["seed_delta_label"], "outperformed_seed");
    assert!(entry["metrics"]["upset_rate"].is_null());
}

#[test]
fn test_input_records_are_not_mutated() {
    let pool = sample_pool();
    let before = pool.clone();
    let _ = rank_players(&pool, RankingIntent::Underrated.profile(), 3);
    assert_eq!(pool, before);
}

#[test]
fn test_string_player_ids_pass_through() {
    let mut p = PlayerRecord::new(PlayerId::Text("user-abc".to_string()), "Light");
    p.activity_score = Some(1.0);
    let result = rank_players(&[p], RankingIntent::ActivityMonsters.profile(), 1);
    let value = serde_json::to_value(&result).unwrap();
    assert_eq!(value["top_players"][0]["player_id"], "user-abc");
}
