use crate::analysis::profiles::RankingIntent;
use crate::analysis::result::{RankedResult, SeedDeltaLabel};
use colored::*;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct RankRow {
    #[tabled(rename = "#")]
    rank: String,
    player: String,
    score: String,
    win_rate: String,
    opp_strength: String,
    seed_delta: String,
    upsets: String,
}

#[derive(Tabled)]
struct IntentRow {
    intent: String,
    label: String,
    weights: String,
}

fn cell(value: Option<f64>) -> String {
    value.map(|v| format!("{:.3}", v)).unwrap_or_else(|| "-".to_string())
}

fn seed_delta_cell(value: Option<f64>, label: SeedDeltaLabel) -> String {
    let text = cell(value);
    match label {
        SeedDeltaLabel::OutperformedSeed => text.green().to_string(),
        SeedDeltaLabel::UnderperformedSeed => text.red().to_string(),
        SeedDeltaLabel::MetSeed | SeedDeltaLabel::Unknown => text,
    }
}

pub fn display_rankings(result: &RankedResult) {
    println!("\n{}", format!("🏆 {}", result.intent_label).bold().cyan());
    println!("{}\n", "=".repeat(60).cyan());
    println!("{}", result.method.description);
    println!(
        "Considered {} of {} players\n",
        result.count_considered, result.count_original
    );

    if let Some(note) = &result.method.reduction_note {
        println!("{} {}\n", "⚠️".yellow(), note.yellow());
    }

    if result.top_players.is_empty() {
        println!("{}", "No players to rank (empty candidate pool)".yellow());
        return;
    }

    let mut rows = vec![];
    for player in &result.top_players {
        let tag = player.gamer_tag.clone().unwrap_or_else(|| "?".to_string());
        let id = player
            .player_id
            .as_ref()
            .map(|id| format!(" ({})", id))
            .unwrap_or_default();

        rows.push(RankRow {
            rank: format!("#{}", player.rank),
            player: format!("{}{}", tag, id),
            score: format!("{:.4}", player.ranking_score),
            win_rate: cell(player.metrics.weighted_win_rate),
            opp_strength: cell(player.metrics.opponent_strength),
            seed_delta: seed_delta_cell(player.metrics.avg_seed_delta, player.metrics.seed_delta_label),
            upsets: cell(player.metrics.upset_rate),
        });
    }

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);

    println!("\n{}", "Why".bold().yellow());
    for player in &result.top_players {
        let tag = player.gamer_tag.as_deref().unwrap_or("?");
        println!("  {} {}", format!("#{}", player.rank).bold(), tag);
        for line in &player.why {
            println!("    • {}", line);
        }
    }

    println!("\n{}", "Method".bold().yellow());
    let weights: Vec<String> = result
        .method
        .weights
        .iter()
        .map(|w| format!("{} {:.2} ({})", w.metric, w.weight, w.direction))
        .collect();
    println!("• Weights: {}", weights.join(", "));
    println!("• Missing metrics: {}", result.method.missing_metric_handling);
    let tie_break: Vec<String> = result
        .method
        .tie_break_order
        .iter()
        .map(|m| m.to_string())
        .collect();
    println!("• Tie-break: score, then {}", tie_break.join(", "));
    println!("• avg_seed_delta: negative is good, positive is bad\n");
}

pub fn display_intents() {
    println!("\n{}", "🎯 Ranking Intents".bold().cyan());
    println!("{}\n", "=".repeat(60).cyan());

    let mut rows = vec![];
    for intent in RankingIntent::ALL {
        let profile = intent.profile();
        let weights: Vec<String> = profile
            .weights
            .iter()
            .map(|w| format!("{} {:.2} {}", w.metric, w.weight, w.direction))
            .collect();
        rows.push(IntentRow {
            intent: intent.key().to_string(),
            label: profile.label.to_string(),
            weights: weights.join("\n"),
        });
    }

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);

    for intent in RankingIntent::ALL {
        println!("• {}: {}", intent.key().bold(), intent.profile().description);
    }
    println!();
}

pub fn display_error(error: &str) {
    eprintln!("{} {}", "❌ Error:".red().bold(), error);
}

pub fn display_info(message: &str) {
    eprintln!("{} {}", "ℹ️".cyan(), message);
}

pub fn display_success(message: &str) {
    eprintln!("{} {}", "✓".green(), message);
}
