use crate::models::{HistoryEntry, MacroProgress, Macros, SummaryResponse, TrackerData};

pub const PROTEIN_TARGET: i64 = 100;
pub const CARBS_TARGET: i64 = 200;
pub const FAT_TARGET: i64 = 85;

pub fn weekly_protein_total(history: &[HistoryEntry]) -> i64 {
    history
        .iter()
        .fold(0i64, |sum, day| sum.saturating_add(day.macros.protein))
}

pub fn trained_days_count(history: &[HistoryEntry]) -> usize {
    history.iter().filter(|day| day.trained).count()
}

pub fn macro_progress(current: &Macros) -> Vec<MacroProgress> {
    [
        ("protein", current.protein, PROTEIN_TARGET),
        ("carbs", current.carbs, CARBS_TARGET),
        ("fat", current.fat, FAT_TARGET),
    ]
    .into_iter()
    .map(|(name, value, target)| MacroProgress {
        name: name.to_string(),
        current: value,
        target,
        percent: value as f64 / target as f64 * 100.0,
    })
    .collect()
}

pub fn build_summary(data: &TrackerData) -> SummaryResponse {
    SummaryResponse {
        date: data.current_day.to_string(),
        macros: data.daily_macros,
        progress: macro_progress(&data.daily_macros),
        streak: data.streak,
        weekly_protein: weekly_protein_total(&data.weekly_history),
        trained_days: trained_days_count(&data.weekly_history),
        history_len: data.weekly_history.len(),
    }
}
