use crate::models::{
    DailyFood, FoodEntry, HistoryEntry, Macros, Meal, TrackerData, WorkoutData, WorkoutRecord,
    WorkoutSlot,
};
use chrono::{DateTime, NaiveDate, Utc};

pub const HISTORY_LIMIT: usize = 7;
pub const STREAK_MIN_PROTEIN: i64 = 80;
pub const STREAK_MAX_CARBS: i64 = 220;

pub fn meets_streak_target(macros: &Macros) -> bool {
    macros.protein >= STREAK_MIN_PROTEIN && macros.carbs <= STREAK_MAX_CARBS
}

impl TrackerData {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            current_day: today,
            daily_food: DailyFood::default(),
            daily_macros: Macros::default(),
            workout_data: WorkoutData::default(),
            streak: 0,
            weekly_history: Vec::new(),
        }
    }

    pub fn add_food(&mut self, meal: Meal, entry: FoodEntry) {
        self.daily_macros.add(entry.macros());
        self.daily_food.meal_mut(meal).push(entry);
    }

    pub fn remove_food(&mut self, meal: Meal, index: usize) -> Option<FoodEntry> {
        let items = self.daily_food.meal_mut(meal);
        if index >= items.len() {
            return None;
        }
        let removed = items.remove(index);
        self.daily_macros.subtract(removed.macros());
        Some(removed)
    }

    pub fn save_workout(&mut self, slot: WorkoutSlot, notes: String, now: DateTime<Utc>) {
        *self.workout_data.slot_mut(slot) = Some(WorkoutRecord { notes, date: now });
    }

    pub fn reset_daily(&mut self, today: NaiveDate) {
        self.current_day = today;
        self.daily_food = DailyFood::default();
        self.daily_macros = Macros::default();
    }

    pub fn needs_rollover(&self, today: NaiveDate) -> bool {
        self.current_day != today
    }

    // One history entry per call, however many days have passed.
    pub fn roll_over(&mut self, today: NaiveDate) -> Option<HistoryEntry> {
        if !self.needs_rollover(today) {
            return None;
        }

        let entry = HistoryEntry {
            date: self.current_day,
            macros: self.daily_macros,
            trained: self.workout_data.any_recorded(),
        };
        self.push_history(entry.clone());

        if meets_streak_target(&self.daily_macros) {
            self.streak = self.streak.saturating_add(1);
        } else {
            self.streak = 0;
        }

        self.reset_daily(today);
        Some(entry)
    }

    fn push_history(&mut self, entry: HistoryEntry) {
        self.weekly_history.insert(0, entry);
        self.weekly_history.truncate(HISTORY_LIMIT);
    }
}
