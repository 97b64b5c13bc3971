use crate::models::{FoodEntry, Meal, TrackerData, WorkoutSlot};
use chrono::{DateTime, Local, Utc};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    AddFood { meal: Meal, entry: FoodEntry },
    RemoveFood { meal: Meal, index: usize },
    SaveWorkout { slot: WorkoutSlot, notes: String },
    ResetDay { confirmed: bool },
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::AddFood { .. } => "add_food",
            Action::RemoveFood { .. } => "remove_food",
            Action::SaveWorkout { .. } => "save_workout",
            Action::ResetDay { .. } => "reset_day",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    #[error("food name must not be empty")]
    EmptyName,

    #[error("no item at index {index} in {meal}")]
    NoSuchItem { meal: Meal, index: usize },

    #[error("day reset requires confirmation")]
    ResetNotConfirmed,
}

/// On error nothing has been mutated.
pub fn apply(
    data: &mut TrackerData,
    action: Action,
    now: DateTime<Local>,
) -> Result<(), ActionError> {
    match action {
        Action::AddFood { meal, entry } => {
            if entry.name.is_empty() {
                return Err(ActionError::EmptyName);
            }
            data.add_food(meal, entry);
        }
        Action::RemoveFood { meal, index } => {
            data.remove_food(meal, index).ok_or(ActionError::NoSuchItem { meal, index })?;
        }
        Action::SaveWorkout { slot, notes } => {
            data.save_workout(slot, notes, now.with_timezone(&Utc));
        }
        Action::ResetDay { confirmed } => {
            if !confirmed {
                return Err(ActionError::ResetNotConfirmed);
            }
            data.reset_daily(now.date_naive());
        }
    }
    Ok(())
}
