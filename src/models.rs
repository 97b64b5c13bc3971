use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Meal {
    Breakfast,
    Lunch,
    Dinner,
}

impl Meal {
    pub const ALL: [Meal; 3] = [Meal::Breakfast, Meal::Lunch, Meal::Dinner];

    pub fn as_str(self) -> &'static str {
        match self {
            Meal::Breakfast => "breakfast",
            Meal::Lunch => "lunch",
            Meal::Dinner => "dinner",
        }
    }
}

impl fmt::Display for Meal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutSlot {
    Day1,
    Day2,
    Day3,
}

impl WorkoutSlot {
    pub const ALL: [WorkoutSlot; 3] = [WorkoutSlot::Day1, WorkoutSlot::Day2, WorkoutSlot::Day3];

    pub fn as_str(self) -> &'static str {
        match self {
            WorkoutSlot::Day1 => "day1",
            WorkoutSlot::Day2 => "day2",
            WorkoutSlot::Day3 => "day3",
        }
    }
}

impl fmt::Display for WorkoutSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Macros {
    pub protein: i64,
    pub carbs: i64,
    pub fat: i64,
}

impl Macros {
    pub fn new(protein: i64, carbs: i64, fat: i64) -> Self {
        Self { protein, carbs, fat }
    }

    pub fn add(&mut self, other: Macros) {
        self.protein = self.protein.saturating_add(other.protein);
        self.carbs = self.carbs.saturating_add(other.carbs);
        self.fat = self.fat.saturating_add(other.fat);
    }

    pub fn subtract(&mut self, other: Macros) {
        self.protein = self.protein.saturating_sub(other.protein);
        self.carbs = self.carbs.saturating_sub(other.carbs);
        self.fat = self.fat.saturating_sub(other.fat);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodEntry {
    pub name: String,
    #[serde(default)]
    pub protein: i64,
    #[serde(default)]
    pub carbs: i64,
    #[serde(default)]
    pub fat: i64,
}

impl FoodEntry {
    pub fn new(name: impl Into<String>, protein: i64, carbs: i64, fat: i64) -> Self {
        Self {
            name: name.into(),
            protein,
            carbs,
            fat,
        }
    }

    pub fn macros(&self) -> Macros {
        Macros::new(self.protein, self.carbs, self.fat)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuickItem {
    pub id: &'static str,
    pub name: &'static str,
    pub protein: i64,
    pub carbs: i64,
    pub fat: i64,
    pub meal: Meal,
}

impl QuickItem {
    pub fn find(id: &str) -> Option<&'static QuickItem> {
        QUICK_ITEMS.iter().find(|item| item.id == id)
    }

    pub fn entry(&self) -> FoodEntry {
        FoodEntry::new(self.name, self.protein, self.carbs, self.fat)
    }
}

pub static QUICK_ITEMS: [QuickItem; 5] = [
    QuickItem {
        id: "eggs",
        name: "Eggs (2)",
        protein: 13,
        carbs: 1,
        fat: 10,
        meal: Meal::Breakfast,
    },
    QuickItem {
        id: "oatmeal",
        name: "Oatmeal",
        protein: 5,
        carbs: 27,
        fat: 3,
        meal: Meal::Breakfast,
    },
    QuickItem {
        id: "chicken",
        name: "Chicken breast",
        protein: 31,
        carbs: 0,
        fat: 4,
        meal: Meal::Lunch,
    },
    QuickItem {
        id: "rice",
        name: "Rice",
        protein: 4,
        carbs: 45,
        fat: 0,
        meal: Meal::Lunch,
    },
    QuickItem {
        id: "cottage",
        name: "Cottage cheese",
        protein: 18,
        carbs: 3,
        fat: 5,
        meal: Meal::Dinner,
    },
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DailyFood {
    #[serde(default)]
    pub breakfast: Vec<FoodEntry>,
    #[serde(default)]
    pub lunch: Vec<FoodEntry>,
    #[serde(default)]
    pub dinner: Vec<FoodEntry>,
}

impl DailyFood {
    pub fn meal(&self, meal: Meal) -> &[FoodEntry] {
        match meal {
            Meal::Breakfast => &self.breakfast,
            Meal::Lunch => &self.lunch,
            Meal::Dinner => &self.dinner,
        }
    }

    pub fn meal_mut(&mut self, meal: Meal) -> &mut Vec<FoodEntry> {
        match meal {
            Meal::Breakfast => &mut self.breakfast,
            Meal::Lunch => &mut self.lunch,
            Meal::Dinner => &mut self.dinner,
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = &FoodEntry> {
        self.breakfast.iter().chain(&self.lunch).chain(&self.dinner)
    }

    pub fn is_empty(&self) -> bool {
        self.entries().next().is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutRecord {
    pub notes: String,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct WorkoutData {
    #[serde(default, with = "empty_slot")]
    pub day1: Option<WorkoutRecord>,
    #[serde(default, with = "empty_slot")]
    pub day2: Option<WorkoutRecord>,
    #[serde(default, with = "empty_slot")]
    pub day3: Option<WorkoutRecord>,
}

impl WorkoutData {
    pub fn slot(&self, slot: WorkoutSlot) -> Option<&WorkoutRecord> {
        match slot {
            WorkoutSlot::Day1 => self.day1.as_ref(),
            WorkoutSlot::Day2 => self.day2.as_ref(),
            WorkoutSlot::Day3 => self.day3.as_ref(),
        }
    }

    pub fn slot_mut(&mut self, slot: WorkoutSlot) -> &mut Option<WorkoutRecord> {
        match slot {
            WorkoutSlot::Day1 => &mut self.day1,
            WorkoutSlot::Day2 => &mut self.day2,
            WorkoutSlot::Day3 => &mut self.day3,
        }
    }

    pub fn any_recorded(&self) -> bool {
        WorkoutSlot::ALL.iter().any(|slot| self.slot(*slot).is_some())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub date: NaiveDate,
    pub macros: Macros,
    pub trained: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackerData {
    pub current_day: NaiveDate,
    #[serde(default)]
    pub daily_food: DailyFood,
    #[serde(default)]
    pub daily_macros: Macros,
    #[serde(default)]
    pub workout_data: WorkoutData,
    #[serde(default)]
    pub streak: u32,
    #[serde(default)]
    pub weekly_history: Vec<HistoryEntry>,
}

// Empty workout slots are stored as `{}`.
mod empty_slot {
    use super::WorkoutRecord;
    use serde::ser::SerializeMap;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Slot {
        Record(WorkoutRecord),
        Empty {},
        Null,
    }

    pub fn serialize<S>(slot: &Option<WorkoutRecord>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match slot {
            Some(record) => record.serialize(serializer),
            None => serializer.serialize_map(Some(0))?.end(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<WorkoutRecord>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Slot::deserialize(deserializer)? {
            Slot::Record(record) => Some(record),
            Slot::Empty {} | Slot::Null => None,
        })
    }
}

// Leading sign and digits count, anything else yields 0.
pub fn parse_grams(raw: &str) -> i64 {
    let trimmed = raw.trim();
    let (negative, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    match digits.parse::<i64>() {
        Ok(value) if negative => -value,
        Ok(value) => value,
        Err(_) => 0,
    }
}

fn lenient_grams<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|f| f.trunc() as i64))
            .unwrap_or(0),
        serde_json::Value::String(text) => parse_grams(&text),
        _ => 0,
    })
}

#[derive(Debug, Deserialize)]
pub struct FoodRequest {
    pub meal: Meal,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_grams")]
    pub protein: i64,
    #[serde(default, deserialize_with = "lenient_grams")]
    pub carbs: i64,
    #[serde(default, deserialize_with = "lenient_grams")]
    pub fat: i64,
}

impl FoodRequest {
    pub fn into_parts(self) -> (Meal, FoodEntry) {
        let entry = FoodEntry::new(self.name, self.protein, self.carbs, self.fat);
        (self.meal, entry)
    }
}

#[derive(Debug, Deserialize)]
pub struct QuickAddForm {
    pub item: String,
}

#[derive(Debug, Deserialize)]
pub struct RemoveFoodForm {
    pub meal: Meal,
    pub index: usize,
}

#[derive(Debug, Deserialize)]
pub struct WorkoutRequest {
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Deserialize)]
pub struct WorkoutForm {
    pub slot: WorkoutSlot,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Deserialize)]
pub struct ResetRequest {
    #[serde(default)]
    pub confirm: bool,
}

#[derive(Debug, Deserialize)]
pub struct ResetForm {
    pub confirm: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MacroProgress {
    pub name: String,
    pub current: i64,
    pub target: i64,
    pub percent: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SummaryResponse {
    pub date: String,
    pub macros: Macros,
    pub progress: Vec<MacroProgress>,
    pub streak: u32,
    pub weekly_protein: i64,
    pub trained_days: usize,
    pub history_len: usize,
}
