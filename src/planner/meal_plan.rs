use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl fmt::Display for MealSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MealSlot::Breakfast => "breakfast",
            MealSlot::Lunch => "lunch",
            MealSlot::Dinner => "dinner",
            MealSlot::Snack => "snack",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedMeal {
    pub id: String,
    pub date: NaiveDate,
    pub slot: MealSlot,
    pub recipe_id: String,
    pub recipe_name: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub recipe_thumb: Option<String>,
}

impl PlannedMeal {
    pub fn new(
        date: NaiveDate,
        slot: MealSlot,
        recipe_id: impl Into<String>,
        recipe_name: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            date,
            slot,
            recipe_id: recipe_id.into(),
            recipe_name: recipe_name.into(),
            recipe_thumb: None,
        }
    }

    pub fn week_id(&self) -> String {
        week_id(self.date)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanWeek {
    pub id: String,
    pub start_date: NaiveDate,
    pub meals: Vec<PlannedMeal>,
}

impl MealPlanWeek {
    /// Empty week containing `date`, starting on its ISO Monday.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            id: week_id(date),
            start_date: week_start(date),
            meals: Vec::new(),
        }
    }

    pub fn meal_in_slot(&self, date: NaiveDate, slot: MealSlot) -> Option<&PlannedMeal> {
        self.meals.iter().find(|m| m.date == date && m.slot == slot)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingListItem {
    pub id: String,
    pub ingredient: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub quantity: Option<String>,
    #[serde(default)]
    pub checked: bool,
    /// Planned meals this line was merged from; empty for manual items.
    #[serde(default)]
    pub source_meal_ids: Vec<String>,
}

impl ShoppingListItem {
    pub fn manual(ingredient: &str, quantity: Option<&str>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            ingredient: ingredient.trim().to_string(),
            quantity: quantity
                .map(str::trim)
                .filter(|q| !q.is_empty())
                .map(str::to_string),
            checked: false,
            source_meal_ids: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingList {
    pub id: String,
    pub title: String,
    pub items: Vec<ShoppingListItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ShoppingList {
    pub fn for_week(week_id: &str) -> Self {
        let now = Utc::now();
        Self {
            id: week_id.to_string(),
            title: format!("Shopping List {week_id}"),
            items: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// ISO-8601 week identifier, e.g. `2026-W42`. Dates early in January or late
/// in December may belong to the neighbouring ISO year.
pub fn week_id(date: NaiveDate) -> String {
    let iso = date.iso_week();
    format!("{}-W{:02}", iso.year(), iso.week())
}

/// Monday of the ISO week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let iso = date.iso_week();
    NaiveDate::from_isoywd_opt(iso.year(), iso.week(), Weekday::Mon).unwrap_or(date)
}
