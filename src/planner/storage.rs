use chrono::{NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;
use tracing::{debug, warn};

use super::meal_plan::{week_id, MealPlanWeek, MealSlot, PlannedMeal, ShoppingList, ShoppingListItem};

pub const MEAL_WEEKS_KEY: &str = "mealPlanWeeks";
pub const SHOPPING_LISTS_KEY: &str = "shoppingLists";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum PlannerError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("{slot} on {date} already has a planned meal")]
    SlotTaken { date: NaiveDate, slot: MealSlot },
    #[error("Week not found: {0}")]
    WeekNotFound(String),
    #[error("Shopping list item not found: {0}")]
    ItemNotFound(String),
    #[error("Shopping list not found: {0}")]
    ListNotFound(String),
}

/// String key-value persistence, shaped like browser local storage.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// All keys in one JSON object file. Writes go to a sibling temp file that is
/// then renamed over the store file.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut all = self.read_all()?;
        all.insert(key.to_string(), value.to_string());

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, serde_json::to_string_pretty(&all)?)?;
        fs::rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), key, "store updated");
        Ok(())
    }
}

/// Partial update of a shopping-list item; `None` fields are left alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemUpdate {
    pub ingredient: Option<String>,
    pub quantity: Option<String>,
    pub checked: Option<bool>,
}

/// Meal-plan weeks and shopping lists over a key-value store.
pub struct PlannerStore<K> {
    store: K,
}

impl<K: KeyValueStore> PlannerStore<K> {
    pub fn new(store: K) -> Self {
        Self { store }
    }

    fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>, StorageError> {
        let Some(raw) = self.store.get(key)? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str(&raw) {
            Ok(values) => Ok(values),
            Err(e) => {
                warn!(key, error = %e, "stored data is unreadable, starting empty");
                Ok(Vec::new())
            }
        }
    }

    fn save<T: Serialize>(&self, key: &str, values: &[T]) -> Result<(), StorageError> {
        self.store.set(key, &serde_json::to_string(values)?)
    }

    pub fn weeks(&self) -> Result<Vec<MealPlanWeek>, PlannerError> {
        Ok(self.load(MEAL_WEEKS_KEY)?)
    }

    pub fn week(&self, id: &str) -> Result<Option<MealPlanWeek>, PlannerError> {
        Ok(self.weeks()?.into_iter().find(|w| w.id == id))
    }

    pub fn upsert_week(&self, week: MealPlanWeek) -> Result<(), PlannerError> {
        let mut weeks = self.weeks()?;
        match weeks.iter_mut().find(|w| w.id == week.id) {
            Some(existing) => *existing = week,
            None => weeks.push(week),
        }
        Ok(self.save(MEAL_WEEKS_KEY, &weeks)?)
    }

    /// Adds `meal` to the week containing its date, creating the week if
    /// needed. A date+slot pair holds at most one meal.
    pub fn add_planned_meal(&self, meal: PlannedMeal) -> Result<String, PlannerError> {
        let id = week_id(meal.date);
        let mut weeks = self.weeks()?;
        let index = match weeks.iter().position(|w| w.id == id) {
            Some(index) => index,
            None => {
                weeks.push(MealPlanWeek::containing(meal.date));
                weeks.len() - 1
            }
        };

        let week = &mut weeks[index];
        if week.meal_in_slot(meal.date, meal.slot).is_some() {
            return Err(PlannerError::SlotTaken {
                date: meal.date,
                slot: meal.slot,
            });
        }
        week.meals.push(meal);
        self.save(MEAL_WEEKS_KEY, &weeks)?;
        Ok(id)
    }

    pub fn remove_planned_meal(&self, week_id: &str, meal_id: &str) -> Result<bool, PlannerError> {
        let mut weeks = self.weeks()?;
        let week = weeks
            .iter_mut()
            .find(|w| w.id == week_id)
            .ok_or_else(|| PlannerError::WeekNotFound(week_id.to_string()))?;

        let before = week.meals.len();
        week.meals.retain(|m| m.id != meal_id);
        let removed = week.meals.len() != before;
        if removed {
            self.save(MEAL_WEEKS_KEY, &weeks)?;
        }
        Ok(removed)
    }

    pub fn shopping_lists(&self) -> Result<Vec<ShoppingList>, PlannerError> {
        Ok(self.load(SHOPPING_LISTS_KEY)?)
    }

    pub fn shopping_list(&self, id: &str) -> Result<Option<ShoppingList>, PlannerError> {
        Ok(self.shopping_lists()?.into_iter().find(|l| l.id == id))
    }

    pub fn upsert_shopping_list(&self, mut list: ShoppingList) -> Result<(), PlannerError> {
        list.updated_at = Utc::now();
        let mut lists = self.shopping_lists()?;
        match lists.iter_mut().find(|l| l.id == list.id) {
            Some(existing) => *existing = list,
            None => lists.push(list),
        }
        Ok(self.save(SHOPPING_LISTS_KEY, &lists)?)
    }

    /// Appends `item` to the list for `list_id`, creating the list if needed.
    pub fn add_shopping_item(&self, list_id: &str, item: ShoppingListItem) -> Result<(), PlannerError> {
        let mut lists = self.shopping_lists()?;
        let index = match lists.iter().position(|l| l.id == list_id) {
            Some(index) => index,
            None => {
                lists.push(ShoppingList::for_week(list_id));
                lists.len() - 1
            }
        };
        let list = &mut lists[index];
        list.items.push(item);
        list.updated_at = Utc::now();
        Ok(self.save(SHOPPING_LISTS_KEY, &lists)?)
    }

    pub fn update_shopping_item(
        &self,
        list_id: &str,
        item_id: &str,
        update: ItemUpdate,
    ) -> Result<(), PlannerError> {
        let mut lists = self.shopping_lists()?;
        let list = lists
            .iter_mut()
            .find(|l| l.id == list_id)
            .ok_or_else(|| PlannerError::ListNotFound(list_id.to_string()))?;
        let item = list
            .items
            .iter_mut()
            .find(|i| i.id == item_id)
            .ok_or_else(|| PlannerError::ItemNotFound(item_id.to_string()))?;

        if let Some(ingredient) = update.ingredient {
            item.ingredient = ingredient;
        }
        if let Some(quantity) = update.quantity {
            item.quantity = Some(quantity);
        }
        if let Some(checked) = update.checked {
            item.checked = checked;
        }
        list.updated_at = Utc::now();
        Ok(self.save(SHOPPING_LISTS_KEY, &lists)?)
    }

    pub fn remove_shopping_item(&self, list_id: &str, item_id: &str) -> Result<bool, PlannerError> {
        let mut lists = self.shopping_lists()?;
        let Some(list) = lists.iter_mut().find(|l| l.id == list_id) else {
            return Ok(false);
        };
        let before = list.items.len();
        list.items.retain(|i| i.id != item_id);
        let removed = list.items.len() != before;
        if removed {
            list.updated_at = Utc::now();
            self.save(SHOPPING_LISTS_KEY, &lists)?;
        }
        Ok(removed)
    }
}
