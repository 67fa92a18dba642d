pub mod meal_plan;
pub mod storage;

pub use meal_plan::{week_id, MealPlanWeek, MealSlot, PlannedMeal, ShoppingList, ShoppingListItem};
pub use storage::{ItemUpdate, JsonFileStore, KeyValueStore, MemoryStore, PlannerError, PlannerStore, StorageError};
