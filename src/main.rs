use anyhow::{anyhow, bail, Context, Result};
use chrono::Local;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use recipe_finder::api_connection::MealDbClient;
use recipe_finder::cli::{parse_args, Command, PlanCommand, ShoppingCommand};
use recipe_finder::config::AppConfig;
use recipe_finder::data_source::{CachedCatalog, DetailCache, RecipeDataSource};
use recipe_finder::planner::{
    week_id, ItemUpdate, JsonFileStore, PlannedMeal, PlannerStore, ShoppingList, ShoppingListItem,
};
use recipe_finder::recipe::{Recipe, RecipeDetail};
use recipe_finder::search::{suggest, SearchRequest, SearchResolver, SearchSession};
use recipe_finder::shopping_aggregator::{AggregationOptions, ShoppingAggregator};

type Catalog = Arc<CachedCatalog<MealDbClient>>;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_recipes(recipes: &[Recipe]) {
    if recipes.is_empty() {
        println!("No recipes found.");
        return;
    }
    for recipe in recipes {
        let context: Vec<&str> = [recipe.category.as_deref(), recipe.area.as_deref()]
            .into_iter()
            .flatten()
            .collect();
        if context.is_empty() {
            println!("{:>8}  {}", recipe.id, recipe.name);
        } else {
            println!("{:>8}  {} ({})", recipe.id, recipe.name, context.join(", "));
        }
    }
}

fn print_detail(detail: &RecipeDetail) {
    let e = &detail.enrichment;
    println!("{} [{}]", detail.summary.name, detail.id());
    println!(
        "~{} min | serves {} | {:?} | {}",
        e.estimated_minutes, e.serving_size, e.difficulty, e.estimated_cost
    );
    println!(
        "~{} kcal, protein {}, carbs {}, fat {}",
        e.nutrition.calories, e.nutrition.protein, e.nutrition.carbs, e.nutrition.fat
    );
    let tags = detail.tag_list();
    if !tags.is_empty() {
        println!("Tags: {}", tags.join(", "));
    }

    println!("\nIngredients:");
    for line in &detail.ingredients {
        if line.measure.trim().is_empty() {
            println!("  - {}", line.ingredient);
        } else {
            println!("  - {} {}", line.measure.trim(), line.ingredient);
        }
    }
    println!("\nInstructions:\n{}", detail.instructions.trim());

    println!("\nTips:");
    for tip in &e.cooking_tips {
        println!("  * {tip}");
    }
    if let Some(youtube) = &detail.youtube {
        println!("\nVideo: {youtube}");
    }
    if let Some(source) = &detail.source {
        println!("Source: {source}");
    }
}

fn print_list(list: &ShoppingList) {
    println!("{} ({} items)", list.title, list.items.len());
    for item in &list.items {
        let mark = if item.checked { "x" } else { " " };
        match &item.quantity {
            Some(quantity) => println!("  [{mark}] {}: {quantity}  ({})", item.ingredient, item.id),
            None => println!("  [{mark}] {}  ({})", item.ingredient, item.id),
        }
    }
}

async fn run_plan(command: PlanCommand, catalog: &Catalog, planner: &PlannerStore<JsonFileStore>) -> Result<()> {
    match command {
        PlanCommand::Add {
            date,
            slot,
            recipe_id,
            no_shopping,
        } => {
            let detail = catalog
                .get_recipe_by_id(&recipe_id)
                .await
                .with_context(|| format!("Failed to look up recipe '{recipe_id}'"))?
                .ok_or_else(|| anyhow!("No recipe with id '{recipe_id}'"))?;

            let mut meal = PlannedMeal::new(date, slot, detail.id(), detail.summary.name.clone());
            meal.recipe_thumb = Some(detail.summary.thumbnail.clone()).filter(|t| !t.is_empty());
            let meal_id = meal.id.clone();
            let week = planner.add_planned_meal(meal.clone())?;
            println!("Planned {} for {slot} on {date} (week {week}, meal {meal_id})", detail.summary.name);

            if !no_shopping {
                let aggregator = ShoppingAggregator::new(
                    Arc::clone(catalog),
                    AggregationOptions {
                        store_units: false,
                        normalize_names: false,
                    },
                );
                let added = aggregator.add_meal_to_list(planner, &meal).await?;
                println!("Added {added} ingredients to Shopping List {week}");
            }
        }
        PlanCommand::Remove { week_id, meal_id } => {
            if planner.remove_planned_meal(&week_id, &meal_id)? {
                println!("Removed meal {meal_id} from {week_id}");
            } else {
                println!("No meal {meal_id} in {week_id}");
            }
        }
        PlanCommand::Show { week_id: requested } => {
            let id = requested.unwrap_or_else(|| week_id(Local::now().date_naive()));
            match planner.week(&id)? {
                Some(mut week) if !week.meals.is_empty() => {
                    week.meals.sort_by_key(|m| (m.date, m.slot as u8));
                    println!("Week {} (from {})", week.id, week.start_date);
                    for meal in &week.meals {
                        println!("  {} {:<9} {} [{}]  ({})", meal.date, meal.slot.to_string(), meal.recipe_name, meal.recipe_id, meal.id);
                    }
                }
                _ => println!("Nothing planned for {id}"),
            }
        }
    }
    Ok(())
}

async fn run_shopping(
    command: ShoppingCommand,
    catalog: &Catalog,
    planner: &PlannerStore<JsonFileStore>,
    config: &AppConfig,
) -> Result<()> {
    match command {
        ShoppingCommand::Generate { list, raw_units, normalize_names } => {
            let week = planner
                .week(&list.week_id)?
                .ok_or_else(|| anyhow!("No meal plan for week '{}'", list.week_id))?;
            let options = AggregationOptions {
                store_units: config.store_units && !raw_units,
                normalize_names,
            };
            let aggregator = ShoppingAggregator::new(Arc::clone(catalog), options);
            let existing = planner.shopping_list(&week.id)?;
            let generated = aggregator.generate_list(&week, existing).await;
            planner.upsert_shopping_list(generated.clone())?;
            print_list(&generated);
        }
        ShoppingCommand::Show { list } => match planner.shopping_list(&list.week_id)? {
            Some(found) => print_list(&found),
            None => println!("No shopping list for {}", list.week_id),
        },
        ShoppingCommand::Add { list, ingredient, quantity } => {
            if ingredient.trim().is_empty() {
                bail!("Ingredient name must not be empty");
            }
            let item = ShoppingListItem::manual(&ingredient, quantity.as_deref());
            let item_id = item.id.clone();
            planner.add_shopping_item(&list.week_id, item)?;
            println!("Added {} ({item_id})", ingredient.trim());
        }
        ShoppingCommand::Check { list, item_id, uncheck } => {
            let update = ItemUpdate {
                checked: Some(!uncheck),
                ..ItemUpdate::default()
            };
            planner.update_shopping_item(&list.week_id, &item_id, update)?;
            println!("{} {item_id}", if uncheck { "Unchecked" } else { "Checked" });
        }
        ShoppingCommand::Remove { list, item_id } => {
            if planner.remove_shopping_item(&list.week_id, &item_id)? {
                println!("Removed {item_id}");
            } else {
                println!("No item {item_id} in {}", list.week_id);
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::from_env();
    init_logging();
    let cli = parse_args();

    let cache = DetailCache::new();
    let catalog: Catalog = Arc::new(CachedCatalog::new(MealDbClient::new(config.base_url.clone()), cache));
    let planner = PlannerStore::new(JsonFileStore::new(config.store_path.clone()));
    info!(base_url = %config.base_url, store = %config.store_path.display(), "recipe finder ready");

    match cli.command {
        Command::Search { mode, strict_only, query } => {
            let resolver = SearchResolver::new(Arc::clone(&catalog));
            let request = SearchRequest::new(query, mode).strict_only(strict_only || config.strict_only);

            let mut session = SearchSession::new();
            let ticket = session.begin();
            let outcome = resolver.resolve(&request).await;
            session.commit(ticket, outcome);

            if let Some(error) = session.error() {
                bail!("Search failed: {error}");
            }
            print_recipes(session.results());
        }
        Command::Suggest { mode, input } => {
            for suggestion in suggest(&input, mode) {
                println!("{suggestion}");
            }
        }
        Command::Show { id } => {
            let detail = catalog
                .get_recipe_by_id(&id)
                .await
                .with_context(|| format!("Failed to fetch recipe '{id}'"))?
                .ok_or_else(|| anyhow!("No recipe with id '{id}'"))?;
            print_detail(&detail);
        }
        Command::Plan(command) => run_plan(command, &catalog, &planner).await?,
        Command::Shopping(command) => run_shopping(command, &catalog, &planner, &config).await?,
    }

    Ok(())
}
