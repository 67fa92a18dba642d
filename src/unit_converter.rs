use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ingredient-name fragments that mark a liquid.
pub const LIQUID_HINTS: &[&str] = &[
    "water", "milk", "oil", "broth", "stock", "juice", "vinegar", "sauce", "cream",
];

/// Grams per millilitre for dry goods measured by volume.
pub const DENSITY_G_PER_ML: &[(&str, f64)] = &[
    ("flour", 0.53),
    ("sugar", 0.85),
    ("rice", 0.85),
    ("butter", 0.91),
    ("honey", 1.42),
];

const ML_PER_TEASPOON: f64 = 5.0;
const ML_PER_TABLESPOON: f64 = 15.0;
const ML_PER_CUP: f64 = 240.0;
const ML_PER_PINT: f64 = 473.0;
const ML_PER_QUART: f64 = 946.0;
const ML_PER_GALLON: f64 = 3785.0;
const G_PER_OUNCE: f64 = 28.3495;
/// Unitless solid quantities are read as 100 g portions.
const G_PER_UNITLESS_PORTION: f64 = 100.0;

lazy_static! {
    static ref MIXED_FRACTION: Regex =
        Regex::new(r"^(\d+)\s+(\d+)\s*/\s*(\d+)").expect("mixed fraction pattern is valid");
    static ref FRACTION: Regex = Regex::new(r"^(\d+)\s*/\s*(\d+)").expect("fraction pattern is valid");
    static ref DECIMAL: Regex = Regex::new(r"\d*\.?\d+").expect("decimal pattern is valid");
    static ref WORD: Regex = Regex::new(r"[a-z]+").expect("word pattern is valid");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreUnit {
    G,
    Kg,
    Ml,
    L,
}

impl fmt::Display for StoreUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = match self {
            StoreUnit::G => "g",
            StoreUnit::Kg => "kg",
            StoreUnit::Ml => "ml",
            StoreUnit::L => "l",
        };
        f.write_str(unit)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StoreAmount {
    pub amount: f64,
    pub unit: StoreUnit,
}

impl fmt::Display for StoreAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.unit)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MeasureUnit {
    Teaspoon,
    Tablespoon,
    Cup,
    Millilitre,
    Litre,
    Gram,
    Kilogram,
    Ounce,
    Pint,
    Quart,
    Gallon,
}

/// Recognition order; the first unit any word of the measure matches wins.
const UNIT_RULES: &[(MeasureUnit, &[&str], &[&str])] = &[
    // (unit, exact words, word prefixes)
    (MeasureUnit::Teaspoon, &[], &["teaspoon", "tsp"]),
    (MeasureUnit::Tablespoon, &[], &["tablespoon", "tbsp"]),
    (MeasureUnit::Cup, &[], &["cup"]),
    (MeasureUnit::Millilitre, &["ml"], &["milliliter", "millilitre"]),
    (MeasureUnit::Litre, &["l"], &["liter", "litre"]),
    (MeasureUnit::Gram, &["g", "gr"], &["gram"]),
    (MeasureUnit::Kilogram, &["kg", "kgs"], &["kilogram"]),
    (MeasureUnit::Ounce, &["oz"], &["ounce"]),
    (MeasureUnit::Pint, &[], &["pint"]),
    (MeasureUnit::Quart, &[], &["quart"]),
    (MeasureUnit::Gallon, &[], &["gallon"]),
];

fn detect_units(measure: &str) -> Vec<MeasureUnit> {
    let words: Vec<&str> = WORD.find_iter(measure).map(|m| m.as_str()).collect();
    UNIT_RULES
        .iter()
        .filter(|(_, exact, prefixes)| {
            words.iter().any(|word| {
                exact.contains(word) || prefixes.iter().any(|prefix| word.starts_with(prefix))
            })
        })
        .map(|(unit, _, _)| *unit)
        .collect()
}

/// Leading quantity of a measure: "1 1/2", "3/4", "2.5". `None` when absent
/// or when a fraction has a zero denominator.
pub fn parse_quantity(measure: &str) -> Option<f64> {
    let measure = measure.trim();

    if let Some(caps) = MIXED_FRACTION.captures(measure) {
        let whole: f64 = caps[1].parse().ok()?;
        let numerator: f64 = caps[2].parse().ok()?;
        let denominator: f64 = caps[3].parse().ok()?;
        if denominator == 0.0 {
            return None;
        }
        return Some(whole + numerator / denominator);
    }

    if let Some(caps) = FRACTION.captures(measure) {
        let numerator: f64 = caps[1].parse().ok()?;
        let denominator: f64 = caps[2].parse().ok()?;
        if denominator == 0.0 {
            return None;
        }
        return Some(numerator / denominator);
    }

    DECIMAL
        .find(measure)
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

pub fn looks_liquid(ingredient: &str) -> bool {
    let name = ingredient.to_lowercase();
    LIQUID_HINTS.iter().any(|hint| name.contains(hint))
}

fn density_for(ingredient: &str) -> Option<f64> {
    let name = ingredient.to_lowercase();
    DENSITY_G_PER_ML
        .iter()
        .find(|(key, _)| name.contains(key))
        .map(|(_, density)| *density)
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn liquid(ml: f64) -> StoreAmount {
    if ml >= 1000.0 {
        StoreAmount {
            amount: round_one_decimal(ml / 1000.0),
            unit: StoreUnit::L,
        }
    } else {
        StoreAmount {
            amount: round_one_decimal(ml),
            unit: StoreUnit::Ml,
        }
    }
}

fn solid(grams: f64) -> StoreAmount {
    if grams >= 1000.0 {
        StoreAmount {
            amount: round_one_decimal(grams / 1000.0),
            unit: StoreUnit::Kg,
        }
    } else {
        StoreAmount {
            amount: round_one_decimal(grams),
            unit: StoreUnit::G,
        }
    }
}

/// Converts a recipe measure ("2 cups", "1 tbsp", "200g") into a store unit.
///
/// Returns `None` only for a blank measure. Cups of an ingredient that is
/// neither liquid nor in the density table fall through to the later rules.
pub fn convert_to_store_units(ingredient: &str, measure: &str) -> Option<StoreAmount> {
    if measure.trim().is_empty() {
        return None;
    }
    let lowered = measure.to_lowercase();
    let amount = parse_quantity(&lowered).unwrap_or(1.0);

    for unit in detect_units(&lowered) {
        let converted = match unit {
            MeasureUnit::Teaspoon => Some(liquid(amount * ML_PER_TEASPOON)),
            MeasureUnit::Tablespoon => Some(liquid(amount * ML_PER_TABLESPOON)),
            MeasureUnit::Cup if looks_liquid(ingredient) => Some(liquid(amount * ML_PER_CUP)),
            MeasureUnit::Cup => density_for(ingredient).map(|density| solid(amount * ML_PER_CUP * density)),
            MeasureUnit::Millilitre => Some(liquid(amount)),
            MeasureUnit::Litre => Some(liquid(amount * 1000.0)),
            MeasureUnit::Gram => Some(solid(amount)),
            MeasureUnit::Kilogram => Some(solid(amount * 1000.0)),
            MeasureUnit::Ounce => Some(solid(amount * G_PER_OUNCE)),
            MeasureUnit::Pint => Some(liquid(amount * ML_PER_PINT)),
            MeasureUnit::Quart => Some(liquid(amount * ML_PER_QUART)),
            MeasureUnit::Gallon => Some(liquid(amount * ML_PER_GALLON)),
        };
        if converted.is_some() {
            return converted;
        }
    }

    if looks_liquid(ingredient) {
        Some(liquid(amount * ML_PER_CUP))
    } else {
        Some(solid(amount * G_PER_UNITLESS_PORTION))
    }
}

/// Display text for a conversion; empty when there was nothing to convert.
pub fn format_store_amount(amount: Option<StoreAmount>) -> String {
    amount.map(|a| a.to_string()).unwrap_or_default()
}
