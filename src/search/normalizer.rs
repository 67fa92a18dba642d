//! Regional and alias spellings of ingredient names mapped to one canonical term.

/// Alias → canonical term, in priority order. The first alias found inside a
/// name decides its canonical form.
pub const INGREDIENT_ALIASES: &[(&str, &str)] = &[
    ("brinjal", "eggplant"),
    ("aubergine", "eggplant"),
    ("bhindi", "okra"),
    ("ladyfinger", "okra"),
    ("ladies finger", "okra"),
    ("capsicum", "bell pepper"),
    ("chillies", "chili"),
    ("chilies", "chili"),
    ("chilli", "chili"),
    ("curd", "yogurt"),
    ("spring onion", "green onion"),
    ("scallion", "green onion"),
    ("garbanzo", "chickpea"),
    ("gram", "chickpea"),
    ("kidney beans", "rajma"),
];

/// Lowercases and trims `name`, then maps it to its canonical term if it is,
/// or contains, a known alias. Unknown names come back trimmed and lowercased.
pub fn normalize(name: &str) -> String {
    let lowered = name.trim().to_lowercase();

    if let Some((_, canonical)) = INGREDIENT_ALIASES.iter().find(|(alias, _)| *alias == lowered) {
        return canonical.to_string();
    }

    INGREDIENT_ALIASES
        .iter()
        .find(|(alias, _)| lowered.contains(alias))
        .map(|(_, canonical)| canonical.to_string())
        .unwrap_or(lowered)
}
