//! Display formatting for food names and nutrient values

const NAME_SEPARATORS: [char; 4] = ['/', ',', '\\', '-'];

/// Normalize a raw food name for display.
///
/// Segments split on `/ , \ -` are trimmed and rejoined with `" / "`. A
/// segment with no uppercase letter gets each word capitalized; a segment
/// that already has one is kept as written. Only ASCII `A-Z` count as
/// uppercase here, so "ΑΘΗΝΑ" is recased to "Αθηνα". Applying this twice
/// gives the same result as applying it once.
pub fn format_food_name(raw: &str) -> String {
    if raw.trim().is_empty() {
        return String::new();
    }

    raw.split(&NAME_SEPARATORS[..])
        .map(|segment| {
            let trimmed = segment.trim();
            if trimmed.chars().any(|c| c.is_ascii_uppercase()) {
                trimmed.to_string()
            } else {
                trimmed.split(' ').map(capitalize).collect::<Vec<_>>().join(" ")
            }
        })
        .collect::<Vec<_>>()
        .join(" / ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Format a nutrient value for a table cell: two decimals, `-` when missing
pub fn format_nutrient_value(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => "-".to_string(),
    }
}

/// Format a standard bound without trailing zeros, e.g. `2000` or `0.5`
pub fn format_bound(value: f64) -> String {
    format!("{}", value)
}
