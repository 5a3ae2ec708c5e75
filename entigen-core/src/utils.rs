//! Shared string utilities for identifier shaping.

/// Convert a raw catalog identifier to PascalCase (e.g., "uploaded_file" -> "UploadedFile").
///
/// Words are split on any non-alphanumeric character. All-caps words are
/// folded to a single capitalized word ("ORDER_ITEMS" -> "OrderItems");
/// mixed-case words keep their interior casing ("uploadedFile" -> "UploadedFile").
pub fn to_pascal_case(s: &str) -> String {
    s.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(capitalize)
        .collect()
}

fn capitalize(part: &str) -> String {
    let mut chars = part.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => {
            let rest: String = chars.collect();
            let rest = if part.chars().any(|c| c.is_ascii_lowercase()) {
                rest
            } else {
                rest.to_ascii_lowercase()
            };
            c.to_ascii_uppercase().to_string() + &rest
        }
    }
}
