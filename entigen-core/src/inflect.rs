//! English inflection heuristics for entity and collection naming.
//!
//! Table names arrive in plural ("uploaded_files") while entity types are
//! singular ("UploadedFile"), and inverse collections go back to plural.
//! The rules below are deliberately small; irregular nouns fall through to
//! the default suffix handling, which is acceptable for catalog identifiers.

fn ends_with_sibilant(word: &str) -> bool {
    let w = word.to_ascii_lowercase();
    w.ends_with('s') || w.ends_with('x') || w.ends_with('z') || w.ends_with("ch") || w.ends_with("sh")
}

fn ends_with_consonant_y(word: &str) -> bool {
    let w = word.to_ascii_lowercase();
    w.ends_with('y')
        && !w.ends_with("ay")
        && !w.ends_with("ey")
        && !w.ends_with("iy")
        && !w.ends_with("oy")
        && !w.ends_with("uy")
}

/// Pluralize a word (e.g., "Category" -> "Categories", "Status" -> "Statuses").
pub fn pluralize(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }
    if ends_with_consonant_y(word) {
        format!("{}ies", &word[..word.len() - 1])
    } else if ends_with_sibilant(word) {
        format!("{}es", word)
    } else {
        format!("{}s", word)
    }
}

/// Singularize a word (e.g., "categories" -> "category", "statuses" -> "status").
///
/// Words that do not look plural are returned unchanged, so table names that
/// are already singular pass through untouched.
pub fn singularize(word: &str) -> String {
    let lower = word.to_ascii_lowercase();
    if lower.ends_with("ies") && word.len() > 3 {
        format!("{}y", &word[..word.len() - 3])
    } else if lower.ends_with("es") && word.len() > 2 && ends_with_sibilant(&word[..word.len() - 2]) {
        word[..word.len() - 2].to_string()
    } else if lower.ends_with('s') && !lower.ends_with("ss") && !lower.ends_with("us") && word.len() > 1 {
        word[..word.len() - 1].to_string()
    } else {
        word.to_string()
    }
}
