//! Structural parsing of previously generated context files.
//!
//! The incremental merge never searches raw substrings: the existing file
//! is scanned line-by-line into a [`ParsedContainer`] (declared accessor
//! names under the expected class), and new accessor declarations are
//! spliced in after the last existing one. Everything outside the inserted
//! lines is carried over byte-for-byte, so manual edits and formatting
//! survive, and re-running the merge is a no-op.

use entigen_codegen::{EntitySet, MergeError, ParsedContainer};
use indexmap::IndexSet;

/// Parse an existing context file into its structural representation.
///
/// Fails with [`MergeError::ContainerNotFound`] when the expected class is
/// absent, which protects a misidentified file from being rewritten.
pub fn parse_context(text: &str, container: &str) -> Result<ParsedContainer, MergeError> {
    let mut found = false;
    let mut accessors = IndexSet::new();

    for line in text.lines() {
        if !found {
            found = is_class_declaration(line, container);
            continue;
        }
        if let Some(name) = parse_accessor(line) {
            accessors.insert(name);
        }
    }

    if !found {
        return Err(MergeError::ContainerNotFound {
            container: container.to_string(),
        });
    }
    Ok(ParsedContainer {
        name: container.to_string(),
        accessors,
    })
}

/// Append accessor declarations for `additions` to an existing context file.
///
/// Returns the merged text and whether anything changed. With no additions
/// the input text is returned untouched.
pub fn append_accessors(
    text: &str,
    container: &str,
    additions: &[&EntitySet],
) -> Result<(String, bool), MergeError> {
    if additions.is_empty() {
        return Ok((text.to_string(), false));
    }

    let lines: Vec<&str> = text.lines().collect();
    let class_idx = lines
        .iter()
        .position(|line| is_class_declaration(line, container))
        .ok_or_else(|| MergeError::ContainerNotFound {
            container: container.to_string(),
        })?;

    let mut last_accessor = None;
    for (i, line) in lines.iter().enumerate().skip(class_idx + 1) {
        if parse_accessor(line).is_some() {
            last_accessor = Some(i);
        }
    }

    let (insert_after, indent) = match last_accessor {
        Some(i) => (i, leading_whitespace(lines[i]).to_string()),
        None => {
            // No accessors yet: insert right after the class's opening brace.
            let brace = lines
                .iter()
                .enumerate()
                .skip(class_idx)
                .find(|(_, line)| line.trim_end().ends_with('{'))
                .map(|(i, _)| i)
                .unwrap_or(class_idx);
            (
                brace,
                format!("{}    ", leading_whitespace(lines[class_idx])),
            )
        }
    };

    let mut merged: Vec<String> = lines[..=insert_after].iter().map(|s| s.to_string()).collect();
    for set in additions {
        merged.push(format!(
            "{indent}public virtual DbSet<{}> {} {{ get; set; }}",
            set.class_name, set.accessor
        ));
    }
    merged.extend(lines[insert_after + 1..].iter().map(|s| s.to_string()));

    let mut result = merged.join("\n");
    if text.ends_with('\n') {
        result.push('\n');
    }
    Ok((result, true))
}

fn leading_whitespace(line: &str) -> &str {
    &line[..line.len() - line.trim_start().len()]
}

fn is_class_declaration(line: &str, container: &str) -> bool {
    let mut tokens = line.split_whitespace();
    while let Some(token) = tokens.next() {
        if token == "class" {
            return match tokens.next() {
                // Tolerate "class Name:DbContext" with the colon attached.
                Some(name) => name.split(':').next() == Some(container),
                None => false,
            };
        }
    }
    false
}

fn parse_accessor(line: &str) -> Option<String> {
    let trimmed = line.trim();
    if !trimmed.starts_with("public") {
        return None;
    }
    let start = trimmed.find("DbSet<")? + "DbSet<".len();
    let close = start + trimmed[start..].find('>')?;
    let name: String = trimmed[close + 1..]
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '@')
        .collect();
    if name.is_empty() { None } else { Some(name) }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXISTING: &str = "\
// <auto-generated />
using Microsoft.EntityFrameworkCore;

namespace App.Models
{
    public partial class AppDbContext : DbContext
    {
        public virtual DbSet<User> Users { get; set; }

        // hand-added accessor, different formatting on purpose
        public DbSet<AuditRow>  AuditRows { get; set; }

        protected override void OnModelCreating(ModelBuilder modelBuilder)
        {
        }
    }
}
";

    fn set(class_name: &str, accessor: &str) -> EntitySet {
        EntitySet {
            accessor: accessor.into(),
            class_name: class_name.into(),
            schema: "public".into(),
        }
    }

    #[test]
    fn test_parse_context_collects_accessors() {
        let parsed = parse_context(EXISTING, "AppDbContext").unwrap();
        assert_eq!(parsed.name, "AppDbContext");
        assert!(parsed.declares("Users"));
        // Manually added accessors count as declared.
        assert!(parsed.declares("AuditRows"));
        assert!(!parsed.declares("Orders"));
    }

    #[test]
    fn test_parse_context_missing_class_fails() {
        let err = parse_context(EXISTING, "OtherContext").unwrap_err();
        assert!(matches!(err, MergeError::ContainerNotFound { .. }));
    }

    #[test]
    fn test_append_after_last_accessor() {
        let orders = set("Order", "Orders");
        let additions = vec![&orders];
        let (merged, changed) = append_accessors(EXISTING, "AppDbContext", &additions).unwrap();

        assert!(changed);
        // Appended right after the hand-added accessor, same indentation.
        let expected =
            "        public DbSet<AuditRow>  AuditRows { get; set; }\n        public virtual DbSet<Order> Orders { get; set; }\n";
        assert!(merged.contains(expected));
        // Nothing that was there before moved or changed.
        assert!(merged.contains("public virtual DbSet<User> Users { get; set; }"));
        assert!(merged.contains("// hand-added accessor, different formatting on purpose"));
    }

    #[test]
    fn test_append_nothing_returns_input_unchanged() {
        let (merged, changed) = append_accessors(EXISTING, "AppDbContext", &[]).unwrap();
        assert!(!changed);
        assert_eq!(merged, EXISTING);
    }

    #[test]
    fn test_append_into_class_without_accessors() {
        let bare = "\
namespace App.Models
{
    public partial class AppDbContext : DbContext
    {
    }
}
";
        let users = set("User", "Users");
        let additions = vec![&users];
        let (merged, changed) = append_accessors(bare, "AppDbContext", &additions).unwrap();
        assert!(changed);
        assert!(merged.contains(
            "    {\n        public virtual DbSet<User> Users { get; set; }\n    }"
        ));
    }

    #[test]
    fn test_append_missing_class_fails() {
        let users = set("User", "Users");
        let additions = vec![&users];
        let err = append_accessors("class Something {}", "AppDbContext", &additions).unwrap_err();
        assert!(matches!(err, MergeError::ContainerNotFound { .. }));
    }

    #[test]
    fn test_merge_is_idempotent() {
        let orders = set("Order", "Orders");
        let additions = vec![&orders];
        let (once, _) = append_accessors(EXISTING, "AppDbContext", &additions).unwrap();

        // Second run: the accessor now parses as declared, so nothing to add.
        let parsed = parse_context(&once, "AppDbContext").unwrap();
        assert!(parsed.declares("Orders"));
        let (twice, changed) = append_accessors(&once, "AppDbContext", &[]).unwrap();
        assert!(!changed);
        assert_eq!(once, twice);
    }
}
