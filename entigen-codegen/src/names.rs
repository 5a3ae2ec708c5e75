//! The identifier resolver.
//!
//! Turns raw catalog identifiers into unique, collision-free class and
//! member names for one generation run. Resolution is total (any input,
//! however malformed, yields a valid name) and deterministic (an identical
//! table set always resolves to identical names), which is what makes
//! incremental diffs stable.
//!
//! Every place that groups identifiers for collision detection goes through
//! [`class_base_name`] and [`disambiguation_base`]. In particular the
//! forward-navigation and inverse-collection sides of a relationship derive
//! their distinguishing fragment from the same source column through the
//! same function, so the two sides always agree without talking to each
//! other.

use entigen_core::{pluralize, singularize, to_pascal_case};
use entigen_metadata::{TableDescriptor, TableKey, TableSet};
use indexmap::{IndexMap, IndexSet};

/// Synthesized placeholder for identifiers with no usable characters.
const PLACEHOLDER: &str = "Unnamed";

/// Suffix for a column property that would otherwise equal its class.
const COLUMN_SUFFIX: &str = "Column";

/// Suffix for a navigation or collection that collides with an existing member.
const NAVIGATION_SUFFIX: &str = "Navigation";

/// Sanitize a raw identifier into a legal PascalCase identifier.
///
/// Total: empty or fully-invalid input yields the `Unnamed` placeholder,
/// and a digit-leading result is prefixed with an underscore.
pub fn sanitize_identifier(raw: &str) -> String {
    finish_identifier(to_pascal_case(raw))
}

fn finish_identifier(pascal: String) -> String {
    if pascal.is_empty() {
        return PLACEHOLDER.to_string();
    }
    if pascal.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{pascal}")
    } else {
        pascal
    }
}

/// Normalize a raw table name to its class base identifier.
///
/// Trailing separators are stripped before anything else, so `order_` and
/// `order` land in the same collision group (the canonical grouping rule;
/// see DESIGN.md). The final word is singularized: `order_items` becomes
/// `OrderItem`.
pub fn class_base_name(raw: &str) -> String {
    let trimmed = raw.trim_end_matches(|c: char| !c.is_ascii_alphanumeric());
    let words: Vec<&str> = trimmed
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();
    let pascal = match words.split_last() {
        None => String::new(),
        Some((last, init)) => {
            let mut s: String = init.iter().map(|w| to_pascal_case(w)).collect();
            s.push_str(&to_pascal_case(&singularize(last)));
            s
        }
    };
    finish_identifier(pascal)
}

/// Derive the fragment that distinguishes multiple relationships between
/// the same two entities, from the relationship's (first) source column.
///
/// One trailing `Id` fragment is stripped when it is not the whole name:
/// `photo_file_id` becomes `PhotoFile`. Both relationship sides call this
/// with the same column, which is what keeps their names a matching pair.
pub fn disambiguation_base(column: &str) -> String {
    let pascal = sanitize_identifier(column);
    match pascal.strip_suffix("Id") {
        Some(stem) if !stem.is_empty() => stem.to_string(),
        _ => pascal,
    }
}

pub(crate) fn ensure_unique(candidate: String, taken: &IndexSet<String>) -> String {
    if !taken.contains(&candidate) {
        return candidate;
    }
    let mut n = 2u32;
    loop {
        let suffixed = format!("{candidate}{n}");
        if !taken.contains(&suffixed) {
            return suffixed;
        }
        n += 1;
    }
}

fn resolve_member_collision(base: String, used: &IndexSet<String>) -> String {
    if !used.contains(&base) {
        return base;
    }
    ensure_unique(format!("{base}{NAVIGATION_SUFFIX}"), used)
}

/// One inverse collection on an entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionMember {
    /// Resolved member name.
    pub name: String,
    /// Identity of the referencing table.
    pub source: TableKey,
    /// Position of the foreign key in the referencing table's outgoing list.
    pub fk_index: usize,
}

/// All resolved member names of one entity.
#[derive(Debug, Clone)]
pub struct EntityMembers {
    /// Resolved class name.
    pub class_name: String,
    /// Raw column name → resolved property name, in catalog order.
    pub columns: IndexMap<String, String>,
    /// Navigation names, indexed by outgoing foreign-key position.
    pub navigations: Vec<String>,
    /// Inverse collections, in incoming-key order.
    pub collections: Vec<CollectionMember>,
}

impl EntityMembers {
    /// Resolved property name for a raw column name.
    pub fn property(&self, column: &str) -> Option<&str> {
        self.columns.get(column).map(String::as_str)
    }

    /// Resolved collection name for the foreign key at `fk_index` on `source`.
    pub fn collection_for(&self, source: &TableKey, fk_index: usize) -> Option<&CollectionMember> {
        self.collections
            .iter()
            .find(|c| &c.source == source && c.fk_index == fk_index)
    }
}

/// The frozen name lookup produced by phase 1.
///
/// Built once for the whole table set, then passed read-only into
/// compilation. Same set in, same names out.
#[derive(Debug, Clone)]
pub struct ResolvedNames {
    classes: IndexMap<TableKey, String>,
    members: IndexMap<TableKey, EntityMembers>,
}

impl ResolvedNames {
    /// Resolve every class and member name for the run.
    pub fn resolve(set: &TableSet) -> Self {
        let classes = resolve_class_names(set);
        let members = set
            .iter()
            .map(|table| (table.key(), resolve_members(set, table, &classes)))
            .collect();
        Self { classes, members }
    }

    /// Resolved class name of a table, placeholder if the table is unknown.
    pub fn class(&self, key: &TableKey) -> &str {
        self.classes.get(key).map(String::as_str).unwrap_or(PLACEHOLDER)
    }

    /// Resolved member names of a table.
    pub fn members(&self, key: &TableKey) -> Option<&EntityMembers> {
        self.members.get(key)
    }

    /// All resolved class names, keyed by table.
    pub fn classes(&self) -> impl Iterator<Item = (&TableKey, &str)> {
        self.classes.iter().map(|(k, v)| (k, v.as_str()))
    }
}

/// Phase 1 proper: group the whole set by base identifier and disambiguate.
///
/// A base shared by two or more tables gets the schema name prefixed onto
/// every table sharing it, not just the later ones. Residual collisions
/// (schema-prefixed names meeting an unrelated base, same-schema bases that
/// singularize together) fall back to numeric suffixing.
fn resolve_class_names(set: &TableSet) -> IndexMap<TableKey, String> {
    let mut groups: IndexMap<String, Vec<&TableDescriptor>> = IndexMap::new();
    for table in set.iter() {
        groups
            .entry(class_base_name(&table.name))
            .or_default()
            .push(table);
    }

    let mut taken = IndexSet::new();
    let mut classes = IndexMap::new();
    for (base, tables) in &groups {
        let ambiguous = tables.len() > 1;
        for table in tables {
            let candidate = if ambiguous {
                format!("{}{}", sanitize_identifier(&table.schema), base)
            } else {
                base.clone()
            };
            let name = ensure_unique(candidate, &taken);
            taken.insert(name.clone());
            classes.insert(table.key(), name);
        }
    }
    classes
}

fn resolve_members(
    set: &TableSet,
    table: &TableDescriptor,
    classes: &IndexMap<TableKey, String>,
) -> EntityMembers {
    let class_name = classes
        .get(&table.key())
        .cloned()
        .unwrap_or_else(|| PLACEHOLDER.to_string());

    // Seeding with the class name makes "property equals declaring type"
    // just another collision.
    let mut used: IndexSet<String> = IndexSet::new();
    used.insert(class_name.clone());

    let mut columns = IndexMap::new();
    for column in &table.columns {
        let mut name = sanitize_identifier(&column.name);
        if name == class_name {
            name.push_str(COLUMN_SUFFIX);
        }
        let name = ensure_unique(name, &used);
        used.insert(name.clone());
        columns.insert(column.name.clone(), name);
    }

    // Forward navigations: FKs are grouped by resolved target class. A
    // target reached once is named after the class; a target reached
    // repeatedly is named after each key's disambiguation base.
    let mut per_target: IndexMap<&str, usize> = IndexMap::new();
    for fk in &table.foreign_keys {
        let target = class_of(classes, &fk.referenced_key());
        *per_target.entry(target).or_insert(0) += 1;
    }

    let mut navigations = Vec::with_capacity(table.foreign_keys.len());
    for fk in &table.foreign_keys {
        let target = class_of(classes, &fk.referenced_key());
        let base = if per_target.get(target).copied().unwrap_or(0) > 1 {
            match fk.columns.first() {
                Some(column) => disambiguation_base(column),
                None => target.to_string(),
            }
        } else {
            target.to_string()
        };
        let name = resolve_member_collision(base, &used);
        used.insert(name.clone());
        navigations.push(name);
    }

    // Inverse collections: incoming FKs are grouped by resolved source
    // class, mirroring the forward side through the same disambiguation
    // base so the pair always matches.
    let mut per_source: IndexMap<&str, usize> = IndexMap::new();
    for incoming in set.referencing_keys(&table.key()) {
        let source = class_of(classes, &incoming.table.key());
        *per_source.entry(source).or_insert(0) += 1;
    }

    let mut collections = Vec::new();
    for incoming in set.referencing_keys(&table.key()) {
        let source = class_of(classes, &incoming.table.key());
        let base = if per_source.get(source).copied().unwrap_or(0) > 1 {
            let fragment = match incoming.foreign_key.columns.first() {
                Some(column) => disambiguation_base(column),
                None => source.to_string(),
            };
            format!("{}{}", source, pluralize(&fragment))
        } else {
            pluralize(source)
        };
        let name = resolve_member_collision(base, &used);
        used.insert(name.clone());
        collections.push(CollectionMember {
            name,
            source: incoming.table.key(),
            fk_index: incoming.fk_index,
        });
    }

    EntityMembers {
        class_name,
        columns,
        navigations,
        collections,
    }
}

fn class_of<'a>(classes: &'a IndexMap<TableKey, String>, key: &TableKey) -> &'a str {
    classes.get(key).map(String::as_str).unwrap_or(PLACEHOLDER)
}
