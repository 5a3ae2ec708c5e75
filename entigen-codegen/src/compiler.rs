//! Descriptor → entity model lowering.
//!
//! Phase 2 of the pipeline. Each table compiles independently from its own
//! descriptor plus the frozen name lookup produced in phase 1; nothing here
//! mutates shared state. Compilation is total: unrecognized native types
//! degrade to the untyped fallback scalar instead of erroring.

use std::collections::HashSet;

use entigen_core::pluralize;
use entigen_metadata::{ObjectKind, TableDescriptor, TableSet};

use crate::model::{
    CollectionModel, ConfigDirective, EntityModel, NavigationModel, PropertyModel,
};
use crate::names::{sanitize_identifier, EntityMembers, ResolvedNames};
use crate::type_mapper::native_scalar;

/// Compile one table into its entity model.
///
/// `table` is expected to belong to the set `names` was resolved against;
/// a table outside it is resolved standalone, so the transform stays total
/// either way.
pub fn compile_entity(set: &TableSet, table: &TableDescriptor, names: &ResolvedNames) -> EntityModel {
    let Some(members) = names.members(&table.key()) else {
        let solo = TableSet::new(vec![table.clone()]);
        let solo_names = ResolvedNames::resolve(&solo);
        return compile_entity(&solo, table, &solo_names);
    };
    compile_with(set, table, names, members)
}

fn compile_with(
    set: &TableSet,
    table: &TableDescriptor,
    names: &ResolvedNames,
    members: &EntityMembers,
) -> EntityModel {
    let class_name = members.class_name.clone();
    let own_key = table.key();

    let key_columns: HashSet<&str> = table
        .primary_key
        .as_ref()
        .map(|pk| pk.columns.iter().map(String::as_str).collect())
        .unwrap_or_default();

    let property_of = |column: &str| -> String {
        members
            .property(column)
            .map(str::to_string)
            .unwrap_or_else(|| sanitize_identifier(column))
    };

    let mut properties = Vec::with_capacity(table.columns.len());
    for column in &table.columns {
        let scalar = native_scalar(&column.native_type);
        properties.push(PropertyModel {
            name: property_of(&column.name),
            column_name: column.name.clone(),
            scalar,
            nullable: column.nullable,
            max_length: column.max_length,
            default_sql: column.default.clone(),
            is_key: key_columns.contains(column.name.as_str()),
        });
    }

    let mut navigations = Vec::with_capacity(table.foreign_keys.len());
    for (fk_index, fk) in table.foreign_keys.iter().enumerate() {
        let target_key = fk.referenced_key();
        let target_class = names.class(&target_key).to_string();
        let name = members
            .navigations
            .get(fk_index)
            .cloned()
            .unwrap_or_else(|| target_class.clone());
        // The inverse collection was resolved on the target from the same
        // source column, so this lookup always lands on the matching pair.
        let inverse_collection = names
            .members(&target_key)
            .and_then(|m| m.collection_for(&own_key, fk_index))
            .map(|c| c.name.clone())
            .unwrap_or_else(|| pluralize(&class_name));
        let principal_properties = fk
            .referenced_columns
            .iter()
            .map(|c| {
                names
                    .members(&target_key)
                    .and_then(|m| m.property(c))
                    .map(str::to_string)
                    .unwrap_or_else(|| sanitize_identifier(c))
            })
            .collect();
        navigations.push(NavigationModel {
            name,
            target_class,
            inverse_collection,
            foreign_key_properties: fk.columns.iter().map(|c| property_of(c)).collect(),
            principal_properties,
            constraint_name: fk.constraint_name.clone(),
        });
    }

    let mut collections = Vec::with_capacity(members.collections.len());
    for member in &members.collections {
        let source_class = names.class(&member.source).to_string();
        let inverse_navigation = names
            .members(&member.source)
            .and_then(|m| m.navigations.get(member.fk_index))
            .cloned()
            .unwrap_or_else(|| class_name.clone());
        let constraint_name = set
            .get(&member.source)
            .and_then(|t| t.foreign_keys.get(member.fk_index))
            .map(|fk| fk.constraint_name.clone())
            .unwrap_or_default();
        collections.push(CollectionModel {
            name: member.name.clone(),
            source_class,
            inverse_navigation,
            constraint_name,
        });
    }

    let directives = build_directives(table, &properties, &navigations, &property_of);

    EntityModel {
        class_name,
        schema: table.schema.clone(),
        storage_name: table.name.clone(),
        kind: table.kind,
        properties,
        navigations,
        collections,
        directives,
    }
}

fn build_directives(
    table: &TableDescriptor,
    properties: &[PropertyModel],
    navigations: &[NavigationModel],
    property_of: &dyn Fn(&str) -> String,
) -> Vec<ConfigDirective> {
    let mut directives = Vec::new();

    match table.kind {
        ObjectKind::Table => directives.push(ConfigDirective::MapTable {
            table: table.name.clone(),
            schema: table.schema.clone(),
        }),
        ObjectKind::View => directives.push(ConfigDirective::MapKeyless {
            view: table.name.clone(),
            schema: table.schema.clone(),
            materialized: false,
        }),
        ObjectKind::MaterializedView => directives.push(ConfigDirective::MapKeyless {
            view: table.name.clone(),
            schema: table.schema.clone(),
            materialized: true,
        }),
    }

    if !table.kind.is_keyless()
        && let Some(pk) = &table.primary_key
    {
        directives.push(ConfigDirective::Key {
            properties: pk.columns.iter().map(|c| property_of(c)).collect(),
            constraint_name: pk.constraint_name.clone(),
        });
    }

    for property in properties {
        directives.push(ConfigDirective::Column {
            property: property.name.clone(),
            column: property.column_name.clone(),
            required: !property.nullable
                && property.scalar.is_inherently_nullable()
                && !property.is_key,
            max_length: property
                .max_length
                .filter(|_| property.scalar.is_length_bounded()),
            default_sql: property.default_sql.clone(),
        });
    }

    for index in &table.indexes {
        directives.push(ConfigDirective::Index {
            properties: index.columns.iter().map(|c| property_of(c)).collect(),
            name: index.name.clone(),
            unique: index.unique,
        });
    }

    for navigation in navigations {
        directives.push(ConfigDirective::Relationship {
            navigation: navigation.name.clone(),
            collection: navigation.inverse_collection.clone(),
            foreign_key_properties: navigation.foreign_key_properties.clone(),
            principal_class: navigation.target_class.clone(),
            constraint_name: navigation.constraint_name.clone(),
        });
    }

    directives
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ScalarType;
    use entigen_metadata::{
        ColumnDescriptor, ForeignKeyDescriptor, IndexDescriptor, PrimaryKey, TableKey,
    };

    fn column(name: &str, native: &str, nullable: bool) -> ColumnDescriptor {
        ColumnDescriptor {
            name: name.into(),
            native_type: native.into(),
            nullable,
            max_length: None,
            default: None,
        }
    }

    fn order_customer_set() -> TableSet {
        let customer = TableDescriptor {
            schema: "public".into(),
            name: "customer".into(),
            kind: ObjectKind::Table,
            is_partition: false,
            columns: vec![
                column("id", "int4", false),
                ColumnDescriptor {
                    max_length: Some(120),
                    ..column("name", "varchar", false)
                },
            ],
            primary_key: Some(PrimaryKey {
                columns: vec!["id".into()],
                constraint_name: Some("pk_customer".into()),
            }),
            foreign_keys: vec![],
            indexes: vec![IndexDescriptor {
                name: "ix_customer_name".into(),
                columns: vec!["name".into()],
                unique: true,
            }],
        };
        let order = TableDescriptor {
            schema: "public".into(),
            name: "order".into(),
            kind: ObjectKind::Table,
            is_partition: false,
            columns: vec![
                ColumnDescriptor {
                    default: Some("nextval('order_id_seq'::regclass)".into()),
                    ..column("id", "int4", false)
                },
                column("customer_id", "int4", true),
                column("payload", "jsonb", true),
                column("weird", "tsvector", true),
            ],
            primary_key: Some(PrimaryKey {
                columns: vec!["id".into()],
                constraint_name: None,
            }),
            foreign_keys: vec![ForeignKeyDescriptor {
                constraint_name: "fk_order_customer".into(),
                columns: vec!["customer_id".into()],
                referenced_schema: "public".into(),
                referenced_table: "customer".into(),
                referenced_columns: vec!["id".into()],
            }],
            indexes: vec![],
        };
        TableSet::new(vec![customer, order])
    }

    #[test]
    fn test_compile_order_entity() {
        let set = order_customer_set();
        let names = ResolvedNames::resolve(&set);
        let order = set.get(&TableKey::new("public", "order")).unwrap();
        let model = compile_entity(&set, order, &names);

        assert_eq!(model.class_name, "Order");
        assert_eq!(model.properties.len(), 4);
        assert_eq!(model.properties[0].name, "Id");
        assert!(model.properties[0].is_key);
        assert_eq!(
            model.properties[0].default_sql.as_deref(),
            Some("nextval('order_id_seq'::regclass)")
        );
        // Unknown native type degrades to the fallback scalar.
        assert_eq!(model.properties[3].scalar, ScalarType::Unknown);

        assert_eq!(model.navigations.len(), 1);
        let nav = &model.navigations[0];
        assert_eq!(nav.name, "Customer");
        assert_eq!(nav.inverse_collection, "Orders");
        assert_eq!(nav.foreign_key_properties, vec!["CustomerId"]);
        assert_eq!(nav.principal_properties, vec!["Id"]);
    }

    #[test]
    fn test_compile_customer_collections() {
        let set = order_customer_set();
        let names = ResolvedNames::resolve(&set);
        let customer = set.get(&TableKey::new("public", "customer")).unwrap();
        let model = compile_entity(&set, customer, &names);

        assert_eq!(model.collections.len(), 1);
        assert_eq!(model.collections[0].name, "Orders");
        assert_eq!(model.collections[0].source_class, "Order");
        assert_eq!(model.collections[0].inverse_navigation, "Customer");
        assert_eq!(model.collections[0].constraint_name, "fk_order_customer");
    }

    #[test]
    fn test_compile_directive_order_and_content() {
        let set = order_customer_set();
        let names = ResolvedNames::resolve(&set);
        let customer = set.get(&TableKey::new("public", "customer")).unwrap();
        let model = compile_entity(&set, customer, &names);

        assert!(matches!(
            &model.directives[0],
            ConfigDirective::MapTable { table, schema } if table == "customer" && schema == "public"
        ));
        assert!(matches!(
            &model.directives[1],
            ConfigDirective::Key { properties, constraint_name }
                if properties == &vec!["Id".to_string()]
                && constraint_name.as_deref() == Some("pk_customer")
        ));
        // Length bound survives only for length-bounded scalars.
        let name_column = model
            .directives
            .iter()
            .find_map(|d| match d {
                ConfigDirective::Column {
                    property,
                    max_length,
                    required,
                    ..
                } if property == "Name" => Some((*max_length, *required)),
                _ => None,
            })
            .unwrap();
        assert_eq!(name_column, (Some(120), true));

        assert!(model.directives.iter().any(|d| matches!(
            d,
            ConfigDirective::Index { name, unique: true, .. } if name == "ix_customer_name"
        )));
    }

    #[test]
    fn test_views_compile_keyless() {
        let view = TableDescriptor {
            schema: "public".into(),
            name: "order_summary".into(),
            kind: ObjectKind::View,
            is_partition: false,
            columns: vec![column("total", "numeric", true)],
            // Snapshot noise: a key on a view must not produce a key declaration.
            primary_key: Some(PrimaryKey {
                columns: vec!["total".into()],
                constraint_name: None,
            }),
            foreign_keys: vec![],
            indexes: vec![],
        };
        let set = TableSet::new(vec![view]);
        let names = ResolvedNames::resolve(&set);
        let table = set.get(&TableKey::new("public", "order_summary")).unwrap();
        let model = compile_entity(&set, table, &names);

        assert!(matches!(
            &model.directives[0],
            ConfigDirective::MapKeyless { materialized: false, .. }
        ));
        assert!(
            !model
                .directives
                .iter()
                .any(|d| matches!(d, ConfigDirective::Key { .. }))
        );
    }

    #[test]
    fn test_compile_outside_resolved_set_is_total() {
        let set = order_customer_set();
        let names = ResolvedNames::resolve(&set);
        let stray = TableDescriptor {
            schema: "public".into(),
            name: "stray".into(),
            kind: ObjectKind::Table,
            is_partition: false,
            columns: vec![column("id", "int4", false)],
            primary_key: None,
            foreign_keys: vec![],
            indexes: vec![],
        };
        let model = compile_entity(&set, &stray, &names);
        assert_eq!(model.class_name, "Stray");
        assert_eq!(model.properties.len(), 1);
    }
}
