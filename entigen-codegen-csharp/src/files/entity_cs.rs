//! Entity class file renderer.

use std::path::{Path, PathBuf};

use entigen_codegen::{builder::CodeBuilder, EntityModel, TypeMapper};
use entigen_core::{FileRules, GeneratedFile};

use super::GENERATED_HEADER;
use crate::{naming::safe_name, type_mapper::CSharpTypeMapper};

/// One entity class file (`<ClassName>.cs`).
pub struct EntityCs<'a> {
    model: &'a EntityModel,
    namespace: &'a str,
}

impl<'a> EntityCs<'a> {
    pub fn new(model: &'a EntityModel, namespace: &'a str) -> Self {
        Self { model, namespace }
    }

    /// File name of the generated entity.
    pub fn file_name(&self) -> String {
        format!("{}.cs", self.model.class_name)
    }

    fn render_class(&self, builder: &mut CodeBuilder) {
        let class = safe_name(&self.model.class_name);
        builder.push_block(&format!("public partial class {class}"));

        // Collections are initialized in the constructor so callers can
        // append without a null check.
        if !self.model.collections.is_empty() {
            builder.push_block(&format!("public {class}()"));
            for collection in &self.model.collections {
                builder.push_line(&format!(
                    "{} = new HashSet<{}>();",
                    safe_name(&collection.name),
                    collection.source_class
                ));
            }
            builder.push_close("");
            builder.push_blank();
        }

        let mapper = CSharpTypeMapper;
        for property in &self.model.properties {
            builder.push_line(&format!(
                "public {} {} {{ get; set; }}",
                mapper.map_column_type(property.scalar, property.nullable),
                safe_name(&property.name)
            ));
        }

        if !self.model.navigations.is_empty() || !self.model.collections.is_empty() {
            if !self.model.properties.is_empty() {
                builder.push_blank();
            }
            for navigation in &self.model.navigations {
                builder.push_line(&format!(
                    "public virtual {} {} {{ get; set; }}",
                    navigation.target_class,
                    safe_name(&navigation.name)
                ));
            }
            for collection in &self.model.collections {
                builder.push_line(&format!(
                    "public virtual ICollection<{}> {} {{ get; set; }}",
                    collection.source_class,
                    safe_name(&collection.name)
                ));
            }
        }

        builder.push_close("");
    }
}

impl GeneratedFile for EntityCs<'_> {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(self.file_name())
    }

    fn rules(&self) -> FileRules {
        FileRules::always_overwrite()
    }

    fn render(&self) -> String {
        let mut builder = CodeBuilder::csharp();
        builder
            .push_line(GENERATED_HEADER)
            .push_line("using System;")
            .push_line("using System.Collections.Generic;")
            .push_blank()
            .push_block(&format!("namespace {}", self.namespace));
        self.render_class(&mut builder);
        builder.push_close("");
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use entigen_codegen::{CollectionModel, NavigationModel, PropertyModel, ScalarType};
    use entigen_metadata::ObjectKind;

    fn order_model() -> EntityModel {
        EntityModel {
            class_name: "Order".into(),
            schema: "public".into(),
            storage_name: "order".into(),
            kind: ObjectKind::Table,
            properties: vec![
                PropertyModel {
                    name: "Id".into(),
                    column_name: "id".into(),
                    scalar: ScalarType::Int32,
                    nullable: false,
                    max_length: None,
                    default_sql: None,
                    is_key: true,
                },
                PropertyModel {
                    name: "CustomerId".into(),
                    column_name: "customer_id".into(),
                    scalar: ScalarType::Int32,
                    nullable: true,
                    max_length: None,
                    default_sql: None,
                    is_key: false,
                },
            ],
            navigations: vec![NavigationModel {
                name: "Customer".into(),
                target_class: "Customer".into(),
                inverse_collection: "Orders".into(),
                foreign_key_properties: vec!["CustomerId".into()],
                principal_properties: vec!["Id".into()],
                constraint_name: "fk_order_customer".into(),
            }],
            collections: vec![CollectionModel {
                name: "OrderItems".into(),
                source_class: "OrderItem".into(),
                inverse_navigation: "Order".into(),
                constraint_name: "fk_order_item_order".into(),
            }],
            directives: vec![],
        }
    }

    #[test]
    fn test_render_entity_class() {
        let model = order_model();
        let rendered = EntityCs::new(&model, "App.Models").render();

        assert!(rendered.starts_with("// <auto-generated />\n"));
        assert!(rendered.contains("namespace App.Models\n"));
        assert!(rendered.contains("    public partial class Order\n"));
        assert!(rendered.contains("        public int Id { get; set; }\n"));
        assert!(rendered.contains("        public int? CustomerId { get; set; }\n"));
        assert!(rendered.contains("        public virtual Customer Customer { get; set; }\n"));
        assert!(
            rendered.contains("        public virtual ICollection<OrderItem> OrderItems { get; set; }\n")
        );
        assert!(rendered.contains("OrderItems = new HashSet<OrderItem>();"));
    }

    #[test]
    fn test_no_constructor_without_collections() {
        let mut model = order_model();
        model.collections.clear();
        let rendered = EntityCs::new(&model, "App.Models").render();
        assert!(!rendered.contains("public Order()"));
    }

    #[test]
    fn test_file_name() {
        let model = order_model();
        assert_eq!(EntityCs::new(&model, "App.Models").file_name(), "Order.cs");
    }
}
