//! C# code generator: the operations exposed to the CLI layer.

use entigen_codegen::{
    compile_entity, plan_additions, ContainerModel, EntityModel, MergeError, PreviewFile,
    ResolvedNames,
};
use entigen_core::GeneratedFile;
use entigen_metadata::{TableDescriptor, TableSet};

use crate::context_parse::{append_accessors, parse_context};
use crate::files::{ContextCs, EntityCs};

/// C# code generator producing Entity Framework Core model files.
pub struct Generator {
    namespace: String,
}

impl Generator {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }

    /// Namespace the generated types live in.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Compile and render one entity file.
    pub fn generate_entity(
        &self,
        set: &TableSet,
        table: &TableDescriptor,
        names: &ResolvedNames,
    ) -> PreviewFile {
        self.entity_file(&compile_entity(set, table, names))
    }

    /// Render one already-compiled entity model.
    pub fn entity_file(&self, model: &EntityModel) -> PreviewFile {
        let file = EntityCs::new(model, &self.namespace);
        PreviewFile {
            path: file.file_name(),
            content: file.render(),
        }
    }

    /// Build and render the full container file (always overwrites).
    pub fn generate_container(
        &self,
        entities: &[EntityModel],
        container_name: &str,
        separate_by_schema: bool,
    ) -> PreviewFile {
        let container = ContainerModel::build(
            container_name,
            &self.namespace,
            entities,
            separate_by_schema,
        );
        let file = ContextCs::new(&container, entities);
        PreviewFile {
            path: file.file_name(),
            content: file.render(),
        }
    }

    /// Merge newly mapped entities into an existing container file.
    ///
    /// Accessors already declared (including manually added ones) are left
    /// untouched; only missing ones are appended. The `bool` reports
    /// whether anything was appended, so callers can skip a redundant
    /// write.
    pub fn update_container(
        &self,
        existing_text: &str,
        entities: &[EntityModel],
        container_name: &str,
    ) -> Result<(PreviewFile, bool), MergeError> {
        let parsed = parse_context(existing_text, container_name)?;
        let desired = ContainerModel::build(container_name, &self.namespace, entities, false);
        let additions = plan_additions(&parsed, &desired.entity_sets);
        let (content, changed) = append_accessors(existing_text, container_name, &additions)?;
        Ok((
            PreviewFile {
                path: format!("{container_name}.cs"),
                content,
            },
            changed,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use entigen_metadata::{ColumnDescriptor, ObjectKind, TableKey};

    fn users_orders_set() -> TableSet {
        let table = |name: &str| TableDescriptor {
            schema: "public".into(),
            name: name.into(),
            kind: ObjectKind::Table,
            is_partition: false,
            columns: vec![ColumnDescriptor {
                name: "id".into(),
                native_type: "int4".into(),
                nullable: false,
                max_length: None,
                default: None,
            }],
            primary_key: None,
            foreign_keys: vec![],
            indexes: vec![],
        };
        TableSet::new(vec![table("users"), table("orders")])
    }

    fn compile_all(set: &TableSet) -> Vec<EntityModel> {
        let names = ResolvedNames::resolve(set);
        set.iter().map(|t| compile_entity(set, t, &names)).collect()
    }

    #[test]
    fn test_generate_entity_file_name() {
        let set = users_orders_set();
        let names = ResolvedNames::resolve(&set);
        let users = set.get(&TableKey::new("public", "users")).unwrap();
        let file = Generator::new("App.Models").generate_entity(&set, users, &names);
        assert_eq!(file.path, "User.cs");
        assert!(file.content.contains("public partial class User"));
    }

    #[test]
    fn test_update_container_appends_missing_only() {
        // Scenario: the container already declares Users; the new set
        // resolves to {User, Order}.
        let existing = "\
namespace App.Models
{
    public partial class AppDbContext : DbContext
    {
        public virtual DbSet<User> Users { get; set; }
    }
}
";
        let set = users_orders_set();
        let entities = compile_all(&set);
        let generator = Generator::new("App.Models");

        let (file, changed) = generator
            .update_container(existing, &entities, "AppDbContext")
            .unwrap();
        assert!(changed);
        assert!(file.content.contains("public virtual DbSet<User> Users { get; set; }"));
        assert!(file.content.contains("public virtual DbSet<Order> Orders { get; set; }"));

        // Second run with the merged text: nothing to append.
        let (again, changed) = generator
            .update_container(&file.content, &entities, "AppDbContext")
            .unwrap();
        assert!(!changed);
        assert_eq!(again.content, file.content);
    }

    #[test]
    fn test_update_container_subset_reports_no_change() {
        let existing = "\
namespace App.Models
{
    public partial class AppDbContext : DbContext
    {
        public virtual DbSet<User> Users { get; set; }
    }
}
";
        let set = TableSet::new(vec![TableDescriptor {
            schema: "public".into(),
            name: "users".into(),
            kind: ObjectKind::Table,
            is_partition: false,
            columns: vec![],
            primary_key: None,
            foreign_keys: vec![],
            indexes: vec![],
        }]);
        let entities = compile_all(&set);

        let (file, changed) = Generator::new("App.Models")
            .update_container(existing, &entities, "AppDbContext")
            .unwrap();
        assert!(!changed);
        assert_eq!(file.content, existing);
    }

    #[test]
    fn test_update_container_wrong_file_fails() {
        let set = users_orders_set();
        let entities = compile_all(&set);
        let err = Generator::new("App.Models")
            .update_container("public class Unrelated {}", &entities, "AppDbContext")
            .unwrap_err();
        assert!(matches!(err, MergeError::ContainerNotFound { .. }));
    }
}
