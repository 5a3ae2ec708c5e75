//! Container (DbContext) file renderer.

use std::path::{Path, PathBuf};

use entigen_codegen::{builder::CodeBuilder, ConfigDirective, ContainerModel, EntityModel};
use entigen_core::{FileRules, GeneratedFile};

use super::GENERATED_HEADER;
use crate::naming::safe_name;

/// The aggregate context file (`<ContainerName>.cs`).
pub struct ContextCs<'a> {
    container: &'a ContainerModel,
    entities: &'a [EntityModel],
}

impl<'a> ContextCs<'a> {
    pub fn new(container: &'a ContainerModel, entities: &'a [EntityModel]) -> Self {
        Self { container, entities }
    }

    /// File name of the generated container.
    pub fn file_name(&self) -> String {
        format!("{}.cs", self.container.name)
    }

    fn render_accessors(&self, builder: &mut CodeBuilder) {
        if self.container.separate_by_schema {
            let schemas = self.container.schemas();
            for (i, schema) in schemas.iter().enumerate() {
                if i > 0 {
                    builder.push_blank();
                }
                builder.push_line(&format!("#region {schema}"));
                for set in &self.container.entity_sets {
                    if set.schema == *schema {
                        builder.push_line(&accessor_declaration(&set.class_name, &set.accessor));
                    }
                }
                builder.push_line("#endregion");
            }
        } else {
            for set in &self.container.entity_sets {
                builder.push_line(&accessor_declaration(&set.class_name, &set.accessor));
            }
        }
    }

    fn render_model_creating(&self, builder: &mut CodeBuilder) {
        builder.push_block("protected override void OnModelCreating(ModelBuilder modelBuilder)");
        for entity in self.entities {
            builder.push_block(&format!("modelBuilder.Entity<{}>(entity =>", entity.class_name));
            render_directives(builder, &entity.directives);
            builder.push_close(");");
            builder.push_blank();
        }
        builder.push_line("OnModelCreatingPartial(modelBuilder);");
        builder.push_close("");
    }
}

impl GeneratedFile for ContextCs<'_> {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(self.file_name())
    }

    fn rules(&self) -> FileRules {
        FileRules::always_overwrite()
    }

    fn render(&self) -> String {
        let name = &self.container.name;
        let mut builder = CodeBuilder::csharp();
        builder
            .push_line(GENERATED_HEADER)
            .push_line("using Microsoft.EntityFrameworkCore;")
            .push_blank()
            .push_block(&format!("namespace {}", self.container.namespace))
            .push_block(&format!("public partial class {name} : DbContext"));

        builder.push_block(&format!("public {name}()"));
        builder.push_close("");
        builder.push_blank();
        builder.push_line(&format!("public {name}(DbContextOptions<{name}> options)"));
        builder.push_indent();
        builder.push_line(": base(options)");
        builder.push_dedent();
        builder.push_line("{");
        builder.push_line("}");
        builder.push_blank();

        self.render_accessors(&mut builder);
        builder.push_blank();
        self.render_model_creating(&mut builder);
        builder.push_blank();
        builder.push_line("partial void OnModelCreatingPartial(ModelBuilder modelBuilder);");

        builder.push_close(""); // class
        builder.push_close(""); // namespace
        builder.build()
    }
}

fn accessor_declaration(class_name: &str, accessor: &str) -> String {
    format!(
        "public virtual DbSet<{}> {} {{ get; set; }}",
        class_name,
        safe_name(accessor)
    )
}

/// Lambda over one or more properties: `e => e.Id` or `e => new { e.A, e.B }`.
fn lambda(param: &str, properties: &[String]) -> String {
    match properties {
        [single] => format!("{param} => {param}.{}", safe_name(single)),
        _ => {
            let list: Vec<String> = properties
                .iter()
                .map(|p| format!("{param}.{}", safe_name(p)))
                .collect();
            format!("{param} => new {{ {} }}", list.join(", "))
        }
    }
}

fn directive_group(directive: &ConfigDirective) -> u8 {
    match directive {
        ConfigDirective::MapTable { .. } | ConfigDirective::MapKeyless { .. } => 0,
        ConfigDirective::Key { .. } => 1,
        ConfigDirective::Column { .. } => 2,
        ConfigDirective::Index { .. } => 3,
        ConfigDirective::Relationship { .. } => 4,
    }
}

fn render_directives(builder: &mut CodeBuilder, directives: &[ConfigDirective]) {
    let mut previous: Option<u8> = None;
    for directive in directives {
        let group = directive_group(directive);
        // Blank line between groups, and between relationship blocks.
        if previous.is_some_and(|p| p != group || group == 4) {
            builder.push_blank();
        }
        previous = Some(group);
        render_directive(builder, directive);
    }
}

fn render_directive(builder: &mut CodeBuilder, directive: &ConfigDirective) {
    match directive {
        ConfigDirective::MapTable { table, schema } => {
            builder.push_line(&format!("entity.ToTable(\"{table}\", \"{schema}\");"));
        }
        ConfigDirective::MapKeyless { view, schema, .. } => {
            builder.push_line("entity.HasNoKey();");
            builder.push_line(&format!("entity.ToView(\"{view}\", \"{schema}\");"));
        }
        ConfigDirective::Key {
            properties,
            constraint_name,
        } => match constraint_name {
            Some(name) => {
                builder.push_line(&format!("entity.HasKey({})", lambda("e", properties)));
                builder.push_indent();
                builder.push_line(&format!(".HasName(\"{name}\");"));
                builder.push_dedent();
            }
            None => {
                builder.push_line(&format!("entity.HasKey({});", lambda("e", properties)));
            }
        },
        ConfigDirective::Column {
            property,
            column,
            required,
            max_length,
            default_sql,
        } => {
            let mut line = format!(
                "entity.Property({}).HasColumnName(\"{column}\")",
                lambda("e", std::slice::from_ref(property))
            );
            if *required {
                line.push_str(".IsRequired()");
            }
            if let Some(len) = max_length {
                line.push_str(&format!(".HasMaxLength({len})"));
            }
            if let Some(sql) = default_sql {
                line.push_str(&format!(".HasDefaultValueSql(\"{}\")", escape(sql)));
            }
            line.push(';');
            builder.push_line(&line);
        }
        ConfigDirective::Index {
            properties,
            name,
            unique,
        } => {
            let mut line = format!(
                "entity.HasIndex({}).HasDatabaseName(\"{name}\")",
                lambda("e", properties)
            );
            if *unique {
                line.push_str(".IsUnique()");
            }
            line.push(';');
            builder.push_line(&line);
        }
        ConfigDirective::Relationship {
            navigation,
            collection,
            foreign_key_properties,
            constraint_name,
            ..
        } => {
            builder.push_line(&format!(
                "entity.HasOne(d => d.{})",
                safe_name(navigation)
            ));
            builder.push_indent();
            builder.push_line(&format!(".WithMany(p => p.{})", safe_name(collection)));
            builder.push_line(&format!(
                ".HasForeignKey({})",
                lambda("d", foreign_key_properties)
            ));
            builder.push_line(&format!(".HasConstraintName(\"{constraint_name}\");"));
            builder.push_dedent();
        }
    }
}

fn escape(sql: &str) -> String {
    sql.replace('\\', "\\\\").replace('"', "\\\"")
}
