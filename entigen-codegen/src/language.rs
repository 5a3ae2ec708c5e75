//! Seams implemented by language emitter crates.

use crate::model::ScalarType;

/// A generated file for preview or writing.
#[derive(Debug, Clone)]
pub struct PreviewFile {
    /// File name relative to the output directory.
    pub path: String,
    /// Rendered content.
    pub content: String,
}

/// Trait for mapping scalar types to language-specific type strings.
///
/// Implement this trait for each target language an emitter crate adds.
pub trait TypeMapper {
    /// The target language name
    fn language(&self) -> &'static str;

    /// Map a scalar type to a language-specific type string
    fn map_scalar(&self, scalar: ScalarType) -> &'static str;

    /// Map a nullable scalar. Inherently nullable scalars are not wrapped
    /// further; everything else gets the language's optional marker.
    fn map_nullable_scalar(&self, scalar: ScalarType) -> String;

    /// Convenience: pick the plain or nullable spelling.
    fn map_column_type(&self, scalar: ScalarType, nullable: bool) -> String {
        if nullable && !scalar.is_inherently_nullable() {
            self.map_nullable_scalar(scalar)
        } else {
            self.map_scalar(scalar).to_string()
        }
    }
}
