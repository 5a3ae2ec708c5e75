//! C# type mapper implementation.

use entigen_codegen::{ScalarType, TypeMapper};

/// C# type mapper implementation.
pub struct CSharpTypeMapper;

impl TypeMapper for CSharpTypeMapper {
    fn language(&self) -> &'static str {
        "csharp"
    }

    fn map_scalar(&self, scalar: ScalarType) -> &'static str {
        match scalar {
            ScalarType::Bool => "bool",
            ScalarType::Int16 => "short",
            ScalarType::Int32 => "int",
            ScalarType::Int64 => "long",
            ScalarType::Decimal => "decimal",
            ScalarType::Float32 => "float",
            ScalarType::Float64 => "double",
            ScalarType::Text => "string",
            ScalarType::Uuid => "Guid",
            ScalarType::Date => "DateTime",
            ScalarType::Timestamp => "DateTime",
            ScalarType::TimestampTz => "DateTimeOffset",
            ScalarType::Time => "TimeSpan",
            ScalarType::Interval => "TimeSpan",
            ScalarType::Bytes => "byte[]",
            ScalarType::Json => "string",
            ScalarType::Unknown => "object",
        }
    }

    fn map_nullable_scalar(&self, scalar: ScalarType) -> String {
        format!("{}?", self.map_scalar(scalar))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csharp_scalar_types() {
        let mapper = CSharpTypeMapper;

        assert_eq!(mapper.map_scalar(ScalarType::Int32), "int");
        assert_eq!(mapper.map_scalar(ScalarType::Uuid), "Guid");
        assert_eq!(mapper.map_scalar(ScalarType::TimestampTz), "DateTimeOffset");
        assert_eq!(mapper.map_scalar(ScalarType::Bytes), "byte[]");
        assert_eq!(mapper.map_scalar(ScalarType::Unknown), "object");
    }

    #[test]
    fn test_csharp_nullable_types() {
        let mapper = CSharpTypeMapper;

        assert_eq!(mapper.map_column_type(ScalarType::Int32, true), "int?");
        assert_eq!(mapper.map_column_type(ScalarType::Int32, false), "int");
        // Reference types are already nullable-capable.
        assert_eq!(mapper.map_column_type(ScalarType::Text, true), "string");
        assert_eq!(mapper.map_column_type(ScalarType::Unknown, true), "object");
    }
}
