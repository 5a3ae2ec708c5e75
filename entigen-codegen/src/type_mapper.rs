//! Native catalog type → scalar type mapping.

use crate::model::ScalarType;

/// Map a native type tag to its scalar type.
///
/// The table is fixed and total: tags it does not recognize degrade to
/// [`ScalarType::Unknown`] instead of erroring, so a column with an exotic
/// or extension-provided type still compiles.
pub fn native_scalar(tag: &str) -> ScalarType {
    // Catalogs report e.g. "character varying(120)"; the parenthesized
    // modifier is carried separately as max_length.
    let tag = tag.trim().to_ascii_lowercase();
    let tag = tag.split('(').next().unwrap_or("").trim_end();

    match tag {
        "bool" | "boolean" => ScalarType::Bool,
        "int2" | "smallint" | "smallserial" => ScalarType::Int16,
        "int4" | "int" | "integer" | "serial" => ScalarType::Int32,
        "int8" | "bigint" | "bigserial" => ScalarType::Int64,
        "numeric" | "decimal" | "money" => ScalarType::Decimal,
        "float4" | "real" => ScalarType::Float32,
        "float8" | "double precision" => ScalarType::Float64,
        "text" | "varchar" | "character varying" | "char" | "character" | "bpchar" | "citext"
        | "name" | "xml" => ScalarType::Text,
        "uuid" => ScalarType::Uuid,
        "date" => ScalarType::Date,
        "timestamp" | "timestamp without time zone" => ScalarType::Timestamp,
        "timestamptz" | "timestamp with time zone" => ScalarType::TimestampTz,
        "time" | "time without time zone" | "timetz" | "time with time zone" => ScalarType::Time,
        "interval" => ScalarType::Interval,
        "bytea" => ScalarType::Bytes,
        "json" | "jsonb" => ScalarType::Json,
        _ => ScalarType::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_scalar_integers() {
        assert_eq!(native_scalar("int2"), ScalarType::Int16);
        assert_eq!(native_scalar("int4"), ScalarType::Int32);
        assert_eq!(native_scalar("integer"), ScalarType::Int32);
        assert_eq!(native_scalar("bigint"), ScalarType::Int64);
    }

    #[test]
    fn test_native_scalar_text_variants() {
        assert_eq!(native_scalar("varchar"), ScalarType::Text);
        assert_eq!(native_scalar("character varying"), ScalarType::Text);
        assert_eq!(native_scalar("character varying(120)"), ScalarType::Text);
        assert_eq!(native_scalar("TEXT"), ScalarType::Text);
    }

    #[test]
    fn test_native_scalar_temporal() {
        assert_eq!(native_scalar("date"), ScalarType::Date);
        assert_eq!(native_scalar("timestamp"), ScalarType::Timestamp);
        assert_eq!(native_scalar("timestamptz"), ScalarType::TimestampTz);
        assert_eq!(
            native_scalar("timestamp with time zone"),
            ScalarType::TimestampTz
        );
        assert_eq!(native_scalar("interval"), ScalarType::Interval);
    }

    #[test]
    fn test_native_scalar_unknown_fallback() {
        assert_eq!(native_scalar("tsvector"), ScalarType::Unknown);
        assert_eq!(native_scalar("int4[]"), ScalarType::Unknown);
        assert_eq!(native_scalar(""), ScalarType::Unknown);
        assert_eq!(native_scalar("geography"), ScalarType::Unknown);
    }
}
