//! Stored schema documents - shape check, typed model and text rendering.
//!
//! The engine stores a schema as JSON:
//!
//! ```json
//! {
//!   "type": "struct",
//!   "fields": [
//!     { "name": "age", "type": "integer", "nullable": true, "metadata": {} },
//!     { "name": "tags",
//!       "type": { "type": "array", "elementType": "string", "containsNull": true },
//!       "nullable": true, "metadata": {} }
//!   ]
//! }
//! ```
//!
//! Rendering turns it into the engine's textual form, which is what the
//! conversion pipeline consumes:
//!
//! ```text
//! StructType(List(StructField(age,IntegerType,true),StructField(tags,ArrayType(StringType,true),true)))
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::error::{ConvertError, SchemaError};

/// Data type of a field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DataType {
    /// Atomic types are plain names, e.g. `"integer"` or `"decimal(10,2)"`.
    Simple(String),
    Complex(ComplexType),
}

/// Nested data types, tagged by their `type` member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ComplexType {
    Struct(StructType),
    Array {
        #[serde(rename = "elementType")]
        element_type: Box<DataType>,
        #[serde(rename = "containsNull")]
        contains_null: bool,
    },
    Map {
        #[serde(rename = "keyType")]
        key_type: Box<DataType>,
        #[serde(rename = "valueType")]
        value_type: Box<DataType>,
        #[serde(rename = "valueContainsNull")]
        value_contains_null: bool,
    },
}

/// A struct: the root of every stored schema.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StructType {
    pub fields: Vec<StructField>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructField {
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: DataType,
    pub nullable: bool,
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

/// Precision and scale of a bare `decimal`.
const DEFAULT_DECIMAL: (u32, u32) = (10, 0);

/// JSON Schema describing the stored document layout.
fn document_schema() -> Value {
    json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "$ref": "#/$defs/struct",
        "$defs": {
            "dataType": {
                "type": ["string", "object"],
                "if": { "type": "object" },
                "then": { "$ref": "#/$defs/complex" }
            },
            "complex": {
                "required": ["type"],
                "properties": {
                    "type": { "enum": ["struct", "array", "map"] }
                },
                "allOf": [
                    {
                        "if": { "properties": { "type": { "const": "struct" } } },
                        "then": { "$ref": "#/$defs/struct" }
                    },
                    {
                        "if": { "properties": { "type": { "const": "array" } } },
                        "then": { "$ref": "#/$defs/array" }
                    },
                    {
                        "if": { "properties": { "type": { "const": "map" } } },
                        "then": { "$ref": "#/$defs/map" }
                    }
                ]
            },
            "struct": {
                "type": "object",
                "required": ["type", "fields"],
                "properties": {
                    "type": { "const": "struct" },
                    "fields": {
                        "type": "array",
                        "items": { "$ref": "#/$defs/field" }
                    }
                }
            },
            "field": {
                "type": "object",
                "required": ["name", "type", "nullable"],
                "properties": {
                    "name": { "type": "string" },
                    "type": { "$ref": "#/$defs/dataType" },
                    "nullable": { "type": "boolean" },
                    "metadata": { "type": "object" }
                }
            },
            "array": {
                "type": "object",
                "required": ["elementType", "containsNull"],
                "properties": {
                    "elementType": { "$ref": "#/$defs/dataType" },
                    "containsNull": { "type": "boolean" }
                }
            },
            "map": {
                "type": "object",
                "required": ["keyType", "valueType", "valueContainsNull"],
                "properties": {
                    "keyType": { "$ref": "#/$defs/dataType" },
                    "valueType": { "$ref": "#/$defs/dataType" },
                    "valueContainsNull": { "type": "boolean" }
                }
            }
        }
    })
}

/// Check that a document has the stored schema layout.
///
/// # Errors
///
/// Returns `ConvertError::InvalidDocument` listing every mismatch with its
/// JSON Pointer path.
pub fn check_document(document: &Value) -> Result<(), ConvertError> {
    let schema = document_schema();
    let validator = jsonschema::validator_for(&schema).map_err(|e| ConvertError::InvalidDocument {
        errors: vec![SchemaError {
            path: String::new(),
            message: format!("document schema does not compile: {}", e),
        }],
    })?;

    let errors: Vec<SchemaError> = validator
        .iter_errors(document)
        .map(|e| SchemaError {
            path: e.instance_path.to_string(),
            message: e.to_string(),
        })
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConvertError::InvalidDocument { errors })
    }
}

/// Check a document and deserialize it into the typed model.
///
/// # Errors
///
/// Returns `ConvertError::InvalidDocument` if the layout check fails, or
/// `ConvertError::InvalidJson` if deserialization fails anyway.
pub fn parse_document(document: &Value) -> Result<StructType, ConvertError> {
    check_document(document)?;
    StructType::deserialize(document).map_err(|source| ConvertError::InvalidJson { source })
}

/// Render a struct in the engine's textual form.
///
/// # Errors
///
/// Returns `ConvertError::UnsupportedType` for atomic type names without a
/// textual counterpart.
pub fn render_schema(schema: &StructType) -> Result<String, ConvertError> {
    render_struct(schema, "")
}

/// Check, parse and render a stored document in one step.
///
/// # Errors
///
/// See [`parse_document`] and [`render_schema`].
pub fn render_document(document: &Value) -> Result<String, ConvertError> {
    let schema = parse_document(document)?;
    log::debug!("rendering document with {} top-level fields", schema.fields.len());
    render_schema(&schema)
}

fn render_struct(schema: &StructType, path: &str) -> Result<String, ConvertError> {
    let fields = schema
        .fields
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let type_path = format!("{}/fields/{}/type", path, i);
            Ok::<_, ConvertError>(format!(
                "StructField({},{},{})",
                field.name,
                render_type(&field.data_type, &type_path)?,
                field.nullable
            ))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(format!("StructType(List({}))", fields.join(",")))
}

fn render_type(data_type: &DataType, path: &str) -> Result<String, ConvertError> {
    match data_type {
        DataType::Simple(name) => {
            simple_type_name(name).ok_or_else(|| ConvertError::UnsupportedType {
                path: path.to_string(),
                name: name.clone(),
            })
        }
        DataType::Complex(ComplexType::Struct(inner)) => render_struct(inner, path),
        DataType::Complex(ComplexType::Array {
            element_type,
            contains_null,
        }) => Ok(format!(
            "ArrayType({},{})",
            render_type(element_type, &format!("{}/elementType", path))?,
            contains_null
        )),
        DataType::Complex(ComplexType::Map {
            key_type,
            value_type,
            value_contains_null,
        }) => Ok(format!(
            "MapType({},{},{})",
            render_type(key_type, &format!("{}/keyType", path))?,
            render_type(value_type, &format!("{}/valueType", path))?,
            value_contains_null
        )),
    }
}

/// Map an atomic type name to its textual singleton (e.g. `long` -> `LongType`).
pub fn simple_type_name(name: &str) -> Option<String> {
    let rendered = match name {
        "string" => "StringType",
        "integer" => "IntegerType",
        "long" => "LongType",
        "short" => "ShortType",
        "byte" => "ByteType",
        "float" => "FloatType",
        "double" => "DoubleType",
        "boolean" => "BooleanType",
        "binary" => "BinaryType",
        "date" => "DateType",
        "timestamp" => "TimestampType",
        "timestamp_ntz" => "TimestampNTZType",
        "null" | "void" => "NullType",
        "calendarinterval" => "CalendarIntervalType",
        "decimal" => {
            let (precision, scale) = DEFAULT_DECIMAL;
            return Some(format!("DecimalType({},{})", precision, scale));
        }
        other => {
            let (precision, scale) = parse_decimal(other)?;
            return Some(format!("DecimalType({},{})", precision, scale));
        }
    };
    Some(rendered.to_string())
}

/// Parse `decimal(p,s)`.
fn parse_decimal(name: &str) -> Option<(u32, u32)> {
    let args = name.strip_prefix("decimal(")?.strip_suffix(')')?;
    let (precision, scale) = args.split_once(',')?;
    Some((precision.trim().parse().ok()?, scale.trim().parse().ok()?))
}
