//! Schema Literal Converter
//!
//! Converts the textual rendering of a nested columnar schema into a literal
//! expression another runtime can evaluate.
//!
//! # Example
//!
//! ```
//! use schema_literal::convert_schema;
//!
//! let text = "StructType(List(StructField(age,IntegerType,true),StructField(tags,ArrayType(StringType,true),false)))";
//! let literal = convert_schema(text);
//!
//! assert_eq!(
//!     literal,
//!     r#"StructType([StructField("age",IntegerType(),True),StructField("tags",ArrayType(StringType(),True),False)])"#
//! );
//! ```
//!
//! # Passes
//!
//! | Stage | Source | Target |
//! |-------|--------|--------|
//! | `containers` | `List(a,b)` | `[a,b]` |
//! | `booleans` | `,true)` | `,True)` |
//! | `types` | `,IntegerType,True` | `,IntegerType(),True` |
//! | `fields` | `StructField(age,` | `StructField("age",` |
//!
//! Passes run in this order and never fail. Input they do not recognize is
//! passed through unchanged, so callers should treat the output as
//! best-effort and verify it where it is evaluated.
//!
//! # Stored documents
//!
//! Schemas stored as JSON can be loaded, checked and rendered to the textual
//! form first:
//!
//! ```
//! use schema_literal::{convert_schema, load_document_str, render_document};
//!
//! let doc = load_document_str(
//!     r#"{"type":"struct","fields":[{"name":"id","type":"long","nullable":false,"metadata":{}}]}"#,
//! ).unwrap();
//! let text = render_document(&doc).unwrap();
//! assert_eq!(text, "StructType(List(StructField(id,LongType,false)))");
//! assert_eq!(convert_schema(&text), r#"StructType([StructField("id",LongType(),False)])"#);
//! ```

mod brackets;
mod document;
mod error;
mod loader;
mod pipeline;
mod tokens;
mod types;

pub use brackets::{find_matching_close, rewrite_containers, BracketStack};
pub use document::{
    check_document, parse_document, render_document, render_schema, simple_type_name,
    ComplexType, DataType, StructField, StructType,
};
pub use error::{ConvertError, SchemaError};
pub use loader::{is_url, load_document, load_document_auto, load_document_str};
pub use pipeline::{convert_schema, split_fields, Pipeline};
pub use tokens::TokenPatterns;
pub use types::{Grammar, Stage};

#[cfg(feature = "remote")]
pub use loader::load_document_url;
