//! Self-contained JSON document model with parser and serializer.

pub mod parser;
pub mod serializer;
pub mod value;

mod serde_impl;

pub use parser::{parse, ParseError, MAX_DEPTH};
pub use serializer::{to_string, to_vec, SerializeError};
pub use value::{Array, Object, TypeMismatch, Value, ValueKind};
