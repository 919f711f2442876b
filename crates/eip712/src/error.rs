//! Typed data encoding errors.

/// An error that aborts a typed data encoding call.
///
/// `depth` is the struct nesting level the failure happened at, `0` being the root type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The requested root type is not defined in the schema.
    #[error("type `{0}` is not defined in the schema")]
    UnknownRootType(String),
    /// The field is declared with a type the encoder refuses to handle (arrays).
    #[error("field `{field}` of `{type_name}` has unsupported type `{field_type}` at depth {depth}")]
    UnsupportedFieldType {
        /// The struct type declaring the field.
        type_name: String,
        /// The field name.
        field: String,
        /// The declared field type.
        field_type: String,
        /// The nesting depth.
        depth: usize,
    },
    /// The field type is neither a struct of the schema nor a known primitive.
    #[error("field `{field}` of `{type_name}` has unknown type `{field_type}` at depth {depth}")]
    UnknownFieldType {
        /// The struct type declaring the field.
        type_name: String,
        /// The field name.
        field: String,
        /// The declared field type.
        field_type: String,
        /// The nesting depth.
        depth: usize,
    },
    /// The field value does not match the shape of its declared type.
    #[error("malformed value of field `{field}` of `{type_name}` at depth {depth}: {reason}")]
    MalformedValue {
        /// The struct type declaring the field.
        type_name: String,
        /// The field name.
        field: String,
        /// The nesting depth.
        depth: usize,
        /// What exactly is wrong with the value.
        reason: ValueError,
    },
    /// A struct value is nested inside a value of the same struct type.
    #[error("struct `{type_name}` is nested inside itself at depth {depth}")]
    CyclicData {
        /// The re-entered struct type.
        type_name: String,
        /// The nesting depth of the re-entry.
        depth: usize,
    },
    /// The typed data document is not valid JSON or has the wrong layout.
    #[error("invalid typed data json: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Construct [`Error::MalformedValue`].
    pub(crate) fn malformed(type_name: &str, field: &str, depth: usize, reason: ValueError) -> Self {
        Self::MalformedValue {
            type_name: type_name.to_owned(),
            field: field.to_owned(),
            depth,
            reason,
        }
    }
}

/// The ways a single value can fail to match its declared type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueError {
    /// The field has no value.
    #[error("missing field")]
    MissingField,
    /// The value is of a different kind.
    #[error("expected {expected}")]
    TypeMismatch {
        /// The kind of value the declared type calls for.
        expected: &'static str,
    },
    /// The integer does not fit into the declared bit width.
    #[error("integer out of range")]
    OutOfRange,
    /// The fixed-size byte array has the wrong length.
    #[error("expected {expected} bytes, got {actual}")]
    InvalidLength {
        /// The declared length.
        expected: usize,
        /// The actual length.
        actual: usize,
    },
    /// The hex encoding is broken.
    #[error("invalid hex")]
    InvalidHex,
    /// The number can not be parsed.
    #[error("invalid number")]
    InvalidNumber,
}
