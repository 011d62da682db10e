// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core error types for robomsg.
//!
//! Provides error types for:
//! - Decoding (truncated buffers, malformed length prefixes, bad strings)
//! - Encoding (missing fields, kind mismatches, fixed-width mismatches)
//! - Schema lookup and catalog loading

use thiserror::Error;

/// Errors that can occur while encoding, decoding or looking up messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Decode attempted to read past the end of the buffer
    #[error(
        "Truncated buffer: field '{field}' needs {requested} bytes at offset {offset}, but only {available} bytes remain"
    )]
    TruncatedBuffer {
        /// Field being decoded
        field: String,
        /// Requested bytes
        requested: usize,
        /// Available bytes
        available: usize,
        /// Offset of the read
        offset: usize,
    },

    /// A decoded length prefix points past the end of the buffer
    #[error(
        "Malformed length for field '{field}': {length} elements at offset {offset} exceed buffer (buffer length: {buffer_len})"
    )]
    MalformedLength {
        /// Field being decoded
        field: String,
        /// Decoded length
        length: usize,
        /// Offset right after the length prefix
        offset: usize,
        /// Buffer length
        buffer_len: usize,
    },

    /// Fixed-length field given a value of a different length
    #[error("Field '{field}' is fixed at {expected} elements, got {actual}")]
    FieldWidthMismatch {
        /// Field name
        field: String,
        /// Length declared by the schema
        expected: usize,
        /// Length of the value
        actual: usize,
    },

    /// Value variant does not match the field kind
    #[error("Field '{field}' expects {expected}, found {found}")]
    FieldTypeMismatch {
        /// Field name
        field: String,
        /// Kind declared by the schema
        expected: String,
        /// Kind of the value
        found: String,
    },

    /// Instance lacks a field the schema declares
    #[error("Missing field '{field}' in instance of '{type_name}'")]
    MissingField {
        /// Message type name
        type_name: String,
        /// Field name
        field: String,
    },

    /// Caller-supplied buffer cannot hold the encoded message
    #[error(
        "Buffer overflow: encoding needs {required} bytes at offset {offset}, buffer length is {buffer_len}"
    )]
    BufferOverflow {
        /// Bytes the message needs
        required: usize,
        /// Start offset
        offset: usize,
        /// Buffer length
        buffer_len: usize,
    },

    /// String field is not valid UTF-8
    #[error("Invalid string in field '{field}' at offset {offset}: {reason}")]
    InvalidString {
        /// Field name
        field: String,
        /// Offset of the string bytes
        offset: usize,
        /// UTF-8 error
        reason: String,
    },

    /// Type not found in registry
    #[error("Type not found: '{type_name}'")]
    TypeNotFound {
        /// Type name that was not found
        type_name: String,
    },

    /// Invalid schema or catalog entry
    #[error("Invalid schema '{schema_name}': {reason}")]
    InvalidSchema {
        /// Schema name or identifier
        schema_name: String,
        /// Validation error message
        reason: String,
    },

    /// Parse error in a catalog or input document
    #[error("Parse error in {context}: {message}")]
    Parse {
        /// What was being parsed
        context: String,
        /// Error message
        message: String,
    },
}

impl CodecError {
    /// Create a truncated buffer error.
    pub fn truncated(
        field: impl Into<String>,
        requested: usize,
        available: usize,
        offset: usize,
    ) -> Self {
        CodecError::TruncatedBuffer {
            field: field.into(),
            requested,
            available,
            offset,
        }
    }

    /// Create a malformed length error.
    pub fn malformed_length(
        field: impl Into<String>,
        length: usize,
        offset: usize,
        buffer_len: usize,
    ) -> Self {
        CodecError::MalformedLength {
            field: field.into(),
            length,
            offset,
            buffer_len,
        }
    }

    /// Create a fixed-width mismatch error.
    pub fn width_mismatch(field: impl Into<String>, expected: usize, actual: usize) -> Self {
        CodecError::FieldWidthMismatch {
            field: field.into(),
            expected,
            actual,
        }
    }

    /// Create a type mismatch error.
    pub fn type_mismatch(
        field: impl Into<String>,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        CodecError::FieldTypeMismatch {
            field: field.into(),
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Create a missing field error.
    pub fn missing_field(type_name: impl Into<String>, field: impl Into<String>) -> Self {
        CodecError::MissingField {
            type_name: type_name.into(),
            field: field.into(),
        }
    }

    /// Create a "type not found" error.
    pub fn type_not_found(type_name: impl Into<String>) -> Self {
        CodecError::TypeNotFound {
            type_name: type_name.into(),
        }
    }

    /// Create an invalid schema error.
    pub fn invalid_schema(schema_name: impl Into<String>, reason: impl Into<String>) -> Self {
        CodecError::InvalidSchema {
            schema_name: schema_name.into(),
            reason: reason.into(),
        }
    }

    /// Create a parse error.
    pub fn parse(context: impl Into<String>, message: impl Into<String>) -> Self {
        CodecError::Parse {
            context: context.into(),
            message: message.into(),
        }
    }

    /// Whether this error came from reading a buffer that ended early.
    pub fn is_truncation(&self) -> bool {
        matches!(
            self,
            CodecError::TruncatedBuffer { .. } | CodecError::MalformedLength { .. }
        )
    }

    /// Get structured fields for logging.
    pub fn log_fields(&self) -> Vec<(&'static str, String)> {
        match self {
            CodecError::TruncatedBuffer {
                field,
                requested,
                available,
                offset,
            } => vec![
                ("field", field.clone()),
                ("requested", requested.to_string()),
                ("available", available.to_string()),
                ("offset", offset.to_string()),
            ],
            CodecError::MalformedLength {
                field,
                length,
                offset,
                buffer_len,
            } => vec![
                ("field", field.clone()),
                ("length", length.to_string()),
                ("offset", offset.to_string()),
                ("buffer_len", buffer_len.to_string()),
            ],
            CodecError::FieldWidthMismatch {
                field,
                expected,
                actual,
            } => vec![
                ("field", field.clone()),
                ("expected", expected.to_string()),
                ("actual", actual.to_string()),
            ],
            CodecError::FieldTypeMismatch {
                field,
                expected,
                found,
            } => vec![
                ("field", field.clone()),
                ("expected", expected.clone()),
                ("found", found.clone()),
            ],
            CodecError::MissingField { type_name, field } => {
                vec![("type", type_name.clone()), ("field", field.clone())]
            }
            CodecError::BufferOverflow {
                required,
                offset,
                buffer_len,
            } => vec![
                ("required", required.to_string()),
                ("offset", offset.to_string()),
                ("buffer_len", buffer_len.to_string()),
            ],
            CodecError::InvalidString {
                field,
                offset,
                reason,
            } => vec![
                ("field", field.clone()),
                ("offset", offset.to_string()),
                ("reason", reason.clone()),
            ],
            CodecError::TypeNotFound { type_name } => vec![("type", type_name.clone())],
            CodecError::InvalidSchema {
                schema_name,
                reason,
            } => vec![("schema", schema_name.clone()), ("reason", reason.clone())],
            CodecError::Parse { context, message } => {
                vec![("context", context.clone()), ("message", message.clone())]
            }
        }
    }
}

/// Result type for robomsg operations.
pub type Result<T> = std::result::Result<T, CodecError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncated_error() {
        let err = CodecError::truncated("size", 4, 2, 17);
        assert!(err.is_truncation());
        assert_eq!(
            err.to_string(),
            "Truncated buffer: field 'size' needs 4 bytes at offset 17, but only 2 bytes remain"
        );
    }

    #[test]
    fn test_malformed_length_error() {
        let err = CodecError::malformed_length("data", 1000, 12, 19);
        assert!(err.is_truncation());
        assert_eq!(
            err.to_string(),
            "Malformed length for field 'data': 1000 elements at offset 12 exceed buffer (buffer length: 19)"
        );
    }

    #[test]
    fn test_width_mismatch_error() {
        let err = CodecError::width_mismatch("reserved", 8, 3);
        assert!(!err.is_truncation());
        assert_eq!(
            err.to_string(),
            "Field 'reserved' is fixed at 8 elements, got 3"
        );
    }

    #[test]
    fn test_type_mismatch_error() {
        let err = CodecError::type_mismatch("size", "uint32", "string");
        assert_eq!(err.to_string(), "Field 'size' expects uint32, found string");
    }

    #[test]
    fn test_type_not_found_error() {
        let err = CodecError::type_not_found("UnknownType");
        assert_eq!(err.to_string(), "Type not found: 'UnknownType'");
    }

    #[test]
    fn test_log_fields_truncated() {
        let err = CodecError::truncated("stamp", 8, 5, 0);
        let fields = err.log_fields();
        assert_eq!(fields.len(), 4);
        assert_eq!(fields[0], ("field", "stamp".to_string()));
        assert_eq!(fields[1], ("requested", "8".to_string()));
        assert_eq!(fields[2], ("available", "5".to_string()));
        assert_eq!(fields[3], ("offset", "0".to_string()));
    }

    #[test]
    fn test_log_fields_missing_field() {
        let err = CodecError::missing_field("hesai_lidar/PandarPacket", "size");
        let fields = err.log_fields();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].1, "hesai_lidar/PandarPacket");
        assert_eq!(fields[1].1, "size");
    }

    #[test]
    fn test_error_clone() {
        let err1 = CodecError::parse("catalog", "expected table");
        let err2 = err1.clone();
        assert_eq!(err1, err2);
        assert_eq!(err2.to_string(), "Parse error in catalog: expected table");
    }
}
