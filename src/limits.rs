//! Resource limits for JSON parsing.
//!
//! The grammar itself places no bound on nesting or size; these limits bound
//! stack usage and memory when parsing untrusted input. Each limit trips a
//! distinct [`Error`](crate::Error) variant.

/// Resource limits applied by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum total input size in bytes
    pub max_input_size: u64,
    /// Maximum nesting depth for arrays/objects
    pub max_nesting_depth: u64,
    /// Maximum decoded string length in bytes
    pub max_string_length: u64,
    /// Maximum number of members in an object literal, duplicate keys included
    pub max_object_fields: u64,
    /// Maximum number of elements in an array
    pub max_array_length: u64,
}

impl Limits {
    /// Default limits: bounded nesting, everything else unbounded.
    pub const fn standard() -> Self {
        Self {
            max_input_size: u64::MAX,
            max_nesting_depth: 512,
            max_string_length: u64::MAX,
            max_object_fields: u64::MAX,
            max_array_length: u64::MAX,
        }
    }

    /// Tight limits for untrusted input.
    pub const fn strict() -> Self {
        Self {
            max_input_size: 1024 * 1024,  // 1 MiB
            max_nesting_depth: 32,        // 32 levels
            max_string_length: 64 * 1024, // 64 KiB
            max_object_fields: 1024,      // 1024 fields
            max_array_length: 10_000,     // 10,000 elements
        }
    }

    /// Same limits with a different nesting depth.
    pub const fn with_max_nesting_depth(mut self, depth: u64) -> Self {
        self.max_nesting_depth = depth;
        self
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self::standard()
    }
}
