//! Helpers shared by the builder and the serializers.

pub mod sanitize;

pub use sanitize::strip_control_chars;
