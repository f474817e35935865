//! Intermediate representations for texdown documents.
//!
//! [`token`] is the flat markdown-it style stream the builder consumes;
//! [`nodes`] is the styled block/run tree it produces and the serializers
//! read.

pub mod nodes;
pub mod token;
