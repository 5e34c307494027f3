//! Intermediate Representation (IR) for chapel documents.
//!
//! This module defines a format-agnostic representation of a document,
//! produced by the markdown lexer and consumed by the HTML, text and tag
//! serializers.

pub mod events;
pub mod nodes;
