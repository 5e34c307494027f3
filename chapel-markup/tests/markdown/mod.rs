//! Markdown format tests
//!
//! Tests for the lexer (markup → IR) and the serializer (IR → markup).

mod export;
mod import;
