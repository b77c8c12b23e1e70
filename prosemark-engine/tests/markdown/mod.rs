//! Markdown format tests
//!
//! Tests for bidirectional Markdown ↔ tree conversion.

mod export;
mod roundtrip;
