//! HTML format tests
//!
//! Tests for bidirectional HTML ↔ tree conversion.

mod import;
