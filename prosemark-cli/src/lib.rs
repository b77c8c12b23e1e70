//! Library surface of the prosemark command line tool.
//!
//! The binary in `main.rs` stays thin: argument parsing and I/O live
//! there, while everything worth testing in isolation is collected in
//! [`pipeline`].

pub mod pipeline;
