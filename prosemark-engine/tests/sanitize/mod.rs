//! Sanitizer integration tests.
//!
//! `policy` exercises the allow-list surface through the public facade,
//! `backends` drives the two `Sanitizer` implementations directly and
//! checks that they agree wherever both can run.

mod policy;
