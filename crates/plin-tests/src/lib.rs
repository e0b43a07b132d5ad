//! Integration tests for the plin-rs crates.
//!
//! This crate contains end-to-end tests that verify the interaction
//! between the buffer, transform and resampling crates: known-answer
//! resizes, rotation placement, and the byte-for-byte equivalence
//! guarantees (serial vs parallel, cached vs direct).
