//! Core types and trait definitions for the Muster recruiting pipeline.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it. It owns the recruit entity rules, the
//! [`store::RecruitStore`] abstraction, an in-memory backend, and the
//! read-only [`aggregate::PipelineAggregator`].

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod aggregate;
pub mod contact;
pub mod error;
pub mod memory;
pub mod recruit;
pub mod stage;
pub mod store;
pub mod template;

pub use error::{Error, Result};
