//! Core types and trait definitions for the Cortex study system.
//!
//! This crate is deliberately free of HTTP and database dependencies. It holds
//! the progression engine's pure parts: spaced-repetition scheduling, next-topic
//! selection, and the mastery graph state machine. Storage backends and content
//! generators plug in through the traits in [`store`] and [`collab`].

pub mod baseline;
pub mod branching;
pub mod challenge;
pub mod collab;
pub mod error;
pub mod label;
pub mod mastery;
pub mod metrics;
pub mod progress;
pub mod roadmap;
pub mod schedule;
pub mod selector;
pub mod store;
pub mod topic;

pub use error::{Error, Result};
