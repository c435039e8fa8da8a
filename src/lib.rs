//! Twinterest - timeline-interest survey service.
//!
//! Walks authenticated Twitter users through a fixed sequence of questions,
//! each built over an externally-fetched timeline, and records their
//! per-tweet selections.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
