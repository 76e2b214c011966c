//! Core types and definitions for the Catloop Sky AR tracker.
//!
//! This crate defines the vocabulary shared across all other crates:
//! catalog records, missions, commands, per-frame snapshots, events,
//! ECS components, configuration and constants.
//! It has no dependency on any runtime, sensor or rendering framework.

pub mod catalog;
pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod mission;
pub mod state;
pub mod types;
