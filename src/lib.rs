//! glcli - terminal dashboard for GitLab pipelines, jobs and merge requests
//!
//! Layers, from the bottom up:
//! - [`model`]: entities and status value objects
//! - [`gitlab`]: REST client and multi-project aggregation
//! - [`screens`]: per-view state machines
//! - [`app`]: reducer, command executor and event loop
//! - [`tui`]: Ratatui rendering

pub mod app;
pub mod config;
pub mod gitlab;
pub mod input;
pub mod logging;
pub mod model;
pub mod screens;
pub mod tui;
