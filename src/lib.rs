//! oppfinder library
//!
//! Discovery pipeline for funding/tender opportunities backed by a
//! search-grounded generative model, plus the terminal UI driving it.

pub mod config;
pub mod discover;
pub mod event;
pub mod export;
pub mod llm;
pub mod logging;
pub mod prompt;
pub mod tui;
