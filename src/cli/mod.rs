//! CLI operation mode handlers.
//!
//! This module contains the implementations for the operation modes:
//! - [`tokens`]: Prompt for and persist API credentials
//! - [`generate`]: Pick a pull request (or take an explicit number) and
//!   generate a slide deck
//! - [`panel`]: Browse pull requests grouped by state before generating
//!
//! The masked secret prompt shared by these modes is in [`prompt`].

pub mod generate;
pub mod panel;
pub mod prompt;
pub mod tokens;
