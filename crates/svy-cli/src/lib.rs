//! Command-line front end for the survey explorer.
//!
//! The binary is a thin wrapper: argument parsing lives in [`cli`], each
//! subcommand in [`commands`] returns its rendered output, and [`render`]
//! turns analysis results into terminal tables.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod render;
