//! `govdocs` - governance documentation portal
//!
//! This library provides the CLI, HTTP server, static site builder and page
//! layout for a docs portal rendered from a directory of MDX files.

pub mod cli;
pub mod config;
pub mod error;
pub mod observability;
pub mod server;
pub mod site;
