//! MCP servers for Jira and Confluence.
//!
//! Both servers talk either to Atlassian's REST APIs or to a custom REST API
//! and always answer with the canonical entities in [`model`].

pub mod adf;
pub mod config;
pub mod confluence;
pub mod error;
pub mod http;
pub mod jira;
pub mod model;
pub mod normalize;
pub mod query;
pub mod server;
pub mod tools;

pub use config::{Backend, Config, Product};
pub use error::{ConfigError, Error, Result};
