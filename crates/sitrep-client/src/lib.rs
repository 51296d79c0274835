//! # sitrep-client
//!
//! HTTP clients and seams for the two upstream services:
//! - [`DocumentSource`]: where the situation page comes from
//!   ([`ConfluenceClient`], or [`FileSource`] for exported pages)
//! - [`IssueTracker`]: stored-query search and chunked key lookup
//!   ([`JiraClient`])
//!
//! Every call is awaited by the caller in sequence; nothing here spawns.

mod confluence;
mod error;
mod file;
mod http;
mod jira;
mod source;
mod tracker;

pub use confluence::ConfluenceClient;
pub use error::ClientError;
pub use file::FileSource;
pub use jira::JiraClient;
pub use source::{DocumentSource, SourceDocument};
pub use tracker::{BatchLookup, IssueTracker, key_query};
