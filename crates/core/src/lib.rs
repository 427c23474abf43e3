//! Core library for palmblog
//!
//! This crate implements the **Functional Core** of the palmblog application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! - **`palmblog_core`** (this crate): Pure transformation functions with zero I/O
//! - **`palmblog`**: HTTP access to the issue tracker and the CLI views (the Imperative Shell)
//!
//! Blog posts are GitHub issues. The shell fetches raw issues, this crate turns
//! them into [`post::BlogPost`] values and the list / detail view models built
//! from them.
//!
//! # Module Organization
//!
//! - [`issue`]: The issue schema and decoding of tracker payloads
//! - [`post`]: Issue to blog post transformation and cover image extraction
//! - [`excerpt`]: Plain-text previews of post bodies
//! - [`date`]: Human-readable post dates
//! - [`policy`]: Failure and malformed-date policies
//! - [`endpoints`]: Issue tracker URLs
//! - [`listing`]: Paginated list and detail view models
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use palmblog_core::issue::parse_issue_list;
//! use palmblog_core::post::transform_issues;
//!
//! let batch = parse_issue_list(payload)?;
//! let posts = transform_issues(batch.issues);
//!
//! assert!(posts.iter().all(|p| p.cover_image.is_none() || p.body.is_some()));
//! ```

pub mod date;
pub mod endpoints;
pub mod excerpt;
pub mod issue;
pub mod listing;
pub mod policy;
pub mod post;
