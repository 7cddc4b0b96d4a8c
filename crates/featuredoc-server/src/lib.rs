//! HTTP service converting Gherkin `.feature` files into DOCX documents.
//!
//! # Overview
//!
//! Clients upload a single feature file as a multipart form. The service
//! extracts its scenarios, renders them as a table in a DOCX document, keeps
//! the document in a short-lived in-memory cache, and answers with a download
//! reference. Documents expire after a configurable time to live.
//!
//! - `GET /health`: liveness and version
//! - `POST /upload`: convert a feature file, returning a file id
//! - `POST /preview`: return the extracted scenarios as JSON
//! - `GET /download/{file_id}`: fetch a generated document
//!
//! # Configuration
//!
//! The server is configured via environment variables prefixed with
//! `FEATUREDOC_` (see [`config::ServerConfig`]), overridable from the command
//! line.
//!
//! # Example
//!
//! ```ignore
//! use featuredoc_server::config::ServerConfig;
//! use featuredoc_server::server::{AppState, build_router};
//!
//! let config = ServerConfig::from_env()?;
//! let router = build_router(AppState::new(config));
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod server;
pub mod upload;
