//! # Quill API Server
//!
//! HTTP surface over the post store. Built as a library so integration
//! tests can assemble the app in-process with `actix_web::test`.

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod observability;
pub mod state;
pub mod telemetry;
