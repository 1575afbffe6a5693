//! Core library for the `stress` CLI.
//!
//! `stress` fires HTTP requests described by a targets file at a fixed rate or
//! with a fixed number of concurrent workers, records one result per request,
//! and renders reports from those results. The binary is the primary
//! interface; the modules below are its building blocks.
pub mod app;
pub mod args;
pub mod config;
pub mod entry;
pub mod error;
pub mod http;
pub mod report;
pub mod results;
pub mod targets;

mod system;
