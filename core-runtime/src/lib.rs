//! # Core Runtime Module
//!
//! Provides foundational runtime infrastructure shared by the drive client
//! hosts:
//! - Logging and tracing infrastructure
//! - Configuration loading (YAML file or environment)
//!
//! ## Overview
//!
//! This crate establishes the logging conventions and configuration shape
//! used by every binary in the workspace. It has no knowledge of the Graph
//! API itself.

pub mod config;
pub mod error;
pub mod logging;

pub use config::DriveConfig;
pub use error::{Error, Result};
