//! Command implementations for the CLI
//!
//! - serve: Start the HTTP server
//! - estimate: Print a cost estimate
//! - render: Render images from a local photo
//! - config: Configuration display and validation

pub mod config;
pub mod estimate;
pub mod render;
pub mod serve;
