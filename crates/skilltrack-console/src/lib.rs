//! # `skilltrack-console`: Administrative Console for skill-tracker
//!
//! A command-line front end for the skill-tracker REST service. It covers
//! account management and the per-user skills list, and renders every
//! answer into a timestamped output log.
//!
//! ## Highlights
//!
//! - **Basic Auth**: Credentials are attached to every request except
//!   registration, and only when both username and password are set.
//! - **Tolerant Skill Ids**: Skill identifiers are recovered through
//!   [`oidkit::normalize`] whatever shape the service serialized them in.
//! - **Auto Refresh**: `watch` keeps the skills list current with a single
//!   cancellable poller.
//!
//! ## Usage
//!
//! ```bash
//! SKILLTRACK_USERNAME=alice SKILLTRACK_PASSWORD=secret skilltrack login
//! skilltrack skills --user-id 507f1f77bcf86cd799439011
//! ```
//!
//! ## Module Overview
//!
//! - [`client`] - REST client and response decoding.
//! - [`config`] - CLI arguments and validated runtime configuration.
//! - [`console`] - Console state and command handlers.
//! - [`refresh`] - Periodic skills refresh.
//! - [`render`] - Output log, status line and skills table.

pub mod client;
pub mod config;
pub mod console;
pub mod error;
pub mod model;
pub mod refresh;
pub mod render;
pub mod telemetry;
