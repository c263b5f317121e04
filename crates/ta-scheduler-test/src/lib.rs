//! Shared test fixtures for TA scheduler crates.
//!
//! Depends only on `ta-scheduler-core` so every other crate can take it as a
//! dev-dependency without cycles.
//!
//! - [`scenario`] - small hand-written timetables with known properties
//! - [`generator`] - seeded random timetables for property-style tests
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! ta-scheduler-test = { workspace = true }
//! ```

pub mod generator;
pub mod scenario;

pub use generator::{generate_timetable, GeneratorConfig};
pub use scenario::{five_shift_timetable, shift, time, unstaffable_timetable};
