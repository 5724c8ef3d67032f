//! # lowtide
//!
//! Reads an activity log, renders the activity dashboard and prints the
//! quietest days, hours and (day, hour) slots as release window candidates.
//!
//! The binary in `main.rs` only parses arguments, loads configuration and
//! sets up logging; the pipeline itself lives in [`app`] so it can be driven
//! from tests with any writer.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod app;
pub mod error;
pub mod report;

pub use app::{run, RunOutcome};
pub use error::{AppError, AppResult};
pub use report::Reporter;
