//! Silent installation of catalog programs.
//!
//! This module provides a built-in catalog of installable programs and a
//! pipeline that downloads an installer, runs it silently, and reports
//! coarse status transitions along the way.
//!
//! # Example
//!
//! ```rust,no_run
//! use tuneup_engine::install::{install, programs, InstallOptions};
//!
//! # async fn example() -> Result<(), tuneup_engine::InstallError> {
//! for program in programs() {
//!     println!("{}: {}", program.name, program.description);
//! }
//!
//! let chrome = &programs()[0];
//! install(chrome, InstallOptions::default(), |status| {
//!     println!("{}", status.description());
//! })
//! .await?;
//! # Ok(())
//! # }
//! ```

mod catalog;
mod errors;
mod pipeline;

pub use catalog::{programs, InstallableProgram};
pub use errors::InstallError;
pub use pipeline::{install, InstallOptions};
