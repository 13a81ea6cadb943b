//! # tuneup-engine
//!
//! System maintenance orchestration: build ordered operation plans from
//! configuration toggles, execute them live through a script interpreter or
//! replay them deterministically, estimate progress for opaque tools, and
//! silently install catalog programs.
//!
//! ## Features
//!
//! - `Tweak` catalog of maintenance operations grouped by category
//! - `Selection` and `Plan` for turning toggles into an ordered, banner-
//!   bracketed operation sequence
//! - `Executor` running plans live (spawning the interpreter over a
//!   generated script) or simulated (deterministic replay), with at most
//!   one active run
//! - Elevation probing with an elevated-relaunch request path
//! - Synthetic progress estimation for tools that emit no percentage
//! - A download-and-silent-install pipeline with a built-in program catalog
//!
//! ## Example
//!
//! ```rust,no_run
//! use tuneup_engine::{ExecOptions, Executor, Plan, Selection, Tweak};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let mut selection = Selection::new();
//!     selection.enable(Tweak::RemoveOneDrive);
//!     selection.enable(Tweak::DisableTelemetry);
//!
//!     let plan = Plan::build(&selection);
//!     let executor = Executor::new();
//!     let result = executor
//!         .execute(
//!             &plan,
//!             ExecOptions::default(),
//!             |output| println!("{}", output.text),
//!             |progress| println!("{:.0}%", progress.percent),
//!         )
//!         .await;
//!     println!("{:?}", result);
//! }
//! ```

mod cancel;
mod elevation;
mod events;
mod exec;
pub mod install;
mod plan;
mod progress;
mod repair;
mod selection;
mod tweak;

pub use cancel::{cancel_pair, CancelHandle, CancelToken};
pub use elevation::{check_and_maybe_relaunch, ElevationProbe, ElevationStatus, HostElevation};
pub use events::{InstallStatus, OutputEvent, ProgressEvent, RunOutcome, RunResult};
pub use exec::{detect_mode, ExecError, ExecOptions, ExecutionMode, Executor};
pub use install::InstallError;
pub use plan::{OpKind, Operation, Plan};
pub use progress::{estimate, EstimatorOptions};
pub use repair::{default_phases, run_repair, RepairPhase};
pub use selection::Selection;
pub use tweak::{Tweak, TweakCategory};
