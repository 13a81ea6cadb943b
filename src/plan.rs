//! Operation plans and script generation.
//!
//! A [`Plan`] is an immutable, ordered sequence of atomic [`Operation`]s
//! derived from a [`Selection`]. Building a plan is pure and deterministic:
//! the same selection always yields a byte-identical plan, ordered by
//! category (removal, privacy, performance) and then catalog declaration
//! order. Every plan is bracketed by a start and an end banner operation, so
//! a plan is never empty even for an empty selection.

use crate::{Selection, Tweak, TweakCategory};
use serde::{Deserialize, Serialize};

/// What kind of line(s) an operation contributes to the generated script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpKind {
    /// A framing banner (always first and last in a plan).
    Banner,
    /// A host command derived from a catalog template.
    Command,
    /// A timed pause with no output of its own.
    Pause,
}

/// One atomic, labeled unit within a plan.
///
/// The `command_text` is an opaque instruction string as far as the engine
/// is concerned; simulated execution only ever uses `label`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    /// Stable identifier (catalog name, or `startBanner`/`endBanner`).
    pub id: String,
    /// Human-readable label used for status lines and simulated output.
    pub label: String,
    /// Catalog category; banners and pauses have none.
    pub category: Option<TweakCategory>,
    /// The command lines this operation contributes to the script.
    pub command_text: String,
    /// Operation kind.
    pub kind: OpKind,
}

impl Operation {
    fn from_tweak(tweak: Tweak) -> Self {
        Self {
            id: tweak.name().to_string(),
            label: tweak.display_name().to_string(),
            category: Some(tweak.category()),
            command_text: tweak.command_text().to_string(),
            kind: OpKind::Command,
        }
    }

    /// A pause operation of the given length.
    ///
    /// In a generated script this becomes a `Start-Sleep` line; in simulated
    /// execution it contributes a delay and no output.
    pub fn pause(seconds: u64) -> Self {
        Self {
            id: format!("pause{seconds}s"),
            label: "Pausing".to_string(),
            category: None,
            command_text: format!("Start-Sleep -Seconds {seconds}"),
            kind: OpKind::Pause,
        }
    }

    fn start_banner() -> Self {
        Self {
            id: "startBanner".to_string(),
            label: "Starting System Optimization".to_string(),
            category: None,
            command_text: concat!(
                "$ProgressPreference = 'SilentlyContinue'\n",
                "Write-Host 'Starting System Optimization...' -ForegroundColor Cyan\n",
                "Start-Sleep -Seconds 1"
            )
            .to_string(),
            kind: OpKind::Banner,
        }
    }

    fn end_banner() -> Self {
        Self {
            id: "endBanner".to_string(),
            label: "Operation Completed Successfully".to_string(),
            category: None,
            command_text: concat!(
                "Start-Sleep -Seconds 1\n",
                "Write-Host '----------------------------------------'\n",
                "Write-Host 'Operation Completed Successfully.' -ForegroundColor Green\n",
                "Write-Host 'Some changes may require a system restart.' -ForegroundColor Yellow"
            )
            .to_string(),
            kind: OpKind::Banner,
        }
    }
}

/// An immutable, ordered sequence of operations.
///
/// # Example
///
/// ```rust
/// use tuneup_engine::{Plan, Selection, Tweak};
///
/// let mut selection = Selection::new();
/// selection.enable(Tweak::RemoveOneDrive);
/// selection.enable(Tweak::DisableTelemetry);
///
/// let plan = Plan::build(&selection);
/// // startBanner, removeOneDrive, disableTelemetry, endBanner
/// assert_eq!(plan.operations().len(), 4);
///
/// let script = plan.render_script();
/// assert!(script.contains("Removing OneDrive"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    operations: Vec<Operation>,
}

impl Plan {
    /// Build a plan from a selection.
    ///
    /// Pure function: no I/O, no side effects. Enabled options are emitted
    /// one operation each, grouped by category in the fixed order removal,
    /// privacy, performance, with declaration order within each category.
    pub fn build(selection: &Selection) -> Self {
        let mut ops = Vec::with_capacity(selection.len());
        for category in TweakCategory::ORDERED {
            for tweak in Tweak::all().filter(|t| t.category() == category) {
                if selection.is_enabled(tweak) {
                    ops.push(Operation::from_tweak(tweak));
                }
            }
        }
        Self::from_operations(ops)
    }

    /// Assemble a plan from caller-provided operations.
    ///
    /// The given operations are bracketed with the start and end banner
    /// operations, preserving the invariant that a plan is never empty.
    pub fn from_operations(operations: Vec<Operation>) -> Self {
        let mut ops = Vec::with_capacity(operations.len() + 2);
        ops.push(Operation::start_banner());
        ops.extend(operations);
        ops.push(Operation::end_banner());
        Self { operations: ops }
    }

    /// The operations in execution order.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Render the plan as a line-oriented PowerShell script.
    ///
    /// The format is stable: banner lines frame the script, and each command
    /// operation contributes a status line followed by its template lines.
    /// Replaying the same plan always produces the same script, making the
    /// artifact diffable independent of host state.
    pub fn render_script(&self) -> String {
        let mut script = String::new();
        for op in &self.operations {
            match op.kind {
                OpKind::Banner | OpKind::Pause => {
                    script.push_str(&op.command_text);
                    script.push('\n');
                }
                OpKind::Command => {
                    script.push_str(&format!("Write-Host '{}...'\n", op.label));
                    script.push_str(&op.command_text);
                    script.push('\n');
                }
            }
        }
        script
    }
}
