//! Run-scoped execution parameters
//!
//! The graph execution engine is an external collaborator: it schedules the
//! agent stages, enforces the recursion ceiling, and emits progress to the
//! caller. [`RunController`] is the contract boundary — it supplies the
//! values the engine must honor but implements no enforcement loop itself.

use serde::{Deserialize, Serialize};

use crate::error::{PropagationError, Result};

/// Default ceiling on graph recursion/iteration for one run
pub const DEFAULT_RECURSION_LIMIT: u32 = 100;

/// How the engine reports state between steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObservationMode {
    /// Emit the entire accumulated state after each step. Lets the caller
    /// read complete state trees without reconstructing them from deltas.
    FullSnapshot,
    /// Emit only the delta produced by the most recently completed stage.
    /// Used for live progress UIs.
    Incremental,
}

/// Parameters the engine reads for one run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphParams {
    /// Hard ceiling on graph recursion/iteration. Exceeding it is a fatal
    /// abort of the run, with the partial state preserved for diagnostics —
    /// not a retryable condition.
    pub recursion_limit: u32,
    /// Progress-reporting mode
    pub observation: ObservationMode,
}

/// Holds run-scoped configuration for the execution engine
///
/// The recursion limit is fixed at construction; `graph_params` only selects
/// the observation mode, so the bound is identical across calls on one
/// controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunController {
    recursion_limit: u32,
}

impl Default for RunController {
    fn default() -> Self {
        Self {
            recursion_limit: DEFAULT_RECURSION_LIMIT,
        }
    }
}

impl RunController {
    /// Create a controller with an explicit recursion limit.
    ///
    /// Fails with [`PropagationError::InvalidInput`] when the limit is zero:
    /// a zero bound would abort every run before its first stage.
    pub fn new(recursion_limit: u32) -> Result<Self> {
        if recursion_limit == 0 {
            return Err(PropagationError::InvalidInput(
                "recursion limit must be greater than 0".to_string(),
            ));
        }
        Ok(Self { recursion_limit })
    }

    /// The fixed recursion ceiling for runs under this controller
    pub fn recursion_limit(&self) -> u32 {
        self.recursion_limit
    }

    /// Parameters for one graph invocation.
    ///
    /// `incremental` selects [`ObservationMode::Incremental`] (per-node
    /// deltas for progress tracking); otherwise the engine emits full
    /// snapshots.
    pub fn graph_params(&self, incremental: bool) -> GraphParams {
        let observation = if incremental {
            ObservationMode::Incremental
        } else {
            ObservationMode::FullSnapshot
        };
        GraphParams {
            recursion_limit: self.recursion_limit,
            observation,
        }
    }
}
