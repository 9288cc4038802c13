//! State initialization and propagation for a multi-agent analysis graph
//!
//! This crate is the state layer under a directed execution graph in which
//! independent agent stages (market, fundamentals, sentiment, news, bull/bear
//! debaters, risk analysts) read and write a shared, append-only analysis
//! state across bounded iterations. It provides:
//!
//! - **State seeding**: [`AnalysisState::seed`] builds the initial state for
//!   one run from a target, a trade date, and optional position context
//! - **Debate accumulators**: [`InvestDebateState`] (bull/bear) and
//!   [`RiskDebateState`] (risky/safe/neutral) with append-only histories and
//!   turn counters
//! - **Write-once reports**: [`AnalysisState::write_report`] fills each
//!   analyst report field at most once
//! - **Run bounds & observation**: [`RunController`] supplies the recursion
//!   ceiling and the snapshot-vs-delta progress mode the engine enforces
//!
//! The graph execution engine itself — node scheduling, edge routing, bound
//! enforcement, progress emission — is an external collaborator. So are the
//! agent implementations and any persistence. This crate performs no I/O.
//!
//! # Example
//!
//! ```
//! use agent_propagation::{
//!     AnalysisState, InvestRole, ReportField, RiskRole, RunController,
//! };
//!
//! # fn main() -> agent_propagation::Result<()> {
//! let controller = RunController::default();
//! let params = controller.graph_params(false);
//! assert_eq!(params.recursion_limit, 100);
//!
//! let mut state = AnalysisState::seed("AAPL", "2024-06-01", None)?;
//! state.write_report(ReportField::Market, "RSI oversold")?;
//! state.investment_debate.append(InvestRole::Bull, "momentum favors entry");
//! state.risk_debate.append(RiskRole::Safe, "size the position down");
//!
//! assert_eq!(state.investment_debate.count, 1);
//! assert_eq!(state.risk_debate.count, 1);
//! # Ok(())
//! # }
//! ```

pub mod controller;
pub mod debate;
pub mod error;
pub mod state;

// Re-export main types for convenience
pub use controller::{DEFAULT_RECURSION_LIMIT, GraphParams, ObservationMode, RunController};
pub use debate::{InvestDebateState, InvestRole, RiskDebateState, RiskRole};
pub use error::{PropagationError, Result};
pub use state::{AnalysisState, HoldingInfo, HoldingInput, ReportField, SeedOptions, TradeDate};
