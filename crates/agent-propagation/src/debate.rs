//! Debate accumulator states
//!
//! Two debate variants run inside an analysis graph: the two-sided
//! bull/bear investment debate and the three-sided risk debate. Both are
//! append-only accumulators handed from stage to stage by the execution
//! engine; a stage owns the state exclusively for the duration of its turn.
//!
//! Neither variant decides when a debate ends. Termination (max turns,
//! convergence) is the engine's policy.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::PropagationError;

/// Separator placed between turns in a debate history
const TURN_SEPARATOR: char = '\n';

fn push_turn(history: &mut String, text: &str) {
    if !history.is_empty() {
        history.push(TURN_SEPARATOR);
    }
    history.push_str(text);
}

/// Side of the investment debate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvestRole {
    /// Argues for entering or holding the position
    Bull,
    /// Argues against the position
    Bear,
}

impl fmt::Display for InvestRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bull => write!(f, "bull"),
            Self::Bear => write!(f, "bear"),
        }
    }
}

impl FromStr for InvestRole {
    type Err = PropagationError;

    /// Parse a role name coming from the engine's stage wiring.
    ///
    /// Unrecognized names are a bug in that wiring, not recoverable here.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bull" => Ok(Self::Bull),
            "bear" => Ok(Self::Bear),
            other => Err(PropagationError::InvalidSide(other.to_string())),
        }
    }
}

/// Role in the three-sided risk debate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskRole {
    /// Risk-seeking analyst
    Risky,
    /// Risk-averse analyst
    Safe,
    /// Risk-neutral analyst
    Neutral,
}

impl fmt::Display for RiskRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Risky => write!(f, "risky"),
            Self::Safe => write!(f, "safe"),
            Self::Neutral => write!(f, "neutral"),
        }
    }
}

impl FromStr for RiskRole {
    type Err = PropagationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "risky" | "aggressive" => Ok(Self::Risky),
            "safe" | "conservative" => Ok(Self::Safe),
            "neutral" => Ok(Self::Neutral),
            other => Err(PropagationError::InvalidSide(other.to_string())),
        }
    }
}

/// Accumulator for the bull/bear investment debate
///
/// `history` holds every turn oldest-first, never truncated or reordered.
/// `current_response` is the most recent turn only, overwritten each call.
/// `count` increments by exactly one per turn regardless of side, so two
/// `append` calls with identical arguments record two distinct turns.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InvestDebateState {
    /// All turns from both sides, oldest first
    pub history: String,
    /// Turns contributed by the bull side only
    pub bull_history: String,
    /// Turns contributed by the bear side only
    pub bear_history: String,
    /// Most recent turn's raw output
    pub current_response: String,
    /// Research manager's ruling once the debate concludes; empty until then
    pub judge_decision: String,
    /// Completed turns across both sides
    pub count: u32,
}

impl InvestDebateState {
    /// Create an empty debate state
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one turn for `role`.
    ///
    /// Appends to the shared history and the side's own history, overwrites
    /// `current_response`, and increments `count`. Callers must serialize
    /// concurrent appends to the same debate; `&mut self` enforces that
    /// within safe Rust.
    pub fn append(&mut self, role: InvestRole, text: &str) {
        push_turn(&mut self.history, text);
        match role {
            InvestRole::Bull => push_turn(&mut self.bull_history, text),
            InvestRole::Bear => push_turn(&mut self.bear_history, text),
        }
        self.current_response = text.to_string();
        self.count += 1;
        debug!(side = %role, turn = self.count, "investment debate turn recorded");
    }
}

/// Accumulator for the three-sided risk debate
///
/// Same shape as [`InvestDebateState`] but with one current-response slot
/// per role. A turn overwrites only its own role's slot; the other two are
/// untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RiskDebateState {
    /// All turns from all three roles, oldest first
    pub history: String,
    /// Turns contributed by the risk-seeking analyst only
    pub risky_history: String,
    /// Turns contributed by the risk-averse analyst only
    pub safe_history: String,
    /// Turns contributed by the risk-neutral analyst only
    pub neutral_history: String,
    /// Role that spoke most recently; `None` before the first turn
    pub latest_speaker: Option<RiskRole>,
    /// Most recent turn from the risk-seeking analyst
    pub current_risky: String,
    /// Most recent turn from the risk-averse analyst
    pub current_safe: String,
    /// Most recent turn from the risk-neutral analyst
    pub current_neutral: String,
    /// Risk judge's ruling once the debate concludes; empty until then
    pub judge_decision: String,
    /// Completed turns across all roles
    pub count: u32,
}

impl RiskDebateState {
    /// Create an empty debate state
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one turn for `role`, updating only that role's current slot.
    pub fn append(&mut self, role: RiskRole, text: &str) {
        push_turn(&mut self.history, text);
        match role {
            RiskRole::Risky => {
                push_turn(&mut self.risky_history, text);
                self.current_risky = text.to_string();
            }
            RiskRole::Safe => {
                push_turn(&mut self.safe_history, text);
                self.current_safe = text.to_string();
            }
            RiskRole::Neutral => {
                push_turn(&mut self.neutral_history, text);
                self.current_neutral = text.to_string();
            }
        }
        self.latest_speaker = Some(role);
        self.count += 1;
        debug!(side = %role, turn = self.count, "risk debate turn recorded");
    }

    /// Most recent turn for `role`, empty if the role has not spoken
    pub fn current_for(&self, role: RiskRole) -> &str {
        match role {
            RiskRole::Risky => &self.current_risky,
            RiskRole::Safe => &self.current_safe,
            RiskRole::Neutral => &self.current_neutral,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invest_debate_starts_empty() {
        let debate = InvestDebateState::new();
        assert!(debate.history.is_empty());
        assert!(debate.current_response.is_empty());
        assert!(debate.judge_decision.is_empty());
        assert_eq!(debate.count, 0);
    }

    #[test]
    fn test_invest_append_accumulates_oldest_first() {
        let mut debate = InvestDebateState::new();
        debate.append(InvestRole::Bull, "strong earnings momentum");
        debate.append(InvestRole::Bear, "valuation is stretched");

        assert_eq!(debate.history, "strong earnings momentum\nvaluation is stretched");
        assert_eq!(debate.bull_history, "strong earnings momentum");
        assert_eq!(debate.bear_history, "valuation is stretched");
        assert_eq!(debate.current_response, "valuation is stretched");
        assert_eq!(debate.count, 2);
    }

    #[test]
    fn test_invest_append_is_not_idempotent() {
        // Two identical calls are two distinct turns.
        let mut debate = InvestDebateState::new();
        debate.append(InvestRole::Bull, "buy");
        debate.append(InvestRole::Bull, "buy");

        assert_eq!(debate.count, 2);
        assert_eq!(debate.history, "buy\nbuy");
        assert_eq!(debate.bull_history, "buy\nbuy");
        assert_eq!(debate.history.matches("buy").count(), 2);
    }

    #[test]
    fn test_no_side_is_privileged_for_first_turn() {
        let mut bear_first = InvestDebateState::new();
        bear_first.append(InvestRole::Bear, "short it");
        assert_eq!(bear_first.count, 1);
        assert_eq!(bear_first.history, "short it");

        let mut neutral_first = RiskDebateState::new();
        neutral_first.append(RiskRole::Neutral, "balanced exposure");
        assert_eq!(neutral_first.count, 1);
        assert_eq!(neutral_first.latest_speaker, Some(RiskRole::Neutral));
    }

    #[test]
    fn test_risk_debate_three_roles_in_sequence() {
        let mut debate = RiskDebateState::new();
        debate.append(RiskRole::Risky, "a");
        debate.append(RiskRole::Safe, "b");
        debate.append(RiskRole::Neutral, "c");

        assert_eq!(debate.count, 3);
        assert_eq!(debate.history, "a\nb\nc");
        assert_eq!(debate.current_risky, "a");
        assert_eq!(debate.current_safe, "b");
        assert_eq!(debate.current_neutral, "c");
        assert_eq!(debate.latest_speaker, Some(RiskRole::Neutral));
    }

    #[test]
    fn test_risk_current_slots_are_independent() {
        let mut debate = RiskDebateState::new();
        debate.append(RiskRole::Risky, "lever up");
        debate.append(RiskRole::Safe, "trim the position");
        debate.append(RiskRole::Risky, "add on the dip");

        // Only the speaking role's slot moves; the others are untouched.
        assert_eq!(debate.current_risky, "add on the dip");
        assert_eq!(debate.current_safe, "trim the position");
        assert_eq!(debate.current_neutral, "");
        assert_eq!(debate.risky_history, "lever up\nadd on the dip");
        assert_eq!(debate.safe_history, "trim the position");
        assert_eq!(debate.count, 3);
    }

    #[test]
    fn test_count_equals_total_appends_any_mix() {
        let mut debate = RiskDebateState::new();
        for i in 0..7 {
            let role = match i % 3 {
                0 => RiskRole::Risky,
                1 => RiskRole::Safe,
                _ => RiskRole::Neutral,
            };
            debate.append(role, "turn");
        }
        assert_eq!(debate.count, 7);
    }

    #[test]
    fn test_current_for_matches_slots() {
        let mut debate = RiskDebateState::new();
        debate.append(RiskRole::Safe, "hedge");
        assert_eq!(debate.current_for(RiskRole::Safe), "hedge");
        assert_eq!(debate.current_for(RiskRole::Risky), "");
        assert_eq!(debate.current_for(RiskRole::Neutral), "");
    }

    #[test]
    fn test_invest_role_parsing() {
        assert_eq!("bull".parse::<InvestRole>().unwrap(), InvestRole::Bull);
        assert_eq!(" Bear ".parse::<InvestRole>().unwrap(), InvestRole::Bear);

        let err = "judge".parse::<InvestRole>().unwrap_err();
        assert!(matches!(err, PropagationError::InvalidSide(s) if s == "judge"));
    }

    #[test]
    fn test_risk_role_parsing_with_aliases() {
        assert_eq!("risky".parse::<RiskRole>().unwrap(), RiskRole::Risky);
        assert_eq!("aggressive".parse::<RiskRole>().unwrap(), RiskRole::Risky);
        assert_eq!("Conservative".parse::<RiskRole>().unwrap(), RiskRole::Safe);
        assert_eq!("neutral".parse::<RiskRole>().unwrap(), RiskRole::Neutral);

        assert!("bull".parse::<RiskRole>().is_err());
    }
}
