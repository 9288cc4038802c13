//! Shared analysis state for one graph run
//!
//! One [`AnalysisState`] exists per run. The execution engine owns it for the
//! run's duration and hands it to agent stages one at a time; stages read it,
//! append to the debate sub-states, or fill their report field, and hand it
//! back. Nothing here is ever reset mid-run: the state is monotonically
//! appended to, never rewound, so a cancelled run still leaves a valid,
//! readable partial state behind.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::debate::{InvestDebateState, RiskDebateState};
use crate::error::{PropagationError, Result};

/// Date formats accepted when coercing a trade date
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y%m%d", "%m/%d/%Y"];

/// A trade date coerced to a canonical calendar day
///
/// Accepts the common spellings the engine's callers use (`2024-06-01`,
/// `2024/06/01`, `20240601`, `06/01/2024`) and always renders back as ISO
/// `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeDate(NaiveDate);

impl TradeDate {
    /// The underlying calendar day
    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for TradeDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl From<NaiveDate> for TradeDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl FromStr for TradeDate {
    type Err = PropagationError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        for format in DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(s, format) {
                return Ok(Self(date));
            }
        }
        Err(PropagationError::InvalidInput(format!(
            "cannot coerce '{s}' to a trade date"
        )))
    }
}

/// Position context supplied by the caller at seed time
///
/// Both fields are optional on input. A holding only makes it into the run's
/// state when both are present and non-zero; partial data is treated as no
/// holding at all rather than half-injected.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct HoldingInput {
    /// Number of shares currently held
    pub shares: Option<f64>,
    /// Average cost per share
    pub cost_basis: Option<f64>,
}

impl HoldingInput {
    /// Resolve to a complete holding, or `None` if either field is missing
    /// or zero
    pub fn resolve(&self) -> Option<HoldingInfo> {
        match (self.shares, self.cost_basis) {
            (Some(shares), Some(cost_basis)) if shares != 0.0 && cost_basis != 0.0 => {
                Some(HoldingInfo { shares, cost_basis })
            }
            _ => None,
        }
    }
}

/// A complete, validated holding position carried on the run state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HoldingInfo {
    /// Number of shares currently held
    pub shares: f64,
    /// Average cost per share
    pub cost_basis: f64,
}

/// Optional context for seeding a run
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SeedOptions {
    /// Caller's current position in the target, if any
    pub holding: Option<HoldingInput>,
}

/// The write-once text fields of an [`AnalysisState`]
///
/// The four analyst reports feed the debates; the plan and decision fields
/// are filled by the downstream manager, trader, and risk-judge stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportField {
    Market,
    Fundamentals,
    Sentiment,
    News,
    InvestmentPlan,
    TraderPlan,
    FinalDecision,
}

impl ReportField {
    /// The state field name, for logs and error messages
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Market => "market_report",
            Self::Fundamentals => "fundamentals_report",
            Self::Sentiment => "sentiment_report",
            Self::News => "news_report",
            Self::InvestmentPlan => "investment_plan",
            Self::TraderPlan => "trader_plan",
            Self::FinalDecision => "final_decision",
        }
    }
}

/// Shared state for one analysis run
///
/// Built by [`AnalysisState::seed`] and then mutated additively by agent
/// stages under the engine's sequential scheduling. Concurrent mutation of
/// the same run's state must be serialized by the engine; `&mut self`
/// mutators make that a compile-time property within safe Rust. Independent
/// sub-states (the two debates) need no coordination between each other.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisState {
    /// Self-contained natural-language task description for downstream
    /// LLM-driven stages
    pub seed_message: String,
    /// Subject of the analysis, e.g. an instrument code
    pub target: String,
    /// Canonical ISO trade date
    pub trade_date: String,
    /// Caller's position in the target, when fully specified at seed time
    pub holding: Option<HoldingInfo>,
    /// Bull/bear investment debate accumulator
    pub investment_debate: InvestDebateState,
    /// Three-sided risk debate accumulator
    pub risk_debate: RiskDebateState,
    /// Market/technical analyst report
    pub market_report: String,
    /// Fundamentals analyst report
    pub fundamentals_report: String,
    /// Social-sentiment analyst report
    pub sentiment_report: String,
    /// News analyst report
    pub news_report: String,
    /// Research manager's plan synthesized from the investment debate
    pub investment_plan: String,
    /// Trader's proposed plan
    pub trader_plan: String,
    /// Risk judge's final trade decision
    pub final_decision: String,
}

impl AnalysisState {
    /// Seed the initial state for one run.
    ///
    /// Pure function of its inputs: no I/O, no globals. Fails with
    /// [`PropagationError::InvalidInput`] when `target` is empty or
    /// `trade_date` cannot be coerced to a calendar day.
    pub fn seed(target: &str, trade_date: &str, options: Option<&SeedOptions>) -> Result<Self> {
        let date: TradeDate = trade_date.parse()?;
        Self::seed_on(target, date, options)
    }

    /// Seed the initial state from an already-typed trade date.
    pub fn seed_on(
        target: &str,
        trade_date: impl Into<TradeDate>,
        options: Option<&SeedOptions>,
    ) -> Result<Self> {
        let target = target.trim();
        if target.is_empty() {
            return Err(PropagationError::InvalidInput(
                "target must not be empty".to_string(),
            ));
        }
        let trade_date = trade_date.into().to_string();

        let mut seed_message = format!(
            "Perform a comprehensive analysis of {target} for trading date {trade_date}."
        );

        let holding = options
            .and_then(|opts| opts.holding)
            .and_then(|input| input.resolve());
        if let Some(holding) = &holding {
            seed_message.push_str(&format!(
                "\n\nThe user currently holds {} shares of {} at a cost basis of {} per share. \
                 Weigh this position in the analysis and give a position-aware recommendation \
                 (hold, add, reduce, take profit, or stop loss).",
                holding.shares, target, holding.cost_basis
            ));
        }

        debug!(
            symbol = %target,
            %trade_date,
            has_holding = holding.is_some(),
            "seeded initial analysis state"
        );

        Ok(Self {
            seed_message,
            target: target.to_string(),
            trade_date,
            holding,
            investment_debate: InvestDebateState::new(),
            risk_debate: RiskDebateState::new(),
            market_report: String::new(),
            fundamentals_report: String::new(),
            sentiment_report: String::new(),
            news_report: String::new(),
            investment_plan: String::new(),
            trader_plan: String::new(),
            final_decision: String::new(),
        })
    }

    /// Write a report field exactly once.
    ///
    /// A second write to the same field is a
    /// [`PropagationError::ReportAlreadyWritten`]: it indicates two stages
    /// were wired to the same output, and silently overwriting would corrupt
    /// whichever stage ran first.
    pub fn write_report(&mut self, field: ReportField, text: impl Into<String>) -> Result<()> {
        let slot = self.report_slot(field);
        if !slot.is_empty() {
            return Err(PropagationError::ReportAlreadyWritten(field.as_str()));
        }
        *slot = text.into();
        debug!(field = field.as_str(), "report field written");
        Ok(())
    }

    /// Read any report field uniformly
    pub fn report(&self, field: ReportField) -> &str {
        match field {
            ReportField::Market => &self.market_report,
            ReportField::Fundamentals => &self.fundamentals_report,
            ReportField::Sentiment => &self.sentiment_report,
            ReportField::News => &self.news_report,
            ReportField::InvestmentPlan => &self.investment_plan,
            ReportField::TraderPlan => &self.trader_plan,
            ReportField::FinalDecision => &self.final_decision,
        }
    }

    fn report_slot(&mut self, field: ReportField) -> &mut String {
        match field {
            ReportField::Market => &mut self.market_report,
            ReportField::Fundamentals => &mut self.fundamentals_report,
            ReportField::Sentiment => &mut self.sentiment_report,
            ReportField::News => &mut self.news_report,
            ReportField::InvestmentPlan => &mut self.investment_plan,
            ReportField::TraderPlan => &mut self.trader_plan,
            ReportField::FinalDecision => &mut self.final_decision,
        }
    }
}
