//! Scenario files: a starting world plus a list of steps replayed against the
//! engine over in-memory ledger and exchange doubles.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use votepool_nullables::{NullClock, NullExchange, NullLedger, Rate};
use votepool_round::{EngineConfig, RoundEvent, RoundSnapshot, VotingRound};
use votepool_types::{AccountId, Asset, AssetId, Timestamp};

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub engine: EngineConfig,
    #[serde(default)]
    pub clock: ClockSpec,
    #[serde(default)]
    pub exchange: ExchangeSpec,
    #[serde(default)]
    pub balances: Vec<BalanceSpec>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClockSpec {
    #[serde(default)]
    pub start: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExchangeSpec {
    #[serde(default = "default_reserve")]
    pub reserve: AccountId,
    #[serde(default)]
    pub rates: Vec<RateSpec>,
}

impl Default for ExchangeSpec {
    fn default() -> Self {
        Self {
            reserve: default_reserve(),
            rates: Vec::new(),
        }
    }
}

fn default_reserve() -> AccountId {
    AccountId::new("exchange")
}

/// A listed asset: output per unit of base currency is
/// `numerator / denominator`, backed by `liquidity` held in the reserve.
#[derive(Debug, Clone, Deserialize)]
pub struct RateSpec {
    pub asset: AssetId,
    pub numerator: u128,
    #[serde(default = "default_denominator")]
    pub denominator: u128,
    #[serde(default)]
    pub liquidity: u128,
}

fn default_denominator() -> u128 {
    1
}

#[derive(Debug, Clone, Deserialize)]
pub struct BalanceSpec {
    pub account: AccountId,
    #[serde(default = "default_asset")]
    pub asset: Asset,
    pub amount: u128,
}

fn default_asset() -> Asset {
    Asset::Native
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    Reset {
        caller: AccountId,
        targets: Vec<Asset>,
        #[serde(default)]
        links: Option<Vec<String>>,
        #[serde(default)]
        estimated_timestamp: u64,
    },
    Deposit {
        caller: AccountId,
        project: usize,
        amount: u128,
    },
    AllowRefund {
        caller: AccountId,
    },
    Refund {
        participant: AccountId,
    },
    Execute {
        caller: AccountId,
        /// Seconds after the current clock reading.
        #[serde(default = "default_deadline_in")]
        deadline_in: u64,
    },
    AdvanceClock {
        secs: u64,
    },
    SetShortfall {
        bps: u32,
    },
}

fn default_deadline_in() -> u64 {
    15
}

impl Step {
    pub fn action(&self) -> &'static str {
        match self {
            Step::Reset { .. } => "reset",
            Step::Deposit { .. } => "deposit",
            Step::AllowRefund { .. } => "allow_refund",
            Step::Refund { .. } => "refund",
            Step::Execute { .. } => "execute",
            Step::AdvanceClock { .. } => "advance_clock",
            Step::SetShortfall { .. } => "set_shortfall",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StepOutcome {
    pub index: usize,
    pub action: &'static str,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct BalanceRow {
    pub account: AccountId,
    pub asset: Asset,
    pub amount: u128,
}

#[derive(Debug, Serialize)]
pub struct SimulationReport {
    pub steps: Vec<StepOutcome>,
    pub snapshot: RoundSnapshot,
    pub events: Vec<RoundEvent>,
    pub balances: Vec<BalanceRow>,
}

impl Scenario {
    pub fn from_toml_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("invalid scenario {}", path.display()))
    }

    pub fn from_toml_str(s: &str) -> anyhow::Result<Self> {
        let scenario: Self = toml::from_str(s)?;
        scenario.engine.validate()?;
        Ok(scenario)
    }

    /// Replay every step. With `strict` the first failing step aborts the run.
    pub fn run(&self, strict: bool) -> anyhow::Result<SimulationReport> {
        let mut world = World::build(self)?;
        let mut steps = Vec::with_capacity(self.steps.len());

        for (index, step) in self.steps.iter().enumerate() {
            let action = step.action();
            match world.apply(step) {
                Ok(detail) => {
                    tracing::info!(index, action, "step ok");
                    steps.push(StepOutcome {
                        index,
                        action,
                        ok: true,
                        error: None,
                        detail,
                    });
                }
                Err(e) => {
                    if strict {
                        anyhow::bail!("step {index} ({action}) failed: {e}");
                    }
                    tracing::warn!(index, action, error = %e, "step failed");
                    steps.push(StepOutcome {
                        index,
                        action,
                        ok: false,
                        error: Some(e.to_string()),
                        detail: None,
                    });
                }
            }
        }

        let balances = world
            .ledger
            .balances()
            .into_iter()
            .map(|(account, asset, amount)| BalanceRow {
                account,
                asset,
                amount,
            })
            .collect();
        Ok(SimulationReport {
            steps,
            snapshot: world.engine.snapshot(),
            events: world.engine.take_events(),
            balances,
        })
    }
}

struct World {
    engine: VotingRound,
    ledger: Arc<NullLedger>,
    exchange: Arc<NullExchange>,
    clock: Arc<NullClock>,
}

impl World {
    fn build(scenario: &Scenario) -> anyhow::Result<Self> {
        let clock = Arc::new(NullClock::new(scenario.clock.start));
        let ledger = Arc::new(NullLedger::new());
        let mut exchange = NullExchange::new(scenario.exchange.reserve.clone(), clock.clone());
        for rate in &scenario.exchange.rates {
            anyhow::ensure!(
                rate.denominator > 0,
                "rate for {} has a zero denominator",
                rate.asset
            );
            exchange =
                exchange.with_rate(rate.asset.clone(), Rate::new(rate.numerator, rate.denominator));
            ledger.mint(
                &scenario.exchange.reserve,
                &Asset::External(rate.asset.clone()),
                rate.liquidity,
            );
        }
        for balance in &scenario.balances {
            ledger.mint(&balance.account, &balance.asset, balance.amount);
        }
        let exchange = Arc::new(exchange);
        let engine = VotingRound::new(scenario.engine.clone(), ledger.clone(), exchange.clone())?;
        Ok(Self {
            engine,
            ledger,
            exchange,
            clock,
        })
    }

    fn apply(&mut self, step: &Step) -> anyhow::Result<Option<serde_json::Value>> {
        match step {
            Step::Reset {
                caller,
                targets,
                links,
                estimated_timestamp,
            } => {
                let links = links
                    .clone()
                    .unwrap_or_else(|| vec![String::new(); targets.len()]);
                self.engine.reset(
                    caller,
                    targets.clone(),
                    links,
                    Timestamp::new(*estimated_timestamp),
                )?;
                Ok(None)
            }
            Step::Deposit {
                caller,
                project,
                amount,
            } => {
                self.engine.deposit(caller, *project, *amount)?;
                Ok(None)
            }
            Step::AllowRefund { caller } => {
                self.engine.allow_refund(caller)?;
                Ok(None)
            }
            Step::Refund { participant } => {
                let amount = self.engine.refund(participant)?;
                Ok(Some(serde_json::json!({ "refunded": amount })))
            }
            Step::Execute {
                caller,
                deadline_in,
            } => {
                let deadline = self.clock.now().saturating_add(*deadline_in);
                let report = self.engine.execute(caller, deadline)?;
                let detail = serde_json::to_value(report)
                    .context("failed to serialize settlement report")?;
                Ok(Some(detail))
            }
            Step::AdvanceClock { secs } => {
                self.clock.advance(*secs);
                Ok(Some(serde_json::json!({ "now": self.clock.now() })))
            }
            Step::SetShortfall { bps } => {
                self.exchange.set_shortfall_bps(*bps);
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use votepool_round::Phase;

    const DEMO: &str = include_str!("../scenarios/demo.toml");

    #[test]
    fn demo_scenario_settles() {
        let scenario = Scenario::from_toml_str(DEMO).unwrap();
        let report = scenario.run(true).unwrap();
        assert!(report.steps.iter().all(|s| s.ok));
        assert_eq!(report.snapshot.phase, Phase::Closed);
        let settled = report
            .steps
            .iter()
            .find(|s| s.action == "execute")
            .and_then(|s| s.detail.as_ref())
            .expect("execute step reports its settlement");
        assert_eq!(settled["winner"], 1);
        assert_eq!(settled["target"], "TOKENX");
        assert!(report
            .events
            .iter()
            .any(|e| matches!(e, RoundEvent::Settled(_))));
        assert!(report
            .balances
            .iter()
            .all(|row| row.account != AccountId::new("votepool")));
    }

    #[test]
    fn failed_steps_are_reported_unless_strict() {
        let toml = r#"
            [engine]
            owner = "owner"

            [[balances]]
            account = "alice"
            amount = 10

            [[steps]]
            action = "deposit"
            caller = "alice"
            project = 0
            amount = 1

            [[steps]]
            action = "reset"
            caller = "owner"
            targets = ["native"]

            [[steps]]
            action = "deposit"
            caller = "alice"
            project = 0
            amount = 4
        "#;
        let scenario = Scenario::from_toml_str(toml).unwrap();

        let report = scenario.run(false).unwrap();
        assert!(!report.steps[0].ok);
        assert!(report.steps[0]
            .error
            .as_deref()
            .unwrap()
            .contains("requires open"));
        assert!(report.steps[1].ok && report.steps[2].ok);
        assert_eq!(report.snapshot.total_pooled, 4);

        let err = scenario.run(true).unwrap_err();
        assert!(err.to_string().contains("step 0 (deposit)"));
    }

    #[test]
    fn invalid_engine_config_is_rejected() {
        let toml = "[engine]\nowner = \"o\"\nfee_bps = 20000\n";
        assert!(Scenario::from_toml_str(toml).is_err());
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scenario.toml");
        std::fs::write(&path, DEMO).unwrap();
        let scenario = Scenario::from_toml_file(&path).unwrap();
        assert!(!scenario.steps.is_empty());
        assert!(Scenario::from_toml_file(&dir.path().join("missing.toml")).is_err());
    }
}
