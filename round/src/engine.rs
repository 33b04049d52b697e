//! The voting round engine: funding, cancellation and settlement.

use crate::config::{EngineConfig, FeeBasis};
use crate::error::RoundError;
use crate::event::RoundEvent;
use crate::phase::Phase;
use crate::project::Project;
use crate::round::{Round, RoundSnapshot};
use crate::settlement::{distribute, split_fee, SettlementReport};
use std::sync::Arc;
use votepool_exchange::{min_output_for, ExchangeError, Exchanger, SwapPlan, SwapRequest};
use votepool_ledger::{Ledger, Transfer};
use votepool_types::{AccountId, Asset, AssetId, Timestamp};

/// Runs one round at a time over injected ledger and exchange collaborators.
///
/// Every operation validates everything it can before moving funds and only
/// mutates the round once the ledger has accepted the transfers, so a failed
/// call leaves the round exactly as it was.
pub struct VotingRound {
    config: EngineConfig,
    round: Round,
    ledger: Arc<dyn Ledger>,
    exchanger: Arc<dyn Exchanger>,
    events: Vec<RoundEvent>,
}

impl VotingRound {
    /// Create an idle engine. No deposits are accepted until the owner resets.
    pub fn new(
        config: EngineConfig,
        ledger: Arc<dyn Ledger>,
        exchanger: Arc<dyn Exchanger>,
    ) -> Result<Self, RoundError> {
        config.validate()?;
        tracing::info!(
            owner = %config.owner,
            account = %config.account,
            exchange = exchanger.name(),
            "voting round engine created"
        );
        Ok(Self {
            config,
            round: Round::idle(),
            ledger,
            exchanger,
            events: Vec::new(),
        })
    }

    // ── Owner operations ───────────────────────────────────────────────

    /// Start a new round with one project per `(target, link)` pair.
    ///
    /// Refused while any participant of the current round still has funds
    /// recorded, whether the round is open or partially refunded.
    pub fn reset(
        &mut self,
        caller: &AccountId,
        targets: Vec<Asset>,
        links: Vec<String>,
        estimated_timestamp: Timestamp,
    ) -> Result<(), RoundError> {
        self.require_owner(caller)?;
        if !self.round.contributions.is_empty() {
            return Err(RoundError::FundsOutstanding {
                participants: self.round.contributions.participants_count(),
            });
        }
        if targets.is_empty() {
            return Err(RoundError::InvalidConfiguration(
                "at least one project is required".to_string(),
            ));
        }
        if targets.len() != links.len() {
            return Err(RoundError::InvalidConfiguration(format!(
                "{} project targets but {} links",
                targets.len(),
                links.len()
            )));
        }

        let projects = targets
            .iter()
            .cloned()
            .zip(links)
            .map(|(target, link)| Project::new(target, link))
            .collect();
        self.round = Round::open(projects, estimated_timestamp);

        tracing::info!(
            projects = targets.len(),
            %estimated_timestamp,
            "round reset, voting open"
        );
        self.events.push(RoundEvent::RoundReset {
            targets,
            estimated_timestamp,
        });
        Ok(())
    }

    /// Cancel the open round. Funds stay in custody until each participant
    /// is refunded.
    pub fn allow_refund(&mut self, caller: &AccountId) -> Result<(), RoundError> {
        self.require_owner(caller)?;
        self.round.phase.require(Phase::Open)?;
        self.round.phase = Phase::Refundable;
        tracing::info!(
            participants = self.round.contributions.participants_count(),
            "round cancelled, refunds enabled"
        );
        self.events.push(RoundEvent::RefundsEnabled);
        Ok(())
    }

    /// Settle the open round.
    ///
    /// Picks the leading project, converts the pool into its asset unless it
    /// pays out natively, pays the fee and rounding dust to the owner and the
    /// rest to participants pro-rata. The conversion legs and every payout are
    /// committed in one ledger batch, so a rejected settlement leaves custody
    /// and the round untouched. `exchange_deadline` is passed to the exchange,
    /// which must refuse to plan after it.
    pub fn execute(
        &mut self,
        caller: &AccountId,
        exchange_deadline: Timestamp,
    ) -> Result<SettlementReport, RoundError> {
        self.require_owner(caller)?;
        self.round.phase.require(Phase::Open)?;

        let pool = self.round.contributions.total();
        if pool == 0 {
            return Err(RoundError::EmptyPool);
        }
        let winner = self.round.leading_project().ok_or(RoundError::EmptyPool)?;
        let target = self.round.projects[winner].target.clone();
        tracing::debug!(winner, %target, pool, "settling round");

        let (pool_fee, swap_input) = match self.config.fee_basis {
            FeeBasis::Pool => {
                let split = split_fee(pool, self.config.fee_bps)?;
                (split.fee, split.remainder)
            }
            FeeBasis::Output => (0, pool),
        };

        let (output, mut batch) = match &target {
            Asset::Native => (swap_input, Vec::new()),
            Asset::External(asset) => {
                let plan = self.plan_swap(asset, swap_input, exchange_deadline)?;
                (plan.output, plan.legs)
            }
        };

        let (fee, fee_asset, remaining) = match self.config.fee_basis {
            FeeBasis::Pool => (pool_fee, Asset::Native, output),
            FeeBasis::Output => {
                let split = split_fee(output, self.config.fee_bps)?;
                (split.fee, target.clone(), split.remainder)
            }
        };

        let distribution = distribute(remaining, &self.round.contributions)?;

        // Swap legs first so custody holds the output before it is paid out.
        let account = &self.config.account;
        let owner = &self.config.owner;
        batch.reserve(distribution.payouts.len() + 2);
        batch.push(Transfer::new(fee_asset.clone(), account, owner, fee));
        for payout in &distribution.payouts {
            batch.push(Transfer::new(
                target.clone(),
                account,
                &payout.participant,
                payout.amount,
            ));
        }
        batch.push(Transfer::new(target.clone(), account, owner, distribution.dust));
        batch.retain(|t| !t.is_noop());

        if let Err(e) = self.ledger.apply(&batch) {
            tracing::error!(
                error = %e,
                transfers = batch.len(),
                "settlement batch rejected by ledger"
            );
            return Err(e.into());
        }

        self.round.contributions.clear();
        self.round.phase = Phase::Closed;

        let converted = if target.is_native() { 0 } else { swap_input };
        let report = SettlementReport {
            winner,
            target,
            pool,
            swap_input: converted,
            output,
            fee,
            fee_asset,
            distributed: distribution.distributed,
            dust: distribution.dust,
            payouts: distribution.payouts,
        };
        tracing::info!(
            winner,
            output = report.output,
            fee = report.fee,
            distributed = report.distributed,
            dust = report.dust,
            "round settled"
        );
        self.events.push(RoundEvent::Settled(report.clone()));
        Ok(report)
    }

    // ── Participant operations ─────────────────────────────────────────

    /// Contribute `amount` base currency to `project`, voting for it.
    ///
    /// A zero amount passes every check and changes nothing.
    pub fn deposit(
        &mut self,
        caller: &AccountId,
        project: usize,
        amount: u128,
    ) -> Result<(), RoundError> {
        self.round.phase.require(Phase::Open)?;
        let count = self.round.projects.len();
        if project >= count {
            return Err(RoundError::IndexOutOfRange {
                index: project,
                count,
            });
        }
        self.config.cap.check(&self.round, caller, project, amount)?;
        if amount == 0 {
            return Ok(());
        }

        let pooled = self.round.projects[project]
            .pooled_balance
            .checked_add(amount)
            .ok_or(RoundError::Overflow)?;
        self.round
            .contributions
            .of(caller)
            .checked_add(amount)
            .ok_or(RoundError::Overflow)?;
        self.round
            .contributions
            .total()
            .checked_add(amount)
            .ok_or(RoundError::Overflow)?;

        self.ledger.transfer(Transfer::new(
            Asset::Native,
            caller,
            &self.config.account,
            amount,
        ))?;

        self.round.projects[project].pooled_balance = pooled;
        self.round.contributions.credit(caller, amount)?;

        tracing::info!(participant = %caller, project, amount, "deposit accepted");
        self.events.push(RoundEvent::Deposited {
            participant: caller.clone(),
            project,
            amount,
        });
        Ok(())
    }

    /// Return everything `participant` contributed. Anyone may trigger this.
    pub fn refund(&mut self, participant: &AccountId) -> Result<u128, RoundError> {
        self.round.phase.require(Phase::Refundable)?;
        let amount = self.round.contributions.of(participant);
        if amount == 0 {
            return Err(RoundError::NothingToRefund(participant.to_string()));
        }

        self.ledger.transfer(Transfer::new(
            Asset::Native,
            &self.config.account,
            participant,
            amount,
        ))?;
        self.round.contributions.take(participant);

        tracing::info!(%participant, amount, "refund paid");
        self.events.push(RoundEvent::Refunded {
            participant: participant.clone(),
            amount,
        });
        Ok(amount)
    }

    // ── Queries ────────────────────────────────────────────────────────

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.round.phase
    }

    /// Whether deposits are being accepted.
    pub fn is_open(&self) -> bool {
        self.round.phase.is_open()
    }

    /// Whether the round was cancelled and refunds can be claimed.
    pub fn refunds_enabled(&self) -> bool {
        self.round.phase.refunds_enabled()
    }

    /// Advisory settlement time set at the last reset.
    pub fn estimated_timestamp(&self) -> Timestamp {
        self.round.estimated_timestamp
    }

    /// Number of projects in the current round.
    pub fn projects_count(&self) -> usize {
        self.round.projects.len()
    }

    /// Project at `index`, or `IndexOutOfRange`.
    pub fn project(&self, index: usize) -> Result<&Project, RoundError> {
        self.round
            .projects
            .get(index)
            .ok_or(RoundError::IndexOutOfRange {
                index,
                count: self.round.projects.len(),
            })
    }

    /// Number of participants with funds recorded.
    pub fn participants_count(&self) -> usize {
        self.round.contributions.participants_count()
    }

    /// Total `participant` has contributed to the current round.
    pub fn contribution_of(&self, participant: &AccountId) -> u128 {
        self.round.contributions.of(participant)
    }

    /// Sum of every project's pooled balance.
    pub fn total_pooled(&self) -> u128 {
        self.round.total_pooled()
    }

    /// The account allowed to reset, cancel and settle.
    pub fn owner(&self) -> &AccountId {
        &self.config.owner
    }

    /// The custody account holding deposits.
    pub fn account(&self) -> &AccountId {
        &self.config.account
    }

    /// The validated engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Serializable view of the current round.
    pub fn snapshot(&self) -> RoundSnapshot {
        self.round.snapshot()
    }

    /// Drain the events recorded since the last call.
    pub fn take_events(&mut self) -> Vec<RoundEvent> {
        std::mem::take(&mut self.events)
    }

    // ── Internals ──────────────────────────────────────────────────────

    fn require_owner(&self, caller: &AccountId) -> Result<(), RoundError> {
        if *caller != self.config.owner {
            return Err(RoundError::Unauthorized(caller.to_string()));
        }
        Ok(())
    }

    /// Ask the exchange for the legs converting `input` base currency from
    /// custody into `asset`, guarded by the configured slippage tolerance
    /// against a fresh quote.
    fn plan_swap(
        &self,
        asset: &AssetId,
        input: u128,
        deadline: Timestamp,
    ) -> Result<SwapPlan, RoundError> {
        if input == 0 {
            return Ok(SwapPlan {
                output: 0,
                legs: Vec::new(),
            });
        }
        let result = self
            .exchanger
            .quote(input, asset)
            .and_then(|quote| {
                if quote == 0 {
                    return Err(ExchangeError::ZeroQuote { input });
                }
                let min_output = min_output_for(quote, self.config.max_slippage_bps)
                    .ok_or_else(|| ExchangeError::Other("slippage tolerance above 100%".into()))?;
                tracing::debug!(%asset, input, quote, min_output, %deadline, "planning conversion");
                self.exchanger.plan(&SwapRequest {
                    payer: self.config.account.clone(),
                    recipient: self.config.account.clone(),
                    input,
                    min_output,
                    output_asset: asset.clone(),
                    deadline,
                })
            });
        result.map_err(|e| {
            tracing::warn!(%asset, input, error = %e, "settlement conversion refused");
            RoundError::ExchangeFailed(e)
        })
    }
}
