//! Nullable exchange: fixed-rate conversions against a reserve account.

use crate::clock::NullClock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use votepool_exchange::{ExchangeError, Exchanger, SwapPlan, SwapRequest};
use votepool_ledger::Transfer;
use votepool_types::{apply_bps, mul_div_floor, AccountId, Asset, AssetId};

/// Output units per input unit, as a fraction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rate {
    pub numerator: u128,
    pub denominator: u128,
}

impl Rate {
    pub fn new(numerator: u128, denominator: u128) -> Self {
        Self {
            numerator,
            denominator,
        }
    }
}

/// A deterministic exchange for testing.
///
/// Quotes are `input * rate`, floored. Plans pay the input into the reserve
/// account and deliver output out of it, so the reserve must be funded with
/// the output asset before the legs are applied. Deadlines are checked
/// against a shared [`NullClock`].
pub struct NullExchange {
    reserve: AccountId,
    clock: Arc<NullClock>,
    rates: Mutex<HashMap<AssetId, Rate>>,
    /// Basis points by which delivered output falls short of the quote.
    shortfall_bps: AtomicU32,
    planned: Mutex<Vec<SwapRequest>>,
}

impl NullExchange {
    pub fn new(reserve: AccountId, clock: Arc<NullClock>) -> Self {
        Self {
            reserve,
            clock,
            rates: Mutex::new(HashMap::new()),
            shortfall_bps: AtomicU32::new(0),
            planned: Mutex::new(Vec::new()),
        }
    }

    pub fn with_rate(self, asset: AssetId, rate: Rate) -> Self {
        self.set_rate(asset, rate);
        self
    }

    pub fn set_rate(&self, asset: AssetId, rate: Rate) {
        self.rates.lock().unwrap().insert(asset, rate);
    }

    /// Simulate the price moving between quote and execution.
    pub fn set_shortfall_bps(&self, bps: u32) {
        self.shortfall_bps.store(bps, Ordering::SeqCst);
    }

    pub fn reserve(&self) -> &AccountId {
        &self.reserve
    }

    /// Every request that was successfully planned, in order.
    pub fn planned(&self) -> Vec<SwapRequest> {
        self.planned.lock().unwrap().clone()
    }
}

impl Exchanger for NullExchange {
    fn quote(&self, input: u128, output_asset: &AssetId) -> Result<u128, ExchangeError> {
        let rate = self
            .rates
            .lock()
            .unwrap()
            .get(output_asset)
            .copied()
            .ok_or_else(|| ExchangeError::UnsupportedAsset(output_asset.to_string()))?;
        mul_div_floor(input, rate.numerator, rate.denominator)
            .ok_or_else(|| ExchangeError::Other(format!("rate for {output_asset} overflows")))
    }

    fn plan(&self, request: &SwapRequest) -> Result<SwapPlan, ExchangeError> {
        let now = self.clock.now();
        if request.deadline.is_past(now) {
            return Err(ExchangeError::DeadlineExpired {
                deadline: request.deadline,
                now,
            });
        }
        let quote = self.quote(request.input, &request.output_asset)?;
        let shortfall = apply_bps(quote, self.shortfall_bps.load(Ordering::SeqCst))
            .unwrap_or(quote)
            .min(quote);
        let output = quote - shortfall;
        if output < request.min_output {
            return Err(ExchangeError::InsufficientOutput {
                output,
                min_output: request.min_output,
            });
        }
        let legs = vec![
            Transfer::new(Asset::Native, &request.payer, &self.reserve, request.input),
            Transfer::new(
                Asset::External(request.output_asset.clone()),
                &self.reserve,
                &request.recipient,
                output,
            ),
        ];
        self.planned.lock().unwrap().push(request.clone());
        Ok(SwapPlan { output, legs })
    }

    fn name(&self) -> &str {
        "null-exchange"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NullLedger;
    use votepool_ledger::Ledger;
    use votepool_types::Timestamp;

    fn setup() -> (NullLedger, NullExchange, Arc<NullClock>) {
        let clock = Arc::new(NullClock::new(100));
        let exchange = NullExchange::new(AccountId::new("amm"), clock.clone())
            .with_rate(AssetId::new("TOK"), Rate::new(25, 1));
        let ledger = NullLedger::new();
        ledger.mint(&AccountId::new("amm"), &Asset::external("TOK"), 1_000_000);
        ledger.mint(&AccountId::new("pool"), &Asset::Native, 100);
        (ledger, exchange, clock)
    }

    fn request(min_output: u128, deadline: u64) -> SwapRequest {
        SwapRequest {
            payer: AccountId::new("pool"),
            recipient: AccountId::new("pool"),
            input: 100,
            min_output,
            output_asset: AssetId::new("TOK"),
            deadline: Timestamp::new(deadline),
        }
    }

    #[test]
    fn plan_moves_nothing_until_applied() {
        let (ledger, exchange, _) = setup();
        let plan = exchange.plan(&request(2_500, 200)).unwrap();
        assert_eq!(plan.output, 2_500);
        assert_eq!(plan.legs.len(), 2);
        assert_eq!(ledger.balance(&AccountId::new("pool"), &Asset::Native), 100);

        ledger.apply(&plan.legs).unwrap();
        assert_eq!(ledger.balance(&AccountId::new("pool"), &Asset::Native), 0);
        assert_eq!(
            ledger.balance(&AccountId::new("pool"), &Asset::external("TOK")),
            2_500
        );
        assert_eq!(exchange.planned().len(), 1);
    }

    #[test]
    fn expired_deadline_is_refused() {
        let (_, exchange, clock) = setup();
        clock.set(201);
        let err = exchange.plan(&request(0, 200)).unwrap_err();
        assert!(matches!(err, ExchangeError::DeadlineExpired { .. }));
        assert!(exchange.planned().is_empty());
    }

    #[test]
    fn shortfall_below_minimum_fails() {
        let (_, exchange, _) = setup();
        exchange.set_shortfall_bps(500);
        let err = exchange.plan(&request(2_400, 200)).unwrap_err();
        assert_eq!(
            err,
            ExchangeError::InsufficientOutput {
                output: 2_375,
                min_output: 2_400
            }
        );
    }

    #[test]
    fn unknown_asset_is_unsupported() {
        let (_, exchange, _) = setup();
        assert!(matches!(
            exchange.quote(1, &AssetId::new("NOPE")),
            Err(ExchangeError::UnsupportedAsset(_))
        ));
    }
}
