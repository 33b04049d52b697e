//! Nullable ledger: thread-safe in-memory balances for testing.

use std::collections::HashMap;
use std::sync::Mutex;
use votepool_ledger::{Ledger, LedgerError, Transfer};
use votepool_types::{AccountId, Asset};

type Balances = HashMap<(AccountId, Asset), u128>;

/// An in-memory ledger.
///
/// Batches are applied to a copy of the balance table and committed only if
/// every transfer succeeds.
pub struct NullLedger {
    balances: Mutex<Balances>,
    applied: Mutex<Vec<Transfer>>,
    reject_next: Mutex<Option<LedgerError>>,
}

impl NullLedger {
    pub fn new() -> Self {
        Self {
            balances: Mutex::new(HashMap::new()),
            applied: Mutex::new(Vec::new()),
            reject_next: Mutex::new(None),
        }
    }

    /// Create balance out of thin air (test setup only).
    pub fn mint(&self, account: &AccountId, asset: &Asset, amount: u128) {
        let mut balances = self.balances.lock().unwrap();
        let entry = balances.entry((account.clone(), asset.clone())).or_default();
        *entry = entry.saturating_add(amount);
    }

    /// Sum of every account's balance in `asset`.
    pub fn total(&self, asset: &Asset) -> u128 {
        self.balances
            .lock()
            .unwrap()
            .iter()
            .filter(|((_, a), _)| a == asset)
            .map(|(_, amount)| *amount)
            .sum()
    }

    /// Every non-empty balance, sorted by account then asset.
    pub fn balances(&self) -> Vec<(AccountId, Asset, u128)> {
        let mut all: Vec<_> = self
            .balances
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, amount)| **amount > 0)
            .map(|((account, asset), amount)| (account.clone(), asset.clone(), *amount))
            .collect();
        all.sort();
        all
    }

    /// Every transfer applied so far, in order.
    pub fn applied(&self) -> Vec<Transfer> {
        self.applied.lock().unwrap().clone()
    }

    /// Make the next `apply` call fail with `error` without touching balances.
    pub fn reject_next(&self, error: LedgerError) {
        *self.reject_next.lock().unwrap() = Some(error);
    }
}

impl Default for NullLedger {
    fn default() -> Self {
        Self::new()
    }
}

fn apply_one(balances: &mut Balances, t: &Transfer) -> Result<(), LedgerError> {
    if t.from == t.to {
        return Err(LedgerError::SelfTransfer(t.from.to_string()));
    }
    let from_key = (t.from.clone(), t.asset.clone());
    let available = balances.get(&from_key).copied().unwrap_or(0);
    if available < t.amount {
        return Err(LedgerError::InsufficientBalance {
            account: t.from.to_string(),
            asset: t.asset.to_string(),
            needed: t.amount,
            available,
        });
    }
    let to_key = (t.to.clone(), t.asset.clone());
    let credited = balances
        .get(&to_key)
        .copied()
        .unwrap_or(0)
        .checked_add(t.amount)
        .ok_or_else(|| LedgerError::Overflow {
            account: t.to.to_string(),
        })?;
    balances.insert(from_key, available - t.amount);
    balances.insert(to_key, credited);
    Ok(())
}

impl Ledger for NullLedger {
    fn balance(&self, account: &AccountId, asset: &Asset) -> u128 {
        self.balances
            .lock()
            .unwrap()
            .get(&(account.clone(), asset.clone()))
            .copied()
            .unwrap_or(0)
    }

    fn apply(&self, transfers: &[Transfer]) -> Result<(), LedgerError> {
        if let Some(error) = self.reject_next.lock().unwrap().take() {
            return Err(error);
        }
        let mut balances = self.balances.lock().unwrap();
        let mut staged = balances.clone();
        for t in transfers {
            apply_one(&mut staged, t)?;
        }
        *balances = staged;
        self.applied.lock().unwrap().extend_from_slice(transfers);
        Ok(())
    }
}
