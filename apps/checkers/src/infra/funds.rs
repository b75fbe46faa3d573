//! Funds ledger contract consumed by wager settlement.
//!
//! The ledger lives outside this module: every call is applied immediately
//! and is not covered by [`crate::infra::txn::with_txn`] rollback. Settlement
//! therefore issues ledger calls last and unwinds its own partial work.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind};

/// Escrow account held by the checkers module.
pub const MODULE_ESCROW: &str = "checkers";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FundsError {
    #[error("insufficient funds in {account}: need {needed}, have {available}")]
    InsufficientFunds {
        account: String,
        needed: u64,
        available: u64,
    },
    #[error("escrow {escrow} short: need {needed}, have {available}")]
    EscrowShortfall {
        escrow: String,
        needed: u64,
        available: u64,
    },
    #[error("balance overflow in {account}")]
    Overflow { account: String },
}

impl From<FundsError> for DomainError {
    fn from(e: FundsError) -> Self {
        match e {
            FundsError::InsufficientFunds { .. } => {
                DomainError::conflict(ConflictKind::InsufficientFunds, e.to_string())
            }
            other => DomainError::infra(InfraErrorKind::Funds, other.to_string()),
        }
    }
}

pub trait FundsLedger {
    /// Move `amount` from `account` into the module escrow.
    fn hold(&mut self, account: &str, amount: u64) -> Result<(), FundsError>;

    /// Return `amount` from the module escrow to `account`.
    fn release(&mut self, account: &str, amount: u64) -> Result<(), FundsError>;

    /// Pay `amount` out of `from_escrow` to `to_account`.
    fn transfer(&mut self, from_escrow: &str, to_account: &str, amount: u64)
        -> Result<(), FundsError>;
}

/// Deterministic ledger kept in memory: plain balances plus escrow pools.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryLedger {
    balances: BTreeMap<String, u64>,
    escrows: BTreeMap<String, u64>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_balance(mut self, account: impl Into<String>, amount: u64) -> Self {
        self.balances.insert(account.into(), amount);
        self
    }

    pub fn deposit(&mut self, account: &str, amount: u64) {
        let balance = self.balances.entry(account.to_string()).or_default();
        *balance = balance.saturating_add(amount);
    }

    pub fn balance(&self, account: &str) -> u64 {
        self.balances.get(account).copied().unwrap_or(0)
    }

    pub fn escrow_balance(&self, escrow: &str) -> u64 {
        self.escrows.get(escrow).copied().unwrap_or(0)
    }

    fn debit_escrow(&mut self, escrow: &str, amount: u64) -> Result<(), FundsError> {
        let available = self.escrow_balance(escrow);
        if available < amount {
            return Err(FundsError::EscrowShortfall {
                escrow: escrow.to_string(),
                needed: amount,
                available,
            });
        }
        self.escrows.insert(escrow.to_string(), available - amount);
        Ok(())
    }

    fn credit(&mut self, account: &str, amount: u64) -> Result<(), FundsError> {
        let balance = self.balance(account);
        let next = balance.checked_add(amount).ok_or_else(|| FundsError::Overflow {
            account: account.to_string(),
        })?;
        self.balances.insert(account.to_string(), next);
        Ok(())
    }
}

impl FundsLedger for InMemoryLedger {
    fn hold(&mut self, account: &str, amount: u64) -> Result<(), FundsError> {
        let available = self.balance(account);
        if available < amount {
            return Err(FundsError::InsufficientFunds {
                account: account.to_string(),
                needed: amount,
                available,
            });
        }
        let escrowed = self.escrow_balance(MODULE_ESCROW);
        let next_escrow = escrowed.checked_add(amount).ok_or_else(|| FundsError::Overflow {
            account: MODULE_ESCROW.to_string(),
        })?;
        self.balances.insert(account.to_string(), available - amount);
        self.escrows.insert(MODULE_ESCROW.to_string(), next_escrow);
        Ok(())
    }

    fn release(&mut self, account: &str, amount: u64) -> Result<(), FundsError> {
        self.transfer(MODULE_ESCROW, account, amount)
    }

    fn transfer(
        &mut self,
        from_escrow: &str,
        to_account: &str,
        amount: u64,
    ) -> Result<(), FundsError> {
        // Check the credit side first so a failure leaves both sides untouched
        if self.balance(to_account).checked_add(amount).is_none() {
            return Err(FundsError::Overflow {
                account: to_account.to_string(),
            });
        }
        self.debit_escrow(from_escrow, amount)?;
        self.credit(to_account, amount)
    }
}
