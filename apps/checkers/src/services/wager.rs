//! Fund movements tied to game outcomes.
//!
//! Settlement never holds balances itself. It turns a game transition into a
//! list of [`FundsMovement`]s and carries them out against the ledger, all or
//! nothing: if one movement fails, the ones already made are reversed in
//! reverse order before the error is returned.

use tracing::{debug, error};

use crate::errors::domain::{DomainError, InfraErrorKind};
use crate::infra::funds::{FundsError, FundsLedger, MODULE_ESCROW};
use crate::repos::games::{pot, Game};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FundsMovement {
    /// Player stake moved into the module escrow
    Escrow { payer: String, amount: u64 },
    /// Pot released from escrow to the winner
    Payout { winner: String, amount: u64 },
    /// Stake returned from escrow to its payer
    Refund { party: String, amount: u64 },
}

impl FundsMovement {
    fn amount(&self) -> u64 {
        match self {
            FundsMovement::Escrow { amount, .. }
            | FundsMovement::Payout { amount, .. }
            | FundsMovement::Refund { amount, .. } => *amount,
        }
    }

    fn execute(&self, funds: &mut dyn FundsLedger) -> Result<(), FundsError> {
        match self {
            FundsMovement::Escrow { payer, amount } => funds.hold(payer, *amount),
            FundsMovement::Payout { winner, amount } => {
                funds.transfer(MODULE_ESCROW, winner, *amount)
            }
            FundsMovement::Refund { party, amount } => funds.release(party, *amount),
        }
    }

    fn reverse(&self, funds: &mut dyn FundsLedger) -> Result<(), FundsError> {
        match self {
            FundsMovement::Escrow { payer, amount } => funds.release(payer, *amount),
            FundsMovement::Payout { winner: party, amount }
            | FundsMovement::Refund { party, amount } => funds.hold(party, *amount),
        }
    }
}

/// Both players stake the wager.
pub fn escrow_plan(game: &Game) -> Vec<FundsMovement> {
    vec![
        FundsMovement::Escrow {
            payer: game.black.clone(),
            amount: game.wager,
        },
        FundsMovement::Escrow {
            payer: game.red.clone(),
            amount: game.wager,
        },
    ]
}

/// The winner takes the full pot.
pub fn payout_plan(game: &Game, winner: &str) -> Result<Vec<FundsMovement>, DomainError> {
    Ok(vec![FundsMovement::Payout {
        winner: winner.to_string(),
        amount: pot(game.wager)?,
    }])
}

/// Each player gets their own stake back.
pub fn refund_plan(game: &Game) -> Vec<FundsMovement> {
    vec![
        FundsMovement::Refund {
            party: game.black.clone(),
            amount: game.wager,
        },
        FundsMovement::Refund {
            party: game.red.clone(),
            amount: game.wager,
        },
    ]
}

/// Carry out `plan` against the ledger. Zero-amount movements are skipped.
pub fn settle(funds: &mut dyn FundsLedger, plan: &[FundsMovement]) -> Result<(), DomainError> {
    let mut done: Vec<&FundsMovement> = Vec::with_capacity(plan.len());

    for movement in plan.iter().filter(|m| m.amount() > 0) {
        if let Err(cause) = movement.execute(funds) {
            debug!(?movement, %cause, "settlement step failed, unwinding");
            for made in done.iter().rev() {
                if let Err(unwind) = made.reverse(funds) {
                    error!(movement = ?made, %unwind, "could not reverse fund movement");
                    return Err(DomainError::infra(
                        InfraErrorKind::Funds,
                        format!("settlement unwinding failed: {unwind} (after {cause})"),
                    ));
                }
            }
            return Err(cause.into());
        }
        done.push(movement);
    }
    Ok(())
}
