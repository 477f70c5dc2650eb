//! Session netting algorithm
//!
//! Greedy two-pointer matching of net payers against net receivers.
//!
//! # Algorithm
//!
//! 1. Reject empty input, duplicate names and imbalanced sums
//! 2. Split positions into debtors (< -ε) and creditors (> ε)
//! 3. Sort both sides by magnitude, largest first, ties in input order
//! 4. Pay `min(debt, credit)` from the current debtor to the current creditor,
//!    advancing whichever side drops to within ε of zero
//! 5. If one side still holds more than ε, pay it against the other side's
//!    sub-ε remainders and sub-ε positions, largest first
//!
//! # Example
//!
//! ```text
//! Positions:
//!   A: +$50 (net receiver)
//!   B: +$50 (net receiver)
//!   C: -$100 (net payer)
//!
//! Transfers:
//!   C pays A: $50
//!   C pays B: $50
//! ```

use crate::{types::*, Error, Result};
use rust_decimal::Decimal;
use session_core::{Config, PlayerName, PlayerPosition, SessionRecord, Tolerance};
use std::collections::{BTreeMap, HashSet};

/// Outstanding balance of one side of the matching
#[derive(Debug, Clone)]
struct Balance<'a> {
    index: usize,
    name: &'a PlayerName,
    remaining: Decimal,
}

/// Netting engine
#[derive(Debug, Clone, Copy, Default)]
pub struct NettingEngine {
    /// Zero tolerance
    tolerance: Tolerance,
}

impl NettingEngine {
    /// Create new netting engine
    pub fn new(tolerance: Tolerance) -> Self {
        Self { tolerance }
    }

    /// Create from shared configuration
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.tolerance())
    }

    /// Same engine with a different tolerance
    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Tolerance in use
    pub fn tolerance(&self) -> Tolerance {
        self.tolerance
    }

    /// Compute the transfers that zero every position
    pub fn settle(&self, positions: &[PlayerPosition]) -> Result<Vec<Transfer>> {
        if positions.is_empty() {
            return Err(Error::NoPositions);
        }

        self.check_unique_names(positions)?;

        let residual = Self::sum_positions(positions)?;
        if !self.tolerance.is_zero(residual) {
            tracing::warn!(%residual, tolerance = %self.tolerance, "Refusing to settle imbalanced positions");
            return Err(Error::ImbalancedInput { residual });
        }

        let transfers = self.match_balances(positions);

        tracing::info!(
            "Settlement complete: {} positions → {} transfers",
            positions.len(),
            transfers.len()
        );

        Ok(transfers)
    }

    /// Settle positions and summarize the result
    pub fn plan(&self, positions: &[PlayerPosition]) -> Result<SettlementPlan> {
        let transfers = self.settle(positions)?;

        let positions_settled = positions
            .iter()
            .filter(|p| !self.tolerance.is_zero(p.amount))
            .count();

        Ok(SettlementPlan::new(None, transfers, positions_settled))
    }

    /// Derive positions from a closed session and settle them
    pub fn settle_session(&self, session: &SessionRecord) -> Result<SettlementPlan> {
        let positions = session.positions()?;
        let mut plan = self.plan(&positions)?;
        plan.session_id = Some(session.id);

        tracing::info!(session_id = %session.id, "Settled session");

        Ok(plan)
    }

    /// Check that `transfers` settle `positions`
    pub fn verify(&self, positions: &[PlayerPosition], transfers: &[Transfer]) -> Result<()> {
        for transfer in transfers {
            if transfer.amount <= Decimal::ZERO {
                return Err(Error::SettlementMismatch(format!(
                    "non-positive transfer {}",
                    transfer
                )));
            }
            if transfer.from == transfer.to {
                return Err(Error::SettlementMismatch(format!(
                    "self-transfer {}",
                    transfer
                )));
            }
        }

        for (name, balance) in replay(positions, transfers) {
            if !self.tolerance.is_zero(balance) {
                return Err(Error::SettlementMismatch(format!(
                    "{} left with balance {}",
                    name, balance
                )));
            }
        }

        Ok(())
    }

    /// Reject positions naming the same player twice
    fn check_unique_names(&self, positions: &[PlayerPosition]) -> Result<()> {
        let mut seen = HashSet::with_capacity(positions.len());
        for position in positions {
            if !seen.insert(&position.name) {
                return Err(Error::DuplicatePlayerName(position.name.clone()));
            }
        }
        Ok(())
    }

    /// Signed sum of all positions
    fn sum_positions(positions: &[PlayerPosition]) -> Result<Decimal> {
        positions
            .iter()
            .try_fold(Decimal::ZERO, |acc, p| acc.checked_add(p.amount))
            .ok_or_else(|| {
                session_core::Error::Arithmetic("sum of positions overflows".to_string()).into()
            })
    }

    /// One side of the matching, largest first, ties in input order
    fn collect_side<'a>(
        positions: &'a [PlayerPosition],
        select: impl Fn(Decimal) -> bool,
        owed: impl Fn(Decimal) -> Decimal,
    ) -> Vec<Balance<'a>> {
        let mut side: Vec<Balance<'a>> = positions
            .iter()
            .enumerate()
            .filter(|(_, p)| select(p.amount))
            .map(|(index, p)| Balance {
                index,
                name: &p.name,
                remaining: owed(p.amount),
            })
            .collect();
        sort_largest_first(&mut side);
        side
    }

    /// Walk both sides, emitting one transfer per step
    fn match_balances(&self, positions: &[PlayerPosition]) -> Vec<Transfer> {
        let tol = self.tolerance;
        let exact = Tolerance::new(Decimal::ZERO);

        let mut debtors = Self::collect_side(positions, |a| tol.is_negative(a), |a| -a);
        let mut creditors = Self::collect_side(positions, |a| tol.is_positive(a), |a| a);

        let mut transfers =
            Vec::with_capacity((debtors.len() + creditors.len()).saturating_sub(1));
        let (d, c) = match_pass(&mut debtors, &mut creditors, tol, tol, &mut transfers);

        // One side may still hold more than ε. It is paid against what the
        // other side has left: remainders under ε plus positions that never
        // crossed ε. Those sources only advance once they reach exactly zero.
        if d < debtors.len() {
            let mut sources = leftovers(&creditors);
            sources.extend(Self::collect_side(
                positions,
                |a| a > Decimal::ZERO && !tol.is_positive(a),
                |a| a,
            ));
            sort_largest_first(&mut sources);

            tracing::debug!(
                unpaid = debtors.len() - d,
                sources = sources.len(),
                "Absorbing remainders"
            );
            match_pass(&mut debtors[d..], &mut sources, tol, exact, &mut transfers);
        } else if c < creditors.len() {
            let mut sources = leftovers(&debtors);
            sources.extend(Self::collect_side(
                positions,
                |a| a < Decimal::ZERO && !tol.is_negative(a),
                |a| -a,
            ));
            sort_largest_first(&mut sources);

            tracing::debug!(
                unpaid = creditors.len() - c,
                sources = sources.len(),
                "Absorbing remainders"
            );
            match_pass(&mut sources, &mut creditors[c..], exact, tol, &mut transfers);
        }

        transfers
    }
}

/// Balances on one side that have not reached exactly zero
fn leftovers<'a>(side: &[Balance<'a>]) -> Vec<Balance<'a>> {
    side.iter()
        .filter(|b| b.remaining > Decimal::ZERO)
        .cloned()
        .collect()
}

fn sort_largest_first(side: &mut [Balance<'_>]) {
    side.sort_by(|a, b| {
        b.remaining
            .cmp(&a.remaining)
            .then_with(|| a.index.cmp(&b.index))
    });
}

/// Pay `min(debt, credit)` from the current debtor to the current creditor,
/// advancing each cursor once its side is within its own tolerance of zero.
///
/// Returns the final cursor positions.
fn match_pass(
    debtors: &mut [Balance<'_>],
    creditors: &mut [Balance<'_>],
    debtor_tolerance: Tolerance,
    creditor_tolerance: Tolerance,
    transfers: &mut Vec<Transfer>,
) -> (usize, usize) {
    let (mut d, mut c) = (0, 0);

    while d < debtors.len() && c < creditors.len() {
        let debtor = &mut debtors[d];
        let creditor = &mut creditors[c];

        // Cursors only rest on balances above their tolerance, so this is positive
        let amount = debtor.remaining.min(creditor.remaining);

        tracing::debug!(from = %debtor.name, to = %creditor.name, %amount, "Transfer");
        transfers.push(Transfer {
            from: debtor.name.clone(),
            to: creditor.name.clone(),
            amount,
        });

        debtor.remaining -= amount;
        creditor.remaining -= amount;

        if debtor_tolerance.is_zero(debtor.remaining) {
            d += 1;
        }
        if creditor_tolerance.is_zero(creditor.remaining) {
            c += 1;
        }
    }

    (d, c)
}

/// Apply transfers to positions and return every adjusted balance.
///
/// The payer's balance rises by the amount and the receiver's falls by it, so
/// a correct settlement leaves every balance within tolerance of zero.
pub fn replay(
    positions: &[PlayerPosition],
    transfers: &[Transfer],
) -> BTreeMap<PlayerName, Decimal> {
    let mut balances: BTreeMap<PlayerName, Decimal> = positions
        .iter()
        .map(|p| (p.name.clone(), p.amount))
        .collect();

    for transfer in transfers {
        *balances.entry(transfer.from.clone()).or_default() += transfer.amount;
        *balances.entry(transfer.to.clone()).or_default() -= transfer.amount;
    }

    balances
}
