//! Property-based tests for settlement invariants
//!
//! These tests verify properties that must hold for every balanced session,
//! including sessions with sub-cent positions and chip-ratio remainders:
//! - Money conservation: replaying transfers zeroes every balance
//! - Transfer count never exceeds (non-zero positions - 1)
//! - No self-transfers, no non-positive amounts
//! - Determinism: same input → same transfers

use chrono::Utc;
use proptest::prelude::*;
use rust_decimal::{Decimal, RoundingStrategy};
use session_core::{PlayerEntry, PlayerPosition, SessionRecord};
use settlement::{replay, Error, NettingEngine};

/// Strategy for one whole-cent amount
fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000i64, any::<bool>()).prop_map(|(cents, negative)| {
        Decimal::new(if negative { -cents } else { cents }, 2)
    })
}

/// Strategy for one amount in thousandths, weighted towards ε and below
fn small_amount_strategy() -> impl Strategy<Value = Decimal> {
    let mills = prop_oneof![
        3 => 1i64..=10i64,
        2 => 11i64..=30i64,
        3 => 31i64..2_000_000i64,
    ];
    (mills, any::<bool>()).prop_map(|(mills, negative)| {
        Decimal::new(if negative { -mills } else { mills }, 3)
    })
}

/// Strategy for a balanced session: the last player absorbs the remainder
fn balanced_positions_strategy() -> impl Strategy<Value = Vec<PlayerPosition>> {
    prop::collection::vec(amount_strategy(), 1..12).prop_map(|amounts| {
        let total: Decimal = amounts.iter().copied().sum();
        let mut positions: Vec<PlayerPosition> = amounts
            .into_iter()
            .enumerate()
            .map(|(i, amount)| PlayerPosition::new(format!("player{}", i), amount))
            .collect();
        positions.push(PlayerPosition::new("house", -total));
        positions
    })
}

/// Strategy for a session full of dust: the house takes the remainder and
/// keeps a sub-ε imbalance
fn dusty_positions_strategy() -> impl Strategy<Value = Vec<PlayerPosition>> {
    (
        prop::collection::vec(small_amount_strategy(), 1..30),
        -10i64..=10i64,
    )
        .prop_map(|(amounts, slack)| {
            let total: Decimal = amounts.iter().copied().sum();
            let mut positions: Vec<PlayerPosition> = amounts
                .into_iter()
                .enumerate()
                .map(|(i, amount)| PlayerPosition::new(format!("player{}", i), amount))
                .collect();
            positions.push(PlayerPosition::new("house", Decimal::new(slack, 3) - total));
            positions
        })
}

/// Strategy for positions derived from a closed session: every chip bought
/// is cashed out again, split at random between the players
fn session_positions_strategy() -> impl Strategy<Value = Vec<PlayerPosition>> {
    let chip_ratio = prop_oneof![
        Just(Decimal::ONE),
        Just(Decimal::from(2)),
        Just(Decimal::from(3)),
        Just(Decimal::from(7)),
        Just(Decimal::new(5, 1)),
    ];

    (
        chip_ratio,
        prop::collection::vec((0i64..50_000i64, 1u32..1_000u32), 2..10),
    )
        .prop_map(|(chip_ratio, seats)| {
            let buy_ins: Vec<Decimal> = seats.iter().map(|(cents, _)| Decimal::new(*cents, 2)).collect();
            let total_chips = buy_ins.iter().copied().sum::<Decimal>() * chip_ratio;
            let total_weight: u32 = seats.iter().map(|(_, weight)| weight).sum();

            let mut remaining = total_chips;
            let last = seats.len() - 1;
            let players = seats
                .iter()
                .zip(buy_ins)
                .enumerate()
                .map(|(i, ((_, weight), buy_in))| {
                    let cash_out = if i == last {
                        remaining
                    } else {
                        (total_chips * Decimal::from(*weight) / Decimal::from(total_weight))
                            .round_dp_with_strategy(2, RoundingStrategy::ToZero)
                    };
                    remaining -= cash_out;
                    PlayerEntry::new(format!("player{}", i), buy_in, cash_out)
                })
                .collect();

            SessionRecord::new(Utc::now(), chip_ratio, players)
                .positions()
                .unwrap()
        })
}

/// Any input the engine must settle
fn settleable_positions_strategy() -> impl Strategy<Value = Vec<PlayerPosition>> {
    prop_oneof![
        balanced_positions_strategy(),
        dusty_positions_strategy(),
        session_positions_strategy(),
    ]
}

fn non_zero_count(positions: &[PlayerPosition]) -> usize {
    positions.iter().filter(|p| !p.amount.is_zero()).count()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Property: every balance is within ε of zero after settlement
    #[test]
    fn prop_settlement_zeroes_balances(positions in settleable_positions_strategy()) {
        let engine = NettingEngine::default();
        let transfers = engine.settle(&positions).unwrap();

        for (name, balance) in replay(&positions, &transfers) {
            prop_assert!(
                engine.tolerance().is_zero(balance),
                "{} left with {}", name, balance
            );
        }
        prop_assert!(engine.verify(&positions, &transfers).is_ok());
    }

    /// Property: at most n - 1 transfers for n non-zero positions
    #[test]
    fn prop_transfer_count_bound(positions in settleable_positions_strategy()) {
        let engine = NettingEngine::default();
        let transfers = engine.settle(&positions).unwrap();

        let non_zero = non_zero_count(&positions);
        prop_assert!(transfers.len() <= non_zero.saturating_sub(1));
    }

    /// Property: transfers are positive, never to oneself, and only move
    /// money from payers to receivers
    #[test]
    fn prop_transfers_well_formed(positions in settleable_positions_strategy()) {
        let engine = NettingEngine::default();
        let amount_of = |name: &session_core::PlayerName| {
            positions.iter().find(|p| &p.name == name).map(|p| p.amount)
        };

        for transfer in engine.settle(&positions).unwrap() {
            prop_assert!(transfer.amount > Decimal::ZERO);
            prop_assert_ne!(&transfer.from, &transfer.to);
            prop_assert!(amount_of(&transfer.from).unwrap() < Decimal::ZERO);
            prop_assert!(amount_of(&transfer.to).unwrap() > Decimal::ZERO);
        }
    }

    /// Property: settling twice gives identical output
    #[test]
    fn prop_settlement_deterministic(positions in settleable_positions_strategy()) {
        let engine = NettingEngine::default();

        let first = engine.settle(&positions).unwrap();
        let second = engine.settle(&positions).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Property: an offset beyond ε is always reported with its residual
    #[test]
    fn prop_imbalance_reported(
        positions in balanced_positions_strategy(),
        offset_cents in 2i64..100_000i64,
    ) {
        let engine = NettingEngine::default();
        let offset = Decimal::new(offset_cents, 2);

        let mut skewed = positions;
        skewed[0].amount += offset;

        match engine.settle(&skewed) {
            Err(Error::ImbalancedInput { residual }) => prop_assert_eq!(residual, offset),
            other => prop_assert!(false, "expected ImbalancedInput, got {:?}", other),
        }
    }
}
