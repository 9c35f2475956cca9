//! Currency quantization for settlement reports.
//!
//! A meal rate is rarely exact in the currency's atomic unit, so rounding each
//! member's meal cost independently would let the rounded costs drift away
//! from the bazaar total. Quantization rounds every derived cost to the atomic
//! unit, then repairs the residual drift with one-unit adjustments assigned
//! deterministically, so the rounded costs still sum to the rounded total
//! spend.

use crate::model::{MemberId, MemberSettlement, Money, SettlementReport};
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use thiserror::Error;

/// Rounding mode for cost quantization.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundingMode {
    /// Round half away from zero (e.g. 0.5 -> 1).
    HalfUp,
    /// Round half to nearest even number (banker's rounding).
    HalfEven,
}

/// Target currency for a quantized report: atomic-unit scale plus rounding
/// strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CurrencyContext {
    /// Decimal places of the atomic unit (0 for whole-taka ledgers, 2 for
    /// cent-style currencies).
    pub scale: u32,
    pub rounding_mode: RoundingMode,
}

impl CurrencyContext {
    /// Default context for taka ledgers (whole units, half-up).
    pub fn bdt_default() -> Self {
        Self {
            scale: 0,
            rounding_mode: RoundingMode::HalfUp,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum RoundingError {
    #[error("quantized amount is not representable at scale {scale}")]
    NonIntegral { scale: u32 },
    #[error("drift repair needs {required} adjustments but only {available} lines exist")]
    AdjustmentOverflow { required: usize, available: usize },
    #[error("drift repair failed to restore the spend identity")]
    RepairInvariantViolation,
    #[error("currency scale {scale} exceeds the supported maximum {max_supported}")]
    UnsupportedScale { scale: u32, max_supported: u32 },
}

const MAX_CURRENCY_SCALE: u32 = 22;

/// Quantizes every meal cost in `report` to the atomic unit of `context`,
/// preserving the identity `sum(meal_cost) == rounded total spend` exactly.
///
/// Adjustments go to the lines that gained most from rounding first (largest
/// rounding gain when units must be taken back, largest loss when units must
/// be handed out), with member id as the stable tie-break. Deposits are input
/// amounts, not derived ones, so `total_deposited` is left untouched;
/// `balance` is recomputed against the rounded cost. `meal_rate` stays a
/// rate, not a payable amount, and is not quantized.
pub fn quantize_report(
    report: &SettlementReport,
    context: CurrencyContext,
) -> Result<SettlementReport, RoundingError> {
    if context.scale > MAX_CURRENCY_SCALE {
        return Err(RoundingError::UnsupportedScale {
            scale: context.scale,
            max_supported: MAX_CURRENCY_SCALE,
        });
    }

    let atomic_unit = Decimal::new(1, context.scale);
    let strategy = match context.rounding_mode {
        RoundingMode::HalfUp => RoundingStrategy::MidpointAwayFromZero,
        RoundingMode::HalfEven => RoundingStrategy::MidpointNearestEven,
    };

    let mut entries: Vec<(MemberId, Decimal, i128, Decimal)> = report
        .lines
        .iter()
        .map(|(id, line)| {
            let original = line.meal_cost.as_decimal();
            let units = quantize_to_units(original, atomic_unit, strategy, context.scale)?;
            let diff = Decimal::from(units) * atomic_unit - original;
            Ok((*id, original, units, diff))
        })
        .collect::<Result<Vec<_>, RoundingError>>()?;

    let target_units = quantize_to_units(
        report.total_meal_cost().as_decimal(),
        atomic_unit,
        strategy,
        context.scale,
    )?;
    let rounded_units: i128 = entries.iter().map(|(_, _, units, _)| units).sum();
    let drift = rounded_units - target_units;

    if drift != 0 {
        let required = drift.unsigned_abs() as usize;
        if required > entries.len() {
            tracing::error!(
                drift,
                required,
                line_count = entries.len(),
                atomic_unit = %atomic_unit,
                rounding_mode = ?context.rounding_mode,
                "Drift repair would need more adjustments than report lines"
            );
            return Err(RoundingError::AdjustmentOverflow {
                required,
                available: entries.len(),
            });
        }

        // drift > 0: take a unit back from lines that gained most from
        // rounding. drift < 0: hand a unit to lines that lost most.
        let score_sign = if drift > 0 {
            Decimal::ONE
        } else {
            Decimal::NEGATIVE_ONE
        };
        let mut ranked: Vec<(usize, Decimal, MemberId)> = entries
            .iter()
            .enumerate()
            .map(|(idx, (id, _, _, diff))| (idx, *diff * score_sign, *id))
            .collect();
        ranked.sort_by(|(_, score_a, id_a), (_, score_b, id_b)| {
            score_b
                .cmp(score_a)
                .then_with(|| id_a.cmp(id_b))
        });

        let unit_adjustment: i128 = if drift > 0 { -1 } else { 1 };
        let selected: Vec<usize> = ranked
            .iter()
            .take(required)
            .map(|(idx, _, _)| *idx)
            .collect();
        for idx in &selected {
            entries[*idx].2 += unit_adjustment;
        }

        tracing::debug!(
            drift,
            adjustment_count = required,
            adjusted_members = ?selected
                .iter()
                .map(|idx| entries[*idx].0)
                .collect::<Vec<_>>(),
            line_count = entries.len(),
            atomic_unit = %atomic_unit,
            "Report quantization repaired rounding drift"
        );
    }

    let repaired_units: i128 = entries.iter().map(|(_, _, units, _)| units).sum();
    if repaired_units != target_units {
        tracing::error!(
            repaired_units,
            target_units,
            line_count = entries.len(),
            "Report quantization failed the spend identity check"
        );
        return Err(RoundingError::RepairInvariantViolation);
    }

    let lines = entries
        .into_iter()
        .map(|(id, _, units, _)| {
            let line = &report.lines[&id];
            let meal_cost = Money::from_decimal(Decimal::from(units) * atomic_unit);
            (
                id,
                MemberSettlement {
                    meals_consumed: line.meals_consumed,
                    total_deposited: line.total_deposited,
                    meal_cost,
                    balance: line.total_deposited - meal_cost,
                },
            )
        })
        .collect();

    Ok(SettlementReport {
        meal_rate: report.meal_rate,
        lines,
        orphans: report.orphans,
    })
}

fn quantize_to_units(
    original: Decimal,
    atomic_unit: Decimal,
    strategy: RoundingStrategy,
    scale: u32,
) -> Result<i128, RoundingError> {
    let units = (original / atomic_unit).round_dp_with_strategy(0, strategy);
    let Some(integral) = units.to_i128() else {
        return Err(RoundingError::NonIntegral { scale });
    };
    if Decimal::from(integral) != units {
        return Err(RoundingError::NonIntegral { scale });
    }
    Ok(integral)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        model::{BazaarExpense, Deposit, MealCount, MealRecord, Member, MemberStatus, Role},
        services::SettlementCalculator,
    };
    use chrono::NaiveDate;
    use indexmap::IndexMap;
    use rstest::rstest;

    fn day(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, day).expect("valid date")
    }

    fn member(id: u64) -> Member {
        Member {
            id: MemberId(id),
            name: format!("member-{id}"),
            role: Role::Member,
            status: MemberStatus::Active,
        }
    }

    fn report_for(
        member_meals: &[(u64, u32)],
        spend: i64,
        deposits: &[(u64, i64)],
    ) -> SettlementReport {
        let members: Vec<Member> = member_meals.iter().map(|(id, _)| member(*id)).collect();
        let portions: IndexMap<MemberId, MealCount> = member_meals
            .iter()
            .map(|(id, count)| (MemberId(*id), MealCount::from_u32(*count)))
            .collect();
        let records = [MealRecord::try_new(day(1), portions).expect("valid record")];
        let expenses =
            [BazaarExpense::try_new(day(1), Money::from_i64(spend), "groceries")
                .expect("valid expense")];
        let deposits: Vec<Deposit> = deposits
            .iter()
            .map(|(id, amount)| {
                Deposit::try_new(day(1), MemberId(*id), Money::from_i64(*amount))
                    .expect("valid deposit")
            })
            .collect();
        SettlementCalculator::settle(&members, &records, &expenses, &deposits)
    }

    #[test]
    fn repeating_rate_quantizes_to_exact_spend() {
        // 1000 over 3 equal meals: each cost is 333.33.., naive rounding
        // loses a unit.
        let report = report_for(&[(1, 1), (2, 1), (3, 1)], 1000, &[]);

        let quantized =
            quantize_report(&report, CurrencyContext::bdt_default()).expect("quantize");

        assert_eq!(quantized.total_meal_cost(), Money::from_i64(1000));
        let costs: Vec<Money> = quantized.lines.values().map(|line| line.meal_cost).collect();
        assert_eq!(
            costs,
            vec![
                Money::from_i64(334),
                Money::from_i64(333),
                Money::from_i64(333)
            ]
        );
    }

    #[test]
    fn balances_are_recomputed_from_rounded_costs() {
        let report = report_for(&[(1, 1), (2, 1), (3, 1)], 1000, &[(1, 500)]);

        let quantized =
            quantize_report(&report, CurrencyContext::bdt_default()).expect("quantize");

        let line = quantized.lines.get(&MemberId(1)).expect("line");
        assert_eq!(line.total_deposited, Money::from_i64(500));
        assert_eq!(line.balance, Money::from_i64(500) - line.meal_cost);
        assert_eq!(line.balance, Money::from_i64(166));
    }

    #[test]
    fn integral_costs_pass_through_unchanged() {
        let report = report_for(&[(1, 3), (2, 3)], 1200, &[]);

        let quantized =
            quantize_report(&report, CurrencyContext::bdt_default()).expect("quantize");

        assert_eq!(quantized, report);
    }

    #[rstest]
    #[case::half_up(RoundingMode::HalfUp, 62, 63)]
    #[case::half_even(RoundingMode::HalfEven, 63, 62)]
    fn midpoint_costs_follow_the_rounding_mode(
        #[case] mode: RoundingMode,
        #[case] expected_first: i64,
        #[case] expected_second: i64,
    ) {
        // 125 over 2 meals: each cost lands exactly on the .5 midpoint.
        let report = report_for(&[(1, 1), (2, 1)], 125, &[]);
        let context = CurrencyContext {
            scale: 0,
            rounding_mode: mode,
        };

        let quantized = quantize_report(&report, context).expect("quantize");

        assert_eq!(
            quantized.lines.get(&MemberId(1)).expect("line").meal_cost,
            Money::from_i64(expected_first)
        );
        assert_eq!(
            quantized.lines.get(&MemberId(2)).expect("line").meal_cost,
            Money::from_i64(expected_second)
        );
        assert_eq!(quantized.total_meal_cost(), Money::from_i64(125));
    }

    #[test]
    fn scale_two_keeps_cent_precision() {
        let report = report_for(&[(1, 1), (2, 1), (3, 1)], 100, &[]);
        let context = CurrencyContext {
            scale: 2,
            rounding_mode: RoundingMode::HalfUp,
        };

        let quantized = quantize_report(&report, context).expect("quantize");

        assert_eq!(quantized.total_meal_cost(), Money::from_i64(100));
        let costs: Vec<Money> = quantized.lines.values().map(|line| line.meal_cost).collect();
        assert_eq!(
            costs,
            vec![Money::new(3334, 2), Money::new(3333, 2), Money::new(3333, 2)]
        );
    }

    #[test]
    fn unsupported_scale_is_rejected() {
        let report = report_for(&[(1, 1)], 100, &[]);
        let context = CurrencyContext {
            scale: MAX_CURRENCY_SCALE + 1,
            rounding_mode: RoundingMode::HalfUp,
        };

        assert_eq!(
            quantize_report(&report, context),
            Err(RoundingError::UnsupportedScale {
                scale: MAX_CURRENCY_SCALE + 1,
                max_supported: MAX_CURRENCY_SCALE,
            })
        );
    }

    #[test]
    fn empty_report_quantizes_to_itself() {
        let report = SettlementCalculator::settle(&[], &[], &[], &[]);

        let quantized =
            quantize_report(&report, CurrencyContext::bdt_default()).expect("quantize");

        assert!(quantized.lines.is_empty());
    }

    #[test]
    fn quantization_is_deterministic() {
        let report = report_for(&[(1, 2), (2, 1), (3, 4)], 997, &[(2, 350)]);

        let first = quantize_report(&report, CurrencyContext::bdt_default()).expect("quantize");
        let second = quantize_report(&report, CurrencyContext::bdt_default()).expect("quantize");

        assert_eq!(first, second);
    }
}
