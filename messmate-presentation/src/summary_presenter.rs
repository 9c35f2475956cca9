use crate::{
    settlement_presenter::{format_money, format_signed_money, member_label},
    svg_table::{Alignment, SvgTable},
};
use messmate_application::{MealShare, MemberNames, PeriodSummary};
use messmate_i18n as i18n;
use rust_decimal::Decimal;
use std::borrow::Cow;

pub struct SummaryPresenter;

pub struct SummaryView {
    pub summary_table_svg: String,
    pub shares_table_svg: Option<String>,
}

impl SummaryPresenter {
    pub fn render(summary: &PeriodSummary) -> String {
        SvgTable::new()
            .column(
                format!("{} — {}", summary.range.start, summary.range.end),
                Alignment::Left,
            )
            .column("", Alignment::Right)
            .row([
                Cow::Borrowed(i18n::TOTAL_MEAL_UNITS),
                Cow::Owned(summary.total_meal_units.to_string()),
            ])
            .row([
                Cow::Borrowed(i18n::TOTAL_BAZAAR_SPEND),
                Cow::Owned(format_money(summary.total_bazaar_spend)),
            ])
            .row([
                Cow::Borrowed(i18n::TOTAL_DEPOSITS),
                Cow::Owned(format_money(summary.total_deposited)),
            ])
            .row([
                Cow::Borrowed(i18n::MEAL_RATE),
                Cow::Owned(format_money(summary.meal_rate)),
            ])
            .row([
                Cow::Borrowed(i18n::REMAINING_BALANCE),
                Cow::Owned(format_signed_money(summary.remaining_balance)),
            ])
            .row([
                Cow::Borrowed(i18n::MEMBERS),
                Cow::Owned(summary.member_count.to_string()),
            ])
            .row([
                Cow::Borrowed(i18n::AVERAGE_MEALS_PER_MEMBER),
                Cow::Owned(summary.average_meals_per_member.to_string()),
            ])
            .row([
                Cow::Borrowed(i18n::EXPENSES_RECORDED),
                Cow::Owned(summary.expense_count.to_string()),
            ])
            .row([
                Cow::Borrowed(i18n::DEPOSITS_RECORDED),
                Cow::Owned(summary.deposit_count.to_string()),
            ])
            .build()
    }

    pub fn render_with_shares(
        summary: &PeriodSummary,
        shares: &[MealShare],
        names: &dyn MemberNames,
    ) -> SummaryView {
        let shares_table_svg =
            (!shares.is_empty()).then(|| Self::build_shares_table(shares, names));
        SummaryView {
            summary_table_svg: Self::render(summary),
            shares_table_svg,
        }
    }

    fn build_shares_table(shares: &[MealShare], names: &dyn MemberNames) -> String {
        let mut table = SvgTable::new()
            .column(i18n::MEMBER, Alignment::Left)
            .column(i18n::MEALS, Alignment::Right)
            .column(i18n::SHARE, Alignment::Right)
            .column(i18n::COST_SHARE, Alignment::Right);

        for share in shares {
            table = table.row([
                member_label(share.member_id, names),
                Cow::Owned(share.meals.to_string()),
                Cow::Owned(format_percent(share.share_of_total)),
                Cow::Owned(format_money(share.cost_share)),
            ]);
        }

        table.build()
    }
}

fn format_percent(fraction: Decimal) -> String {
    format!("{}%", (fraction * Decimal::ONE_HUNDRED).round_dp(1))
}
