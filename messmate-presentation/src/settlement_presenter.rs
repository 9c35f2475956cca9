use crate::svg_table::{Alignment, SvgTable};
use messmate_application::{MemberNames, SettlementResult};
use messmate_domain::{MemberId, Money};
use messmate_i18n as i18n;
use std::borrow::Cow;

pub struct SettlementPresenter;

pub struct SettlementView {
    pub balance_table_svg: String,
    /// Present when ledger entries referenced ids outside the roster.
    pub orphan_note: Option<String>,
}

impl SettlementPresenter {
    pub fn render(result: &SettlementResult) -> SettlementView {
        Self::render_with_names(result, &NoNames)
    }

    pub fn render_with_names(result: &SettlementResult, names: &dyn MemberNames) -> SettlementView {
        let mut table = SvgTable::new()
            .column(i18n::MEMBER, Alignment::Left)
            .column(i18n::MEALS, Alignment::Right)
            .column(i18n::DEPOSITED, Alignment::Right)
            .column(i18n::MEAL_COST, Alignment::Right)
            .column(i18n::BALANCE, Alignment::Right);

        for (member_id, line) in &result.report.lines {
            table = table.row([
                member_label(*member_id, names),
                Cow::Owned(line.meals_consumed.to_string()),
                Cow::Owned(format_money(line.total_deposited)),
                Cow::Owned(format_money(line.meal_cost)),
                Cow::Owned(format_signed_money(line.balance)),
            ]);
        }

        let orphans = result.report.orphans;
        let orphan_note = (!orphans.is_empty()).then(|| {
            format!(
                "{}: {}",
                i18n::ORPHANED_ENTRIES,
                orphans.deposits + orphans.meal_entries
            )
        });

        SettlementView {
            balance_table_svg: table.build(),
            orphan_note,
        }
    }
}

pub fn format_money(amount: Money) -> String {
    format!("{}{amount}", i18n::CURRENCY)
}

pub fn format_signed_money(amount: Money) -> String {
    let sign = if amount.is_negative() { "" } else { "+" };
    format!("{sign}{}{amount}", i18n::CURRENCY)
}

pub(crate) fn member_label<'a>(
    member_id: MemberId,
    names: &'a dyn MemberNames,
) -> Cow<'a, str> {
    match names.display_name(member_id) {
        Some(name) => Cow::Borrowed(name),
        None => Cow::Owned(format!("member #{member_id}")),
    }
}

struct NoNames;

impl MemberNames for NoNames {
    fn display_name(&self, _member_id: MemberId) -> Option<&str> {
        None
    }
}
