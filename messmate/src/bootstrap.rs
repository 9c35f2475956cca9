use chrono::NaiveDate;
use messmate_application::{
    BazaarLedger, DepositLedger, MealLog, MemberDirectory, MemberNames, MessId, ReportBuilder,
    ReportError, ReportingPeriod, SessionContext,
};
use messmate_domain::{CurrencyContext, Role, RoundingMode};
use messmate_i18n as i18n;
use messmate_infrastructure::{SAMPLE_SEED, SeedError, SeededLedgers, load_seed, seed_ledgers};
use messmate_presentation::{SettlementPresenter, SummaryPresenter, settlement_presenter};
use std::{env, fs, path::PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Seed(#[from] SeedError),
    #[error(transparent)]
    Report(#[from] ReportError),
    #[error("failed to write report output: {0}")]
    Io(#[from] std::io::Error),
}

/// Runtime knobs, all optional. `MESSMATE_SEED_FILE` points at a ledger seed
/// (the bundled demo dataset otherwise), `MESSMATE_ANCHOR_DATE` pins the
/// reporting month (latest ledger activity otherwise), and
/// `MESSMATE_CURRENCY_SCALE` sets the atomic unit for quantized output.
pub struct AppConfig {
    pub anchor: Option<NaiveDate>,
    pub currency: CurrencyContext,
    pub output_dir: PathBuf,
    pub seed_path: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();

        let anchor = env::var("MESSMATE_ANCHOR_DATE")
            .ok()
            .and_then(|raw| raw.parse().ok());
        let scale = env::var("MESSMATE_CURRENCY_SCALE")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(0);
        let output_dir = env::var("MESSMATE_OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."));
        let seed_path = env::var("MESSMATE_SEED_FILE").ok().map(PathBuf::from);

        Self {
            anchor,
            currency: CurrencyContext {
                scale,
                rounding_mode: RoundingMode::HalfUp,
            },
            output_dir,
            seed_path,
        }
    }
}

pub fn init_logging() {
    tracing_subscriber::fmt::init();
}

pub fn run(config: AppConfig) -> Result<(), AppError> {
    let seed_json = match &config.seed_path {
        Some(path) => fs::read_to_string(path)?,
        None => SAMPLE_SEED.to_string(),
    };
    let ledgers = seed_ledgers(load_seed(&seed_json)?)?;

    let anchor = config
        .anchor
        .or_else(|| latest_activity_date(&ledgers))
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    let session = session_for(&ledgers);
    let builder = ReportBuilder::new(
        &ledgers.directory,
        &ledgers.meal_log,
        &ledgers.bazaar,
        &ledgers.deposits,
    );
    let builder = match session {
        Some(session) => builder.for_session(session),
        None => builder,
    };

    let settlement = builder.quantized_settlement_for_period(
        ReportingPeriod::CurrentMonth,
        anchor,
        config.currency,
    )?;
    let summary = builder.period_summary(ReportingPeriod::CurrentMonth, anchor);
    let shares = builder.meal_shares(ReportingPeriod::CurrentMonth, anchor);

    let settlement_view =
        SettlementPresenter::render_with_names(&settlement, &ledgers.directory);
    let summary_view =
        SummaryPresenter::render_with_shares(&summary, &shares, &ledgers.directory);

    fs::create_dir_all(&config.output_dir)?;
    let settlement_path = config.output_dir.join("settlement.svg");
    fs::write(&settlement_path, &settlement_view.balance_table_svg)?;
    let summary_path = config.output_dir.join("summary.svg");
    fs::write(&summary_path, &summary_view.summary_table_svg)?;
    if let Some(shares_table) = &summary_view.shares_table_svg {
        fs::write(config.output_dir.join("shares.svg"), shares_table)?;
    }
    tracing::info!(
        output_dir = %config.output_dir.display(),
        anchor = %anchor,
        "Report tables written"
    );

    println!("{} — {}", summary.range.start, summary.range.end);
    println!(
        "  {}: {}",
        i18n::MEAL_RATE,
        settlement_presenter::format_money(summary.meal_rate)
    );
    println!("  {}: {}", i18n::TOTAL_MEAL_UNITS, summary.total_meal_units);
    println!(
        "  {}: {}",
        i18n::TOTAL_BAZAAR_SPEND,
        settlement_presenter::format_money(summary.total_bazaar_spend)
    );
    println!(
        "  {}: {}",
        i18n::TOTAL_DEPOSITS,
        settlement_presenter::format_money(summary.total_deposited)
    );
    println!(
        "  {}: {}",
        i18n::REMAINING_BALANCE,
        settlement_presenter::format_signed_money(summary.remaining_balance)
    );
    println!("{}:", i18n::BALANCE);
    for (member_id, line) in &settlement.report.lines {
        let name = match ledgers.directory.display_name(*member_id) {
            Some(name) => name.to_string(),
            None => format!("member #{member_id}"),
        };
        println!(
            "  {name}: {}",
            settlement_presenter::format_signed_money(line.balance)
        );
    }
    if let Some(note) = &settlement_view.orphan_note {
        println!("  ({note})");
    }

    Ok(())
}

fn latest_activity_date(ledgers: &SeededLedgers) -> Option<NaiveDate> {
    let record_dates = ledgers.meal_log.records().into_iter().map(|r| r.date);
    let expense_dates = ledgers.bazaar.expenses().into_iter().map(|e| e.date);
    let deposit_dates = ledgers.deposits.deposits().into_iter().map(|d| d.date);
    record_dates.chain(expense_dates).chain(deposit_dates).max()
}

fn session_for(ledgers: &SeededLedgers) -> Option<SessionContext> {
    let roster = ledgers.directory.roster();
    roster
        .iter()
        .find(|member| member.role == Role::Manager)
        .or_else(|| roster.first())
        .map(|member| SessionContext::new(member.id, MessId(1)))
}
