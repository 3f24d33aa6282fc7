use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::Value;
use std::time::Instant;
use tracing::debug;

use deal_analyzer_core::deal::validate::validate_deal_input;
use deal_analyzer_core::{
    analyze_deal, compute_metrics, reconcile, with_metadata, DealEdit, DealInput, DealWorksheet,
    LoanType,
};

use crate::input;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LoanTypeArg {
    /// Down payment given as a percent of total project cost
    Percentage,
    /// Down payment given as a dollar amount
    Amount,
}

impl From<LoanTypeArg> for LoanType {
    fn from(arg: LoanTypeArg) -> Self {
        match arg {
            LoanTypeArg::Percentage => LoanType::Percentage,
            LoanTypeArg::Amount => LoanType::Amount,
        }
    }
}

/// Deal input: a file, stdin, or flags applied over the default deal
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct DealArgs {
    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Purchase price
    #[arg(long)]
    pub purchase_price: Option<Decimal>,

    /// Closing costs
    #[arg(long)]
    pub closing_costs: Option<Decimal>,

    /// Rehab / renovation budget
    #[arg(long)]
    pub rehab_costs: Option<Decimal>,

    /// Which down-payment figure is authoritative
    #[arg(long, value_enum)]
    pub loan_type: Option<LoanTypeArg>,

    /// Down payment as a percent of total project cost (e.g. 20)
    #[arg(long, alias = "down-pct")]
    pub down_payment_percent: Option<Decimal>,

    /// Down payment in dollars
    #[arg(long, alias = "down")]
    pub down_payment_amount: Option<Decimal>,

    /// Annual interest rate in percent (e.g. 6.5)
    #[arg(long, alias = "rate")]
    pub interest_rate: Option<Decimal>,

    /// Loan term in years (fractional terms such as 15.5 are allowed)
    #[arg(long)]
    pub loan_term: Option<Decimal>,

    /// Gross monthly rent
    #[arg(long, alias = "rent")]
    pub gross_monthly_rent: Option<Decimal>,

    /// Other monthly income
    #[arg(long)]
    pub other_monthly_income: Option<Decimal>,

    /// Monthly property taxes
    #[arg(long, alias = "taxes")]
    pub property_taxes: Option<Decimal>,

    /// Monthly insurance
    #[arg(long)]
    pub insurance: Option<Decimal>,

    /// Monthly owner-paid utilities
    #[arg(long)]
    pub utilities: Option<Decimal>,

    /// Other monthly expenses
    #[arg(long)]
    pub other_expenses: Option<Decimal>,

    /// Vacancy, percent of potential gross income
    #[arg(long)]
    pub vacancy: Option<Decimal>,

    /// Repairs, percent of gross operating income
    #[arg(long)]
    pub repairs: Option<Decimal>,

    /// CapEx reserve, percent of gross operating income
    #[arg(long)]
    pub capex: Option<Decimal>,

    /// Management fee, percent of gross operating income
    #[arg(long)]
    pub management: Option<Decimal>,
}

impl DealArgs {
    /// Flags as worksheet edits. The loan type goes first so a down-payment
    /// flag lands on the field it makes authoritative; costs precede the
    /// down payment so it is derived from the final project cost.
    fn edits(&self) -> Vec<DealEdit> {
        let loan_type = self.loan_type.map(|t| DealEdit::LoanType(t.into()));
        [
            loan_type,
            self.purchase_price.map(DealEdit::PurchasePrice),
            self.closing_costs.map(DealEdit::ClosingCosts),
            self.rehab_costs.map(DealEdit::RehabCosts),
            self.down_payment_percent.map(DealEdit::DownPaymentPercent),
            self.down_payment_amount.map(DealEdit::DownPaymentAmount),
            self.interest_rate.map(DealEdit::InterestRate),
            self.loan_term.map(DealEdit::LoanTerm),
            self.gross_monthly_rent.map(DealEdit::GrossMonthlyRent),
            self.other_monthly_income.map(DealEdit::OtherMonthlyIncome),
            self.property_taxes.map(DealEdit::PropertyTaxes),
            self.insurance.map(DealEdit::Insurance),
            self.utilities.map(DealEdit::Utilities),
            self.other_expenses.map(DealEdit::OtherExpenses),
            self.vacancy.map(DealEdit::Vacancy),
            self.repairs.map(DealEdit::Repairs),
            self.capex.map(DealEdit::Capex),
            self.management.map(DealEdit::Management),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    fn deal_from_flags(&self) -> DealInput {
        let mut worksheet = DealWorksheet::default();
        worksheet.apply_all(self.edits());
        let (deal, _) = worksheet.into_parts();
        deal
    }
}

fn resolve_input(args: &DealArgs) -> Result<DealInput, Box<dyn std::error::Error>> {
    if let Some(ref path) = args.input {
        debug!(path = %path, "reading deal from file");
        input::file::read_input(path)
    } else if let Some(deal) = input::stdin::read_stdin()? {
        debug!("read deal from stdin");
        Ok(deal)
    } else {
        debug!("building deal from flags over defaults");
        Ok(args.deal_from_flags())
    }
}

pub fn run_analyze(args: DealArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let deal = resolve_input(&args)?;
    let result = analyze_deal(&deal)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_metrics(args: DealArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let start = Instant::now();
    let deal = resolve_input(&args)?;
    validate_deal_input(&deal)?;

    let reconciled = reconcile(&deal);
    let metrics = compute_metrics(&reconciled);
    let result = with_metadata(
        "Rental Property Metrics (Year 1)",
        &reconciled,
        Vec::new(),
        start.elapsed().as_micros() as u64,
        metrics,
    );
    Ok(serde_json::to_value(result)?)
}

pub fn run_reconcile(args: DealArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let start = Instant::now();
    let deal = resolve_input(&args)?;
    validate_deal_input(&deal)?;

    let reconciled = reconcile(&deal);
    let mut warnings = Vec::new();
    if reconciled != deal {
        let derived = match reconciled.loan_type {
            LoanType::Percentage => "down_payment_amount",
            LoanType::Amount => "down_payment_percent",
        };
        warnings.push(format!("{derived} was out of date and has been re-derived"));
    }

    let result = with_metadata(
        "Down Payment Reconciliation",
        &deal,
        warnings,
        start.elapsed().as_micros() as u64,
        reconciled,
    );
    Ok(serde_json::to_value(result)?)
}

pub fn run_defaults() -> Result<Value, Box<dyn std::error::Error>> {
    Ok(serde_json::to_value(DealInput::default())?)
}
