use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::math::{percent_of, saturating_div, share};
use super::model::{DealInput, DealMetrics, DebtCoverage};
use crate::types::{Money, Percent};

const MONTHS_PER_YEAR: Decimal = dec!(12);
const HUNDRED: Decimal = dec!(100);

// ---------------------------------------------------------------------------
// Operating expenses
// ---------------------------------------------------------------------------

/// Annual operating expenses by line item. Fixed items are the monthly inputs
/// annualized; variable items are percentages of gross operating income.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatingExpenses {
    pub property_taxes: Money,
    pub insurance: Money,
    pub utilities: Money,
    pub other_expenses: Money,
    pub repairs: Money,
    pub capex: Money,
    pub management: Money,
}

impl OperatingExpenses {
    pub fn annualize(input: &DealInput, gross_operating_income: Money) -> Self {
        OperatingExpenses {
            property_taxes: input.property_taxes.saturating_mul(MONTHS_PER_YEAR),
            insurance: input.insurance.saturating_mul(MONTHS_PER_YEAR),
            utilities: input.utilities.saturating_mul(MONTHS_PER_YEAR),
            other_expenses: input.other_expenses.saturating_mul(MONTHS_PER_YEAR),
            repairs: share(gross_operating_income, input.repairs),
            capex: share(gross_operating_income, input.capex),
            management: share(gross_operating_income, input.management),
        }
    }

    pub fn total(&self) -> Money {
        [
            self.property_taxes,
            self.insurance,
            self.utilities,
            self.other_expenses,
            self.repairs,
            self.capex,
            self.management,
        ]
        .into_iter()
        .fold(Decimal::ZERO, Decimal::saturating_add)
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Derive year-one metrics from a reconciled deal.
///
/// Total over every input: division-by-zero paths map to zero, or to
/// [`DebtCoverage::Unbounded`] for a deal without debt service, and results
/// beyond the Decimal range clamp to `Decimal::MAX` / `Decimal::MIN`. A down
/// payment larger than the project cost yields a negative `loan_amount`,
/// which is reported as-is.
pub fn compute_metrics(input: &DealInput) -> DealMetrics {
    let total_project_cost = input.total_project_cost();
    let down_payment = input.down_payment().amount(total_project_cost);
    let loan_amount = total_project_cost.saturating_sub(down_payment);
    let total_investment = down_payment
        .saturating_add(input.closing_costs)
        .saturating_add(input.rehab_costs);

    // --- Income ---
    let potential_gross_income = input
        .gross_monthly_rent
        .saturating_add(input.other_monthly_income)
        .saturating_mul(MONTHS_PER_YEAR);
    let gross_operating_income = potential_gross_income
        .saturating_sub(share(potential_gross_income, input.vacancy));

    // --- Expenses ---
    let total_operating_expenses =
        OperatingExpenses::annualize(input, gross_operating_income).total();
    let net_operating_income = gross_operating_income.saturating_sub(total_operating_expenses);

    // --- Debt service ---
    let monthly_mortgage_payment =
        monthly_payment(loan_amount, input.interest_rate, input.loan_term);
    let annual_debt_service = monthly_mortgage_payment.saturating_mul(MONTHS_PER_YEAR);

    let annual_cash_flow = net_operating_income.saturating_sub(annual_debt_service);
    let monthly_cash_flow = annual_cash_flow / MONTHS_PER_YEAR;

    // --- Returns ---
    let cap_rate = percent_of(net_operating_income, input.purchase_price);
    let cash_on_cash_return = percent_of(annual_cash_flow, total_investment);
    let dscr = DebtCoverage::from_debt_service(net_operating_income, annual_debt_service);

    debug!(
        noi = %net_operating_income,
        annual_cash_flow = %annual_cash_flow,
        cap_rate = %cap_rate,
        dscr = %dscr,
        "computed deal metrics"
    );

    DealMetrics {
        total_investment,
        loan_amount,
        gross_operating_income,
        total_operating_expenses,
        net_operating_income,
        monthly_mortgage_payment,
        annual_debt_service,
        monthly_cash_flow,
        annual_cash_flow,
        cap_rate,
        cash_on_cash_return,
        dscr,
    }
}

// ---------------------------------------------------------------------------
// Mortgage helpers
// ---------------------------------------------------------------------------

/// Standard fixed-rate mortgage payment: P * r(1+r)^n / ((1+r)^n - 1), with
/// `r` the monthly rate and `n` the number of monthly payments. Fractional
/// terms are allowed.
///
/// No principal, a zero rate, or a zero term all give a payment of zero;
/// zero-rate loans are not amortized straight-line.
pub fn monthly_payment(principal: Money, annual_rate: Percent, term_years: Decimal) -> Money {
    let monthly_rate = annual_rate / HUNDRED / MONTHS_PER_YEAR;
    let total_months = term_years.saturating_mul(MONTHS_PER_YEAR);

    if principal <= Decimal::ZERO || monthly_rate <= Decimal::ZERO || total_months <= Decimal::ZERO
    {
        return Decimal::ZERO;
    }

    let base = Decimal::ONE + monthly_rate;
    let compound = if total_months.fract().is_zero() {
        total_months.to_u64().and_then(|n| base.checked_powu(n))
    } else {
        base.checked_powd(total_months)
    };

    // Written as P * r * (c / (c - 1)) so large compound factors stay in range.
    match compound {
        Some(c) if c > Decimal::ONE => principal
            .saturating_mul(monthly_rate)
            .saturating_mul(saturating_div(c, c - Decimal::ONE)),
        // Rate too small to register in 28 digits: the r -> 0 limit.
        Some(_) => saturating_div(principal, total_months),
        // Compound factor overflowed: c / (c - 1) -> 1.
        None => principal.saturating_mul(monthly_rate),
    }
}
