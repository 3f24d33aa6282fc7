use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::math::percent_of;
use super::metrics::OperatingExpenses;
use super::model::{DealInput, DealMetrics};
use crate::types::{Money, Percent};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Operating-expense line items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    PropertyTaxes,
    Insurance,
    Utilities,
    OtherExpenses,
    Repairs,
    Capex,
    Management,
}

impl ExpenseCategory {
    pub fn label(&self) -> &'static str {
        match self {
            ExpenseCategory::PropertyTaxes => "Taxes",
            ExpenseCategory::Insurance => "Insurance",
            ExpenseCategory::Utilities => "Utilities",
            ExpenseCategory::OtherExpenses => "Other",
            ExpenseCategory::Repairs => "Repairs",
            ExpenseCategory::Capex => "CapEx",
            ExpenseCategory::Management => "Management",
        }
    }
}

/// One slice of the annual operating-expense total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseLine {
    pub category: ExpenseCategory,
    pub label: String,
    /// Annual amount
    pub annual_amount: Money,
    /// Share of total operating expenses (0-100)
    pub share_of_total: Percent,
}

/// Where the gross operating income goes in year one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowSummary {
    pub gross_operating_income: Money,
    pub total_operating_expenses: Money,
    pub annual_debt_service: Money,
    pub annual_cash_flow: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Annual operating expenses by category, largest first. Categories with no
/// cost are omitted.
pub fn expense_breakdown(input: &DealInput, metrics: &DealMetrics) -> Vec<ExpenseLine> {
    let expenses = OperatingExpenses::annualize(input, metrics.gross_operating_income);
    let total = expenses.total();

    let mut lines: Vec<ExpenseLine> = [
        (ExpenseCategory::PropertyTaxes, expenses.property_taxes),
        (ExpenseCategory::Insurance, expenses.insurance),
        (ExpenseCategory::Utilities, expenses.utilities),
        (ExpenseCategory::OtherExpenses, expenses.other_expenses),
        (ExpenseCategory::Repairs, expenses.repairs),
        (ExpenseCategory::Capex, expenses.capex),
        (ExpenseCategory::Management, expenses.management),
    ]
    .into_iter()
    .filter(|(_, amount)| *amount > Decimal::ZERO)
    .map(|(category, annual_amount)| ExpenseLine {
        category,
        label: category.label().to_string(),
        annual_amount,
        share_of_total: percent_of(annual_amount, total),
    })
    .collect();

    // Stable sort keeps declaration order among equal amounts.
    lines.sort_by(|a, b| b.annual_amount.cmp(&a.annual_amount));
    lines
}

pub fn cash_flow_summary(metrics: &DealMetrics) -> CashFlowSummary {
    CashFlowSummary {
        gross_operating_income: metrics.gross_operating_income,
        total_operating_expenses: metrics.total_operating_expenses,
        annual_debt_service: metrics.annual_debt_service,
        annual_cash_flow: metrics.annual_cash_flow,
    }
}
