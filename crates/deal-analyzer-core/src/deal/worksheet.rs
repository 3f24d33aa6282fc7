use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::metrics::compute_metrics;
use super::model::{DealInput, DealMetrics, LoanType};
use super::reconcile::reconcile_in_place;
use crate::types::{Money, Percent};

/// A single field edit, as a form would emit it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum DealEdit {
    PurchasePrice(Money),
    ClosingCosts(Money),
    RehabCosts(Money),
    LoanType(LoanType),
    DownPaymentPercent(Percent),
    DownPaymentAmount(Money),
    InterestRate(Percent),
    LoanTerm(Decimal),
    GrossMonthlyRent(Money),
    OtherMonthlyIncome(Money),
    PropertyTaxes(Money),
    Insurance(Money),
    Utilities(Money),
    OtherExpenses(Money),
    Vacancy(Percent),
    Repairs(Percent),
    Capex(Percent),
    Management(Percent),
}

impl DealEdit {
    fn apply_to(self, input: &mut DealInput) {
        match self {
            DealEdit::PurchasePrice(v) => input.purchase_price = v,
            DealEdit::ClosingCosts(v) => input.closing_costs = v,
            DealEdit::RehabCosts(v) => input.rehab_costs = v,
            DealEdit::LoanType(v) => input.loan_type = v,
            DealEdit::DownPaymentPercent(v) => input.down_payment_percent = v,
            DealEdit::DownPaymentAmount(v) => input.down_payment_amount = v,
            DealEdit::InterestRate(v) => input.interest_rate = v,
            DealEdit::LoanTerm(v) => input.loan_term = v,
            DealEdit::GrossMonthlyRent(v) => input.gross_monthly_rent = v,
            DealEdit::OtherMonthlyIncome(v) => input.other_monthly_income = v,
            DealEdit::PropertyTaxes(v) => input.property_taxes = v,
            DealEdit::Insurance(v) => input.insurance = v,
            DealEdit::Utilities(v) => input.utilities = v,
            DealEdit::OtherExpenses(v) => input.other_expenses = v,
            DealEdit::Vacancy(v) => input.vacancy = v,
            DealEdit::Repairs(v) => input.repairs = v,
            DealEdit::Capex(v) => input.capex = v,
            DealEdit::Management(v) => input.management = v,
        }
    }

    /// Cost edits and edits to the authoritative down-payment field re-derive
    /// the other field. Toggling `loan_type` does not: the newly inactive
    /// field keeps its last value until the next such edit.
    fn needs_reconcile(&self, loan_type: LoanType) -> bool {
        match self {
            DealEdit::PurchasePrice(_) | DealEdit::ClosingCosts(_) | DealEdit::RehabCosts(_) => {
                true
            }
            DealEdit::DownPaymentPercent(_) => loan_type == LoanType::Percentage,
            DealEdit::DownPaymentAmount(_) => loan_type == LoanType::Amount,
            _ => false,
        }
    }
}

/// The host loop around the reconciler and the metrics engine: holds the
/// current deal, applies edits, and keeps the metrics current.
#[derive(Debug, Clone)]
pub struct DealWorksheet {
    input: DealInput,
    metrics: DealMetrics,
}

impl DealWorksheet {
    pub fn new(mut input: DealInput) -> Self {
        reconcile_in_place(&mut input);
        let metrics = compute_metrics(&input);
        DealWorksheet { input, metrics }
    }

    pub fn input(&self) -> &DealInput {
        &self.input
    }

    pub fn metrics(&self) -> &DealMetrics {
        &self.metrics
    }

    /// Apply one edit, reconcile if the edit calls for it, and recompute the
    /// metrics. Returns `true` when the derived down-payment field changed.
    pub fn apply(&mut self, edit: DealEdit) -> bool {
        edit.apply_to(&mut self.input);
        let reconciled =
            edit.needs_reconcile(self.input.loan_type) && reconcile_in_place(&mut self.input);
        self.metrics = compute_metrics(&self.input);
        debug!(?edit, reconciled, "applied deal edit");
        reconciled
    }

    /// Apply edits in order. Returns `true` if any of them changed the
    /// derived down-payment field.
    pub fn apply_all(&mut self, edits: impl IntoIterator<Item = DealEdit>) -> bool {
        edits
            .into_iter()
            .fold(false, |changed, edit| self.apply(edit) || changed)
    }

    pub fn into_parts(self) -> (DealInput, DealMetrics) {
        (self.input, self.metrics)
    }
}

impl Default for DealWorksheet {
    fn default() -> Self {
        DealWorksheet::new(DealInput::default())
    }
}
