use tracing::debug;

use super::model::{DealInput, LoanType};

/// Re-derive the non-authoritative down-payment field from the authoritative
/// one, writing it only when the value actually changes.
///
/// Returns `true` if a field was written. Every other field is untouched.
pub fn reconcile_in_place(input: &mut DealInput) -> bool {
    let total_project_cost = input.total_project_cost();
    let basis = input.down_payment();

    match input.loan_type {
        LoanType::Percentage => {
            let amount = basis.amount(total_project_cost);
            if amount == input.down_payment_amount {
                return false;
            }
            debug!(
                from = %input.down_payment_amount,
                to = %amount,
                "reconciled down payment amount"
            );
            input.down_payment_amount = amount;
        }
        LoanType::Amount => {
            let percent = basis.percent(total_project_cost);
            if percent == input.down_payment_percent {
                return false;
            }
            debug!(
                from = %input.down_payment_percent,
                to = %percent,
                "reconciled down payment percent"
            );
            input.down_payment_percent = percent;
        }
    }
    true
}

/// Return a copy of `input` with its down-payment fields made consistent.
pub fn reconcile(input: &DealInput) -> DealInput {
    let mut reconciled = input.clone();
    reconcile_in_place(&mut reconciled);
    reconciled
}
