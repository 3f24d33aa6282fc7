use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::model::DealInput;
use crate::error::AnalyzerError;
use crate::types::{Money, Percent};
use crate::AnalyzerResult;

/// Check a user-entered deal against the form constraints: amounts are
/// non-negative, percentages lie in [0, 100], and the loan term is at least
/// one year. Returns the first violation found.
///
/// The metrics engine does not call this; it stays total on any input.
pub fn validate_deal_input(input: &DealInput) -> AnalyzerResult<()> {
    non_negative("purchase_price", input.purchase_price)?;
    non_negative("closing_costs", input.closing_costs)?;
    non_negative("rehab_costs", input.rehab_costs)?;

    percentage("down_payment_percent", input.down_payment_percent)?;
    non_negative("down_payment_amount", input.down_payment_amount)?;
    percentage("interest_rate", input.interest_rate)?;
    if input.loan_term < Decimal::ONE {
        return Err(AnalyzerError::invalid(
            "loan_term",
            "Loan term must be at least 1 year",
        ));
    }

    non_negative("gross_monthly_rent", input.gross_monthly_rent)?;
    non_negative("other_monthly_income", input.other_monthly_income)?;

    non_negative("property_taxes", input.property_taxes)?;
    non_negative("insurance", input.insurance)?;
    non_negative("utilities", input.utilities)?;
    non_negative("other_expenses", input.other_expenses)?;
    percentage("vacancy", input.vacancy)?;
    percentage("repairs", input.repairs)?;
    percentage("capex", input.capex)?;
    percentage("management", input.management)?;

    Ok(())
}

fn non_negative(field: &str, value: Money) -> AnalyzerResult<()> {
    if value < Decimal::ZERO {
        return Err(AnalyzerError::invalid(
            field,
            format!("must be zero or greater, got {value}"),
        ));
    }
    Ok(())
}

fn percentage(field: &str, value: Percent) -> AnalyzerResult<()> {
    if value < Decimal::ZERO || value > dec!(100) {
        return Err(AnalyzerError::invalid(
            field,
            format!("must be a percentage between 0 and 100, got {value}"),
        ));
    }
    Ok(())
}
