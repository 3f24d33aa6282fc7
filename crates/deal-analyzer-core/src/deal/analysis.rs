use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::breakdown::{cash_flow_summary, expense_breakdown, CashFlowSummary, ExpenseLine};
use super::math::percent_of;
use super::metrics::compute_metrics;
use super::model::{DealInput, DealMetrics, DebtCoverage};
use super::reconcile::reconcile;
use super::validate::validate_deal_input;
use crate::types::{with_metadata, ComputationOutput};
use crate::AnalyzerResult;

/// Full year-one analysis of a single deal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DealAnalysis {
    /// The input after down-payment reconciliation
    pub input: DealInput,
    pub metrics: DealMetrics,
    /// Annual operating expenses by category, largest first
    pub expense_breakdown: Vec<ExpenseLine>,
    pub cash_flow: CashFlowSummary,
}

/// Validate, reconcile and analyse a deal.
///
/// Returns a `ComputationOutput<DealAnalysis>` with advisory warnings for
/// weak or unusual deals. Only out-of-range input is an error; the metrics
/// themselves are always produced.
pub fn analyze_deal(input: &DealInput) -> AnalyzerResult<ComputationOutput<DealAnalysis>> {
    let start = Instant::now();

    validate_deal_input(input)?;

    let reconciled = reconcile(input);
    let metrics = compute_metrics(&reconciled);
    let warnings = deal_warnings(&reconciled, &metrics);

    let analysis = DealAnalysis {
        expense_breakdown: expense_breakdown(&reconciled, &metrics),
        cash_flow: cash_flow_summary(&metrics),
        input: reconciled.clone(),
        metrics,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Rental Property Pro Forma (Year 1, Income Approach)",
        &reconciled,
        warnings,
        elapsed,
        analysis,
    ))
}

fn deal_warnings(input: &DealInput, metrics: &DealMetrics) -> Vec<String> {
    let mut warnings = Vec::new();

    if metrics.loan_amount < Decimal::ZERO {
        warnings.push(format!(
            "Down payment exceeds total project cost by {:.2}; loan amount is negative",
            -metrics.loan_amount
        ));
    }

    if metrics.loan_amount > Decimal::ZERO && input.interest_rate.is_zero() {
        warnings.push(
            "Interest rate is 0%; mortgage payment is reported as zero, not straight-line principal"
                .into(),
        );
    }

    let loan_to_cost = percent_of(metrics.loan_amount, input.total_project_cost());
    if loan_to_cost > dec!(80) {
        warnings.push(format!(
            "Loan-to-cost of {loan_to_cost:.1}% exceeds 80% - high leverage"
        ));
    }

    if let DebtCoverage::Ratio(dscr) = metrics.dscr {
        if dscr < dec!(1.2) {
            warnings.push(format!(
                "DSCR of {dscr:.2} is below 1.20x - lender covenant risk"
            ));
        }
    }

    if metrics.annual_cash_flow < Decimal::ZERO {
        warnings.push(format!(
            "Negative annual cash flow of {:.2}",
            metrics.annual_cash_flow
        ));
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deal::model::LoanType;
    use crate::error::AnalyzerError;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_deal_analysis() {
        let out = analyze_deal(&DealInput::default()).unwrap();

        assert_eq!(out.result.metrics.net_operating_income, dec!(23244));
        assert_eq!(out.result.expense_breakdown.len(), 5);
        assert!(out.warnings.is_empty(), "unexpected: {:?}", out.warnings);
        assert_eq!(
            out.methodology,
            "Rental Property Pro Forma (Year 1, Income Approach)"
        );
        assert_eq!(out.metadata.precision, "rust_decimal_128bit");
    }

    #[test]
    fn test_analysis_uses_reconciled_input() {
        let mut input = DealInput::default();
        input.loan_type = LoanType::Amount;
        input.down_payment_amount = dec!(95700);

        let out = analyze_deal(&input).unwrap();
        assert_eq!(out.result.input.down_payment_percent, dec!(30));
        let assumed: Decimal = out.assumptions["down_payment_percent"]
            .as_str()
            .unwrap()
            .parse()
            .unwrap();
        assert_eq!(assumed, dec!(30));
    }

    #[test]
    fn test_invalid_input_is_an_error() {
        let mut input = DealInput::default();
        input.management = dec!(-8);
        let err = analyze_deal(&input).unwrap_err();
        assert!(matches!(err, AnalyzerError::InvalidInput { ref field, .. } if field == "management"));
    }

    #[test]
    fn test_negative_loan_warning() {
        let mut input = DealInput::default();
        input.loan_type = LoanType::Amount;
        input.down_payment_amount = dec!(350000);

        let out = analyze_deal(&input).unwrap();
        assert_eq!(out.result.metrics.loan_amount, dec!(-31000));
        assert!(out.warnings.iter().any(|w| w.contains("loan amount is negative")));
    }

    #[test]
    fn test_zero_rate_warning() {
        let mut input = DealInput::default();
        input.interest_rate = Decimal::ZERO;

        let out = analyze_deal(&input).unwrap();
        assert!(out.result.metrics.dscr.is_unbounded());
        assert!(out.warnings.iter().any(|w| w.contains("Interest rate is 0%")));
    }

    #[test]
    fn test_high_leverage_and_low_dscr_warnings() {
        let mut input = DealInput::default();
        input.down_payment_percent = Decimal::ZERO;

        let out = analyze_deal(&input).unwrap();
        assert!(out.warnings.iter().any(|w| w.contains("Loan-to-cost")));
        assert!(out.warnings.iter().any(|w| w.contains("DSCR")));
        assert!(out.warnings.iter().any(|w| w.contains("Negative annual cash flow")));
    }

    #[test]
    fn test_huge_valid_deal_is_analyzed() {
        let huge = Decimal::from_i128_with_scale(10_i128.pow(27), 0);
        let mut input = DealInput::default();
        input.purchase_price = huge;
        input.gross_monthly_rent = huge * dec!(7);
        input.loan_type = LoanType::Amount;
        input.down_payment_amount = huge;

        let out = analyze_deal(&input).unwrap();
        assert!(out.result.input.down_payment_percent <= dec!(100));
        assert!(out.result.metrics.net_operating_income > Decimal::ZERO);
        assert!(!out.result.expense_breakdown.is_empty());
    }
}
