use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::math::{percent_of, saturating_div, share};
use crate::types::{Money, Percent, Ratio};

// ---------------------------------------------------------------------------
// Financing
// ---------------------------------------------------------------------------

/// Selects which down-payment field is authoritative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanType {
    /// `down_payment_percent` drives `down_payment_amount`
    #[default]
    Percentage,
    /// `down_payment_amount` drives `down_payment_percent`
    Amount,
}

/// The authoritative down-payment figure, tagged with its representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum DownPayment {
    /// Share of total project cost, 0-100
    Percentage(Percent),
    /// Fixed dollar amount
    Amount(Money),
}

impl DownPayment {
    /// Dollar value of the down payment against `total_project_cost`.
    pub fn amount(&self, total_project_cost: Money) -> Money {
        match *self {
            DownPayment::Percentage(pct) => share(total_project_cost, pct),
            DownPayment::Amount(amount) => amount,
        }
    }

    /// Share of `total_project_cost`, or zero when there is no cost.
    pub fn percent(&self, total_project_cost: Money) -> Percent {
        match *self {
            DownPayment::Percentage(pct) => pct,
            DownPayment::Amount(amount) => percent_of(amount, total_project_cost),
        }
    }
}

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// A single rental property deal as entered by the user.
///
/// Missing fields deserialize to the [`Default`] deal, so a partial record
/// such as `{"purchase_price": "250000"}` is a complete input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DealInput {
    /// Contract purchase price
    pub purchase_price: Money,
    /// Closing costs paid at acquisition
    pub closing_costs: Money,
    /// Up-front renovation budget
    pub rehab_costs: Money,

    /// Which down-payment field is authoritative
    pub loan_type: LoanType,
    /// Down payment as a share of total project cost (0-100)
    pub down_payment_percent: Percent,
    /// Down payment in dollars
    pub down_payment_amount: Money,
    /// Annual interest rate (e.g. 6.5 = 6.5%)
    pub interest_rate: Percent,
    /// Amortization term in years; fractional terms are allowed
    pub loan_term: Decimal,

    /// Scheduled monthly rent
    pub gross_monthly_rent: Money,
    /// Parking, laundry, storage, etc. per month
    pub other_monthly_income: Money,

    /// Monthly property taxes
    pub property_taxes: Money,
    /// Monthly insurance premium
    pub insurance: Money,
    /// Monthly owner-paid utilities
    pub utilities: Money,
    /// Any other fixed monthly expense
    pub other_expenses: Money,
    /// Vacancy and credit loss, percent of potential gross income
    pub vacancy: Percent,
    /// Repairs and maintenance, percent of gross operating income
    pub repairs: Percent,
    /// Capital expenditure reserve, percent of gross operating income
    pub capex: Percent,
    /// Property management fee, percent of gross operating income
    pub management: Percent,
}

impl Default for DealInput {
    fn default() -> Self {
        DealInput {
            purchase_price: dec!(300000),
            closing_costs: dec!(9000),
            rehab_costs: dec!(10000),
            loan_type: LoanType::Percentage,
            down_payment_percent: dec!(20),
            down_payment_amount: dec!(63800),
            interest_rate: dec!(6.5),
            loan_term: dec!(30),
            gross_monthly_rent: dec!(3000),
            other_monthly_income: Decimal::ZERO,
            property_taxes: dec!(300),
            insurance: dec!(100),
            utilities: Decimal::ZERO,
            other_expenses: Decimal::ZERO,
            vacancy: dec!(5),
            repairs: dec!(5),
            capex: dec!(5),
            management: dec!(8),
        }
    }
}

impl DealInput {
    /// Purchase price plus closing and rehab costs.
    pub fn total_project_cost(&self) -> Money {
        self.purchase_price
            .saturating_add(self.closing_costs)
            .saturating_add(self.rehab_costs)
    }

    /// The down payment as selected by `loan_type`.
    pub fn down_payment(&self) -> DownPayment {
        match self.loan_type {
            LoanType::Percentage => DownPayment::Percentage(self.down_payment_percent),
            LoanType::Amount => DownPayment::Amount(self.down_payment_amount),
        }
    }
}

// ---------------------------------------------------------------------------
// Metrics
// ---------------------------------------------------------------------------

/// Debt service coverage ratio. A deal with no debt service has nothing to
/// cover, so its coverage is [`DebtCoverage::Unbounded`] rather than a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebtCoverage {
    /// NOI / annual debt service
    Ratio(Ratio),
    /// No debt service
    Unbounded,
}

impl DebtCoverage {
    pub fn from_debt_service(net_operating_income: Money, annual_debt_service: Money) -> Self {
        if annual_debt_service > Decimal::ZERO {
            DebtCoverage::Ratio(saturating_div(net_operating_income, annual_debt_service))
        } else {
            DebtCoverage::Unbounded
        }
    }

    pub fn ratio(&self) -> Option<Ratio> {
        match *self {
            DebtCoverage::Ratio(r) => Some(r),
            DebtCoverage::Unbounded => None,
        }
    }

    pub fn is_unbounded(&self) -> bool {
        matches!(self, DebtCoverage::Unbounded)
    }
}

impl fmt::Display for DebtCoverage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DebtCoverage::Ratio(r) => write!(f, "{:.2}x", r.round_dp(2)),
            DebtCoverage::Unbounded => f.write_str("N/A"),
        }
    }
}

const UNBOUNDED_LABEL: &str = "unbounded";

impl Serialize for DebtCoverage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DebtCoverage::Ratio(r) => Serialize::serialize(r, serializer),
            DebtCoverage::Unbounded => serializer.serialize_str(UNBOUNDED_LABEL),
        }
    }
}

impl<'de> Deserialize<'de> for DebtCoverage {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Ratio(Decimal),
            Label(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Ratio(r) => Ok(DebtCoverage::Ratio(r)),
            Raw::Label(label) if label.eq_ignore_ascii_case(UNBOUNDED_LABEL) => {
                Ok(DebtCoverage::Unbounded)
            }
            Raw::Label(label) => Err(de::Error::custom(format!(
                "expected a decimal ratio or \"{UNBOUNDED_LABEL}\", got \"{label}\""
            ))),
        }
    }
}

/// Year-one pro-forma metrics derived from a reconciled [`DealInput`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealMetrics {
    /// Cash to close: down payment + closing costs + rehab
    pub total_investment: Money,
    /// Total project cost less down payment (negative if over-funded)
    pub loan_amount: Money,
    /// Potential gross income less vacancy (annual)
    pub gross_operating_income: Money,
    /// Fixed and GOI-based operating expenses (annual)
    pub total_operating_expenses: Money,
    /// GOI - operating expenses, before debt service (annual)
    pub net_operating_income: Money,
    /// Level monthly principal and interest payment
    pub monthly_mortgage_payment: Money,
    /// 12 * monthly mortgage payment
    pub annual_debt_service: Money,
    /// Annual cash flow / 12
    pub monthly_cash_flow: Money,
    /// NOI - annual debt service
    pub annual_cash_flow: Money,
    /// NOI / purchase price, as a percentage
    pub cap_rate: Percent,
    /// Annual cash flow / total investment, as a percentage
    pub cash_on_cash_return: Percent,
    /// NOI / annual debt service
    pub dscr: DebtCoverage,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_deal_is_consistent() {
        let input = DealInput::default();
        assert_eq!(input.total_project_cost(), dec!(319000));
        assert_eq!(
            input.down_payment().amount(input.total_project_cost()),
            input.down_payment_amount
        );
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let input: DealInput =
            serde_json::from_str(r#"{"purchase_price": "250000", "loan_type": "amount"}"#)
                .unwrap();
        assert_eq!(input.purchase_price, dec!(250000));
        assert_eq!(input.loan_type, LoanType::Amount);
        assert_eq!(input.closing_costs, dec!(9000));
        assert_eq!(input.loan_term, dec!(30));
    }

    #[test]
    fn test_numeric_json_values_coerce() {
        let input: DealInput =
            serde_json::from_str(r#"{"gross_monthly_rent": 2450.50, "vacancy": "7"}"#).unwrap();
        assert_eq!(input.gross_monthly_rent, dec!(2450.50));
        assert_eq!(input.vacancy, dec!(7));
    }

    #[test]
    fn test_amount_percent_zero_cost() {
        let dp = DownPayment::Amount(dec!(5000));
        assert_eq!(dp.percent(Decimal::ZERO), Decimal::ZERO);
        assert_eq!(dp.percent(dec!(50000)), dec!(10));
    }

    #[test]
    fn test_amount_percent_near_decimal_limit() {
        let huge = Decimal::from_i128_with_scale(10_i128.pow(27), 0);
        let dp = DownPayment::Amount(huge);
        assert_eq!(dp.percent(huge), dec!(100));
        assert_eq!(dp.percent(dec!(0.001)), Decimal::MAX);
    }

    #[test]
    fn test_total_project_cost_saturates() {
        let mut input = DealInput::default();
        input.purchase_price = Decimal::MAX;
        input.closing_costs = Decimal::from_i128_with_scale(10_i128.pow(27), 0);
        assert_eq!(input.total_project_cost(), Decimal::MAX);
    }

    #[test]
    fn test_fractional_loan_term_deserializes() {
        let input: DealInput = serde_json::from_str(r#"{"loan_term": 15.5}"#).unwrap();
        assert_eq!(input.loan_term, dec!(15.5));
    }

    #[test]
    fn test_debt_coverage_serde() {
        let unbounded = serde_json::to_value(DebtCoverage::Unbounded).unwrap();
        assert_eq!(unbounded, serde_json::json!("unbounded"));

        let ratio: DebtCoverage = serde_json::from_str(r#""1.25""#).unwrap();
        assert_eq!(ratio, DebtCoverage::Ratio(dec!(1.25)));
        assert_eq!(serde_json::to_value(ratio).unwrap(), serde_json::json!("1.25"));

        let back: DebtCoverage = serde_json::from_value(unbounded).unwrap();
        assert!(back.is_unbounded());

        assert!(serde_json::from_str::<DebtCoverage>(r#""lots""#).is_err());
    }

    #[test]
    fn test_debt_coverage_display() {
        assert_eq!(DebtCoverage::Unbounded.to_string(), "N/A");
        assert_eq!(DebtCoverage::Ratio(dec!(1.2008)).to_string(), "1.20x");
    }
}
