use deal_analyzer_core::{compute_metrics, reconcile, DealInput, DealMetrics, LoanType};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn money() -> impl Strategy<Value = Decimal> {
    // Up to $2M, in cents
    (0i64..=200_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

fn monthly() -> impl Strategy<Value = Decimal> {
    (0i64..=2_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

fn percent() -> impl Strategy<Value = Decimal> {
    // 0.00 - 100.00
    (0i64..=10_000).prop_map(|bp| Decimal::new(bp, 2))
}

fn loan_term() -> impl Strategy<Value = Decimal> {
    // 0 - 40 years, in tenths
    (0i64..=400).prop_map(|tenths| Decimal::new(tenths, 1))
}

fn loan_type() -> impl Strategy<Value = LoanType> {
    prop_oneof![Just(LoanType::Percentage), Just(LoanType::Amount)]
}

fn deal_input() -> impl Strategy<Value = DealInput> {
    let acquisition = (money(), money(), money());
    let financing = (loan_type(), percent(), money(), percent(), loan_term());
    let income = (monthly(), monthly());
    let expenses = (
        monthly(),
        monthly(),
        monthly(),
        monthly(),
        percent(),
        percent(),
        percent(),
        percent(),
    );

    (acquisition, financing, income, expenses).prop_map(
        |(
            (purchase_price, closing_costs, rehab_costs),
            (loan_type, down_payment_percent, down_payment_amount, interest_rate, loan_term),
            (gross_monthly_rent, other_monthly_income),
            (property_taxes, insurance, utilities, other_expenses, vacancy, repairs, capex, management),
        )| DealInput {
            purchase_price,
            closing_costs,
            rehab_costs,
            loan_type,
            down_payment_percent,
            down_payment_amount,
            interest_rate,
            loan_term,
            gross_monthly_rent,
            other_monthly_income,
            property_taxes,
            insurance,
            utilities,
            other_expenses,
            vacancy,
            repairs,
            capex,
            management,
        },
    )
}

fn within_relative(actual: Decimal, expected: Decimal) -> bool {
    let scale = expected.abs().max(Decimal::ONE);
    (actual - expected).abs() <= dec!(0.000000001) * scale
}

#[derive(Debug, Clone, Copy)]
enum ExpenseInput {
    PropertyTaxes,
    Insurance,
    Utilities,
    OtherExpenses,
    Repairs,
    Capex,
    Management,
}

fn expense_input() -> impl Strategy<Value = ExpenseInput> {
    prop_oneof![
        Just(ExpenseInput::PropertyTaxes),
        Just(ExpenseInput::Insurance),
        Just(ExpenseInput::Utilities),
        Just(ExpenseInput::OtherExpenses),
        Just(ExpenseInput::Repairs),
        Just(ExpenseInput::Capex),
        Just(ExpenseInput::Management),
    ]
}

fn bump(input: &mut DealInput, which: ExpenseInput, delta: Decimal) {
    let field = match which {
        ExpenseInput::PropertyTaxes => &mut input.property_taxes,
        ExpenseInput::Insurance => &mut input.insurance,
        ExpenseInput::Utilities => &mut input.utilities,
        ExpenseInput::OtherExpenses => &mut input.other_expenses,
        ExpenseInput::Repairs => &mut input.repairs,
        ExpenseInput::Capex => &mut input.capex,
        ExpenseInput::Management => &mut input.management,
    };
    *field += delta;
}

fn metrics_of(input: &DealInput) -> DealMetrics {
    compute_metrics(&reconcile(input))
}

proptest! {
    /// Percentage mode: the dollar field is derived from the percent.
    #[test]
    fn percentage_reconciliation_derives_amount(mut input in deal_input()) {
        input.loan_type = LoanType::Percentage;
        let out = reconcile(&input);
        let expected = out.total_project_cost() * out.down_payment_percent / dec!(100);
        prop_assert!(within_relative(out.down_payment_amount, expected));
        prop_assert_eq!(out.down_payment_percent, input.down_payment_percent);
    }

    /// Amount mode: the percent is derived from the dollar field, or zero.
    #[test]
    fn amount_reconciliation_derives_percent(mut input in deal_input()) {
        input.loan_type = LoanType::Amount;
        let out = reconcile(&input);
        let cost = out.total_project_cost();
        if cost > Decimal::ZERO {
            let expected = dec!(100) * out.down_payment_amount / cost;
            prop_assert!(within_relative(out.down_payment_percent, expected));
        } else {
            prop_assert_eq!(out.down_payment_percent, Decimal::ZERO);
        }
        prop_assert_eq!(out.down_payment_amount, input.down_payment_amount);
    }

    /// Raising any one operating-expense input never lowers the total.
    #[test]
    fn operating_expenses_monotone(
        input in deal_input(),
        which in expense_input(),
        delta in percent(),
    ) {
        let before = metrics_of(&input).total_operating_expenses;
        let mut raised = input.clone();
        bump(&mut raised, which, delta);
        let after = metrics_of(&raised).total_operating_expenses;
        prop_assert!(after >= before, "{:?} +{}: {} -> {}", which, delta, before, after);
    }

    /// DSCR is unbounded exactly when there is no debt service.
    #[test]
    fn dscr_unbounded_iff_no_debt_service(input in deal_input()) {
        let m = metrics_of(&input);
        prop_assert_eq!(m.dscr.is_unbounded(), m.annual_debt_service.is_zero());
    }

    /// Reconciling twice changes nothing the engine can see.
    #[test]
    fn reconcile_is_idempotent(input in deal_input()) {
        let once = reconcile(&input);
        let twice = reconcile(&once);
        prop_assert_eq!(&twice, &once);
        prop_assert_eq!(compute_metrics(&twice), compute_metrics(&once));
    }

    /// The engine never produces a payment on a non-positive loan.
    #[test]
    fn no_payment_without_principal(input in deal_input()) {
        let m = metrics_of(&input);
        if m.loan_amount <= Decimal::ZERO {
            prop_assert_eq!(m.monthly_mortgage_payment, Decimal::ZERO);
        }
        prop_assert!(m.monthly_mortgage_payment >= Decimal::ZERO);
    }
}
