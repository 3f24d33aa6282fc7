pub mod deal;
pub mod error;
pub mod types;

pub use deal::analysis::{analyze_deal, DealAnalysis};
pub use deal::metrics::compute_metrics;
pub use deal::model::{DealInput, DealMetrics, DebtCoverage, DownPayment, LoanType};
pub use deal::reconcile::{reconcile, reconcile_in_place};
pub use deal::worksheet::{DealEdit, DealWorksheet};
pub use error::AnalyzerError;
pub use types::*;

/// Standard result type for all deal-analyzer operations
pub type AnalyzerResult<T> = Result<T, AnalyzerError>;
