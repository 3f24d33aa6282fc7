//! Single-property rental deal analysis.
//!
//! The flow a host runs on every edit is [`reconcile`](reconcile::reconcile)
//! then [`compute_metrics`](metrics::compute_metrics): the reconciler keeps the
//! percentage and dollar down-payment fields consistent, and the engine maps
//! the reconciled record to a fresh [`DealMetrics`](model::DealMetrics).
//! [`DealWorksheet`](worksheet::DealWorksheet) packages that loop.

pub mod analysis;
pub mod breakdown;
mod math;
pub mod metrics;
pub mod model;
pub mod reconcile;
pub mod validate;
pub mod worksheet;
