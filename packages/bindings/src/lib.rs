use napi::Result as NapiResult;
use napi_derive::napi;
use serde::Serialize;

use deal_analyzer_core::{DealEdit, DealInput, DealMetrics, DealWorksheet};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse_deal(input_json: &str) -> NapiResult<DealInput> {
    serde_json::from_str(input_json).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Deal analysis
// ---------------------------------------------------------------------------

#[napi]
pub fn analyze_deal(input_json: String) -> NapiResult<String> {
    let input = parse_deal(&input_json)?;
    let output = deal_analyzer_core::analyze_deal(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Runs the engine on the deal as given; pass it through `reconcile_deal`
/// first if the down-payment fields may be stale.
#[napi]
pub fn compute_metrics(input_json: String) -> NapiResult<String> {
    let input = parse_deal(&input_json)?;
    let metrics = deal_analyzer_core::compute_metrics(&input);
    serde_json::to_string(&metrics).map_err(to_napi_error)
}

#[napi]
pub fn reconcile_deal(input_json: String) -> NapiResult<String> {
    let input = parse_deal(&input_json)?;
    serde_json::to_string(&deal_analyzer_core::reconcile(&input)).map_err(to_napi_error)
}

#[napi]
pub fn default_deal() -> NapiResult<String> {
    serde_json::to_string(&DealInput::default()).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Form edits
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct WorksheetSnapshot {
    input: DealInput,
    metrics: DealMetrics,
    reconciled: bool,
}

/// Apply `[{"field": ..., "value": ...}, ...]` edits to a deal the way the
/// form does, returning the updated input, its metrics, and whether the
/// derived down-payment field moved.
#[napi]
pub fn apply_deal_edits(input_json: String, edits_json: String) -> NapiResult<String> {
    let input = parse_deal(&input_json)?;
    let edits: Vec<DealEdit> = serde_json::from_str(&edits_json).map_err(to_napi_error)?;

    let mut worksheet = DealWorksheet::new(input);
    let reconciled = worksheet.apply_all(edits);
    let (input, metrics) = worksheet.into_parts();

    serde_json::to_string(&WorksheetSnapshot {
        input,
        metrics,
        reconciled,
    })
    .map_err(to_napi_error)
}
