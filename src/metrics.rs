//! Counters for outbound lookups and dataset loads.
//!
//! Without an installed recorder these are no-ops.

/// Metrics for the civic-information gateway
pub struct GatewayMetrics;

impl GatewayMetrics {
    pub fn record_request(lookup: &'static str) {
        ::metrics::counter!("civic_gateway_requests_total", "lookup" => lookup).increment(1);
    }

    pub fn record_failure(lookup: &'static str, kind: &'static str) {
        ::metrics::counter!(
            "civic_gateway_failures_total",
            "lookup" => lookup,
            "kind" => kind
        )
        .increment(1);
    }
}

/// Metrics for the local dataset store
pub struct DatasetMetrics;

impl DatasetMetrics {
    pub fn record_load(dataset: &'static str, records: usize) {
        ::metrics::counter!("civic_dataset_loads_total", "dataset" => dataset).increment(1);
        ::metrics::gauge!("civic_dataset_records", "dataset" => dataset).set(records as f64);
    }

    pub fn record_load_error(dataset: &'static str) {
        ::metrics::counter!("civic_dataset_load_errors_total", "dataset" => dataset).increment(1);
    }
}
