use lazy_static::lazy_static;
use prometheus::{
    register_histogram, register_int_counter, register_int_counter_vec, Encoder, Histogram,
    IntCounter, IntCounterVec, TextEncoder,
};

lazy_static! {
    pub static ref PAYLOADS_GENERATED: IntCounter = register_int_counter!(
        "fps_qr_payloads_generated_total",
        "Total QR payloads generated"
    )
    .expect("metric can be created");

    pub static ref PAYLOAD_FAILURES: IntCounterVec = register_int_counter_vec!(
        "fps_qr_payload_failures_total",
        "Total QR payload requests that failed",
        &["reason"]
    )
    .expect("metric can be created");

    pub static ref ENCODE_DURATION: Histogram = register_histogram!(
        "fps_qr_encode_duration_seconds",
        "Payload encoding duration in seconds",
        vec![0.00001, 0.00005, 0.0001, 0.0005, 0.001, 0.005, 0.01]
    )
    .expect("metric can be created");
}

/// Generate metrics output in Prometheus text format
pub fn gather() -> Result<String, Box<dyn std::error::Error>> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = vec![];
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gather_includes_counters() {
        PAYLOADS_GENERATED.inc();
        PAYLOAD_FAILURES.with_label_values(&["validation_error"]).inc();
        let output = gather().unwrap();
        assert!(output.contains("fps_qr_payloads_generated_total"));
        assert!(output.contains("fps_qr_payload_failures_total"));
    }
}
