use once_cell::sync::Lazy;
use prometheus::{register_int_counter_vec, IntCounterVec};

pub static MODEL_ATTEMPTS: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "report_model_attempts_total",
        "Report generation attempts per model",
        &["model", "outcome"]
    )
    .expect("report_model_attempts_total registers once")
});

pub static ENHANCE_REQUESTS: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "enhance_requests_total",
        "Prompt enhancement calls",
        &["outcome"]
    )
    .expect("enhance_requests_total registers once")
});

pub fn outcome<T, E>(result: &Result<T, E>) -> &'static str {
    if result.is_ok() {
        "success"
    } else {
        "failure"
    }
}

/// Encodes every registered metric in the text exposition format.
pub fn render() -> Result<Vec<u8>, prometheus::Error> {
    use prometheus::{Encoder, TextEncoder};

    let encoder = TextEncoder::new();
    let mut buffer = vec![];
    encoder.encode(&prometheus::gather(), &mut buffer)?;
    Ok(buffer)
}
