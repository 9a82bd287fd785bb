use serde::Serialize;

/// Fixed-text JSON payload, used for the greeting and operation
/// confirmations.
#[derive(Serialize, Debug)]
pub struct Message {
    pub message: &'static str,
}
