use crate::synth::AlertRecord;

/// Derive the routing key for a record.
///
/// The alarm identifier keeps all retries and reads for one alert on the
/// same partition. A record without one falls back to a positional key so
/// the send never goes out keyless.
pub fn message_key(record: &AlertRecord, position: usize) -> String {
    if record.alarm_id.is_empty() {
        format!("msg-{}", position + 1)
    } else {
        record.alarm_id.clone()
    }
}
