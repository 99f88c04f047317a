pub mod config;
pub mod error;
pub mod path;
pub mod types;

pub use config::EventConfig;
pub use error::{PathError, Result, StripeError};
pub use path::{get_value, try_get_value};
pub use types::{Event, EventData, EventRequest};

/// Decode a webhook payload and check it against the configured API version.
///
/// A version mismatch is an error unless the config opts out, in which case
/// the event is accepted with a warning.
pub fn construct_event(payload: &str, config: &EventConfig) -> Result<Event> {
    let event = Event::from_json(payload)?;

    if let Some(expected) = config.api_version.as_deref() {
        if event.api_version != expected {
            if !config.ignore_api_version_mismatch {
                return Err(StripeError::ApiVersionMismatch {
                    event: event.api_version,
                    expected: expected.to_string(),
                });
            }
            tracing::warn!(
                event_id = %event.id,
                event_version = %event.api_version,
                expected_version = expected,
                "Accepting event with mismatched API version"
            );
        }
    }

    tracing::debug!(event_id = %event.id, event_type = %event.event_type, "Parsed event");
    Ok(event)
}
