//! Response classification: route a raw body to the schema its URL selects.

use tracing::{debug, trace};

use crate::error::DecodeError;
use crate::schema::{Payload, SchemaRegistry};

/// Classify the response at `url` and decode `body` against the first
/// matching descriptor.
///
/// Returns `Ok(None)` when no descriptor matches; that is not a failure.
/// A decode failure is reported for the matched kind only. Later
/// descriptors are never tried, even if their rules would also match.
pub fn classify_and_decode(
    registry: &SchemaRegistry,
    url: &str,
    body: &[u8],
) -> Result<Option<Payload>, DecodeError> {
    let Some(descriptor) = registry.find(url) else {
        trace!(url, "response matched no schema");
        return Ok(None);
    };

    match (descriptor.decode)(body) {
        Ok(payload) => {
            debug!(url, kind = %descriptor.kind, bytes = body.len(), "decoded response");
            Ok(Some(payload))
        }
        Err(e) => Err(DecodeError {
            kind: descriptor.kind,
            url: url.to_string(),
            message: e.to_string(),
            body: body.to_vec(),
        }),
    }
}
