use serde::ser::{Serialize, SerializeMap, Serializer};

/// Uniform result of every gateway operation.
///
/// Serializes as the payload's fields plus `"success": true`, or as
/// `{"error": <message>, "success": false}`.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultEnvelope<T> {
    Success(T),
    Failure { error: String },
}

impl<T> ResultEnvelope<T> {
    pub fn failure(message: impl Into<String>) -> Self {
        ResultEnvelope::Failure {
            error: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ResultEnvelope::Success(_))
    }

    pub fn payload(&self) -> Option<&T> {
        match self {
            ResultEnvelope::Success(payload) => Some(payload),
            ResultEnvelope::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ResultEnvelope::Success(_) => None,
            ResultEnvelope::Failure { error } => Some(error),
        }
    }

    pub fn into_payload(self) -> Option<T> {
        match self {
            ResultEnvelope::Success(payload) => Some(payload),
            ResultEnvelope::Failure { .. } => None,
        }
    }
}

impl<T: Serialize> Serialize for ResultEnvelope<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ResultEnvelope::Success(payload) => {
                #[derive(serde::Serialize)]
                struct Wire<'a, T> {
                    #[serde(flatten)]
                    payload: &'a T,
                    success: bool,
                }
                Wire {
                    payload,
                    success: true,
                }
                .serialize(serializer)
            }
            ResultEnvelope::Failure { error } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("error", error)?;
                map.serialize_entry("success", &false)?;
                map.end()
            }
        }
    }
}
