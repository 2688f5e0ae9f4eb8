// Normalization of the raw deployment field into a `DeploymentConfig`.
// Every non-absent input ends up as bytes decoded by `decode_config`, so the
// canonical shape is enforced in exactly one place.
use crate::core::deployment::DeploymentConfig;
use crate::core::error::{Error, ErrorKind};
use crate::json::parse;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt::Debug;
use tracing::debug;

const DEPLOYMENT_CONTEXT: &str = "deployment";

/// The deployment field as it arrives in an enclosing document.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum DeploymentInput {
    #[default]
    Absent,
    /// JSON text, typically escaped JSON nested as a string in the outer document.
    EncodedText(String),
    /// An already-parsed JSON value.
    Structured(Value),
}

impl From<Value> for DeploymentInput {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => DeploymentInput::Absent,
            Value::String(text) => DeploymentInput::EncodedText(text),
            other => DeploymentInput::Structured(other),
        }
    }
}

impl From<Option<Value>> for DeploymentInput {
    fn from(value: Option<Value>) -> Self {
        value.map(DeploymentInput::from).unwrap_or_default()
    }
}

impl<'de> Deserialize<'de> for DeploymentInput {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<Value>::deserialize(deserializer).map(DeploymentInput::from)
    }
}

/// Converts the deployment field into a canonical configuration.
///
/// `Ok(None)` means no deployment was specified (absent or empty text), which
/// is not an error.
pub fn convert_to_deployment_config(
    input: &DeploymentInput,
) -> Result<Option<DeploymentConfig>, Error> {
    match input {
        DeploymentInput::Absent => {
            debug!("deployment field absent");
            Ok(None)
        }
        DeploymentInput::EncodedText(text) if text.is_empty() => {
            debug!("deployment field is an empty string");
            Ok(None)
        }
        DeploymentInput::EncodedText(text) => {
            debug!(len = text.len(), "decoding deployment field from encoded text");
            decode_config(text.as_bytes()).map(Some)
        }
        DeploymentInput::Structured(value) => {
            debug!("re-encoding structured deployment field");
            convert_serializable(value).map(Some)
        }
    }
}

/// Re-serializes any native value and decodes it as a deployment config.
pub fn convert_serializable<T>(value: &T) -> Result<DeploymentConfig, Error>
where
    T: Serialize + Debug + ?Sized,
{
    let bytes = parse::to_vec(value).map_err(|err| {
        Error::new(ErrorKind::Conversion)
            .with_message(format!("failed to marshal body for {value:?}"))
            .with_source(err)
    })?;
    decode_config(&bytes)
}

fn decode_config(bytes: &[u8]) -> Result<DeploymentConfig, Error> {
    // A literal `null` document leaves the config empty rather than failing.
    match parse::from_slice::<Option<DeploymentConfig>>(bytes) {
        Ok(config) => Ok(config.unwrap_or_default()),
        Err(err) => Err(Error::new(ErrorKind::Conversion)
            .with_message("failed to unmarshal json for deployment field")
            .with_hint(parse::hint_for_error(&err, DEPLOYMENT_CONTEXT))
            .with_input(String::from_utf8_lossy(bytes).into_owned())
            .with_source(err)),
    }
}
