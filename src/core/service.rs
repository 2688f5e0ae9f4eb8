// Runtime descriptor of a single service. Only the image is interpreted here;
// every other field is carried through untouched.
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

const IMAGE_KEY: &str = "image";

/// A service's runtime descriptor. Its identity is the key it is registered
/// under in [`DeploymentConfig::services`](crate::api::DeploymentConfig).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceSpec {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub image: String,

    // Never holds an `image` key; see `with_field`.
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl ServiceSpec {
    pub fn new(image: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            extra: Map::new(),
        }
    }

    /// Sets an opaque descriptor field. `image` is routed to [`ServiceSpec::image`].
    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        let key = key.into();
        if key == IMAGE_KEY {
            self.image = match value {
                Value::String(image) => image,
                Value::Null => String::new(),
                other => other.to_string(),
            };
        } else {
            self.extra.insert(key, value);
        }
        self
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }

    /// Descriptor fields other than `image`.
    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }

    pub fn has_image(&self) -> bool {
        !self.image.is_empty()
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl fmt::Display for ServiceSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}
