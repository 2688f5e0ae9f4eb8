// Canonical deployment configuration plus its human-readable renderings.
// Services live in a sorted map, so every iteration below is in ascending
// name order and output is stable run to run.
use crate::core::service::ServiceSpec;
use serde::de::{self, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct DeploymentConfig {
    pub services: BTreeMap<String, ServiceSpec>,
}

// Only a JSON object (or `null`) is a deployment document. The `services` key
// matches case-insensitively and a repeated key keeps its last value; other
// keys are ignored.
impl<'de> Deserialize<'de> for DeploymentConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(DeploymentConfigVisitor)
    }
}

struct DeploymentConfigVisitor;

impl<'de> Visitor<'de> for DeploymentConfigVisitor {
    type Value = DeploymentConfig;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object shaped like {\"services\": {...}}")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(DeploymentConfig::default())
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(DeploymentConfig::default())
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut services = BTreeMap::new();
        while let Some(key) = map.next_key::<String>()? {
            if key.eq_ignore_ascii_case("services") {
                services = map
                    .next_value::<Option<BTreeMap<String, ServiceSpec>>>()?
                    .unwrap_or_default();
            } else {
                map.next_value::<IgnoredAny>()?;
            }
        }
        Ok(DeploymentConfig { services })
    }
}

impl DeploymentConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_service(mut self, name: impl Into<String>, spec: ServiceSpec) -> Self {
        self.services.insert(name.into(), spec);
        self
    }

    pub fn has_any_services(&self) -> bool {
        !self.services.is_empty()
    }

    /// Some service name, or an empty string when there are none.
    /// With more than one service this is the first in name order.
    pub fn any_service_name(&self) -> &str {
        self.services
            .keys()
            .next()
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn service_names(&self) -> impl Iterator<Item = &str> {
        self.services.keys().map(String::as_str)
    }

    /// Summary form, e.g. `service(s) db, web`.
    pub fn cli_string(&self) -> String {
        let names = self.service_names().collect::<Vec<_>>().join(", ");
        format!("service(s) {names}")
    }
}

// Entries are concatenated without a separator; callers rely on this shape.
impl fmt::Display for DeploymentConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, spec) in &self.services {
            write!(f, "service: {name}, config: {spec}")?;
        }
        Ok(())
    }
}
