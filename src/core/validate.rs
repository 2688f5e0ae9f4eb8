// Completeness checks run before a deployment is handed to a container runtime.
// Services are checked in name order; the first violation is reported.
use crate::core::deployment::DeploymentConfig;
use crate::core::error::{Error, ErrorKind, MissingField};
use crate::core::service::ServiceSpec;
use tracing::debug;

impl DeploymentConfig {
    /// Is there enough information to start (or stop) every service?
    ///
    /// A deployment with no services passes trivially.
    pub fn can_start_stop(&self) -> Result<(), Error> {
        match service_issues(self).next() {
            Some(err) => {
                debug!(error = %err, "deployment cannot start");
                Err(err)
            }
            None => Ok(()),
        }
    }
}

pub(crate) fn service_issues(config: &DeploymentConfig) -> impl Iterator<Item = Error> + '_ {
    config
        .services
        .iter()
        .filter_map(|(name, spec)| check_service(name, spec))
}

fn check_service(name: &str, spec: &ServiceSpec) -> Option<Error> {
    if name.is_empty() {
        return Some(
            Error::new(ErrorKind::Validation)
                .with_message("no service name")
                .with_missing(MissingField::ServiceName),
        );
    }
    if !spec.has_image() {
        return Some(
            Error::new(ErrorKind::Validation)
                .with_message(format!("no docker image for service {name}"))
                .with_service(name)
                .with_missing(MissingField::Image),
        );
    }
    None
}
