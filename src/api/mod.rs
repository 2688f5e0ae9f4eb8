//! Purpose: Define the stable public Rust API boundary for deployconf.
//! Exports: Deployment model, conversion, validation and error types.
//! Role: Public, additive-only surface used by the CLI and embedding agents.
//! Invariants: This module is the only public path to the core modules.

mod validation;

#[doc(hidden)]
pub use crate::core::error::to_exit_code;
pub use crate::core::convert::{DeploymentInput, convert_serializable, convert_to_deployment_config};
pub use crate::core::deployment::DeploymentConfig;
pub use crate::core::error::{Error, ErrorKind, MissingField};
pub use crate::core::service::ServiceSpec;
pub use validation::{ValidationIssue, ValidationReport, ValidationStatus};
