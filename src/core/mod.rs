// Core modules implementing normalization, validation, rendering and errors.
pub mod convert;
pub mod deployment;
pub mod error;
pub mod service;
pub mod validate;
