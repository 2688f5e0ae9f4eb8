//! Purpose: Library crate backing the `deployconf` CLI and embedding agents.
//! Exports: `api` (deployment model, conversion, validation, errors).
//! Role: Normalizes the polymorphic deployment field of an edge-service definition.
//! Invariants: Every operation is pure; no I/O and no shared state.
//! Invariants: Absence of deployment data is `Ok(None)`, never an error.
pub mod api;
pub(crate) mod core;
pub(crate) mod json;
