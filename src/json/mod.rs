//! Purpose: Internal JSON boundary for deployment conversion inside the library.
//! Exports: `parse` module with encode/decode helpers and failure hints.
//! Role: Single seam for serde_json so conversion avoids ad hoc decode logic.
//! Notes: Not reachable from the binary; the CLI decodes its outer document itself.
//! Invariants: Helper APIs stay small and deterministic (no hidden global state).

pub(crate) mod parse;
