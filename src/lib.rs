//! Purpose: Shared core library crate used by the `csgsi` CLI and tests.
//! Exports: `core` (snapshot decoding, coercion, vocabularies, diagnostics),
//! `config` (registration file rendering), `endpoint` (HTTP listener and
//! single-slot buffer), `view` (aggregations over decoded snapshots).
//! Role: Internal library backing the binary; not yet a stable public SDK.
//! Invariants: Decoding is best-effort and never panics on malformed input.
//! Invariants: Core modules prefer explicit inputs/outputs over hidden state.
pub mod config;
pub mod core;
pub mod endpoint;
pub mod view;
