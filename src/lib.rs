//! Schema-driven example synthesis and tagged JSON column codecs.
//!
//! Four independent, reentrant pieces over in-memory values (no I/O, no
//! state retained across calls):
//! - [`resolve`]: flatten `$ref`/`$defs` graphs into concrete schema trees;
//! - [`prune`]: materialize possibly-cyclic value graphs, cutting true
//!   cycles while preserving shared-but-acyclic references;
//! - [`synth`]: best-effort example values satisfying a schema's type,
//!   enum, format, and size constraints;
//! - [`codec`]: encode/decode single, list, and discriminated-union typed
//!   values through one JSON-bearing storage cell.

pub mod cli;
pub mod codec;
pub mod error;
pub mod path_de;
pub mod prune;
pub mod resolve;
pub mod schema;
pub mod synth;
