//! srclist - source lists for aws-lc builds
//!
//! Reads the per-platform `cc_builder` files shipped with `aws-lc-sys`,
//! extracts their `sources: &[ ... ]` blocks, and renders them as Starlark
//! list declarations for a Buck2 or Bazel build.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and validation
//! - `extract`: Locating and classifying a platform file's sources
//! - `logging`: Diagnostic logging setup
//! - `manifest`: Building the per-platform source manifest
//! - `render`: Starlark output

pub mod cli;
pub mod config;
pub mod extract;
pub mod logging;
pub mod manifest;
pub mod render;
