//! Generate typed frontend API modules from OpenAPI documents.
//!
//! Every group of operations becomes a directory holding a `types.ts` with
//! interface declarations and an `index.ts` with one request function per
//! operation. The pure engine lives in [`generation`]; [`application`]
//! sequences a run over the ports implemented in [`infrastructure`].
#![deny(unsafe_code)]

pub mod application;
pub mod core;
pub mod generation;
pub mod infrastructure;
