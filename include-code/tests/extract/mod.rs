//! Extraction tests against files on disk
//!
//! Scenario tests use the annotated fixtures in `common`; property tests generate snippet
//! bodies to check dedenting and determinism.

mod properties;
mod scenarios;
