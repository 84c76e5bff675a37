//! Application services: use-case orchestration.
//!
//! Each service module implements a single use-case by composing domain logic
//! with port trait calls. Services import only from `crate::domain` and
//! `crate::application::ports`, never from `crate::infra`, `crate::commands`,
//! or `crate::output`.

pub mod device;
pub mod executor;
pub mod file_finder;
pub mod locator;
pub mod module_run;
pub mod run_plan;
