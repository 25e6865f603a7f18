//! # chronolog-precomp
//!
//! Compiles a probabilistic program once per query family and answers the
//! same family at any later timestamp by rebasing input events into the
//! compiled frame, rewriting fact weights, and shifting results back.
//!
//! | Module | Role |
//! |---|---|
//! | `templates` | Format-string fact and query templates, result feedback |
//! | `binding` | Mock text normalization and node lookup |
//! | `shift` | Time shift, event rebasing, result translation |
//! | `entry` | One compiled query family |
//! | `cache` | Build and evaluate across families |

pub mod binding;
pub mod cache;
pub mod entry;
pub mod shift;
pub mod templates;

pub use cache::PrecompilationCache;
pub use entry::PrecompiledEntry;
pub use templates::{FormatFactTemplate, FormatQueryTemplate, ResultFeedback};
