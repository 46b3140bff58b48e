//! securecheck-core: the SecureCheck check-post stop ledger.
//!
//! One table of traffic-stop records, an ingestion path with a
//! prior-arrest advisory, and a fixed catalog of aggregate reports.
//!
//! RULES:
//!   - Only store.rs talks to the database. Everything else goes through
//!     store methods.
//!   - Records are validated once, in the ingestion path, before any
//!     store interaction.
//!   - Reports are structured descriptors; runtime filters are composed
//!     as clauses with bound parameters, never spliced into SQL text.

pub mod error;
pub mod export;
pub mod ingest;
pub mod record;
pub mod reports;
pub mod rows;
pub mod session;
pub mod store;
pub mod types;
