//! # idtab-verify — Proof Verification
//!
//! Verifies the active proofs of an
//! [`IdentityTable`](idtab_table::IdentityTable) against external
//! authorities through pluggable collaborators:
//!
//! - [`HintSource`]: server-provided sig hints, by signature id.
//! - [`ProofCache`]: prior outcomes, by signature id. Shared by concurrent
//!   checks.
//! - [`CheckerFactory`] / [`ProofChecker`]: the per-type two-step check.
//! - [`DisplaySink`]: one rendered line per checked proof.
//!
//! [`Identifier::identify`] drives them and reports one aggregate result.

pub mod cache;
pub mod checker;
pub mod config;
pub mod error;
pub mod hint;
pub mod identify;
pub mod sink;

pub use cache::{CheckResult, MemoryProofCache, ProofCache};
pub use checker::{CheckerFactory, HintOnlyChecker, HintOnlyCheckerFactory, ProofChecker};
pub use config::IdentifyConfig;
pub use error::{ConfigError, IdentifyError};
pub use hint::{HintSource, SigHint, SigHints};
pub use identify::{CheckOutcome, Identifier};
pub use sink::{DisplaySink, StdoutSink, VecSink};
