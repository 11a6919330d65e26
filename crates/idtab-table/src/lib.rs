//! # idtab-table — Identity Table Construction
//!
//! Turns an ordered [`SigChain`](idtab_core::SigChain) into an
//! [`IdentityTable`]: every link classified into a [`TypedChainLink`],
//! revocations and untracks linked back to their targets, proofs grouped by
//! table key, and the active-proof set resolved.
//!
//! ## Pipeline
//!
//! ```text
//! ChainLink ─► Classifier ─► TypedChainLink ─► IdentityTable::insert ─► active-proof resolution
//! ```
//!
//! ## Failure Model
//!
//! Construction never fails. Malformed links degrade to `Generic`;
//! revocations of unknown ids and untracks of never-tracked users are
//! ignored. Each anomaly is logged through `tracing` and kept as a
//! [`TableWarning`] on the table.

pub mod active;
pub mod classify;
pub mod crypto;
pub mod error;
pub mod link;
pub mod proof;
pub mod table;
pub mod track;

#[cfg(test)]
pub(crate) mod testutil;

pub use classify::Classifier;
pub use crypto::CryptocurrencyLink;
pub use error::{ClassifyError, TableWarning};
pub use link::{GenericLink, LinkBase, RevokeLink, TypedChainLink, TypedLink};
pub use proof::{
    CheckReport, ProofClaim, ProofKind, RemoteProof, SelfSigLink, SocialProofLink, WebProofLink,
    WebProtocol, SELF_SIG_TABLE_KEY,
};
pub use table::IdentityTable;
pub use track::{TrackLink, UntrackLink};
