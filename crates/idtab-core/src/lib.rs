//! # idtab-core — Foundational Types for Identity Tables
//!
//! This crate is the leaf of the idtab workspace. It defines the values that
//! an upstream signature chain hands to the identity table, and the small
//! collaborators the table needs to read them.
//!
//! ## Key Design Principles
//!
//! 1. **Newtypes for identifiers.** `SigId` and `Seqno` are validated
//!    newtypes. No bare strings for signature ids.
//!
//! 2. **Chain links are immutable.** A `ChainLink` is produced upstream after
//!    signature verification and is shared by `Arc` with the typed link that
//!    classifies it. Nothing in this workspace mutates it.
//!
//! 3. **Payload reads are path lookups.** The signed body is semi-structured
//!    JSON. `Payload::at_path()` returns a `PayloadError` naming the path
//!    when a field is absent or of the wrong type.
//!
//! 4. **Proof outcomes are values.** `ProofError` is `Clone + PartialEq` so
//!    a verification outcome can be cached, compared, and stored on a link.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `idtab-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod btc;
pub mod chain;
pub mod error;
pub mod payload;
pub mod proof;
pub mod sigid;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use btc::{AddressDecoder, BitcoinNetwork, Base58CheckDecoder, DecodedAddress};
pub use chain::{ChainLink, SigChain};
pub use error::{AddressError, ChainError, IdtabError, PayloadError};
pub use payload::Payload;
pub use proof::{ProofError, ProofStatus};
pub use sigid::{Seqno, SigId};
pub use temporal::Timestamp;
