//! # Table Warnings
//!
//! Nothing in table construction is fatal. A link whose payload cannot be
//! classified degrades to a generic link; a revocation or untrack that
//! names nothing known is ignored. Each such event is logged at `warn` and
//! kept on the table as a `TableWarning` for callers that want to inspect
//! it.

use idtab_core::{AddressError, PayloadError, SigId};
use thiserror::Error;

/// Why a link could not be classified into its declared type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClassifyError {
    /// `body.type` is absent or empty.
    #[error("no type in signature @{link}")]
    NoType {
        /// Debug string of the link.
        link: String,
    },

    /// `body.type` names a type this table does not know.
    #[error("unknown signature type {kind} @{link}")]
    UnknownType {
        /// The declared type.
        kind: String,
        /// Debug string of the link.
        link: String,
    },

    /// A `web_service_binding` whose service section has no known shape.
    #[error("unrecognized web proof: {service} @{link}")]
    UnrecognizedWebProof {
        /// Compact JSON of `body.service`.
        service: String,
        /// Debug string of the link.
        link: String,
    },

    /// A track statement without `body.track.basics.username`.
    #[error("bad track statement @{link}: {source}")]
    BadTrack {
        link: String,
        source: PayloadError,
    },

    /// An untrack statement without `body.untrack.basics.username`.
    #[error("bad untrack statement @{link}: {source}")]
    BadUntrack {
        link: String,
        source: PayloadError,
    },

    /// A cryptocurrency statement missing `type` or `address`.
    #[error("bad cryptocurrency statement @{link}: {source}")]
    BadCryptocurrency {
        link: String,
        source: PayloadError,
    },

    /// Only bitcoin bindings are accepted.
    #[error("can only handle 'bitcoin' addresses for now; got {kind}")]
    UnsupportedCurrency {
        /// The declared currency type.
        kind: String,
    },

    /// The bitcoin address did not decode.
    #[error("at signature {link}: {source}")]
    BadAddress {
        link: String,
        source: AddressError,
    },
}

/// A non-fatal anomaly observed while building a table.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableWarning {
    /// The link was kept as a generic link.
    #[error(transparent)]
    Classify(#[from] ClassifyError),

    /// A revocation named a signature id not in the table.
    #[error("can't revoke signature {target} @{by}")]
    UnknownRevocation {
        /// The id that was named.
        target: SigId,
        /// The revoking link's debug string.
        by: String,
    },

    /// An untrack named a user with no prior track statement.
    #[error("bad untrack of {whom}; no previous tracking statement found")]
    UntrackWithoutTrack {
        /// The username being untracked.
        whom: String,
    },

    /// The same signature id was ingested twice; the newer link wins the index.
    #[error("signature {0} appears more than once")]
    DuplicateSigId(SigId),
}
