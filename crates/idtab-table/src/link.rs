//! # Typed Chain Links
//!
//! Every chain link is classified exactly once into one `TypedChainLink`
//! variant. Each variant is a struct holding a shared `LinkBase` (the
//! upstream `ChainLink` plus the mutable revocation flag) and only its own
//! type-specific fields.
//!
//! All variants implement [`TypedLink`], the capability contract the
//! identity table and display code rely on. Proof-bearing variants also
//! implement [`RemoteProof`](crate::proof::RemoteProof).
//!
//! ## Variants
//!
//! | variant | type tag | display string |
//! |---|---|---|
//! | `Generic` | `generic` | `unknown` |
//! | `WebProof` | `proof` | `https://example.com` |
//! | `SocialProof` | `proof` | `max@github` |
//! | `SelfSig` | `self` | signer username |
//! | `Track` | `track` | tracked username |
//! | `Untrack` | `untrack` | untracked username |
//! | `Cryptocurrency` | `cryptocurrency` | address |
//! | `Revoke` | `revoke` | short ids of revoked links, comma-joined |

use std::sync::Arc;

use idtab_core::{ChainLink, Seqno, SigId, Timestamp};

use crate::crypto::CryptocurrencyLink;
use crate::proof::{RemoteProof, SelfSigLink, SocialProofLink, WebProofLink};
use crate::track::{TrackLink, UntrackLink};

// ─── Shared base ────────────────────────────────────────────────────

/// State common to every typed link.
///
/// The revocation flag is written only while the owning table is being
/// populated.
#[derive(Debug, Clone)]
pub struct LinkBase {
    link: Arc<ChainLink>,
    revoked: bool,
    revoked_by: Option<SigId>,
}

impl LinkBase {
    pub fn new(link: Arc<ChainLink>) -> Self {
        Self {
            link,
            revoked: false,
            revoked_by: None,
        }
    }

    /// The upstream link this typed link classifies.
    pub fn chain_link(&self) -> &ChainLink {
        &self.link
    }

    /// The explicit revocation flag, ignoring any variant-specific
    /// supersession.
    pub fn is_revoked(&self) -> bool {
        self.revoked
    }
}

// ─── Capability contract ────────────────────────────────────────────

/// What every classified link can answer.
pub trait TypedLink {
    fn base(&self) -> &LinkBase;

    fn base_mut(&mut self) -> &mut LinkBase;

    /// Short type tag, e.g. `proof` or `track`.
    fn link_type(&self) -> &'static str;

    /// One-line human-readable rendering.
    fn to_display_string(&self) -> String;

    /// True for links whose purpose is to take something back
    /// (revoke and untrack statements).
    fn is_revocation_ish(&self) -> bool {
        false
    }

    fn is_revoked(&self) -> bool {
        self.base().is_revoked()
    }

    /// Record that the link with id `by` revoked this one.
    fn mark_revoked(&mut self, by: &SigId) {
        let base = self.base_mut();
        base.revoked = true;
        base.revoked_by = Some(by.clone());
    }

    /// Which link revoked this one, if any.
    fn revoked_by(&self) -> Option<&SigId> {
        self.base().revoked_by.as_ref()
    }

    fn sig_id(&self) -> &SigId {
        self.base().link.sig_id()
    }

    fn seqno(&self) -> Seqno {
        self.base().link.seqno()
    }

    fn ctime(&self) -> Timestamp {
        self.base().link.ctime()
    }

    fn armored_sig(&self) -> &str {
        self.base().link.armored_sig()
    }

    /// Username of the identity that signed the link.
    fn username(&self) -> &str {
        self.base().link.username()
    }

    /// Signature ids this link revokes.
    fn revocations(&self) -> &[SigId] {
        self.base().link.revocations()
    }

    fn fingerprint(&self) -> Option<&str> {
        self.base().link.fingerprint()
    }

    fn is_active_key(&self) -> bool {
        self.base().link.is_active_key()
    }

    fn to_debug_string(&self) -> String {
        self.base().link.to_debug_string()
    }
}

// ─── Generic and Revoke ─────────────────────────────────────────────

/// Fallback for links of unknown or malformed type.
#[derive(Debug, Clone)]
pub struct GenericLink {
    base: LinkBase,
}

impl GenericLink {
    pub fn new(base: LinkBase) -> Self {
        Self { base }
    }
}

impl TypedLink for GenericLink {
    fn base(&self) -> &LinkBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut LinkBase {
        &mut self.base
    }

    fn link_type(&self) -> &'static str {
        "generic"
    }

    fn to_display_string(&self) -> String {
        "unknown".to_string()
    }
}

/// A statement that only revokes earlier links.
#[derive(Debug, Clone)]
pub struct RevokeLink {
    base: LinkBase,
}

impl RevokeLink {
    pub fn new(base: LinkBase) -> Self {
        Self { base }
    }
}

impl TypedLink for RevokeLink {
    fn base(&self) -> &LinkBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut LinkBase {
        &mut self.base
    }

    fn link_type(&self) -> &'static str {
        "revoke"
    }

    fn to_display_string(&self) -> String {
        self.revocations()
            .iter()
            .map(SigId::to_short)
            .collect::<Vec<_>>()
            .join(",")
    }

    fn is_revocation_ish(&self) -> bool {
        true
    }
}

// ─── The closed variant set ─────────────────────────────────────────

/// A chain link classified into its declared type.
#[derive(Debug, Clone)]
pub enum TypedChainLink {
    Generic(GenericLink),
    WebProof(WebProofLink),
    SocialProof(SocialProofLink),
    SelfSig(SelfSigLink),
    Track(TrackLink),
    Untrack(UntrackLink),
    Cryptocurrency(CryptocurrencyLink),
    Revoke(RevokeLink),
}

macro_rules! dispatch {
    ($self:expr, $l:ident => $body:expr) => {
        match $self {
            TypedChainLink::Generic($l) => $body,
            TypedChainLink::WebProof($l) => $body,
            TypedChainLink::SocialProof($l) => $body,
            TypedChainLink::SelfSig($l) => $body,
            TypedChainLink::Track($l) => $body,
            TypedChainLink::Untrack($l) => $body,
            TypedChainLink::Cryptocurrency($l) => $body,
            TypedChainLink::Revoke($l) => $body,
        }
    };
}

impl TypedChainLink {
    /// The proof view of this link, for proof-bearing variants.
    pub fn as_remote_proof(&self) -> Option<&dyn RemoteProof> {
        match self {
            Self::WebProof(l) => Some(l as &dyn RemoteProof),
            Self::SocialProof(l) => Some(l as &dyn RemoteProof),
            Self::SelfSig(l) => Some(l as &dyn RemoteProof),
            _ => None,
        }
    }

    pub fn as_remote_proof_mut(&mut self) -> Option<&mut dyn RemoteProof> {
        match self {
            Self::WebProof(l) => Some(l as &mut dyn RemoteProof),
            Self::SocialProof(l) => Some(l as &mut dyn RemoteProof),
            Self::SelfSig(l) => Some(l as &mut dyn RemoteProof),
            _ => None,
        }
    }

    pub fn as_track(&self) -> Option<&TrackLink> {
        match self {
            Self::Track(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_cryptocurrency(&self) -> Option<&CryptocurrencyLink> {
        match self {
            Self::Cryptocurrency(l) => Some(l),
            _ => None,
        }
    }
}

impl TypedLink for TypedChainLink {
    fn base(&self) -> &LinkBase {
        dispatch!(self, l => l.base())
    }

    fn base_mut(&mut self) -> &mut LinkBase {
        dispatch!(self, l => l.base_mut())
    }

    fn link_type(&self) -> &'static str {
        dispatch!(self, l => l.link_type())
    }

    fn to_display_string(&self) -> String {
        dispatch!(self, l => l.to_display_string())
    }

    fn is_revocation_ish(&self) -> bool {
        dispatch!(self, l => l.is_revocation_ish())
    }

    fn is_revoked(&self) -> bool {
        dispatch!(self, l => l.is_revoked())
    }

    fn mark_revoked(&mut self, by: &SigId) {
        dispatch!(self, l => l.mark_revoked(by))
    }
}
