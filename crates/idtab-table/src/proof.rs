//! # Remote Proof Links
//!
//! Proof-bearing links bind the identity to something outside the chain:
//! a web host (`http`, `https`), a DNS zone (`dns`), or an account on a
//! social service. The self-signature is treated as a proof of the
//! identity itself and is always implicitly proved.
//!
//! ## Table keys and tie-break policy
//!
//! Proofs are grouped for deduplication by [`RemoteProof::table_key`]:
//!
//! - `http` and `https` proofs share the `http` key; `dns` keys to `dns`.
//!   Several web proofs may be active at once (one identity can control
//!   many hosts), so web proofs are **not** last-writer-wins.
//! - Social proofs key by service name and are last-writer-wins: one
//!   account per service.
//! - The self-signature keys to [`SELF_SIG_TABLE_KEY`] and is
//!   last-writer-wins.

use idtab_core::{ProofError, SigId};

use crate::link::{LinkBase, TypedLink};

/// Table key shared by all self-signatures.
pub const SELF_SIG_TABLE_KEY: &str = "self";

pub(crate) const CHECK: &str = "\u{2714}";
pub(crate) const BADX: &str = "\u{2716}";

/// Transport named by a web proof.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WebProtocol {
    Http,
    Https,
    Dns,
}

impl WebProtocol {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Https => "https",
            Self::Dns => "dns",
        }
    }
}

impl std::fmt::Display for WebProtocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a proof claims, detached from the table so it can be handed to
/// a checker running on another task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProofClaim {
    pub sig_id: SigId,
    /// Signer of the proof.
    pub username: String,
    /// The proof's display string.
    pub display: String,
    pub kind: ProofKind,
}

/// The type-specific part of a [`ProofClaim`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProofKind {
    Web {
        protocol: WebProtocol,
        hostname: String,
    },
    Social {
        service: String,
        username: String,
    },
    SelfSig,
}

/// Inputs to [`RemoteProof::display_check`].
#[derive(Debug, Clone, Copy)]
pub struct CheckReport<'a> {
    /// Human-facing URL from the sig hint; empty when there was no hint.
    pub human_url: &'a str,
    /// Expected proof text from the sig hint; empty when there was no hint.
    pub check_text: &'a str,
    /// Rendering of the cached result, if the outcome came from the cache.
    pub cached: Option<&'a str>,
    pub outcome: Result<(), &'a ProofError>,
}

/// Capabilities of proof-bearing links.
pub trait RemoteProof: TypedLink {
    /// Grouping key for active-proof deduplication.
    fn table_key(&self) -> &str;

    /// Whether only the newest non-revoked proof for the key can be active.
    fn last_writer_wins(&self) -> bool;

    /// Remote account name claimed, or empty.
    fn remote_username(&self) -> &str;

    /// Remote host or domain claimed, or empty.
    fn hostname(&self) -> &str;

    /// Remote protocol, or empty.
    fn protocol(&self) -> &str;

    /// Snapshot of the claim for a checker.
    fn claim(&self) -> ProofClaim;

    /// Outcome of the most recent verification, if any.
    fn last_check(&self) -> Option<&Result<(), ProofError>>;

    fn mark_checked(&mut self, outcome: Result<(), ProofError>);

    /// Line describing a verification outcome, or `None` when this proof
    /// type shows nothing.
    fn display_check(&self, report: &CheckReport<'_>) -> Option<String>;
}

fn with_cached(mut msg: String, report: &CheckReport<'_>) -> String {
    if let Some(cached) = report.cached {
        msg.push(' ');
        msg.push_str(cached);
    }
    msg
}

// ─── Web ─────────────────────────────────────────────────────────────

/// Proof of control over a web host or DNS zone.
#[derive(Debug, Clone)]
pub struct WebProofLink {
    base: LinkBase,
    protocol: WebProtocol,
    hostname: String,
    checked: Option<Result<(), ProofError>>,
}

impl WebProofLink {
    pub fn new(base: LinkBase, protocol: WebProtocol, hostname: impl Into<String>) -> Self {
        Self {
            base,
            protocol,
            hostname: hostname.into(),
            checked: None,
        }
    }

    pub fn web_protocol(&self) -> WebProtocol {
        self.protocol
    }
}

impl TypedLink for WebProofLink {
    fn base(&self) -> &LinkBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut LinkBase {
        &mut self.base
    }

    fn link_type(&self) -> &'static str {
        "proof"
    }

    fn to_display_string(&self) -> String {
        format!("{}://{}", self.protocol, self.hostname)
    }
}

impl RemoteProof for WebProofLink {
    fn table_key(&self) -> &str {
        match self.protocol {
            WebProtocol::Http | WebProtocol::Https => "http",
            WebProtocol::Dns => "dns",
        }
    }

    fn last_writer_wins(&self) -> bool {
        false
    }

    fn remote_username(&self) -> &str {
        ""
    }

    fn hostname(&self) -> &str {
        &self.hostname
    }

    fn protocol(&self) -> &str {
        self.protocol.as_str()
    }

    fn claim(&self) -> ProofClaim {
        ProofClaim {
            sig_id: self.sig_id().clone(),
            username: self.username().to_string(),
            display: self.to_display_string(),
            kind: ProofKind::Web {
                protocol: self.protocol,
                hostname: self.hostname.clone(),
            },
        }
    }

    fn last_check(&self) -> Option<&Result<(), ProofError>> {
        self.checked.as_ref()
    }

    fn mark_checked(&mut self, outcome: Result<(), ProofError>) {
        self.checked = Some(outcome);
    }

    fn display_check(&self, report: &CheckReport<'_>) -> Option<String> {
        let msg = match report.outcome {
            Ok(()) if self.protocol == WebProtocol::Dns => format!(
                "{CHECK} admin of DNS zone {}: found TXT entry {}",
                self.hostname, report.check_text
            ),
            Ok(()) => format!(
                "{CHECK} admin of {} via {}: {}",
                self.hostname,
                self.protocol.as_str().to_ascii_uppercase(),
                report.human_url
            ),
            Err(err) => format!(
                "{BADX} Proof for {} failed: {err}",
                self.to_display_string()
            ),
        };
        Some(with_cached(msg, report))
    }
}

// ─── Social ──────────────────────────────────────────────────────────

/// Proof of control over an account on a social service.
#[derive(Debug, Clone)]
pub struct SocialProofLink {
    base: LinkBase,
    service: String,
    username: String,
    checked: Option<Result<(), ProofError>>,
}

impl SocialProofLink {
    pub fn new(base: LinkBase, service: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            base,
            service: service.into(),
            username: username.into(),
            checked: None,
        }
    }

    pub fn service(&self) -> &str {
        &self.service
    }
}

impl TypedLink for SocialProofLink {
    fn base(&self) -> &LinkBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut LinkBase {
        &mut self.base
    }

    fn link_type(&self) -> &'static str {
        "proof"
    }

    fn to_display_string(&self) -> String {
        format!("{}@{}", self.username, self.service)
    }
}

impl RemoteProof for SocialProofLink {
    fn table_key(&self) -> &str {
        &self.service
    }

    fn last_writer_wins(&self) -> bool {
        true
    }

    fn remote_username(&self) -> &str {
        &self.username
    }

    fn hostname(&self) -> &str {
        ""
    }

    fn protocol(&self) -> &str {
        ""
    }

    fn claim(&self) -> ProofClaim {
        ProofClaim {
            sig_id: self.sig_id().clone(),
            username: TypedLink::username(self).to_string(),
            display: self.to_display_string(),
            kind: ProofKind::Social {
                service: self.service.clone(),
                username: self.username.clone(),
            },
        }
    }

    fn last_check(&self) -> Option<&Result<(), ProofError>> {
        self.checked.as_ref()
    }

    fn mark_checked(&mut self, outcome: Result<(), ProofError>) {
        self.checked = Some(outcome);
    }

    fn display_check(&self, report: &CheckReport<'_>) -> Option<String> {
        let msg = match report.outcome {
            Ok(()) => format!(
                "{CHECK} \"{}\" on {}: {}",
                self.username, self.service, report.human_url
            ),
            Err(err) => format!(
                "{BADX} \"{}\" on {} failed: {err}",
                self.username, self.service
            ),
        };
        Some(with_cached(msg, report))
    }
}

// ─── Self-signature ──────────────────────────────────────────────────

/// The identity's attestation of itself.
#[derive(Debug, Clone)]
pub struct SelfSigLink {
    base: LinkBase,
    checked: Option<Result<(), ProofError>>,
}

impl SelfSigLink {
    pub fn new(base: LinkBase) -> Self {
        Self {
            base,
            checked: None,
        }
    }
}

impl TypedLink for SelfSigLink {
    fn base(&self) -> &LinkBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut LinkBase {
        &mut self.base
    }

    fn link_type(&self) -> &'static str {
        "self"
    }

    fn to_display_string(&self) -> String {
        self.username().to_string()
    }
}

impl RemoteProof for SelfSigLink {
    fn table_key(&self) -> &str {
        SELF_SIG_TABLE_KEY
    }

    fn last_writer_wins(&self) -> bool {
        true
    }

    fn remote_username(&self) -> &str {
        self.username()
    }

    fn hostname(&self) -> &str {
        ""
    }

    fn protocol(&self) -> &str {
        ""
    }

    fn claim(&self) -> ProofClaim {
        ProofClaim {
            sig_id: self.sig_id().clone(),
            username: self.username().to_string(),
            display: self.to_display_string(),
            kind: ProofKind::SelfSig,
        }
    }

    fn last_check(&self) -> Option<&Result<(), ProofError>> {
        self.checked.as_ref()
    }

    fn mark_checked(&mut self, outcome: Result<(), ProofError>) {
        self.checked = Some(outcome);
    }

    fn display_check(&self, _report: &CheckReport<'_>) -> Option<String> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use idtab_core::{ChainLink, Payload, ProofStatus, Seqno, Timestamp};
    use serde_json::json;
    use std::sync::Arc;

    fn base() -> LinkBase {
        LinkBase::new(Arc::new(ChainLink::new(
            SigId::parse("c0ffee").unwrap(),
            Seqno(2),
            Timestamp::from_epoch_secs(1_400_000_000).unwrap(),
            "max",
            "",
            Payload::new(json!({})),
        )))
    }

    fn ok_report<'a>() -> CheckReport<'a> {
        CheckReport {
            human_url: "https://max.example/idtab-proof.txt",
            check_text: "sig:c0ffee",
            cached: None,
            outcome: Ok(()),
        }
    }

    // ── Table keys ───────────────────────────────────────────────────

    #[test]
    fn test_https_and_http_share_table_key() {
        let a = WebProofLink::new(base(), WebProtocol::Https, "max.example");
        let b = WebProofLink::new(base(), WebProtocol::Http, "max.example");
        let c = WebProofLink::new(base(), WebProtocol::Dns, "max.example");
        assert_eq!(a.table_key(), "http");
        assert_eq!(b.table_key(), "http");
        assert_eq!(c.table_key(), "dns");
        assert!(!a.last_writer_wins());
    }

    #[test]
    fn test_social_keys_by_service() {
        let s = SocialProofLink::new(base(), "github", "maxtaco");
        assert_eq!(s.table_key(), "github");
        assert!(s.last_writer_wins());
        assert_eq!(s.remote_username(), "maxtaco");
        assert_eq!(s.hostname(), "");
        assert_eq!(s.protocol(), "");
        assert_eq!(s.to_display_string(), "maxtaco@github");
    }

    #[test]
    fn test_self_sig_capabilities() {
        let s = SelfSigLink::new(base());
        assert_eq!(s.table_key(), SELF_SIG_TABLE_KEY);
        assert!(s.last_writer_wins());
        assert_eq!(s.remote_username(), "max");
        assert_eq!(s.to_display_string(), "max");
        assert_eq!(s.link_type(), "self");
        assert!(s.display_check(&ok_report()).is_none());
    }

    // ── Display lines ────────────────────────────────────────────────

    #[test]
    fn test_web_display_check_success() {
        let w = WebProofLink::new(base(), WebProtocol::Https, "max.example");
        let line = w.display_check(&ok_report()).unwrap();
        assert_eq!(
            line,
            "\u{2714} admin of max.example via HTTPS: https://max.example/idtab-proof.txt"
        );
    }

    #[test]
    fn test_dns_display_check_success() {
        let w = WebProofLink::new(base(), WebProtocol::Dns, "max.example");
        let line = w.display_check(&ok_report()).unwrap();
        assert_eq!(line, "\u{2714} admin of DNS zone max.example: found TXT entry sig:c0ffee");
    }

    #[test]
    fn test_failure_display_with_cached_suffix() {
        let err = ProofError::new(ProofStatus::TextNotFound, "text not found");
        let s = SocialProofLink::new(base(), "twitter", "maxtaco");
        let report = CheckReport {
            human_url: "",
            check_text: "",
            cached: Some("[cached 2026-01-15T12:00:00Z]"),
            outcome: Err(&err),
        };
        let line = s.display_check(&report).unwrap();
        assert_eq!(
            line,
            concat!(
                "\u{2716} \"maxtaco\" on twitter failed: text not found (code=205) ",
                "[cached 2026-01-15T12:00:00Z]"
            )
        );
    }

    #[test]
    fn test_mark_checked_records_outcome() {
        let mut w = WebProofLink::new(base(), WebProtocol::Http, "max.example");
        assert!(w.last_check().is_none());
        w.mark_checked(Ok(()));
        assert_eq!(w.last_check(), Some(&Ok(())));
    }

    #[test]
    fn test_claim_snapshot() {
        let w = WebProofLink::new(base(), WebProtocol::Dns, "max.example");
        let claim = w.claim();
        assert_eq!(claim.display, "dns://max.example");
        assert_eq!(
            claim.kind,
            ProofKind::Web {
                protocol: WebProtocol::Dns,
                hostname: "max.example".to_string()
            }
        );
    }
}
