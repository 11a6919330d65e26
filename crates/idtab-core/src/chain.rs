//! # Chain Links and Signature Chains
//!
//! A `ChainLink` is one signed statement that upstream has already
//! verified. It is immutable and shared by `Arc` with the typed link that
//! classifies it.
//!
//! A `SigChain` is the ordered, finite sequence of links for one identity.
//! Construction rejects chains whose sequence numbers do not strictly
//! increase or that repeat a signature id, since later links' revocations
//! depend on earlier links having been ingested first.
//!
//! ## Serialized form
//!
//! ```json
//! {
//!   "sig_id": "9f3c…0f",
//!   "seqno": 3,
//!   "ctime": 1400000000,
//!   "username": "max",
//!   "sig": "-----BEGIN PGP MESSAGE-----…",
//!   "payload": { "body": { "type": "track", … } },
//!   "revokes": ["…"],
//!   "fingerprint": "…",
//!   "active_key": true
//! }
//! ```
//!
//! When `revokes` is omitted it is derived from `body.revoke.sig_id` and
//! `body.revoke.sig_ids` in the payload.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;

use crate::error::{ChainError, IdtabError};
use crate::payload::Payload;
use crate::sigid::{Seqno, SigId};
use crate::temporal::Timestamp;

/// One verified signed statement.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainLink {
    sig_id: SigId,
    seqno: Seqno,
    ctime: Timestamp,
    username: String,
    armored_sig: String,
    payload: Payload,
    revocations: Vec<SigId>,
    fingerprint: Option<String>,
    active_key: bool,
}

impl ChainLink {
    /// Build a link. Revocations are taken from the payload's
    /// `body.revoke` section.
    pub fn new(
        sig_id: SigId,
        seqno: Seqno,
        ctime: Timestamp,
        username: impl Into<String>,
        armored_sig: impl Into<String>,
        payload: Payload,
    ) -> Self {
        let revocations = revocations_from_payload(&payload);
        Self {
            sig_id,
            seqno,
            ctime,
            username: username.into(),
            armored_sig: armored_sig.into(),
            payload,
            revocations,
            fingerprint: None,
            active_key: false,
        }
    }

    /// Replace the revocation list with one supplied upstream.
    pub fn with_revocations(mut self, revocations: Vec<SigId>) -> Self {
        self.revocations = revocations;
        self
    }

    /// Record the signing key's fingerprint and whether it is the active key.
    pub fn with_key(mut self, fingerprint: impl Into<String>, active: bool) -> Self {
        self.fingerprint = Some(fingerprint.into());
        self.active_key = active;
        self
    }

    pub fn sig_id(&self) -> &SigId {
        &self.sig_id
    }

    pub fn seqno(&self) -> Seqno {
        self.seqno
    }

    pub fn ctime(&self) -> Timestamp {
        self.ctime
    }

    /// Username of the signer.
    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn armored_sig(&self) -> &str {
        &self.armored_sig
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Signature ids this link declares void.
    pub fn revocations(&self) -> &[SigId] {
        &self.revocations
    }

    pub fn fingerprint(&self) -> Option<&str> {
        self.fingerprint.as_deref()
    }

    pub fn is_active_key(&self) -> bool {
        self.active_key
    }

    /// `uid=<username>, seq=<seqno>, link=<sigid>`
    pub fn to_debug_string(&self) -> String {
        format!(
            "uid={}, seq={}, link={}",
            self.username, self.seqno, self.sig_id
        )
    }
}

/// Collect `body.revoke.sig_id` and `body.revoke.sig_ids`. Entries that are
/// not valid signature ids are dropped.
pub fn revocations_from_payload(payload: &Payload) -> Vec<SigId> {
    let revoke = payload.at_path("body.revoke");
    let mut out = Vec::new();
    if let Ok(s) = revoke.at_key("sig_id").as_str() {
        out.extend(SigId::parse(s).ok());
    }
    if let Ok(list) = revoke.at_key("sig_ids").as_array() {
        out.extend(
            list.iter()
                .filter_map(|v| v.as_str())
                .filter_map(|s| SigId::parse(s).ok()),
        );
    }
    out
}

#[derive(Debug, Deserialize)]
struct ChainLinkRecord {
    sig_id: SigId,
    seqno: Seqno,
    ctime: i64,
    username: String,
    #[serde(default)]
    sig: String,
    payload: Payload,
    #[serde(default)]
    revokes: Option<Vec<SigId>>,
    #[serde(default)]
    fingerprint: Option<String>,
    #[serde(default)]
    active_key: bool,
}

impl TryFrom<ChainLinkRecord> for ChainLink {
    type Error = IdtabError;

    fn try_from(r: ChainLinkRecord) -> Result<Self, Self::Error> {
        let ctime = Timestamp::from_epoch_secs(r.ctime)?;
        let mut link = ChainLink::new(r.sig_id, r.seqno, ctime, r.username, r.sig, r.payload);
        if let Some(revokes) = r.revokes {
            link = link.with_revocations(revokes);
        }
        if let Some(fp) = r.fingerprint {
            link = link.with_key(fp, r.active_key);
        }
        Ok(link)
    }
}

/// The ordered links of one identity.
#[derive(Debug, Clone, Default)]
pub struct SigChain {
    links: Vec<Arc<ChainLink>>,
}

impl SigChain {
    /// Build a chain, checking canonical order.
    pub fn new(links: Vec<ChainLink>) -> Result<Self, ChainError> {
        let mut seen = HashSet::with_capacity(links.len());
        let mut prev: Option<Seqno> = None;
        for link in &links {
            if let Some(p) = prev {
                if link.seqno() <= p {
                    return Err(ChainError::OutOfOrder {
                        prev: p.get(),
                        next: link.seqno().get(),
                    });
                }
            }
            if !seen.insert(link.sig_id().clone()) {
                return Err(ChainError::DuplicateSigId(link.sig_id().to_string()));
            }
            prev = Some(link.seqno());
        }
        Ok(Self {
            links: links.into_iter().map(Arc::new).collect(),
        })
    }

    /// Parse a JSON array of serialized links.
    pub fn from_json_str(s: &str) -> Result<Self, IdtabError> {
        let records: Vec<ChainLinkRecord> = serde_json::from_str(s)?;
        let links = records
            .into_iter()
            .map(ChainLink::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(links)?)
    }

    /// Read and parse a JSON file of serialized links.
    pub fn from_path(path: &Path) -> Result<Self, IdtabError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Links in chain order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<ChainLink>> {
        self.links.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sid(s: &str) -> SigId {
        SigId::parse(s).unwrap()
    }

    fn link(id: &str, seq: u64, body: serde_json::Value) -> ChainLink {
        ChainLink::new(
            sid(id),
            Seqno(seq),
            Timestamp::from_epoch_secs(1_400_000_000).unwrap(),
            "max",
            "",
            Payload::new(json!({ "body": body })),
        )
    }

    #[test]
    fn test_revocations_from_payload() {
        let l = link(
            "aa",
            1,
            json!({
                "type": "revoke",
                "revoke": { "sig_id": "b1", "sig_ids": ["c2", "not hex", "d3"] }
            }),
        );
        assert_eq!(l.revocations(), &[sid("b1"), sid("c2"), sid("d3")]);
    }

    #[test]
    fn test_explicit_revocations_override() {
        let l = link("aa", 1, json!({ "revoke": { "sig_id": "b1" } }))
            .with_revocations(vec![sid("ee")]);
        assert_eq!(l.revocations(), &[sid("ee")]);
    }

    #[test]
    fn test_debug_string() {
        let l = link("abcd", 7, json!({}));
        assert_eq!(l.to_debug_string(), "uid=max, seq=7, link=abcd");
    }

    #[test]
    fn test_chain_rejects_out_of_order() {
        let err =
            SigChain::new(vec![link("a1", 2, json!({})), link("a2", 1, json!({}))]).unwrap_err();
        assert_eq!(err, ChainError::OutOfOrder { prev: 2, next: 1 });
    }

    #[test]
    fn test_chain_rejects_duplicate_sig_id() {
        let err =
            SigChain::new(vec![link("a1", 1, json!({})), link("a1", 2, json!({}))]).unwrap_err();
        assert!(matches!(err, ChainError::DuplicateSigId(_)));
    }

    #[test]
    fn test_from_json_str() {
        let raw = json!([
            {
                "sig_id": "a1", "seqno": 1, "ctime": 1400000000, "username": "max",
                "payload": { "body": { "type": "track" } },
                "fingerprint": "deadbeef", "active_key": true
            },
            {
                "sig_id": "a2", "seqno": 2, "ctime": 1400000100, "username": "max",
                "sig": "armored",
                "payload": { "body": { "type": "revoke", "revoke": { "sig_id": "a1" } } }
            }
        ])
        .to_string();
        let chain = SigChain::from_json_str(&raw).unwrap();
        assert_eq!(chain.len(), 2);
        let links: Vec<_> = chain.iter().collect();
        assert_eq!(links[0].fingerprint(), Some("deadbeef"));
        assert!(links[0].is_active_key());
        assert_eq!(links[1].armored_sig(), "armored");
        assert_eq!(links[1].revocations(), &[sid("a1")]);
    }
}
