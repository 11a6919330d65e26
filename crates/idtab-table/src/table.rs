//! # Identity Table
//!
//! Owns every classified link of one identity and the indexes built over
//! them while the chain is ingested in order:
//!
//! - `links`: signature id → position in `order`.
//! - `order`: typed links in chain order, append-only.
//! - `revocations`: every signature id some link has revoked.
//! - `remote_proofs`: table key → proof positions, in chain order.
//! - `tracks`: tracked username → track positions, in chain order.
//! - `cryptocurrency`: cryptocurrency binding positions, in chain order.
//! - `active_proofs`: derived once after ingestion; see `active.rs`.
//!
//! Indexes store positions into `order`, which never shrinks or reorders,
//! so a position stays valid for the life of the table.
//!
//! ## Construction is single-writer
//!
//! A link's revocations and untracks only affect links ingested before it,
//! so ingestion must follow the chain's canonical order. After
//! [`IdentityTable::new`] returns, the only mutation is
//! [`IdentityTable::mark_checked`] on individual proof links.

use std::collections::{BTreeMap, HashMap, HashSet};

use idtab_core::{ProofError, SigChain, SigId};

use crate::classify::Classifier;
use crate::error::TableWarning;
use crate::link::{TypedChainLink, TypedLink};
use crate::proof::RemoteProof;
use crate::track::TrackLink;

/// Classified links of one identity, with revocation, proof, track and
/// cryptocurrency indexes.
#[derive(Debug, Clone, Default)]
pub struct IdentityTable {
    pub(crate) links: HashMap<SigId, usize>,
    pub(crate) order: Vec<TypedChainLink>,
    pub(crate) revocations: HashSet<SigId>,
    pub(crate) remote_proofs: BTreeMap<String, Vec<usize>>,
    pub(crate) tracks: HashMap<String, Vec<usize>>,
    pub(crate) cryptocurrency: Vec<usize>,
    pub(crate) active_proofs: Vec<usize>,
    warnings: Vec<TableWarning>,
}

impl IdentityTable {
    /// Classify and ingest every link of `chain`, then resolve the active
    /// proof set.
    pub fn new(chain: &SigChain, classifier: &Classifier) -> Self {
        let mut table = Self {
            links: HashMap::with_capacity(chain.len()),
            order: Vec::with_capacity(chain.len()),
            active_proofs: Vec::with_capacity(chain.len()),
            ..Self::default()
        };
        table.populate(chain, classifier);
        table.collect_and_dedupe_active_proofs();
        table
    }

    fn populate(&mut self, chain: &SigChain, classifier: &Classifier) {
        tracing::debug!(links = chain.len(), "+ populate identity table");
        for link in chain.iter() {
            let (typed, warning) = classifier.classify(link.clone());
            self.insert(typed);
            if let Some(w) = warning {
                self.warn(w.into());
            }
        }
        tracing::debug!(links = self.order.len(), "- populate identity table");
    }

    /// Append one typed link and apply its revocations and index side effects.
    pub(crate) fn insert(&mut self, link: TypedChainLink) {
        let idx = self.order.len();
        let sig_id = link.sig_id().clone();
        let revocations = link.revocations().to_vec();
        let debug = link.to_debug_string();

        if self.links.insert(sig_id.clone(), idx).is_some() {
            self.warn(TableWarning::DuplicateSigId(sig_id.clone()));
        }

        let proof_key = link.as_remote_proof().map(|p| p.table_key().to_string());
        let untrack_whom = match &link {
            TypedChainLink::Untrack(u) => Some(u.whom().to_string()),
            _ => None,
        };
        match &link {
            TypedChainLink::Track(t) => {
                self.tracks.entry(t.whom().to_string()).or_default().push(idx)
            }
            TypedChainLink::Cryptocurrency(_) => self.cryptocurrency.push(idx),
            _ => {}
        }
        if let Some(key) = proof_key.filter(|k| !k.is_empty()) {
            self.remote_proofs.entry(key).or_default().push(idx);
        }
        self.order.push(link);

        for target in revocations {
            self.revocations.insert(target.clone());
            match self.links.get(&target) {
                Some(&t) => self.order[t].mark_revoked(&sig_id),
                None => self.warn(TableWarning::UnknownRevocation {
                    target,
                    by: debug.clone(),
                }),
            }
        }

        if let Some(whom) = untrack_whom {
            self.apply_untrack(&whom, &sig_id);
        }
    }

    fn apply_untrack(&mut self, whom: &str, by: &SigId) {
        let Some(list) = self.tracks.get(whom) else {
            self.warn(TableWarning::UntrackWithoutTrack {
                whom: whom.to_string(),
            });
            return;
        };
        for &i in list {
            if let TypedChainLink::Track(t) = &mut self.order[i] {
                t.set_untrack(by);
            }
        }
    }

    fn warn(&mut self, warning: TableWarning) {
        tracing::warn!("{warning}");
        self.warnings.push(warning);
    }

    // ─── Accessors ──────────────────────────────────────────────────

    /// Number of links ingested.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Typed links in chain order.
    pub fn order(&self) -> &[TypedChainLink] {
        &self.order
    }

    /// The link with this signature id.
    pub fn get(&self, sig_id: &SigId) -> Option<&TypedChainLink> {
        self.links.get(sig_id).map(|&i| &self.order[i])
    }

    /// Every signature id revoked by some link, known to the table or not.
    pub fn revocations(&self) -> &HashSet<SigId> {
        &self.revocations
    }

    /// Whether some link revoked `sig_id`.
    pub fn is_revoked_id(&self, sig_id: &SigId) -> bool {
        self.revocations.contains(sig_id)
    }

    /// Proof links grouped under `key`, in chain order.
    pub fn remote_proofs(&self, key: &str) -> Vec<&dyn RemoteProof> {
        self.remote_proofs
            .get(key)
            .map(|list| list.iter().filter_map(|&i| self.order[i].as_remote_proof()).collect())
            .unwrap_or_default()
    }

    /// Table keys that have at least one proof.
    pub fn proof_keys(&self) -> impl Iterator<Item = &str> {
        self.remote_proofs.keys().map(String::as_str)
    }

    /// Track statements for `username`, in chain order.
    pub fn tracks(&self, username: &str) -> Vec<&TrackLink> {
        self.tracks
            .get(username)
            .map(|list| list.iter().filter_map(|&i| self.order[i].as_track()).collect())
            .unwrap_or_default()
    }

    /// Usernames with at least one track that is neither revoked nor
    /// untracked, sorted.
    pub fn tracked_usernames(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .tracks
            .iter()
            .filter(|(_, list)| list.iter().any(|&i| !self.order[i].is_revoked()))
            .map(|(name, _)| name.as_str())
            .collect();
        names.sort_unstable();
        names
    }

    /// Anomalies seen while building the table, in the order they occurred.
    pub fn warnings(&self) -> &[TableWarning] {
        &self.warnings
    }

    /// Record a verification outcome on the proof link with `sig_id`.
    /// Returns false when no proof link has that id.
    pub fn mark_checked(&mut self, sig_id: &SigId, outcome: Result<(), ProofError>) -> bool {
        let Some(&i) = self.links.get(sig_id) else {
            return false;
        };
        match self.order[i].as_remote_proof_mut() {
            Some(p) => {
                p.mark_checked(outcome);
                true
            }
            None => false,
        }
    }
}
