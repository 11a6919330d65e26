//! # Active-Proof Resolution
//!
//! After ingestion, each table key's proof list is scanned newest-first.
//! Revoked entries are skipped. A non-revoked entry is selected unless an
//! entry with the same display string was already selected under any key.
//! For a last-writer-wins proof type the scan of that key stops at the
//! first non-revoked entry, selected or not; otherwise older entries are
//! still considered.
//!
//! Keys are visited in sorted order, so two tables built from the same
//! chain always agree on both membership and ordering of the active set.

use std::collections::HashSet;

use crate::crypto::CryptocurrencyLink;
use crate::link::{TypedChainLink, TypedLink};
use crate::proof::RemoteProof;
use crate::table::IdentityTable;

impl IdentityTable {
    pub(crate) fn collect_and_dedupe_active_proofs(&mut self) {
        let mut seen: HashSet<String> = HashSet::new();
        let mut active = Vec::new();

        for list in self.remote_proofs.values() {
            for &i in list.iter().rev() {
                let Some(proof) = self.order[i].as_remote_proof() else {
                    continue;
                };
                if proof.is_revoked() {
                    continue;
                }
                if seen.insert(proof.to_display_string()) {
                    active.push(i);
                }
                if proof.last_writer_wins() {
                    break;
                }
            }
        }

        tracing::debug!(active = active.len(), "resolved active proofs");
        self.active_proofs = active;
    }

    /// The currently active proofs.
    pub fn active_proofs(&self) -> Vec<&dyn RemoteProof> {
        self.active_proofs
            .iter()
            .filter_map(|&i| self.order[i].as_remote_proof())
            .collect()
    }

    /// Active proofs as full typed links, for callers that need the variant.
    pub fn active_links(&self) -> impl Iterator<Item = &TypedChainLink> {
        self.active_proofs.iter().map(|&i| &self.order[i])
    }

    /// The newest cryptocurrency binding, unless it was revoked. Older
    /// bindings never become active again.
    pub fn active_cryptocurrency(&self) -> Option<&CryptocurrencyLink> {
        let &last = self.cryptocurrency.last()?;
        let link = &self.order[last];
        if link.is_revoked() {
            return None;
        }
        link.as_cryptocurrency()
    }
}
