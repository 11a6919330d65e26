//! Chain builders shared by the unit tests in this crate.

use idtab_core::{ChainLink, Payload, Seqno, SigChain, SigId, Timestamp};
use serde_json::{json, Value};

/// One link to be placed on a test chain.
#[derive(Debug)]
pub(crate) struct LinkBuilder {
    id: &'static str,
    body: Value,
}

impl LinkBuilder {
    pub(crate) fn sid(id: &str) -> SigId {
        SigId::parse(id).unwrap()
    }

    pub(crate) fn raw(id: &'static str, body: Value) -> Self {
        Self { id, body }
    }

    pub(crate) fn self_sig(id: &'static str) -> Self {
        Self::raw(id, json!({ "type": "web_service_binding" }))
    }

    pub(crate) fn web(id: &'static str, protocol: &str, host: &str) -> Self {
        let service = if protocol == "dns" {
            json!({ "protocol": "dns", "domain": host })
        } else {
            json!({ "protocol": protocol, "hostname": host })
        };
        Self::raw(id, json!({ "type": "web_service_binding", "service": service }))
    }

    pub(crate) fn social(id: &'static str, service: &str, username: &str) -> Self {
        Self::raw(
            id,
            json!({
                "type": "web_service_binding",
                "service": { "name": service, "username": username }
            }),
        )
    }

    pub(crate) fn track(id: &'static str, whom: &str) -> Self {
        Self::raw(id, json!({ "type": "track", "track": { "basics": { "username": whom } } }))
    }

    pub(crate) fn untrack(id: &'static str, whom: &str) -> Self {
        Self::raw(id, json!({ "type": "untrack", "untrack": { "basics": { "username": whom } } }))
    }

    pub(crate) fn bitcoin(id: &'static str, address: &str) -> Self {
        Self::raw(
            id,
            json!({
                "type": "cryptocurrency",
                "cryptocurrency": { "type": "bitcoin", "address": address }
            }),
        )
    }

    pub(crate) fn revoke(id: &'static str, targets: &[&str]) -> Self {
        Self::raw(id, json!({ "type": "revoke", "revoke": { "sig_ids": targets } }))
    }

    /// Revoke `targets` while also being a proof or track of its own.
    pub(crate) fn also_revoking(mut self, targets: &[&str]) -> Self {
        self.body["revoke"] = json!({ "sig_ids": targets });
        self
    }
}

/// Build a chain with seqnos assigned 1, 2, 3… in the given order.
pub(crate) fn chain(links: Vec<LinkBuilder>) -> SigChain {
    let links = links
        .into_iter()
        .enumerate()
        .map(|(i, b)| {
            ChainLink::new(
                LinkBuilder::sid(b.id),
                Seqno(i as u64 + 1),
                Timestamp::from_epoch_secs(1_400_000_000 + i as i64).unwrap(),
                "max",
                "",
                Payload::new(json!({ "body": b.body })),
            )
        })
        .collect();
    SigChain::new(links).unwrap()
}
