//! # Chain-Link Classifier
//!
//! Reads a link's declared `body.type` and dispatches to a type-specific
//! parser. Classification never fails: a link whose payload is missing
//! required fields, or whose type is unknown, comes back as a generic link
//! together with a [`ClassifyError`] describing why.
//!
//! ## Dispatch
//!
//! | `body.type` | variant | required fields |
//! |---|---|---|
//! | `web_service_binding` | web, social, or self-sig proof | see below |
//! | `track` | `Track` | `body.track.basics.username` |
//! | `untrack` | `Untrack` | `body.untrack.basics.username` |
//! | `cryptocurrency` | `Cryptocurrency` | `body.cryptocurrency.type`, `.address` |
//! | `revoke` | `Revoke` | none |
//!
//! A `web_service_binding` with no `body.service` is a self-signature.
//! With `service.protocol` of `http:` or `https:` and a `hostname` it is a
//! web proof; with protocol `dns` and a `domain` it is a DNS proof. With
//! no protocol but a `name` and `username` it is a social proof.

use std::sync::Arc;

use idtab_core::{AddressDecoder, Base58CheckDecoder, BitcoinNetwork, ChainLink};

use crate::crypto::CryptocurrencyLink;
use crate::error::ClassifyError;
use crate::link::{GenericLink, LinkBase, RevokeLink, TypedChainLink};
use crate::proof::{SelfSigLink, SocialProofLink, WebProofLink, WebProtocol};
use crate::track::{TrackLink, UntrackLink};

/// Turns chain links into typed links.
pub struct Classifier {
    decoder: Box<dyn AddressDecoder>,
    network: BitcoinNetwork,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(Box::new(Base58CheckDecoder), BitcoinNetwork::Mainnet)
    }
}

impl std::fmt::Debug for Classifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Classifier")
            .field("network", &self.network)
            .finish_non_exhaustive()
    }
}

impl Classifier {
    pub fn new(decoder: Box<dyn AddressDecoder>, network: BitcoinNetwork) -> Self {
        Self { decoder, network }
    }

    /// Classify one link. Always yields a typed link; the error, if any,
    /// explains why it degraded to generic.
    pub fn classify(&self, link: Arc<ChainLink>) -> (TypedChainLink, Option<ClassifyError>) {
        let base = LinkBase::new(link);
        match self.parse(&base) {
            Ok(typed) => (typed, None),
            Err(err) => (TypedChainLink::Generic(GenericLink::new(base)), Some(err)),
        }
    }

    fn parse(&self, base: &LinkBase) -> Result<TypedChainLink, ClassifyError> {
        let payload = base.chain_link().payload();
        let kind = payload.at_key("body").at_key("type").as_str().unwrap_or("");
        match kind {
            "" => Err(ClassifyError::NoType {
                link: debug_string(base),
            }),
            "web_service_binding" => parse_web_service_binding(base),
            "track" => parse_track(base),
            "untrack" => parse_untrack(base),
            "cryptocurrency" => self.parse_cryptocurrency(base),
            "revoke" => Ok(TypedChainLink::Revoke(RevokeLink::new(base.clone()))),
            other => Err(ClassifyError::UnknownType {
                kind: other.to_string(),
                link: debug_string(base),
            }),
        }
    }

    fn parse_cryptocurrency(&self, base: &LinkBase) -> Result<TypedChainLink, ClassifyError> {
        let section = base.chain_link().payload().at_path("body.cryptocurrency");
        let bad = |source| ClassifyError::BadCryptocurrency {
            link: debug_string(base),
            source,
        };
        let kind = section.at_key("type").as_str().map_err(bad)?;
        let address = section.at_key("address").as_str().map_err(bad)?;

        if kind != "bitcoin" {
            return Err(ClassifyError::UnsupportedCurrency {
                kind: kind.to_string(),
            });
        }

        let decoded = self
            .decoder
            .decode(address, self.network)
            .map_err(|source| ClassifyError::BadAddress {
                link: debug_string(base),
                source,
            })?;

        Ok(TypedChainLink::Cryptocurrency(CryptocurrencyLink::new(
            base.clone(),
            address,
            decoded.pkhash,
        )))
    }
}

fn debug_string(base: &LinkBase) -> String {
    base.chain_link().to_debug_string()
}

fn parse_web_service_binding(base: &LinkBase) -> Result<TypedChainLink, ClassifyError> {
    let service = base.chain_link().payload().at_path("body.service");

    if service.is_nil() {
        return Ok(TypedChainLink::SelfSig(SelfSigLink::new(base.clone())));
    }

    let parsed = if let Ok(protocol) = service.at_key("protocol").as_str() {
        let web = match service.at_key("hostname").as_str() {
            Ok(hostname) => match protocol {
                "http:" => Some((WebProtocol::Http, hostname)),
                "https:" => Some((WebProtocol::Https, hostname)),
                _ => None,
            },
            Err(_) => match service.at_key("domain").as_str() {
                Ok(domain) if protocol == "dns" => Some((WebProtocol::Dns, domain)),
                _ => None,
            },
        };
        web.map(|(p, h)| TypedChainLink::WebProof(WebProofLink::new(base.clone(), p, h)))
    } else {
        match (
            service.at_key("name").as_str(),
            service.at_key("username").as_str(),
        ) {
            (Ok(name), Ok(username)) => Some(TypedChainLink::SocialProof(SocialProofLink::new(
                base.clone(),
                name,
                username,
            ))),
            _ => None,
        }
    };

    parsed.ok_or_else(|| ClassifyError::UnrecognizedWebProof {
        service: service.to_debug_string(),
        link: debug_string(base),
    })
}

fn parse_track(base: &LinkBase) -> Result<TypedChainLink, ClassifyError> {
    let whom = base
        .chain_link()
        .payload()
        .at_path("body.track.basics.username")
        .as_str()
        .map_err(|source| ClassifyError::BadTrack {
            link: debug_string(base),
            source,
        })?;
    Ok(TypedChainLink::Track(TrackLink::new(base.clone(), whom)))
}

fn parse_untrack(base: &LinkBase) -> Result<TypedChainLink, ClassifyError> {
    let whom = base
        .chain_link()
        .payload()
        .at_path("body.untrack.basics.username")
        .as_str()
        .map_err(|source| ClassifyError::BadUntrack {
            link: debug_string(base),
            source,
        })?;
    Ok(TypedChainLink::Untrack(UntrackLink::new(base.clone(), whom)))
}
