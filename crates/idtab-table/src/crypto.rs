//! # Cryptocurrency Links
//!
//! Binds the identity to a bitcoin address. Only the most recently
//! appended binding can be active; see
//! [`IdentityTable::active_cryptocurrency`](crate::IdentityTable::active_cryptocurrency).

use crate::link::{LinkBase, TypedLink};

pub(crate) const BTC: &str = "\u{20bf}";

/// A bitcoin address bound to the identity.
#[derive(Debug, Clone)]
pub struct CryptocurrencyLink {
    base: LinkBase,
    address: String,
    pkhash: Vec<u8>,
}

impl CryptocurrencyLink {
    pub fn new(base: LinkBase, address: impl Into<String>, pkhash: Vec<u8>) -> Self {
        Self {
            base,
            address: address.into(),
            pkhash,
        }
    }

    /// Currency type. Only bitcoin is classified.
    pub fn currency(&self) -> &'static str {
        "bitcoin"
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// Decoded public-key hash.
    pub fn pkhash(&self) -> &[u8] {
        &self.pkhash
    }

    /// `₿ bitcoin <address>`
    pub fn display_line(&self) -> String {
        format!("{BTC} {} {}", self.currency(), self.address)
    }
}

impl TypedLink for CryptocurrencyLink {
    fn base(&self) -> &LinkBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut LinkBase {
        &mut self.base
    }

    fn link_type(&self) -> &'static str {
        "cryptocurrency"
    }

    fn to_display_string(&self) -> String {
        self.address.clone()
    }
}
