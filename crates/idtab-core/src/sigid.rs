//! # Signature Identifiers
//!
//! `SigId` names one signed statement. It is the primary key of every
//! identity-table index and of the verification-result cache.
//!
//! Signature ids are lowercase hex. Input is normalized on construction,
//! so two ids that differ only in case compare equal.

use serde::{Deserialize, Serialize};

use crate::error::IdtabError;

const SHORT_LEN: usize = 8;
const MEDIUM_LEN: usize = 16;

/// Identifier of one signed chain link.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SigId(String);

impl SigId {
    /// Parse a signature id from hex, normalizing to lowercase.
    pub fn parse(s: &str) -> Result<Self, IdtabError> {
        let s = s.trim();
        if s.is_empty() || !s.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(IdtabError::InvalidSigId(s.to_string()));
        }
        Ok(Self(s.to_ascii_lowercase()))
    }

    /// The full hex form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Abbreviated form used in log lines and revoke display strings.
    pub fn to_short(&self) -> &str {
        prefix(&self.0, SHORT_LEN)
    }

    /// The form that proof text posted on a remote service must contain.
    pub fn to_medium(&self) -> &str {
        prefix(&self.0, MEDIUM_LEN)
    }
}

fn prefix(s: &str, n: usize) -> &str {
    // ASCII hex only, so byte slicing is on a char boundary.
    &s[..s.len().min(n)]
}

impl TryFrom<String> for SigId {
    type Error = IdtabError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<SigId> for String {
    fn from(id: SigId) -> Self {
        id.0
    }
}

impl std::fmt::Display for SigId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Position of a link within its chain. Starts at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Seqno(pub u64);

impl Seqno {
    /// The raw sequence number.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for Seqno {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
