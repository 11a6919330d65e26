//! # Proof Status Codes
//!
//! Outcome codes for verifying a remote proof. Codes below 100 are
//! successes, 100..200 are soft failures (the remote was unreachable or
//! flaky; retry may help), and 200 and above are hard failures (the proof
//! is wrong or gone).
//!
//! `ProofError` pairs a code with a human description. It is a plain value
//! so it can be cached per signature id and stored on the checked link.

use serde::{Deserialize, Serialize};

/// Verification outcome code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProofStatus {
    Ok,
    Local,
    Found,

    HostUnreachable,
    PermissionDenied,
    FailedParse,
    DnsError,
    AuthFailed,
    Http500,
    Timeout,
    InternalError,

    NotFound,
    ContentFailure,
    BadUsername,
    BadRemoteId,
    TextNotFound,
    BadArgs,
    ContentMissing,
    TitleNotFound,
    ServiceError,
    Http300,
    Http400,
    HttpOther,
    EmptyJson,
    Deleted,
    ServiceDead,
    BadSignature,
    BadApiUrl,
    UnknownType,
    NoHint,
    BadHintText,
}

impl ProofStatus {
    /// Numeric wire code.
    pub fn code(self) -> u16 {
        match self {
            Self::Ok => 1,
            Self::Local => 2,
            Self::Found => 3,
            Self::HostUnreachable => 101,
            Self::PermissionDenied => 103,
            Self::FailedParse => 106,
            Self::DnsError => 107,
            Self::AuthFailed => 108,
            Self::Http500 => 150,
            Self::Timeout => 160,
            Self::InternalError => 170,
            Self::NotFound => 201,
            Self::ContentFailure => 202,
            Self::BadUsername => 203,
            Self::BadRemoteId => 204,
            Self::TextNotFound => 205,
            Self::BadArgs => 206,
            Self::ContentMissing => 207,
            Self::TitleNotFound => 208,
            Self::ServiceError => 209,
            Self::Http300 => 211,
            Self::Http400 => 212,
            Self::HttpOther => 213,
            Self::EmptyJson => 214,
            Self::Deleted => 301,
            Self::ServiceDead => 302,
            Self::BadSignature => 303,
            Self::BadApiUrl => 304,
            Self::UnknownType => 305,
            Self::NoHint => 306,
            Self::BadHintText => 307,
        }
    }

    /// Whether this code means the proof verified.
    pub fn is_ok(self) -> bool {
        self.code() < 100
    }

    /// Whether this is a hard failure rather than a transient one.
    pub fn is_hard(self) -> bool {
        self.code() >= 200
    }
}

impl std::fmt::Display for ProofStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = serde_json::to_value(self)
            .ok()
            .and_then(|v| v.as_str().map(str::to_ascii_uppercase))
            .unwrap_or_else(|| format!("{self:?}"));
        f.write_str(&s)
    }
}

/// A failed verification: status code plus description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{} (code={})", .desc, .status.code())]
pub struct ProofError {
    /// Outcome code.
    pub status: ProofStatus,
    /// Human-readable description.
    pub desc: String,
}

impl ProofError {
    /// Create a proof error.
    pub fn new(status: ProofStatus, desc: impl Into<String>) -> Self {
        Self {
            status,
            desc: desc.into(),
        }
    }

    /// Whether the failure is hard (see [`ProofStatus::is_hard`]).
    pub fn is_hard(&self) -> bool {
        self.status.is_hard()
    }
}
