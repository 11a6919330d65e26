//! # Proof Checkers
//!
//! A checker verifies one proof in two steps. `check_hint` validates the
//! server-provided hint against the claim; only if that passes does
//! `check_status` confirm the proof is live at the remote authority.
//! Network-bound checkers for individual services plug in through
//! [`CheckerFactory`]; each is expected to apply its own I/O timeout.
//!
//! [`HintOnlyChecker`] performs the hint step and treats the status step as
//! passed, for offline verification.

use async_trait::async_trait;
use idtab_core::{ProofError, ProofStatus};
use idtab_table::{ProofClaim, ProofKind, WebProtocol};
use url::Url;

use crate::hint::SigHint;

/// Verifies one proof claim.
#[async_trait]
pub trait ProofChecker: Send + Sync {
    /// Validate the hint against the claim, without contacting the remote.
    async fn check_hint(&self, hint: &SigHint) -> Result<(), ProofError>;

    /// Confirm the proof is live at the remote authority.
    async fn check_status(&self, hint: &SigHint) -> Result<(), ProofError>;
}

/// Builds the checker for a claim's proof type.
pub trait CheckerFactory: Send + Sync {
    fn new_checker(&self, claim: &ProofClaim) -> Result<Box<dyn ProofChecker>, ProofError>;
}

/// Checks hints only; never contacts the remote.
#[derive(Debug, Clone)]
pub struct HintOnlyChecker {
    claim: ProofClaim,
}

impl HintOnlyChecker {
    pub fn new(claim: ProofClaim) -> Self {
        Self { claim }
    }
}

#[async_trait]
impl ProofChecker for HintOnlyChecker {
    async fn check_hint(&self, hint: &SigHint) -> Result<(), ProofError> {
        if matches!(self.claim.kind, ProofKind::SelfSig) {
            return Ok(());
        }

        let medium = self.claim.sig_id.to_medium();
        if !hint.check_text.contains(medium) {
            return Err(ProofError::new(
                ProofStatus::BadHintText,
                format!("hint text does not mention sig={medium}"),
            ));
        }

        if let ProofKind::Web { protocol, hostname } = &self.claim.kind {
            if *protocol != WebProtocol::Dns {
                check_url_host(&hint.api_url, hostname)?;
            }
        }
        Ok(())
    }

    async fn check_status(&self, _hint: &SigHint) -> Result<(), ProofError> {
        Ok(())
    }
}

fn check_url_host(raw: &str, hostname: &str) -> Result<(), ProofError> {
    let url = Url::parse(raw)
        .map_err(|e| ProofError::new(ProofStatus::BadApiUrl, format!("bad api url {raw:?}: {e}")))?;
    match url.host_str() {
        Some(host) if host.eq_ignore_ascii_case(hostname) => Ok(()),
        other => Err(ProofError::new(
            ProofStatus::BadApiUrl,
            format!("api url host {} does not match {hostname}", other.unwrap_or("(none)")),
        )),
    }
}

/// Factory yielding a [`HintOnlyChecker`] for every claim.
#[derive(Debug, Clone, Copy, Default)]
pub struct HintOnlyCheckerFactory;

impl CheckerFactory for HintOnlyCheckerFactory {
    fn new_checker(&self, claim: &ProofClaim) -> Result<Box<dyn ProofChecker>, ProofError> {
        Ok(Box::new(HintOnlyChecker::new(claim.clone())))
    }
}
