//! # Identify
//!
//! Verifies every active proof of an [`IdentityTable`] and reports a single
//! aggregate outcome.
//!
//! ## Per-proof protocol
//!
//! A self-signature is proved by the chain itself and passes without a
//! hint, cache entry or checker. For every other proof:
//!
//! 1. Look up the sig hint. None → `NO_HINT`, nothing else is attempted.
//! 2. A cached result, if present and fresh, is the outcome.
//! 3. Otherwise build a checker for the claim (construction may fail),
//!    run `check_hint`, then `check_status` only if the hint passed. The
//!    outcome is written to the cache.
//!
//! ## Aggregate
//!
//! Proofs are checked concurrently, bounded by
//! `max_concurrent_checks`. Every outcome is recorded on its link with
//! [`IdentityTable::mark_checked`] and rendered to the display sink as
//! soon as it completes, followed by the active cryptocurrency binding. A
//! failing or stalled proof never holds back the others; any failure makes the whole run
//! fail with [`IdentifyError::ProofsFailed`].

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use idtab_core::{ProofError, ProofStatus};
use idtab_table::{CheckReport, IdentityTable, ProofClaim, ProofKind, RemoteProof};

use crate::cache::{CheckResult, ProofCache};
use crate::checker::CheckerFactory;
use crate::config::IdentifyConfig;
use crate::error::IdentifyError;
use crate::hint::{HintSource, SigHint};
use crate::sink::DisplaySink;

/// Everything learned while checking one proof.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    pub hint: Option<SigHint>,
    /// Set when the result came from the cache.
    pub cached: Option<CheckResult>,
    pub result: Result<(), ProofError>,
}

/// Runs the verification protocol against a table's active proofs.
pub struct Identifier {
    hints: Arc<dyn HintSource>,
    cache: Option<Arc<dyn ProofCache>>,
    factory: Arc<dyn CheckerFactory>,
    sink: Arc<dyn DisplaySink>,
    config: IdentifyConfig,
}

impl Identifier {
    pub fn new(
        hints: Arc<dyn HintSource>,
        factory: Arc<dyn CheckerFactory>,
        sink: Arc<dyn DisplaySink>,
    ) -> Self {
        Self {
            hints,
            cache: None,
            factory,
            sink,
            config: IdentifyConfig::default(),
        }
    }

    pub fn with_cache(mut self, cache: Arc<dyn ProofCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn with_config(mut self, config: IdentifyConfig) -> Self {
        self.config = config;
        self
    }

    /// Check one proof claim.
    pub async fn check_active_proof(&self, claim: &ProofClaim) -> CheckOutcome {
        let sig_id = &claim.sig_id;

        if matches!(claim.kind, ProofKind::SelfSig) {
            return CheckOutcome {
                hint: None,
                cached: None,
                result: Ok(()),
            };
        }

        let Some(hint) = self.hints.lookup(sig_id) else {
            return CheckOutcome {
                hint: None,
                cached: None,
                result: Err(ProofError::new(
                    ProofStatus::NoHint,
                    format!("no server-given hint for sig={}", sig_id.to_medium()),
                )),
            };
        };

        if let Some(cached) = self.cache.as_ref().and_then(|c| c.get(sig_id)) {
            tracing::debug!(sig_id = %sig_id, "using cached proof result");
            let result = cached.outcome();
            return CheckOutcome {
                hint: Some(hint),
                cached: Some(cached),
                result,
            };
        }

        let checker = match self.factory.new_checker(claim) {
            Ok(c) => c,
            Err(err) => {
                return CheckOutcome {
                    hint: Some(hint),
                    cached: None,
                    result: Err(err),
                }
            }
        };

        let mut result = checker.check_hint(&hint).await;
        if result.is_ok() {
            result = checker.check_status(&hint).await;
        }
        tracing::debug!(sig_id = %sig_id, ok = result.is_ok(), "checked proof");

        if let Some(cache) = &self.cache {
            cache.put(sig_id, &result);
        }

        CheckOutcome {
            hint: Some(hint),
            cached: None,
            result,
        }
    }

    /// Verify every active proof in `table`.
    pub async fn identify(&self, table: &mut IdentityTable) -> Result<(), IdentifyError> {
        let claims: Vec<ProofClaim> = table.active_proofs().iter().map(|p| p.claim()).collect();
        tracing::info!(proofs = claims.len(), "identifying");

        let outcomes = stream::iter(claims)
            .map(|claim| async move {
                let outcome = self.check_active_proof(&claim).await;
                (claim, outcome)
            })
            .buffer_unordered(self.config.max_concurrent_checks.max(1));
        let mut outcomes = std::pin::pin!(outcomes);

        let mut failed = 0;
        while let Some((claim, outcome)) = outcomes.next().await {
            if let Err(err) = &outcome.result {
                failed += 1;
                tracing::warn!(
                    sig_id = %claim.sig_id,
                    proof = %claim.display,
                    "proof failed: {err}"
                );
            }
            table.mark_checked(&claim.sig_id, outcome.result.clone());
            if let Some(line) = self.render(table, &claim, &outcome) {
                self.sink.line(&line);
            }
        }

        if let Some(crypto) = table.active_cryptocurrency() {
            self.sink.line(&crypto.display_line());
        }

        if failed > 0 {
            return Err(IdentifyError::ProofsFailed { failed });
        }
        Ok(())
    }

    fn render(
        &self,
        table: &IdentityTable,
        claim: &ProofClaim,
        outcome: &CheckOutcome,
    ) -> Option<String> {
        let proof: &dyn RemoteProof = table.get(&claim.sig_id)?.as_remote_proof()?;
        let cached = outcome.cached.as_ref().map(CheckResult::to_display_string);
        let (human_url, check_text) = outcome
            .hint
            .as_ref()
            .map(|h| (h.human_url.as_str(), h.check_text.as_str()))
            .unwrap_or(("", ""));
        proof.display_check(&CheckReport {
            human_url,
            check_text,
            cached: cached.as_deref(),
            outcome: outcome.result.as_ref().map(|_| ()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::{HintOnlyCheckerFactory, ProofChecker};
    use crate::hint::SigHints;
    use crate::sink::VecSink;
    use async_trait::async_trait;
    use idtab_core::SigId;

    fn claim(sig: &str) -> ProofClaim {
        ProofClaim {
            sig_id: SigId::parse(sig).unwrap(),
            username: "max".to_string(),
            display: "maxtaco@github".to_string(),
            kind: ProofKind::Social {
                service: "github".to_string(),
                username: "maxtaco".to_string(),
            },
        }
    }

    fn hints(sig: &str, text: &str) -> Arc<SigHints> {
        Arc::new(SigHints::new([SigHint {
            sig_id: SigId::parse(sig).unwrap(),
            remote_id: String::new(),
            api_url: String::new(),
            human_url: "https://gist.github.com/maxtaco/1".to_string(),
            check_text: text.to_string(),
        }]))
    }

    struct Failing;

    impl CheckerFactory for Failing {
        fn new_checker(&self, _claim: &ProofClaim) -> Result<Box<dyn ProofChecker>, ProofError> {
            Err(ProofError::new(ProofStatus::UnknownType, "no checker"))
        }
    }

    struct StatusFails;

    #[async_trait]
    impl ProofChecker for StatusFails {
        async fn check_hint(&self, _hint: &SigHint) -> Result<(), ProofError> {
            Ok(())
        }

        async fn check_status(&self, _hint: &SigHint) -> Result<(), ProofError> {
            Err(ProofError::new(ProofStatus::Deleted, "proof removed"))
        }
    }

    struct StatusFailsFactory;

    impl CheckerFactory for StatusFailsFactory {
        fn new_checker(&self, _claim: &ProofClaim) -> Result<Box<dyn ProofChecker>, ProofError> {
            Ok(Box::new(StatusFails))
        }
    }

    #[tokio::test]
    async fn test_no_hint_skips_checker() {
        let id = Identifier::new(
            Arc::new(SigHints::default()),
            Arc::new(Failing),
            Arc::new(VecSink::new()),
        );
        let out = id.check_active_proof(&claim("a1")).await;
        assert!(out.hint.is_none());
        let err = out.result.unwrap_err();
        assert_eq!(err.status, ProofStatus::NoHint);
        assert_eq!(err.desc, "no server-given hint for sig=a1");
    }

    #[tokio::test]
    async fn test_checker_construction_failure() {
        let id = Identifier::new(hints("a1", "a1"), Arc::new(Failing), Arc::new(VecSink::new()));
        let out = id.check_active_proof(&claim("a1")).await;
        assert!(out.hint.is_some());
        assert_eq!(out.result.unwrap_err().status, ProofStatus::UnknownType);
    }

    #[tokio::test]
    async fn test_status_step_outcome_recorded() {
        let id = Identifier::new(
            hints("a1", "a1"),
            Arc::new(StatusFailsFactory),
            Arc::new(VecSink::new()),
        );
        let out = id.check_active_proof(&claim("a1")).await;
        assert_eq!(out.result.unwrap_err().status, ProofStatus::Deleted);
    }

    #[tokio::test]
    async fn test_hint_failure_skips_status() {
        let id = Identifier::new(
            hints("a1", "unrelated"),
            Arc::new(HintOnlyCheckerFactory),
            Arc::new(VecSink::new()),
        );
        let out = id.check_active_proof(&claim("a1")).await;
        assert_eq!(out.result.unwrap_err().status, ProofStatus::BadHintText);
    }

    #[tokio::test]
    async fn test_self_sig_needs_no_hint_or_checker() {
        let id = Identifier::new(
            Arc::new(SigHints::default()),
            Arc::new(Failing),
            Arc::new(VecSink::new()),
        );
        let self_sig = ProofClaim {
            kind: ProofKind::SelfSig,
            ..claim("a1")
        };
        let out = id.check_active_proof(&self_sig).await;
        assert_eq!(out.result, Ok(()));
        assert!(out.hint.is_none());
        assert!(out.cached.is_none());
    }
}
