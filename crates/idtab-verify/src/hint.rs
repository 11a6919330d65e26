//! # Sig Hints
//!
//! A sig hint is server-provided guidance for checking one proof: where
//! the remote proof lives and what text it should contain. Hints are looked
//! up by signature id through [`HintSource`].
//!
//! ## Wire format
//!
//! ```json
//! { "hints": [ { "sig_id": "…", "remote_id": "…", "api_url": "…",
//!                "human_url": "…", "proof_text_check": "…" } ] }
//! ```

use std::collections::HashMap;
use std::path::Path;

use idtab_core::{IdtabError, SigId};
use serde::{Deserialize, Serialize};

/// Verification guidance for one proof.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigHint {
    pub sig_id: SigId,
    /// Identifier of the proof on the remote service.
    #[serde(default)]
    pub remote_id: String,
    /// Machine-facing location of the proof.
    #[serde(default)]
    pub api_url: String,
    /// Location a person would visit to see the proof.
    #[serde(default)]
    pub human_url: String,
    /// Text the proof is expected to contain.
    #[serde(default, alias = "proof_text_check")]
    pub check_text: String,
}

/// Lookup of hints by signature id.
pub trait HintSource: Send + Sync {
    fn lookup(&self, sig_id: &SigId) -> Option<SigHint>;
}

#[derive(Debug, Deserialize)]
struct HintsDocument {
    hints: Vec<SigHint>,
}

/// An in-memory set of hints.
#[derive(Debug, Clone, Default)]
pub struct SigHints {
    hints: HashMap<SigId, SigHint>,
}

impl SigHints {
    pub fn new(hints: impl IntoIterator<Item = SigHint>) -> Self {
        Self {
            hints: hints.into_iter().map(|h| (h.sig_id.clone(), h)).collect(),
        }
    }

    pub fn from_json_str(s: &str) -> Result<Self, IdtabError> {
        let doc: HintsDocument = serde_json::from_str(s)?;
        Ok(Self::new(doc.hints))
    }

    pub fn from_path(path: &Path) -> Result<Self, IdtabError> {
        Self::from_json_str(&std::fs::read_to_string(path)?)
    }

    pub fn len(&self) -> usize {
        self.hints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hints.is_empty()
    }
}

impl HintSource for SigHints {
    fn lookup(&self, sig_id: &SigId) -> Option<SigHint> {
        self.hints.get(sig_id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hints_document() {
        let hints = SigHints::from_json_str(
            r#"{ "hints": [
                { "sig_id": "A1B2", "remote_id": "9",
                  "api_url": "https://x.com/.well-known/idtab-proof.txt",
                  "human_url": "https://x.com/idtab-proof.txt",
                  "proof_text_check": "sig:a1b2" },
                { "sig_id": "c3" }
            ] }"#,
        )
        .unwrap();
        assert_eq!(hints.len(), 2);
        let h = hints.lookup(&SigId::parse("a1b2").unwrap()).unwrap();
        assert_eq!(h.check_text, "sig:a1b2");
        assert_eq!(h.human_url, "https://x.com/idtab-proof.txt");
        assert_eq!(hints.lookup(&SigId::parse("c3").unwrap()).unwrap().api_url, "");
        assert!(hints.lookup(&SigId::parse("ff").unwrap()).is_none());
    }

    #[test]
    fn test_bad_sig_id_rejected() {
        assert!(SigHints::from_json_str(r#"{ "hints": [ { "sig_id": "zz" } ] }"#).is_err());
    }
}
