//! # Track and Untrack Links
//!
//! A track statement vouches for another identity; an untrack statement
//! withdraws that. An untrack supersedes **every** earlier track of the
//! same username, so a track is inactive when it was explicitly revoked
//! or when an untrack points back at it.

use idtab_core::SigId;

use crate::link::{LinkBase, TypedLink};

/// Statement vouching for another identity.
#[derive(Debug, Clone)]
pub struct TrackLink {
    base: LinkBase,
    whom: String,
    untrack: Option<SigId>,
}

impl TrackLink {
    pub fn new(base: LinkBase, whom: impl Into<String>) -> Self {
        Self {
            base,
            whom: whom.into(),
            untrack: None,
        }
    }

    /// The tracked username.
    pub fn whom(&self) -> &str {
        &self.whom
    }

    /// The untrack statement that superseded this track, if any.
    pub fn untracked_by(&self) -> Option<&SigId> {
        self.untrack.as_ref()
    }

    pub(crate) fn set_untrack(&mut self, by: &SigId) {
        self.untrack = Some(by.clone());
    }
}

impl TypedLink for TrackLink {
    fn base(&self) -> &LinkBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut LinkBase {
        &mut self.base
    }

    fn link_type(&self) -> &'static str {
        "track"
    }

    fn to_display_string(&self) -> String {
        self.whom.clone()
    }

    fn is_revoked(&self) -> bool {
        self.base.is_revoked() || self.untrack.is_some()
    }
}

/// Statement withdrawing a track.
#[derive(Debug, Clone)]
pub struct UntrackLink {
    base: LinkBase,
    whom: String,
}

impl UntrackLink {
    pub fn new(base: LinkBase, whom: impl Into<String>) -> Self {
        Self {
            base,
            whom: whom.into(),
        }
    }

    /// The username being released.
    pub fn whom(&self) -> &str {
        &self.whom
    }
}

impl TypedLink for UntrackLink {
    fn base(&self) -> &LinkBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut LinkBase {
        &mut self.base
    }

    fn link_type(&self) -> &'static str {
        "untrack"
    }

    fn to_display_string(&self) -> String {
        self.whom.clone()
    }

    fn is_revocation_ish(&self) -> bool {
        true
    }
}
