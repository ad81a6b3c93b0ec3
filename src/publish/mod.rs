//! Publishing the manifest to the remote repository.
//!
//! Stage 3 of the pipeline. The remote only overwrites a file when the
//! request carries the file's current version token (its blob SHA), so a
//! publish is two round-trips:
//!
//! ```text
//! Idle → Resolving ─┬─ found ──→ Committing ─┬─ content in response → Success
//!                   │                         └─ anything else       → Failure(Rejected)
//!                   └─ not found → Failure(TargetNotFound)
//! ```
//!
//! 1. **Resolve**: list the repository root and find the entry named like
//!    the target. Its `sha` becomes a [`RemoteFileHandle`] for this call only.
//! 2. **Commit**: PUT the new content together with that `sha`. If someone
//!    updated the file in between, the remote rejects the write and the
//!    publish fails. That check is the only concurrency control.
//!
//! Nothing is retried. A missing target or a rejected write comes back as
//! [`PublishOutcome::Failure`]. Transport errors come back as
//! [`PublishError`]. Either way the caller decides whether to rerun.
//! Remote files are never created here; the target must already exist.

pub mod api;
pub mod github;

pub use api::{
    CommitRequest, CommitResponse, Committer, ContentApi, ContentEntry, PublishError,
};
pub use github::GithubContentApi;

use crate::manifest::Payload;
use std::fmt;
use tracing::{debug, info, warn};

/// The existing remote file a publish is about to replace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFileHandle {
    pub name: String,
    /// Current version token (content hash).
    pub sha: String,
}

/// Where a publish currently is. Traced at `debug`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishPhase {
    Idle,
    Resolving,
    Committing,
    Done,
}

impl fmt::Display for PublishPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PublishPhase::Idle => "idle",
            PublishPhase::Resolving => "resolving",
            PublishPhase::Committing => "committing",
            PublishPhase::Done => "done",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// The root listing has no entry with the target's name. No write was sent.
    TargetNotFound(String),
    /// The write was refused: stale token, permissions, validation, …
    Rejected {
        status: u16,
        message: Option<String>,
    },
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::TargetNotFound(name) => {
                write!(f, "{name} not found in repository root")
            }
            FailureReason::Rejected {
                status,
                message: Some(msg),
            } => write!(f, "write rejected ({status}): {msg}"),
            FailureReason::Rejected {
                status,
                message: None,
            } => write!(f, "write rejected ({status})"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    Success { commit_sha: Option<String> },
    Failure(FailureReason),
}

impl PublishOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, PublishOutcome::Success { .. })
    }
}

/// Fixed commit metadata attached to every write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitIdentity {
    pub message: String,
    pub committer: Committer,
}

/// Runs the resolve-then-commit protocol against a [`ContentApi`].
pub struct Publisher<'a, A: ContentApi + ?Sized> {
    api: &'a A,
    identity: CommitIdentity,
}

impl<'a, A: ContentApi + ?Sized> Publisher<'a, A> {
    pub fn new(api: &'a A, identity: CommitIdentity) -> Self {
        Self { api, identity }
    }

    /// Replace `target` in the repository root with `payload`.
    pub fn publish(&self, target: &str, payload: &Payload) -> Result<PublishOutcome, PublishError> {
        debug!(phase = %PublishPhase::Idle, file = target, "publish requested");

        let Some(handle) = self.resolve(target)? else {
            warn!(file = target, "target file not found, nothing written");
            debug!(phase = %PublishPhase::Done, "publish finished");
            return Ok(PublishOutcome::Failure(FailureReason::TargetNotFound(
                target.to_string(),
            )));
        };

        let outcome = self.commit(&handle, payload)?;
        debug!(phase = %PublishPhase::Done, "publish finished");
        Ok(outcome)
    }

    /// Phase 1: find the target in the root listing.
    fn resolve(&self, target: &str) -> Result<Option<RemoteFileHandle>, PublishError> {
        debug!(phase = %PublishPhase::Resolving, file = target, "looking up version token");
        let listing = self.api.list_root()?;
        Ok(find_target(&listing, target))
    }

    /// Phase 2: conditional write carrying the captured token.
    fn commit(
        &self,
        handle: &RemoteFileHandle,
        payload: &Payload,
    ) -> Result<PublishOutcome, PublishError> {
        debug!(phase = %PublishPhase::Committing, file = %handle.name, sha = %handle.sha, "writing");
        let request = CommitRequest {
            message: self.identity.message.clone(),
            committer: self.identity.committer.clone(),
            content: payload.as_str().to_string(),
            sha: handle.sha.clone(),
        };

        let response = self.api.put_contents(&handle.name, &request)?;
        if response.content().is_some() {
            let commit_sha = response.commit_sha().map(String::from);
            info!(file = %handle.name, commit = commit_sha.as_deref().unwrap_or("?"), "manifest published");
            Ok(PublishOutcome::Success { commit_sha })
        } else {
            let reason = FailureReason::Rejected {
                status: response.status,
                message: response.message().map(String::from),
            };
            warn!(file = %handle.name, %reason, "remote refused the update");
            Ok(PublishOutcome::Failure(reason))
        }
    }
}

/// First listing entry whose name equals `target` exactly.
pub fn find_target(listing: &[ContentEntry], target: &str) -> Option<RemoteFileHandle> {
    listing
        .iter()
        .find(|entry| entry.name == target)
        .map(|entry| RemoteFileHandle {
            name: entry.name.clone(),
            sha: entry.sha.clone(),
        })
}
