//! Content API seam and its wire types.
//!
//! [`ContentApi`] is the two calls the publisher needs from the remote
//! repository: list the root directory and write one file. The production
//! implementation is [`GithubContentApi`](super::github::GithubContentApi);
//! tests use [`tests::MockContentApi`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Transport-level failure. These propagate out of a publish; a remote
/// *rejection* of the write is not one of these (see
/// [`FailureReason`](super::FailureReason)).
#[derive(Error, Debug)]
pub enum PublishError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("content API returned {status}: {message}")]
    Api { status: u16, message: String },
    #[error("invalid header value for {0}")]
    InvalidHeader(&'static str),
}

/// One item of a directory listing. Only the fields the publisher reads.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContentEntry {
    pub name: String,
    pub sha: String,
}

/// Who the commit is attributed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Committer {
    pub name: String,
    pub email: String,
}

/// Body of the update-file request.
///
/// `sha` is the version token of the file being replaced; the remote refuses
/// the write when it no longer matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitRequest {
    pub message: String,
    pub committer: Committer,
    pub content: String,
    pub sha: String,
}

/// Response to a write, whatever its status.
#[derive(Debug, Clone, PartialEq)]
pub struct CommitResponse {
    pub status: u16,
    /// Decoded JSON body, `Null` when empty or not JSON.
    pub body: serde_json::Value,
}

impl CommitResponse {
    /// The updated-content object, present only when the write took effect.
    pub fn content(&self) -> Option<&serde_json::Value> {
        self.body.get("content").filter(|v| !v.is_null())
    }

    pub fn commit_sha(&self) -> Option<&str> {
        self.body
            .get("commit")
            .and_then(|c| c.get("sha"))
            .and_then(|s| s.as_str())
    }

    /// Error message the API attached, if any.
    pub fn message(&self) -> Option<&str> {
        self.body.get("message").and_then(|m| m.as_str())
    }
}

/// Remote repository contents.
pub trait ContentApi {
    /// List the repository's root directory.
    fn list_root(&self) -> Result<Vec<ContentEntry>, PublishError>;

    /// Replace the file at `path`. Non-success statuses come back as a
    /// [`CommitResponse`], not an error.
    fn put_contents(
        &self,
        path: &str,
        request: &CommitRequest,
    ) -> Result<CommitResponse, PublishError>;
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq)]
    pub enum RecordedCall {
        ListRoot,
        PutContents { path: String, request: CommitRequest },
    }

    /// Mock content API with canned responses. Records every call.
    pub struct MockContentApi {
        pub listing: Vec<ContentEntry>,
        pub put_response: CommitResponse,
        pub list_fails: bool,
        pub calls: Mutex<Vec<RecordedCall>>,
    }

    impl MockContentApi {
        pub fn with_listing(entries: &[(&str, &str)]) -> Self {
            Self {
                listing: entries
                    .iter()
                    .map(|(name, sha)| ContentEntry {
                        name: name.to_string(),
                        sha: sha.to_string(),
                    })
                    .collect(),
                put_response: accepted_response("newsha"),
                list_fails: false,
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn failing_listing() -> Self {
            Self {
                list_fails: true,
                ..Self::with_listing(&[])
            }
        }

        pub fn respond_with(mut self, response: CommitResponse) -> Self {
            self.put_response = response;
            self
        }

        pub fn get_calls(&self) -> Vec<RecordedCall> {
            self.calls.lock().unwrap().clone()
        }

        pub fn put_count(&self) -> usize {
            self.get_calls()
                .iter()
                .filter(|c| matches!(c, RecordedCall::PutContents { .. }))
                .count()
        }
    }

    impl ContentApi for MockContentApi {
        fn list_root(&self) -> Result<Vec<ContentEntry>, PublishError> {
            self.calls.lock().unwrap().push(RecordedCall::ListRoot);
            if self.list_fails {
                return Err(PublishError::Api {
                    status: 503,
                    message: "unavailable".to_string(),
                });
            }
            Ok(self.listing.clone())
        }

        fn put_contents(
            &self,
            path: &str,
            request: &CommitRequest,
        ) -> Result<CommitResponse, PublishError> {
            self.calls.lock().unwrap().push(RecordedCall::PutContents {
                path: path.to_string(),
                request: request.clone(),
            });
            Ok(self.put_response.clone())
        }
    }

    /// A 200 response carrying updated content and a commit.
    pub fn accepted_response(commit_sha: &str) -> CommitResponse {
        CommitResponse {
            status: 200,
            body: serde_json::json!({
                "content": { "name": "list.json", "sha": "blobsha" },
                "commit": { "sha": commit_sha }
            }),
        }
    }

    /// A 409 stale-token response.
    pub fn conflict_response() -> CommitResponse {
        CommitResponse {
            status: 409,
            body: serde_json::json!({ "message": "list.json does not match abc123" }),
        }
    }

    #[test]
    fn content_present_only_when_non_null() {
        assert!(accepted_response("x").content().is_some());
        assert!(conflict_response().content().is_none());

        let null_content = CommitResponse {
            status: 200,
            body: serde_json::json!({ "content": null }),
        };
        assert!(null_content.content().is_none());
    }

    #[test]
    fn commit_sha_and_message_accessors() {
        assert_eq!(accepted_response("c0ffee").commit_sha(), Some("c0ffee"));
        assert_eq!(
            conflict_response().message(),
            Some("list.json does not match abc123")
        );
    }

    #[test]
    fn commit_request_serializes_expected_shape() {
        let req = CommitRequest {
            message: "server generation".to_string(),
            committer: Committer {
                name: "bot".to_string(),
                email: "bot@example.com".to_string(),
            },
            content: "W10=".to_string(),
            sha: "abc123".to_string(),
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "message": "server generation",
                "committer": { "name": "bot", "email": "bot@example.com" },
                "content": "W10=",
                "sha": "abc123"
            })
        );
    }

    #[test]
    fn content_entry_ignores_extra_fields() {
        let json = r#"[{"name":"list.json","path":"list.json","sha":"abc123","size":10,"type":"file"}]"#;
        let entries: Vec<ContentEntry> = serde_json::from_str(json).unwrap();
        assert_eq!(entries[0].name, "list.json");
        assert_eq!(entries[0].sha, "abc123");
    }
}
