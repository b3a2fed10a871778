// The seam between scoring and wherever draft lineups come from.

use crate::model::RealSportsDraft;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("Real Sports credentials are not configured")]
    NotConfigured,

    #[error("Real Sports returned HTTP {status}")]
    Status { status: u16 },

    #[error("request failed: {0}")]
    Transport(String),

    #[error("invalid response body: {0}")]
    Decode(String),
}

/// Anything that can look up a user's draft entry for a contest.
#[async_trait]
pub trait DraftSource: Send + Sync {
    async fn fetch_draft(
        &self,
        draft_id: u64,
        user_code: &str,
    ) -> Result<RealSportsDraft, FetchError>;
}
