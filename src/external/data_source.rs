use async_trait::async_trait;

use crate::models::{FetchRequest, FetchResult};

/// Where view payloads come from.
///
/// Implementations never retry and never touch the rendering surface; every
/// failure is folded into [`FetchResult::Failure`].
#[async_trait]
pub trait DataSource: Send + Sync {
    async fn fetch(&self, request: &FetchRequest) -> FetchResult;
}
