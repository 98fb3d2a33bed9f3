use async_trait::async_trait;

use crate::error::Error;

/// An opaque web-search capability: free-text query in, free-text
/// result out. The result may legitimately be empty; transport and
/// HTTP failures surface as `Err`.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    fn name(&self) -> &str;

    async fn search(&self, query: &str) -> Result<String, Error>;
}
