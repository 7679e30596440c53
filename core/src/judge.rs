use async_trait::async_trait;
use stos_webclient::{Credential, ProblemId, SourceFile, StosClient};

use crate::poller::StatusSource;

/// Remote side of `push` and `status`: authentication and upload on top of status fetching.
#[async_trait]
pub trait Judge: StatusSource {
    async fn login(&self, cred: &Credential) -> stos_webclient::Result<()>;

    /// Returns the response page of an accepted upload.
    async fn submit(
        &self,
        problem_id: &ProblemId,
        files: &[SourceFile],
    ) -> stos_webclient::Result<String>;
}

#[async_trait]
impl Judge for StosClient {
    async fn login(&self, cred: &Credential) -> stos_webclient::Result<()> {
        StosClient::login(self, cred).await
    }

    async fn submit(
        &self,
        problem_id: &ProblemId,
        files: &[SourceFile],
    ) -> stos_webclient::Result<String> {
        StosClient::submit(self, problem_id, files).await
    }
}
