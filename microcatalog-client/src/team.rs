use crate::client::ApiClient;
use crate::response::{EntityResponse, QueryRequest};
use async_trait::async_trait;
use microcatalog_core::error::Result;
use microcatalog_core::team::Team;

const RESOURCE: &str = "api/teams";

/// Team lookup used to fill selectors.
#[async_trait]
pub trait TeamApi: Send + Sync {
    async fn query(&self, req: &QueryRequest) -> Result<EntityResponse<Vec<Team>>>;
}

#[derive(Debug, Clone)]
pub struct HttpTeamApi {
    client: ApiClient,
}

impl HttpTeamApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TeamApi for HttpTeamApi {
    async fn query(&self, req: &QueryRequest) -> Result<EntityResponse<Vec<Team>>> {
        let url = self.client.resource_url(RESOURCE);
        self.client
            .execute(self.client.http().get(url).query(&req.to_query_pairs()))
            .await
    }
}
