use crate::client::ApiClient;
use crate::response::{EntityResponse, QueryRequest};
use async_trait::async_trait;
use microcatalog_core::error::Result;
use microcatalog_core::microservice::Microservice;
use tracing::debug;

const RESOURCE: &str = "api/microservices";

/// Persistence operations for microservice entries.
#[async_trait]
pub trait MicroserviceApi: Send + Sync {
    async fn create(&self, microservice: Microservice) -> Result<EntityResponse<Microservice>>;

    async fn update(&self, microservice: Microservice) -> Result<EntityResponse<Microservice>>;

    async fn find(&self, id: i64) -> Result<EntityResponse<Microservice>>;

    async fn query(&self, req: &QueryRequest) -> Result<EntityResponse<Vec<Microservice>>>;

    async fn delete(&self, id: i64) -> Result<EntityResponse<()>>;
}

/// `MicroserviceApi` over the backend's REST resource.
#[derive(Debug, Clone)]
pub struct HttpMicroserviceApi {
    client: ApiClient,
}

impl HttpMicroserviceApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl MicroserviceApi for HttpMicroserviceApi {
    async fn create(&self, microservice: Microservice) -> Result<EntityResponse<Microservice>> {
        debug!(name = ?microservice.name, "POST microservice");
        let url = self.client.resource_url(RESOURCE);
        self.client
            .execute(self.client.http().post(url).json(&microservice))
            .await
    }

    async fn update(&self, microservice: Microservice) -> Result<EntityResponse<Microservice>> {
        debug!(id = ?microservice.id, "PUT microservice");
        let url = self.client.resource_url(RESOURCE);
        self.client
            .execute(self.client.http().put(url).json(&microservice))
            .await
    }

    async fn find(&self, id: i64) -> Result<EntityResponse<Microservice>> {
        let url = self.client.resource_url(&format!("{RESOURCE}/{id}"));
        self.client.execute(self.client.http().get(url)).await
    }

    async fn query(&self, req: &QueryRequest) -> Result<EntityResponse<Vec<Microservice>>> {
        let url = self.client.resource_url(RESOURCE);
        self.client
            .execute(self.client.http().get(url).query(&req.to_query_pairs()))
            .await
    }

    async fn delete(&self, id: i64) -> Result<EntityResponse<()>> {
        debug!(id, "DELETE microservice");
        let url = self.client.resource_url(&format!("{RESOURCE}/{id}"));
        self.client.execute_empty(self.client.http().delete(url)).await
    }
}
