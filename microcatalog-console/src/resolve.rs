use microcatalog_client::MicroserviceApi;
use microcatalog_core::error::{CatalogError, Result};
use microcatalog_core::microservice::Microservice;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Console routes that carry a microservice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MicroserviceRoute {
    /// `microservice/new`
    New,
    /// `microservice/{id}/view`
    View(i64),
    /// `microservice/{id}/edit`
    Edit(i64),
}

impl MicroserviceRoute {
    pub const ROOT: &'static str = "microservice";

    pub fn parse(path: &str) -> Result<Self> {
        let segments: Vec<&str> = path.trim_matches('/').split('/').collect();
        let not_found = || CatalogError::NotFound(format!("route {path:?}"));
        match segments.as_slice() {
            [root, "new"] if *root == Self::ROOT => Ok(Self::New),
            [root, id, action] if *root == Self::ROOT => {
                let id: i64 = id.parse().map_err(|_| not_found())?;
                match *action {
                    "view" => Ok(Self::View(id)),
                    "edit" => Ok(Self::Edit(id)),
                    _ => Err(not_found()),
                }
            }
            _ => Err(not_found()),
        }
    }

    /// The edit route for an optional id: `Edit(id)` or `New`.
    pub fn for_edit(id: Option<i64>) -> Self {
        id.map_or(Self::New, Self::Edit)
    }

    pub fn id(&self) -> Option<i64> {
        match self {
            Self::New => None,
            Self::View(id) | Self::Edit(id) => Some(*id),
        }
    }
}

impl fmt::Display for MicroserviceRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::New => write!(f, "{}/new", Self::ROOT),
            Self::View(id) => write!(f, "{}/{id}/view", Self::ROOT),
            Self::Edit(id) => write!(f, "{}/{id}/edit", Self::ROOT),
        }
    }
}

/// Produces the entity a route needs before its controller starts.
#[derive(Clone)]
pub struct MicroserviceResolver {
    api: Arc<dyn MicroserviceApi>,
}

impl MicroserviceResolver {
    pub fn new(api: Arc<dyn MicroserviceApi>) -> Self {
        Self { api }
    }

    /// Fetch by id, or hand out a fresh empty entity when there is none.
    /// A lookup that comes back without a body is `NotFound`.
    pub async fn resolve(&self, id: Option<i64>) -> Result<Microservice> {
        let Some(id) = id else {
            debug!("Resolving new microservice");
            return Ok(Microservice::default());
        };
        debug!(id, "Resolving microservice");
        self.api
            .find(id)
            .await?
            .into_body()
            .ok_or_else(|| CatalogError::NotFound(format!("microservice {id}")))
    }

    pub async fn resolve_route(&self, route: MicroserviceRoute) -> Result<Microservice> {
        self.resolve(route.id()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use microcatalog_client::{EntityResponse, QueryRequest};
    use std::sync::Mutex;

    /// Answers `find` with a body only for id 5; records requested ids.
    #[derive(Default)]
    struct FindOnly {
        found: Mutex<Vec<i64>>,
    }

    #[async_trait]
    impl MicroserviceApi for FindOnly {
        async fn create(&self, _: Microservice) -> Result<EntityResponse<Microservice>> {
            unreachable!("resolver never creates")
        }
        async fn update(&self, _: Microservice) -> Result<EntityResponse<Microservice>> {
            unreachable!("resolver never updates")
        }
        async fn find(&self, id: i64) -> Result<EntityResponse<Microservice>> {
            self.found.lock().unwrap().push(id);
            match id {
                5 => Ok(EntityResponse::ok(Some(Microservice {
                    id: Some(5),
                    name: Some("auth-svc".into()),
                    ..Microservice::default()
                }))),
                6 => Ok(EntityResponse::ok(None)),
                _ => Err(CatalogError::Status { status: 500, message: "boom".into() }),
            }
        }
        async fn query(&self, _: &QueryRequest) -> Result<EntityResponse<Vec<Microservice>>> {
            unreachable!("resolver never lists")
        }
        async fn delete(&self, _: i64) -> Result<EntityResponse<()>> {
            unreachable!("resolver never deletes")
        }
    }

    #[test]
    fn routes_parse_and_print() {
        assert_eq!(MicroserviceRoute::parse("microservice/new").unwrap(), MicroserviceRoute::New);
        assert_eq!(
            MicroserviceRoute::parse("/microservice/12/edit/").unwrap(),
            MicroserviceRoute::Edit(12)
        );
        assert_eq!(MicroserviceRoute::parse("microservice/3/view").unwrap().id(), Some(3));
        assert_eq!(MicroserviceRoute::Edit(4).to_string(), "microservice/4/edit");
        assert_eq!(MicroserviceRoute::for_edit(None).to_string(), "microservice/new");
    }

    #[test]
    fn bad_routes_are_not_found() {
        for path in ["microservice", "team/new", "microservice/x/edit", "microservice/1/delete"] {
            let err = MicroserviceRoute::parse(path).unwrap_err();
            assert_eq!(err.status_code(), 404, "{path}");
        }
    }

    #[tokio::test]
    async fn no_id_resolves_empty_entity_without_lookup() {
        let api = Arc::new(FindOnly::default());
        let resolver = MicroserviceResolver::new(api.clone());

        let ms = resolver.resolve_route(MicroserviceRoute::New).await.unwrap();
        assert_eq!(ms, Microservice::default());
        assert!(api.found.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn id_resolves_through_find() {
        let api = Arc::new(FindOnly::default());
        let resolver = MicroserviceResolver::new(api.clone());

        let ms = resolver.resolve(Some(5)).await.unwrap();
        assert_eq!(ms.name.as_deref(), Some("auth-svc"));
        assert_eq!(*api.found.lock().unwrap(), vec![5]);
    }

    #[tokio::test]
    async fn missing_body_is_not_found() {
        let resolver = MicroserviceResolver::new(Arc::new(FindOnly::default()));
        let err = resolver.resolve(Some(6)).await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(_)));
    }

    #[tokio::test]
    async fn lookup_errors_propagate() {
        let resolver = MicroserviceResolver::new(Arc::new(FindOnly::default()));
        let err = resolver.resolve_route(MicroserviceRoute::View(9)).await.unwrap_err();
        assert_eq!(err.status_code(), 500);
    }
}
