use shared::models::Service;
use shared::{Page, ServiceQuery};

use crate::ClientResult;
use crate::http::HttpClient;

// ========== Service Catalogue API ==========

impl HttpClient {
    pub async fn get_service(&self, service_id: &str) -> ClientResult<Service> {
        self.get(&format!("services/{service_id}")).await
    }

    /// Search the catalogue. Sent as-is: callers decide when to query.
    pub async fn search_services(&self, query: &ServiceQuery) -> ClientResult<Page<Service>> {
        self.get_page("services", query).await
    }
}
