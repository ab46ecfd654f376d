use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use wizard_core::{BasicInfo, Department, Details, Location};
use wizard_logging::{wizard_debug, wizard_trace};

use crate::{ApiError, ApiErrorKind};

/// Where the two record services live and how long to wait for them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    /// Serves departments and basic info.
    pub step1_base_url: String,
    /// Serves locations and details.
    pub step2_base_url: String,
    pub connect_timeout_ms: u64,
    pub request_timeout_ms: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            step1_base_url: "http://localhost:4001".to_string(),
            step2_base_url: "http://localhost:4002".to_string(),
            connect_timeout_ms: 5_000,
            request_timeout_ms: 15_000,
        }
    }
}

/// The remote boundary. Every call fails with [`ApiError`] on a non-success
/// status or transport problem.
#[async_trait::async_trait]
pub trait EmployeeApi: Send + Sync {
    async fn search_departments(&self, query: &str) -> Result<Vec<Department>, ApiError>;
    async fn search_locations(&self, query: &str) -> Result<Vec<Location>, ApiError>;
    async fn list_basic_info(&self) -> Result<Vec<BasicInfo>, ApiError>;
    async fn create_basic_info(&self, record: &BasicInfo) -> Result<BasicInfo, ApiError>;
    async fn list_details(&self) -> Result<Vec<Details>, ApiError>;
    async fn create_details(&self, record: &Details) -> Result<Details, ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestEmployeeApi {
    client: reqwest::Client,
    step1: Url,
    step2: Url,
}

impl ReqwestEmployeeApi {
    pub fn new(settings: &ApiSettings) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_millis(settings.connect_timeout_ms))
            .timeout(Duration::from_millis(settings.request_timeout_ms))
            .build()
            .map_err(|err| ApiError::new(ApiErrorKind::Network, err.to_string()))?;
        Ok(Self {
            client,
            step1: parse_base(&settings.step1_base_url)?,
            step2: parse_base(&settings.step2_base_url)?,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        wizard_trace!("GET {url}");
        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_reqwest_error)?;
        read_json(response).await
    }

    async fn post_json<B, T>(&self, url: Url, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let payload = serde_json::to_vec(body)
            .map_err(|err| ApiError::new(ApiErrorKind::Decode, err.to_string()))?;
        wizard_debug!("POST {url} ({} bytes)", payload.len());
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .body(payload)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        read_json(response).await
    }
}

#[async_trait::async_trait]
impl EmployeeApi for ReqwestEmployeeApi {
    async fn search_departments(&self, query: &str) -> Result<Vec<Department>, ApiError> {
        self.get_json(search_url(&self.step1, "departments", query)?)
            .await
    }

    async fn search_locations(&self, query: &str) -> Result<Vec<Location>, ApiError> {
        self.get_json(search_url(&self.step2, "locations", query)?)
            .await
    }

    async fn list_basic_info(&self) -> Result<Vec<BasicInfo>, ApiError> {
        self.get_json(endpoint(&self.step1, "basicInfo")?).await
    }

    async fn create_basic_info(&self, record: &BasicInfo) -> Result<BasicInfo, ApiError> {
        self.post_json(endpoint(&self.step1, "basicInfo")?, record)
            .await
    }

    async fn list_details(&self) -> Result<Vec<Details>, ApiError> {
        self.get_json(endpoint(&self.step2, "details")?).await
    }

    async fn create_details(&self, record: &Details) -> Result<Details, ApiError> {
        self.post_json(endpoint(&self.step2, "details")?, record)
            .await
    }
}

fn parse_base(raw: &str) -> Result<Url, ApiError> {
    // A trailing slash makes `join` append instead of replacing the last segment.
    let normalized = format!("{}/", raw.trim_end_matches('/'));
    Url::parse(&normalized).map_err(|err| ApiError::new(ApiErrorKind::InvalidUrl, err.to_string()))
}

fn endpoint(base: &Url, resource: &str) -> Result<Url, ApiError> {
    base.join(resource)
        .map_err(|err| ApiError::new(ApiErrorKind::InvalidUrl, err.to_string()))
}

fn search_url(base: &Url, resource: &str, query: &str) -> Result<Url, ApiError> {
    let mut url = endpoint(base, resource)?;
    url.query_pairs_mut().append_pair("name_like", query);
    Ok(url)
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::status(status.as_u16()));
    }
    let body = response.bytes().await.map_err(map_reqwest_error)?;
    serde_json::from_slice(&body).map_err(|err| ApiError::new(ApiErrorKind::Decode, err.to_string()))
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(ApiErrorKind::Timeout, err.to_string());
    }
    ApiError::new(ApiErrorKind::Network, err.to_string())
}
