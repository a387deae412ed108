use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tailboard_core::{
    CreateError, CreateKind, CreateResult, FetchError, FetchResult, ResourceFetcher, ResourceKind,
};
use tailboard_shared::{
    Aircraft, ApiErrorBody, AssignmentsBundle, CreateAck, Crew, Flight, NewAircraft, NewCrew,
    NewFlight, Statistics,
};
use tracing::{debug, warn};

use crate::app_config::ApiConfig;

/// [`ResourceFetcher`] over the backend's JSON HTTP API.
#[derive(Clone)]
pub struct HttpResourceFetcher {
    base_url: String,
    client: Client,
}

impl HttpResourceFetcher {
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            base_url: base_url.into(),
            client: builder.build()?,
        })
    }

    pub fn from_config(api: &ApiConfig) -> Result<Self, reqwest::Error> {
        Self::new(api.base_url.clone(), api.request_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let suffix = path.trim_start_matches('/');
        format!("{base}/{suffix}")
    }

    /// `{base}/{path}/{key}` with the key percent-encoded as one path segment.
    fn detail_url(&self, resource: ResourceKind, key: &str) -> FetchResult<Url> {
        let mut url = Url::parse(&self.endpoint(resource.path())).map_err(|e| FetchError::Transport {
            resource,
            message: format!("invalid base url: {e}"),
        })?;
        url.path_segments_mut()
            .map_err(|_| FetchError::Transport {
                resource,
                message: format!("base url cannot carry a path: {}", self.base_url),
            })?
            .push(key);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        resource: ResourceKind,
        url: Url,
        key: Option<&str>,
    ) -> FetchResult<T> {
        debug!("GET {}", url);
        let response = self.client.get(url).send().await.map_err(|e| FetchError::Transport {
            resource,
            message: e.to_string(),
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| FetchError::Transport {
            resource,
            message: format!("response read failed: {e}"),
        })?;

        // A detail screen treats any failed lookup as a missing entity.
        if !status.is_success() {
            let message = server_message(&body);
            return Err(match key {
                Some(key) => FetchError::NotFound {
                    resource,
                    key: key.to_string(),
                    message,
                },
                _ => FetchError::Http {
                    resource,
                    status: status.as_u16(),
                    message,
                },
            });
        }

        serde_json::from_str(&body).map_err(|e| FetchError::Decode {
            resource,
            message: e.to_string(),
        })
    }

    async fn get_list<T: DeserializeOwned>(&self, resource: ResourceKind) -> FetchResult<T> {
        let url = Url::parse(&self.endpoint(resource.path())).map_err(|e| FetchError::Transport {
            resource,
            message: format!("invalid base url: {e}"),
        })?;
        self.get_json(resource, url, None).await
    }

    async fn get_detail<T: DeserializeOwned>(&self, resource: ResourceKind, key: &str) -> FetchResult<T> {
        let url = self.detail_url(resource, key)?;
        self.get_json(resource, url, Some(key)).await
    }

    async fn post_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        kind: CreateKind,
        body: &B,
    ) -> CreateResult<T> {
        let url = self.endpoint(kind.path());
        debug!("POST {}", url);
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| CreateError::Transport {
                kind,
                message: e.to_string(),
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| CreateError::Transport {
            kind,
            message: format!("response read failed: {e}"),
        })?;

        if !status.is_success() {
            let message = server_message(&text).unwrap_or_else(|| kind.failed_message().to_string());
            warn!("{} rejected with {}: {}", kind, status, message);
            return Err(CreateError::Rejected {
                kind,
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&text).map_err(|e| CreateError::Decode {
            kind,
            message: e.to_string(),
        })
    }
}

/// The `error` field of an error body, when present and not blank.
fn server_message(body: &str) -> Option<String> {
    serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .map(|b| b.error)
        .filter(|msg| !msg.trim().is_empty())
}

#[async_trait]
impl ResourceFetcher for HttpResourceFetcher {
    async fn fetch_aircraft(&self) -> FetchResult<Vec<Aircraft>> {
        self.get_list(ResourceKind::Aircraft).await
    }

    async fn fetch_flights(&self) -> FetchResult<Vec<Flight>> {
        self.get_list(ResourceKind::Flights).await
    }

    async fn fetch_crews(&self) -> FetchResult<Vec<Crew>> {
        self.get_list(ResourceKind::Crews).await
    }

    async fn fetch_assignments(&self) -> FetchResult<AssignmentsBundle> {
        self.get_list(ResourceKind::AssignmentsBundle).await
    }

    async fn fetch_aircraft_detail(&self, tail_number: &str) -> FetchResult<Aircraft> {
        self.get_detail(ResourceKind::Aircraft, tail_number).await
    }

    async fn fetch_flight_detail(&self, flight_id: &str) -> FetchResult<Flight> {
        self.get_detail(ResourceKind::Flights, flight_id).await
    }

    async fn fetch_statistics(&self) -> FetchResult<Statistics> {
        self.get_list(ResourceKind::Statistics).await
    }

    async fn create_aircraft(&self, aircraft: &NewAircraft) -> CreateResult<CreateAck> {
        self.post_json(CreateKind::Aircraft, aircraft).await
    }

    async fn create_flight(&self, flight: &NewFlight) -> CreateResult<AssignmentsBundle> {
        self.post_json(CreateKind::Flight, flight).await
    }

    async fn create_crew(&self, crew: &NewCrew) -> CreateResult<CreateAck> {
        self.post_json(CreateKind::Crew, crew).await
    }
}
