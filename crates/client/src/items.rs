//! Items API.

use async_trait::async_trait;
use mockall::automock;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

use randostore::items::{Item, ItemId, ItemUpdate, NewItem};

use crate::{config::ClientConfig, errors::ClientError};

#[automock]
#[async_trait]
pub trait ItemsClient: Send + Sync {
    /// Retrieves every catalog item.
    async fn list_items(&self) -> Result<Vec<Item>, ClientError>;

    /// Retrieve a single item.
    async fn get_item(&self, id: ItemId) -> Result<Item, ClientError>;

    /// Creates a new item; the server assigns its id.
    async fn create_item(&self, item: NewItem) -> Result<Item, ClientError>;

    /// Applies `update` to the item with the given id.
    async fn update_item(&self, id: ItemId, update: ItemUpdate) -> Result<Item, ClientError>;

    /// Deletes the item with the given id.
    async fn delete_item(&self, id: ItemId) -> Result<(), ClientError>;
}

/// `PUT` bodies repeat the id alongside the changed fields.
#[derive(Debug, Serialize)]
struct UpdateBody<'a> {
    id: ItemId,

    #[serde(flatten)]
    fields: &'a ItemUpdate,
}

/// HTTP client for the `/items` endpoints.
///
/// Each call is a single request/response cycle; there is no retry and no
/// caching.
#[derive(Debug, Clone)]
pub struct HttpItemsClient {
    config: ClientConfig,
    http: Client,
}

impl HttpItemsClient {
    /// Create a new client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let http = Client::builder().timeout(config.timeout).build()?;

        Ok(Self { config, http })
    }

    /// Returns the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.config.url(path);

        debug!(%method, %url, "sending catalog request");

        self.http.request(method, url)
    }

    fn transport_error(&self, error: reqwest::Error) -> ClientError {
        if error.is_timeout() {
            ClientError::Timeout(self.config.timeout)
        } else {
            ClientError::Http(error)
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ClientError> {
        let response = request
            .send()
            .await
            .map_err(|error| self.transport_error(error))?;

        let status = response.status();

        debug!(status = status.as_u16(), "received catalog response");

        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(read_error) => {
                    debug!("failed to read error response body: {read_error}");

                    String::new()
                }
            };

            warn!(status = status.as_u16(), %body, "catalog request failed");

            return Err(ClientError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
                body,
            });
        }

        Ok(response)
    }

    async fn json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let response = self.send(request).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|error| self.transport_error(error))?;

        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl ItemsClient for HttpItemsClient {
    async fn list_items(&self) -> Result<Vec<Item>, ClientError> {
        self.json(self.request(Method::GET, "/items")).await
    }

    async fn get_item(&self, id: ItemId) -> Result<Item, ClientError> {
        self.json(self.request(Method::GET, &format!("/items/{id}")))
            .await
    }

    async fn create_item(&self, item: NewItem) -> Result<Item, ClientError> {
        self.json(self.request(Method::POST, "/items").json(&item))
            .await
    }

    async fn update_item(&self, id: ItemId, update: ItemUpdate) -> Result<Item, ClientError> {
        let body = UpdateBody {
            id,
            fields: &update,
        };

        self.json(
            self.request(Method::PUT, &format!("/items/{id}"))
                .json(&body),
        )
        .await
    }

    async fn delete_item(&self, id: ItemId) -> Result<(), ClientError> {
        let response = self
            .send(self.request(Method::DELETE, &format!("/items/{id}")))
            .await?;

        if response.status() != StatusCode::NO_CONTENT {
            debug!(
                status = response.status().as_u16(),
                "delete answered with a body; ignoring it"
            );
        }

        Ok(())
    }
}
