//! Client for the metadata extraction service.
//!
//! [`MetadataService`] is the seam between the session and the network;
//! [`HttpMetadataClient`] implements it over HTTP with `reqwest`.
//!
//! Endpoints used:
//!
//! | Operation | Request |
//! |-----------|---------|
//! | upload | `POST /api/upload` (multipart `file`) |
//! | fetch | `GET /api/metadata/{id}` |
//! | submit | `POST /api/metadata/{id}` with `{"metadata": {key: value}}` |
//! | presets | `GET /api/supported-fields?type={category}` |
//! | tool status | `GET /api/tools-status` |
//! | download | `GET /api/download/{id}` |
//! | delete | `DELETE /api/delete/{id}` |

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use indexmap::IndexMap;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::config::ServerConfig;
use crate::error::{MetaviewError, Result};
use crate::model::{FieldCategory, FieldEntry, MetadataDocument};

/// Characters escaped when a file id is used as a path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Result of a successful upload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UploadResponse {
    /// Identifier the service assigned to the stored file.
    pub file_id: String,
    /// Metadata extracted during upload.
    pub metadata: MetadataDocument,
}

/// Result of a successful field submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitOutcome {
    /// Confirmation message from the service.
    #[serde(default)]
    pub message: String,
}

/// Operations offered by the extraction service.
#[async_trait]
pub trait MetadataService: Send + Sync {
    /// Upload a local file and return its id with the extracted metadata.
    async fn upload(&self, path: &Path) -> Result<UploadResponse>;

    /// Fetch the current metadata for a stored file.
    async fn fetch_metadata(&self, file_id: &str) -> Result<MetadataDocument>;

    /// Write one field into a stored file.
    async fn submit_field(&self, file_id: &str, entry: &FieldEntry) -> Result<SubmitOutcome>;

    /// Preset field names for a category.
    async fn supported_fields(&self, category: FieldCategory) -> Result<Vec<String>>;

    /// Which extraction tools are installed on the service host.
    async fn tools_status(&self) -> Result<IndexMap<String, bool>>;

    /// Raw bytes of a stored file.
    async fn download(&self, file_id: &str) -> Result<Vec<u8>>;

    /// Delete a stored file, returning the service's confirmation message.
    async fn delete(&self, file_id: &str) -> Result<String>;
}

/// HTTP implementation of [`MetadataService`].
#[derive(Debug, Clone)]
pub struct HttpMetadataClient {
    client: Client,
    base_url: String,
}

impl HttpMetadataClient {
    /// Create a client for the service at `base_url`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| MetaviewError::ConfigError {
                message: format!("Failed to build HTTP client: {e}"),
            })?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(MetaviewError::InvalidConfig {
                message: "server url is empty".to_string(),
            });
        }

        Ok(Self { client, base_url })
    }

    /// Create a client from the `[server]` configuration section.
    pub fn from_config(config: &ServerConfig) -> Result<Self> {
        Self::new(config.url.clone(), config.timeout())
    }

    /// Base URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path)
    }

    fn file_endpoint(&self, action: &str, file_id: &str) -> String {
        self.endpoint(&format!(
            "{action}/{}",
            utf8_percent_encode(file_id, PATH_SEGMENT)
        ))
    }

    /// Read a JSON body, mapping service-reported failures to errors.
    async fn read_json(url: &str, response: Response) -> Result<Value> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| MetaviewError::http(url, e))?;
        let parsed = serde_json::from_str::<Value>(&body).ok();

        if let Some(message) = parsed.as_ref().and_then(rejection_message) {
            warn!(url, status = status.as_u16(), %message, "Service rejected request");
            return Err(MetaviewError::ServiceRejected { message });
        }

        if !status.is_success() {
            return Err(server_error(status, &body));
        }

        parsed.ok_or_else(|| {
            MetaviewError::invalid_document(format!("response from {url} is not valid JSON"))
        })
    }
}

#[async_trait]
impl MetadataService for HttpMetadataClient {
    async fn upload(&self, path: &Path) -> Result<UploadResponse> {
        if !path.exists() {
            return Err(MetaviewError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| MetaviewError::io(format!("Failed to read {}", path.display()), e))?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());

        let url = self.endpoint("upload");
        info!(%url, file = %file_name, size = bytes.len(), "Uploading file");

        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name);
        let form = reqwest::multipart::Form::new().part("file", part);
        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| MetaviewError::http(&url, e))?;

        let mut body = Self::read_json(&url, response).await?;
        let file_id = body
            .get("file_id")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| MetaviewError::invalid_document("upload response has no file_id"))?;
        let metadata = MetadataDocument::from_value(
            body.get_mut("metadata").map(Value::take).unwrap_or(Value::Null),
        )?;

        debug!(%file_id, tools = metadata.len(), "Upload complete");
        Ok(UploadResponse { file_id, metadata })
    }

    async fn fetch_metadata(&self, file_id: &str) -> Result<MetadataDocument> {
        let url = self.file_endpoint("metadata", file_id);
        debug!(%url, "Fetching metadata");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| MetaviewError::http(&url, e))?;

        MetadataDocument::from_value(Self::read_json(&url, response).await?)
    }

    async fn submit_field(&self, file_id: &str, entry: &FieldEntry) -> Result<SubmitOutcome> {
        let url = self.file_endpoint("metadata", file_id);
        info!(%url, key = %entry.key, "Submitting field");

        let mut fields = serde_json::Map::new();
        fields.insert(entry.key.clone(), Value::String(entry.value.clone()));
        let payload = json!({ "metadata": fields });

        let response = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| MetaviewError::http(&url, e))?;

        let body = Self::read_json(&url, response).await?;
        serde_json::from_value(body).map_err(|e| MetaviewError::SerializationError {
            context: "Failed to decode submit response".to_string(),
            source: e,
        })
    }

    async fn supported_fields(&self, category: FieldCategory) -> Result<Vec<String>> {
        let url = self.endpoint("supported-fields");
        debug!(%url, %category, "Fetching supported fields");

        let response = self
            .client
            .get(&url)
            .query(&[("type", category.as_str())])
            .send()
            .await
            .map_err(|e| MetaviewError::http(&url, e))?;

        #[derive(Deserialize)]
        struct Fields {
            #[serde(default)]
            fields: Vec<String>,
        }

        let body = Self::read_json(&url, response).await?;
        let parsed: Fields = serde_json::from_value(body)?;
        Ok(parsed.fields)
    }

    async fn tools_status(&self) -> Result<IndexMap<String, bool>> {
        let url = self.endpoint("tools-status");
        debug!(%url, "Fetching tool status");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| MetaviewError::http(&url, e))?;

        let body = Self::read_json(&url, response).await?;
        Ok(serde_json::from_value(body)?)
    }

    async fn download(&self, file_id: &str) -> Result<Vec<u8>> {
        let url = self.file_endpoint("download", file_id);
        info!(%url, "Downloading file");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| MetaviewError::http(&url, e))?;

        let status = response.status();
        if !status.is_success() {
            Self::read_json(&url, response).await?;
            return Err(server_error(status, ""));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| MetaviewError::http(&url, e))?;
        Ok(bytes.to_vec())
    }

    async fn delete(&self, file_id: &str) -> Result<String> {
        let url = self.file_endpoint("delete", file_id);
        info!(%url, "Deleting file");

        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(|e| MetaviewError::http(&url, e))?;

        let body = Self::read_json(&url, response).await?;
        Ok(body
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("File deleted")
            .to_string())
    }
}

/// Failure message carried in a response body, if any.
///
/// A body reports failure with `"success": false` or a string `error` member.
fn rejection_message(body: &Value) -> Option<String> {
    let error = body.get("error").and_then(Value::as_str);
    match body.get("success") {
        Some(Value::Bool(false)) => Some(error.unwrap_or("Request failed").to_string()),
        _ => error.map(str::to_string),
    }
}

fn server_error(status: reqwest::StatusCode, body: &str) -> MetaviewError {
    let message = if body.trim().is_empty() {
        status.canonical_reason().unwrap_or("no response body").to_string()
    } else {
        body.trim().to_string()
    };
    MetaviewError::Server {
        status: status.as_u16(),
        message,
    }
}
