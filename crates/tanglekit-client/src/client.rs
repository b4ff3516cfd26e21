//! The node HTTP client.

use bytes::Bytes;
use serde::Deserialize;
use tracing::debug;

use tanglekit_core::{Message, MessageId, Mode, UtxoInput, WireFormat};

use crate::dto::{MessageDto, OutputDto};
use crate::error::ClientError;

/// Configuration for a [`NodeClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the node, without a trailing slash.
    pub base_url: String,
    /// Request timeout.
    pub timeout: std::time::Duration,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: std::time::Duration::from_secs(30),
        }
    }
}

/// Every successful node response wraps its payload in a data envelope.
#[derive(Debug, Deserialize)]
struct DataEnvelope<T> {
    data: T,
}

/// The error envelope of an unsuccessful node response.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// General information about a node.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfoResponse {
    pub name: String,
    pub version: String,
    pub is_healthy: bool,
    pub network_id: String,
    pub min_pow_score: f64,
    pub latest_milestone_index: u32,
    pub confirmed_milestone_index: u32,
    pub pruning_index: u32,
    #[serde(default)]
    pub features: Vec<String>,
}

/// Tips to attach a new message to.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TipsResponse {
    pub tip_message_ids: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubmitResponse {
    message_id: String,
}

/// Metadata the node tracks for a message.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageMetadataResponse {
    pub message_id: String,
    pub parent_message_ids: Vec<String>,
    pub is_solid: bool,
    #[serde(default)]
    pub referenced_by_milestone_index: Option<u32>,
    #[serde(default)]
    pub ledger_inclusion_state: Option<String>,
    #[serde(default)]
    pub should_promote: Option<bool>,
    #[serde(default)]
    pub should_reattach: Option<bool>,
}

/// Messages referencing a given message.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildrenResponse {
    pub message_id: String,
    pub max_results: u32,
    pub count: u32,
    pub children_message_ids: Vec<String>,
}

/// Message IDs filed under an indexation index.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagesByIndexResponse {
    pub index: String,
    pub max_results: u32,
    pub count: u32,
    pub message_ids: Vec<String>,
}

/// Metadata of a confirmed milestone.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MilestoneResponse {
    pub index: u32,
    pub message_id: String,
    pub timestamp: u64,
}

/// An output and where it lives in the ledger.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputResponse {
    pub message_id: String,
    pub transaction_id: String,
    pub output_index: u16,
    pub is_spent: bool,
    pub output: OutputDto,
}

/// The balance of an address.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceResponse {
    pub address_type: u8,
    pub address: String,
    pub balance: u64,
    #[serde(default)]
    pub dust_allowed: bool,
}

/// An async client for a node's HTTP API.
#[derive(Debug, Clone)]
pub struct NodeClient {
    config: ClientConfig,
    http: reqwest::Client,
}

impl NodeClient {
    /// Create a client for the node at the given base URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::with_config(ClientConfig::new(base_url))
    }

    /// Create a client with explicit configuration.
    pub fn with_config(config: ClientConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, http })
    }

    fn url(&self, route: &str) -> String {
        format!("{}/api/v1{}", self.config.base_url, route)
    }

    async fn check(&self, response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = match response.json::<ErrorEnvelope>().await {
            Ok(envelope) => envelope.error.message,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string(),
        };
        Err(ClientError::Node {
            status: status.as_u16(),
            message,
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, route: &str) -> Result<T, ClientError> {
        let url = self.url(route);
        debug!(%url, "node request");
        let response = self.http.get(&url).send().await?;
        let envelope: DataEnvelope<T> = self.check(response).await?.json().await?;
        Ok(envelope.data)
    }

    /// Whether the node considers itself healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let url = format!("{}/health", self.config.base_url);
        debug!(%url, "node request");
        let response = self.http.get(&url).send().await?;
        Ok(response.status().is_success())
    }

    /// General information about the node.
    pub async fn info(&self) -> Result<InfoResponse, ClientError> {
        self.get_json("/info").await
    }

    /// Tips to use as parents for a new message.
    pub async fn tips(&self) -> Result<Vec<MessageId>, ClientError> {
        let tips: TipsResponse = self.get_json("/tips").await?;
        tips.tip_message_ids
            .iter()
            .map(|id| MessageId::from_hex(id).map_err(Into::into))
            .collect()
    }

    /// Submit a message in its JSON form. Returns the message ID assigned by
    /// the node.
    pub async fn submit_message(&self, message: &Message) -> Result<MessageId, ClientError> {
        let url = self.url("/messages");
        debug!(%url, "submitting message");
        let dto = MessageDto::from(message);
        let response = self.http.post(&url).json(&dto).send().await?;
        let envelope: DataEnvelope<SubmitResponse> = self.check(response).await?.json().await?;
        Ok(MessageId::from_hex(&envelope.data.message_id)?)
    }

    /// Submit a message in its binary form.
    pub async fn submit_message_raw(&self, message: &Message) -> Result<MessageId, ClientError> {
        let url = self.url("/messages");
        debug!(%url, "submitting raw message");
        let bytes = message.to_bytes(Mode::Validate)?;
        let response = self
            .http
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .body(bytes)
            .send()
            .await?;
        let envelope: DataEnvelope<SubmitResponse> = self.check(response).await?.json().await?;
        Ok(MessageId::from_hex(&envelope.data.message_id)?)
    }

    /// Fetch a message in its JSON form and rebuild the wire entity.
    pub async fn message(&self, id: &MessageId) -> Result<Message, ClientError> {
        let dto: MessageDto = self.get_json(&format!("/messages/{}", id.to_hex())).await?;
        Message::try_from(&dto)
    }

    /// Fetch a message's raw wire bytes.
    pub async fn message_raw(&self, id: &MessageId) -> Result<Bytes, ClientError> {
        let url = self.url(&format!("/messages/{}/raw", id.to_hex()));
        debug!(%url, "node request");
        let response = self.http.get(&url).send().await?;
        Ok(self.check(response).await?.bytes().await?)
    }

    /// Fetch and fully validate a message from its raw wire bytes.
    pub async fn message_validated(&self, id: &MessageId) -> Result<Message, ClientError> {
        let bytes = self.message_raw(id).await?;
        Ok(Message::from_bytes(&bytes, Mode::Validate)?)
    }

    /// Metadata the node tracks for a message.
    pub async fn message_metadata(
        &self,
        id: &MessageId,
    ) -> Result<MessageMetadataResponse, ClientError> {
        self.get_json(&format!("/messages/{}/metadata", id.to_hex()))
            .await
    }

    /// The messages referencing the given one as a parent.
    pub async fn message_children(&self, id: &MessageId) -> Result<ChildrenResponse, ClientError> {
        self.get_json(&format!("/messages/{}/children", id.to_hex()))
            .await
    }

    /// Message IDs filed under the given indexation index.
    pub async fn messages_by_index(
        &self,
        index: &[u8],
    ) -> Result<MessagesByIndexResponse, ClientError> {
        self.get_json(&format!("/messages?index={}", hex::encode(index)))
            .await
    }

    /// Metadata of the milestone at the given index.
    pub async fn milestone(&self, index: u32) -> Result<MilestoneResponse, ClientError> {
        self.get_json(&format!("/milestones/{index}")).await
    }

    /// The output referenced by the given UTXO input.
    ///
    /// The output ID on the wire is the transaction ID followed by the
    /// little-endian index, all hex-encoded.
    pub async fn output(&self, input: &UtxoInput) -> Result<OutputResponse, ClientError> {
        self.get_json(&format!(
            "/outputs/{}{}",
            input.transaction_id.to_hex(),
            hex::encode(input.output_index.to_le_bytes())
        ))
        .await
    }

    /// The balance of a bech32-encoded address.
    pub async fn balance(&self, bech32_address: &str) -> Result<BalanceResponse, ClientError> {
        self.get_json(&format!("/addresses/{bech32_address}")).await
    }
}
