use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::debug;

use config::FirebaseConfig;
use services::auth::UserId;
use services::conversations::{Conversation, ConversationId, ConversationStore, NewConversation};

const DEFAULT_FIRESTORE_BASE_URL: &str = "https://firestore.googleapis.com/v1";
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Conversation store over the Firestore REST API.
///
/// Documents are created with `createDocument`; the server assigns both the
/// document id and the write timestamp, which comes back as `updateTime`.
pub struct FirestoreConversationStore {
    client: reqwest::Client,
    base_url: String,
    project_id: String,
    collection: String,
}

impl FirestoreConversationStore {
    pub fn new(config: &FirebaseConfig, collection: &str) -> Result<Self> {
        let client =
            crate::http_client(REQUEST_TIMEOUT_SECS).context("Failed to build HTTP client")?;

        let base_url = config
            .firestore_base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_FIRESTORE_BASE_URL.to_string());

        tracing::info!(
            base_url = %base_url,
            project_id = %config.project_id,
            collection = %collection,
            "Firestore gateway initialized"
        );

        Ok(Self {
            client,
            base_url,
            project_id: config.project_id.clone(),
            collection: collection.to_string(),
        })
    }

    fn documents_url(&self) -> String {
        format!(
            "{}/projects/{}/databases/(default)/documents",
            self.base_url, self.project_id
        )
    }

    fn draft_fields(draft: &NewConversation) -> serde_json::Value {
        let members: Vec<serde_json::Value> = draft
            .members
            .iter()
            .map(|m| serde_json::json!({ "stringValue": m.0 }))
            .collect();
        serde_json::json!({
            "members": { "arrayValue": { "values": members } },
            "lastMessage": { "stringValue": draft.last_message },
            "lastSender": { "stringValue": draft.last_sender.0 },
        })
    }

    // Turns a Firestore document resource into the domain model
    fn document_to_conversation(doc: &serde_json::Value) -> Result<Conversation> {
        let name = doc["name"]
            .as_str()
            .context("Document is missing its resource name")?;
        let id = name
            .rsplit('/')
            .next()
            .context("Malformed document resource name")?
            .to_string();

        let fields = &doc["fields"];
        let member_values = fields["members"]["arrayValue"]["values"]
            .as_array()
            .context("Document is missing members")?;
        let members: Vec<UserId> = member_values
            .iter()
            .filter_map(|v| v["stringValue"].as_str())
            .map(UserId::from)
            .collect();
        let members: [UserId; 2] = match members.try_into() {
            Ok(members) => members,
            Err(got) => bail!(
                "Conversation {id} has {} members, expected exactly 2",
                got.len()
            ),
        };

        let last_message = fields["lastMessage"]["stringValue"]
            .as_str()
            .unwrap_or_default()
            .to_string();
        let last_sender = fields["lastSender"]["stringValue"]
            .as_str()
            .map(UserId::from)
            .context("Document is missing lastSender")?;

        let update_time = doc["updateTime"]
            .as_str()
            .context("Document is missing updateTime")?;
        let updated_at: DateTime<Utc> = DateTime::parse_from_rfc3339(update_time)
            .context("Invalid updateTime")?
            .with_timezone(&Utc);

        Ok(Conversation {
            id: ConversationId(id),
            members,
            last_message,
            last_sender,
            updated_at,
        })
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unable to read error body".to_string());
        bail!("Firestore request failed with {status}: {body}")
    }
}

#[async_trait]
impl ConversationStore for FirestoreConversationStore {
    async fn create(&self, draft: NewConversation) -> Result<Conversation> {
        let url = format!("{}/{}", self.documents_url(), self.collection);
        let body = serde_json::json!({ "fields": Self::draft_fields(&draft) });

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .context("Failed to reach Firestore")?;
        let response = Self::check(response).await?;

        let doc: serde_json::Value = response
            .json()
            .await
            .context("Malformed createDocument response")?;
        let conversation = Self::document_to_conversation(&doc)?;

        debug!(
            "Created conversation {} for members {} and {}",
            conversation.id, conversation.members[0], conversation.members[1]
        );
        Ok(conversation)
    }

    async fn get(&self, id: &ConversationId) -> Result<Option<Conversation>> {
        let url = format!("{}/{}/{}", self.documents_url(), self.collection, id);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to reach Firestore")?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = Self::check(response).await?;

        let doc: serde_json::Value = response.json().await.context("Malformed document")?;
        Ok(Some(Self::document_to_conversation(&doc)?))
    }

    async fn list_for_member(&self, member: &UserId) -> Result<Vec<Conversation>> {
        let url = format!("{}:runQuery", self.documents_url());
        let body = serde_json::json!({
            "structuredQuery": {
                "from": [{ "collectionId": self.collection }],
                "where": {
                    "fieldFilter": {
                        "field": { "fieldPath": "members" },
                        "op": "ARRAY_CONTAINS",
                        "value": { "stringValue": member.0 },
                    }
                },
            }
        });

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .context("Failed to reach Firestore")?;
        let response = Self::check(response).await?;

        let results: Vec<serde_json::Value> =
            response.json().await.context("Malformed query response")?;

        results
            .iter()
            .filter_map(|entry| entry.get("document"))
            .map(Self::document_to_conversation)
            .collect()
    }
}
