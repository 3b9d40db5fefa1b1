//! Tags sub-client.

use crate::client::TradeJournalClient;
use crate::domain::tag::{CreateTagRequest, Tag, TagWithCount, UpdateTagRequest};
use crate::error::SdkError;
use crate::http::RequestOptions;
use crate::shared::validation::validate_required;

pub struct Tags<'a> {
    pub(crate) client: &'a TradeJournalClient,
}

impl<'a> Tags<'a> {
    pub async fn create(&self, request: &CreateTagRequest) -> Result<Tag, SdkError> {
        validate_required(Some(request.name.trim()), "Name")?;
        Ok(self
            .client
            .http
            .post("/tags", request, &RequestOptions::default())
            .await?)
    }

    /// All tags visible to the user, with usage counts.
    pub async fn list(&self) -> Result<Vec<TagWithCount>, SdkError> {
        Ok(self
            .client
            .http
            .get("/tags", &RequestOptions::default())
            .await?)
    }

    pub async fn get(&self, id: &str) -> Result<Tag, SdkError> {
        Ok(self
            .client
            .http
            .get(&format!("/tags/{}", id), &RequestOptions::default())
            .await?)
    }

    pub async fn update(&self, id: &str, request: &UpdateTagRequest) -> Result<Tag, SdkError> {
        Ok(self
            .client
            .http
            .put(&format!("/tags/{}", id), request, &RequestOptions::default())
            .await?)
    }

    pub async fn delete(&self, id: &str) -> Result<(), SdkError> {
        self.client
            .http
            .delete(&format!("/tags/{}", id), &RequestOptions::default())
            .await?;
        Ok(())
    }

    pub async fn add_to_trade(&self, trade_id: &str, tag_id: &str) -> Result<(), SdkError> {
        self.client
            .http
            .post_empty(
                &format!("/trades/{}/tags/{}", trade_id, tag_id),
                &serde_json::json!({}),
                &RequestOptions::default(),
            )
            .await?;
        Ok(())
    }

    pub async fn remove_from_trade(&self, trade_id: &str, tag_id: &str) -> Result<(), SdkError> {
        self.client
            .http
            .delete(
                &format!("/trades/{}/tags/{}", trade_id, tag_id),
                &RequestOptions::default(),
            )
            .await?;
        Ok(())
    }
}
