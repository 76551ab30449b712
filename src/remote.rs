use crate::errors::VoteError;
use crate::models::{StatsEnvelope, VoteChoice, VoteReceipt, VoteRequest};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Client for the external vote service. Both endpoints share one base URL:
/// `GET` reads the tally, `POST` records a vote.
#[derive(Debug, Clone)]
pub struct VoteApi {
    http: reqwest::Client,
    base_url: String,
}

impl VoteApi {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, VoteError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    pub async fn fetch_stats(&self) -> Result<StatsEnvelope, VoteError> {
        let response = self.http.get(&self.base_url).send().await?;
        decode(response).await
    }

    pub async fn submit_vote(&self, choice: VoteChoice) -> Result<VoteReceipt, VoteError> {
        let response = self
            .http
            .post(&self.base_url)
            .json(&VoteRequest { vote_type: choice })
            .send()
            .await?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, VoteError> {
    let bytes = response.error_for_status()?.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}
