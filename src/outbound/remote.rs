//! Reqwest-backed avatar store adapter.
//!
//! Delegates the store capability set to an upstream avatar API that speaks
//! the same `{data, error, message}` envelope. This adapter owns transport
//! details only: URL building, timeout and HTTP error mapping, and envelope
//! decoding.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::{Deserialize, Serialize};

use crate::domain::ports::AvatarStore;
use crate::domain::{AdUserId, AvatarRecord, AvatarSelection, AvatarType, Error, Gender};

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Avatar store that forwards every operation to an upstream avatar API.
pub struct RemoteAvatarStore {
    client: Client,
    base_url: Url,
}

impl RemoteAvatarStore {
    /// Build an adapter with the default request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url) -> Result<Self, reqwest::Error> {
        Self::with_timeout(base_url, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Build an adapter using a reqwest client with an explicit timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn with_timeout(base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, Error> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::upstream("avatar API base URL cannot be a base"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send_for_record(&self, request: reqwest::RequestBuilder) -> Result<AvatarRecord, Error> {
        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();
        let envelope: EnvelopeDto<AvatarRecord> =
            response.json().await.map_err(map_decode_error)?;
        if status.is_success() && !envelope.error {
            envelope
                .data
                .ok_or_else(|| Error::upstream("avatar API returned an empty success envelope"))
        } else {
            Err(map_failure(status, envelope.message))
        }
    }
}

#[async_trait]
impl AvatarStore for RemoteAvatarStore {
    async fn create(
        &self,
        user_id: AdUserId,
        selection: AvatarSelection,
    ) -> Result<AvatarRecord, Error> {
        let url = self.endpoint(&["avatar"])?;
        let body = CreateBodyDto {
            ad_user_id: user_id.as_str(),
            avatar: selection.avatar_type,
            avatar_url: selection.avatar_url.as_str(),
            gender: selection.gender,
        };
        self.send_for_record(self.client.post(url).json(&body)).await
    }

    async fn get(&self, user_id: &AdUserId) -> Result<Option<AvatarRecord>, Error> {
        let url = self.endpoint(&["avatar", user_id.as_str()])?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_transport_error)?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let envelope: EnvelopeDto<AvatarRecord> =
            response.json().await.map_err(map_decode_error)?;
        if status.is_success() && !envelope.error {
            match envelope.data {
                Some(record) => Ok(Some(record)),
                None => Err(Error::upstream(
                    "avatar API returned an empty success envelope",
                )),
            }
        } else {
            Err(map_failure(status, envelope.message))
        }
    }

    async fn update(
        &self,
        user_id: &AdUserId,
        selection: AvatarSelection,
    ) -> Result<AvatarRecord, Error> {
        let url = self.endpoint(&["avatar", user_id.as_str()])?;
        let body = UpdateBodyDto {
            avatar: selection.avatar_type,
            avatar_url: selection.avatar_url.as_str(),
            gender: selection.gender,
        };
        self.send_for_record(self.client.put(url).json(&body)).await
    }

    async fn delete(&self, user_id: &AdUserId) -> Result<bool, Error> {
        let url = self.endpoint(&["avatar", user_id.as_str()])?;
        let response = self
            .client
            .delete(url)
            .send()
            .await
            .map_err(map_transport_error)?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(false);
        }
        let envelope: EnvelopeDto<serde_json::Value> =
            response.json().await.map_err(map_decode_error)?;
        if status.is_success() && !envelope.error {
            Ok(true)
        } else {
            Err(map_failure(status, envelope.message))
        }
    }
}

/// Wire shape of the upstream API's uniform response envelope.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
struct EnvelopeDto<T> {
    #[serde(default)]
    data: Option<T>,
    error: bool,
    message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateBodyDto<'a> {
    ad_user_id: &'a str,
    avatar: AvatarType,
    avatar_url: &'a str,
    gender: Gender,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateBodyDto<'a> {
    avatar: AvatarType,
    avatar_url: &'a str,
    gender: Gender,
}

fn map_transport_error(err: reqwest::Error) -> Error {
    Error::upstream(format!("avatar API request failed: {err}"))
}

fn map_decode_error(err: reqwest::Error) -> Error {
    Error::upstream(format!("avatar API envelope decoding failed: {err}"))
}

fn non_empty(message: String, fallback: &str) -> String {
    if message.trim().is_empty() {
        fallback.to_owned()
    } else {
        message
    }
}

/// Map an upstream failure envelope back onto the domain error taxonomy.
///
/// The upstream API signals create collisions with 400, so the message is
/// inspected to distinguish them from plain validation failures.
fn map_failure(status: StatusCode, message: String) -> Error {
    match status {
        StatusCode::NOT_FOUND => Error::not_found(non_empty(message, "Avatar not found")),
        StatusCode::BAD_REQUEST => {
            if message.to_ascii_lowercase().contains("already exists") {
                Error::already_exists(message)
            } else {
                Error::invalid_request(non_empty(message, "Bad request"))
            }
        }
        _ => {
            let message = non_empty(message, "no message");
            Error::upstream(format!("avatar API responded with {status}: {message}"))
        }
    }
}
