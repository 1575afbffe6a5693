use std::time::Instant;

use chrono::Utc;
use futures_util::StreamExt;
use md5::{Digest, Md5};
use reqwest::header::CONTENT_LENGTH;
use reqwest::{Request, Response, StatusCode};
use tracing::warn;

use crate::error::HttpError;
use crate::results::{HitResult, INTEGRITY_FAILURE_CODE};
use crate::targets::{Target, Targets};

use super::Attacker;

impl Attacker {
    /// Executes one target and records its outcome.
    ///
    /// Never fails: build, transport, status and integrity failures all end up
    /// in [`HitResult::error`].
    pub async fn hit(&self, target: &Target) -> HitResult {
        let result = self.execute(target).await;
        if result.is_alarming() {
            warn!(
                method = %target.method(),
                url = target.url(),
                code = result.code,
                "{}",
                result.error
            );
        }
        result
    }

    /// Executes the target at `index`, wrapping around the list.
    pub(super) async fn hit_nth(&self, targets: &Targets, index: u64) -> HitResult {
        match targets.round_robin(index) {
            Some(target) => self.hit(target).await,
            None => HitResult::failed(HttpError::TargetsEmpty.to_string()),
        }
    }

    async fn execute(&self, target: &Target) -> HitResult {
        let request = match target.build_request(&self.client) {
            Ok(request) => request,
            Err(err) => return HitResult::failed(err.to_string()),
        };

        let mut result = HitResult {
            timestamp: Some(Utc::now()),
            bytes_out: request_body_len(&request),
            ..HitResult::default()
        };
        let started = Instant::now();

        let response = match self.client.execute(request).await {
            Ok(response) => response,
            Err(err) => {
                result.latency = started.elapsed();
                result.error = err.to_string();
                return result;
            }
        };

        let status = response.status();
        result.code = status.as_u16();

        let mut hasher = target.checksum().map(|_| Md5::new());
        let drained = drain_body(response, hasher.as_mut()).await;
        result.latency = started.elapsed();
        match drained {
            Ok(bytes) => result.bytes_in = bytes,
            // A truncated body is a transport failure whatever the status said.
            Err((bytes, err)) => {
                result.bytes_in = bytes;
                result.code = 0;
                result.error = err.to_string();
                return result;
            }
        }

        if !status.is_success() {
            result.error = format!(
                "{} {}: {}",
                target.method(),
                target.url(),
                status_text(status)
            );
            return result;
        }

        if let (Some(expected), Some(hasher)) = (target.checksum(), hasher)
            && !expected.matches(hasher)
        {
            result.code = INTEGRITY_FAILURE_CODE;
            result.error = format!("{} {}: MD5 not matched", target.method(), target.url());
        }
        result
    }
}

fn request_body_len(request: &Request) -> u64 {
    if let Some(bytes) = request.body().and_then(reqwest::Body::as_bytes) {
        return u64::try_from(bytes.len()).unwrap_or(u64::MAX);
    }
    request
        .headers()
        .get(CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(0)
}

fn status_text(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {}", status.as_u16(), reason),
        None => status.as_u16().to_string(),
    }
}

/// Counts the body bytes, feeding them to `hasher` when one is given.
///
/// On a read failure the bytes seen so far are returned with the error.
async fn drain_body(
    response: Response,
    mut hasher: Option<&mut Md5>,
) -> Result<u64, (u64, reqwest::Error)> {
    let mut stream = response.bytes_stream();
    let mut total_bytes: u64 = 0;
    while let Some(chunk) = stream.next().await {
        let bytes = chunk.map_err(|err| (total_bytes, err))?;
        total_bytes = total_bytes.saturating_add(u64::try_from(bytes.len()).unwrap_or(u64::MAX));
        if let Some(hasher) = hasher.as_deref_mut() {
            hasher.update(&bytes);
        }
    }
    Ok(total_bytes)
}
