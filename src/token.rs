//! # Token Manager
//!
//! Issues service tokens and reads them back.
//!
//! The lookup response is a loosely typed map. Each known field is decoded on
//! its own and a field of the wrong shape is reported by name. A field that is
//! present but `null` is treated as absent.

use crate::api::{TokenCreateRequest, VaultApi};
use crate::client::VaultClient;
use crate::duration::format_duration;
use crate::error::{Result, VaultError};
use crate::observability::metrics;
use crate::types::UserToken;
use crate::validation::validate_token;
use chrono::TimeDelta;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::{debug, info, info_span, Instrument};

impl<A: VaultApi> VaultClient<A> {
    /// Issue a token described by `token` and return the client token
    ///
    /// # Errors
    /// Validation failures before any remote call, or the creation failure
    pub async fn create_token(&self, token: &UserToken) -> Result<String> {
        validate_token(token)?;

        let request = TokenCreateRequest {
            id: token.id.clone(),
            policies: token.policies.clone(),
            meta: token.metadata.clone(),
            ttl: format_duration(token.ttl),
            display_name: token.display_name.clone(),
            num_uses: token.max_uses,
        };

        let span = info_span!("token.create", token.display_name = %token.display_name);
        async move {
            let issued = self.api().create_token(&request).await?;
            metrics::increment_resources_created("token");
            info!("Issued token {}", token.display_name);
            Ok(issued)
        }
        .instrument(span)
        .await
    }

    /// Look up `token` and decode what the service reports about it
    ///
    /// # Errors
    /// Transport failures, or `Decode` naming the first field of the wrong shape
    pub async fn lookup_token(&self, token: &str) -> Result<UserToken> {
        let data = self.api().lookup_token(token).await?;
        debug!("Token lookup returned {} fields", data.len());
        decode_lookup(&data)
    }
}

fn field<'a>(data: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    data.get(name).filter(|v| !v.is_null())
}

fn wrong_type(field: &'static str, expected: &str, found: &Value) -> VaultError {
    VaultError::Decode {
        field,
        reason: format!("expected {expected}, found {found}"),
    }
}

fn decode_string(data: &Map<String, Value>, name: &'static str) -> Result<String> {
    match field(data, name) {
        None => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(wrong_type(name, "a string", other)),
    }
}

fn decode_ttl(data: &Map<String, Value>) -> Result<TimeDelta> {
    let Some(value) = field(data, "ttl") else {
        return Ok(TimeDelta::zero());
    };
    let out_of_range = || VaultError::Decode {
        field: "ttl",
        reason: format!("{value} seconds is out of range"),
    };

    if let Some(secs) = value.as_i64() {
        return TimeDelta::try_seconds(secs).ok_or_else(out_of_range);
    }
    match value.as_f64() {
        Some(secs) if secs.is_finite() => {
            #[allow(
                clippy::cast_possible_truncation,
                reason = "fractional ttl is rounded to whole milliseconds"
            )]
            let millis = (secs * 1000.0).round() as i64;
            TimeDelta::try_milliseconds(millis).ok_or_else(out_of_range)
        }
        _ => Err(wrong_type("ttl", "a number of seconds", value)),
    }
}

fn decode_policies(data: &Map<String, Value>) -> Result<Vec<String>> {
    match field(data, "policies") {
        None => Ok(Vec::new()),
        Some(Value::Array(items)) => Ok(items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect()),
        Some(other) => Err(wrong_type("policies", "a list", other)),
    }
}

fn decode_meta(data: &Map<String, Value>) -> Result<BTreeMap<String, String>> {
    match field(data, "meta") {
        None => Ok(BTreeMap::new()),
        Some(Value::Object(entries)) => entries
            .iter()
            .map(|(k, v)| match v {
                Value::String(s) => Ok((k.clone(), s.clone())),
                other => Err(wrong_type("meta", "string values", other)),
            })
            .collect(),
        Some(other) => Err(wrong_type("meta", "a map", other)),
    }
}

/// Decode a token lookup response
pub(crate) fn decode_lookup(data: &Map<String, Value>) -> Result<UserToken> {
    Ok(UserToken {
        id: decode_string(data, "id")?,
        display_name: decode_string(data, "display_name")?,
        ttl: decode_ttl(data)?,
        policies: decode_policies(data)?,
        metadata: decode_meta(data)?,
        ..UserToken::default()
    })
}
