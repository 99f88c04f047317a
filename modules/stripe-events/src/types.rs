use std::fmt;

use chrono::{DateTime, Utc};
use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::{PathError, Result};
use crate::path::{try_get_map_value, try_get_value};

/// A webhook event as delivered by Stripe.
///
/// Fields serialize in declaration order. Scalars are always written, using
/// their zero value when unset; `account` is dropped when empty, `data` and
/// `request` are written as `null` when absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Event {
    /// Connected account that originated the event, if any. An empty string
    /// decodes as `None`.
    #[serde(
        skip_serializing_if = "account_unset",
        deserialize_with = "empty_as_none"
    )]
    pub account: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub api_version: String,
    /// Unix timestamp, seconds.
    #[serde(deserialize_with = "null_as_default")]
    pub created: i64,
    pub data: Option<EventData>,
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub livemode: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub object: String,
    #[serde(deserialize_with = "null_as_default")]
    pub pending_webhooks: i64,
    pub request: Option<EventRequest>,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub event_type: String,
}

/// The object an event is about, plus the attributes it changed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventData {
    /// Prior values of changed fields. Only written when non-empty, but
    /// every entry of a non-empty map is written, zero values included.
    #[serde(skip_serializing_if = "attributes_unset")]
    pub previous_attributes: Option<Map<String, Value>>,
    pub object: Value,
}

/// The API request that triggered an event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EventRequest {
    pub id: String,
    pub idempotency_key: String,
}

fn account_unset(account: &Option<String>) -> bool {
    account.as_deref().unwrap_or_default().is_empty()
}

/// Required scalars sent as `null` take their zero value.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn empty_as_none<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.filter(|s| !s.is_empty()))
}

fn attributes_unset(attributes: &Option<Map<String, Value>>) -> bool {
    attributes.as_ref().map_or(true, Map::is_empty)
}

impl<'de> Deserialize<'de> for EventRequest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(EventRequestVisitor)
    }
}

struct EventRequestVisitor;

impl<'de> Visitor<'de> for EventRequestVisitor {
    type Value = EventRequest;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a request id string or an object with `id` and `idempotency_key`")
    }

    // Older API versions send the request id as a bare string.
    fn visit_str<E: de::Error>(self, id: &str) -> std::result::Result<Self::Value, E> {
        Ok(EventRequest {
            id: id.to_string(),
            idempotency_key: String::new(),
        })
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<Self::Value, A::Error> {
        let mut request = EventRequest::default();
        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "id" => request.id = map.next_value::<Option<String>>()?.unwrap_or_default(),
                "idempotency_key" => {
                    request.idempotency_key =
                        map.next_value::<Option<String>>()?.unwrap_or_default()
                }
                _ => {
                    map.next_value::<de::IgnoredAny>()?;
                }
            }
        }
        Ok(request)
    }
}

impl Event {
    /// Decode an event from JSON text. Missing fields take their zero value.
    pub fn from_json(payload: &str) -> Result<Self> {
        Ok(serde_json::from_str(payload)?)
    }

    /// Canonical JSON text for this event.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.created, 0)
    }

    /// Look up a value inside `data.object`, e.g.
    /// `event.get_object_value(["customer", "address", "city"])`.
    ///
    /// An event without data, or with a null object, behaves like an empty
    /// map. Panics when the path does not fit the payload; see
    /// [`crate::get_value`].
    pub fn get_object_value<I, S>(&self, path: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.try_get_object_value(path)
            .unwrap_or_else(|err| panic!("{err}"))
    }

    pub fn try_get_object_value<I, S>(&self, path: I) -> std::result::Result<String, PathError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        match self.data.as_ref().map(|data| &data.object) {
            Some(object) if !object.is_null() => try_get_value(object, path),
            _ => Ok(String::new()),
        }
    }

    /// Look up a value inside `data.previous_attributes`. Same rules as
    /// [`Event::get_object_value`].
    pub fn get_previous_value<I, S>(&self, path: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.try_get_previous_value(path)
            .unwrap_or_else(|err| panic!("{err}"))
    }

    pub fn try_get_previous_value<I, S>(&self, path: I) -> std::result::Result<String, PathError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        match self
            .data
            .as_ref()
            .and_then(|data| data.previous_attributes.as_ref())
        {
            Some(attributes) => try_get_map_value(attributes, path),
            None => Ok(String::new()),
        }
    }
}

impl EventData {
    pub fn new(object: Value) -> Self {
        Self {
            previous_attributes: None,
            object,
        }
    }

    pub fn with_previous_attributes(mut self, attributes: Map<String, Value>) -> Self {
        self.previous_attributes = Some(attributes);
        self
    }
}
