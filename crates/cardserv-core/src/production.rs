// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Production request model: profile parameter schemas, the request template
// returned by configuring a profile, and the services inside it.
//
// Parameters and services are tagged variants on the wire (`dataType` and
// `type` respectively).  Unknown tags deserialize to an `Unsupported`
// variant so callers can reject them explicitly.

use std::collections::BTreeMap;
use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::types::ProfileId;

/// Name of the list parameter that selects a card template.
pub const CARD_TYPE_PARAMETER: &str = "CardType";

/// Image dimension hint meaning "no preference".
pub const NO_PREFERENCE: i32 = -1;

/// Parameter kind tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    List,
    Text,
    Image,
    Unsupported,
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::List => "List",
            Self::Text => "Text",
            Self::Image => "Image",
            Self::Unsupported => "Unsupported",
        };
        f.write_str(name)
    }
}

/// A named parameter slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(flatten)]
    pub value: ParameterValue,
}

impl Parameter {
    pub fn list(name: impl Into<String>, options: Vec<String>) -> Self {
        Self {
            name: name.into(),
            value: ParameterValue::List(ListValue {
                value: None,
                options,
            }),
        }
    }

    pub fn text(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: ParameterValue::Text(TextValue::default()),
        }
    }

    pub fn image(name: impl Into<String>, preferred_width: i32, preferred_height: i32) -> Self {
        Self {
            name: name.into(),
            value: ParameterValue::Image(ImageValue {
                preferred_width,
                preferred_height,
                image: None,
            }),
        }
    }

    pub fn data_type(&self) -> DataType {
        self.value.data_type()
    }
}

/// Per-kind payload of a [`Parameter`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "dataType")]
pub enum ParameterValue {
    List(ListValue),
    Text(TextValue),
    Image(ImageValue),
    #[serde(other)]
    Unsupported,
}

impl ParameterValue {
    pub fn data_type(&self) -> DataType {
        match self {
            Self::List(_) => DataType::List,
            Self::Text(_) => DataType::Text,
            Self::Image(_) => DataType::Image,
            Self::Unsupported => DataType::Unsupported,
        }
    }
}

/// An enumerated value: one of `options`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListValue {
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub options: Vec<String>,
}

/// Free text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextValue {
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub max_length: Option<u32>,
}

/// Binary image slot with optional size hints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageValue {
    #[serde(default = "no_preference")]
    pub preferred_width: i32,
    #[serde(default = "no_preference")]
    pub preferred_height: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageData>,
}

impl ImageValue {
    /// Preferred (width, height) in pixels, `None` where no preference.
    pub fn preferred_size(&self) -> (Option<u32>, Option<u32>) {
        let hint = |v: i32| u32::try_from(v).ok().filter(|v| *v > 0);
        (hint(self.preferred_width), hint(self.preferred_height))
    }
}

fn no_preference() -> i32 {
    NO_PREFERENCE
}

/// Encoded image bytes bound to an image parameter.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageData {
    pub mime_type: String,
    #[serde(serialize_with = "to_base64", deserialize_with = "from_base64")]
    pub data: Vec<u8>,
}

impl fmt::Debug for ImageData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageData")
            .field("mime_type", &self.mime_type)
            .field("len", &self.data.len())
            .finish()
    }
}

fn to_base64<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&BASE64.encode(bytes))
}

fn from_base64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
    let encoded = String::deserialize(deserializer)?;
    BASE64
        .decode(encoded.as_bytes())
        .map_err(serde::de::Error::custom)
}

/// The parameter schema of a production profile.  Order is fixed by the
/// server at fetch time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionProfileConfig {
    pub profile_id: ProfileId,
    #[serde(default)]
    pub profile_parameters: Vec<Parameter>,
}

/// A submittable job template produced by configuring a profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionRequestTemplate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_id: Option<ProfileId>,
    #[serde(default)]
    pub services: Vec<Service>,
}

/// One unit of work within a template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Service {
    CardRequest(CardRequestService),
    #[serde(other)]
    Unsupported,
}

impl Service {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::CardRequest(_) => "CardRequest",
            Self::Unsupported => "Unsupported",
        }
    }
}

/// Card production service: where to print, what to call the job, the
/// ordered data parameters and any service options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardRequestService {
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub request_name: Option<String>,
    #[serde(default)]
    pub parameters: Vec<ServiceParameter>,
    #[serde(default)]
    pub service_options: BTreeMap<String, String>,
}

impl CardRequestService {
    pub fn set_destination(&mut self, destination: impl Into<String>) {
        self.destination = Some(destination.into());
    }

    pub fn set_request_name(&mut self, name: impl Into<String>) {
        self.request_name = Some(name.into());
    }

    /// Add a typed option, replacing any previous value for the same key.
    pub fn add_option(&mut self, option: crate::options::ServiceOption) {
        self.service_options
            .insert(option.key().to_string(), option.value());
    }

    /// Add an opaque option pair, passed through unmodified.
    pub fn add_raw_option(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.service_options.insert(key.into(), value.into());
    }
}

/// Wrapper around a data parameter inside a card request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceParameter {
    pub data: Parameter,
}
