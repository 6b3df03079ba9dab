// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Production request building.
//
// A request is built in two round trips: fetch the profile's parameter
// schema and pick a card type, then configure the profile to obtain a
// template whose card request service still needs its data parameters,
// destination, name and options filled in.
//
// Only the schema shapes listed below are understood.  Anything else is
// reported rather than guessed at:
//   - profile schema: exactly one `List` parameter named `CardType`
//   - template: exactly one `CardRequest` service
//   - service parameters: `Text` and `Image` only

use std::path::PathBuf;

use tracing::{debug, info, instrument, warn};

use cardserv_core::error::{CardServicesError, Result};
use cardserv_core::options::ServiceOption;
use cardserv_core::production::{
    CARD_TYPE_PARAMETER, CardRequestService, ImageData, ListValue, Parameter, ParameterValue,
    ProductionProfileConfig, ProductionRequestTemplate, Service,
};
use cardserv_core::types::{JobId, ProfileId};

use crate::card_image::CardImage;
use crate::client::CardServicesClient;

/// How to pick the card type from the profile's options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CardTypeChoice {
    /// The first option offered.
    #[default]
    First,
    /// A specific option; must be one the profile offers.
    Named(String),
}

/// Set the `CardType` value on a freshly fetched profile schema and return
/// the chosen card type.
pub fn select_card_type(
    config: &mut ProductionProfileConfig,
    choice: &CardTypeChoice,
) -> Result<String> {
    match config.profile_parameters.as_mut_slice() {
        [Parameter { name, value }] => match value {
            ParameterValue::List(list) if name.as_str() == CARD_TYPE_PARAMETER => {
                choose_option(list, choice)
            }
            other => Err(CardServicesError::UnhandledProfileParameter {
                data_type: other.data_type().to_string(),
                name: name.clone(),
            }),
        },
        [] => Err(CardServicesError::UnhandledProfileParameter {
            data_type: "none".into(),
            name: "(profile has no parameters)".into(),
        }),
        params => {
            // Report the first parameter that is not the card type list.
            let odd = params
                .iter()
                .find(|p| !matches!(p.value, ParameterValue::List(_)) || p.name != CARD_TYPE_PARAMETER)
                .unwrap_or(&params[params.len() - 1]);
            Err(CardServicesError::UnhandledProfileParameter {
                data_type: odd.data_type().to_string(),
                name: odd.name.clone(),
            })
        }
    }
}

fn choose_option(list: &mut ListValue, choice: &CardTypeChoice) -> Result<String> {
    if list.options.is_empty() {
        return Err(CardServicesError::NoCardTypes);
    }
    let chosen = match choice {
        CardTypeChoice::First => list.options[0].clone(),
        CardTypeChoice::Named(requested) => {
            if !list.options.iter().any(|o| o == requested) {
                return Err(CardServicesError::InvalidCardType {
                    requested: requested.clone(),
                });
            }
            requested.clone()
        }
    };
    list.value = Some(chosen.clone());
    Ok(chosen)
}

/// The single card request service of a template.
pub fn card_request_mut(template: &mut ProductionRequestTemplate) -> Result<&mut CardRequestService> {
    match template.services.as_mut_slice() {
        [Service::CardRequest(service)] => Ok(service),
        [other] => Err(CardServicesError::UnhandledService(other.kind().to_string())),
        [] => Err(CardServicesError::UnhandledService(
            "template contains no services".into(),
        )),
        many => Err(CardServicesError::UnhandledService(format!(
            "template contains {} services",
            many.len()
        ))),
    }
}

/// Supplies values for the data parameters of a card request.
pub trait ParameterSource: Send + Sync {
    fn text_value(&self, name: &str, max_length: Option<u32>) -> Result<String>;

    fn image_value(&self, name: &str, preferred: (Option<u32>, Option<u32>)) -> Result<ImageData>;
}

/// Fill every data parameter of the template's card request service, in
/// server order, and return the service for further editing.
pub fn fill_service_parameters<'t>(
    template: &'t mut ProductionRequestTemplate,
    source: &dyn ParameterSource,
) -> Result<&'t mut CardRequestService> {
    let service = card_request_mut(template)?;
    for parameter in &mut service.parameters {
        let Parameter { name, value } = &mut parameter.data;
        match value {
            ParameterValue::Text(text) => {
                text.value = Some(source.text_value(name, text.max_length)?);
            }
            ParameterValue::Image(img) => {
                img.image = Some(source.image_value(name, img.preferred_size())?);
            }
            ParameterValue::List(_) | ParameterValue::Unsupported => {
                return Err(CardServicesError::UnexpectedServiceParameter { name: name.clone() });
            }
        }
        debug!(parameter = %name, "service parameter filled");
    }
    Ok(service)
}

/// What one service parameter was bound to, in server order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilledParameter {
    Text {
        name: String,
        value: String,
    },
    Image {
        name: String,
        preferred_width: i32,
        preferred_height: i32,
    },
}

/// Describe the data parameters of a filled card request service.
pub fn filled_parameters(service: &CardRequestService) -> Vec<FilledParameter> {
    service
        .parameters
        .iter()
        .filter_map(|parameter| {
            let Parameter { name, value } = &parameter.data;
            match value {
                ParameterValue::Text(text) => Some(FilledParameter::Text {
                    name: name.clone(),
                    value: text.value.clone().unwrap_or_default(),
                }),
                ParameterValue::Image(img) => Some(FilledParameter::Image {
                    name: name.clone(),
                    preferred_width: img.preferred_width,
                    preferred_height: img.preferred_height,
                }),
                ParameterValue::List(_) | ParameterValue::Unsupported => None,
            }
        })
        .collect()
}

/// Walkthrough source: text parameters are set to their own name and every
/// image parameter gets the same image file.
#[derive(Debug, Clone)]
pub struct DemoParameterSource {
    image_path: PathBuf,
}

impl DemoParameterSource {
    pub fn new(image_path: impl Into<PathBuf>) -> Self {
        Self {
            image_path: image_path.into(),
        }
    }
}

impl ParameterSource for DemoParameterSource {
    fn text_value(&self, name: &str, max_length: Option<u32>) -> Result<String> {
        let value = match max_length {
            Some(max) => name.chars().take(max as usize).collect(),
            None => name.to_string(),
        };
        Ok(value)
    }

    fn image_value(&self, name: &str, preferred: (Option<u32>, Option<u32>)) -> Result<ImageData> {
        let image = CardImage::open(&self.image_path)?.fit_within(preferred)?;
        debug!(
            parameter = name,
            width = image.width(),
            height = image.height(),
            mime = image.mime_type(),
            "image parameter bound"
        );
        Ok(image.into_image_data())
    }
}

/// A configured template ready for submission.
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    pub card_type: String,
    /// Card types the profile offered.
    pub card_types: Vec<String>,
    pub parameters: Vec<FilledParameter>,
    pub template: ProductionRequestTemplate,
}

/// Builder for the usual fetch-schema / configure / fill / submit flow.
///
/// ```ignore
/// let job_id = client
///     .production_request(profile.profile_id)
///     .destination(dest.destination)
///     .request_name("Test card request")
///     .option(ServiceOption::InputHopper(Hopper::Hopper1))
///     .submit(&DemoParameterSource::new("photos/testimage.png"))
///     .await?;
/// ```
pub struct ProductionRequest<'a> {
    client: &'a CardServicesClient,
    profile_id: ProfileId,
    card_type: CardTypeChoice,
    destination: Option<String>,
    request_name: Option<String>,
    options: Vec<ServiceOption>,
    raw_options: Vec<(String, String)>,
}

impl<'a> ProductionRequest<'a> {
    pub fn new(client: &'a CardServicesClient, profile_id: ProfileId) -> Self {
        Self {
            client,
            profile_id,
            card_type: CardTypeChoice::First,
            destination: None,
            request_name: None,
            options: Vec::new(),
            raw_options: Vec::new(),
        }
    }

    pub fn card_type(mut self, choice: CardTypeChoice) -> Self {
        self.card_type = choice;
        self
    }

    pub fn destination(mut self, destination: impl Into<String>) -> Self {
        self.destination = Some(destination.into());
        self
    }

    pub fn request_name(mut self, name: impl Into<String>) -> Self {
        self.request_name = Some(name.into());
        self
    }

    pub fn option(mut self, option: ServiceOption) -> Self {
        self.options.push(option);
        self
    }

    /// An option this client has no typed form for.  Passed through as is.
    pub fn raw_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.raw_options.push((key.into(), value.into()));
        self
    }

    /// Run the schema and configure round trips and fill the template.
    #[instrument(skip_all, fields(profile = %self.profile_id))]
    pub async fn prepare(self, source: &dyn ParameterSource) -> Result<PreparedRequest> {
        let mut config = self
            .client
            .get_production_profile_parameters(&self.profile_id)
            .await?;
        let card_type = select_card_type(&mut config, &self.card_type)?;
        info!(%card_type, "card type selected");
        let card_types = config
            .profile_parameters
            .iter()
            .find_map(|p| match &p.value {
                ParameterValue::List(list) => Some(list.options.clone()),
                _ => None,
            })
            .unwrap_or_default();

        let mut template = self.client.configure_production_profile(&config).await?;
        let service = fill_service_parameters(&mut template, source)?;

        match self.destination {
            Some(destination) => service.set_destination(destination),
            None => warn!("no print destination set; the server default applies"),
        }
        if let Some(name) = self.request_name {
            service.set_request_name(name);
        }
        for option in self.options {
            service.add_option(option);
        }
        for (key, value) in self.raw_options {
            service.add_raw_option(key, value);
        }
        let parameters = filled_parameters(service);

        Ok(PreparedRequest {
            card_type,
            card_types,
            parameters,
            template,
        })
    }

    /// Prepare and submit.  Returns the new job's id.
    pub async fn submit(self, source: &dyn ParameterSource) -> Result<JobId> {
        let client = self.client;
        let prepared = self.prepare(source).await?;
        client.submit_production_request(&prepared.template).await
    }
}

impl CardServicesClient {
    /// Start building a production request for `profile_id`.
    pub fn production_request(&self, profile_id: ProfileId) -> ProductionRequest<'_> {
        ProductionRequest::new(self, profile_id)
    }
}
