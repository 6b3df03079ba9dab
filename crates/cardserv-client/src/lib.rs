// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Card Services Client: async REST client for the card issuance platform:
// organization hierarchy navigation, production request building, job
// submission and status polling.  Domain types live in `cardserv-core`.

pub mod builder;
pub mod card_image;
pub mod client;
pub mod devices;
pub mod jobs;
pub mod mock;
pub mod organizations;
pub mod poller;
pub mod profiles;
pub mod select;
pub mod transport;

pub use builder::{
    CardTypeChoice, DemoParameterSource, FilledParameter, ParameterSource, PreparedRequest,
    ProductionRequest, card_request_mut, fill_service_parameters, filled_parameters,
    select_card_type,
};
pub use card_image::CardImage;
pub use client::{CardServicesClient, CertificateSource, ClientConfig, parse_server_url};
pub use mock::MockTransport;
pub use poller::JobPoller;
pub use select::{select_first, select_where};
pub use transport::{ApiRequest, ApiResponse, HttpTransport, Method, Transport};
