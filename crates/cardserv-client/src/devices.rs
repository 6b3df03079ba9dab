// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Devices and print destinations.

use tracing::{info, instrument};

use cardserv_core::error::{ResourceKind, Result};
use cardserv_core::types::{Device, DeviceId, OrganizationId, PrintDestination};

use crate::client::CardServicesClient;
use crate::transport::ApiRequest;

impl CardServicesClient {
    /// Devices, optionally restricted to one organization.
    #[instrument(skip(self))]
    pub async fn get_devices(&self, org: Option<&OrganizationId>) -> Result<Vec<Device>> {
        let mut request = ApiRequest::get(&["devices"]);
        if let Some(org) = org {
            request = request.with_query("organizationId", org);
        }
        let devices: Vec<Device> = self.call(request, None).await?;
        info!(count = devices.len(), "devices retrieved");
        Ok(devices)
    }

    #[instrument(skip(self), fields(id = %id))]
    pub async fn get_device(&self, id: &DeviceId) -> Result<Device> {
        self.call(
            ApiRequest::get(&["devices", id.as_str()]),
            Some((ResourceKind::Device, id.as_str())),
        )
        .await
    }

    /// Destinations a card request may be routed to.
    #[instrument(skip(self), fields(org = %org))]
    pub async fn get_print_destinations(
        &self,
        org: &OrganizationId,
    ) -> Result<Vec<PrintDestination>> {
        self.call(
            ApiRequest::get(&["organizations", org.as_str(), "print-destinations"]),
            Some((ResourceKind::Organization, org.as_str())),
        )
        .await
    }
}
