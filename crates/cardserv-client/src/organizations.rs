// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Organization hierarchy: organizations, organizational units, locations.

use tracing::{info, instrument};

use cardserv_core::error::{ResourceKind, Result};
use cardserv_core::types::{
    Location, LocationId, Organization, OrganizationId, OrganizationalUnit, OrganizationalUnitId,
};

use crate::client::CardServicesClient;
use crate::transport::ApiRequest;

impl CardServicesClient {
    /// Organizations visible to this API key.
    #[instrument(skip(self))]
    pub async fn get_organizations(&self) -> Result<Vec<Organization>> {
        let orgs: Vec<Organization> = self.call(ApiRequest::get(&["organizations"]), None).await?;
        info!(count = orgs.len(), "organizations retrieved");
        Ok(orgs)
    }

    #[instrument(skip(self), fields(id = %id))]
    pub async fn get_organization(&self, id: &OrganizationId) -> Result<Organization> {
        self.call(
            ApiRequest::get(&["organizations", id.as_str()]),
            Some((ResourceKind::Organization, id.as_str())),
        )
        .await
    }

    #[instrument(skip(self), fields(org = %org))]
    pub async fn get_organizational_units(
        &self,
        org: &OrganizationId,
    ) -> Result<Vec<OrganizationalUnit>> {
        self.call(
            ApiRequest::get(&["organizations", org.as_str(), "organizational-units"]),
            Some((ResourceKind::Organization, org.as_str())),
        )
        .await
    }

    #[instrument(skip(self), fields(id = %id))]
    pub async fn get_organizational_unit(
        &self,
        id: &OrganizationalUnitId,
    ) -> Result<OrganizationalUnit> {
        self.call(
            ApiRequest::get(&["organizational-units", id.as_str()]),
            Some((ResourceKind::OrganizationalUnit, id.as_str())),
        )
        .await
    }

    /// Locations directly under an organization.
    #[instrument(skip(self), fields(org = %org))]
    pub async fn get_organization_locations(&self, org: &OrganizationId) -> Result<Vec<Location>> {
        self.call(
            ApiRequest::get(&["organizations", org.as_str(), "locations"]),
            Some((ResourceKind::Organization, org.as_str())),
        )
        .await
    }

    /// Locations under one organizational unit.
    #[instrument(skip(self), fields(unit = %unit))]
    pub async fn get_organizational_unit_locations(
        &self,
        unit: &OrganizationalUnitId,
    ) -> Result<Vec<Location>> {
        self.call(
            ApiRequest::get(&["organizational-units", unit.as_str(), "locations"]),
            Some((ResourceKind::OrganizationalUnit, unit.as_str())),
        )
        .await
    }

    #[instrument(skip(self), fields(id = %id))]
    pub async fn get_location(&self, id: &LocationId) -> Result<Location> {
        self.call(
            ApiRequest::get(&["locations", id.as_str()]),
            Some((ResourceKind::Location, id.as_str())),
        )
        .await
    }
}
