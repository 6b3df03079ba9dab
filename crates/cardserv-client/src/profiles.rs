// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Production profiles: listing, parameter schema and configuration into a
// submittable request template.

use tracing::{debug, info, instrument};

use cardserv_core::error::{ResourceKind, Result};
use cardserv_core::production::{ProductionProfileConfig, ProductionRequestTemplate};
use cardserv_core::types::{OrganizationId, ProductionProfile, ProfileId};

use crate::client::CardServicesClient;
use crate::transport::ApiRequest;

impl CardServicesClient {
    #[instrument(skip(self), fields(org = %org))]
    pub async fn get_production_profiles(
        &self,
        org: &OrganizationId,
    ) -> Result<Vec<ProductionProfile>> {
        let profiles: Vec<ProductionProfile> = self
            .call(
                ApiRequest::get(&["organizations", org.as_str(), "production-profiles"]),
                Some((ResourceKind::Organization, org.as_str())),
            )
            .await?;
        info!(count = profiles.len(), "production profiles retrieved");
        Ok(profiles)
    }

    #[instrument(skip(self), fields(id = %id))]
    pub async fn get_production_profile(&self, id: &ProfileId) -> Result<ProductionProfile> {
        self.call(
            ApiRequest::get(&["production-profiles", id.as_str()]),
            Some((ResourceKind::ProductionProfile, id.as_str())),
        )
        .await
    }

    /// The input parameters a profile requires before it can be configured.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn get_production_profile_parameters(
        &self,
        id: &ProfileId,
    ) -> Result<ProductionProfileConfig> {
        let config: ProductionProfileConfig = self
            .call(
                ApiRequest::get(&["production-profiles", id.as_str(), "parameters"]),
                Some((ResourceKind::ProductionProfile, id.as_str())),
            )
            .await?;
        debug!(
            parameters = config.profile_parameters.len(),
            "profile parameters retrieved"
        );
        Ok(config)
    }

    /// Submit the filled-in profile parameters and receive a request
    /// template with one or more services to complete.
    #[instrument(skip_all, fields(profile = %config.profile_id))]
    pub async fn configure_production_profile(
        &self,
        config: &ProductionProfileConfig,
    ) -> Result<ProductionRequestTemplate> {
        let id = config.profile_id.as_str();
        let body = serde_json::to_value(config)?;
        let mut template: ProductionRequestTemplate = self
            .call(
                ApiRequest::post(&["production-profiles", id, "configure"], body),
                Some((ResourceKind::ProductionProfile, id)),
            )
            .await?;
        if template.profile_id.is_none() {
            template.profile_id = Some(config.profile_id.clone());
        }
        info!(services = template.services.len(), "production profile configured");
        Ok(template)
    }
}
