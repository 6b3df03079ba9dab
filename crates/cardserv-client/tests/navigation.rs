// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Organization hierarchy navigation against a canned server.

mod common;

use cardserv_client::{Method, select_first, select_where};
use cardserv_core::error::{CardServicesError, ResourceKind};
use cardserv_core::types::{
    DeviceId, JobId, LocationId, OrganizationId, OrganizationalUnitId, ProfileId,
};

use common::*;

#[tokio::test]
async fn walks_organization_hierarchy() {
    let server = FakeServer::new().with_hierarchy();
    let client = &server.client;

    let org = select_first(client.get_organizations().await.unwrap()).expect("one org");
    assert_eq!(org.organization_id.as_str(), ORG_ID);

    let units = client
        .get_organizational_units(&org.organization_id)
        .await
        .unwrap();
    assert_eq!(units[0].name, "Head office");

    let locations = client
        .get_organization_locations(&org.organization_id)
        .await
        .unwrap();
    assert_eq!(locations[0].location_id.as_str(), LOCATION_ID);

    let unit_locations = client
        .get_organizational_unit_locations(&units[0].organization_unit_id)
        .await
        .unwrap();
    assert_eq!(unit_locations.len(), 1);

    let devices = client
        .get_devices(Some(&org.organization_id))
        .await
        .unwrap();
    assert_eq!(devices[0].model.as_deref(), Some("HDP5000"));

    let destinations = client
        .get_print_destinations(&org.organization_id)
        .await
        .unwrap();
    assert_eq!(destinations[0].destination, DESTINATION);

    let profiles = client
        .get_production_profiles(&org.organization_id)
        .await
        .unwrap();
    let profile = select_where(profiles, |p| p.name == "Employee badge").expect("profile");
    assert_eq!(profile.profile_id.as_str(), PROFILE_ID);
}

#[tokio::test]
async fn get_by_id_returns_the_resource() {
    let server = FakeServer::new().with_hierarchy();
    let client = &server.client;

    let org = client
        .get_organization(&OrganizationId::new(ORG_ID))
        .await
        .unwrap();
    assert_eq!(org.name, "Acme Corp");

    let location = client
        .get_location(&LocationId::new(LOCATION_ID))
        .await
        .unwrap();
    assert_eq!(
        location.organization_unit_id,
        Some(OrganizationalUnitId::new(OU_ID))
    );

    let device = client.get_device(&DeviceId::new(DEVICE_ID)).await.unwrap();
    assert_eq!(device.device_name, "Lobby printer");
}

#[tokio::test]
async fn device_filter_is_sent_as_query() {
    let server = FakeServer::new().with_hierarchy();
    server
        .client
        .get_devices(Some(&OrganizationId::new(ORG_ID)))
        .await
        .unwrap();
    server.client.get_devices(None).await.unwrap();

    let requests = server.transport.requests_to("devices");
    assert_eq!(requests[0].query_value("organizationId"), Some(ORG_ID));
    assert!(requests[1].query.is_empty());
}

#[tokio::test]
async fn empty_listing_is_not_an_error() {
    let server = FakeServer::new();
    server.get("organizations", serde_json::json!([]));
    let orgs = server.client.get_organizations().await.unwrap();
    assert!(orgs.is_empty());
    assert!(select_first(orgs).is_none());
}

#[tokio::test]
async fn unknown_ids_are_not_found_with_kind_and_id() {
    let server = FakeServer::new();
    let client = &server.client;

    let cases = [
        (
            client.get_organization(&OrganizationId::new("ORG0")).await.map(drop),
            ResourceKind::Organization,
            "ORG0",
        ),
        (
            client
                .get_organizational_unit(&OrganizationalUnitId::new("OU0"))
                .await
                .map(drop),
            ResourceKind::OrganizationalUnit,
            "OU0",
        ),
        (
            client.get_location(&LocationId::new("LOC0")).await.map(drop),
            ResourceKind::Location,
            "LOC0",
        ),
        (
            client.get_device(&DeviceId::new("DEV0")).await.map(drop),
            ResourceKind::Device,
            "DEV0",
        ),
        (
            client
                .get_production_profile(&ProfileId::new("PR0"))
                .await
                .map(drop),
            ResourceKind::ProductionProfile,
            "PR0",
        ),
        (
            client.get_job(&JobId::new("JOB0")).await.map(drop),
            ResourceKind::Job,
            "JOB0",
        ),
    ];

    for (result, expected_kind, expected_id) in cases {
        match result {
            Err(CardServicesError::NotFound { kind, id }) => {
                assert_eq!(kind, expected_kind);
                assert_eq!(id, expected_id);
            }
            other => panic!("expected NotFound for {expected_id}, got {other:?}"),
        }
    }
}

#[tokio::test]
async fn job_not_found_message() {
    let server = FakeServer::new();
    let err = server
        .client
        .get_job(&JobId::new("JOB12345"))
        .await
        .unwrap_err();
    assert!(
        err.to_string().contains("Job not found: 'JOB12345'"),
        "message was: {err}"
    );
}

#[tokio::test]
async fn server_error_carries_status_and_message() {
    let server = FakeServer::new();
    server.status(
        Method::Get,
        "organizations",
        503,
        r#"{"message":"scheduled maintenance"}"#,
    );
    match server.client.get_organizations().await {
        Err(CardServicesError::Api { status, message }) => {
            assert_eq!(status, 503);
            assert_eq!(message, "scheduled maintenance");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn listing_404_without_resource_is_api_error() {
    let server = FakeServer::new();
    assert!(matches!(
        server.client.get_devices(None).await,
        Err(CardServicesError::Api { status: 404, .. })
    ));
}

#[tokio::test]
async fn malformed_body_is_serialization_error() {
    let server = FakeServer::new();
    server.get("organizations", serde_json::json!({ "unexpected": true }));
    assert!(matches!(
        server.client.get_organizations().await,
        Err(CardServicesError::Serialization(_))
    ));
}
