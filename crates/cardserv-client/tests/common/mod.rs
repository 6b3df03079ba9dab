// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Shared fixtures for client integration tests: a canned server built on
// `MockTransport` and JSON payloads shaped like real platform responses.

#![allow(dead_code)]

use std::sync::Arc;

use serde_json::{Value, json};

use cardserv_client::{ApiResponse, CardServicesClient, Method, MockTransport};

pub const ORG_ID: &str = "ORG66EEA7F7C73141849E4D0CB4B733A0CD";
pub const OU_ID: &str = "OU1C9E1D5C4B5F4E0C8C4C1B3C7E5B0A9F";
pub const LOCATION_ID: &str = "LOC7B00503775AF437FB2AAB161A70D2627";
pub const DEVICE_ID: &str = "DEV2F3A94C1D6E84B53A2C8B9A41F7E5D10";
pub const PROFILE_ID: &str = "PRAED88ED3EEA94F94B012211145E44742";
pub const DESTINATION: &str = "DESTC5E0F3C94E1A4E4FA6B5E9A5D6B2E1C1";
pub const JOB_ID: &str = "JOBA5D31540B8AC4CCDB930FF914D9228D3";

/// A client wired to an in-memory server.
pub struct FakeServer {
    pub transport: Arc<MockTransport>,
    pub client: CardServicesClient,
}

impl FakeServer {
    pub fn new() -> Self {
        let transport = Arc::new(MockTransport::new());
        let client = CardServicesClient::with_transport(transport.clone());
        Self { transport, client }
    }

    pub fn get(&self, path: &str, body: Value) -> &Self {
        self.transport.respond_json(Method::Get, path, body);
        self
    }

    pub fn post(&self, path: &str, body: Value) -> &Self {
        self.transport.respond_json(Method::Post, path, body);
        self
    }

    pub fn status(&self, method: Method, path: &str, status: u16, body: &str) -> &Self {
        self.transport
            .respond(method, path, ApiResponse::new(status, body));
        self
    }

    /// One organization with one unit, location, device and destination.
    pub fn with_hierarchy(self) -> Self {
        self.get("organizations", json!([organization()]))
            .get(&format!("organizations/{ORG_ID}"), organization())
            .get(
                &format!("organizations/{ORG_ID}/organizational-units"),
                json!([{ "organizationUnitId": OU_ID, "name": "Head office", "organizationId": ORG_ID }]),
            )
            .get(
                &format!("organizations/{ORG_ID}/locations"),
                json!([location()]),
            )
            .get(
                &format!("organizational-units/{OU_ID}/locations"),
                json!([location()]),
            )
            .get(&format!("locations/{LOCATION_ID}"), location())
            .get("devices", json!([device()]))
            .get(&format!("devices/{DEVICE_ID}"), device())
            .get(
                &format!("organizations/{ORG_ID}/print-destinations"),
                json!([{ "destination": DESTINATION, "printerName": "Lobby printer" }]),
            )
            .get(
                &format!("organizations/{ORG_ID}/production-profiles"),
                json!([{ "profileId": PROFILE_ID, "name": "Employee badge", "organizationId": ORG_ID }]),
            );
        self
    }

    /// Profile schema with a single card type list, and a template with one
    /// card request asking for a name and a photo.
    pub fn with_profile(self, card_types: &[&str]) -> Self {
        self.get(
            &format!("production-profiles/{PROFILE_ID}/parameters"),
            json!({
                "profileId": PROFILE_ID,
                "profileParameters": [
                    { "name": "CardType", "dataType": "List", "options": card_types }
                ]
            }),
        )
        .post(
            &format!("production-profiles/{PROFILE_ID}/configure"),
            card_request_template(),
        );
        self
    }

    /// Accept submissions, returning `JOB_ID`.
    pub fn accepting_jobs(self) -> Self {
        self.post("jobs", json!({ "jobUniqueId": JOB_ID }));
        self
    }

    /// Serve the given job payloads for `JOB_ID`, in order.
    pub fn with_job_states(self, states: &[Value]) -> Self {
        for state in states {
            self.get(&format!("jobs/{JOB_ID}"), state.clone());
        }
        self
    }
}

pub fn organization() -> Value {
    json!({ "organizationId": ORG_ID, "name": "Acme Corp" })
}

pub fn location() -> Value {
    json!({
        "locationId": LOCATION_ID,
        "locationName": "Front desk",
        "organizationId": ORG_ID,
        "organizationUnitId": OU_ID
    })
}

pub fn device() -> Value {
    json!({
        "deviceUniqueId": DEVICE_ID,
        "deviceName": "Lobby printer",
        "locationId": LOCATION_ID,
        "model": "HDP5000"
    })
}

pub fn card_request_template() -> Value {
    json!({
        "profileId": PROFILE_ID,
        "services": [{
            "type": "CardRequest",
            "parameters": [
                { "data": { "name": "EmployeeName", "dataType": "Text", "maxLength": 40 } },
                { "data": { "name": "Photo", "dataType": "Image", "preferredWidth": 32, "preferredHeight": 32 } }
            ]
        }]
    })
}

pub fn job(status: &str) -> Value {
    json!({
        "jobUniqueId": JOB_ID,
        "jobName": "Test card request",
        "jobStatus": status,
        "submitDate": "2026-10-16T09:00:00Z",
        "lastUpdate": "2026-10-16T09:00:05Z"
    })
}

pub fn printed_job() -> Value {
    let mut job = job("Printed");
    job["serviceData"] = json!({
        "cardReadResults": {
            "cardEdges": [
                {
                    "edgeType": "SEOS",
                    "cardProtocol": "ISO14443A",
                    "enabled": true,
                    "status": "Success",
                    "cardSerialNumber": "08A62E6B",
                    "pacsDataAvailable": true,
                    "cardPacsBitData": "1D682250",
                    "cardPacsBitCount": 35,
                    "pacsData": [{
                        "formatName": "H10301",
                        "formatBitCount": 26,
                        "decodeStatus": "Success",
                        "cardNumber": "679123",
                        "pacsFields": [
                            { "key": "Facility Code", "value": "115" },
                            { "key": "Card Number", "value": "679123" }
                        ]
                    }]
                },
                {
                    "edgeType": "iCLASS",
                    "cardProtocol": "ISO15693",
                    "enabled": true,
                    "status": "NotPresent"
                }
            ]
        }
    });
    job
}

/// A small PNG written to a temp dir.
pub fn test_image(dir: &std::path::Path, width: u32, height: u32) -> std::path::PathBuf {
    let path = dir.join("testimage.png");
    image::RgbImage::new(width, height)
        .save(&path)
        .expect("write test image");
    path
}
