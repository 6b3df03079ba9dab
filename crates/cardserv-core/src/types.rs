// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Resource hierarchy types: Organization → Organizational Unit → Location →
// Device, plus the organization-scoped print destinations and production
// profiles.
//
// Every record is a transient, request-scoped copy; the server is the source
// of truth.  Identifiers are stable and may be stored and reused.

use serde::{Deserialize, Serialize};

macro_rules! resource_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

resource_id!(
    /// Organization unique Id (e.g. `ORG66EE...`).
    OrganizationId
);
resource_id!(
    /// Organizational unit unique Id.
    OrganizationalUnitId
);
resource_id!(
    /// Location unique Id (e.g. `LOC7B00...`).
    LocationId
);
resource_id!(
    /// Device unique Id.
    DeviceId
);
resource_id!(
    /// Production profile unique Id (e.g. `PRAED8...`).
    ProfileId
);
resource_id!(
    /// Job unique Id returned by submission (e.g. `JOBA5D3...`).
    JobId
);

/// Root of the resource hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub organization_id: OrganizationId,
    pub name: String,
}

/// Second tier of the hierarchy, loosely modelled on an X.500 OU.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationalUnit {
    pub organization_unit_id: OrganizationalUnitId,
    pub name: String,
    pub organization_id: OrganizationId,
}

/// Third tier.  Devices are defined at this level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub location_id: LocationId,
    pub location_name: String,
    pub organization_id: OrganizationId,
    #[serde(default)]
    pub organization_unit_id: Option<OrganizationalUnitId>,
}

/// A card printer/encoder registered at a location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub device_unique_id: DeviceId,
    pub device_name: String,
    pub location_id: LocationId,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub serial_number: Option<String>,
}

/// Where a card request is routed to be printed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintDestination {
    /// Opaque destination string set on a card request.
    pub destination: String,
    pub printer_name: String,
}

/// Server-side template controlling card layout, encoding and required
/// input parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionProfile {
    pub profile_id: ProfileId,
    pub name: String,
    #[serde(default)]
    pub organization_id: Option<OrganizationId>,
}
