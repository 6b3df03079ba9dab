// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Service options: key/value directives that modify how a card request
// service executes.  The server treats them as opaque strings; the typed
// variants below only produce the well-known keys and values.

use serde::{Deserialize, Serialize};

/// Printer input hopper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Hopper {
    Hopper1,
    Hopper2,
    Hopper3,
    Hopper4,
    Hopper5,
    Hopper6,
}

impl Hopper {
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Hopper1 => "UseHopper1",
            Self::Hopper2 => "UseHopper2",
            Self::Hopper3 => "UseHopper3",
            Self::Hopper4 => "UseHopper4",
            Self::Hopper5 => "UseHopper5",
            Self::Hopper6 => "UseHopper6",
        }
    }
}

/// Card sides included in a rendered card image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardSides {
    Front,
    Back,
    FrontAndBack,
}

impl CardSides {
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Front => "Front",
            Self::Back => "Back",
            Self::FrontAndBack => "FrontAndBack",
        }
    }
}

/// Rotation applied to a rendered card image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageRotation {
    None,
    Clockwise90,
    Clockwise180,
    Clockwise270,
}

impl ImageRotation {
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Clockwise90 => "Clockwise90",
            Self::Clockwise180 => "Clockwise180",
            Self::Clockwise270 => "Clockwise270",
        }
    }
}

/// Whether the job prints, or only renders the card image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputMode {
    PrintAndRender,
    RenderOnly,
}

impl OutputMode {
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::PrintAndRender => "PrintAndRender",
            Self::RenderOnly => "RenderOnly",
        }
    }
}

/// A typed service option.  Use [`ServiceOption::key`] and
/// [`ServiceOption::value`] for the wire pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceOption {
    /// Override the input hopper configured in the card template.
    InputHopper(Hopper),
    /// Enable card image rendering.
    RenderEnable(bool),
    CardSides(CardSides),
    ImageRotation(ImageRotation),
    /// Rendered image quality, 1 (lowest) upwards.
    ImageQuality(u8),
    OutputMode(OutputMode),
}

impl ServiceOption {
    pub fn key(&self) -> &'static str {
        match self {
            Self::InputHopper(_) => "InputHopperSelect",
            Self::RenderEnable(_) => "CardRender.Enable",
            Self::CardSides(_) => "CardRender.CardSides",
            Self::ImageRotation(_) => "CardRender.ImageRotation",
            Self::ImageQuality(_) => "CardRender.ImageQuality",
            Self::OutputMode(_) => "CardRender.OutputMode",
        }
    }

    pub fn value(&self) -> String {
        match self {
            Self::InputHopper(h) => h.keyword().to_string(),
            Self::RenderEnable(on) => on.to_string(),
            Self::CardSides(s) => s.keyword().to_string(),
            Self::ImageRotation(r) => r.keyword().to_string(),
            Self::ImageQuality(q) => q.to_string(),
            Self::OutputMode(m) => m.keyword().to_string(),
        }
    }
}
