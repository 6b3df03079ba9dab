// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Console workflows.
//
// `run` is the end-to-end walkthrough: take the first organization, profile
// and print destination, submit one card request, then show the job.
// Taking the first entry is a walkthrough shortcut only.

use std::io::{self, Write};
use std::time::Duration;

use tracing::{info, instrument};

use cardserv_client::{
    CardServicesClient, CardTypeChoice, DemoParameterSource, FilledParameter, JobPoller,
    PreparedRequest, select_first,
};
use cardserv_core::config::Settings;
use cardserv_core::error::Result;
use cardserv_core::options::{CardSides, Hopper, ImageRotation, OutputMode, ServiceOption};
use cardserv_core::types::{JobId, Organization};

use crate::report;

/// Options for the walkthrough.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub card_type: CardTypeChoice,
    /// Render the card image without printing it.
    pub render_only: bool,
    /// Poll the submitted job until it finishes.
    pub wait: bool,
}

impl RunOptions {
    /// Service options for the walkthrough request.  The hopper override is
    /// always sent; the render settings only with `render_only`.
    pub fn service_options(&self) -> Vec<ServiceOption> {
        let mut options = vec![ServiceOption::InputHopper(Hopper::Hopper1)];
        if self.render_only {
            options.extend([
                ServiceOption::RenderEnable(true),
                ServiceOption::CardSides(CardSides::FrontAndBack),
                ServiceOption::ImageRotation(ImageRotation::Clockwise90),
                ServiceOption::ImageQuality(1),
                ServiceOption::OutputMode(OutputMode::RenderOnly),
            ]);
        }
        options
    }
}

/// End-to-end walkthrough.  Returns the submitted job id, or `None` when
/// the account has nothing to submit against.
#[instrument(skip_all)]
pub async fn run(
    client: &CardServicesClient,
    settings: &Settings,
    options: &RunOptions,
    out: &mut impl Write,
) -> Result<Option<JobId>> {
    let orgs = client.get_organizations().await?;
    if orgs.is_empty() {
        writeln!(out, "No organizations found")?;
        return Ok(None);
    }
    writeln!(out, "Available organizations")?;
    for org in &orgs {
        writeln!(out, "  {} -> {}", org.organization_id, org.name)?;
    }
    writeln!(out)?;
    let Some(org) = select_first(orgs) else {
        return Ok(None);
    };
    writeln!(out, "Using organization: {}", org.name)?;
    writeln!(out)?;
    write_units_and_locations(client, &org, out).await?;

    let profiles = client.get_production_profiles(&org.organization_id).await?;
    if profiles.is_empty() {
        writeln!(out, "No production profiles found")?;
        return Ok(None);
    }
    writeln!(out, "Available production profiles")?;
    for profile in &profiles {
        writeln!(out, "  {} -> {}", profile.profile_id, profile.name)?;
    }
    writeln!(out)?;
    let Some(profile) = select_first(profiles) else {
        return Ok(None);
    };
    writeln!(out, "Using production profile: {}", profile.name)?;
    writeln!(out)?;

    let destinations = client.get_print_destinations(&org.organization_id).await?;
    if destinations.is_empty() {
        writeln!(out, "No print destinations found")?;
        return Ok(None);
    }
    writeln!(out, "Available print destinations")?;
    for destination in &destinations {
        writeln!(out, "  {} -> {}", destination.destination, destination.printer_name)?;
    }
    writeln!(out)?;
    let Some(destination) = select_first(destinations) else {
        return Ok(None);
    };
    writeln!(out, "Using print destination: {}", destination.destination)?;
    writeln!(out)?;

    let mut request = client
        .production_request(profile.profile_id)
        .card_type(options.card_type.clone())
        .destination(destination.destination)
        .request_name(settings.request_name.clone());
    for option in options.service_options() {
        request = request.option(option);
    }

    let source = DemoParameterSource::new(&settings.image_path);
    let prepared = request.prepare(&source).await?;
    write_prepared(out, &prepared)?;

    let job_id = client.submit_production_request(&prepared.template).await?;
    writeln!(out)?;
    writeln!(out, "Job submitted successfully. Job unique Id = {job_id}")?;
    info!(%job_id, "walkthrough job submitted");

    recent(client, 100, Duration::from_secs(24 * 60 * 60), out).await?;

    writeln!(out)?;
    writeln!(out, "Retrieving job details")?;
    writeln!(out)?;
    let job = if options.wait {
        JobPoller::from_settings(settings)
            .wait(client, &job_id)
            .await?
    } else {
        client.get_job(&job_id).await?
    };
    report::write_job_details(out, &job)?;
    Ok(Some(job_id))
}

fn write_prepared(out: &mut impl Write, prepared: &PreparedRequest) -> io::Result<()> {
    writeln!(out, "Available card types")?;
    for card_type in &prepared.card_types {
        writeln!(out, "  '{card_type}'")?;
    }
    writeln!(out)?;
    writeln!(out, "Selecting CardType: {}", prepared.card_type)?;
    writeln!(out)?;
    writeln!(out, "Configuring the production request")?;
    writeln!(out)?;
    writeln!(out, "Configuring service parameters")?;
    for (i, parameter) in prepared.parameters.iter().enumerate() {
        match parameter {
            FilledParameter::Text { name, value } => {
                writeln!(out, "  Param[{i}] (Text): {name} -> {value}")?;
            }
            FilledParameter::Image {
                name,
                preferred_width,
                preferred_height,
            } => writeln!(
                out,
                "  Param[{i}] (Image): {name} (Pref Size: {preferred_width}x{preferred_height} pixels)"
            )?,
        }
    }
    Ok(())
}

async fn write_units_and_locations(
    client: &CardServicesClient,
    org: &Organization,
    out: &mut impl Write,
) -> Result<()> {
    let id = &org.organization_id;
    writeln!(out, "Organizational Units for Organization {id}")?;
    for unit in client.get_organizational_units(id).await? {
        writeln!(out, "  {} -> {}", unit.organization_unit_id, unit.name)?;
    }
    writeln!(out)?;

    writeln!(out, "Locations for Organization {id}")?;
    for location in client.get_organization_locations(id).await? {
        writeln!(out, "  {} -> {}", location.location_id, location.location_name)?;
    }
    writeln!(out)?;
    Ok(())
}

/// Print every organization with its units, locations, devices, profiles
/// and print destinations.
#[instrument(skip_all)]
pub async fn list_hierarchy(client: &CardServicesClient, out: &mut impl Write) -> Result<()> {
    let orgs = client.get_organizations().await?;
    if orgs.is_empty() {
        writeln!(out, "No organizations are visible to this API key.")?;
        return Ok(());
    }

    for org in &orgs {
        writeln!(out, "{} [{}]", org.name, org.organization_id)?;
        for unit in client.get_organizational_units(&org.organization_id).await? {
            writeln!(out, "  unit      {} [{}]", unit.name, unit.organization_unit_id)?;
            for location in client
                .get_organizational_unit_locations(&unit.organization_unit_id)
                .await?
            {
                writeln!(out, "    location {} [{}]", location.location_name, location.location_id)?;
            }
        }
        for location in client
            .get_organization_locations(&org.organization_id)
            .await?
        {
            writeln!(out, "  location  {} [{}]", location.location_name, location.location_id)?;
        }
        for device in client.get_devices(Some(&org.organization_id)).await? {
            writeln!(out, "  device    {} [{}]", device.device_name, device.device_unique_id)?;
        }
        for profile in client.get_production_profiles(&org.organization_id).await? {
            writeln!(out, "  profile   {} [{}]", profile.name, profile.profile_id)?;
        }
        for destination in client.get_print_destinations(&org.organization_id).await? {
            writeln!(
                out,
                "  printer   {} -> {}",
                destination.printer_name, destination.destination
            )?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Summaries of jobs submitted within `period`.
pub async fn recent(
    client: &CardServicesClient,
    limit: u32,
    period: Duration,
    out: &mut impl Write,
) -> Result<()> {
    let jobs = client.get_jobs_for_time_period(limit, period).await?;
    writeln!(out)?;
    writeln!(out, "Recent job details ({})", jobs.len())?;
    writeln!(out)?;
    for job in &jobs {
        report::write_job_summary(out, job)?;
    }
    Ok(())
}

/// Full details of one job.
pub async fn show_job(client: &CardServicesClient, id: &JobId, out: &mut impl Write) -> Result<()> {
    let job = client.get_job(id).await?;
    report::write_job_details(out, &job)?;
    Ok(())
}

/// Poll a job to completion, printing each status change.
pub async fn wait_for_job(
    client: &CardServicesClient,
    settings: &Settings,
    id: &JobId,
    out: &mut impl Write,
) -> Result<()> {
    let mut last = None;
    let mut lines = Vec::new();
    let job = JobPoller::from_settings(settings)
        .wait_with(client, id, |job| {
            if last != Some(job.job_status) {
                last = Some(job.job_status);
                lines.push(format!("Status: {}", job.job_status));
            }
        })
        .await?;
    for line in lines {
        writeln!(out, "{line}")?;
    }
    writeln!(out)?;
    report::write_job_details(out, &job)?;
    Ok(())
}
