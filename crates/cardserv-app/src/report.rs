// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Console rendering of jobs and card-read results.

use std::io::{self, Write};

use chrono::{DateTime, Local, Utc};

use cardserv_core::job::{CardEdge, Job, JobStatus, PacsDecodeResult};

fn local(ts: &DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string()
}

/// One-paragraph summary used in job listings.
pub fn write_job_summary(out: &mut impl Write, job: &Job) -> io::Result<()> {
    writeln!(out, "Job Name..............: {}", job.job_name)?;
    writeln!(out, "Job Status............: {}", job.job_status)?;
    writeln!(out, "Status Message........: {}", job.job_status_message)?;
    writeln!(out, "Date Submitted........: {}", local(&job.submit_date))?;
    writeln!(out)
}

/// Full job details, including card-read results once the job has printed.
pub fn write_job_details(out: &mut impl Write, job: &Job) -> io::Result<()> {
    writeln!(out, "Job Name..............: {}", job.job_name)?;
    writeln!(out, "Job Unique Id.........: {}", job.job_unique_id)?;
    writeln!(out, "Job Status............: {}", job.job_status)?;
    writeln!(out, "Status Message........: {}", job.job_status_message)?;
    writeln!(out, "Date Submitted........: {}", local(&job.submit_date))?;
    writeln!(out, "Last Updated..........: {}", local(&job.last_update))?;

    if job.job_status != JobStatus::Printed {
        return Ok(());
    }

    let edges = job
        .card_read_results()
        .map(|r| r.card_edges.as_slice())
        .unwrap_or_default();
    writeln!(out, "Card Read Results.....: {} Card Edge(s) Found", edges.len())?;
    for edge in edges {
        write_card_edge(out, edge)?;
    }
    Ok(())
}

fn write_card_edge(out: &mut impl Write, edge: &CardEdge) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "  Card Edge Type......: {}", edge.edge_type)?;
    writeln!(out, "  Card Protocol.......: {}", edge.card_protocol)?;
    writeln!(out, "  Card Edge Enabled...: {}", edge.enabled)?;
    writeln!(out, "  Card Read Status....: {}", edge.status)?;
    writeln!(out, "  Card Read Message...: {}", edge.status_message)?;
    writeln!(out, "  Card Serial Number..: {}", edge.card_serial_number)?;
    writeln!(out, "  PACS Data Available.: {}", edge.pacs_data_available)?;

    if edge.pacs_data_available {
        writeln!(
            out,
            "  PACS Bit Data.......: 0x{}",
            edge.card_pacs_bit_data.as_deref().unwrap_or_default()
        )?;
        writeln!(out, "  PACS Bit Count......: {}", edge.card_pacs_bit_count)?;
        for decode in &edge.pacs_data {
            write_decode_result(out, decode)?;
        }
    }

    if !edge.data.is_empty() {
        writeln!(out)?;
        writeln!(out, "  Additional Data")?;
        for kv in &edge.data {
            writeln!(out, "    {} -> {}", kv.key, kv.value)?;
        }
    }
    Ok(())
}

// Field names come from the card format; only `card_number` is guaranteed.
fn write_decode_result(out: &mut impl Write, decode: &PacsDecodeResult) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "    Card Format.......: {}", decode.format_name)?;
    writeln!(out, "    Format Bit Count..: {}", decode.format_bit_count)?;
    writeln!(out, "    Decode Status.....: {}", decode.decode_status)?;
    writeln!(out, "    Status Message....: {}", decode.status_message)?;
    writeln!(
        out,
        "    Card Number.......: {}",
        decode.card_number.as_deref().unwrap_or_default()
    )?;
    writeln!(out, "    PACS Data Fields:")?;
    for field in &decode.pacs_fields {
        writeln!(out, "      {} -> {}", field.key, field.value)?;
    }
    Ok(())
}
