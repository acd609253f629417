//! Interactive record collection.
//!
//! Prompt flow: identity fields, then participants until an empty name, the
//! six effort metrics (blank input means zero), then findings until an empty
//! description. A finding that fails vocabulary validation is reported and
//! discarded; the same sequence number is prompted again.

use std::io::{BufRead, Write};
use std::str::FromStr;

use anyhow::{Context, Result};
use inspeq_types::{Finding, InspectionRecord, MetricsUpdate};

pub fn collect_record(input: &mut impl BufRead, out: &mut impl Write) -> Result<InspectionRecord> {
    let bar = "=".repeat(80);
    writeln!(out, "{bar}")?;
    writeln!(out, "Inspection Report Generator - Interactive Mode")?;
    writeln!(out, "{bar}")?;
    writeln!(out)?;

    let inspection_id = prompt(input, out, "Inspection ID (e.g., I2-MOD123-2024-01): ")?;
    let inspection_type = prompt(input, out, "Inspection Type (I0/I1/I2/I3): ")?;
    let module_name = prompt(input, out, "Module/Component Name: ")?;

    let mut record = InspectionRecord::new(inspection_id, inspection_type, module_name);

    writeln!(out)?;
    writeln!(out, "Participants (press Enter with empty name to finish):")?;
    loop {
        let name = prompt(input, out, "  Name: ")?;
        if name.is_empty() {
            break;
        }
        let role = prompt(input, out, "  Role (Moderator/Designer/Coder/Tester): ")?;
        record.add_participant(name, role);
    }

    writeln!(out)?;
    writeln!(out, "Metrics:")?;
    record.update_metrics(MetricsUpdate {
        size_estimate_pre: Some(prompt_number(
            input,
            out,
            "  Size estimate (pre-inspection, ELOC): ",
        )?),
        size_estimate_post: Some(prompt_number(
            input,
            out,
            "  Size estimate (post-inspection, ELOC): ",
        )?),
        preparation_hours: Some(prompt_number(input, out, "  Preparation hours: ")?),
        meeting_hours: Some(prompt_number(input, out, "  Meeting hours: ")?),
        rework_hours: Some(prompt_number(input, out, "  Rework hours (estimate): ")?),
        followup_hours: Some(prompt_number(input, out, "  Follow-up hours (estimate): ")?),
    });

    writeln!(out)?;
    writeln!(out, "Errors (press Enter with empty description to finish):")?;
    let mut sequence = 1u32;
    loop {
        writeln!(out)?;
        writeln!(out, "  Error #{sequence}:")?;
        let description = prompt(input, out, "    Description: ")?;
        if description.is_empty() {
            break;
        }

        let location = prompt(input, out, "    Location (file:line): ")?;
        let error_type = prompt(input, out, "    Type (LO/IC/TB/DE/PR/etc.): ")?;
        let category = prompt(input, out, "    Category (M/W/E): ")?;
        let severity = prompt(input, out, "    Severity (MAJ/MIN): ")?;
        let resolution = prompt(input, out, "    Possible solution (optional): ")?;

        match Finding::new(
            sequence,
            location,
            &error_type,
            &category,
            &severity,
            description,
            resolution,
        ) {
            Ok(finding) => {
                record.add_finding(finding);
                sequence += 1;
            }
            Err(err) => {
                writeln!(out, "    {err}")?;
                writeln!(out, "    Finding discarded; please re-enter it.")?;
            }
        }
    }

    Ok(record)
}

fn prompt(input: &mut impl BufRead, out: &mut impl Write, label: &str) -> Result<String> {
    write!(out, "{label}")?;
    out.flush()?;
    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .context("read interactive input")?;
    if read == 0 {
        // EOF behaves like an empty entry, ending whichever loop is active.
        return Ok(String::new());
    }
    Ok(line.trim().to_string())
}

/// Numeric prompt: blank input means zero; unparseable input re-prompts.
fn prompt_number<T>(input: &mut impl BufRead, out: &mut impl Write, label: &str) -> Result<T>
where
    T: FromStr + Default,
{
    loop {
        let text = prompt(input, out, label)?;
        if text.is_empty() {
            return Ok(T::default());
        }
        match text.parse() {
            Ok(value) => return Ok(value),
            Err(_) => writeln!(out, "    Enter a number (or leave blank for 0).")?,
        }
    }
}
