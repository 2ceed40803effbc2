//! Command implementations.

use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::info;

use bcm_cli::render::{fields_table, headers_table};
use bcm_ingest::{AuthContext, CsvUpload, HttpIngestClient, IngestBackend};
use bcm_model::{BufferedSink, FieldId, HeaderId, Platform, TargetSchema};
use bcm_wizard::{IngestOutcome, MigrationSession};

use crate::cli::{FieldsArgs, HeadersArgs, PlanArgs};

pub fn run_fields(args: &FieldsArgs) -> Result<()> {
    let schema = TargetSchema::bigcommerce();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&schema)?);
    } else {
        println!("{}", fields_table(&schema));
        println!(
            "{} fields, {} required",
            schema.total_field_count(),
            schema.required_field_ids().len()
        );
    }
    Ok(())
}

fn auth_from_token(token: Option<&str>) -> AuthContext {
    match token {
        Some(token) => AuthContext::with_bearer(token),
        None => AuthContext::anonymous(),
    }
}

pub fn run_headers(args: &HeadersArgs) -> Result<()> {
    let upload = CsvUpload::from_path(&args.file)
        .with_context(|| format!("reading {}", args.file.display()))?;
    let client = HttpIngestClient::new(&args.url)?;
    let auth = auth_from_token(args.token.as_deref());

    let parsed = client
        .parse_csv(&auth, &upload)
        .context("parsing the CSV export")?;
    info!(columns = parsed.headers.len(), "columns discovered");

    if args.json {
        println!("{}", serde_json::to_string_pretty(&parsed.headers)?);
    } else {
        println!("{}", headers_table(&parsed.headers));
        if !parsed.message.is_empty() {
            println!("{}", parsed.message);
        }
    }
    Ok(())
}

/// Parse a `<field>=<header>` assignment.
fn parse_assignment(raw: &str) -> Result<(FieldId, HeaderId)> {
    let Some((field, header)) = raw.split_once('=') else {
        bail!("invalid assignment {raw:?}, expected <field>=<header>");
    };
    let field = FieldId::new(field).with_context(|| format!("in assignment {raw:?}"))?;
    let header = HeaderId::new(header).with_context(|| format!("in assignment {raw:?}"))?;
    Ok((field, header))
}

/// Run a scripted migration. Returns true when every required field ended
/// up mapped.
pub fn run_plan(args: &PlanArgs) -> Result<bool> {
    let platform = Platform::parse(&args.platform);
    if !platform.is_valid() {
        bail!("a non-blank platform name is required");
    }

    let mut session = MigrationSession::new(TargetSchema::bigcommerce(), BufferedSink::new());
    session.select_platform(platform)?;
    session.continue_to_upload()?;
    session.select_file(CsvUpload::from_path(&args.file)?)?;

    let client = HttpIngestClient::new(&args.url)?;
    let auth = auth_from_token(args.token.as_deref());
    let outcome = session.ingest(&client, &auth)?;
    report_notices(&mut session);
    match outcome {
        IngestOutcome::Loaded { columns } => {
            info!(columns, file = %args.file.display(), "CSV ingested");
        }
        IngestOutcome::Failed(error) => return Err(error.into()),
        IngestOutcome::Discarded => bail!("ingestion result was discarded"),
    }

    for raw in &args.assign {
        let (field, header) = parse_assignment(raw)?;
        session
            .map_header(&field, &header)
            .with_context(|| format!("applying assignment {raw:?}"))?;
    }
    report_notices(&mut session);

    print_plan_summary(&session, &args.file);
    Ok(session.can_continue())
}

fn report_notices(session: &mut MigrationSession<BufferedSink>) {
    for notice in session.sink_mut().drain() {
        eprintln!("[{}] {}", notice.severity, notice.message);
    }
}

fn print_plan_summary(session: &MigrationSession<BufferedSink>, file: &Path) {
    println!("File: {}", file.display());
    if let Some(platform) = session.wizard().platform() {
        println!("Platform: {platform}");
    }
    println!(
        "Mapped {}/{} fields ({:.0}%)",
        session.mapped_count(),
        session.total_field_count(),
        session.progress() * 100.0
    );
    for (field, header) in session.table().bindings() {
        println!("  {field} <- {} ({})", header.id, header.label);
    }
    let unmapped = session.pool().snapshot();
    if !unmapped.is_empty() {
        println!("Unmapped columns:");
        for header in unmapped {
            println!("  {} ({})", header.id, header.label);
        }
    }
    let missing = session.missing_required_fields();
    if missing.is_empty() {
        println!("All required fields are mapped.");
    } else {
        let names: Vec<&str> = missing.iter().map(FieldId::as_str).collect();
        println!("Missing required fields: {}", names.join(", "));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assignment_parses_field_and_header() {
        let (field, header) = parse_assignment("sku=header_1").unwrap();
        assert_eq!(field.as_str(), "sku");
        assert_eq!(header.as_str(), "header_1");
    }

    #[test]
    fn assignment_without_equals_is_rejected() {
        assert!(parse_assignment("sku").is_err());
        assert!(parse_assignment("=header_1").is_err());
    }
}
