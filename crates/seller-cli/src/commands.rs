use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::Local;
use tracing::{debug, info, warn};

use seller_cli::ImportController;
use seller_common::{ErrorReport, ErrorReporter, ReportSink, TracingSink};
use seller_ingest::{FileInfo, RawFile, safe_parse_bytes, validate_file};
use seller_model::{CsvConfig, CsvConfigOverrides, ImportError, ImportKind, Record};
use seller_report::{PerformanceReport, write_export, write_template};
use seller_transform::{schemas, transform_rows, verify_transformed};

use crate::cli::{CheckArgs, ImportArgs, ReportArgs, TemplateArgs, TimeFrameArg};
use crate::summary::{print_issues, print_messages, print_preview, print_receipt};

pub fn run_import(args: &ImportArgs) -> Result<()> {
    let kind = ImportKind::from(args.kind);
    let config = load_config(args.config.as_deref())?;
    let (mut reporter, handle) = ErrorReporter::new(TracingSink);
    let mut controller = ImportController::new(kind, config, handle.clone());

    let selected = controller.select(&args.files);
    flush_reports(&mut reporter);
    let rows = selected.context("select import file")?;
    debug!(rows, "preview ready");
    if !args.json
        && let Some(preview) = controller.preview()
    {
        print_preview(preview);
    }

    if matches!(args.time_frame, Some(TimeFrameArg::Custom))
        && (args.start.is_none() || args.end.is_none())
    {
        bail!("--start and --end are required with --time-frame custom");
    }
    let time_frame = args
        .time_frame
        .and_then(|time_frame| time_frame.resolve(args.start, args.end));

    let schema = schemas::for_kind(kind);
    let mut transformed = None;
    let confirmed = controller.confirm(time_frame, |rows, time_frame| {
        info!(rows = rows.len(), time_frame = time_frame.name(), "transforming rows");
        let result = transform_rows(rows, &schema);
        if let Ok(records) = &result {
            let original: Vec<Record> = rows.iter().map(Record::from).collect();
            for message in verify_transformed(&original, records).errors() {
                warn!("{message}");
            }
        }
        transformed = Some(result);
    });
    flush_reports(&mut reporter);
    let receipt = confirmed.context("confirm import")?;

    let records = match transformed {
        Some(Ok(records)) => records,
        Some(Err(err)) => {
            let import_error = ImportError::from(err.clone());
            handle.report(
                ErrorReport::from_import_error(&import_error, "CsvImport")
                    .with_action("transformRecords"),
            );
            flush_reports(&mut reporter);
            return Err(err).context("transform imported rows");
        }
        None => bail!("import callback did not run"),
    };

    if let Some(path) = &args.export {
        let headers: Vec<&str> = schema.names().collect();
        write_export(path, &headers, &records)?;
        println!("Export: {}", path.display());
    }

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&records).context("serialize records")?
        );
    } else {
        print_receipt(kind, &receipt, records.len());
    }
    Ok(())
}

pub fn run_template(args: &TemplateArgs) -> Result<()> {
    let kind = ImportKind::from(args.kind);
    let dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));
    let name = args.name.as_deref().or(kind.template_name());
    let path = write_template(&dir, kind.template_headers(), name)?;
    println!("Template: {}", path.display());
    Ok(())
}

/// Returns whether the file passed validation.
pub fn run_check(args: &CheckArgs) -> Result<bool> {
    let config = load_config(args.config.as_deref())?;
    let info = FileInfo::from_path(&args.file)?;
    let file_check = validate_file(&info, &config);
    let result = if file_check.is_valid() {
        let raw = RawFile::read(&args.file)?;
        file_check.merge(safe_parse_bytes(&raw.bytes, &config).validation)
    } else {
        file_check
    };
    print_issues(&info.name, &result);
    Ok(result.is_valid())
}

pub fn run_report(args: &ReportArgs) -> Result<PathBuf> {
    let config = CsvConfig::default();
    let raw = RawFile::read(&args.file)?;
    let file_check = validate_file(&raw.info, &config);
    if !file_check.is_valid() {
        bail!("{}", file_check.errors().join("; "));
    }
    let parsed = safe_parse_bytes(&raw.bytes, &config);
    if !parsed.validation.is_valid() {
        bail!("{}", parsed.validation.errors().join("; "));
    }

    let records = transform_rows(&parsed.data.rows, &schemas::ppc_campaign())
        .context("transform campaign rows")?;
    let report = PerformanceReport::from_records(
        &records,
        args.title.as_str(),
        args.period.as_str(),
        Local::now().date_naive(),
    );
    let path = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(report.file_name()));
    report.write(&path)?;
    println!("Report: {}", path.display());
    Ok(path)
}

fn load_config(path: Option<&Path>) -> Result<CsvConfig> {
    match path {
        Some(path) => {
            let overrides = CsvConfigOverrides::load(path)?;
            debug!(path = %path.display(), "loaded config overrides");
            Ok(CsvConfig::from_overrides(&overrides))
        }
        None => Ok(CsvConfig::default()),
    }
}

/// Delivers queued reports and prints any user notifications.
fn flush_reports<S: ReportSink>(reporter: &mut ErrorReporter<S>) {
    reporter.pump();
    print_messages("Notice", &reporter.take_notifications());
}
