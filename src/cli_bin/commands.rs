//! CLI command handlers that bridge CLI arguments to library operations

use crate::cli_bin::args::*;
use anyhow::{Context, Result};
use log::{debug, info, warn};
use pagematter::{FileResolver, FrontMatterFormat, Page, PageReader, ResolverConfig};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Execute the split command
pub fn split_command(args: SplitArgs) -> Result<ExitCode> {
    debug!("Executing split command with args: {:?}", args);

    let files = resolve_files(&args.files)?;
    if files.is_empty() {
        warn!("No files found to process");
        return Ok(ExitCode::SUCCESS);
    }

    let reader = PageReader::new();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    for file in &files {
        let page = read_page(&reader, file)?;
        if files.len() > 1 {
            writeln!(out, "==> {} <==", file.display())?;
        }
        let bytes = match args.part {
            Part::FrontMatter => page.front_matter(),
            Part::Content => page.content(),
        };
        out.write_all(bytes)?;
        if files.len() > 1 && !bytes.ends_with(b"\n") {
            writeln!(out)?;
        }
    }

    out.flush()?;
    Ok(ExitCode::SUCCESS)
}

/// Execute the meta command
pub fn meta_command(args: MetaArgs) -> Result<ExitCode> {
    debug!("Executing meta command with args: {:?}", args);

    let files = resolve_files(&args.files)?;
    if files.is_empty() {
        warn!("No files found to process");
        return Ok(ExitCode::SUCCESS);
    }

    let reader = PageReader::new();
    let mut results = BTreeMap::new();

    for file in &files {
        let page = read_page(&reader, file)?;
        let value = match page
            .metadata()
            .with_context(|| format!("failed to decode front matter of {}", file.display()))?
        {
            Some(meta) => meta.to_json()?,
            None => {
                info!("No front matter in {}", file.display());
                serde_json::Value::Null
            }
        };
        results.insert(file.to_string_lossy().to_string(), value);
    }

    if files.len() == 1 {
        if let Some(value) = results.into_values().next() {
            output_value(&value, args.format, args.pretty)?;
        }
    } else {
        output_value(&serde_json::to_value(&results)?, args.format, args.pretty)?;
    }

    Ok(ExitCode::SUCCESS)
}

/// Outcome of checking one file
#[derive(Debug, Serialize)]
struct CheckReport {
    file: String,
    valid: bool,
    renderable: Option<bool>,
    format: Option<FrontMatterFormat>,
    front_matter_bytes: usize,
    content_bytes: usize,
    error: Option<String>,
}

impl CheckReport {
    fn new(file: &Path) -> Self {
        Self {
            file: file.to_string_lossy().to_string(),
            valid: false,
            renderable: None,
            format: None,
            front_matter_bytes: 0,
            content_bytes: 0,
            error: None,
        }
    }
}

/// Execute the check command
pub fn check_command(args: CheckArgs) -> Result<ExitCode> {
    debug!("Executing check command with args: {:?}", args);

    let files = resolve_files(&args.files)?;
    if files.is_empty() {
        warn!("No files found to process");
        return Ok(ExitCode::SUCCESS);
    }

    let reader = PageReader::new();
    let mut reports = Vec::with_capacity(files.len());

    for file in &files {
        debug!("Checking file: {}", file.display());
        let mut report = CheckReport::new(file);

        match reader.read_file(file) {
            Ok(page) => {
                report.renderable = Some(page.is_renderable());
                report.format = page.front_matter_format();
                report.front_matter_bytes = page.front_matter().len();
                report.content_bytes = page.content().len();
                report.valid = true;
                if args.decode {
                    if let Err(e) = page.metadata() {
                        report.valid = false;
                        report.error = Some(e.to_string());
                    }
                }
            }
            Err(e) => report.error = Some(e.to_string()),
        }

        reports.push(report);
    }

    output_check_reports(&reports, args.format)?;

    let failed = reports.iter().filter(|r| !r.valid).count();
    info!("Checked {} files, {} failed", reports.len(), failed);

    Ok(if failed == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn resolve_files(file_options: &CommonFileOptions) -> Result<Vec<PathBuf>> {
    let mut config = ResolverConfig {
        follow_links: file_options.follow_links,
        max_depth: file_options.max_depth,
        include_hidden: file_options.include_hidden,
        exclude_patterns: file_options.exclude_patterns.clone(),
        ..Default::default()
    };
    if !file_options.extensions.is_empty() {
        config.include_extensions = file_options
            .extensions
            .iter()
            .map(|ext| ext.trim_start_matches('.').to_lowercase())
            .collect();
    }

    let resolver = FileResolver::with_config(config)?;
    let resolved = resolver.resolve_paths(&file_options.files)?;
    Ok(resolved.into_iter().map(|f| f.into_path()).collect())
}

fn read_page(reader: &PageReader, file: &Path) -> Result<Page> {
    debug!("Processing file: {}", file.display());
    reader
        .read_file(file)
        .with_context(|| format!("failed to split {}", file.display()))
}

fn output_value(value: &serde_json::Value, format: OutputFormat, pretty: bool) -> Result<()> {
    match format {
        OutputFormat::Yaml => {
            print!("{}", serde_yaml::to_string(value)?);
        }
        OutputFormat::Json => {
            let output = if pretty {
                serde_json::to_string_pretty(value)?
            } else {
                serde_json::to_string(value)?
            };
            println!("{}", output);
        }
    }
    Ok(())
}

fn output_check_reports(reports: &[CheckReport], format: CheckFormat) -> Result<()> {
    match format {
        CheckFormat::Human => {
            for report in reports {
                match (&report.error, report.format) {
                    (Some(error), _) => println!("{}: ✗ ERROR - {}", report.file, error),
                    (None, Some(format)) => println!(
                        "{}: ✓ OK ({}, {} bytes of front matter)",
                        report.file, format, report.front_matter_bytes
                    ),
                    (None, None) if report.renderable == Some(false) => {
                        println!("{}: ✓ OK (raw markup)", report.file)
                    }
                    (None, None) => println!("{}: ✓ OK (no front matter)", report.file),
                }
            }
        }
        CheckFormat::Json => {
            let output = if reports.len() == 1 {
                serde_json::to_string_pretty(&reports[0])?
            } else {
                serde_json::to_string_pretty(reports)?
            };
            println!("{}", output);
        }
    }
    Ok(())
}
