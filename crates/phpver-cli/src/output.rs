use anyhow::{Context, Result};
use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::{self, Write};

const GITHUB_OUTPUT_ENV: &str = "GITHUB_OUTPUT";
const MULTILINE_DELIMITER: &str = "PHPVER_EOF";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// GitHub Actions step outputs
    Github,
    /// A single JSON object
    Json,
    /// Human-readable summary
    Text,
}

/// Everything a run produces
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Outputs {
    pub composer_php_version: String,
    pub matrix: Vec<String>,
    pub minimal: String,
    pub latest: String,
}

impl Outputs {
    fn pairs(&self) -> Result<Vec<(&'static str, String)>> {
        Ok(vec![
            ("composer-php-version", self.composer_php_version.clone()),
            ("matrix", serde_json::to_string(&self.matrix)?),
            ("minimal", self.minimal.clone()),
            ("latest", self.latest.clone()),
        ])
    }
}

/// Emit `outputs` in the requested format
pub fn emit(outputs: &Outputs, format: OutputFormat) -> Result<()> {
    let stdout = io::stdout();
    match format {
        OutputFormat::Github => match std::env::var_os(GITHUB_OUTPUT_ENV) {
            Some(path) => {
                log::debug!("Appending step outputs to {}", path.to_string_lossy());
                let mut file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&path)
                    .with_context(|| {
                        format!("Failed to open {}", path.to_string_lossy())
                    })?;
                write_github(outputs, &mut file)
            }
            None => write_github(outputs, &mut stdout.lock()),
        },
        OutputFormat::Json => write_json(outputs, &mut stdout.lock()),
        OutputFormat::Text => write_text(outputs, &mut stdout.lock()),
    }
}

/// Report a failure on stderr
pub fn report_error(error: &anyhow::Error, format: OutputFormat) {
    match format {
        OutputFormat::Github => eprintln!("::error::{}", escape_command_data(&error.to_string())),
        _ => {
            eprintln!("{} {}", "Error:".red().bold(), error);
            for cause in error.chain().skip(1) {
                eprintln!("  Caused by: {}", cause);
            }
        }
    }
}

/// `key=value` lines as understood by `$GITHUB_OUTPUT`
pub fn write_github<W: Write>(outputs: &Outputs, out: &mut W) -> Result<()> {
    for (key, value) in outputs.pairs()? {
        if value.contains('\n') {
            writeln!(out, "{key}<<{MULTILINE_DELIMITER}")?;
            writeln!(out, "{value}")?;
            writeln!(out, "{MULTILINE_DELIMITER}")?;
        } else {
            writeln!(out, "{key}={value}")?;
        }
    }
    out.flush()?;
    Ok(())
}

pub fn write_json<W: Write>(outputs: &Outputs, out: &mut W) -> Result<()> {
    serde_json::to_writer(&mut *out, outputs)?;
    writeln!(out)?;
    Ok(())
}

pub fn write_text<W: Write>(outputs: &Outputs, out: &mut W) -> Result<()> {
    writeln!(
        out,
        "{:<16} {}",
        "PHP requirement".bold(),
        outputs.composer_php_version.cyan()
    )?;
    writeln!(out, "{:<16} {}", "Matrix".bold(), outputs.matrix.join(", "))?;
    writeln!(out, "{:<16} {}", "Minimal".bold(), outputs.minimal.green())?;
    writeln!(out, "{:<16} {}", "Latest".bold(), outputs.latest.green())?;
    Ok(())
}

/// Escape a workflow command payload
fn escape_command_data(data: &str) -> String {
    data.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
