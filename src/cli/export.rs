//! CLI commands for data export

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::Subcommand;

use crate::error::{FlowError, FlowResult};
use crate::export::{csv, json, yaml};
use crate::storage::Storage;

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Full state as JSON
    Json {
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Full state as YAML
    Yaml {
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Active transactions, or the monthly archive, as CSV
    Csv {
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Export the monthly archive instead of the active month
        #[arg(long)]
        archive: bool,
    },
}

/// Handle export commands
pub fn handle_export_command(storage: &Storage, cmd: ExportCommands) -> FlowResult<()> {
    match cmd {
        ExportCommands::Json { output, pretty } => {
            write_output(output.as_ref(), |w| json::export_full_json(storage, w, pretty))
        }
        ExportCommands::Yaml { output } => {
            write_output(output.as_ref(), |w| yaml::export_full_yaml(storage, w))
        }
        ExportCommands::Csv { output, archive } => write_output(output.as_ref(), |w| {
            if archive {
                csv::export_archive_csv(storage, w)
            } else {
                csv::export_transactions_csv(storage, w)
            }
        }),
    }
}

fn write_output<F>(output: Option<&PathBuf>, export: F) -> FlowResult<()>
where
    F: FnOnce(&mut dyn Write) -> FlowResult<()>,
{
    match output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                FlowError::Export(format!("Failed to create {}: {}", path.display(), e))
            })?;
            let mut writer = BufWriter::new(file);
            export(&mut writer)?;
            writer
                .flush()
                .map_err(|e| FlowError::Export(e.to_string()))?;
            println!("Exported to {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            export(&mut writer)?;
            writeln!(writer).map_err(|e| FlowError::Export(e.to_string()))?;
        }
    }
    Ok(())
}
