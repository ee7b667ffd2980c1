//! Month rollover command

use tracing::warn;

use crate::backup::BackupManager;
use crate::config::paths::FlowPaths;
use crate::config::settings::Settings;
use crate::display;
use crate::error::{FlowError, FlowResult};
use crate::models::MonthPeriod;
use crate::services::RolloverService;
use crate::storage::Storage;

/// Close a month: archive it, settle the wants budget and update the bank
pub fn handle_rollover_command(
    storage: &Storage,
    paths: &FlowPaths,
    settings: &Settings,
    month: Option<&str>,
    no_backup: bool,
) -> FlowResult<()> {
    let period = month
        .map(|m| MonthPeriod::parse(m).map_err(|e| FlowError::Validation(e.to_string())))
        .transpose()?;

    let with_backup = settings.backup_before_rollover && !no_backup;
    let mut service = RolloverService::new(storage);
    if with_backup {
        service = service.with_backup(BackupManager::new(
            paths.backup_dir(),
            settings.backup_retention.clone(),
        ));
    }

    let report = service.reset_month(period)?;
    print!(
        "{}",
        display::format_rollover_report(&report, &settings.currency_symbol)
    );

    if with_backup {
        let manager = BackupManager::new(paths.backup_dir(), settings.backup_retention.clone());
        if let Err(e) = manager.enforce_retention() {
            warn!(error = %e, "Failed to prune old backups");
        }
    }

    Ok(())
}
