//! YAML Export functionality
//!
//! Exports the complete state to YAML for a human-readable dump.

use std::io::Write;

use crate::error::{FlowError, FlowResult};
use crate::export::json::FullExport;
use crate::storage::Storage;

/// Export the full state to YAML
pub fn export_full_yaml<W: Write + ?Sized>(storage: &Storage, writer: &mut W) -> FlowResult<()> {
    let export = FullExport::from_storage(storage)?;

    writeln!(writer, "# FinanceFlow Full Export").map_err(|e| FlowError::Export(e.to_string()))?;
    writeln!(writer, "# Generated: {}", export.exported_at)
        .map_err(|e| FlowError::Export(e.to_string()))?;
    writeln!(writer, "# App Version: {}", export.app_version)
        .map_err(|e| FlowError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| FlowError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &export).map_err(|e| FlowError::Export(e.to_string()))?;

    Ok(())
}

/// Parse and validate a YAML export
pub fn read_yaml_export(yaml_str: &str) -> FlowResult<FullExport> {
    let export: FullExport =
        serde_yaml::from_str(yaml_str).map_err(|e| FlowError::Export(e.to_string()))?;
    export.validate().map_err(FlowError::Export)?;
    Ok(export)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, NewGoal};
    use crate::services::{BudgetService, GoalService};

    #[test]
    fn test_yaml_export() {
        let storage = Storage::in_memory();
        BudgetService::new(&storage)
            .add_fixed_expense("Rent", Money::from_dollars(300))
            .unwrap();
        GoalService::new(&storage)
            .add_goal(NewGoal::new("Laptop", Money::from_dollars(1200)))
            .unwrap();

        let mut buffer = Vec::new();
        export_full_yaml(&storage, &mut buffer).unwrap();
        let yaml = String::from_utf8(buffer).unwrap();

        assert!(yaml.starts_with("# FinanceFlow Full Export"));
        assert!(yaml.contains("schema_version"));
        assert!(yaml.contains("Rent"));

        let parsed = read_yaml_export(&yaml).unwrap();
        assert_eq!(parsed.goals[0].name, "Laptop");
        assert_eq!(parsed.settings.fixed_expenses.len(), 1);
    }

    #[test]
    fn test_yaml_rejects_garbage() {
        assert!(read_yaml_export("not: [valid").is_err());
    }
}
