use anyhow::Context;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use sweeper_core::Records;

/// Reads records from `path`, starting empty when the file does not exist yet.
pub fn load(path: &Path) -> anyhow::Result<Records> {
    let json = match fs::read_to_string(path) {
        Ok(json) => json,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            log::info!("No records at {}, starting fresh", path.display());
            return Ok(Records::default());
        }
        Err(err) => {
            return Err(err).with_context(|| format!("Could not read {}", path.display()));
        }
    };
    serde_json::from_str(&json).with_context(|| format!("Could not parse {}", path.display()))
}

pub fn save(path: &Path, records: &Records) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(records)?;
    fs::write(path, json).with_context(|| format!("Could not write {}", path.display()))?;
    log::debug!("Saved records to {}", path.display());
    Ok(())
}
