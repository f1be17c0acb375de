use std::{error::Error, path::Path};

use tracing::info;

pub fn run(config_arg: &Path) -> Result<(), Box<dyn Error>> {
    let config = super::load_or_report(config_arg)?;
    let entries: usize = config.handlers.iter().map(|h| h.result.len()).sum();
    info!(handlers = config.handlers.len(), entries, "configuration is valid");
    println!(
        "Configuration is valid ({} handlers, {} result entries)",
        config.handlers.len(),
        entries
    );
    Ok(())
}
