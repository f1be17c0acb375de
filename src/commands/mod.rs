pub mod serve;
pub mod validate;

use std::io::{self, Write};
use std::path::Path;

use rustyrpcmock::config::{load_config, loader::get_config_path_cwd, ConfigError, Configuration};
use tracing::error;

/// Writes schema violations one per line. Other errors produce no output.
pub fn report_violations(out: &mut impl Write, err: &ConfigError) -> io::Result<()> {
    if let ConfigError::Invalid { violations, .. } = err {
        writeln!(out, "Config is not valid. see errors :")?;
        for violation in violations {
            writeln!(out, "- {violation}")?;
        }
    }
    Ok(())
}

/// Loads the configuration, listing schema violations on stdout.
pub fn load_or_report(config_arg: &Path) -> Result<Configuration, ConfigError> {
    let path = get_config_path_cwd(config_arg);
    load_config(&path).inspect_err(|err| {
        if let Err(io_err) = report_violations(&mut io::stdout().lock(), err) {
            error!("Failed to print violations: {}", io_err);
        }
    })
}
