use std::{fs, io::ErrorKind};

use anyhow::{Context, Result};

use super::super::{
    args::{CheckCommand, CommonArgs},
    exit_status::ExitStatus,
    report,
};
use super::helper::generate_output;

/// Regenerate in memory and compare with the file on disk.
pub fn check(cmd: &CheckCommand, common: &CommonArgs) -> Result<ExitStatus> {
    let expected = generate_output(common)?;
    let path = &cmd.output;

    let current = match fs::read_to_string(path) {
        Ok(content) => Some(content),
        Err(err) if err.kind() == ErrorKind::NotFound => None,
        Err(err) => {
            return Err(err).with_context(|| format!("Failed to read {}", path.display()));
        }
    };

    match current {
        Some(content) if content == expected => {
            report::print_success(&format!("{} is up to date", path.display()));
            Ok(ExitStatus::Success)
        }
        Some(_) => {
            report::print_failure(&format!(
                "{} is out of date, run `srclist generate --output {}`",
                path.display(),
                path.display()
            ));
            Ok(ExitStatus::Failure)
        }
        None => {
            report::print_failure(&format!("{} does not exist", path.display()));
            Ok(ExitStatus::Failure)
        }
    }
}
