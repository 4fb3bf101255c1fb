use std::{
    fs,
    io::{self, Write},
};

use anyhow::{Context, Result};

use super::super::{
    args::{CommonArgs, GenerateCommand},
    exit_status::ExitStatus,
    report,
};
use super::helper::generate_output;

pub fn generate(cmd: &GenerateCommand, common: &CommonArgs) -> Result<ExitStatus> {
    let output = generate_output(common)?;

    match &cmd.output {
        Some(path) => {
            fs::write(path, &output)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            report::print_success(&format!("Wrote {}", path.display()));
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(output.as_bytes())
                .context("Failed to write to stdout")?;
            stdout.flush().context("Failed to write to stdout")?;
        }
    }

    Ok(ExitStatus::Success)
}
