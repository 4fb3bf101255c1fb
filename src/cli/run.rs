use anyhow::Result;

use super::{
    args::{Arguments, Command, GenerateCommand},
    commands::{check::check, generate::generate, init::init},
    exit_status::ExitStatus,
};

/// Dispatch to the command handler. No command means `generate` to stdout.
pub fn run(Arguments { command, common }: Arguments) -> Result<ExitStatus> {
    match command {
        Some(Command::Generate(cmd)) => generate(&cmd, &common),
        Some(Command::Check(cmd)) => check(&cmd, &common),
        Some(Command::Init) => init(),
        None => generate(&GenerateCommand::default(), &common),
    }
}
