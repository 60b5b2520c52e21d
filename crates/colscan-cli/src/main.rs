use std::process::ExitCode;

mod command;
mod report;
mod util;
mod view;

fn main() -> anyhow::Result<ExitCode> {
    command::run()
}
