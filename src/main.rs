use std::io;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};

use desk_wm::config::{Cli, DeskConfig};
use desk_wm::drivers::console::{ConsoleInputDriver, ConsoleOutputDriver};
use desk_wm::runner::{DeskApp, run};
use desk_wm::tracing_sub;

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    let config = match DeskConfig::try_from(&cli) {
        Ok(config) => config,
        Err(err) => Cli::command().error(ErrorKind::ValueValidation, err).exit(),
    };
    tracing_sub::init(&config.log)?;

    let mut app = DeskApp::new(config);
    let mut input = ConsoleInputDriver::new();
    let mut output = ConsoleOutputDriver::new()?;
    run(&mut app, &mut input, &mut output)
}
