mod cli;

use crate::cli::CliConfig;
use clap::{crate_name, Parser};
use figment::Figment;
use jotathought::app_setup::build_rocket;
use jotathought::config::figment::FigmentExt;
use jotathought::error_exit;
use jotathought::logging::init_logging;
use log::info;

fn main() {
    init_logging();

    info!("{} starting up", crate_name!());

    let cli_config = CliConfig::parse();
    if !cli_config.config_file.exists() {
        error_exit!(
            "configuration file at {} does not exist",
            cli_config.config_file.display()
        )
    }
    let figment = Figment::from(rocket::Config::default())
        .setup_app_config(cli_config.config_file);
    let rocket = build_rocket(figment)
        .unwrap_or_else(|e| error_exit!("failed to load config: {e}"));

    let result = rocket::execute(rocket.launch());
    if let Err(e) = result {
        error_exit!("failed to launch rocket: {}", e);
    }
}
