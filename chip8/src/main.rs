use clap::Parser;

use crate::config::Settings;

mod audio;
mod config;
mod keymap;
mod pacer;
mod run;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = Settings::parse();
    run::run(settings)
}
