use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use slide_labeler::cli::{self, NumbererArgs};
use slide_labeler::{logging, numberer};

fn main() -> Result<()> {
    let started = Utc::now();
    logging::init();
    let args = NumbererArgs::parse_from(cli::os_args());
    numberer::run(&args, started)
}
