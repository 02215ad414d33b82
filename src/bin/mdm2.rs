use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use slide_labeler::cli::{self, LabelerArgs};
use slide_labeler::{labeler, logging};

fn main() -> Result<()> {
    let started = Utc::now();
    logging::init();
    let args = LabelerArgs::parse_from(cli::os_args());
    labeler::run(&args, started)
}
