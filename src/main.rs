mod cli;
mod logging;

use std::io::{self, Write};

use cli::Cli;

use aoc_fetch::{run, Day, DaySelection, Error, InputDownloadService, Summary};
use clap::Parser;
use reqwest::Client;

#[tokio::main]
async fn main() {
  // `.env` has to be loaded before parsing so `SESSION` can come from it.
  dotenvy::dotenv().ok();
  let cli = Cli::parse();
  logging::init_logging(cli.verbose);

  match fetch(cli).await {
    Ok(summary) if summary.failed() == 0 => {}
    Ok(_) => std::process::exit(1),
    Err(error) => {
      eprintln!("aoc-fetch error: {error}");
      std::process::exit(1);
    }
  }
}

async fn fetch(cli: Cli) -> Result<Summary, Error> {
  let Cli {
    session,
    day,
    year,
    base_url,
    output_dir,
    create_dirs,
    json,
    verbose: _,
  } = cli;

  let service = InputDownloadService { client: Client::new(), base_url, year, output_dir, create_dirs };

  let summary = run(&service, session, || match day {
    Some(day) => Ok(DaySelection::Single(Day(day))),
    None => prompt_selection(),
  })
  .await?;

  if json {
    println!("{json}", json = summary.to_json()?);
  }
  Ok(summary)
}

fn prompt_selection() -> Result<DaySelection, Error> {
  print!("Enter day:");
  io::stdout().flush()?;

  DaySelection::read_from(io::stdin().lock())
}
