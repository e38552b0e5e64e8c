use std::path::PathBuf;

use clap::Parser;

use aoc_fetch::service::{ADVENT_OF_CODE_URL, DEFAULT_OUTPUT_DIR, DEFAULT_YEAR};

/// Downloads Advent of Code puzzle inputs into `<output-dir>/day<d>/input.txt`. Without `--day`
/// the day is asked for interactively: a number picks that day, anything else all days 1 to 24.
#[derive(Parser)]
pub(crate) struct Cli {
  /// The value of the `session` cookie of a logged in browser. Usually kept in a `.env` file
  /// next to the project as `SESSION=<value>`.
  #[clap(long, env = "SESSION", hide_env_values = true)]
  pub(crate) session: Option<String>,
  /// Download only this day and skip the prompt.
  #[clap(long, short)]
  pub(crate) day: Option<u32>,
  /// The event year.
  #[clap(long, short, default_value_t = DEFAULT_YEAR)]
  pub(crate) year: u32,
  /// Where the puzzles live. Only useful against a mirror or a test server.
  #[clap(long, default_value = ADVENT_OF_CODE_URL)]
  pub(crate) base_url: String,
  /// Directory holding the `day<d>` directories.
  #[clap(long, short, default_value = DEFAULT_OUTPUT_DIR)]
  pub(crate) output_dir: PathBuf,
  /// Create missing `day<d>` directories instead of failing that day.
  #[clap(long)]
  pub(crate) create_dirs: bool,
  /// Print a JSON summary of all days to stdout when done.
  #[clap(long)]
  pub(crate) json: bool,
  /// Debug logging on stderr.
  #[clap(long, short)]
  pub(crate) verbose: bool,
}
