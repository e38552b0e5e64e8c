use tracing_subscriber::EnvFilter;

/// Logs go to stderr so stdout only carries the download lines and `--json` output.
pub(crate) fn init_logging(verbose: bool) {
  let default_filter = if verbose { "aoc_fetch=debug" } else { "aoc_fetch=warn" };
  let env_filter =
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

  tracing_subscriber::fmt()
    .with_env_filter(env_filter)
    .with_writer(std::io::stderr)
    .with_target(false)
    .compact()
    .init();
}
