use tracing::debug;

use crate::error::Error;
use crate::model::{DaySelection, Session, Summary};
use crate::service::InputLoader;

/// Checks the session before anything else happens, then asks `choose` which
/// days to fetch and hands them to the loader.
pub async fn run<L, F>(loader: &L, session: Option<String>, choose: F) -> Result<Summary, Error>
where
    L: InputLoader + Sync,
    F: FnOnce() -> Result<DaySelection, Error>,
{
    let session = Session::new(session)?;
    let selection = choose()?;
    debug!(?selection, "selected days");

    loader.download_inputs(&selection, &session).await
}
