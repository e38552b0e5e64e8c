//! Downloads Advent of Code puzzle inputs into `src/day<d>/input.txt`.

pub mod error;
pub mod headers;
pub mod model;
pub mod progress;
pub mod run;
pub mod service;

pub use error::Error;
pub use model::{Day, DayOutcome, DaySelection, Session, Summary};
pub use run::run;
pub use service::{InputDownloadService, InputLoader};
