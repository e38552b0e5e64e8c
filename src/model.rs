use std::fmt;
use std::io::BufRead;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::error::Error::{InvalidDay, MissingSession, NoDayEntered};

pub const FIRST_DAY: u32 = 1;
pub const LAST_DAY: u32 = 24;

/// A puzzle day. Only interpolated into paths, never range checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Day(pub u32);

impl Day {
    /// `<output_dir>/day<d>/input.txt`
    pub fn output_path(&self, output_dir: &Path) -> PathBuf {
        output_dir.join(format!("day{day}", day = self.0)).join("input.txt")
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for Day {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        s.parse::<u32>()
            .map(Day)
            .map_err(|_| InvalidDay(format!("`{s}` is not a valid day number")))
    }
}

/// The `session` cookie value of a logged in account.
#[derive(Clone, PartialEq, Eq)]
pub struct Session(String);

impl Session {
    pub fn new(value: Option<String>) -> Result<Self, Error> {
        match value {
            Some(value) if !value.is_empty() => Ok(Session(value)),
            _ => Err(MissingSession),
        }
    }

    pub fn cookie(&self) -> String {
        format!("session={session}", session = self.0)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Session(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DaySelection {
    Single(Day),
    Range(RangeInclusive<u32>),
}

impl DaySelection {
    pub fn all() -> Self {
        DaySelection::Range(FIRST_DAY..=LAST_DAY)
    }

    /// Interprets one line typed at the prompt. Only a digit-only line picks a
    /// single day, everything else (including an empty line) picks all days.
    pub fn from_input(line: &str) -> Result<Self, Error> {
        let line = line.trim_end_matches(['\n', '\r']);
        if !line.is_empty() && line.bytes().all(|b| b.is_ascii_digit()) {
            line.parse::<Day>().map(DaySelection::Single)
        } else {
            Ok(DaySelection::all())
        }
    }

    /// Reads the answer to the day prompt. End of input before any line is an
    /// error so a closed stdin never turns into a download of every day.
    pub fn read_from<R: BufRead>(mut reader: R) -> Result<Self, Error> {
        let mut line = String::new();
        match reader.read_line(&mut line)? {
            0 => Err(NoDayEntered),
            _ => DaySelection::from_input(&line),
        }
    }

    pub fn days(&self) -> Vec<Day> {
        match self {
            DaySelection::Single(day) => vec![*day],
            DaySelection::Range(range) => range.clone().map(Day).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayOutcome {
    pub day: Day,
    pub path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bytes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DayOutcome {
    pub(crate) fn downloaded(day: Day, path: PathBuf, bytes: u64) -> Self {
        DayOutcome { day, path, bytes: Some(bytes), error: None }
    }

    pub(crate) fn failed(day: Day, path: PathBuf, error: &Error) -> Self {
        DayOutcome { day, path, bytes: None, error: Some(error.to_string()) }
    }

    pub fn is_downloaded(&self) -> bool {
        self.error.is_none()
    }
}

#[derive(Debug, Default, Serialize)]
pub struct Summary {
    pub outcomes: Vec<DayOutcome>,
}

impl Summary {
    pub fn downloaded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_downloaded()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.downloaded()
    }

    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
