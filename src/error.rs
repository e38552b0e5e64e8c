use std::fmt::{Display, Formatter, Result};

#[derive(Debug)]
pub enum Error {
  ReqwestError(reqwest::Error),
  JsonError(serde_json::Error),
  IoError(std::io::Error),
  TemplateError(indicatif::style::TemplateError),
  MissingSession,
  NoDayEntered,
  InvalidDay(String),
  InvalidHeader(String),
  StatusError(String),
}

impl std::error::Error for Error {}

impl Display for Error {
  fn fmt(&self, f: &mut Formatter<'_>) -> Result {
    match self {
      Error::ReqwestError(e) => std::fmt::Display::fmt(e, f),
      Error::JsonError(e) => std::fmt::Display::fmt(e, f),
      Error::IoError(e) => std::fmt::Display::fmt(e, f),
      Error::TemplateError(e) => std::fmt::Display::fmt(e, f),
      Error::MissingSession => write!(
        f,
        "SESSION is not set. Put `SESSION=<cookie value>` into `.env` or pass `--session`."
      ),
      Error::NoDayEntered => write!(f, "No day entered, stdin was closed before a line was read."),
      Error::InvalidDay(e) => std::fmt::Display::fmt(e, f),
      Error::InvalidHeader(e) => std::fmt::Display::fmt(e, f),
      Error::StatusError(e) => std::fmt::Display::fmt(e, f),
    }
  }
}

impl From<reqwest::Error> for Error {
  fn from(reqwest_error: reqwest::Error) -> Self {
    Error::ReqwestError(reqwest_error)
  }
}

impl From<serde_json::Error> for Error {
  fn from(serde_json_error: serde_json::Error) -> Self {
    Error::JsonError(serde_json_error)
  }
}

impl From<std::io::Error> for Error {
  fn from(io_error: std::io::Error) -> Self {
    Error::IoError(io_error)
  }
}

impl From<indicatif::style::TemplateError> for Error {
  fn from(template_error: indicatif::style::TemplateError) -> Self {
    Error::TemplateError(template_error)
  }
}
