use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use indicatif::ProgressBar;
use reqwest::{Client, StatusCode};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::Error;
use crate::headers::browser_headers;
use crate::model::{Day, DayOutcome, DaySelection, Session, Summary};
use crate::progress::SpinnerHelper;

pub const ADVENT_OF_CODE_URL: &str = "https://adventofcode.com";
pub const DEFAULT_YEAR: u32 = 2024;
pub const DEFAULT_OUTPUT_DIR: &str = "src";

#[async_trait]
pub trait InputLoader {
    /// Downloads every selected day in ascending order. A failing day ends up
    /// as a failed outcome in the summary and does not stop the run.
    async fn download_inputs(
        &self,
        selection: &DaySelection,
        session: &Session,
    ) -> Result<Summary, Error>;
}

pub struct InputDownloadService {
    pub client: Client,
    pub base_url: String,
    pub year: u32,
    pub output_dir: PathBuf,
    pub create_dirs: bool,
}

impl InputDownloadService {
    pub fn new(client: Client) -> Self {
        InputDownloadService {
            client,
            base_url: String::from(ADVENT_OF_CODE_URL),
            year: DEFAULT_YEAR,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            create_dirs: false,
        }
    }

    /// The puzzle page of a day, sent as referer.
    pub fn puzzle_url(&self, day: Day) -> String {
        format!(
            "{url}/{year}/day/{day}",
            url = self.base_url.trim_end_matches('/'),
            year = self.year
        )
    }

    pub fn input_url(&self, day: Day) -> String {
        format!("{puzzle}/input", puzzle = self.puzzle_url(day))
    }

    pub fn output_path(&self, day: Day) -> PathBuf {
        day.output_path(&self.output_dir)
    }
}

#[async_trait]
impl InputLoader for InputDownloadService {
    async fn download_inputs(
        &self,
        selection: &DaySelection,
        session: &Session,
    ) -> Result<Summary, Error> {
        let days = selection.days();
        let spinner = SpinnerHelper::create(format!(
            "Start to download {count} input(s) for {year}",
            count = days.len(),
            year = self.year
        ))?;

        let mut summary = Summary::default();
        for day in days {
            let path = self.output_path(day);
            spinner.set_message(format!("PROGRESS – Download input for day {day}"));

            let outcome = match self.download_day(day, session, &path).await {
                Ok(bytes) => {
                    info!(%day, bytes, path = %path.display(), "downloaded input");
                    spinner.suspend(|| {
                        println!("Downloaded input for day {day} to {path}", path = path.display())
                    });
                    DayOutcome::downloaded(day, path, bytes)
                }
                Err(error) => {
                    debug!(%day, %error, "failed to download input");
                    spinner.suspend(|| eprintln!("Failed to download input for day {day}: {error}"));
                    DayOutcome::failed(day, path, &error)
                }
            };
            summary.outcomes.push(outcome);
        }

        finish(&spinner, &summary);
        Ok(summary)
    }
}

impl InputDownloadService {
    async fn download_day(&self, day: Day, session: &Session, path: &Path) -> Result<u64, Error> {
        let url = self.input_url(day);
        let headers = browser_headers(session, &self.puzzle_url(day))?;

        debug!(%url, "requesting input");
        let mut response = self.client.get(&url).headers(headers).send().await?;

        match response.status() {
            status if status.is_success() => {
                let parent = match path.parent() {
                    Some(parent) if !parent.as_os_str().is_empty() => parent,
                    _ => Path::new("."),
                };
                if self.create_dirs {
                    fs::create_dir_all(parent)?;
                }

                // The existing input is only replaced once the whole body arrived.
                let mut out = NamedTempFile::new_in(parent)?;
                let mut written = 0;
                while let Some(chunk) = response.chunk().await? {
                    out.write_all(&chunk)?;
                    written += chunk.len() as u64;
                }
                out.persist(path).map_err(|e| e.error)?;
                debug!(%day, written, "input stream finished");
                Ok(written)
            }
            status => Err(Error::StatusError(format!(
                "Something went wrong downloading {url}. Status code: {status}.{hint}",
                hint = status_hint(status)
            ))),
        }
    }
}

fn status_hint(status: StatusCode) -> &'static str {
    match status {
        StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED => {
            " The session cookie is probably expired."
        }
        StatusCode::NOT_FOUND => " The puzzle is probably not unlocked yet.",
        _ => "",
    }
}

fn finish(spinner: &ProgressBar, summary: &Summary) {
    let total = summary.outcomes.len();
    match summary.failed() {
        0 => spinner.finish_with_message(format!("SUCCESS – Downloaded {total} input(s).")),
        failed => spinner.abandon_with_message(format!(
            "FAILURE – {failed} of {total} input(s) could not be downloaded."
        )),
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use mockito::{mock, server_url};
    use reqwest::Client;
    use tempfile::TempDir;

    use crate::error::Error;
    use crate::model::{Day, DaySelection, Session};
    use crate::service::{InputDownloadService, InputLoader};

    fn input_download_service(year: u32, output_dir: &Path) -> InputDownloadService {
        InputDownloadService {
            year,
            output_dir: output_dir.to_path_buf(),
            base_url: server_url(),
            ..InputDownloadService::new(Client::new())
        }
    }

    fn session() -> Session {
        Session::new(Some(String::from("abc123"))).unwrap()
    }

    fn day_dirs(root: &Path, days: impl IntoIterator<Item = u32>) {
        for day in days {
            fs::create_dir_all(root.join(format!("day{day}"))).unwrap();
        }
    }

    #[test]
    fn given_default_service_when_building_targets_then_use_2024_template() {
        // Given
        let service = InputDownloadService::new(Client::new());

        // When / Then
        assert_eq!(service.input_url(Day(5)), "https://adventofcode.com/2024/day/5/input");
        assert_eq!(service.puzzle_url(Day(17)), "https://adventofcode.com/2024/day/17");
        assert_eq!(service.output_path(Day(5)), Path::new("src/day5/input.txt"));
    }

    #[test]
    fn given_base_url_with_trailing_slash_when_input_url_then_no_double_slash() {
        let service = InputDownloadService {
            base_url: String::from("http://localhost:8080/"),
            year: 2022,
            ..InputDownloadService::new(Client::new())
        };

        assert_eq!(service.input_url(Day(1)), "http://localhost:8080/2022/day/1/input");
    }

    #[tokio::test]
    async fn given_single_day_when_download_inputs_then_request_only_that_day() {
        // Given
        let dir = TempDir::new().unwrap();
        day_dirs(dir.path(), [5]);
        let referer = format!("{url}/2031/day/5", url = server_url());
        let m = mock("GET", "/2031/day/5/input")
            .match_header("cookie", "session=abc123")
            .match_header("referer", referer.as_str())
            .match_header("sec-fetch-mode", "navigate")
            .with_status(200)
            .with_body("3   4\n4   3\n")
            .expect(1)
            .create();

        // When
        let summary = input_download_service(2031, dir.path())
            .download_inputs(&DaySelection::Single(Day(5)), &session())
            .await
            .unwrap();

        // Then
        m.assert();
        assert_eq!(summary.outcomes.len(), 1);
        assert_eq!(summary.outcomes[0].day, Day(5));
        assert_eq!(summary.outcomes[0].bytes, Some(12));
        assert_eq!(
            fs::read_to_string(dir.path().join("day5/input.txt")).unwrap(),
            "3   4\n4   3\n"
        );
    }

    #[tokio::test]
    async fn given_existing_file_when_download_inputs_then_overwrite_it() {
        // Given
        let dir = TempDir::new().unwrap();
        day_dirs(dir.path(), [9]);
        fs::write(dir.path().join("day9/input.txt"), "stale content that is longer").unwrap();
        let _m = mock("GET", "/2032/day/9/input").with_status(200).with_body("fresh").create();

        // When
        let summary = input_download_service(2032, dir.path())
            .download_inputs(&DaySelection::Single(Day(9)), &session())
            .await
            .unwrap();

        // Then
        assert_eq!(summary.failed(), 0);
        assert_eq!(fs::read_to_string(dir.path().join("day9/input.txt")).unwrap(), "fresh");
    }

    #[tokio::test]
    async fn given_all_days_when_download_inputs_then_every_day_once_in_order() {
        // Given
        let dir = TempDir::new().unwrap();
        day_dirs(dir.path(), 1..=24);
        let mocks: Vec<_> = (1..=24)
            .map(|day| {
                mock("GET", format!("/2033/day/{day}/input").as_str())
                    .match_header("cookie", "session=abc123")
                    .with_status(200)
                    .with_body(format!("input {day}"))
                    .expect(1)
                    .create()
            })
            .collect();

        // When
        let summary = input_download_service(2033, dir.path())
            .download_inputs(&DaySelection::all(), &session())
            .await
            .unwrap();

        // Then
        mocks.iter().for_each(|m| m.assert());
        let days: Vec<u32> = summary.outcomes.iter().map(|o| o.day.0).collect();
        assert_eq!(days, (1..=24).collect::<Vec<_>>());
        assert_eq!(summary.downloaded(), 24);
        assert_eq!(
            fs::read_to_string(dir.path().join("day24/input.txt")).unwrap(),
            "input 24"
        );
    }

    #[tokio::test]
    async fn given_error_status_when_download_inputs_then_fail_that_day_and_continue() {
        // Given
        let dir = TempDir::new().unwrap();
        day_dirs(dir.path(), 1..=3);
        let _m1 = mock("GET", "/2034/day/1/input").with_status(200).with_body("one").create();
        let _m2 = mock("GET", "/2034/day/2/input")
            .with_status(400)
            .with_body("Puzzle inputs differ by user.  Please log in to get your puzzle input.")
            .create();
        let _m3 = mock("GET", "/2034/day/3/input").with_status(200).with_body("three").create();

        // When
        let summary = input_download_service(2034, dir.path())
            .download_inputs(&DaySelection::Range(1..=3), &session())
            .await
            .unwrap();

        // Then
        assert_eq!(summary.downloaded(), 2);
        assert_eq!(summary.failed(), 1);
        let error = summary.outcomes[1].error.as_deref().unwrap();
        assert!(error.contains("400"), "{error}");
        assert!(error.contains("session cookie is probably expired"), "{error}");
        assert!(!dir.path().join("day2/input.txt").exists());
        assert_eq!(fs::read_to_string(dir.path().join("day3/input.txt")).unwrap(), "three");
    }

    #[tokio::test]
    async fn given_missing_day_directory_when_download_inputs_then_io_failure() {
        // Given
        let dir = TempDir::new().unwrap();
        let _m = mock("GET", "/2035/day/4/input").with_status(200).with_body("four").create();

        // When
        let summary = input_download_service(2035, dir.path())
            .download_inputs(&DaySelection::Single(Day(4)), &session())
            .await
            .unwrap();

        // Then
        assert_eq!(summary.failed(), 1);
        assert!(!dir.path().join("day4").exists());
    }

    #[tokio::test]
    async fn given_create_dirs_when_download_inputs_then_create_day_directory() {
        // Given
        let dir = TempDir::new().unwrap();
        let _m = mock("GET", "/2036/day/6/input").with_status(200).with_body("six").create();
        let service = InputDownloadService {
            create_dirs: true,
            ..input_download_service(2036, dir.path())
        };

        // When
        let summary = service
            .download_inputs(&DaySelection::Single(Day(6)), &session())
            .await
            .unwrap();

        // Then
        assert_eq!(summary.downloaded(), 1);
        assert_eq!(fs::read_to_string(dir.path().join("day6/input.txt")).unwrap(), "six");
    }

    #[tokio::test]
    async fn given_session_with_line_break_when_download_day_then_invalid_header_before_request() {
        // Given
        let dir = TempDir::new().unwrap();
        day_dirs(dir.path(), [8]);
        let m = mock("GET", "/2037/day/8/input").with_status(200).expect(0).create();
        let session = Session::new(Some(String::from("abc\nevil"))).unwrap();

        // When
        let error = input_download_service(2037, dir.path())
            .download_day(Day(8), &session, &dir.path().join("day8/input.txt"))
            .await
            .unwrap_err();

        // Then
        m.assert();
        assert!(matches!(error, Error::InvalidHeader(_)));
    }

    #[tokio::test]
    async fn given_body_shorter_than_announced_when_download_inputs_then_keep_existing_input() {
        // Given
        let dir = TempDir::new().unwrap();
        day_dirs(dir.path(), [3]);
        fs::write(dir.path().join("day3/input.txt"), "GOOD INPUT").unwrap();
        let _m = mock("GET", "/2038/day/3/input")
            .with_status(200)
            .with_header("content-length", "5000")
            .with_body("par")
            .create();

        // When
        let summary = input_download_service(2038, dir.path())
            .download_inputs(&DaySelection::Single(Day(3)), &session())
            .await
            .unwrap();

        // Then
        assert_eq!(summary.failed(), 1);
        assert_eq!(
            fs::read_to_string(dir.path().join("day3/input.txt")).unwrap(),
            "GOOD INPUT"
        );
        let leftovers: Vec<_> = fs::read_dir(dir.path().join("day3")).unwrap().collect();
        assert_eq!(leftovers.len(), 1);
    }
}
