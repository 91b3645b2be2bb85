use cartelemetry_cli::{
    load_settings, prompt_window, run_analysis, AnalysisOutcome, AnalyzerArgs, ConsoleObserver,
    SimulatorArgs,
};
use cartelemetry_core::driver::{TickReport, TripObserver, TripPlan, TripSummary};
use cartelemetry_core::feed::{FeedError, FeedReader, FeedSample, FeedWindow};
use cartelemetry_core::vehicle::{Phase, Reading, VehicleState};
use clap::Parser;
use pretty_assertions::assert_eq;
use std::io::Cursor;
use std::time::Duration;

struct StubReader {
    result: fn() -> Result<Vec<FeedSample>, FeedError>,
}

impl FeedReader for StubReader {
    async fn fetch(&self, _window: FeedWindow) -> Result<Vec<FeedSample>, FeedError> {
        (self.result)()
    }
}

fn output(buf: Vec<u8>) -> String {
    String::from_utf8(buf).unwrap()
}

#[test]
fn test_analyzer_window_flags() {
    let args = AnalyzerArgs::try_parse_from(["telemetry-analyzer", "--last-hours", "24"]).unwrap();
    assert_eq!(args.window(), Some(FeedWindow::LastHours(24)));

    let args =
        AnalyzerArgs::try_parse_from(["telemetry-analyzer", "--last-results", "100"]).unwrap();
    assert_eq!(args.window(), Some(FeedWindow::LastResults(100)));

    let args = AnalyzerArgs::try_parse_from(["telemetry-analyzer"]).unwrap();
    assert_eq!(args.window(), None);

    assert!(AnalyzerArgs::try_parse_from([
        "telemetry-analyzer",
        "--last-hours",
        "1",
        "--last-results",
        "5"
    ])
    .is_err());
}

#[test]
fn test_simulator_args() {
    let args = SimulatorArgs::try_parse_from(["car-simulator", "-c", "trip.json", "--seed", "42"])
        .unwrap();
    assert_eq!(args.config.as_deref(), Some(std::path::Path::new("trip.json")));
    assert_eq!(args.seed, Some(42));
}

#[test]
fn test_prompt_window() {
    let mut out = Vec::new();
    let window = prompt_window(&mut Cursor::new("2\n"), &mut out).unwrap();
    assert_eq!(window, Some(FeedWindow::LastResults(100)));
    assert!(output(out).contains("[1]  Last 24 hours"));

    let mut out = Vec::new();
    let window = prompt_window(&mut Cursor::new("x\n"), &mut out).unwrap();
    assert_eq!(window, None);
}

#[test]
fn test_console_observer_table() {
    let mut observer = ConsoleObserver::new(Vec::new());
    observer.trip_started(&TripPlan {
        interval: Duration::from_secs(15),
        duration: Duration::from_secs(60),
    });
    observer.tick(&TickReport {
        tick: 1,
        elapsed: Duration::ZERO,
        phase: Phase::Accelerating,
        reading: Reading::new(3.0, 930.0, 100.0, 85.25),
    });
    observer.publish_failed(1, &FeedError::Status(503));
    observer.tick(&TickReport {
        tick: 2,
        elapsed: Duration::from_secs(15),
        phase: Phase::Accelerating,
        reading: Reading::new(6.0, 1060.0, 99.99, 85.6),
    });
    observer.trip_finished(&TripSummary {
        trip_id: Default::default(),
        ticks: 2,
        published: 1,
        failed: 1,
        final_state: VehicleState::new(6.0, 99.99),
        elapsed: Duration::from_secs(30),
    });

    let text = output(observer.into_inner());
    assert_eq!(text.matches("│  TIME s │").count(), 1);
    assert!(text.contains("│       0 │        3 │      930 │    100.0 │       85 │"));
    assert!(text.contains("│      15 │        6 │     1060 │    100.0 │       86 │"));
    assert!(text.contains("[Warning] Reading 1 was not sent: HTTP 503"));
    assert!(text.contains("1 readings sent, 1 failed"));
}

#[tokio::test]
async fn test_run_analysis_report() {
    let reader = StubReader {
        result: || {
            Ok(vec![
                FeedSample {
                    speed: Some(10.0),
                    ..FeedSample::default()
                },
                FeedSample {
                    speed: Some(20.0),
                    ..FeedSample::default()
                },
                FeedSample::default(),
            ])
        },
    };
    let mut out = Vec::new();

    let outcome = run_analysis(&reader, FeedWindow::LastResults(100), &mut out)
        .await
        .unwrap();

    match outcome {
        AnalysisOutcome::Report(avg) => {
            assert_eq!(avg.speed, Some(15.0));
            assert_eq!(avg.rpm, None);
        }
        other => panic!("expected a report, got {other:?}"),
    }
    let text = output(out);
    assert!(text.contains("15.0 km/h"));
    assert!(text.contains("no data"));
}

#[tokio::test]
async fn test_run_analysis_empty_window() {
    let reader = StubReader {
        result: || Ok(Vec::new()),
    };
    let mut out = Vec::new();

    let outcome = run_analysis(&reader, FeedWindow::LastHours(24), &mut out)
        .await
        .unwrap();

    assert_eq!(outcome, AnalysisOutcome::NoData);
    assert!(output(out).contains("No data points found"));
}

#[tokio::test]
async fn test_run_analysis_fetch_failure() {
    let reader = StubReader {
        result: || Err(FeedError::Status(404)),
    };
    let mut out = Vec::new();

    let outcome = run_analysis(&reader, FeedWindow::LastResults(100), &mut out)
        .await
        .unwrap();

    assert_eq!(outcome, AnalysisOutcome::FetchFailed);
    let text = output(out);
    assert!(text.contains("HTTP 404"));
    assert!(!text.contains("km/h"));
}

#[test]
fn test_load_settings_from_explicit_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("appsettings.json");
    std::fs::write(&path, r#"{"ThingSpeak": {"ChannelId": 9, "ReadApiKey": "R"}}"#).unwrap();

    let settings = load_settings(Some(path.as_path())).unwrap();
    assert_eq!(settings.channel_id, 9);
    assert_eq!(settings.read_api_key, "R");

    assert!(load_settings(Some(dir.path().join("nope.json").as_path())).is_err());
}
