//! Fixture tests for reelscan-parser.
//!
//! Each fixture file holds a list of filenames with the fields they are
//! expected to produce under the default configuration. Fields left out of
//! `expected` are not checked.

use reelscan_parser::parse;
use serde::Deserialize;
use std::fs;

/// A single test case from a fixture file.
#[derive(Debug, Deserialize)]
struct TestCase {
    input: String,
    expected: Expected,
}

/// Expected values for a test case.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Expected {
    title: Option<String>,
    year: Option<u16>,
    season: Option<u32>,
    episodes: Option<Vec<u32>>,
    episode_title: Option<String>,
    part: Option<u32>,
    part_title: Option<String>,
    fps: Option<u32>,
    resolution: Option<String>,
    source: Option<String>,
    video_codec: Option<String>,
    audio_codec: Option<String>,
    container: Option<String>,
}

fn check<T: PartialEq + std::fmt::Debug>(
    failures: &mut Vec<String>,
    field: &str,
    expected: Option<T>,
    actual: T,
) {
    if let Some(expected) = expected {
        if expected != actual {
            failures.push(format!("{field}: expected {expected:?}, got {actual:?}"));
        }
    }
}

fn run_fixture_file(name: &str) {
    let path = format!("{}/tests/fixtures/{name}", env!("CARGO_MANIFEST_DIR"));
    let content = fs::read_to_string(&path).unwrap();
    let cases: Vec<TestCase> = serde_json::from_str(&content).unwrap();
    assert!(!cases.is_empty(), "{path} has no cases");

    let mut report = Vec::new();
    for case in cases {
        let result = parse(&case.input, false);
        let expected = case.expected;
        let mut failures = Vec::new();

        check(&mut failures, "title", expected.title, result.title);
        check(&mut failures, "year", expected.year.map(Some), result.year);
        check(&mut failures, "season", expected.season.map(Some), result.season);
        check(&mut failures, "episodes", expected.episodes, result.episodes);
        check(&mut failures, "episode_title", expected.episode_title.map(Some), result.episode_title);
        check(&mut failures, "part", expected.part.map(Some), result.part);
        check(&mut failures, "part_title", expected.part_title.map(Some), result.part_title);
        check(&mut failures, "fps", expected.fps.map(Some), result.fps);
        check(&mut failures, "resolution", expected.resolution.map(Some), result.hd_resolution);
        check(&mut failures, "source", expected.source.map(Some), result.video_source);
        check(&mut failures, "video_codec", expected.video_codec.map(Some), result.video_codec);
        check(&mut failures, "audio_codec", expected.audio_codec.map(Some), result.audio_codec);
        check(&mut failures, "container", expected.container, result.container);

        if !failures.is_empty() {
            report.push(format!("{}\n    {}", case.input, failures.join("\n    ")));
        }
    }

    assert!(report.is_empty(), "{name} failures:\n{}", report.join("\n"));
}

#[test]
fn test_movie_fixtures() {
    run_fixture_file("movies.json");
}

#[test]
fn test_episode_fixtures() {
    run_fixture_file("episodes.json");
}
