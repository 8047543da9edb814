//! Season and episode numbers.

use std::sync::LazyLock;

use regex::Regex;

use super::{Marker, WorkingState};
use crate::registry::patterns;
use crate::registry::vocabulary::RESOLUTION_SEASONS;

static SEASON: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)s?([0-9]+)(\s|\.)??[ex-]").expect("season pattern is valid"));

static EPISODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)[ex]\s??([0-9]+)").expect("episode pattern is valid"));

pub(super) fn detect(mut state: WorkingState<'_>) -> WorkingState<'_> {
    let pattern = state.registry.season_episode_pattern();
    let found = patterns::captures(pattern, &state.rest).and_then(|caps| {
        let whole = caps.get(0)?;
        let season_token = caps.get(1)?.as_str().to_string();
        Some((whole.start(), whole.end(), whole.as_str().to_string(), season_token))
    });
    let Some((start, end, token, season_token)) = found else {
        return state;
    };

    // 720x400 and friends are frame sizes, not episodes.
    if RESOLUTION_SEASONS.contains(&season_token.as_str()) {
        return state;
    }

    state.cut(start, end, Marker::TvShow.replacement());
    state.parsed.season = season_number(&token);
    state.parsed.episodes = episode_numbers(&token);
    state
}

fn season_number(token: &str) -> Option<u32> {
    SEASON
        .captures(token)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

fn episode_numbers(token: &str) -> Vec<u32> {
    EPISODE
        .captures_iter(token)
        .filter_map(|caps| caps.get(1)?.as_str().parse().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScannerConfig;
    use crate::model::ParsedFilename;
    use crate::parser::parse_name;
    use crate::registry::PatternRegistry;

    fn parse(name: &str) -> ParsedFilename {
        let registry = PatternRegistry::build(&ScannerConfig::default()).unwrap();
        parse_name(&registry, name, false, None)
    }

    #[test]
    fn test_season_number() {
        assert_eq!(season_number("S04E01E02"), Some(4));
        assert_eq!(season_number("3x101x19x3"), Some(3));
        assert_eq!(season_number("S2008E11"), Some(2008));
    }

    #[test]
    fn test_episode_numbers() {
        assert_eq!(episode_numbers("S04E01E02E03E06"), vec![1, 2, 3, 6]);
        assert_eq!(episode_numbers("3x101x19x3"), vec![101, 19, 3]);
        assert_eq!(episode_numbers("S01E99999999999"), Vec::<u32>::new());
    }

    #[test]
    fn test_multi_episode() {
        let parsed = parse("Desperate Housewives S04E01E02E03E06.iso");
        assert_eq!(parsed.season, Some(4));
        assert_eq!(parsed.episodes, vec![1, 2, 3, 6]);
        assert_eq!(parsed.title, "Desperate Housewives");
    }

    #[test]
    fn test_frame_size_is_not_an_episode() {
        let parsed = parse("Postal 2 720x400.iso");
        assert_eq!(parsed.season, None);
        assert!(parsed.episodes.is_empty());
    }

    #[test]
    fn test_episode_title() {
        let parsed = parse("Stargate.SG1.S04E16 - 2010.avi");
        assert_eq!(parsed.title, "Stargate SG1");
        assert_eq!(parsed.season, Some(4));
        assert_eq!(parsed.episodes, vec![16]);
        assert_eq!(parsed.episode_title.as_deref(), Some("2010"));
    }
}
