//! Frame rate, codecs, resolution and video source.

use fancy_regex::Regex;

use super::{WorkingState, SEPARATOR};
use crate::registry::patterns;
use crate::registry::KeywordPattern;

pub(super) fn detect(mut state: WorkingState<'_>) -> WorkingState<'_> {
    let registry = state.registry;

    if let Some(fps) = state.seek(registry.fps_map()) {
        state.parsed.fps = Some(fps);
    }
    if let Some(codec) = state.seek(registry.audio_codec_map()) {
        state.parsed.audio_codec = Some(codec);
    }
    if let Some(codec) = state.seek(registry.video_codec_map()) {
        state.parsed.video_codec = Some(codec);
    }
    if let Some(resolution) = state.seek(registry.resolution_map()) {
        state.parsed.hd_resolution = Some(resolution);
    }
    if let Some(source) = seek_protected(
        &mut state.rest,
        registry.video_source_map(),
        registry.part_patterns(),
    ) {
        state.parsed.video_source = Some(source);
    }

    state
}

/// Two-phase removal: find the first matching entry, then keep the cut only
/// if it leaves every protected pattern that matched before still matching.
///
/// `5 DVD` must stay intact for the part stage, so the label `DVD` is
/// recorded but the text is left alone.
fn seek_protected<L: Clone>(
    rest: &mut String,
    map: &[KeywordPattern<L>],
    protect: &[Regex],
) -> Option<L> {
    for entry in map {
        let Some((start, end)) = patterns::find(entry.pattern(), rest).map(|m| (m.start(), m.end()))
        else {
            continue;
        };

        let mut cut = String::with_capacity(rest.len());
        cut.push_str(&rest[..start]);
        cut.push_str(SEPARATOR);
        cut.push_str(&rest[end..]);

        let breaks_protected = protect
            .iter()
            .any(|p| patterns::is_match(p, rest) && !patterns::is_match(p, &cut));
        if !breaks_protected {
            *rest = cut;
        }
        return Some(entry.label().clone());
    }
    None
}
