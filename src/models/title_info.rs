use crate::models::attribute::AttributeId;
use crate::models::stream_info::{
    AudioStreamInfo, StreamInfo, StreamKind, SubtitleStreamInfo, VideoStreamInfo,
};
use humantime::format_duration;
use log::trace;
use regex::Regex;
use serde::Serialize;
use std::time::Duration;

/// Largest TINFO segments count that gets allocated.
pub const MAX_SEGMENTS: usize = 9999;

lazy_static::lazy_static! {
    static ref DURATION_PATTERN: Regex = Regex::new(r"^(\d+):(\d{2}):(\d{2})$").unwrap();
}

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct TitleInfo {
    pub id: u32,
    pub name: String,
    pub chapter_count: i32,
    pub duration: Duration,
    pub file_size: i64,
    pub source_file_name: String,
    pub segments: Option<Vec<i32>>,
    pub file_name: String,
    pub metadata_lang_code: String,
    pub metadata_lang_name: String,
    pub video_streams: Vec<VideoStreamInfo>,
    pub audio_streams: Vec<AudioStreamInfo>,
    pub subtitle_streams: Vec<SubtitleStreamInfo>,
}

impl TitleInfo {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    pub fn duration_seconds(&self) -> u64 {
        self.duration.as_secs()
    }

    /// Duration formatted for display, e.g. `1h 32m 31s`.
    pub fn human_duration(&self) -> String {
        format!("{}", format_duration(self.duration))
    }

    /// Applies one TINFO attribute. Values that fail to convert leave the
    /// field at its zero value; unhandled attributes are ignored.
    pub fn set_field(&mut self, attribute: AttributeId, value: &str) {
        match attribute {
            AttributeId::Name => self.name = value.to_string(),
            AttributeId::ChapterCount => self.chapter_count = value.parse().unwrap_or_default(),
            AttributeId::Duration => self.duration = parse_duration(value).unwrap_or_default(),
            AttributeId::DiskSizeBytes => self.file_size = value.parse().unwrap_or_default(),
            AttributeId::SourceFileName => self.source_file_name = value.to_string(),
            AttributeId::SegmentsCount => self.segments = allocate_segments(value),
            AttributeId::SegmentsMap => self.fill_segments(value),
            AttributeId::OutputFileName => self.file_name = value.to_string(),
            AttributeId::MetadataLanguageCode => self.metadata_lang_code = value.to_string(),
            AttributeId::MetadataLanguageName => self.metadata_lang_name = value.to_string(),
            _ => {}
        }
    }

    // Only fills slots allocated by a preceding segments count.
    fn fill_segments(&mut self, value: &str) {
        if let Some(segments) = self.segments.as_mut() {
            for (slot, segment) in segments.iter_mut().zip(value.split(',')) {
                *slot = segment.trim().parse().unwrap_or_default();
            }
        }
    }

    /// Appends a new, empty stream of `kind` and returns its position in
    /// that kind's list.
    pub fn push_stream(&mut self, kind: StreamKind, stream_id: i32) -> usize {
        match kind {
            StreamKind::Video => {
                self.video_streams.push(VideoStreamInfo::new(stream_id));
                self.video_streams.len() - 1
            }
            StreamKind::Audio => {
                self.audio_streams.push(AudioStreamInfo::new(stream_id));
                self.audio_streams.len() - 1
            }
            StreamKind::Subtitle => {
                self.subtitle_streams.push(SubtitleStreamInfo::new(stream_id));
                self.subtitle_streams.len() - 1
            }
        }
    }

    pub fn stream_mut(&mut self, kind: StreamKind, position: usize) -> Option<StreamInfo<'_>> {
        match kind {
            StreamKind::Video => self.video_streams.get_mut(position).map(StreamInfo::Video),
            StreamKind::Audio => self.audio_streams.get_mut(position).map(StreamInfo::Audio),
            StreamKind::Subtitle => self
                .subtitle_streams
                .get_mut(position)
                .map(StreamInfo::Subtitle),
        }
    }
}

fn allocate_segments(value: &str) -> Option<Vec<i32>> {
    let count = value.parse::<usize>().ok()?;
    if count > MAX_SEGMENTS {
        trace!("Ignoring segments count {count}, above {MAX_SEGMENTS}");
        return None;
    }
    let mut segments = Vec::new();
    if let Err(e) = segments.try_reserve_exact(count) {
        trace!("Can't allocate {count} segments: {e}");
        return None;
    }
    segments.resize(count, 0);
    Some(segments)
}

/// Parses makemkvcon's `H:MM:SS` duration. Hours are unbounded; a value too
/// large for a `u64` of seconds is rejected.
pub fn parse_duration(value: &str) -> Option<Duration> {
    let captures = DURATION_PATTERN.captures(value.trim())?;
    let hours = captures[1].parse::<u64>().ok()?;
    let minutes = captures[2].parse::<u64>().ok()?;
    let seconds = captures[3].parse::<u64>().ok()?;
    let total = hours.checked_mul(3600)?.checked_add(minutes * 60 + seconds)?;
    Some(Duration::from_secs(total))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration() {
        assert_eq!(
            parse_duration("1:32:31"),
            Some(Duration::from_secs(3600 + 32 * 60 + 31))
        );
        assert_eq!(parse_duration("0:00:08"), Some(Duration::from_secs(8)));
        assert_eq!(
            parse_duration("120:00:00"),
            Some(Duration::from_secs(120 * 3600))
        );
    }

    #[test]
    fn test_parse_duration_rejects_malformed() {
        assert_eq!(parse_duration("bad"), None);
        assert_eq!(parse_duration("1:32"), None);
        assert_eq!(parse_duration("1:2:3"), None);
        assert_eq!(parse_duration(""), None);
    }

    #[test]
    fn test_parse_duration_rejects_overflowing_hours() {
        assert_eq!(parse_duration("18446744073709551:00:00"), None);
        assert_eq!(parse_duration("99999999999999999999:00:00"), None);
        assert_eq!(
            parse_duration("5124095576030431:00:15"),
            Some(Duration::from_secs(5_124_095_576_030_431 * 3600 + 15))
        );
    }

    #[test]
    fn test_bad_duration_keeps_zero() {
        let mut title = TitleInfo::new(0);
        title.set_field(AttributeId::Duration, "bad");
        assert_eq!(title.duration, Duration::ZERO);
        title.set_field(AttributeId::Name, "Still handled");
        assert_eq!(title.name, "Still handled");
    }

    #[test]
    fn test_human_duration() {
        let mut title = TitleInfo::new(0);
        title.set_field(AttributeId::Duration, "1:32:31");
        assert_eq!(title.human_duration(), "1h 32m 31s");
        assert_eq!(title.duration_seconds(), 5551);
    }

    #[test]
    fn test_segments_filled_after_count() {
        let mut title = TitleInfo::new(0);
        title.set_field(AttributeId::SegmentsCount, "10");
        title.set_field(AttributeId::SegmentsMap, "1,2,3,4,5,6,7,8,9,10");
        assert_eq!(title.segments, Some(vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10]));
    }

    #[test]
    fn test_segments_map_without_count_is_skipped() {
        let mut title = TitleInfo::new(0);
        title.set_field(AttributeId::SegmentsMap, "1,2,3");
        assert_eq!(title.segments, None);

        title.set_field(AttributeId::SegmentsCount, "lots");
        title.set_field(AttributeId::SegmentsMap, "1,2,3");
        assert_eq!(title.segments, None);
    }

    #[test]
    fn test_oversized_segments_count_leaves_segments_unallocated() {
        let mut title = TitleInfo::new(0);
        title.set_field(AttributeId::SegmentsCount, "18446744073709551615");
        assert_eq!(title.segments, None);
        title.set_field(AttributeId::SegmentsCount, &(MAX_SEGMENTS + 1).to_string());
        assert_eq!(title.segments, None);
        title.set_field(AttributeId::SegmentsMap, "1,2,3");
        assert_eq!(title.segments, None);

        title.set_field(AttributeId::SegmentsCount, &MAX_SEGMENTS.to_string());
        assert_eq!(title.segments.as_ref().map(Vec::len), Some(MAX_SEGMENTS));
    }

    #[test]
    fn test_segments_map_longer_than_count() {
        let mut title = TitleInfo::new(0);
        title.set_field(AttributeId::SegmentsCount, "2");
        title.set_field(AttributeId::SegmentsMap, "7,8,9");
        assert_eq!(title.segments, Some(vec![7, 8]));
    }

    #[test]
    fn test_typed_fields() {
        let mut title = TitleInfo::new(2);
        title.set_field(AttributeId::ChapterCount, "42");
        title.set_field(AttributeId::DiskSizeBytes, "43378348032");
        title.set_field(AttributeId::DiskSize, "40.4 GB");
        assert_eq!(title.chapter_count, 42);
        assert_eq!(title.file_size, 43_378_348_032);
        title.set_field(AttributeId::DiskSizeBytes, "40.4 GB");
        assert_eq!(title.file_size, 0);
    }

    #[test]
    fn test_push_and_resolve_streams() {
        let mut title = TitleInfo::new(0);
        assert_eq!(title.push_stream(StreamKind::Video, 0), 0);
        assert_eq!(title.push_stream(StreamKind::Audio, 1), 0);
        assert_eq!(title.push_stream(StreamKind::Audio, 2), 1);

        let stream = title.stream_mut(StreamKind::Audio, 1).unwrap();
        assert_eq!(stream.kind(), StreamKind::Audio);
        assert!(title.stream_mut(StreamKind::Subtitle, 0).is_none());
        assert_eq!(title.audio_streams[1].id, 2);
    }
}
