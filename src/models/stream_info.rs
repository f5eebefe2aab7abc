use crate::models::attribute::AttributeId;
use serde::Serialize;

/// Which of a title's three stream lists a SINFO ordinal was bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StreamKind {
    Video,
    Audio,
    Subtitle,
}

impl StreamKind {
    /// Maps the value of a SINFO type record to a stream kind.
    /// makemkvcon reports subtitle tracks as "Subtitles", older builds as "Subtitle".
    pub fn from_type_name(value: &str) -> Option<Self> {
        match value {
            "Video" => Some(StreamKind::Video),
            "Audio" => Some(StreamKind::Audio),
            "Subtitle" | "Subtitles" => Some(StreamKind::Subtitle),
            _ => None,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct VideoStreamInfo {
    pub id: i32,
    pub name: String,
    pub codec_id: String,
    pub codec_short: String,
    pub codec_long: String,
    pub video_size: String,
    pub aspect_ratio: String,
    pub frame_rate: String,
    pub stream_flags: i32,
    pub metadata_lang_code: String,
    pub metadata_lang_name: String,
    pub conversion_type: String,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct AudioStreamInfo {
    pub id: i32,
    pub name: String,
    pub lang_code: String,
    pub lang_name: String,
    pub codec_id: String,
    pub codec_short: String,
    pub codec_long: String,
    pub bit_rate: String,
    pub channel_count: i32,
    pub sample_rate: i32,
    pub sample_size: i32,
    pub stream_flags: i32,
    pub metadata_lang_code: String,
    pub metadata_lang_name: String,
    pub conversion_type: String,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct SubtitleStreamInfo {
    pub id: i32,
    pub name: String,
    pub lang_code: String,
    pub lang_name: String,
    pub codec_id: String,
    pub codec_short: String,
    pub codec_long: String,
    pub stream_flags: i32,
    pub metadata_lang_code: String,
    pub metadata_lang_name: String,
    pub conversion_type: String,
}

/// A mutable view of one stream of a title, whatever its kind.
#[derive(Debug)]
pub enum StreamInfo<'a> {
    Video(&'a mut VideoStreamInfo),
    Audio(&'a mut AudioStreamInfo),
    Subtitle(&'a mut SubtitleStreamInfo),
}

impl StreamInfo<'_> {
    pub fn kind(&self) -> StreamKind {
        match self {
            StreamInfo::Video(_) => StreamKind::Video,
            StreamInfo::Audio(_) => StreamKind::Audio,
            StreamInfo::Subtitle(_) => StreamKind::Subtitle,
        }
    }

    /// Applies one SINFO attribute. Attributes that don't belong to the
    /// stream's kind are ignored.
    pub fn set_field(&mut self, attribute: AttributeId, value: &str) {
        match self {
            StreamInfo::Video(video) => video.set_field(attribute, value),
            StreamInfo::Audio(audio) => audio.set_field(attribute, value),
            StreamInfo::Subtitle(subtitle) => subtitle.set_field(attribute, value),
        }
    }
}

fn parse_int(value: &str) -> i32 {
    value.parse().unwrap_or_default()
}

impl VideoStreamInfo {
    pub fn new(id: i32) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    pub fn set_field(&mut self, attribute: AttributeId, value: &str) {
        match attribute {
            AttributeId::Name => self.name = value.to_string(),
            AttributeId::CodecId => self.codec_id = value.to_string(),
            AttributeId::CodecShort => self.codec_short = value.to_string(),
            AttributeId::CodecLong => self.codec_long = value.to_string(),
            AttributeId::VideoSize => self.video_size = value.to_string(),
            AttributeId::VideoAspectRatio => self.aspect_ratio = value.to_string(),
            AttributeId::VideoFrameRate => self.frame_rate = value.to_string(),
            AttributeId::StreamFlags => self.stream_flags = parse_int(value),
            AttributeId::MetadataLanguageCode => self.metadata_lang_code = value.to_string(),
            AttributeId::MetadataLanguageName => self.metadata_lang_name = value.to_string(),
            AttributeId::OutputConversionType => self.conversion_type = value.to_string(),
            _ => {}
        }
    }
}

impl AudioStreamInfo {
    pub fn new(id: i32) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    pub fn set_field(&mut self, attribute: AttributeId, value: &str) {
        match attribute {
            AttributeId::Name => self.name = value.to_string(),
            AttributeId::LangCode => self.lang_code = value.to_string(),
            AttributeId::LangName => self.lang_name = value.to_string(),
            AttributeId::CodecId => self.codec_id = value.to_string(),
            AttributeId::CodecShort => self.codec_short = value.to_string(),
            AttributeId::CodecLong => self.codec_long = value.to_string(),
            AttributeId::Bitrate => self.bit_rate = value.to_string(),
            AttributeId::AudioChannelsCount => self.channel_count = parse_int(value),
            AttributeId::AudioSampleRate => self.sample_rate = parse_int(value),
            AttributeId::AudioSampleSize => self.sample_size = parse_int(value),
            AttributeId::StreamFlags => self.stream_flags = parse_int(value),
            AttributeId::MetadataLanguageCode => self.metadata_lang_code = value.to_string(),
            AttributeId::MetadataLanguageName => self.metadata_lang_name = value.to_string(),
            AttributeId::OutputConversionType => self.conversion_type = value.to_string(),
            _ => {}
        }
    }
}

impl SubtitleStreamInfo {
    pub fn new(id: i32) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    pub fn set_field(&mut self, attribute: AttributeId, value: &str) {
        match attribute {
            AttributeId::Name => self.name = value.to_string(),
            AttributeId::LangCode => self.lang_code = value.to_string(),
            AttributeId::LangName => self.lang_name = value.to_string(),
            AttributeId::CodecId => self.codec_id = value.to_string(),
            AttributeId::CodecShort => self.codec_short = value.to_string(),
            AttributeId::CodecLong => self.codec_long = value.to_string(),
            AttributeId::StreamFlags => self.stream_flags = parse_int(value),
            AttributeId::MetadataLanguageCode => self.metadata_lang_code = value.to_string(),
            AttributeId::MetadataLanguageName => self.metadata_lang_name = value.to_string(),
            AttributeId::OutputConversionType => self.conversion_type = value.to_string(),
            _ => {}
        }
    }
}
