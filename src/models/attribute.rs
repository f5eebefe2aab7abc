use serde::Serialize;

/// Attribute ids used by CINFO/TINFO/SINFO records, see `AP_ItemAttributeId`
/// in makemkv's apdefs.h. The numbering is fixed by makemkvcon and will not
/// change between versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(i32)]
pub enum AttributeId {
    Unknown = 0,
    Type = 1,
    Name = 2,
    LangCode = 3,
    LangName = 4,
    CodecId = 5,
    CodecShort = 6,
    CodecLong = 7,
    ChapterCount = 8,
    Duration = 9,
    DiskSize = 10,
    DiskSizeBytes = 11,
    StreamTypeExtension = 12,
    Bitrate = 13,
    AudioChannelsCount = 14,
    AngleInfo = 15,
    SourceFileName = 16,
    AudioSampleRate = 17,
    AudioSampleSize = 18,
    VideoSize = 19,
    VideoAspectRatio = 20,
    VideoFrameRate = 21,
    StreamFlags = 22,
    DateTime = 23,
    OriginalTitleId = 24,
    SegmentsCount = 25,
    SegmentsMap = 26,
    OutputFileName = 27,
    MetadataLanguageCode = 28,
    MetadataLanguageName = 29,
    TreeInfo = 30,
    PanelTitle = 31,
    VolumeName = 32,
    OrderWeight = 33,
    OutputFormat = 34,
    OutputFormatDescription = 35,
    SeamlessInfo = 36,
    PanelText = 37,
    MkvFlags = 38,
    MkvFlagsText = 39,
    AudioChannelLayoutName = 40,
    OutputCodecShort = 41,
    OutputConversionType = 42,
    OutputAudioSampleRate = 43,
    OutputAudioSampleSize = 44,
    OutputAudioChannelsCount = 45,
    OutputAudioChannelLayoutName = 46,
    OutputAudioChannelLayout = 47,
    OutputAudioMixDescription = 48,
    Comment = 49,
    OffsetSequenceId = 50,
}

impl AttributeId {
    const ALL: [AttributeId; 51] = [
        AttributeId::Unknown,
        AttributeId::Type,
        AttributeId::Name,
        AttributeId::LangCode,
        AttributeId::LangName,
        AttributeId::CodecId,
        AttributeId::CodecShort,
        AttributeId::CodecLong,
        AttributeId::ChapterCount,
        AttributeId::Duration,
        AttributeId::DiskSize,
        AttributeId::DiskSizeBytes,
        AttributeId::StreamTypeExtension,
        AttributeId::Bitrate,
        AttributeId::AudioChannelsCount,
        AttributeId::AngleInfo,
        AttributeId::SourceFileName,
        AttributeId::AudioSampleRate,
        AttributeId::AudioSampleSize,
        AttributeId::VideoSize,
        AttributeId::VideoAspectRatio,
        AttributeId::VideoFrameRate,
        AttributeId::StreamFlags,
        AttributeId::DateTime,
        AttributeId::OriginalTitleId,
        AttributeId::SegmentsCount,
        AttributeId::SegmentsMap,
        AttributeId::OutputFileName,
        AttributeId::MetadataLanguageCode,
        AttributeId::MetadataLanguageName,
        AttributeId::TreeInfo,
        AttributeId::PanelTitle,
        AttributeId::VolumeName,
        AttributeId::OrderWeight,
        AttributeId::OutputFormat,
        AttributeId::OutputFormatDescription,
        AttributeId::SeamlessInfo,
        AttributeId::PanelText,
        AttributeId::MkvFlags,
        AttributeId::MkvFlagsText,
        AttributeId::AudioChannelLayoutName,
        AttributeId::OutputCodecShort,
        AttributeId::OutputConversionType,
        AttributeId::OutputAudioSampleRate,
        AttributeId::OutputAudioSampleSize,
        AttributeId::OutputAudioChannelsCount,
        AttributeId::OutputAudioChannelLayoutName,
        AttributeId::OutputAudioChannelLayout,
        AttributeId::OutputAudioMixDescription,
        AttributeId::Comment,
        AttributeId::OffsetSequenceId,
    ];

    /// Looks up the attribute for a raw id. Ids outside the table return `None`.
    pub fn from_code(code: i32) -> Option<Self> {
        usize::try_from(code)
            .ok()
            .and_then(|index| Self::ALL.get(index).copied())
    }

    pub fn code(self) -> i32 {
        self as i32
    }
}

impl TryFrom<i32> for AttributeId {
    type Error = i32;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        Self::from_code(code).ok_or(code)
    }
}
