use crate::models::attribute::AttributeId;
use crate::models::title_info::TitleInfo;
use serde::Serialize;

/// Everything `makemkvcon info` reported about one disc.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct DiscInfo {
    pub disc_type: String,
    pub name: String,
    pub lang_code: String,
    pub lang_name: String,
    pub volume_name: String,
    pub titles: Vec<TitleInfo>,
}

impl DiscInfo {
    pub fn set_field(&mut self, attribute: AttributeId, value: &str) {
        match attribute {
            AttributeId::Type => self.disc_type = value.to_string(),
            AttributeId::Name => self.name = value.to_string(),
            AttributeId::MetadataLanguageCode => self.lang_code = value.to_string(),
            AttributeId::MetadataLanguageName => self.lang_name = value.to_string(),
            AttributeId::VolumeName => self.volume_name = value.to_string(),
            _ => {}
        }
    }

    pub fn find_title(&self, id: u32) -> Option<&TitleInfo> {
        self.titles.iter().find(|title| title.id == id)
    }

    /// Title with the longest duration, usually the main feature.
    pub fn longest_title(&self) -> Option<&TitleInfo> {
        self.titles.iter().max_by_key(|title| title.duration)
    }
}
