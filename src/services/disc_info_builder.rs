use crate::models::attribute::AttributeId;
use crate::models::disc_info::DiscInfo;
use crate::models::mkv::{MkvData, CINFO, SINFO, TINFO};
use crate::models::stream_info::StreamKind;
use crate::models::title_info::TitleInfo;
use crate::services::stream_index::StreamIndex;
use log::trace;

/// Largest TCOUNT that pre-sizes the title list.
pub const MAX_TITLES: usize = 9999;

/// Reconstructs a `DiscInfo` tree from decoded `info` records, one record at
/// a time. Records that reference titles or streams it can't place are
/// dropped.
#[derive(Debug, Default)]
pub struct DiscInfoBuilder {
    disc: DiscInfo,
    stream_index: StreamIndex,
    declared_title_count: Option<usize>,
}

impl DiscInfoBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, record: MkvData) {
        match record {
            MkvData::TCOUNT(tcount) => match usize::try_from(tcount.title_count) {
                Ok(count) if count <= MAX_TITLES => self.declare_title_count(count),
                Ok(count) => trace!("Ignoring title count {count}, above {MAX_TITLES}"),
                Err(_) => trace!("Ignoring negative title count {}", tcount.title_count),
            },
            MkvData::CINFO(cinfo) => self.apply_cinfo(cinfo),
            MkvData::TINFO(tinfo) => self.apply_tinfo(tinfo),
            MkvData::SINFO(sinfo) => self.apply_sinfo(sinfo),
            _ => {}
        }
    }

    pub fn finish(self) -> DiscInfo {
        self.disc
    }

    fn declare_title_count(&mut self, count: usize) {
        self.declared_title_count = Some(count);
        let titles = &mut self.disc.titles;
        while titles.len() < count {
            let id = titles.len() as u32;
            titles.push(TitleInfo::new(id));
        }
    }

    fn apply_cinfo(&mut self, cinfo: CINFO) {
        if let Some(attribute) = AttributeId::from_code(cinfo.attribute) {
            self.disc.set_field(attribute, &cinfo.value);
        }
    }

    fn apply_tinfo(&mut self, tinfo: TINFO) {
        let Some(attribute) = AttributeId::from_code(tinfo.attribute) else {
            return;
        };
        match self.title_mut(tinfo.title_id) {
            Some(title) => title.set_field(attribute, &tinfo.value),
            None => trace!("Dropping TINFO for unknown title {}", tinfo.title_id),
        }
    }

    fn apply_sinfo(&mut self, sinfo: SINFO) {
        let Some(attribute) = AttributeId::from_code(sinfo.attribute) else {
            return;
        };
        let Some(title_id) = self.title_mut(sinfo.title_id).map(|title| title.id) else {
            trace!("Dropping SINFO for unknown title {}", sinfo.title_id);
            return;
        };

        if attribute == AttributeId::Type {
            self.declare_stream(title_id, sinfo.stream_id, &sinfo.value);
            return;
        }

        let Some(bound) = self.stream_index.resolve(title_id, sinfo.stream_id) else {
            trace!(
                "Dropping SINFO {:?} for untyped stream {}:{}",
                attribute,
                title_id,
                sinfo.stream_id
            );
            return;
        };
        if let Some(mut stream) = self
            .disc
            .titles
            .get_mut(title_id as usize)
            .and_then(|title| title.stream_mut(bound.kind, bound.position))
        {
            stream.set_field(attribute, &sinfo.value);
        }
    }

    fn declare_stream(&mut self, title_id: u32, stream_id: i32, type_name: &str) {
        let Some(kind) = StreamKind::from_type_name(type_name) else {
            trace!("Unknown stream type {type_name:?} for {title_id}:{stream_id}");
            return;
        };
        if self.stream_index.is_bound(title_id, stream_id) {
            trace!("Stream {title_id}:{stream_id} already typed, ignoring {type_name:?}");
            return;
        }
        let Some(title) = self.disc.titles.get_mut(title_id as usize) else {
            return;
        };
        let position = title.push_stream(kind, stream_id);
        self.stream_index.bind(title_id, stream_id, kind, position);
    }

    // Without a TCOUNT, titles are appended as their ordinals show up in order.
    fn title_mut(&mut self, title_id: i32) -> Option<&mut TitleInfo> {
        let index = usize::try_from(title_id).ok()?;
        let titles = &mut self.disc.titles;
        if index == titles.len() && self.declared_title_count.is_none() {
            titles.push(TitleInfo::new(index as u32));
        }
        titles.get_mut(index)
    }
}
