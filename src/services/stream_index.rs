use crate::models::stream_info::StreamKind;
use std::collections::HashMap;

/// Where a SINFO stream ordinal landed once its type record was seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamPosition {
    pub kind: StreamKind,
    pub position: usize,
}

/// Routes SINFO attributes to the typed stream list an ordinal was bound to.
///
/// makemkvcon numbers video, audio and subtitle streams of a title in one
/// shared sequence, but the model keeps them in three lists. The first type
/// record for `(title, stream)` fixes the binding for the rest of the parse.
#[derive(Debug, Default)]
pub struct StreamIndex {
    positions: HashMap<(u32, i32), StreamPosition>,
}

impl StreamIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a binding. Returns `false` and leaves the existing binding in
    /// place when the ordinal was already bound.
    pub fn bind(
        &mut self,
        title_id: u32,
        stream_id: i32,
        kind: StreamKind,
        position: usize,
    ) -> bool {
        if self.positions.contains_key(&(title_id, stream_id)) {
            return false;
        }
        self.positions
            .insert((title_id, stream_id), StreamPosition { kind, position });
        true
    }

    pub fn is_bound(&self, title_id: u32, stream_id: i32) -> bool {
        self.positions.contains_key(&(title_id, stream_id))
    }

    pub fn resolve(&self, title_id: u32, stream_id: i32) -> Option<StreamPosition> {
        self.positions.get(&(title_id, stream_id)).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_and_resolve() {
        let mut index = StreamIndex::new();
        assert!(index.bind(0, 0, StreamKind::Video, 0));
        assert!(index.bind(0, 1, StreamKind::Audio, 0));
        assert!(index.bind(0, 2, StreamKind::Audio, 1));

        assert_eq!(
            index.resolve(0, 2),
            Some(StreamPosition {
                kind: StreamKind::Audio,
                position: 1
            })
        );
        assert_eq!(index.resolve(0, 3), None);
        assert!(index.is_bound(0, 0));
    }

    #[test]
    fn test_ordinals_are_scoped_per_title() {
        let mut index = StreamIndex::new();
        index.bind(0, 1, StreamKind::Audio, 0);
        index.bind(1, 1, StreamKind::Subtitle, 0);
        assert_eq!(index.resolve(0, 1).map(|p| p.kind), Some(StreamKind::Audio));
        assert_eq!(
            index.resolve(1, 1).map(|p| p.kind),
            Some(StreamKind::Subtitle)
        );
        assert!(!index.is_bound(2, 1));
    }

    #[test]
    fn test_first_binding_wins() {
        let mut index = StreamIndex::new();
        assert!(index.bind(0, 0, StreamKind::Video, 0));
        assert!(!index.bind(0, 0, StreamKind::Audio, 4));
        assert_eq!(
            index.resolve(0, 0),
            Some(StreamPosition {
                kind: StreamKind::Video,
                position: 0
            })
        );
    }
}
