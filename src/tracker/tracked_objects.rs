use crate::tracker::matching::Detection;

/// Per-frame tracker output: track id to the detection it was associated with.
///
/// Keeps the order in which ids were first associated. Inserting an id that
/// is already present replaces its detection without moving it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackedObjects {
    entries: Vec<(u64, Detection)>,
}

impl TrackedObjects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, track_id: u64, detection: Detection) {
        match self.entries.iter_mut().find(|(id, _)| *id == track_id) {
            Some(entry) => entry.1 = detection,
            None => self.entries.push((track_id, detection)),
        }
    }

    pub fn get(&self, track_id: u64) -> Option<&Detection> {
        self.entries
            .iter()
            .find(|(id, _)| *id == track_id)
            .map(|(_, det)| det)
    }

    pub fn contains(&self, track_id: u64) -> bool {
        self.get(track_id).is_some()
    }

    pub fn ids(&self) -> impl Iterator<Item = u64> + '_ {
        self.entries.iter().map(|(id, _)| *id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (u64, &Detection)> {
        self.entries.iter().map(|(id, det)| (*id, det))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(u64, Detection)> for TrackedObjects {
    fn from_iter<I: IntoIterator<Item = (u64, Detection)>>(iter: I) -> Self {
        let mut objects = Self::new();
        for (id, det) in iter {
            objects.insert(id, det);
        }
        objects
    }
}

impl IntoIterator for TrackedObjects {
    type Item = (u64, Detection);
    type IntoIter = std::vec::IntoIter<(u64, Detection)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
