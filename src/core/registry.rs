use crate::domain::model::{Role, TopologyRecord};
use std::collections::{HashMap, HashSet};

/// Zone membership and hierarchy evidence accumulated over a whole stream.
///
/// Written during the build phase, read during the emit phase.
#[derive(Debug, Default, Clone)]
pub struct ZoneRegistry {
    endpoints: HashMap<String, Vec<String>>,
    has_parent: HashSet<String>,
    has_child: HashSet<String>,
}

impl ZoneRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one record into the registry. Returns `false` if the record
    /// is not a zone and was skipped.
    ///
    /// A repeated zone name replaces the earlier endpoint list. A parent
    /// reference is recorded whether or not that parent ever shows up.
    pub fn record(&mut self, record: TopologyRecord) -> bool {
        if !record.is_zone() {
            tracing::trace!("Skipping {:?} record {:?}", record.r#type, record.name);
            return false;
        }

        if !record.parent.is_empty() {
            self.has_parent.insert(record.name.clone());
            self.has_child.insert(record.parent);
        }

        if let Some(previous) = self.endpoints.insert(record.name.clone(), record.endpoints) {
            tracing::debug!(
                "Zone {:?} seen again, replacing {} endpoints",
                record.name,
                previous.len()
            );
        }

        true
    }

    pub fn classify(&self, zone: &str) -> Role {
        if !self.has_parent.contains(zone) {
            Role::Root
        } else if self.has_child.contains(zone) {
            Role::Branch
        } else {
            Role::Leaf
        }
    }

    pub fn endpoints(&self, zone: &str) -> Option<&[String]> {
        self.endpoints.get(zone).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    /// Zones with their role and endpoints, in unspecified order.
    pub fn zones(&self) -> impl Iterator<Item = (&str, Role, &[String])> + '_ {
        self.endpoints
            .iter()
            .map(move |(zone, endpoints)| (zone.as_str(), self.classify(zone), endpoints.as_slice()))
    }

    /// Same as [`zones`](Self::zones) but ordered by zone name.
    pub fn sorted_zones(&self) -> Vec<(&str, Role, &[String])> {
        let mut zones: Vec<_> = self.zones().collect();
        zones.sort_unstable_by(|a, b| a.0.cmp(b.0));
        zones
    }
}
