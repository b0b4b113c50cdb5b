use crate::{
    model::Model,
    types::{GroupId, SubsetId},
};
use derive_more::Display;
use std::collections::BTreeMap;

///
/// LabelKind
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum LabelKind {
    #[display("group")]
    Group,

    #[display("subset")]
    Subset,
}

///
/// LabelLookup
///
/// Host-side display-text source (translation tables, attribute names).
/// The core only buckets and orders; it never fetches text itself.
///

pub trait LabelLookup {
    fn lookup(&self, kind: LabelKind, id: &str) -> String;
}

impl<F> LabelLookup for F
where
    F: Fn(LabelKind, &str) -> String,
{
    fn lookup(&self, kind: LabelKind, id: &str) -> String {
        self(kind, id)
    }
}

///
/// SubsetGroup
///
/// One display group: its id, display label, and member subsets sorted by
/// their display labels.
///

#[derive(Clone, Debug)]
pub struct SubsetGroup {
    pub group: GroupId,
    pub label: String,
    pub entries: Vec<GroupEntry>,
}

///
/// GroupEntry
///

#[derive(Clone, Debug)]
pub struct GroupEntry {
    pub label: String,
    pub subset: SubsetId,
}

/// Bucket the public subsets by group display label; groups and their
/// entries both come back sorted by label.
pub(crate) fn grouped_subsets(model: &Model, labels: &dyn LabelLookup) -> Vec<SubsetGroup> {
    let mut buckets: BTreeMap<String, (GroupId, Vec<GroupEntry>)> = BTreeMap::new();

    for def in model.subsets() {
        let group = def.group();
        let group_label = labels.lookup(LabelKind::Group, group.as_str());
        let entry = GroupEntry {
            label: labels.lookup(LabelKind::Subset, def.id.as_str()),
            subset: def.id.clone(),
        };

        buckets
            .entry(group_label)
            .or_insert_with(|| (group, Vec::new()))
            .1
            .push(entry);
    }

    buckets
        .into_iter()
        .map(|(label, (group, mut entries))| {
            entries.sort_by(|a, b| a.label.cmp(&b.label));

            SubsetGroup {
                group,
                label,
                entries,
            }
        })
        .collect()
}
