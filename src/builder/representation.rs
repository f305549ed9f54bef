//! Mutually exclusive representations of one concept.
//!
//! A [`Variant`](super::Variant) partitions some of its option keys into
//! [`RepresentationGroup`](super::RepresentationGroup)s. At most one group's
//! keys are present at a time: writing a key of another group drops the
//! previously active group's entries and emits two notices through the
//! builder's warning sink.

use super::Builder;
use crate::warnings::{MIXED_REPRESENTATION_WARNING, OVERWRITE_WARNING};

impl Builder {
    /// Make the group owning `key` the active one before `key` is written.
    pub(crate) fn resolve_representation(&mut self, key: &str) {
        let Some(group) = self.variant.group_of(key) else {
            return;
        };

        match self.active_representation {
            Some(active) if active == group.name => {}
            Some(active) => {
                if let Some(previous) = self.variant.group_named(active) {
                    for stale in previous.keys {
                        self.options.shift_remove(*stale);
                    }
                }
                self.sink.warn(self.variant.name, MIXED_REPRESENTATION_WARNING);
                self.sink.warn(self.variant.name, OVERWRITE_WARNING);
                self.active_representation = Some(group.name);
            }
            None => self.active_representation = Some(group.name),
        }
    }

    /// Clear the active marker once the last key of the active group is gone.
    pub(crate) fn release_representation(&mut self, key: &str) {
        let Some(group) = self.variant.group_of(key) else {
            return;
        };
        if self.active_representation != Some(group.name) {
            return;
        }
        if !group.keys.iter().any(|k| self.options.contains_key(*k)) {
            self.active_representation = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::{Builder, RepresentationGroup, Variant};
    use crate::warnings::{RecordingSink, MIXED_REPRESENTATION_WARNING, OVERWRITE_WARNING};
    use serde_json::json;

    static POINTISH: Variant = Variant::keyed("Pointish", "pointish").with_representations(&[
        RepresentationGroup::new("object", &["lat", "lon"]),
        RepresentationGroup::new("array", &["coords"]),
        RepresentationGroup::new("string", &["text"]),
    ]);

    fn recorded() -> (Builder, std::sync::Arc<RecordingSink>) {
        let sink = RecordingSink::new();
        let mut b = Builder::new(&POINTISH);
        b.set_warning_sink(sink.clone());
        (b, sink)
    }

    #[test]
    fn test_same_group_updates_without_warning() {
        let (mut b, sink) = recorded();
        b.set_option("lat", 1.0).unwrap();
        b.set_option("lon", 2.0).unwrap();
        b.set_option("lat", 3.0).unwrap();

        assert!(sink.messages().is_empty());
        assert_eq!(b.active_representation(), Some("object"));
        assert_eq!(b.to_document().unwrap(), json!({"pointish": {"lat": 3.0, "lon": 2.0}}));
    }

    #[test]
    fn test_switching_group_clears_and_warns_twice() {
        let (mut b, sink) = recorded();
        b.set_option("lat", 1.0).unwrap();
        b.set_option("lon", 2.0).unwrap();
        b.set_option("unrelated", true).unwrap();
        b.set_option("coords", vec![2.0, 1.0]).unwrap();

        assert_eq!(
            sink.messages(),
            vec![MIXED_REPRESENTATION_WARNING, OVERWRITE_WARNING]
        );
        assert_eq!(b.active_representation(), Some("array"));
        assert_eq!(
            b.to_document().unwrap(),
            json!({"pointish": {"unrelated": true, "coords": [2.0, 1.0]}})
        );
    }

    #[test]
    fn test_each_switch_warns_again() {
        let (mut b, sink) = recorded();
        b.set_option("text", "1,2").unwrap();
        b.set_option("coords", vec![2, 1]).unwrap();
        b.set_option("lat", 1).unwrap();
        assert_eq!(sink.messages().len(), 4);
        assert!(!b.has_option("text"));
        assert!(!b.has_option("coords"));
    }

    #[test]
    fn test_removing_last_key_releases_group() {
        let (mut b, sink) = recorded();
        b.set_option("text", "1,2").unwrap();
        b.remove_option("text");
        assert_eq!(b.active_representation(), None);

        b.set_option("coords", vec![2, 1]).unwrap();
        assert!(sink.messages().is_empty());
    }

    #[test]
    fn test_push_and_entry_writes_participate() {
        let (mut b, sink) = recorded();
        b.push_option("coords", 2).unwrap();
        b.push_option("coords", 1).unwrap();
        assert!(sink.messages().is_empty());

        b.insert_option_entry("text", "raw", "1,2").unwrap();
        assert_eq!(sink.messages().len(), 2);
        assert!(!b.has_option("coords"));
    }
}
