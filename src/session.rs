//! The labeling session: items, labels, id allocation and the event log.
//!
//! The session is the single owner of every label ever created, soft-deleted
//! ones included. Items and labels refer to each other by id only, and all
//! parent/child bookkeeping (including cascading deletes) goes through here.

use std::collections::HashMap;

use image::RgbaImage;
use serde::{Deserialize, Serialize};

use crate::color_utils::pick_color_palette;
use crate::error::SessionError;
use crate::model::{Item, Label, LabelAttributes, LabelId, Point};
use crate::record::{AssignmentRecord, ItemRecord, LabelRecord, SubmissionRecord};

/// Milliseconds since the Unix epoch.
pub(crate) fn now_millis() -> u64 {
    let now = web_time::SystemTime::now();
    let duration = now
        .duration_since(web_time::SystemTime::UNIX_EPOCH)
        .unwrap_or_default();
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// What happened in a logged event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventAction {
    #[serde(rename = "start labeling")]
    StartLabeling,
    #[serde(rename = "loaded")]
    Loaded,
    #[serde(rename = "goto item")]
    GotoItem,
    #[serde(rename = "create label")]
    CreateLabel,
    #[serde(rename = "move label")]
    MoveLabel,
    #[serde(rename = "resize label")]
    ResizeLabel,
    #[serde(rename = "delete label")]
    DeleteLabel,
    #[serde(rename = "change category")]
    ChangeCategory,
    #[serde(rename = "toggle occluded")]
    ToggleOccluded,
    #[serde(rename = "toggle truncated")]
    ToggleTruncated,
    #[serde(rename = "submit")]
    Submit,
}

/// One entry of the append-only audit log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// ms since the Unix epoch
    pub timestamp: u64,
    pub action: EventAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_index: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_id: Option<LabelId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Point>,
}

/// A labeling session over an ordered list of items.
#[derive(Debug, Clone)]
pub struct Session {
    items: Vec<Item>,
    labels: Vec<Label>,
    /// Label id -> position in `labels`
    label_index: HashMap<LabelId, usize>,
    last_label_id: LabelId,
    current_item: Option<usize>,
    events: Vec<Event>,
    start_time: u64,
    task_id: Option<String>,
    project_name: Option<String>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            labels: Vec::new(),
            label_index: HashMap::new(),
            last_label_id: 0,
            current_item: None,
            events: Vec::new(),
            start_time: now_millis(),
            task_id: None,
            project_name: None,
        }
    }

    /// Build a session holding the assignment's items, positioned on the first.
    pub fn from_assignment(assignment: &AssignmentRecord) -> Self {
        let mut session = Self::new();
        session.task_id = assignment.task_id.clone();
        session.project_name = assignment.project_name.clone();
        for item in &assignment.items {
            session.new_item(item.url.clone());
        }
        log::info!(
            "Started labeling {} items (task {:?}, project {:?})",
            session.items.len(),
            session.task_id,
            session.project_name
        );
        session.add_event(EventAction::StartLabeling, session.current_item, None, None);
        session
    }

    pub fn start_time(&self) -> u64 {
        self.start_time
    }

    pub fn task_id(&self) -> Option<&str> {
        self.task_id.as_deref()
    }

    pub fn project_name(&self) -> Option<&str> {
        self.project_name.as_deref()
    }

    // ------------------------------------------------------------------------
    // Items
    // ------------------------------------------------------------------------

    /// Append an item. The first item becomes the current one.
    pub fn new_item(&mut self, url: impl Into<String>) -> usize {
        let index = self.items.len();
        self.items.push(Item::new(index, url));
        if self.current_item.is_none() {
            self.current_item = Some(index);
        }
        index
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn item(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current_item
    }

    pub fn current_item(&self) -> Option<&Item> {
        self.current_item.and_then(|i| self.items.get(i))
    }

    /// Make another item current. The index wraps around the item list in
    /// both directions.
    pub fn goto_item(&mut self, index: isize) -> Option<usize> {
        let len = isize::try_from(self.items.len()).ok().filter(|&len| len > 0)?;
        let wrapped = usize::try_from(index.rem_euclid(len)).ok()?;
        self.current_item = Some(wrapped);
        log::info!("Switched to item {}/{}", wrapped + 1, len);
        self.add_event(EventAction::GotoItem, Some(wrapped), None, None);
        Some(wrapped)
    }

    /// Index of the item before `index`, if any.
    pub fn previous_item(&self, index: usize) -> Option<usize> {
        index.checked_sub(1).filter(|&i| i < self.items.len())
    }

    /// Index of the item after `index`, if any.
    pub fn next_item(&self, index: usize) -> Option<usize> {
        let next = index + 1;
        (next < self.items.len()).then_some(next)
    }

    /// Record that an item's asset finished loading. Returns false for an
    /// unknown index.
    pub fn item_loaded(&mut self, index: usize, pixels: Option<RgbaImage>) -> bool {
        let Some(item) = self.items.get_mut(index) else {
            log::warn!("Load notification for unknown item {}", index);
            return false;
        };
        item.mark_loaded(pixels);
        log::debug!("Item {} loaded ({:?})", index, item.image_size());
        self.add_event(EventAction::Loaded, Some(index), None, None);
        true
    }

    // ------------------------------------------------------------------------
    // Labels
    // ------------------------------------------------------------------------

    fn new_label_id(&mut self) -> LabelId {
        self.last_label_id += 1;
        self.last_label_id
    }

    fn register(&mut self, label: Label) {
        self.label_index.insert(label.id, self.labels.len());
        self.last_label_id = self.last_label_id.max(label.id);
        self.labels.push(label);
    }

    /// Create a label, register it and add it to the current item.
    pub fn new_label(&mut self, attributes: LabelAttributes) -> LabelId {
        let id = self.new_label_id();
        let position = attributes.position;
        self.register(Label::new(id, attributes));

        match self.current_item.and_then(|i| self.items.get_mut(i)) {
            Some(item) => item.add_label(id),
            None => log::warn!("Label {} created with no current item", id),
        }

        log::debug!("Created label {}", id);
        self.add_event(EventAction::CreateLabel, self.current_item, Some(id), Some(position));
        id
    }

    pub fn label(&self, id: LabelId) -> Option<&Label> {
        self.label_index.get(&id).map(|&i| &self.labels[i])
    }

    pub fn label_mut(&mut self, id: LabelId) -> Option<&mut Label> {
        self.label_index.get(&id).map(|&i| &mut self.labels[i])
    }

    /// Every label ever created, in creation order.
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    fn require(&self, id: LabelId) -> Result<&Label, SessionError> {
        self.label(id).ok_or(SessionError::UnknownLabel { id })
    }

    /// Whether `ancestor` appears on the parent chain of `id` (or is `id`).
    fn is_ancestor(&self, ancestor: LabelId, id: LabelId) -> bool {
        let mut current = Some(id);
        let mut steps = 0;
        while let Some(cur) = current {
            if cur == ancestor {
                return true;
            }
            steps += 1;
            if steps > self.labels.len() {
                break;
            }
            current = self.label(cur).and_then(|l| l.parent);
        }
        false
    }

    /// Make `child` a child of `parent`, detaching it from any previous parent.
    pub fn add_child(&mut self, parent: LabelId, child: LabelId) -> Result<(), SessionError> {
        self.require(parent)?;
        let previous = self.require(child)?.parent;
        if self.is_ancestor(child, parent) {
            return Err(SessionError::CyclicLink { parent, child });
        }
        if previous == Some(parent) {
            return Ok(());
        }

        let child_valid = self.require(child)?.valid;
        if let Some(old) = previous.and_then(|p| self.label_mut(p)) {
            old.children.retain(|&c| c != child);
            if child_valid {
                old.num_children = old.num_children.saturating_sub(1);
            }
        }
        if let Some(label) = self.label_mut(child) {
            label.parent = Some(parent);
        }
        if let Some(label) = self.label_mut(parent) {
            if !label.children.contains(&child) {
                label.children.push(child);
            }
            if child_valid {
                label.num_children += 1;
            }
        }
        Ok(())
    }

    /// Topmost ancestor of a label (the label itself when it has no parent).
    pub fn root_of(&self, id: LabelId) -> LabelId {
        let mut current = id;
        for _ in 0..=self.labels.len() {
            match self.label(current).and_then(|l| l.parent) {
                Some(parent) => current = parent,
                None => return current,
            }
        }
        log::warn!("Parent chain of label {} does not terminate", id);
        current
    }

    /// Palette color of a label, shared by every label under the same root.
    pub fn color_of(&self, id: LabelId) -> [u8; 3] {
        pick_color_palette(self.root_of(id))
    }

    /// Soft-delete a label and cascade.
    ///
    /// The parent loses one live child and is deleted itself once it has
    /// none left. Every child of the label is detached and deleted. Returns
    /// how many labels were newly invalidated.
    pub fn delete_label(&mut self, id: LabelId) -> usize {
        let Some(label) = self.label_mut(id) else {
            log::warn!("Delete requested for unknown label {}", id);
            return 0;
        };
        if !label.valid {
            return 0;
        }
        label.valid = false;
        let parent = label.parent;
        let children = label.children.clone();
        let mut deleted = 1;

        if let Some(parent_id) = parent {
            let orphaned = match self.label_mut(parent_id) {
                Some(p) if p.valid => {
                    p.num_children = p.num_children.saturating_sub(1);
                    p.num_children == 0
                }
                _ => false,
            };
            if orphaned {
                deleted += self.delete_label(parent_id);
            }
        }

        for child in children {
            // Already deleted children keep their link for the audit trail.
            let Some(c) = self.label_mut(child).filter(|c| c.valid) else {
                continue;
            };
            c.parent = None;
            deleted += self.delete_label(child);
        }

        log::debug!("Deleted label {} ({} total with cascade)", id, deleted);
        deleted
    }

    /// Valid leaf labels of an item, in drawing order.
    pub fn visible_labels(&self, item_index: usize) -> Vec<&Label> {
        self.items
            .get(item_index)
            .map(|item| {
                item.labels()
                    .iter()
                    .filter_map(|&id| self.label(id))
                    .filter(|l| l.valid && l.is_leaf())
                    .collect()
            })
            .unwrap_or_default()
    }

    // ------------------------------------------------------------------------
    // Event log
    // ------------------------------------------------------------------------

    pub fn add_event(
        &mut self,
        action: EventAction,
        item_index: Option<usize>,
        label_id: Option<LabelId>,
        position: Option<Point>,
    ) {
        self.events.push(Event {
            timestamp: now_millis(),
            action,
            item_index,
            label_id,
            position,
        });
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    // ------------------------------------------------------------------------
    // Records
    // ------------------------------------------------------------------------

    /// Snapshot for submission. Soft-deleted labels are left out.
    pub fn submission(&self) -> SubmissionRecord {
        let items = self
            .items
            .iter()
            .map(|item| ItemRecord {
                url: item.url().to_string(),
                index: item.index(),
                label_ids: item
                    .labels()
                    .iter()
                    .copied()
                    .filter(|&id| self.label(id).is_some_and(|l| l.valid))
                    .collect(),
            })
            .collect();

        let labels = self
            .labels
            .iter()
            .filter(|l| l.valid)
            .map(|l| self.label_record(l))
            .collect();

        SubmissionRecord {
            start_time: self.start_time,
            task_id: self.task_id.clone(),
            project_name: self.project_name.clone(),
            items,
            labels,
            events: self.events.clone(),
        }
    }

    /// Record of a label with links to deleted labels left out.
    fn label_record(&self, label: &Label) -> LabelRecord {
        let live = |id: &LabelId| self.label(*id).is_some_and(|l| l.valid);
        let mut record = label.to_record();
        record.parent = record.parent.filter(live);
        record.children = record
            .children
            .map(|children| children.into_iter().filter(live).collect::<Vec<_>>())
            .filter(|children| !children.is_empty());
        record
    }

    /// Log a submit event and return the submission snapshot.
    pub fn submit(&mut self) -> SubmissionRecord {
        self.add_event(EventAction::Submit, self.current_item, None, None);
        let submission = self.submission();
        log::info!(
            "Submitting {} labels over {} items",
            submission.labels.len(),
            submission.items.len()
        );
        submission
    }

    /// Load labels and item membership from records.
    ///
    /// Labels are created first and linked second, so records may reference
    /// labels that appear later in the list. On error the session is left as
    /// it was.
    pub fn restore(&mut self, labels: &[LabelRecord], items: &[ItemRecord]) -> Result<(), SessionError> {
        let labels_before = self.labels.clone();
        let index_before = self.label_index.clone();
        let last_id_before = self.last_label_id;
        let members_before: Vec<Vec<LabelId>> = self.items.iter().map(|i| i.labels().to_vec()).collect();

        let result = self.apply_records(labels, items);
        if result.is_err() {
            self.labels = labels_before;
            self.label_index = index_before;
            self.last_label_id = last_id_before;
            for (item, members) in self.items.iter_mut().zip(members_before) {
                item.set_labels(members);
            }
        }
        result
    }

    fn apply_records(&mut self, labels: &[LabelRecord], items: &[ItemRecord]) -> Result<(), SessionError> {
        for record in labels {
            if self.label_index.contains_key(&record.id) {
                return Err(SessionError::DuplicateLabel { id: record.id });
            }
            self.register(Label::from_record(record));
        }

        for record in labels {
            if let Some(parent) = record.parent {
                self.add_child(parent, record.id)?;
            }
            for &child in record.children.iter().flatten() {
                self.add_child(record.id, child)?;
            }
        }

        let len = self.items.len();
        for record in items {
            for &id in &record.label_ids {
                self.require(id)?;
            }
            let item = self
                .items
                .get_mut(record.index)
                .ok_or(SessionError::ItemOutOfRange { index: record.index, len })?;
            for &id in &record.label_ids {
                item.add_label(id);
            }
        }

        log::info!("Restored {} labels into {} items", labels.len(), items.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::AssignmentItem;

    fn attributes(x: f32, y: f32) -> LabelAttributes {
        LabelAttributes {
            category: "car".to_string(),
            occluded: false,
            truncated: false,
            position: Point::new(x, y),
        }
    }

    fn session_with_items(n: usize) -> Session {
        let assignment = AssignmentRecord {
            task_id: Some("task".to_string()),
            project_name: None,
            items: (0..n).map(|i| AssignmentItem { url: format!("img{i}.jpg") }).collect(),
        };
        Session::from_assignment(&assignment)
    }

    #[test]
    fn test_ids_are_monotonic_and_registered() {
        let mut session = session_with_items(1);
        let a = session.new_label(attributes(0.0, 0.0));
        let b = session.new_label(attributes(1.0, 1.0));
        assert_eq!((a, b), (1, 2));
        assert_eq!(session.current_item().map(|i| i.labels().to_vec()), Some(vec![1, 2]));
        assert_eq!(session.label(b).map(|l| l.id), Some(2));
    }

    #[test]
    fn test_goto_wraps_both_ways() {
        let mut session = session_with_items(3);
        assert_eq!(session.goto_item(4), Some(1));
        assert_eq!(session.goto_item(-1), Some(2));
        assert_eq!(session.current_index(), Some(2));
        assert_eq!(Session::new().goto_item(0), None);
    }

    #[test]
    fn test_previous_and_next_stop_at_ends() {
        let session = session_with_items(3);
        assert_eq!(session.previous_item(0), None);
        assert_eq!(session.previous_item(2), Some(1));
        assert_eq!(session.next_item(1), Some(2));
        assert_eq!(session.next_item(2), None);
    }

    #[test]
    fn test_item_loaded_sets_ready() {
        let mut session = session_with_items(1);
        assert!(!session.items()[0].is_ready());
        assert!(session.item_loaded(0, Some(RgbaImage::new(4, 3))));
        assert!(session.items()[0].is_ready());
        assert_eq!(session.items()[0].image_size(), Some((4, 3)));
        assert!(!session.item_loaded(5, None));
        assert_eq!(session.events().last().map(|e| e.action), Some(EventAction::Loaded));
    }

    #[test]
    fn test_color_follows_root() {
        let mut session = session_with_items(1);
        let root = session.new_label(attributes(0.0, 0.0));
        let child = session.new_label(attributes(1.0, 1.0));
        let grandchild = session.new_label(attributes(2.0, 2.0));
        session.add_child(root, child).expect("link");
        session.add_child(child, grandchild).expect("link");

        assert_eq!(session.root_of(grandchild), root);
        assert_eq!(session.color_of(grandchild), session.color_of(root));
        assert_eq!(session.color_of(child), pick_color_palette(root));
    }

    #[test]
    fn test_cyclic_link_rejected() {
        let mut session = session_with_items(1);
        let a = session.new_label(attributes(0.0, 0.0));
        let b = session.new_label(attributes(0.0, 0.0));
        session.add_child(a, b).expect("link");
        assert!(matches!(session.add_child(b, a), Err(SessionError::CyclicLink { .. })));
        assert!(matches!(session.add_child(a, a), Err(SessionError::CyclicLink { .. })));
        assert!(matches!(session.add_child(a, 99), Err(SessionError::UnknownLabel { id: 99 })));
    }

    #[test]
    fn test_reparent_moves_child_count() {
        let mut session = session_with_items(1);
        let a = session.new_label(attributes(0.0, 0.0));
        let b = session.new_label(attributes(0.0, 0.0));
        let c = session.new_label(attributes(0.0, 0.0));
        session.add_child(a, c).expect("link");
        session.add_child(b, c).expect("relink");

        assert_eq!(session.label(a).map(|l| l.num_children), Some(0));
        assert_eq!(session.label(b).map(|l| l.num_children), Some(1));
        assert_eq!(session.label(c).and_then(|l| l.parent), Some(b));
    }

    #[test]
    fn test_delete_last_child_cascades_to_parent() {
        let mut session = session_with_items(1);
        let parent = session.new_label(attributes(0.0, 0.0));
        let first = session.new_label(attributes(0.0, 0.0));
        let second = session.new_label(attributes(0.0, 0.0));
        session.add_child(parent, first).expect("link");
        session.add_child(parent, second).expect("link");

        assert_eq!(session.delete_label(first), 1);
        assert!(session.label(parent).is_some_and(|l| l.valid));
        assert_eq!(session.label(parent).map(|l| l.num_children), Some(1));

        assert_eq!(session.delete_label(second), 2);
        assert!(session.label(parent).is_some_and(|l| !l.valid));
    }

    #[test]
    fn test_delete_parent_cascades_to_children() {
        let mut session = session_with_items(1);
        let parent = session.new_label(attributes(0.0, 0.0));
        let first = session.new_label(attributes(0.0, 0.0));
        let second = session.new_label(attributes(0.0, 0.0));
        let grandchild = session.new_label(attributes(0.0, 0.0));
        session.add_child(parent, first).expect("link");
        session.add_child(parent, second).expect("link");
        session.add_child(second, grandchild).expect("link");

        assert_eq!(session.delete_label(parent), 4);
        for id in [parent, first, second, grandchild] {
            assert!(session.label(id).is_some_and(|l| !l.valid));
        }
        // Children were detached before their own deletion.
        assert_eq!(session.label(first).and_then(|l| l.parent), None);
        assert_eq!(session.delete_label(parent), 0);
    }

    #[test]
    fn test_visible_labels_are_valid_leaves() {
        let mut session = session_with_items(1);
        let parent = session.new_label(attributes(0.0, 0.0));
        let child = session.new_label(attributes(0.0, 0.0));
        let lone = session.new_label(attributes(0.0, 0.0));
        let gone = session.new_label(attributes(0.0, 0.0));
        session.add_child(parent, child).expect("link");
        session.delete_label(gone);

        let visible: Vec<LabelId> = session.visible_labels(0).iter().map(|l| l.id).collect();
        assert_eq!(visible, vec![child, lone]);
        assert!(session.visible_labels(7).is_empty());
    }

    #[test]
    fn test_submission_skips_deleted_labels() {
        let mut session = session_with_items(2);
        let kept = session.new_label(attributes(0.0, 0.0));
        let dropped = session.new_label(attributes(0.0, 0.0));
        session.delete_label(dropped);

        let submission = session.submit();
        assert_eq!(submission.task_id.as_deref(), Some("task"));
        assert_eq!(submission.labels.iter().map(|l| l.id).collect::<Vec<_>>(), vec![kept]);
        assert_eq!(submission.items[0].label_ids, vec![kept]);
        assert!(submission.items[1].label_ids.is_empty());
        assert_eq!(submission.events.first().map(|e| e.action), Some(EventAction::StartLabeling));
        assert_eq!(submission.events.last().map(|e| e.action), Some(EventAction::Submit));

        // Deleted labels stay in the session for the audit trail.
        assert_eq!(session.labels().len(), 2);
    }

    #[test]
    fn test_event_json_shape() {
        let event = Event {
            timestamp: 5,
            action: EventAction::CreateLabel,
            item_index: Some(0),
            label_id: Some(3),
            position: Some(Point::new(1.0, 2.0)),
        };
        let json = serde_json::to_value(&event).expect("serializes");
        assert_eq!(
            json,
            serde_json::json!({
                "timestamp": 5,
                "action": "create label",
                "itemIndex": 0,
                "labelId": 3,
                "position": { "x": 1.0, "y": 2.0 }
            })
        );
    }

    #[test]
    fn test_restore_round_trip() {
        let mut first = session_with_items(2);
        let parent = first.new_label(attributes(0.0, 0.0));
        let child = first.new_label(attributes(10.0, 10.0));
        first.add_child(parent, child).expect("link");
        let submission = first.submission();

        let mut restored = session_with_items(2);
        restored
            .restore(&submission.labels, &submission.items)
            .expect("records are consistent");

        assert_eq!(restored.labels(), first.labels());
        assert_eq!(restored.items()[0].labels(), &[parent, child]);
        // New ids continue after the restored ones.
        assert_eq!(restored.new_label(attributes(0.0, 0.0)), 3);
    }

    #[test]
    fn test_submission_drops_links_to_deleted_children() {
        let mut first = session_with_items(1);
        let parent = first.new_label(attributes(0.0, 0.0));
        let kept = first.new_label(attributes(10.0, 10.0));
        let dropped = first.new_label(attributes(20.0, 20.0));
        first.add_child(parent, kept).expect("link");
        first.add_child(parent, dropped).expect("link");
        first.delete_label(dropped);

        let submission = first.submission();
        let parent_record = submission
            .labels
            .iter()
            .find(|l| l.id == parent)
            .expect("parent is still valid");
        assert_eq!(parent_record.children, Some(vec![kept]));

        let mut restored = session_with_items(1);
        restored
            .restore(&submission.labels, &submission.items)
            .expect("own submission loads back");
        assert_eq!(restored.label(parent).map(|l| l.num_children), Some(1));
        assert_eq!(restored.label(kept).and_then(|l| l.parent), Some(parent));
        assert!(restored.label(dropped).is_none());
        assert_eq!(restored.items()[0].labels(), &[parent, kept]);
    }

    #[test]
    fn test_cascade_keeps_links_of_deleted_children() {
        let mut session = session_with_items(1);
        let parent = session.new_label(attributes(0.0, 0.0));
        let early = session.new_label(attributes(0.0, 0.0));
        let late = session.new_label(attributes(0.0, 0.0));
        session.add_child(parent, early).expect("link");
        session.add_child(parent, late).expect("link");

        assert_eq!(session.delete_label(early), 1);
        assert_eq!(session.delete_label(parent), 2);

        assert_eq!(session.label(early).and_then(|l| l.parent), Some(parent));
        assert_eq!(session.label(late).and_then(|l| l.parent), None);
        assert!(session.label(late).is_some_and(|l| !l.valid));
    }

    #[test]
    fn test_restore_rolls_back_on_error() {
        let mut session = session_with_items(1);
        let existing = session.new_label(attributes(0.0, 0.0));
        let labels = vec![LabelRecord {
            id: 10,
            name: "car".to_string(),
            attributes: vec![],
            parent: Some(42),
            children: None,
            shape: None,
        }];

        let result = session.restore(&labels, &[]);
        assert!(matches!(result, Err(SessionError::UnknownLabel { id: 42 })));
        assert!(session.label(10).is_none());
        assert_eq!(session.labels().len(), 1);
        assert_eq!(session.new_label(attributes(0.0, 0.0)), existing + 1);

        let items = vec![ItemRecord {
            url: "x.jpg".to_string(),
            index: 3,
            label_ids: vec![existing],
        }];
        assert!(matches!(
            session.restore(&[], &items),
            Err(SessionError::ItemOutOfRange { index: 3, len: 1 })
        ));
    }
}
