//! Serializable records exchanged with the backend.
//!
//! Only valid labels are ever written. Field names follow the camelCase
//! layout the submission endpoint expects.

use serde::{Deserialize, Serialize};

use crate::model::{Box2d, LabelId};
use crate::session::Event;

/// Geometry of a label, tagged by shape kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShapeRecord {
    Box2d(Box2d),
}

/// A label as submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelRecord {
    pub id: LabelId,
    pub name: String,
    #[serde(default)]
    pub attributes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<LabelId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<LabelId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape: Option<ShapeRecord>,
}

/// An item as submitted: its url, position and valid member labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRecord {
    pub url: String,
    pub index: usize,
    #[serde(alias = "labels")]
    pub label_ids: Vec<LabelId>,
}

/// Everything sent when the session is submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRecord {
    /// Session start, ms since the Unix epoch.
    pub start_time: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    pub items: Vec<ItemRecord>,
    pub labels: Vec<LabelRecord>,
    pub events: Vec<Event>,
}

impl SubmissionRecord {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// One entry of an assignment's item list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentItem {
    pub url: String,
}

/// The work handed to a labeler: which images to label.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentRecord {
    #[serde(default)]
    pub task_id: Option<String>,
    #[serde(default)]
    pub project_name: Option<String>,
    pub items: Vec<AssignmentItem>,
}

impl AssignmentRecord {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_record_omits_empty_links() {
        let record = LabelRecord {
            id: 2,
            name: "car".to_string(),
            attributes: vec![],
            parent: None,
            children: None,
            shape: Some(ShapeRecord::Box2d(Box2d::new(1.0, 2.0, 3.0, 4.0))),
        };
        let json = serde_json::to_value(&record).expect("serializes");
        assert_eq!(
            json,
            serde_json::json!({
                "id": 2,
                "name": "car",
                "attributes": [],
                "shape": { "box2d": { "x": 1.0, "y": 2.0, "w": 3.0, "h": 4.0 } }
            })
        );
    }

    #[test]
    fn test_item_record_accepts_both_id_keys() {
        let a: ItemRecord = serde_json::from_str(r#"{"url":"a.jpg","index":0,"labelIds":[1,2]}"#).expect("labelIds");
        let b: ItemRecord = serde_json::from_str(r#"{"url":"a.jpg","index":0,"labels":[1,2]}"#).expect("labels");
        assert_eq!(a, b);
        assert_eq!(a.label_ids, vec![1, 2]);
    }

    #[test]
    fn test_assignment_parse() {
        let assignment = AssignmentRecord::from_json(
            r#"{"taskId":"t1","items":[{"url":"a.jpg"},{"url":"b.jpg"}]}"#,
        )
        .expect("parses");
        assert_eq!(assignment.task_id.as_deref(), Some("t1"));
        assert_eq!(assignment.project_name, None);
        assert_eq!(assignment.items.len(), 2);
    }
}
