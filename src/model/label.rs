//! Labels and the attributes they are created with.

use super::shape::{Box2d, LabelShape, Point, Shape};
use crate::record::LabelRecord;

/// Unique identifier for a label, allocated by the session.
pub type LabelId = u64;

/// Record attribute string for the occluded flag.
pub const OCCLUDED_ATTRIBUTE: &str = "occluded";

/// Record attribute string for the truncated flag.
pub const TRUNCATED_ATTRIBUTE: &str = "truncated";

/// What the UI had selected when a label was created.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelAttributes {
    pub category: String,
    pub occluded: bool,
    pub truncated: bool,
    /// Image point the creating click landed on.
    pub position: Point,
}

/// One labeled region.
///
/// Parent and children are ids resolved through the session, never owning
/// links. Deletion only clears `valid`; the label stays in the session for
/// the audit trail.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub id: LabelId,
    /// Category name.
    pub name: String,
    /// Free-form attribute strings beyond the two flags.
    pub attributes: Vec<String>,
    pub occluded: bool,
    pub truncated: bool,
    pub parent: Option<LabelId>,
    pub children: Vec<LabelId>,
    /// Live children; reaching zero cascades deletion to this label.
    pub num_children: usize,
    pub valid: bool,
    pub shape: Shape,
}

impl Label {
    pub fn new(id: LabelId, attributes: LabelAttributes) -> Self {
        Self {
            id,
            name: attributes.category,
            attributes: Vec::new(),
            occluded: attributes.occluded,
            truncated: attributes.truncated,
            parent: None,
            children: Vec::new(),
            num_children: 0,
            valid: true,
            shape: Shape::Box2d(Box2d::at(attributes.position)),
        }
    }

    /// Only leaf labels are drawn and pickable.
    pub fn is_leaf(&self) -> bool {
        self.num_children == 0
    }

    /// Attribute strings as written to records, flags included.
    pub fn record_attributes(&self) -> Vec<String> {
        let mut attributes = self.attributes.clone();
        if self.occluded {
            attributes.push(OCCLUDED_ATTRIBUTE.to_string());
        }
        if self.truncated {
            attributes.push(TRUNCATED_ATTRIBUTE.to_string());
        }
        attributes
    }

    pub fn to_record(&self) -> LabelRecord {
        LabelRecord {
            id: self.id,
            name: self.name.clone(),
            attributes: self.record_attributes(),
            parent: self.parent,
            children: (!self.children.is_empty()).then(|| self.children.clone()),
            shape: Some(self.shape.to_record()),
        }
    }

    /// Rebuild an unlinked label from a record. Parent and child links are
    /// restored separately once every label exists.
    pub fn from_record(record: &LabelRecord) -> Self {
        let mut attributes = Vec::new();
        let mut occluded = false;
        let mut truncated = false;
        for attribute in &record.attributes {
            match attribute.as_str() {
                OCCLUDED_ATTRIBUTE => occluded = true,
                TRUNCATED_ATTRIBUTE => truncated = true,
                _ => attributes.push(attribute.clone()),
            }
        }

        Self {
            id: record.id,
            name: record.name.clone(),
            attributes,
            occluded,
            truncated,
            parent: None,
            children: Vec::new(),
            num_children: 0,
            valid: true,
            shape: record
                .shape
                .clone()
                .map_or_else(|| Shape::Box2d(Box2d::default()), Shape::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::ShapeRecord;

    fn attributes() -> LabelAttributes {
        LabelAttributes {
            category: "car".to_string(),
            occluded: true,
            truncated: false,
            position: Point::new(5.0, 6.0),
        }
    }

    #[test]
    fn test_new_label_is_valid_leaf() {
        let label = Label::new(3, attributes());
        assert!(label.valid);
        assert!(label.is_leaf());
        assert_eq!(label.shape, Shape::Box2d(Box2d::new(5.0, 6.0, 0.0, 0.0)));
    }

    #[test]
    fn test_record_round_trip_keeps_flags() {
        let mut label = Label::new(3, attributes());
        label.attributes.push("parked".to_string());
        label.shape = Shape::Box2d(Box2d::new(1.0, 2.0, 3.0, 4.0));

        let record = label.to_record();
        assert_eq!(record.attributes, vec!["parked", "occluded"]);
        assert_eq!(record.children, None);
        assert_eq!(record.shape, Some(ShapeRecord::Box2d(Box2d::new(1.0, 2.0, 3.0, 4.0))));

        let restored = Label::from_record(&record);
        assert_eq!(restored, label);
    }
}
