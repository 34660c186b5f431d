//! Study participants and their recorded gestures.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::gesture::Gesture;
use crate::types::{GestureCategory, HandSide};

/// A study participant: a name plus their recordings grouped by gesture
/// category. A subject may have zero, one, or many recordings per category.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Subject {
    pub name: String,
    pub gestures: HashMap<GestureCategory, Vec<Gesture>>,
}

impl Subject {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            gestures: HashMap::new(),
        }
    }

    pub fn add_gesture(&mut self, gesture: Gesture) {
        self.gestures.entry(gesture.category).or_default().push(gesture);
    }

    /// Categories this subject has recordings for, in stable order.
    pub fn categories(&self) -> Vec<GestureCategory> {
        let mut categories: Vec<_> = self.gestures.keys().copied().collect();
        categories.sort();
        categories
    }

    /// Recordings for a category; `None` distinguishes "no data for this
    /// category" from an empty collection.
    pub fn gestures_in(&self, category: GestureCategory) -> Option<&[Gesture]> {
        self.gestures.get(&category).map(Vec::as_slice)
    }

    /// Recordings matching both category and hand side.
    pub fn recordings(&self, category: GestureCategory, hand: HandSide) -> Vec<&Gesture> {
        self.gestures
            .get(&category)
            .map(|gestures| gestures.iter().filter(|g| g.hand == hand).collect())
            .unwrap_or_default()
    }

    /// Total number of recordings across all categories.
    pub fn recording_count(&self) -> usize {
        self.gestures.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Joint;
    use crate::gesture::Pose;

    fn gesture(category: GestureCategory, hand: HandSide) -> Gesture {
        let pose = Pose::new(vec![Joint::origin(); 4], 0.0).unwrap();
        Gesture::new(category, hand, vec![pose]).unwrap()
    }

    #[test]
    fn test_add_and_query() {
        let mut subject = Subject::new("p01");
        subject.add_gesture(gesture(GestureCategory::Pan, HandSide::Left));
        subject.add_gesture(gesture(GestureCategory::Pan, HandSide::Right));
        subject.add_gesture(gesture(GestureCategory::Zoom, HandSide::Left));

        assert_eq!(subject.recording_count(), 3);
        assert_eq!(subject.gestures_in(GestureCategory::Pan).unwrap().len(), 2);
        assert!(subject.gestures_in(GestureCategory::Rotate).is_none());
        assert_eq!(
            subject.recordings(GestureCategory::Pan, HandSide::Left).len(),
            1
        );
        assert_eq!(
            subject.categories(),
            vec![GestureCategory::Pan, GestureCategory::Zoom]
        );
    }
}
