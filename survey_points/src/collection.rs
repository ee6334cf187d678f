//! Ordered, in-memory table of survey points.

use std::sync::mpsc::{self, Receiver, Sender};

use crate::point::SurveyPoint;

/// Change notification sent to every subscriber of a [`PointCollection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionEvent {
    /// A point was inserted at `index`.
    Inserted { index: usize },
    /// The point at `index` was removed; later rows moved up by one.
    Removed { index: usize },
    /// The point at `index` changed in place.
    Updated { index: usize },
    /// The whole table was replaced and now holds `len` points.
    Reset { len: usize },
}

/// Authoritative, insertion-ordered set of survey points.
///
/// Identifier uniqueness is only enforced by callers that merge or import;
/// direct edits may introduce duplicates.
#[derive(Debug, Default)]
pub struct PointCollection {
    points: Vec<SurveyPoint>,
    subscribers: Vec<Sender<CollectionEvent>>,
}

impl PointCollection {
    /// Creates a new empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a collection holding `points` in the given order.
    pub fn from_points(points: Vec<SurveyPoint>) -> Self {
        Self {
            points,
            subscribers: Vec::new(),
        }
    }

    /// Registers a new subscriber. Dropping the receiver unsubscribes.
    pub fn subscribe(&mut self) -> Receiver<CollectionEvent> {
        let (sender, receiver) = mpsc::channel();
        self.subscribers.push(sender);
        receiver
    }

    fn notify(&mut self, event: CollectionEvent) {
        self.subscribers.retain(|s| s.send(event).is_ok());
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&SurveyPoint> {
        self.points.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SurveyPoint> {
        self.points.iter()
    }

    pub fn as_slice(&self) -> &[SurveyPoint] {
        &self.points
    }

    /// Appends a point and returns its index.
    pub fn append(&mut self, point: SurveyPoint) -> usize {
        let index = self.points.len();
        self.points.push(point);
        self.notify(CollectionEvent::Inserted { index });
        index
    }

    /// Removes the point at `index`. Out-of-range indices are ignored.
    pub fn remove_at(&mut self, index: usize) -> Option<SurveyPoint> {
        if index >= self.points.len() {
            return None;
        }
        let removed = self.points.remove(index);
        self.notify(CollectionEvent::Removed { index });
        Some(removed)
    }

    /// Index of the first point whose identifier equals `id` exactly.
    pub fn find_by_id(&self, id: &str) -> Option<usize> {
        self.points.iter().position(|p| p.id == id)
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.find_by_id(id).is_some()
    }

    /// Replaces the point at `index`, returning the previous value.
    pub fn replace_at(&mut self, index: usize, point: SurveyPoint) -> Option<SurveyPoint> {
        let slot = self.points.get_mut(index)?;
        let old = std::mem::replace(slot, point);
        self.notify(CollectionEvent::Updated { index });
        Some(old)
    }

    /// Applies `edit` to the point at `index`. Returns false when out of range.
    pub fn update<F>(&mut self, index: usize, edit: F) -> bool
    where
        F: FnOnce(&mut SurveyPoint),
    {
        match self.points.get_mut(index) {
            Some(p) => {
                edit(p);
                self.notify(CollectionEvent::Updated { index });
                true
            }
            None => false,
        }
    }

    /// Replaces the whole table.
    pub fn replace_all(&mut self, points: Vec<SurveyPoint>) {
        self.points = points;
        let len = self.points.len();
        self.notify(CollectionEvent::Reset { len });
    }

    pub fn clear(&mut self) {
        self.replace_all(Vec::new());
    }

    pub fn into_points(self) -> Vec<SurveyPoint> {
        self.points
    }
}

impl Clone for PointCollection {
    /// Clones the points only; subscriptions stay with the original.
    fn clone(&self) -> Self {
        Self::from_points(self.points.clone())
    }
}

impl PartialEq for PointCollection {
    fn eq(&self, other: &Self) -> bool {
        self.points == other.points
    }
}

impl<'a> IntoIterator for &'a PointCollection {
    type Item = &'a SurveyPoint;
    type IntoIter = std::slice::Iter<'a, SurveyPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
