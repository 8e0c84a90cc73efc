//! Set of bodies currently under viewer attention

use std::collections::BTreeSet;

use crate::body::BodyId;

/// Transitions produced by one attention update
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AttentionChange {
    pub activated: Vec<BodyId>,
    pub deactivated: Vec<BodyId>,
}

impl AttentionChange {
    pub fn is_empty(&self) -> bool {
        self.activated.is_empty() && self.deactivated.is_empty()
    }
}

#[derive(Clone, Debug, Default)]
pub struct AttentionTracker {
    attended: BTreeSet<BodyId>,
}

impl AttentionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the attended set with `hits`
    pub fn update<I>(&mut self, hits: I) -> AttentionChange
    where
        I: IntoIterator<Item = BodyId>,
    {
        let next: BTreeSet<BodyId> = hits.into_iter().collect();
        let change = AttentionChange {
            activated: next.difference(&self.attended).copied().collect(),
            deactivated: self.attended.difference(&next).copied().collect(),
        };
        self.attended = next;
        change
    }

    /// Drop every attended body
    pub fn clear(&mut self) -> Vec<BodyId> {
        std::mem::take(&mut self.attended).into_iter().collect()
    }

    pub fn is_attended(&self, id: BodyId) -> bool {
        self.attended.contains(&id)
    }

    pub fn attended(&self) -> impl Iterator<Item = BodyId> + '_ {
        self.attended.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.attended.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attended.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_gaze_handover() {
        let mut tracker = AttentionTracker::new();

        let change = tracker.update(Some(BodyId(1)));
        assert_eq!(change.activated, vec![BodyId(1)]);
        assert!(change.deactivated.is_empty());

        let change = tracker.update(Some(BodyId(1)));
        assert!(change.is_empty());

        let change = tracker.update(Some(BodyId(2)));
        assert_eq!(change.activated, vec![BodyId(2)]);
        assert_eq!(change.deactivated, vec![BodyId(1)]);

        let change = tracker.update(std::iter::empty());
        assert_eq!(change.deactivated, vec![BodyId(2)]);
        assert!(tracker.is_empty());
    }

    #[test]
    fn test_multiple_attention() {
        let mut tracker = AttentionTracker::new();
        tracker.update([BodyId(3), BodyId(1)]);
        assert_eq!(tracker.len(), 2);

        let change = tracker.update([BodyId(1), BodyId(4)]);
        assert_eq!(change.activated, vec![BodyId(4)]);
        assert_eq!(change.deactivated, vec![BodyId(3)]);
        assert!(tracker.is_attended(BodyId(1)));
        assert_eq!(tracker.clear(), vec![BodyId(1), BodyId(4)]);
    }
}
