//! Change-tracking view over shared chart data.

use std::cell::RefCell;
use std::rc::Rc;

use crate::data::{ChartData, ChartDataEntry, ChartDataStats};

/// A chart control's view of shared [`ChartData`].
///
/// The data is shared (`Rc<RefCell<...>>`) between the producer appending
/// samples and the control drawing them; the view caches the data's change
/// id so the control only rebuilds its meshes when something actually
/// changed.
#[derive(Debug, Clone)]
pub struct ChartDataView {
    data: Rc<RefCell<ChartData>>,
    seen_change_id: u64,
}

impl ChartDataView {
    /// Creates a view; the initial state counts as unseen.
    #[must_use]
    pub fn new(data: Rc<RefCell<ChartData>>) -> Self {
        Self {
            data,
            seen_change_id: u64::MAX,
        }
    }

    /// Returns true when the data changed since the last
    /// [`Self::mark_seen`].
    #[must_use]
    pub fn changed(&self) -> bool {
        self.data.borrow().change_id() != self.seen_change_id
    }

    /// Acknowledges the current data state.
    pub fn mark_seen(&mut self) {
        self.seen_change_id = self.data.borrow().change_id();
    }

    /// Returns the stats for the viewed range (custom override included).
    #[must_use]
    pub fn data_stats(&self) -> ChartDataStats {
        self.data.borrow().calculate_data_stats()
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn size(&self) -> u32 {
        self.data.borrow().size()
    }

    /// Returns a copy of the entry at `index`, oldest first.
    #[must_use]
    pub fn get(&self, index: u32) -> Option<ChartDataEntry> {
        self.data.borrow().get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use helio_core::math::MinMax;

    fn entry(value: u32) -> ChartDataEntry {
        let mut e = ChartDataEntry::new();
        e.values[0] = value;
        e
    }

    #[test]
    fn view_tracks_changes() {
        let data = Rc::new(RefCell::new(ChartData::new(4, 1).unwrap()));
        let mut view = ChartDataView::new(data.clone());

        // Fresh views report a pending change so controls draw once.
        assert!(view.changed());
        view.mark_seen();
        assert!(!view.changed());

        data.borrow_mut().append(entry(3));
        assert!(view.changed());
        view.mark_seen();
        assert!(!view.changed());
    }

    #[test]
    fn view_exposes_stats_and_entries() {
        let data = Rc::new(RefCell::new(ChartData::new(4, 1).unwrap()));
        let view = ChartDataView::new(data.clone());

        data.borrow_mut().append(entry(3));
        data.borrow_mut().append(entry(9));

        assert_eq!(view.size(), 2);
        assert_eq!(view.get(1).unwrap().values[0], 9);
        assert_eq!(view.data_stats().value_min_max, MinMax::new(3, 9));
    }
}
