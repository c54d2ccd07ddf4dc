//! Chart data storage.
//!
//! [`ChartData`] keeps a fixed-capacity ring of multi-channel samples and
//! caches the min/max of the per-sample channel sums. The cache is kept
//! exact across `append`/`clear`/`set_capacity` without rescanning the
//! buffer on every append: a full rescan only happens when the evicted
//! front sample could actually move a bound.

use thiserror::Error;

use helio_core::collections::CircularFixedSizeBuffer;
use helio_core::math::MinMax;
use helio_ui::color::UIRenderColor;

/// Maximum number of channels a chart entry can carry.
pub const MAX_CHART_CHANNELS: usize = 8;

/// Errors raised by the chart data model.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChartError {
    /// More channels were requested than an entry can hold.
    #[error("data entries exceeds capacity: requested {requested}, max {max}")]
    ChannelCountExceeded {
        /// Requested channel count.
        requested: usize,
        /// Supported maximum.
        max: usize,
    },

    /// A channel index was out of range.
    #[error("channel index {0} out of range")]
    ChannelOutOfRange(usize),
}

/// One sample: a value per channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChartDataEntry {
    /// Channel values; only the first `channel_count` entries are used.
    pub values: [u32; MAX_CHART_CHANNELS],
}

impl ChartDataEntry {
    /// Creates a zeroed entry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sums the first `channel_count` channel values.
    #[must_use]
    pub fn sum(&self, channel_count: usize) -> u32 {
        self.values.iter().take(channel_count).sum()
    }
}

/// Statistics over the viewed data range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChartDataStats {
    /// The min/max of the per-sample channel sums.
    pub value_min_max: MinMax<u32>,
}

impl ChartDataStats {
    /// Creates stats from a min/max pair.
    #[must_use]
    pub fn new(value_min_max: MinMax<u32>) -> Self {
        Self { value_min_max }
    }
}

/// Presentation metadata for one channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartChannelMetaData {
    /// Display label.
    pub label: String,
    /// Primary color used when drawing the channel.
    pub primary_color: UIRenderColor,
}

impl Default for ChartChannelMetaData {
    fn default() -> Self {
        Self {
            label: String::new(),
            primary_color: UIRenderColor::WHITE,
        }
    }
}

/// Fixed-capacity multi-channel chart data with cached statistics.
#[derive(Debug, Clone)]
pub struct ChartData {
    buffer: CircularFixedSizeBuffer<ChartDataEntry>,
    channel_count: usize,
    channel_meta: Vec<ChartChannelMetaData>,
    cached_stats: ChartDataStats,
    custom_min_max: Option<MinMax<u32>>,
    change_id: u64,
}

impl ChartData {
    /// Creates chart data with the given entry capacity and channel count.
    pub fn new(capacity: u32, channel_count: usize) -> Result<Self, ChartError> {
        if channel_count > MAX_CHART_CHANNELS {
            return Err(ChartError::ChannelCountExceeded {
                requested: channel_count,
                max: MAX_CHART_CHANNELS,
            });
        }
        Ok(Self {
            buffer: CircularFixedSizeBuffer::new(capacity as usize),
            channel_count,
            channel_meta: vec![ChartChannelMetaData::default(); channel_count],
            cached_stats: ChartDataStats::default(),
            custom_min_max: None,
            change_id: 0,
        })
    }

    /// Returns the number of channels per entry.
    #[must_use]
    pub fn channel_count(&self) -> usize {
        self.channel_count
    }

    /// Returns the number of stored entries.
    #[must_use]
    pub fn size(&self) -> u32 {
        self.buffer.len() as u32
    }

    /// Returns the entry capacity.
    #[must_use]
    pub fn capacity(&self) -> u32 {
        self.buffer.capacity() as u32
    }

    /// Returns the entry at `index`, oldest first.
    #[must_use]
    pub fn get(&self, index: u32) -> Option<ChartDataEntry> {
        self.buffer.get(index as usize).copied()
    }

    /// A monotonically increasing id bumped on every observable change.
    #[must_use]
    pub fn change_id(&self) -> u64 {
        self.change_id
    }

    /// Removes every entry and resets the cached statistics.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cached_stats = ChartDataStats::default();
        self.mark_as_changed();
    }

    /// Appends an entry, evicting the oldest when full.
    ///
    /// The cached min/max stays exact: a full recomputation only runs when
    /// the outgoing front entry sits on a cached bound that the incoming
    /// value cannot cover.
    pub fn append(&mut self, entry: ChartDataEntry) {
        let current = entry.sum(self.channel_count);

        if self.buffer.is_full() && !self.buffer.is_empty() {
            let bounds = self.cached_stats.value_min_max;
            let can_affect_min = current > bounds.min();
            let can_affect_max = current < bounds.max();
            if can_affect_min || can_affect_max {
                let front = self.buffer.front().map(|e| e.sum(self.channel_count)).unwrap_or(0);
                if front <= bounds.min() || front >= bounds.max() {
                    self.buffer.pop_front();
                    self.cached_stats = ChartDataStats::new(self.calculate_min_max());
                }
            }
        }

        if self.buffer.is_empty() {
            self.cached_stats = ChartDataStats::new(MinMax::new(current, current));
        }

        self.buffer.push_back(entry);
        let bounds = self.cached_stats.value_min_max;
        self.cached_stats = ChartDataStats::new(MinMax::new(bounds.min().min(current), bounds.max().max(current)));
        self.mark_as_changed();
    }

    /// Changes the entry capacity.
    ///
    /// Lowering the capacity discards the oldest entries and recomputes
    /// the cached statistics; raising it keeps everything.
    pub fn set_capacity(&mut self, capacity: u32) {
        let new_capacity = capacity.max(1) as usize;
        if new_capacity < self.buffer.capacity() {
            self.buffer.resize_pop_front(new_capacity);
            self.cached_stats = ChartDataStats::new(self.calculate_min_max());
            self.mark_as_changed();
        } else if new_capacity > self.buffer.capacity() {
            self.buffer.grow(new_capacity);
        }
    }

    /// Returns the stats for the viewed range (custom override or cached).
    #[must_use]
    pub fn calculate_data_stats(&self) -> ChartDataStats {
        match self.custom_min_max {
            Some(min_max) => ChartDataStats::new(min_max),
            None => self.cached_stats,
        }
    }

    /// Overrides the viewed min/max range.
    pub fn set_custom_min_max(&mut self, min_max: MinMax<u32>) {
        if self.custom_min_max != Some(min_max) {
            self.custom_min_max = Some(min_max);
            self.mark_as_changed();
        }
    }

    /// Removes the custom min/max override.
    pub fn clear_custom_min_max(&mut self) {
        if self.custom_min_max.is_some() {
            self.custom_min_max = None;
            self.mark_as_changed();
        }
    }

    /// Returns a channel's metadata.
    pub fn channel_meta_data(&self, channel_index: usize) -> Result<&ChartChannelMetaData, ChartError> {
        self.channel_meta
            .get(channel_index)
            .ok_or(ChartError::ChannelOutOfRange(channel_index))
    }

    /// Sets a channel's label (change-detected).
    pub fn set_channel_label(&mut self, channel_index: usize, label: &str) -> Result<(), ChartError> {
        let entry = self
            .channel_meta
            .get_mut(channel_index)
            .ok_or(ChartError::ChannelOutOfRange(channel_index))?;
        if entry.label != label {
            entry.label = label.to_string();
            self.mark_as_changed();
        }
        Ok(())
    }

    /// Sets a channel's primary color (change-detected).
    pub fn set_channel_color(&mut self, channel_index: usize, color: UIRenderColor) -> Result<(), ChartError> {
        let entry = self
            .channel_meta
            .get_mut(channel_index)
            .ok_or(ChartError::ChannelOutOfRange(channel_index))?;
        if entry.primary_color != color {
            entry.primary_color = color;
            self.mark_as_changed();
        }
        Ok(())
    }

    fn calculate_min_max(&self) -> MinMax<u32> {
        let mut iter = self.buffer.iter().map(|e| e.sum(self.channel_count));
        match iter.next() {
            Some(first) => {
                let mut min = first;
                let mut max = first;
                for sum in iter {
                    min = min.min(sum);
                    max = max.max(sum);
                }
                MinMax::new(min, max)
            }
            None => MinMax::default(),
        }
    }

    fn mark_as_changed(&mut self) {
        self.change_id = self.change_id.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(value: u32) -> ChartDataEntry {
        let mut e = ChartDataEntry::new();
        e.values[0] = value;
        e
    }

    fn brute_force_min_max(data: &ChartData) -> MinMax<u32> {
        let sums: Vec<u32> = (0..data.size()).filter_map(|i| data.get(i)).map(|e| e.sum(1)).collect();
        MinMax::new(
            sums.iter().copied().min().unwrap_or(0),
            sums.iter().copied().max().unwrap_or(0),
        )
    }

    #[test]
    fn channel_count_is_validated() {
        assert!(ChartData::new(8, MAX_CHART_CHANNELS).is_ok());
        assert!(matches!(
            ChartData::new(8, MAX_CHART_CHANNELS + 1),
            Err(ChartError::ChannelCountExceeded { .. })
        ));
    }

    #[test]
    fn append_tracks_min_max() {
        let mut data = ChartData::new(8, 1).unwrap();
        data.append(entry(5));
        assert_eq!(data.calculate_data_stats().value_min_max, MinMax::new(5, 5));

        data.append(entry(2));
        data.append(entry(9));
        assert_eq!(data.calculate_data_stats().value_min_max, MinMax::new(2, 9));
    }

    #[test]
    fn cached_stats_stay_exact_over_capacity() {
        let mut data = ChartData::new(4, 1).unwrap();
        let values = [10u32, 1, 7, 20, 3, 3, 50, 2, 2, 2, 2, 99, 0, 5];
        for v in values {
            data.append(entry(v));
            assert_eq!(
                data.calculate_data_stats().value_min_max,
                brute_force_min_max(&data),
                "after appending {v}"
            );
        }
    }

    #[test]
    fn clear_resets_stats() {
        let mut data = ChartData::new(4, 1).unwrap();
        data.append(entry(7));
        data.clear();
        assert_eq!(data.size(), 0);
        assert_eq!(data.calculate_data_stats().value_min_max, MinMax::default());
    }

    #[test]
    fn custom_min_max_overrides_cached() {
        let mut data = ChartData::new(4, 1).unwrap();
        data.append(entry(5));
        data.set_custom_min_max(MinMax::new(0, 100));
        assert_eq!(data.calculate_data_stats().value_min_max, MinMax::new(0, 100));

        data.clear_custom_min_max();
        assert_eq!(data.calculate_data_stats().value_min_max, MinMax::new(5, 5));
    }

    #[test]
    fn shrinking_capacity_discards_oldest_and_recomputes() {
        let mut data = ChartData::new(4, 1).unwrap();
        for v in [50, 1, 2, 3] {
            data.append(entry(v));
        }
        data.set_capacity(2);
        assert_eq!(data.size(), 2);
        assert_eq!(data.calculate_data_stats().value_min_max, MinMax::new(2, 3));
    }

    #[test]
    fn multi_channel_sums() {
        let mut data = ChartData::new(4, 2).unwrap();
        let mut e = ChartDataEntry::new();
        e.values[0] = 3;
        e.values[1] = 4;
        // A third channel value is ignored with channel_count == 2.
        e.values[2] = 100;
        data.append(e);
        assert_eq!(data.calculate_data_stats().value_min_max, MinMax::new(7, 7));
    }

    #[test]
    fn channel_metadata_changes_bump_the_change_id() {
        let mut data = ChartData::new(4, 2).unwrap();
        let before = data.change_id();

        data.set_channel_label(0, "cpu").unwrap();
        assert!(data.change_id() > before);

        let unchanged = data.change_id();
        data.set_channel_label(0, "cpu").unwrap();
        assert_eq!(data.change_id(), unchanged);

        assert!(data.set_channel_label(2, "oops").is_err());
    }
}
