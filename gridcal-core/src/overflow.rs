//! Overflow layout: collapse trailing items of a height-constrained container
//! into a "+N more" indicator.
//!
//! The algorithm only talks to a `LayoutHost`, so the same code runs against a
//! real rendering surface or against `StackedLayout`, which computes heights
//! from a list of fixed item sizes. The host calls `resized` when the
//! container changes size and `items_changed` when the item set changes.

use tracing::trace;

/// A rendering surface holding the items, in document order, and a sibling
/// overflow indicator.
pub trait LayoutHost {
    fn item_count(&self) -> usize;
    fn set_item_hidden(&mut self, index: usize, hidden: bool);
    fn set_overflow_visible(&mut self, visible: bool);
    /// Height of the container's content (the shown items).
    fn content_height(&self) -> u32;
    /// Height the container can show without clipping. May shrink while the
    /// overflow indicator is visible.
    fn client_height(&self) -> u32;
}

/// Tracks how many trailing items are currently collapsed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct OverflowContainer {
    overflow: usize,
}

impl OverflowContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of items hidden behind the indicator after the last pass.
    pub fn overflow(&self) -> usize {
        self.overflow
    }

    pub fn visible_count(&self, total: usize) -> usize {
        total.saturating_sub(self.overflow)
    }

    /// Show everything, then hide items from the end until the content fits.
    /// Returns the overflow count.
    pub fn remeasure<H: LayoutHost + ?Sized>(&mut self, host: &mut H) -> usize {
        let count = host.item_count();

        host.set_overflow_visible(false);
        for index in 0..count {
            host.set_item_hidden(index, false);
        }

        let mut hidden = 0;
        for index in (0..count).rev() {
            if host.content_height() <= host.client_height() {
                break;
            }
            host.set_item_hidden(index, true);
            host.set_overflow_visible(true);
            hidden = count - index;
        }

        trace!(items = count, hidden, "remeasured overflow");
        self.overflow = hidden;
        hidden
    }

    pub fn resized<H: LayoutHost + ?Sized>(&mut self, host: &mut H) -> usize {
        self.remeasure(host)
    }

    pub fn items_changed<H: LayoutHost + ?Sized>(&mut self, host: &mut H) -> usize {
        self.remeasure(host)
    }
}

/// Items stacked vertically with fixed heights and an optional gap between
/// them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackedLayout {
    heights: Vec<u32>,
    hidden: Vec<bool>,
    gap: u32,
    height: u32,
    indicator_height: u32,
    indicator_visible: bool,
}

impl StackedLayout {
    pub fn new(heights: Vec<u32>, height: u32) -> Self {
        let hidden = vec![false; heights.len()];
        StackedLayout {
            heights,
            hidden,
            gap: 0,
            height,
            indicator_height: 0,
            indicator_visible: false,
        }
    }

    pub fn with_gap(mut self, gap: u32) -> Self {
        self.gap = gap;
        self
    }

    /// Space the indicator takes from the container while it is shown.
    pub fn with_indicator_height(mut self, indicator_height: u32) -> Self {
        self.indicator_height = indicator_height;
        self
    }

    pub fn set_items(&mut self, heights: Vec<u32>) {
        self.hidden = vec![false; heights.len()];
        self.heights = heights;
    }

    pub fn resize(&mut self, height: u32) {
        self.height = height;
    }

    pub fn is_hidden(&self, index: usize) -> bool {
        self.hidden.get(index).copied().unwrap_or(false)
    }

    pub fn indicator_visible(&self) -> bool {
        self.indicator_visible
    }

    /// Indices of the items currently shown, in order.
    pub fn visible_indices(&self) -> Vec<usize> {
        (0..self.heights.len()).filter(|&i| !self.hidden[i]).collect()
    }
}

impl LayoutHost for StackedLayout {
    fn item_count(&self) -> usize {
        self.heights.len()
    }

    fn set_item_hidden(&mut self, index: usize, hidden: bool) {
        if let Some(slot) = self.hidden.get_mut(index) {
            *slot = hidden;
        }
    }

    fn set_overflow_visible(&mut self, visible: bool) {
        self.indicator_visible = visible;
    }

    fn content_height(&self) -> u32 {
        let shown: Vec<u32> = self
            .heights
            .iter()
            .zip(&self.hidden)
            .filter(|(_, hidden)| !**hidden)
            .map(|(h, _)| *h)
            .collect();

        let gaps = shown.len().saturating_sub(1) as u32 * self.gap;
        shown.iter().sum::<u32>() + gaps
    }

    fn client_height(&self) -> u32 {
        if self.indicator_visible {
            self.height.saturating_sub(self.indicator_height)
        } else {
            self.height
        }
    }
}

/// Result of a single layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverflowLayout {
    pub visible: usize,
    pub overflow: usize,
}

/// How many of `heights` fit in `container_height`, with no gap and an
/// indicator that takes no space.
pub fn fit(heights: &[u32], container_height: u32) -> OverflowLayout {
    let mut layout = StackedLayout::new(heights.to_vec(), container_height);
    let overflow = OverflowContainer::new().remeasure(&mut layout);
    OverflowLayout {
        visible: heights.len() - overflow,
        overflow,
    }
}
