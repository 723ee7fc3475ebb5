//! Dual-wheel time picker geometry and state.
//!
//! Two independently scrollable value columns (hour and minute) convert
//! scroll offsets to discrete indices and back. The conversion must
//! round-trip for every valid index — the mount scroll, the drag highlight
//! and the settle commit all go through the same two formulas.
//!
//! ```text
//!        ╔═══════════════════╗ ─┬─ paddingTop = (container − item) / 2
//!        ║        13         ║  │
//!        ║ ┌───────────────┐ ║ ─┴─
//!        ║ │      14       │ ║  ◀── centered row at rest offset for index 14
//!        ║ └───────────────┘ ║
//!        ║        15         ║
//!        ╚═══════════════════╝
//! ```
//!
//! Draft-vs-committed discipline: while a drag is active only the
//! *candidate* (visual highlight) follows the finger; the *committed* value
//! changes exactly once, at drag-momentum settle. The scroll surface itself
//! is configured to snap to `item_height` intervals, so rest positions land
//! on exact row boundaries and no corrective scroll is ever issued.

use log::debug;

/// Number of rows in the hour wheel (0–23).
pub const HOUR_WHEEL_LEN: usize = 24;
/// Number of rows in the minute wheel (0, 5, …, 55).
pub const MINUTE_WHEEL_LEN: usize = 12;
/// Minute granularity.
pub const MINUTE_STEP: u8 = 5;

/// Which of the two wheels a drag or settle refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelKind {
    Hour,
    Minute,
}

// ---------------------------------------------------------------------------
// Layout geometry
// ---------------------------------------------------------------------------

/// Pixel geometry of one wheel, measured by the shell at layout time.
///
/// `padding_top` centers exactly one row when the scroll offset is at the
/// rest position of index 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelLayout {
    pub item_height: f32,
    pub container_height: f32,
}

impl WheelLayout {
    pub fn new(item_height: f32, container_height: f32) -> Self {
        debug_assert!(item_height > 0.0, "item height must be positive");
        debug_assert!(
            container_height >= item_height,
            "container must fit at least one row"
        );
        Self {
            item_height,
            container_height,
        }
    }

    /// Top padding that centers one row at rest offset 0.
    pub fn padding_top(&self) -> f32 {
        (self.container_height - self.item_height) / 2.0
    }

    /// Rest scroll offset at which row `index` sits centered.
    pub fn offset_for_index(&self, index: usize) -> f32 {
        self.padding_top() + index as f32 * self.item_height + self.item_height / 2.0
            - self.container_height / 2.0
    }

    /// Which row is centered at `offset`, clamped into `[0, len)`.
    pub fn index_from_offset(&self, offset: f32, len: usize) -> usize {
        debug_assert!(len > 0, "wheel domain must be non-empty");
        let raw = (offset + self.container_height / 2.0
            - self.padding_top()
            - self.item_height / 2.0)
            / self.item_height;
        let rounded = raw.round() as isize;
        rounded.clamp(0, len as isize - 1) as usize
    }

    /// Interval the shell configures the scroll surface to snap to.
    pub fn snap_interval(&self) -> f32 {
        self.item_height
    }
}

// ---------------------------------------------------------------------------
// Wheel state
// ---------------------------------------------------------------------------

/// One scrollable value column with draft/committed duality.
///
/// `committed` is the authoritative value emitted to the owning flow;
/// `candidate` is the row currently under the highlight while dragging.
#[derive(Debug, Clone)]
pub struct WheelState {
    values: Vec<u8>,
    layout: WheelLayout,
    committed: usize,
    candidate: usize,
    scroll_offset: f32,
}

impl WheelState {
    /// Generic constructor; prefer [`hours`](Self::hours) and
    /// [`minutes`](Self::minutes).
    pub fn new(values: Vec<u8>, layout: WheelLayout, initial_index: usize) -> Self {
        debug_assert!(!values.is_empty(), "wheel domain must be non-empty");
        let initial = initial_index.min(values.len() - 1);
        let scroll_offset = layout.offset_for_index(initial);
        Self {
            values,
            layout,
            committed: initial,
            candidate: initial,
            scroll_offset,
        }
    }

    /// Hour wheel, 24 rows, positioned at `initial_hour`.
    pub fn hours(layout: WheelLayout, initial_hour: u8) -> Self {
        let values: Vec<u8> = (0..HOUR_WHEEL_LEN as u8).collect();
        let index = usize::from(initial_hour.min(23));
        Self::new(values, layout, index)
    }

    /// Minute wheel, 12 rows at 5-minute granularity, positioned at the
    /// nearest step to `initial_minute`.
    pub fn minutes(layout: WheelLayout, initial_minute: u8) -> Self {
        let values: Vec<u8> = (0..MINUTE_WHEEL_LEN as u8).map(|i| i * MINUTE_STEP).collect();
        let index = (f32::from(initial_minute.min(59)) / f32::from(MINUTE_STEP)).round() as usize;
        Self::new(values, layout, index.min(MINUTE_WHEEL_LEN - 1))
    }

    /// Scroll-position update while the drag is active. Moves the highlight
    /// only; nothing is committed mid-drag. Returns the candidate value when
    /// the highlight crosses into a new row.
    pub fn drag_to(&mut self, offset: f32) -> Option<u8> {
        self.scroll_offset = offset;
        let next = self.layout.index_from_offset(offset, self.values.len());
        if next != self.candidate {
            self.candidate = next;
            Some(self.values[next])
        } else {
            None
        }
    }

    /// Drag-momentum settle: the same computation as [`drag_to`], performed
    /// once more, and its result becomes the committed value.
    pub fn settle_at(&mut self, offset: f32) -> u8 {
        self.scroll_offset = offset;
        let index = self.layout.index_from_offset(offset, self.values.len());
        if index != self.committed {
            debug!(
                "wheel settle: {} -> {}",
                self.values[self.committed], self.values[index]
            );
        }
        self.committed = index;
        self.candidate = index;
        self.values[index]
    }

    /// Target of the one-time programmatic scroll issued after mount. The
    /// shell delays it by a short fixed settle interval because the container
    /// height is not known synchronously at mount time.
    pub fn mount_scroll_offset(&self) -> f32 {
        self.layout.offset_for_index(self.committed)
    }

    pub fn committed_value(&self) -> u8 {
        self.values[self.committed]
    }

    pub fn candidate_value(&self) -> u8 {
        self.values[self.candidate]
    }

    pub fn committed_index(&self) -> usize {
        self.committed
    }

    pub fn layout(&self) -> WheelLayout {
        self.layout
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
