//! Composite layout windows.
//!
//! Layouts are ordinary [`Window`] implementations whose measure/arrange
//! overrides aggregate their children: [`StackLayout`] places children
//! sequentially along an orientation, [`GridLayout`] resolves
//! fixed/auto/star column and row definitions into cell rectangles.
//!
//! Both passes tolerate a zero-size budget: children simply measure to
//! zero, nothing errors.

use helio_core::math::{PxAvailableSize, PxAvailableSize1D, PxRectangle, PxSize2D};

use crate::tree::LayoutChildren;
use crate::window::Window;

/// Direction a stack layout flows in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutOrientation {
    /// Children flow left to right.
    Horizontal,
    /// Children flow top to bottom.
    #[default]
    Vertical,
}

/// Stacks children sequentially along an orientation.
#[derive(Debug, Default)]
pub struct StackLayout {
    /// Flow direction.
    pub orientation: LayoutOrientation,
    /// Pixel gap inserted between consecutive children.
    pub spacing_px: i32,
}

impl StackLayout {
    /// Creates a horizontal stack.
    #[must_use]
    pub fn horizontal() -> Self {
        Self {
            orientation: LayoutOrientation::Horizontal,
            spacing_px: 0,
        }
    }

    /// Creates a vertical stack.
    #[must_use]
    pub fn vertical() -> Self {
        Self {
            orientation: LayoutOrientation::Vertical,
            spacing_px: 0,
        }
    }

    /// Sets the gap between children.
    #[must_use]
    pub fn with_spacing(mut self, spacing_px: i32) -> Self {
        self.spacing_px = spacing_px.max(0);
        self
    }
}

impl Window for StackLayout {
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }

    fn measure_override(&mut self, children: &mut LayoutChildren<'_>, available: PxAvailableSize) -> PxSize2D {
        let count = children.len();
        if count == 0 {
            return PxSize2D::ZERO;
        }
        let total_spacing = self.spacing_px * (count as i32 - 1);
        match self.orientation {
            LayoutOrientation::Horizontal => {
                let child_available = available.with_width(PxAvailableSize1D::INFINITE);
                let mut width = 0;
                let mut height = 0;
                for i in 0..count {
                    let desired = children.measure_at(i, child_available);
                    width += desired.width();
                    height = height.max(desired.height());
                }
                PxSize2D::new(width + total_spacing, height)
            }
            LayoutOrientation::Vertical => {
                let child_available = available.with_height(PxAvailableSize1D::INFINITE);
                let mut width = 0;
                let mut height = 0;
                for i in 0..count {
                    let desired = children.measure_at(i, child_available);
                    width = width.max(desired.width());
                    height += desired.height();
                }
                PxSize2D::new(width, height + total_spacing)
            }
        }
    }

    fn arrange_override(&mut self, children: &mut LayoutChildren<'_>, final_size: PxSize2D) -> PxSize2D {
        let mut offset = 0;
        for i in 0..children.len() {
            let desired = children.desired_size_at(i);
            match self.orientation {
                LayoutOrientation::Horizontal => {
                    children.arrange_at(i, PxRectangle::new(offset, 0, desired.width(), final_size.height()));
                    offset += desired.width() + self.spacing_px;
                }
                LayoutOrientation::Vertical => {
                    children.arrange_at(i, PxRectangle::new(0, offset, final_size.width(), desired.height()));
                    offset += desired.height() + self.spacing_px;
                }
            }
        }
        final_size
    }
}

/// Sizing rule for a grid column or row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GridUnitType {
    /// A fixed pixel extent.
    Fixed(i32),
    /// Sized to the largest child desired size in the track.
    Auto,
    /// A weighted share of the space left after fixed and auto tracks.
    Star(f32),
}

/// One column or row definition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridDefinition {
    /// The sizing rule.
    pub unit: GridUnitType,
}

impl GridDefinition {
    /// A fixed track.
    #[must_use]
    pub const fn fixed(px: i32) -> Self {
        Self {
            unit: GridUnitType::Fixed(px),
        }
    }

    /// An auto-sized track.
    #[must_use]
    pub const fn auto() -> Self {
        Self { unit: GridUnitType::Auto }
    }

    /// A star-weighted track.
    #[must_use]
    pub const fn star(weight: f32) -> Self {
        Self {
            unit: GridUnitType::Star(weight),
        }
    }
}

/// Cell assignment of a child, by child index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GridPlacement {
    /// Column index (clamped to the defined range).
    pub column: usize,
    /// Row index (clamped to the defined range).
    pub row: usize,
}

/// Arranges children into cells defined by column and row tracks.
#[derive(Debug, Default)]
pub struct GridLayout {
    columns: Vec<GridDefinition>,
    rows: Vec<GridDefinition>,
    placements: Vec<GridPlacement>,
    // Track sizes resolved by the measure pass; arrange re-resolves stars
    // against the final size while keeping the auto results.
    measured_columns: Vec<i32>,
    measured_rows: Vec<i32>,
}

impl GridLayout {
    /// Creates an empty grid; without definitions it behaves as a single
    /// star cell.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a column definition.
    pub fn add_column(&mut self, definition: GridDefinition) {
        self.columns.push(definition);
    }

    /// Appends a row definition.
    pub fn add_row(&mut self, definition: GridDefinition) {
        self.rows.push(definition);
    }

    /// Assigns the child at `child_index` to a cell.
    ///
    /// Children without a placement land in cell (0, 0); indices outside
    /// the defined tracks clamp to the last track.
    pub fn set_placement(&mut self, child_index: usize, column: usize, row: usize) {
        if self.placements.len() <= child_index {
            self.placements.resize(child_index + 1, GridPlacement::default());
        }
        self.placements[child_index] = GridPlacement { column, row };
    }

    fn placement(&self, child_index: usize, column_count: usize, row_count: usize) -> (usize, usize) {
        let placement = self.placements.get(child_index).copied().unwrap_or_default();
        (placement.column.min(column_count - 1), placement.row.min(row_count - 1))
    }
}

fn effective(defs: &[GridDefinition]) -> Vec<GridDefinition> {
    if defs.is_empty() {
        vec![GridDefinition::star(1.0)]
    } else {
        defs.to_vec()
    }
}

/// Distributes `available` over the tracks: fixed takes its pixels, auto
/// takes `auto_sizes`, stars split the (non-negative) remainder by weight.
/// The last star absorbs the rounding remainder so the sum stays exact.
fn resolve_tracks(defs: &[GridDefinition], auto_sizes: &[i32], available: PxAvailableSize1D) -> Vec<i32> {
    let mut sizes = vec![0i32; defs.len()];
    let mut used = 0i32;
    let mut total_weight = 0.0f32;
    for (i, def) in defs.iter().enumerate() {
        match def.unit {
            GridUnitType::Fixed(px) => {
                sizes[i] = px.max(0);
                used += sizes[i];
            }
            GridUnitType::Auto => {
                sizes[i] = auto_sizes[i];
                used += sizes[i];
            }
            GridUnitType::Star(weight) => total_weight += weight.max(0.0),
        }
    }
    if total_weight <= 0.0 {
        return sizes;
    }
    if available.is_infinite() {
        // Unconstrained: stars act like auto.
        for (i, def) in defs.iter().enumerate() {
            if matches!(def.unit, GridUnitType::Star(_)) {
                sizes[i] = auto_sizes[i];
            }
        }
        return sizes;
    }

    let remaining = (available.value() - used).max(0);
    let mut assigned = 0i32;
    let mut last_star = None;
    for (i, def) in defs.iter().enumerate() {
        if let GridUnitType::Star(weight) = def.unit {
            sizes[i] = ((remaining as f32) * (weight.max(0.0) / total_weight)) as i32;
            assigned += sizes[i];
            last_star = Some(i);
        }
    }
    if let Some(last) = last_star {
        sizes[last] += remaining - assigned;
    }
    sizes
}

fn offsets(sizes: &[i32]) -> Vec<i32> {
    let mut out = Vec::with_capacity(sizes.len());
    let mut acc = 0;
    for &size in sizes {
        out.push(acc);
        acc += size;
    }
    out
}

impl Window for GridLayout {
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }

    fn measure_override(&mut self, children: &mut LayoutChildren<'_>, available: PxAvailableSize) -> PxSize2D {
        let columns = effective(&self.columns);
        let rows = effective(&self.rows);

        let mut auto_columns = vec![0i32; columns.len()];
        let mut auto_rows = vec![0i32; rows.len()];

        // First pass: measure children in non-star cells so auto tracks can
        // grow to their content; star-cell children wait for resolution.
        let mut star_children = Vec::new();
        for i in 0..children.len() {
            let (col, row) = self.placement(i, columns.len(), rows.len());
            let col_star = matches!(columns[col].unit, GridUnitType::Star(_));
            let row_star = matches!(rows[row].unit, GridUnitType::Star(_));
            let width_budget = match columns[col].unit {
                GridUnitType::Fixed(px) => PxAvailableSize1D::new(px),
                _ => PxAvailableSize1D::INFINITE,
            };
            let height_budget = match rows[row].unit {
                GridUnitType::Fixed(px) => PxAvailableSize1D::new(px),
                _ => PxAvailableSize1D::INFINITE,
            };
            let desired = children.measure_at(
                i,
                PxAvailableSize {
                    width: width_budget,
                    height: height_budget,
                },
            );
            if matches!(columns[col].unit, GridUnitType::Auto) || (col_star && available.width.is_infinite()) {
                auto_columns[col] = auto_columns[col].max(desired.width());
            }
            if matches!(rows[row].unit, GridUnitType::Auto) || (row_star && available.height.is_infinite()) {
                auto_rows[row] = auto_rows[row].max(desired.height());
            }
            if col_star || row_star {
                star_children.push(i);
            }
        }

        let column_sizes = resolve_tracks(&columns, &auto_columns, available.width);
        let row_sizes = resolve_tracks(&rows, &auto_rows, available.height);

        // Second pass: star-cell children get their resolved cell budget.
        for i in star_children {
            let (col, row) = self.placement(i, columns.len(), rows.len());
            children.measure_at(i, PxAvailableSize::new(column_sizes[col], row_sizes[row]));
        }

        self.measured_columns = auto_columns;
        self.measured_rows = auto_rows;

        let width: i32 = column_sizes.iter().sum();
        let height: i32 = row_sizes.iter().sum();
        PxSize2D::new(width, height)
    }

    fn arrange_override(&mut self, children: &mut LayoutChildren<'_>, final_size: PxSize2D) -> PxSize2D {
        let columns = effective(&self.columns);
        let rows = effective(&self.rows);
        // Auto results from measure; empty when arrange runs on a fresh grid.
        let auto_columns = if self.measured_columns.len() == columns.len() {
            self.measured_columns.clone()
        } else {
            vec![0; columns.len()]
        };
        let auto_rows = if self.measured_rows.len() == rows.len() {
            self.measured_rows.clone()
        } else {
            vec![0; rows.len()]
        };

        let column_sizes = resolve_tracks(&columns, &auto_columns, PxAvailableSize1D::new(final_size.width()));
        let row_sizes = resolve_tracks(&rows, &auto_rows, PxAvailableSize1D::new(final_size.height()));
        let column_offsets = offsets(&column_sizes);
        let row_offsets = offsets(&row_sizes);

        for i in 0..children.len() {
            let (col, row) = self.placement(i, columns.len(), rows.len());
            children.arrange_at(
                i,
                PxRectangle::new(column_offsets[col], row_offsets[row], column_sizes[col], row_sizes[row]),
            );
        }
        final_size
    }
}
