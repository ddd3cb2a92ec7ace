#![forbid(unsafe_code)]

//! The layout pass.
//!
//! [`FlexGridLayout::perform_layout`] runs eight phases in order: reset, grid
//! assignment, intrinsic sizing, size groups, track sizing, positioning, end
//! groups and total size. Every phase reads the results of the previous ones
//! and nothing survives from one pass to the next except the entity registry.

use flexgrid_core::{Bounds, LayoutConstraints, LayoutSize, debug, debug_span, trace};

use crate::config::{FillAxes, MAX_GRID_TRACKS};
use crate::constraint::{
    AbsolutePosition, Alignment, BorderSide, EntityConstraints, HideMode, SPAN_TO_END,
    SizeConstraint,
};
use crate::layout::FlexGridLayout;

/// Extent each docking band claims on its axis, gap included.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct BandExtents {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl FlexGridLayout {
    /// Lay out every entity inside `available` and return the size the
    /// content needs.
    ///
    /// Final geometry is written to each entity (firing its callback) and is
    /// also readable through [`entities`](Self::entities).
    pub fn perform_layout(&mut self, available: LayoutConstraints) -> LayoutSize {
        let _span = debug_span!(
            "flexgrid.layout.perform",
            entities = self.entities.len(),
            max_width = available.max_width,
            max_height = available.max_height
        )
        .entered();

        self.reset(available);
        self.assign_grid();
        self.calculate_entity_sizes();
        self.apply_size_groups();
        self.calculate_track_sizes();
        self.position_entities();
        self.apply_end_groups();
        let total = self.total_size();

        trace!(
            width = total.width,
            height = total.height,
            columns = self.grid_width,
            rows = self.grid_height,
            "layout pass complete"
        );
        if self.config.debug {
            debug!("{}", self.layout_debug_info(true, true));
        }
        total
    }

    fn reset(&mut self, available: LayoutConstraints) {
        self.prune_dropped();
        self.grid_width = 0;
        self.grid_height = 0;
        self.column_widths.clear();
        self.row_heights.clear();
        self.column_grow_weights.clear();
        self.row_grow_weights.clear();
        self.last_available_space = available;

        let default_mode = self.config.hide_mode;
        for info in &mut self.entities {
            info.reset_transient();
            let visible = info.entity().is_some_and(|e| e.is_visible());
            let mode = match info.constraints.hide_mode() {
                HideMode::Default => default_mode,
                own => own,
            };
            info.participates = visible || mode != HideMode::Exclude;
        }
    }

    fn assign_grid(&mut self) {
        let config = self.config;

        if config.no_grid {
            let mut row = 0;
            for info in self
                .entities
                .iter_mut()
                .filter(|i| i.participates && i.constraints.occupies_cell())
            {
                info.grid_x = Some(0);
                info.grid_y = Some(row);
                row += 1;
            }
            self.grid_width = 1;
            self.grid_height = row;
            trace!(rows = row, "grid assigned without cells");
            return;
        }

        let vertical = config.is_vertical_flow();
        let wrap = config.wrap.map(|n| n.min(MAX_GRID_TRACKS));
        let (mut columns, mut rows) = match (wrap, vertical) {
            (Some(n), false) => (n, 1),
            (Some(n), true) => (1, n),
            (None, _) => (1, 1),
        };

        // `lane` advances along the flow, `track` counts rows (or columns).
        let mut lane = 0usize;
        let mut track = 0usize;
        let mut break_pending = false;

        for info in self.entities.iter_mut() {
            if !info.participates || !info.constraints.occupies_cell() {
                continue;
            }
            let c = &info.constraints;
            let occupied_x = occupied_span(c.span_x());
            let occupied_y = occupied_span(c.span_y());

            let (gx, gy) = match c.cell() {
                Some(cell) => cell,
                None => {
                    let at_limit = wrap.is_some_and(|n| lane >= n);
                    if c.newline() || break_pending || at_limit {
                        lane = 0;
                        track += 1;
                    }
                    lane += c.skip();
                    let position = if vertical { (track, lane) } else { (lane, track) };
                    let (advance, to_end) = if vertical {
                        (occupied_y, c.span_y() >= SPAN_TO_END)
                    } else {
                        (occupied_x, c.span_x() >= SPAN_TO_END)
                    };
                    lane += advance;
                    break_pending = c.wrap() || to_end;
                    position
                }
            };

            let (gx, gy) = (gx.min(MAX_GRID_TRACKS - 1), gy.min(MAX_GRID_TRACKS - 1));
            let occupied_x = occupied_x.min(MAX_GRID_TRACKS - gx);
            let occupied_y = occupied_y.min(MAX_GRID_TRACKS - gy);
            if (gx, gy) != info.constraints.cell().unwrap_or((gx, gy)) {
                trace!(gx, gy, "cell clamped to grid limit");
            }

            info.grid_x = Some(gx);
            info.grid_y = Some(gy);
            info.span_x = occupied_x;
            info.span_y = occupied_y;
            columns = columns.max(gx + occupied_x);
            rows = rows.max(gy + occupied_y);
        }

        let column_limit = match (wrap, vertical) {
            (Some(n), false) => n,
            _ => columns,
        };
        let row_limit = match (wrap, vertical) {
            (Some(n), true) => n,
            _ => rows,
        };
        for info in self.entities.iter_mut() {
            let Some((gx, gy)) = info.grid_position() else {
                continue;
            };
            if info.constraints.span_x() >= SPAN_TO_END {
                info.span_x = column_limit.saturating_sub(gx).max(1);
            }
            if info.constraints.span_y() >= SPAN_TO_END {
                info.span_y = row_limit.saturating_sub(gy).max(1);
            }
        }

        self.grid_width = columns;
        self.grid_height = rows;
        trace!(columns, rows, "grid assigned");
    }

    fn calculate_entity_sizes(&mut self) {
        let available = self.last_available_space;
        for info in self.entities.iter_mut().filter(|i| i.participates) {
            let Some(entity) = info.entity() else {
                continue;
            };
            let c = &info.constraints;
            let preferred = entity.preferred_size();
            let wanted = LayoutSize::new(
                preferred_override(c.width(), available.max_width, preferred.width),
                preferred_override(c.height(), available.max_height, preferred.height),
            );
            let effective = effective_constraints(c, &available, wanted);
            info.calculated_size = if wanted == preferred {
                entity.calculate_size(&effective)
            } else {
                effective.constrain(wanted)
            };
            trace!(
                key = info.key().get(),
                width = info.calculated_size.width,
                height = info.calculated_size.height,
                "entity sized"
            );
        }
    }

    fn apply_size_groups(&mut self) {
        for (group, keys) in &self.size_groups {
            let shared = self
                .entities
                .iter()
                .filter(|i| i.participates && keys.contains(&i.key()))
                .map(|i| i.calculated_size)
                .reduce(LayoutSize::max);
            let Some(shared) = shared else {
                continue;
            };
            for info in self
                .entities
                .iter_mut()
                .filter(|i| i.participates && keys.contains(&i.key()))
            {
                info.calculated_size = shared;
            }
            trace!(
                group = group.as_str(),
                width = shared.width,
                height = shared.height,
                "size group applied"
            );
        }
    }

    fn calculate_track_sizes(&mut self) {
        let columns = self.grid_width;
        let rows = self.grid_height;
        self.column_widths = vec![0.0; columns];
        self.row_heights = vec![0.0; rows];
        self.column_grow_weights = vec![0.0; columns];
        self.row_grow_weights = vec![0.0; rows];

        for info in self.entities.iter().filter(|i| i.participates) {
            let Some((gx, gy)) = info.grid_position() else {
                continue;
            };
            let size = info.calculated_size;
            let c = &info.constraints;
            accumulate_track(
                &mut self.column_widths,
                &mut self.column_grow_weights,
                gx,
                info.span_x,
                size.width,
                c.grow_x(),
            );
            accumulate_track(
                &mut self.row_heights,
                &mut self.row_grow_weights,
                gy,
                info.span_y,
                size.height,
                c.grow_y(),
            );
        }

        let config = self.config;
        let available = self.last_available_space;
        let bands = self.band_extents();
        distribute_slack(
            &mut self.column_widths,
            &self.column_grow_weights,
            available.max_width - config.insets.horizontal_total() - bands.left - bands.right,
            config.horizontal_gap,
            config.fill.contains(FillAxes::HORIZONTAL),
        );
        distribute_slack(
            &mut self.row_heights,
            &self.row_grow_weights,
            available.max_height - config.insets.vertical_total() - bands.top - bands.bottom,
            config.vertical_gap,
            config.fill.contains(FillAxes::VERTICAL),
        );
        trace!(
            columns = ?self.column_widths,
            rows = ?self.row_heights,
            "tracks sized"
        );
    }

    fn position_entities(&mut self) {
        let config = self.config;
        let available = self.last_available_space;
        let insets = config.insets;
        let gap_h = config.horizontal_gap;
        let gap_v = config.vertical_gap;
        let bands = self.band_extents();

        let content_w = track_extent(&self.column_widths, gap_h);
        let content_h = track_extent(&self.row_heights, gap_v);
        let free_w = available.max_width - insets.horizontal_total() - bands.left - bands.right;
        let free_h = available.max_height - insets.vertical_total() - bands.top - bands.bottom;
        let origin_x =
            insets.left + bands.left + container_offset(config.horizontal_align, free_w, content_w);
        let origin_y =
            insets.top + bands.top + container_offset(config.vertical_align, free_h, content_h);

        let column_x = track_offsets(&self.column_widths, origin_x, gap_h);
        let row_y = track_offsets(&self.row_heights, origin_y, gap_v);

        let right_x = origin_x + content_w + gap_h;
        let mut left_y = insets.top;
        let mut right_y = insets.top;
        let mut top_y = insets.top;
        let mut bottom_y = origin_y + content_h + gap_v;

        for info in self.entities.iter_mut().filter(|i| i.participates) {
            let size = info.calculated_size;
            let c = &info.constraints;
            let bounds = match c.border_side() {
                BorderSide::Left => {
                    let b = Bounds::new(insets.left, left_y, size.width, size.height);
                    left_y += size.height + gap_v;
                    b
                }
                BorderSide::Right => {
                    let b = Bounds::new(right_x, right_y, size.width, size.height);
                    right_y += size.height + gap_v;
                    b
                }
                BorderSide::Top | BorderSide::Bottom => {
                    let width = if c.horizontal_align() == Alignment::Fill {
                        info.calculated_size.width = content_w;
                        content_w
                    } else {
                        size.width
                    };
                    let y = if c.border_side() == BorderSide::Top {
                        &mut top_y
                    } else {
                        &mut bottom_y
                    };
                    let b = Bounds::new(origin_x, *y, width, size.height);
                    *y += size.height + gap_v;
                    b
                }
                BorderSide::None => {
                    if let Some(position) = c.absolute() {
                        absolute_bounds(position, size)
                    } else if let Some((gx, gy)) = info.grid_position() {
                        let Some(b) = cell_bounds(
                            c,
                            size,
                            Cell {
                                column: gx,
                                row: gy,
                                span_x: info.span_x,
                                span_y: info.span_y,
                            },
                            &Tracks {
                                widths: &self.column_widths,
                                heights: &self.row_heights,
                                column_x: &column_x,
                                row_y: &row_y,
                                gap_h,
                                gap_v,
                            },
                            &available,
                        ) else {
                            continue;
                        };
                        b
                    } else {
                        continue;
                    }
                }
            };

            info.bounds = bounds;
            info.placed = true;
            if let Some(entity) = info.entity() {
                entity.set_bounds(bounds);
            }
        }
    }

    fn apply_end_groups(&mut self) {
        for (group, keys) in &self.end_groups {
            let members = || {
                self.entities
                    .iter()
                    .filter(|i| i.participates && i.placed && keys.contains(&i.key()))
            };
            let Some(max_right) = members().map(|i| i.bounds.right()).reduce(f32::max) else {
                continue;
            };
            let max_bottom = members()
                .map(|i| i.bounds.bottom())
                .fold(f32::NEG_INFINITY, f32::max);
            trace!(
                group = group.as_str(),
                max_right,
                max_bottom,
                "end group aligned"
            );

            for info in self
                .entities
                .iter_mut()
                .filter(|i| i.participates && i.placed && keys.contains(&i.key()))
            {
                info.bounds.x = max_right - info.bounds.width;
                if let Some(entity) = info.entity() {
                    entity.set_position(info.bounds.x, info.bounds.y);
                }
            }
        }
    }

    fn total_size(&self) -> LayoutSize {
        let config = self.config;
        let bands = self.band_extents();
        let grid_w = config.insets.horizontal_total()
            + track_extent(&self.column_widths, config.horizontal_gap);
        let grid_h =
            config.insets.vertical_total() + track_extent(&self.row_heights, config.vertical_gap);
        LayoutSize::new(
            grid_w + bands.left + bands.right,
            grid_h + bands.top + bands.bottom,
        )
    }

    /// Scan docked entities: side bands take their widest member, top and
    /// bottom bands stack their members. Non-empty bands add one gap.
    pub(crate) fn band_extents(&self) -> BandExtents {
        let gap_h = self.config.horizontal_gap;
        let gap_v = self.config.vertical_gap;
        let mut left: Option<f32> = None;
        let mut right: Option<f32> = None;
        let mut top = 0.0;
        let mut bottom = 0.0;

        for info in self.entities.iter().filter(|i| i.participates) {
            let size = info.calculated_size;
            match info.constraints.border_side() {
                BorderSide::Left => left = Some(left.unwrap_or(0.0).max(size.width)),
                BorderSide::Right => right = Some(right.unwrap_or(0.0).max(size.width)),
                BorderSide::Top => top += size.height + gap_v,
                BorderSide::Bottom => bottom += size.height + gap_v,
                BorderSide::None => {}
            }
        }

        BandExtents {
            left: left.map_or(0.0, |w| w + gap_h),
            right: right.map_or(0.0, |w| w + gap_h),
            top,
            bottom,
        }
    }
}

/// Cells a span claims while the grid is still growing.
fn occupied_span(span: usize) -> usize {
    if span >= SPAN_TO_END { 1 } else { span.max(1) }
}

/// A non-Content width/height replaces the preferred size on that axis.
fn preferred_override(constraint: SizeConstraint, container: f32, preferred: f32) -> f32 {
    if constraint.is_content() {
        preferred
    } else {
        constraint.resolve(container, preferred)
    }
}

/// Container bounds narrowed by the entity's own min/max. Axes that do not
/// grow are capped at the preferred size.
fn effective_constraints(
    c: &EntityConstraints,
    available: &LayoutConstraints,
    preferred: LayoutSize,
) -> LayoutConstraints {
    let mut effective = *available;
    if !c.min_width().is_content() {
        effective.min_width = c.min_width().resolve(available.max_width, 0.0);
    }
    if !c.min_height().is_content() {
        effective.min_height = c.min_height().resolve(available.max_height, 0.0);
    }
    effective.max_width = axis_max(
        c.max_width(),
        c.grow_x(),
        available.max_width,
        preferred.width,
    );
    effective.max_height = axis_max(
        c.max_height(),
        c.grow_y(),
        available.max_height,
        preferred.height,
    );
    effective
}

fn axis_max(max: SizeConstraint, grow: f32, container_max: f32, preferred: f32) -> f32 {
    let mut limit = if max.is_content() {
        f32::INFINITY
    } else {
        max.resolve(container_max, 0.0)
    };
    if grow <= 0.0 {
        limit = limit.min(preferred);
    }
    container_max.min(limit)
}

fn accumulate_track(
    sizes: &mut [f32],
    weights: &mut [f32],
    start: usize,
    span: usize,
    extent: f32,
    grow: f32,
) {
    let span = span.max(1);
    let share = extent / span as f32;
    let end = (start + span).min(sizes.len());
    for track in start..end {
        sizes[track] = sizes[track].max(share);
        if grow > 0.0 {
            weights[track] = weights[track].max(grow);
        }
    }
}

/// Hand slack out to growable tracks in proportion to their weights. With
/// `fill` set and no weights at all, every track gets an equal share.
fn distribute_slack(sizes: &mut [f32], weights: &[f32], available: f32, gap: f32, fill: bool) {
    let slack = available - track_extent(sizes, gap);
    if !(slack > 0.0 && slack.is_finite()) || sizes.is_empty() {
        return;
    }
    let total_weight: f32 = weights.iter().filter(|w| **w > 0.0).sum();
    if total_weight > 0.0 {
        for (size, weight) in sizes.iter_mut().zip(weights) {
            if *weight > 0.0 {
                *size += slack * (*weight / total_weight);
            }
        }
    } else if fill {
        let share = slack / sizes.len() as f32;
        for size in sizes.iter_mut() {
            *size += share;
        }
    }
}

/// Sum of tracks plus the gaps between them.
pub(crate) fn track_extent(sizes: &[f32], gap: f32) -> f32 {
    if sizes.is_empty() {
        return 0.0;
    }
    sizes.iter().sum::<f32>() + gap * (sizes.len() - 1) as f32
}

/// Start coordinate of every track.
fn track_offsets(sizes: &[f32], origin: f32, gap: f32) -> Vec<f32> {
    let mut offsets = Vec::with_capacity(sizes.len());
    let mut cursor = origin;
    for size in sizes {
        offsets.push(cursor);
        cursor += size + gap;
    }
    offsets
}

fn container_offset(align: Alignment, free: f32, content: f32) -> f32 {
    let leftover = free - content;
    if !(leftover > 0.0 && leftover.is_finite()) {
        return 0.0;
    }
    align.offset(free, content)
}

fn absolute_bounds(position: AbsolutePosition, size: LayoutSize) -> Bounds {
    Bounds::new(
        position.x,
        position.y,
        position.x2.map_or(size.width, |x2| x2 - position.x),
        position.y2.map_or(size.height, |y2| y2 - position.y),
    )
}

struct Cell {
    column: usize,
    row: usize,
    span_x: usize,
    span_y: usize,
}

struct Tracks<'a> {
    widths: &'a [f32],
    heights: &'a [f32],
    column_x: &'a [f32],
    row_y: &'a [f32],
    gap_h: f32,
    gap_v: f32,
}

fn cell_bounds(
    c: &EntityConstraints,
    size: LayoutSize,
    cell: Cell,
    tracks: &Tracks<'_>,
    available: &LayoutConstraints,
) -> Option<Bounds> {
    if cell.column >= tracks.widths.len() || cell.row >= tracks.heights.len() {
        return None;
    }
    let end_x = (cell.column + cell.span_x.max(1)).min(tracks.widths.len());
    let end_y = (cell.row + cell.span_y.max(1)).min(tracks.heights.len());
    let cell_w = track_extent(&tracks.widths[cell.column..end_x], tracks.gap_h);
    let cell_h = track_extent(&tracks.heights[cell.row..end_y], tracks.gap_v);

    let width = size_in_cell(
        c.horizontal_align(),
        c.grow_x(),
        c.max_width(),
        cell_w,
        size.width,
        available.max_width,
    );
    let height = size_in_cell(
        c.vertical_align(),
        c.grow_y(),
        c.max_height(),
        cell_h,
        size.height,
        available.max_height,
    );
    let x = tracks.column_x[cell.column] + c.horizontal_align().offset(cell_w, width);
    let y = tracks.row_y[cell.row] + c.vertical_align().offset(cell_h, height);

    let margin = c.margin();
    let inner = Bounds::new(
        x + margin.left,
        y + margin.top,
        (width - margin.horizontal_total()).max(0.0),
        (height - margin.vertical_total()).max(0.0),
    );
    Some(inner.outset(c.padding()))
}

fn size_in_cell(
    align: Alignment,
    grow: f32,
    max: SizeConstraint,
    cell: f32,
    calculated: f32,
    container_max: f32,
) -> f32 {
    if align == Alignment::Fill {
        return cell;
    }
    if grow > 0.0 && cell > calculated {
        let limit = if max.is_content() {
            f32::INFINITY
        } else {
            max.resolve(container_max, 0.0)
        };
        return cell.min(limit);
    }
    calculated
}
