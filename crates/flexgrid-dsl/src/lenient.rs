#![forbid(unsafe_code)]

//! Lenient option parsing for host-supplied configuration strings.
//!
//! Same comma/whitespace shape as the strict grammar, but a slightly
//! different vocabulary and no error path: a malformed value falls back to
//! the option's default or the option is skipped, and processing goes on.

use flexgrid_core::{Insets, trace};
use flexgrid_layout::{
    AbsolutePosition, Alignment, BorderSide, DEFAULT_GAP, DEFAULT_PRIORITY, DEFAULT_SHRINK,
    EntityConstraints, FlexGridLayout, FlowDirection, HideMode, SizeConstraint,
};

use crate::token::{count, directives, parse_float, split_trimmed};

/// Grow weight for a bare `grow`.
const LENIENT_GROW: f32 = 1.0;

/// One `(key, value)` option; the key is lowercased and the value is the
/// remaining words joined by single spaces.
pub type ConfigOption = (String, String);

/// Split a container configuration string into options.
///
/// ```
/// use flexgrid_dsl::parse_container_configuration_string;
///
/// let options = parse_container_configuration_string("Gap 10, insets 1 2 3 4, fill");
/// assert_eq!(options[0], ("gap".to_string(), "10".to_string()));
/// assert_eq!(options[1].1, "1 2 3 4");
/// assert_eq!(options[2].1, "");
/// ```
pub fn parse_container_configuration_string(text: &str) -> Vec<ConfigOption> {
    directives(text)
        .map(|words| (words[0].to_ascii_lowercase(), words[1..].join(" ")))
        .collect()
}

fn float_value(value: &str) -> Option<f32> {
    parse_float(value).ok()
}

/// Truncate toward zero like an integer cast of a float.
fn int_value(value: &str) -> Option<i32> {
    float_value(value).map(|v| v as i32)
}

fn flag(value: &str) -> bool {
    !matches!(value.to_ascii_lowercase().as_str(), "false" | "0")
}

/// One value for every side or four values (top left bottom right).
fn insets_value(words: &[&str]) -> Option<Insets> {
    match words {
        [all] => float_value(all).map(Insets::all),
        [top, left, bottom, right] => Some(Insets::new(
            float_value(top)?,
            float_value(left)?,
            float_value(bottom)?,
            float_value(right)?,
        )),
        _ => None,
    }
}

fn horizontal_word(word: &str) -> Option<Alignment> {
    match word.to_ascii_lowercase().as_str() {
        "left" | "start" => Some(Alignment::Start),
        "center" => Some(Alignment::Center),
        "right" | "end" => Some(Alignment::End),
        "fill" => Some(Alignment::Fill),
        _ => None,
    }
}

fn vertical_word(word: &str) -> Option<Alignment> {
    match word.to_ascii_lowercase().as_str() {
        "top" | "start" => Some(Alignment::Start),
        "center" | "middle" => Some(Alignment::Center),
        "bottom" | "end" => Some(Alignment::End),
        "fill" => Some(Alignment::Fill),
        "baseline" => Some(Alignment::Baseline),
        _ => None,
    }
}

/// Apply options produced by [`parse_container_configuration_string`].
///
/// `gapx`/`gapy` keep the layout's current gap on the other axis.
pub fn apply_container_configuration(layout: &mut FlexGridLayout, options: &[ConfigOption]) {
    for (key, value) in options {
        let words: Vec<&str> = value.split_whitespace().collect();
        match key.as_str() {
            "gap" => {
                let (h, v) = match words.as_slice() {
                    [h, v] => (
                        float_value(h).unwrap_or(DEFAULT_GAP),
                        float_value(v).unwrap_or(DEFAULT_GAP),
                    ),
                    _ => {
                        let gap = float_value(value).unwrap_or(DEFAULT_GAP);
                        (gap, gap)
                    }
                };
                layout.set_gap(h, v);
            }
            "gapx" => {
                let v = layout.config().vertical_gap;
                layout.set_gap(float_value(value).unwrap_or(DEFAULT_GAP), v);
            }
            "gapy" => {
                let h = layout.config().horizontal_gap;
                layout.set_gap(h, float_value(value).unwrap_or(DEFAULT_GAP));
            }
            "fill" => {
                let (h, v) = match value.to_ascii_lowercase().as_str() {
                    "x" | "horizontal" => (true, false),
                    "y" | "vertical" => (false, true),
                    "none" | "false" => (false, false),
                    _ => (true, true),
                };
                layout.set_fill(h, v);
            }
            "fillx" => {
                layout.set_fill(true, false);
            }
            "filly" => {
                layout.set_fill(false, true);
            }
            "wrap" => {
                let columns = int_value(value).map_or(0, count);
                layout.set_wrap(Some(columns));
            }
            "debug" => {
                layout.set_debug_mode(flag(value));
            }
            "nogrid" => {
                layout.set_no_grid(flag(value));
            }
            "insets" => {
                if let Some(insets) = insets_value(&words) {
                    layout.set_insets(insets);
                }
            }
            "flow" | "flowdir" => match value.to_ascii_lowercase().as_str() {
                "horizontal" | "h" => {
                    layout.set_flow_direction(FlowDirection::Horizontal);
                }
                "vertical" | "v" => {
                    layout.set_flow_direction(FlowDirection::Vertical);
                }
                _ => {
                    trace!(value = %value, "lenient: unknown flow direction");
                }
            },
            "flowy" => {
                layout.set_flow_direction(FlowDirection::Vertical);
            }
            "align" => {
                if let Some(first) = words.first() {
                    let horizontal = horizontal_word(first).unwrap_or(Alignment::Fill);
                    let vertical = words
                        .get(1)
                        .and_then(|w| vertical_word(w))
                        .unwrap_or(Alignment::Fill);
                    layout.set_alignment(horizontal, vertical);
                }
            }
            "hidemode" => {
                if let Some(mode) = hide_mode_value(value) {
                    layout.set_hide_mode(mode);
                }
            }
            _ => {
                trace!(key = %key, "lenient: skipping unknown container option");
            }
        }
    }
}

fn hide_mode_value(value: &str) -> Option<HideMode> {
    match value.to_ascii_lowercase().as_str() {
        "0" | "default" => Some(HideMode::Default),
        "3" | "exclude" => Some(HideMode::Exclude),
        _ => None,
    }
}

/// `min:pref:max`, `N%` or a fixed `N`.
fn size_value(value: &str) -> Option<SizeConstraint> {
    if value.contains(':') {
        return match split_trimmed(value, ':').as_slice() {
            [min, preferred, max] => Some(SizeConstraint::range(
                float_value(min)?,
                float_value(preferred)?,
                float_value(max)?,
            )),
            _ => None,
        };
    }
    if let Some(percent) = value.strip_suffix('%') {
        return float_value(percent).map(SizeConstraint::percentage);
    }
    float_value(value).map(SizeConstraint::fixed)
}

/// Apply lenient entity options on top of `constraints`.
///
/// Never fails; unparseable values are skipped.
pub fn parse_entity_constraints_string(constraints: &mut EntityConstraints, text: &str) {
    for words in directives(text) {
        let key = words[0].to_ascii_lowercase();
        let first = words.get(1).copied();
        let c = &mut *constraints;
        match key.as_str() {
            "width" => {
                if let Some(size) = first.and_then(size_value) {
                    c.set_width(size);
                }
            }
            "height" => {
                if let Some(size) = first.and_then(size_value) {
                    c.set_height(size);
                }
            }
            "minwidth" => {
                if let Some(v) = first.and_then(float_value) {
                    c.set_min_width(SizeConstraint::fixed(v));
                }
            }
            "maxwidth" => {
                if let Some(v) = first.and_then(float_value) {
                    c.set_max_width(SizeConstraint::fixed(v));
                }
            }
            "minheight" => {
                if let Some(v) = first.and_then(float_value) {
                    c.set_min_height(SizeConstraint::fixed(v));
                }
            }
            "maxheight" => {
                if let Some(v) = first.and_then(float_value) {
                    c.set_max_height(SizeConstraint::fixed(v));
                }
            }
            "grow" => {
                let grow = first.and_then(float_value).unwrap_or(LENIENT_GROW);
                c.set_grow_x(grow).set_grow_y(grow);
            }
            "growx" => {
                c.set_grow_x(first.and_then(float_value).unwrap_or(LENIENT_GROW));
            }
            "growy" => {
                c.set_grow_y(first.and_then(float_value).unwrap_or(LENIENT_GROW));
            }
            "growprio" | "growpriority" => {
                let priority = first.and_then(int_value).unwrap_or(DEFAULT_PRIORITY);
                c.set_grow_priority_x(priority).set_grow_priority_y(priority);
            }
            "shrink" => {
                let shrink = first.and_then(float_value).unwrap_or(DEFAULT_SHRINK);
                c.set_shrink_x(shrink).set_shrink_y(shrink);
            }
            "shrinkprio" | "shrinkpriority" => {
                let priority = first.and_then(int_value).unwrap_or(DEFAULT_PRIORITY);
                c.set_shrink_priority_x(priority)
                    .set_shrink_priority_y(priority);
            }
            "span" | "spanx" => {
                if let Some(x) = first.and_then(int_value) {
                    c.set_span_x(count(x));
                    if let Some(y) = words.get(2).and_then(|w| int_value(w)) {
                        c.set_span_y(count(y));
                    }
                }
            }
            "spany" => {
                if let Some(y) = first.and_then(int_value) {
                    c.set_span_y(count(y));
                }
            }
            "wrap" => {
                c.set_wrap(true);
            }
            "newline" => {
                c.set_newline(true);
            }
            "skip" => {
                c.set_skip(count(first.and_then(int_value).unwrap_or(1)));
            }
            "split" => {
                c.set_split(count(first.and_then(int_value).unwrap_or(2)));
            }
            "cell" => {
                if let (Some(x), Some(y)) = (
                    first.and_then(int_value),
                    words.get(2).and_then(|w| int_value(w)),
                ) {
                    if x < 0 || y < 0 {
                        c.clear_cell();
                    } else {
                        c.set_cell(count(x), count(y));
                    }
                }
            }
            "align" => {
                if let Some(word) = first {
                    match word.to_ascii_lowercase().as_str() {
                        "top" => {
                            c.set_vertical_align(Alignment::Start);
                        }
                        "middle" => {
                            c.set_vertical_align(Alignment::Center);
                        }
                        "bottom" => {
                            c.set_vertical_align(Alignment::End);
                        }
                        "baseline" => {
                            c.set_vertical_align(Alignment::Baseline);
                        }
                        other => {
                            if let Some(align) = horizontal_word(other) {
                                c.set_horizontal_align(align);
                            }
                        }
                    }
                    if let Some(align) = words.get(2).and_then(|w| vertical_word(w)) {
                        c.set_vertical_align(align);
                    }
                }
            }
            "dock" => {
                let side = match first.map(str::to_ascii_lowercase).as_deref() {
                    Some("north" | "top") => Some(BorderSide::Top),
                    Some("south" | "bottom") => Some(BorderSide::Bottom),
                    Some("west" | "left") => Some(BorderSide::Left),
                    Some("east" | "right") => Some(BorderSide::Right),
                    _ => None,
                };
                if let Some(side) = side {
                    c.set_border_side(side);
                }
            }
            "pos" | "position" => {
                if let [_, x, y, rest @ ..] = words.as_slice()
                    && let (Some(x), Some(y)) = (float_value(x), float_value(y))
                {
                    let corner = match rest {
                        [x2, y2, ..] => float_value(x2).zip(float_value(y2)),
                        _ => None,
                    };
                    c.set_absolute(AbsolutePosition {
                        x,
                        y,
                        x2: corner.map(|(x2, _)| x2),
                        y2: corner.map(|(_, y2)| y2),
                    });
                }
            }
            "sg" | "sizegroup" => {
                if let Some(group) = first {
                    c.set_size_group(group);
                }
            }
            "eg" | "endgroup" => {
                if let Some(group) = first {
                    c.set_end_group(group);
                }
            }
            "id" => {
                if let Some(id) = first {
                    c.set_component_id(id);
                }
            }
            "hidemode" => {
                if let Some(mode) = first.and_then(hide_mode_value) {
                    c.set_hide_mode(mode);
                }
            }
            "margin" => {
                if let Some(margin) = insets_value(&words[1..]) {
                    c.set_margin(margin);
                }
            }
            "pad" | "padding" => {
                if let Some(padding) = insets_value(&words[1..]) {
                    c.set_padding(padding);
                }
            }
            _ => {
                trace!(key = %key, "lenient: skipping unknown entity option");
            }
        }
    }
}
