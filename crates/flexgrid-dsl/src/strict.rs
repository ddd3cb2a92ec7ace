#![forbid(unsafe_code)]

//! Strict constraint grammar.
//!
//! A constraint string is a comma-separated list of directives, each a
//! case-insensitive keyword followed by whitespace-separated arguments:
//!
//! ```text
//! wrap 3, gap 10px 5px, insets 20, fill
//! width 100!, growx, span 2, alignx fill, wrap
//! ```
//!
//! Any unknown keyword, missing required argument or malformed number
//! aborts the parse with a [`ConstraintParseError`].

use flexgrid_core::{Insets, debug_span};
use flexgrid_layout::{
    AbsolutePosition, Alignment, BorderSide, DEFAULT_GAP, DEFAULT_GROW, EntityConstraints,
    FillAxes, FlexGridLayout, FlowDirection, SPAN_TO_END,
};

use crate::error::{ConstraintParseError, Result};
use crate::token::{
    count, directives, parse_alignment, parse_border_side, parse_float, parse_hide_mode,
    parse_int, parse_size_constraint,
};

/// Default for a bare `split`.
const DEFAULT_SPLIT: usize = 2;

fn unknown(kind: &str, keyword: &str) -> ConstraintParseError {
    ConstraintParseError::new(format!("Unknown {kind} constraint: '{keyword}'"))
}

fn required<'a>(words: &[&'a str], index: usize, keyword: &str) -> Result<&'a str> {
    words.get(index).copied().ok_or_else(|| {
        ConstraintParseError::new(format!("Missing required parameter for '{keyword}'"))
    })
}

fn int_or(words: &[&str], index: usize, default: i32) -> Result<i32> {
    words.get(index).map_or(Ok(default), |word| parse_int(word))
}

fn float_or(words: &[&str], index: usize, default: f32) -> Result<f32> {
    words.get(index).map_or(Ok(default), |word| parse_float(word))
}

// ---------------------------------------------------------------------------
// Container constraints
// ---------------------------------------------------------------------------

/// Build a fresh layout configured by `text`.
///
/// An empty string yields a default layout.
pub fn parse_layout_constraints(text: &str) -> Result<FlexGridLayout> {
    let mut layout = FlexGridLayout::new();
    apply_layout_constraints(&mut layout, text)?;
    Ok(layout)
}

/// Apply container directives to an existing layout.
///
/// Directives before a failing one have already been applied when this
/// returns an error.
pub fn apply_layout_constraints(layout: &mut FlexGridLayout, text: &str) -> Result<()> {
    let _span = debug_span!("flexgrid.dsl.layout", len = text.len()).entered();
    for words in directives(text) {
        let keyword = words[0].to_ascii_lowercase();
        match keyword.as_str() {
            "wrap" => {
                let columns = int_or(&words, 1, 0)?;
                layout.set_wrap(Some(count(columns)));
            }
            "gap" => match words.as_slice() {
                [_, h, v, ..] => {
                    layout.set_gap(parse_float(h)?, parse_float(v)?);
                }
                [_, both] => {
                    let gap = parse_float(both)?;
                    layout.set_gap(gap, gap);
                }
                _ => {
                    return Err(ConstraintParseError::new(
                        "'gap' requires at least one parameter",
                    ));
                }
            },
            "gapx" => {
                let gap = parse_float(required(&words, 1, "gapx")?)?;
                layout.set_gap(gap, DEFAULT_GAP);
            }
            "gapy" => {
                let gap = parse_float(required(&words, 1, "gapy")?)?;
                layout.set_gap(DEFAULT_GAP, gap);
            }
            "insets" | "ins" => match words.as_slice() {
                [_, top, left, bottom, right, ..] => {
                    layout.set_insets(Insets::new(
                        parse_float(top)?,
                        parse_float(left)?,
                        parse_float(bottom)?,
                        parse_float(right)?,
                    ));
                }
                [_, all, ..] => {
                    layout.set_insets(Insets::all(parse_float(all)?));
                }
                _ => {}
            },
            "fill" => {
                layout.set_fill(true, true);
            }
            "fillx" => {
                let vertical = layout.config().fill.contains(FillAxes::VERTICAL);
                layout.set_fill(true, vertical);
            }
            "filly" => {
                let horizontal = layout.config().fill.contains(FillAxes::HORIZONTAL);
                layout.set_fill(horizontal, true);
            }
            "flowx" => {
                layout.set_flow_direction(FlowDirection::Horizontal);
            }
            "flowy" => {
                layout.set_flow_direction(FlowDirection::Vertical);
            }
            "nogrid" => {
                layout.set_no_grid(true);
            }
            "debug" => {
                layout.set_debug_mode(true);
            }
            "hidemode" => {
                layout.set_hide_mode(parse_hide_mode(required(&words, 1, "hidemode")?)?);
            }
            "align" | "al" => match words.as_slice() {
                [_, h, v, ..] => {
                    layout.set_alignment(parse_alignment(h), parse_alignment(v));
                }
                [_, both] => {
                    let align = parse_alignment(both);
                    layout.set_alignment(align, align);
                }
                _ => {}
            },
            "alignx" | "ax" => {
                if let Some(word) = words.get(1) {
                    layout.set_alignment(parse_alignment(word), Alignment::Fill);
                }
            }
            "aligny" | "ay" => {
                if let Some(word) = words.get(1) {
                    layout.set_alignment(Alignment::Fill, parse_alignment(word));
                }
            }
            _ => return Err(unknown("layout", &keyword)),
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Entity constraints
// ---------------------------------------------------------------------------

/// Parse `text` into a fresh [`EntityConstraints`].
pub fn parse_entity_constraints(text: &str) -> Result<EntityConstraints> {
    let mut constraints = EntityConstraints::new();
    apply_entity_constraints(&mut constraints, text)?;
    Ok(constraints)
}

/// Apply entity directives on top of existing constraints.
pub fn apply_entity_constraints(constraints: &mut EntityConstraints, text: &str) -> Result<()> {
    for words in directives(text) {
        let keyword = words[0].to_ascii_lowercase();
        apply_entity_directive(constraints, &keyword, &words)?;
    }
    Ok(())
}

fn apply_entity_directive(
    c: &mut EntityConstraints,
    keyword: &str,
    words: &[&str],
) -> Result<()> {
    match keyword {
        // Sizing
        "width" | "w" => {
            c.set_width(parse_size_constraint(required(words, 1, keyword)?)?);
        }
        "height" | "h" => {
            c.set_height(parse_size_constraint(required(words, 1, keyword)?)?);
        }
        "wmin" => {
            c.set_min_width(parse_size_constraint(required(words, 1, keyword)?)?);
        }
        "wmax" => {
            c.set_max_width(parse_size_constraint(required(words, 1, keyword)?)?);
        }
        "hmin" => {
            c.set_min_height(parse_size_constraint(required(words, 1, keyword)?)?);
        }
        "hmax" => {
            c.set_max_height(parse_size_constraint(required(words, 1, keyword)?)?);
        }

        // Alignment
        "align" | "al" => match words {
            [_, h, v, ..] => {
                c.set_align(parse_alignment(h), parse_alignment(v));
            }
            [_, both] => {
                let align = parse_alignment(both);
                c.set_align(align, align);
            }
            _ => {}
        },
        "alignx" | "ax" => {
            if let Some(word) = words.get(1) {
                c.set_horizontal_align(parse_alignment(word));
            }
        }
        "aligny" | "ay" => {
            if let Some(word) = words.get(1) {
                c.set_vertical_align(parse_alignment(word));
            }
        }
        "left" => {
            c.set_horizontal_align(Alignment::Start);
        }
        "right" => {
            c.set_horizontal_align(Alignment::End);
        }
        "top" => {
            c.set_vertical_align(Alignment::Start);
        }
        "bottom" => {
            c.set_vertical_align(Alignment::End);
        }
        "center" => {
            c.set_align(Alignment::Center, Alignment::Center);
        }
        "fill" => {
            c.set_align(Alignment::Fill, Alignment::Fill);
        }

        // Spanning
        "span" => match words {
            [_, x, y, ..] => {
                c.set_span_x(count(parse_int(x)?))
                    .set_span_y(count(parse_int(y)?));
            }
            [_, x] => {
                c.set_span_x(count(parse_int(x)?));
            }
            _ => {
                c.set_span_x(SPAN_TO_END);
            }
        },
        "spanx" | "sx" => {
            c.set_span_x(count(int_or(words, 1, SPAN_TO_END as i32)?));
        }
        "spany" | "sy" => {
            c.set_span_y(count(int_or(words, 1, SPAN_TO_END as i32)?));
        }

        // Growing and shrinking
        "grow" => match words {
            [_, x, y, ..] => {
                c.set_grow_x(parse_float(x)?).set_grow_y(parse_float(y)?);
            }
            [_, both] => {
                let grow = parse_float(both)?;
                c.set_grow_x(grow).set_grow_y(grow);
            }
            _ => {
                c.set_grow_x(DEFAULT_GROW).set_grow_y(DEFAULT_GROW);
            }
        },
        "growx" | "pushx" => {
            c.set_grow_x(float_or(words, 1, DEFAULT_GROW)?);
        }
        "growy" | "pushy" => {
            c.set_grow_y(float_or(words, 1, DEFAULT_GROW)?);
        }
        "push" => match words {
            [_, x, y, ..] => {
                c.set_grow_x(parse_float(x)?).set_grow_y(parse_float(y)?);
            }
            _ => {
                c.set_grow_x(float_or(words, 1, DEFAULT_GROW)?);
            }
        },
        "shrink" => match words {
            [_, x, y, ..] => {
                c.set_shrink_x(parse_float(x)?).set_shrink_y(parse_float(y)?);
            }
            [_, both] => {
                let shrink = parse_float(both)?;
                c.set_shrink_x(shrink).set_shrink_y(shrink);
            }
            _ => {
                return Err(ConstraintParseError::new(
                    "'shrink' requires at least one parameter",
                ));
            }
        },

        // Flow
        "wrap" => {
            c.set_wrap(true);
        }
        "newline" => {
            c.set_newline(true);
        }
        "skip" => {
            c.set_skip(count(int_or(words, 1, 1)?));
        }
        "split" => {
            c.set_split(count(int_or(words, 1, DEFAULT_SPLIT as i32)?));
        }
        "flowx" => {
            c.set_cell_flow(FlowDirection::Horizontal);
        }
        "flowy" => {
            c.set_cell_flow(FlowDirection::Vertical);
        }

        // Placement
        "cell" => {
            let [_, x, y, rest @ ..] = words else {
                return Err(ConstraintParseError::new(
                    "'cell' requires at least 2 parameters (x, y)",
                ));
            };
            let (column, row) = (parse_int(x)?, parse_int(y)?);
            if column < 0 || row < 0 {
                c.clear_cell();
            } else {
                c.set_cell(count(column), count(row));
            }
            if let [sx, sy, ..] = rest {
                c.set_span_x(count(parse_int(sx)?))
                    .set_span_y(count(parse_int(sy)?));
            }
        }
        "pos" => {
            let x = parse_float(required(words, 1, keyword)?)?;
            let y = parse_float(required(words, 2, keyword)?)?;
            let (x2, y2) = match words {
                [_, _, _, x2, y2, ..] => (Some(parse_float(x2)?), Some(parse_float(y2)?)),
                _ => (None, None),
            };
            c.set_absolute(AbsolutePosition { x, y, x2, y2 });
        }
        "dock" => {
            if let Some(word) = words.get(1) {
                c.set_border_side(parse_border_side(word));
            }
        }
        "north" | "south" | "east" | "west" => {
            c.set_border_side(parse_border_side(keyword));
        }

        // Grouping
        "sizegroup" | "sg" => {
            c.set_size_group(words.get(1).copied().unwrap_or_default());
        }
        "endgroup" | "eg" => {
            c.set_end_group(words.get(1).copied().unwrap_or_default());
        }
        "id" => {
            c.set_component_id(words.get(1).copied().unwrap_or_default());
        }

        "hidemode" => {
            c.set_hide_mode(parse_hide_mode(required(words, 1, keyword)?)?);
        }

        _ => return Err(unknown("entity", keyword)),
    }
    Ok(())
}
