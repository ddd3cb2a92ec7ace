#![forbid(unsafe_code)]

//! Plain-text dump of the last layout pass.

use std::fmt::Write as _;

use crate::layout::FlexGridLayout;

fn join(values: &[f32]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

impl FlexGridLayout {
    /// Human-readable snapshot of grid state and entity geometry.
    ///
    /// `print_grid` adds track sizes and grow weights, `print_last_space`
    /// adds the constraints of the last pass. Entity lines always follow,
    /// then the id mapping sorted by id.
    pub fn layout_debug_info(&self, print_grid: bool, print_last_space: bool) -> String {
        let mut out = String::new();
        let _ = write!(
            out,
            "Container:\n  Grid size:{}x{}\n",
            self.grid_width, self.grid_height
        );

        if print_grid {
            let _ = write!(
                out,
                "\nGridLayout:\n  Column widths:{}\n  Row heights:{}\n  Column grow weights:{}\n  Row grow weights:{}\n",
                join(&self.column_widths),
                join(&self.row_heights),
                join(&self.column_grow_weights),
                join(&self.row_grow_weights),
            );
        }

        if print_last_space {
            let space = self.last_available_space;
            let _ = write!(
                out,
                "\nLastAvailableSpace:\n  Width(min/max):{}-{}\n  Height(min/max):{}-{}\n",
                space.min_width, space.max_width, space.min_height, space.max_height
            );
        }

        out.push_str("Entities:\n");
        let lines: Vec<String> = self
            .entities
            .iter()
            .enumerate()
            .map(|(index, info)| {
                let mut line = format!("  index:{index}");
                if let Some(name) = info.entity().and_then(|e| e.name()) {
                    let _ = write!(line, " name:{name}");
                }
                if let Some(id) = info.constraints().component_id() {
                    let _ = write!(line, " id:{id}");
                }
                let b = info.bounds();
                let calc = info.calculated_size();
                let _ = write!(
                    line,
                    " XY:{},{} WH:{}x{} CalcSize:{}x{}",
                    b.x, b.y, b.width, b.height, calc.width, calc.height
                );
                match info.grid_position() {
                    Some((gx, gy)) => {
                        let _ = write!(line, " Grid pos:{gx},{gy}");
                    }
                    None => line.push_str(" Grid pos:-"),
                }
                line
            })
            .collect();
        out.push_str(&lines.join("\n"));

        let mut ids: Vec<(&str, usize)> = self
            .entities
            .iter()
            .enumerate()
            .filter_map(|(index, info)| Some((info.constraints().component_id()?, index)))
            .collect();
        if !ids.is_empty() {
            ids.sort_unstable();
            out.push_str("\n\nEntityIdMapping:\n");
            for (id, index) in ids {
                let _ = writeln!(out, "  \"{id}\"->{index}");
            }
        }
        out
    }
}
