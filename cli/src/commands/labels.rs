use anyhow::Result;
use overseas_board_shared::{labels, Dimension};
use serde::Serialize;

use crate::output::{print_json, render_labels};

#[derive(Serialize)]
struct LabelRow {
    dimension: Dimension,
    code: &'static str,
    label: &'static str,
    chip: String,
}

pub fn run(dimension: Option<Dimension>, json: bool) -> Result<()> {
    let dimensions = match dimension {
        Some(dimension) => vec![dimension],
        None => Dimension::ALL.to_vec(),
    };
    if json {
        let rows: Vec<LabelRow> = dimensions
            .iter()
            .flat_map(|&dimension| {
                labels::codes(dimension).map(move |code| LabelRow {
                    dimension,
                    code,
                    label: labels::backend_label(dimension, code).unwrap_or_default(),
                    chip: labels::chip_label(dimension, code),
                })
            })
            .collect();
        return print_json(&rows);
    }
    for dimension in dimensions {
        print!("{}", render_labels(dimension));
    }
    Ok(())
}
