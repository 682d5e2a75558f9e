use std::path::Path;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use tabprep_core::PipelineRun;
use tabprep_persistence::{PreprocessorArtifact, UnknownCategoryPolicySnapshot};
use tabprep_transform::FeatureMatrix;

/// Print the hand-off for model training after a successful run.
pub fn print_run_summary(run: &PipelineRun, log_path: &Path) {
    let output = &run.output;
    let mut table = Table::new();
    table.set_header(vec![header_cell("Output"), header_cell("Location"), header_cell("Shape")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);

    table.add_row(vec![
        label_cell("raw snapshot"),
        path_cell(&run.splits.raw),
        dim_cell("-"),
    ]);
    table.add_row(vec![
        label_cell("train split"),
        path_cell(&run.splits.train),
        dim_cell("-"),
    ]);
    table.add_row(vec![
        label_cell("eval split"),
        path_cell(&run.splits.eval),
        dim_cell("-"),
    ]);
    table.add_row(vec![
        label_cell("train_matrix"),
        dim_cell("in memory"),
        shape_cell(&output.train_matrix),
    ]);
    table.add_row(vec![
        label_cell("eval_matrix"),
        dim_cell("in memory"),
        shape_cell(&output.eval_matrix),
    ]);
    table.add_row(vec![
        label_cell("artifact_location"),
        path_cell(&output.artifact_path),
        dim_cell("-"),
    ]);

    println!("{table}");
    println!("sha256: {}", run.artifact_digest);
    println!("duration: {} ms", run.duration.as_millis());
    println!("log: {}", log_path.display());
}

/// Print a saved artifact's metadata and learned parameters.
pub fn print_artifact(path: &Path, artifact: &PreprocessorArtifact) {
    println!("Artifact: {}", path.display());
    println!("Schema version: {}", artifact.schema_version);
    println!("Written by: tabprep {}", artifact.tool_version);
    println!("Created: {}", artifact.created_at);
    println!("Fitted rows: {}", artifact.params.fitted_rows);
    println!(
        "Unknown categories: {}",
        match artifact.unknown_categories {
            UnknownCategoryPolicySnapshot::Ignore => "ignore",
            UnknownCategoryPolicySnapshot::Error => "error",
        }
    );

    if !artifact.params.numeric.is_empty() {
        let mut table = Table::new();
        table.set_header(vec![
            header_cell("Numeric column"),
            header_cell("Median"),
            header_cell("Mean"),
            header_cell("Std dev"),
        ]);
        apply_table_style(&mut table);
        for index in 1..4 {
            align_column(&mut table, index, CellAlignment::Right);
        }
        for column in &artifact.params.numeric {
            table.add_row(vec![
                Cell::new(&column.column),
                Cell::new(format_value(column.fill_value)),
                Cell::new(format_value(column.mean)),
                Cell::new(format_value(column.std_dev)),
            ]);
        }
        println!();
        println!("{table}");
    }

    if !artifact.params.categorical.is_empty() {
        let mut table = Table::new();
        table.set_header(vec![
            header_cell("Categorical column"),
            header_cell("Mode"),
            header_cell("Width"),
            header_cell("Categories"),
        ]);
        apply_table_style(&mut table);
        align_column(&mut table, 2, CellAlignment::Right);
        for column in &artifact.params.categorical {
            table.add_row(vec![
                Cell::new(&column.column),
                Cell::new(&column.fill_value),
                Cell::new(column.categories.len()),
                Cell::new(column.categories.join(", ")),
            ]);
        }
        println!();
        println!("{table}");
    }
}

/// Print the shape of `matrix` and its first `rows` rows.
pub fn print_matrix_head(matrix: &FeatureMatrix, rows: usize) {
    let (height, width) = matrix.shape();
    println!("Shape: ({height}, {width})");
    if rows == 0 || height == 0 {
        return;
    }

    let mut table = Table::new();
    table.set_header(
        matrix
            .column_names()
            .iter()
            .map(|name| header_cell(name))
            .collect::<Vec<_>>(),
    );
    apply_table_style(&mut table);
    for index in 0..width {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for row in (0..rows.min(height)).filter_map(|i| matrix.row(i)) {
        table.add_row(row.iter().map(|v| Cell::new(format_value(*v))));
    }
    println!("{table}");
    if height > rows {
        println!("... {} more rows", height - rows);
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn format_value(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else {
        format!("{value:.4}")
    }
}

fn shape_cell(matrix: &FeatureMatrix) -> Cell {
    let (rows, columns) = matrix.shape();
    Cell::new(format!("({rows}, {columns})")).add_attribute(Attribute::Bold)
}

fn path_cell(path: &Path) -> Cell {
    Cell::new(path.display())
}

fn label_cell(label: &str) -> Cell {
    Cell::new(label).fg(Color::Green)
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
