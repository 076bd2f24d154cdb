use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use consensus_axis::consensus::{AxisVerdict, ConsensusMode, ScoredRecord};
use consensus_axis::experiment::ExperimentRow;
use consensus_axis::{ConsensusResult, Ranking};
use std::io::Write;

pub fn print_verdict(mode: ConsensusMode, axis: Option<&Ranking<u32>>) {
    match axis {
        Some(axis) => println!("{}: {}", mode, axis),
        None => println!("{}: no consensus", mode),
    }
}

pub fn print_axis_report(
    axis: &Ranking<u32>,
    mode: ConsensusMode,
    records: &[ScoredRecord<'_, u32>],
    verdict: &AxisVerdict,
) {
    println!("\nCandidate axis {} ({})", axis, mode);
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Ranking").add_attribute(Attribute::Bold),
        Cell::new("Weight"),
        Cell::new("Distance"),
    ]);
    for i in 1..=2 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for record in records {
        table.add_row(vec![
            Cell::new(record.ranking.to_string()),
            Cell::new(record.weight),
            Cell::new(record.distance),
        ]);
    }
    println!("{}", table);

    let line = match verdict {
        AxisVerdict::Consensus => "✅ consensus".to_string(),
        AxisVerdict::NotMonotone {
            position,
            heavier_distance,
            lighter_distance,
        } => format!(
            "❌ not monotone after row {}: distance {} then {}",
            position + 1,
            heavier_distance,
            lighter_distance
        ),
        AxisVerdict::Incomplete {
            distance,
            required,
            available,
        } => format!(
            "❌ incomplete: shell {} needs {} rankings, {} left",
            distance, required, available
        ),
        AxisVerdict::Surplus { remaining } => {
            format!("❌ {} rankings beyond the filled shells", remaining)
        }
    };
    println!("{}", line);
}

pub fn print_experiment_table(rows: &[ExperimentRow]) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Culture").add_attribute(Attribute::Bold),
        Cell::new("Alts"),
        Cell::new("Votes"),
        Cell::new("Phi"),
        Cell::new("Trials"),
        Cell::new("Strict %").fg(Color::Red),
        Cell::new("Flexible %").fg(Color::Green),
        Cell::new("Single-peaked %").fg(Color::Cyan),
    ]);
    for i in 1..=7 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for row in rows {
        let phi = row.phi.map(|p| format!("{:.2}", p)).unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            Cell::new(row.culture.to_string()),
            Cell::new(row.num_alternatives),
            Cell::new(row.num_votes),
            Cell::new(phi),
            Cell::new(row.iterations),
            Cell::new(format!("{:.1}", row.strict_percent())),
            Cell::new(format!("{:.1}", row.flexible_percent())),
            Cell::new(format!("{:.1}", row.single_peaked_percent())),
        ]);
    }
    println!("{}", table);
}

pub fn write_experiment_csv<W: Write>(rows: &[ExperimentRow], out: W) -> ConsensusResult<()> {
    let mut writer = csv::Writer::from_writer(out);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn print_mahonian_table(rows: &[(usize, Vec<u128>)]) {
    let width = rows.iter().map(|(_, row)| row.len()).max().unwrap_or(0);

    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let mut header = vec![Cell::new("n \\ k").add_attribute(Attribute::Bold)];
    header.extend((0..width).map(|k| Cell::new(k)));
    header.push(Cell::new("n!").fg(Color::Cyan));
    table.set_header(header);

    for (n, row) in rows {
        let mut cells = vec![Cell::new(n)];
        cells.extend((0..width).map(|k| match row.get(k) {
            Some(v) => Cell::new(v),
            None => Cell::new(""),
        }));
        let total = row.iter().fold(0u128, |acc, v| acc.saturating_add(*v));
        cells.push(Cell::new(total));
        table.add_row(cells);
    }
    for i in 1..=width + 1 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
    println!("{}", table);
}
