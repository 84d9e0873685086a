use crate::compare::{ComparisonResult, Presence};
use crate::projection::DiffTable;

/// Render a comparison to Markdown
///
/// The output includes:
/// - Structure status (with the offending reference and both coordinate pairs
///   when validation failed)
/// - Counts of compared, changed and unmatched components
/// - The differences table, in its current row order
/// - The unmatched components, if any
pub fn render_summary(result: &ComparisonResult, table: &DiffTable) -> String {
    let mut output = String::new();
    output.push_str("# Layout Comparison\n\n");

    if let Some(m) = result.mismatch() {
        output.push_str("## Structure: MISMATCH\n\n");
        output.push_str(&format!(
            "Component `{}` is at ({}, {}) in the golden reference and ({}, {}) in the unit under test (delta {}, {}).\n\n",
            m.reference_id,
            m.golden.0,
            m.golden.1,
            m.under_test.0,
            m.under_test.1,
            m.delta.0,
            m.delta.1
        ));
        output.push_str("Wrong board or wrong revision; no differences were computed.\n");
        return output;
    }

    output.push_str("## Structure: OK\n\n");
    output.push_str(&format!(
        "- Compared: {}\n- Changed: {}\n- Unmatched: {}\n\n",
        result.classifications.len(),
        result.changed_count(),
        result.one_sided.len()
    ));

    if table.is_empty() {
        output.push_str("No value or unit differences.\n\n");
    } else {
        output.push_str("## Differences\n\n");
        output.push_str("| Reference | Old Value | Old Unit | New Value | New Unit |\n");
        output.push_str("|---|---|---|---|---|\n");
        for row in &table.rows {
            output.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                row.reference_id, row.old_value, row.old_unit, row.new_value, row.new_unit
            ));
        }
        output.push('\n');
    }

    if !table.unmatched.is_empty() {
        output.push_str("## Unmatched\n\n");
        for row in &table.unmatched {
            let side = match row.presence {
                Presence::OnlyInGolden => "golden only",
                Presence::OnlyInUnderTest => "unit under test only",
            };
            output.push_str(&format!("- `{}` ({})\n", row.reference_id, side));
        }
        output.push('\n');
    }

    output
}
