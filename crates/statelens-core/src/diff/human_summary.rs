//! Markdown summary of a diff report.

use crate::diff::model::{DiffClassification, DiffReport, Divergence};

/// Render a human-readable Markdown summary of a [`DiffReport`]
///
/// Informational only; the structured report is the source of truth.
pub fn render_human_summary(report: &DiffReport) -> String {
    let mut out = String::new();

    out.push_str("## State Diff\n\n");

    let class_label = match report.classification {
        DiffClassification::Identical => "Identical",
        DiffClassification::NoDivergence => "No Divergence",
        DiffClassification::Changed => "Changed",
    };
    out.push_str(&format!("**Classification**: {class_label}\n\n"));

    out.push_str("### Identity\n\n");
    out.push_str(&format!(
        "| | Digest | Nodes |\n\
         |---|---|---|\n\
         | current | `{}` | {} |\n\
         | other | `{}` | {} |\n\n",
        short(&report.identity.current_digest),
        report.counts.current_nodes,
        short(&report.identity.other_digest),
        report.counts.other_nodes,
    ));

    if report.classification != DiffClassification::Changed {
        out.push_str("_No divergence detected._\n");
        return out;
    }

    let mismatches: Vec<&Divergence> = report
        .divergences
        .iter()
        .filter(|d| matches!(d, Divergence::ComponentMismatch { .. }))
        .collect();
    if !mismatches.is_empty() {
        out.push_str("### Component Mismatches\n\n");
        for divergence in mismatches {
            out.push_str(&format!("- `{}`\n", divergence.note()));
        }
        out.push('\n');
    }

    if report.counts.entries > 0 {
        out.push_str(&format!(
            "### Divergent Components ({})\n\n",
            report.counts.entries
        ));
        for entry in report.entries() {
            out.push_str(&format!("#### `{}`\n\n", entry.path));
            for note in &entry.state_differences {
                out.push_str(&format!("- **state** `{}`\n", note));
            }
            for note in &entry.props_differences {
                out.push_str(&format!("- **props** `{}`\n", note));
            }
            out.push('\n');
        }
    }

    out
}

fn short(digest: &str) -> &str {
    let end = digest.len().min(12);
    &digest[..end]
}
