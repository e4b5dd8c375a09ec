//! Human-readable summary rendering.

use std::collections::BTreeMap;

use boxoffice_core::{ScreeningTally, SimulationReport};

/// One line per screening, e.g.
/// `Inception: 150 bookings (60 rejected, 0 canceled)`.
pub fn render_summary(
    summary: &BTreeMap<String, ScreeningTally>,
    simulation: &SimulationReport,
) -> Vec<String> {
    let mut lines = Vec::with_capacity(summary.len() + 1);
    lines.push("Final bookings:".to_string());
    for (name, tally) in summary {
        let canceled = simulation
            .screenings
            .get(name)
            .map(|r| r.canceled)
            .unwrap_or(0);
        let mut line = format!("{}: {} bookings", name, tally.booked);
        if tally.rejected > 0 || canceled > 0 {
            line.push_str(&format!(
                " ({} rejected, {} canceled)",
                tally.rejected, canceled
            ));
        }
        lines.push(line);
    }
    lines
}
