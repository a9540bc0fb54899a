//! Plain-text rendering of solutions.

use pf_core::units::kilowatts_of;
use pf_psychro::MoistAirState;
use pf_solver::{AhuSolution, Point, SweepPoint, Unknown};

/// Point table (θ, w, φ) followed by the heat flows in kW.
pub fn solution_table(solution: &AhuSolution, states: &[MoistAirState]) -> String {
    let mut lines = vec![format!(
        "  {:<14} {:>9} {:>11} {:>7}",
        "point", "θ [°C]", "w [g/kg]", "φ [%]"
    )];
    lines.extend(Point::ALL.iter().zip(states).map(|(point, state)| {
        format!(
            "  {} {:<11} {:>9.3} {:>11.4} {:>7.1}",
            point.index(),
            point.label(),
            state.theta,
            state.w * 1e3,
            state.phi * 1e2
        )
    }));
    lines.push("  heat flows:".to_string());
    lines.extend(Unknown::HEAT_FLOWS.iter().filter_map(|&unknown| {
        solution
            .heat(unknown)
            .map(|q| format!("    {:<6} {:>10.3} kW", unknown.symbol(), kilowatts_of(q)))
    }));
    lines.join("\n") + "\n"
}

/// One row per sweep value: θ1, θ3, θ4, w4 and the coil/reheat loads.
pub fn sweep_table(field: &str, points: &[SweepPoint]) -> String {
    let mut out = format!(
        "  {:>12} {:>8} {:>8} {:>8} {:>9} {:>10} {:>10}\n",
        field, "θ1", "θ3", "θ4", "w4 g/kg", "Qt_CC kW", "Qs_HC kW"
    );
    for p in points {
        let row = match &p.result {
            Ok(sol) => format!(
                "  {:>12.4} {:>8.3} {:>8.3} {:>8.3} {:>9.4} {:>10.3} {:>10.3}\n",
                p.value,
                sol.theta(Point::CoilSurface),
                sol.theta(Point::Supply),
                sol.theta(Point::Indoor),
                sol.w(Point::Indoor) * 1e3,
                sol.coil_total_heat() / 1e3,
                sol.reheat_heat() / 1e3
            ),
            Err(err) => format!("  {:>12.4} failed: {}\n", p.value, err),
        };
        out.push_str(&row);
    }
    out
}
