//! Proportional controller behaviour.

use pf_psychro::Psychrometrics;
use pf_solver::{AirHandler, DesignParameters, Field, Inputs, LinearizationConfig, Point};

fn office(k_theta: f64) -> AirHandler {
    AirHandler::new(
        DesignParameters {
            m: 3.1,
            mo: 1.0,
            beta: 0.2,
            k_theta,
            k_w: 0.0,
        },
        Inputs {
            theta_o: 5.0,
            phi_o: 0.5,
            theta_i_sp: 26.0,
            phi_i_sp: 0.5,
            mi: 1.35,
            ua: 675.0,
            qsa: 34_000.0,
            qla: 4_000.0,
        },
    )
    .unwrap()
}

#[test]
fn zero_gain_disables_coil() {
    let sol = office(0.0).linear_solve(10.0).unwrap();
    assert!(sol.coil_total_heat().abs() < 1e-6, "Qt = {}", sol.coil_total_heat());
}

#[test]
fn indoor_temperature_approaches_set_point_as_gain_grows() {
    let gains = [1e2, 1e4, 1e6, 1e10];
    let errors: Vec<f64> = gains
        .iter()
        .map(|&k| {
            let sol = office(k).linear_solve(10.0).unwrap();
            (sol.theta(Point::Indoor) - 26.0).abs()
        })
        .collect();
    for pair in errors.windows(2) {
        assert!(pair[1] < pair[0], "errors not decreasing: {errors:?}");
    }
    assert!(errors[3] < 1e-4);
}

#[test]
fn changing_set_point_moves_indoor_temperature() {
    let mut ahu = office(1e10);
    ahu.set(Field::ThetaISp, 22.0).unwrap();
    let sol = ahu.solve(&LinearizationConfig::default()).unwrap();
    assert!((sol.theta(Point::Indoor) - 22.0).abs() < 1e-4);
}

#[test]
fn humidity_gain_reduces_humidity_error() {
    let mut ahu = office(1e10);
    let cfg = LinearizationConfig::default();
    let w_sp = ahu
        .psychrometrics()
        .humidity_ratio(26.0, 0.5)
        .unwrap();

    let open = ahu.solve(&cfg).unwrap();
    ahu.set(Field::KW, 1e10).unwrap();
    let closed = ahu.solve(&cfg).unwrap();

    let open_err = (open.w(Point::Indoor) - w_sp).abs();
    let closed_err = (closed.w(Point::Indoor) - w_sp).abs();
    assert!(closed_err < open_err);
    assert!(closed_err < 1e-5, "w4 error {closed_err}");
    // Temperature control still holds with both loops closed.
    assert!((closed.theta(Point::Indoor) - 26.0).abs() < 1e-3);
}
