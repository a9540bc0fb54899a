//! Parallel parameter sweeps.

use pf_solver::{
    AirHandler, DesignParameters, Field, Inputs, LinearizationConfig, Point, SolverError,
    linspace, sweep,
};

fn office() -> AirHandler {
    AirHandler::new(
        DesignParameters {
            m: 3.1,
            mo: 1.0,
            beta: 0.2,
            k_theta: 1e10,
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
fn outdoor_temperature_sweep_keeps_order() {
    let ahu = office();
    let values = linspace(-5.0, 35.0, 9);
    let points = sweep(&ahu, Field::ThetaO, &values, &LinearizationConfig::default());
    assert_eq!(points.len(), values.len());
    for (point, value) in points.iter().zip(&values) {
        assert_eq!(point.value, *value);
        let sol = point.result.as_ref().unwrap();
        assert!((sol.theta(Point::Indoor) - 26.0).abs() < 1e-3);
    }
    // The handler itself is untouched.
    assert_eq!(ahu.actual().theta_o, 5.0);
}

#[test]
fn failures_stay_local_to_their_point() {
    let ahu = office();
    let values = [0.0, 0.5, 1.0, 1.5];
    let points = sweep(&ahu, Field::Beta, &values, &LinearizationConfig::default());
    assert!(points[0].result.is_ok());
    assert!(points[1].result.is_ok());
    assert!(matches!(points[2].result, Err(SolverError::Singular { .. })));
    assert!(matches!(
        points[3].result,
        Err(SolverError::InvalidParameter { field: "beta", .. })
    ));
}

#[test]
fn sweep_matches_sequential_solves() {
    let ahu = office();
    let cfg = LinearizationConfig::default();
    let values = linspace(0.5, 2.0, 4);
    let points = sweep(&ahu, Field::Mo, &values, &cfg);
    for point in points {
        let mut single = ahu.clone();
        single.set(Field::Mo, point.value).unwrap();
        let expected = single.solve(&cfg).unwrap();
        assert_eq!(point.result.unwrap(), expected);
    }
}
