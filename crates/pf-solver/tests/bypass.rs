//! Coil by-pass limits.

use pf_solver::{AirHandler, DesignParameters, Field, Inputs, Point, SolverError};

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
fn no_bypass_leaves_coil_state_unchanged() {
    let mut ahu = office();
    ahu.set(Field::Beta, 0.0).unwrap();
    let sol = ahu.linear_solve(10.0).unwrap();
    assert!((sol.theta(Point::CoilLeaving) - sol.theta(Point::CoilSurface)).abs() < 1e-9);
    assert!((sol.w(Point::CoilLeaving) - sol.w(Point::CoilSurface)).abs() < 1e-12);
}

#[test]
fn near_full_bypass_passes_mixed_air_through() {
    let mut ahu = office();
    ahu.set(Field::Beta, 0.9999).unwrap();
    ahu.set(Field::KTheta, 0.0).unwrap();
    let sol = ahu.linear_solve(10.0).unwrap();
    assert!((sol.theta(Point::CoilLeaving) - sol.theta(Point::Mixed)).abs() < 1e-2);
    assert!((sol.w(Point::CoilLeaving) - sol.w(Point::Mixed)).abs() < 1e-5);
}

#[test]
fn full_bypass_is_singular() {
    let mut ahu = office();
    ahu.set(Field::Beta, 1.0).unwrap();
    assert!(matches!(
        ahu.linear_solve(10.0),
        Err(SolverError::Singular { .. })
    ));
}

#[test]
fn bypass_outside_unit_interval_is_rejected() {
    let mut ahu = office();
    let before = *ahu.actual();
    assert!(matches!(
        ahu.set(Field::Beta, 1.5),
        Err(SolverError::InvalidParameter { field: "beta", .. })
    ));
    assert!(ahu.set(Field::Beta, -0.1).is_err());
    assert_eq!(*ahu.actual(), before);
}
