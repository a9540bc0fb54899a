use pf_project::schema::*;
use pf_project::{load_json, load_yaml, save_json, save_yaml, validate_scenario};

fn office() -> Scenario {
    Scenario {
        version: 1,
        name: "Office".to_string(),
        parameters: ParametersDef {
            m: 3.1,
            mo: 1.0,
            beta: 0.2,
            k_theta: 1e10,
            k_w: 0.0,
        },
        inputs: InputsDef {
            theta_o: 5.0,
            phi_o: 0.5,
            theta_i_sp: 26.0,
            phi_i_sp: 0.5,
            mi: 1.35,
            ua: 675.0,
            qsa: 34_000.0,
            qla: 4_000.0,
        },
        linearization: LinearizationDef::default(),
        sweeps: vec![SweepDef {
            id: "outdoor".to_string(),
            field: "theta_o".to_string(),
            start: -5.0,
            end: 15.0,
            steps: 5,
        }],
        vav: Some(VavDef {
            theta_supply_sp: 30.0,
            m_min: 1e-3,
            m_max: 100.0,
        }),
    }
}

#[test]
fn roundtrip_yaml_office() {
    let scenario = office();
    validate_scenario(&scenario).unwrap();

    let path = std::env::temp_dir().join("pf_project_roundtrip_office.yaml");
    save_yaml(&path, &scenario).unwrap();
    let loaded = load_yaml(&path).unwrap();

    assert_eq!(scenario, loaded);
}

#[test]
fn roundtrip_json_without_vav() {
    let mut scenario = office();
    scenario.vav = None;
    scenario.sweeps.clear();

    let path = std::env::temp_dir().join("pf_project_roundtrip_office.json");
    save_json(&path, &scenario).unwrap();
    let loaded = load_json(&path).unwrap();

    assert_eq!(scenario, loaded);
}

#[test]
fn save_refuses_invalid_scenario() {
    let mut scenario = office();
    scenario.inputs.phi_o = 1.5;
    let path = std::env::temp_dir().join("pf_project_invalid.yaml");
    assert!(save_yaml(&path, &scenario).is_err());
}

#[test]
fn omitted_sections_take_defaults() {
    let yaml = r#"
version: 1
name: minimal
parameters: { m: 3.1, mo: 1.0, beta: 0.2, k_theta: 1.0e10 }
inputs: { theta_o: 5.0, phi_o: 0.5, theta_i_sp: 26.0, phi_i_sp: 0.5,
          mi: 1.35, ua: 675.0, qsa: 34000.0, qla: 4000.0 }
vav: { theta_supply_sp: 18.0 }
"#;
    let scenario = pf_project::from_yaml_str(yaml).unwrap();
    assert_eq!(scenario.parameters.k_w, 0.0);
    assert_eq!(scenario.linearization, LinearizationDef::default());
    assert!(scenario.sweeps.is_empty());
    let vav = scenario.vav_config().unwrap();
    assert_eq!(vav.m_min, 1e-3);
    assert_eq!(vav.m_max, 100.0);
    assert_eq!(vav.linearization.theta_s0, 5.0);
}

#[test]
fn malformed_yaml_is_a_yaml_error() {
    let err = pf_project::from_yaml_str("version: [").unwrap_err();
    assert!(matches!(err, pf_project::ProjectError::Yaml(_)));
}
