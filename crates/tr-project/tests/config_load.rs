use tr_project::schema::*;
use tr_project::{
    ProjectError, from_json_str, from_yaml_str, lint_config, load_config, save_json, save_yaml,
};
use tr_values::Datum;

const JSON: &str = r#"{
  "values": [
    {"type": "variable", "name": "light_on", "default": 1},
    {"type": "constant", "name": "pi", "default": "3.14"},
    {"type": "indicator", "name": "light_time", "period": 60,
     "trigger": {"type": "time", "timeformat": "%H:%M",
                 "ranges": [{"a": "06:00", "b": "18:00", "value": "day"}]}},
    {"type": "indicator", "name": "soil_sensor", "period": 300,
     "trigger": {"type": "gpio", "pin": 4, "samples": 5, "sample_dt": 0.5,
                 "ranges": [{"a": 0, "b": 0.5, "value": "wet"},
                            {"a": 0.5, "b": 3.3, "value": "dry"}]}}
  ],
  "controls": [
    {"name": "light_switch", "setup": {"type": "relay"},
     "conditions": {"light_time == day": "on", "light_time == night": "off"}},
    {"name": "mister"}
  ]
}"#;

const YAML: &str = r#"
values:
  - type: variable
    name: light_on
    default: 1
  - type: constant
    name: pi
    default: "3.14"
  - type: indicator
    name: light_time
    period: 60
    trigger:
      type: time
      timeformat: "%H:%M"
      ranges:
        - {a: "06:00", b: "18:00", value: day}
  - type: indicator
    name: soil_sensor
    period: 300
    trigger:
      type: gpio
      pin: 4
      samples: 5
      sample_dt: 0.5
      ranges:
        - {a: 0, b: 0.5, value: wet}
        - {a: 0.5, b: 3.3, value: dry}
controls:
  - name: light_switch
    setup: {type: relay}
    conditions:
      "light_time == day": "on"
      "light_time == night": "off"
  - name: mister
"#;

#[test]
fn json_and_yaml_describe_the_same_config() {
    let json = from_json_str(JSON).unwrap();
    let yaml = from_yaml_str(YAML).unwrap();
    assert_eq!(json, yaml);
}

#[test]
fn typed_fields_survive_loading() {
    let config = from_json_str(JSON).unwrap();
    assert_eq!(config.values.len(), 4);
    assert_eq!(config.values[0].default, Some(Datum::Int(1)));
    assert_eq!(config.values[1].default, Some(Datum::from("3.14")));
    assert_eq!(config.values[2].period, Some(60.0));

    let time = config.values[2].trigger.as_ref().unwrap().time().unwrap();
    assert_eq!(time.timeformat, "%H:%M");
    assert_eq!(time.ranges[0].value, Datum::from("day"));

    let gpio = config.values[3].trigger.as_ref().unwrap().gpio().unwrap();
    assert_eq!(gpio.samples, 5);
    assert_eq!(gpio.ranges[1].b, 3.3);

    let conditions = config.controls[0].conditions.as_ref().unwrap();
    assert_eq!(conditions[0].0, "light_time == day");
    assert_eq!(conditions[1].0, "light_time == night");
    assert!(config.controls[1].conditions.is_none());

    assert!(lint_config(&config).is_empty());
}

#[test]
fn empty_document_is_an_empty_config() {
    let config = from_json_str("{}").unwrap();
    assert_eq!(config, ConfigDef::default());
}

#[test]
fn roundtrip_through_files() {
    let config = from_json_str(JSON).unwrap();
    let temp_dir = std::env::temp_dir();

    let json_path = temp_dir.join("tr_project_roundtrip.json");
    save_json(&json_path, &config).unwrap();
    assert_eq!(load_config(&json_path).unwrap(), config);

    let yaml_path = temp_dir.join("tr_project_roundtrip.yaml");
    save_yaml(&yaml_path, &config).unwrap();
    assert_eq!(load_config(&yaml_path).unwrap(), config);
}

#[test]
fn unknown_extension_is_rejected() {
    let path = std::env::temp_dir().join("tr_project_config.toml");
    assert!(matches!(
        load_config(&path),
        Err(ProjectError::UnsupportedFormat { .. })
    ));
}

#[test]
fn missing_file_is_an_io_error() {
    let path = std::env::temp_dir().join("tr_project_does_not_exist.json");
    assert!(matches!(load_config(&path), Err(ProjectError::Io(_))));
}
