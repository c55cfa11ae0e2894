//! Full integration tests exercising readers, resolution and output together.

use kosei::core::validation;
use kosei::prelude::*;
use std::fs;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use tempfile::TempDir;

fn service_config(dir: &TempDir) -> Configuration {
    let file = dir.path().join("service.yaml");
    fs::write(
        &file,
        r#"
HOST: "0.0.0.0"
PORT: 8080
Workers: 2
WORKERS: 4
"#,
    )
    .unwrap();

    Configuration::builder()
        .with_defaults([("LOG_LEVEL", "info"), ("WORKERS", "1")])
        .with_file(&file)
        .declare(Declaration::new("HOST", Type::String))
        .declare(Declaration::new("PORT", Type::Integer).with_validator(validation::range(1..=65535)))
        .declare(Declaration::new("WORKERS", Type::Integer))
        .declare(
            Declaration::new("LOG_LEVEL", Type::String)
                .with_validator(validation::one_of(["debug", "info", "warn", "error"])),
        )
        .declare(Declaration::new("DEBUG", Type::Boolean).optional())
        .build()
        .unwrap()
}

#[test]
fn test_end_to_end_service() {
    let temp_dir = TempDir::new().unwrap();
    let config = service_config(&temp_dir);

    config.bind([("DEBUG", "yes")]).unwrap();
    config.validate().unwrap();

    let port = config.read("PORT").unwrap();
    assert_eq!(port.value, Value::Integer(8080));
    assert_eq!(port.source, Source::File);
    assert!(port.path().unwrap().ends_with("service.yaml"));

    let workers = config.read("WORKERS").unwrap();
    assert_eq!(workers.value, Value::Integer(4));
    assert_eq!(workers.original, "4");
    assert_eq!(workers.source, Source::File);

    let log_level = config.read("LOG_LEVEL").unwrap();
    assert_eq!(log_level.value, Value::from("info"));
    assert_eq!(log_level.source, Source::Bound);

    let debug = config.read("DEBUG").unwrap();
    assert_eq!(debug.value, Value::Boolean(true));
    assert_eq!(debug.original, "yes");
    assert_eq!(debug.source, Source::Overridden);

    let mapping = config.as_mapping().unwrap();
    let names: Vec<_> = mapping.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["DEBUG", "HOST", "LOG_LEVEL", "PORT", "WORKERS"]);
}

#[test]
fn test_port_and_debug_from_overrides() {
    let mut config = Configuration::new(Vec::new());
    config.declare(Declaration::new("PORT", Type::Integer)).unwrap();
    config.declare(Declaration::new("DEBUG", Type::Boolean).optional()).unwrap();

    config.bind([("PORT", 8080)]).unwrap();
    config.validate().unwrap();

    assert_eq!(config.read("PORT").unwrap().value, Value::Integer(8080));
    assert!(matches!(config.read("DEBUG"), Err(ConfigError::UnknownField(_))));
    assert!(!config.as_mapping().unwrap().contains_key("DEBUG"));

    config.bind([("PORT", "8080"), ("DEBUG", "true")]).unwrap();
    config.validate().unwrap();

    let mapping = config.as_mapping().unwrap();
    assert_eq!(mapping.get("PORT"), Some(&Value::Integer(8080)));
    assert_eq!(mapping.get("DEBUG"), Some(&Value::Boolean(true)));
}

#[test]
fn test_out_of_range_value_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let config = service_config(&temp_dir);

    config.bind([("PORT", "70000")]).unwrap();
    let err = config.validate().unwrap_err();
    let validation = err.as_validation().unwrap();
    assert_eq!(validation.field(), Some("PORT"));
    assert!(err.to_string().contains("70000"));
}

#[test]
fn test_missing_required_file() {
    let temp_dir = TempDir::new().unwrap();
    let mut config = Configuration::builder()
        .with_reader(FileReader::new(temp_dir.path().join("absent.toml")).required())
        .build()
        .unwrap();
    config.declare(Declaration::new("A", Type::String).optional()).unwrap();

    let err = config.bind_readers().unwrap_err();
    assert!(matches!(err, ConfigError::LoadError(_)));
    assert_eq!(config.state(), State::Unbound);
}

#[test]
fn test_custom_reader() {
    let reader = || -> kosei::error::Result<Vec<RawVar>> {
        Ok(vec![RawVar::new("REGION", "eu-west-1", Source::Bound)])
    };

    let mut config = Configuration::new(vec![Box::new(reader)]);
    config.declare(Declaration::new("REGION", Type::String)).unwrap();
    config.bind_readers().unwrap();
    config.validate().unwrap();

    assert_eq!(config.reader_names(), vec!["custom"]);
    assert_eq!(config.read("REGION").unwrap().value, Value::from("eu-west-1"));
}

#[test]
fn test_concurrent_reads() {
    let temp_dir = TempDir::new().unwrap();
    let config = Arc::new(service_config(&temp_dir));
    config.bind_readers().unwrap();
    config.validate().unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let config = Arc::clone(&config);
            thread::spawn(move || {
                for _ in 0..100 {
                    let port = config.read("PORT").unwrap();
                    assert_eq!(port.value, Value::Integer(8080));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_snapshot_survives_rebind() {
    let temp_dir = TempDir::new().unwrap();
    let config = Arc::new(service_config(&temp_dir));
    config.bind_readers().unwrap();
    config.validate().unwrap();
    let snapshot = config.snapshot().unwrap();

    let writer = {
        let config = Arc::clone(&config);
        thread::spawn(move || {
            config.bind([("PORT", "9090")]).unwrap();
            config.validate().unwrap();
        })
    };
    writer.join().unwrap();

    assert_eq!(snapshot.get("PORT").unwrap().value, Value::Integer(8080));
    assert_eq!(config.read("PORT").unwrap().value, Value::Integer(9090));
}

#[test]
fn test_json_output() {
    let temp_dir = TempDir::new().unwrap();
    let config = service_config(&temp_dir);
    config.bind_readers().unwrap();
    config.validate().unwrap();

    let json = serde_json::to_value(&*config.snapshot().unwrap()).unwrap();
    assert_eq!(json["PORT"]["value"], 8080);
    assert_eq!(json["PORT"]["original"], "8080");
    assert_eq!(json["PORT"]["type"], "Integer");
    assert_eq!(json["PORT"]["source"], "FILE");
    assert_eq!(json["LOG_LEVEL"]["source"], "BOUND");
    assert!(json["LOG_LEVEL"]["path"].is_null());
    assert!(json.get("DEBUG").is_none());
}

#[cfg(feature = "console")]
#[test]
fn test_table_output() {
    let temp_dir = TempDir::new().unwrap();
    let config = service_config(&temp_dir);
    config.bind([("WORKERS", "2")]).unwrap();
    config.validate().unwrap();

    let snapshot = config.snapshot().unwrap();
    let table = kosei::console::Table::new(&snapshot).colored(false).to_string();
    let lines: Vec<_> = table.lines().collect();

    assert!(lines[0].starts_with("Name"));
    assert_eq!(lines.len(), 2 + 4);
    let workers = lines.iter().find(|l| l.starts_with("WORKERS")).unwrap();
    assert!(workers.contains("OVERRIDDEN"));
    assert!(workers.contains("\"2\""));
}

#[test]
fn test_reads_during_rebinds_see_whole_snapshots() {
    let mut config = Configuration::new(Vec::new());
    config.declare(Declaration::new("GENERATION", Type::Integer)).unwrap();
    config.declare(Declaration::new("MIRROR", Type::Integer)).unwrap();
    config.bind([("GENERATION", 0), ("MIRROR", 0)]).unwrap();
    config.validate().unwrap();

    let config = Arc::new(config);
    let running = Arc::new(AtomicBool::new(true));

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let config = Arc::clone(&config);
            let running = Arc::clone(&running);
            thread::spawn(move || {
                let mut seen = 0usize;
                while running.load(Ordering::Relaxed) {
                    match config.snapshot() {
                        Ok(snapshot) => {
                            assert_eq!(snapshot.len(), 2);
                            let generation = snapshot.get("GENERATION").unwrap();
                            let mirror = snapshot.get("MIRROR").unwrap();
                            assert_eq!(generation.value, mirror.value);
                            assert_eq!(generation.source, Source::Overridden);
                            seen += 1;
                        }
                        Err(err) => {
                            assert!(matches!(err, ConfigError::Usage(UsageError::NotValidated)));
                        }
                    }
                    match config.read("GENERATION") {
                        Ok(var) => assert!(var.value.as_i64().is_some()),
                        Err(err) => {
                            assert!(matches!(err, ConfigError::Usage(UsageError::NotValidated)));
                        }
                    }
                }
                seen
            })
        })
        .collect();

    let writer = {
        let config = Arc::clone(&config);
        thread::spawn(move || {
            for generation in 1..=200i64 {
                config
                    .bind([("GENERATION", generation), ("MIRROR", generation)])
                    .unwrap();
                config.validate().unwrap();
            }
        })
    };

    writer.join().unwrap();
    running.store(false, Ordering::Relaxed);
    for reader in readers {
        reader.join().unwrap();
    }

    let last = config.snapshot().unwrap();
    assert_eq!(last.get("GENERATION").unwrap().value, Value::Integer(200));
    assert_eq!(last.get("MIRROR").unwrap().value, Value::Integer(200));
}
