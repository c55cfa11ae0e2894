//! Realistic microservice configuration.
//!
//! This example demonstrates:
//! - Declaring typed variables with validation rules
//! - Layering defaults, a YAML file, an environment file and the environment
//! - Command line style overrides that win over every source
//! - Printing where each value came from
//!
//! Run with: cargo run --example service_config -- PORT=9000

use kosei::core::validation;
use kosei::prelude::*;

fn declarations() -> Vec<Declaration> {
    vec![
        Declaration::new("APP_NAME", Type::String).with_validator(validation::length(1..=64)),
        Declaration::new("ENVIRONMENT", Type::String)
            .with_validator(validation::one_of(["dev", "staging", "production"])),
        Declaration::new("HOST", Type::String),
        Declaration::new("PORT", Type::Integer).with_validator(validation::range(1..=65535)),
        Declaration::new("MAX_CONNECTIONS", Type::Integer).with_validator(validation::range(1..)),
        Declaration::new("DATABASE_URL", Type::String)
            .with_validator(validation::starts_with("postgres://")),
        Declaration::new("CACHE_TTL_SECONDS", Type::Float)
            .with_validator(validation::float_range(0.0..=86400.0)),
        Declaration::new("ENABLE_CORS", Type::Boolean),
        Declaration::new("API_KEY", Type::String).optional(),
    ]
}

fn main() -> Result<()> {
    // Values given as KEY=VALUE arguments act as overrides
    let overrides: Vec<(String, String)> = std::env::args()
        .skip(1)
        .filter_map(|arg| {
            arg.split_once('=')
                .map(|(k, v)| (k.to_string(), v.to_string()))
        })
        .collect();

    let mut builder = Configuration::builder()
        .with_defaults([
            ("APP_NAME", "order-service"),
            ("ENVIRONMENT", "dev"),
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("MAX_CONNECTIONS", "100"),
            ("DATABASE_URL", "postgres://localhost/orders"),
            ("CACHE_TTL_SECONDS", "300"),
            ("ENABLE_CORS", "false"),
        ])
        .with_file("config/service.yaml")
        .with_dotenv()
        .with_env_prefix("ORDERS_");
    for declaration in declarations() {
        builder = builder.declare(declaration);
    }
    let config = builder.build()?;

    config.bind(overrides)?;
    if let Err(err) = config.validate() {
        eprintln!("Configuration is invalid:");
        if let Some(validation) = err.as_validation() {
            for error in validation.errors() {
                eprintln!("  - {}", error);
            }
        }
        return Err(err);
    }

    let vars = config.snapshot()?;
    println!("{}", vars);

    let port = config.read("PORT")?;
    println!(
        "Listening on {}:{} (port set by {})",
        config.read("HOST")?.value,
        port.value,
        port.source
    );
    if config.read("API_KEY").is_err() {
        println!("No API key configured; authentication disabled");
    }

    Ok(())
}
