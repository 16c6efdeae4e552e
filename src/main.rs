use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use serde::Deserialize;
use shoebox_reflections::image_sources::validate;
use shoebox_reflections::{
    count_reflections, count_reflections_brute_force, count_reflections_parallel,
    room_from_dims, AcousticParameters, CountError,
};
use std::process::ExitCode;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
enum ScenarioError {
    #[error(transparent)]
    Invalid(#[from] CountError),

    #[error("brute-force reference counts {reference} image sources, fast count {fast}")]
    Mismatch { fast: i64, reference: i64 },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.yaml".to_string());
    let config = match load_config(&path) {
        Ok(config) => config,
        Err(e) => {
            error!("Could not load '{}': {}", path, e);
            return ExitCode::FAILURE;
        }
    };
    info!(
        "Loaded {} scenario(s) from '{}'",
        config.scenarios.len(),
        path
    );

    let pb = ProgressBar::new(config.scenarios.len() as u64);
    if let Ok(style) = ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}") {
        pb.set_style(style);
    }
    let mut failed = 0;
    for scenario in &config.scenarios {
        pb.set_message(scenario.name.clone());
        match run_scenario(scenario, &config) {
            Ok(count) => pb.println(format!("{}: {}", scenario.name, count)),
            Err(e) => {
                failed += 1;
                error!("Scenario '{}' failed: {}", scenario.name, e);
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    if failed > 0 {
        warn!("{} scenario(s) failed", failed);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run_scenario(scenario: &Scenario, config: &Config) -> Result<i64, ScenarioError> {
    let room = room_from_dims(&scenario.room_dims)?;
    let acoustics = AcousticParameters::new(scenario.speed_of_sound, scenario.t60);
    let order = validate(scenario.order, &room, &acoustics)?;
    let count = if config.parallel {
        count_reflections_parallel(order, &room, &acoustics)
    } else {
        count_reflections(order, &room, &acoustics)
    };
    info!(
        "{}: order {}, max distance {:.2} m, {} image sources",
        scenario.name,
        order,
        acoustics.max_distance(),
        count
    );

    if config.verify_brute_force {
        let reference = count_reflections_brute_force(order, &room, &acoustics);
        check_reference(count, reference)?;
    }
    Ok(count)
}

fn check_reference(fast: i64, reference: i64) -> Result<(), ScenarioError> {
    if fast != reference {
        return Err(ScenarioError::Mismatch { fast, reference });
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
struct Config {
    #[serde(default)]
    parallel: bool,
    #[serde(default)]
    verify_brute_force: bool,
    scenarios: Vec<Scenario>,
}

#[derive(Debug, Deserialize)]
struct Scenario {
    name: String,
    room_dims: Vec<f64>,
    speed_of_sound: f64,
    t60: f64,
    order: i64,
}

fn load_config(path: &str) -> Result<Config, Box<dyn std::error::Error>> {
    let f = std::fs::File::open(path)?;
    let config: Config = serde_yaml::from_reader(f)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> Config {
        let yaml = "
verify_brute_force: true
scenarios:
  - name: cube
    room_dims: [4.0, 4.0, 4.0]
    speed_of_sound: 343.0
    t60: 0.3
    order: 3
  - name: flat
    room_dims: [4.0, 4.0]
    speed_of_sound: 343.0
    t60: 0.3
    order: 3
";
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn parses_scenarios() {
        let config = setup();
        assert!(!config.parallel);
        assert!(config.verify_brute_force);
        assert_eq!(config.scenarios.len(), 2);
        assert_eq!(config.scenarios[0].room_dims, vec![4.0, 4.0, 4.0]);
    }

    #[test]
    fn runs_valid_scenario() {
        let config = setup();
        assert_eq!(run_scenario(&config.scenarios[0], &config), Ok(63));
    }

    #[test]
    fn rejects_short_room_dims() {
        let config = setup();
        assert_eq!(
            run_scenario(&config.scenarios[1], &config),
            Err(ScenarioError::Invalid(CountError::RoomDimensions { len: 2 }))
        );
    }

    #[test]
    fn reference_mismatch_is_an_error() {
        assert_eq!(check_reference(63, 63), Ok(()));
        let err = check_reference(63, 62).unwrap_err();
        assert_eq!(err, ScenarioError::Mismatch { fast: 63, reference: 62 });
        assert_eq!(
            err.to_string(),
            "brute-force reference counts 62 image sources, fast count 63"
        );
    }
}
