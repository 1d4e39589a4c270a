//! Resolution pipeline: reads a restaurant data file, resolves names, builds
//! a validated `RestaurantConfig`.
//!
//! Provides format detection (RON/JSON/TOML), file discovery, and the
//! deserialization helper used by [`load_restaurant`].

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use pizzeria_core::config::{ConfigError, RestaurantConfig};
use pizzeria_core::fixed::{Seconds, checked_f64_to_fixed64};
use pizzeria_core::id::Location;
use pizzeria_core::ingredient::IngredientKind;
use pizzeria_core::sim::TickStrategy;
use serde::de::DeserializeOwned;

use crate::schema::RestaurantData;

/// Base name of the restaurant definition file.
pub const RESTAURANT_FILE: &str = "restaurant";

// ===========================================================================
// Errors
// ===========================================================================

/// Errors that can occur during data loading.
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    /// A required data file was not found in the given directory.
    #[error("required file '{file}' not found in {dir}")]
    MissingRequired { file: &'static str, dir: PathBuf },

    /// The file has an extension we don't support.
    #[error("unsupported format for file: {file}")]
    UnsupportedFormat { file: PathBuf },

    /// Two files with the same base name but different formats exist.
    #[error("conflicting formats: {a} and {b}")]
    ConflictingFormats { a: PathBuf, b: PathBuf },

    /// A deserialization error occurred.
    #[error("parse error in {file}: {detail}")]
    Parse { file: PathBuf, detail: String },

    /// A name reference could not be resolved.
    #[error("unresolved {expected_kind} reference '{name}' in {file}")]
    UnresolvedRef {
        file: PathBuf,
        name: String,
        expected_kind: &'static str,
    },

    /// A duplicate name was found.
    #[error("duplicate name '{name}' in {file}")]
    DuplicateName { file: PathBuf, name: String },

    /// A duration that is not finite or does not fit simulation time.
    #[error("{field} = {value} in {file} is not a usable number of seconds")]
    OutOfRange {
        file: PathBuf,
        field: &'static str,
        value: f64,
    },

    /// The file parsed but describes a restaurant the simulation rejects.
    #[error("invalid restaurant in {file}: {source}")]
    Invalid {
        file: PathBuf,
        #[source]
        source: ConfigError,
    },

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// ===========================================================================
// Format detection
// ===========================================================================

/// Supported data file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Ron,
    Toml,
    Json,
}

/// Detect the format of a file based on its extension.
pub fn detect_format(path: &Path) -> Result<Format, DataLoadError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("ron") => Ok(Format::Ron),
        Some("toml") => Ok(Format::Toml),
        Some("json") => Ok(Format::Json),
        _ => Err(DataLoadError::UnsupportedFormat {
            file: path.to_path_buf(),
        }),
    }
}

// ===========================================================================
// File discovery
// ===========================================================================

/// Scan a directory for a data file with the given base name (without extension).
///
/// Returns `Ok(None)` if no file is found, or `Err(ConflictingFormats)` if
/// multiple formats exist for the same base name.
pub fn find_data_file(dir: &Path, base_name: &str) -> Result<Option<PathBuf>, DataLoadError> {
    let mut found: Option<PathBuf> = None;

    for ext in ["ron", "toml", "json"] {
        let candidate = dir.join(format!("{base_name}.{ext}"));
        if candidate.exists() {
            if let Some(existing) = found {
                return Err(DataLoadError::ConflictingFormats {
                    a: existing,
                    b: candidate,
                });
            }
            found = Some(candidate);
        }
    }

    Ok(found)
}

// ===========================================================================
// Deserialization
// ===========================================================================

/// Read a file and deserialize it according to its format (detected from extension).
pub fn deserialize_file<T: DeserializeOwned>(path: &Path) -> Result<T, DataLoadError> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;
    let parse_error = |detail: String| DataLoadError::Parse {
        file: path.to_path_buf(),
        detail,
    };

    match format {
        Format::Ron => ron::from_str(&content).map_err(|e| parse_error(e.to_string())),
        Format::Json => serde_json::from_str(&content).map_err(|e| parse_error(e.to_string())),
        Format::Toml => toml::from_str(&content).map_err(|e| parse_error(e.to_string())),
    }
}

// ===========================================================================
// Resolution
// ===========================================================================

/// A loaded restaurant: the simulation config plus the human names of the
/// locations it refers to.
#[derive(Debug, Clone)]
pub struct RestaurantDefinition {
    pub config: RestaurantConfig,
    pub location_names: HashMap<Location, String>,
}

impl RestaurantDefinition {
    /// The name a data file gave `location`, or a numbered fallback.
    pub fn location_name(&self, location: Location) -> String {
        self.location_names
            .get(&location)
            .cloned()
            .unwrap_or_else(|| format!("location #{}", location.0))
    }
}

/// Load `restaurant.{ron,toml,json}` from `dir`.
pub fn load_restaurant(dir: &Path) -> Result<RestaurantDefinition, DataLoadError> {
    let path = find_data_file(dir, RESTAURANT_FILE)?.ok_or_else(|| {
        DataLoadError::MissingRequired {
            file: RESTAURANT_FILE,
            dir: dir.to_path_buf(),
        }
    })?;
    log::info!("loading restaurant from {}", path.display());
    let data: RestaurantData = deserialize_file(&path)?;
    resolve_restaurant(data, &path)
}

/// Turn on-disk data into a validated config, filling gaps from the stock
/// tuning.
pub fn resolve_restaurant(
    data: RestaurantData,
    file: &Path,
) -> Result<RestaurantDefinition, DataLoadError> {
    let mut config = RestaurantConfig::default();
    let mut location_names = HashMap::new();

    if let Some(seed) = data.seed {
        config.seed = seed;
    }
    if let Some(timestep) = data.fixed_timestep {
        config.tick_strategy = TickStrategy::Fixed {
            timestep: seconds(timestep, "fixed_timestep", file)?,
        };
    }
    if let Some(capacity) = data.event_buffer_capacity {
        config.event_buffer_capacity = capacity;
    }

    // -- Kitchen --
    let kitchen = data.kitchen;
    set_seconds(&mut config.cook_duration, kitchen.cook_seconds, "kitchen.cook_seconds", file)?;
    set_seconds(&mut config.burn_duration, kitchen.burn_seconds, "kitchen.burn_seconds", file)?;
    set_seconds(&mut config.blend_duration, kitchen.blend_seconds, "kitchen.blend_seconds", file)?;
    set(&mut config.ovens, kitchen.ovens);

    // -- Menu --
    let menu = data.menu;
    if let Some(names) = menu.required {
        config.required_ingredients = resolve_ingredients(&names, file)?;
    }
    if let Some(names) = menu.optional {
        config.optional_ingredients = resolve_ingredients(&names, file)?;
    }
    set(&mut config.order_sampling, menu.sampling);
    set(&mut config.match_policy, menu.match_policy);

    // -- Customers --
    let customers = data.customers;
    set(&mut config.customer_names, customers.names);
    set_seconds(
        &mut config.base_patience,
        customers.base_patience,
        "customers.base_patience",
        file,
    )?;
    set_seconds(
        &mut config.patience_penalty,
        customers.patience_penalty,
        "customers.patience_penalty",
        file,
    )?;
    set_seconds(&mut config.min_patience, customers.min_patience, "customers.min_patience", file)?;
    set_seconds(
        &mut config.approach_duration,
        customers.approach_seconds,
        "customers.approach_seconds",
        file,
    )?;
    set_seconds(&mut config.turn_duration, customers.turn_seconds, "customers.turn_seconds", file)?;
    set_seconds(
        &mut config.exit_walk_duration,
        customers.exit_walk_seconds,
        "customers.exit_walk_seconds",
        file,
    )?;
    set_seconds(
        &mut config.celebrate_duration,
        customers.celebrate_seconds,
        "customers.celebrate_seconds",
        file,
    )?;

    // -- Dining room --
    let room = data.dining_room;
    if let Some(seats) = room.seats {
        let mut by_name: HashMap<String, Location> = HashMap::new();
        config.seats.clear();
        for (i, name) in seats.iter().enumerate() {
            check_duplicate(&by_name, name, file)?;
            let location = Location(i as u32);
            by_name.insert(name.clone(), location);
            location_names.insert(location, name.clone());
            config.seats.push(location);
        }
        let doors = seats.len() as u32;
        config.entry = Location(doors);
        config.exit = Location(doors + 1);
    }
    location_names.insert(
        config.entry,
        room.entry.unwrap_or_else(|| "entry".to_string()),
    );
    location_names.insert(config.exit, room.exit.unwrap_or_else(|| "exit".to_string()));

    // -- Spawning --
    let spawning = data.spawning;
    set(&mut config.auto_spawn, spawning.auto_spawn);
    set_seconds(
        &mut config.spawn_interval,
        spawning.interval_seconds,
        "spawning.interval_seconds",
        file,
    )?;
    set(&mut config.customers_per_level, spawning.customers_per_level);

    // -- Progression --
    let progression = data.progression;
    set_seconds(
        &mut config.day_duration,
        progression.day_seconds,
        "progression.day_seconds",
        file,
    )?;
    set(&mut config.days_per_level, progression.days_per_level);
    set(&mut config.max_level, progression.max_level);

    // -- Player --
    let player = data.player;
    set(&mut config.max_health, player.max_health);
    set(&mut config.damage_per_failure, player.damage_per_failure);

    config.validate().map_err(|source| DataLoadError::Invalid {
        file: file.to_path_buf(),
        source,
    })?;
    log::debug!(
        "restaurant resolved: {} seats, {} ovens",
        config.seats.len(),
        config.ovens
    );

    Ok(RestaurantDefinition {
        config,
        location_names,
    })
}

fn set<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

fn set_seconds(
    slot: &mut Seconds,
    value: Option<f64>,
    field: &'static str,
    file: &Path,
) -> Result<(), DataLoadError> {
    if let Some(value) = value {
        *slot = seconds(value, field, file)?;
    }
    Ok(())
}

fn seconds(value: f64, field: &'static str, file: &Path) -> Result<Seconds, DataLoadError> {
    checked_f64_to_fixed64(value).ok_or_else(|| DataLoadError::OutOfRange {
        file: file.to_path_buf(),
        field,
        value,
    })
}

/// Look up ingredient names, returning an `UnresolvedRef` error for the
/// first unknown one.
pub fn resolve_ingredients(
    names: &[String],
    file: &Path,
) -> Result<Vec<IngredientKind>, DataLoadError> {
    names
        .iter()
        .map(|name| {
            IngredientKind::parse(name).ok_or_else(|| DataLoadError::UnresolvedRef {
                file: file.to_path_buf(),
                name: name.clone(),
                expected_kind: "ingredient",
            })
        })
        .collect()
}

/// Check whether a name already exists in a map, returning a `DuplicateName`
/// error if so.
pub fn check_duplicate<V>(
    map: &HashMap<String, V>,
    name: &str,
    file: &Path,
) -> Result<(), DataLoadError> {
    if map.contains_key(name) {
        Err(DataLoadError::DuplicateName {
            file: file.to_path_buf(),
            name: name.to_string(),
        })
    } else {
        Ok(())
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pizzeria_core::fixed::{f64_to_fixed64, secs};
    use pizzeria_core::order::MatchPolicy;
    use std::fs;

    /// Create a temporary directory with a unique name for test isolation.
    fn make_test_dir(suffix: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "pizzeria_data_test_{suffix}_{}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    /// Clean up a test directory.
    fn cleanup(dir: &Path) {
        let _ = fs::remove_dir_all(dir);
    }

    // -----------------------------------------------------------------------
    // detect_format / find_data_file
    // -----------------------------------------------------------------------

    #[test]
    fn detect_format_by_extension() {
        assert_eq!(detect_format(Path::new("r.ron")).unwrap(), Format::Ron);
        assert_eq!(detect_format(Path::new("r.toml")).unwrap(), Format::Toml);
        assert_eq!(detect_format(Path::new("r.json")).unwrap(), Format::Json);
        assert!(matches!(
            detect_format(Path::new("r.yaml")),
            Err(DataLoadError::UnsupportedFormat { .. })
        ));
        assert!(matches!(
            detect_format(Path::new("restaurant")),
            Err(DataLoadError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn find_data_file_missing_and_conflict() {
        let dir = make_test_dir("find");
        assert_eq!(find_data_file(&dir, RESTAURANT_FILE).unwrap(), None);

        fs::write(dir.join("restaurant.ron"), "()").unwrap();
        assert_eq!(
            find_data_file(&dir, RESTAURANT_FILE).unwrap(),
            Some(dir.join("restaurant.ron"))
        );

        fs::write(dir.join("restaurant.json"), "{}").unwrap();
        assert!(matches!(
            find_data_file(&dir, RESTAURANT_FILE),
            Err(DataLoadError::ConflictingFormats { .. })
        ));

        cleanup(&dir);
    }

    // -----------------------------------------------------------------------
    // load_restaurant, per format
    // -----------------------------------------------------------------------

    #[test]
    fn load_ron() {
        let dir = make_test_dir("load_ron");
        fs::write(
            dir.join("restaurant.ron"),
            r#"(
    seed: Some(7),
    kitchen: (cook_seconds: Some(4.0), burn_seconds: Some(9.0)),
    menu: (optional: Some(["bacon", "Pineapple"]), match_policy: Some(exact)),
    dining_room: (seats: Some(["window", "bar", "booth"]), entry: Some("front door")),
)"#,
        )
        .unwrap();

        let def = load_restaurant(&dir).unwrap();
        assert_eq!(def.config.seed, 7);
        assert_eq!(def.config.cook_duration, secs(4));
        assert_eq!(def.config.burn_duration, secs(9));
        assert_eq!(
            def.config.optional_ingredients,
            vec![IngredientKind::Bacon, IngredientKind::Pineapple]
        );
        assert_eq!(def.config.match_policy, MatchPolicy::Exact);
        assert_eq!(def.config.seats.len(), 3);
        assert_eq!(def.location_name(Location(1)), "bar");
        assert_eq!(def.location_name(def.config.entry), "front door");
        assert_eq!(def.location_name(def.config.exit), "exit");

        cleanup(&dir);
    }

    #[test]
    fn load_toml() {
        let dir = make_test_dir("load_toml");
        fs::write(
            dir.join("restaurant.toml"),
            r#"
fixed_timestep = 0.25

[customers]
names = ["Ada", "Grace"]
base_patience = 60.0

[progression]
days_per_level = 3
"#,
        )
        .unwrap();

        let def = load_restaurant(&dir).unwrap();
        assert_eq!(
            def.config.tick_strategy,
            TickStrategy::Fixed {
                timestep: f64_to_fixed64(0.25)
            }
        );
        assert_eq!(def.config.customer_names, vec!["Ada", "Grace"]);
        assert_eq!(def.config.base_patience, secs(60));
        assert_eq!(def.config.days_per_level, 3);
        // Untouched sections keep the stock tuning.
        assert_eq!(def.config.seats, RestaurantConfig::default().seats);

        cleanup(&dir);
    }

    #[test]
    fn load_json() {
        let dir = make_test_dir("load_json");
        fs::write(
            dir.join("restaurant.json"),
            r#"{ "spawning": { "auto_spawn": false }, "player": { "max_health": 3 } }"#,
        )
        .unwrap();

        let def = load_restaurant(&dir).unwrap();
        assert!(!def.config.auto_spawn);
        assert_eq!(def.config.max_health, 3);

        cleanup(&dir);
    }

    // -----------------------------------------------------------------------
    // Failures
    // -----------------------------------------------------------------------

    #[test]
    fn missing_file() {
        let dir = make_test_dir("missing");
        let result = load_restaurant(&dir);
        assert!(matches!(
            result,
            Err(DataLoadError::MissingRequired { file: "restaurant", .. })
        ));
        cleanup(&dir);
    }

    #[test]
    fn parse_error_names_the_file() {
        let dir = make_test_dir("parse");
        fs::write(dir.join("restaurant.json"), "{ not json").unwrap();
        let err = load_restaurant(&dir).unwrap_err();
        assert!(matches!(err, DataLoadError::Parse { .. }));
        assert!(err.to_string().contains("restaurant.json"));
        cleanup(&dir);
    }

    #[test]
    fn huge_duration_in_toml_is_out_of_range() {
        let dir = make_test_dir("range_toml");
        fs::write(
            dir.join("restaurant.toml"),
            "[kitchen]\nburn_seconds = 1e12\n",
        )
        .unwrap();
        let err = load_restaurant(&dir).unwrap_err();
        assert!(matches!(
            err,
            DataLoadError::OutOfRange { field: "kitchen.burn_seconds", .. }
        ));
        cleanup(&dir);
    }

    #[test]
    fn infinite_duration_in_toml_is_out_of_range() {
        let dir = make_test_dir("inf_toml");
        fs::write(dir.join("restaurant.toml"), "fixed_timestep = inf\n").unwrap();
        assert!(matches!(
            load_restaurant(&dir),
            Err(DataLoadError::OutOfRange { field: "fixed_timestep", .. })
        ));
        cleanup(&dir);
    }

    #[test]
    fn huge_duration_in_ron_is_out_of_range() {
        let dir = make_test_dir("range_ron");
        fs::write(
            dir.join("restaurant.ron"),
            "(customers: (base_patience: Some(-5e10)))",
        )
        .unwrap();
        assert!(matches!(
            load_restaurant(&dir),
            Err(DataLoadError::OutOfRange { field: "customers.base_patience", .. })
        ));
        cleanup(&dir);
    }

    #[test]
    fn huge_duration_in_json_is_out_of_range() {
        let dir = make_test_dir("range_json");
        fs::write(
            dir.join("restaurant.json"),
            r#"{ "progression": { "day_seconds": 1e300 } }"#,
        )
        .unwrap();
        let err = load_restaurant(&dir).unwrap_err();
        assert!(matches!(
            err,
            DataLoadError::OutOfRange { field: "progression.day_seconds", .. }
        ));
        assert!(err.to_string().contains("restaurant.json"));
        cleanup(&dir);
    }

    #[test]
    fn nan_duration_is_out_of_range() {
        let mut data = RestaurantData::default();
        data.spawning.interval_seconds = Some(f64::NAN);
        assert!(matches!(
            resolve_restaurant(data, Path::new("r.ron")),
            Err(DataLoadError::OutOfRange { field: "spawning.interval_seconds", .. })
        ));
    }

    #[test]
    fn unknown_ingredient() {
        let result = resolve_ingredients(&["anchovy".to_string()], Path::new("r.ron"));
        assert!(matches!(
            result,
            Err(DataLoadError::UnresolvedRef { ref name, expected_kind: "ingredient", .. })
                if name == "anchovy"
        ));
    }

    #[test]
    fn duplicate_seat_name() {
        let mut data = RestaurantData::default();
        data.dining_room.seats = Some(vec!["bar".into(), "bar".into()]);
        let result = resolve_restaurant(data, Path::new("r.ron"));
        assert!(matches!(
            result,
            Err(DataLoadError::DuplicateName { ref name, .. }) if name == "bar"
        ));
    }

    #[test]
    fn invalid_tuning_is_rejected() {
        let mut data = RestaurantData::default();
        data.kitchen.cook_seconds = Some(12.0);
        let result = resolve_restaurant(data, Path::new("r.ron"));
        assert!(matches!(
            result,
            Err(DataLoadError::Invalid {
                source: ConfigError::BurnNotAfterCook,
                ..
            })
        ));
    }

    #[test]
    fn empty_definition_is_stock_tuning() {
        let def = resolve_restaurant(RestaurantData::default(), Path::new("r.ron")).unwrap();
        assert_eq!(def.config, RestaurantConfig::default());
    }

    #[test]
    fn io_error_converts() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let data_err: DataLoadError = io_err.into();
        assert!(matches!(data_err, DataLoadError::Io(_)));
        assert!(format!("{data_err}").contains("file not found"));
    }
}
