use tack::{
    GridBounds, GridConfig, Heading, HexCoord, HexCoordSet, Pathfinder,
    PlannerConfig, SearchConfig,
};
use validator::{Validate, ValidationErrors};

/// Get the names of all invalid fields, sorted
fn error_fields(validation_errors: &ValidationErrors) -> Vec<&'static str> {
    let mut error_fields = validation_errors
        .errors()
        .keys()
        .copied()
        .collect::<Vec<&str>>();
    error_fields.sort_unstable();
    error_fields
}

#[test]
fn test_config_validation() {
    let config = PlannerConfig {
        grid: GridConfig {
            radius: 10001,   // invalid (too big)
            tile_size: 0.0, // invalid
        },
        search: SearchConfig {
            turn_limit: -1.0,          // invalid
            allow_initial_turn: true, // valid
        },
    };

    let validation_errors = config.validate().unwrap_err();
    assert_eq!(
        error_fields(&validation_errors),
        vec!["grid", "search"],
        "incorrect validation errors in {:#?}",
        validation_errors
    );
}

#[test]
fn test_default_config_is_valid() {
    assert!(PlannerConfig::default().validate().is_ok());
}

#[test]
fn test_grid_config_validation() {
    let config = GridConfig {
        radius: 10001,
        tile_size: -1.0,
    };
    let err = GridBounds::from_config(&config).unwrap_err();
    let validation_errors = err.downcast::<ValidationErrors>().unwrap();
    assert_eq!(
        error_fields(&validation_errors),
        vec!["radius", "tile_size"],
        "incorrect validation errors in {:#?}",
        validation_errors
    );
}

#[test]
fn test_search_config_validation() {
    let config = SearchConfig {
        turn_limit: 181.0,
        ..Default::default()
    };
    let err = Pathfinder::with_config(
        &config,
        HexCoord::ORIGIN,
        Heading::North,
        &GridBounds::new(3),
        &HexCoordSet::default(),
    )
    .unwrap_err();
    assert_eq!(err.to_string(), "invalid search config");
    let validation_errors = err.downcast::<ValidationErrors>().unwrap();
    assert_eq!(error_fields(&validation_errors), vec!["turn_limit"]);
}

#[test]
fn test_partial_config() {
    // Anything missing falls back to the default
    let config: PlannerConfig =
        serde_json::from_str(r#"{"search": {"turn_limit": 130.0}}"#).unwrap();
    assert_eq!(
        config,
        PlannerConfig {
            grid: GridConfig::default(),
            search: SearchConfig {
                turn_limit: 130.0,
                allow_initial_turn: false,
            },
        }
    );
}
