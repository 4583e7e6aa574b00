//! End-to-end persistence tests: settings survive a save/reload cycle
//! field-for-field, across every supported surface.

use logika_config::{
    BackgroundMode, BitWidth, BranchParMode, ConfigError, ConfigLoader, ConfigSection,
    FpRoundingMode, SettingsMap, StrictPureMode, VerificationConfig,
};
use tempfile::TempDir;

fn sample_config() -> VerificationConfig {
    let mut config = VerificationConfig::default();
    config.general.vm_args = vec!["-Xss4m".to_string()];
    config
        .general
        .env_vars
        .insert("SIREUM_HOME_OVERRIDE".to_string(), "/opt/sireum".to_string());
    config.general.background = BackgroundMode::Save;
    config.general.logging = true;
    config.general.verbose_logging = true;
    config.hints.max_column = 80;
    config.verifier.check_sat = true;
    config.verifier.strict_pure_mode = StrictPureMode::Uninterpreted;
    config.verifier.loop_bound = 5;
    config.rewrite.max_rewrites = 250;
    config.branch_par.mode = BranchParMode::WhenAllReturn;
    config.branch_par.cores = 1;
    config.smt2.bit_width = BitWidth::Bits64;
    config.smt2.fp_rounding = FpRoundingMode::Rtn;
    config.smt2.valid_configs = vec!["z3,-smt2".to_string()];
    config.smt2.timeout_ms = 10_000;
    config
}

#[tokio::test]
async fn toml_file_round_trip_preserves_every_field() {
    let temp = TempDir::new().expect("temp dir");
    let path = temp.path().join("logika.toml");

    let config = sample_config();
    ConfigLoader::save_to_file(&config, &path).await.unwrap();
    let reloaded = ConfigLoader::load_from_file(&path).await.unwrap();

    assert_eq!(reloaded, config);
}

#[tokio::test]
async fn json_file_round_trip_preserves_every_field() {
    let temp = TempDir::new().expect("temp dir");
    let path = temp.path().join("logika.json");

    let config = sample_config();
    ConfigLoader::save_to_file(&config, &path).await.unwrap();
    let reloaded = ConfigLoader::load_from_file(&path).await.unwrap();

    assert_eq!(reloaded, config);
}

#[cfg(feature = "yaml")]
#[tokio::test]
async fn yaml_file_round_trip_preserves_every_field() {
    let temp = TempDir::new().expect("temp dir");
    let path = temp.path().join("logika.yaml");

    let config = sample_config();
    ConfigLoader::save_to_file(&config, &path).await.unwrap();
    let reloaded = ConfigLoader::load_from_file(&path).await.unwrap();

    assert_eq!(reloaded, config);
}

#[test]
fn flat_snapshot_round_trip_preserves_every_field() {
    let config = sample_config();
    let map = SettingsMap::from_config(&config);
    assert_eq!(map.to_config().unwrap(), config);
}

#[test]
fn sync_round_trip_matches_async() {
    let temp = TempDir::new().expect("temp dir");
    let path = temp.path().join("logika.toml");

    let config = sample_config();
    ConfigLoader::save_sync(&config, &path).unwrap();
    assert_eq!(ConfigLoader::load_sync(&path).unwrap(), config);
}

#[tokio::test]
async fn loading_an_out_of_range_file_fails_validation() {
    let temp = TempDir::new().expect("temp dir");
    let path = temp.path().join("logika.toml");

    // A file edited by hand can hold values the settings panel would reject.
    tokio::fs::write(
        &path,
        "[smt2]\ntimeout-ms = 199\n\n[verifier]\nloop-bound = 0\n",
    )
    .await
    .unwrap();

    let err = ConfigLoader::load_from_file(&path).await.unwrap_err();
    match err {
        ConfigError::Validation(errors) => assert_eq!(errors.len(), 2),
        other => panic!("expected validation failure, got: {other}"),
    }
}

#[tokio::test]
async fn timeout_boundary_is_exact() {
    let temp = TempDir::new().expect("temp dir");
    let path = temp.path().join("logika.toml");

    tokio::fs::write(&path, "[smt2]\ntimeout-ms = 200\n")
        .await
        .unwrap();
    let config = ConfigLoader::load_from_file(&path).await.unwrap();
    assert_eq!(config.smt2.timeout_ms, 200);
}

#[test]
fn restored_solver_defaults_survive_round_trip() {
    let mut config = sample_config();
    config.restore_defaults(ConfigSection::Smt2);
    config.restore_defaults(ConfigSection::Smt2);

    let map = SettingsMap::from_config(&config);
    let reloaded = map.to_config().unwrap();
    assert_eq!(reloaded.smt2.valid_configs, logika_config::default_valid_configs());
    assert_eq!(reloaded.smt2.sat_configs, logika_config::default_sat_configs());
}
