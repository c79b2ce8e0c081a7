//! End-to-end synthesis: userdata source -> decoded options -> file + units

use seedconf::datasource::{DataSource, LocalFile};
use seedconf::options::UpdateOptions;
use seedconf::update::{
    UnitCommand, UpdateSynthesizer, REBOOT_MANAGER_UNIT, UPDATE_ENGINE_UNIT,
};
use std::io::Cursor;
use tempfile::TempDir;

fn pipeline(userdata: &str, base: &str) -> (Option<String>, Vec<(String, UnitCommand, bool, bool)>) {
    let temp_dir = TempDir::new().unwrap();
    let userdata_path = temp_dir.path().join("userdata");
    std::fs::write(&userdata_path, userdata).unwrap();

    let source = LocalFile::new(&userdata_path);
    assert!(source.is_available());

    let payload = source.fetch_userdata().unwrap();
    let options = UpdateOptions::from_userdata(&payload).unwrap();
    let synthesizer = UpdateSynthesizer::new(options);

    let artifact = synthesizer.file(Cursor::new(base.to_string())).unwrap();
    let actions = synthesizer
        .units()
        .unwrap()
        .into_iter()
        .map(|a| (a.unit, a.command, a.mask, a.runtime))
        .collect();

    (artifact.map(|a| a.content), actions)
}

#[test]
fn test_rewrite_scenario() {
    let (content, _) = pipeline(
        "[update]\ngroup = \"9\"\n",
        "GROUP=1\nSERVER=2\n# comment\n",
    );
    assert_eq!(content.unwrap(), "GROUP=9\nSERVER=2\n# comment\n");
}

#[test]
fn test_append_scenario_sorted() {
    let (content, _) = pipeline(
        "[update]\ngroup = \"9\"\nserver = \"3\"\n",
        "REBOOT_STRATEGY=reboot\n",
    );
    assert_eq!(content.unwrap(), "REBOOT_STRATEGY=reboot\nGROUP=9\nSERVER=3\n");
}

#[test]
fn test_empty_userdata_produces_nothing() {
    let (content, actions) = pipeline("# no update table\n", "GROUP=1\n");
    assert!(content.is_none());
    assert!(actions.is_empty());
}

#[test]
fn test_reboot_strategy_off_scenario() {
    let (_, actions) = pipeline("[update]\nreboot-strategy = \"off\"\n", "");
    assert_eq!(
        actions,
        vec![(
            REBOOT_MANAGER_UNIT.to_string(),
            UnitCommand::Stop,
            true,
            false
        )]
    );
}

#[test]
fn test_best_effort_with_group_scenario() {
    let (content, actions) = pipeline(
        "[update]\nreboot-strategy = \"best-effort\"\ngroup = \"stable\"\n",
        "GROUP=alpha\n",
    );
    assert_eq!(content.unwrap(), "GROUP=stable\nREBOOT_STRATEGY=best-effort\n");
    assert_eq!(
        actions,
        vec![
            (
                REBOOT_MANAGER_UNIT.to_string(),
                UnitCommand::Restart,
                false,
                true
            ),
            (
                UPDATE_ENGINE_UNIT.to_string(),
                UnitCommand::Restart,
                false,
                false
            ),
        ]
    );
}

#[test]
fn test_whitespace_only_values_are_noop() {
    let (content, actions) = pipeline("[update]\ngroup = \"   \"\n", "GROUP=1\n");
    assert!(content.is_none());
    assert!(actions.is_empty());
}

#[test]
fn test_invalid_strategy_yields_no_artifact() {
    let temp_dir = TempDir::new().unwrap();
    let userdata_path = temp_dir.path().join("userdata");
    std::fs::write(&userdata_path, "[update]\nreboot-strategy = \"maybe\"\n").unwrap();

    let payload = LocalFile::new(&userdata_path).fetch_userdata().unwrap();
    let options = UpdateOptions::from_userdata(&payload).unwrap();
    let result = UpdateSynthesizer::new(options).file(Cursor::new("GROUP=1\n".to_string()));
    assert!(result.is_err());
}
