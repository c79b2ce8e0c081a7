//! Base-template resolution: system path first, vendor fallback second

use seedconf::config::TemplateConfig;
use seedconf::update::open_base_template;
use std::io::Read;
use tempfile::TempDir;

fn write_template(root: &std::path::Path, relative: &std::path::Path, content: &str) {
    let path = root.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

#[test]
fn test_system_template_wins_when_present() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    let templates = TemplateConfig::default();

    write_template(root, &templates.system_path, "GROUP=system\n");
    write_template(root, &templates.vendor_path, "GROUP=vendor\n");

    let mut reader = open_base_template(root, &templates).unwrap();
    let mut content = String::new();
    reader.read_to_string(&mut content).unwrap();
    assert_eq!(content, "GROUP=system\n");
}

#[test]
fn test_vendor_template_is_fallback() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    let templates = TemplateConfig::default();

    write_template(root, &templates.vendor_path, "GROUP=vendor\n");

    let mut reader = open_base_template(root, &templates).unwrap();
    let mut content = String::new();
    reader.read_to_string(&mut content).unwrap();
    assert_eq!(content, "GROUP=vendor\n");
}

#[test]
fn test_missing_both_templates_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let result = open_base_template(temp_dir.path(), &TemplateConfig::default());
    assert!(result.is_err());
}
