//! DataSource contract behavior through trait objects
//!
//! Callers consume providers behind `dyn DataSource`; these tests pin the
//! "nil-without-error means nothing to do" conventions of the contract.

use seedconf::datasource::{DataSource, LocalFile};
use seedconf::error::SourceError;
use tempfile::TempDir;

/// In-memory provider standing in for a future network/metadata source.
struct StaticSource {
    metadata: Vec<u8>,
    userdata: Vec<u8>,
    network: Vec<(String, Vec<u8>)>,
    root: String,
}

impl DataSource for StaticSource {
    fn is_available(&self) -> bool {
        true
    }

    fn availability_changes(&self) -> bool {
        false
    }

    fn config_root(&self) -> String {
        self.root.clone()
    }

    fn fetch_metadata(&self) -> Result<Vec<u8>, SourceError> {
        Ok(self.metadata.clone())
    }

    fn fetch_userdata(&self) -> Result<Vec<u8>, SourceError> {
        Ok(self.userdata.clone())
    }

    fn fetch_network_config(&self, name: &str) -> Result<Option<Vec<u8>>, SourceError> {
        Ok(self
            .network
            .iter()
            .find(|(n, _)| n.as_str() == name)
            .map(|(_, bytes)| bytes.clone()))
    }

    fn kind(&self) -> &'static str {
        "static"
    }
}

#[test]
fn test_providers_are_interchangeable_behind_the_trait() {
    let temp_dir = TempDir::new().unwrap();
    let userdata_path = temp_dir.path().join("userdata");
    std::fs::write(&userdata_path, "[update]\ngroup = \"stable\"\n").unwrap();

    let sources: Vec<Box<dyn DataSource>> = vec![
        Box::new(LocalFile::new(&userdata_path)),
        Box::new(StaticSource {
            metadata: Vec::new(),
            userdata: b"[update]\ngroup = \"stable\"\n".to_vec(),
            network: vec![("eth0".to_string(), b"dhcp".to_vec())],
            root: "network/".to_string(),
        }),
    ];

    for source in &sources {
        assert!(source.is_available());
        let userdata = source.fetch_userdata().unwrap();
        assert_eq!(userdata, b"[update]\ngroup = \"stable\"\n");
    }
}

#[test]
fn test_unsupported_network_config_is_none_not_error() {
    let temp_dir = TempDir::new().unwrap();
    let source: Box<dyn DataSource> = Box::new(LocalFile::new(temp_dir.path().join("userdata")));
    assert_eq!(source.fetch_network_config("eth0").unwrap(), None);
}

#[test]
fn test_network_capable_provider_resolves_names() {
    let source = StaticSource {
        metadata: b"meta".to_vec(),
        userdata: Vec::new(),
        network: vec![("eth0".to_string(), b"dhcp".to_vec())],
        root: "network/".to_string(),
    };
    assert_eq!(source.config_root(), "network/");
    assert_eq!(
        source.fetch_network_config("eth0").unwrap(),
        Some(b"dhcp".to_vec())
    );
    assert_eq!(source.fetch_network_config("eth1").unwrap(), None);
    assert!(!source.availability_changes());
}

#[test]
fn test_empty_metadata_is_legitimate() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("userdata");
    std::fs::write(&path, "").unwrap();
    let source = LocalFile::new(&path);
    assert_eq!(source.fetch_metadata().unwrap(), Vec::<u8>::new());
}
