use std::ffi::{OsStr, OsString};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use dealwatch_core::Deal;

use crate::merge::PriorStore;
use crate::StoreError;

/// Reads the raw store file. Returns `Ok(None)` when it does not exist yet.
///
/// # Errors
///
/// Returns [`StoreError::Read`] for any I/O failure other than not-found.
pub fn read_store(path: &Path) -> Result<Option<String>, StoreError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(source) => Err(StoreError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Reads and parses the store file. Unparseable content is reported as
/// [`PriorStore::Corrupt`], not as an error.
///
/// # Errors
///
/// Returns [`StoreError::Read`] if the file exists but cannot be read.
pub fn load_store(path: &Path) -> Result<PriorStore, StoreError> {
    let raw = read_store(path)?;
    Ok(PriorStore::from_raw(raw.as_deref()))
}

/// Overwrites the store with `deals` as a pretty-printed JSON array.
///
/// The content goes to a temporary sibling file first and is then renamed
/// over `path`, so an interrupted write leaves the previous store intact.
///
/// # Errors
///
/// Returns [`StoreError::Serialize`] if the deals cannot be encoded, or
/// [`StoreError::Write`] if the file cannot be written or renamed.
pub fn write_store(path: &Path, deals: &[Deal]) -> Result<(), StoreError> {
    let mut content = serde_json::to_string_pretty(deals)?;
    content.push('\n');

    let write_err = |source: std::io::Error| StoreError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }

    let tmp = temp_path(path);
    std::fs::write(&tmp, content).map_err(write_err)?;
    if let Err(e) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(write_err(e));
    }

    tracing::debug!(path = %path.display(), deals = deals.len(), "store written");
    Ok(())
}

/// `DEALS.json` → `.DEALS.json.tmp` in the same directory.
fn temp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(path.file_name().unwrap_or(OsStr::new("store")));
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use dealwatch_core::DealId;

    use super::*;

    fn sample_deal(id: i64) -> Deal {
        Deal {
            link: Some(format!("https://www.dealabs.com/bons-plans/lego-{id}")),
            retail: Some(100.0),
            price: Some(80.0),
            discount: Some(20),
            comments: 4,
            title: Some(format!("Lego {id}")),
            id: Some(DealId::from(id)),
            ..Deal::default()
        }
    }

    #[test]
    fn read_store_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let raw = read_store(&dir.path().join("DEALS.json")).unwrap();
        assert!(raw.is_none());
    }

    #[test]
    fn read_store_directory_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_store(dir.path()).unwrap_err();
        assert!(matches!(err, StoreError::Read { .. }), "got: {err:?}");
    }

    #[test]
    fn load_store_missing_file_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        let prior = load_store(&dir.path().join("DEALS.json")).unwrap();
        assert!(matches!(prior, PriorStore::Absent));
    }

    #[test]
    fn load_store_corrupt_file_is_reported_not_raised() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("DEALS.json");
        std::fs::write(&path, "[{\"id\": 1,").unwrap();

        let prior = load_store(&path).unwrap();

        assert!(prior.is_corrupt());
    }

    #[test]
    fn write_then_load_preserves_deals() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("DEALS.json");
        let deals = vec![sample_deal(1), sample_deal(2)];

        write_store(&path, &deals).unwrap();
        let loaded = load_store(&path).unwrap().into_deals();

        assert_eq!(loaded, deals);
    }

    #[test]
    fn write_store_pretty_prints_in_field_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("DEALS.json");

        write_store(&path, &[sample_deal(7)]).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();

        let expected = r#"[
  {
    "link": "https://www.dealabs.com/bons-plans/lego-7",
    "retail": 100.0,
    "price": 80.0,
    "discount": 20,
    "temperature": null,
    "image": null,
    "comments": 4,
    "published": null,
    "title": "Lego 7",
    "id": 7
  }
]
"#;
        assert_eq!(content, expected);
    }

    #[test]
    fn write_store_overwrites_existing_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("DEALS.json");
        std::fs::write(&path, "garbage that is much longer than the new content").unwrap();

        write_store(&path, &[]).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]\n");
        assert!(!temp_path(&path).exists());
    }

    #[test]
    fn write_store_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("DEALS.json");

        write_store(&path, &[sample_deal(1)]).unwrap();

        assert!(path.exists());
    }

    #[test]
    fn temp_path_is_hidden_sibling() {
        assert_eq!(
            temp_path(Path::new("/srv/dealwatch/DEALS.json")),
            PathBuf::from("/srv/dealwatch/.DEALS.json.tmp")
        );
    }
}
