//! File-backed client storage: a cookie jar and a local-storage map.
//!
//! Each medium is one JSON object on disk. Writes go to a temporary file that
//! is renamed over the original, so a reader sees either the old or the new
//! contents. Concurrent writers race; the last rename wins.

use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::warn;

pub const COOKIE_FILE: &str = "cookies.json";
pub const LOCAL_STORAGE_FILE: &str = "local_storage.json";

/// A single persisted cookie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cookie {
    pub value: String,
    pub expires: DateTime<Utc>,
    pub path: String,
}

impl Cookie {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires <= now
    }
}

/// Named cookies with an expiry, scoped to the whole site (`path=/`).
#[derive(Debug, Clone)]
pub struct CookieJar {
    path: PathBuf,
}

impl CookieJar {
    pub fn new(dir: &Path) -> Self {
        Self {
            path: dir.join(COOKIE_FILE),
        }
    }

    /// Value of a cookie that has not yet expired.
    pub fn get(&self, name: &str) -> io::Result<Option<String>> {
        let now = Utc::now();
        let cookies: BTreeMap<String, Cookie> = read_map(&self.path)?;
        Ok(cookies
            .get(name)
            .filter(|c| !c.is_expired_at(now))
            .map(|c| c.value.clone()))
    }

    /// Set several cookies in one write, each expiring `max_age` from now.
    pub fn set_many(&self, entries: &[(&str, &str)], max_age: Duration) -> io::Result<()> {
        let now = Utc::now();
        let mut cookies: BTreeMap<String, Cookie> = read_map_for_write(&self.path)?;
        cookies.retain(|_, c| !c.is_expired_at(now));
        for (name, value) in entries {
            cookies.insert(
                (*name).to_string(),
                Cookie {
                    value: (*value).to_string(),
                    expires: now + max_age,
                    path: "/".into(),
                },
            );
        }
        write_map(&self.path, &cookies)
    }

    /// Delete several cookies in one write. Missing names are ignored.
    pub fn remove_many(&self, names: &[&str]) -> io::Result<()> {
        let mut cookies: BTreeMap<String, Cookie> = read_map_for_write(&self.path)?;
        let before = cookies.len();
        for name in names {
            cookies.remove(*name);
        }
        if cookies.len() == before {
            return Ok(());
        }
        write_map(&self.path, &cookies)
    }
}

/// Named JSON blobs without expiry.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    path: PathBuf,
}

impl LocalStorage {
    pub fn new(dir: &Path) -> Self {
        Self {
            path: dir.join(LOCAL_STORAGE_FILE),
        }
    }

    pub fn get_item(&self, key: &str) -> io::Result<Option<serde_json::Value>> {
        let mut items: BTreeMap<String, serde_json::Value> = read_map(&self.path)?;
        Ok(items.remove(key))
    }

    pub fn set_item(&self, key: &str, value: &serde_json::Value) -> io::Result<()> {
        let mut items: BTreeMap<String, serde_json::Value> = read_map_for_write(&self.path)?;
        items.insert(key.to_string(), value.clone());
        write_map(&self.path, &items)
    }

    pub fn remove_item(&self, key: &str) -> io::Result<()> {
        let mut items: BTreeMap<String, serde_json::Value> = read_map_for_write(&self.path)?;
        if items.remove(key).is_none() {
            return Ok(());
        }
        write_map(&self.path, &items)
    }
}

fn read_map<T: DeserializeOwned>(path: &Path) -> io::Result<BTreeMap<String, T>> {
    match fs::read(path) {
        Ok(bytes) if bytes.is_empty() => Ok(BTreeMap::new()),
        Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(BTreeMap::new()),
        Err(e) => Err(e),
    }
}

/// Like [`read_map`], but a file that is not valid JSON is replaced rather
/// than blocking every later write.
fn read_map_for_write<T: DeserializeOwned>(path: &Path) -> io::Result<BTreeMap<String, T>> {
    match read_map(path) {
        Err(e)
            if matches!(
                e.kind(),
                io::ErrorKind::InvalidData | io::ErrorKind::UnexpectedEof
            ) =>
        {
            warn!(path = %path.display(), error = %e, "corrupt storage file, starting empty");
            Ok(BTreeMap::new())
        }
        other => other,
    }
}

fn write_map<T: Serialize>(path: &Path, map: &BTreeMap<String, T>) -> io::Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let tmp = path.with_extension("json.tmp");
    let bytes = serde_json::to_vec_pretty(map)?;

    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    // Cookies hold a bearer token.
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(&tmp)?;
    file.write_all(&bytes)?;
    file.sync_all()?;
    drop(file);

    fs::rename(&tmp, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_cookie_set_get() {
        let dir = TempDir::new().unwrap();
        let jar = CookieJar::new(dir.path());
        jar.set_many(&[("publicKey", "abc"), ("token", "t")], Duration::days(365))
            .unwrap();
        assert_eq!(jar.get("publicKey").unwrap().as_deref(), Some("abc"));
        assert_eq!(jar.get("token").unwrap().as_deref(), Some("t"));
        assert_eq!(jar.get("missing").unwrap(), None);
    }

    #[test]
    fn test_cookie_last_write_wins() {
        let dir = TempDir::new().unwrap();
        let jar = CookieJar::new(dir.path());
        jar.set_many(&[("publicKey", "first")], Duration::days(1)).unwrap();
        jar.set_many(&[("publicKey", "second")], Duration::days(1)).unwrap();
        assert_eq!(jar.get("publicKey").unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn test_expired_cookie_is_invisible() {
        let dir = TempDir::new().unwrap();
        let jar = CookieJar::new(dir.path());
        jar.set_many(&[("publicKey", "abc")], Duration::seconds(-1)).unwrap();
        assert_eq!(jar.get("publicKey").unwrap(), None);
    }

    #[test]
    fn test_cookie_is_site_wide() {
        let dir = TempDir::new().unwrap();
        let jar = CookieJar::new(dir.path());
        jar.set_many(&[("token", "t")], Duration::days(365)).unwrap();
        let raw: BTreeMap<String, Cookie> = read_map(&dir.path().join(COOKIE_FILE)).unwrap();
        assert_eq!(raw["token"].path, "/");
        assert!(raw["token"].expires > Utc::now() + Duration::days(364));
    }

    #[test]
    fn test_remove_many_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let jar = CookieJar::new(dir.path());
        jar.remove_many(&["publicKey", "token"]).unwrap();
        assert!(!dir.path().join(COOKIE_FILE).exists());

        jar.set_many(&[("publicKey", "abc")], Duration::days(1)).unwrap();
        jar.remove_many(&["publicKey", "token"]).unwrap();
        jar.remove_many(&["publicKey", "token"]).unwrap();
        assert_eq!(jar.get("publicKey").unwrap(), None);
    }

    #[test]
    fn test_local_storage_round_trip() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path());
        let blob = serde_json::json!({ "token": "t", "customer": { "name": "gary" } });
        storage.set_item("sc-details", &blob).unwrap();
        assert_eq!(storage.get_item("sc-details").unwrap(), Some(blob));

        storage.remove_item("sc-details").unwrap();
        storage.remove_item("sc-details").unwrap();
        assert_eq!(storage.get_item("sc-details").unwrap(), None);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(COOKIE_FILE), b"{not json").unwrap();
        let jar = CookieJar::new(dir.path());
        assert!(jar.get("publicKey").is_err());
    }

    #[test]
    fn test_writes_recover_from_corrupt_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(COOKIE_FILE), b"garbage").unwrap();
        fs::write(dir.path().join(LOCAL_STORAGE_FILE), b"{\"sc-details\":").unwrap();
        let jar = CookieJar::new(dir.path());
        let storage = LocalStorage::new(dir.path());

        jar.remove_many(&["publicKey"]).unwrap();
        storage.remove_item("sc-details").unwrap();

        jar.set_many(&[("publicKey", "abc")], Duration::days(1)).unwrap();
        assert_eq!(jar.get("publicKey").unwrap().as_deref(), Some("abc"));
        storage.set_item("sc-details", &serde_json::json!(1)).unwrap();
        assert_eq!(storage.get_item("sc-details").unwrap(), Some(serde_json::json!(1)));
    }
}
