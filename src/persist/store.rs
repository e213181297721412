use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

/// Minimal key-value contract the persistence manager runs against.
///
/// `put_many` exists so the weights/labels pair can be written together:
/// implementations should get as close to both-or-neither as their medium
/// allows.
pub trait KvStore {
    fn put(&self, key: &str, blob: &[u8]) -> io::Result<()>;
    fn get(&self, key: &str) -> io::Result<Option<Vec<u8>>>;

    fn put_many(&self, pairs: &[(&str, &[u8])]) -> io::Result<()> {
        for (key, blob) in pairs {
            self.put(key, blob)?;
        }
        Ok(())
    }
}

/// File-per-key store rooted at a directory.
///
/// Writes go to a temp file first and are renamed into place, so a single
/// `put` is atomic. `put_many` stages every temp file before the first
/// rename, shrinking the window in which the pair can diverge to the
/// renames themselves.
pub struct FsStore {
    dir: PathBuf,
}

impl FsStore {
    pub fn new(dir: impl Into<PathBuf>) -> io::Result<FsStore> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(FsStore { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.blob", key))
    }

    fn tmp_path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.blob.tmp", key))
    }
}

impl KvStore for FsStore {
    fn put(&self, key: &str, blob: &[u8]) -> io::Result<()> {
        let tmp = self.tmp_path_for(key);
        fs::write(&tmp, blob)?;
        fs::rename(&tmp, self.path_for(key))
    }

    fn get(&self, key: &str) -> io::Result<Option<Vec<u8>>> {
        match fs::read(self.path_for(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn put_many(&self, pairs: &[(&str, &[u8])]) -> io::Result<()> {
        // Stage everything first; only then commit the renames.
        for (key, blob) in pairs {
            fs::write(self.tmp_path_for(key), blob)?;
        }
        for (key, _) in pairs {
            fs::rename(self.tmp_path_for(key), self.path_for(key))?;
        }
        Ok(())
    }
}

/// In-memory store for tests and throwaway sessions. `put_many` commits the
/// whole pair under one lock.
#[derive(Default)]
pub struct MemStore {
    map: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemStore {
    pub fn new() -> MemStore {
        MemStore::default()
    }
}

impl KvStore for MemStore {
    fn put(&self, key: &str, blob: &[u8]) -> io::Result<()> {
        self.map.lock().unwrap().insert(key.to_string(), blob.to_vec());
        Ok(())
    }

    fn get(&self, key: &str) -> io::Result<Option<Vec<u8>>> {
        Ok(self.map.lock().unwrap().get(key).cloned())
    }

    fn put_many(&self, pairs: &[(&str, &[u8])]) -> io::Result<()> {
        let mut map = self.map.lock().unwrap();
        for (key, blob) in pairs {
            map.insert(key.to_string(), blob.to_vec());
        }
        Ok(())
    }
}
