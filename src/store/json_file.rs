use super::{CocktailStore, StoreError};
use crate::model::Cocktail;
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use std::io;
use std::sync::Mutex;
use tracing::debug;

/// Stores cocktails as a JSON array in a single file.
///
/// A missing file reads as an empty store. Writes go to a sibling file
/// named after the store plus `.tmp`, which is then renamed over the
/// original.
#[derive(Debug)]
pub struct JsonFileStore {
    path: Utf8PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    fn tmp_path(&self) -> Utf8PathBuf {
        Utf8PathBuf::from(format!("{}.tmp", self.path))
    }

    fn read(&self) -> Result<Vec<Cocktail>, StoreError> {
        match fs::read(&self.path) {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(Vec::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    fn write(&self, cocktails: &[Cocktail]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp_path = self.tmp_path();
        fs::write(&tmp_path, serde_json::to_vec_pretty(cocktails)?)?;
        fs::rename(&tmp_path, &self.path)?;
        debug!(path = %self.path, count = cocktails.len(), "wrote saved cocktails");
        Ok(())
    }
}

impl CocktailStore for JsonFileStore {
    fn get_all(&self) -> Result<Vec<Cocktail>, StoreError> {
        let _guard = self.write_lock.lock().map_err(|_| StoreError::LockPoisoned)?;
        self.read()
    }

    fn get(&self, id: &str) -> Result<Option<Cocktail>, StoreError> {
        let _guard = self.write_lock.lock().map_err(|_| StoreError::LockPoisoned)?;
        Ok(self.read()?.into_iter().find(|c| c.id == id))
    }

    fn put(&self, cocktail: &Cocktail) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().map_err(|_| StoreError::LockPoisoned)?;
        let mut cocktails = self.read()?;
        match cocktails.iter_mut().find(|c| c.id == cocktail.id) {
            Some(existing) => *existing = cocktail.clone(),
            None => cocktails.push(cocktail.clone()),
        }
        self.write(&cocktails)
    }

    fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let _guard = self.write_lock.lock().map_err(|_| StoreError::LockPoisoned)?;
        let mut cocktails = self.read()?;
        let before = cocktails.len();
        cocktails.retain(|c| c.id != id);
        if cocktails.len() == before {
            return Ok(false);
        }
        self.write(&cocktails)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::IngredientSlot;
    use crate::store::SavedCocktails;
    use tempfile::TempDir;

    fn temp_store_path(temp_dir: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(temp_dir.path().to_path_buf())
            .unwrap()
            .join("nested")
            .join("my_cocktails.json")
    }

    fn mojito() -> Cocktail {
        let mut cocktail = Cocktail::new("11000");
        cocktail.name = "Mojito".to_string();
        cocktail.is_alcoholic = true;
        cocktail.slots[0] = IngredientSlot::new("Light rum", "2-3 oz ");
        cocktail.slots[1] = IngredientSlot::new("Lime", "Juice of 1 ");
        cocktail
    }

    #[test]
    fn test_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(temp_store_path(&temp_dir));
        assert!(store.get_all().unwrap().is_empty());
        assert!(!store.delete("1").unwrap());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_put_persists_across_instances() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_store_path(&temp_dir);

        JsonFileStore::new(path.clone()).put(&mojito()).unwrap();

        let reopened = JsonFileStore::new(path.clone());
        assert_eq!(reopened.get("11000").unwrap(), Some(mojito()));
        assert!(!path.with_extension("tmp").exists());
        assert!(!Utf8PathBuf::from(format!("{path}.tmp")).exists());
    }

    #[test]
    fn test_tmp_file_is_distinct_from_store() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_store_path(&temp_dir);
        let tmp_named = base.with_extension("tmp");
        let json = JsonFileStore::new(base.clone());
        let yaml = JsonFileStore::new(base.with_extension("yaml"));
        let tmp = JsonFileStore::new(tmp_named.clone());

        assert_ne!(tmp.tmp_path(), tmp_named);
        assert_ne!(json.tmp_path(), yaml.tmp_path());

        tmp.put(&mojito()).unwrap();
        json.put(&Cocktail::new("17222")).unwrap();
        assert_eq!(tmp.get_all().unwrap(), vec![mojito()]);
        assert_eq!(json.get_all().unwrap(), vec![Cocktail::new("17222")]);
        assert!(!tmp.tmp_path().exists());
    }

    #[test]
    fn test_delete_rewrites_file() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(temp_store_path(&temp_dir));
        store.put(&mojito()).unwrap();
        store.put(&Cocktail::new("17222")).unwrap();

        assert!(store.delete("11000").unwrap());
        let ids: Vec<String> = store.get_all().unwrap().into_iter().map(|c| c.id).collect();
        assert_eq!(ids, vec!["17222"]);
    }

    #[test]
    fn test_corrupt_file_is_serde_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_store_path(&temp_dir);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{not json").unwrap();

        let store = JsonFileStore::new(path);
        assert!(matches!(store.get_all(), Err(StoreError::Serde(_))));
    }

    #[test]
    fn test_saved_cocktails_survive_restart() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_store_path(&temp_dir);

        let saved = SavedCocktails::new(JsonFileStore::new(path.clone()));
        saved.add(mojito()).unwrap();
        saved.add(Cocktail::new("17222")).unwrap();
        saved.remove("17222").unwrap();
        drop(saved);

        let saved = SavedCocktails::new(JsonFileStore::new(path));
        assert_eq!(saved.list().unwrap(), vec![mojito()]);
        assert!(saved.contains("11000").unwrap());
    }
}
