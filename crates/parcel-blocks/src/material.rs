use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::types::MaterialId;

#[derive(Clone, Debug)]
pub struct Material {
    pub id: MaterialId,
    pub key: String,
}

/// Registered materials, id 0 always reserved for `"air"`.
#[derive(Clone, Debug)]
pub struct MaterialCatalog {
    pub materials: Vec<Material>,
    pub by_key: HashMap<String, MaterialId>,
}

impl Default for MaterialCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl MaterialCatalog {
    pub fn new() -> Self {
        let mut catalog = Self {
            materials: Vec::new(),
            by_key: HashMap::new(),
        };
        catalog.intern("air");
        catalog
    }

    pub fn get_id(&self, key: &str) -> Option<MaterialId> {
        self.by_key.get(key).copied()
    }

    pub fn get(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(id.0 as usize)
    }

    /// Look up a key, registering it with the next free id when absent.
    pub fn intern(&mut self, key: &str) -> MaterialId {
        if let Some(id) = self.by_key.get(key) {
            return *id;
        }
        let id = MaterialId(self.materials.len() as u16);
        self.by_key.insert(key.to_string(), id);
        self.materials.push(Material {
            id,
            key: key.to_string(),
        });
        id
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self, Box<dyn Error>> {
        let cfg: MaterialsConfig = toml::from_str(toml_str)?;
        let mut catalog = MaterialCatalog::new();
        for key in cfg.materials {
            if key == "air" {
                continue;
            }
            if catalog.by_key.contains_key(&key) {
                return Err(Box::new(CatalogError::Duplicate(key)));
            }
            catalog.intern(&key);
        }
        Ok(catalog)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }
}

#[derive(Debug)]
pub enum CatalogError {
    Duplicate(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Duplicate(key) => write!(f, "duplicate material key: {key}"),
        }
    }
}

impl Error for CatalogError {}

// --- Config ---

#[derive(Deserialize)]
struct MaterialsConfig {
    // materials = ["quartz_block", "stone_slab", ...]
    materials: Vec<String>,
}
