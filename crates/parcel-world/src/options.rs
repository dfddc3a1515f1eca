use serde::Deserialize;
use std::error::Error;
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Deserialize)]
pub struct GeneratorOptions {
    #[serde(default = "default_parcel_size")]
    pub parcel_size: i32,
    #[serde(default = "default_path_width")]
    pub path_width: i32,
    #[serde(default = "default_floor_height")]
    pub floor_height: i32,
    #[serde(default = "default_max_height")]
    pub max_height: i32,
    #[serde(default)]
    pub offset_x: i32,
    #[serde(default)]
    pub offset_z: i32,
    #[serde(default)]
    pub materials: MaterialNames,
}

fn default_parcel_size() -> i32 {
    8
}
fn default_path_width() -> i32 {
    3
}
fn default_floor_height() -> i32 {
    64
}
fn default_max_height() -> i32 {
    128
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            parcel_size: default_parcel_size(),
            path_width: default_path_width(),
            floor_height: default_floor_height(),
            max_height: default_max_height(),
            offset_x: 0,
            offset_z: 0,
            materials: MaterialNames::default(),
        }
    }
}

impl GeneratorOptions {
    pub fn from_toml_str(toml_str: &str) -> Result<Self, Box<dyn Error>> {
        Ok(toml::from_str(toml_str)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }
}

/// Catalog keys for the five material roles the generator places.
#[derive(Clone, Debug, Deserialize)]
pub struct MaterialNames {
    #[serde(default = "default_floor_material")]
    pub floor: String,
    #[serde(default = "default_wall_material")]
    pub wall: String,
    #[serde(default = "default_path_main_material")]
    pub path_main: String,
    #[serde(default = "default_path_alt_material")]
    pub path_alt: String,
    #[serde(default = "default_fill_material")]
    pub fill: String,
}

fn default_floor_material() -> String {
    "quartz_block".to_string()
}
fn default_wall_material() -> String {
    "stone_slab".to_string()
}
fn default_path_main_material() -> String {
    "smooth_stone".to_string()
}
fn default_path_alt_material() -> String {
    "gravel".to_string()
}
fn default_fill_material() -> String {
    "stone".to_string()
}

impl Default for MaterialNames {
    fn default() -> Self {
        Self {
            floor: default_floor_material(),
            wall: default_wall_material(),
            path_main: default_path_main_material(),
            path_alt: default_path_alt_material(),
            fill: default_fill_material(),
        }
    }
}

impl MaterialNames {
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        [
            self.floor.as_str(),
            self.wall.as_str(),
            self.path_main.as_str(),
            self.path_alt.as_str(),
            self.fill.as_str(),
        ]
        .into_iter()
    }
}
