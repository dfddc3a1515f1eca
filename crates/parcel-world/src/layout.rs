use std::error::Error;
use std::fmt;

use crate::options::GeneratorOptions;

/// Derived tiling constants. One section (the repetition period) is a parcel
/// plus its surrounding corridor; `path_offset` centers the parcel within it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridLayout {
    pub parcel_size: i32,
    pub path_width: i32,
    pub section_size: i32,
    pub path_offset: i32,
    pub floor_height: i32,
    pub offset_x: i32,
    pub offset_z: i32,
    pub make_path_main: bool,
    pub make_path_alt: bool,
}

impl GridLayout {
    pub fn new(options: &GeneratorOptions) -> Result<Self, LayoutError> {
        if options.parcel_size <= 0 {
            return Err(LayoutError::NonPositiveParcelSize(options.parcel_size));
        }
        if options.path_width < 0 {
            return Err(LayoutError::NegativePathWidth(options.path_width));
        }
        if options.floor_height < 0 || options.max_height <= options.floor_height {
            return Err(LayoutError::InvalidHeightRange {
                floor: options.floor_height,
                max: options.max_height,
            });
        }
        let path_width = options.path_width;
        // Rounds the half-corridor inset so the corridor stays symmetric
        // around the section boundary, for odd and even widths alike.
        let path_offset = if path_width % 2 == 0 {
            (path_width + 2) / 2
        } else {
            (path_width + 1) / 2
        };
        Ok(Self {
            parcel_size: options.parcel_size,
            path_width,
            section_size: options.parcel_size + path_width,
            path_offset,
            floor_height: options.floor_height,
            offset_x: options.offset_x,
            offset_z: options.offset_z,
            make_path_main: path_width > 2,
            make_path_alt: path_width > 4,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    NonPositiveParcelSize(i32),
    NegativePathWidth(i32),
    InvalidHeightRange { floor: i32, max: i32 },
    UnknownMaterial(String),
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutError::NonPositiveParcelSize(v) => {
                write!(f, "parcel_size must be positive, got {v}")
            }
            LayoutError::NegativePathWidth(v) => {
                write!(f, "path_width must be non-negative, got {v}")
            }
            LayoutError::InvalidHeightRange { floor, max } => {
                write!(f, "max_height {max} must exceed floor_height {floor} >= 0")
            }
            LayoutError::UnknownMaterial(key) => {
                write!(f, "material {key:?} is not in the catalog")
            }
        }
    }
}

impl Error for LayoutError {}
