use {
    crate::{
        error::{Error, Result},
        layout::Layout,
        selection::Axis,
    },
    log::info,
    serde::{Deserialize, Serialize},
    std::{fs::File, path::Path, str::FromStr},
};

/// Dataset parameters that are not part of the snapshot naming
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Parameters {
    pub layout: Layout,
    pub physical: Physical,
}

impl Parameters {
    /// Reads a YAML parameter file, missing keys keep their default
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let params = serde_yaml::from_reader::<_, Parameters>(File::open(path)?).map_err(
            |source| Error::Parameters {
                path: path.to_owned(),
                source,
            },
        )?;
        info!("Successfully loaded parameters from {:?}", path);
        Ok(params)
    }

    /// Replaces the physical parameters given on the command line
    pub fn with_overrides(mut self, overrides: &Overrides) -> Self {
        let physical = &mut self.physical;
        if let Some(gravity) = overrides.gravity {
            physical.gravity = gravity;
        }
        if let Some(length) = overrides.horizontal_length {
            physical.horizontal_length = length;
        }
        if let Some(length) = overrides.vertical_length {
            physical.vertical_length = length;
        }
        if let Some(drhobar) = overrides.drhobar {
            physical.drhobar = drhobar;
        }
        self
    }
}

/// Physical parameters given explicitly, each one wins over the parameter file
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Overrides {
    pub gravity: Option<Gravity>,
    pub horizontal_length: Option<f64>,
    pub vertical_length: Option<f64>,
    pub drhobar: Option<f64>,
}

/// Direction of gravity, which selects the vertical axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gravity {
    Y,
    Z,
}

impl Gravity {
    pub fn axis(&self) -> Axis {
        match self {
            Gravity::Y => Axis::Y,
            Gravity::Z => Axis::Z,
        }
    }
}

impl FromStr for Gravity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "y" => Ok(Gravity::Y),
            "z" => Ok(Gravity::Z),
            _ => Err(Error::InvalidOption {
                name: "gravity",
                value: s.to_owned(),
                expected: "y, z",
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Physical {
    /// Horizontal length of the full box
    pub horizontal_length: f64,
    /// Vertical length of the full box
    pub vertical_length: f64,
    /// Mean density gradient, the ambient density is this times the vertical coordinate
    pub drhobar: f64,
    pub gravity: Gravity,
}

impl Default for Physical {
    fn default() -> Self {
        Physical {
            horizontal_length: 1.0,
            vertical_length: 0.5,
            drhobar: -577.31,
            gravity: Gravity::Y,
        }
    }
}

impl Physical {
    /// Physical length of the full domain along `axis`
    pub fn length(&self, axis: Axis) -> f64 {
        if axis == self.gravity.axis() {
            self.vertical_length
        } else {
            self.horizontal_length
        }
    }
}
