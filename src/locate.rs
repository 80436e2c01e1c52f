use std::path::{Path, PathBuf};

/// Separator between variable and snapshot label in the SST database
pub const DEFAULT_DELIMITER: &str = "_";

/// Resolves the file holding one variable of one snapshot
pub trait Locate {
    fn locate(&self, var: &str, snapshot: &str) -> PathBuf;
}

/// Single file per variable and snapshot, named `<var><delimiter><snapshot>`
///
/// The SST database uses `_` as delimiter and six decimals for the time step,
/// so `u` at time 10.15 lives in `u_10.150000`.
#[derive(Debug, Clone)]
pub struct FlatLocator {
    root: PathBuf,
    delimiter: String,
}

impl FlatLocator {
    pub fn new<P: AsRef<Path>, S: Into<String>>(root: P, delimiter: S) -> Self {
        FlatLocator {
            root: root.as_ref().to_owned(),
            delimiter: delimiter.into(),
        }
    }
}

impl Locate for FlatLocator {
    fn locate(&self, var: &str, snapshot: &str) -> PathBuf {
        self.root
            .join(format!("{}{}{}", var, self.delimiter, snapshot))
    }
}
