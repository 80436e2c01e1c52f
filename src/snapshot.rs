use {
    crate::{
        error::{Error, Result},
        layout::Layout,
        locate::Locate,
        selection::Extents,
    },
    log::info,
    std::{
        fs,
        path::{Path, PathBuf},
    },
};

/// A raw snapshot file whose size has been checked against its extents
#[derive(Debug, Clone)]
pub struct Snapshot {
    path: PathBuf,
    extents: Extents,
    layout: Layout,
    size: u64,
}

impl Snapshot {
    /// Resolves `var` at `label` and checks the file against `extents`
    pub fn locate<L: Locate + ?Sized>(
        locator: &L,
        var: &str,
        label: &str,
        extents: Extents,
        layout: Layout,
    ) -> Result<Self> {
        Snapshot::open(locator.locate(var, label), extents, layout)
    }

    /// Checks that `path` exists and holds exactly `nx * ny * nz` elements
    pub fn open<P: AsRef<Path>>(path: P, extents: Extents, layout: Layout) -> Result<Self> {
        let path = path.as_ref().to_owned();

        if !path.is_file() {
            return Err(Error::FileNotFound { path });
        }

        let (samples, expected) = match (extents.checked_len(), layout.file_size(&extents)) {
            (Some(samples), Some(expected)) => (samples, expected),
            _ => {
                let Extents { nx, ny, nz } = extents;
                return Err(Error::ExtentsOverflow { nx, ny, nz });
            }
        };

        let actual = fs::metadata(&path)?.len();
        let element_size = layout.element_size() as u64;

        info!("Checking data file {:?}", path);
        info!("Number of bytes in file =\t{}", actual);
        info!("Number of counted samples =\t{}", actual / element_size);
        info!("Number of actual samples =\t{}", samples);

        if actual != expected {
            return Err(Error::ShapeMismatch {
                path,
                expected,
                actual,
            });
        }

        info!("Number of samples counted == actual. Check complete.");

        Ok(Snapshot {
            path,
            extents,
            layout,
            size: actual,
        })
    }

    /// Byte size of the file, checked against the extents on open
    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn extents(&self) -> &Extents {
        &self.extents
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }
}
