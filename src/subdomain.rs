use {
    crate::{
        error::{Error, Result},
        grid::Grid,
        selection::Axis,
    },
    log::info,
    ndarray::{Array3, ArrayView2, Axis as NdAxis},
    serde::{Deserialize, Serialize},
    std::{
        fs::{create_dir_all, File},
        io::{BufReader, BufWriter},
        path::Path,
    },
};

/// An extracted box together with the coordinates of its points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubDomain {
    /// Field values indexed `[x, y, z]`
    pub data: Array3<f64>,
    pub grid: Grid,
}

impl SubDomain {
    pub fn shape(&self) -> (usize, usize, usize) {
        self.data.dim()
    }

    /// The plane normal to `normal` at `index` along it, or at the last index if `None`
    ///
    /// The remaining axes keep their order, so a plane normal to y is indexed `[x, z]`.
    pub fn plane(&self, normal: Axis, index: Option<usize>) -> Result<ArrayView2<f64>> {
        let (nd_axis, len) = match normal {
            Axis::X => (NdAxis(0), self.data.dim().0),
            Axis::Y => (NdAxis(1), self.data.dim().1),
            Axis::Z => (NdAxis(2), self.data.dim().2),
        };

        let index = index.unwrap_or_else(|| len.saturating_sub(1));
        if index >= len {
            return Err(Error::OutOfBounds {
                axis: normal,
                bound: index,
                extent: len,
            });
        }

        Ok(self.data.index_axis(nd_axis, index))
    }

    /// Writes the box and its coordinates to `path` with bincode
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            create_dir_all(parent)?;
        }

        let writer = BufWriter::new(File::create(path)?);
        bincode::serialize_into(writer, self)?;

        info!("Saved sub-domain to {:?}", path);
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(bincode::deserialize_from(reader)?)
    }
}
