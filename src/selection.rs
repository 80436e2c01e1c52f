use {
    crate::error::{Error, Result},
    serde::{Deserialize, Serialize},
    std::fmt,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        };
        write!(f, "{}", name)
    }
}

/// Grid resolution of a full snapshot as stored on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extents {
    pub nx: usize,
    pub ny: usize,
    pub nz: usize,
}

impl Extents {
    pub fn new(nx: usize, ny: usize, nz: usize) -> Self {
        Extents { nx, ny, nz }
    }

    pub fn along(&self, axis: Axis) -> usize {
        match axis {
            Axis::X => self.nx,
            Axis::Y => self.ny,
            Axis::Z => self.nz,
        }
    }

    /// Number of elements in the full domain, `None` if it does not fit in a `usize`
    pub fn checked_len(&self) -> Option<usize> {
        self.nx.checked_mul(self.ny)?.checked_mul(self.nz)
    }
}

/// Indices `offset, offset + skip, ..., offset + (count - 1) * skip` along one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisSelection {
    pub offset: usize,
    pub count: usize,
    pub skip: usize,
}

impl Default for AxisSelection {
    /// 32 consecutive points from the start of the axis
    fn default() -> Self {
        AxisSelection::new(0, 32, 1)
    }
}

impl AxisSelection {
    /// Fills the values not given from [`AxisSelection::default`]
    pub fn from_options(offset: Option<usize>, count: Option<usize>, skip: Option<usize>) -> Self {
        let default = AxisSelection::default();
        AxisSelection::new(
            offset.unwrap_or(default.offset),
            count.unwrap_or(default.count),
            skip.unwrap_or(default.skip),
        )
    }

    pub fn new(offset: usize, count: usize, skip: usize) -> Self {
        AxisSelection {
            offset,
            count,
            skip,
        }
    }

    /// Every index in the half-open range `[start, end)`
    pub fn range(start: usize, end: usize) -> Self {
        AxisSelection::new(start, end.saturating_sub(start), 1)
    }

    /// The whole axis of length `n`
    pub fn full(n: usize) -> Self {
        AxisSelection::new(0, n, 1)
    }

    /// Last index touched by this selection
    pub fn last(&self) -> usize {
        self.offset + (self.count - 1) * self.skip
    }

    /// Number of consecutive elements spanned from the first to the last selected index
    pub fn span(&self) -> usize {
        self.last() - self.offset + 1
    }

    pub fn index(&self, i: usize) -> usize {
        self.offset + i * self.skip
    }

    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.count).map(move |i| self.index(i))
    }

    pub fn check(&self, axis: Axis, extent: usize) -> Result<()> {
        if self.count == 0 {
            return Err(Error::InvalidSelection {
                axis,
                reason: "sample count must be at least 1",
            });
        }
        if self.skip == 0 {
            return Err(Error::InvalidSelection {
                axis,
                reason: "subsampling rate must be at least 1",
            });
        }

        let bound = self
            .count
            .checked_sub(1)
            .and_then(|n| n.checked_mul(self.skip))
            .and_then(|n| n.checked_add(self.offset))
            .unwrap_or(usize::MAX);

        if bound >= extent {
            return Err(Error::OutOfBounds {
                axis,
                bound,
                extent,
            });
        }

        Ok(())
    }
}

/// Sub-domain box, one selection per axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoxSelection {
    pub x: AxisSelection,
    pub y: AxisSelection,
    pub z: AxisSelection,
}

impl BoxSelection {
    pub fn new(x: AxisSelection, y: AxisSelection, z: AxisSelection) -> Self {
        BoxSelection { x, y, z }
    }

    pub fn full(extents: Extents) -> Self {
        BoxSelection::new(
            AxisSelection::full(extents.nx),
            AxisSelection::full(extents.ny),
            AxisSelection::full(extents.nz),
        )
    }

    pub fn along(&self, axis: Axis) -> &AxisSelection {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
            Axis::Z => &self.z,
        }
    }

    /// Shape of the extracted array, `(count_x, count_y, count_z)`
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.x.count, self.y.count, self.z.count)
    }

    /// Fails with the first axis whose selection leaves the domain
    pub fn check(&self, extents: &Extents) -> Result<()> {
        for &axis in &[Axis::X, Axis::Y, Axis::Z] {
            self.along(axis).check(axis, extents.along(axis))?;
        }
        Ok(())
    }
}
