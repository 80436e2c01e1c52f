use {
    crate::{
        parameters::Physical,
        selection::{Axis, AxisSelection, BoxSelection, Extents},
    },
    ndarray::{Array1, Array3, Axis as NdAxis},
    serde::{Deserialize, Serialize},
};

/// Physical coordinates of the points of a box selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    pub x: Array1<f64>,
    pub y: Array1<f64>,
    pub z: Array1<f64>,
}

impl Grid {
    pub fn new(physical: &Physical, extents: &Extents, selection: &BoxSelection) -> Self {
        let axis = |axis| {
            coordinates(
                physical.length(axis),
                extents.along(axis),
                selection.along(axis),
            )
        };

        Grid {
            x: axis(Axis::X),
            y: axis(Axis::Y),
            z: axis(Axis::Z),
        }
    }

    pub fn along(&self, axis: Axis) -> &Array1<f64> {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
            Axis::Z => &self.z,
        }
    }
}

/// Coordinates of the selected points on an axis of `length` sampled by `n` points
pub fn coordinates(length: f64, n: usize, selection: &AxisSelection) -> Array1<f64> {
    let dx = length / n as f64;
    selection
        .indices()
        .map(|i| dx * i as f64)
        .collect::<Array1<f64>>()
}

/// Whether `var` names a perturbation density field
pub fn is_density(var: &str) -> bool {
    var == "r" || var == "rho"
}

/// Adds the ambient stratification `drhobar * h` to a perturbation density cube,
/// where `h` is the vertical coordinate
///
/// The result is the total density `rho' + drhobar * h`. The SST post-processing
/// script this replaces multiplied the perturbation by `drhobar * h` instead;
/// boxes written by it differ from these for density.
pub fn add_ambient_density(cube: &mut Array3<f64>, grid: &Grid, physical: &Physical) {
    let vertical = physical.gravity.axis();
    let heights = grid.along(vertical);
    let nd_axis = match vertical {
        Axis::X => NdAxis(0),
        Axis::Y => NdAxis(1),
        Axis::Z => NdAxis(2),
    };

    for (mut plane, h) in cube.axis_iter_mut(nd_axis).zip(heights.iter()) {
        plane += physical.drhobar * h;
    }
}
