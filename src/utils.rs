use {
    crate::{
        error::Result,
        layout::{AxisOrder, Layout},
        selection::Extents,
    },
    ndarray::{ArrayView3, ShapeBuilder},
    std::time::Duration,
};

/// Views a flat buffer as an `[x, y, z]` indexed array in the given layout
pub fn view3d<'a, T>(xs: &'a [T], extents: &Extents, layout: &Layout) -> Result<ArrayView3<'a, T>> {
    let Extents { nx, ny, nz } = *extents;

    let strides = match layout.order {
        AxisOrder::XFastest => (1, nx, nx * ny),
        AxisOrder::ZFastest => (ny * nz, nz, 1),
    };

    Ok(ArrayView3::from_shape((nx, ny, nz).strides(strides), xs)?)
}

/// Formats a duration as `<m> min <s> sec`
pub fn elapsed(duration: Duration) -> String {
    let secs = duration.as_secs_f64();
    format!("{} min {:.4} sec", (secs / 60.0) as u64, secs % 60.0)
}
