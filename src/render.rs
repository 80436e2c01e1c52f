use {
    crate::{error::Result, parameters::Gravity, selection::Axis, subdomain::SubDomain},
    log::info,
    ndarray::ArrayView2,
    std::{
        fs::{create_dir_all, File},
        io::BufWriter,
        path::Path,
    },
};

/// Draws an extracted box and writes the result to `path`
pub trait Render {
    fn render(&self, subdomain: &SubDomain, path: &Path) -> Result<()>;
}

/// Diverging colour stops, blue for low through white to red for high values
const BLUE_WHITE_RED_STOPS: [(f64, f64, f64); 5] = [
    (5.0, 48.0, 97.0),
    (67.0, 147.0, 195.0),
    (247.0, 247.0, 247.0),
    (214.0, 96.0, 77.0),
    (103.0, 0.0, 31.0),
];

/// Maps `t` in `[0, 1]` onto the diverging colour map, clamping outside values
pub fn blue_white_red(t: f64) -> [u8; 3] {
    let t = t.clamp(0.0, 1.0);
    let seg = t * 4.0;
    let i = (seg as usize).min(3);
    let s = seg - i as f64;

    let (r0, g0, b0) = BLUE_WHITE_RED_STOPS[i];
    let (r1, g1, b1) = BLUE_WHITE_RED_STOPS[i + 1];

    [
        (r0 + s * (r1 - r0)).round() as u8,
        (g0 + s * (g1 - g0)).round() as u8,
        (b0 + s * (b1 - b0)).round() as u8,
    ]
}

/// Colour limits `[0.5 * min, 0.5 * max]` of a field
pub fn color_limits(values: ArrayView2<f64>) -> (f64, f64) {
    let (min, max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| {
            (lo.min(x), hi.max(x))
        });
    (0.5 * min, 0.5 * max)
}

/// Renders one plane of the box as a colour-mapped PNG
///
/// The first remaining axis runs left to right and the second bottom to top,
/// so the default plane normal to y shows x horizontally and z vertically.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PngSlice {
    /// Axis the rendered plane is normal to
    pub normal: Axis,
    /// Index along `normal`, the last one if `None`
    pub index: Option<usize>,
    /// Pixels per grid point
    pub scale: usize,
}

impl Default for PngSlice {
    fn default() -> Self {
        PngSlice {
            normal: Axis::Y,
            index: None,
            scale: 4,
        }
    }
}

impl PngSlice {
    /// Top face of the box, the last plane normal to gravity
    pub fn top(gravity: Gravity) -> Self {
        PngSlice {
            normal: gravity.axis(),
            ..PngSlice::default()
        }
    }

    /// RGB pixel buffer and its `(width, height)`
    pub fn pixels(&self, plane: ArrayView2<f64>) -> (Vec<u8>, usize, usize) {
        let (na, nb) = plane.dim();
        let scale = self.scale.max(1);
        let (width, height) = (na * scale, nb * scale);

        let (vmin, vmax) = color_limits(plane);
        let range = vmax - vmin;

        let mut buf = Vec::with_capacity(width * height * 3);
        for row in 0..height {
            let b = nb - 1 - row / scale;
            for col in 0..width {
                let x = plane[[col / scale, b]];
                let t = if range > 0.0 { (x - vmin) / range } else { 0.5 };
                buf.extend_from_slice(&blue_white_red(t));
            }
        }

        (buf, width, height)
    }
}

impl Render for PngSlice {
    fn render(&self, subdomain: &SubDomain, path: &Path) -> Result<()> {
        let plane = subdomain.plane(self.normal, self.index)?;
        let (buf, width, height) = self.pixels(plane);

        if let Some(parent) = path.parent() {
            create_dir_all(parent)?;
        }

        let w = BufWriter::new(File::create(path)?);
        let mut encoder = png::Encoder::new(w, width as u32, height as u32);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder.write_header()?;
        writer.write_image_data(&buf)?;

        info!(
            "Saved {}x{} figure of the plane normal to {} to {:?}",
            width, height, self.normal, path
        );

        Ok(())
    }
}
