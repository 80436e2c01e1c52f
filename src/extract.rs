//! Reading a box selection out of a checked snapshot file.
//!
//! Three strategies are provided. They return identical arrays and differ only
//! in how much of the file they touch at once:
//!
//! * [`Method::Seek`] seeks to and reads every selected element on its own,
//! * [`Method::Rows`] reads one contiguous line along the fastest varying axis
//!   per selected pair of slower indices and subsamples it in memory,
//! * [`Method::Whole`] reads the entire file and slices the resulting array.
//!
//! `Rows` is the default: `Whole` holds the raw bytes and the decoded values
//! of the full snapshot at the same time, about three times the file size.

use {
    crate::{
        error::{Error, Result},
        layout::AxisOrder,
        selection::{AxisSelection, BoxSelection},
        snapshot::Snapshot,
        utils::{elapsed, view3d},
    },
    log::{debug, info},
    ndarray::{s, Array3},
    serde::{Deserialize, Serialize},
    std::{
        fmt,
        fs::File,
        io::{Read, Seek, SeekFrom},
        str::FromStr,
        time::Instant,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    Seek,
    Rows,
    Whole,
}

impl Method {
    pub const VARIANTS: &'static [&'static str] = &["seek", "rows", "whole"];
}

impl Default for Method {
    fn default() -> Self {
        Method::Rows
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Method::Seek => "seek",
            Method::Rows => "rows",
            Method::Whole => "whole",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Method {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "seek" => Ok(Method::Seek),
            "rows" => Ok(Method::Rows),
            "whole" => Ok(Method::Whole),
            _ => Err(Error::InvalidOption {
                name: "read method",
                value: s.to_owned(),
                expected: "seek, rows, whole",
            }),
        }
    }
}

/// Reads `selection` from `snapshot`, indexed `[x, y, z]`
///
/// `selection` must already have been checked against the snapshot extents.
pub fn read_box(snapshot: &Snapshot, selection: &BoxSelection, method: Method) -> Result<Array3<f64>> {
    let start = Instant::now();

    let cube = match method {
        Method::Seek => read_points(snapshot, selection)?,
        Method::Rows => read_rows(snapshot, selection)?,
        Method::Whole => read_whole(snapshot, selection)?,
    };

    info!(
        "Time elapsed for loading datacube ({}): {}",
        method,
        elapsed(start.elapsed())
    );
    info!("Shape of the sub-cube: {:?}", cube.dim());

    Ok(cube)
}

fn read_points(snapshot: &Snapshot, selection: &BoxSelection) -> Result<Array3<f64>> {
    let layout = snapshot.layout();
    let extents = snapshot.extents();

    let mut file = File::open(snapshot.path())?;
    let mut buf = vec![0u8; layout.element_size()];
    let mut cube = Array3::zeros(selection.shape());

    for (kk, k) in selection.z.indices().enumerate() {
        for (jj, j) in selection.y.indices().enumerate() {
            for (ii, i) in selection.x.indices().enumerate() {
                file.seek(SeekFrom::Start(layout.byte_offset(extents, i, j, k)))?;
                file.read_exact(&mut buf)?;
                cube[[ii, jj, kk]] = layout.read(&buf);
            }
        }
    }

    Ok(cube)
}

fn read_rows(snapshot: &Snapshot, selection: &BoxSelection) -> Result<Array3<f64>> {
    let layout = snapshot.layout();
    let extents = snapshot.extents();

    let mut file = File::open(snapshot.path())?;
    let mut cube = Array3::zeros(selection.shape());

    match layout.order {
        AxisOrder::XFastest => {
            let mut buf = vec![0u8; selection.x.span() * layout.element_size()];
            debug!("Reading {} byte rows along {}", buf.len(), layout.fastest_axis());

            for (kk, k) in selection.z.indices().enumerate() {
                for (jj, j) in selection.y.indices().enumerate() {
                    let start = layout.byte_offset(extents, selection.x.offset, j, k);
                    read_line(&mut file, start, &mut buf)?;
                    for (ii, x) in subsample(snapshot, &buf, &selection.x).enumerate() {
                        cube[[ii, jj, kk]] = x;
                    }
                }
            }
        }
        AxisOrder::ZFastest => {
            let mut buf = vec![0u8; selection.z.span() * layout.element_size()];
            debug!("Reading {} byte rows along {}", buf.len(), layout.fastest_axis());

            for (ii, i) in selection.x.indices().enumerate() {
                for (jj, j) in selection.y.indices().enumerate() {
                    let start = layout.byte_offset(extents, i, j, selection.z.offset);
                    read_line(&mut file, start, &mut buf)?;
                    for (kk, x) in subsample(snapshot, &buf, &selection.z).enumerate() {
                        cube[[ii, jj, kk]] = x;
                    }
                }
            }
        }
    }

    Ok(cube)
}

fn read_line(file: &mut File, start: u64, buf: &mut [u8]) -> Result<()> {
    file.seek(SeekFrom::Start(start))?;
    file.read_exact(buf)?;
    Ok(())
}

fn subsample<'a>(
    snapshot: &'a Snapshot,
    buf: &'a [u8],
    selection: &AxisSelection,
) -> impl Iterator<Item = f64> + 'a {
    let layout = snapshot.layout();
    buf.chunks_exact(layout.element_size())
        .step_by(selection.skip)
        .map(move |chunk| layout.read(chunk))
}

fn read_whole(snapshot: &Snapshot, selection: &BoxSelection) -> Result<Array3<f64>> {
    let layout = snapshot.layout();

    let mut bytes = Vec::with_capacity(snapshot.size() as usize);
    File::open(snapshot.path())?.read_to_end(&mut bytes)?;
    let values = layout.decode(&bytes);
    drop(bytes);

    let full = view3d(&values, snapshot.extents(), layout)?;

    let BoxSelection { x, y, z } = selection;
    let sub = full.slice(s![
        x.offset..x.last() + 1;x.skip as isize,
        y.offset..y.last() + 1;y.skip as isize,
        z.offset..z.last() + 1;z.skip as isize
    ]);

    Ok(sub.to_owned())
}
