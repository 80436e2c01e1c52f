use {
    crate::{
        error::Result,
        extract::{read_box, Method},
        grid::{add_ambient_density, is_density, Grid},
        locate::Locate,
        parameters::Parameters,
        render::{PngSlice, Render},
        selection::{BoxSelection, Extents},
        snapshot::Snapshot,
        subdomain::SubDomain,
    },
    log::info,
    std::path::{Path, PathBuf},
};

pub const DEFAULT_FIGURE_DIR: &str = "Figs";
pub const DEFAULT_DATA_DIR: &str = "saveData";

/// Everything needed to pull one box out of one snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub var: String,
    /// Time step label, e.g. `10.000000`
    pub snapshot: String,
    pub extents: Extents,
    pub selection: BoxSelection,
    pub method: Method,
    pub parameters: Parameters,
}

impl Request {
    /// Base name shared by the figure and the saved box
    pub fn name(&self) -> String {
        let (nxsl, nysl, nzsl) = self.selection.shape();
        format!(
            "{}_PVsample-nx{}ny{}nz{}_nskip{}_t{}_{}",
            self.var, nxsl, nysl, nzsl, self.selection.x.skip, self.snapshot, self.method
        )
    }

    pub fn figure_path(&self, dir: &Path) -> PathBuf {
        dir.join(format!("{}_box_plot.png", self.name()))
    }

    pub fn data_path(&self, dir: &Path) -> PathBuf {
        dir.join(format!("{}.bin", self.name()))
    }
}

/// Extracts the requested box
///
/// The selection is validated before the snapshot is located, and the snapshot
/// file is checked before anything is read from it.
pub fn extract<L: Locate + ?Sized>(locator: &L, request: &Request) -> Result<SubDomain> {
    request.selection.check(&request.extents)?;

    info!("Loading snapshot: {} {}", request.var, request.snapshot);
    let snapshot = Snapshot::locate(
        locator,
        &request.var,
        &request.snapshot,
        request.extents,
        request.parameters.layout,
    )?;

    let mut data = read_box(&snapshot, &request.selection, request.method)?;

    let physical = &request.parameters.physical;
    let grid = Grid::new(physical, &request.extents, &request.selection);

    if is_density(&request.var) {
        info!(
            "Adding ambient density along {} to perturbation density",
            physical.gravity.axis()
        );
        add_ambient_density(&mut data, &grid, physical);
    }

    info!("data shape: {:?}", data.dim());

    Ok(SubDomain { data, grid })
}

/// Where the extracted box is written, nothing is written for `None`
#[derive(Debug, Clone, Default)]
pub struct Outputs {
    pub figure_dir: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
}

/// Extracts `request`, then draws the top face of the box and saves it as requested
///
/// Nothing is written if extraction fails.
pub fn run<L: Locate + ?Sized>(locator: &L, request: &Request, outputs: &Outputs) -> Result<SubDomain> {
    let subdomain = extract(locator, request)?;

    if let Some(dir) = &outputs.figure_dir {
        let path = request.figure_path(dir);
        PngSlice::top(request.parameters.physical.gravity).render(&subdomain, &path)?;
    }

    if let Some(dir) = &outputs.data_dir {
        subdomain.save(request.data_path(dir))?;
    }

    Ok(subdomain)
}
