use {
    crate::{
        error::Error,
        extract::Method,
        extractor::{extract, run, Outputs, Request},
        layout::Layout,
        locate::FlatLocator,
        parameters::{Gravity, Overrides, Parameters},
        render::{PngSlice, Render},
        selection::{Axis, AxisSelection, BoxSelection, Extents},
        subdomain::SubDomain,
        utils::view3d,
    },
    approx::assert_abs_diff_eq,
    lazy_static::lazy_static,
    std::{
        fs::{self, File},
        io::{Read, Write},
        path::{Path, PathBuf},
    },
    tempdir::TempDir,
};

const SNAP: &str = "1.500000";

/// Synthetic snapshot directory holding `u` and `r` on a 12 x 8 x 6 grid
struct Database {
    dir: TempDir,
    extents: Extents,
}

lazy_static! {
    static ref DATABASE: Database = {
        let dir = TempDir::new("sst-box").unwrap();
        let extents = Extents::new(12, 8, 6);
        let layout = Layout::default();

        for var in &["u", "r"] {
            let values = (0..extents.checked_len().unwrap())
                .map(|n| (n as f64).sin())
                .collect::<Vec<f64>>();
            File::create(dir.path().join(format!("{}_{}", var, SNAP)))
                .unwrap()
                .write_all(&layout.encode(&values))
                .unwrap();
        }

        Database { dir, extents }
    };
}

fn locator() -> FlatLocator {
    FlatLocator::new(DATABASE.dir.path(), "_")
}

fn request(var: &str, selection: BoxSelection) -> Request {
    Request {
        var: var.to_owned(),
        snapshot: SNAP.to_owned(),
        extents: DATABASE.extents,
        selection,
        method: Method::Whole,
        parameters: Parameters::default(),
    }
}

fn read_file(path: &Path) -> Vec<f64> {
    let mut bytes = vec![];
    File::open(path).unwrap().read_to_end(&mut bytes).unwrap();
    Layout::default().decode(&bytes)
}

/// Extracts and, if that succeeds, renders to `figdir`
fn extract_and_render(request: &Request, figdir: &Path) -> crate::Result<(SubDomain, PathBuf)> {
    let outputs = Outputs {
        figure_dir: Some(figdir.to_owned()),
        data_dir: None,
    };
    let subdomain = run(&locator(), request, &outputs)?;
    Ok((subdomain, request.figure_path(figdir)))
}

#[test]
fn shape_equals_selection() {
    let selection = BoxSelection::new(
        AxisSelection::range(3, 9),
        AxisSelection::full(8),
        AxisSelection::new(1, 2, 3),
    );

    let sub = extract(&locator(), &request("u", selection)).unwrap();
    assert_eq!(sub.shape(), (6, 8, 2));
    assert_eq!(sub.grid.x.len(), 6);
    assert_eq!(sub.grid.y.len(), 8);
    assert_eq!(sub.grid.z.len(), 2);
}

#[test]
fn full_box_equals_file() {
    let extents = DATABASE.extents;
    let values = read_file(&DATABASE.dir.path().join(format!("u_{}", SNAP)));
    let expected = view3d(&values, &extents, &Layout::default()).unwrap();

    for method in &[Method::Seek, Method::Rows, Method::Whole] {
        let mut request = request("u", BoxSelection::full(extents));
        request.method = *method;

        let sub = extract(&locator(), &request).unwrap();
        assert_eq!(sub.data, expected);
    }
}

#[test]
fn values_are_index_aligned() {
    let extents = DATABASE.extents;
    let values = read_file(&DATABASE.dir.path().join(format!("u_{}", SNAP)));
    let full = view3d(&values, &extents, &Layout::default()).unwrap();

    let selection = BoxSelection::new(
        AxisSelection::new(2, 4, 3),
        AxisSelection::new(1, 3, 2),
        AxisSelection::new(5, 1, 1),
    );
    let mut request = request("u", selection);
    request.method = Method::Rows;

    let sub = extract(&locator(), &request).unwrap();
    for ((i, j, k), x) in sub.data.indexed_iter() {
        assert_eq!(
            *x,
            full[[
                selection.x.index(i),
                selection.y.index(j),
                selection.z.index(k)
            ]]
        );
    }
}

#[test]
fn out_of_bounds_writes_nothing() {
    let figdir = TempDir::new("sst-box").unwrap();
    let selection = BoxSelection::new(
        AxisSelection::full(12),
        AxisSelection::new(4, 3, 2),
        AxisSelection::full(6),
    );

    match extract_and_render(&request("u", selection), figdir.path()) {
        Err(Error::OutOfBounds {
            axis,
            bound,
            extent,
        }) => {
            assert_eq!(axis.to_string(), "y");
            assert_eq!(bound, 8);
            assert_eq!(extent, 8);
        }
        other => panic!("unexpected result {:?}", other),
    }

    assert_eq!(fs::read_dir(figdir.path()).unwrap().count(), 0);
}

#[test]
fn missing_snapshot() {
    let mut request = request("w", BoxSelection::full(DATABASE.extents));
    request.snapshot = "2.000000".to_owned();

    match extract(&locator(), &request) {
        Err(Error::FileNotFound { path }) => {
            assert_eq!(path, DATABASE.dir.path().join("w_2.000000"))
        }
        other => panic!("unexpected result {:?}", other),
    }
}

#[test]
fn wrong_extents() {
    let mut request = request("u", BoxSelection::full(Extents::new(12, 8, 5)));
    request.extents = Extents::new(12, 8, 5);

    match extract(&locator(), &request) {
        Err(Error::ShapeMismatch {
            expected, actual, ..
        }) => {
            assert_eq!(expected, 12 * 8 * 5 * 4);
            assert_eq!(actual, 12 * 8 * 6 * 4);
        }
        other => panic!("unexpected result {:?}", other),
    }
}

#[test]
fn density_includes_ambient() {
    let selection = BoxSelection::new(
        AxisSelection::new(0, 2, 1),
        AxisSelection::new(2, 4, 1),
        AxisSelection::new(3, 2, 1),
    );

    let u = extract(&locator(), &request("u", selection)).unwrap();
    let r = extract(&locator(), &request("r", selection)).unwrap();
    let drhobar = Parameters::default().physical.drhobar;

    // u and r hold the same values, r gains drhobar * y
    for ((i, j, k), x) in r.data.indexed_iter() {
        assert_abs_diff_eq!(
            *x,
            u.data[[i, j, k]] + drhobar * r.grid.y[j],
            epsilon = 1.0E-9
        );
    }
}

#[test]
fn figure_path_is_deterministic() {
    let figdir = TempDir::new("sst-box").unwrap();
    let selection = BoxSelection::new(
        AxisSelection::range(3, 9),
        AxisSelection::full(8),
        AxisSelection::full(6),
    );

    let (_, path) = extract_and_render(&request("u", selection), figdir.path()).unwrap();

    assert_eq!(
        path,
        figdir
            .path()
            .join("u_PVsample-nx6ny8nz6_nskip1_t1.500000_whole_box_plot.png")
    );
    assert!(path.is_file());
    assert_eq!(fs::read_dir(figdir.path()).unwrap().count(), 1);
}

#[test]
fn vertical_z_renders_horizontal_plane() {
    let figdir = TempDir::new("sst-box").unwrap();
    let selection = BoxSelection::new(
        AxisSelection::range(2, 10),
        AxisSelection::new(1, 3, 2),
        AxisSelection::full(6),
    );
    let mut density = request("r", selection);
    density.parameters = Parameters::default().with_overrides(&Overrides {
        gravity: Some(Gravity::Z),
        ..Overrides::default()
    });

    let (sub, path) = extract_and_render(&density, figdir.path()).unwrap();

    // ambient density now grows along z
    let u = extract(&locator(), &request("u", selection)).unwrap();
    let drhobar = density.parameters.physical.drhobar;
    for ((i, j, k), x) in sub.data.indexed_iter() {
        assert_abs_diff_eq!(
            *x,
            u.data[[i, j, k]] + drhobar * sub.grid.z[k],
            epsilon = 1.0E-9
        );
    }

    // top face is the x-y plane at the last z, 4 pixels per point
    let mut reader = png::Decoder::new(File::open(&path).unwrap())
        .read_info()
        .unwrap();
    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf).unwrap();
    assert_eq!((info.width, info.height), (8 * 4, 3 * 4));

    let renderer = PngSlice::top(Gravity::Z);
    let (expected, _, _) = renderer.pixels(sub.plane(Axis::Z, None).unwrap());
    assert_eq!(&buf[..info.buffer_size()], &expected[..]);
}

#[test]
fn outputs_written_only_when_requested() {
    let outdir = TempDir::new("sst-box").unwrap();
    let request = request("u", BoxSelection::full(DATABASE.extents));

    run(&locator(), &request, &Outputs::default()).unwrap();
    assert_eq!(fs::read_dir(outdir.path()).unwrap().count(), 0);

    let outputs = Outputs {
        figure_dir: None,
        data_dir: Some(outdir.path().join("saveData")),
    };
    let sub = run(&locator(), &request, &outputs).unwrap();
    let path = request.data_path(&outdir.path().join("saveData"));
    assert_eq!(SubDomain::load(&path).unwrap(), sub);
    assert_eq!(fs::read_dir(outdir.path()).unwrap().count(), 1);
}

#[test]
fn saved_box_matches() {
    let outdir = TempDir::new("sst-box").unwrap();
    let request = request("u", BoxSelection::full(DATABASE.extents));

    let sub = extract(&locator(), &request).unwrap();
    let path = request.data_path(outdir.path());
    sub.save(&path).unwrap();

    assert_eq!(
        path.file_name().unwrap(),
        "u_PVsample-nx12ny8nz6_nskip1_t1.500000_whole.bin"
    );
    assert_eq!(SubDomain::load(&path).unwrap(), sub);
}

/// Full size SST snapshot, extracts x in [100, 200) over all of y and z
#[test]
#[ignore]
fn sst_scale_scenario() {
    let tempdir = TempDir::new("sst-box").unwrap();
    let extents = Extents::new(514, 256, 512);

    let file = File::create(tempdir.path().join("u_10.000000")).unwrap();
    file.set_len(Layout::default().file_size(&extents).unwrap())
        .unwrap();

    let request = Request {
        var: "u".to_owned(),
        snapshot: "10.000000".to_owned(),
        extents,
        selection: BoxSelection::new(
            AxisSelection::range(100, 200),
            AxisSelection::full(256),
            AxisSelection::full(512),
        ),
        method: Method::Rows,
        parameters: Parameters::default(),
    };

    let figdir = tempdir.path().join("Figs");
    let sub = extract(&FlatLocator::new(tempdir.path(), "_"), &request).unwrap();
    assert_eq!(sub.shape(), (100, 256, 512));

    PngSlice::default()
        .render(&sub, &request.figure_path(&figdir))
        .unwrap();
    assert_eq!(fs::read_dir(&figdir).unwrap().count(), 1);
}
