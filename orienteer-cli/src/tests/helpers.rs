//! Temporary workspaces and instance fixtures for CLI tests.

use camino::{Utf8Path, Utf8PathBuf};
use orienteer_core::mip::{MipBackend, MipError};
use orienteer_core::{InstanceRecord, SolutionRecord};
use orienteer_mip_exhaustive::ExhaustiveModel;
use tempfile::TempDir;

/// Temporary directory holding instance files for one test.
#[derive(Debug)]
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub(super) fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }

    pub(super) fn write_record(&self, name: &str, record: &InstanceRecord) -> Utf8PathBuf {
        let path = self.path(name);
        let payload = serde_json::to_string_pretty(record).expect("serialise record");
        write_utf8(&path, payload.as_bytes());
        path
    }
}

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path.as_std_path(), contents).expect("write fixture file");
}

pub(super) fn read_record(path: &Utf8Path) -> InstanceRecord {
    let payload = std::fs::read_to_string(path.as_std_path()).expect("read record");
    serde_json::from_str(&payload).expect("record should be JSON")
}

/// Unit square with rewards `[0, 5, 5, 5]`; the full tour costs 40.
pub(super) fn square_record(tmax: i64) -> InstanceRecord {
    InstanceRecord {
        name: "square".into(),
        comment: "four corners of a 10 by 10 square".into(),
        kind: "OP".into(),
        dimension: 4,
        edge_weight_type: "EUC_2D".into(),
        depots: vec![0],
        node_coordinates: vec![[0.0, 0.0], [0.0, 10.0], [10.0, 10.0], [10.0, 0.0]],
        prices: vec![0, 5, 5, 5],
        tmax,
        ..InstanceRecord::default()
    }
}

/// [`square_record`] with a stored solution visiting every corner.
pub(super) fn solved_square_record(tmax: i64, obj: i64) -> InstanceRecord {
    InstanceRecord {
        solution: Some(SolutionRecord {
            obj,
            lbound: obj,
            ubound: obj,
            optimal: true,
            route_cost: 40,
            route: vec![0, 1, 2, 3],
            time: "0.010s".into(),
            ..SolutionRecord::default()
        }),
        ..square_record(tmax)
    }
}

/// Backend that cannot build models.
pub(super) struct Unavailable;

impl MipBackend for Unavailable {
    type Model = ExhaustiveModel;

    fn create_model(&self, name: &str) -> Result<Self::Model, MipError> {
        Err(MipError::Backend(format!("no model {name}")))
    }
}
