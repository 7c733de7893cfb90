//! Instance file access built on `cap-std` and `camino`.

use std::io::{self, BufReader};

use camino::Utf8Path;
use cap_std::{ambient_authority, fs_utf8};
use orienteer_core::InstanceRecord;

use crate::CliError;

/// Open a UTF-8 file path using ambient authority.
pub(crate) fn open_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    fs_utf8::File::open_ambient(path, ambient_authority())
}

/// Resolve an ambient directory for `path` and return it with the file name.
fn open_dir_and_file(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, String)> {
    let parent = path
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::other("target should include a file name"))?
        .to_owned();
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, file_name))
}

/// Return whether a path exists and is a regular file.
pub(crate) fn file_is_file(path: &Utf8Path) -> io::Result<bool> {
    let (dir, name) = open_dir_and_file(path)?;
    dir.metadata(name.as_str()).map(|meta| meta.is_file())
}

/// Fail unless `path` names an existing regular file.
pub(crate) fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match file_is_file(path) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::SourcePathNotFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) if source.kind() == io::ErrorKind::NotFound => {
            Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Load a JSON-encoded [`InstanceRecord`] from disk.
pub(crate) fn load_instance(path: &Utf8Path) -> Result<InstanceRecord, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenInstance {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| CliError::ParseInstance {
        path: path.to_path_buf(),
        source,
    })
}

/// Write `record` as pretty JSON, replacing any existing file.
pub(crate) fn write_instance(path: &Utf8Path, record: &InstanceRecord) -> Result<(), CliError> {
    let mut payload = serde_json::to_string_pretty(record).map_err(CliError::SerialiseRecord)?;
    payload.push('\n');
    let write_error = |source| CliError::WriteOutput {
        path: path.to_path_buf(),
        source,
    };
    let (dir, name) = open_dir_and_file(path).map_err(write_error)?;
    dir.write(name.as_str(), payload.as_bytes())
        .map_err(write_error)
}
