//! Candidate file collection

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::core::config::{CandidateSource, ExtensionSet};
use crate::error::{Result, ScanError};

/// Collect candidate files from whichever source was configured
pub fn collect_candidates(
    source: &CandidateSource,
    extensions: &ExtensionSet,
) -> Result<Vec<PathBuf>> {
    match source {
        CandidateSource::FileList(list) => {
            info!("loading list of files to check from \"{}\"", list.display());
            collect_from_file_list(list, extensions)
        }
        CandidateSource::Directory(root) => {
            info!("rootDir is \"{}\"", root.display());
            Ok(collect_from_directory(root, extensions))
        }
    }
}

/// Read a newline-delimited list of paths, keeping those with an accepted
/// extension in the order they appear
///
/// # Arguments
/// * `list_path` - Text file with one path per line
/// * `extensions` - Accepted extensions
pub fn collect_from_file_list(list_path: &Path, extensions: &ExtensionSet) -> Result<Vec<PathBuf>> {
    let to_err = |source| ScanError::FileList {
        path: list_path.to_path_buf(),
        source,
    };
    let reader = BufReader::new(File::open(list_path).map_err(to_err)?);

    let mut files = Vec::new();
    for line in reader.split(b'\n') {
        let mut line = line.map_err(to_err)?;
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        let Some(path) = line_to_path(line) else {
            continue;
        };
        if extensions.matches(&path) {
            files.push(path);
        } else {
            debug!("skipping {}", path.display());
        }
    }

    Ok(files)
}

/// Raw bytes of a list entry as a path; any byte sequence is a valid path
/// on Unix
#[cfg(unix)]
fn line_to_path(line: Vec<u8>) -> Option<PathBuf> {
    use std::ffi::OsString;
    use std::os::unix::ffi::OsStringExt;

    Some(PathBuf::from(OsString::from_vec(line)))
}

#[cfg(not(unix))]
fn line_to_path(line: Vec<u8>) -> Option<PathBuf> {
    match String::from_utf8(line) {
        Ok(line) => Some(PathBuf::from(line)),
        Err(e) => {
            warn!("skipping file list entry that is not valid UTF-8: {}", e);
            None
        }
    }
}

/// Walk `root` recursively and collect every file with an accepted
/// extension
///
/// Entries are visited in file-name order so repeated runs see the same
/// sequence. Unreadable entries are logged and skipped. A `root` that is
/// itself a file yields nothing.
pub fn collect_from_directory(root: &Path, extensions: &ExtensionSet) -> Vec<PathBuf> {
    let mut files = Vec::new();
    let walker = WalkDir::new(root)
        .min_depth(1)
        .follow_links(false)
        .sort_by_file_name();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("skipping unreadable entry under {}: {}", root.display(), e);
                continue;
            }
        };

        let is_file = entry.file_type().is_file()
            || (entry.path_is_symlink() && entry.path().is_file());
        if is_file && extensions.matches(entry.path()) {
            files.push(entry.into_path());
        }
    }

    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        File::create(path).unwrap();
    }

    #[test]
    fn test_file_list_filters_by_extension() {
        let temp_dir = TempDir::new().unwrap();
        let list = temp_dir.path().join("files.txt");
        fs::write(&list, "a.png\nb.txt\nc.jpg\n\nd.PNG\r\ne.jpg\r\n").unwrap();

        let files = collect_from_file_list(&list, &ExtensionSet::parse("png,jpg")).unwrap();
        assert_eq!(
            files,
            vec![PathBuf::from("a.png"), PathBuf::from("c.jpg"), PathBuf::from("e.jpg")]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_file_list_keeps_non_utf8_paths() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let temp_dir = TempDir::new().unwrap();
        let ok = temp_dir.path().join("ok.png");
        let list = temp_dir.path().join("files.txt");

        let mut contents = ok.as_os_str().as_bytes().to_vec();
        contents.extend_from_slice(b"\nphoto_\xff.png\nnotes_\xfe.txt\n");
        fs::write(&list, contents).unwrap();

        let files = collect_from_file_list(&list, &ExtensionSet::parse("png")).unwrap();
        assert_eq!(
            files,
            vec![ok, PathBuf::from(OsStr::from_bytes(b"photo_\xff.png"))]
        );
    }

    #[test]
    fn test_missing_file_list_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let err = collect_from_file_list(&temp_dir.path().join("nope.txt"), &ExtensionSet::parse("png"))
            .unwrap_err();
        assert!(matches!(err, ScanError::FileList { .. }));
    }

    #[test]
    fn test_directory_walk_is_recursive() {
        let temp_dir = TempDir::new().unwrap();
        let subdir = temp_dir.path().join("subdir");
        fs::create_dir(&subdir).unwrap();

        touch(&temp_dir.path().join("b.tiff"));
        touch(&temp_dir.path().join("notes.txt"));
        touch(&subdir.join("a.jpeg"));
        fs::create_dir(temp_dir.path().join("dir.png")).unwrap();

        let files = collect_from_directory(temp_dir.path(), &ExtensionSet::parse("tiff,jpeg,png"));
        assert_eq!(
            files,
            vec![temp_dir.path().join("b.tiff"), subdir.join("a.jpeg")]
        );
    }

    #[test]
    fn test_directory_walk_is_deterministic() {
        let temp_dir = TempDir::new().unwrap();
        for name in ["z.png", "m.png", "a.png"] {
            touch(&temp_dir.path().join(name));
        }
        let exts = ExtensionSet::parse("png");

        let first = collect_from_directory(temp_dir.path(), &exts);
        let second = collect_from_directory(temp_dir.path(), &exts);
        assert_eq!(first, second);
        assert_eq!(first[0], temp_dir.path().join("a.png"));
    }

    #[test]
    fn test_file_root_yields_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let image = temp_dir.path().join("single.png");
        touch(&image);

        let files = collect_from_directory(&image, &ExtensionSet::parse("png"));
        assert!(files.is_empty());
    }

    #[test]
    fn test_missing_root_yields_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let files = collect_from_directory(&temp_dir.path().join("gone"), &ExtensionSet::parse("png"));
        assert!(files.is_empty());
    }
}
