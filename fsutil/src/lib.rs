use std::{
    fs::{self, ReadDir},
    path::{Path, PathBuf},
};

pub mod error {
    use std::{io, path::PathBuf};

    pub type Result<T> = std::result::Result<T, self::Error>;

    type Msg = &'static str;

    #[derive(Debug, thiserror::Error)]
    pub enum Error {
        #[error("{0} ({1}): {2}")]
        SingleIO(Msg, PathBuf, #[source] io::Error),

        #[error("No file matches any of {0:?} in '{1}'")]
        NoEntryMatchedGlob(Vec<String>, PathBuf),
    }
}
pub use error::*;

#[must_use]
pub fn mkdir_all(path: impl AsRef<Path>) -> Result<()> {
    let dir = path.as_ref();
    fs::create_dir_all(dir).map_err(|e| Error::SingleIO("Cannot create dir", dir.to_owned(), e))
}

#[must_use]
pub fn write<P, C>(filepath: P, contents: C) -> Result<()>
where
    P: AsRef<Path>,
    C: AsRef<[u8]>,
{
    fs::write(&filepath, contents)
        .map_err(|e| Error::SingleIO("Cannot write file", filepath.as_ref().to_owned(), e))
}

#[must_use]
pub fn write_with_mkdir<P, C>(filepath: P, contents: C) -> Result<()>
where
    P: AsRef<Path>,
    C: AsRef<[u8]>,
{
    if let Some(dir) = filepath.as_ref().parent() {
        self::mkdir_all(dir)?;
    }
    self::write(filepath, contents)
}

#[must_use]
pub fn read_to_string(filepath: impl AsRef<Path>) -> Result<String> {
    fs::read_to_string(&filepath)
        .map_err(|e| Error::SingleIO("Cannot read file", filepath.as_ref().to_owned(), e))
}

#[must_use]
pub fn read(filepath: impl AsRef<Path>) -> Result<Vec<u8>> {
    fs::read(&filepath)
        .map_err(|e| Error::SingleIO("Cannot read file", filepath.as_ref().to_owned(), e))
}

#[must_use]
pub fn read_dir(dir: impl AsRef<Path>) -> Result<ReadDir> {
    fs::read_dir(&dir).map_err(|e| Error::SingleIO("Cannot read dir", dir.as_ref().to_owned(), e))
}

/// Lists regular files directly under `dir` whose name matches any of `patterns`,
/// sorted by file name.
pub fn find_files_matching_any(
    dir: impl AsRef<Path>,
    patterns: &[::glob::Pattern],
) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let mut found = Vec::new();

    for entry in self::read_dir(dir)?.filter_map(std::result::Result::ok) {
        let Ok(file_type) = entry.file_type() else {
            continue
        };
        if !file_type.is_file() {
            continue;
        }
        let filename = entry.file_name();
        let filename = filename.to_string_lossy();
        if patterns.iter().any(|pat| pat.matches(&filename)) {
            log::trace!("Matched {:?}", filename);
            found.push(entry.path());
        }
    }

    if found.is_empty() {
        return Err(Error::NoEntryMatchedGlob(
            patterns.iter().map(|p| p.as_str().to_owned()).collect(),
            dir.to_owned(),
        ));
    }
    found.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(found)
}

pub struct SingleFileDriver {
    pub filepath: PathBuf,
}

impl SingleFileDriver {
    pub fn new(filepath: impl AsRef<Path>) -> Self {
        Self {
            filepath: filepath.as_ref().to_owned(),
        }
    }

    #[must_use]
    pub fn write(&self, contents: &str) -> Result<()> {
        self::write_with_mkdir(&self.filepath, contents)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use glob::Pattern;

    fn patterns(xs: &[&str]) -> Vec<Pattern> {
        xs.iter().map(|s| Pattern::new(s).unwrap()).collect()
    }

    #[test]
    fn find_files_matching_any_sorts_by_name() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["main.cpp", "a.h", "notes.txt", "util.hpp"] {
            write(dir.path().join(name), "").unwrap();
        }
        mkdir_all(dir.path().join("sub.cpp")).unwrap();

        let files = find_files_matching_any(dir.path(), &patterns(&["*.cpp", "*.h", "*.hpp"]))
            .unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.h", "main.cpp", "util.hpp"]);
    }

    #[test]
    fn find_files_matching_any_fails_when_nothing_matches() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path().join("README.md"), "").unwrap();

        let err = find_files_matching_any(dir.path(), &patterns(&["*.cpp"])).unwrap_err();
        assert!(matches!(err, Error::NoEntryMatchedGlob(..)));
    }

    #[test]
    fn single_file_driver_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/dir/file.txt");
        let f = SingleFileDriver::new(&path);
        assert!(matches!(read_to_string(&path), Err(Error::SingleIO(..))));

        f.write("hello").unwrap();
        assert_eq!(read_to_string(&path).unwrap(), "hello");
    }
}
