use std::path::PathBuf;

use fsutil::SingleFileDriver;

/// Optional file receiving the last page fetched from STOS, for troubleshooting.
#[derive(Default)]
pub struct DebugDump {
    file: Option<SingleFileDriver>,
}

impl DebugDump {
    /// An empty path disables the dump.
    pub fn new(path: Option<PathBuf>) -> Self {
        Self {
            file: path
                .filter(|p| !p.as_os_str().is_empty())
                .map(SingleFileDriver::new),
        }
    }

    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn dump(&self, html: &str) {
        let Some(file) = &self.file else {
            return
        };
        match file.write(html) {
            Ok(()) => log::debug!("Dumped page to {:?}", file.filepath),
            Err(e) => log::warn!("Failed to write debug dump: {}", e),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn writes_only_when_enabled() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("last.html");

        DebugDump::disabled().dump("<html></html>");
        assert!(!path.exists());

        DebugDump::new(Some(path.clone())).dump("<html></html>");
        assert_eq!(fsutil::read_to_string(&path).unwrap(), "<html></html>");
    }

    #[test]
    fn empty_path_disables_dump() {
        assert!(DebugDump::new(Some(PathBuf::new())).file.is_none());
        assert!(DebugDump::new(Some(PathBuf::from("last.html"))).file.is_some());
    }
}
