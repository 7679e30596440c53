use std::path::{Path, PathBuf};

use anyhow::{bail, Context as _};
use fsutil::SingleFileDriver;
use serde::{Deserialize, Deserializer, Serialize};
use stos_webclient::{Credential, ProblemId, SourceFile};

/// Contents of `.stos/config`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoConfigFile {
    #[serde(rename = "STOS")]
    pub stos: RepoConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoConfig {
    #[serde(deserialize_with = "problem_id_from_str_or_int")]
    pub problem_id: ProblemId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    // NOTE: stored in cleartext
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Globs selecting the files to upload, matched against file names in the repository root.
    #[serde(default = "RepoConfig::default_include")]
    pub include: Vec<String>,
}

impl RepoConfig {
    pub fn new(problem_id: ProblemId) -> Self {
        Self {
            problem_id,
            username: None,
            password: None,
            include: Self::default_include(),
        }
    }

    fn default_include() -> Vec<String> {
        ["*.cpp", "*.h", "*.hpp"].map(String::from).to_vec()
    }
}

/// Accepts `problem_id = 365` as well as `problem_id = "365"`.
fn problem_id_from_str_or_int<'de, D>(deserializer: D) -> Result<ProblemId, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Int(u64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Str(s) => ProblemId::from(s),
        Raw::Int(n) => ProblemId::from(n.to_string()),
    })
}

/// A directory initialized with `stos init`.
#[derive(Debug, Clone)]
pub struct Repository {
    root: PathBuf,
    config: RepoConfig,
}

impl Repository {
    pub const DIR_NAME: &str = ".stos";
    pub const CONFIG_FILENAME: &str = "config";

    pub fn config_filepath(root: impl AsRef<Path>) -> PathBuf {
        root.as_ref().join(Self::DIR_NAME).join(Self::CONFIG_FILENAME)
    }

    /// Writes a fresh config into `dir`, replacing any existing one.
    pub fn init(dir: impl AsRef<Path>, problem_id: ProblemId) -> anyhow::Result<Self> {
        let repo = Self {
            root: dir.as_ref().to_owned(),
            config: RepoConfig::new(problem_id),
        };
        repo.save()?;
        Ok(repo)
    }

    pub fn open(root: impl AsRef<Path>) -> anyhow::Result<Self> {
        let root = root.as_ref();
        let filepath = Self::config_filepath(root);
        let toml = fsutil::read_to_string(&filepath)?;
        let file: RepoConfigFile = toml::from_str(&toml)
            .with_context(|| {
            format!(
                "Invalid config file: {:?} (run `stos init <problem_id>` to rewrite it)",
                filepath
            )
        })?;
        Ok(Self {
            root: root.to_owned(),
            config: file.stos,
        })
    }

    /// Opens the repository containing `cur_dir` (or one of its ancestors).
    pub fn find_in_ancestors(cur_dir: impl AsRef<Path>) -> anyhow::Result<Self> {
        let Some(root) = cur_dir
            .as_ref()
            .ancestors()
            .find(|dir| Self::config_filepath(dir).is_file()) else {
            bail!("Not a STOS repository (or any of the parent directories)")
        };
        Self::open(root)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &RepoConfig {
        &self.config
    }

    pub fn problem_id(&self) -> &ProblemId {
        &self.config.problem_id
    }

    pub fn credential(&self) -> Option<Credential> {
        let RepoConfig {
            username: Some(username),
            password: Some(password),
            ..
        } = &self.config else {
            return None
        };
        Some(Credential {
            username: username.to_owned(),
            password: password.to_owned(),
        })
    }

    pub fn save_credential(&mut self, cred: &Credential) -> anyhow::Result<()> {
        self.config.username = Some(cred.username.to_owned());
        self.config.password = Some(cred.password.to_owned());
        self.save()
    }

    pub fn source_files(&self) -> anyhow::Result<Vec<SourceFile>> {
        let patterns = self
            .config
            .include
            .iter()
            .map(|s| glob::Pattern::new(s).with_context(|| format!("Invalid glob {:?}", s)))
            .collect::<anyhow::Result<Vec<_>>>()?;

        let paths = fsutil::find_files_matching_any(&self.root, &patterns)
            .context("No source files to upload")?;
        paths
            .into_iter()
            .map(|path| -> anyhow::Result<SourceFile> {
                let content = fsutil::read(&path)?;
                let filename = path
                    .file_name()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_default();
                Ok(SourceFile { filename, content })
            })
            .collect()
    }

    fn save(&self) -> anyhow::Result<()> {
        let file = RepoConfigFile {
            stos: self.config.clone(),
        };
        let toml = toml::to_string(&file).context("Failed to serialize repository config")?;
        SingleFileDriver::new(Self::config_filepath(&self.root)).write(&toml)?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn init_then_open_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        Repository::init(dir.path(), ProblemId::from("365")).unwrap();

        let repo = Repository::open(dir.path()).unwrap();
        assert_eq!(repo.problem_id().as_str(), "365");
        assert_eq!(repo.credential(), None);
        assert_eq!(repo.config().include, vec!["*.cpp", "*.h", "*.hpp"]);
    }

    #[test]
    fn config_file_has_stos_section() {
        let dir = tempfile::tempdir().unwrap();
        Repository::init(dir.path(), ProblemId::from("365")).unwrap();

        let toml = fsutil::read_to_string(dir.path().join(".stos/config")).unwrap();
        assert!(toml.starts_with("[STOS]\n"));
        assert!(toml.contains("problem_id = \"365\""));
        assert!(!toml.contains("password"));
    }

    #[test]
    fn saved_credential_is_reloaded() {
        let dir = tempfile::tempdir().unwrap();
        let mut repo = Repository::init(dir.path(), ProblemId::from("365")).unwrap();
        let cred = Credential {
            username: "alice".to_owned(),
            password: "secret".to_owned(),
        };
        repo.save_credential(&cred).unwrap();

        let repo = Repository::open(dir.path()).unwrap();
        assert_eq!(repo.credential(), Some(cred));
        assert_eq!(repo.problem_id().as_str(), "365");
    }

    #[test]
    fn find_in_ancestors_from_subdir() {
        let dir = tempfile::tempdir().unwrap();
        Repository::init(dir.path(), ProblemId::from("12")).unwrap();
        let sub = dir.path().join("a/b");
        fsutil::mkdir_all(&sub).unwrap();

        let repo = Repository::find_in_ancestors(&sub).unwrap();
        assert_eq!(repo.root(), dir.path());
        assert_eq!(repo.problem_id().as_str(), "12");
    }

    #[test]
    fn bare_integer_problem_id_is_accepted() {
        let dir = tempfile::tempdir().unwrap();
        fsutil::write_with_mkdir(
            Repository::config_filepath(dir.path()),
            "[STOS]\nproblem_id = 365\n",
        )
        .unwrap();

        let repo = Repository::open(dir.path()).unwrap();
        assert_eq!(repo.problem_id().as_str(), "365");
        assert_eq!(repo.config().include, vec!["*.cpp", "*.h", "*.hpp"]);
    }

    #[test]
    fn ini_style_values_ask_for_reinit() {
        let dir = tempfile::tempdir().unwrap();
        fsutil::write_with_mkdir(
            Repository::config_filepath(dir.path()),
            "[STOS]\nproblem_id = 365\nusername = alice\n",
        )
        .unwrap();

        let err = Repository::open(dir.path()).unwrap_err();
        assert!(err.to_string().contains("stos init"), "got {}", err);
    }

    #[test]
    fn not_a_repository() {
        let dir = tempfile::tempdir().unwrap();
        let err = Repository::find_in_ancestors(dir.path()).unwrap_err();
        assert!(err.to_string().starts_with("Not a STOS repository"));
    }

    #[test]
    fn source_files_follow_include_globs() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::init(dir.path(), ProblemId::from("365")).unwrap();
        fsutil::write(dir.path().join("main.cpp"), "int main() {}\n").unwrap();
        fsutil::write(dir.path().join("list.h"), "#pragma once\n").unwrap();
        fsutil::write(dir.path().join("input.txt"), "1 2\n").unwrap();

        let files = repo.source_files().unwrap();
        let names: Vec<_> = files.iter().map(|f| f.filename.as_str()).collect();
        assert_eq!(names, vec!["list.h", "main.cpp"]);
        assert_eq!(files[1].content, b"int main() {}\n");
    }
}
