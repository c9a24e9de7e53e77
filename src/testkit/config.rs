//! Temporary directory layouts and configs for tests.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// `in/`, `out/` and any number of nested destinations under one temp root.
pub struct TempLayout {
    root: TempDir,
    pub inbound: PathBuf,
    pub out: PathBuf,
}

impl TempLayout {
    /// Create the root with `in/` and `out/`.
    ///
    /// # Panics
    ///
    /// Panics if the directories cannot be created.
    #[must_use]
    pub fn new() -> Self {
        let root = TempDir::new().expect("create temp root");
        let inbound = root.path().join("in");
        let out = root.path().join("out");
        std::fs::create_dir(&inbound).expect("create in/");
        std::fs::create_dir(&out).expect("create out/");
        Self { root, inbound, out }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        self.root.path()
    }

    /// Create (if needed) and return a destination directory.
    ///
    /// # Panics
    ///
    /// Panics if the directory cannot be created.
    pub fn nested(&self, name: &str) -> PathBuf {
        let path = self.root.path().join(name);
        std::fs::create_dir_all(&path).expect("create nested dir");
        path
    }

    /// Drop a file into the inbound directory.
    ///
    /// # Panics
    ///
    /// Panics if the file cannot be written.
    pub fn drop_file(&self, name: &str) -> PathBuf {
        let path = self.inbound.join(name);
        std::fs::write(&path, name.as_bytes()).expect("write inbound file");
        path
    }

    /// Minimal TOML for this layout, followed by `extra`.
    #[must_use]
    pub fn config_toml(&self, extra: &str) -> String {
        format!(
            "in = {:?}\nout = {:?}\nsettle_delay_ms = 0\npoll_interval_ms = 20\n{extra}",
            self.inbound.display().to_string(),
            self.out.display().to_string(),
        )
    }

    /// Write a config file into the root and return its path.
    ///
    /// # Panics
    ///
    /// Panics if the file cannot be written.
    pub fn write_config(&self, extra: &str) -> PathBuf {
        let path = self.root.path().join("config.toml");
        std::fs::write(&path, self.config_toml(extra)).expect("write config");
        path
    }
}

impl Default for TempLayout {
    fn default() -> Self {
        Self::new()
    }
}
