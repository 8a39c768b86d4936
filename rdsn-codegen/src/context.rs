//! Output sinks for generated files.

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashSet};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Opens the sink for each generated file.
pub trait GeneratorContext {
    /// Opens a writable sink for `file_name`.
    ///
    /// A context hands out each name at most once.
    ///
    /// # Errors
    /// Returns an I/O error if the sink cannot be created, or
    /// `io::ErrorKind::AlreadyExists` if `file_name` was already opened.
    fn open(&mut self, file_name: &str) -> io::Result<Box<dyn Write + '_>>;
}

fn already_opened(file_name: &str) -> io::Error {
    io::Error::new(
        io::ErrorKind::AlreadyExists,
        format!("{file_name} was already generated in this run"),
    )
}

/// Writes generated files below an output directory.
#[derive(Debug, Clone)]
pub struct DirectoryContext {
    root: PathBuf,
    opened: HashSet<PathBuf>,
}

impl DirectoryContext {
    /// Creates a context rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            opened: HashSet::new(),
        }
    }

    /// Returns the output directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl GeneratorContext for DirectoryContext {
    fn open(&mut self, file_name: &str) -> io::Result<Box<dyn Write + '_>> {
        let path = self.root.join(file_name);
        if self.opened.contains(&path) {
            return Err(already_opened(file_name));
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        tracing::debug!("Creating {}", path.display());
        let file = File::create(&path)?;
        self.opened.insert(path);
        Ok(Box::new(BufWriter::new(file)))
    }
}

/// Collects generated files in memory, ordered by name.
#[derive(Debug, Default, Clone)]
pub struct MemoryContext {
    files: BTreeMap<String, Vec<u8>>,
}

impl MemoryContext {
    /// Creates an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the bytes written under `file_name`.
    #[must_use]
    pub fn get(&self, file_name: &str) -> Option<&[u8]> {
        self.files.get(file_name).map(Vec::as_slice)
    }

    /// Returns the contents of `file_name` as text.
    #[must_use]
    pub fn get_str(&self, file_name: &str) -> Option<&str> {
        self.get(file_name).and_then(|b| std::str::from_utf8(b).ok())
    }

    /// Returns the number of files.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns true if no file was opened.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Iterates over the files in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.files.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Consumes the context, returning the files in name order.
    #[must_use]
    pub fn into_files(self) -> Vec<(String, Vec<u8>)> {
        self.files.into_iter().collect()
    }
}

impl GeneratorContext for MemoryContext {
    fn open(&mut self, file_name: &str) -> io::Result<Box<dyn Write + '_>> {
        match self.files.entry(file_name.to_string()) {
            Entry::Occupied(_) => Err(already_opened(file_name)),
            Entry::Vacant(slot) => Ok(Box::new(slot.insert(Vec::new()))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_context_collects_files() {
        let mut ctx = MemoryContext::new();
        {
            let mut sink = ctx.open("b.pb.php").unwrap();
            sink.write_all(b"second").unwrap();
        }
        {
            let mut sink = ctx.open("a.pb.php").unwrap();
            sink.write_all(b"first").unwrap();
        }

        assert_eq!(ctx.len(), 2);
        assert_eq!(ctx.get_str("a.pb.php"), Some("first"));
        let names: Vec<_> = ctx.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["a.pb.php", "b.pb.php"]);
    }

    #[test]
    fn test_memory_context_rejects_second_open() {
        let mut ctx = MemoryContext::new();
        ctx.open("x").unwrap().write_all(b"first script").unwrap();

        let err = ctx.open("x").err().expect("second open must fail");
        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
        assert_eq!(ctx.get("x"), Some(&b"first script"[..]));
    }

    #[test]
    fn test_directory_context_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = DirectoryContext::new(dir.path());
        {
            let mut sink = ctx.open("nested/deeper/out.pb.php").unwrap();
            sink.write_all(b"<?php\n").unwrap();
            sink.flush().unwrap();
        }

        let written = fs::read_to_string(dir.path().join("nested/deeper/out.pb.php")).unwrap();
        assert_eq!(written, "<?php\n");
        assert_eq!(ctx.root(), dir.path());
    }

    #[test]
    fn test_directory_context_rejects_second_open() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = DirectoryContext::new(dir.path());
        ctx.open("a/out.pb.php").unwrap().write_all(b"kept").unwrap();

        let err = ctx.open("a/out.pb.php").err().expect("second open must fail");
        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
        assert!(ctx.open("b/out.pb.php").is_ok());
        assert_eq!(fs::read_to_string(dir.path().join("a/out.pb.php")).unwrap(), "kept");
    }

    #[test]
    fn test_directory_context_open_failure() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"file, not a directory").unwrap();

        let mut ctx = DirectoryContext::new(&blocker);
        assert!(ctx.open("out.pb.php").is_err());
    }
}
