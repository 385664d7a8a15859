//! Example program library backing `GET /example`.

use crate::error::LibraryError;
use rand::seq::SliceRandom;
use std::path::PathBuf;

/// Directory of bpasm example programs
#[derive(Debug, Clone)]
pub struct ExampleLibrary {
    dir: PathBuf,
}

impl ExampleLibrary {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Regular files in the directory, sorted by path
    pub async fn list(&self) -> Result<Vec<PathBuf>, LibraryError> {
        let read_dir_err = |source: std::io::Error| LibraryError::ReadDir {
            path: self.dir.clone(),
            source,
        };

        let mut entries = tokio::fs::read_dir(&self.dir).await.map_err(read_dir_err)?;
        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(read_dir_err)? {
            let file_type = entry.file_type().await.map_err(read_dir_err)?;
            if file_type.is_file() {
                files.push(entry.path());
            }
        }
        files.sort();
        Ok(files)
    }

    /// Content of one example chosen uniformly at random.
    pub async fn random(&self) -> Result<String, LibraryError> {
        let files = self.list().await?;
        let chosen = files
            .choose(&mut rand::thread_rng())
            .cloned()
            .ok_or_else(|| LibraryError::Empty(self.dir.clone()))?;

        let bytes = tokio::fs::read(&chosen)
            .await
            .map_err(|source| LibraryError::ReadFile {
                path: chosen.clone(),
                source,
            })?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_list_skips_directories() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.bpasm"), "HALT").unwrap();
        std::fs::write(dir.path().join("a.bpasm"), "NOP").unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();

        let files = ExampleLibrary::new(dir.path()).list().await.unwrap();
        assert_eq!(
            files,
            vec![dir.path().join("a.bpasm"), dir.path().join("b.bpasm")]
        );
    }

    #[tokio::test]
    async fn test_random_returns_one_of_the_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("add.bpasm"), "ADD R1, R2").unwrap();
        std::fs::write(dir.path().join("loop.bpasm"), "JMP 0").unwrap();

        let library = ExampleLibrary::new(dir.path());
        for _ in 0..10 {
            let content = library.random().await.unwrap();
            assert!(content == "ADD R1, R2" || content == "JMP 0");
        }
    }

    #[tokio::test]
    async fn test_empty_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ExampleLibrary::new(dir.path()).random().await.unwrap_err();
        assert!(matches!(err, LibraryError::Empty(_)));
    }

    #[tokio::test]
    async fn test_missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let library = ExampleLibrary::new(dir.path().join("missing"));
        let err = library.random().await.unwrap_err();
        assert!(matches!(err, LibraryError::ReadDir { .. }));
    }
}
