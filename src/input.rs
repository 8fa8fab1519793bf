use std::path::PathBuf;

use thiserror::Error;
use tokio::fs;

/// Errors from classifying the user-supplied input source.
/// All of these are fatal, the run has no urls to work on.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("the list file does not contain any urls")]
    EmptyList,
    #[error("could not read list file {path}: {source}")]
    ListRead {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("unrecognized input (expected a url or a path to a .txt file)")]
    UnrecognizedInput,
}

/// Determines whether the input is a single url or a path to a .txt list file
/// and resolves it into the ordered sequence of urls to process.
///
/// Classification only, nothing is downloaded here.
pub async fn resolve_input(raw: &str) -> Result<Vec<String>, InputError> {
    if raw.starts_with("http") {
        return Ok(vec![raw.to_string()]);
    }

    if raw.to_lowercase().ends_with(".txt") {
        let contents = fs::read_to_string(raw)
            .await
            .map_err(|source| InputError::ListRead {
                path: PathBuf::from(raw),
                source,
            })?;

        let urls: Vec<String> = contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();

        if urls.is_empty() {
            return Err(InputError::EmptyList);
        }
        return Ok(urls);
    }

    Err(InputError::UnrecognizedInput)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn single_url_passes_through() {
        let urls = resolve_input("https://example.com/watch?v=1").await.unwrap();
        assert_eq!(urls, vec!["https://example.com/watch?v=1".to_string()]);
    }

    #[tokio::test]
    async fn list_file_keeps_order_and_drops_blanks() {
        let dir = tempfile::tempdir().unwrap();
        let list_path = dir.path().join("urls.txt");
        std::fs::write(&list_path, "https://a\n\n  https://b  \nhttps://c\n").unwrap();

        let urls = resolve_input(list_path.to_str().unwrap()).await.unwrap();
        assert_eq!(urls, vec!["https://a", "https://b", "https://c"]);
    }

    #[tokio::test]
    async fn blank_only_list_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let list_path = dir.path().join("urls.txt");
        std::fs::write(&list_path, "\n   \n\t\n").unwrap();

        let err = resolve_input(list_path.to_str().unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, InputError::EmptyList));
    }

    #[tokio::test]
    async fn missing_list_file_reports_the_path() {
        let err = resolve_input("/does/not/exist.txt").await.unwrap_err();
        match err {
            InputError::ListRead { path, .. } => {
                assert_eq!(path, PathBuf::from("/does/not/exist.txt"));
            }
            other => panic!("expected ListRead, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn anything_else_is_unrecognized() {
        let err = resolve_input("notes.pdf").await.unwrap_err();
        assert!(matches!(err, InputError::UnrecognizedInput));
    }
}
