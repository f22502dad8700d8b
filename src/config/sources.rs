//! Feed list parsing.
//!
//! The feed list is a plain text file with one feed URL per line. Blank
//! lines and lines starting with `#` are ignored.

use std::path::Path;

use super::ConfigError;

pub fn read_sources(path: &Path) -> Result<Vec<String>, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_list(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("feeds.txt");
        fs::write(&path, content).unwrap();
        (tmp, path)
    }

    #[test]
    fn test_reads_one_url_per_line() {
        let (_tmp, path) = write_list("https://a.example/feed.xml\nhttps://b.example/rss\n");
        let urls = read_sources(&path).unwrap();
        assert_eq!(
            urls,
            vec!["https://a.example/feed.xml", "https://b.example/rss"]
        );
    }

    #[test]
    fn test_skips_blanks_and_comments() {
        let (_tmp, path) =
            write_list("# my feeds\n\nhttps://a.example/feed.xml\n   \n# disabled\n");
        let urls = read_sources(&path).unwrap();
        assert_eq!(urls, vec!["https://a.example/feed.xml"]);
    }

    #[test]
    fn test_trims_whitespace() {
        let (_tmp, path) = write_list("  https://a.example/feed.xml  \n");
        let urls = read_sources(&path).unwrap();
        assert_eq!(urls, vec!["https://a.example/feed.xml"]);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        assert!(read_sources(&tmp.path().join("feeds.txt")).is_err());
    }
}
