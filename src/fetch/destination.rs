use std::path::PathBuf;

use once_cell::sync::Lazy;
use regex::Regex;

/// The destination announcement the downloader prints for every file it
/// starts writing. Path resolution hinges on this exact line shape, so the
/// pattern lives here and nowhere else.
static DESTINATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[download\] Destination: (.+)").unwrap());

/// Returns the path from the first destination line in the captured output.
pub fn extract_destination(output: &str) -> Option<PathBuf> {
    DESTINATION_RE
        .captures(output)
        .map(|caps| PathBuf::from(caps[1].trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_the_path() {
        let output = "[youtube] abc: Downloading webpage\n\
                      [download] Destination: /a/b/c.mp4\n\
                      [download] 100% of 10.00MiB\n";
        assert_eq!(
            extract_destination(output),
            Some(PathBuf::from("/a/b/c.mp4"))
        );
    }

    #[test]
    fn first_destination_line_wins() {
        let output = "[download] Destination: /out/first.webm\n\
                      [ExtractAudio] Destination: /out/first.mp3\n\
                      [download] Destination: /out/second.webm\n";
        assert_eq!(
            extract_destination(output),
            Some(PathBuf::from("/out/first.webm"))
        );
    }

    #[test]
    fn paths_with_spaces_survive() {
        let output = "[download] Destination: /out/Video/Some_Title (live).mp4\n";
        assert_eq!(
            extract_destination(output),
            Some(PathBuf::from("/out/Video/Some_Title (live).mp4"))
        );
    }

    #[test]
    fn no_line_means_none() {
        assert_eq!(extract_destination("[youtube] nothing to see\n"), None);
        assert_eq!(extract_destination(""), None);
    }
}
