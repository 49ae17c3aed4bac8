use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// Matches a table-of-contents line such as:
///
/// ```text
/// 01:34:21 chapter title
/// 4:21 chapter title
/// (4:21) chapter title
/// [4:21] chapter title
/// ```
///
/// Opening brackets are skipped because the search is unanchored; closing
/// `)`, `]` or `,` are consumed before the single required separator.
static CHAPTER_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"((?:[0-9]+:)+[0-9]{2})[),\]]*\s(.+)").expect("chapter pattern is valid")
});

/// A raw chapter as written in the description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterEntry {
    pub timestamp: String,
    pub title: String,
}

/// Parse one line; `None` when the line carries no chapter.
pub fn parse_line(line: &str) -> Option<ChapterEntry> {
    let caps = CHAPTER_LINE.captures(line)?;
    Some(ChapterEntry {
        timestamp: caps[1].to_string(),
        title: caps[2].to_string(),
    })
}

/// Scan lines in order and keep the first chapter found on each.
///
/// Lines without a chapter are skipped; this never fails.
pub fn extract<'a, I>(lines: I) -> Vec<ChapterEntry>
where
    I: IntoIterator<Item = &'a str>,
{
    let chapters: Vec<ChapterEntry> = lines
        .into_iter()
        .filter_map(parse_line)
        .inspect(|c| debug!(timestamp = %c.timestamp, title = %c.title, "chapter found"))
        .collect();

    debug!(count = chapters.len(), "chapters extracted");
    chapters
}

/// Convenience over [`extract`] for a whole description buffer.
pub fn extract_text(text: &str) -> Vec<ChapterEntry> {
    extract(text.lines())
}
