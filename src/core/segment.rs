use crate::domain::model::CatalogEntry;

/// Decodes the raw export, dropping bytes that are not valid UTF-8.
pub fn decode_input(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).replace(char::REPLACEMENT_CHARACTER, "")
}

/// Splits the export into raw lines: whitespace trimmed, then surrounding quotes.
/// `\n`, `\r\n` and a bare `\r` all end a line. Blank lines are dropped
/// before any header handling.
pub fn normalize_lines(content: &str) -> Vec<String> {
    content
        .split(['\n', '\r'])
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| line.trim_matches('"').to_string())
        .collect()
}

/// Two-mode buffer/emit loop. Continuation lines are buffered until a marker
/// line closes the record they describe.
#[derive(Debug)]
pub struct Segmenter<'a> {
    marker: &'a str,
    buffer: Vec<String>,
    skipped_markers: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SegmentStats {
    pub skipped_markers: usize,
    pub trailing_lines: usize,
}

impl<'a> Segmenter<'a> {
    pub fn new(marker: &'a str) -> Self {
        Self {
            marker,
            buffer: Vec::new(),
            skipped_markers: 0,
        }
    }

    pub fn push(&mut self, line: &str) -> Option<CatalogEntry> {
        if !line.starts_with(self.marker) {
            self.buffer.push(line.to_string());
            return None;
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() < 2 {
            tracing::debug!("Skipping marker line without part number: {:?}", line);
            self.skipped_markers += 1;
            return None;
        }

        let mut pieces = std::mem::take(&mut self.buffer);
        pieces.push(tokens[2..].join(" "));

        Some(CatalogEntry {
            part_number: tokens[1].to_string(),
            text: pieces.join(" "),
        })
    }

    pub fn finish(self) -> SegmentStats {
        if !self.buffer.is_empty() {
            tracing::debug!(
                "{} trailing line(s) after the last marker line were not emitted",
                self.buffer.len()
            );
        }
        SegmentStats {
            skipped_markers: self.skipped_markers,
            trailing_lines: self.buffer.len(),
        }
    }
}

pub fn segment_lines<I, S>(lines: I, marker: &str) -> (Vec<CatalogEntry>, SegmentStats)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut segmenter = Segmenter::new(marker);
    let entries = lines
        .into_iter()
        .filter_map(|line| segmenter.push(line.as_ref()))
        .collect();
    (entries, segmenter.finish())
}
