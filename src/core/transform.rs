use crate::core::describe::{clean_description, remove_bin_code, short_description};
use crate::core::rules::CatalogRules;
use crate::core::segment::segment_lines;
use crate::domain::model::{CatalogEntry, PartRecord, TransformResult};

pub fn build_record(entry: CatalogEntry, rules: &CatalogRules) -> PartRecord {
    let (text, bin_code) = remove_bin_code(&entry.text, &rules.bin_code);

    // Classification sees the OEM phrase; the fallback brand is read from what follows it.
    let classification = rules.classifier.classify(&text);
    let description = clean_description(&text, &rules.strip_phrase);
    let short = short_description(&description, rules.short_description_min_length);

    PartRecord {
        brand: classification.brand,
        category: classification.category,
        short_description: short,
        description,
        part_number: entry.part_number,
        bin_code: bin_code.filter(|_| rules.retain_bin_code),
    }
}

/// Skips the header, segments the remaining lines and classifies each entry in input order.
pub fn transform_lines<S: AsRef<str>>(lines: &[S], rules: &CatalogRules) -> TransformResult {
    let body = lines.iter().skip(rules.header_lines);
    let (entries, stats) = segment_lines(body, &rules.marker);

    let records = entries
        .into_iter()
        .map(|entry| build_record(entry, rules))
        .collect();

    TransformResult {
        records,
        skipped_markers: stats.skipped_markers,
        trailing_lines: stats.trailing_lines,
    }
}
