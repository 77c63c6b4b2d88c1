use crate::keywords::KeywordRecord;

const PREVIEW_LIMIT: usize = 5;

pub fn scene_description(records: &[KeywordRecord]) -> String {
    let preview = records
        .iter()
        .take(PREVIEW_LIMIT)
        .map(|record| record.text.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let overflow = if records.len() > PREVIEW_LIMIT {
        format!(" and {} more", records.len() - PREVIEW_LIMIT)
    } else {
        String::new()
    };

    format!(
        "Word bubble visualization showing {} SEO keywords. {preview}{overflow}",
        records.len()
    )
}

pub fn node_label(record: &KeywordRecord) -> String {
    format!(
        "{}: {} intent, {} difficulty",
        record.text,
        record.search_intent.label(),
        record.difficulty.label()
    )
}
