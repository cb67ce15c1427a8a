/// Locate the JSON object embedded in a model response.
///
/// Takes everything from the first `{` to the last `}`; surrounding prose is
/// dropped. Returns `None` when there is no such span with content between
/// the braces. The span is not validated here.
pub fn find_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;

    if end <= start + 1 {
        return None;
    }

    Some(&text[start..=end])
}
