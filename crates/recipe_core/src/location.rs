//! Reflects the selected recipe into a shareable URL (`?id=<recipe id>`).
use url::Url;

pub const SELECTION_PARAM: &str = "id";

/// Reads the selected recipe id from the URL; a blank value counts as no selection.
pub fn selection_from_url(url: &Url) -> Option<String> {
    url.query_pairs()
        .find(|(key, _)| key == SELECTION_PARAM)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Returns a copy of `url` with the selection parameter set, or removed when `selected` is
/// `None`. Other query parameters keep their order.
pub fn url_with_selection(url: &Url, selected: Option<&str>) -> Url {
    let retained: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != SELECTION_PARAM)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    let mut next = url.clone();
    next.set_query(None);
    let has_pairs = !retained.is_empty() || selected.is_some();
    if has_pairs {
        let mut pairs = next.query_pairs_mut();
        for (key, value) in &retained {
            pairs.append_pair(key, value);
        }
        if let Some(id) = selected {
            pairs.append_pair(SELECTION_PARAM, id);
        }
    }
    next
}
