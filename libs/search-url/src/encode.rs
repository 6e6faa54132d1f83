//! `application/x-www-form-urlencoded` style encoding.

/// Percent-encode one key or value, turning spaces into `+`.
pub fn encode_form_component(value: &str) -> String {
    value
        .split(' ')
        .map(urlencoding::encode)
        .collect::<Vec<_>>()
        .join("+")
}

/// Encode `(key, value)` pairs and join them with `&`, preserving order.
pub fn encode_form_pairs<'a, I>(pairs: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    pairs
        .into_iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                encode_form_component(key),
                encode_form_component(value)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}
