use scraper::{Html, Selector};

pub(crate) fn parse_html_fragment(text: &str) -> Html {
    Html::parse_fragment(text)
}

#[track_caller]
pub(crate) fn assert_valid_html(html: &Html) {
    assert!(
        html.errors.is_empty(),
        "Got HTML parsing errors: {:?}",
        html.errors
    );
}

#[track_caller]
fn must_parse_selector(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|error| panic!("invalid selector {css:?}: {error}"))
}

/// The whitespace-trimmed text of every element matching `css`.
#[track_caller]
pub(crate) fn select_texts(text: &str, css: &str) -> Vec<String> {
    let html = parse_html_fragment(text);
    assert_valid_html(&html);

    html.select(&must_parse_selector(css))
        .map(|element| element.text().collect::<String>().trim().to_owned())
        .collect()
}

#[track_caller]
pub(crate) fn count_matches(text: &str, css: &str) -> usize {
    parse_html_fragment(text)
        .select(&must_parse_selector(css))
        .count()
}

/// The `(value, label)` of every `<option>`.
#[track_caller]
pub(crate) fn option_pairs(text: &str) -> Vec<(String, String)> {
    parse_html_fragment(text)
        .select(&must_parse_selector("option"))
        .map(|option| {
            let value = option
                .value()
                .attr("value")
                .expect("option without a value")
                .to_owned();
            (value, option.text().collect())
        })
        .collect()
}
