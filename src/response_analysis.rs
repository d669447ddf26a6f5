// Response analysis for sqlprobe
// Best-effort HTML and text heuristics over response bodies. Nothing here errors.

use lazy_static::lazy_static;
use regex::Regex;
use scraper::{Html, Selector};

lazy_static! {
    static ref FORM_SELECTOR: Selector = Selector::parse("form").expect("static selector");
    static ref INPUT_SELECTOR: Selector = Selector::parse("input").expect("static selector");
    static ref CREDENTIAL_PAIR: Regex = Regex::new(r"(\w+),(\w+)").expect("static regex");
}

/// Hidden fields and action of the first form on a page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormTokens {
    pub hidden: Vec<(String, String)>,
    pub action: String,
}

impl FormTokens {
    pub fn is_empty(&self) -> bool {
        self.hidden.is_empty()
    }
}

/// Pull hidden `<input>` name/value pairs (CSRF tokens and the like) and the
/// `action` attribute out of the first `<form>` in `html`.
///
/// Inputs without a `name` are skipped; a missing `value` becomes "".
pub fn extract_form_tokens(html: &str) -> FormTokens {
    let document = Html::parse_document(html);

    let Some(form) = document.select(&FORM_SELECTOR).next() else {
        return FormTokens::default();
    };

    let hidden = form
        .select(&INPUT_SELECTOR)
        .filter(|input| {
            input
                .value()
                .attr("type")
                .map_or(false, |t| t.eq_ignore_ascii_case("hidden"))
        })
        .filter_map(|input| {
            let name = input.value().attr("name")?;
            let value = input.value().attr("value").unwrap_or("");
            Some((name.to_string(), value.to_string()))
        })
        .collect();

    FormTokens {
        hidden,
        action: form.value().attr("action").unwrap_or("").to_string(),
    }
}

/// Split the first `word,word` pair out of a response body.
///
/// Only works when the target reflects selected columns as bare
/// comma-joined text, which is what deliberately vulnerable practice
/// apps tend to do.
pub fn extract_credentials(body: &str) -> Option<(String, String)> {
    let caps = CREDENTIAL_PAIR.captures(body)?;
    Some((caps[1].to_string(), caps[2].to_string()))
}
