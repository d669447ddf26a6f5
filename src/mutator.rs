// Request mutation for sqlprobe
// Appends a payload to the one field of a target that gets fuzzed

use serde_json::Value;
use std::fmt;
use url::Url;

use crate::models::Target;

/// Which field of a request carries the payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InjectionPoint {
    JsonField(String),
    FormField(String),
    QueryParam(String),
}

impl fmt::Display for InjectionPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InjectionPoint::JsonField(name) => write!(f, "json:{}", name),
            InjectionPoint::FormField(name) => write!(f, "form:{}", name),
            InjectionPoint::QueryParam(name) => write!(f, "query:{}", name),
        }
    }
}

/// Pick the field to fuzz.
///
/// JSON targets use their first key, form POSTs their first field, anything
/// else the first query parameter. `None` means there is nothing to mutate.
pub fn injection_point(target: &Target) -> Option<InjectionPoint> {
    if let Some(json) = &target.json {
        return json
            .as_object()
            .and_then(|obj| obj.keys().next())
            .map(|key| InjectionPoint::JsonField(key.clone()));
    }

    if let Some((name, _)) = target.body.as_ref().and_then(|body| body.first()) {
        return Some(InjectionPoint::FormField(name.clone()));
    }

    first_query_param(&target.url).map(|(name, _)| InjectionPoint::QueryParam(name))
}

/// Build the mutated request for one payload.
///
/// The payload is appended to the field's original value, never to a
/// previously mutated one. Hidden form fields scraped from the baseline page
/// are merged into form bodies; they overwrite same-named fields except the
/// one carrying the payload.
pub fn mutate_target(target: &Target, payload: &str, hidden: &[(String, String)]) -> Option<Target> {
    let point = injection_point(target)?;
    let mut mutated = target.clone();

    match &point {
        InjectionPoint::JsonField(key) => {
            let obj = mutated.json.as_mut()?.as_object_mut()?;
            let original = obj.get(key).map(json_value_as_text).unwrap_or_default();
            obj.insert(key.clone(), Value::String(format!("{}{}", original, payload)));
        }
        InjectionPoint::FormField(name) => {
            let body = mutated.body.as_mut()?;
            if let Some((_, value)) = body.first_mut() {
                value.push_str(payload);
            }
            merge_hidden_fields(body, name, hidden);
        }
        InjectionPoint::QueryParam(_) => {
            mutated.url = append_to_first_query_param(&target.url, payload)?;
        }
    }

    Some(mutated)
}

/// Append `suffix` to the value of the URL's first query parameter.
///
/// Returns `None` for unparsable URLs or URLs without a query.
pub fn append_to_first_query_param(raw_url: &str, suffix: &str) -> Option<String> {
    let mut url = Url::parse(raw_url).ok()?;
    let mut pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    let (_, first_value) = pairs.first_mut()?;
    first_value.push_str(suffix);

    url.query_pairs_mut().clear().extend_pairs(pairs);
    Some(url.to_string())
}

/// Name and decoded value of the first query parameter
pub fn first_query_param(raw_url: &str) -> Option<(String, String)> {
    let url = Url::parse(raw_url).ok()?;
    let first = url
        .query_pairs()
        .next()
        .map(|(k, v)| (k.into_owned(), v.into_owned()));
    first
}

fn merge_hidden_fields(body: &mut Vec<(String, String)>, injected: &str, hidden: &[(String, String)]) {
    for (name, value) in hidden {
        if name == injected {
            continue;
        }
        match body.iter_mut().find(|(existing, _)| existing == name) {
            Some((_, existing_value)) => *existing_value = value.clone(),
            None => body.push((name.clone(), value.clone())),
        }
    }
}

fn json_value_as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
