use crate::TreeFloat;

/// Identifying fields carried by a single raw Newick label.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct NodeLabel {
    pub(crate) name: Option<String>,
    pub(crate) accession: Option<String>,
    pub(crate) taxon_id: Option<String>,
}

/// Splits a raw label into name, accession and taxon id.
///
/// Two trailing annotations are recognized, tried in this order:
/// - `Name[accession]` or `Name[accession|taxon_id]` (leaf form)
/// - `Name{taxon_id}` (internal form)
///
/// Anything else is kept verbatim as the name. Empty fields are `None`.
pub(crate) fn split_label_and_annotation(raw_label: &str) -> NodeLabel {
    if let Some((name, payload)) = trailing_annotation(raw_label, '[', ']') {
        let (accession, taxon_id) = match payload.split_once('|') {
            Some((accession, taxon_id)) => (accession, Some(taxon_id)),
            None => (payload, None),
        };
        NodeLabel {
            name: non_empty(name),
            accession: non_empty(accession),
            taxon_id: taxon_id.and_then(non_empty),
        }
    } else if let Some((name, payload)) =
        trailing_annotation(raw_label, '{', '}')
    {
        NodeLabel {
            name: non_empty(name),
            accession: None,
            taxon_id: non_empty(payload),
        }
    } else {
        NodeLabel { name: non_empty(raw_label), ..NodeLabel::default() }
    }
}

/// Finds the shortest non-empty name followed by `open payload close` that
/// runs to the end of the label. The payload must be non-empty and must not
/// contain `close`.
fn trailing_annotation(
    raw_label: &str,
    open: char,
    close: char,
) -> Option<(&str, &str)> {
    let body = raw_label.strip_suffix(close)?;
    body.char_indices()
        .skip(1)
        .filter(|&(_, character)| character == open)
        .find_map(|(open_index, _)| {
            let payload = &body[open_index + open.len_utf8()..];
            if payload.is_empty() || payload.contains(close) {
                None
            } else {
                Some((&body[..open_index], payload))
            }
        })
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() { None } else { Some(s.to_string()) }
}

/// Reads a branch length the forgiving way: leading whitespace is skipped,
/// the longest numeric prefix is used and anything unreadable is `0.0`.
pub(crate) fn parse_branch_length(raw: &str) -> TreeFloat {
    let raw = raw.trim_start();
    let numeric = &raw[..float_prefix_len(raw)];
    numeric
        .parse::<TreeFloat>()
        .ok()
        .filter(|value| !value.is_nan())
        .unwrap_or(0e0)
}

/// Length of the longest prefix of `raw` that reads as a decimal float:
/// `[+-]` then `Infinity`, or digits with an optional fraction and an
/// exponent that is only taken when it has digits. Zero if there is none.
fn float_prefix_len(raw: &str) -> usize {
    let bytes = raw.as_bytes();
    let digits_from = |start: usize| {
        bytes[start..].iter().take_while(|byte| byte.is_ascii_digit()).count()
    };

    let mut end: usize = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    if raw[end..].starts_with("Infinity") {
        return end + "Infinity".len();
    }

    let int_digits = digits_from(end);
    end += int_digits;

    let mut frac_digits: usize = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = digits_from(end + 1);
        if int_digits + frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits + frac_digits == 0 {
        return 0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exponent = end + 1;
        if matches!(bytes.get(exponent), Some(b'+' | b'-')) {
            exponent += 1;
        }
        let exponent_digits = digits_from(exponent);
        if exponent_digits > 0 {
            end = exponent + exponent_digits;
        }
    }

    end
}
