//! Name conversion: transliteration policies applied on top of a
//! sanitized segment.

use crate::config::ConversionMode;
use crate::naming::sanitize::SanitizeOptions;

/// Apply a conversion mode to an already-sanitized name.
///
/// `Hash` is a file-naming policy handled by the storage-id builder;
/// here it behaves like `Keep`.
pub fn convert(text: &str, mode: ConversionMode, opts: &SanitizeOptions) -> String {
    match mode {
        ConversionMode::Keep | ConversionMode::Hash => text.to_string(),
        ConversionMode::Spaces => underscore_spaces(text),
        ConversionMode::FirstLetter => first_letter_ascii(text, opts),
        ConversionMode::FirstAndSpaces => underscore_spaces(&first_letter_ascii(text, opts)),
        ConversionMode::FullAscii => full_ascii(text, opts),
    }
}

/// Replace whitespace runs with a single underscore.
fn underscore_spaces(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_run = false;
    for c in text.chars() {
        if c.is_whitespace() {
            if !in_run {
                out.push('_');
            }
            in_run = true;
        } else {
            out.push(c);
            in_run = false;
        }
    }
    out
}

/// Transliterate only the first character, keep the rest unchanged.
/// `chars()` keeps this codepoint-aware for multi-byte text.
fn first_letter_ascii(text: &str, opts: &SanitizeOptions) -> String {
    let mut chars = text.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => {
            let mut out = convert_char(first, opts);
            out.extend(chars);
            out
        }
    }
}

/// Full ASCII transliteration: fold accented Latin letters and
/// ligatures to their base letters, replace anything outside the
/// allow-set with `_`, collapse underscore runs, and right-truncate
/// to the length cap.
fn full_ascii(text: &str, opts: &SanitizeOptions) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        out.push_str(&convert_char(c, opts));
    }

    let collapsed = collapse_underscores(&out);
    collapsed.chars().take(opts.max_len).collect()
}

/// One character through the full-ascii algorithm: decomposition table
/// first, then the allow-set.
fn convert_char(c: char, opts: &SanitizeOptions) -> String {
    if let Some(folded) = fold_latin(c) {
        return folded.to_string();
    }
    if is_allowed(c, opts) {
        c.to_string()
    } else {
        "_".to_string()
    }
}

/// Allow-set for full-ascii output.
fn is_allowed(c: char, opts: &SanitizeOptions) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(c, '[' | ']' | '_' | '-' | '.' | '#' | '~' | '@' | '+' | ':')
        || (opts.keep_parenthesis && matches!(c, '(' | ')'))
}

fn collapse_underscores(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last_underscore = false;
    for c in text.chars() {
        if c == '_' {
            if !last_underscore {
                out.push(c);
            }
            last_underscore = true;
        } else {
            out.push(c);
            last_underscore = false;
        }
    }
    out
}

/// Decomposition table for accented Latin letters and ligatures.
fn fold_latin(c: char) -> Option<&'static str> {
    let folded = match c {
        'À' | 'Á' | 'Â' | 'Ã' | 'Ä' | 'Å' | 'Ā' | 'Ă' | 'Ą' => "A",
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => "a",
        'Æ' => "AE",
        'æ' => "ae",
        'Ç' | 'Ć' | 'Ĉ' | 'Ċ' | 'Č' => "C",
        'ç' | 'ć' | 'ĉ' | 'ċ' | 'č' => "c",
        'Ð' | 'Ď' | 'Đ' => "D",
        'ð' | 'ď' | 'đ' => "d",
        'È' | 'É' | 'Ê' | 'Ë' | 'Ē' | 'Ĕ' | 'Ė' | 'Ę' | 'Ě' => "E",
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ĕ' | 'ė' | 'ę' | 'ě' => "e",
        'Ĝ' | 'Ğ' | 'Ġ' | 'Ģ' => "G",
        'ĝ' | 'ğ' | 'ġ' | 'ģ' => "g",
        'Ĥ' | 'Ħ' => "H",
        'ĥ' | 'ħ' => "h",
        'Ì' | 'Í' | 'Î' | 'Ï' | 'Ĩ' | 'Ī' | 'Ĭ' | 'Į' | 'İ' => "I",
        'ì' | 'í' | 'î' | 'ï' | 'ĩ' | 'ī' | 'ĭ' | 'į' | 'ı' => "i",
        'Ĵ' => "J",
        'ĵ' => "j",
        'Ķ' => "K",
        'ķ' => "k",
        'Ĺ' | 'Ļ' | 'Ľ' | 'Ŀ' | 'Ł' => "L",
        'ĺ' | 'ļ' | 'ľ' | 'ŀ' | 'ł' => "l",
        'Ñ' | 'Ń' | 'Ņ' | 'Ň' => "N",
        'ñ' | 'ń' | 'ņ' | 'ň' => "n",
        'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ö' | 'Ø' | 'Ō' | 'Ŏ' | 'Ő' => "O",
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ŏ' | 'ő' => "o",
        'Œ' => "OE",
        'œ' => "oe",
        'Ŕ' | 'Ŗ' | 'Ř' => "R",
        'ŕ' | 'ŗ' | 'ř' => "r",
        'Ś' | 'Ŝ' | 'Ş' | 'Š' => "S",
        'ś' | 'ŝ' | 'ş' | 'š' => "s",
        'ß' => "ss",
        'Ţ' | 'Ť' | 'Ŧ' => "T",
        'ţ' | 'ť' | 'ŧ' => "t",
        'Þ' => "TH",
        'þ' => "th",
        'Ù' | 'Ú' | 'Û' | 'Ü' | 'Ũ' | 'Ū' | 'Ŭ' | 'Ů' | 'Ű' | 'Ų' => "U",
        'ù' | 'ú' | 'û' | 'ü' | 'ũ' | 'ū' | 'ŭ' | 'ů' | 'ű' | 'ų' => "u",
        'Ŵ' => "W",
        'ŵ' => "w",
        'Ý' | 'Ŷ' | 'Ÿ' => "Y",
        'ý' | 'ÿ' | 'ŷ' => "y",
        'Ź' | 'Ż' | 'Ž' => "Z",
        'ź' | 'ż' | 'ž' => "z",
        _ => return None,
    };
    Some(folded)
}
