//! Slug normalization.
//!
//! Turns arbitrary titles into URL-safe slugs: transliterate, lowercase,
//! collapse separator runs. Pure and deterministic; sibling uniqueness is
//! enforced by [`PageGraph`](crate::PageGraph), not here.

/// Normalize a title into a URL-safe slug.
///
/// Non-ASCII Latin characters are transliterated to ASCII equivalents,
/// everything is lowercased, and runs of non-alphanumeric characters are
/// collapsed into a single `-`. Leading and trailing separators are trimmed.
///
/// Input without any transliterable alphanumeric content produces an empty
/// string; the caller is responsible for rejecting empty slugs.
#[must_use]
pub fn normalize(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;

    let mut push = |out: char, slug: &mut String| {
        if out.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            slug.push(out.to_ascii_lowercase());
            pending_dash = false;
        } else {
            pending_dash = true;
        }
    };

    for ch in title.chars() {
        if ch.is_ascii() {
            push(ch, &mut slug);
        } else {
            for out in transliterate(ch).chars() {
                push(out, &mut slug);
            }
        }
    }

    slug
}

/// Map a non-ASCII character to its ASCII equivalent.
///
/// Covers the Latin-1 and common Latin Extended-A range; that is what titles
/// in practice contain. Anything unmapped returns `""` and degrades to a
/// separator in [`normalize`].
fn transliterate(ch: char) -> &'static str {
    match ch {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => "a",
        'À' | 'Á' | 'Â' | 'Ã' | 'Ä' | 'Å' | 'Ā' | 'Ă' | 'Ą' => "A",
        'æ' => "ae",
        'Æ' => "AE",
        'ç' | 'ć' | 'č' => "c",
        'Ç' | 'Ć' | 'Č' => "C",
        'ď' | 'đ' | 'ð' => "d",
        'Ď' | 'Đ' | 'Ð' => "D",
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ĕ' | 'ė' | 'ę' | 'ě' => "e",
        'È' | 'É' | 'Ê' | 'Ë' | 'Ē' | 'Ĕ' | 'Ė' | 'Ę' | 'Ě' => "E",
        'ğ' | 'ģ' => "g",
        'Ğ' | 'Ģ' => "G",
        'ì' | 'í' | 'î' | 'ï' | 'ī' | 'į' | 'ı' => "i",
        'Ì' | 'Í' | 'Î' | 'Ï' | 'Ī' | 'Į' | 'İ' => "I",
        'ł' => "l",
        'Ł' => "L",
        'ñ' | 'ń' | 'ň' => "n",
        'Ñ' | 'Ń' | 'Ň' => "N",
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ő' => "o",
        'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ö' | 'Ø' | 'Ō' | 'Ő' => "O",
        'œ' => "oe",
        'Œ' => "OE",
        'ř' => "r",
        'Ř' => "R",
        'ś' | 'š' | 'ş' | 'ș' => "s",
        'Ś' | 'Š' | 'Ş' | 'Ș' => "S",
        'ß' => "ss",
        'ť' | 'ţ' | 'ț' => "t",
        'Ť' | 'Ţ' | 'Ț' => "T",
        'þ' => "th",
        'Þ' => "TH",
        'ù' | 'ú' | 'û' | 'ü' | 'ū' | 'ů' | 'ű' => "u",
        'Ù' | 'Ú' | 'Û' | 'Ü' | 'Ū' | 'Ů' | 'Ű' => "U",
        'ý' | 'ÿ' => "y",
        'Ý' | 'Ÿ' => "Y",
        'ź' | 'ż' | 'ž' => "z",
        'Ź' | 'Ż' | 'Ž' => "Z",
        _ => "",
    }
}
