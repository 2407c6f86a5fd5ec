//! Numbered-tone pinyin to diacritic-marked pinyin conversion.
//!
//! Upstream dictionary sources carry pinyin with trailing tone digits
//! (`hao3`, `lu:4`); rendered output uses tone marks (`hǎo`, `lǜ`). The mark
//! lands on `a` or `e` when present, on the `o` of `ou`, and otherwise on the
//! last vowel of the syllable. Tone 5 (neutral) drops the digit without a
//! mark, and text without a trailing tone digit passes through unchanged.

/// Convert every space-separated syllable of `text` to accented form.
///
/// # Examples
///
/// ```
/// use cilin::pinyin::numbered_to_accented;
///
/// assert_eq!(numbered_to_accented("hao3"), "hǎo");
/// assert_eq!(numbered_to_accented("ni3 hao3"), "nǐ hǎo");
/// assert_eq!(numbered_to_accented("ma5"), "ma");
/// ```
pub fn numbered_to_accented(text: &str) -> String {
    text.split(' ')
        .map(convert_syllable)
        .collect::<Vec<String>>()
        .join(" ")
}

/// Accent table for one vowel: tones 1 through 4.
fn accented_vowel(vowel: char, tone: u8) -> Option<char> {
    let marks = match vowel {
        'a' => ['ā', 'á', 'ǎ', 'à'],
        'e' => ['ē', 'é', 'ě', 'è'],
        'i' => ['ī', 'í', 'ǐ', 'ì'],
        'o' => ['ō', 'ó', 'ǒ', 'ò'],
        'u' => ['ū', 'ú', 'ǔ', 'ù'],
        'ü' => ['ǖ', 'ǘ', 'ǚ', 'ǜ'],
        'A' => ['Ā', 'Á', 'Ǎ', 'À'],
        'E' => ['Ē', 'É', 'Ě', 'È'],
        'I' => ['Ī', 'Í', 'Ǐ', 'Ì'],
        'O' => ['Ō', 'Ó', 'Ǒ', 'Ò'],
        'U' => ['Ū', 'Ú', 'Ǔ', 'Ù'],
        'Ü' => ['Ǖ', 'Ǘ', 'Ǚ', 'Ǜ'],
        _ => return None,
    };
    marks.get(tone as usize - 1).copied()
}

fn is_pinyin_vowel(c: char) -> bool {
    matches!(
        c,
        'a' | 'e' | 'i' | 'o' | 'u' | 'ü' | 'A' | 'E' | 'I' | 'O' | 'U' | 'Ü'
    )
}

/// Index of the vowel that carries the tone mark, if any.
fn mark_position(chars: &[char]) -> Option<usize> {
    if let Some(pos) = chars.iter().position(|&c| c == 'a' || c == 'A') {
        return Some(pos);
    }
    if let Some(pos) = chars.iter().position(|&c| c == 'e' || c == 'E') {
        return Some(pos);
    }
    for (pos, window) in chars.windows(2).enumerate() {
        if (window[0] == 'o' || window[0] == 'O') && (window[1] == 'u' || window[1] == 'U') {
            return Some(pos);
        }
    }
    chars.iter().rposition(|&c| is_pinyin_vowel(c))
}

fn convert_syllable(syllable: &str) -> String {
    let Some(last) = syllable.chars().last() else {
        return String::new();
    };
    let tone = match last.to_digit(10) {
        Some(d @ 1..=5) => d as u8,
        _ => return syllable.to_string(),
    };

    let base = &syllable[..syllable.len() - last.len_utf8()];
    // CC-CEDICT writes ü as "u:" or "v".
    let base = base.replace("u:", "ü").replace("U:", "Ü").replace('v', "ü");

    if tone == 5 {
        return base;
    }

    let mut chars: Vec<char> = base.chars().collect();
    match mark_position(&chars).and_then(|pos| {
        accented_vowel(chars[pos], tone).map(|accented| (pos, accented))
    }) {
        Some((pos, accented)) => {
            chars[pos] = accented;
            chars.into_iter().collect()
        }
        // No vowel to carry the mark; drop the digit and keep the rest.
        None => base,
    }
}
