//! Rendering of numbered pinyin (`hao3`) as tone-marked pinyin (`hǎo`).

const VOWELS: [char; 6] = ['a', 'e', 'i', 'o', 'u', 'ü'];

const TONE_MARKS: [[char; 4]; 6] = [
    ['ā', 'á', 'ǎ', 'à'],
    ['ē', 'é', 'ě', 'è'],
    ['ī', 'í', 'ǐ', 'ì'],
    ['ō', 'ó', 'ǒ', 'ò'],
    ['ū', 'ú', 'ǔ', 'ù'],
    ['ǖ', 'ǘ', 'ǚ', 'ǜ'],
];

/// Convert a numbered syllable to its display form.
///
/// Tones 1 to 4 place a diacritic; tone 0, 5 or a missing digit is the
/// neutral tone and renders as the bare syllable. Anything after the tone
/// digit is dropped. `v` and `u:` are read as `ü`.
///
/// The mark goes on `a` or `e` when present, on the `o` of `ou`, and on the
/// last vowel otherwise, so `liu2` renders as `liú` and `gui4` as `guì`.
///
/// Earlier versions of the drill marked the first of `a o e i u ü` (`líu`)
/// and printed neutral syllables verbatim (`de5`). Only the display
/// differs; ids and scores are unaffected.
pub fn to_display_form(numbered: &str) -> String {
    let (base, tone) = split_tone(numbered);
    let base = base.replace("u:", "ü").replace('v', "ü");

    match tone {
        Some(tone @ 1..=4) => place_mark(&base, tone),
        _ => base,
    }
}

fn split_tone(numbered: &str) -> (&str, Option<u32>) {
    match numbered.char_indices().find(|(_, c)| c.is_ascii_digit()) {
        Some((index, digit)) => (&numbered[..index], digit.to_digit(10)),
        None => (numbered, None),
    }
}

fn place_mark(base: &str, tone: u32) -> String {
    let chars: Vec<char> = base.chars().collect();

    let target = chars
        .iter()
        .position(|&c| c == 'a' || c == 'e')
        .or_else(|| {
            chars
                .windows(2)
                .position(|pair| pair == ['o', 'u'])
        })
        .or_else(|| chars.iter().rposition(|c| VOWELS.contains(c)));

    let Some(target) = target else {
        return base.to_string();
    };

    let vowel = VOWELS.iter().position(|&v| v == chars[target]);
    let Some(vowel) = vowel else {
        return base.to_string();
    };

    let mark = TONE_MARKS[vowel][tone as usize - 1];
    chars
        .iter()
        .enumerate()
        .map(|(i, &c)| if i == target { mark } else { c })
        .collect()
}
