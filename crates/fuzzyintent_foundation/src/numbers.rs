//! Number-to-words replacement (English).
//!
//! Speech transcripts spell numbers out ("seventy five") while grammars and
//! typed queries often use digits ("75"). Both sides are normalized to words
//! before expansion and recognition.

const ONES: [&str; 20] = [
    "zero",
    "one",
    "two",
    "three",
    "four",
    "five",
    "six",
    "seven",
    "eight",
    "nine",
    "ten",
    "eleven",
    "twelve",
    "thirteen",
    "fourteen",
    "fifteen",
    "sixteen",
    "seventeen",
    "eighteen",
    "nineteen",
];

const TENS: [&str; 10] = [
    "", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
];

const SCALES: [&str; 7] = [
    "",
    "thousand",
    "million",
    "billion",
    "trillion",
    "quadrillion",
    "quintillion",
];

/// Parses a word made only of ASCII digits (with an optional leading `-`).
#[must_use]
pub fn parse_number(word: &str) -> Option<i64> {
    let digits = word.strip_prefix('-').unwrap_or(word);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    word.parse().ok()
}

/// Spells out an integer as English words.
#[must_use]
pub fn number_to_words(number: i64) -> Vec<String> {
    let mut words = Vec::new();
    if number < 0 {
        words.push("minus".to_string());
    }

    let mut rest = number.unsigned_abs();
    if rest == 0 {
        words.push(ONES[0].to_string());
        return words;
    }

    let mut groups = Vec::new();
    while rest > 0 {
        groups.push(rest % 1000);
        rest /= 1000;
    }

    for (scale, group) in groups.iter().enumerate().rev() {
        if *group == 0 {
            continue;
        }
        push_hundreds(*group, &mut words);
        if scale > 0 {
            words.push(SCALES[scale].to_string());
        }
    }

    words
}

/// Appends the words for a value below one thousand.
#[allow(clippy::cast_possible_truncation)]
fn push_hundreds(group: u64, words: &mut Vec<String>) {
    let hundreds = (group / 100) as usize;
    let rest = (group % 100) as usize;

    if hundreds > 0 {
        words.push(ONES[hundreds].to_string());
        words.push("hundred".to_string());
    }

    match rest {
        0 => {}
        1..=19 => words.push(ONES[rest].to_string()),
        _ => {
            words.push(TENS[rest / 10].to_string());
            if rest % 10 > 0 {
                words.push(ONES[rest % 10].to_string());
            }
        }
    }
}
