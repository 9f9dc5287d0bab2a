/// Rendering of records into wrapped text, plus batch output.

use chrono::Local;
use std::io::{self, Write};

use crate::core::generator::Generator;
use crate::schema::utopia::MicroUtopia;

/// Maximum line width; also the length of the separator row.
pub const WRAP_WIDTH: usize = 92;

/// Current local time as `YYYY-MM-DD HH:MM`.
pub fn now_stamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M").to_string()
}

/// Render a record stamped with the current local time.
pub fn render(record: &MicroUtopia) -> String {
    render_at(record, &now_stamp())
}

/// Render a record with an explicit timestamp.
pub fn render_at(record: &MicroUtopia, stamp: &str) -> String {
    let mut lines = vec![
        format!("{}  micro utopie sur le thème : {}", record.name, record.theme),
        format!("Horodatage : {}", stamp),
        String::new(),
        format!("Principe fondateur : {}", record.premise),
        format!("Institution clé : {}", record.institution),
        format!("Incitation : {}", record.incentive),
        format!("Contrainte non négociable : {}", record.constraint),
        String::new(),
        format!("Scène de vie : {}", record.daily_scene),
        format!("Faille probable : {}", record.failure_mode),
        format!("Test minimal : {}", record.test),
        String::new(),
        format!("Slogan : {}", record.slogan),
        String::new(),
        "Questions qui piquent :".to_string(),
    ];
    lines.extend(record.questions.iter().map(|q| format!("- {} ?", q)));

    lines
        .iter()
        .map(|line| {
            if line.chars().count() > WRAP_WIDTH {
                fill(line, WRAP_WIDTH)
            } else {
                line.clone()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Generate `count` records and write them to `out`, separated by a row of `=`.
pub fn write_batch<W: Write>(
    generator: &mut Generator,
    theme: Option<&str>,
    count: usize,
    out: &mut W,
    stamp: &dyn Fn() -> String,
) -> io::Result<()> {
    let separator = "=".repeat(WRAP_WIDTH);
    for i in 0..count {
        let record = generator.generate(theme);
        writeln!(out, "{}", render_at(&record, &stamp()))?;
        if i + 1 < count {
            writeln!(out, "\n{}\n", separator)?;
        }
    }
    out.flush()
}

/// Greedy word wrap to `width` characters, joined with newlines.
///
/// Tabs expand to the next multiple of 8 columns and other whitespace becomes
/// plain spaces. Whitespace at line breaks is dropped. Words may break after
/// a hyphen inside a compound such as `risque-t-elle`, but not in short forms
/// like `e-mail`. Words longer than the width are split, at a hyphen when one
/// fits.
pub fn fill(text: &str, width: usize) -> String {
    wrap(text, width).join("\n")
}

/// Greedy word wrap to `width` characters.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);

    // Chunks are consumed from the back.
    let mut chunks = split_chunks(&normalize_whitespace(text));
    chunks.reverse();

    let mut lines = Vec::new();
    while !chunks.is_empty() {
        let mut line: Vec<Vec<char>> = Vec::new();
        let mut line_len = 0;

        if !lines.is_empty() && chunks.last().is_some_and(|c| is_blank(c)) {
            chunks.pop();
        }

        while let Some(chunk) = chunks.last() {
            if line_len + chunk.len() > width {
                break;
            }
            line_len += chunk.len();
            line.extend(chunks.pop());
        }

        if chunks.last().is_some_and(|c| c.len() > width) {
            split_long_word(&mut chunks, &mut line, width - line_len);
        }

        if line.last().is_some_and(|c| is_blank(c)) {
            line.pop();
        }

        if !line.is_empty() {
            lines.push(line.iter().flatten().collect::<String>());
        }
    }

    lines
}

/// Move the head of the over-long last chunk onto `line`, `space_left` chars
/// at most. A full line takes nothing and the word starts the next one.
fn split_long_word(chunks: &mut [Vec<char>], line: &mut Vec<Vec<char>>, space_left: usize) {
    let Some(chunk) = chunks.last_mut() else {
        return;
    };

    let mut end = space_left.min(chunk.len());
    if let Some(hyphen) = chunk[..end].iter().rposition(|&c| c == '-') {
        if hyphen > 0 && chunk[..hyphen].iter().any(|&c| c != '-') {
            end = hyphen + 1;
        }
    }

    let rest = chunk.split_off(end);
    line.push(std::mem::replace(chunk, rest));
}

fn is_blank(chunk: &[char]) -> bool {
    chunk.iter().all(|c| c.is_whitespace())
}

const TAB_SIZE: usize = 8;

/// Expand tabs, then turn the remaining ASCII whitespace into spaces.
fn normalize_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut column = 0;
    for c in text.chars() {
        match c {
            '\t' => {
                let pad = TAB_SIZE - column % TAB_SIZE;
                out.extend(std::iter::repeat(' ').take(pad));
                column += pad;
            }
            '\n' | '\r' => {
                out.push(' ');
                column = 0;
            }
            '\x0b' | '\x0c' => {
                out.push(' ');
                column += 1;
            }
            c => {
                out.push(c);
                column += 1;
            }
        }
    }
    out
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_letter(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_word_or_punct(c: char) -> bool {
    is_word_char(c) || matches!(c, '!' | '"' | '\'' | '&' | '.' | ',' | '?')
}

fn letter_at(chars: &[char], i: usize) -> bool {
    chars.get(i).is_some_and(|&c| is_letter(c))
}

fn hyphen_run(chars: &[char], from: usize) -> usize {
    chars[from.min(chars.len())..].iter().take_while(|&&c| c == '-').count()
}

/// A dash made of two or more hyphens at `at`, preceded by a word or
/// punctuation char and followed by a word char. Returns where it ends.
fn em_dash_at(chars: &[char], at: usize) -> Option<usize> {
    if at == 0 || !is_word_or_punct(chars[at - 1]) {
        return None;
    }
    let run = hyphen_run(chars, at);
    let end = at + run;
    (run >= 2 && chars.get(end).is_some_and(|&c| is_word_char(c))).then_some(end)
}

/// A hyphen at `at` that closes a compound part: two letters (or
/// letter-hyphen-letter) before it and two letters (or letter-hyphen-letter)
/// after it.
fn hyphen_break_at(chars: &[char], at: usize) -> bool {
    if chars.get(at) != Some(&'-') {
        return false;
    }
    let behind = at >= 2
        && letter_at(chars, at - 1)
        && (letter_at(chars, at - 2) || (at >= 3 && chars[at - 2] == '-' && letter_at(chars, at - 3)));
    let ahead = letter_at(chars, at + 1)
        && (letter_at(chars, at + 2) || (chars.get(at + 2) == Some(&'-') && letter_at(chars, at + 3)));
    behind && ahead
}

/// End of the word chunk starting at `start`.
fn word_end(chars: &[char], start: usize) -> usize {
    for at in start + 1..chars.len() {
        if hyphen_break_at(chars, at) {
            return at + 1;
        }
        if chars[at] == ' ' || em_dash_at(chars, at).is_some() {
            return at;
        }
    }
    chars.len()
}

/// Split into runs of spaces, dashes and words; words are further split
/// after compound hyphens.
fn split_chunks(text: &str) -> Vec<Vec<char>> {
    let chars: Vec<char> = text.chars().collect();
    let mut chunks = Vec::new();
    let mut start = 0;

    while start < chars.len() {
        let end = if chars[start] == ' ' {
            start + chars[start..].iter().take_while(|&&c| c == ' ').count()
        } else if let Some(end) = em_dash_at(&chars, start) {
            end
        } else {
            word_end(&chars, start)
        };
        chunks.push(chars[start..end].to_vec());
        start = end;
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MicroUtopia {
        MicroUtopia {
            theme: "ville".to_string(),
            premise: "On ne rémunère plus l’effort mais l’impact vérifiable".to_string(),
            institution: "un Ministère des Bugs qui publie chaque semaine la liste des échecs et correctifs".to_string(),
            incentive: "un score public de fiabilité basé sur les prédictions tenues".to_string(),
            constraint: "aucun algorithme ne peut être utilisé s’il n’explique pas son raisonnement en langage clair".to_string(),
            daily_scene: "Dans un bus, un écran affiche les promesses tenues par la mairie ce trimestre".to_string(),
            failure_mode: "les effets secondaires se déplacent ailleurs et deviennent invisibles".to_string(),
            test: "un pilote de 6 mois dans un quartier avec audit public hebdomadaire".to_string(),
            questions: vec![
                "Qui perd vraiment quand un score public de fiabilité basé sur les prédictions tenues devient la règle".to_string(),
                "Quel est le moyen le plus simple de tricher avec un score public".to_string(),
                "Quel acteur aura intérêt à saboter un score public en silence".to_string(),
            ],
            slogan: "Le pouvoir suit les conséquences".to_string(),
            name: "Tempo Sobre".to_string(),
        }
    }

    #[test]
    fn render_layout() {
        let text = render_at(&sample(), "2024-05-01 09:30");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Tempo Sobre  micro utopie sur le thème : ville");
        assert_eq!(lines[1], "Horodatage : 2024-05-01 09:30");
        assert_eq!(lines[2], "");
        assert_eq!(
            lines[3],
            "Principe fondateur : On ne rémunère plus l’effort mais l’impact vérifiable"
        );
        assert!(text.contains("\n\nSlogan : Le pouvoir suit les conséquences\n\nQuestions qui piquent :\n"));
        assert!(text.ends_with("- Quel acteur aura intérêt à saboter un score public en silence ?"));
    }

    #[test]
    fn render_stamps_current_time() {
        let text = render(&sample());
        let stamp_line = text.lines().nth(1).unwrap();
        let stamp = stamp_line.strip_prefix("Horodatage : ").unwrap();
        assert!(chrono::NaiveDateTime::parse_from_str(stamp, "%Y-%m-%d %H:%M").is_ok());
    }

    #[test]
    fn render_is_deterministic() {
        let record = sample();
        assert_eq!(
            render_at(&record, "2024-05-01 09:30"),
            render_at(&record, "2024-05-01 09:30")
        );
    }

    #[test]
    fn long_lines_are_wrapped() {
        let text = render_at(&sample(), "2024-05-01 09:30");
        for line in text.lines() {
            assert!(line.chars().count() <= WRAP_WIDTH, "too long: {}", line);
        }
        // The constraint line is 119 chars and must be split.
        assert!(text.contains("Contrainte non négociable : aucun algorithme"));
        assert!(!text.contains(
            "Contrainte non négociable : aucun algorithme ne peut être utilisé s’il n’explique pas son raisonnement en langage clair"
        ));
    }

    #[test]
    fn wrap_breaks_on_spaces() {
        assert_eq!(wrap("aaa bbb ccc", 7), vec!["aaa bbb", "ccc"]);
        assert_eq!(wrap("aaa  bbb", 4), vec!["aaa", "bbb"]);
    }

    #[test]
    fn wrap_keeps_inner_double_space() {
        assert_eq!(wrap("ab  cd ef", 6), vec!["ab  cd", "ef"]);
    }

    #[test]
    fn wrap_splits_long_words() {
        assert_eq!(wrap("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
        assert_eq!(wrap("xy abcdefgh", 5), vec!["xy ab", "cdefg", "h"]);
    }

    #[test]
    fn wrap_long_word_after_full_line() {
        assert_eq!(wrap("abcd-efghijklmn", 5), vec!["abcd-", "efghi", "jklmn"]);
        assert_eq!(wrap("11 b1’-1", 3), vec!["11 ", "b1’", "-1"]);
        for line in wrap("abcd-efghijklmn opqrstuvwxyz", 5) {
            assert!(line.chars().count() <= 5, "too long: {}", line);
        }
    }

    #[test]
    fn wrap_long_word_splits_at_hyphen() {
        assert_eq!(wrap("a-bcdefgh", 4), vec!["a-", "bcde", "fgh"]);
        assert_eq!(wrap("--abcdef", 4), vec!["--ab", "cdef"]);
    }

    #[test]
    fn wrap_breaks_after_hyphen() {
        assert_eq!(wrap("risque-t-elle", 9), vec!["risque-t-", "elle"]);
        assert_eq!(wrap("a - b", 3), vec!["a -", "b"]);
    }

    #[test]
    fn wrap_keeps_short_compounds_whole() {
        assert_eq!(wrap("pour la sans e-mail", 16), vec!["pour la sans", "e-mail"]);
        assert_eq!(wrap("une radio x-ray ici", 16), vec!["une radio x-ray", "ici"]);
    }

    #[test]
    fn wrap_breaks_at_em_dash() {
        assert_eq!(wrap("avant--après", 7), vec!["avant--", "après"]);
    }

    #[test]
    fn wrap_normalizes_whitespace() {
        assert_eq!(wrap("a\tb\nc", 10), vec!["a       b", "c"]);
        assert_eq!(wrap("ab\tc", 20), vec!["ab      c"]);
        assert_eq!(wrap("a\r\x0bb", 10), vec!["a  b"]);
    }

    #[test]
    fn wrap_counts_characters_not_bytes() {
        let text = "é".repeat(5);
        assert_eq!(wrap(&text, 5), vec![text.clone()]);
    }
}
