//! Keyboard-layout normalization
//!
//! Hotkeys are Latin letters. With a Russian layout active the terminal sends
//! Cyrillic characters for the same physical keys; map them back so `j`, `q`
//! and friends keep working. Must not be applied while typing text.

use super::Key;

/// Cyrillic character -> Latin character on the same physical key (ЙЦУКЕН -> QWERTY)
fn ru_to_latin(c: char) -> Option<char> {
    let latin = match c {
        'й' => 'q',
        'ц' => 'w',
        'у' => 'e',
        'к' => 'r',
        'е' => 't',
        'н' => 'y',
        'г' => 'u',
        'ш' => 'i',
        'щ' => 'o',
        'з' => 'p',
        'х' => '[',
        'ъ' => ']',
        'ф' => 'a',
        'ы' => 's',
        'в' => 'd',
        'а' => 'f',
        'п' => 'g',
        'р' => 'h',
        'о' => 'j',
        'л' => 'k',
        'д' => 'l',
        'ж' => ';',
        'э' => '\'',
        'я' => 'z',
        'ч' => 'x',
        'с' => 'c',
        'м' => 'v',
        'и' => 'b',
        'т' => 'n',
        'ь' => 'm',
        'б' => ',',
        'ю' => '.',
        'Й' => 'Q',
        'Ц' => 'W',
        'У' => 'E',
        'К' => 'R',
        'Е' => 'T',
        'Н' => 'Y',
        'Г' => 'U',
        'Ш' => 'I',
        'Щ' => 'O',
        'З' => 'P',
        'Х' => '{',
        'Ъ' => '}',
        'Ф' => 'A',
        'Ы' => 'S',
        'В' => 'D',
        'А' => 'F',
        'П' => 'G',
        'Р' => 'H',
        'О' => 'J',
        'Л' => 'K',
        'Д' => 'L',
        'Ж' => ':',
        'Э' => '"',
        'Я' => 'Z',
        'Ч' => 'X',
        'С' => 'C',
        'М' => 'V',
        'И' => 'B',
        'Т' => 'N',
        'Ь' => 'M',
        _ => return None,
    };
    Some(latin)
}

/// Map a key typed in a non-Latin layout to its Latin equivalent.
/// Keys without a mapping are returned unchanged.
pub fn normalize(key: Key) -> Key {
    match key {
        Key::Char(c) => Key::Char(ru_to_latin(c).unwrap_or(c)),
        Key::Ctrl(c) => Key::Ctrl(ru_to_latin(c).map(|l| l.to_ascii_lowercase()).unwrap_or(c)),
        other => other,
    }
}
