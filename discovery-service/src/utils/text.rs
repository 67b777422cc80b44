//! Text primitives shared by the search and compatibility layers.

use std::cmp::Ordering;

/// Turkish alphabet in collation order. Letters outside it (digits,
/// punctuation, foreign letters) sort after, by code point.
const TURKISH_ALPHABET: &str = "abcçdefgğhıijklmnoöprsştuüvyz";

/// Lowercase with the Turkish casing rules the default `to_lowercase`
/// gets wrong: `I` folds to `ı` and `İ` to `i`.
pub fn turkish_lower(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            'I' => out.push('ı'),
            'İ' => out.push('i'),
            _ => out.extend(c.to_lowercase()),
        }
    }
    out
}

/// Locale-aware comparison for the title/author sort: case-insensitive,
/// Turkish alphabet order (ç after c, ı before i, ö after o, ...).
pub fn turkish_cmp(a: &str, b: &str) -> Ordering {
    let a = turkish_lower(a);
    let b = turkish_lower(b);

    let mut chars_a = a.chars();
    let mut chars_b = b.chars();
    loop {
        match (chars_a.next(), chars_b.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(ca), Some(cb)) => {
                let ord = collation_key(ca).cmp(&collation_key(cb));
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
    }
}

fn collation_key(c: char) -> (u8, u32) {
    match TURKISH_ALPHABET.chars().position(|t| t == c) {
        Some(idx) => (0, idx as u32),
        None => (1, c as u32),
    }
}

/// Standard dynamic-programming edit distance: insertion, deletion and
/// substitution all cost 1. Operates on chars, not bytes.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];
    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = if ca == cb { 0 } else { 1 };
            curr[j + 1] = (curr[j] + 1).min(prev[j + 1] + 1).min(prev[j] + cost);
        }
        prev.copy_from_slice(&curr);
    }
    prev[b.len()]
}

/// Case-insensitive Levenshtein similarity:
/// `(max_len - edit_distance) / max_len`, 1.0 when both strings are empty.
///
/// O(n·m) per pair; keep it out of per-record hot loops. The current
/// filters use substring containment, this is reserved for fuzzy
/// matching.
pub fn similarity(a: &str, b: &str) -> f32 {
    let a = turkish_lower(a);
    let b = turkish_lower(b);

    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    let distance = levenshtein(&a, &b).min(max_len);
    (max_len - distance) as f32 / max_len as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein_basics() {
        assert_eq!(levenshtein("kitap", "kitap"), 0);
        assert_eq!(levenshtein("kitap", ""), 5);
        assert_eq!(levenshtein("", "roman"), 5);
        assert_eq!(levenshtein("kitap", "kitapçı"), 2);
        assert_eq!(levenshtein("kedi", "keçi"), 1);
    }

    #[test]
    fn test_similarity_bounds() {
        assert_eq!(similarity("", ""), 1.0);
        assert_eq!(similarity("Dune", "dune"), 1.0);
        assert_eq!(similarity("abc", "xyz"), 0.0);

        let s = similarity("Saatleri Ayarlama Enstitüsü", "Saatleri Ayarlama");
        assert!(s > 0.0 && s < 1.0);
    }

    #[test]
    fn test_turkish_lower_dotted_i() {
        assert_eq!(turkish_lower("İstanbul"), "istanbul");
        assert_eq!(turkish_lower("IRMAK"), "ırmak");
    }

    #[test]
    fn test_turkish_collation_order() {
        // c < ç < d and o < ö per the Turkish alphabet
        assert_eq!(turkish_cmp("Cevdet Bey", "Çalıkuşu"), Ordering::Less);
        assert_eq!(turkish_cmp("Çalıkuşu", "Dava"), Ordering::Less);
        assert_eq!(turkish_cmp("Olasılıksız", "Öteki"), Ordering::Less);
        // ı sorts before i
        assert_eq!(turkish_cmp("ırmak", "inci"), Ordering::Less);
    }

    #[test]
    fn test_turkish_cmp_case_insensitive() {
        assert_eq!(turkish_cmp("İnce Memed", "ince memed"), Ordering::Equal);
    }
}
