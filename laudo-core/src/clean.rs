//! # Limpeza de Laudos
//!
//! Normalização leve aplicada a cada laudo antes da segmentação. A sequência
//! de passos é fixa:
//!
//! 1. Tudo em minúsculas.
//! 2. `"e/ou"` vira `"ou"`.
//! 3. Barra entre duas letras vira `" ou "` (`"pleural/pulmonar"` ->
//!    `"pleural ou pulmonar"`). Barras entre números (`"1/2"`) ficam.
//! 4. `".."` vira `"."`.
//! 5. Espaço depois de todo `.` e `,`.
//! 6. Espaços em sequência (incluindo quebras de linha) viram um só.
//! 7. Sentenças vazias (`". ."`, `". . ."`) são removidas.
//!
//! ## Exemplo
//!
//! ```rust
//! use laudo_core::clean::clean;
//!
//! assert_eq!(clean("Derrame pleural e/ou espessamento,sem sinais."),
//!            "derrame pleural ou espessamento, sem sinais.");
//! ```

use std::fmt::Display;
use std::sync::LazyLock;

use regex::Regex;

/// Uma sequência inteira de sentenças vazias (`". . ."`) de uma vez só.
static EMPTY_SENTENCES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\.(?:\s+\.)+").unwrap());

/// Limpa o texto de um laudo. Função pura e total.
pub fn clean(report: &str) -> String {
    let lower = report.to_lowercase();
    let corrected = lower.replace("e/ou", "ou");
    let corrected = spell_out_slashes(&corrected);
    let cleaned = corrected.replace("..", ".");
    let cleaned = space_punctuation(&cleaned);
    let cleaned = collapse_whitespace(&cleaned);
    EMPTY_SENTENCES.replace_all(&cleaned, ".").into_owned()
}

/// Limpa qualquer valor com representação textual (ex: células numéricas).
pub fn clean_value<T: Display + ?Sized>(value: &T) -> String {
    clean(&value.to_string())
}

/// Troca `/` por `" ou "` quando os dois vizinhos são letras ASCII.
///
/// Os vizinhos são lidos do texto original, então `a/b/c` vira `a ou b ou c`.
fn spell_out_slashes(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());

    for (i, &ch) in chars.iter().enumerate() {
        let between_letters = ch == '/'
            && i > 0
            && chars[i - 1].is_ascii_alphabetic()
            && chars.get(i + 1).is_some_and(char::is_ascii_alphabetic);

        if between_letters {
            out.push_str(" ou ");
        } else {
            out.push(ch);
        }
    }
    out
}

fn space_punctuation(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 8);
    for ch in text.chars() {
        out.push(ch);
        if ch == '.' || ch == ',' {
            out.push(' ');
        }
    }
    out
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
