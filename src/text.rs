use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Fold free text for classification: NFD-decompose and drop combining marks
/// (so "Não" and "Nao" compare equal), lowercase, and collapse runs of
/// whitespace to single spaces. Blank input folds to the empty string.
pub fn fold(text: &str) -> String {
    let stripped: String = text
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(|c| c.to_lowercase())
        .collect();
    let mut out = String::with_capacity(stripped.len());
    let mut prev_space = false;
    for c in stripped.trim().chars() {
        if c.is_whitespace() {
            if !prev_space {
                out.push(' ');
            }
            prev_space = true;
        } else {
            out.push(c);
            prev_space = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::fold;

    #[test]
    fn strips_diacritics_and_case() {
        assert_eq!(fold("Não Está EM VIGOR"), "nao esta em vigor");
        assert_eq!(fold("Convênio"), "convenio");
        assert_eq!(fold("EXPEDIÇÃO Científica"), "expedicao cientifica");
    }

    #[test]
    fn collapses_whitespace() {
        assert_eq!(fold("  termo \t de\n cooperação "), "termo de cooperacao");
    }

    #[test]
    fn blank_folds_to_empty() {
        assert_eq!(fold(""), "");
        assert_eq!(fold("   "), "");
    }
}
