/// Characters kept inside a token besides alphanumerics, so tags like
/// `ui/ux`, `ci/cd`, `c++`, `c#` and `react-native` survive intact.
const TOKEN_JOINERS: &[char] = &['-', '/', '+', '#'];

/// Lowercase `text` and split it into tokens on every other character.
pub fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !(c.is_alphanumeric() || TOKEN_JOINERS.contains(&c)))
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
}

/// Split a specialization string on commas and whitespace into case-folded terms.
pub fn specialization_terms(text: &str) -> Vec<String> {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_splits_on_punctuation() {
        let tokens: Vec<String> = tokenize("Build a React component. Then, test it!").collect();
        assert_eq!(
            tokens,
            vec!["build", "a", "react", "component", "then", "test", "it"]
        );
    }

    #[test]
    fn tokenize_keeps_joined_tags() {
        let tokens: Vec<String> = tokenize("Polish UI/UX for the React-Native app (C++ core)").collect();
        assert!(tokens.contains(&"ui/ux".to_string()));
        assert!(tokens.contains(&"react-native".to_string()));
        assert!(tokens.contains(&"c++".to_string()));
    }

    #[test]
    fn tokenize_empty() {
        assert_eq!(tokenize("  ... ").count(), 0);
    }

    #[test]
    fn specialization_terms_split_on_commas_and_spaces() {
        assert_eq!(specialization_terms("React, CSS"), vec!["react", "css"]);
        assert_eq!(
            specialization_terms("  API design,Postgres   tuning "),
            vec!["api", "design", "postgres", "tuning"]
        );
        assert!(specialization_terms(" , ").is_empty());
    }
}
