//! Authinfo-code synthesis.
//!
//! The `.co.za` registry requires the fixed transfer code `coza`; every other
//! zone gets a random 16-character code containing at least one letter, one
//! digit, and one punctuation character.

use rand::Rng;

const PUNCTUATION: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";
const CODE_LEN: usize = 16;

/// Generate an authinfo code appropriate to the domain name.
pub fn gen_authinfo(name: &str) -> String {
    if name.ends_with(".co.za") {
        return "coza".to_string();
    }
    let alphabet: Vec<char> = ('a'..='z')
        .chain('A'..='Z')
        .chain('0'..='9')
        .chain(PUNCTUATION.chars())
        .collect();
    let mut rng = rand::rng();
    loop {
        let code: String = (0..CODE_LEN)
            .map(|_| alphabet[rng.random_range(0..alphabet.len())])
            .collect();
        if code.chars().any(|c| c.is_ascii_alphabetic())
            && code.chars().any(|c| c.is_ascii_digit())
            && code.chars().any(|c| PUNCTUATION.contains(c))
        {
            return code;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coza_domains_get_the_registry_code() {
        assert_eq!(gen_authinfo("example.co.za"), "coza");
    }

    #[test]
    fn other_domains_get_a_mixed_code() {
        let code = gen_authinfo("example.africa");
        assert_eq!(code.chars().count(), CODE_LEN);
        assert!(code.chars().any(|c| c.is_ascii_alphabetic()));
        assert!(code.chars().any(|c| c.is_ascii_digit()));
        assert!(code.chars().any(|c| PUNCTUATION.contains(c)));
    }
}
