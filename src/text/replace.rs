use log::debug;

use crate::models::WordReplacement;

/// Applies the replacement rules to `text` in order.
///
/// Each active rule replaces every literal occurrence of `from` with `to`. Rules are
/// cumulative: a later rule sees the output of the earlier ones. `from` is matched as
/// a plain substring, so characters such as `.` or `*` have no special meaning.
pub fn apply_replacements(text: &str, rules: &[WordReplacement]) -> String {
    let mut out = text.to_string();
    for rule in rules.iter().filter(|r| r.is_active()) {
        if out.contains(&rule.from) {
            debug!("Replacing {:?} with {:?}", rule.from, rule.to);
            out = out.replace(&rule.from, &rule.to);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(from: &str, to: &str) -> WordReplacement {
        WordReplacement::new(from, to)
    }

    #[test]
    fn replaces_every_occurrence() {
        let out = apply_replacements("cat and cat", &[rule("cat", "dog")]);
        assert_eq!(out, "dog and dog");
    }

    #[test]
    fn later_rules_see_earlier_output() {
        let rules = [rule("A", "B"), rule("B", "C")];
        assert_eq!(apply_replacements("A B", &rules), "C C");
    }

    #[test]
    fn inactive_rules_are_skipped() {
        let rules = [rule("", "x"), rule("a", "")];
        assert_eq!(apply_replacements("abc", &rules), "abc");
    }

    #[test]
    fn pattern_characters_are_literal() {
        let rules = [rule("a.c", "X"), rule("(*)", "Y")];
        assert_eq!(apply_replacements("abc a.c (*)", &rules), "abc X Y");
    }

    #[test]
    fn identity_rules_do_not_change_output() {
        let rules = [rule("Alice", "Bob"), rule("said", "whispered")];
        let once = apply_replacements("Alice said \"hi\".", &rules);
        let noop = [rule("Bob", "Bob"), rule("whispered", "whispered")];
        assert_eq!(apply_replacements(&once, &noop), once);
    }
}
