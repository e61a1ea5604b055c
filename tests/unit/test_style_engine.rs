//! Unit tests for style composition and lock-aware rendering

use quill::{is_locked, lock, render, tokenize, unlock, Error, Segment, Style, LOCK_END, LOCK_START};

#[cfg(test)]
mod style_engine_tests {
    use super::*;

    const RESET: &str = "\x1b[0m";

    #[test]
    fn test_literal_text_is_wrapped() {
        let out = render("deploy finished", &[Style::GREEN]);
        assert_eq!(out, format!("{}deploy finished{RESET}", Style::GREEN.code()));
    }

    #[test]
    fn test_multiple_styles_apply_in_order() {
        let out = render("x", &[Style::BOLD, Style::RED, Style::UNDERLINE]);
        assert_eq!(out, format!("\x1b[1m{}\x1b[4mx{RESET}", Style::RED.code()));
    }

    #[test]
    fn test_empty_input_short_circuits() {
        assert_eq!(render("", &[Style::RED]), "");
        assert_eq!(render("", &[]), "");
    }

    #[test]
    fn test_locked_text_is_never_restyled() {
        let locked = lock("DO NOT MODIFY");
        assert_eq!(render(&locked, &[Style::AMBER]), locked);
        assert_eq!(render(&locked, &[]), locked);
    }

    #[test]
    fn test_locked_text_inside_message() {
        let locked = lock("DO NOT MODIFY");
        let out = render(&format!("Message with {locked} inside"), &[Style::AMBER]);
        let amber_style = Style::AMBER;
        let amber = amber_style.code();
        assert_eq!(
            out,
            format!("{amber}Message with {RESET}{locked}{amber} inside{RESET}")
        );
    }

    #[test]
    fn test_escape_sequence_flanked_by_text() {
        let out = render("left\x1b[38;5;9mright", &[Style::ITALIC]);
        assert_eq!(
            out,
            format!("\x1b[3mleft{RESET}\x1b[38;5;9m\x1b[3mright{RESET}")
        );
    }

    #[test]
    fn test_non_sgr_sequences_pass_through() {
        let out = render("\x1b[2Kclear\x1b[1A", &[Style::BOLD]);
        assert_eq!(out, format!("\x1b[2K\x1b[1mclear{RESET}\x1b[1A"));
    }

    #[test]
    fn test_rerender_keeps_escape_sequences() {
        let once = render("a\x1b[4mb", &[Style::RED]);
        let twice = render(&once, &[]);
        let escapes = |s: &str| {
            tokenize(s)
                .into_iter()
                .filter(|seg| matches!(seg, Segment::Escape(_)))
                .map(|seg| seg.as_str().to_string())
                .collect::<Vec<_>>()
        };
        // Every escape of the first pass survives; the second pass only adds resets
        let first = escapes(&once);
        let second = escapes(&twice);
        assert!(first.iter().all(|e| second.contains(e)));
        assert!(twice.contains("a") && twice.contains("b"));
    }

    #[test]
    fn test_is_locked_is_coarse() {
        assert!(is_locked(&lock("")));
        assert!(is_locked(&format!("{LOCK_END}x{LOCK_START}")));
        assert!(!is_locked(&format!("{LOCK_START} only")));
    }

    #[test]
    fn test_unlock_strips_markers() {
        let text = format!("a{}b{}", lock("c"), lock("d"));
        assert_eq!(unlock(&text), "acbd");
    }

    #[test]
    fn test_composition_is_associative() {
        let (a, b, c) = (Style::BOLD, Style::fg256(200), Style::BG_SKY);
        let left = a.and(&b).and(&c);
        let right = a.and(&b.and(&c));
        assert_eq!(left.code(), right.code());
        assert_eq!(left.code(), format!("{}{}{}", a.code(), b.code(), c.code()));
    }

    #[test]
    fn test_hex_matches_rgb() {
        assert_eq!(Style::fg_hex("#FF0000").unwrap(), Style::fg(255, 0, 0));
        assert_eq!(Style::bg_hex("0000ff").unwrap(), Style::bg(0, 0, 255));
    }

    #[test]
    fn test_invalid_hex_is_reported() {
        match Style::fg_hex("invalid") {
            Err(Error::InvalidColor { input, .. }) => assert_eq!(input, "invalid"),
            other => panic!("expected InvalidColor, got {:?}", other),
        }
    }

    #[test]
    fn test_apply_matches_render() {
        assert_eq!(Style::PINK.apply("hi"), render("hi", &[Style::PINK]));
    }
}
