use crate::config::LayoutConfig;
use crate::text_metrics;

#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub lines: Vec<String>,
    pub width: f32,
    pub height: f32,
}

pub(crate) fn measure_label(text: &str, config: &LayoutConfig) -> TextBlock {
    let font_size = config.label_font_size;
    let font_family = config.label_font_family.as_str();
    let mut lines = split_lines(text);
    if lines.is_empty() {
        lines.push(String::new());
    }

    let max_len = lines.iter().map(|l| l.chars().count()).max().unwrap_or(1);
    let max_width = lines
        .iter()
        .map(|line| text_width(line, font_size, font_family, config.fast_text_metrics))
        .fold(0.0, f32::max);
    let guard_width = max_len as f32 * font_size * 0.56;
    let width = max_width.max(guard_width);
    let height = lines.len() as f32 * font_size * config.label_line_height;

    TextBlock {
        lines,
        width,
        height,
    }
}

pub(super) fn split_lines(text: &str) -> Vec<String> {
    let normalized = text
        .replace("<br/>", "\n")
        .replace("<br>", "\n")
        .replace("\\n", "\n");
    normalized
        .split('\n')
        .map(|line| line.trim().to_string())
        .collect()
}

pub(super) fn text_width(text: &str, font_size: f32, font_family: &str, fast_metrics: bool) -> f32 {
    if fast_metrics && text.is_ascii() {
        return fallback_text_width(text, font_size);
    }
    text_metrics::measure_text_width(text, font_size, font_family)
        .unwrap_or_else(|| fallback_text_width(text, font_size))
}

fn fallback_text_width(text: &str, font_size: f32) -> f32 {
    text.chars().map(char_width_factor).sum::<f32>() * font_size
}

pub(super) fn char_width_factor(ch: char) -> f32 {
    // Per-character widths of the default sans-serif stack at 1px.
    match ch {
        ' ' => 0.306,
        '\\' | '.' | ',' | ':' | ';' | '|' | '!' | '(' | ')' | '[' | ']' | '{' | '}' => 0.321,
        'I' | 'i' | 'j' | 'l' => 0.25,
        'f' | 't' | 'r' => 0.34,
        'M' | 'W' | 'm' | 'w' => 0.88,
        '@' | '#' | '%' | '&' => 0.946,
        'A'..='Z' => 0.66,
        'a'..='z' => 0.56,
        '0'..='9' => 0.59,
        ch if ch.is_ascii() => 0.568,
        // CJK and other wide glyphs.
        _ => 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_config() -> LayoutConfig {
        LayoutConfig {
            fast_text_metrics: true,
            ..LayoutConfig::default()
        }
    }

    #[test]
    fn split_lines_handles_br_tags() {
        assert_eq!(split_lines("a<br/>b"), vec!["a", "b"]);
        assert_eq!(split_lines("a<br>b"), vec!["a", "b"]);
        assert_eq!(split_lines("a\\nb"), vec!["a", "b"]);
    }

    #[test]
    fn split_lines_trims_whitespace() {
        assert_eq!(split_lines("  hello  \n  world  "), vec!["hello", "world"]);
    }

    #[test]
    fn char_width_factor_returns_positive_values() {
        for ch in ['a', 'Z', ' ', '0', '@', '\u{4e2d}'] {
            assert!(char_width_factor(ch) > 0.0, "char {:?} has zero width", ch);
        }
    }

    #[test]
    fn fallback_text_width_scales_with_font_size() {
        let w16 = fallback_text_width("Hello", 16.0);
        let w32 = fallback_text_width("Hello", 32.0);
        assert!((w32 - w16 * 2.0).abs() < 0.01, "width should double with font size");
    }

    #[test]
    fn multi_line_label_stacks_height() {
        let config = fast_config();
        let one = measure_label("Alice", &config);
        let two = measure_label("Alice<br>Bob", &config);
        assert_eq!(two.lines.len(), 2);
        assert!((two.height - one.height * 2.0).abs() < 0.01);
    }

    #[test]
    fn longer_labels_are_wider() {
        let config = fast_config();
        let short = measure_label("ok", &config);
        let long = measure_label("a much longer label", &config);
        assert!(long.width > short.width);
    }
}
