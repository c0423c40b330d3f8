//! Setting labels
//!
//! Host display strings carry inline color markup: `&X` / `^X` switch
//! foreground / background color, `&&` and `^^` are literal characters,
//! and `{{shader|text}}` wraps text in a named shader.

/// Characters of the entry name kept in a label
pub const LABEL_NAME_WIDTH: usize = 28;

/// Color code placed between the entry name and the category
pub const CATEGORY_COLOR: &str = "&K";

/// Remove color markup, keeping only the visible text
#[must_use]
pub fn strip_formatting(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '&' | '^' => match chars.next() {
                Some(next) if next == c => out.push(c),
                Some(_) => {}
                None => out.push(c),
            },
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                // shader name runs up to the pipe
                for skipped in chars.by_ref() {
                    if skipped == '|' {
                        break;
                    }
                }
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
            }
            _ => out.push(c),
        }
    }
    out
}

/// Category name as shown next to each of its settings ("Physical Mutation")
#[must_use]
pub fn category_label(display_name: &str) -> String {
    strip_formatting(display_name).trim_end_matches('s').to_string()
}

/// Fixed-width label for an entry's cost setting
#[must_use]
pub fn setting_label(entry_name: &str, category_display_name: &str) -> String {
    let name: String = entry_name.chars().take(LABEL_NAME_WIDTH).collect();
    format!(
        "{name:<width$}{CATEGORY_COLOR}{}",
        category_label(category_display_name),
        width = LABEL_NAME_WIDTH + 1
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_color_codes() {
        assert_eq!(strip_formatting("&CMental &yMutations"), "Mental Mutations");
        assert_eq!(strip_formatting("^rred&&white^^"), "red&white^");
        assert_eq!(strip_formatting("trailing&"), "trailing&");
    }

    #[test]
    fn strips_shader_markup() {
        assert_eq!(
            strip_formatting("{{G|Physical Mutations}}"),
            "Physical Mutations"
        );
        assert_eq!(strip_formatting("plain {braces}"), "plain {braces}");
    }

    #[test]
    fn category_label_trims_plural() {
        assert_eq!(category_label("{{G|Physical Mutations}}"), "Physical Mutation");
        assert_eq!(category_label("Defects"), "Defect");
    }

    #[test]
    fn setting_label_is_fixed_width() {
        let label = setting_label("Carapace", "Physical Mutations");
        assert_eq!(label, format!("{:<29}&KPhysical Mutation", "Carapace"));

        let long = setting_label("An Extraordinarily Long Mutation Name", "Mental");
        let (name, category) = long.split_at(29);
        assert_eq!(name.chars().count(), 29);
        assert!(name.ends_with(' '));
        assert_eq!(category, "&KMental");
    }
}
