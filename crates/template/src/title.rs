/// Most lines a title stack can hold.
pub const MAX_TITLE_LINES: usize = 6;

/// Lays title words out as stacked lines.
///
/// Up to six words get a line each. Longer titles pair a short word (three
/// characters or fewer) with a preceding single short word (four or fewer),
/// so "OF" or "THE" does not sit on a line alone; anything past six lines is
/// dropped.
///
/// ```rust
/// use template::layout_title_lines;
///
/// let words = ["Building", "Trust"].map(String::from);
/// assert_eq!(layout_title_lines(&words), vec!["Building", "Trust"]);
///
/// let words = ["The", "Art", "of", "the", "Modern", "Salon", "Chair"].map(String::from);
/// assert_eq!(
///     layout_title_lines(&words),
///     vec!["The Art", "of the", "Modern", "Salon", "Chair"]
/// );
/// ```
pub fn layout_title_lines(words: &[String]) -> Vec<String> {
    if words.len() <= MAX_TITLE_LINES {
        return words.to_vec();
    }

    let mut lines: Vec<String> = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for word in words {
        let joins_current = word.chars().count() <= 3
            && current.len() == 1
            && current[0].chars().count() <= 4;
        if joins_current {
            current.push(word.as_str());
        } else {
            if !current.is_empty() {
                lines.push(current.join(" "));
            }
            current = vec![word.as_str()];
        }
    }
    if !current.is_empty() {
        lines.push(current.join(" "));
    }
    lines.truncate(MAX_TITLE_LINES);
    lines
}
