//! ASCII die faces for the terminal.
//!
//! A face is five lines, ten columns wide:
//!
//! ```text
//!   -------
//!  | ·   · |
//!  |   ·   |
//!  | ·   · |
//!   -------
//! ```

/// Middle dot, U+00B7.
pub const DEFAULT_DOT: char = '\u{b7}';

/// Lines in a rendered face.
pub const FACE_HEIGHT: usize = 5;

/// Columns in a rendered face.
pub const FACE_WIDTH: usize = 10;

const EDGE: &str = "  ------- ";

/// The three rows of dots for `value`, with `x` marking each dot.
pub fn side(value: u8) -> Option<[&'static str; 3]> {
    let rows = match value {
        1 => ["     ", "  x  ", "     "],
        2 => ["x    ", "     ", "    x"],
        3 => ["x    ", "  x  ", "    x"],
        4 => ["x   x", "     ", "x   x"],
        5 => ["x   x", "  x  ", "x   x"],
        6 => ["x   x", "x   x", "x   x"],
        _ => return None,
    };
    Some(rows)
}

/// Render one face, drawing each dot with `dot`. `None` outside 1..=6.
pub fn face(value: u8, dot: char) -> Option<String> {
    let rows = side(value)?;
    let mut lines = Vec::with_capacity(FACE_HEIGHT);
    lines.push(EDGE.to_string());
    lines.extend(rows.iter().map(|row| format!(" | {} |", row.replace('x', &dot.to_string()))));
    lines.push(EDGE.to_string());
    Some(lines.join("\n"))
}

/// A face-sized block of spaces, used to clear a die slot.
pub fn blank() -> String {
    vec![" ".repeat(FACE_WIDTH); FACE_HEIGHT].join("\n")
}

/// Put renderings side by side, appending `sep` after each one on every line.
///
/// The line count follows the first rendering; the others are expected to match.
pub fn join<S: AsRef<str>>(faces: &[S], sep: &str) -> String {
    let split: Vec<Vec<&str>> = faces.iter().map(|f| f.as_ref().split('\n').collect()).collect();
    let height = split.first().map_or(0, Vec::len);
    let mut lines = vec![String::new(); height];
    for face in &split {
        for (line, text) in lines.iter_mut().zip(face) {
            line.push_str(text);
            line.push_str(sep);
        }
    }
    lines.join("\n")
}
