//! Byte offset to line/column conversion for diagnostic rendering.

#[derive(Debug, Clone)]
pub struct LineMap {
    line_starts: Vec<u32>,
}

impl LineMap {
    pub fn build(source: &str) -> Self {
        let mut line_starts = vec![0u32];
        for (i, ch) in source.char_indices() {
            if ch == '\n' {
                line_starts.push(to_u32(i + 1));
            } else if ch == '\r' && source.as_bytes().get(i + 1) != Some(&b'\n') {
                line_starts.push(to_u32(i + 1));
            }
        }
        LineMap { line_starts }
    }

    /// Zero-based `(line, column)`; the column counts chars.
    pub fn position(&self, offset: u32, source: &str) -> (u32, u32) {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert_point) => insert_point.saturating_sub(1),
        };
        let line_start = self.line_starts.get(line).copied().unwrap_or(0);
        let clamped_end = (offset as usize).min(source.len());
        let start = (line_start as usize).min(clamped_end);
        let column = source.get(start..clamped_end).unwrap_or("").chars().count();
        (to_u32(line), to_u32(column))
    }
}

fn to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
