use serde_json::Value;

// scanner state: either outside any object, or inside one that
// opened at byte offset `start` and is `depth` braces deep
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Outside,
    Inside { start: usize, depth: usize }
}

/// Returns the last top-level `{ ... }` block in `text` that parses as JSON.
///
/// Model output often wraps the object in prose or markdown fences, so every
/// balanced top-level block is tried and the last valid one wins. Nested
/// braces belong to their enclosing block. Blocks that fail to parse are
/// skipped, and a trailing `{` that never closes yields nothing.
pub fn extract_last_json_object(text: &str) -> Option<Value> {

    let mut state = ScanState::Outside;
    let mut last = None;

    for (index, ch) in text.char_indices() {

        state = match (state, ch) {
            (ScanState::Outside, '{') => ScanState::Inside { start: index, depth: 1 },
            (ScanState::Inside { start, depth }, '{') => ScanState::Inside { start, depth: depth + 1 },
            (ScanState::Inside { start, depth: 1 }, '}') => {
                // '}' is one byte, so the slice is inclusive of it
                if let Ok(value) = serde_json::from_str::<Value>(&text[start..=index]) {
                    last = Some(value);
                }
                ScanState::Outside
            }
            (ScanState::Inside { start, depth }, '}') => ScanState::Inside { start, depth: depth - 1 },
            // stray '}' with nothing open
            (state, _) => state
        };

    }

    last

}
