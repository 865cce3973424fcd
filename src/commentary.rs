//! Verdict line shown under the final score.

/// Canned result lines keyed by score. Scores above the table share the top line.
const LINES: [(i32, &str); 6] = [
    (0, "菜，就多練"),
    (1, "路邊的野狗會拿筆考得都比你好"),
    (2, "用臉在鍵盤上滾一圈才會考這麼爛"),
    (3, "一坨答辯"),
    (4, "just so so"),
    (5, TOP),
];

const TOP: &str = "你牛逼";
const FALLBACK: &str = "別灰心，再試一次吧！";

/// Result screen comment for `score`. The table is absolute, so `total` does
/// not rescale it.
pub fn commentary(score: i32, _total: i32) -> &'static str {
    if let Some((_, line)) = LINES.iter().find(|(key, _)| *key == score) {
        return line;
    }
    if score > 5 {
        TOP
    } else {
        FALLBACK
    }
}
