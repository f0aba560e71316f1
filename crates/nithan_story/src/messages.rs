//! User-facing status text (Thai).

use nithan_core::StoryMode;

/// Shown when a generation fails.
pub const STATUS_ERROR: &str = "เกิดข้อผิดพลาด โปรดลองใหม่อีกครั้ง";

/// Shown when a generation completes.
pub const STATUS_DONE: &str = "เสร็จเรียบร้อย!";

const PREVIEW_CHARS: usize = 20;

/// Status while the script is being written.
pub fn script_status(mode: StoryMode) -> &'static str {
    if mode.is_long() {
        "กำลังแต่งนิยายเรื่องยาว..."
    } else {
        "กำลังแต่งนิทาน..."
    }
}

/// Status once the script is back and media generation begins.
pub fn script_ready_status(title: &str) -> String {
    format!("ได้โครงเรื่องแล้ว: \"{}\" กำลังวาดภาพและอัดเสียง...", title)
}

/// Status while scene `index` (1-based) of `total` is generated.
pub fn scene_status(index: usize, total: usize, preview: &str) -> String {
    format!("กำลังสร้างฉากที่ {}/{}: \"{}...\"", index, total, preview)
}

/// First characters of a scene's narration, for status lines.
///
/// Counts characters, not bytes, so Thai text is never split mid-character.
///
/// ```
/// use nithan_story::messages::preview;
///
/// assert_eq!(preview("กาลครั้งหนึ่งนานมาแล้วมีกระต่ายน้อย"), "กาลครั้งหนึ่งนานมาแล");
/// assert_eq!(preview("short"), "short");
/// ```
pub fn preview(text: &str) -> String {
    text.chars().take(PREVIEW_CHARS).collect()
}
