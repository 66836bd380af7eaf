//! PDF 版面还原
//!
//! 根据文本片段的纵坐标重建换行，输出规范化文本
//!
//! 已知限制：假定提取器按阅读顺序给出片段，多栏版面的输出顺序会退化

/// 默认换行阈值（提取器坐标单位）
pub const DEFAULT_LINE_THRESHOLD: f32 = 5.0;

/// 页间分隔（空行）
const PAGE_SEPARATOR: &str = "\n\n";

/// 单个文本片段
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    /// 纵坐标
    pub y: f32,
}

impl TextRun {
    pub fn new(text: impl Into<String>, y: f32) -> Self {
        Self {
            text: text.into(),
            y,
        }
    }
}

/// 单页的有序文本片段
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageText {
    pub runs: Vec<TextRun>,
}

impl PageText {
    pub fn new(runs: Vec<TextRun>) -> Self {
        Self { runs }
    }
}

/// 还原单页文本
///
/// 规则:
/// 1. 纯空白片段直接跳过（既不输出，也不更新 last_y）
/// 2. 与上一片段纵坐标差超过阈值时先输出换行
/// 3. 同一行内的相邻片段以单个空格连接
fn layout_page(page: &PageText, threshold: f32) -> String {
    let mut out = String::new();
    let mut last_y: Option<f32> = None;

    for run in &page.runs {
        if run.text.trim().is_empty() {
            continue;
        }

        match last_y {
            Some(y) if (y - run.y).abs() > threshold => out.push('\n'),
            Some(_) => {
                let needs_space = !out.ends_with(char::is_whitespace)
                    && !run.text.starts_with(char::is_whitespace);
                if needs_space {
                    out.push(' ');
                }
            }
            None => {}
        }

        out.push_str(&run.text);
        last_y = Some(run.y);
    }

    out
}

/// 还原整份文档，页与页之间以空行分隔（最后一页之后不加）
pub fn layout_pages(pages: &[PageText], threshold: f32) -> String {
    pages
        .iter()
        .map(|page| layout_page(page, threshold))
        .collect::<Vec<_>>()
        .join(PAGE_SEPARATOR)
}
