//! LIKE / ILIKE 模式构造

/// 转义 LIKE 元字符（`\`、`%`、`_`），使输入按字面匹配
pub fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// 构造子串匹配模式 `%input%`
pub fn contains_pattern(input: &str) -> String {
    format!("%{}%", escape_like(input))
}
