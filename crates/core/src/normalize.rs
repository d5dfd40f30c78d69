/// 规范化 CSS 属性名
///
/// 1. 首字母大写视为厂商前缀：`MozAppearance` → `-mozAppearance`
/// 2. 驼峰转连字符：`-mozAppearance` → `-moz-appearance`
///
/// 已经是小写连字符形式的属性名（包括 `--custom` 变量）原样返回。
pub fn normalize_property(property: &str) -> String {
    let mut out = String::with_capacity(property.len() + 4);
    let mut chars = property.chars();

    if let Some(first) = chars.next() {
        if first.is_uppercase() {
            out.push('-');
            out.extend(first.to_lowercase());
        } else {
            out.push(first);
        }
    }

    for c in chars {
        if c.is_uppercase() {
            out.push('-');
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }

    out
}
