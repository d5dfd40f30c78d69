use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// CSS 声明值：只接受字符串或数字
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DeclarationValue {
    Str(String),
    Number(f64),
}

impl fmt::Display for DeclarationValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeclarationValue::Str(s) => f.write_str(s),
            DeclarationValue::Number(n) => f.write_str(&format_number(*n)),
        }
    }
}

/// 按 JS `Number.prototype.toString` 的规则格式化数字
///
/// - `-0` → `0`
/// - 绝对值 `>= 1e21` 或 `< 1e-6` 时使用指数形式（`1e+21`、`1e-7`）
/// - 其余情况 f64 的 Display 已经与 JS 一致（`1.0` → `1`）
fn format_number(n: f64) -> String {
    if n == 0.0 {
        return "0".to_string();
    }
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let abs = n.abs();
    if !(1e-6..1e21).contains(&abs) {
        let exp = format!("{:e}", n);
        return match exp.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => {
                format!("{}e+{}", mantissa, power)
            }
            _ => exp,
        };
    }

    n.to_string()
}

impl From<&str> for DeclarationValue {
    fn from(value: &str) -> Self {
        DeclarationValue::Str(value.to_string())
    }
}

impl From<String> for DeclarationValue {
    fn from(value: String) -> Self {
        DeclarationValue::Str(value)
    }
}

impl From<f64> for DeclarationValue {
    fn from(value: f64) -> Self {
        DeclarationValue::Number(value)
    }
}

impl From<i32> for DeclarationValue {
    fn from(value: i32) -> Self {
        DeclarationValue::Number(value.into())
    }
}

impl From<u32> for DeclarationValue {
    fn from(value: u32) -> Self {
        DeclarationValue::Number(value.into())
    }
}

/// 样式树节点：要么是声明值，要么是嵌套的样式树（嵌套选择器或 at-rule）
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StyleNode {
    Value(DeclarationValue),
    Nested(StyleTree),
}

impl From<DeclarationValue> for StyleNode {
    fn from(value: DeclarationValue) -> Self {
        StyleNode::Value(value)
    }
}

macro_rules! impl_value_node {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for StyleNode {
                fn from(value: $ty) -> Self {
                    StyleNode::Value(value.into())
                }
            }
        )*
    };
}

impl_value_node!(&str, String, f64, i32, u32);

impl From<StyleTree> for StyleNode {
    fn from(tree: StyleTree) -> Self {
        StyleNode::Nested(tree)
    }
}

/// 嵌套样式树
///
/// 键可以是属性名（值为 [`DeclarationValue`]），也可以是选择器片段或
/// `@media` 条件（值为嵌套的 [`StyleTree`]）。使用 IndexMap 保持插入顺序，
/// CSS 层叠依赖声明顺序。
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct StyleTree {
    entries: IndexMap<String, StyleNode>,
}

impl StyleTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加声明（builder 模式）
    pub fn value(mut self, key: impl Into<String>, value: impl Into<DeclarationValue>) -> Self {
        self.insert(key, StyleNode::Value(value.into()));
        self
    }

    /// 添加嵌套样式树（builder 模式）
    pub fn nested(mut self, key: impl Into<String>, tree: StyleTree) -> Self {
        self.insert(key, StyleNode::Nested(tree));
        self
    }

    /// 插入节点；键已存在时覆盖值但保留原位置
    pub fn insert(&mut self, key: impl Into<String>, node: impl Into<StyleNode>) -> Option<StyleNode> {
        self.entries.insert(key.into(), node.into())
    }

    pub fn get(&self, key: &str) -> Option<&StyleNode> {
        self.entries.get(key)
    }

    /// 删除节点并保持其余键的顺序
    pub fn remove(&mut self, key: &str) -> Option<StyleNode> {
        self.entries.shift_remove(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &StyleNode)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<StyleNode>> FromIterator<(K, V)> for StyleTree {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// 逻辑样式名 → 样式树
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct StyleSheetMap {
    styles: IndexMap<String, StyleTree>,
}

impl StyleSheetMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加样式（builder 模式）
    pub fn style(mut self, name: impl Into<String>, tree: StyleTree) -> Self {
        self.insert(name, tree);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, tree: StyleTree) -> Option<StyleTree> {
        self.styles.insert(name.into(), tree)
    }

    pub fn get(&self, name: &str) -> Option<&StyleTree> {
        self.styles.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &StyleTree)> {
        self.styles.iter()
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, StyleTree)> for StyleSheetMap {
    fn from_iter<I: IntoIterator<Item = (K, StyleTree)>>(iter: I) -> Self {
        Self {
            styles: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// CSS 声明
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Declaration {
    /// CSS 属性名（如 "padding"）
    pub property: String,
    /// CSS 属性值（如 "1rem"）
    pub value: String,
}

impl Declaration {
    pub fn new(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.property, self.value)
    }
}

/// 连接声明：`a: 1; b: 2;`
pub fn join_declarations(declarations: &[Declaration]) -> String {
    let joined = declarations
        .iter()
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join("; ");

    format!("{};", joined)
}

/// 扁平化后的 CSS 规则
///
/// 普通规则的 `block` 是声明文本；`@media` 规则的 `selector` 是 at-rule 条件，
/// `block` 是被包裹的完整规则（`.x { color: blue; }`）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rule {
    pub selector: String,
    pub block: String,
    pub declarations: Vec<Declaration>,
}

impl Rule {
    /// 渲染为 `<selector> { <block> }`
    pub fn to_css(&self) -> String {
        format!("{} {{ {} }}", self.selector, self.block)
    }
}

/// 样式表编译结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleSheetBundle {
    /// 逻辑样式名 → 生成的类名
    pub names: IndexMap<String, String>,
    /// CSS 文本，每条规则一行
    pub bundle: String,
}

/// 动画编译结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnimationBundle {
    /// 动画名；指定了任一时间参数时为完整的 `animation` 简写值
    pub name: String,
    /// `@keyframes` 文本（单行）
    pub bundle: String,
}

/// 命名策略
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NamingMode {
    /// 随机 token（默认）
    #[default]
    Random,
    /// 基于内容 hash，跨进程稳定
    Hash,
    /// 自增序号，用于测试
    Sequential,
}

/// 编译选项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompileOptions {
    /// 类名前缀（默认 "flcss"）
    pub prefix: String,
    /// 类名生成策略（默认 Random）
    pub naming_mode: NamingMode,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            prefix: "flcss".to_string(),
            naming_mode: NamingMode::Random,
        }
    }
}
