use crate::error::{Error, Result};
use crate::types::{DeclarationValue, StyleNode, StyleSheetMap, StyleTree};
use std::borrow::Cow;

pub const EXTEND_KEY: &str = "extend";

/// 读取样式树的 `extend` 目标（只认字符串值）
fn extend_target(tree: &StyleTree) -> Option<&str> {
    match tree.get(EXTEND_KEY) {
        Some(StyleNode::Value(DeclarationValue::Str(target))) => Some(target),
        _ => None,
    }
}

/// 合并样式树
///
/// 功能：
/// - 后者覆盖前者（相同键保留首次出现的位置）
/// - 两边的字符串 `extend` 都不会出现在结果中
pub fn merge_trees(base: &StyleTree, own: &StyleTree) -> StyleTree {
    let mut merged = StyleTree::new();

    for (key, node) in base.iter().chain(own.iter()) {
        if is_extend_entry(key, node) {
            continue;
        }
        merged.insert(key.clone(), node.clone());
    }

    merged
}

fn is_extend_entry(key: &str, node: &StyleNode) -> bool {
    key == EXTEND_KEY && matches!(node, StyleNode::Value(DeclarationValue::Str(_)))
}

/// 解析 `extend` 继承
///
/// 不修改输入；没有 `extend` 时直接借用原树。只展开一层：被引用样式自身的
/// `extend` 会被去掉，不会继续追溯。
pub fn resolve_extend<'a>(
    name: &str,
    tree: &'a StyleTree,
    styles: &StyleSheetMap,
) -> Result<Cow<'a, StyleTree>> {
    let Some(target) = extend_target(tree) else {
        return Ok(Cow::Borrowed(tree));
    };

    let base = styles.get(target).ok_or_else(|| Error::UnresolvedExtend {
        name: name.to_string(),
        target: target.to_string(),
    })?;

    tracing::debug!(style = name, extends = target, "resolve extend");

    Ok(Cow::Owned(merge_trees(base, tree)))
}
