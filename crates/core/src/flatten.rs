use crate::normalize::normalize_property;
use crate::types::{join_declarations, Declaration, Rule, StyleNode, StyleTree};
use std::collections::VecDeque;

const MEDIA: &str = "@media";

/// 待处理的样式块
///
/// 选择器和 at-rule 条件分开保存，选择器本身可以包含 `@`。
struct Pending<'a> {
    selector: String,
    /// 由外到内的 at-rule 文本，如 `@media (max-width: 100px)`
    at_rules: Vec<String>,
    tree: &'a StyleTree,
}

/// 将嵌套样式树展开为扁平规则列表
///
/// 广度优先：遍历过程中发现的嵌套块追加到队尾，在同一轮中按发现顺序处理。
///
/// - 嵌套选择器直接拼接到父选择器后（不自动插入空格）
/// - `@media` 块包裹父选择器，嵌套在其中的选择器仍然拼接到父选择器后；
///   `@media` 中再嵌套 `@media` 时按原样输出为嵌套的 at-rule 块
/// - 其他 at-rule 被丢弃
/// - 没有任何声明的块不产出规则
///
/// # 示例
///
/// ```
/// use flcss_core::{flatten, StyleTree};
///
/// let tree = StyleTree::new()
///     .value("color", "red")
///     .nested("@media (max-width: 100px)", StyleTree::new().value("color", "blue"));
///
/// let rules = flatten(".x", &tree);
/// assert_eq!(rules[0].to_css(), ".x { color: red; }");
/// assert_eq!(rules[1].to_css(), "@media (max-width: 100px) { .x { color: blue; } }");
/// ```
pub fn flatten(root_selector: &str, tree: &StyleTree) -> Vec<Rule> {
    let mut queue = VecDeque::new();
    queue.push_back(Pending {
        selector: root_selector.to_string(),
        at_rules: Vec::new(),
        tree,
    });

    let mut rules = Vec::new();

    while let Some(pending) = queue.pop_front() {
        let mut declarations = Vec::new();

        for (key, node) in pending.tree.iter() {
            match node {
                StyleNode::Value(value) => {
                    declarations.push(Declaration::new(normalize_property(key), value.to_string()));
                }
                StyleNode::Nested(nested) => {
                    if let Some(next) = descend(&pending, key, nested) {
                        queue.push_back(next);
                    }
                }
            }
        }

        if declarations.is_empty() {
            continue;
        }

        let rule = emit(&pending, declarations);
        tracing::trace!(selector = %rule.selector, "emit rule");
        rules.push(rule);
    }

    rules
}

/// 计算嵌套块的选择器与 at-rule
fn descend<'a>(parent: &Pending<'a>, key: &str, tree: &'a StyleTree) -> Option<Pending<'a>> {
    if key.starts_with('@') {
        if !key.starts_with(MEDIA) {
            tracing::debug!(at_rule = key, selector = %parent.selector, "dropping unsupported at-rule");
            return None;
        }

        let mut at_rules = parent.at_rules.clone();
        at_rules.push(key.to_string());

        return Some(Pending {
            selector: parent.selector.clone(),
            at_rules,
            tree,
        });
    }

    Some(Pending {
        selector: format!("{}{}", parent.selector, key),
        at_rules: parent.at_rules.clone(),
        tree,
    })
}

fn emit(pending: &Pending<'_>, declarations: Vec<Declaration>) -> Rule {
    let block = join_declarations(&declarations);

    let Some((outermost, inner)) = pending.at_rules.split_first() else {
        return Rule {
            selector: pending.selector.clone(),
            block,
            declarations,
        };
    };

    // 从内向外包裹：`.x { .. }` → `@media B { .x { .. } }`
    let block = inner.iter().rev().fold(
        format!("{} {{ {} }}", pending.selector, block),
        |wrapped, at_rule| format!("{} {{ {} }}", at_rule, wrapped),
    );

    Rule {
        selector: outermost.clone(),
        block,
        declarations,
    }
}
