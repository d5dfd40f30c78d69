use crate::error::{Error, Result};
use crate::flatten::flatten;
use crate::merge::resolve_extend;
use crate::naming::{create_id_generator, is_valid_identifier, IdGenerator};
use crate::types::{CompileOptions, NamingMode, StyleSheetBundle, StyleSheetMap};
use indexmap::IndexMap;

/// 样式编译器
///
/// 持有类名前缀和 token 生成策略，本身不保存任何编译状态。
pub struct Compiler {
    pub(crate) prefix: String,
    pub(crate) ids: Box<dyn IdGenerator>,
}

impl Compiler {
    pub fn new() -> Self {
        Self {
            prefix: CompileOptions::default().prefix,
            ids: create_id_generator(NamingMode::Random),
        }
    }

    /// 按选项创建编译器；前缀不合法时返回 `InvalidIdentifier`
    pub fn with_options(options: CompileOptions) -> Result<Self> {
        Ok(Self::new()
            .with_prefix(options.prefix)?
            .with_naming_mode(options.naming_mode))
    }

    /// 设置类名前缀（builder 模式）
    ///
    /// 前缀和逻辑样式名一样必须能作为类名的一部分。
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Result<Self> {
        let prefix = prefix.into();
        if !is_valid_identifier(&prefix) {
            return Err(Error::InvalidIdentifier { name: prefix });
        }

        self.prefix = prefix;
        Ok(self)
    }

    /// 设置命名策略（builder 模式）
    pub fn with_naming_mode(mut self, mode: NamingMode) -> Self {
        self.ids = create_id_generator(mode);
        self
    }

    /// 注入自定义 token 生成策略（builder 模式）
    pub fn with_id_generator(mut self, ids: Box<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// 编译样式表
    ///
    /// 按输入顺序处理每个逻辑样式：校验名字 → 解析 `extend` → 生成类名 →
    /// 展开规则。任何错误都会中止整个调用。
    ///
    /// # 示例
    ///
    /// ```
    /// use flcss_core::{Compiler, NamingMode, StyleSheetMap, StyleTree};
    ///
    /// let styles = StyleSheetMap::new().style(
    ///     "button",
    ///     StyleTree::new()
    ///         .value("color", "red")
    ///         .nested(":hover", StyleTree::new().value("color", "blue")),
    /// );
    ///
    /// let compiler = Compiler::new().with_naming_mode(NamingMode::Sequential);
    /// let result = compiler.compile_style_sheet(&styles).unwrap();
    ///
    /// assert_eq!(result.names["button"], "flcss-button-0");
    /// assert_eq!(
    ///     result.bundle,
    ///     ".flcss-button-0 { color: red; }\n.flcss-button-0:hover { color: blue; }"
    /// );
    /// ```
    pub fn compile_style_sheet(&self, styles: &StyleSheetMap) -> Result<StyleSheetBundle> {
        let mut names = IndexMap::new();
        let mut lines = Vec::new();

        for (name, tree) in styles.iter() {
            if !is_valid_identifier(name) {
                return Err(Error::InvalidIdentifier { name: name.clone() });
            }

            let resolved = resolve_extend(name, tree, styles)?;

            let seed = if self.ids.needs_seed() {
                format!("{}:{}", name, serde_json::to_string(&*resolved)?)
            } else {
                String::new()
            };
            let class_name = format!("{}-{}-{}", self.prefix, name, self.ids.generate(&seed));
            tracing::debug!(style = %name, class = %class_name, "compile style");

            let rules = flatten(&format!(".{}", class_name), &resolved);
            lines.extend(rules.iter().map(|rule| rule.to_css()));

            names.insert(name.clone(), class_name);
        }

        Ok(StyleSheetBundle {
            names,
            bundle: lines.join("\n"),
        })
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}

/// 使用默认配置编译样式表
pub fn compile_style_sheet(styles: &StyleSheetMap) -> Result<StyleSheetBundle> {
    Compiler::default().compile_style_sheet(styles)
}
