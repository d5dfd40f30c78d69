use crate::bundle::Compiler;
use crate::normalize::normalize_property;
use crate::types::{join_declarations, AnimationBundle, Declaration, DeclarationValue};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// 单个关键帧：属性名 → 值（不支持嵌套）
pub type Keyframe = IndexMap<String, DeclarationValue>;

/// 动画描述
///
/// 六个时间参数都是可选的，缺省值见 [`Compiler::compile_animation`]。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Animation {
    /// 关键帧选择器（`0%`、`from` 等）→ 声明
    #[serde(default)]
    pub keyframes: IndexMap<String, Keyframe>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<DeclarationValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timing_function: Option<DeclarationValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay: Option<DeclarationValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iteration_count: Option<DeclarationValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<DeclarationValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_mode: Option<DeclarationValue>,
}

impl Animation {
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加关键帧（builder 模式）
    pub fn keyframe<K, V>(
        mut self,
        selector: impl Into<String>,
        declarations: impl IntoIterator<Item = (K, V)>,
    ) -> Self
    where
        K: Into<String>,
        V: Into<DeclarationValue>,
    {
        let keyframe = declarations
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self.keyframes.insert(selector.into(), keyframe);
        self
    }

    pub fn duration(mut self, value: impl Into<DeclarationValue>) -> Self {
        self.duration = Some(value.into());
        self
    }

    pub fn timing_function(mut self, value: impl Into<DeclarationValue>) -> Self {
        self.timing_function = Some(value.into());
        self
    }

    pub fn delay(mut self, value: impl Into<DeclarationValue>) -> Self {
        self.delay = Some(value.into());
        self
    }

    pub fn iteration_count(mut self, value: impl Into<DeclarationValue>) -> Self {
        self.iteration_count = Some(value.into());
        self
    }

    pub fn direction(mut self, value: impl Into<DeclarationValue>) -> Self {
        self.direction = Some(value.into());
        self
    }

    pub fn fill_mode(mut self, value: impl Into<DeclarationValue>) -> Self {
        self.fill_mode = Some(value.into());
        self
    }

    /// 是否显式指定了任一时间参数
    pub fn has_timing(&self) -> bool {
        [
            &self.duration,
            &self.timing_function,
            &self.delay,
            &self.iteration_count,
            &self.direction,
            &self.fill_mode,
        ]
        .iter()
        .any(|v| v.is_some())
    }

    /// 拼接 `animation` 简写值（名字之后的部分）
    fn timing_shorthand(&self) -> String {
        [
            or_default(&self.duration, "0s"),
            or_default(&self.timing_function, "ease"),
            or_default(&self.delay, "0s"),
            or_default(&self.iteration_count, "1"),
            or_default(&self.direction, "normal"),
            or_default(&self.fill_mode, "none"),
        ]
        .join(" ")
    }
}

fn or_default(value: &Option<DeclarationValue>, default: &str) -> String {
    value
        .as_ref()
        .map_or_else(|| default.to_string(), |v| v.to_string())
}

fn keyframe_block(selector: &str, keyframe: &Keyframe) -> String {
    let declarations: Vec<Declaration> = keyframe
        .iter()
        .map(|(property, value)| Declaration::new(normalize_property(property), value.to_string()))
        .collect();

    format!("{} {{ {} }}", selector, join_declarations(&declarations))
}

impl Compiler {
    /// 编译动画为 `@keyframes` 块
    ///
    /// 缺省值：duration `0s`、timingFunction `ease`、delay `0s`、
    /// iterationCount `1`、direction `normal`、fillMode `none`。
    ///
    /// 没有指定任何时间参数时 `name` 只是生成的动画名；否则是完整的
    /// `animation` 简写值，可以直接作为 CSS 属性值使用。
    pub fn compile_animation(&self, animation: &Animation) -> AnimationBundle {
        let seed = if self.ids.needs_seed() {
            serde_json::to_string(animation).unwrap_or_default()
        } else {
            String::new()
        };
        let animation_name = format!("{}-animation-{}", self.prefix, self.ids.generate(&seed));
        tracing::debug!(animation = %animation_name, keyframes = animation.keyframes.len(), "compile animation");

        let blocks: Vec<String> = animation
            .keyframes
            .iter()
            .map(|(selector, keyframe)| keyframe_block(selector, keyframe))
            .collect();

        let bundle = format!("@keyframes {} {{ {} }}", animation_name, blocks.join(" "));

        let name = if animation.has_timing() {
            format!("{} {}", animation_name, animation.timing_shorthand())
        } else {
            animation_name
        };

        AnimationBundle { name, bundle }
    }
}

/// 使用默认配置编译动画
pub fn compile_animation(animation: &Animation) -> AnimationBundle {
    Compiler::default().compile_animation(animation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::SequentialIds;
    use crate::types::NamingMode;
    use pretty_assertions::assert_eq;

    fn sequential() -> Compiler {
        Compiler::new().with_id_generator(Box::new(SequentialIds::new()))
    }

    fn fade() -> Animation {
        Animation::new()
            .keyframe("from", [("opacity", 0)])
            .keyframe("to", [("opacity", 1)])
    }

    #[test]
    fn test_animation_bare_name() {
        let result = sequential().compile_animation(&fade());

        assert_eq!(result.name, "flcss-animation-0");
        assert_eq!(
            result.bundle,
            "@keyframes flcss-animation-0 { from { opacity: 0; } to { opacity: 1; } }"
        );
    }

    #[test]
    fn test_animation_shorthand_defaults() {
        let result = sequential().compile_animation(&fade().duration("1s"));

        assert_eq!(result.name, "flcss-animation-0 1s ease 0s 1 normal none");
    }

    #[test]
    fn test_animation_shorthand_all_params() {
        let animation = fade()
            .duration("2s")
            .timing_function("linear")
            .delay("100ms")
            .iteration_count("infinite")
            .direction("alternate")
            .fill_mode("forwards");

        let result = sequential().compile_animation(&animation);

        assert_eq!(
            result.name,
            "flcss-animation-0 2s linear 100ms infinite alternate forwards"
        );
    }

    #[test]
    fn test_animation_numeric_iteration_count() {
        let result = sequential().compile_animation(&fade().iteration_count(3));

        assert_eq!(result.name, "flcss-animation-0 0s ease 0s 3 normal none");
    }

    #[test]
    fn test_animation_normalizes_properties() {
        let animation = Animation::new().keyframe(
            "50%",
            [("backgroundColor", "red"), ("WebkitTransform", "scale(2)")],
        );

        let result = sequential().compile_animation(&animation);

        assert_eq!(
            result.bundle,
            "@keyframes flcss-animation-0 { 50% { background-color: red; -webkit-transform: scale(2); } }"
        );
    }

    #[test]
    fn test_animation_empty_keyframe() {
        let animation = Animation::new().keyframe("from", Vec::<(&str, &str)>::new());

        let result = sequential().compile_animation(&animation);

        assert_eq!(result.bundle, "@keyframes flcss-animation-0 { from { ; } }");
    }

    #[test]
    fn test_animation_custom_prefix() {
        let compiler = Compiler::new()
            .with_prefix("ui")
            .unwrap()
            .with_id_generator(Box::new(SequentialIds::new()));

        let result = compiler.compile_animation(&fade());

        assert_eq!(result.name, "ui-animation-0");
    }

    #[test]
    fn test_animation_hash_name_from_content() {
        let compiler = Compiler::new().with_naming_mode(NamingMode::Hash);

        let a = compiler.compile_animation(&fade());
        let b = compiler.compile_animation(&fade());
        let c = compiler.compile_animation(&fade().keyframe("50%", [("opacity", 0.5)]));

        assert_eq!(a, b);
        assert_ne!(a.name, c.name);
    }

    #[test]
    fn test_animation_random_name() {
        let result = compile_animation(&fade());

        assert!(result.name.starts_with("flcss-animation-"));
        assert!(!result.name.contains(' '));
        assert!(result.bundle.starts_with(&format!("@keyframes {} {{", result.name)));
    }
}
