use crate::animation::Animation;
use crate::error::{Error, Result};
use crate::types::{DeclarationValue, StyleNode, StyleSheetMap, StyleTree};
use serde_json::{Map, Value};

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn as_object<'a>(value: &'a Value) -> Result<&'a Map<String, Value>> {
    value.as_object().ok_or_else(|| Error::InvalidDocument {
        expected: "object",
        found: kind(value),
    })
}

fn tree_from_object(object: &Map<String, Value>, path: &str) -> Result<StyleTree> {
    let mut tree = StyleTree::new();

    for (key, value) in object {
        let node = match value {
            Value::String(s) => StyleNode::Value(DeclarationValue::Str(s.clone())),
            Value::Number(n) => match n.as_f64() {
                Some(n) => StyleNode::Value(DeclarationValue::Number(n)),
                None => StyleNode::Value(DeclarationValue::Str(n.to_string())),
            },
            Value::Object(nested) => {
                StyleNode::Nested(tree_from_object(nested, &format!("{}.{}", path, key))?)
            }
            other => {
                return Err(Error::ValueShape {
                    path: format!("{}.{}", path, key),
                    found: kind(other),
                })
            }
        };

        tree.insert(key.clone(), node);
    }

    Ok(tree)
}

impl StyleTree {
    /// 从 JSON 值构建样式树
    ///
    /// 字符串和数字是声明值，对象是嵌套块；布尔、null、数组报 `ValueShape` 错误。
    pub fn from_json_value(value: &Value) -> Result<StyleTree> {
        tree_from_object(as_object(value)?, "$")
    }
}

impl StyleSheetMap {
    /// 从 JSON 字符串加载样式表
    ///
    /// JSON 格式示例：
    /// ```json
    /// {
    ///   "button": {
    ///     "color": "red",
    ///     ":hover": { "color": "blue" },
    ///     "@media (max-width: 600px)": { "fontSize": 12 }
    ///   },
    ///   "primary": { "extend": "button", "backgroundColor": "navy" }
    /// }
    /// ```
    pub fn from_json(json_str: &str) -> Result<StyleSheetMap> {
        let value: Value = serde_json::from_str(json_str)?;
        Self::from_json_value(&value)
    }

    pub fn from_json_value(value: &Value) -> Result<StyleSheetMap> {
        let mut styles = StyleSheetMap::new();

        for (name, tree) in as_object(value)? {
            let tree = match tree {
                Value::Object(object) => tree_from_object(object, name)?,
                other => {
                    return Err(Error::ValueShape {
                        path: name.clone(),
                        found: kind(other),
                    })
                }
            };
            styles.insert(name.clone(), tree);
        }

        Ok(styles)
    }
}

impl Animation {
    /// 从 JSON 字符串加载动画描述（字段名为 camelCase）
    pub fn from_json(json_str: &str) -> Result<Animation> {
        Ok(serde_json::from_str(json_str)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_style_sheet() {
        let json = r#"{
            "button": {
                "color": "red",
                "zIndex": 2,
                ":hover": { "color": "blue" }
            },
            "primary": { "extend": "button" }
        }"#;

        let styles = StyleSheetMap::from_json(json).unwrap();

        assert_eq!(styles.len(), 2);
        assert_eq!(
            styles.get("button"),
            Some(
                &StyleTree::new()
                    .value("color", "red")
                    .value("zIndex", 2)
                    .nested(":hover", StyleTree::new().value("color", "blue"))
            )
        );
    }

    #[test]
    fn test_load_preserves_order() {
        let json = r#"{ "b": { "z": 1, "a": 2 }, "a": { "color": "red" } }"#;

        let styles = StyleSheetMap::from_json(json).unwrap();

        let names: Vec<&str> = styles.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);

        let keys: Vec<&str> = styles.get("b").unwrap().iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["z", "a"]);
    }

    #[test]
    fn test_load_rejects_boolean() {
        let json = r#"{ "button": { ":hover": { "visible": true } } }"#;

        let err = StyleSheetMap::from_json(json).unwrap_err();
        match err {
            Error::ValueShape { path, found } => {
                assert_eq!(path, "button.:hover.visible");
                assert_eq!(found, "boolean");
            }
            other => panic!("Expected ValueShape, got {:?}", other),
        }
    }

    #[test]
    fn test_load_rejects_array_and_null() {
        let err = StyleSheetMap::from_json(r#"{ "a": { "margin": [1, 2] } }"#).unwrap_err();
        assert!(matches!(err, Error::ValueShape { found: "array", .. }));

        let err = StyleSheetMap::from_json(r#"{ "a": { "margin": null } }"#).unwrap_err();
        assert!(matches!(err, Error::ValueShape { found: "null", .. }));
    }

    #[test]
    fn test_load_rejects_non_object_style() {
        let err = StyleSheetMap::from_json(r#"{ "a": "red" }"#).unwrap_err();
        assert!(matches!(err, Error::ValueShape { found: "string", .. }));

        let err = StyleSheetMap::from_json("[]").unwrap_err();
        assert!(matches!(err, Error::InvalidDocument { found: "array", .. }));
    }

    #[test]
    fn test_load_invalid_json() {
        let err = StyleSheetMap::from_json("invalid json").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_tree_from_json_value() {
        let value = serde_json::json!({ "opacity": 0.5 });
        let tree = StyleTree::from_json_value(&value).unwrap();

        assert_eq!(tree, StyleTree::new().value("opacity", 0.5));
    }

    #[test]
    fn test_load_animation() {
        let json = r#"{
            "keyframes": {
                "0%": { "opacity": 0 },
                "100%": { "opacity": 1 }
            },
            "duration": "1s",
            "iterationCount": 3
        }"#;

        let animation = Animation::from_json(json).unwrap();

        assert_eq!(animation.keyframes.len(), 2);
        assert_eq!(animation.duration, Some(DeclarationValue::from("1s")));
        assert_eq!(animation.iteration_count, Some(DeclarationValue::from(3)));
        assert!(animation.timing_function.is_none());
    }

    #[test]
    fn test_load_animation_rejects_nested_keyframe() {
        let json = r#"{ "keyframes": { "0%": { ":hover": { "opacity": 0 } } } }"#;
        assert!(Animation::from_json(json).is_err());
    }
}
