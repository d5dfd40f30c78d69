/// 编译错误
///
/// 所有错误都是致命的：出错时整个编译调用中止，不返回部分结果。
/// 不支持的 at-rule（非 `@media`）不属于错误，会被静默丢弃。
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// 逻辑样式名不能作为类名
    #[error("{name} is not a valid classname")]
    InvalidIdentifier { name: String },

    /// `extend` 引用了不存在的样式
    #[error("can't extend {name} with {target} because {target} does not exist")]
    UnresolvedExtend { name: String, target: String },

    /// 值既不是字符串/数字，也不是嵌套对象
    #[error("unsupported value at `{path}`: expected a string, number or object, found {found}")]
    ValueShape { path: String, found: &'static str },

    /// JSON 文档顶层类型不对
    #[error("expected {expected} at the top level, found {found}")]
    InvalidDocument {
        expected: &'static str,
        found: &'static str,
    },

    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = Error::InvalidIdentifier {
            name: "1abc".to_string(),
        };
        assert_eq!(err.to_string(), "1abc is not a valid classname");

        let err = Error::UnresolvedExtend {
            name: "B".to_string(),
            target: "C".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "can't extend B with C because C does not exist"
        );
    }
}
