use wasm_bindgen::prelude::*;
use serde::{Deserialize, Serialize};
use indexmap::IndexMap;

use flcss_core::{Animation, CompileOptions, Compiler, NamingMode, StyleSheetMap};

// ── JS 侧 serde 镜像类型 ──────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsCompileOptions {
    #[serde(default)]
    prefix: Option<String>,
    #[serde(default)]
    naming_mode: JsNamingMode,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
enum JsNamingMode {
    #[default]
    Random,
    Hash,
    Sequential,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsStyleSheetResult {
    names: IndexMap<String, String>,
    bundle: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsAnimationResult {
    name: String,
    bundle: String,
}

// ── 类型转换 ──────────────────────────────────────────────────

impl From<JsNamingMode> for NamingMode {
    fn from(m: JsNamingMode) -> Self {
        match m {
            JsNamingMode::Random => NamingMode::Random,
            JsNamingMode::Hash => NamingMode::Hash,
            JsNamingMode::Sequential => NamingMode::Sequential,
        }
    }
}

impl From<JsCompileOptions> for CompileOptions {
    fn from(opts: JsCompileOptions) -> Self {
        let defaults = CompileOptions::default();
        CompileOptions {
            prefix: opts.prefix.unwrap_or(defaults.prefix),
            naming_mode: opts.naming_mode.into(),
        }
    }
}

fn parse_options(options: JsValue) -> Result<CompileOptions, JsError> {
    if options.is_undefined() || options.is_null() {
        Ok(CompileOptions::default())
    } else {
        serde_wasm_bindgen::from_value::<JsCompileOptions>(options)
            .map(Into::into)
            .map_err(|e| JsError::new(&format!("Invalid options: {}", e)))
    }
}

fn serialize<T: Serialize>(result: &T) -> Result<JsValue, JsError> {
    let serializer = serde_wasm_bindgen::Serializer::new().serialize_maps_as_objects(true);
    result
        .serialize(&serializer)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

// ── WASM 导出函数 ─────────────────────────────────────────────

/// 初始化 panic hook（自动调用）
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}

/// 编译样式表
///
/// @param styles  - 逻辑样式名 → 嵌套样式对象
/// @param options - 编译选项 `{ prefix?, namingMode? }`，可选
/// @returns `{ names, bundle }`
#[wasm_bindgen(js_name = "compileStyleSheet")]
pub fn compile_style_sheet(styles: JsValue, options: JsValue) -> Result<JsValue, JsError> {
    let compiler = Compiler::with_options(parse_options(options)?)
        .map_err(|e| JsError::new(&format!("Invalid options: {}", e)))?;

    let value: serde_json::Value = serde_wasm_bindgen::from_value(styles)
        .map_err(|e| JsError::new(&format!("Invalid styles: {}", e)))?;
    let styles = StyleSheetMap::from_json_value(&value).map_err(|e| JsError::new(&e.to_string()))?;

    let result = compiler
        .compile_style_sheet(&styles)
        .map_err(|e| JsError::new(&e.to_string()))?;

    serialize(&JsStyleSheetResult {
        names: result.names,
        bundle: result.bundle,
    })
}

/// 编译动画
///
/// @param animation - `{ keyframes, duration?, timingFunction?, delay?, iterationCount?, direction?, fillMode? }`
/// @param options   - 编译选项，可选
/// @returns `{ name, bundle }`
#[wasm_bindgen(js_name = "compileAnimation")]
pub fn compile_animation(animation: JsValue, options: JsValue) -> Result<JsValue, JsError> {
    let compiler = Compiler::with_options(parse_options(options)?)
        .map_err(|e| JsError::new(&format!("Invalid options: {}", e)))?;

    let animation: Animation = serde_wasm_bindgen::from_value(animation)
        .map_err(|e| JsError::new(&format!("Invalid animation: {}", e)))?;

    let result = compiler.compile_animation(&animation);

    serialize(&JsAnimationResult {
        name: result.name,
        bundle: result.bundle,
    })
}
