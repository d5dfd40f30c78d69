use crate::types::NamingMode;
use rand::Rng;
use std::cell::Cell;

/// 唯一 token 生成策略
///
/// `seed` 是被命名内容的序列化文本，只有基于内容的策略会用到。
pub trait IdGenerator {
    fn generate(&self, seed: &str) -> String;

    /// 是否需要 seed；返回 false 时调用方传入空字符串，省去序列化
    fn needs_seed(&self) -> bool {
        false
    }
}

/// 随机命名策略：5 位小写 base36 字符
///
/// 只保证同一进程内"几乎不会"冲突，需要严格唯一时请注入自己的策略。
pub struct RandomIds;

impl RandomIds {
    const LEN: usize = 5;
}

impl IdGenerator for RandomIds {
    fn generate(&self, _seed: &str) -> String {
        let mut rng = rand::thread_rng();

        (0..Self::LEN)
            .filter_map(|_| std::char::from_digit(rng.gen_range(0..36), 36))
            .collect()
    }
}

/// Hash 命名策略：基于内容生成稳定 token
pub struct HashIds;

impl IdGenerator for HashIds {
    fn generate(&self, seed: &str) -> String {
        let hash = blake3::hash(seed.as_bytes());

        // 取前 4 个字节的十六进制表示
        let hex = format!("{}", hash);
        hex[..8].to_string()
    }

    fn needs_seed(&self) -> bool {
        true
    }
}

/// 自增命名策略：0, 1, 2, ...
#[derive(Default)]
pub struct SequentialIds {
    next: Cell<u64>,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIds {
    fn generate(&self, _seed: &str) -> String {
        let id = self.next.get();
        self.next.set(id + 1);
        id.to_string()
    }
}

/// 根据 NamingMode 创建对应的策略
pub fn create_id_generator(mode: NamingMode) -> Box<dyn IdGenerator> {
    match mode {
        NamingMode::Random => Box::new(RandomIds),
        NamingMode::Hash => Box::new(HashIds),
        NamingMode::Sequential => Box::new(SequentialIds::new()),
    }
}

/// 检查逻辑样式名能否作为类名的一部分
///
/// 必须以 ASCII 字母开头，其余字符只能是字母、数字、`-`、`_`。
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();

    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {}
        _ => return false,
    }

    chars.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
