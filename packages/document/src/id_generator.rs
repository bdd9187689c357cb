use crate::Document;
use chrono::Utc;

pub const DEFAULT_PREFIX: &str = "element";

/// Sequential ID generator for element nodes
///
/// IDs look like `element-<seed>-<n>`, where the seed is the creation
/// time in milliseconds and `n` counts up from 1.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    prefix: String,
    seed: i64,
    count: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::from_seed(Utc::now().timestamp_millis())
    }

    pub fn from_seed(seed: i64) -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            seed,
            count: 0,
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Generate next sequential ID
    pub fn new_id(&mut self) -> String {
        self.count += 1;
        format!("{}-{}-{}", self.prefix, self.seed, self.count)
    }

    /// Generate an ID not already used anywhere in `doc`
    pub fn fresh_id(&mut self, doc: &Document) -> String {
        loop {
            let id = self.new_id();
            if !doc.contains(&id) {
                return id;
            }
        }
    }

    pub fn seed(&self) -> i64 {
        self.seed
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
