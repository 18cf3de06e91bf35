use std::collections::HashMap;
use std::hash::Hash;

/// Fixed label → code map.
///
/// Codes follow the order of the labels given at construction. Labels outside that
/// set map to the default code, which is one past the last valid code unless
/// overridden.
#[derive(Clone, Debug)]
pub struct StaticCodec<L> {
    codes: HashMap<L, usize>,
    default_code: usize,
}

impl<L: Eq + Hash> StaticCodec<L> {
    pub fn new(labels: impl IntoIterator<Item = L>) -> Self {
        let mut codes = HashMap::new();
        for label in labels {
            let next = codes.len();
            codes.entry(label).or_insert(next);
        }
        let default_code = codes.len();
        Self {
            codes,
            default_code,
        }
    }

    pub fn with_default(mut self, code: usize) -> Self {
        self.default_code = code;
        self
    }

    pub fn default_code(&self) -> usize {
        self.default_code
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn encode(&self, label: &L) -> usize {
        self.codes.get(label).copied().unwrap_or(self.default_code)
    }
}

/// Label → code map grown on first sight of each label.
///
/// Codes depend only on the order labels arrive in.
#[derive(Clone, Debug, Default)]
pub struct AutoEncoder<L> {
    codes: HashMap<L, usize>,
    order: Vec<L>,
}

impl<L: Eq + Hash + Clone> AutoEncoder<L> {
    pub fn new() -> Self {
        Self {
            codes: HashMap::new(),
            order: Vec::new(),
        }
    }

    pub fn encode(&mut self, label: &L) -> usize {
        if let Some(code) = self.codes.get(label) {
            return *code;
        }
        let code = self.order.len();
        self.codes.insert(label.clone(), code);
        self.order.push(label.clone());
        code
    }

    pub fn code_of(&self, label: &L) -> Option<usize> {
        self.codes.get(label).copied()
    }

    /// Labels in code order.
    pub fn labels(&self) -> &[L] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Freeze the labels seen so far into a static codec.
    pub fn freeze(&self) -> StaticCodec<L> {
        StaticCodec::new(self.order.iter().cloned())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/category/codec.rs"]
mod tests;
