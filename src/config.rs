pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Parser limits.
///
/// `max_depth` bounds how deeply statements, parenthesized expressions and
/// operator chains may nest. `None` leaves nesting limited only by the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub max_depth: Option<usize>,
}

impl Config {
    pub fn new() -> Self {
        Config {
            max_depth: Some(DEFAULT_MAX_DEPTH),
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    pub fn unlimited() -> Self {
        Config { max_depth: None }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
