use std::collections::HashMap;
use std::collections::hash_map;

use crate::error::RuntimeError;

/// Variable bindings for one program run.
///
/// Names are only ever added or overwritten, never removed. Reading a name
/// that was never assigned is an error rather than a default value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    variables: HashMap<String, i32>,
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            variables: HashMap::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<i32> {
        self.variables.get(name).copied()
    }

    pub fn lookup(&self, name: &str) -> Result<i32, RuntimeError> {
        self.get(name)
            .ok_or_else(|| RuntimeError::UndefinedVariable(name.to_string()))
    }

    pub fn assign(&mut self, name: &str, value: i32) {
        match self.variables.get_mut(name) {
            Some(slot) => *slot = value,
            None => {
                self.variables.insert(name.to_string(), value);
            }
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    pub fn iter(&self) -> hash_map::Iter<'_, String, i32> {
        self.variables.iter()
    }

}

impl<'a> IntoIterator for &'a Environment {
    type Item = (&'a String, &'a i32);
    type IntoIter = hash_map::Iter<'a, String, i32>;

    fn into_iter(self) -> Self::IntoIter {
        self.variables.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assign_and_get() {
        let mut env = Environment::new();
        assert!(env.is_empty());
        env.assign("x", 5);
        assert_eq!(env.get("x"), Some(5));
        assert!(env.contains("x"));
        assert_eq!(env.len(), 1);
    }

    #[test]
    fn test_overwrite_keeps_single_binding() {
        let mut env = Environment::new();
        env.assign("x", 1);
        env.assign("x", 2);
        assert_eq!(env.get("x"), Some(2));
        assert_eq!(env.len(), 1);
    }

    #[test]
    fn test_iterate_bindings() {
        let mut env = Environment::new();
        env.assign("b", 2);
        env.assign("a", 1);
        env.assign("b", 3);

        let mut pairs: Vec<_> = env.iter().map(|(name, value)| (name.clone(), *value)).collect();
        pairs.sort();
        assert_eq!(pairs, vec![("a".to_string(), 1), ("b".to_string(), 3)]);

        let total: i32 = (&env).into_iter().map(|(_, value)| *value).sum();
        assert_eq!(total, 4);
        let mut names = Vec::new();
        for (name, _) in &env {
            names.push(name.as_str());
        }
        names.sort();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_lookup_missing() {
        let env = Environment::new();
        assert_eq!(
            env.lookup("y"),
            Err(RuntimeError::UndefinedVariable("y".to_string()))
        );
    }
}
