use super::Renderer;
use crate::{
    compile::scan::{find_closing, unquote},
    value::{to_key, Map},
};
use serde_json::Value;
use std::borrow::Cow;

/// A position reached while walking a path.
enum Node<'a> {
    /// The root map of the scope.
    Root(&'a Map<String, Value>),
    /// A value below the root, owned when it was built during the walk.
    Value(Cow<'a, Value>),
}

impl<'a> Node<'a> {
    /// Descend into the child named `key`.
    ///
    /// An empty key stays on the current node.
    fn child(self, key: &str) -> Option<Node<'a>> {
        if key.is_empty() {
            return Some(self);
        }

        let child = match self {
            Node::Root(map) => map.get(key).map(Cow::Borrowed),
            Node::Value(Cow::Borrowed(value)) => lookup(value, key),
            Node::Value(Cow::Owned(value)) => {
                let child = lookup(&value, key).map(Cow::into_owned);
                child.map(Cow::Owned)
            }
        };

        child.map(Node::Value)
    }

    fn into_value(self) -> Value {
        match self {
            Node::Root(_) => Value::Null,
            Node::Value(value) => value.into_owned(),
        }
    }
}

/// Look up `key` in a map, a list, or a string.
///
/// Lists take the key as an index. A string is indexed by code point and
/// yields a new string of the one character.
fn lookup<'v>(value: &'v Value, key: &str) -> Option<Cow<'v, Value>> {
    match value {
        Value::Object(map) => map.get(key).map(Cow::Borrowed),
        Value::Array(list) => key
            .parse::<usize>()
            .ok()
            .and_then(|index| list.get(index))
            .map(Cow::Borrowed),
        Value::String(string) => key
            .parse::<usize>()
            .ok()
            .and_then(|index| string.chars().nth(index))
            .map(|c| Cow::Owned(Value::String(c.to_string()))),
        Value::Null | Value::Bool(_) | Value::Number(_) => None,
    }
}

impl<'scope> Renderer<'scope> {
    /// Resolve a path against the scope.
    ///
    /// The full path is recorded as used before the walk begins, whether or
    /// not it resolves.
    pub(super) fn resolve_path(&mut self, path: &str) -> Value {
        if !self.used.iter().any(|used| used == path) {
            self.used.push(path.to_owned());
        }

        let scope = self.scope;
        self.walk(Node::Root(scope.data()), path)
            .map(Node::into_value)
            .unwrap_or(Value::Null)
    }

    /// Resolve a path, such as `[0].name`, against an intermediate value.
    ///
    /// Nothing is recorded as used, because the value is not part of the
    /// scope.
    pub(super) fn resolve_from(&mut self, value: &Value, path: &str) -> Value {
        self.walk(Node::Value(Cow::Borrowed(value)), path)
            .map(Node::into_value)
            .unwrap_or(Value::Null)
    }

    /// Walk `path` from `node`, one segment at a time.
    ///
    /// A segment that does not exist stops the walk, and so does a bracket
    /// that is never closed.
    fn walk<'v>(&mut self, mut node: Node<'v>, path: &str) -> Option<Node<'v>> {
        let mut start = 0;
        let mut index = 0;

        while let Some(c) = path[index..].chars().next() {
            match c {
                '.' => {
                    node = node.child(&path[start..index])?;
                    index += 1;
                    start = index;
                }
                '[' => {
                    node = node.child(&path[start..index])?;
                    let close = find_closing(path, index)?;
                    let key = self.bracket_key(&path[index + 1..close])?;
                    node = node.child(&key)?;
                    index = close + 1;
                    start = index;
                }
                _ => index += c.len_utf8(),
            }
        }

        node.child(&path[start..])
    }

    /// Return the key written between square brackets.
    ///
    /// A quoted literal and a plain integer are taken as they are, anything
    /// else is evaluated as an expression whose result becomes the key.
    fn bracket_key(&mut self, inner: &str) -> Option<String> {
        let inner = inner.trim();
        if let Some(literal) = unquote(inner) {
            return Some(literal);
        }
        if inner.parse::<i64>().is_ok() {
            return Some(inner.to_owned());
        }

        to_key(&self.evaluate(inner))
    }
}

#[cfg(test)]
mod tests {
    use crate::{render::Renderer, Scope};
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    fn scope() -> Scope {
        Scope::from(json!({
            "array": [1, "ahoj"],
            "object": {"title": "Hi", "data": ["objectData"], "string": "success"},
            "titleName": "title",
            "nested": [{"name": "Yes"}],
            "word": "Miškech",
            "index": 1,
        }))
    }

    fn resolve(path: &str) -> Value {
        Renderer::new(&scope()).resolve_path(path)
    }

    #[test]
    fn test_resolve_dotted_and_indexed() {
        assert_eq!(resolve("array[0]"), json!(1));
        assert_eq!(resolve("array[1]"), json!("ahoj"));
        assert_eq!(resolve("object.title"), json!("Hi"));
        assert_eq!(resolve("object['title']"), json!("Hi"));
        assert_eq!(resolve("object.data[0]"), json!("objectData"));
        assert_eq!(resolve("nested[0].name"), json!("Yes"));
        assert_eq!(resolve("array"), json!([1, "ahoj"]));
    }

    #[test]
    fn test_resolve_dynamic_keys() {
        assert_eq!(resolve("object[titleName]"), json!("Hi"));
        assert_eq!(resolve("array[index]"), json!("ahoj"));
        assert_eq!(resolve("array[index - 1]"), json!(1));
        assert_eq!(resolve("array[nested[0].missing]"), Value::Null);
    }

    #[test]
    fn test_resolve_string_by_code_point() {
        assert_eq!(resolve("word[2]"), json!("š"));
        assert_eq!(resolve("array[1][1]"), json!("h"));
        assert_eq!(resolve("array[1][1][0]"), json!("h"));
        assert_eq!(resolve("array[1][10]"), Value::Null);
    }

    #[test]
    fn test_resolve_missing() {
        assert_eq!(resolve("missing"), Value::Null);
        assert_eq!(resolve("missing.title"), Value::Null);
        assert_eq!(resolve("object.missing.deeper[0]"), Value::Null);
        assert_eq!(resolve("array[0"), Value::Null);
        assert_eq!(resolve("index.value"), Value::Null);
        assert_eq!(resolve("."), Value::Null);
    }

    #[test]
    fn test_resolve_records_full_paths_once() {
        let scope = scope();
        let mut renderer = Renderer::new(&scope);
        renderer.resolve_path("object[titleName]");
        renderer.resolve_path("missing.title");
        renderer.resolve_path("titleName");

        assert_eq!(
            renderer.into_used_paths(),
            vec!["object[titleName]", "titleName", "missing.title"]
        );
    }

    #[test]
    fn test_resolve_from_value() {
        let scope = Scope::new();
        let mut renderer = Renderer::new(&scope);
        let value = json!([{"name": "test"}, {"name": "try"}]);

        assert_eq!(renderer.resolve_from(&value, "[1].name"), json!("try"));
        assert_eq!(renderer.resolve_from(&value, ".0.name"), json!("test"));
        assert!(renderer.into_used_paths().is_empty());
    }
}
