use brace::{
    compile,
    compile::{
        split::{join, split},
        ARITHMETIC, COMPARISON, LOGICAL,
    },
    encode::rawurlencode,
    function, Flags, Scope,
};
use proptest::prelude::*;
use serde_json::json;

proptest! {
    /// Splitting never loses or reorders text.
    #[test]
    fn split_then_join_is_identity(source in "[a-z0-9 ()\\[\\]'\"+*/<>=&|!-]{0,40}") {
        for operators in [ARITHMETIC, COMPARISON, LOGICAL] {
            prop_assert_eq!(join(&split(&source, operators, true)), source.clone());
        }
    }
}

proptest! {
    /// A function outside of the whitelist is never called.
    #[test]
    fn unknown_functions_render_empty(name in "[a-z_]{1,12}") {
        prop_assume!(!function::is_allowed(&name));

        let scope = Scope::new().with_must("x", "value");
        let result = compile(&format!("[{{{{fn.{name}(x)}}}}]"), &scope, Flags::empty());

        prop_assert_eq!(result.output(), "[]");
    }
}

proptest! {
    /// Text without delimiters is returned unchanged.
    #[test]
    fn text_without_tokens_is_unchanged(text in "[^{}]*") {
        let result = compile(&text, &Scope::new(), Flags::empty());

        prop_assert_eq!(result.output(), text.as_str());
        prop_assert!(result.used_paths().is_empty());
        prop_assert_eq!(result.value(), None);
    }
}

proptest! {
    /// A template of one token keeps the value it evaluated to.
    #[test]
    fn single_token_keeps_value(number in any::<i64>(), padding in " {0,3}") {
        let scope = Scope::new().with_must("number", number);
        let result = compile(&format!("{padding}{{{{number}}}}"), &scope, Flags::empty());

        prop_assert_eq!(result.value(), Some(&json!(number)));
        prop_assert_eq!(result.into_output(), format!("{padding}{number}"));
    }
}

proptest! {
    /// `&&` and `||` stop at the operand that decides them.
    #[test]
    fn logical_operators_short_circuit(a in any::<bool>(), or in any::<bool>()) {
        let scope = Scope::new().with_must("a", a).with_must("b", true);
        let operator = if or { "||" } else { "&&" };
        let result = compile(&format!("{{{{ a {operator} b }}}}"), &scope, Flags::empty());

        let decided = a == or;
        let expected: &[&str] = if decided { &["a"] } else { &["a", "b"] };
        prop_assert_eq!(result.used_paths(), expected);
    }
}

proptest! {
    /// Percent-encoding leaves only unreserved characters and escapes.
    #[test]
    fn rawurlencode_output_is_unreserved(text in "\\PC*") {
        let encoded = rawurlencode(&text);

        prop_assert!(encoded
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-._~%".contains(c)));
    }
}

proptest! {
    /// Any expression evaluates to something without panicking.
    #[test]
    fn expressions_never_panic(expression in "[a-z0-9 .,()\\[\\]'\"+*/<>=&|!?:-]{0,30}") {
        let scope = Scope::from(json!({"a": [1, {"b": "c"}], "d": 0.5}));

        compile(&format!("{{{{{expression}}}}}"), &scope, Flags::empty());
    }
}
