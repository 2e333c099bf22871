/// Builds a [`Container`](crate::Container) in flat form.
///
/// Nested `[...]` groups become blocks; every other element goes through
/// `Element::from`, so string literals, `String`s, byte slices and existing
/// elements all work.
///
/// # Examples
///
/// ```rust
/// use clausewitz_patch::{parse, script};
///
/// let doc = script!["possible", "=", ["has_owner", "=", "yes"]];
/// assert_eq!(doc, parse(b"possible = { has_owner = yes }").unwrap());
/// ```
#[macro_export]
macro_rules! script {
    (@elem [ $($inner:tt),* $(,)? ]) => {
        $crate::Element::Container($crate::script!([ $($inner),* ]))
    };

    (@elem $e:expr) => {
        $crate::Element::from($e)
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Container::from_elements(vec![$($crate::script!(@elem $elem)),*])
    };

    ($($elem:tt),* $(,)?) => {
        $crate::script!([ $($elem),* ])
    };
}

#[cfg(test)]
mod tests {
    use crate::{Container, Element, Token};

    #[test]
    fn test_empty() {
        assert_eq!(script![], Container::new());
        assert_eq!(script!([]), Container::new());
    }

    #[test]
    fn test_tokens() {
        let doc = script!["a", "=", "1"];
        assert_eq!(doc.len(), 3);
        assert_eq!(doc.children()[1], Element::Token(Token::new("=")));
    }

    #[test]
    fn test_nested_blocks() {
        let doc = script!["a", "=", ["b", "=", []]];
        let inner = doc.children()[2].as_container().unwrap();
        assert_eq!(inner.len(), 3);
        assert!(inner.children()[2].as_container().unwrap().is_empty());
    }

    #[test]
    fn test_expressions() {
        let name = String::from("cost");
        let value: &[u8] = b"5";
        let extra = Element::from("extra");
        let doc = script![name, "=", value, extra];
        assert_eq!(doc.children()[0].as_bytes(), Some(&b"cost"[..]));
        assert_eq!(doc.children()[3].as_bytes(), Some(&b"extra"[..]));
    }

    #[test]
    fn test_trailing_comma() {
        assert_eq!(script!["a", "=", "1",], script!["a", "=", "1"]);
    }
}
