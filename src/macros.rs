#[macro_export]
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).unwrap());
        &*RE
    }};
}

#[macro_export]
macro_rules! swap_rule {
    (
        name: $name:expr,
        target: $target:ident
        $(, properties: [ $($prop:expr),* $(,)? ])?
        , class: $class:expr
        , prod: |$text:ident : &str| $body:block
        $(,)?
    ) => {{
        $crate::SwapRule {
            name: $name,
            target: $crate::Target::$target,
            properties: &[ $($($prop),*)? ],
            class: $class,
            production: Box::new(move |$text: &str| -> Option<String> { $body }),
        }
    }};
}
