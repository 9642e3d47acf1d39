/// Join class names with single spaces, skipping missing and empty ones.
pub fn join_class_names<'a, I>(names: I) -> String
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let mut joined = String::new();
    for name in names.into_iter().flatten().filter(|n| !n.is_empty()) {
        if !joined.is_empty() {
            joined.push(' ');
        }
        joined.push_str(name);
    }
    joined
}
