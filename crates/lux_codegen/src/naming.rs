//! Deterministic bridge/thunk naming:
//! `<extended_name>_<member>[_invoker|_ctor|_dtor]`, with
//! `extended_name = mangling-safe(qualified_name)`.

/// Replace every character a C++ identifier can't contain (`::`, `<`, `>`,
/// spaces, ...) with `_`, so a qualified name is safe to splice into a
/// generated identifier.
pub fn mangling_safe(qualified_name: &str) -> String {
    qualified_name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

pub fn extended_name(qualified_name: &str) -> String {
    mangling_safe(qualified_name)
}

pub fn method_invoker_name(owner_qualified_name: &str, member: &str) -> String {
    format!("{}_{}_invoker", extended_name(owner_qualified_name), member)
}

pub fn function_invoker_name(qualified_name: &str) -> String {
    format!("{}_invoker", extended_name(qualified_name))
}

pub fn constructor_thunk_name(qualified_name: &str) -> String {
    format!("{}_ctor", extended_name(qualified_name))
}

pub fn destructor_thunk_name(qualified_name: &str) -> String {
    format!("{}_dtor", extended_name(qualified_name))
}

pub fn field_getter_name(owner_qualified_name: &str, field: &str) -> String {
    format!("{}_{}_get", extended_name(owner_qualified_name), field)
}

pub fn field_setter_name(owner_qualified_name: &str, field: &str) -> String {
    format!("{}_{}_set", extended_name(owner_qualified_name), field)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qualified_name_is_mangled_and_suffixed() {
        assert_eq!(extended_name("ns::S"), "ns__S");
        assert_eq!(method_invoker_name("ns::S", "area"), "ns__S_area_invoker");
        assert_eq!(constructor_thunk_name("ns::S"), "ns__S_ctor");
        assert_eq!(destructor_thunk_name("ns::S"), "ns__S_dtor");
        assert_eq!(field_getter_name("ns::S", "a"), "ns__S_a_get");
        assert_eq!(field_setter_name("ns::S", "a"), "ns__S_a_set");
        assert_eq!(function_invoker_name("ns::square"), "ns__square_invoker");
    }
}
