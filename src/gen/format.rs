//! Pure string utilities for C type spellings.

/// Canonicalize a C type spelling.
///
/// Pointer stars attach to the type rather than the variable. A bare
/// `struct` tag collapses to its plain name; the keyword is kept for
/// pointer spellings, where dropping it would be ambiguous with a
/// variable named like the struct. Star reattachment runs to a fixed
/// point so the result is stable under repeated normalization.
pub fn normalize(spelling: &str) -> String {
    let mut ty = spelling.to_string();
    loop {
        let next = ty.replace(" *", "* ");
        if next == ty {
            break;
        }
        ty = next;
    }

    let ty = ty.trim();
    if let Some(stripped) = ty.strip_prefix("struct ") {
        if !ty.ends_with('*') {
            return stripped.to_string();
        }
    }
    ty.to_string()
}

/// Combine a type and a variable name into a single declaration fragment.
///
/// Trailing array dimensions bind to the declared identifier in C, so
/// they are relocated from the type to follow the variable name, in their
/// original order. An empty variable name is legal (anonymous parameter);
/// the dimensions then follow the base type directly and no separator is
/// emitted.
pub fn merge(ty: &str, variable: &str) -> String {
    let mut base = ty.trim();
    let mut dimension = String::new();

    while base.ends_with(']') {
        match base.rfind('[') {
            Some(index) => {
                dimension = format!("{}{}", &base[index..], dimension);
                base = base[..index].trim_end();
            }
            None => break,
        }
    }

    if variable.is_empty() {
        format!("{}{}", base, dimension)
    } else {
        format!("{} {}{}", base, variable, dimension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_pointer_attachment() {
        assert_eq!(normalize("int *"), "int*");
        assert_eq!(normalize("const char *"), "const char*");
        assert_eq!(normalize("int **"), "int**");
    }

    #[test]
    fn test_normalize_struct_prefix() {
        assert_eq!(normalize("struct Foo"), "Foo");
        assert_eq!(normalize("struct Foo *"), "struct Foo*");
    }

    #[test]
    fn test_normalize_idempotent() {
        for spelling in ["int *", "int **", "struct Foo", "struct Foo *", "  int  ", "void"] {
            let once = normalize(spelling);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", spelling);
        }
    }

    #[test]
    fn test_merge_plain() {
        assert_eq!(merge("int", "x"), "int x");
        assert_eq!(merge("const char*", "name"), "const char* name");
    }

    #[test]
    fn test_merge_array_dimensions() {
        assert_eq!(merge("int[4]", "x"), "int x[4]");
        assert_eq!(merge("char[2][3]", "buf"), "char buf[2][3]");
        assert_eq!(merge("int [4]", "data"), "int data[4]");
    }

    #[test]
    fn test_merge_anonymous() {
        assert_eq!(merge("int", ""), "int");
        assert_eq!(merge("int[4]", ""), "int[4]");
    }
}
