//! Regex-based C declaration backend.
//!
//! A pragmatic parser for the declaration shapes common in C API headers,
//! not a full C parser. Comments and preprocessor lines are stripped,
//! whitespace is normalized, and declarations are extracted per construct
//! with their source order preserved. Nested composites and function
//! pointer members are handled minimally and won't catch everything.

use std::path::Path;

use regex::Regex;

use super::ast::{AstBackend, DeclarationTree, Node, NodeKind, ParseError, ParseMode};

/// C keywords that can never be a declared parameter or field name.
const TYPE_KEYWORDS: &[&str] = &[
    "void", "char", "short", "int", "long", "float", "double", "signed", "unsigned", "_Bool",
    "bool",
];

/// Keywords that force the following identifier to be part of the type.
const TAG_KEYWORDS: &[&str] = &["struct", "union", "enum"];

/// Qualifiers stripped from the front of a function declaration.
const DECL_QUALIFIERS: &[&str] = &["extern ", "static ", "inline ", "__inline "];

/// Parser backend for C header files.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderParser;

impl HeaderParser {
    /// Create a new header parser.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse header text into a declaration tree.
    pub fn parse_content(&self, content: &str, header: &Path) -> Result<DeclarationTree, ParseError> {
        let text = preprocess(content);
        check_braces(&text, header)?;

        let depth = brace_depths(&text);
        let mut declarations: Vec<(usize, Node)> = Vec::new();

        collect_composite_typedefs(&text, header, &mut declarations);
        collect_alias_typedefs(&text, header, &depth, &mut declarations);
        collect_functions(&text, header, &depth, &mut declarations);

        // Regex passes run per construct; offsets restore source order.
        declarations.sort_by_key(|(offset, _)| *offset);
        let nodes = declarations.into_iter().map(|(_, node)| node).collect();

        Ok(DeclarationTree::new(header, nodes))
    }
}

impl AstBackend for HeaderParser {
    fn parse(&self, header: &Path, _mode: ParseMode) -> Result<DeclarationTree, ParseError> {
        let content = std::fs::read_to_string(header).map_err(|source| ParseError::Read {
            path: header.to_path_buf(),
            source,
        })?;
        self.parse_content(&content, header)
    }
}

/// Strip comments, line continuations, and preprocessor lines, then
/// collapse whitespace to single spaces.
fn preprocess(content: &str) -> String {
    let re_block = Regex::new(r"/\*[\s\S]*?\*/").unwrap();
    let content = re_block.replace_all(content, " ");

    let re_line = Regex::new(r"//[^\n]*").unwrap();
    let content = re_line.replace_all(&content, " ");

    let content = content.replace("\\\n", " ");

    let re_pp = Regex::new(r"(?m)^[ \t]*#[^\n]*").unwrap();
    let content = re_pp.replace_all(&content, " ");

    let re_ws = Regex::new(r"\s+").unwrap();
    re_ws.replace_all(&content, " ").to_string()
}

/// Reject header text whose braces don't balance after preprocessing.
fn check_braces(text: &str, header: &Path) -> Result<(), ParseError> {
    let open = text.bytes().filter(|b| *b == b'{').count();
    let close = text.bytes().filter(|b| *b == b'}').count();
    if open != close {
        return Err(ParseError::Syntax {
            path: header.to_path_buf(),
            detail: format!("unbalanced braces ({} open, {} close)", open, close),
        });
    }
    Ok(())
}

/// Brace nesting depth at every byte offset.
fn brace_depths(text: &str) -> Vec<u32> {
    let mut depths = Vec::with_capacity(text.len());
    let mut depth: u32 = 0;
    for byte in text.bytes() {
        if byte == b'}' {
            depth = depth.saturating_sub(1);
        }
        depths.push(depth);
        if byte == b'{' {
            depth += 1;
        }
    }
    depths
}

/// Parse `typedef struct|union|enum [tag] { body } alias;` declarations.
fn collect_composite_typedefs(text: &str, header: &Path, out: &mut Vec<(usize, Node)>) {
    let re = Regex::new(
        r"typedef\s+(struct|union|enum)(\s+[A-Za-z_]\w*)?\s*\{([^{}]*)\}\s*([A-Za-z_]\w*)\s*;",
    )
    .unwrap();

    for cap in re.captures_iter(text) {
        let keyword = cap.get(1).map_or("", |m| m.as_str());
        let tag = cap.get(2).map_or("", |m| m.as_str()).trim();
        let body = cap.get(3).map_or("", |m| m.as_str());
        let alias = cap.get(4).map_or("", |m| m.as_str());

        // An anonymous body borrows the alias as its tag so the emitted
        // typedef stays well-formed.
        let tag = if tag.is_empty() { alias } else { tag };

        let (kind, children) = match keyword {
            "struct" => (NodeKind::StructDecl, parse_fields(body, header)),
            "union" => (NodeKind::UnionDecl, parse_fields(body, header)),
            _ => (NodeKind::EnumDecl, parse_enumerators(body, header)),
        };

        let mut composite = Node::new(kind, tag).with_file(header);
        composite.children = children;

        let node = Node::new(NodeKind::TypedefDecl, alias)
            .with_type(format!("{} {}", keyword, tag))
            .with_file(header)
            .with_child(composite);

        out.push((cap.get(0).map_or(0, |m| m.start()), node));
    }
}

/// Parse struct/union field declarations from a brace body.
fn parse_fields(body: &str, header: &Path) -> Vec<Node> {
    let mut fields = Vec::new();

    for field in body.split(';') {
        let field = field.trim();
        if field.is_empty() {
            continue;
        }

        // Bitfields: keep the declarator, drop the width.
        let field = field.split(':').next().unwrap_or(field).trim();

        let (ty, name) = split_declarator(field);
        if name.is_empty() {
            continue;
        }
        fields.push(
            Node::new(NodeKind::FieldDecl, name)
                .with_type(ty)
                .with_file(header),
        );
    }

    fields
}

/// Parse enumerators from a brace body, resolving implicit values.
fn parse_enumerators(body: &str, header: &Path) -> Vec<Node> {
    let mut enumerators = Vec::new();
    let mut next_value: i64 = 0;

    for item in body.split(',') {
        let item = item.trim();
        if item.is_empty() {
            continue;
        }

        let (name, value) = match item.split_once('=') {
            Some((name, literal)) => match parse_int_literal(literal) {
                Some(value) => (name.trim(), value),
                None => {
                    tracing::warn!(
                        "{}: skipping enumerator with unresolvable value: {}",
                        header.display(),
                        item
                    );
                    continue;
                }
            },
            None => (item, next_value),
        };

        next_value = value + 1;
        enumerators.push(
            Node::new(NodeKind::EnumConstantDecl, name)
                .with_file(header)
                .with_value(value),
        );
    }

    enumerators
}

/// Parse a C integer literal (decimal or hex, optional u/l suffixes).
fn parse_int_literal(literal: &str) -> Option<i64> {
    let literal = literal
        .trim()
        .trim_end_matches(|c| matches!(c, 'u' | 'U' | 'l' | 'L'));

    if let Some(hex) = literal.strip_prefix("0x").or_else(|| literal.strip_prefix("0X")) {
        return i64::from_str_radix(hex, 16).ok();
    }
    literal.parse().ok()
}

/// Parse `typedef <underlying> <alias>;` declarations without a body.
fn collect_alias_typedefs(
    text: &str,
    header: &Path,
    depth: &[u32],
    out: &mut Vec<(usize, Node)>,
) {
    let re = Regex::new(r"typedef\s+([A-Za-z_][^;{}()]*?)\s*\b([A-Za-z_]\w*)\s*;").unwrap();

    for cap in re.captures_iter(text) {
        let start = cap.get(0).map_or(0, |m| m.start());
        if depth.get(start).copied().unwrap_or(0) > 0 {
            continue;
        }

        let underlying = cap.get(1).map_or("", |m| m.as_str()).trim();
        let alias = cap.get(2).map_or("", |m| m.as_str());

        let mut node = Node::new(NodeKind::TypedefDecl, alias)
            .with_type(underlying)
            .with_file(header);

        // A plain alias of a named, non-builtin type gets a reference
        // child; decorated aliases fall back to the underlying spelling so
        // pointer stars are never lost.
        if is_plain_identifier(underlying) && !TYPE_KEYWORDS.contains(&underlying) {
            node = node.with_child(Node::new(NodeKind::TypeRef, underlying).with_file(header));
        }

        out.push((start, node));
    }
}

/// Parse function prototypes at file scope.
fn collect_functions(text: &str, header: &Path, depth: &[u32], out: &mut Vec<(usize, Node)>) {
    let re = Regex::new(r"([A-Za-z_][\w\s*]*?)\(([^()]*)\)\s*;").unwrap();

    for cap in re.captures_iter(text) {
        let start = cap.get(0).map_or(0, |m| m.start());
        if depth.get(start).copied().unwrap_or(0) > 0 {
            continue;
        }

        let mut decl = cap.get(1).map_or("", |m| m.as_str()).trim();
        let params = cap.get(2).map_or("", |m| m.as_str()).trim();

        if decl.starts_with("typedef") {
            continue;
        }
        loop {
            let stripped = DECL_QUALIFIERS
                .iter()
                .find_map(|q| decl.strip_prefix(q));
            match stripped {
                Some(rest) => decl = rest.trim_start(),
                None => break,
            }
        }

        let Some((return_type, name)) = split_function_name(decl) else {
            continue;
        };

        let mut node = Node::new(NodeKind::FunctionDecl, name)
            .with_type(return_type)
            .with_file(header);
        node.children = parse_params(params, header);

        out.push((start, node));
    }
}

/// Split `<return type> <name>` off a prototype's pre-parenthesis text.
///
/// Returns `None` when no return type remains, which filters out macro
/// invocations and call expressions that happen to look like prototypes.
fn split_function_name(decl: &str) -> Option<(String, String)> {
    let re = Regex::new(r"^(.*?)([A-Za-z_]\w*)$").unwrap();
    let cap = re.captures(decl)?;

    let head = cap.get(1).map_or("", |m| m.as_str()).trim();
    let name = cap.get(2).map_or("", |m| m.as_str());

    if head.is_empty() {
        return None;
    }
    Some((head.to_string(), name.to_string()))
}

/// Parse a parameter list into parameter declaration nodes.
fn parse_params(params: &str, header: &Path) -> Vec<Node> {
    let mut nodes = Vec::new();

    if params.is_empty() || params == "void" {
        return nodes;
    }

    for param in params.split(',') {
        let param = param.trim();
        if param.is_empty() || param == "..." {
            continue;
        }

        let (ty, name) = split_declarator(param);
        nodes.push(
            Node::new(NodeKind::ParmDecl, name)
                .with_type(ty)
                .with_file(header),
        );
    }

    nodes
}

/// Split one declarator into its type spelling and declared name.
///
/// The name may be empty: `unsigned int`, `struct foo`, and bare type
/// spellings are all legal anonymous parameters. Trailing array dimensions
/// stay with the type, matching how an AST reports `int [4]`.
fn split_declarator(decl: &str) -> (String, String) {
    let decl = decl.trim();
    let re = Regex::new(r"^(.*?)\s*\b([A-Za-z_]\w*)\s*((?:\[[^\]]*\]\s*)*)$").unwrap();

    let Some(cap) = re.captures(decl) else {
        return (decl.to_string(), String::new());
    };

    let head = cap.get(1).map_or("", |m| m.as_str()).trim();
    let name = cap.get(2).map_or("", |m| m.as_str());
    let dims: String = cap
        .get(3)
        .map_or("", |m| m.as_str())
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    let anonymous = TYPE_KEYWORDS.contains(&name)
        || head
            .split_whitespace()
            .last()
            .is_some_and(|last| TAG_KEYWORDS.contains(&last))
        || head.is_empty();

    if anonymous {
        return (decl.to_string(), String::new());
    }

    let ty = if dims.is_empty() {
        head.to_string()
    } else {
        format!("{} {}", head, dims)
    };
    (ty, name.to_string())
}

/// Whether a spelling is a single bare identifier.
fn is_plain_identifier(spelling: &str) -> bool {
    let mut chars = spelling.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> DeclarationTree {
        HeaderParser::new()
            .parse_content(content, Path::new("test.h"))
            .unwrap()
    }

    #[test]
    fn test_parse_simple_function() {
        let tree = parse("int add(int a, int b);");

        let decls = &tree.root().children;
        assert_eq!(decls.len(), 1);
        let func = &decls[0];
        assert_eq!(func.kind, NodeKind::FunctionDecl);
        assert_eq!(func.spelling, "add");
        assert_eq!(func.type_spelling, "int");
        assert_eq!(func.children.len(), 2);
        assert_eq!(func.children[0].spelling, "a");
        assert_eq!(func.children[0].type_spelling, "int");
        assert_eq!(func.children[1].spelling, "b");
    }

    #[test]
    fn test_parse_pointer_return() {
        let tree = parse("char *get_string(void);");

        let func = &tree.root().children[0];
        assert_eq!(func.spelling, "get_string");
        assert_eq!(func.type_spelling, "char *");
        assert!(func.children.is_empty());
    }

    #[test]
    fn test_parse_pointer_params() {
        let tree = parse("void connect(const char *display, int *screen);");

        let func = &tree.root().children[0];
        assert_eq!(func.children[0].spelling, "display");
        assert_eq!(func.children[0].type_spelling, "const char *");
        assert_eq!(func.children[1].spelling, "screen");
        assert_eq!(func.children[1].type_spelling, "int *");
    }

    #[test]
    fn test_parse_anonymous_param() {
        let tree = parse("void poke(unsigned int, struct foo);");

        let func = &tree.root().children[0];
        assert_eq!(func.children.len(), 2);
        assert_eq!(func.children[0].spelling, "");
        assert_eq!(func.children[0].type_spelling, "unsigned int");
        assert_eq!(func.children[1].spelling, "");
        assert_eq!(func.children[1].type_spelling, "struct foo");
    }

    #[test]
    fn test_parse_array_param() {
        let tree = parse("void fill(int data[4]);");

        let param = &tree.root().children[0].children[0];
        assert_eq!(param.spelling, "data");
        assert_eq!(param.type_spelling, "int [4]");
    }

    #[test]
    fn test_parse_struct_typedef() {
        let tree = parse("typedef struct point_t { int x; int y[2]; } point_t;");

        let typedef = &tree.root().children[0];
        assert_eq!(typedef.kind, NodeKind::TypedefDecl);
        assert_eq!(typedef.spelling, "point_t");

        let body = &typedef.children[0];
        assert_eq!(body.kind, NodeKind::StructDecl);
        assert_eq!(body.spelling, "point_t");
        assert_eq!(body.children.len(), 2);
        assert_eq!(body.children[0].spelling, "x");
        assert_eq!(body.children[1].spelling, "y");
        assert_eq!(body.children[1].type_spelling, "int [2]");
    }

    #[test]
    fn test_parse_anonymous_struct_typedef() {
        let tree = parse("typedef struct { int x; } point_t;");

        let body = &tree.root().children[0].children[0];
        assert_eq!(body.kind, NodeKind::StructDecl);
        assert_eq!(body.spelling, "point_t");
    }

    #[test]
    fn test_parse_enum_typedef_values() {
        let tree = parse("typedef enum mode_t { A = 4, B, C, D = 0x10, E } mode_t;");

        let body = &tree.root().children[0].children[0];
        assert_eq!(body.kind, NodeKind::EnumDecl);
        let values: Vec<i64> = body.children.iter().map(|n| n.enum_value).collect();
        assert_eq!(values, vec![4, 5, 6, 16, 17]);
    }

    #[test]
    fn test_parse_alias_typedef() {
        let tree = parse("typedef unsigned int xcb_window_t;");

        let typedef = &tree.root().children[0];
        assert_eq!(typedef.spelling, "xcb_window_t");
        assert_eq!(typedef.type_spelling, "unsigned int");
        assert!(typedef.children.is_empty());
    }

    #[test]
    fn test_parse_alias_typedef_reference() {
        let tree = parse("typedef xcb_window_t xcb_drawable_t;");

        let typedef = &tree.root().children[0];
        assert_eq!(typedef.children.len(), 1);
        assert_eq!(typedef.children[0].kind, NodeKind::TypeRef);
        assert_eq!(typedef.children[0].spelling, "xcb_window_t");
    }

    #[test]
    fn test_source_order_preserved() {
        let tree = parse(
            "typedef unsigned int first_t;\n\
             int second(void);\n\
             typedef struct third_t { int x; } third_t;\n\
             void fourth(int a);",
        );

        let names: Vec<&str> = tree
            .root()
            .children
            .iter()
            .map(|n| n.spelling.as_str())
            .collect();
        assert_eq!(names, vec!["first_t", "second", "third_t", "fourth"]);
    }

    #[test]
    fn test_comments_and_preprocessor_ignored() {
        let tree = parse(
            "/* block comment int bogus(void); */\n\
             // line comment int bogus2(void);\n\
             #define XCB_NONE 0\n\
             int real(void);",
        );

        assert_eq!(tree.root().children.len(), 1);
        assert_eq!(tree.root().children[0].spelling, "real");
    }

    #[test]
    fn test_inline_body_not_a_prototype() {
        let tree = parse("static int square(int x) { return mul(x, x); }\nint real(void);");

        let names: Vec<&str> = tree
            .root()
            .children
            .iter()
            .map(|n| n.spelling.as_str())
            .collect();
        assert_eq!(names, vec!["real"]);
    }

    #[test]
    fn test_unbalanced_braces_rejected() {
        let err = HeaderParser::new()
            .parse_content("typedef struct foo { int x;", Path::new("bad.h"))
            .unwrap_err();
        assert!(matches!(err, ParseError::Syntax { .. }));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = HeaderParser::new()
            .parse(Path::new("/nonexistent/header.h"), ParseMode::CHeader)
            .unwrap_err();
        assert!(matches!(err, ParseError::Read { .. }));
    }

    #[test]
    fn test_parse_int_literal() {
        assert_eq!(parse_int_literal("42"), Some(42));
        assert_eq!(parse_int_literal("-1"), Some(-1));
        assert_eq!(parse_int_literal("0x10"), Some(16));
        assert_eq!(parse_int_literal("0x10UL"), Some(16));
        assert_eq!(parse_int_literal("1 << 3"), None);
    }
}
