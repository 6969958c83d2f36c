//! Rendering of composite type bodies.

use crate::gen::format::{merge, normalize};
use crate::parse::ast::{Node, NodeKind};

/// Expand a struct or union body into a brace-delimited code block.
///
/// Fields appear in declaration order, one per line, two-space indented.
pub fn struct_or_union_body(node: &Node) -> String {
    let mut code = format!("{} {{\n", node.spelling);
    for child in &node.children {
        if child.kind == NodeKind::FieldDecl {
            code.push_str(&format!(
                "  {};\n",
                merge(&normalize(&child.type_spelling), &child.spelling)
            ));
        }
    }
    code.push('}');
    code
}

/// Expand a struct definition.
pub fn render_struct(node: &Node) -> String {
    format!("struct {}", struct_or_union_body(node))
}

/// Expand a union definition.
pub fn render_union(node: &Node) -> String {
    format!("union {}", struct_or_union_body(node))
}

/// Expand an enum definition.
///
/// Every enumerator renders with its resolved integral value as a base-10
/// literal, including enumerators that had no explicit initializer.
pub fn render_enum(node: &Node) -> String {
    let mut code = format!("enum {} {{\n", node.spelling);
    for child in &node.children {
        if child.kind == NodeKind::EnumConstantDecl {
            code.push_str(&format!("  {} = {},\n", child.spelling, child.enum_value));
        }
    }
    code.push('}');
    code
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(name: &str, ty: &str) -> Node {
        Node::new(NodeKind::FieldDecl, name).with_type(ty)
    }

    #[test]
    fn test_render_struct_field_order() {
        let node = Node::new(NodeKind::StructDecl, "point_t")
            .with_child(field("x", "int"))
            .with_child(field("y", "int"))
            .with_child(field("pad", "char [4]"));

        assert_eq!(
            render_struct(&node),
            "struct point_t {\n  int x;\n  int y;\n  char pad[4];\n}"
        );
    }

    #[test]
    fn test_render_union() {
        let node = Node::new(NodeKind::UnionDecl, "value_t")
            .with_child(field("i", "int"))
            .with_child(field("f", "float"));

        assert_eq!(render_union(&node), "union value_t {\n  int i;\n  float f;\n}");
    }

    #[test]
    fn test_render_struct_normalizes_field_types() {
        let node = Node::new(NodeKind::StructDecl, "node_t")
            .with_child(field("next", "struct node_t *"));

        assert_eq!(
            render_struct(&node),
            "struct node_t {\n  struct node_t* next;\n}"
        );
    }

    #[test]
    fn test_render_enum_resolved_values() {
        let node = Node::new(NodeKind::EnumDecl, "mode_t")
            .with_child(Node::new(NodeKind::EnumConstantDecl, "MODE_A").with_value(4))
            .with_child(Node::new(NodeKind::EnumConstantDecl, "MODE_B").with_value(5))
            .with_child(Node::new(NodeKind::EnumConstantDecl, "MODE_C").with_value(16));

        assert_eq!(
            render_enum(&node),
            "enum mode_t {\n  MODE_A = 4,\n  MODE_B = 5,\n  MODE_C = 16,\n}"
        );
    }

    #[test]
    fn test_render_skips_non_field_children() {
        let node = Node::new(NodeKind::StructDecl, "odd_t")
            .with_child(field("x", "int"))
            .with_child(Node::new(NodeKind::Other, "attribute"));

        assert_eq!(render_struct(&node), "struct odd_t {\n  int x;\n}");
    }
}
