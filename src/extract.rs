//! Java fact extraction
//!
//! Walks a tree-sitter-java syntax tree and collects the interface and type
//! declarations of one source unit. Nested declarations are collected too;
//! method lists only take methods declared directly in each body.

use std::path::Path;

use tracing::debug;
use tree_sitter::{Node, Tree};

use crate::error::{IpiError, Result};
use crate::schema::{InterfaceFact, SourceUnit, TypeFact};

/// Parse a Java source unit and extract its facts
pub fn parse_java(path: &Path, source: &str) -> Result<SourceUnit> {
    let path_str = path.display().to_string();

    let mut parser = tree_sitter::Parser::new();
    parser
        .set_language(&tree_sitter_java::LANGUAGE.into())
        .map_err(|e| IpiError::ParseFailure {
            path: path_str.clone(),
            message: format!("Failed to set language: {:?}", e),
        })?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| IpiError::ParseFailure {
            path: path_str.clone(),
            message: "Failed to parse file".to_string(),
        })?;

    if tree.root_node().has_error() {
        debug!(path = %path_str, "syntax errors present, extracting what parsed");
    }

    Ok(extract(&path_str, source, &tree))
}

/// Extract facts from an already parsed tree
pub fn extract(path: &str, source: &str, tree: &Tree) -> SourceUnit {
    let mut unit = SourceUnit {
        path: path.to_string(),
        ..Default::default()
    };

    visit_all(&tree.root_node(), |node| match node.kind() {
        "interface_declaration" => {
            if let Some(iface) = interface_fact(node, source) {
                unit.interfaces.push(iface);
            }
        }
        "class_declaration" | "enum_declaration" | "record_declaration" => {
            if let Some(ty) = type_fact(node, source) {
                unit.types.push(ty);
            }
        }
        _ => {}
    });

    unit
}

fn interface_fact(node: &Node, source: &str) -> Option<InterfaceFact> {
    let name = get_node_text(&node.child_by_field_name("name")?, source);

    let mut extends = Vec::new();
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() == "extends_interfaces" {
            extends.extend(type_list_names(&child, source));
        }
    }

    let methods = node
        .child_by_field_name("body")
        .map(|body| method_names(&body, source))
        .unwrap_or_default();

    Some(InterfaceFact {
        name,
        methods,
        extends,
    })
}

fn type_fact(node: &Node, source: &str) -> Option<TypeFact> {
    let name = get_node_text(&node.child_by_field_name("name")?, source);

    let implements = node
        .child_by_field_name("interfaces")
        .map(|interfaces| type_list_names(&interfaces, source))
        .unwrap_or_default();

    let extends = node
        .child_by_field_name("superclass")
        .and_then(|superclass| superclass.named_child(0))
        .map(|ty| simple_type_name(&get_node_text(&ty, source)));

    let methods = match node.child_by_field_name("body") {
        Some(body) if body.kind() == "enum_body" => {
            let mut cursor = body.walk();
            let declarations: Vec<Node> = body
                .named_children(&mut cursor)
                .filter(|c| c.kind() == "enum_body_declarations")
                .collect();
            declarations
                .iter()
                .flat_map(|decls| method_names(decls, source))
                .collect()
        }
        Some(body) => method_names(&body, source),
        None => Vec::new(),
    };

    Some(TypeFact {
        name,
        implements,
        extends,
        methods,
    })
}

/// Names of `method_declaration` children directly inside a body node
fn method_names(body: &Node, source: &str) -> Vec<String> {
    let mut cursor = body.walk();
    body.named_children(&mut cursor)
        .filter(|c| c.kind() == "method_declaration")
        .filter_map(|m| m.child_by_field_name("name"))
        .map(|n| get_node_text(&n, source))
        .collect()
}

/// Simple names of every type in the `type_list` under `node`
fn type_list_names(node: &Node, source: &str) -> Vec<String> {
    let mut names = Vec::new();
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if child.kind() == "type_list" {
            let mut list_cursor = child.walk();
            for ty in child.named_children(&mut list_cursor) {
                let name = simple_type_name(&get_node_text(&ty, source));
                if !name.is_empty() {
                    names.push(name);
                }
            }
        }
    }
    names
}

/// Reduce a type reference to its simple name.
///
/// `java.util.List<Foo>` becomes `List`, `Outer.Inner` becomes `Inner`,
/// annotations in front of the type are dropped.
pub fn simple_type_name(text: &str) -> String {
    let without_args = text.split('<').next().unwrap_or(text);
    let last_word = without_args
        .split_whitespace()
        .last()
        .unwrap_or(without_args);
    last_word
        .rsplit('.')
        .next()
        .unwrap_or(last_word)
        .trim()
        .to_string()
}

/// Get text content of a node
fn get_node_text(node: &Node, source: &str) -> String {
    node.utf8_text(source.as_bytes()).unwrap_or("").to_string()
}

/// Visit all nodes in a tree
fn visit_all<F>(node: &Node, mut visitor: F)
where
    F: FnMut(&Node),
{
    visit_all_recursive(node, &mut visitor);
}

fn visit_all_recursive<F>(node: &Node, visitor: &mut F)
where
    F: FnMut(&Node),
{
    visitor(node);
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        visit_all_recursive(&child, visitor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(source: &str) -> SourceUnit {
        parse_java(Path::new("Test.java"), source).unwrap()
    }

    #[test]
    fn test_simple_type_name() {
        assert_eq!(simple_type_name("Repo"), "Repo");
        assert_eq!(simple_type_name("java.util.List<Foo>"), "List");
        assert_eq!(simple_type_name("Outer.Inner"), "Inner");
        assert_eq!(simple_type_name("Comparable<Map.Entry<K, V>>"), "Comparable");
        assert_eq!(simple_type_name("@Nullable Handler"), "Handler");
    }

    #[test]
    fn test_extract_interface() {
        let source = r#"
package app;

public interface Repository<T> extends Closeable, java.io.Serializable {
    T find(long id);
    void save(T item);
    default void flush() {}
}
"#;
        let unit = unit(source);
        assert_eq!(unit.interfaces.len(), 1);
        let iface = &unit.interfaces[0];
        assert_eq!(iface.name, "Repository");
        assert_eq!(iface.methods, vec!["find", "save", "flush"]);
        assert_eq!(iface.extends, vec!["Closeable", "Serializable"]);
        assert!(unit.types.is_empty());
    }

    #[test]
    fn test_extract_class() {
        let source = r#"
public class SqlRepository extends BaseRepository implements Repository<User>, AutoCloseable {
    private final Connection conn;

    public SqlRepository(Connection conn) { this.conn = conn; }

    public User find(long id) { return null; }
    public void save(User u) {}
}
"#;
        let unit = unit(source);
        assert_eq!(unit.types.len(), 1);
        let ty = &unit.types[0];
        assert_eq!(ty.name, "SqlRepository");
        assert_eq!(ty.implements, vec!["Repository", "AutoCloseable"]);
        assert_eq!(ty.extends.as_deref(), Some("BaseRepository"));
        assert_eq!(ty.methods, vec!["find", "save"]);
    }

    #[test]
    fn test_extract_enum_record_and_nested() {
        let source = r#"
public class Outer {
    interface Listener { void onEvent(); }

    enum Mode implements Listener {
        ON, OFF;
        public void onEvent() {}
    }

    record Point(int x, int y) implements Comparable<Point> {
        public int compareTo(Point o) { return 0; }
    }
}
"#;
        let unit = unit(source);
        let iface_names: Vec<_> = unit.interfaces.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(iface_names, vec!["Listener"]);

        let type_names: Vec<_> = unit.types.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(type_names, vec!["Outer", "Mode", "Point"]);

        let mode = &unit.types[1];
        assert_eq!(mode.implements, vec!["Listener"]);
        assert_eq!(mode.methods, vec!["onEvent"]);
        assert!(mode.extends.is_none());

        let point = &unit.types[2];
        assert_eq!(point.implements, vec!["Comparable"]);
        assert_eq!(point.methods, vec!["compareTo"]);

        // nested method bodies do not leak into the outer class
        assert!(unit.types[0].methods.is_empty());
    }

    #[test]
    fn test_broken_source_still_yields_facts() {
        let source = r#"
interface Greeter { void greet(); }
class Broken implements Greeter {
    public void greet() { int x = ; }
}
"#;
        let unit = unit(source);
        assert_eq!(unit.interfaces.len(), 1);
        assert_eq!(unit.interfaces[0].name, "Greeter");
    }
}
