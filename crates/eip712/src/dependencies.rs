//! Struct type dependency resolution.

use std::collections::BTreeSet;

use crate::Types;

/// Collect the struct types reachable from `root`, `root` included, in depth-first
/// discovery order.
///
/// Names that are not declared in `types` are primitives and are skipped. Every type is
/// visited once, so self-referencing and mutually referencing types terminate.
pub fn dependencies<'a>(types: &'a Types, root: &'a str) -> Vec<&'a str> {
    let mut found = Vec::new();
    if !types.contains_key(root) {
        return found;
    }

    let mut visited = BTreeSet::new();
    visited.insert(root);
    found.push(root);

    // Frames of (type name, index of the next field to visit).
    let mut stack = vec![(root, 0usize)];
    while let Some(frame) = stack.last_mut() {
        let (type_name, next_field) = *frame;
        let Some(field) = types.get(type_name).and_then(|fields| fields.get(next_field)) else {
            stack.pop();
            continue;
        };
        frame.1 += 1;

        let dependency = field.ty.as_str();
        if !types.contains_key(dependency) || !visited.insert(dependency) {
            continue;
        }
        found.push(dependency);
        stack.push((dependency, 0));
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FieldDef;

    fn types(decls: &[(&str, &[(&str, &str)])]) -> Types {
        decls
            .iter()
            .map(|(name, fields)| {
                (
                    (*name).to_owned(),
                    fields
                        .iter()
                        .map(|(name, ty)| FieldDef::new(*name, *ty))
                        .collect(),
                )
            })
            .collect()
    }

    #[test]
    fn depth_first_order() {
        let types = types(&[
            ("A", &[("c", "C"), ("b", "B")]),
            ("B", &[("d", "D")]),
            ("C", &[("d", "D"), ("x", "uint256")]),
            ("D", &[("s", "string")]),
        ]);
        assert_eq!(dependencies(&types, "A"), vec!["A", "C", "D", "B"]);
    }

    #[test]
    fn primitives_are_skipped() {
        let types = types(&[("A", &[("x", "uint256"), ("y", "address")])]);
        assert_eq!(dependencies(&types, "A"), vec!["A"]);
    }

    #[test]
    fn unknown_root_yields_nothing() {
        let types = types(&[("A", &[])]);
        assert!(dependencies(&types, "B").is_empty());
    }

    #[test]
    fn self_reference_terminates() {
        let types = types(&[("Node", &[("next", "Node"), ("value", "uint8")])]);
        assert_eq!(dependencies(&types, "Node"), vec!["Node"]);
    }

    #[test]
    fn mutual_reference_terminates() {
        let types = types(&[("A", &[("b", "B")]), ("B", &[("a", "A")])]);
        assert_eq!(dependencies(&types, "A"), vec!["A", "B"]);
        assert_eq!(dependencies(&types, "B"), vec!["B", "A"]);
    }

    #[test]
    fn array_types_are_not_dependencies() {
        let types = types(&[("A", &[("bs", "B[]")]), ("B", &[])]);
        assert_eq!(dependencies(&types, "A"), vec!["A"]);
    }

    #[test]
    fn deep_chain_does_not_recurse() {
        let depth = 10_000;
        let mut decls = Types::new();
        for i in 0..depth {
            decls.insert(
                format!("T{i}"),
                vec![FieldDef::new("next", format!("T{}", i + 1))],
            );
        }
        decls.insert(format!("T{depth}"), vec![]);

        assert_eq!(dependencies(&decls, "T0").len(), depth + 1);
    }
}
