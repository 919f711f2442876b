//! Canonical type string construction.

use crate::{dependencies::dependencies, Error, Types};

/// Build the canonical type string of `root`: the root declaration first, then the
/// declarations of all the struct types it depends on, sorted by name.
///
/// For example, `Mail(Person from,Person to,string contents)Person(string name,address wallet)`.
pub fn encode_type(types: &Types, root: &str) -> Result<String, Error> {
    if !types.contains_key(root) {
        return Err(Error::UnknownRootType(root.to_owned()));
    }

    let mut deps = dependencies(types, root);
    deps.retain(|dep| *dep != root);
    deps.sort_unstable();

    let mut encoded = String::new();
    for type_name in std::iter::once(root).chain(deps) {
        let Some(fields) = types.get(type_name) else {
            continue;
        };

        encoded.push_str(type_name);
        encoded.push('(');
        let mut first = true;
        for field in fields {
            if first {
                first = false;
            } else {
                encoded.push(',');
            }
            encoded.push_str(&field.ty);
            encoded.push(' ');
            encoded.push_str(&field.name);
        }
        encoded.push(')');
    }

    Ok(encoded)
}
