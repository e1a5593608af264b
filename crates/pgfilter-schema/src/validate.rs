//! Snapshot validation.
//!
//! Every violation is collected before failing so one load reports the
//! whole snapshot's problems.

use crate::{
    catalog::CatalogSnapshot,
    error::{CatalogError, Violation, Violations},
    types::Oid,
};
use std::collections::BTreeSet;

/// Validate a snapshot's internal consistency.
pub fn validate_snapshot(snapshot: &CatalogSnapshot) -> Result<(), CatalogError> {
    let mut errs = Violations::new();

    // Phase 1: ids are unique per collection.
    let namespaces = collect_ids(&mut errs, "namespace", snapshot.namespaces.iter().map(|n| n.id));
    let classes = collect_ids(&mut errs, "class", snapshot.classes.iter().map(|c| c.id));
    let types = collect_ids(&mut errs, "type", snapshot.types.iter().map(|t| t.id));
    collect_ids(
        &mut errs,
        "procedure",
        snapshot.procedures.iter().map(|p| p.id),
    );

    // Phase 2: references resolve.
    let mut check = |owner: &dyn Fn() -> String, kind: &'static str, ids: &BTreeSet<Oid>, id: Oid| {
        if !ids.contains(&id) {
            errs.add(Violation::DanglingReference {
                owner: owner(),
                kind,
                id,
            });
        }
    };

    for class in &snapshot.classes {
        let owner = || format!("class '{}'", class.name);
        check(&owner, "namespace", &namespaces, class.namespace_id);
        check(&owner, "type", &types, class.type_id);
    }

    for ty in &snapshot.types {
        let owner = || format!("type '{}'", ty.name);
        check(&owner, "namespace", &namespaces, ty.namespace_id);
        if let Some(id) = ty.class_id {
            check(&owner, "class", &classes, id);
        }
        if let Some(id) = ty.array_item_type_id {
            check(&owner, "type", &types, id);
        }
        if let Some(id) = ty.domain_base_type_id {
            check(&owner, "type", &types, id);
        }
    }

    for proc in &snapshot.procedures {
        let owner = || format!("procedure '{}'", proc.name);
        check(&owner, "namespace", &namespaces, proc.namespace_id);
        check(&owner, "type", &types, proc.return_type_id);
        for &id in &proc.arg_type_ids {
            check(&owner, "type", &types, id);
        }
    }

    // Phase 3: argument arrays are parallel.
    for proc in &snapshot.procedures {
        let arity = proc.arg_type_ids.len();

        if !proc.arg_names.is_empty() && proc.arg_names.len() != arity {
            errs.add(Violation::ArgNameArity {
                procedure: proc.name.clone(),
                names: proc.arg_names.len(),
                types: arity,
            });
        }
        if !proc.arg_modes.is_empty() && proc.arg_modes.len() != arity {
            errs.add(Violation::ArgModeArity {
                procedure: proc.name.clone(),
                modes: proc.arg_modes.len(),
                types: arity,
            });
        }
    }

    errs.result()
}

fn collect_ids(
    errs: &mut Violations,
    kind: &'static str,
    ids: impl Iterator<Item = Oid>,
) -> BTreeSet<Oid> {
    let mut seen = BTreeSet::new();
    for id in ids {
        if !seen.insert(id) {
            errs.add(Violation::DuplicateId { kind, id });
        }
    }

    seen
}
