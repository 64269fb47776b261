use crate::ds::delegation_object::{delegation_create, DelegationObject};
use crate::ds::object::{MetaObject, SharedObject};
use crate::ds::object_property::PropertyKey;
use crate::ds::operations::test_and_comparison::same_object_handle;
use crate::ds::symbol::DELEGATION_SELF_MARKER;
use crate::ds::value::Value;

/// True only for an object whose node was built by this mechanism: the
/// delegation variant carrying the self-reference marker. The check is
/// one-hop, not transitive; a consumer needing transitive ancestry walks
/// [`delegates_of`] manually.
pub fn is_direct_delegation(value: &Value) -> bool {
    match value {
        Value::Object(object) => is_direct_delegation_object(object),
        _ => false,
    }
}

pub fn is_direct_delegation_object(object: &SharedObject) -> bool {
    let guard = (**object).borrow();
    match guard.as_delegation_object() {
        None => false,
        Some(delegation) => delegation
            .get_own_property(&PropertyKey::Sym(DELEGATION_SELF_MARKER.clone()))
            .is_some(),
    }
}

/// Snapshot of the delegate list behind `object`, if it is a node.
pub fn delegates_of(object: &SharedObject) -> Option<Vec<SharedObject>> {
    let guard = (**object).borrow();
    match guard.as_delegation_object() {
        None => None,
        Some(delegation) => Some(delegation.metadata().delegates),
    }
}

/// Gives `host` additional parents.
///
/// On first use this installs a delegation node as `host`'s native
/// prototype; the original parent becomes the node's first delegate so
/// prior lookup behavior stays the default. Later calls merge into the
/// same node. Entries that are not objects, and entries equal to the
/// node itself, are dropped without error.
pub fn attach_delegates(host: &SharedObject, delegates: &[Value]) {
    if delegates.is_empty() {
        return;
    }
    let current_prototype = (**host).borrow().as_meta_object().get_prototype_of();

    // The original parent keeps the highest lookup priority.
    let mut resolved: Vec<SharedObject> = Vec::with_capacity(delegates.len() + 1);
    if let Some(parent) = &current_prototype {
        resolved.push(parent.clone());
    }
    for delegate in delegates {
        // non-objects are dropped, not rejected
        if let Value::Object(object) = delegate {
            resolved.push(object.clone());
        }
    }

    let node = match current_prototype {
        Some(ref parent) if is_direct_delegation_object(parent) => parent.clone(),
        _ => {
            let fresh = delegation_create(Vec::new());
            (**host)
                .borrow_mut()
                .as_meta_object_mut()
                .set_prototype_of(Some(fresh.clone()));
            fresh
        }
    };

    // the node never delegates to itself
    resolved.retain(|delegate| !same_object_handle(delegate, &node));

    let mut guard = (*node).borrow_mut();
    if let Some(delegation) = guard.as_delegation_object_mut() {
        delegation.get_delegation_base_mut().merge_delegates(resolved);
    }
}
