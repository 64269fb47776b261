//! Tests for multiple-parent delegation through a synthetic
//! prototype-chain intermediary.
//!
//! These cover node installation, delegate-list merging, lookup
//! priority, and the bookkeeping surface.

extern crate protoplex;

use std::rc::Rc;

use protoplex::ds::delegation_object::{bookkeeping_keys, delegation_create};
use protoplex::ds::object::{CoreObject, SharedObject};
use protoplex::ds::object_property::{AccessorFn, PropertyDescriptor, PropertyKey};
use protoplex::ds::operations::delegation::{
    attach_delegates, delegates_of, is_direct_delegation, is_direct_delegation_object,
};
use protoplex::ds::operations::object::{
    create_data_property, define_property, delete, describe_property, get, get_prototype,
    has_property, own_property_keys, set,
};
use protoplex::ds::symbol::SymbolData;
use protoplex::ds::value::Value;

fn str_key(name: &str) -> PropertyKey {
    PropertyKey::Str(name.to_string())
}

fn assert_same(a: &SharedObject, b: &SharedObject) {
    assert!(Rc::ptr_eq(a, b));
}

// ============================================================================
// attach_delegates
// ============================================================================

mod attach_tests {
    use super::*;

    #[test]
    fn test_attach_empty_list_is_noop() {
        let parent = CoreObject::new_shared(None);
        let host = CoreObject::new_shared(Some(parent.clone()));
        attach_delegates(&host, &[]);
        let prototype = get_prototype(&host).unwrap();
        assert_same(&prototype, &parent);
        assert!(!is_direct_delegation_object(&prototype));
    }

    #[test]
    fn test_first_attach_installs_node_with_original_parent_first() {
        let parent = CoreObject::new_shared(None);
        let extra = CoreObject::new_shared(None);
        let host = CoreObject::new_shared(Some(parent.clone()));
        attach_delegates(&host, &[Value::Object(extra.clone())]);

        let node = get_prototype(&host).unwrap();
        assert!(is_direct_delegation_object(&node));
        let delegates = delegates_of(&node).unwrap();
        assert_eq!(delegates.len(), 2);
        assert_same(&delegates[0], &parent);
        assert_same(&delegates[1], &extra);
    }

    #[test]
    fn test_second_attach_reuses_node() {
        let parent = CoreObject::new_shared(None);
        let first = CoreObject::new_shared(None);
        let second = CoreObject::new_shared(None);
        let host = CoreObject::new_shared(Some(parent.clone()));

        attach_delegates(&host, &[Value::Object(first.clone())]);
        let node = get_prototype(&host).unwrap();
        attach_delegates(&host, &[Value::Object(second.clone())]);
        let node_again = get_prototype(&host).unwrap();

        assert_same(&node, &node_again);
        let delegates = delegates_of(&node).unwrap();
        assert_eq!(delegates.len(), 3);
        assert_same(&delegates[0], &parent);
        assert_same(&delegates[1], &first);
        assert_same(&delegates[2], &second);
    }

    #[test]
    fn test_attach_to_host_without_prototype() {
        let extra = CoreObject::new_shared(None);
        let host = CoreObject::new_shared(None);
        attach_delegates(&host, &[Value::Object(extra.clone())]);

        let node = get_prototype(&host).unwrap();
        let delegates = delegates_of(&node).unwrap();
        assert_eq!(delegates.len(), 1);
        assert_same(&delegates[0], &extra);
    }

    #[test]
    fn test_malformed_entries_silently_dropped() {
        let parent = CoreObject::new_shared(None);
        let extra = CoreObject::new_shared(None);
        let host = CoreObject::new_shared(Some(parent.clone()));
        attach_delegates(
            &host,
            &[
                Value::Null,
                Value::Undefined,
                Value::Number(5.0),
                Value::Object(extra.clone()),
                Value::String("not an object".to_string()),
            ],
        );

        let node = get_prototype(&host).unwrap();
        let delegates = delegates_of(&node).unwrap();
        assert_eq!(delegates.len(), 2);
        assert_same(&delegates[0], &parent);
        assert_same(&delegates[1], &extra);
    }

    #[test]
    fn test_node_identity_excluded_even_if_passed_in() {
        let parent = CoreObject::new_shared(None);
        let extra = CoreObject::new_shared(None);
        let host = CoreObject::new_shared(Some(parent.clone()));
        attach_delegates(&host, &[Value::Object(extra.clone())]);
        let node = get_prototype(&host).unwrap();

        attach_delegates(&host, &[Value::Object(node.clone())]);

        let delegates = delegates_of(&node).unwrap();
        assert_eq!(delegates.len(), 2);
        assert_same(&delegates[0], &parent);
        assert_same(&delegates[1], &extra);
    }

    #[test]
    fn test_duplicate_delegate_not_added_twice() {
        let parent = CoreObject::new_shared(None);
        let extra = CoreObject::new_shared(None);
        let host = CoreObject::new_shared(Some(parent.clone()));

        attach_delegates(&host, &[Value::Object(extra.clone())]);
        attach_delegates(&host, &[Value::Object(extra.clone())]);

        let node = get_prototype(&host).unwrap();
        let delegates = delegates_of(&node).unwrap();
        assert_eq!(delegates.len(), 2);
        assert_same(&delegates[0], &parent);
        assert_same(&delegates[1], &extra);
    }

    #[test]
    fn test_nodes_are_not_shared_between_hosts() {
        let extra = CoreObject::new_shared(None);
        let host_a = CoreObject::new_shared(None);
        let host_b = CoreObject::new_shared(None);

        attach_delegates(&host_a, &[Value::Object(extra.clone())]);
        attach_delegates(&host_b, &[Value::Object(extra.clone())]);

        let node_a = get_prototype(&host_a).unwrap();
        let node_b = get_prototype(&host_b).unwrap();
        assert!(!Rc::ptr_eq(&node_a, &node_b));
    }
}

// ============================================================================
// the direct-instance check
// ============================================================================

mod instance_tests {
    use super::*;

    #[test]
    fn test_falsy_for_non_objects() {
        assert!(!is_direct_delegation(&Value::Null));
        assert!(!is_direct_delegation(&Value::Undefined));
        assert!(!is_direct_delegation(&Value::Number(5.0)));
        assert!(!is_direct_delegation(&Value::Boolean(true)));
        assert!(!is_direct_delegation(&Value::String("node".to_string())));
    }

    #[test]
    fn test_false_for_plain_object() {
        let object = CoreObject::new_shared(None);
        assert!(!is_direct_delegation(&Value::Object(object)));
    }

    #[test]
    fn test_true_for_freshly_created_node() {
        let node = delegation_create(Vec::new());
        assert!(is_direct_delegation(&Value::Object(node)));
    }

    #[test]
    fn test_true_for_installed_node() {
        let extra = CoreObject::new_shared(None);
        let host = CoreObject::new_shared(None);
        attach_delegates(&host, &[Value::Object(extra)]);
        let node = get_prototype(&host).unwrap();
        assert!(is_direct_delegation(&Value::Object(node)));
    }

    #[test]
    fn test_false_for_host_of_a_node() {
        let extra = CoreObject::new_shared(None);
        let host = CoreObject::new_shared(None);
        attach_delegates(&host, &[Value::Object(extra)]);
        // the check is one-hop: the host is not itself a node
        assert!(!is_direct_delegation(&Value::Object(host)));
    }
}

// ============================================================================
// lookup resolution across delegates
// ============================================================================

mod lookup_tests {
    use super::*;

    #[test]
    fn test_first_match_in_order_wins() {
        let first = CoreObject::new_shared(None);
        let second = CoreObject::new_shared(None);
        create_data_property(&second, str_key("k"), Value::Number(7.0));

        let host = CoreObject::new_shared(None);
        attach_delegates(
            &host,
            &[Value::Object(first.clone()), Value::Object(second.clone())],
        );
        assert_eq!(get(&host, &str_key("k")).unwrap(), Value::Number(7.0));

        // once the higher-priority delegate defines k, it shadows
        create_data_property(&first, str_key("k"), Value::Number(3.0));
        assert_eq!(get(&host, &str_key("k")).unwrap(), Value::Number(3.0));
    }

    #[test]
    fn test_missing_property_is_undefined() {
        let extra = CoreObject::new_shared(None);
        let host = CoreObject::new_shared(None);
        attach_delegates(&host, &[Value::Object(extra)]);
        assert_eq!(get(&host, &str_key("missing")).unwrap(), Value::Undefined);
        assert!(!has_property(&host, &str_key("missing")));
    }

    #[test]
    fn test_own_property_shadows_delegates() {
        let extra = CoreObject::new_shared(None);
        create_data_property(&extra, str_key("k"), Value::Number(7.0));
        let host = CoreObject::new_shared(None);
        attach_delegates(&host, &[Value::Object(extra)]);
        create_data_property(&host, str_key("k"), Value::Number(1.0));
        assert_eq!(get(&host, &str_key("k")).unwrap(), Value::Number(1.0));
    }

    #[test]
    fn test_lookup_walks_delegate_own_prototype_chain() {
        let grandparent = CoreObject::new_shared(None);
        create_data_property(&grandparent, str_key("k"), Value::Number(9.0));
        let delegate = CoreObject::new_shared(Some(grandparent.clone()));

        let host = CoreObject::new_shared(None);
        attach_delegates(&host, &[Value::Object(delegate)]);
        assert!(has_property(&host, &str_key("k")));
        assert_eq!(get(&host, &str_key("k")).unwrap(), Value::Number(9.0));
    }

    #[test]
    fn test_node_describes_delegate_own_properties() {
        let extra = CoreObject::new_shared(None);
        create_data_property(&extra, str_key("k"), Value::Number(7.0));
        let host = CoreObject::new_shared(None);
        attach_delegates(&host, &[Value::Object(extra)]);

        let node = get_prototype(&host).unwrap();
        let descriptor = describe_property(&node, &str_key("k")).unwrap();
        match descriptor {
            PropertyDescriptor::Data { value, .. } => assert_eq!(value, Value::Number(7.0)),
            _ => panic!("expected a data descriptor"),
        }
    }

    #[test]
    fn test_node_does_not_describe_delegate_inherited_properties() {
        // the descriptor fan-out stays own-level, unlike get/has
        let grandparent = CoreObject::new_shared(None);
        create_data_property(&grandparent, str_key("k"), Value::Number(9.0));
        let delegate = CoreObject::new_shared(Some(grandparent));
        let host = CoreObject::new_shared(None);
        attach_delegates(&host, &[Value::Object(delegate)]);

        let node = get_prototype(&host).unwrap();
        assert!(describe_property(&node, &str_key("k")).is_none());
    }

    #[test]
    fn test_accessor_resolves_with_original_receiver() {
        let delegate = CoreObject::new_shared(None);
        let host = CoreObject::new_shared(None);

        let expected = host.clone();
        let getter: Rc<AccessorFn> = Rc::new(move |receiver, _args| {
            Ok(Value::Boolean(match receiver {
                Value::Object(o) => Rc::ptr_eq(o, &expected),
                _ => false,
            }))
        });
        define_property(
            &delegate,
            str_key("mine"),
            PropertyDescriptor::Accessor {
                get: Some(getter),
                set: None,
                enumerable: true,
                configurable: true,
            },
        );

        attach_delegates(&host, &[Value::Object(delegate)]);
        assert_eq!(get(&host, &str_key("mine")).unwrap(), Value::Boolean(true));
    }
}

// ============================================================================
// writes stay native
// ============================================================================

mod write_tests {
    use super::*;

    #[test]
    fn test_write_lands_on_receiver_not_on_delegates() {
        let extra = CoreObject::new_shared(None);
        create_data_property(&extra, str_key("k"), Value::Number(7.0));
        let host = CoreObject::new_shared(None);
        attach_delegates(&host, &[Value::Object(extra.clone())]);

        assert!(set(&host, str_key("k"), Value::Number(5.0)).unwrap());

        assert_eq!(get(&host, &str_key("k")).unwrap(), Value::Number(5.0));
        // the delegate keeps its own value
        assert_eq!(get(&extra, &str_key("k")).unwrap(), Value::Number(7.0));
        // and the node gained nothing
        let node = get_prototype(&host).unwrap();
        assert!(own_property_keys(&node)
            .iter()
            .all(|key| key != &str_key("k")));
    }

    #[test]
    fn test_delete_on_node_never_touches_delegates() {
        let extra = CoreObject::new_shared(None);
        create_data_property(&extra, str_key("k"), Value::Number(7.0));
        let host = CoreObject::new_shared(None);
        attach_delegates(&host, &[Value::Object(extra.clone())]);

        let node = get_prototype(&host).unwrap();
        // absent from the node's own storage, so the delete trivially succeeds
        assert!(delete(&node, &str_key("k")));
        assert!(has_property(&extra, &str_key("k")));
        assert_eq!(get(&host, &str_key("k")).unwrap(), Value::Number(7.0));
    }

    #[test]
    fn test_write_of_new_key_creates_own_property() {
        let extra = CoreObject::new_shared(None);
        let host = CoreObject::new_shared(None);
        attach_delegates(&host, &[Value::Object(extra.clone())]);

        assert!(set(&host, str_key("fresh"), Value::Number(1.0)).unwrap());
        assert!(own_property_keys(&host).contains(&str_key("fresh")));
        assert!(!has_property(&extra, &str_key("fresh")));
    }
}

// ============================================================================
// enumeration and bookkeeping
// ============================================================================

mod bookkeeping_tests {
    use super::*;

    #[test]
    fn test_node_keys_exclude_delegate_keys() {
        let extra = CoreObject::new_shared(None);
        create_data_property(&extra, str_key("visible"), Value::Number(1.0));
        let host = CoreObject::new_shared(None);
        attach_delegates(&host, &[Value::Object(extra)]);

        let node = get_prototype(&host).unwrap();
        let keys = own_property_keys(&node);
        assert!(!keys.contains(&str_key("visible")));
        // only the bookkeeping symbols remain
        assert_eq!(keys.len(), bookkeeping_keys().len());
        for key in bookkeeping_keys() {
            assert!(keys.contains(&key));
        }
    }

    #[test]
    fn test_host_keys_exclude_inherited_keys() {
        let extra = CoreObject::new_shared(None);
        create_data_property(&extra, str_key("inherited"), Value::Number(1.0));
        let host = CoreObject::new_shared(None);
        create_data_property(&host, str_key("own"), Value::Number(2.0));
        attach_delegates(&host, &[Value::Object(extra)]);

        let keys = own_property_keys(&host);
        assert_eq!(keys, vec![str_key("own")]);
    }

    #[test]
    fn test_bookkeeping_keys_do_not_collide_with_string_keys() {
        let node = delegation_create(Vec::new());
        // a string key spelled exactly like a bookkeeping symbol's
        // description is still a different key
        for key in bookkeeping_keys() {
            let description = match &key {
                PropertyKey::Sym(symbol) => symbol.description().to_string(),
                other => panic!("unexpected bookkeeping key {}", other),
            };
            assert!(create_data_property(
                &node,
                PropertyKey::Str(description),
                Value::Number(1.0)
            ));
        }
        assert_eq!(own_property_keys(&node).len(), 2 * bookkeeping_keys().len());
    }

    #[test]
    fn test_bookkeeping_symbols_cannot_be_forged() {
        let forged = SymbolData::new("delegation.self".to_string());
        assert!(!bookkeeping_keys().contains(&PropertyKey::Sym(forged)));
    }
}
