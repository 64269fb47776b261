//! # protoplex - multiple-parent delegation for a single-prototype object model
//!
//! An object model in which any object can be given several "parents" even
//! though the model itself only has a single prototype slot. A synthetic
//! intermediary, the delegation node, is installed as the object's one
//! native prototype and fans property lookups out across an ordered list of
//! delegate objects.
//!
//! ## Quick Start
//!
//! ### Building objects
//!
//! ```
//! use protoplex::ds::object::CoreObject;
//! use protoplex::ds::object_property::PropertyKey;
//! use protoplex::ds::operations::object::{create_data_property, get};
//! use protoplex::ds::value::Value;
//!
//! let point = CoreObject::new_shared(None);
//! create_data_property(&point, PropertyKey::Str("x".to_string()), Value::Number(3.0));
//!
//! let x = get(&point, &PropertyKey::Str("x".to_string())).unwrap();
//! assert_eq!(x, Value::Number(3.0));
//! ```
//!
//! ### Attaching extra parents
//!
//! ```
//! use protoplex::ds::object::CoreObject;
//! use protoplex::ds::object_property::PropertyKey;
//! use protoplex::ds::operations::delegation::attach_delegates;
//! use protoplex::ds::operations::object::{create_data_property, get};
//! use protoplex::ds::value::Value;
//!
//! let walker = CoreObject::new_shared(None);
//! create_data_property(
//!     &walker,
//!     PropertyKey::Str("walk".to_string()),
//!     Value::String("walking".to_string()),
//! );
//!
//! let swimmer = CoreObject::new_shared(None);
//! create_data_property(
//!     &swimmer,
//!     PropertyKey::Str("swim".to_string()),
//!     Value::String("swimming".to_string()),
//! );
//!
//! // A duck walks like its original parent and swims like the new one.
//! let duck = CoreObject::new_shared(Some(walker.clone()));
//! attach_delegates(&duck, &[Value::Object(swimmer.clone())]);
//!
//! let walk = get(&duck, &PropertyKey::Str("walk".to_string())).unwrap();
//! let swim = get(&duck, &PropertyKey::Str("swim".to_string())).unwrap();
//! assert_eq!(walk, Value::String("walking".to_string()));
//! assert_eq!(swim, Value::String("swimming".to_string()));
//! ```
//!
//! ## How it works
//!
//! The first time an object gains a second parent, a delegation node is
//! allocated and installed as the object's native prototype. The object's
//! original parent becomes the node's first, highest-priority delegate, so
//! prior lookup behavior is preserved by default. Later attachments merge
//! into the same node; a host object never owns more than one.
//!
//! Lookups (`get`, `has_property`, `describe_property`) fall through the
//! native single-prototype mechanism into the node, which consults its
//! delegates in order and answers with the first match. Writes and deletes
//! are *not* fanned out: a write through the chain creates the property on
//! the original receiver, exactly as the native model would, so delegates
//! are never mutated behind the caller's back.
//!
//! ## Architecture
//!
//! - **[`ds`]** - Data structures (values, objects, property storage)
//!   - **[`ds::delegation_object`]** - The delegation node
//!   - **[`ds::operations`]** - Algorithms over shared object handles

#[macro_use]
extern crate lazy_static;

pub mod ds;
