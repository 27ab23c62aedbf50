use super::*;

use indexmap::IndexMap;
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Op {
    Put(String, u8),
    Remove(u8),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => ("[a-cA-C]{1,2}", 0u8..6).prop_map(|(key, value)| Op::Put(key, value)),
        2 => (0u8..6).prop_map(Op::Remove),
    ]
}

fn validate_map<V>(map: &NodeMap<V>) {
    let len = map.len();
    assert_eq!(map.is_empty(), len == 0, "empty iff no entries");
    assert_eq!(map.is_expanded(), len >= 2, "table iff two or more entries");
    assert_eq!(map.iter().count(), len, "iteration must yield len entries");
    for key in map.keys() {
        assert_eq!(&**key, key.to_uppercase(), "stored keys are normalized");
    }
}

proptest! {
    #[test]
    fn it_matches_a_reference_map(ops in prop::collection::vec(op(), 0..64)) {
        let mut map = NodeMap::new();
        let mut reference: IndexMap<String, u8> = IndexMap::new();

        for op in ops {
            match op {
                Op::Put(key, value) => {
                    prop_assert_eq!(*map.put(&key, value), value);
                    reference.insert(key.to_uppercase(), value);
                }
                Op::Remove(value) => {
                    let expected = match reference.values().position(|v| *v == value) {
                        Some(index) => reference
                            .shift_remove_index(index)
                            .ok_or(RemoveError::NotFound),
                        None if reference.is_empty() => Err(RemoveError::Empty),
                        None => Err(RemoveError::NotFound),
                    };
                    let actual = map
                        .remove(&value)
                        .map(|(key, value)| (key.to_string(), value));
                    prop_assert_eq!(actual, expected);
                }
            }

            validate_map(&map);
            prop_assert_eq!(map.len(), reference.len());
            let keys: Vec<String> = map.key_set().iter().map(|k| k.to_string()).collect();
            let expected_keys: Vec<String> = reference.keys().cloned().collect();
            prop_assert_eq!(keys, expected_keys);
            for (key, value) in &reference {
                prop_assert_eq!(map.get(&key.to_lowercase()), Some(value));
                prop_assert!(map.contains_key(key));
            }
            prop_assert!(!map.contains_key("zz"));
        }
    }

    #[test]
    fn it_finds_keys_in_any_case(key in "[a-zA-Z0-9 *_]{1,12}", value in any::<u32>()) {
        let mut map = NodeMap::new();
        map.put(&key, value);
        prop_assert_eq!(map.get(&key.to_lowercase()), Some(&value));
        prop_assert_eq!(map.get(&key.to_uppercase()), Some(&value));
        prop_assert!(map.contains_key(&key));

        map.put("other", value.wrapping_add(1));
        prop_assert_eq!(map.get(&key.to_lowercase()), Some(&value));
        prop_assert!(map.contains_key(&key.to_uppercase()));
    }

    #[test]
    fn it_grows_only_on_new_keys(keys in prop::collection::vec("[a-dA-D]", 0..24)) {
        let mut map = NodeMap::new();
        for (i, key) in keys.iter().enumerate() {
            let before = map.len();
            let fresh = !map.contains_key(key);
            map.put(key, i);
            prop_assert_eq!(map.len(), before + usize::from(fresh));
        }
    }

    #[test]
    fn it_never_changes_on_a_missed_remove(
        keys in prop::collection::vec("[a-e]", 0..6),
        missing in 100u32..200,
    ) {
        let mut map = NodeMap::new();
        for (i, key) in keys.iter().enumerate() {
            map.put(key, i as u32);
        }
        let before = map.clone();
        prop_assert!(map.remove(&missing).is_err());
        prop_assert_eq!(&map, &before);
        prop_assert_eq!(map.key_set(), before.key_set());
    }
}
