#![no_main]

use libfuzzer_sys::fuzz_target;
use waycache::ds::RecencyList;

// Fuzz arbitrary operation sequences on RecencyList
//
// Tests random sequences of push_back, move_to_back, remove, get, contains,
// and clear operations, cross-checking both iteration directions and the
// linkage invariants after every step.
fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let mut list: RecencyList<u32> = RecencyList::new();
    let mut all_ids = Vec::new();

    let mut idx = 0;
    while idx + 1 < data.len() {
        let op = data[idx] % 8;
        let value = u32::from(data[idx + 1]);

        match op {
            0 => {
                // push_back
                let id = list.push_back(value);
                all_ids.push(id);

                assert_eq!(list.back(), Some(&value));
                assert_eq!(list.back_id(), Some(id));
                assert!(list.contains(id));
                assert_eq!(list.get(id), Some(&value));
            }
            1 => {
                // move_to_back
                if !all_ids.is_empty() {
                    let id = all_ids[(value as usize) % all_ids.len()];

                    let was_moved = list.move_to_back(id);
                    if was_moved {
                        assert_eq!(list.back_id(), Some(id));
                    } else {
                        assert!(!list.contains(id));
                    }
                }
            }
            2 => {
                // remove
                if !all_ids.is_empty() {
                    let id = all_ids[(value as usize) % all_ids.len()];

                    let old_len = list.len();
                    let removed = list.remove(id);

                    if removed.is_some() {
                        assert_eq!(list.len(), old_len - 1);
                        assert!(!list.contains(id));
                    }
                }
            }
            3 => {
                // get (read-only)
                if !all_ids.is_empty() {
                    let id = all_ids[(value as usize) % all_ids.len()];
                    let _ = list.get(id);
                }
            }
            4 => {
                // get_mut rewrites the value in place
                if !all_ids.is_empty() {
                    let id = all_ids[(value as usize) % all_ids.len()];
                    if let Some(slot) = list.get_mut(id) {
                        *slot = value;
                        assert_eq!(list.get(id), Some(&value));
                    }
                }
            }
            5 => {
                // both iteration directions agree
                let forward: Vec<u32> = list.iter().map(|(_, v)| *v).collect();
                let mut backward: Vec<u32> = list.iter_descending().map(|(_, v)| *v).collect();
                backward.reverse();
                assert_eq!(forward, backward);
                assert_eq!(forward.len(), list.len());
            }
            6 => {
                // front/back consistency
                if list.is_empty() {
                    assert_eq!(list.len(), 0);
                    assert_eq!(list.front(), None);
                    assert_eq!(list.back(), None);
                } else {
                    assert!(list.front().is_some());
                    assert!(list.back().is_some());
                }
            }
            7 => {
                // clear
                list.clear();
                all_ids.clear();

                assert!(list.is_empty());
                assert_eq!(list.front_id(), None);
                assert_eq!(list.back_id(), None);
            }
            _ => unreachable!(),
        }

        list.check_invariants().expect("linkage invariants");

        idx += 2;
    }
});
