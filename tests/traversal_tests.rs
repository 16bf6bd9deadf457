//! Unit tests for traversal combinators.
//!
//! Tests cover:
//! - `each_list`, `each_set`, `each_collection`, `each_iterable`
//! - `each_sorted_set` keeping the comparator and element count
//! - Traversals nested in field lenses and in each other

#![forbid(unsafe_code)]

use std::collections::{BTreeSet, HashSet, VecDeque};

use fieldlens::lens;
use fieldlens::optics::{
    _1, Setter, each_collection, each_iterable, each_list, each_set, each_sorted_set, identity,
};
use fieldlens::persistent::{PersistentList, SortedSet};
use rstest::rstest;

// =============================================================================
// Test Data Structures
// =============================================================================

#[derive(Clone, PartialEq, Debug)]
struct Team {
    name: String,
    members: Vec<Member>,
}

#[derive(Clone, PartialEq, Debug)]
struct Member {
    name: String,
    skills: Vec<String>,
}

fn team() -> Team {
    Team {
        name: "core".to_string(),
        members: vec![
            Member {
                name: "ann".to_string(),
                skills: vec!["rust".to_string(), "sql".to_string()],
            },
            Member {
                name: "bo".to_string(),
                skills: vec!["go".to_string()],
            },
        ],
    }
}

// =============================================================================
// Lists
// =============================================================================

#[rstest]
fn test_each_list_through_field_lenses() {
    let member_names = each_list(lens!(Team, members), lens!(Member, name));
    let renamed = member_names.modify(team(), |name| name.to_uppercase());

    assert_eq!(renamed.members[0].name, "ANN");
    assert_eq!(renamed.members[1].name, "BO");
    assert_eq!(renamed.name, "core");
    assert_eq!(renamed.members[0].skills, team().members[0].skills);
}

#[rstest]
fn test_nested_traversals() {
    let every_member = each_list(lens!(Team, members), identity::<Member>());
    let every_skill = every_member.and_then(each_list(lens!(Member, skills), identity::<String>()));

    let tagged = every_skill.modify(team(), |skill| format!("#{skill}"));
    assert_eq!(tagged.members[0].skills, vec!["#rust", "#sql"]);
    assert_eq!(tagged.members[1].skills, vec!["#go"]);
}

#[rstest]
fn test_each_list_set_replaces_every_element() {
    let every = each_list(identity::<Vec<u8>>(), identity::<u8>());
    assert_eq!(every.set(vec![1, 2, 3], 0), vec![0, 0, 0]);
    assert_eq!(every.set(Vec::new(), 7), Vec::<u8>::new());
}

#[rstest]
fn test_each_list_over_tuple_slots() {
    let every_first = each_list(identity::<Vec<(i32, char)>>(), _1::<(i32, char)>());
    let shifted = every_first.modify(vec![(1, 'a'), (2, 'b')], |n| n + 100);
    assert_eq!(shifted, vec![(101, 'a'), (102, 'b')]);
}

// =============================================================================
// Sets
// =============================================================================

#[rstest]
fn test_each_set_rebuilds_hash_set() {
    let every = each_set(identity::<HashSet<i32>>(), identity::<i32>());
    let squared = every.modify(HashSet::from([-2, 2, 3]), |n| n * n);
    assert_eq!(squared, HashSet::from([4, 9]));
}

#[rstest]
#[case(vec![5, 1, 3])]
#[case(vec![])]
#[case(vec![42])]
fn test_each_sorted_set_keeps_comparator_and_count(#[case] values: Vec<i32>) {
    let descending = SortedSet::with_comparator(|a: &i32, b: &i32| b.cmp(a));
    let set = values.iter().fold(descending, |set, value| set.insert(*value));
    let every = each_sorted_set(identity::<SortedSet<i32>>(), identity::<i32>());

    let shifted = every.modify(set.clone(), |n| n + 1);

    assert!(shifted.same_ordering(&set));
    assert_eq!(shifted.len(), set.len());
    let mut expected: Vec<i32> = values.iter().map(|n| n + 1).collect();
    expected.sort_by(|a, b| b.cmp(a));
    assert_eq!(shifted.iter().copied().collect::<Vec<_>>(), expected);
}

#[rstest]
fn test_each_sorted_set_natural_order() {
    let set: SortedSet<String> = ["b", "a"].into_iter().map(String::from).collect();
    let every = each_sorted_set(identity::<SortedSet<String>>(), identity::<String>());

    let prefixed = every.modify(set, |text| format!("x{text}"));
    assert_eq!(prefixed.iter().cloned().collect::<Vec<_>>(), ["xa", "xb"]);
}

// =============================================================================
// Other Collections
// =============================================================================

#[rstest]
fn test_each_collection_on_deque_and_btree_set() {
    let every_in_deque = each_collection(identity::<VecDeque<i32>>(), identity::<i32>());
    assert_eq!(
        every_in_deque.modify(VecDeque::from([1, 2]), |n| -n),
        VecDeque::from([-1, -2])
    );

    let every_in_set = each_collection(identity::<BTreeSet<char>>(), identity::<char>());
    assert_eq!(
        every_in_set.modify(BTreeSet::from(['a', 'b']), |c| c.to_ascii_uppercase()),
        BTreeSet::from(['A', 'B'])
    );
}

#[rstest]
fn test_each_iterable_leaves_source_list_intact() {
    let list: PersistentList<i32> = (1..=3).collect();
    let every = each_iterable(identity::<PersistentList<i32>>(), identity::<i32>());

    let doubled = every.modify(list.clone(), |n| n * 2);

    assert_eq!(doubled.iter().copied().collect::<Vec<_>>(), vec![2, 4, 6]);
    assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
}
