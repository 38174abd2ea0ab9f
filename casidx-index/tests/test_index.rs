//! Integration tests for the annotation index.
//!
//! Scenarios run against the shared data under `tests/data/casidx`, and the subiterator is
//! checked against a brute force reading of its inclusion rules over random inputs.

use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::{fixture, rstest};

use casidx_core::models::{Annotation, AnnotationSet, FsId, TypeId, TypePriorityBuilder, TypeSystem};
use casidx_core::predicates::SpanPredicates;
use casidx_core::utils::read_text;
use casidx_index::{AnnotationIndex, IndexConfig, IndexError, IndexOptions, SameSpanPolicy, Schema};

#[fixture]
fn path_to_data() -> PathBuf {
    PathBuf::from("../tests/data/casidx")
}

struct Loaded {
    schema: Schema,
    index: AnnotationIndex,
    set: AnnotationSet,
    text: String,
}

fn load(path: &Path) -> Loaded {
    let schema = IndexConfig::try_from(path.join("config.toml").as_path())
        .unwrap()
        .build()
        .unwrap();
    let set = AnnotationSet::from_path(&path.join("annotations.tsv"), &schema.type_system).unwrap();
    let mut index = schema.index();
    index.extend(set.iter().copied());
    let text = read_text(&path.join("text.txt")).unwrap();
    Loaded {
        schema,
        index,
        set,
        text,
    }
}

fn ann(id: u32, t: TypeId, begin: u32, end: u32) -> Annotation {
    Annotation::new(FsId(id), t, begin, end).unwrap()
}

#[rstest]
fn test_sentences_and_tokens_from_files(path_to_data: PathBuf) {
    let data = load(&path_to_data);
    assert_eq!(data.index.len(), data.set.len());

    let paragraph = data.set.get(FsId(0)).unwrap();
    let tree = data.index.tree(paragraph).unwrap();

    let sentences: Vec<&str> = tree
        .root()
        .children()
        .map(|n| n.annotation().covered_text(&data.text).unwrap())
        .collect();
    assert_eq!(sentences, vec!["The cat sat.", "It purred."]);

    let words: Vec<Vec<&str>> = tree
        .root()
        .children()
        .map(|s| {
            s.children()
                .map(|t| t.annotation().covered_text(&data.text).unwrap())
                .collect()
        })
        .collect();
    assert_eq!(
        words,
        vec![vec!["The", "cat", "sat", "."], vec!["It", "purred", "."]]
    );
    assert_eq!(tree.iter().all(|n| n.depth() < 2 || n.is_leaf()), true);
}

#[rstest]
fn test_per_type_view_includes_subtypes(path_to_data: PathBuf) {
    let data = load(&path_to_data);
    let ts = &data.schema.type_system;
    let token = ts.type_id("Token").unwrap();

    let tokens = data.index.of_type(ts, token);
    let text: Vec<&str> = tokens
        .iter()
        .map(|a| a.covered_text(&data.text).unwrap())
        .collect();
    assert_eq!(text, vec!["The", "cat", "sat", ".", "It", "purred", "."]);
}

#[rstest]
fn test_select_from_files(path_to_data: PathBuf) {
    let data = load(&path_to_data);
    let ts = &data.schema.type_system;

    // everything covering "purred"
    let covering: Vec<&str> = data
        .index
        .covering((16, 22))
        .map(|a| ts.name(a.type_id).unwrap())
        .collect();
    assert_eq!(covering, vec!["Paragraph", "Sentence", "Token"]);

    let following = data.index.following((13, 23)).count();
    assert_eq!(following, 0);
}

#[rstest]
fn test_unambiguous_walk_skips_nested() {
    let mut index = AnnotationIndex::new(Default::default());
    let t = TypeId(1);
    index.extend([ann(0, t, 0, 5), ann(1, t, 2, 4), ann(2, t, 5, 9)]);

    let walk: Vec<(u32, u32)> = index.iterator(false).map(|a| (a.begin, a.end)).collect();
    assert_eq!(walk, vec![(0, 5), (5, 9)]);
}

#[rstest]
fn test_strict_subiterator_containment() {
    let mut ts = TypeSystem::new();
    let s = ts.add_type("Sentence", TypeSystem::ANNOTATION).unwrap();
    let t = ts.add_type("Token", TypeSystem::ANNOTATION).unwrap();
    let mut index = AnnotationIndex::new(TypePriorityBuilder::new().add(&[s, t]).build(&ts));

    let container = ann(0, s, 10, 20);
    index.extend([container, ann(1, t, 10, 15), ann(2, t, 5, 12), ann(3, t, 15, 25)]);

    let inside: Vec<FsId> = index.subiterator(&container, true, true).map(|a| a.id).collect();
    assert_eq!(inside, vec![FsId(1)]);
}

#[rstest]
fn test_mutation_invalidates_cursor(path_to_data: PathBuf) {
    let mut data = load(&path_to_data);
    let paragraph = *data.set.get(FsId(0)).unwrap();

    let mut cursor = data.index.subcursor(&paragraph, true, true);
    assert_eq!(cursor.next(&data.index).unwrap().map(|a| a.id), Some(FsId(1)));

    data.index.remove_id(FsId(4));
    assert_eq!(
        matches!(
            cursor.next(&data.index),
            Err(IndexError::ConcurrentModification { .. })
        ),
        true
    );

    // a fresh cursor sees the new state
    let mut cursor = data.index.subcursor(&paragraph, true, true);
    let remaining = cursor.collect_remaining(&data.index).unwrap();
    assert_eq!(remaining.len(), data.set.len() - 2);
}

struct Model {
    index: AnnotationIndex,
    sorted: Vec<Annotation>,
}

fn model(raw: &[(u32, u32, u32)], policy: SameSpanPolicy) -> Model {
    let mut ts = TypeSystem::new();
    let a = ts.add_type("A", TypeSystem::ANNOTATION).unwrap();
    let b = ts.add_type("B", TypeSystem::ANNOTATION).unwrap();
    ts.add_type("C", TypeSystem::ANNOTATION).unwrap();
    let priorities = TypePriorityBuilder::new().add(&[a, b]).build(&ts);

    let options = IndexOptions::default().with_same_span_policy(policy);
    let mut index = AnnotationIndex::with_options(priorities, options);
    for (i, (begin, width, t)) in raw.iter().enumerate() {
        index.insert(ann(i as u32, TypeId(*t), *begin, begin + width));
    }
    let mut sorted: Vec<Annotation> = index.iter().copied().collect();
    index.comparator().sort(&mut sorted);
    Model { index, sorted }
}

/// The inclusion rules of a container bounded walk, applied one candidate at a time.
fn expected(m: &Model, c: &Annotation, ambiguous: bool, strict: bool) -> Vec<FsId> {
    let cmp = m.index.comparator();
    let policy = m.index.options().same_span_policy;
    let mut out = Vec::new();
    let mut prev_end: Option<u32> = None;

    for b in &m.sorted {
        if b.id == c.id {
            continue;
        }
        let positioned = if strict {
            c.covers(b)
        } else {
            c.begin <= b.begin && b.begin <= c.end
        };
        if !positioned {
            continue;
        }
        let after = if c.colocated(b) {
            match m.index.priorities().relation(c.type_id, b.type_id) {
                Some(o) => o.is_lt(),
                None => match policy {
                    SameSpanPolicy::Exclude => false,
                    SameSpanPolicy::Include => true,
                    SameSpanPolicy::IndexOrder => cmp.compare(c, b).is_lt(),
                },
            }
        } else {
            cmp.compare(c, b).is_lt()
        };
        if !after {
            continue;
        }
        if !ambiguous && prev_end.is_some_and(|end| b.begin < end) {
            continue;
        }
        prev_end = Some(b.end);
        out.push(b.id);
    }
    out
}

fn policies() -> impl Strategy<Value = SameSpanPolicy> {
    prop_oneof![
        Just(SameSpanPolicy::Exclude),
        Just(SameSpanPolicy::Include),
        Just(SameSpanPolicy::IndexOrder),
    ]
}

proptest! {
    #[test]
    fn prop_subiterator_matches_inclusion_rules(
        raw in prop::collection::vec((0u32..20, 0u32..6, 1u32..4), 1..30),
        pick in any::<prop::sample::Index>(),
        policy in policies(),
        ambiguous in any::<bool>(),
        strict in any::<bool>(),
    ) {
        let m = model(&raw, policy);
        let container = m.sorted[pick.index(m.sorted.len())];

        let got: Vec<FsId> = m.index.subiterator(&container, ambiguous, strict).map(|a| a.id).collect();
        prop_assert_eq!(&got, &expected(&m, &container, ambiguous, strict));

        let mut cursor = m.index.subcursor(&container, ambiguous, strict);
        let detached: Vec<FsId> = cursor.collect_remaining(&m.index).unwrap().iter().map(|a| a.id).collect();
        prop_assert_eq!(got, detached);
    }

    #[test]
    fn prop_unambiguous_walk_never_overlaps(
        raw in prop::collection::vec((0u32..40, 0u32..8, 1u32..4), 0..40),
    ) {
        let m = model(&raw, SameSpanPolicy::Exclude);
        let walk: Vec<&Annotation> = m.index.iterator(false).collect();

        prop_assert_eq!(walk.first().copied(), m.index.iter().next());
        for pair in walk.windows(2) {
            prop_assert!(pair[0].end <= pair[1].begin);
        }
    }

    #[test]
    fn prop_tree_children_are_contained(
        raw in prop::collection::vec((0u32..30, 0u32..10, 1u32..4), 1..25),
        pick in any::<prop::sample::Index>(),
    ) {
        let m = model(&raw, SameSpanPolicy::Exclude);
        let container = m.sorted[pick.index(m.sorted.len())];
        let tree = m.index.tree(&container).unwrap();

        for node in tree.iter() {
            if let Some(parent) = node.parent() {
                prop_assert!(parent.annotation().covers(node.annotation()));
            }
            for pair in node.children().collect::<Vec<_>>().windows(2) {
                prop_assert!(pair[0].annotation().end <= pair[1].annotation().begin);
            }
        }
    }
}
