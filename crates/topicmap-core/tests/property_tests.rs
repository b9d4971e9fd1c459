mod common;

use common::*;
use std::collections::HashSet;
use topicmap_core::{Args, Namespace, list_publish, list_services, list_subscribe, resolve_data};

const SEEDS: u64 = 64;

#[test]
fn test_all_paths_start_with_root() {
    for seed in 0..SEEDS {
        let (tree, _) = random_tree(seed, 3);
        let all = list_publish(&tree)
            .into_iter()
            .chain(list_subscribe(&tree))
            .chain(list_services(&tree));

        for path in all {
            assert!(path.starts_with("Root/"), "seed {seed}: {path}");
        }
    }
}

#[test]
fn test_classification_matches_convention() {
    for seed in 0..SEEDS {
        let (tree, expected) = random_tree(seed, 3);

        assert_eq!(list_publish(&tree), expected.publish, "seed {seed}");
        assert_eq!(list_subscribe(&tree), expected.subscribe, "seed {seed}");
        assert_eq!(list_services(&tree), expected.services, "seed {seed}");
    }
}

#[test]
fn test_private_never_listed() {
    for seed in 0..SEEDS {
        let (tree, expected) = random_tree(seed, 3);
        let listed: HashSet<String> = list_publish(&tree)
            .into_iter()
            .chain(list_subscribe(&tree))
            .chain(list_services(&tree))
            .collect();

        for hidden in &expected.hidden {
            assert!(!listed.contains(hidden), "seed {seed}: {hidden} leaked");
        }
        for path in &listed {
            assert!(!path.contains("__"), "seed {seed}: {path} leaked");
        }
    }
}

#[test]
fn test_services_listed_once() {
    for seed in 0..SEEDS {
        let (tree, _) = random_tree(seed, 3);
        let services = list_services(&tree);
        let unique: HashSet<_> = services.iter().collect();
        assert_eq!(unique.len(), services.len(), "seed {seed}");
    }
}

#[test]
fn test_listed_paths_resolve() {
    for seed in 0..SEEDS {
        let (tree, _) = random_tree(seed, 3);
        let namespace = Namespace::new(tree);

        for path in namespace.publish_topics() {
            let path = path.strip_prefix("Root").unwrap();
            let lookup = namespace.sub_topic(path).unwrap();
            assert!(lookup.value().is_some(), "seed {seed}: {path}");
        }

        for path in namespace.subscribe_topics() {
            let path = path.strip_prefix("Root").unwrap();
            let lookup = resolve_data(namespace.root(), path).unwrap();
            assert!(lookup.is_subscribe_only(), "seed {seed}: {path}");
        }
    }
}

#[test]
fn test_listed_services_invoke() {
    for seed in 0..SEEDS {
        let (tree, _) = random_tree(seed, 3);
        let namespace = Namespace::new(tree);

        for path in namespace.service_topics() {
            let path = path.strip_prefix("Root").unwrap();
            let reply = namespace
                .call_service(path, &Args::positional([seed as i64]))
                .unwrap();
            assert_eq!(reply, Some((seed as i64).into()), "seed {seed}: {path}");
        }
    }
}
