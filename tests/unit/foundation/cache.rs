use super::*;

#[test]
fn value_is_memoized_until_marked_stale() {
    let mut cache = RefreshCache::<u32>::new();
    let mut calls = 0;
    assert_eq!(
        *cache.get_or_refresh("n", || {
            calls += 1;
            7
        }),
        7
    );
    assert_eq!(*cache.get_or_refresh("n", || 99), 7);
    assert_eq!(calls, 1);
    assert_eq!(cache.refresh_count(), 1);

    cache.mark_stale("n");
    assert!(!cache.is_fresh("n"));
    assert_eq!(*cache.get_or_refresh("n", || 8), 8);
    assert_eq!(*cache.get_or_refresh("n", || 9), 8);
    assert_eq!(cache.refresh_count(), 2);
}

#[test]
fn signals_only_invalidate_subscribers() {
    let mut cache = RefreshCache::<&'static str>::new();
    cache.subscribe(Signal::ParentsChanged, "ancestors");
    cache.subscribe(Signal::ChildrenChanged, "descendants");
    cache.subscribe(Signal::ChildrenChanged, "descendants");

    cache.get_or_refresh("ancestors", || "a");
    cache.get_or_refresh("descendants", || "d");

    cache.emit(Signal::ChildrenChanged);
    assert!(cache.is_fresh("ancestors"));
    assert!(!cache.is_fresh("descendants"));
    assert_eq!(cache.peek("ancestors"), Some(&"a"));

    cache.emit(Signal::ParentsChanged);
    assert!(!cache.is_fresh("ancestors"));
}

#[test]
fn clear_drops_everything() {
    let mut cache = RefreshCache::<u8>::new();
    cache.get_or_refresh("a", || 1);
    cache.get_or_refresh("b", || 2);
    cache.clear();
    assert!(cache.peek("a").is_none());
    assert!(cache.peek("b").is_none());
}
