//! Unit tests for the image cache

use std::time::{Duration, Instant};

use scanswitch::{CacheError, ImageCache, SharedCache};

fn t(base: Instant, millis: u64) -> Instant {
    base + Duration::from_millis(millis)
}

#[test]
fn capacity_two_evicts_oldest_of_three() {
    let base = Instant::now();
    let mut cache = ImageCache::new(2);
    cache.insert_at(0, "a", t(base, 1));
    cache.insert_at(1, "b", t(base, 2));
    cache.insert_at(2, "c", t(base, 3));

    assert_eq!(cache.indices(), vec![1, 2]);
    assert!(!cache.contains(0));
}

#[test]
fn capacity_holds_for_any_insert_sequence() {
    let base = Instant::now();
    let mut cache = ImageCache::new(4);
    let sequence = [3, 1, 4, 1, 5, 9, 2, 6, 5, 3, 5, 8, 9, 7, 9, 3, 2, 3, 8, 4];
    for (step, index) in sequence.iter().enumerate() {
        cache.insert_at(*index, step, t(base, step as u64));
        assert!(cache.len() <= cache.capacity());
    }
    assert_eq!(cache.len(), 4);
}

#[test]
fn evict_lru_removes_strictly_smallest_timestamp() {
    let base = Instant::now();
    let mut cache = ImageCache::new(10);
    cache.insert_at(7, "seven", t(base, 40));
    cache.insert_at(3, "three", t(base, 10));
    cache.insert_at(5, "five", t(base, 30));
    cache.insert_at(1, "one", t(base, 20));

    assert_eq!(cache.evict_lru().unwrap(), 3);
    assert_eq!(cache.evict_lru().unwrap(), 1);
    assert_eq!(cache.evict_lru().unwrap(), 5);
    assert_eq!(cache.evict_lru().unwrap(), 7);
    assert!(matches!(cache.evict_lru(), Err(CacheError::CacheEmpty)));
}

#[test]
fn recent_touch_changes_eviction_victim() {
    let base = Instant::now();
    let mut cache = ImageCache::new(3);
    cache.insert_at(0, "a", t(base, 1));
    cache.insert_at(1, "b", t(base, 2));
    cache.insert_at(2, "c", t(base, 3));
    cache.touch_at(0, t(base, 4)).unwrap();
    cache.insert_at(3, "d", t(base, 5));

    assert_eq!(cache.indices(), vec![0, 2, 3]);
}

#[test]
fn touch_is_idempotent_and_keeps_later_time() {
    let base = Instant::now();
    let mut cache = ImageCache::new(3);
    cache.insert_at(4, "e", t(base, 1));
    cache.touch_at(4, t(base, 8)).unwrap();
    cache.touch_at(4, t(base, 8)).unwrap();
    cache.touch_at(4, t(base, 3)).unwrap();

    assert_eq!(cache.len(), 1);
    assert_eq!(cache.get(4).unwrap().last_used(), t(base, 8));
}

#[test]
fn touch_and_insert_commute() {
    let base = Instant::now();

    let mut first = ImageCache::new(2);
    first.insert_at(1, "x", t(base, 5));
    first.touch_at(1, t(base, 9)).unwrap();

    let mut second = ImageCache::new(2);
    second.insert_at(1, "x", t(base, 9));
    second.touch_at(1, t(base, 5)).unwrap();

    assert_eq!(
        first.get(1).unwrap().last_used(),
        second.get(1).unwrap().last_used()
    );
}

#[test]
fn get_on_missing_index_is_none_and_touch_is_not_found() {
    let mut cache: ImageCache<&str> = ImageCache::new(2);
    assert!(cache.get(9).is_none());
    assert!(matches!(
        cache.touch(9),
        Err(CacheError::NotFound { index: 9 })
    ));
}

#[test]
fn shared_cache_get_returns_independent_snapshot() {
    let cache = SharedCache::new(2);
    cache.insert(0, String::from("zero"));
    let entry = cache.get(0).unwrap();

    cache.remove(0);
    assert!(!cache.contains(0));
    assert_eq!(entry.image().as_str(), "zero");
}

#[test]
fn shared_cache_stats_track_lookups() {
    let cache = SharedCache::new(1);
    cache.insert(0, 'a');
    cache.insert(1, 'b');
    assert!(cache.lookup(1).is_some());
    assert!(cache.lookup(0).is_none());

    let stats = cache.stats();
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.inserts, 2);
    assert_eq!(stats.evictions, 1);
}
