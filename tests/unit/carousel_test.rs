//! Unit tests for the carousel controller

use std::sync::mpsc::channel;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use scanswitch::{
    Carousel, CarouselError, CarouselSettings, Driver, Frame, IndexRing, PanelState, PlayState,
    TickOutcome,
};

use crate::helpers::{ids, ScriptedStore, WAIT};

fn settings(width: u32, step: u32) -> CarouselSettings {
    CarouselSettings {
        width,
        height: 10,
        step,
        tick_interval: Duration::from_millis(1),
        paused_interval: Duration::from_millis(5),
    }
}

fn carousel(count: usize, capacity: usize, width: u32, step: u32) -> Carousel<ScriptedStore> {
    let carousel = Carousel::new(ScriptedStore::new(), capacity, settings(width, step));
    carousel.set_data(ids(count)).unwrap();
    carousel
}

#[test]
fn ring_wraps_both_ways() {
    let ring = IndexRing::new(5);
    assert_eq!(ring.next(4), 0);
    assert_eq!(ring.prev(0), 4);
}

#[test]
fn set_data_synchronously_loads_index_zero() {
    let carousel = carousel(4, 10, 100, 10);
    assert_eq!(carousel.store_decodes(), vec!["id-0"]);
    assert_eq!(carousel.cache().indices(), vec![0]);
}

#[test]
fn empty_data_is_rejected() {
    let carousel = Carousel::new(ScriptedStore::new(), 4, settings(100, 10));
    assert!(matches!(
        carousel.set_data(vec![]),
        Err(CarouselError::EmptyCatalog)
    ));
}

#[test]
fn state_machine_transitions() {
    let carousel = carousel(2, 4, 100, 10);
    assert_eq!(carousel.state(), PlayState::Stopped);
    assert!(!carousel.pause());
    assert!(carousel.start());
    assert!(carousel.pause());
    assert_eq!(carousel.state(), PlayState::Paused);
    assert!(carousel.resume());
    assert_eq!(carousel.state(), PlayState::Running);
    assert!(carousel.stop());
    assert_eq!(carousel.tick(), TickOutcome::Stopped);
}

#[test]
fn wrap_advances_first_visible() {
    let carousel = carousel(3, 10, 50, 10);
    carousel.start();
    for _ in 0..5 {
        carousel.tick();
    }
    assert_eq!(carousel.position(), (1, 0));
}

#[test]
fn full_cycle_returns_to_first_image() {
    let carousel = carousel(3, 10, 20, 10);
    carousel.start();
    for _ in 0..6 {
        carousel.tick();
    }
    assert_eq!(carousel.position(), (0, 0));
}

#[test]
fn paused_ticks_do_not_advance() {
    let carousel = carousel(3, 10, 50, 10);
    carousel.start();
    carousel.tick();
    carousel.pause();

    for _ in 0..10 {
        assert_eq!(
            carousel.tick(),
            TickOutcome::Waiting(Duration::from_millis(5))
        );
    }
    assert_eq!(carousel.position(), (0, 10));
    assert!(carousel.frame().is_none());
}

#[test]
fn frame_shows_next_image_on_the_left() {
    let carousel = carousel(3, 10, 100, 25);
    carousel.start();
    carousel.tick();

    let frame = carousel.frame().unwrap();
    assert_eq!(frame.divider_x, 25);
    assert_eq!(frame.left.index(), Some(1));
    assert_eq!(frame.right.index(), Some(0));

    let left = frame.left.panel().unwrap();
    assert_eq!(left.image.as_str(), "image:id-1");
    assert_eq!(left.src, 75..100);
    assert_eq!(left.dst, 0..25);
}

#[test]
fn frame_prefetches_beyond_left_edge() {
    let carousel = carousel(5, 10, 100, 10);
    carousel.start();
    carousel.tick();
    carousel.frame().unwrap();

    assert!(carousel.loader().wait_idle(WAIT));
    assert!(carousel.cache().contains(2));
    assert_eq!(carousel.store_decodes_of("id-2"), 1);
}

#[test]
fn right_only_frame_prefetches_following_image() {
    let carousel = carousel(4, 10, 100, 10);
    carousel.start();

    let frame = carousel.frame().unwrap();
    assert!(matches!(frame.left, PanelState::Hidden));
    assert_eq!(frame.right.index(), Some(0));

    assert!(carousel.loader().wait_idle(WAIT));
    assert_eq!(carousel.cache().indices(), vec![0, 1]);
    assert_eq!(carousel.store_decodes_of("id-2"), 0);
}

#[test]
fn cached_visible_image_is_touched_not_decoded() {
    let carousel = carousel(4, 10, 100, 10);
    carousel.start();
    let before = carousel.cache().get(0).unwrap().last_used();

    thread::sleep(Duration::from_millis(2));
    carousel.frame().unwrap();

    let after = carousel.cache().get(0).unwrap().last_used();
    assert!(after > before);
    assert_eq!(carousel.store_decodes_of("id-0"), 1);
}

#[test]
fn missing_visible_image_is_reported_per_panel() {
    let store = ScriptedStore::with_broken(&["id-1"]);
    let carousel = Carousel::new(store, 4, settings(100, 10));
    carousel.set_data(ids(3)).unwrap();
    carousel.start();
    carousel.tick();

    let frame = carousel.frame().unwrap();
    assert!(matches!(frame.left, PanelState::Missing { index: 1, .. }));
    assert!(frame.right.is_drawn());
}

#[test]
fn small_cache_stays_bounded_over_many_frames() {
    let carousel = carousel(8, 3, 30, 10);
    carousel.start();
    for _ in 0..120 {
        carousel.tick();
        carousel.frame();
        assert!(carousel.cache().len() <= 3);
    }
}

#[test]
fn driver_delivers_frames_until_stopped() {
    let carousel = Arc::new(carousel(3, 4, 40, 10));
    carousel.start();

    let (tx, rx) = channel();
    let driver = Driver::spawn(Arc::clone(&carousel), move |frame: &Frame<String>| {
        let _ = tx.send((frame.first_visible, frame.divider_x));
    })
    .unwrap();

    let first: Vec<_> = (0..4).map(|_| rx.recv_timeout(WAIT).unwrap()).collect();
    assert_eq!(first, vec![(0, 10), (0, 20), (0, 30), (1, 0)]);

    carousel.pause();
    driver.stop();
    assert_eq!(carousel.state(), PlayState::Paused);
}

trait StoreDecodes {
    fn store_decodes(&self) -> Vec<String>;
    fn store_decodes_of(&self, id: &str) -> usize;
}

impl StoreDecodes for Carousel<ScriptedStore> {
    fn store_decodes(&self) -> Vec<String> {
        self.loader().store().decoded()
    }

    fn store_decodes_of(&self, id: &str) -> usize {
        self.loader().store().decode_count(id)
    }
}
