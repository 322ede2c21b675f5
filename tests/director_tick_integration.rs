//! Director tick protocol integration tests: dispatch order, one-shot
//! lifecycle handlers, input-driven dispatch, edge-triggered watchers,
//! stop semantics, and fail-fast handler errors.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use easel::Director;
use easel::components::shape::Color;
use easel::error::Error;
use easel::motion;
use easel::resources::handlers::on_updating;
use easel::resources::input::Key;
use easel::resources::loopcontrol::stop_loop;
use easel::resources::stage::destroy;
use easel::shapes;

fn counter() -> (Arc<AtomicU32>, Arc<AtomicU32>) {
    let c = Arc::new(AtomicU32::new(0));
    (c.clone(), c)
}

#[test]
fn starting_handlers_run_exactly_once_in_registration_order() {
    let mut director = Director::new(800.0, 600.0).unwrap();
    let log = Arc::new(Mutex::new(Vec::new()));

    for name in ["first", "second", "third"] {
        let log = log.clone();
        director.on_starting(move |_| {
            log.lock().unwrap().push(name);
            Ok(())
        });
    }

    director.run_frames(5).unwrap();
    assert_eq!(*log.lock().unwrap(), vec!["first", "second", "third"]);
}

#[test]
fn update_handlers_receive_the_fixed_delta_every_tick() {
    let mut director = Director::new(800.0, 600.0).unwrap();
    let (count, count_handle) = counter();
    let deltas = Arc::new(Mutex::new(Vec::new()));
    let deltas_handle = deltas.clone();

    director.on_updating(move |_, delta| {
        count_handle.fetch_add(1, Ordering::SeqCst);
        deltas_handle.lock().unwrap().push(delta);
        Ok(())
    });

    director.run_frames(4).unwrap();
    assert_eq!(count.load(Ordering::SeqCst), 4);
    let expected = 1.0 / 30.0;
    for delta in deltas.lock().unwrap().iter() {
        assert!((delta - expected).abs() < 1e-6);
    }
}

#[test]
fn typing_fires_per_held_key_in_key_order() {
    let mut director = Director::new(800.0, 600.0).unwrap();
    let feed = director.input_feed();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_handle = seen.clone();

    director.on_typing(move |_, key, _| {
        seen_handle.lock().unwrap().push(key);
        Ok(())
    });

    feed.key_down(Key::Z);
    feed.key_down(Key::A);
    director.tick().unwrap();
    // both keys still held on the second tick
    director.tick().unwrap();
    feed.key_up(Key::A);
    director.tick().unwrap();

    assert_eq!(
        *seen.lock().unwrap(),
        vec![Key::A, Key::Z, Key::A, Key::Z, Key::Z]
    );
}

#[test]
fn click_fires_once_per_press_transition_not_per_frame_held() {
    let mut director = Director::new(800.0, 600.0).unwrap();
    let feed = director.input_feed();
    let (count, count_handle) = counter();

    director.on_clicking(move |_, _| {
        count_handle.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });

    feed.press(10.0, 10.0);
    director.tick().unwrap();
    // button stays held for two more ticks
    director.tick().unwrap();
    director.tick().unwrap();
    assert_eq!(count.load(Ordering::SeqCst), 1);

    feed.release(10.0, 10.0);
    feed.press(20.0, 20.0);
    director.tick().unwrap();
    assert_eq!(count.load(Ordering::SeqCst), 2);
}

#[test]
fn entity_scoped_click_requires_a_hit() {
    let mut director = Director::new(800.0, 600.0).unwrap();
    let feed = director.input_feed();
    let target = shapes::rectangle(
        director.world_mut(),
        Color::RED,
        50.0,
        50.0,
        100.0,
        100.0,
    )
    .unwrap();
    let (hits, hits_handle) = counter();

    director.on_clicking_entity(target, move |_, _| {
        hits_handle.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });

    // miss: outside the rectangle
    feed.press(10.0, 10.0);
    feed.release(10.0, 10.0);
    director.tick().unwrap();
    assert_eq!(hits.load(Ordering::SeqCst), 0);

    // hit: inside the rectangle
    feed.press(120.0, 120.0);
    director.tick().unwrap();
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[test]
fn hidden_entity_does_not_hit_test() {
    let mut director = Director::new(800.0, 600.0).unwrap();
    let feed = director.input_feed();
    let target = shapes::rectangle(
        director.world_mut(),
        Color::RED,
        50.0,
        50.0,
        100.0,
        100.0,
    )
    .unwrap();
    motion::hide(director.world_mut(), target).unwrap();
    let (hits, hits_handle) = counter();

    director.on_clicking_entity(target, move |_, _| {
        hits_handle.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });

    feed.press(120.0, 120.0);
    director.tick().unwrap();
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[test]
fn watcher_fires_once_per_true_transition() {
    let mut director = Director::new(800.0, 600.0).unwrap();
    let tick_count = Arc::new(AtomicU32::new(0));
    let tick_handle = tick_count.clone();
    director.on_updating(move |_, _| {
        tick_handle.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });

    let (fired, fired_handle) = counter();
    let predicate_ticks = tick_count.clone();
    // true from tick 5 through tick 10, then false again
    director.when(
        move |_| {
            let t = predicate_ticks.load(Ordering::SeqCst);
            (5..=10).contains(&t)
        },
        move |_| {
            fired_handle.fetch_add(1, Ordering::SeqCst);
            Ok(())
        },
    );

    director.run_frames(12).unwrap();
    assert_eq!(fired.load(Ordering::SeqCst), 1);

    // condition is false again past tick 10; the latch does not refire
    director.run_frames(1).unwrap();
    assert_eq!(fired.load(Ordering::SeqCst), 1);
}

#[test]
fn watcher_refires_after_condition_resets() {
    let mut director = Director::new(800.0, 600.0).unwrap();
    let tick_count = Arc::new(AtomicU32::new(0));
    let tick_handle = tick_count.clone();
    director.on_updating(move |_, _| {
        tick_handle.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });

    let (fired, fired_handle) = counter();
    let predicate_ticks = tick_count.clone();
    // true on odd ticks: every odd tick is a fresh false->true transition
    director.when(
        move |_| predicate_ticks.load(Ordering::SeqCst) % 2 == 1,
        move |_| {
            fired_handle.fetch_add(1, Ordering::SeqCst);
            Ok(())
        },
    );

    director.run_frames(6).unwrap();
    assert_eq!(fired.load(Ordering::SeqCst), 3);
}

#[test]
fn stop_request_completes_the_current_tick() {
    let mut director = Director::new(800.0, 600.0).unwrap();
    let (late, late_handle) = counter();

    director.on_updating(|world, _| {
        stop_loop(world);
        Ok(())
    });
    // registered after the stopping handler; must still run on that tick
    director.on_updating(move |_, _| {
        late_handle.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });

    assert!(!director.tick().unwrap());
    assert_eq!(late.load(Ordering::SeqCst), 1);
    assert_eq!(director.frame(), 1);

    // no further ticks are scheduled
    assert!(!director.tick().unwrap());
    assert_eq!(director.frame(), 1);
    assert_eq!(director.run_frames(10).unwrap(), 0);
}

#[test]
fn handler_error_propagates_and_halts() {
    let mut director = Director::new(800.0, 600.0).unwrap();
    let (after, after_handle) = counter();

    director.on_updating(|_, _| Err(Error::Callback("deliberate failure".into())));
    director.on_updating(move |_, _| {
        after_handle.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });

    let err = director.tick().unwrap_err();
    assert!(matches!(err, Error::Callback(_)));
    // fail-fast: the later handler never ran
    assert_eq!(after.load(Ordering::SeqCst), 0);
}

#[test]
fn handlers_registered_mid_dispatch_run_from_the_next_tick() {
    let mut director = Director::new(800.0, 600.0).unwrap();
    let (inner, inner_handle) = counter();
    let registered = Arc::new(AtomicU32::new(0));
    let registered_handle = registered.clone();

    director.on_updating(move |world, _| {
        if registered_handle.swap(1, Ordering::SeqCst) == 0 {
            let inner_handle = inner_handle.clone();
            on_updating(world, move |_, _| {
                inner_handle.fetch_add(1, Ordering::SeqCst);
                Ok(())
            });
        }
        Ok(())
    });

    director.tick().unwrap();
    assert_eq!(inner.load(Ordering::SeqCst), 0);
    director.tick().unwrap();
    assert_eq!(inner.load(Ordering::SeqCst), 1);
}

#[test]
fn removal_is_deferred_to_end_of_tick() {
    let mut director = Director::new(800.0, 600.0).unwrap();
    let victim = shapes::circle(director.world_mut(), Color::RED, 10.0, 50.0, 50.0).unwrap();
    let observed = Arc::new(Mutex::new(Vec::new()));
    let observed_handle = observed.clone();

    director.on_updating(move |world, _| {
        // first handler dooms the entity...
        if world.get_entity(victim).is_ok() {
            let _ = destroy(world, victim);
        }
        Ok(())
    });
    director.on_updating(move |world, _| {
        // ...the sibling handler can still read it this tick
        observed_handle
            .lock()
            .unwrap()
            .push(motion::get_x(world, victim).is_ok());
        Ok(())
    });

    director.tick().unwrap();
    assert_eq!(*observed.lock().unwrap(), vec![true]);
    // after the tick the entity is gone for real
    assert!(matches!(
        motion::get_x(director.world(), victim),
        Err(Error::NotStaged(_))
    ));
    assert!(!director.world().resource::<easel::resources::stage::Stage>().contains(victim));
}

#[test]
fn destroying_twice_is_an_error_after_removal_applies() {
    let mut director = Director::new(800.0, 600.0).unwrap();
    let victim = shapes::circle(director.world_mut(), Color::RED, 10.0, 50.0, 50.0).unwrap();

    destroy(director.world_mut(), victim).unwrap();
    director.tick().unwrap();
    assert!(matches!(
        destroy(director.world_mut(), victim),
        Err(Error::NotStaged(_))
    ));
}

#[test]
fn click_handlers_scoped_to_removed_entity_are_purged() {
    let mut director = Director::new(800.0, 600.0).unwrap();
    let feed = director.input_feed();
    let target = shapes::rectangle(
        director.world_mut(),
        Color::RED,
        50.0,
        50.0,
        100.0,
        100.0,
    )
    .unwrap();
    let (hits, hits_handle) = counter();

    director.on_clicking_entity(target, move |_, _| {
        hits_handle.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });

    destroy(director.world_mut(), target).unwrap();
    director.tick().unwrap();

    feed.press(120.0, 120.0);
    director.tick().unwrap();
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}
