//! End-to-end engine scenarios: config parsing, mount, drag, collapse,
//! rescale, persistence, and the log records emitted along the way.

use splitpane_layout::{
    CollapseDirection, DragEffect, EngineConfig, HookEvent, PersistedLayout, PointerPosition,
    RecordedHooks, SplitPaneEngine, SplitPaneError,
};

fn at(x: f64) -> PointerPosition {
    PointerPosition::new(x, 0.0)
}

fn engine_with(extents: &[f64], config: EngineConfig) -> SplitPaneEngine<RecordedHooks> {
    SplitPaneEngine::with_hooks(
        extents.len(),
        config.with_initial_extents(extents.to_vec()),
        RecordedHooks::new(),
    )
}

#[test]
fn json_config_to_persisted_layout_and_back() {
    let config: EngineConfig = serde_json::from_str(
        r#"{ "split": "vertical", "initialExtents": [1, 2, 1], "collapseEnabled": true }"#,
    )
    .expect("config parses");
    let mut engine = SplitPaneEngine::new(3, config);
    assert_eq!(engine.mount(&[100.0, 100.0, 200.0]), Ok(true));
    assert_eq!(engine.extents(), &[100.0, 200.0, 100.0]);

    engine.toggle_collapse(0).expect("pane 0 collapses");
    let snapshot = engine.snapshot();
    assert_eq!(
        snapshot,
        PersistedLayout {
            extents: vec![50.0, 250.0, 100.0],
            collapsed_indices: vec![0],
        }
    );

    let json = serde_json::to_string(&snapshot).expect("snapshot serializes");
    let restored_layout: PersistedLayout = serde_json::from_str(&json).expect("snapshot parses");
    let restored = SplitPaneEngine::new(3, EngineConfig::default().with_persisted(&restored_layout));
    assert_eq!(restored.extents(), snapshot.extents.as_slice());
    assert_eq!(
        restored.collapsed_indices().iter().copied().collect::<Vec<_>>(),
        vec![0]
    );
}

#[test]
fn dragging_toward_collapsed_pane_carries_it_along() {
    let mut engine = engine_with(&[200.0, 100.0, 200.0], EngineConfig::default().with_collapse(true));
    engine.toggle_collapse(1).expect("pane 1 collapses");
    assert_eq!(engine.extents(), &[200.0, 50.0, 250.0]);
    engine.hooks_mut().drain();

    engine.begin_drag(0, at(200.0)).expect("boundary 0 exists");
    assert_eq!(engine.update_drag(at(140.0)), &[140.0, 50.0, 310.0]);
    assert_eq!(engine.end_drag(), &[140.0, 50.0, 310.0]);
    assert_eq!(
        engine.hooks().events,
        vec![
            HookEvent::DragStarted,
            HookEvent::Change(vec![140.0, 50.0, 310.0]),
            HookEvent::SaveSizes(vec![140.0, 50.0, 310.0]),
        ]
    );
}

#[test]
fn reversed_collapse_uses_previous_boundary() {
    let config = EngineConfig::default().with_collapse_direction(CollapseDirection::Right);
    let mut engine = engine_with(&[100.0, 100.0, 200.0], config);
    engine.toggle_collapse(2).expect("last pane collapses when reversed");
    assert_eq!(engine.extents(), &[100.0, 250.0, 50.0]);
    assert_eq!(
        engine.toggle_collapse(0),
        Err(SplitPaneError::PaneNotCollapsible {
            index: 0,
            reversed: true
        })
    );
    engine.toggle_collapse(2).expect("last pane expands");
    assert_eq!(engine.extents(), &[100.0, 100.0, 200.0]);
}

#[test]
fn collapsed_extent_survives_container_resize() {
    let mut engine = engine_with(&[200.0, 100.0, 200.0], EngineConfig::default().with_collapse(true));
    engine.toggle_collapse(1).expect("pane 1 collapses");
    assert_eq!(engine.on_container_resize(&[300.0, 80.0, 220.0]), Ok(true));
    assert_eq!(engine.extents(), &[300.0, 50.0, 250.0]);
    assert_eq!(engine.collapsed_sizes(), &[None, Some(100.0), None]);
}

#[test]
fn toggling_during_drag_cancels_it() {
    let mut engine = engine_with(&[200.0, 100.0, 200.0], EngineConfig::default().with_collapse(true));
    engine.begin_drag(1, at(300.0)).expect("boundary 1 exists");
    engine.update_drag(at(330.0));
    engine.toggle_collapse(0).expect("pane 0 collapses");
    assert!(!engine.is_dragging());
    assert!(matches!(
        engine.last_transition().map(|transition| transition.effect),
        Some(DragEffect::Canceled { boundary: 1 })
    ));
    assert_eq!(engine.extents(), &[50.0, 250.0, 200.0]);
    assert_eq!(engine.in_progress_extents(), engine.extents());
}

#[test]
fn sync_panes_to_single_pane_disables_everything() {
    let mut engine = engine_with(&[200.0, 200.0], EngineConfig::default().with_collapse(true));
    engine.sync_panes(vec!["pane.1".to_string()]);
    assert!(engine.is_pass_through());
    assert_eq!(engine.extents(), &[200.0]);
    assert_eq!(
        engine.toggle_collapse(0),
        Err(SplitPaneError::TooFewPanes { count: 1 })
    );
}

#[cfg(feature = "tracing")]
mod logging {
    use std::fmt;
    use std::sync::{Arc, Mutex};

    use tracing::Level;
    use tracing::field::{Field, Visit};
    use tracing_subscriber::layer::SubscriberExt;

    use super::*;

    #[derive(Debug, Clone)]
    struct CapturedEvent {
        level: Level,
        message: String,
    }

    struct MessageVisitor(String);

    impl Visit for MessageVisitor {
        fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
            if field.name() == "message" {
                self.0 = format!("{value:?}");
            }
        }
    }

    struct EventCapture {
        events: Arc<Mutex<Vec<CapturedEvent>>>,
    }

    impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for EventCapture {
        fn on_event(
            &self,
            event: &tracing::Event<'_>,
            _ctx: tracing_subscriber::layer::Context<'_, S>,
        ) {
            let mut visitor = MessageVisitor(String::new());
            event.record(&mut visitor);
            self.events.lock().unwrap().push(CapturedEvent {
                level: *event.metadata().level(),
                message: visitor.0,
            });
        }
    }

    fn capture<F: FnOnce()>(f: F) -> Vec<CapturedEvent> {
        let events = Arc::new(Mutex::new(Vec::new()));
        let layer = EventCapture {
            events: Arc::clone(&events),
        };
        let subscriber = tracing_subscriber::registry().with(layer);
        tracing::subscriber::with_default(subscriber, f);
        let captured = events.lock().unwrap().clone();
        captured
    }

    #[test]
    fn single_pane_engine_warns() {
        let events = capture(|| {
            let engine = SplitPaneEngine::new(1, EngineConfig::default());
            assert!(engine.is_pass_through());
        });
        assert!(
            events
                .iter()
                .any(|event| event.level == Level::WARN && event.message.contains("two panes")),
            "{events:?}"
        );
    }

    #[test]
    fn drag_lifecycle_is_logged() {
        let events = capture(|| {
            let mut engine = SplitPaneEngine::new(
                2,
                EngineConfig::default().with_initial_extents(vec![100.0, 100.0]),
            );
            engine.begin_drag(0, at(100.0)).expect("boundary 0 exists");
            engine.update_drag(at(120.0));
            engine.end_drag();
        });
        let messages: Vec<&str> = events.iter().map(|event| event.message.as_str()).collect();
        assert!(messages.contains(&"drag started"), "{messages:?}");
        assert!(messages.contains(&"drag updated"), "{messages:?}");
        assert!(messages.contains(&"drag committed"), "{messages:?}");
    }

    #[test]
    fn fmt_subscriber_handles_every_record() {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(Level::TRACE)
            .with_test_writer()
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            let mut engine = engine_with(
                &[200.0, 100.0, 200.0],
                EngineConfig::default().with_collapse(true),
            );
            engine.toggle_collapse(1).expect("pane 1 collapses");
            engine.begin_drag(0, at(200.0)).expect("boundary 0 exists");
            engine.update_drag(at(150.0));
            engine.end_drag();
            engine.sync_panes(vec!["pane.0".into(), "pane.2".into()]);
        });
    }
}
