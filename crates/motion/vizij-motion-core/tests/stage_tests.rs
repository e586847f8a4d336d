use std::rc::Rc;

use serde_json::json;
use vizij_motion_core::{
    CommandBuffer, Decorator, DecoratorSpec, ElementId, HostCommand, HostEvent, LivePreference,
    MotionConfig, MotionError, MotionPreferenceAdapter, MotionStage, PointerEvent, PointerState,
    Property, PropertyValue, RevealPhase,
};

fn stage() -> MotionStage {
    MotionStage::new(MotionConfig::default(), MotionPreferenceAdapter::default())
}

fn spec(value: serde_json::Value) -> DecoratorSpec {
    serde_json::from_value(value).expect("decorator spec")
}

fn event(value: serde_json::Value) -> HostEvent {
    serde_json::from_value(value).expect("host event")
}

/// it should mount decorators from JSON specs and route events in order
#[test]
fn mount_and_dispatch_from_json() {
    let mut host = CommandBuffer::new();
    let mut st = stage();
    st.mount(&mut host, ElementId(1), &spec(json!({"kind": "reveal"})))
        .unwrap();
    st.mount(&mut host, ElementId(2), &spec(json!({"kind": "effect", "effect": "pulse"})))
        .unwrap();
    st.mount(
        &mut host,
        ElementId(3),
        &spec(json!({"kind": "interaction", "interaction": "parallax", "speed": 2.0})),
    )
    .unwrap();
    st.mount(&mut host, ElementId(4), &spec(json!({"kind": "pointer"})))
        .unwrap();
    assert_eq!(st.len(), 4);
    host.drain();

    let events = vec![
        event(json!({"kind": "intersection", "element": 1, "entered": true})),
        event(json!({"kind": "scroll_progress", "element": 3, "progress": 0.5})),
        event(json!({"kind": "pointer", "element": 4, "event": "enter", "time": 0.0})),
        event(json!({"kind": "intersection", "element": 1, "entered": true})),
    ];
    assert_eq!(st.dispatch_all(&mut host, &events), 4);

    let cmds = host.drain();
    let elements: Vec<u32> = cmds.iter().map(|c| c.element().0).collect();
    assert_eq!(elements, vec![1, 3, 4]);
    match &cmds[1] {
        HostCommand::SetProperties { values, .. } => {
            assert_eq!(
                values.get(&Property::TranslateY),
                Some(&PropertyValue::Scalar(-50.0))
            );
        }
        other => panic!("expected parallax write, got {other:?}"),
    }
    match st.decorator(ElementId(4)) {
        Some(Decorator::Pointer(p)) => assert_eq!(p.state(), PointerState::Hovered),
        other => panic!("unexpected decorator {other:?}"),
    }
}

/// it should drop events for elements that are not mounted
#[test]
fn unknown_elements_are_ignored() {
    let mut host = CommandBuffer::new();
    let mut st = stage();
    let delivered = st.dispatch(
        &mut host,
        &HostEvent::Intersection {
            element: ElementId(42),
            entered: true,
        },
    );
    assert!(!delivered);
    assert!(host.is_empty());
}

/// it should reject a second decorator on the same element
#[test]
fn duplicate_mount_errors() {
    let mut host = CommandBuffer::new();
    let mut st = stage();
    st.mount(&mut host, ElementId(1), &DecoratorSpec::Pointer)
        .unwrap();
    let err = st
        .mount(&mut host, ElementId(1), &DecoratorSpec::Reveal { delay: None })
        .unwrap_err();
    assert_eq!(err, MotionError::DuplicateElement { element: 1 });
    assert_eq!(st.len(), 1);
}

/// it should stop routing events to an element after it is unmounted
#[test]
fn unmount_detaches() {
    let mut host = CommandBuffer::new();
    let mut st = stage();
    st.mount(&mut host, ElementId(7), &DecoratorSpec::Effect { effect: Some("pulse".into()) })
        .unwrap();
    let handle = host.live_handle(ElementId(7)).expect("pulse handle");

    assert!(st.unmount(&mut host, ElementId(7)));
    assert!(!st.unmount(&mut host, ElementId(7)));
    assert_eq!(
        host.commands().last(),
        Some(&HostCommand::CancelAnimation {
            element: ElementId(7),
            handle
        })
    );
    assert!(st.is_empty());
    assert!(!st.dispatch(
        &mut host,
        &HostEvent::Pointer {
            element: ElementId(7),
            event: PointerEvent::Enter,
            time: 0.0
        }
    ));
}

/// it should settle a reveal when the host reports completion
#[test]
fn completion_via_stage() {
    let mut host = CommandBuffer::new();
    let mut st = stage();
    st.mount(&mut host, ElementId(1), &DecoratorSpec::Reveal { delay: Some(0.0) })
        .unwrap();
    st.dispatch(
        &mut host,
        &HostEvent::Intersection {
            element: ElementId(1),
            entered: true,
        },
    );
    let handle = host.live_handle(ElementId(1)).expect("reveal handle");
    assert_eq!(host.requests_for(ElementId(1))[0].transition.delay, 0.0);
    st.dispatch(
        &mut host,
        &HostEvent::AnimationComplete {
            element: ElementId(1),
            handle,
        },
    );
    match st.decorator(ElementId(1)) {
        Some(Decorator::Reveal(r)) => assert_eq!(r.phase(), RevealPhase::Settled),
        other => panic!("unexpected decorator {other:?}"),
    }
}

/// it should share the host's live reduced-motion preference with reveals
#[test]
fn live_reduced_motion() {
    let live = Rc::new(LivePreference::new(true));
    let mut st = MotionStage::new(
        MotionConfig::default(),
        MotionPreferenceAdapter::new(live.clone()),
    );
    let mut host = CommandBuffer::new();
    st.mount(&mut host, ElementId(1), &DecoratorSpec::Reveal { delay: None })
        .unwrap();
    live.set(false);
    st.mount(&mut host, ElementId(2), &DecoratorSpec::Reveal { delay: None })
        .unwrap();

    let offsets: Vec<Option<f32>> = host
        .commands()
        .iter()
        .filter_map(|c| match c {
            HostCommand::SetProperties { values, .. } => Some(
                values
                    .get(&Property::TranslateY)
                    .and_then(PropertyValue::as_scalar),
            ),
            _ => None,
        })
        .collect();
    assert_eq!(offsets, vec![Some(0.0), Some(30.0)]);
    assert!(!st.preference().current().reduced);
}

/// it should hand out element ids that do not collide with mounted ones
#[test]
fn allocate_skips_mounted() {
    let mut host = CommandBuffer::new();
    let mut st = stage();
    st.mount(&mut host, ElementId(0), &DecoratorSpec::Pointer)
        .unwrap();
    let next = st.allocate_element();
    assert_ne!(next, ElementId(0));
    st.mount(&mut host, next, &DecoratorSpec::Pointer).unwrap();
    assert_ne!(st.allocate_element(), next);
}

/// it should fill missing config fields with defaults
#[test]
fn partial_config_json() {
    let cfg = MotionConfig::from_json(r#"{"reveal": {"delay": 0.5}, "parallax": {"distance": 80}}"#)
        .unwrap();
    assert_eq!(cfg.reveal.delay, 0.5);
    assert_eq!(cfg.reveal.duration, 0.8);
    assert_eq!(cfg.parallax.distance, 80.0);
    assert_eq!(cfg.pulse, MotionConfig::default().pulse);
    assert_eq!(MotionConfig::from_json("{}").unwrap(), MotionConfig::default());
}

/// it should reject invalid or malformed config
#[test]
fn invalid_config_json() {
    let err = MotionConfig::from_json(r#"{"pulse": {"period": 0}}"#).unwrap_err();
    assert!(matches!(err, MotionError::InvalidConfig { ref field, .. } if field == "pulse.period"));
    assert_eq!(err.category(), "config");

    let err = MotionConfig::from_json(r#"{"pointer": {"spring": {"stiffness": -1, "damping": 17}}}"#)
        .unwrap_err();
    assert!(matches!(err, MotionError::InvalidConfig { .. }));

    let err = MotionConfig::from_json("{not json").unwrap_err();
    assert!(matches!(err, MotionError::Serialization { .. }));
}

/// it should serialize drained commands for transport to a host
#[test]
fn commands_serialize() {
    let mut host = CommandBuffer::new();
    let mut st = stage();
    st.mount(&mut host, ElementId(1), &DecoratorSpec::Reveal { delay: None })
        .unwrap();
    let json = serde_json::to_value(host.drain()).unwrap();
    assert_eq!(json[0]["kind"], "observe_intersection");
    assert_eq!(json[0]["element"], 1);
    assert_eq!(json[0]["margin"], -50.0);
    assert_eq!(json[1]["kind"], "set_properties");
    assert_eq!(json[1]["values"]["opacity"]["data"], 0.0);
}

/// it should treat null or missing scroll progress as progress 0
#[test]
fn unmeasured_progress_reads_zero() {
    let mut host = CommandBuffer::new();
    let mut st = stage();
    st.mount(
        &mut host,
        ElementId(1),
        &spec(json!({"kind": "interaction", "interaction": "parallax"})),
    )
    .unwrap();
    st.dispatch(
        &mut host,
        &event(json!({"kind": "scroll_progress", "element": 1, "progress": 1.0})),
    );
    host.drain();

    let events = vec![
        event(json!({"kind": "scroll_progress", "element": 1, "progress": null})),
        event(json!({"kind": "scroll_progress", "element": 1})),
    ];
    assert_eq!(st.dispatch_all(&mut host, &events), 2);

    let offsets: Vec<Option<f32>> = host
        .drain()
        .iter()
        .map(|c| match c {
            HostCommand::SetProperties { values, .. } => values
                .get(&Property::TranslateY)
                .and_then(PropertyValue::as_scalar),
            _ => None,
        })
        .collect();
    assert_eq!(offsets, vec![Some(0.0), Some(0.0)]);
}

/// it should report events the element's decorator does not handle as undelivered
#[test]
fn unhandled_event_kinds_are_not_counted() {
    let mut host = CommandBuffer::new();
    let mut st = stage();
    st.mount(&mut host, ElementId(2), &DecoratorSpec::Effect { effect: Some("pulse".into()) })
        .unwrap();
    st.mount(&mut host, ElementId(3), &DecoratorSpec::Pointer)
        .unwrap();
    host.drain();

    let events = vec![
        event(json!({"kind": "scroll_progress", "element": 2, "progress": 0.5})),
        event(json!({"kind": "intersection", "element": 3, "entered": true})),
        event(json!({"kind": "pointer", "element": 3, "event": "enter"})),
    ];
    assert_eq!(st.dispatch_all(&mut host, &events), 1);
    assert_eq!(host.requests().count(), 1);
}

/// it should not keep handles for settled reveals after their elements unmount
#[test]
fn settled_unmounts_leave_no_live_handles() {
    let mut host = CommandBuffer::new();
    let mut st = stage();
    let mut elements = Vec::new();
    for _ in 0..50 {
        let el = st.allocate_element();
        st.mount(&mut host, el, &DecoratorSpec::Reveal { delay: None })
            .unwrap();
        st.dispatch(&mut host, &HostEvent::Intersection { element: el, entered: true });
        let handle = host.live_handle(el).expect("reveal handle");
        st.dispatch(&mut host, &HostEvent::AnimationComplete { element: el, handle });
        assert!(st.unmount(&mut host, el));
        elements.push(el);
    }
    assert!(st.is_empty());
    assert!(elements.iter().all(|el| host.live_handle(*el).is_none()));
}
