use std::time::{Duration, Instant};

use super::*;
use crate::error::FormError;
use crate::voice::{VoiceCommandInterpreter, VoiceState};

fn field(id: &str, node: usize) -> Box<dyn Region> {
    Box::new(FieldRegion::new(RegionId::from(id), node_id(node), ""))
}

/// The id the `index`-th node of a document would get.
fn node_id(index: usize) -> NodeId {
    let mut doc = Document::new();
    let mut last = doc.root();
    for _ in 0..index {
        last = doc.create_text("x");
    }
    last
}

fn router() -> RegionRouter {
    let mut router = RegionRouter::new();
    router.register(field("a", 1)).unwrap();
    router.register(field("b", 2)).unwrap();
    router
        .register(Box::new(ImageSlot::new(RegionId::from("img"), node_id(3), true)))
        .unwrap();
    router
}

#[test]
fn test_generate_ids_are_unique() {
    let a = RegionId::generate("editable");
    let b = RegionId::generate("editable");
    assert_ne!(a, b);
    assert!(a.as_str().starts_with("editable-"));
}

#[test]
fn test_register_rejects_duplicate_id() {
    let mut router = router();
    let err = router.register(field("a", 9)).unwrap_err();
    assert!(matches!(err, FormError::DuplicateRegion(id) if id == "a"));
    assert_eq!(router.len(), 3);
}

#[test]
fn test_lookup_by_id_and_node() {
    let router = router();
    assert!(router.contains(&RegionId::from("b")));
    assert!(router.contains_node(node_id(2)));
    assert_eq!(router.by_node(node_id(3)).unwrap().kind(), RegionKind::ImageSlot);
    assert!(router.get(&RegionId::from("missing")).is_none());
}

#[test]
fn test_iteration_keeps_registration_order() {
    let router = router();
    let ids: Vec<&str> = router.iter().map(|r| r.id().as_str()).collect();
    assert_eq!(ids, vec!["a", "b", "img"]);
    assert_eq!(router.fields().count(), 2);
}

#[test]
fn test_focus_moves_between_regions() {
    let mut router = router();
    let mut ctx = InteractionContext::default();

    let outcome = router
        .dispatch(&RegionId::from("a"), RegionEvent::Focus, &mut ctx)
        .unwrap();
    assert_eq!(outcome, EventOutcome::Focused);
    assert_eq!(ctx.focused(), Some(&RegionId::from("a")));

    router
        .dispatch(&RegionId::from("b"), RegionEvent::Focus, &mut ctx)
        .unwrap();
    assert_eq!(ctx.focused(), Some(&RegionId::from("b")));

    router
        .dispatch(&RegionId::from("b"), RegionEvent::Blur, &mut ctx)
        .unwrap();
    assert_eq!(ctx.focused(), None);
}

#[test]
fn test_dispatch_unknown_region() {
    let mut router = router();
    let mut ctx = InteractionContext::default();
    let err = router
        .dispatch(&RegionId::from("nope"), RegionEvent::Click, &mut ctx)
        .unwrap_err();
    assert!(matches!(err, FormError::RegionNotFound(_)));
}

#[test]
fn test_voice_activation_single_session() {
    let mut router = router();
    let mut ctx = InteractionContext::default();

    let first = router
        .dispatch(&RegionId::from("a"), RegionEvent::ActivateVoice, &mut ctx)
        .unwrap();
    assert_eq!(first, EventOutcome::Listening);

    let second = router
        .dispatch(&RegionId::from("b"), RegionEvent::ActivateVoice, &mut ctx)
        .unwrap();
    assert_eq!(second, EventOutcome::Ignored);
    assert_eq!(
        ctx.voice.state(),
        &VoiceState::Listening {
            target: RegionId::from("a")
        }
    );
}

#[test]
fn test_voice_unavailable_is_ignored() {
    let mut router = router();
    let mut ctx =
        InteractionContext::new(VoiceCommandInterpreter::default().without_recognition());
    let outcome = router
        .dispatch(&RegionId::from("a"), RegionEvent::ActivateVoice, &mut ctx)
        .unwrap();
    assert_eq!(outcome, EventOutcome::Ignored);
    assert_eq!(ctx.voice.state(), &VoiceState::Idle);
}

#[test]
fn test_image_slot_click_requests_image() {
    let mut router = router();
    let mut ctx = InteractionContext::default();
    let outcome = router
        .dispatch(&RegionId::from("img"), RegionEvent::Click, &mut ctx)
        .unwrap();
    assert_eq!(outcome, EventOutcome::AwaitingImage);
    assert_eq!(ctx.image_target(), Some(&RegionId::from("img")));

    let voice = router
        .dispatch(&RegionId::from("img"), RegionEvent::ActivateVoice, &mut ctx)
        .unwrap();
    assert_eq!(voice, EventOutcome::Ignored);
}

#[test]
fn test_frozen_field_routes_click_to_image() {
    let mut router = router();
    let mut ctx = InteractionContext::default();
    router.get_mut(&RegionId::from("a")).unwrap().freeze();

    let click = router
        .dispatch(&RegionId::from("a"), RegionEvent::Click, &mut ctx)
        .unwrap();
    assert_eq!(click, EventOutcome::AwaitingImage);

    let voice = router
        .dispatch(&RegionId::from("a"), RegionEvent::ActivateVoice, &mut ctx)
        .unwrap();
    assert_eq!(voice, EventOutcome::Ignored);
    assert_eq!(ctx.voice.state(), &VoiceState::Idle);
}

#[test]
fn test_live_field_click_focuses() {
    let mut router = router();
    let mut ctx = InteractionContext::default();
    let click = router
        .dispatch(&RegionId::from("b"), RegionEvent::Click, &mut ctx)
        .unwrap();
    assert_eq!(click, EventOutcome::Focused);
}

#[test]
fn test_cue_expiry() {
    let now = Instant::now();
    let listening = Cue::listening(now);
    assert!(listening.is_active(now + Duration::from_millis(2900)));
    assert!(!listening.is_active(now + LISTENING_CUE));

    let success = Cue::success(now);
    assert!(success.is_active(now + Duration::from_millis(799)));
    assert!(!success.is_active(now + Duration::from_millis(801)));
}

#[test]
fn test_decorate_focus_and_cues() {
    let mut doc = Document::parse("<p id=x>Name</p>");
    let p = doc.first_by_tag("p").unwrap();
    let mut region = FieldRegion::new(RegionId::from("x"), p, "Name");
    let mut ctx = InteractionContext::default();
    let now = Instant::now();

    region.decorate(&mut doc, now);
    assert_eq!(doc.attr(p, "style"), None);

    region.on_focus(&mut ctx);
    region.signal(Cue::listening(now));
    region.decorate(&mut doc, now);
    assert_eq!(doc.style_property(p, "outline").as_deref(), Some(FOCUS_OUTLINE));
    assert_eq!(doc.style_property(p, "border").as_deref(), Some(LISTENING_BORDER));

    let mut flashed = Document::parse("<p>Name</p>");
    let p2 = flashed.first_by_tag("p").unwrap();
    let mut region2 = FieldRegion::new(RegionId::from("y"), p2, "Name");
    region2.signal(Cue::success(now));
    region2.decorate(&mut flashed, now);
    assert_eq!(
        flashed.style_property(p2, "background-color").as_deref(),
        Some(SUCCESS_BACKGROUND)
    );

    let mut expired = Document::parse("<p>Name</p>");
    let p3 = expired.first_by_tag("p").unwrap();
    region2.decorate(&mut expired, now + SUCCESS_FLASH);
    assert_eq!(expired.attr(p3, "style"), None);
}
