use super::*;
use crate::region::{EventOutcome, RegionEvent, RegionState};
use crate::transform::{EditableTransformer, PLACEHOLDER_ALT};

const PNG_HEADER: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

struct Fixture {
    doc: Document,
    regions: RegionRouter,
    ctx: InteractionContext,
    images: UploadedImages,
}

fn fixture(html: &str) -> Fixture {
    let mut doc = Document::parse(html);
    let mut regions = RegionRouter::new();
    EditableTransformer::new()
        .unwrap()
        .transform(&mut doc, &mut regions)
        .unwrap();
    Fixture {
        doc,
        regions,
        ctx: InteractionContext::default(),
        images: UploadedImages::new(),
    }
}

impl Fixture {
    fn first_id(&self) -> RegionId {
        self.regions.iter().next().unwrap().id().clone()
    }

    fn attach(&mut self, id: &RegionId, file: &ImageFile) -> AttachOutcome {
        let outcome = self
            .regions
            .dispatch(id, RegionEvent::AttachImage, &mut self.ctx)
            .unwrap();
        assert_eq!(outcome, EventOutcome::AwaitingImage);
        ImageAttachmentHandler::new().attach(
            &mut self.doc,
            &mut self.regions,
            &mut self.ctx,
            &mut self.images,
            file,
        )
    }
}

fn png(name: &str) -> ImageFile {
    ImageFile::new(name, PNG_HEADER.to_vec())
}

#[test]
fn test_mime_from_content_type() {
    let file = ImageFile::new("a.svg", b"<svg/>".to_vec()).with_content_type("image/svg+xml");
    assert_eq!(file.mime_type(), "image/svg+xml");
}

#[test]
fn test_mime_sniffed_from_bytes() {
    assert_eq!(png("a.png").mime_type(), "image/png");
    assert_eq!(
        ImageFile::new("b.bin", vec![1, 2, 3]).mime_type(),
        "application/octet-stream"
    );
}

#[test]
fn test_data_url() {
    let file = ImageFile::new("x", b"abc".to_vec()).with_content_type("image/gif");
    assert_eq!(file.to_data_url(), "data:image/gif;base64,YWJj");
}

#[test]
fn test_replace_image_slot() {
    let mut f = fixture(r#"<img src="logo.png">"#);
    let id = f.first_id();
    let outcome = f.attach(&id, &png("brand.png"));
    assert_eq!(outcome, AttachOutcome::Replaced(id.clone()));

    let img = f.doc.first_by_tag("img").unwrap();
    let src = f.doc.attr(img, "src").unwrap();
    assert!(src.starts_with("data:image/png;base64,"));
    assert_eq!(f.doc.attr(img, "alt"), Some("brand.png"));
    assert_ne!(f.doc.attr(img, "alt"), Some(PLACEHOLDER_ALT));
    assert_eq!(f.doc.style_property(img, "border"), None);
    assert_eq!(f.doc.style_property(img, "max-width").as_deref(), Some("100%"));
    assert_eq!(f.images.get(&id), Some(src));
    assert!(f.ctx.image_target().is_none());
}

#[test]
fn test_insert_into_field_freezes_it() {
    let mut f = fixture("<div>(logo)</div>");
    let id = f.first_id();
    let outcome = f.attach(&id, &png("logo.png"));
    assert_eq!(outcome, AttachOutcome::Inserted(id.clone()));

    let div = f.doc.first_by_tag("div").unwrap();
    assert_eq!(f.doc.attr(div, "contenteditable"), Some("false"));
    assert_eq!(f.doc.style_property(div, "cursor").as_deref(), Some("pointer"));
    let children = f.doc.children(div);
    assert_eq!(children.len(), 1);
    assert!(f.doc.is_tag(children[0], "img"));
    assert_eq!(
        f.doc.style_property(children[0], "margin").as_deref(),
        Some("10px 0")
    );

    let region = f.regions.get(&id).unwrap();
    assert_eq!(region.state(), RegionState::Frozen);
    assert_eq!(f.images.len(), 1);

    let click = f
        .regions
        .dispatch(&id, RegionEvent::Click, &mut f.ctx)
        .unwrap();
    assert_eq!(click, EventOutcome::AwaitingImage);
}

#[test]
fn test_replacing_again_overwrites_map_entry() {
    let mut f = fixture("<div>(photo)</div>");
    let id = f.first_id();
    f.attach(&id, &png("one.png"));
    let second = ImageFile::new("two.gif", b"GIF89a".to_vec());
    f.attach(&id, &second);

    assert_eq!(f.images.len(), 1);
    assert!(f.images.get(&id).unwrap().starts_with("data:image/gif;base64,"));
    let div = f.doc.first_by_tag("div").unwrap();
    assert_eq!(f.doc.elements_by_tag("img").len(), 1);
    assert_eq!(f.doc.children(div).len(), 1);
}

#[test]
fn test_empty_file_is_ignored() {
    let mut f = fixture("<div>(photo)</div>");
    let id = f.first_id();
    let outcome = f.attach(&id, &ImageFile::new("empty.png", Vec::new()));
    assert_eq!(outcome, AttachOutcome::Ignored);
    assert!(f.images.is_empty());
    assert_eq!(f.regions.get(&id).unwrap().state(), RegionState::Live);
}

#[test]
fn test_missing_target_is_ignored() {
    let mut f = fixture("<div>(photo)</div>");
    let outcome = ImageAttachmentHandler::new().attach(
        &mut f.doc,
        &mut f.regions,
        &mut f.ctx,
        &mut f.images,
        &png("a.png"),
    );
    assert_eq!(outcome, AttachOutcome::Ignored);
    assert!(f.images.is_empty());
}
