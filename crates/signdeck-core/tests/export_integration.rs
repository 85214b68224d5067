//! Integration tests for the playback XML export.

use pretty_assertions::assert_eq;
use signdeck_core::elements::{MediaKind, MediaUpload, ShapeType, Text};
use signdeck_core::{Canvas, EditorConfig, ElementBody, ElementKind};

fn section_types(xml: &str) -> Vec<String> {
    xml.lines()
        .filter_map(|line| {
            let rest = line.trim_start().strip_prefix("<Content type=\"")?;
            Some(rest.split('"').next()?.to_string())
        })
        .collect()
}

#[test]
fn test_full_document() {
    let mut canvas = Canvas::new();
    canvas.add_shape(ShapeType::Rectangle);
    canvas.add_qr_code("https://example.com").unwrap();
    canvas.add_text();

    let expected = r##"<?xml version='1.0'?>
<Signage version="1">
  <Pages count="1">
    <Page index="0" width="3840" height="2160">
      <Background type="color" color="#000000"/>
      <Section index="0" x="1872" y="1056" width="96" height="48">
        <Content type="text" liveUpdateId="live-0000" text="Text" fontFamily="Noto Sans" fontSize="40" fontStyle="normal" textDecoration="none" align="near" color="#ffffff" background="transparent"/>
      </Section>
      <Section index="1" x="1720" y="880" width="400" height="400">
        <Content type="qrcode" liveUpdateId="live-0001" text="https://example.com" size="400"/>
      </Section>
      <Section index="2" x="1720" y="880" width="400" height="400">
        <Content type="shape" liveUpdateId="live-0002" fill="#4a90d9">
          <Rect width="400" height="400"/>
        </Content>
      </Section>
    </Page>
  </Pages>
  <Timeline loop="true">
    <Item page="0" duration="0"/>
  </Timeline>
</Signage>
"##;
    assert_eq!(canvas.export_xml(), expected);
}

#[test]
fn test_kind_then_insertion_order() {
    let mut canvas = Canvas::new();
    canvas.add_media(MediaUpload {
        kind: MediaKind::Image,
        name: "logo.png".to_string(),
        source: None,
        width: 800.0,
        height: 600.0,
    });
    canvas.add_shape(ShapeType::Circle);
    canvas.add_clock();
    canvas.add_weather("Oslo", "NO");
    canvas.add_qr_code("menu").unwrap();
    canvas.add_youtube("dQw4w9WgXcQ").unwrap();
    canvas.add_web_page("https://example.com/board").unwrap();
    canvas.add_text();
    canvas.add_shape(ShapeType::Pentagon);

    let xml = canvas.export_xml();
    assert_eq!(
        section_types(&xml),
        vec!["text", "webpage", "youtube", "qrcode", "weather", "clock", "shape", "shape", "image"]
    );
    assert_eq!(xml.matches("<Section ").count(), canvas.scene().len());
    assert!(xml.contains("liveUpdateId=\"live-0008\""));
    assert!(xml.contains("<File name=\"logo.png\" source=\"logo.png\"/>"));
    assert!(xml.contains("refreshInterval=\"300\""));

    let shapes: Vec<_> = canvas.scene().iter_kind(ElementKind::Shape).collect();
    assert!(matches!(&shapes[0].body, ElementBody::Shape(s) if s.shape_type == ShapeType::Circle));
}

#[test]
fn test_export_idempotent_and_escaped() {
    let mut canvas = Canvas::new();
    let id = canvas.add_text();
    let mut text = Text::new("<Sale> \"50%\" off & more");
    text.font_family = "O'Neil".to_string();
    canvas.update(id, signdeck_core::ElementUpdate::new().body(ElementBody::Text(text)));

    let first = canvas.export_xml();
    let second = canvas.export_xml();
    assert_eq!(first, second);
    assert!(first.contains("text=\"&lt;Sale&gt; &quot;50%&quot; off &amp; more\""));
    assert!(first.contains("fontFamily=\"O&apos;Neil\""));
}

#[test]
fn test_custom_page_and_background() {
    let config = EditorConfig::from_json(r##"{ "page_width": 1920, "page_height": 1080, "background": "#ff0000" }"##)
        .unwrap();
    let canvas = Canvas::with_config(config);
    let xml = canvas.export_xml();
    assert!(xml.contains("<Page index=\"0\" width=\"1920\" height=\"1080\">"));
    assert!(xml.contains("<Background type=\"color\" color=\"#ff0000\"/>"));
}
